//! Candidate generation for the exhaustive search.
//!
//! Candidates are produced one at a time and handed to a
//! [`CandidateSink`], so the caller can stop the walk at any point and
//! nothing beyond the current path is ever held in memory.
//!
//! # Enumeration order
//!
//! - Needs are taken in list order. For each need, subset sizes run from
//!   `min(count, eligible)` down to 0, and subsets of one size come in
//!   lexicographic order of responder position.
//! - The whole walk is repeated once per total set size, largest first.
//!   Exact fills therefore come before partial fills, and the empty
//!   candidate is always last.
//! - The same responder set can be reached through different needs and is
//!   then emitted again. A repeat scores the same as its first occurrence,
//!   which the search has already recorded.

use std::ops::ControlFlow;

use super::eligibility::EligibilityTable;

/// Consumer of a candidate walk.
pub(crate) trait CandidateSink {
    /// Called once per walk step. `Break` ends the walk.
    fn step(&mut self) -> ControlFlow<()>;

    /// Called with each candidate responder set. `Break` ends the walk.
    fn candidate(&mut self, members: &[usize]) -> ControlFlow<()>;
}

/// Candidate responder sets for one deployment, given the responders
/// already committed elsewhere in the branch.
///
/// A responder picked for one need is not offered to later needs of the
/// same deployment.
pub(crate) struct Candidates<'t> {
    table: &'t EligibilityTable,
    deployment: usize,
    /// Uncommitted responders satisfying each need.
    pools: Vec<Vec<usize>>,
    /// `capacity[n]`: most responders needs `n..` can add.
    capacity: Vec<usize>,
}

impl<'t> Candidates<'t> {
    pub(crate) fn new(table: &'t EligibilityTable, deployment: usize, used: &[bool]) -> Self {
        let needs = table.need_count(deployment);
        let pools: Vec<Vec<usize>> = (0..needs)
            .map(|n| {
                (0..table.responder_count())
                    .filter(|&r| !used[r] && table.satisfies(deployment, n, r))
                    .collect()
            })
            .collect();

        let mut capacity = vec![0usize; needs + 1];
        for n in (0..needs).rev() {
            let room = (table.required(deployment, n) as usize).min(pools[n].len());
            capacity[n] = capacity[n + 1] + room;
        }

        Self {
            table,
            deployment,
            pools,
            capacity,
        }
    }

    /// Walks every candidate in enumeration order.
    pub(crate) fn for_each<S: CandidateSink>(&self, sink: &mut S) -> ControlFlow<()> {
        let mut walk = Walk {
            candidates: self,
            sink,
            taken: vec![false; self.table.responder_count()],
            chosen: Vec::new(),
            target: 0,
        };
        for target in (0..=self.capacity[0]).rev() {
            walk.target = target;
            walk.need(0)?;
        }
        ControlFlow::Continue(())
    }
}

/// One pass over the needs, emitting only sets of exactly `target`
/// responders.
struct Walk<'c, 't, S> {
    candidates: &'c Candidates<'t>,
    sink: &'c mut S,
    /// Responders already picked for an earlier need of this deployment.
    taken: Vec<bool>,
    chosen: Vec<usize>,
    target: usize,
}

impl<S: CandidateSink> Walk<'_, '_, S> {
    fn need(&mut self, n: usize) -> ControlFlow<()> {
        self.sink.step()?;

        let c = self.candidates;
        if n == c.pools.len() {
            if self.chosen.len() == self.target {
                return self.sink.candidate(&self.chosen);
            }
            return ControlFlow::Continue(());
        }

        let pool: Vec<usize> = c.pools[n]
            .iter()
            .copied()
            .filter(|&r| !self.taken[r])
            .collect();
        let room = self.target - self.chosen.len();
        let largest = (c.table.required(c.deployment, n) as usize)
            .min(pool.len())
            .min(room);

        for size in (0..=largest).rev() {
            // Smaller sizes fall even further short of the target.
            if self.chosen.len() + size + c.capacity[n + 1] < self.target {
                break;
            }
            self.pick(n, &pool, 0, size)?;
        }
        ControlFlow::Continue(())
    }

    /// Extends `chosen` with `k` more members of `pool[start..]`, in
    /// lexicographic order, then moves on to the next need.
    fn pick(&mut self, n: usize, pool: &[usize], start: usize, k: usize) -> ControlFlow<()> {
        if k == 0 {
            return self.need(n + 1);
        }
        for i in start..=pool.len() - k {
            let r = pool[i];
            self.chosen.push(r);
            self.taken[r] = true;
            let flow = self.pick(n, pool, i + 1, k - 1);
            self.taken[r] = false;
            self.chosen.pop();
            flow?;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HierarchyConfig;
    use crate::graph::CompetencyGraph;
    use crate::models::{Deployment, Need, Responder};

    fn table(responders: &[Responder], deployments: &[Deployment]) -> EligibilityTable {
        let graph = CompetencyGraph::from_hierarchy(&HierarchyConfig::default_tiers()).unwrap();
        EligibilityTable::build(&graph, responders, deployments)
    }

    fn pse1_pool(n: usize) -> Vec<Responder> {
        (0..n)
            .map(|i| Responder::new(format!("R{i}")).unwrap().with_competency("PSE1"))
            .collect()
    }

    /// Records candidates, optionally stopping after a number of steps.
    #[derive(Default)]
    struct Collect {
        seen: Vec<Vec<usize>>,
        steps: usize,
        step_limit: Option<usize>,
    }

    impl CandidateSink for Collect {
        fn step(&mut self) -> ControlFlow<()> {
            self.steps += 1;
            match self.step_limit {
                Some(limit) if self.steps > limit => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            }
        }

        fn candidate(&mut self, members: &[usize]) -> ControlFlow<()> {
            self.seen.push(members.to_vec());
            ControlFlow::Continue(())
        }
    }

    fn collect(t: &EligibilityTable, deployment: usize, used: &[bool]) -> Vec<Vec<usize>> {
        let mut sink = Collect::default();
        let flow = Candidates::new(t, deployment, used).for_each(&mut sink);
        assert!(flow.is_continue());
        sink.seen
    }

    #[test]
    fn test_subsets_lexicographic() {
        let responders = pse1_pool(4);
        let deployments = vec![Deployment::new("D1")
            .unwrap()
            .with_need(Need::new("PSE1", 2).unwrap())];
        let t = table(&responders, &deployments);

        let c = collect(&t, 0, &[false; 4]);
        assert_eq!(
            &c[..6],
            &[
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
        assert_eq!(&c[6..], &[vec![0], vec![1], vec![2], vec![3], vec![]]);
    }

    #[test]
    fn test_candidates_exact_fill_first() {
        // Alice holds PSE2 (implies PSE1), Bob holds PSE1
        let responders = vec![
            Responder::new("alice").unwrap().with_competency("PSE2"),
            Responder::new("bob").unwrap().with_competency("PSE1"),
        ];
        let deployments = vec![Deployment::new("D1")
            .unwrap()
            .with_need(Need::new("PSE1", 1).unwrap())
            .with_need(Need::new("PSE2", 1).unwrap())];
        let t = table(&responders, &deployments);

        // [0] comes back once through PSE1 and once through PSE2
        let c = collect(&t, 0, &[false, false]);
        assert_eq!(c, vec![vec![1, 0], vec![0], vec![1], vec![0], vec![]]);
    }

    #[test]
    fn test_candidates_respect_used() {
        let responders = pse1_pool(3);
        let deployments = vec![Deployment::new("D1")
            .unwrap()
            .with_need(Need::new("PSE1", 2).unwrap())];
        let t = table(&responders, &deployments);

        let c = collect(&t, 0, &[false, true, false]);
        assert_eq!(c, vec![vec![0, 2], vec![0], vec![2], vec![]]);
    }

    #[test]
    fn test_candidates_no_eligible() {
        let responders = vec![Responder::new("R1").unwrap().with_competency("Driver")];
        let deployments = vec![Deployment::new("D1")
            .unwrap()
            .with_need(Need::new("PSE1", 1).unwrap())];
        let t = table(&responders, &deployments);

        assert_eq!(collect(&t, 0, &[false]), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_walk_stops_on_break() {
        // C(30, 15) candidates of full size alone; the walk must not
        // build them before the sink can stop it
        let responders = pse1_pool(30);
        let deployments = vec![Deployment::new("D1")
            .unwrap()
            .with_need(Need::new("PSE1", 15).unwrap())];
        let t = table(&responders, &deployments);

        let mut sink = Collect {
            step_limit: Some(40),
            ..Collect::default()
        };
        let flow = Candidates::new(&t, 0, &[false; 30]).for_each(&mut sink);

        assert!(flow.is_break());
        assert_eq!(sink.steps, 41);
        assert_eq!(sink.seen[0], (0..15).collect::<Vec<usize>>());
        assert!(sink.seen.iter().all(|c| c.len() == 15));
    }
}
