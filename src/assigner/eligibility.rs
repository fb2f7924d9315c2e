//! Precomputed responder × need satisfaction table.
//!
//! Both strategies ask "does responder r satisfy need n of deployment d"
//! many times per run. The answers depend only on the read-only inputs, so
//! they are computed once per call, by index.

use crate::graph::CompetencyGraph;
use crate::models::{Deployment, Responder};

use super::score::{max_deployment_points, need_points};

/// Index-based view of one assignment run.
#[derive(Debug, Clone)]
pub(crate) struct EligibilityTable {
    /// `satisfies[d][n][r]`
    satisfies: Vec<Vec<Vec<bool>>>,
    /// Need counts, `counts[d][n]`.
    counts: Vec<Vec<u32>>,
    /// Highest reachable points per deployment.
    max_points: Vec<i64>,
    responder_count: usize,
}

impl EligibilityTable {
    pub(crate) fn build(
        graph: &CompetencyGraph,
        responders: &[Responder],
        deployments: &[Deployment],
    ) -> Self {
        let satisfies: Vec<Vec<Vec<bool>>> = deployments
            .iter()
            .map(|d| {
                d.needs()
                    .iter()
                    .map(|need| {
                        responders
                            .iter()
                            .map(|r| graph.satisfies(r.competencies(), need.competency()))
                            .collect()
                    })
                    .collect()
            })
            .collect();

        let counts: Vec<Vec<u32>> = deployments
            .iter()
            .map(|d| d.needs().iter().map(|n| n.count()).collect())
            .collect();

        let max_points: Vec<i64> = deployments.iter().map(max_deployment_points).collect();

        Self {
            satisfies,
            counts,
            max_points,
            responder_count: responders.len(),
        }
    }

    #[inline]
    pub(crate) fn satisfies(&self, deployment: usize, need: usize, responder: usize) -> bool {
        self.satisfies[deployment][need][responder]
    }

    pub(crate) fn need_count(&self, deployment: usize) -> usize {
        self.counts[deployment].len()
    }

    pub(crate) fn required(&self, deployment: usize, need: usize) -> u32 {
        self.counts[deployment][need]
    }

    pub(crate) fn responder_count(&self) -> usize {
        self.responder_count
    }

    pub(crate) fn deployment_count(&self) -> usize {
        self.counts.len()
    }

    pub(crate) fn max_points(&self, deployment: usize) -> i64 {
        self.max_points[deployment]
    }

    /// Same formula as `Evaluator::deployment_score`, on indices.
    pub(crate) fn deployment_score(&self, deployment: usize, members: &[usize]) -> i64 {
        (0..self.need_count(deployment))
            .map(|n| {
                let covered = members
                    .iter()
                    .filter(|&&r| self.satisfies(deployment, n, r))
                    .count() as u32;
                need_points(covered, self.required(deployment, n))
            })
            .sum()
    }

    pub(crate) fn total_score(&self, slots: &[Vec<usize>]) -> i64 {
        slots
            .iter()
            .enumerate()
            .map(|(d, members)| self.deployment_score(d, members))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HierarchyConfig;
    use crate::models::Need;

    #[test]
    fn test_table_uses_implication() {
        let graph = CompetencyGraph::from_hierarchy(&HierarchyConfig::default_tiers()).unwrap();
        let responders = vec![
            Responder::new("R1").unwrap().with_competency("PSE1"),
            Responder::new("R2").unwrap().with_competency("TeamLead"),
        ];
        let deployments = vec![Deployment::new("D1")
            .unwrap()
            .with_need(Need::new("PSE1", 2).unwrap())
            .with_need(Need::new("PSE2", 1).unwrap())];

        let t = EligibilityTable::build(&graph, &responders, &deployments);
        assert!(t.satisfies(0, 0, 0));
        assert!(t.satisfies(0, 0, 1));
        assert!(!t.satisfies(0, 1, 0));
        assert!(t.satisfies(0, 1, 1));
        assert_eq!(t.need_count(0), 2);
        assert_eq!(t.required(0, 0), 2);
        assert_eq!(t.max_points(0), 25 + 15);
        assert_eq!(t.deployment_score(0, &[0, 1]), 25 + 15);
        assert_eq!(t.total_score(&[vec![1]]), 10 + 15);
    }
}
