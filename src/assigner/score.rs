//! Assignment scoring.
//!
//! For every deployment and every need, `covered` is the number of
//! responders assigned to that deployment who satisfy the need's
//! competency. The need contributes `10 × min(covered, required)` points
//! plus a flat `5` once `covered ≥ required`.
//!
//! A responder counts toward every need of its deployment it satisfies,
//! not just the one it was picked for.
//!
//! The score is the search objective of the exhaustive strategy and the
//! common yardstick for comparing strategies.

use std::collections::HashMap;

use crate::graph::CompetencyGraph;
use crate::models::{Assignment, Deployment, Responder};

/// Points per covered responder slot.
pub const POINTS_PER_COVERED: i64 = 10;

/// Bonus for a need that is fully covered.
pub const FULL_COVERAGE_BONUS: i64 = 5;

/// Points contributed by one need.
#[inline]
pub fn need_points(covered: u32, required: u32) -> i64 {
    let mut points = POINTS_PER_COVERED * i64::from(covered.min(required));
    if covered >= required {
        points += FULL_COVERAGE_BONUS;
    }
    points
}

/// Highest score a deployment can reach.
pub fn max_deployment_points(deployment: &Deployment) -> i64 {
    deployment
        .needs()
        .iter()
        .map(|n| need_points(n.count(), n.count()))
        .sum()
}

/// Pure scoring function over an assignment.
///
/// Reads the competency graph for satisfaction checks only.
///
/// # Example
///
/// ```
/// use u_roster::assigner::Evaluator;
/// use u_roster::config::HierarchyConfig;
/// use u_roster::graph::CompetencyGraph;
/// use u_roster::models::{Assignment, AssignmentEntry, Deployment, Need, Responder};
///
/// let graph = CompetencyGraph::from_hierarchy(&HierarchyConfig::default_tiers()).unwrap();
/// let responders = vec![Responder::new("R1").unwrap().with_competency("PSE2")];
/// let deployments = vec![
///     Deployment::new("D1").unwrap().with_need(Need::new("PSE1", 1).unwrap()),
/// ];
/// let mut assignment = Assignment::new();
/// assignment.add_entry(AssignmentEntry::new("D1", vec!["R1".into()]));
///
/// let score = Evaluator::new(&graph).score(&assignment, &deployments, &responders);
/// assert_eq!(score, 15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'g> {
    graph: &'g CompetencyGraph,
}

impl<'g> Evaluator<'g> {
    /// Creates an evaluator over a competency graph.
    pub fn new(graph: &'g CompetencyGraph) -> Self {
        Self { graph }
    }

    /// Scores an assignment.
    ///
    /// Deployments missing from the assignment score 0. Responder IDs
    /// not found in `responders` cover nothing.
    pub fn score(
        &self,
        assignment: &Assignment,
        deployments: &[Deployment],
        responders: &[Responder],
    ) -> i64 {
        let by_id: HashMap<&str, &Responder> =
            responders.iter().map(|r| (r.id(), r)).collect();

        deployments
            .iter()
            .map(|deployment| {
                let members: Vec<&Responder> = assignment
                    .responders_for(deployment.id())
                    .iter()
                    .filter_map(|id| by_id.get(id.as_str()).copied())
                    .collect();
                self.deployment_score(deployment, &members)
            })
            .sum()
    }

    /// Scores one deployment given its assigned responders.
    pub fn deployment_score(&self, deployment: &Deployment, members: &[&Responder]) -> i64 {
        deployment
            .needs()
            .iter()
            .map(|need| {
                let covered = self.covered(need.competency(), members);
                need_points(covered, need.count())
            })
            .sum()
    }

    /// Number of members satisfying a competency.
    pub fn covered(&self, competency: &str, members: &[&Responder]) -> u32 {
        members
            .iter()
            .filter(|r| self.graph.satisfies(r.competencies(), competency))
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HierarchyConfig;
    use crate::models::{AssignmentEntry, Need};

    fn graph() -> CompetencyGraph {
        CompetencyGraph::from_hierarchy(&HierarchyConfig::default_tiers()).unwrap()
    }

    fn responder(id: &str, competencies: &[&str]) -> Responder {
        Responder::new(id)
            .unwrap()
            .with_competencies(competencies.iter().copied())
    }

    fn deployment(id: &str, needs: &[(&str, u32)]) -> Deployment {
        needs.iter().fold(Deployment::new(id).unwrap(), |d, &(c, n)| {
            d.with_need(Need::new(c, n).unwrap())
        })
    }

    fn assignment(entries: &[(&str, &[&str])]) -> Assignment {
        let mut a = Assignment::new();
        for (d, rs) in entries {
            a.add_entry(AssignmentEntry::new(
                *d,
                rs.iter().map(|s| s.to_string()).collect(),
            ));
        }
        a
    }

    #[test]
    fn test_need_points() {
        assert_eq!(need_points(0, 1), 0);
        assert_eq!(need_points(1, 1), 15);
        assert_eq!(need_points(1, 2), 10);
        assert_eq!(need_points(2, 2), 25);
        // Over-coverage is capped
        assert_eq!(need_points(5, 2), 25);
    }

    #[test]
    fn test_max_deployment_points() {
        let d = deployment("D1", &[("PSE1", 2), ("TeamLead", 1)]);
        assert_eq!(max_deployment_points(&d), 25 + 15);
    }

    #[test]
    fn test_score_shared_coverage() {
        // Alice (PSE2) counts toward both the PSE1 and the PSE2 need
        let g = graph();
        let responders = vec![responder("alice", &["PSE2"])];
        let deployments = vec![deployment("D1", &[("PSE1", 1), ("PSE2", 1)])];
        let a = assignment(&[("D1", &["alice"])]);

        assert_eq!(Evaluator::new(&g).score(&a, &deployments, &responders), 30);
    }

    #[test]
    fn test_score_partial() {
        let g = graph();
        let responders = vec![responder("R1", &["PSE1"])];
        let deployments = vec![deployment("D1", &[("PSE1", 3)])];
        let a = assignment(&[("D1", &["R1"])]);

        assert_eq!(Evaluator::new(&g).score(&a, &deployments, &responders), 10);
    }

    #[test]
    fn test_score_missing_entries_and_unknown_ids() {
        let g = graph();
        let responders = vec![responder("R1", &["PSE1"])];
        let deployments = vec![
            deployment("D1", &[("PSE1", 1)]),
            deployment("D2", &[("PSE1", 1)]),
        ];
        let a = assignment(&[("D1", &["ghost"])]);

        assert_eq!(Evaluator::new(&g).score(&a, &deployments, &responders), 0);
    }

    #[test]
    fn test_score_empty() {
        let g = graph();
        assert_eq!(Evaluator::new(&g).score(&Assignment::new(), &[], &[]), 0);
    }

    #[test]
    fn test_score_is_deterministic() {
        let g = graph();
        let before = g.clone();
        let responders = vec![responder("R1", &["TeamLead"]), responder("R2", &["PSE1"])];
        let deployments = vec![deployment("D1", &[("TeamLead", 1), ("PSE1", 2)])];
        let a = assignment(&[("D1", &["R1", "R2"])]);

        let eval = Evaluator::new(&g);
        let first = eval.score(&a, &deployments, &responders);
        assert_eq!(first, eval.score(&a, &deployments, &responders));
        assert_eq!(first, 15 + 25);
        assert_eq!(g, before);
    }
}
