//! Greedy single-pass assignment.
//!
//! # Algorithm
//!
//! 1. Sort deployments by total required responders, descending (stable).
//! 2. For each deployment, process needs in list order:
//!    - first tally responders already picked for this deployment that
//!      satisfy the need,
//!    - then scan unused responders in input order and take each one that
//!      satisfies the need until the count is reached.
//! 3. Commit the deployment's responders to the global used set.
//!
//! There is no backtracking. A large deployment processed early may take a
//! responder that a later deployment needed more, leaving it under-filled.
//!
//! # Complexity
//! O(d · n · r) satisfaction checks, d = deployments, n = needs per
//! deployment, r = responders.

use crate::graph::CompetencyGraph;
use crate::models::{Assignment, AssignmentEntry, Deployment, Responder};

use super::eligibility::EligibilityTable;
use super::{Assigner, Strategy};

/// Priority-ordered single-pass assigner.
///
/// # Example
///
/// ```
/// use u_roster::assigner::{Assigner, GreedyAssigner};
/// use u_roster::graph::CompetencyGraph;
/// use u_roster::models::{Deployment, Need, Responder};
///
/// let graph = CompetencyGraph::new();
/// let responders = vec![Responder::new("R1").unwrap().with_competency("Driver")];
/// let deployments = vec![
///     Deployment::new("D1").unwrap().with_need(Need::new("Driver", 1).unwrap()),
/// ];
///
/// let assignment = GreedyAssigner::new().assign(&graph, &responders, &deployments);
/// assert_eq!(assignment.responders_for("D1"), ["R1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyAssigner;

impl GreedyAssigner {
    /// Creates a greedy assigner.
    pub fn new() -> Self {
        Self
    }

    /// Deployment indices in processing order.
    fn order(deployments: &[Deployment]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..deployments.len()).collect();
        indices.sort_by(|&a, &b| {
            deployments[b]
                .total_required()
                .cmp(&deployments[a].total_required())
        });
        indices
    }
}

impl Assigner for GreedyAssigner {
    fn strategy(&self) -> Strategy {
        Strategy::Greedy
    }

    fn assign(
        &self,
        graph: &CompetencyGraph,
        responders: &[Responder],
        deployments: &[Deployment],
    ) -> Assignment {
        let table = EligibilityTable::build(graph, responders, deployments);
        let mut used = vec![false; responders.len()];
        let mut slots: Vec<Vec<usize>> = vec![Vec::new(); deployments.len()];

        tracing::debug!(
            deployments = deployments.len(),
            responders = responders.len(),
            "greedy assignment started"
        );

        for d in Self::order(deployments) {
            let mut picked: Vec<usize> = Vec::new();

            for n in 0..table.need_count(d) {
                let required = table.required(d, n);
                let mut tallied = picked
                    .iter()
                    .filter(|&&r| table.satisfies(d, n, r))
                    .count() as u32;
                tallied = tallied.min(required);

                for r in 0..responders.len() {
                    if tallied >= required {
                        break;
                    }
                    if !used[r] && !picked.contains(&r) && table.satisfies(d, n, r) {
                        picked.push(r);
                        tallied += 1;
                    }
                }
            }

            for &r in &picked {
                used[r] = true;
            }
            tracing::trace!(
                deployment = deployments[d].id(),
                picked = picked.len(),
                required = deployments[d].total_required(),
                "deployment filled"
            );
            slots[d] = picked;
        }

        let mut assignment = Assignment::new();
        for (deployment, members) in deployments.iter().zip(slots) {
            assignment.add_entry(AssignmentEntry::new(
                deployment.id(),
                members.iter().map(|&r| responders[r].id().to_string()).collect(),
            ));
        }

        tracing::debug!(
            assigned = assignment.assigned_count(),
            "greedy assignment finished"
        );
        assignment
    }
}
