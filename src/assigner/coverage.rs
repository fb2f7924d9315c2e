//! Coverage diagnostics.
//!
//! Breaks an assignment's score down per need so callers can see which
//! deployments are short, and by how much.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total score | Sum of need points (same as `Evaluator::score`) |
//! | Fully covered needs | Needs with covered ≥ required |
//! | Fill rate | Σ min(covered, required) / Σ required |

use std::collections::HashMap;

use crate::graph::CompetencyGraph;
use crate::models::{Assignment, Deployment, Responder};

use super::score::{need_points, Evaluator};

/// Coverage of one need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeedCoverage {
    /// Owning deployment.
    pub deployment_id: String,
    /// Required competency.
    pub competency: String,
    /// Responders required.
    pub required: u32,
    /// Assigned responders satisfying the competency.
    pub covered: u32,
}

impl NeedCoverage {
    /// Whether the need is fully covered.
    pub fn is_covered(&self) -> bool {
        self.covered >= self.required
    }

    /// Missing responders (0 if covered).
    pub fn shortfall(&self) -> u32 {
        self.required.saturating_sub(self.covered)
    }

    /// Points this need contributes.
    pub fn points(&self) -> i64 {
        need_points(self.covered, self.required)
    }
}

/// Per-need coverage breakdown of an assignment.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// One row per need, deployments and needs in input order.
    pub needs: Vec<NeedCoverage>,
    /// Total score.
    pub total_score: i64,
    /// Number of fully covered needs.
    pub fully_covered_needs: usize,
    /// Filled fraction of all required slots (0.0..=1.0).
    pub fill_rate: f64,
}

impl CoverageReport {
    /// Computes the report.
    pub fn calculate(
        graph: &CompetencyGraph,
        assignment: &Assignment,
        deployments: &[Deployment],
        responders: &[Responder],
    ) -> Self {
        let evaluator = Evaluator::new(graph);
        let by_id: HashMap<&str, &Responder> =
            responders.iter().map(|r| (r.id(), r)).collect();

        let mut needs = Vec::new();
        for deployment in deployments {
            let members: Vec<&Responder> = assignment
                .responders_for(deployment.id())
                .iter()
                .filter_map(|id| by_id.get(id.as_str()).copied())
                .collect();

            for need in deployment.needs() {
                needs.push(NeedCoverage {
                    deployment_id: deployment.id().to_string(),
                    competency: need.competency().to_string(),
                    required: need.count(),
                    covered: evaluator.covered(need.competency(), &members),
                });
            }
        }

        let total_score = needs.iter().map(NeedCoverage::points).sum();
        let fully_covered_needs = needs.iter().filter(|n| n.is_covered()).count();

        let required: u64 = needs.iter().map(|n| u64::from(n.required)).sum();
        let filled: u64 = needs
            .iter()
            .map(|n| u64::from(n.covered.min(n.required)))
            .sum();
        let fill_rate = if required == 0 {
            1.0
        } else {
            filled as f64 / required as f64
        };

        Self {
            needs,
            total_score,
            fully_covered_needs,
            fill_rate,
        }
    }

    /// Needs that are not fully covered.
    pub fn shortfalls(&self) -> Vec<&NeedCoverage> {
        self.needs.iter().filter(|n| !n.is_covered()).collect()
    }

    /// Whether every need is fully covered.
    pub fn is_complete(&self) -> bool {
        self.fully_covered_needs == self.needs.len()
    }
}
