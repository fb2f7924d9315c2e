//! Assignment strategies and scoring.
//!
//! Two interchangeable strategies produce a deployment → responders
//! mapping from the same inputs:
//!
//! - [`ExhaustiveAssigner`]: backtracking search for a score-maximal
//!   assignment, bounded by a [`SearchBudget`](crate::config::SearchBudget).
//! - [`GreedyAssigner`]: one priority-ordered pass, no backtracking.
//!
//! Both are scored by the same [`Evaluator`], so results compare directly.
//! Within budget, the exhaustive score is never below the greedy score.
//!
//! # Coverage policy
//!
//! Both strategies may leave a need partially covered. The exhaustive
//! search prefers exact fills (they are tried first) but also considers
//! every partial fill, down to an empty deployment.
//!
//! # Determinism
//!
//! Responders are scanned in input order and deployments keep their input
//! order in the result. For identical inputs both strategies return
//! identical assignments.

mod combination;
mod coverage;
mod eligibility;
mod exhaustive;
mod greedy;
mod score;

pub use coverage::{CoverageReport, NeedCoverage};
pub use exhaustive::{ExhaustiveAssigner, SearchOutcome, SearchStatus};
pub use greedy::GreedyAssigner;
pub use score::{need_points, Evaluator, FULL_COVERAGE_BONUS, POINTS_PER_COVERED};

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::graph::CompetencyGraph;
use crate::models::{Assignment, Deployment, Responder};

/// Available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Backtracking search maximizing the score.
    Exhaustive,
    /// Single greedy pass.
    Greedy,
}

impl Strategy {
    /// Short name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::Greedy => "greedy",
        }
    }
}

/// An assignment strategy.
///
/// Inputs are read-only; implementations must return an assignment in
/// which no responder appears under two deployments.
pub trait Assigner {
    /// Which strategy this is.
    fn strategy(&self) -> Strategy;

    /// Computes an assignment.
    fn assign(
        &self,
        graph: &CompetencyGraph,
        responders: &[Responder],
        deployments: &[Deployment],
    ) -> Assignment;
}

/// Runs the strategy selected in `config`.
pub fn assign_with(
    config: &EngineConfig,
    graph: &CompetencyGraph,
    responders: &[Responder],
    deployments: &[Deployment],
) -> Assignment {
    match config.strategy {
        Strategy::Exhaustive => {
            ExhaustiveAssigner::from_config(config).assign(graph, responders, deployments)
        }
        Strategy::Greedy => GreedyAssigner::new().assign(graph, responders, deployments),
    }
}

/// Scores of both strategies on one instance.
#[derive(Debug, Clone)]
pub struct StrategyComparison {
    /// Greedy result.
    pub greedy: Assignment,
    /// Greedy score.
    pub greedy_score: i64,
    /// Exhaustive search result with statistics.
    pub exhaustive: SearchOutcome,
}

impl StrategyComparison {
    /// Exhaustive score minus greedy score.
    pub fn gap(&self) -> i64 {
        self.exhaustive.score - self.greedy_score
    }

    /// Whether greedy reached the exhaustive score.
    pub fn greedy_is_optimal(&self) -> bool {
        self.gap() <= 0
    }
}

/// Runs both strategies and scores them with the shared evaluator.
pub fn compare_strategies(
    graph: &CompetencyGraph,
    responders: &[Responder],
    deployments: &[Deployment],
    config: &EngineConfig,
) -> StrategyComparison {
    let greedy = GreedyAssigner::new().assign(graph, responders, deployments);
    let greedy_score = Evaluator::new(graph).score(&greedy, deployments, responders);
    let exhaustive = ExhaustiveAssigner::from_config(config).solve(graph, responders, deployments);

    tracing::debug!(
        greedy_score,
        exhaustive_score = exhaustive.score,
        "strategies compared"
    );

    StrategyComparison {
        greedy,
        greedy_score,
        exhaustive,
    }
}
