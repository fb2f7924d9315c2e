//! Exhaustive backtracking assignment.
//!
//! # Algorithm
//!
//! 1. Visit deployments in input order.
//! 2. For the current deployment, walk every candidate responder set
//!    (see `combination`): exact fills first, then partial fills, then the
//!    empty set. Candidates are generated one at a time.
//! 3. For each candidate, mark its responders as used, recurse into the
//!    next deployment, then unmark exactly those responders.
//! 4. When every deployment holds a candidate, score the assignment. A
//!    strictly better score replaces the incumbent, so the first maximum
//!    found wins ties.
//!
//! Marking happens through a [`Frame`] guard whose `Drop` undoes it, so
//! the unmark set always equals the mark set, on every exit path.
//!
//! # Pruning
//!
//! With pruning on, a branch is abandoned when its accumulated score plus
//! the best possible score of the remaining deployments cannot strictly
//! beat the incumbent. Pruned branches could at most tie, and ties never
//! replace the incumbent, so the result is unchanged.
//!
//! # Budget
//!
//! Every search node and every candidate-generation step counts against
//! `max_nodes`; the clock is read every 1024 counted steps. A single
//! deployment with a huge candidate space therefore stops on budget like
//! any deep search does.
//!
//! # Complexity
//! Exponential in responders per need and in deployments. Intended for
//! tens of responders; larger inputs are cut off by [`SearchBudget`].

use std::ops::{ControlFlow, Deref, DerefMut};
use std::time::Instant;

use crate::config::{EngineConfig, SearchBudget};
use crate::graph::CompetencyGraph;
use crate::models::{Assignment, AssignmentEntry, Deployment, Responder};

use super::combination::{CandidateSink, Candidates};
use super::eligibility::EligibilityTable;
use super::{Assigner, Strategy};

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The whole search space was covered (explicitly or by pruning).
    Complete,
    /// The node or time budget ran out; the result is the best found so far.
    BudgetExhausted,
}

/// Result of an exhaustive search with statistics.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best assignment found.
    pub assignment: Assignment,
    /// Its score.
    pub score: i64,
    /// Whether the search completed.
    pub status: SearchStatus,
    /// Search nodes expanded plus candidate-generation steps.
    pub nodes_explored: u64,
    /// Branches abandoned by the bound.
    pub branches_pruned: u64,
    /// Wall-clock time spent (ms).
    pub elapsed_ms: u64,
}

impl SearchOutcome {
    /// Whether the result is guaranteed score-maximal.
    pub fn is_optimal(&self) -> bool {
        self.status == SearchStatus::Complete
    }
}

/// Backtracking search for a score-maximal assignment.
///
/// # Example
///
/// ```
/// use u_roster::assigner::ExhaustiveAssigner;
/// use u_roster::config::HierarchyConfig;
/// use u_roster::graph::CompetencyGraph;
/// use u_roster::models::{Deployment, Need, Responder};
///
/// let graph = CompetencyGraph::from_hierarchy(&HierarchyConfig::default_tiers()).unwrap();
/// let responders = vec![
///     Responder::new("alice").unwrap().with_competency("PSE2"),
///     Responder::new("bob").unwrap().with_competency("PSE1"),
/// ];
/// let deployments = vec![Deployment::new("D1")
///     .unwrap()
///     .with_need(Need::new("PSE1", 1).unwrap())
///     .with_need(Need::new("PSE2", 1).unwrap())];
///
/// let outcome = ExhaustiveAssigner::new().solve(&graph, &responders, &deployments);
/// assert_eq!(outcome.score, 30);
/// assert_eq!(outcome.assignment.responders_for("D1"), ["bob", "alice"]);
/// ```
#[derive(Debug, Clone)]
pub struct ExhaustiveAssigner {
    budget: SearchBudget,
    prune: bool,
}

impl ExhaustiveAssigner {
    /// Creates a search with the default budget and pruning on.
    pub fn new() -> Self {
        Self {
            budget: SearchBudget::default(),
            prune: true,
        }
    }

    /// Takes budget and pruning from an engine config.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            budget: config.budget,
            prune: config.prune,
        }
    }

    /// Sets the search budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Enables or disables branch-and-bound pruning.
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Runs the search and reports statistics.
    pub fn solve(
        &self,
        graph: &CompetencyGraph,
        responders: &[Responder],
        deployments: &[Deployment],
    ) -> SearchOutcome {
        let started = Instant::now();
        let table = EligibilityTable::build(graph, responders, deployments);

        // remaining_max[d] = best possible points of deployments d..
        let mut remaining_max = vec![0i64; deployments.len() + 1];
        for d in (0..deployments.len()).rev() {
            remaining_max[d] = remaining_max[d + 1] + table.max_points(d);
        }

        let ctx = SearchContext {
            table: &table,
            remaining_max: &remaining_max,
            budget: self.budget,
            prune: self.prune,
            started,
        };
        let mut state = SearchState {
            used: vec![false; responders.len()],
            slots: vec![Vec::new(); deployments.len()],
            partial_score: 0,
        };
        let mut best: Incumbent = None;
        let mut stats = SearchStats::default();

        tracing::debug!(
            deployments = deployments.len(),
            responders = responders.len(),
            max_nodes = self.budget.max_nodes,
            time_limit_ms = self.budget.time_limit_ms,
            "exhaustive search started"
        );

        search(&ctx, &mut state, 0, &mut best, &mut stats);

        let status = if stats.exhausted {
            tracing::warn!(
                nodes = stats.nodes,
                "exhaustive search stopped on budget; result may be suboptimal"
            );
            SearchStatus::BudgetExhausted
        } else {
            SearchStatus::Complete
        };

        let (score, slots) = best.unwrap_or_else(|| (0, vec![Vec::new(); deployments.len()]));
        let assignment = to_assignment(&slots, responders, deployments);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        tracing::debug!(
            score,
            nodes = stats.nodes,
            pruned = stats.pruned,
            elapsed_ms,
            "exhaustive search finished"
        );

        SearchOutcome {
            assignment,
            score,
            status,
            nodes_explored: stats.nodes,
            branches_pruned: stats.pruned,
            elapsed_ms,
        }
    }
}

impl Default for ExhaustiveAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl Assigner for ExhaustiveAssigner {
    fn strategy(&self) -> Strategy {
        Strategy::Exhaustive
    }

    fn assign(
        &self,
        graph: &CompetencyGraph,
        responders: &[Responder],
        deployments: &[Deployment],
    ) -> Assignment {
        self.solve(graph, responders, deployments).assignment
    }
}

struct SearchContext<'a> {
    table: &'a EligibilityTable,
    remaining_max: &'a [i64],
    budget: SearchBudget,
    prune: bool,
    started: Instant,
}

impl SearchContext<'_> {
    fn out_of_budget(&self, nodes: u64) -> bool {
        if self.budget.max_nodes > 0 && nodes > self.budget.max_nodes {
            return true;
        }
        // Clock reads are sampled every 1024 nodes.
        self.budget.time_limit_ms > 0
            && nodes % 1024 == 0
            && self.started.elapsed().as_millis() as u64 >= self.budget.time_limit_ms
    }
}

/// Mutable state shared by every frame of the recursion.
struct SearchState {
    /// `used[r]`: responder r is committed in the current branch.
    used: Vec<bool>,
    /// Responders placed on each deployment in the current branch.
    slots: Vec<Vec<usize>>,
    /// Score of the deployments placed so far.
    partial_score: i64,
}

#[derive(Debug, Default)]
struct SearchStats {
    nodes: u64,
    pruned: u64,
    exhausted: bool,
}

impl SearchStats {
    /// Counts one unit of work against the budget.
    fn tick(&mut self, ctx: &SearchContext<'_>) -> ControlFlow<()> {
        self.nodes += 1;
        if ctx.out_of_budget(self.nodes) {
            self.exhausted = true;
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

type Incumbent = Option<(i64, Vec<Vec<usize>>)>;

/// Places one candidate on a deployment for the lifetime of the guard.
struct Frame<'s> {
    state: &'s mut SearchState,
    deployment: usize,
    points: i64,
}

impl<'s> Frame<'s> {
    fn enter(state: &'s mut SearchState, deployment: usize, members: Vec<usize>, points: i64) -> Self {
        for &r in &members {
            debug_assert!(!state.used[r], "responder {r} marked twice");
            state.used[r] = true;
        }
        state.slots[deployment] = members;
        state.partial_score += points;
        Self {
            state,
            deployment,
            points,
        }
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        let members = std::mem::take(&mut self.state.slots[self.deployment]);
        for r in members {
            self.state.used[r] = false;
        }
        self.state.partial_score -= self.points;
    }
}

impl Deref for Frame<'_> {
    type Target = SearchState;

    fn deref(&self) -> &SearchState {
        &*self.state
    }
}

impl DerefMut for Frame<'_> {
    fn deref_mut(&mut self) -> &mut SearchState {
        &mut *self.state
    }
}

fn search(
    ctx: &SearchContext<'_>,
    state: &mut SearchState,
    depth: usize,
    best: &mut Incumbent,
    stats: &mut SearchStats,
) {
    if stats.tick(ctx).is_break() {
        return;
    }

    if depth == ctx.table.deployment_count() {
        let score = ctx.table.total_score(&state.slots);
        debug_assert_eq!(score, state.partial_score);
        let improved = match best.as_ref() {
            Some((incumbent, _)) => score > *incumbent,
            None => true,
        };
        if improved {
            *best = Some((score, state.slots.clone()));
        }
        return;
    }

    if ctx.prune {
        if let Some((incumbent, _)) = best.as_ref() {
            if state.partial_score + ctx.remaining_max[depth] <= *incumbent {
                stats.pruned += 1;
                return;
            }
        }
    }

    let candidates = Candidates::new(ctx.table, depth, &state.used);
    let mut expansion = Expansion {
        ctx,
        state,
        depth,
        best,
        stats,
    };
    // Budget exhaustion is recorded in `stats`.
    let _ = candidates.for_each(&mut expansion);
}

/// Feeds each candidate of one deployment into the next search level.
struct Expansion<'x, 'a> {
    ctx: &'x SearchContext<'a>,
    state: &'x mut SearchState,
    depth: usize,
    best: &'x mut Incumbent,
    stats: &'x mut SearchStats,
}

impl CandidateSink for Expansion<'_, '_> {
    fn step(&mut self) -> ControlFlow<()> {
        self.stats.tick(self.ctx)
    }

    fn candidate(&mut self, members: &[usize]) -> ControlFlow<()> {
        let points = self.ctx.table.deployment_score(self.depth, members);
        let mut frame = Frame::enter(&mut *self.state, self.depth, members.to_vec(), points);
        search(self.ctx, &mut frame, self.depth + 1, &mut *self.best, &mut *self.stats);
        drop(frame);
        if self.stats.exhausted {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

fn to_assignment(
    slots: &[Vec<usize>],
    responders: &[Responder],
    deployments: &[Deployment],
) -> Assignment {
    let mut assignment = Assignment::new();
    for (deployment, members) in deployments.iter().zip(slots) {
        assignment.add_entry(AssignmentEntry::new(
            deployment.id(),
            members.iter().map(|&r| responders[r].id().to_string()).collect(),
        ));
    }
    assignment
}
