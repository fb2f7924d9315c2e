//! Engine and hierarchy configuration.
//!
//! Both configs deserialize from TOML. Missing fields fall back to the
//! defaults below.
//!
//! ```toml
//! strategy = "exhaustive"
//! prune = true
//!
//! [budget]
//! max_nodes = 500000
//! time_limit_ms = 2000
//! ```
//!
//! A competency hierarchy is a list of `[[competencies]]` tables:
//!
//! ```toml
//! [[competencies]]
//! name = "PSE1"
//!
//! [[competencies]]
//! name = "PSE2"
//! prerequisites = ["PSE1"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assigner::Strategy;
use crate::error::ConfigError;

/// Upper limits for the exhaustive search.
///
/// A value of 0 disables the corresponding limit. Inputs that finish
/// within the budget get exactly the unbounded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBudget {
    /// Maximum search steps: nodes expanded plus candidate-generation
    /// steps.
    pub max_nodes: u64,
    /// Wall-clock limit in milliseconds.
    pub time_limit_ms: u64,
}

impl SearchBudget {
    /// No limits at all.
    pub fn unlimited() -> Self {
        Self {
            max_nodes: 0,
            time_limit_ms: 0,
        }
    }

    /// Whether both limits are disabled.
    pub fn is_unlimited(&self) -> bool {
        self.max_nodes == 0 && self.time_limit_ms == 0
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_nodes: 2_000_000,
            time_limit_ms: 0,
        }
    }
}

/// Engine configuration.
///
/// # Examples
///
/// ```
/// use u_roster::config::EngineConfig;
/// use u_roster::assigner::Strategy;
///
/// let config = EngineConfig::default()
///     .with_strategy(Strategy::Exhaustive)
///     .with_max_nodes(100_000)
///     .with_pruning(true);
/// assert_eq!(config.budget.max_nodes, 100_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Strategy used by [`crate::assigner::assign_with`].
    pub strategy: Strategy,
    /// Exhaustive search limits.
    pub budget: SearchBudget,
    /// Branch-and-bound pruning in the exhaustive search.
    pub prune: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Exhaustive,
            budget: SearchBudget::default(),
            prune: true,
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path)?)
    }

    /// Sets the assignment strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replaces the whole search budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the step limit of the exhaustive search (0 = none).
    pub fn with_max_nodes(mut self, n: u64) -> Self {
        self.budget.max_nodes = n;
        self
    }

    /// Sets the wall-clock limit in milliseconds (0 = none).
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.budget.time_limit_ms = ms;
        self
    }

    /// Enables or disables branch-and-bound pruning.
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }
}

/// One competency and its direct prerequisites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyEntry {
    /// Competency name.
    pub name: String,
    /// Names of competencies this one builds on.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl CompetencyEntry {
    /// Creates an entry.
    pub fn new<I, S>(name: impl Into<String>, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            prerequisites: prerequisites.into_iter().map(Into::into).collect(),
        }
    }
}

/// Externally supplied competency hierarchy.
///
/// Entries are applied in order by `CompetencyGraph::from_hierarchy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Competency entries.
    #[serde(default)]
    pub competencies: Vec<CompetencyEntry>,
}

impl HierarchyConfig {
    /// The application's default tiers: basic certificate (`PSE1`),
    /// intermediate (`PSE2`, requires `PSE1`) and team lead
    /// (`TeamLead`, requires `PSE2`).
    pub fn default_tiers() -> Self {
        Self {
            competencies: vec![
                CompetencyEntry::new("PSE1", Vec::<String>::new()),
                CompetencyEntry::new("PSE2", ["PSE1"]),
                CompetencyEntry::new("TeamLead", ["PSE2"]),
            ],
        }
    }

    /// Appends an entry.
    pub fn with_entry(mut self, entry: CompetencyEntry) -> Self {
        self.competencies.push(entry);
        self
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads the hierarchy from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path)?)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
