//! Error types.
//!
//! Entity constructors reject invalid data with [`ModelError`], so a
//! `Need` with a zero count or a `Responder` without an id cannot exist.
//! Configuration loading reports [`ConfigError`].
//!
//! Competency insertion is deliberately absent here: a rejected insertion
//! is signalled by `CompetencyGraph::add_competency` returning `false`.

use std::path::PathBuf;

use thiserror::Error;

/// Domain-invariant violations raised at entity construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An identifier was empty or whitespace.
    #[error("{entity} id must not be empty")]
    EmptyId {
        /// Kind of entity being constructed ("responder", "deployment").
        entity: &'static str,
    },
    /// A competency name was empty or whitespace.
    #[error("competency name must not be empty")]
    EmptyCompetency,
    /// A need asked for zero responders.
    #[error("need for '{competency}' must require at least one responder (got {count})")]
    InvalidNeedCount {
        /// Competency of the rejected need.
        competency: String,
        /// The rejected count.
        count: u32,
    },
}

/// Failures while loading engine or hierarchy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The TOML document could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A hierarchy entry would introduce a prerequisite cycle.
    #[error("competency '{competency}' would introduce a prerequisite cycle")]
    CyclicHierarchy {
        /// Competency whose insertion was rejected.
        competency: String,
    },
}
