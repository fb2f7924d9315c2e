//! Responder assignment engine.
//!
//! Assigns volunteer responders to time-bound deployments at event sites,
//! honouring a competency prerequisite hierarchy: a responder holding an
//! advanced competency also satisfies needs for everything it builds on.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Responder`, `Deployment`, `Need`,
//!   `Assignment`
//! - **`graph`**: `CompetencyGraph` — prerequisite DAG with cycle rejection
//!   and transitive satisfaction
//! - **`assigner`**: Exhaustive and greedy strategies, the shared
//!   `Evaluator`, coverage diagnostics
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown
//!   competencies, empty deployments)
//! - **`config`**: Engine and hierarchy configuration (TOML)
//! - **`error`**: Error types
//!
//! # Architecture
//!
//! The engine is a pure in-process computation. Loading responders and
//! deployments, and storing the resulting assignment, belong to the
//! calling application. The competency graph is owned by the caller and
//! passed by reference into every call.
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete
//!   Programming Problems" (branch and bound)

pub mod assigner;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod validation;
