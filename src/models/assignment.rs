//! Assignment (solution) model.
//!
//! An assignment maps every deployment of a run to the ordered list of
//! responders chosen for it. Global exclusivity (a responder appears under
//! at most one deployment) is maintained by the strategies, not enforced
//! here; [`Assignment::is_exclusive`] checks it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A complete deployment → responders mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// One entry per deployment, in deployment input order.
    pub entries: Vec<AssignmentEntry>,
}

/// Responders chosen for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentEntry {
    /// Deployment ID.
    pub deployment_id: String,
    /// Responder IDs in discovery order.
    pub responder_ids: Vec<String>,
}

impl AssignmentEntry {
    /// Creates an entry.
    pub fn new(deployment_id: impl Into<String>, responder_ids: Vec<String>) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            responder_ids,
        }
    }

    /// Whether no responder was assigned.
    pub fn is_empty(&self) -> bool {
        self.responder_ids.is_empty()
    }
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn add_entry(&mut self, entry: AssignmentEntry) {
        self.entries.push(entry);
    }

    /// Responders assigned to a deployment (empty if the deployment is absent).
    pub fn responders_for(&self, deployment_id: &str) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.deployment_id == deployment_id)
            .map(|e| e.responder_ids.as_slice())
            .unwrap_or(&[])
    }

    /// The deployment a responder was assigned to, if any.
    pub fn deployment_of(&self, responder_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.responder_ids.iter().any(|r| r == responder_id))
            .map(|e| e.deployment_id.as_str())
    }

    /// Whether no responder appears twice across the whole assignment.
    pub fn is_exclusive(&self) -> bool {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .flat_map(|e| e.responder_ids.iter())
            .all(|r| seen.insert(r.as_str()))
    }

    /// Total number of responder placements.
    pub fn assigned_count(&self) -> usize {
        self.entries.iter().map(|e| e.responder_ids.len()).sum()
    }

    /// Number of deployment entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
