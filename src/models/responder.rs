//! Responder model.
//!
//! Responders are the volunteers that get assigned to deployments. Each
//! responder holds a set of named competencies; whether a held competency
//! covers a requirement is decided by the `CompetencyGraph`, not here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ModelError;

/// A volunteer responder.
///
/// The competency set is read-only for the duration of an assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResponderData", into = "ResponderData")]
pub struct Responder {
    id: String,
    name: String,
    competencies: BTreeSet<String>,
}

#[derive(Serialize, Deserialize)]
struct ResponderData {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    competencies: BTreeSet<String>,
}

impl Responder {
    /// Creates a responder with no competencies.
    ///
    /// # Errors
    /// [`ModelError::EmptyId`] if `id` is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::EmptyId {
                entity: "responder",
            });
        }
        Ok(Self {
            id,
            name: String::new(),
            competencies: BTreeSet::new(),
        })
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a held competency. Blank names are ignored.
    pub fn with_competency(mut self, competency: impl Into<String>) -> Self {
        let competency = competency.into();
        if !competency.trim().is_empty() {
            self.competencies.insert(competency);
        }
        self
    }

    /// Adds several held competencies.
    pub fn with_competencies<I, S>(self, competencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        competencies
            .into_iter()
            .fold(self, |r, c| r.with_competency(c))
    }

    /// Stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name (may be empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Competencies held directly.
    pub fn competencies(&self) -> &BTreeSet<String> {
        &self.competencies
    }

    /// Whether the competency is held directly (no implication).
    pub fn holds(&self, competency: &str) -> bool {
        self.competencies.contains(competency)
    }
}

impl TryFrom<ResponderData> for Responder {
    type Error = ModelError;

    fn try_from(data: ResponderData) -> Result<Self, Self::Error> {
        Ok(Responder::new(data.id)?
            .with_name(data.name)
            .with_competencies(data.competencies))
    }
}

impl From<Responder> for ResponderData {
    fn from(r: Responder) -> Self {
        Self {
            id: r.id,
            name: r.name,
            competencies: r.competencies,
        }
    }
}
