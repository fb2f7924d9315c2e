//! Input validation for assignment runs.
//!
//! The engine assumes its inputs are valid. Callers that load responders
//! and deployments from outside can run these checks first. Detects:
//! - Duplicate responder IDs
//! - Duplicate deployment IDs
//! - Deployments without needs
//! - Needs naming a competency the hierarchy does not know
//!
//! All issues are collected rather than stopping at the first one, so a
//! roster import can report every bad row in one pass. Nothing here is
//! required by the assigners: duplicate IDs only make lookups ambiguous,
//! and an unknown competency is simply a need nobody can cover.

use crate::graph::CompetencyGraph;
use crate::models::{Deployment, Responder};
use std::collections::HashSet;

/// Outcome of [`validate_input`]: every issue found, or `Ok`.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// One problem found in the inputs of an assignment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Description naming the offending responder, deployment or
    /// competency.
    pub message: String,
}

/// What kind of input problem was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A deployment has no needs.
    EmptyDeployment,
    /// A need references a competency absent from the hierarchy.
    UnknownCompetency,
}

impl ValidationError {
    fn issue(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks responders and deployments against each other and the graph.
///
/// A competency known to the graph only as a prerequisite still counts as
/// known.
pub fn validate_input(
    graph: &CompetencyGraph,
    responders: &[Responder],
    deployments: &[Deployment],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut responder_ids = HashSet::new();
    for r in responders {
        if !responder_ids.insert(r.id()) {
            errors.push(ValidationError::issue(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate responder ID: {}", r.id()),
            ));
        }
    }

    let mut deployment_ids = HashSet::new();
    for d in deployments {
        if !deployment_ids.insert(d.id()) {
            errors.push(ValidationError::issue(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate deployment ID: {}", d.id()),
            ));
        }

        if !d.has_needs() {
            errors.push(ValidationError::issue(
                ValidationErrorKind::EmptyDeployment,
                format!("Deployment '{}' has no needs", d.id()),
            ));
        }

        for need in d.needs() {
            if !graph.contains(need.competency()) {
                errors.push(ValidationError::issue(
                    ValidationErrorKind::UnknownCompetency,
                    format!(
                        "Deployment '{}' needs unknown competency '{}'",
                        d.id(),
                        need.competency()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HierarchyConfig;
    use crate::models::Need;

    fn graph() -> CompetencyGraph {
        CompetencyGraph::from_hierarchy(&HierarchyConfig::default_tiers()).unwrap()
    }

    fn sample_responders() -> Vec<Responder> {
        vec![
            Responder::new("R1").unwrap().with_competency("PSE1"),
            Responder::new("R2").unwrap().with_competency("TeamLead"),
        ]
    }

    fn sample_deployments() -> Vec<Deployment> {
        vec![
            Deployment::new("D1")
                .unwrap()
                .with_need(Need::new("PSE1", 2).unwrap()),
            Deployment::new("D2")
                .unwrap()
                .with_need(Need::new("TeamLead", 1).unwrap()),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&graph(), &sample_responders(), &sample_deployments()).is_ok());
    }

    #[test]
    fn test_duplicate_responder_id() {
        let responders = vec![
            Responder::new("R1").unwrap(),
            Responder::new("R1").unwrap(),
        ];
        let errors = validate_input(&graph(), &responders, &sample_deployments()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("responder")));
    }

    #[test]
    fn test_duplicate_deployment_id() {
        let mut deployments = sample_deployments();
        deployments.push(deployments[0].clone());
        let errors = validate_input(&graph(), &sample_responders(), &deployments).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("deployment")));
    }

    #[test]
    fn test_empty_deployment() {
        let deployments = vec![Deployment::new("empty").unwrap()];
        let errors = validate_input(&graph(), &sample_responders(), &deployments).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyDeployment));
    }

    #[test]
    fn test_unknown_competency() {
        let deployments = vec![Deployment::new("D1")
            .unwrap()
            .with_need(Need::new("Scuba", 1).unwrap())];
        let errors = validate_input(&graph(), &sample_responders(), &deployments).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownCompetency && e.message.contains("Scuba")));
    }

    #[test]
    fn test_prerequisite_only_name_is_known() {
        // FirstAid appears only as a prerequisite, never inserted itself
        let mut g = CompetencyGraph::new();
        assert!(g.add_competency("PSE1", ["FirstAid"]));
        let deployments = vec![Deployment::new("D1")
            .unwrap()
            .with_need(Need::new("FirstAid", 1).unwrap())];
        assert!(validate_input(&g, &[], &deployments).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let deployments = vec![
            Deployment::new("empty").unwrap(),
            Deployment::new("D1")
                .unwrap()
                .with_need(Need::new("Unknown", 1).unwrap()),
        ];
        let responders = vec![
            Responder::new("R1").unwrap(),
            Responder::new("R1").unwrap(),
        ];
        let errors = validate_input(&graph(), &responders, &deployments).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
