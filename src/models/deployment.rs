//! Deployment and need models.
//!
//! A deployment is a coverage requirement at an event site, made of one or
//! more needs. A need asks for a number of responders satisfying one
//! competency.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A (competency, count) requirement of a deployment.
///
/// `count` is always at least 1; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NeedData", into = "NeedData")]
pub struct Need {
    competency: String,
    count: u32,
}

#[derive(Serialize, Deserialize)]
struct NeedData {
    competency: String,
    count: u32,
}

impl Need {
    /// Creates a need.
    ///
    /// # Errors
    /// - [`ModelError::EmptyCompetency`] if `competency` is blank.
    /// - [`ModelError::InvalidNeedCount`] if `count` is zero.
    pub fn new(competency: impl Into<String>, count: u32) -> Result<Self, ModelError> {
        let competency = competency.into();
        if competency.trim().is_empty() {
            return Err(ModelError::EmptyCompetency);
        }
        if count == 0 {
            return Err(ModelError::InvalidNeedCount { competency, count });
        }
        Ok(Self { competency, count })
    }

    /// Required competency.
    pub fn competency(&self) -> &str {
        &self.competency
    }

    /// Number of responders required.
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl TryFrom<NeedData> for Need {
    type Error = ModelError;

    fn try_from(data: NeedData) -> Result<Self, Self::Error> {
        Need::new(data.competency, data.count)
    }
}

impl From<Need> for NeedData {
    fn from(n: Need) -> Self {
        Self {
            competency: n.competency,
            count: n.count,
        }
    }
}

/// A time-bound coverage requirement at an event site.
///
/// Needs keep their insertion order; both strategies process them in
/// that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeploymentData", into = "DeploymentData")]
pub struct Deployment {
    id: String,
    name: String,
    needs: Vec<Need>,
}

#[derive(Serialize, Deserialize)]
struct DeploymentData {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    needs: Vec<Need>,
}

impl Deployment {
    /// Creates a deployment with no needs.
    ///
    /// # Errors
    /// [`ModelError::EmptyId`] if `id` is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::EmptyId {
                entity: "deployment",
            });
        }
        Ok(Self {
            id,
            name: String::new(),
            needs: Vec::new(),
        })
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends a need.
    pub fn with_need(mut self, need: Need) -> Self {
        self.needs.push(need);
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name (may be empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Needs in insertion order.
    pub fn needs(&self) -> &[Need] {
        &self.needs
    }

    /// Sum of all need counts.
    pub fn total_required(&self) -> u32 {
        self.needs.iter().map(Need::count).sum()
    }

    /// Whether this deployment has any needs.
    pub fn has_needs(&self) -> bool {
        !self.needs.is_empty()
    }
}

impl TryFrom<DeploymentData> for Deployment {
    type Error = ModelError;

    fn try_from(data: DeploymentData) -> Result<Self, Self::Error> {
        let mut deployment = Deployment::new(data.id)?.with_name(data.name);
        deployment.needs = data.needs;
        Ok(deployment)
    }
}

impl From<Deployment> for DeploymentData {
    fn from(d: Deployment) -> Self {
        Self {
            id: d.id,
            name: d.name,
            needs: d.needs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need_validation() {
        let need = Need::new("PSE1", 2).unwrap();
        assert_eq!(need.competency(), "PSE1");
        assert_eq!(need.count(), 2);

        assert_eq!(
            Need::new("PSE1", 0).unwrap_err(),
            ModelError::InvalidNeedCount {
                competency: "PSE1".into(),
                count: 0
            }
        );
        assert_eq!(Need::new(" ", 1).unwrap_err(), ModelError::EmptyCompetency);
    }

    #[test]
    fn test_deployment_builder() {
        let d = Deployment::new("D1")
            .unwrap()
            .with_name("Stadium gate A")
            .with_need(Need::new("PSE1", 2).unwrap())
            .with_need(Need::new("TeamLead", 1).unwrap());

        assert_eq!(d.id(), "D1");
        assert_eq!(d.name(), "Stadium gate A");
        assert_eq!(d.total_required(), 3);
        assert_eq!(d.needs()[1].competency(), "TeamLead");
        assert!(d.has_needs());
    }

    #[test]
    fn test_deployment_empty() {
        let d = Deployment::new("D0").unwrap();
        assert_eq!(d.total_required(), 0);
        assert!(!d.has_needs());
        assert!(Deployment::new("").is_err());
    }

    #[test]
    fn test_deserialize_rejects_zero_count() {
        let json = r#"{"id": "D1", "needs": [{"competency": "PSE1", "count": 0}]}"#;
        assert!(serde_json::from_str::<Deployment>(json).is_err());

        let json = r#"{"id": "D1", "needs": [{"competency": "PSE1", "count": 3}]}"#;
        let d: Deployment = serde_json::from_str(json).unwrap();
        assert_eq!(d.total_required(), 3);
    }
}
