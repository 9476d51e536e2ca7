//! The accumulating project-state document and the per-stage outputs.
//!
//! ```text
//! requirements → decision → architecture → design → planning → construction
//!      → qa → deployment → monitoring → valuation → delivery
//! ```
//!
//! Each stage owns exactly one key of [`ProjectState`]. Stages read only keys
//! that are already populated and substitute defaults for the rest.

pub mod inputs;
pub mod outputs;
pub mod stages;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::StageId;
use outputs::*;

/// One optional slot per stage, serialised camelCase with absent slots
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<RequirementsOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<DecisionOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<ArchitectureOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<DesignOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planning: Option<PlanningOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construction: Option<ConstructionOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qa: Option<QaOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment: Option<DeploymentOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<MonitoringOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation: Option<ValuationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryOutput>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `output` under the key owned by its stage, replacing whatever
    /// was there. No other key is touched.
    pub fn apply(&mut self, output: StageOutput) {
        match output {
            StageOutput::Requirements(o) => self.requirements = Some(o),
            StageOutput::Decision(o) => self.decision = Some(o),
            StageOutput::Architecture(o) => self.architecture = Some(o),
            StageOutput::Design(o) => self.design = Some(o),
            StageOutput::Planning(o) => self.planning = Some(o),
            StageOutput::Construction(o) => self.construction = Some(*o),
            StageOutput::Qa(o) => self.qa = Some(o),
            StageOutput::Deployment(o) => self.deployment = Some(o),
            StageOutput::Monitoring(o) => self.monitoring = Some(o),
            StageOutput::Valuation(o) => self.valuation = Some(o),
            StageOutput::Delivery(o) => self.delivery = Some(o),
        }
    }

    pub fn has(&self, stage: StageId) -> bool {
        match stage {
            StageId::Requirements => self.requirements.is_some(),
            StageId::Decision => self.decision.is_some(),
            StageId::Architecture => self.architecture.is_some(),
            StageId::Design => self.design.is_some(),
            StageId::Planning => self.planning.is_some(),
            StageId::Construction => self.construction.is_some(),
            StageId::Qa => self.qa.is_some(),
            StageId::Deployment => self.deployment.is_some(),
            StageId::Monitoring => self.monitoring.is_some(),
            StageId::Valuation => self.valuation.is_some(),
            StageId::Delivery => self.delivery.is_some(),
        }
    }

    /// Stages whose key is populated, in pipeline order.
    pub fn completed_stages(&self) -> Vec<StageId> {
        StageId::ALL.into_iter().filter(|s| self.has(*s)).collect()
    }
}

/// A stage's structured output.
///
/// Serialises as the bare output object, with no variant tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StageOutput {
    Requirements(RequirementsOutput),
    Decision(DecisionOutput),
    Architecture(ArchitectureOutput),
    Design(DesignOutput),
    Planning(PlanningOutput),
    Construction(Box<ConstructionOutput>),
    Qa(QaOutput),
    Deployment(DeploymentOutput),
    Monitoring(MonitoringOutput),
    Valuation(ValuationOutput),
    Delivery(DeliveryOutput),
}

impl StageOutput {
    pub const fn stage(&self) -> StageId {
        match self {
            Self::Requirements(_) => StageId::Requirements,
            Self::Decision(_) => StageId::Decision,
            Self::Architecture(_) => StageId::Architecture,
            Self::Design(_) => StageId::Design,
            Self::Planning(_) => StageId::Planning,
            Self::Construction(_) => StageId::Construction,
            Self::Qa(_) => StageId::Qa,
            Self::Deployment(_) => StageId::Deployment,
            Self::Monitoring(_) => StageId::Monitoring,
            Self::Valuation(_) => StageId::Valuation,
            Self::Delivery(_) => StageId::Delivery,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Every output is a plain struct of strings, numbers and maps with
        // string keys, which cannot fail to serialise.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_touches_only_the_owned_key() {
        let mut state = ProjectState::new();
        state.apply(StageOutput::Qa(stages::qa()));

        assert_eq!(state.completed_stages(), vec![StageId::Qa]);
        assert!(state.requirements.is_none());
    }

    #[test]
    fn apply_replaces_previous_output() {
        let mut state = ProjectState::new();
        state.apply(StageOutput::Design(stages::design(&Default::default())));
        let custom = stages::design(&inputs::DesignInput {
            design_style: Some("Brutalist".into()),
            ..Default::default()
        });
        state.apply(StageOutput::Design(custom));

        assert_eq!(state.design.unwrap().system.theme, "Brutalist");
    }

    #[test]
    fn empty_state_serialises_to_empty_object() {
        let json = serde_json::to_value(ProjectState::new()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = ProjectState::new();
        state.apply(StageOutput::Planning(stages::planning(&Default::default()).unwrap()));
        state.apply(StageOutput::Delivery(stages::delivery()));

        let json = serde_json::to_string(&state).unwrap();
        let back: ProjectState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn partial_state_documents_load() {
        let state: ProjectState = serde_json::from_value(serde_json::json!({
            "requirements": { "analysis": { "domain": "FinTech", "estimatedComplexity": "High" } },
            "qa": { "coverage": { "statements": "85%" } }
        }))
        .unwrap();

        assert_eq!(
            state.completed_stages(),
            vec![StageId::Requirements, StageId::Qa]
        );
    }

    #[test]
    fn stage_output_serialises_without_tag() {
        let json = StageOutput::Delivery(stages::delivery()).to_json();
        assert_eq!(json["event"], "delivery.ready");
        assert_eq!(json["access"]["adminPanel"], "SuperUser Created");
    }
}
