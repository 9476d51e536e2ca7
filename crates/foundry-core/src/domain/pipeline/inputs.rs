//! Typed stage inputs.
//!
//! Inputs arrive as JSON objects. Every field is optional: an absent field,
//! a `null`, and an empty string all mean "use the default". A `null` input
//! as a whole is the empty object.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{error::DomainError, value_objects::StageId};

/// Decode a stage input, mapping anything that is not an object (or `null`)
/// to [`DomainError::InvalidStageInput`].
pub fn parse_input<T>(stage: StageId, input: &Value) -> Result<T, DomainError>
where
    T: DeserializeOwned + Default,
{
    match input {
        Value::Null => Ok(T::default()),
        Value::Object(_) => {
            T::deserialize(input).map_err(|e| DomainError::InvalidStageInput {
                stage: stage.number(),
                reason: e.to_string(),
            })
        }
        other => Err(DomainError::InvalidStageInput {
            stage: stage.number(),
            reason: format!("expected a JSON object, got {}", json_kind(other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A non-empty text field, or `None`.
pub(crate) fn text(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TextList {
    List(Vec<String>),
    Text(String),
}

impl TextList {
    /// `true` when the text contains `token`, or a list item equals it.
    pub fn mentions(&self, token: &str) -> bool {
        match self {
            Self::List(items) => items.iter().any(|i| i == token),
            Self::Text(s) => s.contains(token),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Text(s) => vec![s],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Text(s) => s.is_empty(),
        }
    }
}

/// Accepts a positive integer or a string holding one. Zero, empty strings
/// and `null` collapse to `None`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let n = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| de::Error::custom(format!("expected a whole number, got {n}")))?,
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| de::Error::custom(format!("expected a whole number, got {s:?}")))?,
        Some(other) => {
            return Err(de::Error::custom(format!(
                "expected a whole number, got {}",
                json_kind(&other)
            )));
        }
    };
    let n = u32::try_from(n).map_err(|_| de::Error::custom("number too large"))?;
    Ok((n > 0).then_some(n))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequirementsInput {
    pub project_name: Option<String>,
    pub problem_description: Option<String>,
    pub objectives: Option<String>,
    /// Comma-separated list.
    pub stakeholders: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecisionInput {
    pub methodology_preference: Option<String>,
    pub decision_criteria: Option<TextList>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignInput {
    pub design_style: Option<String>,
    pub accessibility: Option<String>,
    pub device_support: Option<TextList>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanningInput {
    #[serde(deserialize_with = "lenient_count")]
    pub sprints: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub team_size: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstructionInput {
    pub repo_url: Option<String>,
    pub project_name: Option<String>,
    /// Free-text backend label, e.g. `"Java (Spring Boot)"`.
    pub backend: Option<String>,
    /// Explicit generator key; wins over `backend`.
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeploymentInput {
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitoringInput {
    pub alert_threshold: Option<Value>,
}

/// Inputs for stages that take none. Any object is accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoInput {}
