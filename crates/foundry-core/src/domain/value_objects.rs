//! Domain value objects: StageId, DomainCategory, Complexity, Methodology,
//! ArchitectureStyle, Role, License.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Each
//! carries its string representation (the one that appears in the project
//! state document) and a `FromStr` parser. Anything that has to survive a
//! round trip through JSON serialises to exactly the label shown to users.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── StageId ──────────────────────────────────────────────────────────────────

/// One of the eleven production-line stages, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageId {
    Requirements,
    Decision,
    Architecture,
    Design,
    Planning,
    Construction,
    Qa,
    Deployment,
    Monitoring,
    Valuation,
    Delivery,
}

impl StageId {
    /// Every stage in execution order.
    pub const ALL: [StageId; 11] = [
        Self::Requirements,
        Self::Decision,
        Self::Architecture,
        Self::Design,
        Self::Planning,
        Self::Construction,
        Self::Qa,
        Self::Deployment,
        Self::Monitoring,
        Self::Valuation,
        Self::Delivery,
    ];

    /// The 1-based stage number.
    pub const fn number(self) -> u32 {
        match self {
            Self::Requirements => 1,
            Self::Decision => 2,
            Self::Architecture => 3,
            Self::Design => 4,
            Self::Planning => 5,
            Self::Construction => 6,
            Self::Qa => 7,
            Self::Deployment => 8,
            Self::Monitoring => 9,
            Self::Valuation => 10,
            Self::Delivery => 11,
        }
    }

    /// The key this stage owns in the project state document.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Requirements => "requirements",
            Self::Decision => "decision",
            Self::Architecture => "architecture",
            Self::Design => "design",
            Self::Planning => "planning",
            Self::Construction => "construction",
            Self::Qa => "qa",
            Self::Deployment => "deployment",
            Self::Monitoring => "monitoring",
            Self::Valuation => "valuation",
            Self::Delivery => "delivery",
        }
    }
}

impl TryFrom<u32> for StageId {
    type Error = DomainError;

    fn try_from(stage: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.number() == stage)
            .ok_or(DomainError::InvalidStage { stage })
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StageId {
    type Err = DomainError;

    /// Accepts either the stage name or its number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.trim().parse::<u32>() {
            return Self::try_from(n);
        }
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|stage| stage.name() == lower)
            .ok_or(DomainError::UnknownStageName(s.to_string()))
    }
}

// ── DomainCategory ───────────────────────────────────────────────────────────

/// Business domain a project was classified into.
///
/// `Other` holds free-form labels coming from the automated run, where the
/// product type is copied verbatim into the domain slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DomainCategory {
    FinTech,
    HealthTech,
    ECommerce,
    EdTech,
    #[default]
    General,
    Other(String),
}

impl DomainCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FinTech => "FinTech",
            Self::HealthTech => "HealthTech",
            Self::ECommerce => "E-Commerce",
            Self::EdTech => "EdTech",
            Self::General => "General",
            Self::Other(label) => label,
        }
    }

    /// Regulated domains carry critical risk.
    pub fn is_regulated(&self) -> bool {
        matches!(self, Self::FinTech | Self::HealthTech)
    }
}

impl From<String> for DomainCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "FinTech" => Self::FinTech,
            "HealthTech" => Self::HealthTech,
            "E-Commerce" => Self::ECommerce,
            "EdTech" => Self::EdTech,
            "General" => Self::General,
            _ => Self::Other(s),
        }
    }
}

impl From<DomainCategory> for String {
    fn from(d: DomainCategory) -> Self {
        d.as_str().to_string()
    }
}

impl fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Complexity / RiskLevel ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Complexity {
    High,
    #[default]
    Medium,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    Critical,
    #[default]
    Standard,
}

// ── Methodology ──────────────────────────────────────────────────────────────

/// Development methodology picked by the decision stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Methodology {
    #[default]
    Scrum,
    Kanban,
    Waterfall,
    #[serde(rename = "Lean Startup")]
    LeanStartup,
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scrum => "Scrum",
            Self::Kanban => "Kanban",
            Self::Waterfall => "Waterfall",
            Self::LeanStartup => "Lean Startup",
        })
    }
}

// ── ArchitectureStyle ────────────────────────────────────────────────────────

/// Architecture style picked by the decision stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArchitectureStyle {
    #[default]
    Monolith,
    Microservices,
    Serverless,
}

impl ArchitectureStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monolith => "Monolith",
            Self::Microservices => "Microservices",
            Self::Serverless => "Serverless",
        }
    }

    /// Distributed styles get gateway/circuit-breaker patterns and a higher
    /// valuation multiplier.
    pub const fn is_distributed(&self) -> bool {
        matches!(self, Self::Microservices)
    }
}

impl fmt::Display for ArchitectureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Role ─────────────────────────────────────────────────────────────────────

/// Deployment role used to pick hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Frontend,
    Backend,
    Fullstack,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Fullstack => "fullstack",
        }
    }

    /// Role implied by a generator language key: the frontend key maps to
    /// `Frontend`, everything else is a backend.
    pub fn for_language(language: &str) -> Self {
        if language.eq_ignore_ascii_case(FRONTEND_LANGUAGE) {
            Self::Frontend
        } else {
            Self::Backend
        }
    }
}

/// Generator key of the frontend scaffold.
pub const FRONTEND_LANGUAGE: &str = "frontend";

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "frontend" | "front" => Ok(Self::Frontend),
            "backend" | "back" | "api" => Ok(Self::Backend),
            "fullstack" => Ok(Self::Fullstack),
            other => Err(DomainError::InvalidProjectConfig(format!(
                "unknown role: {other}"
            ))),
        }
    }
}

// ── License ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum License {
    Mit,
    Proprietary,
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mit => "mit",
            Self::Proprietary => "proprietary",
        })
    }
}

impl FromStr for License {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mit" => Ok(Self::Mit),
            "proprietary" => Ok(Self::Proprietary),
            other => Err(DomainError::InvalidProjectConfig(format!(
                "unknown license: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ids_round_trip_numbers() {
        for (i, stage) in StageId::ALL.iter().enumerate() {
            assert_eq!(stage.number(), i as u32 + 1);
            assert_eq!(StageId::try_from(stage.number()).unwrap(), *stage);
        }
    }

    #[test]
    fn out_of_range_stage_is_rejected() {
        assert_eq!(
            StageId::try_from(0),
            Err(DomainError::InvalidStage { stage: 0 })
        );
        assert_eq!(
            StageId::try_from(12),
            Err(DomainError::InvalidStage { stage: 12 })
        );
    }

    #[test]
    fn stage_parses_by_name_or_number() {
        assert_eq!("qa".parse::<StageId>().unwrap(), StageId::Qa);
        assert_eq!("6".parse::<StageId>().unwrap(), StageId::Construction);
        assert!("deploy".parse::<StageId>().is_err());
    }

    #[test]
    fn domain_category_serialises_as_label() {
        let json = serde_json::to_string(&DomainCategory::ECommerce).unwrap();
        assert_eq!(json, "\"E-Commerce\"");

        let other: DomainCategory = serde_json::from_str("\"SaaS\"").unwrap();
        assert_eq!(other, DomainCategory::Other("SaaS".into()));
    }

    #[test]
    fn methodology_uses_display_label() {
        let json = serde_json::to_string(&Methodology::LeanStartup).unwrap();
        assert_eq!(json, "\"Lean Startup\"");
    }

    #[test]
    fn role_for_language() {
        assert_eq!(Role::for_language("frontend"), Role::Frontend);
        assert_eq!(Role::for_language("Frontend"), Role::Frontend);
        assert_eq!(Role::for_language("java"), Role::Backend);
    }
}
