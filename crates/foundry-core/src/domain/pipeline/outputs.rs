//! Structured outputs, one per stage.
//!
//! Every output serialises camelCase with the field names of the project
//! state document and deserialises leniently (missing fields default), so a
//! partially populated state file can be loaded back.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    ArchitectureStyle, Complexity, DomainCategory, Methodology, RiskLevel,
};

// ── 1. Requirements ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequirementsOutput {
    pub event: String,
    pub analysis: RequirementsAnalysis,
    pub risk_assessment: RiskAssessment,
    pub constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intake: Option<Intake>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequirementsAnalysis {
    pub product_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_user: Option<String>,
    pub domain: DomainCategory,
    pub estimated_complexity: Complexity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    pub time_to_market: String,
    pub budget: String,
}

/// Questionnaire answers later stages reuse (project name and description
/// for the construction stage).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Intake {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_description: Option<String>,
}

// ── 2. Decision ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecisionOutput {
    pub event: String,
    pub methodology: Selection<Methodology>,
    pub architecture: Selection<ArchitectureStyle>,
    pub stack_recommendation: StackRecommendation,
}

/// A choice plus the sentence explaining it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection<T> {
    pub selected: T,
    pub justification: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackRecommendation {
    pub frontend: String,
    pub backend: String,
    pub database: String,
    pub infrastructure: String,
}

// ── 3. Architecture ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureOutput {
    pub event: String,
    pub structure: ArchitectureStructure,
    pub diagram: String,
    pub components: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureStructure {
    #[serde(rename = "type")]
    pub style: ArchitectureStyle,
    pub layers: Vec<String>,
    pub patterns: Vec<String>,
    pub security: Vec<String>,
    pub scalability: String,
}

// ── 4. Design ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignOutput {
    pub event: String,
    pub system: DesignSystem,
    pub assets: DesignAssets,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignSystem {
    pub design_system: String,
    pub theme: String,
    pub accessibility: String,
    pub responsive: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignAssets {
    pub wireframes: String,
    pub prototypes: String,
    pub style_guide: String,
}

// ── 5. Planning ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningOutput {
    pub event: String,
    pub timeline: Timeline,
    pub resources: Resources,
    pub budget: Budget,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timeline {
    pub total_duration: String,
    pub sprints: u32,
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resources {
    pub team_size: u32,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Budget {
    pub estimated_total: String,
    pub amount: u64,
    pub currency: String,
    pub confidence: String,
}

// ── 6. Construction ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstructionOutput {
    pub event: String,
    pub repository: Repository,
    /// Path → content of every generated file, reports included.
    pub generated_files: BTreeMap<String, String>,
    pub structure: CodeStructure,
    pub quality_gate: QualityGate,
    pub instructions: Vec<String>,
    pub dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub url: String,
    pub branches: Vec<String>,
    pub commits: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeStructure {
    pub folders: Vec<String>,
    /// Paths in generation order.
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityGate {
    pub linting: String,
    pub formatting: String,
    pub static_analysis: String,
}

// ── 7. QA ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QaOutput {
    pub event: String,
    pub summary: TestSummary,
    pub coverage: Coverage,
    pub security_scan: SecurityScan,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestSummary {
    pub total_tests: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

/// Percentages rendered as strings, e.g. `"80%"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coverage {
    pub statements: String,
    pub branches: String,
    pub functions: String,
    pub lines: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityScan {
    pub vulnerabilities: u32,
    pub grade: String,
}

// ── 8. Deployment ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentOutput {
    pub event: String,
    pub pipeline: DeployPipeline,
    pub environment: Environment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployPipeline {
    pub stages: Vec<String>,
    pub status: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub target: String,
    pub url: String,
    pub replicas: u32,
    pub health: String,
}

// ── 9. Monitoring ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringOutput {
    pub event: String,
    pub observability: Observability,
    pub alerts: Alerts,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observability {
    pub logging: String,
    pub metrics: String,
    pub tracing: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alerts {
    pub configured: bool,
    pub channels: Vec<String>,
}

// ── 10. Valuation ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationOutput {
    pub event: String,
    pub financials: Financials,
    pub scoring: Scoring,
    pub certification: Certification,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Financials {
    pub market_value: u64,
    pub currency: String,
    pub roi: String,
    pub break_even_point: String,
}

/// Each score is its multiplier times ten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scoring {
    pub complexity_score: u32,
    pub architecture_score: u32,
    pub quality_score: u32,
    pub market_potential: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub issued: bool,
    pub level: String,
    /// The single wall-clock field in the whole pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

// ── 11. Delivery ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeliveryOutput {
    pub event: String,
    pub artifacts: Vec<String>,
    pub access: Access,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Access {
    pub repo: String,
    pub admin_panel: String,
}
