//! Heuristic structural audit over a generated file set.
//!
//! The auditor is a total, pure function: every input produces a report and
//! no check depends on another. Scores start at [`AuditPolicy::max_score`]
//! and lose a fixed number of points per missing convention.
//!
//! # Unverified standards
//!
//! Only `clean_architecture` is derived from evidence (a service or use-case
//! file). `solid`, `dry` and `security` are always `true` and are reported as
//! *assumed*. They are not checked and callers must not treat them as
//! verified.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use serde::{Deserialize, Serialize};

use crate::domain::entities::GeneratedFile;

/// Path the orchestrator writes the rendered report to.
pub const QUALITY_REPORT_PATH: &str = "QUALITY_REPORT.md";

/// Filename suffixes that count as a dependency manifest.
pub const MANIFEST_SUFFIXES: [&str; 3] = ["package.json", "pom.xml", "requirements.txt"];

/// Path prefixes that count as a conventional source root.
pub const SOURCE_ROOTS: [&str; 2] = ["src/", "app/"];

const CONTROLLER_MARKERS: [&str; 2] = ["controller", "routes"];
const SERVICE_MARKERS: [&str; 2] = ["service", "usecase"];
const BACKEND_FRAMEWORK_TOKEN: &str = "express";
const JAVA_MANIFEST: &str = "pom.xml";
const NODE_MANIFEST: &str = "package.json";

pub const ISSUE_MISSING_README: &str = "Missing README.md documentation.";
pub const ISSUE_MISSING_GITIGNORE: &str = "Missing .gitignore file.";
pub const ISSUE_MISSING_MANIFEST: &str =
    "Missing dependency management file (package.json, pom.xml, etc.).";
pub const ISSUE_MISSING_SOURCE_ROOT: &str =
    "Project structure does not follow standard conventions (missing src/ or app/ folder).";
pub const ISSUE_MISSING_LAYERS: &str =
    "Code does not seem to follow Layered Architecture (missing controllers/services).";

/// Penalty weights and pass threshold.
///
/// Defaults reproduce the stock scoring: 10/5/20/15/15 points and a pass
/// strictly above 70.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditPolicy {
    pub max_score: u32,
    pub pass_threshold: u32,
    pub missing_readme: u32,
    pub missing_gitignore: u32,
    pub missing_manifest: u32,
    pub missing_source_root: u32,
    pub missing_layers: u32,
}

impl AuditPolicy {
    pub const STANDARD: Self = Self {
        max_score: 100,
        pass_threshold: 70,
        missing_readme: 10,
        missing_gitignore: 5,
        missing_manifest: 20,
        missing_source_root: 15,
        missing_layers: 15,
    };
}

impl Default for AuditPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The four standards flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standards {
    /// Assumed, never checked.
    pub solid: bool,
    pub clean_architecture: bool,
    /// Assumed, never checked.
    pub dry: bool,
    /// Assumed, never checked.
    pub security: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub score: u32,
    pub passed: bool,
    pub issues: Vec<String>,
    pub standards: Standards,
}

impl AuditReport {
    /// Render the report as the markdown file shipped with the project.
    pub fn to_markdown(&self) -> String {
        let issues = if self.issues.is_empty() {
            "None".to_string()
        } else {
            self.issues
                .iter()
                .map(|i| format!("- {i}"))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "# Quality Audit Report\n\
             Score: {score}/100\n\
             Passed: {passed}\n\
             \n\
             ## Issues Found\n\
             {issues}\n\
             \n\
             ## Standards Check\n\
             - SOLID: {solid} (assumed)\n\
             - Clean Architecture: {clean}\n\
             - DRY: {dry} (assumed)\n\
             - Security: {security} (assumed)\n",
            score = self.score,
            passed = if self.passed { "YES" } else { "NO" },
            solid = tick(self.standards.solid),
            clean = tick(self.standards.clean_architecture),
            dry = tick(self.standards.dry),
            security = tick(self.standards.security),
        )
    }
}

fn tick(flag: bool) -> &'static str {
    if flag { "✅" } else { "❌" }
}

/// Scores a file set against [`AuditPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityAuditor {
    policy: AuditPolicy,
}

impl QualityAuditor {
    pub const fn new(policy: AuditPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> &AuditPolicy {
        &self.policy
    }

    pub fn audit(&self, files: &[GeneratedFile]) -> AuditReport {
        let p = &self.policy;
        let mut score = p.max_score;
        let mut issues = Vec::new();
        let mut penalise = |missing: bool, points: u32, issue: &str| {
            if missing {
                score = score.saturating_sub(points);
                issues.push(issue.to_string());
            }
        };

        let has = |pred: &dyn Fn(&GeneratedFile) -> bool| files.iter().any(pred);

        let has_readme = has(&|f| f.path.to_lowercase().contains("readme.md"));
        let has_gitignore = has(&|f| f.path == ".gitignore");
        let has_manifest = has(&|f| MANIFEST_SUFFIXES.iter().any(|s| f.path.ends_with(s)));
        let has_source_root = has(&|f| SOURCE_ROOTS.iter().any(|r| f.path.starts_with(r)));
        let has_controllers = has(&|f| CONTROLLER_MARKERS.iter().any(|m| f.path.contains(m)));
        let has_services = has(&|f| SERVICE_MARKERS.iter().any(|m| f.path.contains(m)));
        let is_backend = has(&|f| {
            (f.path.ends_with(NODE_MANIFEST) && f.content.contains(BACKEND_FRAMEWORK_TOKEN))
                || f.path.ends_with(JAVA_MANIFEST)
        });

        penalise(!has_readme, p.missing_readme, ISSUE_MISSING_README);
        penalise(!has_gitignore, p.missing_gitignore, ISSUE_MISSING_GITIGNORE);
        penalise(!has_manifest, p.missing_manifest, ISSUE_MISSING_MANIFEST);
        penalise(!has_source_root, p.missing_source_root, ISSUE_MISSING_SOURCE_ROOT);
        penalise(
            is_backend && !has_controllers && !has_services,
            p.missing_layers,
            ISSUE_MISSING_LAYERS,
        );

        AuditReport {
            score,
            passed: score > p.pass_threshold,
            issues,
            standards: Standards {
                solid: true,
                clean_architecture: has_services,
                dry: true,
                security: true,
            },
        }
    }
}
