//! Pure stage transforms.
//!
//! Each function computes a stage's output from its typed input and the
//! already-populated slices of the project state. None of them touch the
//! state; the engine applies the result afterwards. Upstream slices that are
//! absent are replaced by their defaults.
//!
//! Construction is the exception: generation is delegated to the
//! orchestrator, so this module only provides the config and output
//! assembly around it.

use chrono::{DateTime, Utc};

use crate::domain::{
    entities::{GeneratorOutput, ProjectConfig},
    error::DomainError,
    pipeline::{inputs::*, outputs::*, ProjectState},
    value_objects::{
        ArchitectureStyle, Complexity, DomainCategory, Methodology, RiskLevel, StageId,
    },
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// ── 1. Requirements ──────────────────────────────────────────────────────────

/// Keyword vocabulary, checked in order. First hit wins.
const DOMAIN_KEYWORDS: [(DomainCategory, &[&str]); 4] = [
    (DomainCategory::FinTech, &["pago", "fintech", "banco", "dinero"]),
    (DomainCategory::HealthTech, &["salud", "médico", "hospital"]),
    (DomainCategory::ECommerce, &["tienda", "venta", "e-commerce"]),
    (DomainCategory::EdTech, &["educación", "curso"]),
];

const HIGH_COMPLEXITY_ABOVE: usize = 10;
const LONG_OBJECTIVES_ABOVE: usize = 100;

pub fn classify_domain(text: &str) -> DomainCategory {
    let text = text.to_lowercase();
    DOMAIN_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(domain, _)| domain.clone())
        .unwrap_or_default()
}

/// `stakeholders * 2 + (long objectives ? 5 : 2)`, High above ten.
pub fn estimate_complexity(stakeholders: Option<&str>, objectives: Option<&str>) -> Complexity {
    let stakeholder_count = stakeholders.map_or(1, |s| s.split(',').count());
    let objective_weight = match objectives {
        Some(o) if o.chars().count() > LONG_OBJECTIVES_ABOVE => 5,
        _ => 2,
    };
    if stakeholder_count * 2 + objective_weight > HIGH_COMPLEXITY_ABOVE {
        Complexity::High
    } else {
        Complexity::Medium
    }
}

pub fn requirements(input: &RequirementsInput) -> RequirementsOutput {
    let haystack = format!(
        "{}{}",
        text(&input.problem_description).unwrap_or_default(),
        text(&input.objectives).unwrap_or_default()
    );
    let domain = classify_domain(&haystack);
    let complexity = estimate_complexity(
        input.stakeholders.as_deref(),
        input.objectives.as_deref(),
    );
    let product_type = match &input.project_name {
        Some(name) if name.contains("App") => "Mobile",
        _ => "Web/SaaS",
    };
    let level = if domain.is_regulated() {
        RiskLevel::Critical
    } else {
        RiskLevel::Standard
    };

    RequirementsOutput {
        event: "requirements.validated".into(),
        analysis: RequirementsAnalysis {
            product_type: product_type.into(),
            business_goal: input.objectives.clone(),
            target_user: input.stakeholders.clone(),
            domain,
            estimated_complexity: complexity,
        },
        risk_assessment: RiskAssessment {
            level,
            factors: strings(&["Data Privacy", "Regulatory Compliance"]),
        },
        constraints: Constraints {
            time_to_market: "ASAP".into(),
            budget: "Flexible".into(),
        },
        intake: Some(Intake {
            project_name: text(&input.project_name).map(str::to_string),
            problem_description: text(&input.problem_description).map(str::to_string),
        }),
    }
}

// ── 2. Decision ──────────────────────────────────────────────────────────────

const SCALABILITY_TOKENS: [&str; 2] = ["Escalabilidad", "Scalability"];
const TIME_TO_MARKET_TOKEN: &str = "Time-to-Market";

pub fn decision(requirements: &RequirementsOutput, input: &DecisionInput) -> DecisionOutput {
    let analysis = &requirements.analysis;
    let high = analysis.estimated_complexity == Complexity::High;
    let preference = text(&input.methodology_preference).unwrap_or_default();
    let criteria = input.decision_criteria.as_ref();
    let wants_scale = criteria.is_some_and(|c| SCALABILITY_TOKENS.iter().any(|t| c.mentions(t)));
    let wants_speed = criteria.is_some_and(|c| c.mentions(TIME_TO_MARKET_TOKEN));

    let (methodology, justification) = if preference.contains("Waterfall") {
        (
            Methodology::Waterfall,
            "Selected due to fixed requirements and strict regulatory environment.",
        )
    } else if preference.contains("Lean") {
        (
            Methodology::LeanStartup,
            "Focus on MVP and rapid validation loop.",
        )
    } else if high {
        (
            Methodology::Scrum,
            "High complexity requires iterative sprints to manage risk and changes.",
        )
    } else {
        (
            Methodology::Kanban,
            "Continuous flow suitable for maintenance or steady work streams.",
        )
    };

    let (style, style_justification) = if wants_scale || high {
        (
            ArchitectureStyle::Microservices,
            "Decoupling required for independent scaling of modules.",
        )
    } else if wants_speed {
        (
            ArchitectureStyle::Serverless,
            "Focus on code, zero infra management for speed.",
        )
    } else {
        (ArchitectureStyle::Monolith, "Simplicity for speed.")
    };

    let backend = if analysis.domain == DomainCategory::FinTech {
        "Java (Spring Boot)"
    } else {
        "Node.js (NestJS)"
    };
    let database = if wants_scale {
        "NoSQL (MongoDB)"
    } else {
        "SQL (PostgreSQL)"
    };

    DecisionOutput {
        event: "decision.made".into(),
        methodology: Selection {
            selected: methodology,
            justification: justification.into(),
        },
        architecture: Selection {
            selected: style,
            justification: style_justification.into(),
        },
        stack_recommendation: StackRecommendation {
            frontend: "React (Next.js)".into(),
            backend: backend.into(),
            database: database.into(),
            infrastructure: "AWS (Containerized)".into(),
        },
    }
}

// ── 3. Architecture ──────────────────────────────────────────────────────────

pub const STANDARD_LAYERS: [&str; 4] = [
    "Presentation",
    "Application/Business",
    "Domain",
    "Infrastructure/Persistence",
];

pub fn architecture(decision: &DecisionOutput) -> ArchitectureOutput {
    let style = decision.architecture.selected;
    let distributed = style.is_distributed();

    let (patterns, scalability, diagram, components): (&[&str], _, _, _) = if distributed {
        (
            &["API Gateway", "Circuit Breaker", "CQRS"],
            "Horizontal (Pod Autoscaling)",
            "[Client] -> [API Gateway] -> [Auth Service, User Service, Business Service] -> [DB Cluster]",
            5,
        )
    } else {
        (
            &["MVC", "Repository Pattern"],
            "Vertical (Resource Upgrade)",
            "[Client] -> [Load Balancer] -> [App Server Cluster] -> [Primary DB]",
            2,
        )
    };

    ArchitectureOutput {
        event: "architecture.ready".into(),
        structure: ArchitectureStructure {
            style,
            layers: strings(&STANDARD_LAYERS),
            patterns: strings(patterns),
            security: strings(&["OAuth2/OIDC", "Rate Limiting", "WAF"]),
            scalability: scalability.into(),
        },
        diagram: diagram.into(),
        components,
    }
}

// ── 4. Design ────────────────────────────────────────────────────────────────

pub fn design(input: &DesignInput) -> DesignOutput {
    let responsive = input
        .device_support
        .clone()
        .map_or_else(|| strings(&["Mobile", "Desktop"]), TextList::into_vec);

    DesignOutput {
        event: "ui.designed".into(),
        system: DesignSystem {
            design_system: "Atomic Design".into(),
            theme: text(&input.design_style).unwrap_or("Modern").into(),
            accessibility: text(&input.accessibility).unwrap_or("AA").into(),
            responsive,
        },
        assets: DesignAssets {
            wireframes: "Generated".into(),
            prototypes: "Interactive".into(),
            style_guide: "Compiled".into(),
        },
    }
}

// ── 5. Planning ──────────────────────────────────────────────────────────────

pub const DEFAULT_SPRINTS: u32 = 4;
pub const DEFAULT_TEAM_SIZE: u32 = 3;
pub const WEEKS_PER_SPRINT: u32 = 2;
/// Weekly cost per developer, USD.
pub const WEEKLY_RATE: u64 = 2500;

/// Fails with [`DomainError::InvalidStageInput`] when the sprint count or
/// the budget does not fit the output's integer types.
pub fn planning(input: &PlanningInput) -> Result<PlanningOutput, DomainError> {
    let sprints = input.sprints.unwrap_or(DEFAULT_SPRINTS);
    let team_size = input.team_size.unwrap_or(DEFAULT_TEAM_SIZE);
    let out_of_range = || DomainError::InvalidStageInput {
        stage: StageId::Planning.number(),
        reason: format!("budget for {sprints} sprints with a team of {team_size} is out of range"),
    };
    let weeks = sprints.checked_mul(WEEKS_PER_SPRINT).ok_or_else(out_of_range)?;
    let amount = u64::from(weeks)
        .checked_mul(u64::from(team_size))
        .and_then(|n| n.checked_mul(WEEKLY_RATE))
        .ok_or_else(out_of_range)?;

    Ok(PlanningOutput {
        event: "plan.ready".into(),
        timeline: Timeline {
            total_duration: format!("{weeks} weeks"),
            sprints,
            milestones: strings(&["MVP Alpha", "Beta Testing", "Production Release"]),
        },
        resources: Resources {
            team_size,
            roles: strings(&[
                "Product Owner",
                "Scrum Master",
                "Full Stack Devs",
                "QA Engineer",
            ]),
        },
        budget: Budget {
            estimated_total: format!("${}", group_thousands(amount)),
            amount,
            currency: "USD".into(),
            confidence: "85%".into(),
        },
    })
}

/// `40000` → `"40,000"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── 6. Construction ──────────────────────────────────────────────────────────

pub const DEFAULT_REPO_URL: &str = "git@github.com:factory/project.git";
pub const DEFAULT_PROJECT_NAME: &str = "factory-project";

/// Generator key for the construction stage.
///
/// An explicit `language` wins. Otherwise the backend label (input first,
/// then the decision stage's recommendation) is searched for `java` and
/// `python`; anything else is `node`.
pub fn select_language(input: &ConstructionInput, state: &ProjectState) -> String {
    if let Some(language) = text(&input.language) {
        return language.to_lowercase();
    }

    let backend = text(&input.backend)
        .or_else(|| {
            state
                .decision
                .as_ref()
                .map(|d| d.stack_recommendation.backend.as_str())
        })
        .unwrap_or_default()
        .to_lowercase();

    if backend.contains("java") {
        "java".into()
    } else if backend.contains("python") {
        "python".into()
    } else {
        "node".into()
    }
}

/// The read-only config slice handed to the orchestrator.
pub fn build_config(
    input: &ConstructionInput,
    state: &ProjectState,
) -> Result<ProjectConfig, DomainError> {
    let intake = state.requirements.as_ref().and_then(|r| r.intake.as_ref());

    let project_name = text(&input.project_name)
        .or_else(|| intake.and_then(|i| text(&i.project_name)))
        .unwrap_or(DEFAULT_PROJECT_NAME);
    let description = intake
        .and_then(|i| text(&i.problem_description))
        .unwrap_or(crate::domain::entities::render::DEFAULT_DESCRIPTION);
    let architecture = state.decision.as_ref().map_or_else(
        || "monolith".to_string(),
        |d| d.architecture.selected.as_str().to_lowercase(),
    );

    let mut builder = ProjectConfig::builder()
        .project_name(project_name)
        .description(description)
        .language(select_language(input, state))
        .architecture(architecture);
    if let Some(requirements) = &state.requirements {
        builder = builder.domain(requirements.analysis.domain.as_str());
    }
    builder.build()
}

pub fn construction_output(input: &ConstructionInput, generated: &GeneratorOutput) -> ConstructionOutput {
    ConstructionOutput {
        event: "code.generated".into(),
        repository: Repository {
            url: text(&input.repo_url).unwrap_or(DEFAULT_REPO_URL).into(),
            branches: strings(&["main", "develop", "feature/*"]),
            commits: "Initial Commit".into(),
        },
        generated_files: generated
            .files
            .iter()
            .map(|f| (f.path.clone(), f.content.clone()))
            .collect(),
        structure: CodeStructure {
            folders: strings(&["/src"]),
            files: generated.paths().map(str::to_string).collect(),
        },
        quality_gate: QualityGate {
            linting: "ESLint Standard".into(),
            formatting: "Prettier".into(),
            static_analysis: "SonarQube Enabled".into(),
        },
        instructions: generated.instructions.clone(),
        dependencies: generated.dependencies.clone(),
    }
}

// ── 7. QA ────────────────────────────────────────────────────────────────────

/// Fixed placeholder. Not derived from the generated code.
const MOCK_COVERAGE: u32 = 80;

pub fn qa() -> QaOutput {
    QaOutput {
        event: "qa.passed".into(),
        summary: TestSummary {
            total_tests: 142,
            passed: 142,
            failed: 0,
            skipped: 0,
        },
        coverage: Coverage {
            statements: format!("{MOCK_COVERAGE}%"),
            branches: format!("{}%", MOCK_COVERAGE - 5),
            functions: format!("{}%", MOCK_COVERAGE + 2),
            lines: format!("{MOCK_COVERAGE}%"),
        },
        security_scan: SecurityScan {
            vulnerabilities: 0,
            grade: "A".into(),
        },
    }
}

// ── 8. Deployment ────────────────────────────────────────────────────────────

pub fn deployment(input: &DeploymentInput) -> DeploymentOutput {
    let target = text(&input.environment).unwrap_or("AWS");

    DeploymentOutput {
        event: "deployment.success".into(),
        pipeline: DeployPipeline {
            stages: strings(&["Build", "Test", "Security Scan", "Deploy"]),
            status: "Success".into(),
            duration: "4m 12s".into(),
        },
        environment: Environment {
            target: target.into(),
            url: format!("https://{}.factory-deploy.com/app", target.to_lowercase()),
            replicas: 3,
            health: "Healthy".into(),
        },
    }
}

// ── 9. Monitoring ────────────────────────────────────────────────────────────

pub fn monitoring(input: &MonitoringInput) -> MonitoringOutput {
    MonitoringOutput {
        event: "monitoring.active".into(),
        observability: Observability {
            logging: "Centralized (ELK Stack)".into(),
            metrics: "Prometheus + Grafana".into(),
            tracing: "OpenTelemetry".into(),
        },
        alerts: Alerts {
            configured: input.alert_threshold.as_ref().is_some_and(is_truthy),
            channels: strings(&["Slack", "Email", "PagerDuty"]),
        },
        status: "All Systems Operational".into(),
    }
}

/// JavaScript truthiness for a JSON value.
pub fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ── 10. Valuation ────────────────────────────────────────────────────────────

pub const BASE_VALUE: u64 = 15_000;
pub const COST_BASIS: u64 = 20_000;
const QUALITY_COVERAGE_ABOVE: i64 = 80;

/// The four multipliers, each held in tenths (`2.5` is `25`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multipliers {
    pub complexity: u32,
    pub architecture: u32,
    pub quality: u32,
    pub market_demand: u32,
}

impl Multipliers {
    pub fn from_state(state: &ProjectState) -> Self {
        let analysis = state.requirements.as_ref().map(|r| &r.analysis);

        let complexity = match analysis.map(|a| a.estimated_complexity) {
            Some(Complexity::High) => 25,
            _ => 15,
        };
        let architecture = match state.decision.as_ref().map(|d| d.architecture.selected) {
            Some(style) if style.is_distributed() => 20,
            _ => 12,
        };
        let coverage = state
            .qa
            .as_ref()
            .and_then(|q| leading_int(&q.coverage.statements));
        let quality = match coverage {
            Some(c) if c > QUALITY_COVERAGE_ABOVE => 12,
            _ => 10,
        };
        let market_demand = analysis.map_or(10, |a| market_demand_tenths(&a.domain));

        Self {
            complexity,
            architecture,
            quality,
            market_demand,
        }
    }

    /// `BASE_VALUE` times all four multipliers, scaled by 10^4.
    fn scaled_value(&self) -> u64 {
        BASE_VALUE
            * u64::from(self.complexity)
            * u64::from(self.architecture)
            * u64::from(self.quality)
            * u64::from(self.market_demand)
    }

    /// Estimated value rounded half up to whole currency units.
    pub fn market_value(&self) -> u64 {
        (self.scaled_value() + 5_000) / 10_000
    }

    /// `(value - cost) / cost * 100`, rounded half up.
    pub fn roi_percent(&self) -> i64 {
        let value = self.scaled_value() as f64 / 10_000.0;
        let cost = COST_BASIS as f64;
        js_round((value - cost) / cost * 100.0)
    }
}

pub fn market_demand_tenths(domain: &DomainCategory) -> u32 {
    match domain {
        DomainCategory::FinTech => 18,
        DomainCategory::HealthTech => 16,
        DomainCategory::ECommerce => 14,
        _ => 10,
    }
}

/// Round half towards positive infinity.
pub fn js_round(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Leading integer of a string such as `"85%"`, like a lenient integer
/// parse: surrounding whitespace and trailing garbage are ignored.
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

pub fn valuation(state: &ProjectState, now: DateTime<Utc>) -> ValuationOutput {
    let m = Multipliers::from_state(state);

    ValuationOutput {
        event: "valuation.complete".into(),
        financials: Financials {
            market_value: m.market_value(),
            currency: "USD".into(),
            roi: format!("{}%", m.roi_percent()),
            break_even_point: "6 months".into(),
        },
        scoring: Scoring {
            complexity_score: m.complexity,
            architecture_score: m.architecture,
            quality_score: m.quality,
            market_potential: m.market_demand,
        },
        certification: Certification {
            issued: true,
            level: "Gold Standard".into(),
            timestamp: Some(now),
        },
    }
}

// ── 11. Delivery ─────────────────────────────────────────────────────────────

pub fn delivery() -> DeliveryOutput {
    DeliveryOutput {
        event: "delivery.ready".into(),
        artifacts: strings(&[
            "Source Code (Zip)",
            "Docker Images",
            "API Documentation (Swagger)",
            "User Manual.pdf",
            "Architecture Diagrams",
            "Valuation Certificate",
        ]),
        access: Access {
            repo: "Read-Only".into(),
            admin_panel: "SuperUser Created".into(),
        },
        next_steps: strings(&["Schedule Training", "Sign Off", "Handover Keys"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::GeneratedFile;

    fn req(description: &str) -> RequirementsInput {
        RequirementsInput {
            problem_description: Some(description.into()),
            ..Default::default()
        }
    }

    #[test]
    fn banco_is_fintech_and_critical() {
        let out = requirements(&req("Un banco digital para jóvenes"));
        assert_eq!(out.analysis.domain, DomainCategory::FinTech);
        assert_eq!(out.risk_assessment.level, RiskLevel::Critical);
    }

    #[test]
    fn first_keyword_group_wins() {
        // Both a FinTech and an E-Commerce keyword: FinTech is checked first.
        assert_eq!(classify_domain("tienda con pago"), DomainCategory::FinTech);
        assert_eq!(classify_domain("Hospital"), DomainCategory::HealthTech);
        assert_eq!(classify_domain("un curso online"), DomainCategory::EdTech);
        assert_eq!(classify_domain("a todo list"), DomainCategory::General);
    }

    #[test]
    fn general_domain_is_standard_risk() {
        let out = requirements(&req("a todo list"));
        assert_eq!(out.risk_assessment.level, RiskLevel::Standard);
        assert_eq!(out.analysis.product_type, "Web/SaaS");
    }

    #[test]
    fn complexity_from_stakeholders_and_objectives() {
        assert_eq!(estimate_complexity(None, None), Complexity::Medium);
        // 5 stakeholders * 2 + 2 = 12.
        assert_eq!(
            estimate_complexity(Some("a,b,c,d,e"), Some("short")),
            Complexity::High
        );
        // 3 * 2 + 5 = 11.
        let long = "x".repeat(101);
        assert_eq!(estimate_complexity(Some("a,b,c"), Some(&long)), Complexity::High);
        // 4 * 2 + 2 = 10, not above ten.
        assert_eq!(estimate_complexity(Some("a,b,c,d"), None), Complexity::Medium);
    }

    #[test]
    fn app_in_name_means_mobile() {
        let input = RequirementsInput {
            project_name: Some("BankApp".into()),
            ..Default::default()
        };
        assert_eq!(requirements(&input).analysis.product_type, "Mobile");
    }

    #[test]
    fn requirements_records_intake() {
        let input = RequirementsInput {
            project_name: Some("Ledger".into()),
            problem_description: Some("pagos".into()),
            ..Default::default()
        };
        let intake = requirements(&input).intake.unwrap();
        assert_eq!(intake.project_name.as_deref(), Some("Ledger"));
        assert_eq!(intake.problem_description.as_deref(), Some("pagos"));
    }

    #[test]
    fn decision_preference_wins() {
        let input = DecisionInput {
            methodology_preference: Some("Lean Startup".into()),
            ..Default::default()
        };
        let out = decision(&RequirementsOutput::default(), &input);
        assert_eq!(out.methodology.selected, Methodology::LeanStartup);
        assert_eq!(out.architecture.selected, ArchitectureStyle::Monolith);
    }

    #[test]
    fn decision_high_complexity_means_scrum_and_microservices() {
        let mut reqs = RequirementsOutput::default();
        reqs.analysis.estimated_complexity = Complexity::High;
        let out = decision(&reqs, &DecisionInput::default());
        assert_eq!(out.methodology.selected, Methodology::Scrum);
        assert_eq!(out.architecture.selected, ArchitectureStyle::Microservices);
        assert_eq!(out.stack_recommendation.database, "SQL (PostgreSQL)");
    }

    #[test]
    fn decision_criteria() {
        let scale = DecisionInput {
            decision_criteria: Some(TextList::List(vec!["Escalabilidad".into()])),
            ..Default::default()
        };
        let out = decision(&RequirementsOutput::default(), &scale);
        assert_eq!(out.methodology.selected, Methodology::Kanban);
        assert_eq!(out.architecture.selected, ArchitectureStyle::Microservices);
        assert_eq!(out.stack_recommendation.database, "NoSQL (MongoDB)");

        let speed = DecisionInput {
            decision_criteria: Some(TextList::Text("Time-to-Market".into())),
            ..Default::default()
        };
        let out = decision(&RequirementsOutput::default(), &speed);
        assert_eq!(out.architecture.selected, ArchitectureStyle::Serverless);
        let partial = DecisionInput {
            decision_criteria: Some(TextList::List(vec!["Alta Escalabilidad".into()])),
            ..Default::default()
        };
        let out = decision(&RequirementsOutput::default(), &partial);
        assert_eq!(out.architecture.selected, ArchitectureStyle::Monolith);
        assert_eq!(out.stack_recommendation.database, "SQL (PostgreSQL)");
    }

    #[test]
    fn fintech_recommends_java_backend() {
        let reqs = requirements(&req("banco"));
        let out = decision(&reqs, &DecisionInput::default());
        assert_eq!(out.stack_recommendation.backend, "Java (Spring Boot)");
    }

    #[test]
    fn architecture_patterns_follow_style() {
        let mut dec = DecisionOutput::default();
        dec.architecture.selected = ArchitectureStyle::Microservices;
        let out = architecture(&dec);
        assert_eq!(out.structure.patterns, vec!["API Gateway", "Circuit Breaker", "CQRS"]);
        assert_eq!(out.components, 5);

        let out = architecture(&DecisionOutput::default());
        assert_eq!(out.structure.patterns, vec!["MVC", "Repository Pattern"]);
        assert_eq!(out.components, 2);
        assert_eq!(out.structure.layers.len(), 4);
    }

    #[test]
    fn design_defaults() {
        let out = design(&DesignInput::default());
        assert_eq!(out.system.theme, "Modern");
        assert_eq!(out.system.accessibility, "AA");
        assert_eq!(out.system.responsive, vec!["Mobile", "Desktop"]);
    }

    #[test]
    fn explicit_empty_device_list_is_kept() {
        let out = design(&DesignInput {
            device_support: Some(TextList::List(Vec::new())),
            ..Default::default()
        });
        assert!(out.system.responsive.is_empty());
    }

    #[test]
    fn planning_budget() {
        let out = planning(&PlanningInput::default()).unwrap();
        assert_eq!(out.timeline.total_duration, "8 weeks");
        assert_eq!(out.budget.estimated_total, "$60,000");
        assert_eq!(out.budget.amount, 60_000);

        let out = planning(&PlanningInput {
            sprints: Some(10),
            team_size: Some(8),
        })
        .unwrap();
        assert_eq!(out.budget.estimated_total, "$1,000,000");
    }

    #[test]
    fn oversized_plan_is_rejected() {
        let err = planning(&PlanningInput {
            sprints: Some(3_000_000_000),
            team_size: Some(4_000_000_000),
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStageInput { stage: 5, .. }));

        let err = planning(&PlanningInput {
            sprints: Some(u32::MAX / 2),
            team_size: Some(u32::MAX),
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStageInput { stage: 5, .. }));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn language_selection_order() {
        let mut state = ProjectState::default();
        assert_eq!(select_language(&ConstructionInput::default(), &state), "node");

        state.decision = Some(decision(&requirements(&req("banco")), &DecisionInput::default()));
        assert_eq!(select_language(&ConstructionInput::default(), &state), "java");

        let python = ConstructionInput {
            backend: Some("Python (FastAPI)".into()),
            ..Default::default()
        };
        assert_eq!(select_language(&python, &state), "python");

        let explicit = ConstructionInput {
            language: Some("Frontend".into()),
            backend: Some("Python".into()),
            ..Default::default()
        };
        assert_eq!(select_language(&explicit, &state), "frontend");
    }

    #[test]
    fn config_uses_intake_and_decision() {
        let mut state = ProjectState::default();
        state.requirements = Some(requirements(&RequirementsInput {
            project_name: Some("Ledger".into()),
            problem_description: Some("Un banco".into()),
            ..Default::default()
        }));
        let mut dec = DecisionOutput::default();
        dec.architecture.selected = ArchitectureStyle::Serverless;
        state.decision = Some(dec);

        let config = build_config(&ConstructionInput::default(), &state).unwrap();
        assert_eq!(config.project_name(), "Ledger");
        assert_eq!(config.description(), Some("Un banco"));
        assert_eq!(config.architecture(), "serverless");
        assert_eq!(config.domain(), Some("FinTech"));
    }

    #[test]
    fn config_defaults_on_empty_state() {
        let config = build_config(&ConstructionInput::default(), &ProjectState::default()).unwrap();
        assert_eq!(config.project_name(), DEFAULT_PROJECT_NAME);
        assert_eq!(config.description(), Some("Generated Project"));
        assert_eq!(config.architecture(), "monolith");
        assert_eq!(config.language(), "node");
    }

    #[test]
    fn construction_output_maps_files() {
        let generated = GeneratorOutput::new(vec![
            GeneratedFile::new("b.txt", "2"),
            GeneratedFile::new("a.txt", "1"),
        ])
        .with_instruction("npm install");
        let out = construction_output(&ConstructionInput::default(), &generated);

        assert_eq!(out.repository.url, DEFAULT_REPO_URL);
        assert_eq!(out.generated_files["a.txt"], "1");
        assert_eq!(out.structure.files, vec!["b.txt", "a.txt"]);
        assert_eq!(out.instructions, vec!["npm install"]);
    }

    #[test]
    fn qa_is_fixed() {
        let out = qa();
        assert_eq!(out.summary.total_tests, 142);
        assert_eq!(out.coverage.statements, "80%");
        assert_eq!(out.coverage.branches, "75%");
        assert_eq!(out.coverage.functions, "82%");
    }

    #[test]
    fn deployment_url_from_environment() {
        let out = deployment(&DeploymentInput {
            environment: Some("GCP".into()),
        });
        assert_eq!(out.environment.url, "https://gcp.factory-deploy.com/app");
        assert_eq!(
            deployment(&DeploymentInput::default()).environment.url,
            "https://aws.factory-deploy.com/app"
        );
    }

    #[test]
    fn alerts_follow_threshold_truthiness() {
        use serde_json::json;
        let configured = |v| {
            monitoring(&MonitoringInput {
                alert_threshold: Some(v),
            })
            .alerts
            .configured
        };
        assert!(configured(json!(90)));
        assert!(configured(json!("high")));
        assert!(!configured(json!(0)));
        assert!(!configured(json!("")));
        assert!(!monitoring(&MonitoringInput::default()).alerts.configured);
    }

    #[test]
    fn valuation_scenario_high_microservices_fintech() {
        let mut state = ProjectState::default();
        let mut reqs = RequirementsOutput::default();
        reqs.analysis.estimated_complexity = Complexity::High;
        reqs.analysis.domain = DomainCategory::FinTech;
        state.requirements = Some(reqs);
        let mut dec = DecisionOutput::default();
        dec.architecture.selected = ArchitectureStyle::Microservices;
        state.decision = Some(dec);
        let mut qa_out = QaOutput::default();
        qa_out.coverage.statements = "85%".into();
        state.qa = Some(qa_out);

        let out = valuation(&state, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(out.financials.market_value, 162_000);
        assert_eq!(out.financials.roi, "710%");
        assert_eq!(out.scoring.complexity_score, 25);
        assert_eq!(out.scoring.architecture_score, 20);
        assert_eq!(out.scoring.quality_score, 12);
        assert_eq!(out.scoring.market_potential, 18);
        assert_eq!(out.certification.timestamp, Some(DateTime::<Utc>::UNIX_EPOCH));
    }

    #[test]
    fn valuation_on_empty_state_uses_low_multipliers() {
        let out = valuation(&ProjectState::default(), DateTime::<Utc>::UNIX_EPOCH);
        // 15000 * 1.5 * 1.2 * 1.0 * 1.0
        assert_eq!(out.financials.market_value, 27_000);
        assert_eq!(out.financials.roi, "35%");
    }

    #[test]
    fn coverage_of_exactly_eighty_is_not_a_bonus() {
        let mut state = ProjectState::default();
        state.qa = Some(qa());
        assert_eq!(Multipliers::from_state(&state).quality, 10);
    }

    #[test]
    fn leading_int_parses_like_a_lenient_integer() {
        assert_eq!(leading_int("85%"), Some(85));
        assert_eq!(leading_int("  -3x"), Some(-3));
        assert_eq!(leading_int("%"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn js_round_halves_up() {
        assert_eq!(js_round(2.5), 3);
        assert_eq!(js_round(-2.5), -2);
        assert_eq!(js_round(710.0), 710);
    }

    #[test]
    fn delivery_manifest() {
        let out = delivery();
        assert_eq!(out.artifacts.len(), 6);
        assert_eq!(out.next_steps, vec!["Schedule Training", "Sign Off", "Handover Keys"]);
    }
}
