//! Hosting-provider recommendations from a static catalog.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use serde::Serialize;

use crate::domain::value_objects::Role;

/// Path the orchestrator writes the rendered guide to.
pub const CLOUD_GUIDE_PATH: &str = "CLOUD_DEPLOY.md";

/// Sentinel language meaning "supports everything".
const ALL_LANGUAGES: &str = "all";

/// Generic web-runtime token that `javascript` and `typescript` alias to.
const WEB_RUNTIME: &str = "node";

const FRONTEND_SPECIALISTS: [&str; 2] = ["Vercel", "Netlify"];
const BACKEND_SPECIALISTS: [&str; 3] = ["Railway", "Render", "Fly.io"];

/// A catalog entry. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudProvider {
    pub name: &'static str,
    pub url: &'static str,
    pub free_tier: bool,
    pub supported_languages: &'static [&'static str],
    pub description: &'static str,
}

impl CloudProvider {
    fn supports(&self, language: &str) -> bool {
        self.supported_languages
            .iter()
            .any(|l| *l == ALL_LANGUAGES || *l == language)
            || (matches!(language, "javascript" | "typescript")
                && self.supported_languages.contains(&WEB_RUNTIME))
    }

    fn specialises_in(&self, role: Role) -> bool {
        match role {
            Role::Frontend => FRONTEND_SPECIALISTS.contains(&self.name),
            Role::Backend => BACKEND_SPECIALISTS.contains(&self.name),
            Role::Fullstack => false,
        }
    }
}

pub static CATALOG: [CloudProvider; 7] = [
    CloudProvider {
        name: "Railway",
        url: "https://railway.app",
        free_tier: true,
        supported_languages: &["node", "python", "java", "go", "docker"],
        description: "Great for full-stack apps and databases. Easy deployment.",
    },
    CloudProvider {
        name: "Render",
        url: "https://render.com",
        free_tier: true,
        supported_languages: &["node", "python", "go", "rust", "static"],
        description: "Good alternative to Heroku. Free web services spin down.",
    },
    CloudProvider {
        name: "Vercel",
        url: "https://vercel.com",
        free_tier: true,
        supported_languages: &["node", "frontend", "python", "go"],
        description: "Best for frontend and serverless functions (Next.js, React).",
    },
    CloudProvider {
        name: "Netlify",
        url: "https://netlify.com",
        free_tier: true,
        supported_languages: &["frontend"],
        description: "Excellent for static sites and JAMstack.",
    },
    CloudProvider {
        name: "Fly.io",
        url: "https://fly.io",
        free_tier: true,
        supported_languages: &["docker", "node", "python", "go"],
        description: "Run your apps close to users. Good for dockerized apps.",
    },
    CloudProvider {
        name: "Heroku",
        url: "https://heroku.com",
        free_tier: false,
        supported_languages: &["node", "python", "java", "php", "go"],
        description: "The classic PaaS. Paid plans only now.",
    },
    CloudProvider {
        name: "AWS Free Tier",
        url: "https://aws.amazon.com/free",
        free_tier: true,
        supported_languages: &["all"],
        description: "Enterprise grade, 12 months free on EC2/Lambda.",
    },
];

/// Filters and orders [`CATALOG`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudAdvisor;

impl CloudAdvisor {
    pub const fn new() -> Self {
        Self
    }

    pub fn catalog(&self) -> &'static [CloudProvider] {
        &CATALOG
    }

    /// Providers that support `language` or specialise in `role`.
    ///
    /// Free-tier providers come first; the sort is stable, so catalog order
    /// is kept inside each partition.
    pub fn recommend(&self, language: &str, role: Role) -> Vec<&'static CloudProvider> {
        let lang = language.to_lowercase();
        let mut picks: Vec<&'static CloudProvider> = CATALOG
            .iter()
            .filter(|p| p.specialises_in(role) || p.supports(&lang))
            .collect();
        picks.sort_by_key(|p| !p.free_tier);
        picks
    }

    /// Markdown deployment guide for a recommendation list.
    pub fn render_guide(&self, language: &str, providers: &[&CloudProvider]) -> String {
        let sections = providers
            .iter()
            .map(|p| {
                let badge = if p.free_tier { " (FREE TIER AVAILABLE)" } else { "" };
                format!(
                    "## {}{}\n- **URL**: {}\n- **Why**: {}\n",
                    p.name, badge, p.url, p.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "# Cloud Deployment Guide\n\
             Based on your stack ({language}), we recommend the following providers:\n\
             \n\
             {sections}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(providers: &[&CloudProvider]) -> Vec<&'static str> {
        providers.iter().map(|p| p.name).collect()
    }

    #[test]
    fn java_backend() {
        let picks = CloudAdvisor::new().recommend("java", Role::Backend);
        assert_eq!(
            names(&picks),
            vec!["Railway", "Render", "Fly.io", "AWS Free Tier", "Heroku"]
        );
    }

    #[test]
    fn frontend_role() {
        let picks = CloudAdvisor::new().recommend("frontend", Role::Frontend);
        assert_eq!(names(&picks), vec!["Vercel", "Netlify", "AWS Free Tier"]);
    }

    #[test]
    fn typescript_aliases_to_node() {
        let picks = CloudAdvisor::new().recommend("TypeScript", Role::Fullstack);
        assert_eq!(
            names(&picks),
            vec!["Railway", "Render", "Vercel", "Fly.io", "AWS Free Tier", "Heroku"]
        );
    }

    #[test]
    fn unknown_language_fullstack_gets_only_universal_providers() {
        let picks = CloudAdvisor::new().recommend("cobol", Role::Fullstack);
        assert_eq!(names(&picks), vec!["AWS Free Tier"]);
    }

    #[test]
    fn free_tier_never_follows_paid() {
        let advisor = CloudAdvisor::new();
        for lang in ["node", "java", "python", "php", "frontend", "go", "rust"] {
            for role in [Role::Frontend, Role::Backend, Role::Fullstack] {
                let picks = advisor.recommend(lang, role);
                let first_paid = picks.iter().position(|p| !p.free_tier);
                if let Some(idx) = first_paid {
                    assert!(picks[idx..].iter().all(|p| !p.free_tier), "{lang}/{role}");
                }
            }
        }
    }

    #[test]
    fn guide_marks_free_tier() {
        let advisor = CloudAdvisor::new();
        let picks = advisor.recommend("php", Role::Fullstack);
        let guide = advisor.render_guide("php", &picks);

        assert!(guide.starts_with("# Cloud Deployment Guide\nBased on your stack (php)"));
        assert!(guide.contains("## AWS Free Tier (FREE TIER AVAILABLE)"));
        assert!(guide.contains("## Heroku\n- **URL**: https://heroku.com"));
    }
}
