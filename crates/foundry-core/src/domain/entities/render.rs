//! Placeholder substitution for generator templates.
//!
//! Generators hold their scaffold files as static strings containing
//! `{{VARIABLE}}` placeholders. A [`RenderContext`] built from a
//! [`ProjectConfig`] fills them in.

use std::collections::BTreeMap;

use crate::domain::entities::project_config::ProjectConfig;

/// Description used when the config carries none.
pub const DEFAULT_DESCRIPTION: &str = "Generated Project";

/// Variables available to a template render.
///
/// ## Built-in Variables
///
/// | Variable | Example |
/// |----------|---------|
/// | `PROJECT_NAME` | "My Bank App" |
/// | `PROJECT_NAME_SNAKE` | "my_bank_app" |
/// | `PROJECT_NAME_KEBAB` | "my-bank-app" |
/// | `PROJECT_NAME_PASCAL` | "MyBankApp" |
/// | `ARTIFACT_NAME` | "my-bank-app" |
/// | `DESCRIPTION` | "Generated Project" |
/// | `ARCHITECTURE` | "monolith" |
/// | `LANGUAGE` | "java" |
///
/// Stored in a `BTreeMap` so that two contexts built from the same config
/// are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new(project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        let mut vars = BTreeMap::new();

        vars.insert("PROJECT_NAME_SNAKE".to_string(), to_snake_case(&name));
        vars.insert("PROJECT_NAME_KEBAB".to_string(), to_kebab_case(&name));
        vars.insert("PROJECT_NAME_PASCAL".to_string(), to_pascal_case(&name));
        vars.insert("PROJECT_NAME".to_string(), name);
        vars.insert("DESCRIPTION".to_string(), DEFAULT_DESCRIPTION.to_string());

        Self { variables: vars }
    }

    /// Context with every variable derived from `config`.
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self::new(config.project_name())
            .with_variable("ARTIFACT_NAME", config.artifact_name())
            .with_variable(
                "DESCRIPTION",
                config.description().unwrap_or(DEFAULT_DESCRIPTION),
            )
            .with_variable("ARCHITECTURE", config.architecture())
            .with_variable("LANGUAGE", config.language())
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}` placeholder in one left-to-right pass.
    ///
    /// Substituted values are never rescanned, so a description containing
    /// `{{...}}` is emitted verbatim. Unknown placeholders stay as written.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            match after.find("}}") {
                Some(close) => {
                    let key = &after[..close];
                    match self.variables.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(key);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[close + 2..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Split on separators (`_`, `-`, whitespace), on lower→upper transitions,
/// and before the last capital of an acronym run (`HTTPServer` → `http`,
/// `server`). Non-alphanumeric characters are dropped.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = input.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current).to_lowercase());
            }
            continue;
        }

        current.push(c);

        let Some(&next) = chars.get(i + 1) else {
            continue;
        };
        let camel = c.is_lowercase() && next.is_uppercase();
        let acronym = c.is_uppercase()
            && next.is_uppercase()
            && chars.get(i + 2).is_some_and(|n| n.is_lowercase());

        if camel || acronym {
            words.push(std::mem::take(&mut current).to_lowercase());
        }
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_case_variants() {
        let ctx = RenderContext::new("My Bank App");
        assert_eq!(ctx.get("PROJECT_NAME"), Some("My Bank App"));
        assert_eq!(ctx.get("PROJECT_NAME_SNAKE"), Some("my_bank_app"));
        assert_eq!(ctx.get("PROJECT_NAME_KEBAB"), Some("my-bank-app"));
        assert_eq!(ctx.get("PROJECT_NAME_PASCAL"), Some("MyBankApp"));
    }

    #[test]
    fn splits_acronyms_and_camel_case() {
        assert_eq!(split_words("HTTPServer"), vec!["http", "server"]);
        assert_eq!(split_words("javaTest"), vec!["java", "test"]);
        assert_eq!(split_words("py_test-app"), vec!["py", "test", "app"]);
    }

    #[test]
    fn render_replaces_known_and_keeps_unknown() {
        let ctx = RenderContext::new("Demo");
        assert_eq!(
            ctx.render("{{PROJECT_NAME}}/{{PROJECT_NAME}} {{NOPE}}"),
            "Demo/Demo {{NOPE}}"
        );
    }

    #[test]
    fn render_does_not_rescan_values() {
        let ctx = RenderContext::new("Demo").with_variable("DESCRIPTION", "{{PROJECT_NAME}}");
        assert_eq!(ctx.render("{{DESCRIPTION}}"), "{{PROJECT_NAME}}");
    }

    #[test]
    fn render_tolerates_unclosed_braces() {
        let ctx = RenderContext::new("Demo");
        assert_eq!(ctx.render("a {{PROJECT_NAME"), "a {{PROJECT_NAME");
    }

    #[test]
    fn from_config_uses_default_description() {
        let config = ProjectConfig::builder()
            .project_name("JavaTest")
            .language("java")
            .build()
            .unwrap();
        let ctx = RenderContext::from_config(&config);

        assert_eq!(ctx.get("DESCRIPTION"), Some(DEFAULT_DESCRIPTION));
        assert_eq!(ctx.get("ARTIFACT_NAME"), Some("javatest"));
        assert_eq!(ctx.get("LANGUAGE"), Some("java"));
    }
}
