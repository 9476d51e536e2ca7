//! Baseline files shared by every generator.
//!
//! Each generator starts from [`common_files`] and appends its own
//! technology-specific scaffold.

use foundry_core::domain::{GeneratedFile, GeneratorOutput, License, ProjectConfig, RenderContext};

/// A scaffold file: relative path plus a template with `{{VARIABLE}}`
/// placeholders.
pub(crate) type Scaffold = (&'static str, &'static str);

const README: &str = "# {{PROJECT_NAME}}

{{DESCRIPTION}}

## Architecture

- Style: {{ARCHITECTURE}}
- Stack: {{LANGUAGE}}

See `docs/ARCHITECTURE.md` for the layer overview.

## Getting Started

{{RUN_INSTRUCTIONS}}
";

const ARCHITECTURE_DOC: &str = "# {{PROJECT_NAME}} Architecture

Style: **{{ARCHITECTURE}}**

## Layers

| Layer | Responsibility |
|-------|----------------|
| Routes / Controllers | Accept requests and map them to use cases |
| Services | Business rules, framework-agnostic |
| Infrastructure | Persistence and external integrations |

Dependencies point inwards: controllers call services, services never call
controllers.
";

const MIT_LICENSE: &str = "MIT License

Copyright (c) {{PROJECT_NAME}} contributors

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
";

const PROPRIETARY_LICENSE: &str = "Copyright (c) {{PROJECT_NAME}}. All rights reserved.

This software is proprietary and confidential. Unauthorized copying,
distribution or use of this software, via any medium, is strictly prohibited.
";

/// `README.md`, `.gitignore`, `docs/ARCHITECTURE.md` and, when the config
/// names a license, `LICENSE`.
///
/// `instructions` become the README's getting-started block.
pub(crate) fn common_files(
    config: &ProjectConfig,
    ctx: &RenderContext,
    gitignore: &str,
    instructions: &[&str],
) -> Vec<GeneratedFile> {
    let run = instructions
        .iter()
        .map(|i| format!("    {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let readme_ctx = ctx.clone().with_variable("RUN_INSTRUCTIONS", run);

    let mut files = vec![
        GeneratedFile::new("README.md", readme_ctx.render(README)),
        GeneratedFile::new(".gitignore", gitignore),
        GeneratedFile::new("docs/ARCHITECTURE.md", ctx.render(ARCHITECTURE_DOC)),
    ];

    if let Some(license) = config.license() {
        let text = match license {
            License::Mit => MIT_LICENSE,
            License::Proprietary => PROPRIETARY_LICENSE,
        };
        files.push(GeneratedFile::new("LICENSE", ctx.render(text)));
    }

    files
}

/// Render a scaffold table.
pub(crate) fn render_all(ctx: &RenderContext, scaffold: &[Scaffold]) -> Vec<GeneratedFile> {
    scaffold
        .iter()
        .map(|(path, template)| GeneratedFile::new(*path, ctx.render(template)))
        .collect()
}

/// Attach run instructions and the dependency map to a file set.
pub(crate) fn assemble(
    files: Vec<GeneratedFile>,
    instructions: &[&str],
    dependencies: &[(&str, &str)],
) -> GeneratorOutput {
    let output = instructions
        .iter()
        .fold(GeneratorOutput::new(files), |out, i| out.with_instruction(*i));
    dependencies
        .iter()
        .fold(output, |out, (name, version)| out.with_dependency(*name, *version))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(license: Option<License>) -> ProjectConfig {
        let mut builder = ProjectConfig::builder()
            .project_name("Ledger Hub")
            .description("Payments for everyone")
            .language("node");
        if let Some(license) = license {
            builder = builder.license(license);
        }
        builder.build().unwrap()
    }

    #[test]
    fn readme_carries_name_description_and_instructions() {
        let config = config(None);
        let ctx = RenderContext::from_config(&config);
        let files = common_files(&config, &ctx, "node_modules/\n", &["npm install", "npm run dev"]);

        let readme = &files[0];
        assert_eq!(readme.path, "README.md");
        assert!(readme.content.starts_with("# Ledger Hub\n\nPayments for everyone"));
        assert!(readme.content.contains("- Style: monolith"));
        assert!(readme.content.contains("    npm install\n    npm run dev"));
        assert!(!files.iter().any(|f| f.path == "LICENSE"));
    }

    #[test]
    fn license_file_follows_config() {
        let config = config(Some(License::Mit));
        let ctx = RenderContext::from_config(&config);
        let files = common_files(&config, &ctx, "", &[]);
        let license = files.iter().find(|f| f.path == "LICENSE").unwrap();
        assert!(license.content.starts_with("MIT License"));

        let config = self::config(Some(License::Proprietary));
        let files = common_files(&config, &ctx, "", &[]);
        let license = files.iter().find(|f| f.path == "LICENSE").unwrap();
        assert!(license.content.contains("All rights reserved"));
    }
}
