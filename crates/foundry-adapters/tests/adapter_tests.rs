//! End-to-end tests: built-in generators behind the orchestrator, then the
//! ZIP packager.

use std::io::{Cursor, Read};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use foundry_adapters::{FixedClock, ZipPackager, builtin_registry};
use foundry_core::{
    domain::{CLOUD_GUIDE_PATH, License, QUALITY_REPORT_PATH},
    prelude::*,
};

fn orchestrator() -> ProjectOrchestrator {
    ProjectOrchestrator::new(builtin_registry())
}

fn config(name: &str, language: &str) -> ProjectConfig {
    ProjectConfig::builder()
        .project_name(name)
        .description(format!("A test {language} project"))
        .language(language)
        .architecture("monolith")
        .build()
        .unwrap()
}

#[tokio::test]
async fn java_project_has_pom_and_both_reports() {
    let output = orchestrator()
        .create_project(&config("JavaTest", "java"))
        .await
        .unwrap();

    assert!(output.paths().any(|p| p.contains("pom.xml")));
    assert!(output.find(QUALITY_REPORT_PATH).is_some());
    assert!(output.find(CLOUD_GUIDE_PATH).is_some());

    let report = &output.find(QUALITY_REPORT_PATH).unwrap().content;
    assert!(report.contains("Score: 100/100"));
    assert!(report.contains("Passed: YES"));
}

#[tokio::test]
async fn python_project_has_requirements_and_cloud_guide() {
    let output = orchestrator()
        .create_project(&config("PyTest", "python"))
        .await
        .unwrap();

    assert!(output.paths().any(|p| p.contains("requirements.txt")));
    let guide = &output.find(CLOUD_GUIDE_PATH).unwrap().content;
    assert!(guide.contains("Based on your stack (python)"));
}

#[tokio::test]
async fn reports_are_the_last_two_files() {
    let output = orchestrator()
        .create_project(&config("Shop", "node"))
        .await
        .unwrap();

    let paths: Vec<_> = output.paths().collect();
    assert_eq!(
        &paths[paths.len() - 2..],
        [QUALITY_REPORT_PATH, CLOUD_GUIDE_PATH]
    );
}

#[tokio::test]
async fn identical_configs_give_identical_files() {
    let config = ProjectConfig::builder()
        .project_name("Same Every Time")
        .language("frontend")
        .license(License::Mit)
        .build()
        .unwrap();

    let first = orchestrator().create_project(&config).await.unwrap();
    let second = orchestrator().create_project(&config).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn packaged_project_round_trips() {
    let output = orchestrator()
        .create_project(&config("Round Trip", "java"))
        .await
        .unwrap();

    let archive = ZipPackager::new()
        .create_zip_stream(&output.files, &CancellationToken::new())
        .await
        .unwrap();

    let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes().to_vec())).unwrap();
    assert_eq!(zip.len(), output.files.len());
    for file in &output.files {
        let mut entry = zip.by_name(file.normalized_path()).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, file.content, "{}", file.path);
    }

    let streamed: Vec<u8> = archive.chunks(1024).flat_map(|c| c.to_vec()).collect();
    assert_eq!(streamed, archive.bytes().to_vec());
}

#[tokio::test]
async fn full_pipeline_with_builtin_generators() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    let engine = StageEngine::new(Arc::new(orchestrator()), Arc::new(clock));
    let mut session = PipelineSession::new();

    engine
        .run_all(
            &mut session,
            &json!({
                "requirements": {
                    "projectName": "Clinic App",
                    "problemDescription": "Citas para un hospital"
                },
                "construction": { "language": "frontend" }
            }),
        )
        .await
        .unwrap();

    let construction = session.state.construction.as_ref().unwrap();
    assert!(construction.generated_files.contains_key("vite.config.ts"));
    assert!(construction.generated_files["CLOUD_DEPLOY.md"].contains("Vercel"));
    assert_eq!(construction.instructions, vec!["npm install", "npm run dev"]);
    assert!(
        construction.generated_files["package.json"].contains("\"name\": \"clinic-app\"")
    );
}
