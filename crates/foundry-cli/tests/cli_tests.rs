//! Binary-level tests for the `foundry` command.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// A `foundry` invocation isolated from the user's config and `.env`.
fn foundry(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("foundry").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_every_command() {
    let dir = TempDir::new().unwrap();
    let assert = foundry(&dir).arg("--help").assert().success();
    let help = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for command in ["run", "auto", "stage", "new", "providers", "init", "config"] {
        assert!(help.contains(command), "{command}");
    }
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    foundry(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_exits_two() {
    let dir = TempDir::new().unwrap();
    foundry(&dir).arg("explode").assert().code(2);
}

// ── auto ──────────────────────────────────────────────────────────────────────

#[test]
fn auto_emits_an_eleven_stage_run() {
    let dir = TempDir::new().unwrap();
    let output = foundry(&dir)
        .args([
            "--output-format",
            "json",
            "auto",
            "--time-to-market",
            "fast",
            "--scalability",
            "high",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let run = stdout_json(&output);
    assert_eq!(run["status"], "COMPLETED");
    assert_eq!(run["stages"].as_array().unwrap().len(), 11);
    assert_eq!(run["stages"][1]["output"]["methodology"], "Lean");
    assert_eq!(run["stages"][5]["stage"], "BUILD");
    assert_eq!(run["state"]["valuation"]["financials"]["marketValue"], 25_000);
}

// ── stage ─────────────────────────────────────────────────────────────────────

#[test]
fn unknown_stage_exits_two_with_message() {
    let dir = TempDir::new().unwrap();
    foundry(&dir)
        .args(["stage", "99"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Error in Stage 99: Invalid Stage ID: 99"))
        .stderr(predicate::str::contains("Invalid Stage ID: 99"));
}

#[test]
fn failed_stage_leaves_state_file_untouched() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    fs::write(&state, "{}\n").unwrap();

    foundry(&dir)
        .args(["stage", "12", "--state", "state.json"])
        .assert()
        .code(2);

    assert_eq!(fs::read_to_string(&state).unwrap(), "{}\n");
}

#[test]
fn stages_accumulate_in_the_state_file() {
    let dir = TempDir::new().unwrap();

    foundry(&dir)
        .args([
            "stage",
            "1",
            "--state",
            "state.json",
            "--input",
            r#"{"problemDescription": "Un banco digital"}"#,
        ])
        .assert()
        .success();

    foundry(&dir)
        .args(["stage", "decision", "--state", "state.json"])
        .assert()
        .success();

    let state = read_json(&dir.path().join("state.json"));
    assert_eq!(state["requirements"]["analysis"]["domain"], "FinTech");
    assert_eq!(state["requirements"]["riskAssessment"]["level"], "Critical");
    assert_eq!(
        state["decision"]["stackRecommendation"]["backend"],
        "Java (Spring Boot)"
    );
    assert!(state.get("architecture").is_none());
}

#[test]
fn malformed_stage_input_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    foundry(&dir)
        .args(["stage", "1", "--input", "{not json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--input is not valid JSON"));
}

// ── run ───────────────────────────────────────────────────────────────────────

#[test]
fn run_with_inputs_and_fixed_clock() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("inputs.json"),
        r#"{
            "requirements": {
                "projectName": "Tienda App",
                "problemDescription": "Una tienda online"
            },
            "construction": { "language": "python" }
        }"#,
    )
    .unwrap();

    let output = foundry(&dir)
        .args([
            "--output-format",
            "json",
            "run",
            "inputs.json",
            "--state-out",
            "out/state.json",
            "--at",
            "2026-01-01T00:00:00Z",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let session = stdout_json(&output);
    let state = &session["state"];
    assert_eq!(state["requirements"]["analysis"]["domain"], "E-Commerce");
    assert_eq!(
        state["valuation"]["certification"]["timestamp"],
        "2026-01-01T00:00:00Z"
    );
    assert!(state["construction"]["generatedFiles"]["requirements.txt"].is_string());
    assert_eq!(session["logs"].as_array().unwrap().len(), 22);

    let written = read_json(&dir.path().join("out/state.json"));
    assert_eq!(&written, state);
}

#[test]
fn run_rejects_non_object_inputs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("inputs.json"), "[1, 2]").unwrap();

    foundry(&dir)
        .args(["run", "inputs.json"])
        .assert()
        .code(2);
}

// ── new ───────────────────────────────────────────────────────────────────────

#[test]
fn new_writes_an_audited_archive() {
    let dir = TempDir::new().unwrap();

    foundry(&dir)
        .args([
            "new",
            "Clinic App",
            "--lang",
            "python",
            "--license",
            "mit",
            "-y",
            "-o",
            "dist/clinic.zip",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("uvicorn"));

    let file = fs::File::open(dir.path().join("dist/clinic.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    for entry in [
        "requirements.txt",
        "LICENSE",
        "QUALITY_REPORT.md",
        "CLOUD_DEPLOY.md",
    ] {
        assert!(archive.by_name(entry).is_ok(), "missing {entry}");
    }
}

#[test]
fn new_defaults_archive_name_to_artifact() {
    let dir = TempDir::new().unwrap();

    foundry(&dir)
        .args(["new", "Shop Front", "--lang", "frontend", "-y"])
        .assert()
        .success();

    assert!(dir.path().join("shop-front.zip").exists());
}

#[test]
fn new_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("taken.zip"), b"old").unwrap();

    foundry(&dir)
        .args(["new", "taken", "-y", "-o", "taken.zip"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    foundry(&dir)
        .args(["new", "taken", "-y", "-o", "taken.zip", "--force"])
        .assert()
        .success();
    assert_ne!(fs::read(dir.path().join("taken.zip")).unwrap(), b"old");
}

#[test]
fn dry_run_lists_files_and_writes_nothing() {
    let dir = TempDir::new().unwrap();

    foundry(&dir)
        .args(["new", "ledger", "--lang", "java", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pom.xml"))
        .stdout(predicate::str::contains("QUALITY_REPORT.md"));

    assert!(!dir.path().join("ledger.zip").exists());
}

#[test]
fn hidden_project_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    foundry(&dir)
        .args(["new", ".hidden", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

// ── providers ─────────────────────────────────────────────────────────────────

#[test]
fn providers_for_frontend_include_vercel() {
    let dir = TempDir::new().unwrap();
    let output = foundry(&dir)
        .args(["--output-format", "json", "providers", "frontend"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let providers = stdout_json(&output);
    let names: Vec<_> = providers
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_owned())
        .collect();
    assert!(names.contains(&"Vercel".to_owned()));
    assert!(providers[0]["freeTier"].as_bool().unwrap());
}

// ── configuration ─────────────────────────────────────────────────────────────

#[test]
fn environment_overrides_configuration() {
    let dir = TempDir::new().unwrap();
    foundry(&dir)
        .env("FOUNDRY__PACKAGING__COMPRESSION_LEVEL", "3")
        .args(["config", "get", "packaging.compression_level"])
        .assert()
        .success()
        .stdout(predicate::str::contains("packaging.compression_level = 3"));
}

#[test]
fn explicit_config_file_is_read() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("custom.toml"),
        "[defaults]\nlanguage = \"java\"\n",
    )
    .unwrap();

    foundry(&dir)
        .args(["--config", "custom.toml", "config", "get", "defaults.language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults.language = java"));
}

#[test]
fn missing_explicit_config_exits_four() {
    let dir = TempDir::new().unwrap();
    foundry(&dir)
        .args(["--config", "nope.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn unknown_config_key_exits_four() {
    let dir = TempDir::new().unwrap();
    foundry(&dir)
        .args(["config", "get", "defaults.colour"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn init_local_writes_a_loadable_file() {
    let dir = TempDir::new().unwrap();
    foundry(&dir).args(["init", "--local"]).assert().success();

    let text = fs::read_to_string(dir.path().join("foundry.toml")).unwrap();
    assert!(text.contains("[audit]"));

    foundry(&dir)
        .args(["--config", "foundry.toml", "config", "get", "audit.pass_threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("= 70"));
}

#[test]
fn completions_mention_the_binary() {
    let dir = TempDir::new().unwrap();
    foundry(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foundry"));
}
