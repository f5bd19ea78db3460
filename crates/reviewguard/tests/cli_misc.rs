use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("reviewguard").expect("binary builds")
}

#[test]
fn rules_prints_the_builtin_catalog_as_toml() {
    cmd()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("[[rule]]"))
        .stdout(predicate::str::contains("security.hardcoded_secret"))
        .stdout(predicate::str::contains("lint.no_debugger"));
}

#[test]
fn rules_json_output_parses() {
    let output = cmd().arg("rules").arg("--format").arg("json").output().expect("run");
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let rules = doc["rule"].as_array().expect("rule array");
    assert!(rules.len() >= 135);
}

#[test]
fn explain_shows_rule_details() {
    cmd()
        .arg("explain")
        .arg("security.hardcoded_secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule: security.hardcoded_secret"))
        .stdout(predicate::str::contains("Severity: critical"))
        .stdout(predicate::str::contains("Patterns:"));
}

#[test]
fn explain_metric_rule_shows_thresholds() {
    cmd()
        .arg("explain")
        .arg("structure.component_size")
        .assert()
        .success()
        .stdout(predicate::str::contains("warning above 200"))
        .stdout(predicate::str::contains("critical above 300"));
}

#[test]
fn explain_unknown_rule_suggests_alternatives() {
    cmd()
        .arg("explain")
        .arg("security.hardcoded")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("security.hardcoded_secret"));
}

#[test]
fn validate_accepts_a_well_formed_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("reviewguard.toml");
    fs::write(
        &config,
        r#"
[policy]
max_warnings = 2

[[rule]]
id = "local.no_fixme"
category = "lint"
severity = "info"
scope = "diff_line"
message = "m"
patterns = ["FIXME"]
"#,
    )
    .expect("write config");

    cmd()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn validate_reports_bad_regex_and_exits_nonzero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("reviewguard.toml");
    fs::write(
        &config,
        r#"
[[rule]]
id = "local.broken"
category = "lint"
severity = "warning"
scope = "diff_line"
message = "m"
patterns = ["(unclosed"]
"#,
    )
    .expect("write config");

    cmd()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("invalid regex"));
}

#[test]
fn validate_json_format_reports_validity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("reviewguard.toml");
    fs::write(&config, "[policy]\nmax_warnings = 1\n").expect("write config");

    let output = cmd()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("json")
        .output()
        .expect("run");
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(doc["valid"], true);
}

#[test]
fn schema_prints_the_report_json_schema() {
    let output = cmd().arg("schema").output().expect("run");
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(doc["title"], "ReviewReport");
}
