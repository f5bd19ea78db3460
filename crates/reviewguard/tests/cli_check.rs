use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("reviewguard").expect("binary builds")
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn modified_diff(path: &str, lines: &[&str]) -> String {
    let mut out = format!(
        "diff --git a/{path} b/{path}\n--- a/{path}\n+++ b/{path}\n@@ -1,0 +1,{} @@\n",
        lines.len()
    );
    for l in lines {
        out.push('+');
        out.push_str(l);
        out.push('\n');
    }
    out
}

const PASSING_CHECKS: &str = r#"[{"name":"ci/test","state":"pass"}]"#;

#[test]
fn clean_diff_approves_with_exit_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(
        dir.path(),
        "change.diff",
        &modified_diff("src/util/sum.ts", &["export const two = 1 + 1;"]),
    );
    let checks = write(dir.path(), "checks.json", PASSING_CHECKS);

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .arg("--checks-file")
        .arg(&checks)
        .assert()
        .success()
        .stdout(predicate::str::contains("APPROVE"));
}

#[test]
fn leaked_key_rejects_with_exit_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(
        dir.path(),
        "change.diff",
        &modified_diff("src/api/client.ts", &[r#"const API_KEY = "sk_live_abc123";"#]),
    );

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("REJECT"))
        .stdout(predicate::str::contains("security.hardcoded_secret"));
}

#[test]
fn warning_requests_changes_with_exit_three() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(
        dir.path(),
        "change.diff",
        &modified_diff("src/app.ts", &["console.log('debug');"]),
    );

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("REQUEST CHANGES"))
        .stdout(predicate::str::contains("lint.no_console"));
}

#[test]
fn failing_check_rejects_clean_diff() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(dir.path(), "change.diff", "");
    let checks = write(
        dir.path(),
        "checks.json",
        r#"[{"name":"ci/test","state":"fail"}]"#,
    );

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .arg("--checks-file")
        .arg(&checks)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("ci/test"));
}

#[test]
fn out_writes_json_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(dir.path(), "change.diff", "");
    let out = dir.path().join("report.json");

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("report written")).expect("json");
    assert_eq!(json["schema"], "reviewguard.report.v1");
    assert_eq!(json["verdict"], "approve");
    assert_eq!(json["tool"]["name"], "reviewguard");
}

#[test]
fn md_redirects_markdown_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(dir.path(), "change.diff", "");
    let md = dir.path().join("review.md");

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .arg("--md")
        .arg(&md)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&md).expect("markdown written");
    assert!(content.contains("# reviewguard review"));
}

#[test]
fn github_annotations_flag_emits_workflow_commands() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(
        dir.path(),
        "change.diff",
        &modified_diff("src/api/client.ts", &[r#"const API_KEY = "sk_live_abc123";"#]),
    );
    let md = dir.path().join("review.md");

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .arg("--md")
        .arg(&md)
        .arg("--github-annotations")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("::error file=src/api/client.ts,line=1::"));
}

#[test]
fn description_file_is_scanned_for_credentials() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(dir.path(), "change.diff", "");
    let desc = write(
        dir.path(),
        "description.md",
        "Use token sk_live_abcdef123456 for now\n",
    );

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .arg("--description-file")
        .arg(&desc)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("security.credential_in_description"));
}

#[test]
fn missing_diff_file_is_a_cli_error() {
    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg("/nonexistent/change.diff")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn malformed_diff_is_a_cli_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(
        dir.path(),
        "change.diff",
        "diff --git a/x.ts b/x.ts\n--- a/x.ts\n+++ b/x.ts\n@@ nonsense @@\n+let a = 1;\n",
    );

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed"));
}

#[test]
fn stdin_diff_is_accepted() {
    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg("-")
        .write_stdin(modified_diff("src/app.ts", &["const a = 1;"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("APPROVE"));
}

#[test]
fn config_can_relax_the_warning_budget() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff = write(
        dir.path(),
        "change.diff",
        &modified_diff("src/app.ts", &["console.log('debug');"]),
    );
    let config = write(
        dir.path(),
        "reviewguard.toml",
        "[policy]\nmax_warnings = 10\n",
    );

    cmd()
        .arg("check")
        .arg("--diff-file")
        .arg(&diff)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("APPROVE"));
}
