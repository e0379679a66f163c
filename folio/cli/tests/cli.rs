use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn folio_cmd() -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env_remove("FOLIO_THEME").env_remove("RUST_LOG");
    cmd
}

fn doc_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const DOC: &str = "# Quick Start\n\n## Install & Run\n\n```sh title=\"Install\" displayLineNumbers=\"true\"\ncargo install folio-cli\n```\n\n```json allowCopy=\"false\"\n{}\n```\n";

#[test]
fn test_help_flag() {
    folio_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--line-numbers"))
        .stdout(predicate::str::contains("--slug"));
}

#[test]
fn test_version_flag() {
    folio_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}

#[test]
fn test_render_file() {
    let file = doc_file(DOC);
    folio_cmd()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<style>"))
        .stdout(predicate::str::contains(r#"<h2 id="install-and-run">"#))
        .stdout(predicate::str::contains(r#"class="code-block-pre line-numbers""#))
        .stdout(predicate::str::contains("<script>"));
}

#[test]
fn test_render_stdin() {
    folio_cmd()
        .write_stdin("Hello *world*\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Hello <em>world</em></p>"));
}

#[test]
fn test_explicit_stdin_marker() {
    folio_cmd()
        .args(["-", "--no-styles"])
        .write_stdin("# Piped\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"<h1 id="piped">"#));
}

#[test]
fn test_no_copy_no_styles_no_scripts() {
    let file = doc_file(DOC);
    folio_cmd()
        .arg(file.path())
        .args(["--no-copy", "--no-styles", "--no-scripts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("copy-button").not())
        .stdout(predicate::str::contains("<style>").not())
        .stdout(predicate::str::contains("<script>").not());
}

#[test]
fn test_standalone_document() {
    let file = doc_file(DOC);
    folio_cmd()
        .arg(file.path())
        .arg("--standalone")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<title>Quick Start</title>"));
}

#[test]
fn test_theme_flag() {
    folio_cmd()
        .args(["--theme", "nord"])
        .write_stdin("text\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("/* folio: nord */"));
}

#[test]
fn test_theme_from_env() {
    folio_cmd()
        .env("FOLIO_THEME", "dracula")
        .write_stdin("text\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("/* folio: dracula */"));
}

#[test]
fn test_invalid_theme() {
    folio_cmd()
        .args(["--theme", "neon"])
        .write_stdin("text\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid theme name"));
}

#[test]
fn test_list_themes() {
    folio_cmd()
        .arg("--list-themes")
        .assert()
        .success()
        .stdout(predicate::str::contains("github"))
        .stdout(predicate::str::contains("base16-ocean"))
        .stdout(predicate::str::contains("dracula"));
}

#[test]
fn test_slug() {
    folio_cmd()
        .args(["--slug", "Hello & World  Test"])
        .assert()
        .success()
        .stdout("hello-and-world-test\n");
}

#[test]
fn test_headings_text() {
    let file = doc_file(DOC);
    folio_cmd()
        .arg(file.path())
        .arg("--headings")
        .assert()
        .success()
        .stdout("Quick Start #quick-start\n  Install & Run #install-and-run\n");
}

#[test]
fn test_headings_json() {
    let file = doc_file(DOC);
    let output = folio_cmd()
        .arg(file.path())
        .args(["--headings", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[1]["slug"], "install-and-run");
    assert_eq!(json[1]["level"], 2);
}

#[test]
fn test_blocks_text() {
    let file = doc_file(DOC);
    folio_cmd()
        .arg(file.path())
        .arg("--blocks")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. Install [sh] lines=1 line-numbers=yes copy=default",
        ))
        .stdout(predicate::str::contains(
            "2. json [json] lines=1 line-numbers=default copy=no",
        ));
}

#[test]
fn test_blocks_json() {
    let file = doc_file(DOC);
    let output = folio_cmd()
        .arg(file.path())
        .args(["--blocks", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["title"], "Install");
    assert_eq!(json[0]["displayLineNumbers"], true);
    assert_eq!(json[0]["rawCode"], "cargo install folio-cli\n");
    assert_eq!(json[1]["allowCopy"], false);
    assert_eq!(json[1]["lang"], "json");
}

#[test]
fn test_exclusive_modes() {
    folio_cmd()
        .args(["--headings", "--blocks"])
        .write_stdin("# x\n")
        .assert()
        .failure();
}

#[test]
fn test_missing_file() {
    folio_cmd()
        .arg("/definitely/not/here.md")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
