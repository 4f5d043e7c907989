use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cmd() -> Command {
    cargo_bin_cmd!("fieldkit")
}

#[test]
fn test_cli_prints_builtin_form_as_json() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("\"heading\": \"Welcome\""))
        .stdout(predicate::str::contains("\"border_radius\": \"8px\""))
        .stdout(predicate::str::contains("\"spacing_unit\": \"px\""))
        .stdout(predicate::str::contains("\"device\"").not());
}

#[test]
fn test_cli_set_overrides_field() {
    cmd()
        .args(["--set", "border_radius=20px", "--set", "show_button=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"border_radius\": \"20px\""))
        .stdout(predicate::str::contains("\"show_button\": \"0\""));
}

#[test]
fn test_cli_yaml_output() {
    cmd()
        .args(["--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("heading: Welcome"))
        .stdout(predicate::str::contains("text_align: left"));
}

#[test]
fn test_cli_css_output_is_scoped() {
    cmd()
        .args([
            "--format",
            "css",
            "--selector-id",
            "hero",
            "--tablet-breakpoint",
            "1024",
            "--set",
            r#"custom_css={"content":{"normal":{"desktop":"color: red","tablet":"color: blue"}}}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("#hero .module-content {\n  color: red;\n}"))
        .stdout(predicate::str::contains("@media (max-width: 1024px)"));
}

#[test]
fn test_cli_unknown_field_fails() {
    cmd()
        .args(["--set", "nope=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--set nope=1"));
}

#[test]
fn test_cli_malformed_assignment_fails() {
    cmd()
        .args(["--set", "border_radius"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn test_cli_bad_breakpoints_fail() {
    cmd()
        .args(["--mobile-breakpoint", "1200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be below tablet"));
}

#[test]
fn test_cli_missing_config_fails() {
    cmd()
        .args(["--config", "/definitely/not/here.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_cli_convert_json() {
    cmd()
        .args(["--convert", "rgba(0, 0, 255, 0.5)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hex\": \"#0000ff\""))
        .stdout(predicate::str::contains("\"css\": \"rgba(0, 0, 255, 0.50"))
        .stdout(predicate::str::contains("\"hue\": 240.0"));
}

#[test]
fn test_cli_convert_css() {
    cmd()
        .args(["--convert", "red", "--format", "css"])
        .assert()
        .success()
        .stdout("#ff0000\n");
}

#[test]
fn test_cli_convert_rejects_garbage() {
    cmd()
        .args(["--convert", "not a color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid color"));
}

#[test]
fn test_cli_save_config_roundtrip() {
    let path = std::env::temp_dir().join(format!("fieldkit-cli-{}.toml", std::process::id()));
    cmd()
        .args(["--title", "Saved Panel", "--save-config"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved config to"));

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("Saved Panel"));
    assert!(saved.contains("range"));

    cmd()
        .args(["--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"heading\": \"Welcome\""));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_cli_output_file() {
    let path = std::env::temp_dir().join(format!("fieldkit-form-{}.json", std::process::id()));
    cmd()
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Wrote form to"));
    let written = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert!(written.contains("\"text_align\": \"left\""));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldkit"));
}
