use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;

#[test]
fn prints_version() {
    AssertCommand::cargo_bin("namecheck-tui")
        .expect("binary built")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn prints_help() {
    AssertCommand::cargo_bin("namecheck-tui")
        .expect("binary built")
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("NameCheck-TUI"))
        .stdout(predicate::str::contains("--list"));
}

fn isolated() -> (tempfile::TempDir, AssertCommand) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cmd = AssertCommand::cargo_bin("namecheck-tui").expect("binary built");
    cmd.arg("--config").arg(dir.path().join("config.yaml"));
    (dir, cmd)
}

#[test]
fn lists_generated_links() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["--list", "johndoe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://www.facebook.com/johndoe"))
        .stdout(predicate::str::contains("https://johndoe.io"))
        .stdout(predicate::str::contains("johndoe@gmail.com"))
        .stdout(predicate::str::contains("https://johndoeio").not());
}

#[test]
fn lists_json() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["--list", "janedoe", "--json"])
        .output()
        .expect("run --list --json");
    assert!(output.status.success());
    assert!(output.stdout.ends_with(b"]\n"), "json output is newline terminated");
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    let github = parsed
        .as_array()
        .expect("array")
        .iter()
        .find(|entry| entry["name"] == "GitHub")
        .expect("github entry");
    assert_eq!(github["link"], "https://github.com/janedoe");
    assert_eq!(github["kind"], "social");
}

#[test]
fn list_rejects_blank_username() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["--list", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-empty username"));
}

#[test]
fn unknown_flag_is_an_error() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("--bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown argument"));
}

#[test]
fn config_file_extends_listing() {
    let (dir, mut cmd) = isolated();
    std::fs::write(
        dir.path().join("config.yaml"),
        "catalog:\n  extra_domains: [\".me\"]\n",
    )
    .expect("write config");
    cmd.args(["--list", "johndoe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://johndoe.me"));
}
