use assert_cmd::Command;
use predicates::str::contains;

fn study_organizer() -> Command {
    let mut cmd = Command::cargo_bin("study-organizer").expect("binary");
    cmd.env_remove("STUDY_ORGANIZER_CONFIG")
        .env_remove("STUDY_ORGANIZER_API")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_works() {
    study_organizer()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("study task tracker"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "serve", "list", "add", "edit", "toggle", "delete", "dashboard", "ping",
    ];

    for cmd in subcommands {
        study_organizer().arg(cmd).arg("--help").assert().success();
    }
}

#[test]
fn unknown_filter_is_a_user_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    study_organizer()
        .current_dir(dir.path())
        .args(["list", "--filter", "archived"])
        .assert()
        .code(2)
        .stderr(contains("unknown filter"));
}

#[test]
fn missing_explicit_config_reports_json_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    study_organizer()
        .current_dir(dir.path())
        .arg("--json")
        .arg("--config")
        .arg(&missing)
        .arg("ping")
        .assert()
        .code(2)
        .stdout(contains("\"schema_version\": \"study-organizer.v1\""))
        .stdout(contains("\"command\": \"ping\""));
}

#[test]
fn unreachable_server_is_an_operation_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    study_organizer()
        .current_dir(dir.path())
        .args(["--api-url", "http://127.0.0.1:9", "list"])
        .assert()
        .code(4)
        .stderr(contains("hint: study-organizer serve"));
}

#[test]
fn edit_without_changes_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    study_organizer()
        .current_dir(dir.path())
        .args(["--api-url", "http://127.0.0.1:9", "edit", "1"])
        .assert()
        .code(2)
        .stderr(contains("nothing to change"));
}

#[test]
fn non_http_api_url_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    study_organizer()
        .current_dir(dir.path())
        .args(["--api-url", "ftp://x", "list"])
        .assert()
        .code(2)
        .stderr(contains("client.api_url must be an http(s) URL"));
}

#[test]
fn schemeless_api_url_from_env_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    study_organizer()
        .current_dir(dir.path())
        .env("STUDY_ORGANIZER_API", "localhost:8080")
        .arg("ping")
        .assert()
        .code(2);
}
