//! Integration tests for the `gamctl` binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live management server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `gamctl` binary with env isolation.
///
/// Clears all `GAM_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn gamctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("gamctl");
    cmd.env("HOME", "/tmp/gamctl-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/gamctl-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/gamctl-test-nonexistent")
        .env_remove("GAM_PROFILE")
        .env_remove("GAM_SERVER")
        .env_remove("GAM_OUTPUT")
        .env_remove("GAM_INSECURE")
        .env_remove("GAM_TIMEOUT")
        .env_remove("GAM_USERNAME")
        .env_remove("GAM_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = gamctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    gamctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("GAM")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("subscribers"))
            .and(predicate::str::contains("alarms")),
    );
}

#[test]
fn test_version_flag() {
    gamctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gamctl"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    gamctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    gamctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    gamctl_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = gamctl_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_list_no_server() {
    gamctl_cmd()
        .args(["devices", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("server")
                .or(predicate::str::contains("config"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    gamctl_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path_prints_a_path() {
    gamctl_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_invalid_output_format() {
    let output = gamctl_cmd()
        .args(["--output", "invalid", "devices", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_server_url() {
    gamctl_cmd()
        .args(["--server", "not a url", "devices", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL").or(predicate::str::contains("server")));
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure should be about
    // missing server config, not about argument parsing.
    gamctl_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--insecure",
            "--timeout",
            "60",
            "devices",
            "list",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("server")
                .or(predicate::str::contains("config"))
                .or(predicate::str::contains("profile")),
        );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_devices_subcommands_exist() {
    gamctl_cmd()
        .args(["devices", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("sync"))
                .and(predicate::str::contains("reboot"))
                .and(predicate::str::contains("provision"))
                .and(predicate::str::contains("backup")),
        );
}

#[test]
fn test_device_show_tabs_exist() {
    gamctl_cmd()
        .args(["devices", "show", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("summary")
                .and(predicate::str::contains("ports"))
                .and(predicate::str::contains("endpoints"))
                .and(predicate::str::contains("backups")),
        );
}

#[test]
fn test_alarms_subcommands_exist() {
    gamctl_cmd()
        .args(["alarms", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("counts"))
                .and(predicate::str::contains("ack"))
                .and(predicate::str::contains("close")),
        );
}

#[test]
fn test_firmware_subcommands_exist() {
    gamctl_cmd()
        .args(["firmware", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("upload")
                .and(predicate::str::contains("baseline"))
                .and(predicate::str::contains("remove")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    gamctl_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("set-password"))
                .and(predicate::str::contains("profiles")),
        );
}

// ── End-to-end against a mock server ────────────────────────────────

#[test]
fn test_devices_list_against_mock_server() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/gam/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": 7,
                    "serial": "GM1007",
                    "mac": "00:11:22:33:44:07",
                    "ip": "10.0.0.7",
                    "name": "pole-7",
                    "vendor": null,
                    "product_class": null,
                    "hardware_version": null,
                    "software_version": "1.8.1",
                    "online": true,
                    "read_only": false,
                    "last_seen": null
                }],
                "total": 1
            })))
            .mount(&server)
            .await;
        server
    });

    gamctl_cmd()
        .args(["--server", &server.uri(), "devices", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7"));

    drop(server);
    drop(rt);
}

#[test]
fn test_config_show_reads_profile_from_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("gamctl");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        r#"
default_profile = "lab"

[profiles.lab]
server = "https://gam.lab.example.net"
username = "admin"
"#,
    )
    .unwrap();

    gamctl_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lab").and(predicate::str::contains("gam.lab.example.net")),
        );
}

#[test]
fn test_unknown_profile_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("gamctl");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        r#"
[profiles.lab]
server = "https://gam.lab.example.net"
"#,
    )
    .unwrap();

    gamctl_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["--profile", "nosuch", "devices", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nosuch").and(predicate::str::contains("lab")));
}

#[test]
fn test_destructive_command_without_yes_fails_when_piped() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/gam/devices/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7,
                "serial": "GM1007",
                "mac": "00:11:22:33:44:07",
                "ip": "10.0.0.7",
                "name": "pole-7",
                "vendor": null,
                "product_class": null,
                "hardware_version": null,
                "software_version": "1.8.1",
                "online": true,
                "read_only": false,
                "last_seen": null
            })))
            .mount(&server)
            .await;
        server
    });

    // stdin is a pipe here, not a terminal, so the confirmation prompt
    // cannot be answered; the command must fail instead of hanging.
    gamctl_cmd()
        .args(["--server", &server.uri(), "devices", "remove", "7"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires confirmation"));

    drop(server);
    drop(rt);
}

#[test]
fn test_subcommand_aliases() {
    // `dev`, `sub`, `bw`, and `fw` are documented aliases.
    gamctl_cmd().args(["dev", "--help"]).assert().success();
    gamctl_cmd().args(["sub", "--help"]).assert().success();
    gamctl_cmd().args(["bw", "--help"]).assert().success();
    gamctl_cmd().args(["fw", "--help"]).assert().success();
}
