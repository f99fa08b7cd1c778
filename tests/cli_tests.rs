use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use rust_decimal_macros::dec;

use footalert::domain::criterion::Operator;
use footalert::domain::metric::Metric;
use footalert::domain::outcome::TargetOutcome;
use footalert::testkit::domain::{criterion, finished, live, strategy};

/// Write a config, a replay file and a seeded JSON store under `dir`.
fn write_fixture(dir: &Path) -> PathBuf {
    let store = dir.join("data");
    fs::create_dir_all(&store).unwrap();
    let strategies = vec![strategy(
        "late-goal",
        vec![criterion(Metric::Minute, Operator::GreaterThan, dec!(70))],
        TargetOutcome::Over05Goals,
    )];
    fs::write(
        store.join("strategies.json"),
        serde_json::to_string_pretty(&strategies).unwrap(),
    )
    .unwrap();

    let replay = dir.join("replay.json");
    let batches = vec![vec![live("m1", 75, 0, 0)], vec![finished("m1", 1, 0)]];
    fs::write(&replay, serde_json::to_string(&batches).unwrap()).unwrap();

    let config = dir.join("footalert.toml");
    fs::write(
        &config,
        format!(
            concat!(
                "[logging]\n",
                "level = \"warn\"\n",
                "\n",
                "[feed]\n",
                "type = \"replay\"\n",
                "path = \"{}\"\n",
                "\n",
                "[store]\n",
                "type = \"json\"\n",
                "path = \"{}\"\n",
            ),
            replay.display(),
            store.display()
        ),
    )
    .unwrap();
    config
}

#[test]
fn cli_help_lists_commands() {
    cargo_bin_cmd!("footalert")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("metrics"));
}

#[test]
fn cli_prints_version() {
    cargo_bin_cmd!("footalert")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_lists_metrics() {
    cargo_bin_cmd!("footalert")
        .args(["--color", "never", "metrics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DA_TOTAL"))
        .stdout(predicate::str::contains("HT_CORNERS_TOTAL"));
}

#[test]
fn cli_lists_outcomes_as_json() {
    let output = cargo_bin_cmd!("footalert")
        .args(["--json", "outcomes"])
        .output()
        .expect("run footalert");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("outcomes emits one JSON document");
    let ids: Vec<&str> = value["outcomes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|o| o["id"].as_str())
        .collect();
    assert!(ids.contains(&"OVER_0_5_GOALS"));
    assert!(ids.contains(&"HOME_NEXT_GOAL"));
}

#[test]
fn cli_check_config_accepts_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    cargo_bin_cmd!("footalert")
        .args(["--color", "never", "check", "config", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("Replay file found"));
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[engine]\nfallback_odds = 0.5\n").unwrap();

    cargo_bin_cmd!("footalert")
        .args(["check", "config", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("fallback_odds"));
}

#[test]
fn cli_run_replays_feed_and_persists_tickets() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    cargo_bin_cmd!("footalert")
        .args(["--color", "never", "run", "--ticks", "5", "--interval", "1", "--config"])
        .arg(&config)
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("triggered"))
        .stdout(predicate::str::contains("won"));

    let tickets = fs::read_to_string(dir.path().join("data").join("tickets.json")).unwrap();
    assert!(tickets.contains("\"status\": \"WON\""), "{tickets}");
}

#[test]
fn cli_stats_reports_run_results_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    cargo_bin_cmd!("footalert")
        .args(["--quiet", "run", "--interval", "1", "--config"])
        .arg(&config)
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success();

    let output = cargo_bin_cmd!("footalert")
        .args(["--json", "stats", "--config"])
        .arg(&config)
        .output()
        .expect("run footalert");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["overall"]["wins"], 1);
    assert_eq!(value["overall"]["total_settled"], 1);
    assert_eq!(value["strategies"][0]["id"], "late-goal");
}
