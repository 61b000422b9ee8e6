//! End-to-end runs of the subcommands against pool files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use squadforge_cli::{run, Cli, CliError, Outcome};
use tempfile::TempDir;

const SCENARIO_POOL: &str = r#"
[[candidates]]
id = "A"
name = "Alpha"
role = "Batsman"
price = 10.0
runs_scored = 50
strike_rate = 130.0

[[candidates]]
id = "B"
name = "Bravo"
role = "Bowler"
price = 8.0
wickets = 2
economy = 7.5
is_overseas = true

[[candidates]]
id = "C"
name = "Charlie"
role = "All-Rounder"
price = 5.0
runs_scored = 10
wickets = 1
strike_rate = 110.0
economy = 8.0
"#;

const SCENARIO_CONFIG: &str = r#"
[constraints]
squad_size = 2
budget_cap = 15.0
max_overseas = 1
min_batters = 1
min_bowlers = 0
min_all_rounders = 0
min_wicket_keepers = 0
"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn invoke(args: &[&str]) -> (Result<Outcome, CliError>, String) {
    let mut argv = vec!["squadforge"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let result = run(cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn scenario_files() -> (TempDir, String, String) {
    let temp = tempfile::tempdir().unwrap();
    let pool = write(temp.path(), "pool.toml", SCENARIO_POOL);
    let config = write(temp.path(), "squad.toml", SCENARIO_CONFIG);
    (
        temp,
        pool.to_string_lossy().into_owned(),
        config.to_string_lossy().into_owned(),
    )
}

#[test]
fn solve_prints_optimal_roster() {
    let (_temp, pool, config) = scenario_files();
    let (result, out) = invoke(&["solve", "--pool", &pool, "--config", &config]);

    assert_eq!(result.unwrap(), Outcome::Success);
    assert!(out.contains("Alpha"));
    assert!(out.contains("Charlie"));
    assert!(!out.contains("Bravo"));
}

#[test]
fn solve_json_reports_status_and_ids() {
    let (_temp, pool, config) = scenario_files();
    let (result, out) = invoke(&[
        "solve", "--pool", &pool, "--config", &config, "--json", "--threads", "2",
    ]);

    assert_eq!(result.unwrap(), Outcome::Success);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["status"], "optimal");
    assert_eq!(value["roster"]["selected_ids"], serde_json::json!(["A", "C"]));
    assert_eq!(value["roster"]["total_impact"], 80.0);
    assert_eq!(value["stats"]["threads"], 2);
}

#[test]
fn solve_infeasible_exits_with_three() {
    let temp = tempfile::tempdir().unwrap();
    let pool = write(temp.path(), "pool.toml", SCENARIO_POOL);
    let config = write(
        temp.path(),
        "squad.toml",
        &SCENARIO_CONFIG.replace("budget_cap = 15.0", "budget_cap = 3.0"),
    );
    let (result, out) = invoke(&[
        "solve",
        "--pool",
        pool.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    let outcome = result.unwrap();
    assert_eq!(outcome, Outcome::Infeasible);
    assert_eq!(outcome.exit_code(), 3);
    assert!(out.contains("Budget"));
}

#[test]
fn solve_with_zero_time_limit_is_unverified() {
    let (_temp, pool, config) = scenario_files();
    let (result, out) = invoke(&[
        "solve",
        "--pool",
        &pool,
        "--config",
        &config,
        "--time-limit-ms",
        "0",
        "--json",
    ]);

    let outcome = result.unwrap();
    assert_eq!(outcome, Outcome::Unverified);
    assert_eq!(outcome.exit_code(), 4);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["status"], "unverified");
}

#[test]
fn solve_rejects_zero_threads() {
    let (_temp, pool, config) = scenario_files();
    let (result, _) = invoke(&[
        "solve", "--pool", &pool, "--config", &config, "--threads", "0",
    ]);
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn solve_missing_pool_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("nope.toml");
    let (result, _) = invoke(&["solve", "--pool", missing.to_str().unwrap()]);
    assert!(matches!(result, Err(CliError::Read { .. })));
}

#[test]
fn stats_reads_yaml_pool() {
    let temp = tempfile::tempdir().unwrap();
    let pool = write(
        temp.path(),
        "pool.yaml",
        "candidates:\n  - id: a\n    role: Batsman\n    price: 4.5\n  - id: b\n    role: Wicketkeeper\n    price: 6\n    is_overseas: true\n",
    );
    let (result, out) = invoke(&["stats", "--pool", pool.to_str().unwrap(), "--json"]);

    assert_eq!(result.unwrap(), Outcome::Success);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["total_players"], 2);
    assert_eq!(value["overseas_count"], 1);
    assert_eq!(value["total_value"], 10.5);
}

#[test]
fn sample_output_solves() {
    let (result, sample) = invoke(&["sample"]);
    assert_eq!(result.unwrap(), Outcome::Success);

    let temp = tempfile::tempdir().unwrap();
    let pool = write(temp.path(), "stars.toml", &sample);
    let config = write(
        temp.path(),
        "squad.toml",
        "[constraints]\nsquad_size = 4\nbudget_cap = 50.0\nmax_overseas = 2\nmin_batters = 1\nmin_bowlers = 1\nmin_all_rounders = 0\nmin_wicket_keepers = 1\n",
    );
    let (result, out) = invoke(&[
        "solve",
        "--pool",
        pool.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(result.unwrap(), Outcome::Success);
    assert!(out.contains("Total impact"));
}
