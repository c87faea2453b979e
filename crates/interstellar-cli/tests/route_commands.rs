use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/solar_system.json")
        .canonicalize()
        .expect("fixture dataset present")
}

fn prepare_command() -> Command {
    let mut cmd = cargo_bin_cmd!("interstellar-cli");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("INTERSTELLAR_DATASET")
        .arg("--data")
        .arg(fixture_path());
    cmd
}

#[test]
fn text_route_lists_numbered_steps() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Earth", "--to", "Mars"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Earth (A) -> Mars (E) (4 hops, total weight 11.00, directed, traffic ignored)",
        ))
        .stdout(predicate::str::contains("  4: Mars (E) [11.00] (+2.00)"));
}

#[test]
fn plain_route_matches_tab_separated_segments() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "plain", "route", "--from", "A", "--to", "B"]);

    cmd.assert()
        .success()
        .stdout(predicate::eq("Earth (A)\tMoon (B)\t\n"));
}

#[test]
fn traffic_flag_changes_route() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "plain", "route", "--from", "A", "--to", "D", "--traffic"]);

    cmd.assert()
        .success()
        .stdout(predicate::eq("Earth (A)\tMoon (B)\tVenus (D)\t\n"));
}

#[test]
fn undirected_flag_allows_reverse_travel() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Mars", "--to", "Earth", "--undirected"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("total weight 11.00, undirected"));
}

#[test]
fn json_route_is_machine_readable() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "route", "--from", "A", "--to", "C"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["goal"]["name"], "Jupiter");
    assert_eq!(value["total_weight"], 8.0);
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(3));
}

#[test]
fn same_start_and_goal_is_not_needed() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "plain", "route", "--from", "earth", "--to", "A"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Not needed. You are already on planet Earth",
        ));
}

#[test]
fn unreachable_goal_fails_with_unavailable_marker() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Earth", "--to", "Pluto"]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Unavailable."))
        .stderr(predicate::str::contains("no route found between Earth and Pluto"));
}

#[test]
fn unknown_planet_error_is_friendly() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Earth", "--to", "Jupitr"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown planet: Jupitr"))
        .stderr(predicate::str::contains("Did you mean"));
}
