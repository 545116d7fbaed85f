#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn mw() -> Command {
    Command::cargo_bin("mw").unwrap()
}

/// Generate a small seeded world into `dir` and return the snapshot path.
fn snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("world.json");
    mw().args(["generate", "--width", "24", "--height", "16", "--seed", "7", "--output"])
        .arg(&path)
        .assert()
        .success();
    path
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_summary() {
    mw().args(["generate", "--width", "20", "--height", "10", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seed=3"))
        .stdout(predicate::str::contains("Biome"))
        .stdout(predicate::str::contains("200 cells"));
}

#[test]
fn generate_writes_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = snapshot(dir.path());
    let world: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(world["width"], 24);
    assert_eq!(world["height"], 16);
    assert_eq!(world["seed"], 7);
    assert_eq!(world["mode"], "island");
}

#[test]
fn generate_is_deterministic_per_seed() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    for path in [&a, &b] {
        mw().args(["generate", "--width", "12", "--height", "12", "--seed", "99", "--output"])
            .arg(path)
            .assert()
            .success();
    }
    let a: Value = serde_json::from_str(&fs::read_to_string(a).unwrap()).unwrap();
    let b: Value = serde_json::from_str(&fs::read_to_string(b).unwrap()).unwrap();
    assert_eq!(a["biomes"], b["biomes"]);
    assert_eq!(a["elevation"], b["elevation"]);
}

#[test]
fn generate_reads_toml_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("terrain.toml");
    fs::write(&config, "octaves = 2\nsmoothing_passes = 1\n").unwrap();
    mw().args(["generate", "--width", "8", "--height", "8", "--seed", "1", "--flat", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("unconstrained"));
}

#[test]
fn generate_rejects_bad_dimensions() {
    mw().args(["generate", "--width", "0", "--height", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dimensions"));
}

#[test]
fn generate_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "octaves = \"many\"").unwrap();
    mw().args(["generate", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

// ---------------------------------------------------------------------------
// show / map / sites
// ---------------------------------------------------------------------------

#[test]
fn show_reads_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = snapshot(dir.path());
    mw().arg("show")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("24x16"))
        .stdout(predicate::str::contains("384 cells"));
}

#[test]
fn show_rejects_non_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.json");
    fs::write(&path, r#"{"hello": "world"}"#).unwrap();
    mw().arg("show")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a world snapshot"));
}

#[test]
fn show_recounts_stale_statistics() {
    let dir = TempDir::new().unwrap();
    let path = snapshot(dir.path());
    let mut world: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    world["stats"]["biome_distribution"] = serde_json::json!({"ocean": 1});
    world["stats"]["poi_count"] = 42.into();
    fs::write(&path, world.to_string()).unwrap();

    mw().arg("show")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("384 cells, 0 points of interest"));
}

#[test]
fn map_prints_one_line_per_row() {
    let dir = TempDir::new().unwrap();
    let path = snapshot(dir.path());
    let output = mw().arg("map").arg(&path).output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 16);
    assert!(lines.iter().all(|l| l.chars().count() == 24));
}

#[test]
fn map_legend_lists_ocean_for_islands() {
    let dir = TempDir::new().unwrap();
    let path = snapshot(dir.path());
    mw().args(["map", "--legend"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("~  ocean"));
}

#[test]
fn sites_uses_density() {
    let dir = TempDir::new().unwrap();
    let path = snapshot(dir.path());
    mw().args(["sites", "--density", "0.05", "--seed", "4"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("19 sites (seed 4)"));
}

#[test]
fn sites_with_zero_density() {
    let dir = TempDir::new().unwrap();
    let path = snapshot(dir.path());
    mw().args(["sites", "--density", "0"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No sites"));
}

#[test]
fn sites_refuses_huge_density() {
    let dir = TempDir::new().unwrap();
    let path = snapshot(dir.path());
    mw().args(["sites", "--density", "1e18"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot place sites"));
}

#[test]
fn missing_snapshot_fails() {
    mw().args(["map", "/nonexistent/world.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// bridge
// ---------------------------------------------------------------------------

#[test]
fn bridge_answers_each_line() {
    let input = concat!(
        r#"{"id": 1, "tool": "create_world", "arguments": {"width": 10, "height": 10, "seed": 5}}"#,
        "\n",
        r#"{"id": 2, "tool": "list_worlds"}"#,
        "\n",
        r#"{"id": 3, "tool": "save_world", "arguments": {"world_id": "00000000-0000-0000-0000-000000000000"}}"#,
        "\n",
    );
    let output = mw().arg("bridge").write_stdin(input).output().unwrap();
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["status"], "success");
    assert_eq!(lines[0]["result"]["seed"], 5);
    assert_eq!(lines[1]["result"]["live"].as_array().unwrap().len(), 1);
    assert_eq!(lines[2]["error"]["kind"], "no_repository");
}

#[test]
fn bridge_loads_cli_snapshots_from_data_dir() {
    let dir = TempDir::new().unwrap();
    let path = snapshot(dir.path());
    let world: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let id = world["id"].as_str().unwrap().to_string();

    let data_dir = dir.path().join("saved");
    fs::create_dir(&data_dir).unwrap();
    fs::copy(&path, data_dir.join(format!("{id}.json"))).unwrap();

    let input = format!(
        "{}\n{}\n",
        serde_json::json!({"tool": "load_world", "arguments": {"world_id": id}}),
        serde_json::json!({"tool": "get_region", "arguments": {"world_id": id, "x": 3, "y": 4}}),
    );
    let output = mw()
        .args(["bridge", "--data-dir"])
        .arg(&data_dir)
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines[0]["status"], "success", "{:?}", lines[0]);
    assert_eq!(lines[0]["result"]["width"], 24);
    assert_eq!(lines[1]["result"]["biome"], world["biomes"]["cells"][4 * 24 + 3]);
}
