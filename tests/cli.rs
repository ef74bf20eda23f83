use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const CITY: &str = r#"{
  "departments": [
    {
      "id": "0x28F55A9F",
      "name": "Fire",
      "purposes": [
        { "id": "0xEA567BC3", "items": [
          { "occupant_id": "0x00000001", "building_type": "0x000000F1", "name": "Deleted Station" },
          { "occupant_id": "0x00000002", "building_type": "0x000000F2", "name": "Fire Station",
            "properties": ["0x00000010"] }
        ] }
      ],
      "line_items": [
        { "building_type": "0x000000F1", "name": "Deleted Station", "monthly_expense": 300 },
        { "building_type": "0x000000F2", "name": "Fire Station", "monthly_expense": 250 }
      ]
    },
    {
      "id": "0x8910BC8A",
      "name": "Power",
      "purposes": [
        { "id": "0xCA58E540", "items": [
          { "occupant_id": "0x00000020", "building_type": "0x000000A1", "properties": ["0x00000010"] },
          { "occupant_id": "0x00000021", "building_type": "0x000000A2", "properties": ["0x00000010"] },
          { "occupant_id": "0x00000022", "building_type": "0x000000A3" }
        ] }
      ]
    }
  ]
}"#;

fn setup() -> (TempDir, PathBuf) {
    let temp = tempdir().unwrap();
    let budget = temp.path().join("city.json");
    fs::write(&budget, CITY).unwrap();
    (temp, budget)
}

#[allow(deprecated)]
fn cli(base_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("phantom-budget").expect("binary");
    cmd.env("PHANTOM_BUDGET_DIR", base_dir.join("plugin"));
    cmd
}

#[test]
fn run_removes_phantom_fire_station() {
    let (temp, budget) = setup();
    let output = temp.path().join("after.json");

    cli(temp.path())
        .arg("run")
        .arg("--budget")
        .arg(&budget)
        .arg("--output")
        .arg(&output)
        .args(["RemovePhantomBudgetItems", "fire"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[RemovePhantomBudgetItems] Removed 1 orphaned budget item(s).",
        ));

    let after: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let fire = &after["departments"][0];
    assert_eq!(fire["purposes"][0]["items"].as_array().unwrap().len(), 1);
    assert_eq!(fire["line_items"].as_array().unwrap().len(), 1);
    assert_eq!(fire["line_items"][0]["building_type"], "0x000000F2");
}

#[test]
fn run_clear_all_reports_category_as_typed() {
    let (temp, budget) = setup();

    cli(temp.path())
        .arg("run")
        .arg("--budget")
        .arg(&budget)
        .arg("--show")
        .arg("RemovePhantomBudgetItems POWER All")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared the POWER budget category."))
        .stdout(predicate::str::contains("0x000000A1").not());
}

#[test]
fn run_unknown_category() {
    let (temp, budget) = setup();

    cli(temp.path())
        .arg("run")
        .arg("--budget")
        .arg(&budget)
        .args(["RemovePhantomBudgetItems", "Atomic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown Budget Category: Atomic"));
}

#[test]
fn run_without_category_prints_usage() {
    let (temp, budget) = setup();

    cli(temp.path())
        .arg("run")
        .arg("--budget")
        .arg(&budget)
        .arg("RemovePhantomBudgetItems")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Usage: RemovePhantomBudgetItems <category> [all]",
        ));
}

#[test]
fn run_unregistered_cheat_fails() {
    let (temp, budget) = setup();

    cli(temp.path())
        .arg("run")
        .arg("--budget")
        .arg(&budget)
        .args(["moolah", "fire"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cheat not found"));
}

#[test]
fn run_writes_log_header() {
    let (temp, budget) = setup();

    cli(temp.path())
        .arg("run")
        .arg("--budget")
        .arg(&budget)
        .args(["RemovePhantomBudgetItems", "Fire"])
        .assert()
        .success();

    let log = fs::read_to_string(
        temp.path()
            .join("plugin")
            .join("SC4RemovePhantomBudgetItems.log"),
    )
    .unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("SC4RemovePhantomBudgetItems v"));
}

#[test]
fn run_missing_budget_file() {
    let temp = tempdir().unwrap();

    cli(temp.path())
        .arg("run")
        .arg("--budget")
        .arg(temp.path().join("missing.json"))
        .args(["RemovePhantomBudgetItems", "Fire"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn show_prints_tables() {
    let (temp, budget) = setup();

    cli(temp.path())
        .arg("show")
        .arg("--budget")
        .arg(&budget)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted Station"))
        .stdout(predicate::str::contains("Line Items:"));
}

#[test]
fn categories_lists_departments() {
    let temp = tempdir().unwrap();

    cli(temp.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("0x28F55A9F"))
        .stdout(predicate::str::contains("Health"));
}

#[test]
fn init_then_config() {
    let temp = tempdir().unwrap();

    cli(temp.path()).arg("init").assert().success();
    assert!(temp.path().join("plugin").join("config.json").exists());

    cli(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Log level: ERROR"))
        .stdout(predicate::str::contains("using defaults").not());

    cli(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings already exist"));
}

#[test]
fn config_reports_log_after_run() {
    let (temp, budget) = setup();

    cli(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("not created yet"));

    cli(temp.path())
        .arg("run")
        .arg("--budget")
        .arg(&budget)
        .args(["RemovePhantomBudgetItems", "Fire"])
        .assert()
        .success();

    cli(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Log contents:   1 entries"));
}
