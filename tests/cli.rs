use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const DATABASE: &str = r#"[
    {"latitude": 22.523144, "longitude": 75.924728, "radius": 200},
    {"latitude": 22.6, "longitude": 75.9}
]"#;

fn database_file(dir: &assert_fs::TempDir) -> assert_fs::fixture::ChildPath {
    let db = dir.child("database.json");
    db.write_str(DATABASE).unwrap();
    db
}

#[test]
fn evaluate_command_sets_warning() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args([
            "evaluate",
            "--db",
            db.path().to_str().unwrap(),
            "--lat",
            "22.523144",
            "--lon",
            "75.924728",
            "--speed",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("36 km/h"))
        .stdout(predicate::str::contains("Radius: 200"))
        .stdout(predicate::str::contains("Safe Speed: 76 km/h"))
        .stdout(predicate::str::contains("Design Speed: 75 km/h"))
        .stdout(predicate::str::contains("Warning: Speed Limit Exceeded!"));

    dir.close().unwrap();
}

#[test]
fn evaluate_command_without_radius() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["evaluate", "--db", db.path().to_str().unwrap(), "--lat", "22.6", "--lon", "75.9", "--speed", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Safe Speed: N/A"))
        .stdout(predicate::str::contains("Design Speed: N/A"))
        .stdout(predicate::str::contains("Warning").not());

    dir.close().unwrap();
}

#[test]
fn evaluate_command_json_output() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args([
            "evaluate",
            "--format",
            "json",
            "--db",
            db.path().to_str().unwrap(),
            "--lat",
            "22.523144",
            "--lon",
            "75.924728",
            "--speed",
            "25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"computed\""))
        .stdout(predicate::str::contains("\"warning\":false"));

    dir.close().unwrap();
}

#[test]
fn evaluate_with_missing_database_still_shows_speed() {
    let dir = assert_fs::TempDir::new().unwrap();
    let missing = dir.child("missing.json");

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["evaluate", "--db", missing.path().to_str().unwrap(), "--lat", "1.0", "--lon", "2.0", "--speed", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("36 km/h"))
        .stdout(predicate::str::contains("Radius").not());

    dir.close().unwrap();
}

#[test]
fn replay_command_keeps_advisory_on_no_match() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);
    let readings = dir.child("readings.json");
    readings
        .write_str(
            r#"[
                {"latitude": 22.523144, "longitude": 75.924728, "speed": 10},
                {"latitude": 10.0, "longitude": 10.0, "speed": 20}
            ]"#,
        )
        .unwrap();

    let output = Command::cargo_bin("curve-advisor")
        .unwrap()
        .args([
            "replay",
            "--db",
            db.path().to_str().unwrap(),
            "--readings",
            readings.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let blocks: Vec<&str> = stdout.trim().split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[1].contains("72 km/h"));
    assert!(blocks[1].contains("Safe Speed: 76 km/h"));

    dir.close().unwrap();
}

#[test]
fn replay_command_can_clear_on_no_match() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);
    let readings = dir.child("readings.json");
    readings
        .write_str(
            r#"[
                {"latitude": 22.523144, "longitude": 75.924728, "speed": 10},
                {"latitude": 10.0, "longitude": 10.0}
            ]"#,
        )
        .unwrap();

    let output = Command::cargo_bin("curve-advisor")
        .unwrap()
        .args([
            "replay",
            "--clear-on-no-match",
            "--db",
            db.path().to_str().unwrap(),
            "--readings",
            readings.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let blocks: Vec<&str> = stdout.trim().split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[1].contains("0 km/h"));
    assert!(!blocks[1].contains("Safe Speed"));

    dir.close().unwrap();
}

#[test]
fn tolerance_option_matches_nearby_reading() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args([
            "evaluate",
            "--tolerance",
            "0.00001",
            "--db",
            db.path().to_str().unwrap(),
            "--lat",
            "22.523145",
            "--lon",
            "75.924728",
            "--speed",
            "30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Radius: 200"));

    dir.close().unwrap();
}

#[test]
fn mph_readout() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["evaluate", "--unit", "mph", "--db", db.path().to_str().unwrap(), "--lat", "0", "--lon", "0", "--speed", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("22 mph"));

    dir.close().unwrap();
}

#[test]
fn check_command() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["check", "--db", db.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 curve records (1 without radius)"));

    dir.close().unwrap();
}

#[test]
fn check_command_treats_bad_radius_as_absent() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = dir.child("database.json");
    db.write_str(
        r#"[
            {"latitude": 1.0, "longitude": 2.0, "radius": 200},
            {"latitude": 3.0, "longitude": 4.0, "radius": -5}
        ]"#,
    )
    .unwrap();

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["check", "--db", db.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 curve records (1 without radius)"));

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["evaluate", "--db", db.path().to_str().unwrap(), "--lat", "1.0", "--lon", "2.0", "--speed", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Safe Speed: 76 km/h"));

    dir.close().unwrap();
}

#[test]
fn check_command_rejects_bad_coordinates() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = dir.child("database.json");
    db.write_str(r#"[{"latitude": 1.0, "longitude": 200.0, "radius": 50}]"#).unwrap();

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["check", "--db", db.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid curve record #0"));

    dir.close().unwrap();
}

#[test]
fn evaluate_command_shows_very_high_speed() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["evaluate", "--db", db.path().to_str().unwrap(), "--lat", "1.0", "--lon", "2.0", "--speed", "160"])
        .assert()
        .success()
        .stdout(predicate::str::contains("576 km/h"));

    dir.close().unwrap();
}

#[test]
fn theme_command() {
    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["theme", "--lux", "40,2.5,3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: Dark"));

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["theme", "--lux", "0.5", "--denied"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sensor not started, theme: Light"));
}

#[test]
fn config_file_is_applied_and_errors_reported() {
    let dir = assert_fs::TempDir::new().unwrap();
    let db = database_file(&dir);
    let config = dir.child("advisor.json");
    config
        .write_str(r#"{"readout_unit": "mph", "log_level": "error"}"#)
        .unwrap();

    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args([
            "evaluate",
            "--config",
            config.path().to_str().unwrap(),
            "--db",
            db.path().to_str().unwrap(),
            "--lat",
            "0",
            "--lon",
            "0",
            "--speed",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("22 mph"));

    let broken = dir.child("broken.json");
    broken.write_str("{ not json").unwrap();
    Command::cargo_bin("curve-advisor")
        .unwrap()
        .args(["check", "--config", broken.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: "));

    dir.close().unwrap();
}
