//! 命令行端到端测试

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const THREE_JOINTS: &str = r#"
control_period = 0.01

[[chest]]
name = "torso"
kp = 10.0
kd = 1.0
min_accel = -100.0
max_accel = 100.0

[[left_arm]]
name = "left"
kp = 10.0
kd = 1.0
min_accel = -100.0
max_accel = 100.0

[[right_arm]]
name = "right"
kp = 10.0
kd = 1.0
min_accel = -100.0
max_accel = 100.0
"#;

fn cli() -> Command {
    Command::cargo_bin("imitation-cli").unwrap()
}

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("robot.toml");
    fs::write(&path, THREE_JOINTS).unwrap();
    path
}

#[test]
fn test_init_then_check() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("robot.toml");

    cli()
        .args(["init", "--output"])
        .arg(&config)
        .assert()
        .success();

    cli()
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("关节总数: 17"))
        .stdout(predicate::str::contains("right_arm  offset  10"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    cli()
        .args(["init", "--output"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cli()
        .args(["init", "--force", "--output"])
        .arg(&config)
        .assert()
        .success();
}

#[test]
fn test_gains_lists_every_joint() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    cli()
        .args(["gains", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("torso"))
        .stdout(predicate::str::contains("left_arm"))
        .stdout(predicate::str::contains("10.000"));
}

#[test]
fn test_step_prints_segment_accelerations() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    // e = [0.1, 0.2, 1.0]，de/dt = e / 0.01，右臂被限幅到 100
    cli()
        .args(["step", "--desired", "0.1,0.2,1.0", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("[11.0000]"))
        .stdout(predicate::str::contains("[22.0000]"))
        .stdout(predicate::str::contains("[100.0000]"));
}

#[test]
fn test_step_reads_state_snapshot() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let state = dir.path().join("state.json");
    fs::write(
        &state,
        r#"{ "positions": { "torso": 0.1, "left": 0.2, "right": 1.0 } }"#,
    )
    .unwrap();

    cli()
        .args(["step", "--desired", "0.1,0.2,1.0", "--config"])
        .arg(&config)
        .arg("--state")
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains("chest      [0.0000]"));
}

#[test]
fn test_step_simulate_runs_many_cycles() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    cli()
        .args(["step", "--desired", "0.1,0.2,0.3", "--cycles", "50", "--simulate", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("周期数: 50"))
        .stdout(predicate::str::contains("位置误差"));
}

#[test]
fn test_step_rejects_wrong_joint_count() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    cli()
        .args(["step", "--desired", "0.1,0.2", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("需要 3 个关节位置"));
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    cli()
        .args(["check", "--config"])
        .arg(dir.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("加载机器人描述失败"));
}

#[test]
fn test_trajectory_fills_accelerations() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");
    fs::write(
        &input,
        r#"{ "joint_names": ["torso", "left", "right"],
             "points": [ { "positions": [0.1, 0.2, 1.0] } ] }"#,
    )
    .unwrap();

    cli()
        .args(["trajectory", "--config"])
        .arg(&config)
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let accelerations: Vec<f64> = written["points"][0]["accelerations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();

    let expected = [11.0, 22.0, 100.0];
    for (actual, expected) in accelerations.iter().zip(expected) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }
}

#[test]
fn test_step_huge_period_fails_cleanly_in_realtime() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("slow.toml");
    fs::write(&config, THREE_JOINTS.replace("control_period = 0.01", "control_rate_hz = 1e-20")).unwrap();

    // dt = 1e20 s 超出 Duration 范围：离线运行不受影响
    cli()
        .args(["step", "--desired", "0,0,0", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("周期数: 1"));

    cli()
        .args(["step", "--desired", "0,0,0", "--realtime", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("无法用于实时运行"))
        .stderr(predicate::str::contains("panicked").not());
}
