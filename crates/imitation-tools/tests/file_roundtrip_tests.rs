//! 文件读写集成测试
//!
//! 使用临时目录验证描述、快照、轨迹文件可以被写出并重新加载，
//! 并能驱动完整的控制周期。

use imitation_control::{JointTrajectory, JointTrajectoryPoint, RobotDescription};
use imitation_tools::{
    ConfigError, JointSnapshot, RobotConfig, load_trajectory, reserve_accelerations,
    save_trajectory,
};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn description_file_drives_engine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("robot.toml");

    let config = RobotConfig::example();
    config.save_to_file(&path).unwrap();
    let loaded = RobotConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let snapshot = JointSnapshot::zeros(loaded.joint_names());
    let mut engine = loaded.build_engine(snapshot).unwrap();
    assert_eq!(engine.total_joints(), 17);
    assert!((engine.dt() - 0.01).abs() < 1e-12);

    // 胸部限幅 5，手臂限幅 10
    let output = engine.compute_accelerations(&vec![1.0; 17]).unwrap();
    assert!(output[..3].iter().all(|&a| a == 5.0));
    assert!(output[3..].iter().all(|&a| a == 10.0));
}

#[test]
fn snapshot_files_in_both_formats() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = JointSnapshot::new();
    snapshot.set("torsoYaw", 0.25);
    snapshot.set("leftElbowPitch", -0.5);

    for file in ["state.toml", "state.json"] {
        let path = dir.path().join(file);
        snapshot.save_to_file(&path).unwrap();
        assert_eq!(JointSnapshot::load_from_file(&path).unwrap(), snapshot);
    }

    let err = snapshot.save_to_file(dir.path().join("state.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = RobotConfig::load_from_file(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn trajectory_file_roundtrip_and_fill() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trajectory.json");

    let config = RobotConfig::from_toml_str(
        r#"
control_period = 0.01
[[chest]]
name = "torsoYaw"
kp = 10.0
kd = 1.0
[[left_arm]]
name = "leftElbowPitch"
kp = 10.0
kd = 1.0
[[right_arm]]
name = "rightElbowPitch"
kp = 10.0
kd = 1.0
"#,
    )
    .unwrap();

    let trajectory = JointTrajectory {
        joint_names: config.joint_names(),
        points: vec![JointTrajectoryPoint {
            positions: vec![1.0, 1.0, 1.0],
            time_from_start: Duration::from_millis(10),
            ..Default::default()
        }],
    };
    save_trajectory(&trajectory, &path).unwrap();

    let mut loaded = load_trajectory(&path).unwrap();
    assert_eq!(loaded, trajectory);

    reserve_accelerations(&mut loaded);
    let mut engine = config.build_engine(JointSnapshot::zeros(config.joint_names())).unwrap();
    engine.update_trajectory(&mut loaded).unwrap();

    for a in &loaded.points[0].accelerations {
        assert!((a - 110.0).abs() < 1e-9);
    }
}
