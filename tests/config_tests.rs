use cleaning_robot::{Backend, RobotConfig, RobotError};
use std::path::Path;
use std::time::Duration;

#[test]
fn shipped_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/robot.yaml");
    let config = RobotConfig::from_file(&path).unwrap();

    assert_eq!(config, RobotConfig::default());
    assert_eq!(config.backend, Backend::Simulated);
    assert_eq!(config.settle_delay(), Duration::ZERO);
}

#[test]
fn missing_file_is_a_config_error() {
    let err = RobotConfig::from_file(Path::new("does/not/exist.yaml")).unwrap_err();
    assert!(matches!(err, RobotError::ConfigError(_)));
    assert!(err.to_string().starts_with("Configuration error"));
}
