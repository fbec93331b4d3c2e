use telecom_master::api_client::UserRole;
use telecom_master::config::config::{Config, ENV_BASE_URL, ENV_USE_MOCK};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert_eq!(config.api.timeout_secs, 30);
    assert!(!config.api.use_mock);
    assert_eq!(config.api.mock_delay_ms, 2000);
    assert_eq!(config.session.user_role, UserRole::CustomerService);
    assert_eq!(config.session.user_id, "demo-user-001");
}

#[test]
fn test_env_style_overrides() {
    let mut config = Config::default();

    assert!(config.apply_override(ENV_BASE_URL, "https://backend.example.com "));
    assert_eq!(config.api.base_url, "https://backend.example.com");

    assert!(config.apply_override(ENV_USE_MOCK, "1"));
    assert!(config.api.use_mock);
    assert!(config.apply_override(ENV_USE_MOCK, "off"));
    assert!(!config.api.use_mock);
    assert!(config.apply_override(ENV_USE_MOCK, "TRUE"));
    assert!(config.api.use_mock);

    assert!(!config.apply_override("UNRELATED_KEY", "x"));
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nuse_mock = true\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(config.api.use_mock);
    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert_eq!(config.session.user_id, "demo-user-001");
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.api.base_url = "http://10.0.0.5:9000".to_string();
    config.session.user_role = UserRole::Supervisor;
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.api.base_url, "http://10.0.0.5:9000");
    assert_eq!(reloaded.session.user_role, UserRole::Supervisor);
}
