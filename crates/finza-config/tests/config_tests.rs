use finza_config::{Config, ConfigManager, Theme};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert!(!cfg.assistant.endpoint.is_empty());
    assert_eq!(cfg.assistant.timeout_secs, 20);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    cfg.theme = Theme::Dark;
    cfg.last_user = Some("u-77".to_string());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.theme, Theme::Dark);
    assert_eq!(loaded.last_user.as_deref(), Some("u-77"));
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.theme, Theme::Light);
}

#[test]
fn unknown_theme_labels_fall_back_to_light() {
    let raw = r#"{"locale": "en-US", "currency": "USD", "theme": "sepia"}"#;
    let cfg: Config = serde_json::from_str(raw).expect("deserialize");

    assert_eq!(cfg.theme, Theme::Light);
    assert_eq!(cfg.assistant.max_tokens, 1024);
}
