use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use erp_panel::config::{DEFAULT_API_URL, PanelConfig};
use erp_panel::paths::rotate_logs_in;
use erp_panel::ConfigError;
use log::LevelFilter;

/// Fresh scratch directory for one test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("erp-panel-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_missing_file_gives_defaults() {
    let dir = scratch("missing");
    let config = PanelConfig::load(&dir.join("config.toml")).unwrap();

    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.poll_interval(), Duration::from_secs(60));
    assert_eq!(config.notification_limit, 10);
    assert!(!config.has_token());
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_file() {
    let dir = scratch("load");
    let path = dir.join("config.toml");
    fs::write(
        &path,
        r#"
api_url = "https://erp.example.com"
token = "abc123"
poll_interval_secs = 15
log_level = "debug"
"#,
    )
    .unwrap();

    let config = PanelConfig::load(&path).unwrap();
    assert_eq!(config.api_base().unwrap().as_str(), "https://erp.example.com/");
    assert!(config.has_token());
    assert_eq!(config.poll_interval(), Duration::from_secs(15));
    assert_eq!(config.level().unwrap(), LevelFilter::Debug);

    // Round trip through the serializer.
    let again: PanelConfig = toml::from_str(&config.to_toml().unwrap()).unwrap();
    assert_eq!(again.token.as_deref(), Some("abc123"));
}

#[test]
fn test_malformed_file() {
    let dir = scratch("malformed");
    let path = dir.join("config.toml");
    fs::write(&path, "poll_interval_secs = \"often\"").unwrap();

    assert!(matches!(PanelConfig::load(&path), Err(ConfigError::Parse { .. })));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validation_errors() {
    let bad_url = PanelConfig {
        api_url: "localhost sem esquema".to_string(),
        ..Default::default()
    };
    assert!(matches!(bad_url.validate(), Err(ConfigError::InvalidUrl(_))));

    let zero_poll = PanelConfig {
        poll_interval_secs: 0,
        ..Default::default()
    };
    assert!(matches!(
        zero_poll.validate(),
        Err(ConfigError::InvalidValue { key: "poll_interval_secs", .. })
    ));

    let bad_level = PanelConfig {
        log_level: "loud".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        bad_level.validate(),
        Err(ConfigError::InvalidValue { key: "log_level", .. })
    ));
}

#[test]
fn test_overrides_replace_file_values() {
    let config = PanelConfig {
        token: Some("do-arquivo".to_string()),
        ..Default::default()
    }
    .with_overrides(|key: &str| match key {
        "ERP_PANEL_TOKEN" => Some("da-linha".to_string()),
        "ERP_PANEL_API_URL" => Some("https://api.example.com".to_string()),
        _ => None,
    });

    assert_eq!(config.token.as_deref(), Some("da-linha"));
    assert_eq!(config.api_url, "https://api.example.com");
}

// ============================================================================
// Log rotation
// ============================================================================

#[test]
fn test_rotation_archives_and_prunes() {
    let dir = scratch("logs");
    for i in 0..4 {
        fs::write(dir.join(format!("2024010{i}_000000.log")), "old").unwrap();
        std::thread::sleep(Duration::from_millis(20));
    }
    fs::write(dir.join("latest.log"), "current").unwrap();

    rotate_logs_in(&dir, 3);

    let mut names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert!(!names.contains(&"latest.log".to_string()));
    assert_eq!(names.len(), 3);
    // The oldest archives go first.
    assert!(!names.contains(&"20240100_000000.log".to_string()));
    assert!(!names.contains(&"20240101_000000.log".to_string()));
}
