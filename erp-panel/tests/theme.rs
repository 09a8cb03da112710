use std::sync::{Arc, Mutex};

use erp_panel::settings::SettingsProvider;
use erp_panel::theme::{THEME_KEY, Theme, ThemeError, ThemeManager};
use paneldom::{Document, Event, Key};

fn manager(system: Theme) -> (ThemeManager, SettingsProvider) {
    let settings = SettingsProvider::in_memory();
    (ThemeManager::new(settings.clone(), system), settings)
}

// ============================================================================
// Preference
// ============================================================================

#[tokio::test]
async fn test_load_follows_system_without_storing() {
    let (themes, settings) = manager(Theme::Dark);

    assert_eq!(themes.load().await, Theme::Dark);
    assert_eq!(themes.root_attr(), Some(("data-theme", "dark")));
    assert_eq!(settings.get::<String>(THEME_KEY).await.unwrap(), None);

    // Still following the system, so a change applies.
    assert!(themes.system_changed(Theme::Light).await);
    assert_eq!(themes.theme(), Theme::Light);
    assert_eq!(themes.root_attr(), None);
}

#[tokio::test]
async fn test_stored_preference_wins() {
    let (themes, settings) = manager(Theme::Light);
    settings.set(THEME_KEY, &"dark".to_string()).await.unwrap();

    assert_eq!(themes.load().await, Theme::Dark);
    assert!(!themes.system_changed(Theme::Light).await);
    assert_eq!(themes.theme(), Theme::Dark);

    assert_eq!(themes.clear_preference().await.unwrap(), Theme::Light);
    assert_eq!(themes.stored().await, None);
}

#[tokio::test]
async fn test_invalid_stored_value_ignored() {
    let (themes, settings) = manager(Theme::Light);
    settings.set(THEME_KEY, &"sepia".to_string()).await.unwrap();

    assert_eq!(themes.stored().await, None);
    assert_eq!(themes.load().await, Theme::Light);
}

#[tokio::test]
async fn test_toggle_persists_and_notifies() {
    let (themes, settings) = manager(Theme::Light);
    themes.load().await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    themes.subscribe(move |theme| log.lock().unwrap().push(theme));

    assert_eq!(themes.toggle().await.unwrap(), Theme::Dark);
    assert_eq!(
        settings.get::<String>(THEME_KEY).await.unwrap().as_deref(),
        Some("dark")
    );
    // Re-applying the same theme is silent.
    themes.set_theme(Theme::Dark).await.unwrap();
    themes.set_theme_str("light").await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![Theme::Dark, Theme::Light]);
}

#[tokio::test]
async fn test_set_theme_str_rejects_unknown() {
    let (themes, settings) = manager(Theme::Light);

    let result = themes.set_theme_str("blue").await;
    assert!(matches!(result, Err(ThemeError::Invalid(name)) if name == "blue"));
    assert_eq!(themes.theme(), Theme::Light);
    assert_eq!(settings.get::<String>(THEME_KEY).await.unwrap(), None);
}

// ============================================================================
// Toggle button
// ============================================================================

#[tokio::test]
async fn test_toggle_button() {
    let document = Document::new();
    let mount = document.create_mount("theme-toggle");
    let (themes, _) = manager(Theme::Light);
    themes.load().await;
    themes.mount_toggle(&document, "theme-toggle").unwrap();

    let html = mount.to_html();
    assert!(html.contains(r#"aria-label="Ativar modo escuro""#));
    assert!(html.contains(r#"data-theme="light""#));

    assert!(document.dispatch(&Event::click("theme-toggle-button")));
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert_eq!(themes.theme(), Theme::Dark);
    assert!(mount.to_html().contains(r#"aria-label="Ativar modo claro""#));

    assert!(document.dispatch(&Event::key("theme-toggle-button", Key::Enter)));
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert_eq!(themes.theme(), Theme::Light);
}

#[test]
fn test_toggle_mount_must_exist() {
    let (themes, _) = manager(Theme::Light);
    assert!(themes.mount_toggle(&Document::new(), "theme-toggle").is_err());
}
