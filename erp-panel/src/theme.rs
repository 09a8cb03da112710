//! Light/dark theme selection.
//!
//! The current theme is the stored preference when there is one, else the
//! system preference. Without a stored preference, system changes are
//! followed live.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock, Weak};

use paneldom::{Document, Element, EventKind, Listeners, Mount, View};
use panelkit::ComponentError;
use panelkit::component::resolve_mount;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::runtime::Handle;

use crate::settings::{SettingsError, SettingsProvider};

/// Settings key of the stored preference.
pub const THEME_KEY: &str = "erp-panel.theme";

/// Root attribute set while the dark theme is active.
pub const THEME_ATTR: &str = "data-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Label of the toggle button while this theme is active.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::Light => "Ativar modo escuro",
            Self::Dark => "Ativar modo claro",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeError::Invalid(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid theme '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Called with the new theme after every change.
pub type ThemeHook = Arc<dyn Fn(Theme) + Send + Sync>;

struct ThemeShared {
    settings: SettingsProvider,
    system: RwLock<Theme>,
    current: RwLock<Theme>,
    subscribers: RwLock<Vec<ThemeHook>>,
    toggle: RwLock<Option<Mount>>,
}

/// Owns the active theme and its stored preference. Clones share state.
#[derive(Clone)]
pub struct ThemeManager {
    shared: Arc<ThemeShared>,
}

impl ThemeManager {
    /// `system` is the platform's current color-scheme preference.
    pub fn new(settings: SettingsProvider, system: Theme) -> Self {
        Self {
            shared: Arc::new(ThemeShared {
                settings,
                system: RwLock::new(system),
                current: RwLock::new(system),
                subscribers: RwLock::new(Vec::new()),
                toggle: RwLock::new(None),
            }),
        }
    }

    fn from_weak(weak: &Weak<ThemeShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    pub fn theme(&self) -> Theme {
        self.shared.current.read().map(|t| *t).unwrap_or_default()
    }

    pub fn system_theme(&self) -> Theme {
        self.shared.system.read().map(|t| *t).unwrap_or_default()
    }

    /// The stored preference. Unreadable or invalid values count as none.
    pub async fn stored(&self) -> Option<Theme> {
        match self.shared.settings.get::<String>(THEME_KEY).await {
            Ok(Some(value)) => match value.parse() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    log::error!("ignoring stored theme: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::error!("cannot read theme preference: {e}");
                None
            }
        }
    }

    /// Apply the stored preference, else the system one.
    pub async fn load(&self) -> Theme {
        let theme = match self.stored().await {
            Some(theme) => theme,
            None => self.system_theme(),
        };
        self.apply(theme);
        theme
    }

    /// Store and apply a theme.
    pub async fn set_theme(&self, theme: Theme) -> Result<(), ThemeError> {
        self.shared
            .settings
            .set(THEME_KEY, &theme.as_str().to_string())
            .await?;
        self.apply(theme);
        Ok(())
    }

    /// Parse, store and apply a theme name.
    pub async fn set_theme_str(&self, name: &str) -> Result<(), ThemeError> {
        let theme = name.parse().inspect_err(|e| log::error!("{e}"))?;
        self.set_theme(theme).await
    }

    /// Switch to the other theme and store it.
    pub async fn toggle(&self) -> Result<Theme, ThemeError> {
        let theme = self.theme().toggled();
        self.set_theme(theme).await?;
        Ok(theme)
    }

    /// Forget the stored preference and follow the system again.
    pub async fn clear_preference(&self) -> Result<Theme, ThemeError> {
        self.shared.settings.delete(THEME_KEY).await?;
        let theme = self.system_theme();
        self.apply(theme);
        Ok(theme)
    }

    /// The system preference changed. Applied only when the user has not
    /// chosen a theme; returns true if it was.
    pub async fn system_changed(&self, theme: Theme) -> bool {
        if let Ok(mut system) = self.shared.system.write() {
            *system = theme;
        }
        if self.stored().await.is_some() {
            return false;
        }
        self.apply(theme);
        true
    }

    pub fn subscribe(&self, hook: impl Fn(Theme) + Send + Sync + 'static) {
        if let Ok(mut subscribers) = self.shared.subscribers.write() {
            subscribers.push(Arc::new(hook));
        }
    }

    /// Attribute to set on the document root, if any.
    pub fn root_attr(&self) -> Option<(&'static str, &'static str)> {
        (self.theme() == Theme::Dark).then_some((THEME_ATTR, "dark"))
    }

    /// Render the toggle button into `container` and keep it in sync.
    pub fn mount_toggle(&self, document: &Document, container: &str) -> Result<(), ComponentError> {
        let mount = resolve_mount(document, container, "theme toggle")?;
        mount.replace(self.toggle_view(mount.id()));
        if let Ok(mut toggle) = self.shared.toggle.write() {
            *toggle = Some(mount);
        }
        Ok(())
    }

    fn toggle_view(&self, container: &str) -> View {
        let theme = self.theme();
        let label = theme.toggle_label();
        let button_id = format!("{container}-button");

        let mut listeners = Listeners::new();
        let weak = Arc::downgrade(&self.shared);
        listeners.on(&button_id, EventKind::Click, move |_| {
            if let Some(manager) = ThemeManager::from_weak(&weak) {
                manager.spawn_toggle();
            }
        });
        let weak = Arc::downgrade(&self.shared);
        listeners.on(&button_id, EventKind::Key, move |event| {
            if event.key_code().is_some_and(|k| k.is_activation())
                && let Some(manager) = ThemeManager::from_weak(&weak)
            {
                manager.spawn_toggle();
            }
        });

        let root = Element::div().id(container).class("theme-toggle-container").child(
            Element::button(if theme == Theme::Dark { "☀" } else { "☾" })
                .id(button_id)
                .class("theme-toggle")
                .aria("label", label)
                .attr("title", label)
                .data("theme", theme.as_str()),
        );
        View::new(root, listeners)
    }

    fn spawn_toggle(&self) {
        let Ok(handle) = Handle::try_current() else {
            log::warn!("no async runtime, ignoring theme toggle");
            return;
        };
        let manager = self.clone();
        handle.spawn(async move {
            if let Err(e) = manager.toggle().await {
                log::error!("theme toggle failed: {e}");
            }
        });
    }

    fn apply(&self, theme: Theme) {
        let previous = match self.shared.current.write() {
            Ok(mut current) => std::mem::replace(&mut *current, theme),
            Err(_) => return,
        };

        let toggle = self.shared.toggle.read().ok().and_then(|t| t.clone());
        if let Some(mount) = toggle {
            mount.replace(self.toggle_view(mount.id()));
        }

        if previous == theme {
            return;
        }
        log::info!("theme: {previous} -> {theme}");
        let subscribers = self
            .shared
            .subscribers
            .read()
            .map(|s| s.clone())
            .unwrap_or_default();
        for hook in subscribers {
            hook(theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!(matches!("blue".parse::<Theme>(), Err(ThemeError::Invalid(v)) if v == "blue"));
        assert_eq!(Theme::Dark.toggle_label(), "Ativar modo claro");
    }
}
