//! Tabs component state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use paneldom::{Document, Key, Mount, View};
use serde::{Deserialize, Serialize};

use crate::component::{Component, PanelContent, resolve_mount};
use crate::error::ComponentError;

/// Called with `(new_index, descriptor, old_index)` after a switch.
pub type TabChangeHook = Arc<dyn Fn(usize, &TabDescriptor, Option<usize>) + Send + Sync>;

/// Visual variant of the tab strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabsVariant {
    #[default]
    Default,
    Pills,
    Underline,
}

impl TabsVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pills => "pills",
            Self::Underline => "underline",
        }
    }
}

/// One tab and its panel.
#[derive(Debug, Clone, Default)]
pub struct TabDescriptor {
    pub label: String,
    pub icon: Option<String>,
    pub badge: Option<String>,
    pub disabled: bool,
    pub content: PanelContent,
}

impl TabDescriptor {
    pub fn new(label: impl Into<String>, content: impl Into<PanelContent>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Tabs configuration.
#[derive(Clone, Default)]
pub struct TabsConfig {
    /// Mount target id.
    pub container: String,
    pub tabs: Vec<TabDescriptor>,
    /// Initially active tab.
    pub active_tab: usize,
    pub variant: TabsVariant,
    pub on_change: Option<TabChangeHook>,
}

impl TabsConfig {
    pub fn new(container: impl Into<String>, tabs: Vec<TabDescriptor>) -> Self {
        Self {
            container: container.into(),
            tabs,
            ..Default::default()
        }
    }

    pub fn active_tab(mut self, index: usize) -> Self {
        self.active_tab = index;
        self
    }

    pub fn variant(mut self, variant: TabsVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn on_change(
        mut self,
        hook: impl Fn(usize, &TabDescriptor, Option<usize>) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(hook));
        self
    }
}

#[derive(Debug)]
pub(super) struct TabsInner {
    pub tabs: Vec<TabDescriptor>,
    /// Always a non-disabled tab, or `None` when every tab is disabled.
    pub active: Option<usize>,
}

pub(super) struct TabsShared {
    pub mount: Mount,
    pub variant: TabsVariant,
    pub on_change: Option<TabChangeHook>,
    pub inner: RwLock<TabsInner>,
    pub destroyed: AtomicBool,
}

/// A tab strip with exactly one active, non-disabled tab.
///
/// Clicking a tab or moving with the arrow keys switches the active panel.
/// Clones share the same instance.
#[derive(Clone)]
pub struct Tabs {
    pub(super) shared: Arc<TabsShared>,
}

impl Tabs {
    /// Resolve the mount, pick the initial tab and render.
    pub fn new(document: &Document, config: TabsConfig) -> Result<Self, ComponentError> {
        let mount = resolve_mount(document, &config.container, "tabs")?;

        let requested = config.active_tab;
        let active = match config.tabs.get(requested) {
            Some(tab) if !tab.disabled => Some(requested),
            _ => {
                let fallback = config.tabs.iter().position(|t| !t.disabled);
                log::warn!(
                    "tabs '{}': tab {requested} cannot be active, using {fallback:?}",
                    config.container
                );
                fallback
            }
        };

        let tabs = Self {
            shared: Arc::new(TabsShared {
                mount,
                variant: config.variant,
                on_change: config.on_change,
                inner: RwLock::new(TabsInner {
                    tabs: config.tabs,
                    active,
                }),
                destroyed: AtomicBool::new(false),
            }),
        };
        tabs.render();
        Ok(tabs)
    }

    pub(super) fn from_weak(weak: &Weak<TabsShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Index of the active tab.
    pub fn active_tab(&self) -> Option<usize> {
        self.shared.inner.read().ok().and_then(|g| g.active)
    }

    pub fn len(&self) -> usize {
        self.shared.inner.read().map(|g| g.tabs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tab(&self, index: usize) -> Option<TabDescriptor> {
        self.shared
            .inner
            .read()
            .ok()
            .and_then(|g| g.tabs.get(index).cloned())
    }

    pub fn variant(&self) -> TabsVariant {
        self.shared.variant
    }

    /// Element id of a tab button.
    pub fn tab_id(&self, index: usize) -> String {
        tab_id(self.shared.mount.id(), index)
    }

    /// Element id of a tab panel.
    pub fn panel_id(&self, index: usize) -> String {
        panel_id(self.shared.mount.id(), index)
    }

    /// Switch to tab `index`.
    ///
    /// No-op when `index` is already active, out of range or disabled.
    /// Returns true if the active tab changed.
    pub fn set_active_tab(&self, index: usize) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let (old, descriptor) = {
            let Ok(mut inner) = self.shared.inner.write() else {
                return false;
            };
            let selectable = inner.tabs.get(index).is_some_and(|t| !t.disabled);
            if !selectable || inner.active == Some(index) {
                return false;
            }
            let descriptor = inner.tabs[index].clone();
            (inner.active.replace(index), descriptor)
        };

        self.render();
        self.notify(index, &descriptor, old);
        true
    }

    /// Disable a tab. Disabling the active tab moves to the nearest
    /// enabled one.
    pub fn disable_tab(&self, index: usize) {
        if self.is_destroyed() {
            return;
        }
        let moved = {
            let Ok(mut inner) = self.shared.inner.write() else {
                return;
            };
            let Some(tab) = inner.tabs.get_mut(index) else {
                return;
            };
            tab.disabled = true;

            if inner.active == Some(index) {
                let next = nearest_enabled(&inner.tabs, index);
                inner.active = next;
                next.map(|n| (n, inner.tabs[n].clone()))
            } else {
                None
            }
        };

        self.render();
        if let Some((next, descriptor)) = moved {
            self.notify(next, &descriptor, Some(index));
        }
    }

    /// Re-enable a tab. If nothing was active, it becomes active.
    pub fn enable_tab(&self, index: usize) {
        if self.is_destroyed() {
            return;
        }
        let activated = {
            let Ok(mut inner) = self.shared.inner.write() else {
                return;
            };
            let Some(tab) = inner.tabs.get_mut(index) else {
                return;
            };
            tab.disabled = false;
            let descriptor = tab.clone();

            if inner.active.is_none() {
                inner.active = Some(index);
                Some(descriptor)
            } else {
                None
            }
        };

        self.render();
        if let Some(descriptor) = activated {
            self.notify(index, &descriptor, None);
        }
    }

    /// Keyboard navigation from the tab at `index`.
    ///
    /// Returns true if the key was handled.
    pub fn handle_key(&self, index: usize, key: Key) -> bool {
        let len = self.len();
        if len == 0 {
            return false;
        }
        let target = match key {
            Key::Right => (index + 1).min(len - 1),
            Key::Left => index.saturating_sub(1),
            Key::Home => 0,
            Key::End => len - 1,
            k if k.is_activation() => index,
            _ => return false,
        };

        self.set_active_tab(target);
        if let Some(active) = self.active_tab() {
            self.shared.mount.focus(&self.tab_id(active));
        }
        true
    }

    fn notify(&self, index: usize, descriptor: &TabDescriptor, old: Option<usize>) {
        log::debug!("tabs '{}': {old:?} -> {index}", self.shared.mount.id());
        if let Some(hook) = &self.shared.on_change {
            hook(index, descriptor, old);
        }
    }
}

impl Component for Tabs {
    fn mount(&self) -> &Mount {
        &self.shared.mount
    }

    fn view(&self) -> View {
        super::render::view(&self.shared)
    }

    fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    fn destroy(&self) {
        self.shared.destroyed.store(true, Ordering::SeqCst);
        self.shared.mount.clear();
    }
}

pub(super) fn tab_id(container: &str, index: usize) -> String {
    format!("{container}-tab-{index}")
}

pub(super) fn panel_id(container: &str, index: usize) -> String {
    format!("{container}-panel-{index}")
}

/// Closest enabled tab to `from`, looking right before left at equal
/// distance.
fn nearest_enabled(tabs: &[TabDescriptor], from: usize) -> Option<usize> {
    (1..tabs.len()).find_map(|distance| {
        let right = from + distance;
        if tabs.get(right).is_some_and(|t| !t.disabled) {
            return Some(right);
        }
        from.checked_sub(distance)
            .filter(|&left| !tabs[left].disabled)
    })
}
