//! Accordion component - collapsible content sections.

mod render;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use paneldom::{Document, Mount, View};

use crate::component::{Component, PanelContent, resolve_mount};
use crate::error::ComponentError;

/// Called with `(index, is_now_open)` after a toggle.
pub type AccordionHook = Arc<dyn Fn(usize, bool) + Send + Sync>;

/// One collapsible section.
#[derive(Debug, Clone, Default)]
pub struct AccordionItem {
    pub title: String,
    pub badge: Option<String>,
    pub content: PanelContent,
}

impl AccordionItem {
    pub fn new(title: impl Into<String>, content: impl Into<PanelContent>) -> Self {
        Self {
            title: title.into(),
            badge: None,
            content: content.into(),
        }
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }
}

#[derive(Clone)]
pub struct AccordionConfig {
    pub container: String,
    pub items: Vec<AccordionItem>,
    /// More than one section may be open at once.
    pub allow_multiple: bool,
    pub default_open: Vec<usize>,
    pub on_change: Option<AccordionHook>,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            container: String::new(),
            items: Vec::new(),
            allow_multiple: true,
            default_open: Vec::new(),
            on_change: None,
        }
    }
}

impl AccordionConfig {
    pub fn new(container: impl Into<String>, items: Vec<AccordionItem>) -> Self {
        Self {
            container: container.into(),
            items,
            ..Default::default()
        }
    }

    pub fn allow_multiple(mut self, allow: bool) -> Self {
        self.allow_multiple = allow;
        self
    }

    pub fn default_open(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.default_open = indices.into_iter().collect();
        self
    }

    pub fn on_change(mut self, hook: impl Fn(usize, bool) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(hook));
        self
    }
}

pub(super) struct AccordionShared {
    mount: Mount,
    items: Vec<AccordionItem>,
    allow_multiple: bool,
    on_change: Option<AccordionHook>,
    open: RwLock<BTreeSet<usize>>,
    destroyed: AtomicBool,
}

/// Collapsible sections. With `allow_multiple == false` at most one
/// section is open at any time.
#[derive(Clone)]
pub struct Accordion {
    shared: Arc<AccordionShared>,
}

impl Accordion {
    pub fn new(document: &Document, config: AccordionConfig) -> Result<Self, ComponentError> {
        let mount = resolve_mount(document, &config.container, "accordion")?;

        let mut open = BTreeSet::new();
        for index in config.default_open {
            if index >= config.items.len() {
                log::warn!("accordion '{}': ignoring default_open {index}", config.container);
                continue;
            }
            if !config.allow_multiple && !open.is_empty() {
                log::warn!(
                    "accordion '{}': single-open, ignoring extra default_open {index}",
                    config.container
                );
                break;
            }
            open.insert(index);
        }

        let accordion = Self {
            shared: Arc::new(AccordionShared {
                mount,
                items: config.items,
                allow_multiple: config.allow_multiple,
                on_change: config.on_change,
                open: RwLock::new(open),
                destroyed: AtomicBool::new(false),
            }),
        };
        accordion.render();
        Ok(accordion)
    }

    fn from_weak(weak: &Weak<AccordionShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    pub fn len(&self) -> usize {
        self.shared.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.items.is_empty()
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.shared
            .open
            .read()
            .map(|g| g.contains(&index))
            .unwrap_or(false)
    }

    /// Open section indices, ascending.
    pub fn open_items(&self) -> Vec<usize> {
        self.shared
            .open
            .read()
            .map(|g| g.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Element id of a section header.
    pub fn header_id(&self, index: usize) -> String {
        header_id(self.shared.mount.id(), index)
    }

    /// Open or close a section, then fire `on_change` once.
    ///
    /// In single-open mode opening a section closes every other one.
    pub fn toggle(&self, index: usize) -> bool {
        if self.is_destroyed() || index >= self.len() {
            return false;
        }
        let now_open = {
            let Ok(mut open) = self.shared.open.write() else {
                return false;
            };
            if open.remove(&index) {
                false
            } else {
                if !self.shared.allow_multiple {
                    open.clear();
                }
                open.insert(index);
                true
            }
        };

        self.render();
        if let Some(hook) = &self.shared.on_change {
            hook(index, now_open);
        }
        true
    }

    /// Open a section without firing `on_change`.
    pub fn open(&self, index: usize) {
        if index >= self.len() {
            return;
        }
        self.apply(|open, single| {
            if single {
                open.clear();
            }
            open.insert(index);
        });
    }

    /// Close a section without firing `on_change`.
    pub fn close(&self, index: usize) {
        self.apply(|open, _| {
            open.remove(&index);
        });
    }

    /// Open every section (only the first in single-open mode).
    pub fn open_all(&self) {
        let len = self.len();
        self.apply(|open, single| {
            if single {
                open.clear();
                if len > 0 {
                    open.insert(0);
                }
            } else {
                open.extend(0..len);
            }
        });
    }

    pub fn close_all(&self) {
        self.apply(|open, _| open.clear());
    }

    fn apply(&self, change: impl FnOnce(&mut BTreeSet<usize>, bool)) {
        if self.is_destroyed() {
            return;
        }
        if let Ok(mut open) = self.shared.open.write() {
            change(&mut open, !self.shared.allow_multiple);
        }
        self.render();
    }
}

impl Component for Accordion {
    fn mount(&self) -> &Mount {
        &self.shared.mount
    }

    fn view(&self) -> View {
        render::view(&self.shared)
    }

    fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    fn destroy(&self) {
        self.shared.destroyed.store(true, Ordering::SeqCst);
        self.shared.mount.clear();
    }
}

fn header_id(container: &str, index: usize) -> String {
    format!("{container}-header-{index}")
}

fn panel_id(container: &str, index: usize) -> String {
    format!("{container}-panel-{index}")
}
