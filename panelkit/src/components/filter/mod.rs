//! FilterPanel component - a collapsible grid of filter inputs.

mod render;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use paneldom::{Document, Mount, View};
use serde::{Deserialize, Serialize};

use crate::component::{Component, resolve_mount};
use crate::error::ComponentError;

/// Filter values keyed by input name.
pub type FilterValues = BTreeMap<String, String>;

pub type ApplyHook = Arc<dyn Fn(&FilterValues) + Send + Sync>;
pub type ResetHook = Arc<dyn Fn() + Send + Sync>;

/// Input type of a filter. Unknown types fall back to text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Number,
    Date,
    /// Two date inputs, `<name>_start` and `<name>_end`.
    DateRange,
    Select,
    #[default]
    #[serde(other)]
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One filter input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: FilterKind,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FilterDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Names of the inputs this filter renders.
    pub fn input_names(&self) -> Vec<String> {
        match self.kind {
            FilterKind::DateRange => vec![format!("{}_start", self.name), format!("{}_end", self.name)],
            _ => vec![self.name.clone()],
        }
    }
}

#[derive(Clone, Default)]
pub struct FilterPanelConfig {
    pub container: String,
    pub filters: Vec<FilterDescriptor>,
    pub on_apply: Option<ApplyHook>,
    pub on_reset: Option<ResetHook>,
}

impl FilterPanelConfig {
    pub fn new(container: impl Into<String>, filters: Vec<FilterDescriptor>) -> Self {
        Self {
            container: container.into(),
            filters,
            ..Default::default()
        }
    }

    pub fn on_apply(mut self, hook: impl Fn(&FilterValues) + Send + Sync + 'static) -> Self {
        self.on_apply = Some(Arc::new(hook));
        self
    }

    pub fn on_reset(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_reset = Some(Arc::new(hook));
        self
    }
}

#[derive(Debug, Default)]
pub(super) struct FilterInner {
    /// Every input name, empty string when unset.
    pub values: FilterValues,
    pub collapsed: bool,
}

pub(super) struct FilterShared {
    mount: Mount,
    filters: Vec<FilterDescriptor>,
    on_apply: Option<ApplyHook>,
    on_reset: Option<ResetHook>,
    inner: RwLock<FilterInner>,
    destroyed: AtomicBool,
}

/// Filter inputs with apply/reset actions.
#[derive(Clone)]
pub struct FilterPanel {
    shared: Arc<FilterShared>,
}

impl FilterPanel {
    pub fn new(document: &Document, config: FilterPanelConfig) -> Result<Self, ComponentError> {
        let mount = resolve_mount(document, &config.container, "filter panel")?;

        let mut values = FilterValues::new();
        for filter in &config.filters {
            for name in filter.input_names() {
                if values.insert(name.clone(), String::new()).is_some() {
                    return Err(ComponentError::invalid(
                        "filter panel",
                        format!("duplicate input name '{name}'"),
                    ));
                }
            }
        }

        let panel = Self {
            shared: Arc::new(FilterShared {
                mount,
                filters: config.filters,
                on_apply: config.on_apply,
                on_reset: config.on_reset,
                inner: RwLock::new(FilterInner {
                    values,
                    collapsed: false,
                }),
                destroyed: AtomicBool::new(false),
            }),
        };
        panel.render();
        Ok(panel)
    }

    fn from_weak(weak: &Weak<FilterShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Every non-empty input value.
    pub fn get_values(&self) -> FilterValues {
        self.shared
            .inner
            .read()
            .map(|g| {
                g.values
                    .iter()
                    .filter(|(_, v)| !v.is_empty())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Set known inputs. Unknown names are ignored; select values outside
    /// the option list clear the select.
    pub fn set_values(&self, values: &FilterValues) {
        if self.is_destroyed() {
            return;
        }
        if let Ok(mut inner) = self.shared.inner.write() {
            for (name, value) in values {
                if !inner.values.contains_key(name) {
                    log::debug!("filter panel: ignoring unknown input '{name}'");
                    continue;
                }
                let value = if self.accepts(name, value) {
                    value.clone()
                } else {
                    log::warn!("filter panel: '{value}' is not an option of '{name}'");
                    String::new()
                };
                inner.values.insert(name.clone(), value);
            }
        }
        self.render();
    }

    /// Set a single input (what typing into it does).
    pub fn set_value(&self, name: &str, value: &str) {
        self.set_values(&FilterValues::from([(name.to_string(), value.to_string())]));
    }

    /// Clear every input and fire `on_reset`.
    pub fn reset(&self) {
        if self.is_destroyed() {
            return;
        }
        if let Ok(mut inner) = self.shared.inner.write() {
            inner.values.values_mut().for_each(String::clear);
        }
        self.render();
        if let Some(hook) = &self.shared.on_reset {
            hook();
        }
    }

    /// Fire `on_apply` with the current values.
    pub fn apply(&self) {
        if self.is_destroyed() {
            return;
        }
        let values = self.get_values();
        log::debug!("filter panel '{}': apply {values:?}", self.shared.mount.id());
        if let Some(hook) = &self.shared.on_apply {
            hook(&values);
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.shared.inner.read().map(|g| g.collapsed).unwrap_or(false)
    }

    pub fn toggle_collapsed(&self) {
        if self.is_destroyed() {
            return;
        }
        if let Ok(mut inner) = self.shared.inner.write() {
            inner.collapsed = !inner.collapsed;
        }
        self.render();
    }

    /// Element id of the input named `name`.
    pub fn input_id(&self, name: &str) -> String {
        input_id(self.shared.mount.id(), name)
    }

    pub fn apply_id(&self) -> String {
        format!("{}-apply", self.shared.mount.id())
    }

    pub fn reset_id(&self) -> String {
        format!("{}-reset", self.shared.mount.id())
    }

    pub fn toggle_id(&self) -> String {
        format!("{}-toggle", self.shared.mount.id())
    }

    fn accepts(&self, name: &str, value: &str) -> bool {
        match self.shared.filters.iter().find(|f| f.name == name) {
            Some(filter) if filter.kind == FilterKind::Select => {
                value.is_empty() || filter.options.iter().any(|o| o.value == value)
            }
            _ => true,
        }
    }
}

impl Component for FilterPanel {
    fn mount(&self) -> &Mount {
        &self.shared.mount
    }

    fn view(&self) -> View {
        render::view(self)
    }

    fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    fn destroy(&self) {
        self.shared.destroyed.store(true, Ordering::SeqCst);
        self.shared.mount.clear();
    }
}

fn input_id(container: &str, name: &str) -> String {
    format!("{container}-filter-{name}")
}
