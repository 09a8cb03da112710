//! Base contract shared by every component.
//!
//! A component owns one [`Mount`]. It derives a [`View`] from its state,
//! swaps it into the mount wholesale and, for mutators, invokes the
//! configured callback only after the swap:
//!
//! ```text
//! mutator ──► validate ──► apply state ──► render() ──► callback
//! ```
//!
//! Listener closures capture a `Weak` to the component's shared state, so
//! the mount never keeps a component alive and `destroy()` fully releases
//! it.

use std::sync::Arc;

use paneldom::{Document, Element, Mount, View};

use crate::error::ComponentError;

pub trait Component {
    /// Mount point owned by this component.
    fn mount(&self) -> &Mount;

    /// Build the view tree and listener table for the current state.
    fn view(&self) -> View;

    /// Whether `destroy()` has been called.
    fn is_destroyed(&self) -> bool {
        false
    }

    /// Rebuild the view from state and swap it into the mount.
    ///
    /// Idempotent; a destroyed component never re-attaches.
    fn render(&self) {
        if self.is_destroyed() {
            log::debug!("skipping render of destroyed component '{}'", self.mount().id());
            return;
        }
        self.mount().replace(self.view());
    }

    /// Release timers and listeners and detach from the mount.
    fn destroy(&self) {
        self.mount().clear();
    }
}

/// Resolve the configured mount target, failing fast when it is missing.
pub fn resolve_mount(
    document: &Document,
    container: &str,
    component: &'static str,
) -> Result<Mount, ComponentError> {
    document.mount(container).ok_or_else(|| {
        log::error!("{component}: mount target '{container}' not found");
        ComponentError::MountNotFound(container.to_string())
    })
}

/// Body of a tab panel or accordion section.
#[derive(Clone)]
pub enum PanelContent {
    Static(Element),
    /// Built each time its panel renders visible.
    Lazy(Arc<dyn Fn() -> Element + Send + Sync>),
}

impl PanelContent {
    pub fn lazy(build: impl Fn() -> Element + Send + Sync + 'static) -> Self {
        Self::Lazy(Arc::new(build))
    }

    pub fn build(&self) -> Element {
        match self {
            Self::Static(element) => element.clone(),
            Self::Lazy(build) => build(),
        }
    }
}

impl Default for PanelContent {
    fn default() -> Self {
        Self::Static(Element::div())
    }
}

impl From<Element> for PanelContent {
    fn from(element: Element) -> Self {
        Self::Static(element)
    }
}

impl From<&str> for PanelContent {
    fn from(text: &str) -> Self {
        Self::Static(Element::text(text))
    }
}

impl From<String> for PanelContent {
    fn from(text: String) -> Self {
        Self::Static(Element::text(text))
    }
}

impl std::fmt::Debug for PanelContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(element) => f.debug_tuple("Static").field(element).finish(),
            Self::Lazy(_) => write!(f, "Lazy(..)"),
        }
    }
}
