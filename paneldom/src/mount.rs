//! Mount points and the document that owns them.
//!
//! A [`Mount`] is the root a single component owns. Rendering produces a
//! [`View`] (tree + listener table) that replaces the previous one
//! wholesale; nothing is patched in place.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::element::{find_element, Content, Element};
use crate::event::Event;
use crate::focus::FocusState;
use crate::listeners::Listeners;

/// Output of a component render: the new tree and its listeners.
#[derive(Debug, Default)]
pub struct View {
    pub root: Element,
    pub listeners: Listeners,
}

impl View {
    pub fn new(root: Element, listeners: Listeners) -> Self {
        Self { root, listeners }
    }
}

#[derive(Debug, Default)]
struct MountInner {
    tree: Option<Element>,
    listeners: Listeners,
    focus: FocusState,
    /// Number of completed swaps.
    generation: u64,
}

/// Handle to a mount point. Clones share the same mount.
#[derive(Debug, Clone)]
pub struct Mount {
    id: String,
    inner: Arc<RwLock<MountInner>>,
}

impl Mount {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inner: Arc::new(RwLock::new(MountInner::default())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Swap in a freshly rendered view. The previous tree and every
    /// listener registered with it are dropped.
    pub fn replace(&self, view: View) {
        if let Ok(mut guard) = self.inner.write() {
            guard.focus.retain_in(&view.root);
            guard.tree = Some(view.root);
            guard.listeners = view.listeners;
            guard.generation += 1;
        }
    }

    /// Detach the current tree and all listeners.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.tree = None;
            guard.listeners.clear();
            guard.focus.blur();
        }
    }

    /// Whether a tree is currently attached.
    pub fn is_attached(&self) -> bool {
        self.inner.read().map(|g| g.tree.is_some()).unwrap_or(false)
    }

    /// Snapshot of the current tree.
    pub fn tree(&self) -> Option<Element> {
        self.inner.read().ok().and_then(|g| g.tree.clone())
    }

    /// Run `f` against the current tree without cloning it.
    pub fn with_tree<R>(&self, f: impl FnOnce(&Element) -> R) -> Option<R> {
        let guard = self.inner.read().ok()?;
        guard.tree.as_ref().map(f)
    }

    /// Find an element by id in the current tree.
    pub fn find(&self, id: &str) -> Option<Element> {
        self.with_tree(|root| find_element(root, id).cloned()).flatten()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.read().map(|g| g.listeners.len()).unwrap_or(0)
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().map(|g| g.generation).unwrap_or(0)
    }

    /// Move focus to an element of this mount.
    pub fn focus(&self, id: &str) -> bool {
        self.inner
            .write()
            .map(|mut g| g.focus.focus(id))
            .unwrap_or(false)
    }

    pub fn focused(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.focus.focused().map(String::from))
    }

    /// Serialize the current tree (empty string when detached).
    pub fn to_html(&self) -> String {
        self.with_tree(crate::html::to_html).unwrap_or_default()
    }

    /// Deliver an event.
    ///
    /// The listener is looked up on the target first, then on each
    /// ancestor (bubbling). Disabled targets swallow the event. The lock is
    /// released before the listener runs, so listeners may re-render this
    /// mount. Returns true if a listener ran.
    pub fn dispatch(&self, event: &Event) -> bool {
        let listener = {
            let Ok(mut guard) = self.inner.write() else {
                return false;
            };
            let Some(tree) = guard.tree.as_ref() else {
                log::trace!("mount '{}' detached, dropping {:?}", self.id, event.kind());
                return false;
            };
            let Some(path) = path_to(tree, event.target()) else {
                log::debug!(
                    "mount '{}': no element '{}' for {:?}",
                    self.id,
                    event.target(),
                    event.kind()
                );
                return false;
            };
            if path.last().is_some_and(|(_, disabled)| *disabled) {
                return false;
            }
            let found = path
                .iter()
                .rev()
                .filter(|(id, _)| !id.is_empty())
                .find_map(|(id, _)| guard.listeners.get(id, event.kind()));
            if let Event::Focus { target } = event {
                guard.focus.focus(target);
            } else if let Event::Blur { target } = event
                && guard.focus.focused() == Some(target.as_str())
            {
                guard.focus.blur();
            }
            found
        };

        match listener {
            Some(listener) => {
                listener(event);
                true
            }
            None => false,
        }
    }
}

/// Chain of `(id, disabled)` from `root` down to the element with `id`.
fn path_to(root: &Element, id: &str) -> Option<Vec<(String, bool)>> {
    fn walk<'a>(el: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
        path.push(el);
        if !el.id.is_empty() && el.id == id {
            return true;
        }
        if let Content::Children(children) = &el.content {
            for child in children {
                if walk(child, id, path) {
                    return true;
                }
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then(|| {
        path.into_iter()
            .map(|el| (el.id.clone(), el.disabled))
            .collect()
    })
}

/// Registry of mount points, keyed by id.
///
/// Components resolve their configured mount target here and fail fast
/// when it does not exist.
#[derive(Debug, Default, Clone)]
pub struct Document {
    mounts: Arc<RwLock<BTreeMap<String, Mount>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mount point, or return the existing one with this id.
    pub fn create_mount(&self, id: impl Into<String>) -> Mount {
        let id = id.into();
        let Ok(mut mounts) = self.mounts.write() else {
            return Mount::new(id);
        };
        mounts
            .entry(id.clone())
            .or_insert_with(|| {
                log::debug!("created mount '{id}'");
                Mount::new(id.clone())
            })
            .clone()
    }

    /// Look up a mount point by id.
    pub fn mount(&self, id: &str) -> Option<Mount> {
        self.mounts.read().ok()?.get(id).cloned()
    }

    /// Remove a mount point, clearing its content.
    pub fn remove(&self, id: &str) -> Option<Mount> {
        let mount = self.mounts.write().ok()?.remove(id)?;
        mount.clear();
        Some(mount)
    }

    pub fn ids(&self) -> Vec<String> {
        self.mounts
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Deliver an event to whichever mount contains the target.
    pub fn dispatch(&self, event: &Event) -> bool {
        let mounts: Vec<Mount> = match self.mounts.read() {
            Ok(m) => m.values().cloned().collect(),
            Err(_) => return false,
        };
        mounts
            .iter()
            .find(|m| m.find(event.target()).is_some())
            .is_some_and(|m| m.dispatch(event))
    }
}
