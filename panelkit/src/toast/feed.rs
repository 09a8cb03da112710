use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use paneldom::{Document, Mount, View};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::{DEFAULT_MAX_VISIBLE, Severity, Toast, ToastId, ToastOptions};
use crate::component::Component;
use crate::error::ComponentError;

#[derive(Debug, Clone)]
pub struct ToastFeedConfig {
    /// Id of the overlay mount the feed creates.
    pub container: String,
    /// How many of the newest toasts are displayed.
    pub max_visible: usize,
}

impl Default for ToastFeedConfig {
    fn default() -> Self {
        Self {
            container: "toast-container".to_string(),
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

impl ToastFeedConfig {
    pub fn max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible;
        self
    }
}

#[derive(Default)]
pub(super) struct FeedInner {
    /// Oldest first.
    pub queue: Vec<Toast>,
    timers: HashMap<ToastId, JoinHandle<()>>,
}

pub(super) struct FeedShared {
    pub mount: Mount,
    pub max_visible: usize,
    pub inner: RwLock<FeedInner>,
    destroyed: AtomicBool,
}

/// Shared toast overlay.
///
/// Only the newest `max_visible` toasts are rendered; older ones stay
/// queued and are promoted as newer ones are dismissed. Clones share the
/// same feed.
#[derive(Clone)]
pub struct ToastFeed {
    pub(super) shared: Arc<FeedShared>,
}

impl ToastFeed {
    /// Create the overlay mount and render the empty feed.
    pub fn new(document: &Document, config: ToastFeedConfig) -> Result<Self, ComponentError> {
        if config.max_visible == 0 {
            return Err(ComponentError::invalid("toast", "max_visible must be at least 1"));
        }
        let mount = document.create_mount(&config.container);

        let feed = Self {
            shared: Arc::new(FeedShared {
                mount,
                max_visible: config.max_visible,
                inner: RwLock::new(FeedInner::default()),
                destroyed: AtomicBool::new(false),
            }),
        };
        feed.render();
        Ok(feed)
    }

    pub(super) fn from_weak(weak: &Weak<FeedShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Queue a toast and schedule its dismissal.
    pub fn show(&self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        let message = message.into();
        let duration = options.duration;
        if self.is_destroyed() {
            log::debug!("toast feed destroyed, dropping: {message}");
            return ToastId::generate();
        }

        let id = {
            let Ok(mut inner) = self.shared.inner.write() else {
                return ToastId::generate();
            };
            let mut id = ToastId::generate();
            while inner.queue.iter().any(|t| t.id == id) {
                id = ToastId::generate();
            }
            log::debug!("toast {id} [{}]: {message}", options.severity.as_str());
            inner.queue.push(Toast {
                id,
                message,
                options,
            });

            if !duration.is_zero() {
                match Handle::try_current() {
                    Ok(handle) => {
                        let weak = Arc::downgrade(&self.shared);
                        let timer = handle.spawn(async move {
                            tokio::time::sleep(duration).await;
                            if let Some(feed) = ToastFeed::from_weak(&weak) {
                                feed.hide(id);
                            }
                        });
                        inner.timers.insert(id, timer);
                    }
                    Err(_) => log::warn!("no async runtime, toast {id} will not auto-dismiss"),
                }
            }
            id
        };

        self.render();
        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastOptions::default().severity(Severity::Success))
    }

    /// Show a `danger` toast.
    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastOptions::default().severity(Severity::Danger))
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastOptions::default().severity(Severity::Warning))
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastOptions::default().severity(Severity::Info))
    }

    /// Remove a toast, cancelling its timer. Returns false for unknown ids.
    pub fn hide(&self, id: ToastId) -> bool {
        let removed = {
            let Ok(mut inner) = self.shared.inner.write() else {
                return false;
            };
            if let Some(timer) = inner.timers.remove(&id) {
                timer.abort();
            }
            let before = inner.queue.len();
            inner.queue.retain(|t| t.id != id);
            inner.queue.len() != before
        };

        if removed {
            self.render();
        }
        removed
    }

    /// Remove every toast.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.shared.inner.write() {
            for (_, timer) in inner.timers.drain() {
                timer.abort();
            }
            inner.queue.clear();
        }
        self.render();
    }

    /// All queued toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.shared
            .inner
            .read()
            .map(|g| g.queue.clone())
            .unwrap_or_default()
    }

    /// Ids of the displayed toasts, oldest first.
    pub fn visible(&self) -> Vec<ToastId> {
        self.shared
            .inner
            .read()
            .map(|g| visible_slice(&g.queue, self.shared.max_visible).iter().map(|t| t.id).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.shared.inner.read().map(|g| g.queue.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run a toast's action, then dismiss it.
    pub(super) fn activate(&self, id: ToastId) {
        let action = self.shared.inner.read().ok().and_then(|g| {
            g.queue
                .iter()
                .find(|t| t.id == id)
                .and_then(|t| t.options.action.clone())
        });
        if let Some(action) = action {
            (action.handler)();
        }
        self.hide(id);
    }
}

impl Component for ToastFeed {
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
        if let Ok(mut inner) = self.shared.inner.write() {
            for (_, timer) in inner.timers.drain() {
                timer.abort();
            }
            inner.queue.clear();
        }
        self.shared.mount.clear();
    }
}

/// The newest `max` toasts.
pub(super) fn visible_slice(queue: &[Toast], max: usize) -> &[Toast] {
    &queue[queue.len().saturating_sub(max)..]
}
