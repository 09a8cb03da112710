//! Confirmation modal.
//!
//! One [`ConfirmDialog`] per document, shared like the toast feed. Asking
//! opens the overlay and returns a future that resolves to the answer:
//!
//! ```ignore
//! let answer = dialog.ask("Excluir o cliente?");
//! if answer.await {
//!     remove_client();
//! }
//! ```
//!
//! The question is registered synchronously, so the future can be awaited
//! from any task. A dialog closed without an answer (superseded by a new
//! question, or destroyed) resolves to `false`.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use paneldom::{Document, Element, EventKind, Key, Listeners, Mount, Tag, View};
use tokio::sync::oneshot;

use crate::component::Component;

#[derive(Debug, Clone)]
pub struct ConfirmConfig {
    /// Id of the overlay mount the dialog creates.
    pub container: String,
    pub title: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            container: "confirm-modal".to_string(),
            title: "Confirmação".to_string(),
            confirm_label: "Confirmar".to_string(),
            cancel_label: "Cancelar".to_string(),
        }
    }
}

impl ConfirmConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }
}

struct Question {
    message: String,
    reply: oneshot::Sender<bool>,
}

struct ConfirmShared {
    mount: Mount,
    config: ConfirmConfig,
    pending: RwLock<Option<Question>>,
    destroyed: AtomicBool,
}

/// Modal yes/no question over the page.
#[derive(Clone)]
pub struct ConfirmDialog {
    shared: Arc<ConfirmShared>,
}

impl ConfirmDialog {
    /// Create the overlay mount, closed.
    pub fn new(document: &Document, config: ConfirmConfig) -> Self {
        let mount = document.create_mount(&config.container);
        let dialog = Self {
            shared: Arc::new(ConfirmShared {
                mount,
                config,
                pending: RwLock::new(None),
                destroyed: AtomicBool::new(false),
            }),
        };
        dialog.render();
        dialog
    }

    fn from_weak(weak: &Weak<ConfirmShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Open the dialog with `message`.
    ///
    /// A question still open is answered `false` first.
    pub fn ask(&self, message: impl Into<String>) -> impl Future<Output = bool> + Send + 'static {
        let (reply, answer) = oneshot::channel();
        let question = Question {
            message: message.into(),
            reply,
        };

        if !self.is_destroyed() {
            let previous = match self.shared.pending.write() {
                Ok(mut pending) => pending.replace(question),
                Err(_) => None,
            };
            if let Some(previous) = previous {
                log::debug!("confirm: '{}' superseded", previous.message);
                let _ = previous.reply.send(false);
            }
            self.render();
        }

        async move { answer.await.unwrap_or(false) }
    }

    /// Close the dialog with `confirmed`. False when nothing was asked.
    pub fn answer(&self, confirmed: bool) -> bool {
        let question = match self.shared.pending.write() {
            Ok(mut pending) => pending.take(),
            Err(_) => None,
        };
        let Some(question) = question else {
            return false;
        };

        self.render();
        log::debug!("confirm: '{}' -> {confirmed}", question.message);
        let _ = question.reply.send(confirmed);
        true
    }

    pub fn is_open(&self) -> bool {
        self.shared.pending.read().is_ok_and(|p| p.is_some())
    }

    /// Message of the open question.
    pub fn message(&self) -> Option<String> {
        self.shared
            .pending
            .read()
            .ok()
            .and_then(|p| p.as_ref().map(|q| q.message.clone()))
    }

    pub fn confirm_id(&self) -> String {
        format!("{}-confirm", self.shared.mount.id())
    }

    pub fn cancel_id(&self) -> String {
        format!("{}-cancel", self.shared.mount.id())
    }
}

impl Component for ConfirmDialog {
    fn mount(&self) -> &Mount {
        &self.shared.mount
    }

    fn view(&self) -> View {
        let container = self.shared.mount.id();
        let Some(message) = self.message() else {
            let root = Element::div().id(container).class("modal-overlay").hidden(true);
            return View::new(root, Listeners::new());
        };
        let config = &self.shared.config;
        let mut listeners = Listeners::new();

        for (button_id, confirmed) in [(self.confirm_id(), true), (self.cancel_id(), false)] {
            let weak = Arc::downgrade(&self.shared);
            listeners.on(&button_id, EventKind::Click, move |_| {
                if let Some(dialog) = ConfirmDialog::from_weak(&weak) {
                    dialog.answer(confirmed);
                }
            });
        }
        let weak = Arc::downgrade(&self.shared);
        listeners.on(container, EventKind::Key, move |event| {
            if event.key_code() == Some(Key::Escape)
                && let Some(dialog) = ConfirmDialog::from_weak(&weak)
            {
                dialog.answer(false);
            }
        });

        let title_id = format!("{container}-title");
        let modal = Element::div()
            .class("modal")
            .role("dialog")
            .aria("modal", "true")
            .aria("labelledby", &title_id)
            .child(
                Element::div().class("modal-header").child(
                    Element::new(Tag::Heading(3))
                        .id(&title_id)
                        .class("modal-title")
                        .child(Element::text(&config.title)),
                ),
            )
            .child(
                Element::div()
                    .class("modal-body")
                    .child(Element::new(Tag::Paragraph).child(Element::text(message))),
            )
            .child(
                Element::div()
                    .class("modal-footer")
                    .child(
                        Element::button(&config.cancel_label)
                            .id(self.cancel_id())
                            .class("btn")
                            .class("btn-secondary")
                            .data("action", "cancel"),
                    )
                    .child(
                        Element::button(&config.confirm_label)
                            .id(self.confirm_id())
                            .class("btn")
                            .class("btn-primary")
                            .data("action", "confirm"),
                    ),
            );

        let root = Element::div()
            .id(container)
            .class("modal-overlay")
            .class("active")
            .child(modal);
        View::new(root, listeners)
    }

    fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    fn destroy(&self) {
        self.shared.destroyed.store(true, Ordering::SeqCst);
        if let Ok(mut pending) = self.shared.pending.write() {
            // Dropping the sender resolves the waiting future to `false`.
            pending.take();
        }
        self.shared.mount.clear();
    }
}
