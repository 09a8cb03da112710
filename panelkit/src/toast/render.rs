use std::sync::Arc;

use paneldom::{Element, EventKind, Listeners, View};

use super::feed::{FeedShared, ToastFeed, visible_slice};

pub(super) fn view(shared: &Arc<FeedShared>) -> View {
    let visible = match shared.inner.read() {
        Ok(inner) => visible_slice(&inner.queue, shared.max_visible).to_vec(),
        Err(_) => return View::default(),
    };
    let mut listeners = Listeners::new();

    let toasts: Vec<Element> = visible
        .iter()
        .map(|toast| {
            let id = toast.id;
            let base = format!("toast-{id}");

            let action = toast.options.action.as_ref().map(|action| {
                let button_id = format!("{base}-action");
                let weak = Arc::downgrade(shared);
                listeners.on(&button_id, EventKind::Click, move |_| {
                    if let Some(feed) = ToastFeed::from_weak(&weak) {
                        feed.activate(id);
                    }
                });
                Element::button(&action.label).id(button_id).class("toast-action")
            });

            let close = toast.options.closable.then(|| {
                let button_id = format!("{base}-close");
                let weak = Arc::downgrade(shared);
                listeners.on(&button_id, EventKind::Click, move |_| {
                    if let Some(feed) = ToastFeed::from_weak(&weak) {
                        feed.hide(id);
                    }
                });
                Element::button("✕")
                    .id(button_id)
                    .class("toast-close")
                    .aria("label", "Fechar")
            });

            Element::div()
                .id(&base)
                .class("toast")
                .class(format!("toast-{}", toast.severity().as_str()))
                .class(format!("toast-{}", toast.options.position.as_str()))
                .role("alert")
                .data("toast-id", id.to_string())
                .child(
                    Element::div()
                        .class("toast-content")
                        .child(
                            Element::span()
                                .class("toast-icon")
                                .aria("hidden", "true")
                                .child(Element::text(toast.icon())),
                        )
                        .child(
                            Element::span()
                                .class("toast-message")
                                .child(Element::text(&toast.message)),
                        ),
                )
                .child(
                    Element::div()
                        .class("toast-actions")
                        .child_opt(action)
                        .child_opt(close),
                )
        })
        .collect();

    let root = Element::div()
        .id(shared.mount.id())
        .class("toast-container")
        .aria("live", "polite")
        .aria("atomic", "true")
        .children(toasts);
    View::new(root, listeners)
}
