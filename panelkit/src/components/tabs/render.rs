//! Tabs rendering.

use std::sync::Arc;

use paneldom::{Element, EventKind, Listeners, Tag, View};

use super::state::{Tabs, TabsShared, panel_id, tab_id};

pub(super) fn view(shared: &Arc<TabsShared>) -> View {
    let (tabs, active) = match shared.inner.read() {
        Ok(inner) => (inner.tabs.clone(), inner.active),
        Err(_) => return View::default(),
    };
    let container = shared.mount.id();
    let mut listeners = Listeners::new();

    let mut nav = Element::div().class("tabs-nav").role("tablist");
    let mut panels = Element::div().class("tabs-content");

    for (index, tab) in tabs.iter().enumerate() {
        let is_active = active == Some(index);
        let button_id = tab_id(container, index);
        let content_id = panel_id(container, index);

        let icon = tab
            .icon
            .as_ref()
            .map(|icon| Element::span().class("tab-icon").child(Element::text(icon)));
        let badge = tab
            .badge
            .as_ref()
            .map(|badge| Element::span().class("tab-badge").child(Element::text(badge)));

        nav = nav.child(
            Element::new(Tag::Button)
                .id(&button_id)
                .class("tab-button")
                .class_if(is_active, "active")
                .attr("type", "button")
                .role("tab")
                .aria("selected", is_active.to_string())
                .aria("controls", &content_id)
                .attr("tabindex", if is_active { "0" } else { "-1" })
                .data("index", index.to_string())
                .focusable(!tab.disabled)
                .clickable(!tab.disabled)
                .disabled(tab.disabled)
                .child_opt(icon)
                .child(Element::span().class("tab-label").child(Element::text(&tab.label)))
                .child_opt(badge),
        );

        // Only the visible panel's content is built.
        let body = if is_active {
            tab.content.build()
        } else {
            Element::div()
        };
        panels = panels.child(
            Element::div()
                .id(&content_id)
                .class("tab-panel")
                .class_if(is_active, "active")
                .role("tabpanel")
                .aria("labelledby", &button_id)
                .hidden(!is_active)
                .child(body),
        );

        let weak = Arc::downgrade(shared);
        listeners.on(&button_id, EventKind::Click, move |_| {
            if let Some(tabs) = Tabs::from_weak(&weak) {
                tabs.set_active_tab(index);
            }
        });
        let weak = Arc::downgrade(shared);
        listeners.on(&button_id, EventKind::Key, move |event| {
            if let (Some(tabs), Some(key)) = (Tabs::from_weak(&weak), event.key_code()) {
                tabs.handle_key(index, key);
            }
        });
    }

    let root = Element::div()
        .id(container)
        .class("tabs-container")
        .class(format!("tabs-{}", shared.variant.as_str()))
        .child(nav)
        .child(panels);

    View::new(root, listeners)
}
