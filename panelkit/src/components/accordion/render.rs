use std::sync::Arc;

use paneldom::{Element, EventKind, Listeners, Tag, View};

use super::{Accordion, AccordionShared, header_id, panel_id};

pub(super) fn view(shared: &Arc<AccordionShared>) -> View {
    let open = match shared.open.read() {
        Ok(open) => open.clone(),
        Err(_) => return View::default(),
    };
    let container = shared.mount.id();
    let mut listeners = Listeners::new();

    let sections = shared.items.iter().enumerate().map(|(index, item)| {
        let is_open = open.contains(&index);
        let header = header_id(container, index);
        let panel = panel_id(container, index);

        let weak = Arc::downgrade(shared);
        listeners.on(&header, EventKind::Click, move |_| {
            if let Some(accordion) = Accordion::from_weak(&weak) {
                accordion.toggle(index);
            }
        });
        let weak = Arc::downgrade(shared);
        listeners.on(&header, EventKind::Key, move |event| {
            if event.key_code().is_some_and(|k| k.is_activation())
                && let Some(accordion) = Accordion::from_weak(&weak)
            {
                accordion.toggle(index);
            }
        });

        let badge = item
            .badge
            .as_ref()
            .map(|badge| Element::span().class("accordion-badge").child(Element::text(badge)));

        Element::div()
            .class("accordion-item")
            .class_if(is_open, "open")
            .child(
                Element::new(Tag::Button)
                    .id(&header)
                    .class("accordion-header")
                    .attr("type", "button")
                    .aria("expanded", is_open.to_string())
                    .aria("controls", &panel)
                    .data("index", index.to_string())
                    .focusable(true)
                    .clickable(true)
                    .child(
                        Element::span()
                            .class("accordion-icon")
                            .aria("hidden", "true")
                            .child(Element::text(if is_open { "▼" } else { "▶" })),
                    )
                    .child(Element::span().class("accordion-title").child(Element::text(&item.title)))
                    .child_opt(badge),
            )
            .child(
                Element::div()
                    .id(&panel)
                    .class("accordion-panel")
                    .class_if(is_open, "open")
                    .role("region")
                    .aria("labelledby", &header)
                    .hidden(!is_open)
                    .child(Element::div().class("accordion-content").child(if is_open {
                        item.content.build()
                    } else {
                        Element::div()
                    })),
            )
    });
    let sections: Vec<Element> = sections.collect();

    let root = Element::div()
        .id(container)
        .class("accordion")
        .children(sections);
    View::new(root, listeners)
}
