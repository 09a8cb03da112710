use std::sync::Arc;

use paneldom::{Element, EventKind, Listeners, View};

use super::{PageTarget, Pagination, PaginationShared, button_id, page_window};

pub(super) fn view(shared: &Arc<PaginationShared>) -> View {
    let Some(state) = shared.state.read().ok().map(|g| *g) else {
        return View::default();
    };
    let container = shared.mount.id();
    let total_pages = state.total_pages();
    let mut listeners = Listeners::new();

    let first_item = if state.total == 0 {
        0
    } else {
        (state.current_page - 1) * state.page_size + 1
    };
    let last_item = (state.current_page * state.page_size).min(state.total);

    let mut nav_button = |target: PageTarget, label: String, aria: String, disabled: bool| {
        let id = button_id(container, target);
        let weak = Arc::downgrade(shared);
        listeners.on(&id, EventKind::Click, move |_| {
            if let Some(pagination) = Pagination::from_weak(&weak) {
                pagination.go_to(target);
            }
        });
        Element::button(label)
            .id(id)
            .class("pagination-button")
            .aria("label", aria)
            .disabled(disabled)
    };

    let at_start = state.current_page == 1;
    let at_end = state.current_page == total_pages;
    let mut buttons = vec![
        nav_button(PageTarget::First, "⟪".into(), "Primeira página".into(), at_start),
        nav_button(PageTarget::Prev, "⟨".into(), "Página anterior".into(), at_start),
    ];
    for page in page_window(state.current_page, total_pages, shared.max_buttons) {
        let current = page == state.current_page;
        buttons.push(
            nav_button(PageTarget::Page(page), page.to_string(), format!("Página {page}"), false)
                .class_if(current, "active")
                .aria("current", if current { "page" } else { "false" })
                .data("page", page.to_string()),
        );
    }
    buttons.push(nav_button(PageTarget::Next, "⟩".into(), "Próxima página".into(), at_end));
    buttons.push(nav_button(PageTarget::Last, "⟫".into(), "Última página".into(), at_end));

    let size_id = format!("{container}-size");
    let weak = Arc::downgrade(shared);
    listeners.on(&size_id, EventKind::Change, move |event| {
        let size = event.value().and_then(|v| v.parse().ok());
        if let (Some(pagination), Some(size)) = (Pagination::from_weak(&weak), size) {
            pagination.set_page_size(size);
        }
    });
    let options = shared.page_sizes.iter().map(|size| {
        Element::option(size.to_string(), size.to_string()).selected(*size == state.page_size)
    });

    let root = Element::div()
        .id(container)
        .class("pagination-container")
        .child(
            Element::div().class("pagination-info").child(Element::text(format!(
                "Mostrando {first_item} a {last_item} de {} registros",
                state.total
            ))),
        )
        .child(Element::div().class("pagination").children(buttons))
        .child(
            Element::div()
                .class("pagination-size")
                .child(
                    Element::label("Por página:")
                        .class("pagination-size-label")
                        .attr("for", &size_id),
                )
                .child(
                    Element::select()
                        .id(&size_id)
                        .class("form-select form-select-sm")
                        .aria("label", "Itens por página")
                        .value(state.page_size.to_string())
                        .children(options),
                ),
        );

    View::new(root, listeners)
}
