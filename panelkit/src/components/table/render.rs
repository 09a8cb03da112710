//! DataTable rendering.

use std::sync::Arc;

use paneldom::{Element, EventKind, Listeners, Tag, View};

use super::state::{DataTable, row_id};

pub(super) fn view(table: &DataTable) -> View {
    let shared = &table.shared;
    let (rows, sort, selected) = match shared.inner.read() {
        Ok(inner) => {
            let ids = inner.row_ids();
            (
                inner.rows.clone(),
                inner.sort.clone(),
                inner.selection.selected_in(&ids),
            )
        }
        Err(_) => return View::default(),
    };
    let ids: Vec<String> = rows.iter().enumerate().map(|(i, r)| row_id(r, i)).collect();
    let all_selected = !ids.is_empty() && selected.len() == ids.len();
    let mut listeners = Listeners::new();

    // Header
    let mut header_row = Element::new(Tag::TableRow).role("row");
    if shared.selectable {
        let id = table.select_all_id();
        let weak = Arc::downgrade(shared);
        listeners.on(&id, EventKind::Check, move |event| {
            if let (Some(table), Some(checked)) = (DataTable::from_weak(&weak), event.is_checked()) {
                table.set_all_selected(checked);
            }
        });
        header_row = header_row.child(
            Element::new(Tag::HeaderCell).attr("scope", "col").child(
                Element::checkbox(all_selected)
                    .id(id)
                    .aria("label", "Selecionar todos"),
            ),
        );
    }

    for column in &shared.columns {
        let mut th = Element::new(Tag::HeaderCell)
            .attr("scope", "col")
            .child(Element::text(&column.label));

        if shared.sortable && column.sortable {
            let id = table.header_id(&column.field);
            let active = sort.as_ref().filter(|s| s.field == column.field);
            let icon = match active.map(|s| s.direction.as_str()) {
                Some("asc") => "▲",
                Some(_) => "▼",
                None => "",
            };

            let weak = Arc::downgrade(shared);
            let field = column.field.clone();
            listeners.on(&id, EventKind::Click, move |_| {
                if let Some(table) = DataTable::from_weak(&weak) {
                    table.sort_by(&field);
                }
            });
            let weak = Arc::downgrade(shared);
            let field = column.field.clone();
            listeners.on(&id, EventKind::Key, move |event| {
                if event.key_code().is_some_and(|k| k.is_activation())
                    && let Some(table) = DataTable::from_weak(&weak)
                {
                    table.sort_by(&field);
                }
            });

            th = th
                .id(id)
                .class("sortable")
                .data("sort", &column.field)
                .role("button")
                .attr("tabindex", "0")
                .aria("sort", active.map(|s| s.direction.aria()).unwrap_or("none"))
                .focusable(true)
                .clickable(true)
                .child(
                    Element::span()
                        .class("sort-icon")
                        .aria("hidden", "true")
                        .child(Element::text(icon)),
                );
        }
        header_row = header_row.child(th);
    }

    if !shared.actions.is_empty() {
        header_row = header_row.child(
            Element::new(Tag::HeaderCell)
                .attr("scope", "col")
                .class("text-end")
                .child(Element::text("Ações")),
        );
    }

    // Body
    let mut body = Element::new(Tag::TableBody);
    if rows.is_empty() {
        let colspan = shared.columns.len()
            + usize::from(shared.selectable)
            + usize::from(!shared.actions.is_empty());
        body = body.child(
            Element::new(Tag::TableRow).child(
                Element::new(Tag::Cell)
                    .attr("colspan", colspan.to_string())
                    .class("text-center py-5")
                    .child(
                        Element::div()
                            .class("empty-state")
                            .child(
                                Element::div()
                                    .class("empty-state-icon")
                                    .aria("hidden", "true")
                                    .child(Element::text("📋")),
                            )
                            .child(
                                Element::div()
                                    .class("empty-state-title")
                                    .child(Element::text(&shared.empty_message)),
                            ),
                    ),
            ),
        );
    }

    for (row, id) in rows.iter().zip(&ids) {
        let is_selected = selected.contains(id);
        let mut tr = Element::new(Tag::TableRow)
            .role("row")
            .data("row-id", id)
            .class_if(is_selected, "selected");

        if shared.selectable {
            let checkbox_id = table.row_checkbox_id(id);
            let weak = Arc::downgrade(shared);
            let row_key = id.clone();
            listeners.on(&checkbox_id, EventKind::Check, move |event| {
                if let (Some(table), Some(checked)) = (DataTable::from_weak(&weak), event.is_checked())
                {
                    table.set_row_selected(&row_key, checked);
                }
            });
            tr = tr.child(
                Element::new(Tag::Cell).child(
                    Element::checkbox(is_selected)
                        .id(checkbox_id)
                        .data("select-row", id)
                        .aria("label", "Selecionar linha"),
                ),
            );
        }

        for column in &shared.columns {
            tr = tr.child(column.cell(row));
        }

        if !shared.actions.is_empty() {
            let mut cell = Element::new(Tag::Cell).class("table-actions-cell");
            for action in &shared.actions {
                let button_id = table.action_id(&action.name, id);
                let weak = Arc::downgrade(shared);
                let (name, row_key) = (action.name.clone(), id.clone());
                listeners.on(&button_id, EventKind::Click, move |_| {
                    if let Some(table) = DataTable::from_weak(&weak) {
                        table.trigger_action(&name, &row_key);
                    }
                });

                let icon = action.icon.as_ref().map(|icon| {
                    Element::span().aria("hidden", "true").child(Element::text(icon))
                });
                let label = action.show_label.then(|| Element::text(&action.label));
                let mut button = Element::new(Tag::Button)
                    .id(button_id)
                    .class("action-button")
                    .attr("type", "button")
                    .data("action", &action.name)
                    .data("row-id", id)
                    .aria("label", &action.label)
                    .focusable(true)
                    .clickable(true)
                    .child_opt(icon)
                    .child_opt(label);
                if let Some(variant) = &action.variant {
                    button = button.class(variant);
                }
                cell = cell.child(button);
            }
            tr = tr.child(cell);
        }

        body = body.child(tr);
    }

    let root = Element::div()
        .id(shared.mount.id())
        .class("data-table-wrapper")
        .child(
            Element::div().class("table-responsive").child(
                Element::new(Tag::Table)
                    .class("table")
                    .role("table")
                    .child(Element::new(Tag::TableHead).child(header_row))
                    .child(body),
            ),
        );

    View::new(root, listeners)
}
