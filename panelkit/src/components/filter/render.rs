use std::sync::Arc;

use paneldom::{Element, EventKind, InputType, Listeners, Tag, View};

use super::{FilterDescriptor, FilterKind, FilterPanel, input_id};

pub(super) fn view(panel: &FilterPanel) -> View {
    let shared = &panel.shared;
    let (values, collapsed) = match shared.inner.read() {
        Ok(inner) => (inner.values.clone(), inner.collapsed),
        Err(_) => return View::default(),
    };
    let container = shared.mount.id();
    let mut listeners = Listeners::new();

    // Wire an input so edits land in state.
    let mut bind = |id: &str, name: &str, kind: EventKind| {
        let weak = Arc::downgrade(shared);
        let name = name.to_string();
        listeners.on(id, kind, move |event| {
            if let (Some(panel), Some(value)) = (FilterPanel::from_weak(&weak), event.value()) {
                panel.set_value(&name, value);
            }
        });
    };

    let value_of = |name: &str| values.get(name).cloned().unwrap_or_default();

    let mut grid = Element::div().class("filter-grid");
    for filter in &shared.filters {
        let group = match filter.kind {
            FilterKind::DateRange => {
                let start = format!("{}_start", filter.name);
                let end = format!("{}_end", filter.name);
                let (start_id, end_id) = (input_id(container, &start), input_id(container, &end));
                bind(&start_id, &start, EventKind::Change);
                bind(&end_id, &end, EventKind::Change);

                Element::div()
                    .class("filter-group filter-group-daterange")
                    .child(Element::label(&filter.label).class("filter-label"))
                    .child(
                        Element::div()
                            .class("daterange-inputs")
                            .child(
                                date_input(&start_id, &start, value_of(&start))
                                    .placeholder("De")
                                    .aria("label", format!("{} início", filter.label)),
                            )
                            .child(Element::span().class("daterange-separator").child(Element::text("até")))
                            .child(
                                date_input(&end_id, &end, value_of(&end))
                                    .placeholder("Até")
                                    .aria("label", format!("{} fim", filter.label)),
                            ),
                    )
            }
            _ => {
                let id = input_id(container, &filter.name);
                let event = match filter.kind {
                    FilterKind::Text | FilterKind::Number => EventKind::Input,
                    _ => EventKind::Change,
                };
                bind(&id, &filter.name, event);

                Element::div()
                    .class("filter-group")
                    .child(
                        Element::label(&filter.label)
                            .class("filter-label")
                            .attr("for", &id),
                    )
                    .child(control(filter, &id, value_of(&filter.name)))
            }
        };
        grid = grid.child(group);
    }

    let mut button = |id: String, label: &str, class: &str, action: fn(&FilterPanel)| {
        let weak = Arc::downgrade(shared);
        listeners.on(&id, EventKind::Click, move |_| {
            if let Some(panel) = FilterPanel::from_weak(&weak) {
                action(&panel);
            }
        });
        Element::button(label).id(id).class(class)
    };

    let toggle = button(panel.toggle_id(), "", "btn btn-link btn-sm", FilterPanel::toggle_collapsed)
        .aria(
            "label",
            if collapsed { "Expandir filtros" } else { "Recolher filtros" },
        )
        .child(
            Element::span()
                .class("filter-toggle-icon")
                .child(Element::text(if collapsed { "▶" } else { "▼" })),
        );
    let reset = button(panel.reset_id(), "Limpar Filtros", "btn btn-secondary btn-sm", FilterPanel::reset);
    let apply = button(panel.apply_id(), "Aplicar Filtros", "btn btn-primary btn-sm", FilterPanel::apply);

    let root = Element::div()
        .id(container)
        .class("filter-panel")
        .child(
            Element::div()
                .class("filter-panel-header")
                .child(
                    Element::new(Tag::Heading(3))
                        .class("filter-panel-title")
                        .child(Element::text("Filtros")),
                )
                .child(toggle),
        )
        .child(
            Element::div()
                .class("filter-panel-body")
                .class_if(collapsed, "collapsed")
                .child(grid)
                .child(
                    Element::div()
                        .class("filter-panel-actions")
                        .child(reset)
                        .child(apply),
                ),
        );

    View::new(root, listeners)
}

fn date_input(id: &str, name: &str, value: String) -> Element {
    Element::input(InputType::Date)
        .id(id)
        .attr("name", name)
        .class("form-control form-control-sm")
        .value(value)
}

fn control(filter: &FilterDescriptor, id: &str, value: String) -> Element {
    match filter.kind {
        FilterKind::Select => {
            let options = filter.options.iter().map(|option| {
                Element::option(&option.value, &option.label).selected(option.value == value)
            });
            Element::select()
                .id(id)
                .attr("name", &filter.name)
                .class("form-select form-select-sm")
                .aria("label", &filter.label)
                .child(Element::option("", "Todos").selected(value.is_empty()))
                .children(options)
                .value(value)
        }
        FilterKind::Date => date_input(id, &filter.name, value).aria("label", &filter.label),
        FilterKind::Number | FilterKind::Text | FilterKind::DateRange => {
            let kind = if filter.kind == FilterKind::Number {
                InputType::Number
            } else {
                InputType::Text
            };
            Element::input(kind)
                .id(id)
                .attr("name", &filter.name)
                .class("form-control form-control-sm")
                .placeholder(filter.placeholder.clone().unwrap_or_default())
                .aria("label", &filter.label)
                .value(value)
        }
    }
}
