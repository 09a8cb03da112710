//! Column and row action definitions, and cell formatting.

use std::fmt;
use std::sync::Arc;

use paneldom::Element;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::Row;
use crate::format::{format_currency, format_date, parse_date_time, parse_leading_float};

/// Custom cell renderer, called with the raw field value and the row.
pub type CellRenderer = Arc<dyn Fn(&Value, &Row) -> Element + Send + Sync>;

/// Display type of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Currency,
    Date,
    Status,
}

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    fn class(&self) -> Option<&'static str> {
        match self {
            Self::Left => None,
            Self::Center => Some("text-center"),
            Self::Right => Some("text-end"),
        }
    }
}

/// Column configuration.
///
/// ```ignore
/// let columns = vec![
///     Column::new("id", "ID"),
///     Column::new("total", "Total").kind(ColumnType::Currency),
///     Column::new("obs", "Observação").sortable(false),
/// ];
/// ```
#[derive(Clone)]
pub struct Column {
    /// Row field shown in this column.
    pub field: String,
    /// Header text.
    pub label: String,
    pub kind: ColumnType,
    /// Whether clicking the header sorts (also requires a sortable table).
    pub sortable: bool,
    pub align: Alignment,
    pub render: Option<CellRenderer>,
}

impl Column {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            kind: ColumnType::Text,
            sortable: true,
            align: Alignment::Left,
            render: None,
        }
    }

    /// Set the display type. Number and currency columns align right.
    pub fn kind(mut self, kind: ColumnType) -> Self {
        self.kind = kind;
        if matches!(kind, ColumnType::Number | ColumnType::Currency) {
            self.align = Alignment::Right;
        }
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn render(mut self, render: impl Fn(&Value, &Row) -> Element + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Build the `<td>` for this column of `row`.
    ///
    /// Resolution order: custom renderer, missing/null (`-`), then
    /// formatting by column type.
    pub fn cell(&self, row: &Row) -> Element {
        let value = row.get(&self.field).unwrap_or(&Value::Null);

        let content = if let Some(render) = &self.render {
            render(value, row)
        } else if value.is_null() {
            Element::text("-")
        } else {
            match self.kind {
                ColumnType::Date => Element::text(display_date(value)),
                ColumnType::Currency => Element::text(display_currency(value)),
                ColumnType::Status => status_badge(&value_text(value)),
                ColumnType::Text | ColumnType::Number => Element::text(value_text(value)),
            }
        };

        let mut cell = Element::new(paneldom::Tag::Cell).child(content);
        if let Some(class) = self.align.class() {
            cell = cell.class(class);
        }
        cell
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .field("align", &self.align)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Plain text of a JSON value (strings unquoted, null empty).
pub(super) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn display_date(value: &Value) -> String {
    let text = value_text(value);
    match parse_date_time(&text) {
        Some(date) => format_date(date.date_naive()),
        None => text,
    }
}

fn display_currency(value: &Value) -> String {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    };
    match amount {
        Some(amount) => format_currency(amount),
        None => value_text(value),
    }
}

/// Label and severity class for a status code. Unknown codes are shown
/// as-is with the `secondary` class.
pub fn status_info(status: &str) -> (&str, &'static str) {
    match status {
        "active" => ("Ativo", "success"),
        "inactive" => ("Inativo", "danger"),
        "pending" => ("Pendente", "warning"),
        "open" => ("Aberto", "primary"),
        "closed" => ("Fechado", "secondary"),
        "completed" => ("Concluído", "success"),
        other => (other, "secondary"),
    }
}

fn status_badge(status: &str) -> Element {
    let (label, class) = status_info(status);
    Element::span()
        .class("status-indicator")
        .class(class)
        .child(Element::span().class("status-dot").aria("hidden", "true"))
        .child(Element::text(label))
}

/// Handler for a row action, called with the row (if found) and its id.
pub type ActionHandler = Arc<dyn Fn(Option<&Row>, &str) + Send + Sync>;

/// Button rendered in every row's actions cell.
#[derive(Clone)]
pub struct RowAction {
    pub name: String,
    pub label: String,
    pub icon: Option<String>,
    /// Extra class, e.g. `danger`.
    pub variant: Option<String>,
    pub show_label: bool,
    pub handler: ActionHandler,
}

impl RowAction {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        handler: impl Fn(Option<&Row>, &str) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            icon: None,
            variant: None,
            show_label: true,
            handler: Arc::new(handler),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }
}

impl fmt::Debug for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("name", &self.name)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
