//! DataTable state and mutators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use paneldom::{Document, Mount, View};
use serde_json::{Map, Value};

use super::column::{Column, RowAction};
use super::sort::{SortDirection, compare_values};
use crate::component::{Component, resolve_mount};
use crate::components::selection::Selection;
use crate::error::ComponentError;

/// A table record.
pub type Row = Map<String, Value>;

/// Called with `(field, direction)` when sorting is delegated.
pub type SortHook = Arc<dyn Fn(&str, SortDirection) + Send + Sync>;

/// Called with every selected row id after a selection change.
pub type SelectHook = Arc<dyn Fn(&[String]) + Send + Sync>;

pub const DEFAULT_EMPTY_MESSAGE: &str = "Nenhum registro encontrado";

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

/// Identity of a row: its `id` field, else its position.
pub fn row_id(row: &Row, index: usize) -> String {
    match row.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => index.to_string(),
    }
}

#[derive(Clone)]
pub struct DataTableConfig {
    pub container: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    /// Show row checkboxes.
    pub selectable: bool,
    /// Allow header sorting at all.
    pub sortable: bool,
    pub actions: Vec<RowAction>,
    pub empty_message: String,
    /// When set, sorting is delegated and rows are not reordered.
    pub on_sort: Option<SortHook>,
    pub on_select: Option<SelectHook>,
}

impl DataTableConfig {
    pub fn new(container: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            container: container.into(),
            columns,
            rows: Vec::new(),
            selectable: false,
            sortable: true,
            actions: Vec::new(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            on_sort: None,
            on_select: None,
        }
    }

    pub fn rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn action(mut self, action: RowAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn on_sort(mut self, hook: impl Fn(&str, SortDirection) + Send + Sync + 'static) -> Self {
        self.on_sort = Some(Arc::new(hook));
        self
    }

    pub fn on_select(mut self, hook: impl Fn(&[String]) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(hook));
        self
    }
}

#[derive(Debug, Default)]
pub(super) struct TableInner {
    pub rows: Vec<Row>,
    pub sort: Option<SortState>,
    /// Always a subset of the current row ids.
    pub selection: Selection,
}

impl TableInner {
    pub fn row_ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| row_id(row, index))
            .collect()
    }
}

pub(super) struct TableShared {
    pub mount: Mount,
    pub columns: Vec<Column>,
    pub selectable: bool,
    pub sortable: bool,
    pub actions: Vec<RowAction>,
    pub empty_message: String,
    pub on_sort: Option<SortHook>,
    pub on_select: Option<SelectHook>,
    pub inner: RwLock<TableInner>,
    pub destroyed: AtomicBool,
}

/// A record table with optional header sorting, row selection and per-row
/// action buttons.
#[derive(Clone)]
pub struct DataTable {
    pub(super) shared: Arc<TableShared>,
}

impl DataTable {
    pub fn new(document: &Document, config: DataTableConfig) -> Result<Self, ComponentError> {
        let mount = resolve_mount(document, &config.container, "data table")?;
        if config.columns.is_empty() {
            log::warn!("data table '{}' has no columns", config.container);
        }

        let table = Self {
            shared: Arc::new(TableShared {
                mount,
                columns: config.columns,
                selectable: config.selectable,
                sortable: config.sortable,
                actions: config.actions,
                empty_message: config.empty_message,
                on_sort: config.on_sort,
                on_select: config.on_select,
                inner: RwLock::new(TableInner {
                    rows: config.rows,
                    ..Default::default()
                }),
                destroyed: AtomicBool::new(false),
            }),
        };
        table.render();
        Ok(table)
    }

    pub(super) fn from_weak(weak: &Weak<TableShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Rows in display order.
    pub fn rows(&self) -> Vec<Row> {
        self.shared
            .inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.shared
            .inner
            .read()
            .map(|g| g.row_ids())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.shared.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the rows, keeping their order. Selected ids that no longer
    /// exist are dropped (and `on_select` fires if that changed anything).
    pub fn update(&self, rows: Vec<Row>) {
        if self.is_destroyed() {
            return;
        }
        let pruned = {
            let Ok(mut inner) = self.shared.inner.write() else {
                return;
            };
            inner.rows = rows;
            let ids = inner.row_ids();
            inner
                .selection
                .retain(&ids)
                .then(|| inner.selection.selected_in(&ids))
        };

        self.render();
        if let Some(selected) = pruned {
            self.notify_select(&selected);
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort_state(&self) -> Option<SortState> {
        self.shared.inner.read().ok().and_then(|g| g.sort.clone())
    }

    /// Header activation: toggle direction on the active column, otherwise
    /// sort ascending by `field`.
    ///
    /// Rows are reordered in place with a stable sort unless an `on_sort`
    /// hook takes over. Returns false for unknown or non-sortable columns.
    pub fn sort_by(&self, field: &str) -> bool {
        if self.is_destroyed() || !self.shared.sortable {
            return false;
        }
        let Some(column) = self.shared.columns.iter().find(|c| c.field == field) else {
            return false;
        };
        if !column.sortable {
            return false;
        }

        let direction = {
            let Ok(mut inner) = self.shared.inner.write() else {
                return false;
            };
            let direction = match &inner.sort {
                Some(sort) if sort.field == field => sort.direction.toggled(),
                _ => SortDirection::Asc,
            };
            inner.sort = Some(SortState {
                field: field.to_string(),
                direction,
            });

            if self.shared.on_sort.is_none() {
                let kind = column.kind;
                inner.rows.sort_by(|a, b| {
                    let ordering = compare_values(kind, a.get(field), b.get(field));
                    match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                });
            }
            direction
        };

        log::debug!(
            "data table '{}': sort {field} {}",
            self.shared.mount.id(),
            direction.as_str()
        );
        self.render();
        if let Some(hook) = &self.shared.on_sort {
            hook(field, direction);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Selected row ids in display order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.shared
            .inner
            .read()
            .map(|g| g.selection.selected_in(&g.row_ids()))
            .unwrap_or_default()
    }

    /// Select or deselect every rendered row.
    pub fn set_all_selected(&self, selected: bool) {
        self.change_selection(|selection, ids| {
            if selected {
                selection.select_all(ids);
            } else {
                selection.deselect_all(ids);
            }
        });
    }

    /// Select or deselect one row. Unknown ids are ignored.
    pub fn set_row_selected(&self, id: &str, selected: bool) {
        self.change_selection(|selection, ids| {
            if ids.iter().any(|known| known == id) {
                selection.set(id, selected);
            }
        });
    }

    pub fn clear_selection(&self) {
        self.change_selection(|selection, _| {
            selection.clear();
        });
    }

    fn change_selection(&self, change: impl FnOnce(&mut Selection, &[String])) {
        if self.is_destroyed() || !self.shared.selectable {
            return;
        }
        let selected = {
            let Ok(mut inner) = self.shared.inner.write() else {
                return;
            };
            let ids = inner.row_ids();
            change(&mut inner.selection, &ids);
            inner.selection.selected_in(&ids)
        };

        self.render();
        self.notify_select(&selected);
    }

    fn notify_select(&self, selected: &[String]) {
        if let Some(hook) = &self.shared.on_select {
            hook(selected);
        }
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Run a row action as if its button was clicked.
    /// Returns false for unknown actions.
    pub fn trigger_action(&self, name: &str, id: &str) -> bool {
        let Some(action) = self.shared.actions.iter().find(|a| a.name == name) else {
            log::warn!("data table '{}': unknown action '{name}'", self.shared.mount.id());
            return false;
        };
        let row = self.shared.inner.read().ok().and_then(|g| {
            g.rows
                .iter()
                .enumerate()
                .find(|(index, row)| row_id(row, *index) == id)
                .map(|(_, row)| row.clone())
        });
        (action.handler)(row.as_ref(), id);
        true
    }

    // -------------------------------------------------------------------------
    // Element ids
    // -------------------------------------------------------------------------

    pub fn header_id(&self, field: &str) -> String {
        format!("{}-sort-{field}", self.shared.mount.id())
    }

    pub fn select_all_id(&self) -> String {
        format!("{}-select-all", self.shared.mount.id())
    }

    pub fn row_checkbox_id(&self, row_id: &str) -> String {
        format!("{}-select-{row_id}", self.shared.mount.id())
    }

    pub fn action_id(&self, name: &str, row_id: &str) -> String {
        format!("{}-action-{name}-{row_id}", self.shared.mount.id())
    }
}

impl Component for DataTable {
    fn mount(&self) -> &Mount {
        &self.shared.mount
    }

    fn view(&self) -> View {
        super::render::view(self)
    }

    fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    fn destroy(&self) {
        self.shared.destroyed.store(true, Ordering::SeqCst);
        self.shared.mount.clear();
    }
}
