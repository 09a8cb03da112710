//! DataTable component - sortable, selectable record table.
//!
//! Rows are JSON objects; columns pick a field and a display type.
//!
//! # Example
//!
//! ```ignore
//! use panelkit::prelude::*;
//!
//! let columns = vec![
//!     Column::new("nome", "Nome"),
//!     Column::new("valor", "Valor").kind(ColumnType::Currency),
//!     Column::new("status", "Status").kind(ColumnType::Status).sortable(false),
//! ];
//! let table = DataTable::new(&document, DataTableConfig::new("clientes", columns).rows(rows))?;
//! ```

mod column;
mod render;
mod sort;
mod state;

pub use column::{Alignment, CellRenderer, Column, ColumnType, RowAction, status_info};
pub use sort::{SortDirection, compare_text, compare_values};
pub use state::{DataTable, DataTableConfig, Row, SortState, row_id};
