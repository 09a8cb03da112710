//! Page components with self-managed state.
//!
//! Each component lives in its own module with:
//! - `state.rs` - configuration, state and public mutators
//! - `render.rs` - view building and listener wiring
//! - `mod.rs` - public exports

pub mod accordion;
pub mod filter;
pub mod pagination;
pub mod selection;
pub mod table;
pub mod tabs;
pub mod upload;

pub use accordion::{Accordion, AccordionConfig, AccordionItem};
pub use filter::{FilterDescriptor, FilterKind, FilterPanel, FilterPanelConfig, SelectOption};
pub use pagination::{PageTarget, Pagination, PaginationConfig, PaginationUpdate};
pub use selection::Selection;
pub use table::{Column, ColumnType, DataTable, DataTableConfig, Row, RowAction, SortDirection};
pub use tabs::{TabDescriptor, Tabs, TabsConfig, TabsVariant};
pub use upload::{FileUpload, FileUploadConfig, SelectedFile, UploadStatus};
