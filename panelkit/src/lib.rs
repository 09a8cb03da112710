pub mod component;
pub mod components;
pub mod confirm;
pub mod debounce;
pub mod error;
pub mod format;
pub mod toast;
pub mod validation;

pub use component::{Component, PanelContent};
pub use error::ComponentError;

pub mod prelude {
    pub use crate::component::{Component, PanelContent};
    pub use crate::components::{
        Accordion, AccordionConfig, AccordionItem, Column, ColumnType, DataTable,
        DataTableConfig, FileUpload, FileUploadConfig, FilterDescriptor, FilterKind,
        FilterPanel, FilterPanelConfig, PageTarget, Pagination, PaginationConfig,
        PaginationUpdate, Row, RowAction, SelectOption, SelectedFile, SortDirection,
        TabDescriptor, Tabs, TabsConfig, TabsVariant, UploadStatus,
    };
    pub use crate::confirm::{ConfirmConfig, ConfirmDialog};
    pub use crate::error::ComponentError;
    pub use crate::toast::{Severity, ToastFeed, ToastFeedConfig, ToastId, ToastOptions};
    pub use crate::validation::{FieldRules, FormValidator, ValidationResult};

    pub use paneldom::{Document, Element, Event, Key, Mount};
}
