//! Tabs component - a tab strip with one active panel.

mod render;
mod state;

pub use state::{TabChangeHook, TabDescriptor, Tabs, TabsConfig, TabsVariant};
