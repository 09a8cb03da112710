pub mod config;
pub mod demo;
pub mod error;
pub mod notifications;
pub mod paths;
pub mod settings;
pub mod theme;

pub use config::PanelConfig;
pub use error::{ApiError, ConfigError};
