//! Component error types

use thiserror::Error;

/// Configuration or programmer errors raised while building a component.
///
/// These never crash the page: the caller logs them and the affected
/// component simply does not render.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// The configured mount target does not exist in the document.
    #[error("mount target '{0}' not found")]
    MountNotFound(String),

    /// A configuration value is out of its accepted range.
    #[error("invalid {component} configuration: {message}")]
    InvalidConfig {
        /// Component kind (e.g. "pagination").
        component: &'static str,
        /// What was wrong.
        message: String,
    },
}

impl ComponentError {
    pub fn invalid(component: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            component,
            message: message.into(),
        }
    }
}
