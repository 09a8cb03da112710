//! Failures of the API client and of config loading.

use std::path::PathBuf;

/// Errors from calls to the panel's backend API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        /// Body text, or the reason phrase when the body is empty.
        message: String,
    },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// No bearer token configured; nothing was sent.
    #[error("no API token configured")]
    Unauthenticated,

    #[error("cannot build endpoint URL: {0}")]
    InvalidUrl(String),

    /// The body was not the JSON shape we expected.
    #[error("unexpected response body: {message}")]
    Parse {
        message: String,
        /// Raw body for logging.
        body: Option<String>,
    },
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Status of an [`ApiError::Http`].
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors while loading the panel configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}
