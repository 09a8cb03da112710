//! Toast feed - transient status messages in a shared overlay.
//!
//! The feed is an explicit service: construct one [`ToastFeed`] per
//! document and hand clones to the components that report status.
//!
//! ```ignore
//! let toasts = ToastFeed::new(&document, ToastFeedConfig::default())?;
//! toasts.success("Cliente salvo");
//! toasts.show("Sincronizando...", ToastOptions::default().sticky());
//! ```

mod feed;
mod render;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use feed::{ToastFeed, ToastFeedConfig};

/// Default time a toast stays on screen.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Default number of toasts displayed at once.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Unique toast identifier: creation time in microseconds plus a random
/// tiebreaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId {
    micros: i64,
    tiebreak: u32,
}

impl ToastId {
    pub(crate) fn generate() -> Self {
        Self {
            micros: chrono::Utc::now().timestamp_micros(),
            tiebreak: rand::random(),
        }
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.micros, self.tiebreak)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Danger,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Danger => "✗",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

/// Screen corner the overlay stacks toasts in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopLeft,
    TopCenter,
    BottomRight,
    BottomLeft,
    BottomCenter,
}

impl ToastPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
        }
    }
}

/// Button shown inside a toast. Clicking it runs the handler and then
/// dismisses the toast.
#[derive(Clone)]
pub struct ToastAction {
    pub label: String,
    pub handler: Arc<dyn Fn() + Send + Sync>,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            handler: Arc::new(handler),
        }
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct ToastOptions {
    pub severity: Severity,
    /// Zero keeps the toast until it is dismissed.
    pub duration: Duration,
    pub closable: bool,
    pub action: Option<ToastAction>,
    /// Replaces the severity icon.
    pub icon: Option<String>,
    pub position: ToastPosition,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            severity: Severity::Info,
            duration: DEFAULT_TOAST_DURATION,
            closable: true,
            action: None,
            icon: None,
            position: ToastPosition::TopRight,
        }
    }
}

impl ToastOptions {
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Never auto-dismiss.
    pub fn sticky(self) -> Self {
        self.duration(Duration::ZERO)
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }
}

/// A queued toast.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub options: ToastOptions,
}

impl Toast {
    pub fn severity(&self) -> Severity {
        self.options.severity
    }

    /// Custom icon if set, else the severity icon.
    pub fn icon(&self) -> &str {
        self.options
            .icon
            .as_deref()
            .unwrap_or_else(|| self.options.severity.icon())
    }
}
