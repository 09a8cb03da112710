use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file picked or dropped by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// MIME type, empty when unknown.
    pub mime: String,
    /// Size in bytes.
    pub size: u64,
    pub contents: Arc<Vec<u8>>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
            contents: Arc::default(),
        }
    }

    /// A file with in-memory contents; the size is the content length.
    pub fn with_contents(name: impl Into<String>, mime: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size: contents.len() as u64,
            contents: Arc::new(contents),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    #[default]
    Pending,
    Uploading,
    Success,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploading => "uploading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Status text shown next to the file.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Aguardando",
            Self::Uploading => "Enviando...",
            Self::Success => "Concluído",
            Self::Error => "Erro",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// An admitted file and its upload state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub id: Uuid,
    pub file: SelectedFile,
    /// 0-100.
    pub progress: u8,
    pub status: UploadStatus,
    /// Failure message of the last upload attempt.
    pub error: Option<String>,
}

impl FileEntry {
    pub(super) fn pending(file: SelectedFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            file,
            progress: 0,
            status: UploadStatus::Pending,
            error: None,
        }
    }
}

/// Icon for a MIME type.
pub fn file_icon(mime: &str) -> &'static str {
    if mime.starts_with("image/") {
        "🖼️"
    } else if mime.starts_with("video/") {
        "🎥"
    } else if mime.starts_with("audio/") {
        "🎵"
    } else if mime.contains("word") {
        "📝"
    } else if mime.contains("excel") || mime.contains("spreadsheet") {
        "📊"
    } else if mime.contains("zip") || mime.contains("rar") {
        "📦"
    } else {
        "📄"
    }
}
