use chrono::{DateTime, Utc};
use panelkit::format::{parse_date_time, relative_time};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    #[default]
    #[serde(other)]
    Info,
}

impl NotificationKind {
    /// Color class of the item's marker.
    pub fn color_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "danger",
            Self::Info => "info",
        }
    }
}

/// A notification as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub link: Option<String>,
    pub created_at: String,
}

impl Notification {
    /// Link to follow when opened, if it is a real one.
    pub fn target(&self) -> Option<&str> {
        self.link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty() && *link != "null")
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_date_time(&self.created_at)
    }

    /// "agora", "5 min atrás", ... relative to `now`. Empty when the
    /// timestamp does not parse.
    pub fn age(&self, now: DateTime<Utc>) -> String {
        self.created()
            .map(|created| relative_time(created, now))
            .unwrap_or_default()
    }
}

/// Body of the unread-count endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UnreadCount {
    pub count: u64,
}

/// Badge text for an unread count: hidden at zero, capped at `99+`.
pub fn badge_text(count: u64) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text() {
        assert_eq!(badge_text(0), None);
        assert_eq!(badge_text(7).as_deref(), Some("7"));
        assert_eq!(badge_text(99).as_deref(), Some("99"));
        assert_eq!(badge_text(100).as_deref(), Some("99+"));
    }

    #[test]
    fn test_decode_backend_payload() {
        let json = r#"[
            {"id": 3, "title": "Fatura vencida", "message": "Cliente 42", "type": "error",
             "read": false, "link": "/invoices/9", "created_at": "2024-05-01T10:00:00"},
            {"id": 4, "title": "Backup", "message": "", "type": "maintenance",
             "read": true, "link": null, "created_at": "2024-05-01 09:00:00"}
        ]"#;
        let items: Vec<Notification> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].kind, NotificationKind::Error);
        assert_eq!(items[0].target(), Some("/invoices/9"));
        assert_eq!(items[1].kind, NotificationKind::Info);
        assert_eq!(items[1].target(), None);
    }
}
