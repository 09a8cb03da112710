use async_trait::async_trait;

use super::model::Notification;
use crate::error::ApiError;

/// Backend contract of the notification center.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Whether calls can be made at all (a token is configured).
    fn is_authenticated(&self) -> bool;

    async fn unread_count(&self) -> Result<u64, ApiError>;

    /// Most recent notifications, newest first.
    async fn list(&self, limit: usize) -> Result<Vec<Notification>, ApiError>;

    async fn mark_read(&self, id: i64) -> Result<(), ApiError>;

    async fn mark_all_read(&self) -> Result<(), ApiError>;
}
