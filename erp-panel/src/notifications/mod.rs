//! Notification center: unread badge, drop-down list and polling.

mod backend;
mod center;
mod http;
mod model;
mod poller;

pub use backend::NotificationBackend;
pub use center::{
    LOAD_FAILED, LOGIN_REQUIRED, ListState, NavigateHook, NotificationCenter,
    NotificationCenterConfig,
};
pub use http::HttpNotificationBackend;
pub use model::{Notification, NotificationKind, UnreadCount, badge_text};
pub use poller::Poller;
