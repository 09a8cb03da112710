use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use erp_panel::ApiError;
use erp_panel::notifications::{
    LOAD_FAILED, LOGIN_REQUIRED, ListState, Notification, NotificationBackend,
    NotificationCenter, NotificationCenterConfig, NotificationKind, Poller,
};
use paneldom::{Document, Event};
use panelkit::{Component, ComponentError};

/// In-memory backend with scripted count responses.
#[derive(Default)]
struct FakeBackend {
    token: bool,
    items: Mutex<Vec<Notification>>,
    /// `(delay, count)` answers for the next count requests.
    counts: Mutex<VecDeque<(Duration, u64)>>,
    fail_list: AtomicBool,
    count_calls: AtomicUsize,
    last_limit: AtomicUsize,
    marked: Mutex<Vec<i64>>,
}

impl FakeBackend {
    fn authenticated(items: Vec<Notification>) -> Arc<Self> {
        Arc::new(Self {
            token: true,
            items: Mutex::new(items),
            ..Default::default()
        })
    }

    fn script_counts(&self, answers: impl IntoIterator<Item = (Duration, u64)>) {
        self.counts.lock().unwrap().extend(answers);
    }

    fn unread(&self) -> u64 {
        self.items.lock().unwrap().iter().filter(|n| !n.read).count() as u64
    }
}

#[async_trait]
impl NotificationBackend for FakeBackend {
    fn is_authenticated(&self) -> bool {
        self.token
    }

    async fn unread_count(&self) -> Result<u64, ApiError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.counts.lock().unwrap().pop_front();
        match scripted {
            Some((delay, count)) => {
                tokio::time::sleep(delay).await;
                Ok(count)
            }
            None => Ok(self.unread()),
        }
    }

    async fn list(&self, limit: usize) -> Result<Vec<Notification>, ApiError> {
        self.last_limit.store(limit, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::http(500, "Internal Server Error"));
        }
        Ok(self.items.lock().unwrap().iter().take(limit).cloned().collect())
    }

    async fn mark_read(&self, id: i64) -> Result<(), ApiError> {
        self.marked.lock().unwrap().push(id);
        for item in self.items.lock().unwrap().iter_mut().filter(|n| n.id == id) {
            item.read = true;
        }
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), ApiError> {
        for item in self.items.lock().unwrap().iter_mut() {
            item.read = true;
        }
        Ok(())
    }
}

fn notification(id: i64, title: &str, read: bool, link: Option<&str>) -> Notification {
    Notification {
        id,
        title: title.to_string(),
        message: format!("Detalhes de {title}"),
        kind: NotificationKind::Warning,
        read,
        link: link.map(String::from),
        created_at: "2024-03-01T10:00:00Z".to_string(),
    }
}

fn sample() -> Vec<Notification> {
    vec![
        notification(7, "Pedido atrasado", false, Some("/pedidos/7")),
        notification(8, "Estoque baixo", false, Some("null")),
        notification(9, "Backup concluído", true, None),
    ]
}

fn document() -> Document {
    let document = Document::new();
    document.create_mount("notification-button");
    document.create_mount("notifications-panel");
    document
}

fn center(document: &Document, backend: Arc<FakeBackend>) -> NotificationCenter {
    NotificationCenter::new(document, backend, NotificationCenterConfig::default()).unwrap()
}

fn badge_html(document: &Document) -> String {
    document.mount("notification-button").unwrap().to_html()
}

fn panel_html(document: &Document) -> String {
    document.mount("notifications-panel").unwrap().to_html()
}

async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_missing_mount_rejected() {
    let document = Document::new();
    document.create_mount("notification-button");
    let result = NotificationCenter::new(
        &document,
        FakeBackend::authenticated(Vec::new()),
        NotificationCenterConfig::default(),
    );
    assert!(matches!(result, Err(ComponentError::MountNotFound(id)) if id == "notifications-panel"));
}

#[test]
fn test_initial_render() {
    let document = document();
    let center = center(&document, FakeBackend::authenticated(Vec::new()));

    assert_eq!(center.unread_count(), 0);
    assert!(!center.is_open());
    assert_eq!(center.list_state(), ListState::Idle);
    assert!(badge_html(&document).contains(r#"<span class="notification-badge" hidden></span>"#));

    let panel = panel_html(&document);
    assert!(panel.contains("Notificações"));
    assert!(panel.contains("Marcar todas como lidas"));
    assert!(panel.contains(r#"href="/notifications""#));
    assert!(panel.contains(" hidden"));
}

// ============================================================================
// Unread count
// ============================================================================

#[tokio::test]
async fn test_badge_shows_count() {
    let document = document();
    let backend = FakeBackend::authenticated(Vec::new());
    backend.script_counts([(Duration::ZERO, 3), (Duration::ZERO, 150), (Duration::ZERO, 0)]);
    let center = center(&document, backend);

    assert_eq!(center.refresh_count().await, Some(3));
    assert!(badge_html(&document).contains(r#"<span class="notification-badge">3</span>"#));

    assert_eq!(center.refresh_count().await, Some(150));
    assert!(badge_html(&document).contains(">99+</span>"));

    assert_eq!(center.refresh_count().await, Some(0));
    assert!(badge_html(&document).contains(r#"class="notification-badge" hidden"#));
}

#[tokio::test(start_paused = true)]
async fn test_stale_count_discarded() {
    let document = document();
    let backend = FakeBackend::authenticated(Vec::new());
    backend.script_counts([(Duration::from_millis(500), 5), (Duration::ZERO, 7)]);
    let center = center(&document, backend.clone());

    let slow = tokio::spawn({
        let center = center.clone();
        async move { center.refresh_count().await }
    });
    settle().await;
    assert_eq!(backend.count_calls.load(Ordering::SeqCst), 1);

    assert_eq!(center.refresh_count().await, Some(7));
    assert_eq!(slow.await.unwrap(), None);
    assert_eq!(center.unread_count(), 7);
}

#[tokio::test]
async fn test_no_token_skips_requests() {
    let document = document();
    let backend = Arc::new(FakeBackend::default());
    let center = center(&document, backend.clone());

    assert!(!center.is_authenticated());
    assert_eq!(center.refresh_count().await, None);
    assert_eq!(backend.count_calls.load(Ordering::SeqCst), 0);

    assert!(center.toggle_panel().await);
    assert_eq!(center.list_state(), ListState::Failed(LOGIN_REQUIRED.to_string()));
    assert!(panel_html(&document).contains(LOGIN_REQUIRED));
    assert!(Poller::start(&center, Duration::from_secs(60)).is_none());
}

// ============================================================================
// Panel
// ============================================================================

#[tokio::test]
async fn test_open_panel_loads_list() {
    let document = document();
    let backend = FakeBackend::authenticated(sample());
    let center = NotificationCenter::new(
        &document,
        backend.clone(),
        NotificationCenterConfig::default().limit(2),
    )
    .unwrap();

    assert!(center.toggle_panel().await);
    assert_eq!(backend.last_limit.load(Ordering::SeqCst), 2);
    match center.list_state() {
        ListState::Loaded(items) => {
            assert_eq!(items.iter().map(|n| n.id).collect::<Vec<_>>(), vec![7, 8]);
        }
        other => panic!("unexpected list state {other:?}"),
    }
    // Loading the list refreshes the badge too.
    assert_eq!(center.unread_count(), 2);

    let panel = panel_html(&document);
    assert!(panel.contains(r#"class="notifications-panel active""#));
    assert!(panel.contains(r#"id="notifications-panel-item-7" class="notification-item unread""#));
    assert!(panel.contains("Pedido atrasado"));
    assert!(panel.contains(r#"class="notification-marker warning""#));

    assert!(!center.toggle_panel().await);
    assert!(!center.is_open());
}

#[tokio::test]
async fn test_empty_and_failed_list() {
    let document = document();
    let backend = FakeBackend::authenticated(Vec::new());
    let center = center(&document, backend.clone());

    center.load_list().await;
    assert_eq!(center.list_state(), ListState::Loaded(Vec::new()));
    assert!(panel_html(&document).contains("Nenhuma notificação"));

    backend.fail_list.store(true, Ordering::SeqCst);
    center.load_list().await;
    assert_eq!(center.list_state(), ListState::Failed(LOAD_FAILED.to_string()));
    assert!(panel_html(&document).contains(LOAD_FAILED));
}

#[tokio::test]
async fn test_mark_as_read_follows_link() {
    let document = document();
    let backend = FakeBackend::authenticated(sample());
    let visited = Arc::new(Mutex::new(Vec::new()));
    let log = visited.clone();
    let center = NotificationCenter::new(
        &document,
        backend.clone(),
        NotificationCenterConfig::default().on_navigate(move |link| {
            log.lock().unwrap().push(link.to_string());
        }),
    )
    .unwrap();
    center.load_list().await;

    assert_eq!(center.mark_as_read(7).await.as_deref(), Some("/pedidos/7"));
    assert_eq!(center.mark_as_read(8).await, None);
    assert_eq!(*backend.marked.lock().unwrap(), vec![7, 8]);
    assert_eq!(*visited.lock().unwrap(), vec!["/pedidos/7".to_string()]);
    assert_eq!(center.unread_count(), 0);
    assert!(panel_html(&document).contains(r#"id="notifications-panel-item-7" class="notification-item read""#));
}

#[tokio::test]
async fn test_mark_all_as_read() {
    let document = document();
    let backend = FakeBackend::authenticated(sample());
    let center = center(&document, backend.clone());
    center.load_list().await;
    assert_eq!(center.unread_count(), 2);

    center.mark_all_as_read().await;
    assert_eq!(center.unread_count(), 0);
    assert!(!panel_html(&document).contains("notification-item unread"));
}

#[tokio::test]
async fn test_clicks_dispatch_actions() {
    let document = document();
    let backend = FakeBackend::authenticated(sample());
    let center = center(&document, backend.clone());

    assert!(document.dispatch(&Event::click(center.button_id())));
    settle().await;
    assert!(center.is_open());
    assert!(matches!(center.list_state(), ListState::Loaded(_)));

    assert!(document.dispatch(&Event::click(center.item_id(7))));
    settle().await;
    assert_eq!(*backend.marked.lock().unwrap(), vec![7]);

    assert!(document.dispatch(&Event::click(center.read_all_id())));
    settle().await;
    assert_eq!(center.unread_count(), 0);

    center.close_panel();
    assert!(!center.is_open());
}

#[tokio::test]
async fn test_destroy_detaches_both_mounts() {
    let document = document();
    let center = center(&document, FakeBackend::authenticated(sample()));
    center.destroy();

    assert!(center.is_destroyed());
    assert!(!document.mount("notification-button").unwrap().is_attached());
    assert!(!document.mount("notifications-panel").unwrap().is_attached());
    assert_eq!(center.refresh_count().await, None);
}

// ============================================================================
// Polling
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_poller_refreshes_periodically() {
    let document = document();
    let backend = FakeBackend::authenticated(sample());
    let center = center(&document, backend.clone());

    let poller = Poller::start(&center, Duration::from_secs(60)).unwrap();
    settle().await;
    assert!(poller.is_running());
    assert_eq!(backend.count_calls.load(Ordering::SeqCst), 1);
    assert_eq!(center.unread_count(), 2);

    tokio::time::sleep(Duration::from_secs(61)).await;
    settle().await;
    assert_eq!(backend.count_calls.load(Ordering::SeqCst), 2);

    drop(poller);
    tokio::time::sleep(Duration::from_secs(180)).await;
    settle().await;
    assert_eq!(backend.count_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_poller_needs_runtime() {
    let document = document();
    let center = center(&document, FakeBackend::authenticated(Vec::new()));
    assert!(Poller::start(&center, Duration::from_secs(60)).is_none());
}

#[tokio::test]
async fn test_poller_rejects_zero_interval() {
    let document = document();
    let backend = FakeBackend::authenticated(sample());
    let center = center(&document, backend.clone());

    assert!(Poller::start(&center, Duration::ZERO).is_none());
    settle().await;
    assert_eq!(backend.count_calls.load(Ordering::SeqCst), 0);
}
