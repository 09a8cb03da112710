//! Navbar notification button and drop-down panel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use chrono::Utc;
use paneldom::{Document, Element, EventKind, Listeners, Mount, Tag, View};
use panelkit::component::resolve_mount;
use panelkit::{Component, ComponentError};
use tokio::runtime::Handle;

use super::backend::NotificationBackend;
use super::model::{Notification, badge_text};
use crate::config::DEFAULT_NOTIFICATION_LIMIT;

pub const LOGIN_REQUIRED: &str = "Faça login para ver as notificações";
pub const LOAD_FAILED: &str = "Erro ao carregar notificações";

/// Called with the link of an opened notification.
pub type NavigateHook = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Clone)]
pub struct NotificationCenterConfig {
    /// Mount of the navbar button and its unread badge.
    pub badge_container: String,
    /// Mount of the drop-down panel.
    pub panel_container: String,
    pub limit: usize,
    pub on_navigate: Option<NavigateHook>,
}

impl Default for NotificationCenterConfig {
    fn default() -> Self {
        Self {
            badge_container: "notification-button".to_string(),
            panel_container: "notifications-panel".to_string(),
            limit: DEFAULT_NOTIFICATION_LIMIT,
            on_navigate: None,
        }
    }
}

impl NotificationCenterConfig {
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn on_navigate(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_navigate = Some(Arc::new(hook));
        self
    }
}

/// What the panel's list area shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Notification>),
    Failed(String),
}

#[derive(Debug, Default)]
struct CenterInner {
    count: u64,
    open: bool,
    list: ListState,
}

pub(super) struct CenterShared {
    badge: Mount,
    panel: Mount,
    backend: Arc<dyn NotificationBackend>,
    limit: usize,
    on_navigate: Option<NavigateHook>,
    inner: RwLock<CenterInner>,
    /// Latest issued request per kind; older responses are dropped.
    count_seq: AtomicU64,
    list_seq: AtomicU64,
    destroyed: AtomicBool,
}

/// Unread badge plus the recent-notifications panel.
///
/// Count and list requests carry sequence numbers, so a slow response
/// never overwrites a newer one. Clones share the same center.
#[derive(Clone)]
pub struct NotificationCenter {
    shared: Arc<CenterShared>,
}

impl NotificationCenter {
    pub fn new(
        document: &Document,
        backend: Arc<dyn NotificationBackend>,
        config: NotificationCenterConfig,
    ) -> Result<Self, ComponentError> {
        let badge = resolve_mount(document, &config.badge_container, "notification center")?;
        let panel = resolve_mount(document, &config.panel_container, "notification center")?;
        if config.limit == 0 {
            return Err(ComponentError::invalid("notification center", "limit must be positive"));
        }

        let center = Self {
            shared: Arc::new(CenterShared {
                badge,
                panel,
                backend,
                limit: config.limit,
                on_navigate: config.on_navigate,
                inner: RwLock::new(CenterInner::default()),
                count_seq: AtomicU64::new(0),
                list_seq: AtomicU64::new(0),
                destroyed: AtomicBool::new(false),
            }),
        };
        center.render();
        Ok(center)
    }

    pub(super) fn downgrade(&self) -> Weak<CenterShared> {
        Arc::downgrade(&self.shared)
    }

    pub(super) fn from_weak(weak: &Weak<CenterShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    pub fn is_authenticated(&self) -> bool {
        self.shared.backend.is_authenticated()
    }

    pub fn unread_count(&self) -> u64 {
        self.shared.inner.read().map(|g| g.count).unwrap_or(0)
    }

    pub fn is_open(&self) -> bool {
        self.shared.inner.read().map(|g| g.open).unwrap_or(false)
    }

    pub fn list_state(&self) -> ListState {
        self.shared
            .inner
            .read()
            .map(|g| g.list.clone())
            .unwrap_or_default()
    }

    /// Fetch the unread count and update the badge.
    ///
    /// Skipped without a token. Returns the count unless the call failed
    /// or a newer request superseded it.
    pub async fn refresh_count(&self) -> Option<u64> {
        if self.is_destroyed() || !self.is_authenticated() {
            return None;
        }
        let seq = self.shared.count_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.shared.backend.unread_count().await;
        if self.shared.count_seq.load(Ordering::SeqCst) != seq {
            log::debug!("discarding stale unread count #{seq}");
            return None;
        }

        match result {
            Ok(count) => {
                self.update(|inner| inner.count = count);
                Some(count)
            }
            Err(e) => {
                log::error!("notification count error: {e}");
                None
            }
        }
    }

    /// Fetch the recent notifications into the panel, then refresh the
    /// count.
    pub async fn load_list(&self) {
        if self.is_destroyed() {
            return;
        }
        if !self.is_authenticated() {
            self.update(|inner| inner.list = ListState::Failed(LOGIN_REQUIRED.to_string()));
            return;
        }

        let seq = self.shared.list_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|inner| inner.list = ListState::Loading);
        let result = self.shared.backend.list(self.shared.limit).await;
        if self.shared.list_seq.load(Ordering::SeqCst) != seq {
            log::debug!("discarding stale notification list #{seq}");
            return;
        }

        match result {
            Ok(items) => {
                self.update(|inner| inner.list = ListState::Loaded(items));
                self.refresh_count().await;
            }
            Err(e) => {
                log::error!("cannot load notifications: {e}");
                self.update(|inner| inner.list = ListState::Failed(LOAD_FAILED.to_string()));
            }
        }
    }

    /// Open or close the panel; opening reloads the list. Returns whether
    /// the panel is now open.
    pub async fn toggle_panel(&self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let mut open = false;
        self.update(|inner| {
            inner.open = !inner.open;
            open = inner.open;
        });
        if open {
            self.load_list().await;
        }
        open
    }

    /// Close the panel (e.g. on a click outside it).
    pub fn close_panel(&self) {
        if self.is_open() {
            self.update(|inner| inner.open = false);
        }
    }

    /// Mark one notification read and follow its link.
    ///
    /// Returns the link, if the notification has one.
    pub async fn mark_as_read(&self, id: i64) -> Option<String> {
        if self.is_destroyed() {
            return None;
        }
        let link = match &self.list_state() {
            ListState::Loaded(items) => items
                .iter()
                .find(|n| n.id == id)
                .and_then(|n| n.target().map(String::from)),
            _ => None,
        };

        if self.is_authenticated() {
            match self.shared.backend.mark_read(id).await {
                Ok(()) => self.load_list().await,
                Err(e) => log::error!("cannot mark notification {id} read: {e}"),
            }
        }

        if let (Some(link), Some(hook)) = (&link, &self.shared.on_navigate) {
            hook(link);
        }
        link
    }

    pub async fn mark_all_as_read(&self) {
        if self.is_destroyed() || !self.is_authenticated() {
            return;
        }
        match self.shared.backend.mark_all_read().await {
            Ok(()) => self.load_list().await,
            Err(e) => log::error!("cannot mark all notifications read: {e}"),
        }
    }

    // -------------------------------------------------------------------------
    // Element ids
    // -------------------------------------------------------------------------

    pub fn button_id(&self) -> String {
        format!("{}-button", self.shared.badge.id())
    }

    pub fn read_all_id(&self) -> String {
        format!("{}-read-all", self.shared.panel.id())
    }

    pub fn item_id(&self, id: i64) -> String {
        format!("{}-item-{id}", self.shared.panel.id())
    }

    fn update(&self, change: impl FnOnce(&mut CenterInner)) {
        if let Ok(mut inner) = self.shared.inner.write() {
            change(&mut inner);
        }
        self.render();
    }

    /// Run a center operation from a (synchronous) listener.
    fn spawn<F, Fut>(&self, job: F)
    where
        F: FnOnce(NotificationCenter) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(job(self.clone()));
            }
            Err(_) => log::warn!("no async runtime, ignoring notification action"),
        }
    }

    fn badge_view(&self) -> View {
        let (count, open) = match self.shared.inner.read() {
            Ok(inner) => (inner.count, inner.open),
            Err(_) => return View::default(),
        };
        let container = self.shared.badge.id();
        let button_id = self.button_id();

        let mut listeners = Listeners::new();
        let weak = self.downgrade();
        listeners.on(&button_id, EventKind::Click, move |_| {
            if let Some(center) = NotificationCenter::from_weak(&weak) {
                center.spawn(|center| async move {
                    center.toggle_panel().await;
                });
            }
        });

        let badge = Element::span()
            .class("notification-badge")
            .hidden(count == 0)
            .child(Element::text(badge_text(count).unwrap_or_default()));

        let root = Element::div().id(container).class("notification-button-container").child(
            Element::new(Tag::Button)
                .id(button_id)
                .class("notification-button")
                .attr("type", "button")
                .data("notifications", "")
                .aria("label", "Notificações")
                .aria("expanded", open.to_string())
                .focusable(true)
                .clickable(true)
                .child(
                    Element::span()
                        .class("notification-icon")
                        .aria("hidden", "true")
                        .child(Element::text("🔔")),
                )
                .child(badge),
        );
        View::new(root, listeners)
    }

    fn panel_view(&self) -> View {
        let (open, list) = match self.shared.inner.read() {
            Ok(inner) => (inner.open, inner.list.clone()),
            Err(_) => return View::default(),
        };
        let container = self.shared.panel.id();
        let mut listeners = Listeners::new();

        let read_all_id = self.read_all_id();
        let weak = self.downgrade();
        listeners.on(&read_all_id, EventKind::Click, move |_| {
            if let Some(center) = NotificationCenter::from_weak(&weak) {
                center.spawn(|center| async move { center.mark_all_as_read().await });
            }
        });

        let body = match list {
            ListState::Idle | ListState::Loading => Element::div()
                .class("notifications-loading")
                .child(Element::text("Carregando...")),
            ListState::Failed(message) => Element::div()
                .class("notifications-error")
                .child(Element::new(Tag::Paragraph).child(Element::text(message))),
            ListState::Loaded(items) if items.is_empty() => Element::div()
                .class("notifications-empty")
                .child(Element::new(Tag::Paragraph).child(Element::text("Nenhuma notificação"))),
            ListState::Loaded(items) => {
                let now = Utc::now();
                Element::div().children(items.iter().map(|item| {
                    let item_id = self.item_id(item.id);
                    let id = item.id;
                    let weak = self.downgrade();
                    let open_item = move |_: &paneldom::Event| {
                        if let Some(center) = NotificationCenter::from_weak(&weak) {
                            center.spawn(move |center| async move {
                                center.mark_as_read(id).await;
                            });
                        }
                    };
                    let on_key = open_item.clone();
                    listeners.on(&item_id, EventKind::Click, open_item);
                    listeners.on(&item_id, EventKind::Key, move |event| {
                        if event.key_code().is_some_and(|k| k.is_activation()) {
                            on_key(event);
                        }
                    });
                    notification_item(item, item_id, now)
                }))
            }
        };

        let root = Element::div()
            .id(container)
            .class("notifications-panel")
            .class_if(open, "active")
            .hidden(!open)
            .child(
                Element::div()
                    .class("notifications-header")
                    .child(Element::new(Tag::Heading(3)).child(Element::text("Notificações")))
                    .child(
                        Element::button("Marcar todas como lidas")
                            .id(read_all_id)
                            .class("btn btn-sm btn-secondary"),
                    ),
            )
            .child(
                Element::div()
                    .id(format!("{container}-list"))
                    .class("notifications-list")
                    .child(body),
            )
            .child(
                Element::div().class("notifications-footer").child(
                    Element::new(Tag::Link)
                        .attr("href", "/notifications")
                        .child(Element::text("Ver todas as notificações")),
                ),
            );
        View::new(root, listeners)
    }
}

fn notification_item(item: &Notification, element_id: String, now: chrono::DateTime<Utc>) -> Element {
    let state = if item.read { "read" } else { "unread" };
    Element::div()
        .id(element_id)
        .class("notification-item")
        .class(state)
        .role("button")
        .data("id", item.id.to_string())
        .focusable(true)
        .clickable(true)
        .child(
            Element::div()
                .class("notification-marker")
                .class(item.kind.color_class())
                .aria("hidden", "true"),
        )
        .child(
            Element::div()
                .class("notification-body")
                .child(Element::div().class("notification-title").child(Element::text(&item.title)))
                .child(Element::div().class("notification-message").child(Element::text(&item.message)))
                .child(Element::div().class("notification-time").child(Element::text(item.age(now)))),
        )
        .child_opt((!item.read).then(|| Element::span().class("notification-dot").aria("hidden", "true")))
}

impl Component for NotificationCenter {
    fn mount(&self) -> &Mount {
        &self.shared.panel
    }

    fn view(&self) -> View {
        self.panel_view()
    }

    fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    /// Renders both the badge and the panel.
    fn render(&self) {
        if self.is_destroyed() {
            return;
        }
        self.shared.badge.replace(self.badge_view());
        self.shared.panel.replace(self.panel_view());
    }

    fn destroy(&self) {
        self.shared.destroyed.store(true, Ordering::SeqCst);
        self.shared.badge.clear();
        self.shared.panel.clear();
    }
}
