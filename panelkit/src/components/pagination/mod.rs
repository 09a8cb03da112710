//! Pagination component - page navigation over a record count.

mod render;

use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use paneldom::{Document, Mount, View};

use crate::component::{Component, resolve_mount};
use crate::error::ComponentError;

/// Called with `(page, page_size)` after a navigation.
pub type PageChangeHook = Arc<dyn Fn(usize, usize) + Send + Sync>;

pub const DEFAULT_PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_MAX_BUTTONS: usize = 5;

/// Navigation target of a pagination button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    First,
    Prev,
    Next,
    Last,
    Page(usize),
}

impl FromStr for PageTarget {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "first" => Self::First,
            "prev" => Self::Prev,
            "next" => Self::Next,
            "last" => Self::Last,
            n => Self::Page(n.parse()?),
        })
    }
}

#[derive(Clone)]
pub struct PaginationConfig {
    pub container: String,
    /// Total number of records.
    pub total: usize,
    pub current_page: usize,
    pub page_size: usize,
    /// Enumerated page sizes offered in the size selector.
    pub page_sizes: Vec<usize>,
    /// Number of numbered page buttons.
    pub max_buttons: usize,
    pub on_page_change: Option<PageChangeHook>,
}

impl PaginationConfig {
    pub fn new(container: impl Into<String>, total: usize) -> Self {
        Self {
            container: container.into(),
            total,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZES[0],
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            max_buttons: DEFAULT_MAX_BUTTONS,
            on_page_change: None,
        }
    }

    pub fn current_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    pub fn page_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.page_sizes = sizes.into();
        self
    }

    pub fn max_buttons(mut self, max: usize) -> Self {
        self.max_buttons = max;
        self
    }

    pub fn on_page_change(mut self, hook: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_page_change = Some(Arc::new(hook));
        self
    }

    fn validate(&self) -> Result<(), ComponentError> {
        if self.page_sizes.is_empty() || self.page_sizes.contains(&0) {
            return Err(ComponentError::invalid("pagination", "page sizes must be positive"));
        }
        if !self.page_sizes.contains(&self.page_size) {
            return Err(ComponentError::invalid(
                "pagination",
                format!("page size {} is not one of {:?}", self.page_size, self.page_sizes),
            ));
        }
        if self.max_buttons == 0 {
            return Err(ComponentError::invalid("pagination", "max_buttons must be at least 1"));
        }
        Ok(())
    }
}

/// Caller-driven state refresh. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationUpdate {
    pub total: Option<usize>,
    pub current_page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PageState {
    pub total: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    fn clamp(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }
}

pub(super) struct PaginationShared {
    mount: Mount,
    page_sizes: Vec<usize>,
    max_buttons: usize,
    on_page_change: Option<PageChangeHook>,
    state: RwLock<PageState>,
    destroyed: AtomicBool,
}

/// Page navigation over `total` records.
///
/// Shows first/prev/next/last buttons, up to `max_buttons` numbered
/// buttons centred on the current page, a page-size selector and an info
/// line.
#[derive(Clone)]
pub struct Pagination {
    shared: Arc<PaginationShared>,
}

impl Pagination {
    pub fn new(document: &Document, config: PaginationConfig) -> Result<Self, ComponentError> {
        let mount = resolve_mount(document, &config.container, "pagination")?;
        config.validate().inspect_err(|e| log::error!("{e}"))?;

        let mut state = PageState {
            total: config.total,
            current_page: config.current_page,
            page_size: config.page_size,
        };
        state.clamp();

        let pagination = Self {
            shared: Arc::new(PaginationShared {
                mount,
                page_sizes: config.page_sizes,
                max_buttons: config.max_buttons,
                on_page_change: config.on_page_change,
                state: RwLock::new(state),
                destroyed: AtomicBool::new(false),
            }),
        };
        pagination.render();
        Ok(pagination)
    }

    fn from_weak(weak: &Weak<PaginationShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    fn state(&self) -> Option<PageState> {
        self.shared.state.read().ok().map(|g| *g)
    }

    pub fn current_page(&self) -> usize {
        self.state().map(|s| s.current_page).unwrap_or(1)
    }

    pub fn page_size(&self) -> usize {
        self.state().map(|s| s.page_size).unwrap_or(DEFAULT_PAGE_SIZES[0])
    }

    pub fn total(&self) -> usize {
        self.state().map(|s| s.total).unwrap_or(0)
    }

    pub fn total_pages(&self) -> usize {
        self.state().map(|s| s.total_pages()).unwrap_or(1)
    }

    /// Numbered pages currently shown.
    pub fn window(&self) -> RangeInclusive<usize> {
        page_window(self.current_page(), self.total_pages(), self.shared.max_buttons)
    }

    /// Navigate. Fires `on_page_change` if the page changed.
    pub fn go_to(&self, target: PageTarget) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let (page, size) = {
            let Ok(mut state) = self.shared.state.write() else {
                return false;
            };
            let total_pages = state.total_pages();
            let page = match target {
                PageTarget::First => 1,
                PageTarget::Prev => state.current_page.saturating_sub(1).max(1),
                PageTarget::Next => (state.current_page + 1).min(total_pages),
                PageTarget::Last => total_pages,
                PageTarget::Page(n) => n.clamp(1, total_pages),
            };
            if page == state.current_page {
                return false;
            }
            state.current_page = page;
            (page, state.page_size)
        };

        self.render();
        self.notify(page, size);
        true
    }

    /// Switch page size and return to page 1.
    ///
    /// Sizes outside the enumerated set are rejected.
    pub fn set_page_size(&self, size: usize) -> bool {
        if self.is_destroyed() {
            return false;
        }
        if !self.shared.page_sizes.contains(&size) {
            log::warn!(
                "pagination '{}': rejecting page size {size}",
                self.shared.mount.id()
            );
            return false;
        }
        {
            let Ok(mut state) = self.shared.state.write() else {
                return false;
            };
            if state.page_size == size {
                return false;
            }
            state.page_size = size;
            state.current_page = 1;
        }

        self.render();
        self.notify(1, size);
        true
    }

    /// Apply caller data and re-render without firing the callback.
    pub fn update(&self, update: PaginationUpdate) {
        if self.is_destroyed() {
            return;
        }
        if let Ok(mut state) = self.shared.state.write() {
            if let Some(total) = update.total {
                state.total = total;
            }
            match update.page_size {
                Some(size) if self.shared.page_sizes.contains(&size) => state.page_size = size,
                Some(size) => log::warn!("pagination: ignoring page size {size}"),
                None => {}
            }
            if let Some(page) = update.current_page {
                state.current_page = page;
            }
            state.clamp();
        }
        self.render();
    }

    /// Element id of a navigation button.
    pub fn button_id(&self, target: PageTarget) -> String {
        button_id(self.shared.mount.id(), target)
    }

    pub fn size_select_id(&self) -> String {
        format!("{}-size", self.shared.mount.id())
    }

    fn notify(&self, page: usize, size: usize) {
        log::debug!("pagination '{}': page {page} (size {size})", self.shared.mount.id());
        if let Some(hook) = &self.shared.on_page_change {
            hook(page, size);
        }
    }
}

impl Component for Pagination {
    fn mount(&self) -> &Mount {
        &self.shared.mount
    }

    fn view(&self) -> View {
        render::view(&self.shared)
    }

    fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    fn destroy(&self) {
        self.shared.destroyed.store(true, Ordering::SeqCst);
        self.shared.mount.clear();
    }
}

/// Number of pages for `total` records (at least 1).
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Up to `max_buttons` consecutive pages centred on `current`, shifted
/// (never shrunk) at either end.
pub fn page_window(current: usize, total_pages: usize, max_buttons: usize) -> RangeInclusive<usize> {
    let max_buttons = max_buttons.max(1);
    let mut start = current.saturating_sub(max_buttons / 2).max(1);
    let end = (start + max_buttons - 1).min(total_pages);
    if end + 1 - start < max_buttons {
        start = (end + 1).saturating_sub(max_buttons).max(1);
    }
    start..=end
}

fn button_id(container: &str, target: PageTarget) -> String {
    match target {
        PageTarget::First => format!("{container}-first"),
        PageTarget::Prev => format!("{container}-prev"),
        PageTarget::Next => format!("{container}-next"),
        PageTarget::Last => format!("{container}-last"),
        PageTarget::Page(n) => format!("{container}-page-{n}"),
    }
}
