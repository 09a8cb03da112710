//! FileUpload state, admission rules and upload tasks.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};
use std::time::Duration;

use futures::future::BoxFuture;
use paneldom::{Document, Mount, View};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{Notify, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::file::{FileEntry, SelectedFile, UploadStatus};
use crate::component::{Component, resolve_mount};
use crate::error::ComponentError;
use crate::format::format_size;
use crate::toast::ToastFeed;

/// Interval of the simulated progress ramp.
const RAMP_INTERVAL: Duration = Duration::from_millis(200);
const RAMP_STEP: u8 = 10;
const RAMP_CEILING: u8 = 90;

pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 10;

/// Sends one file. Resolves to an error message on failure.
pub type UploadHook =
    Arc<dyn Fn(SelectedFile, ProgressReporter) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

/// Called with the entry that was removed.
pub type RemoveHook = Arc<dyn Fn(&FileEntry) + Send + Sync>;

/// Why files were turned away. The message is shown as a toast.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Máximo de {max} arquivos permitido")]
    TooManyFiles { max: usize },

    #[error("Arquivo {name} muito grande (máx: {limit})")]
    TooLarge { name: String, limit: String },
}

#[derive(Clone)]
pub struct FileUploadConfig {
    pub container: String,
    pub multiple: bool,
    /// `accept` attribute of the file input.
    pub accept: String,
    /// Largest accepted file in bytes.
    pub max_size: u64,
    pub max_files: usize,
    pub show_preview: bool,
    pub on_upload: Option<UploadHook>,
    pub on_remove: Option<RemoveHook>,
    /// Where rejections and upload results are reported.
    pub toasts: Option<ToastFeed>,
}

impl FileUploadConfig {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            multiple: true,
            accept: "*/*".to_string(),
            max_size: DEFAULT_MAX_SIZE,
            max_files: DEFAULT_MAX_FILES,
            show_preview: true,
            on_upload: None,
            on_remove: None,
            toasts: None,
        }
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }

    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    pub fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    pub fn show_preview(mut self, show: bool) -> Self {
        self.show_preview = show;
        self
    }

    /// Upload each admitted file with `hook`.
    pub fn on_upload<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(SelectedFile, ProgressReporter) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        self.on_upload = Some(Arc::new(
            move |file: SelectedFile, progress: ProgressReporter| -> BoxFuture<'static, Result<(), String>> {
                Box::pin(hook(file, progress))
            },
        ));
        self
    }

    pub fn on_remove(mut self, hook: impl Fn(&FileEntry) + Send + Sync + 'static) -> Self {
        self.on_remove = Some(Arc::new(hook));
        self
    }

    pub fn toasts(mut self, toasts: ToastFeed) -> Self {
        self.toasts = Some(toasts);
        self
    }
}

#[derive(Default)]
pub(super) struct UploadInner {
    pub entries: Vec<FileEntry>,
    pub dragging: bool,
    tasks: HashMap<Uuid, JoinHandle<()>>,
}

pub(super) struct UploadShared {
    pub mount: Mount,
    pub multiple: bool,
    pub accept: String,
    pub max_size: u64,
    pub max_files: usize,
    pub show_preview: bool,
    on_upload: Option<UploadHook>,
    on_remove: Option<RemoveHook>,
    toasts: Option<ToastFeed>,
    pub inner: RwLock<UploadInner>,
    in_flight: AtomicUsize,
    idle: Notify,
    destroyed: AtomicBool,
}

/// Decrements the in-flight count when an upload task ends or is aborted.
struct InFlight(Weak<UploadShared>);

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(shared) = self.0.upgrade()
            && shared.in_flight.fetch_sub(1, Ordering::SeqCst) == 1
        {
            shared.idle.notify_waiters();
        }
    }
}

/// Lets an upload hook report real progress.
#[derive(Clone)]
pub struct ProgressReporter {
    shared: Weak<UploadShared>,
    id: Uuid,
}

impl ProgressReporter {
    /// Set the progress (clamped to 100) of a file that is still uploading.
    pub fn report(&self, percent: u8) {
        let Some(upload) = FileUpload::from_weak(&self.shared) else {
            return;
        };
        let changed = upload.with_entry(self.id, |entry| {
            if entry.status != UploadStatus::Uploading {
                return false;
            }
            entry.progress = percent.min(100);
            true
        });
        if changed == Some(true) {
            upload.render();
        }
    }

    pub fn file_id(&self) -> Uuid {
        self.id
    }
}

/// File picker with drag-and-drop, size/count limits and per-file upload
/// progress.
#[derive(Clone)]
pub struct FileUpload {
    pub(super) shared: Arc<UploadShared>,
}

impl FileUpload {
    pub fn new(document: &Document, config: FileUploadConfig) -> Result<Self, ComponentError> {
        let mount = resolve_mount(document, &config.container, "file upload")?;
        if config.max_files == 0 || config.max_size == 0 {
            return Err(ComponentError::invalid(
                "file upload",
                "max_files and max_size must be positive",
            ));
        }

        let upload = Self {
            shared: Arc::new(UploadShared {
                mount,
                multiple: config.multiple,
                accept: config.accept,
                max_size: config.max_size,
                max_files: config.max_files,
                show_preview: config.show_preview,
                on_upload: config.on_upload,
                on_remove: config.on_remove,
                toasts: config.toasts,
                inner: RwLock::new(UploadInner::default()),
                in_flight: AtomicUsize::new(0),
                idle: Notify::new(),
                destroyed: AtomicBool::new(false),
            }),
        };
        upload.render();
        Ok(upload)
    }

    pub(super) fn from_weak(weak: &Weak<UploadShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Admitted files in selection order.
    pub fn files(&self) -> Vec<FileEntry> {
        self.shared
            .inner
            .read()
            .map(|g| g.entries.clone())
            .unwrap_or_default()
    }

    pub fn file(&self, id: Uuid) -> Option<FileEntry> {
        self.shared
            .inner
            .read()
            .ok()
            .and_then(|g| g.entries.iter().find(|e| e.id == id).cloned())
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.inner.read().map(|g| g.dragging).unwrap_or(false)
    }

    /// Validate and admit a batch of files.
    ///
    /// A batch that would exceed `max_files` is rejected whole. Otherwise
    /// each file over `max_size` is rejected on its own and the rest are
    /// admitted (and uploaded when a hook is configured). Returns the ids
    /// of the admitted files.
    pub fn handle_files(&self, batch: Vec<SelectedFile>) -> Vec<Uuid> {
        if self.is_destroyed() || batch.is_empty() {
            return Vec::new();
        }

        let existing = self.shared.inner.read().map(|g| g.entries.len()).unwrap_or(0);
        if existing + batch.len() > self.shared.max_files {
            self.reject(UploadRejection::TooManyFiles {
                max: self.shared.max_files,
            });
            return Vec::new();
        }

        let mut admitted = Vec::new();
        for file in batch {
            if file.size > self.shared.max_size {
                self.reject(UploadRejection::TooLarge {
                    name: file.name,
                    limit: format_size(self.shared.max_size),
                });
                continue;
            }
            admitted.push(FileEntry::pending(file));
        }
        if admitted.is_empty() {
            return Vec::new();
        }

        let ids: Vec<Uuid> = admitted.iter().map(|e| e.id).collect();
        if let Ok(mut inner) = self.shared.inner.write() {
            inner.entries.extend(admitted.iter().cloned());
        }
        self.render();

        if self.shared.on_upload.is_some() {
            for entry in admitted {
                self.start_upload(entry.id, entry.file);
            }
        }
        ids
    }

    /// Drop handler: leaves the drag state and admits the files.
    pub fn drop_files(&self, batch: Vec<SelectedFile>) -> Vec<Uuid> {
        self.set_dragging(false);
        self.handle_files(batch)
    }

    pub fn set_dragging(&self, dragging: bool) {
        if self.is_destroyed() {
            return;
        }
        let changed = self
            .shared
            .inner
            .write()
            .map(|mut g| std::mem::replace(&mut g.dragging, dragging) != dragging)
            .unwrap_or(false);
        if changed {
            self.render();
        }
    }

    /// Remove a file, cancelling its upload, and fire `on_remove`.
    pub fn remove_file(&self, id: Uuid) -> bool {
        let removed = {
            let Ok(mut inner) = self.shared.inner.write() else {
                return false;
            };
            if let Some(task) = inner.tasks.remove(&id) {
                task.abort();
            }
            let position = inner.entries.iter().position(|e| e.id == id);
            position.map(|i| inner.entries.remove(i))
        };
        let Some(entry) = removed else {
            return false;
        };

        self.render();
        if let Some(hook) = &self.shared.on_remove {
            hook(&entry);
        }
        true
    }

    /// Remove every file and cancel in-flight uploads.
    pub fn clear(&self) {
        self.abort_all();
        if let Ok(mut inner) = self.shared.inner.write() {
            inner.entries.clear();
        }
        self.render();
    }

    /// Resolves once no upload is running.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.shared.idle.notified();
            if self.shared.in_flight.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Element id of a file's remove button.
    pub fn remove_id(&self, id: Uuid) -> String {
        format!("{}-remove-{id}", self.shared.mount.id())
    }

    fn reject(&self, rejection: UploadRejection) {
        log::warn!("file upload '{}': {rejection}", self.shared.mount.id());
        if let Some(toasts) = &self.shared.toasts {
            toasts.error(rejection.to_string());
        }
    }

    fn with_entry<R>(&self, id: Uuid, f: impl FnOnce(&mut FileEntry) -> R) -> Option<R> {
        let mut inner = self.shared.inner.write().ok()?;
        inner.entries.iter_mut().find(|e| e.id == id).map(f)
    }

    fn abort_all(&self) {
        if let Ok(mut inner) = self.shared.inner.write() {
            for (_, task) in inner.tasks.drain() {
                task.abort();
            }
        }
    }

    fn start_upload(&self, id: Uuid, file: SelectedFile) {
        let Some(hook) = self.shared.on_upload.clone() else {
            return;
        };
        let Ok(handle) = Handle::try_current() else {
            log::warn!("no async runtime, '{}' stays pending", file.name);
            return;
        };

        self.shared.in_flight.fetch_add(1, Ordering::SeqCst);
        let weak = Arc::downgrade(&self.shared);
        let guard = InFlight(weak.clone());

        // The task waits until its handle is registered, so `finish` always
        // finds it in `tasks`.
        let (registered, wait_registered) = oneshot::channel();
        let task = handle.spawn(async move {
            let _guard = guard;
            if wait_registered.await.is_ok() {
                run_upload(weak, id, file, hook).await;
            }
        });
        match self.shared.inner.write() {
            Ok(mut inner) => {
                inner.tasks.insert(id, task);
            }
            Err(_) => {
                task.abort();
                return;
            }
        }
        let _ = registered.send(());
    }

    fn finish(&self, id: Uuid, outcome: Result<(), String>) {
        let name = self.with_entry(id, |entry| {
            match &outcome {
                Ok(()) => {
                    entry.status = UploadStatus::Success;
                    entry.progress = 100;
                }
                Err(message) => {
                    entry.status = UploadStatus::Error;
                    entry.error = Some(message.clone());
                }
            }
            entry.file.name.clone()
        });
        if let Ok(mut inner) = self.shared.inner.write() {
            inner.tasks.remove(&id);
        }
        let Some(name) = name else {
            return;
        };

        self.render();
        match outcome {
            Ok(()) => {
                log::info!("uploaded '{name}'");
                if let Some(toasts) = &self.shared.toasts {
                    toasts.success(format!("{name} enviado com sucesso"));
                }
            }
            Err(message) => {
                log::error!("upload of '{name}' failed: {message}");
                if let Some(toasts) = &self.shared.toasts {
                    toasts.error(format!("Erro ao enviar {name}: {message}"));
                }
            }
        }
    }
}

async fn run_upload(weak: Weak<UploadShared>, id: Uuid, file: SelectedFile, hook: UploadHook) {
    {
        let Some(upload) = FileUpload::from_weak(&weak) else {
            return;
        };
        let started = upload.with_entry(id, |entry| entry.status = UploadStatus::Uploading);
        if started.is_none() {
            return;
        }
        upload.render();
    }

    let reporter = ProgressReporter {
        shared: weak.clone(),
        id,
    };
    let ramp_target = weak.clone();
    let ramp = async move {
        loop {
            tokio::time::sleep(RAMP_INTERVAL).await;
            let Some(upload) = FileUpload::from_weak(&ramp_target) else {
                return;
            };
            let bumped = upload.with_entry(id, |entry| {
                if entry.status == UploadStatus::Uploading && entry.progress < RAMP_CEILING {
                    entry.progress = (entry.progress + RAMP_STEP).min(100);
                    true
                } else {
                    false
                }
            });
            if bumped == Some(true) {
                upload.render();
            }
        }
    };

    let outcome = tokio::select! {
        outcome = hook(file, reporter) => outcome,
        () = ramp => return,
    };

    if let Some(upload) = FileUpload::from_weak(&weak) {
        upload.finish(id, outcome);
    }
}

impl Component for FileUpload {
    fn mount(&self) -> &Mount {
        &self.shared.mount
    }

    fn view(&self) -> View {
        super::render::view(self)
    }

    fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    fn destroy(&self) {
        self.shared.destroyed.store(true, Ordering::SeqCst);
        self.abort_all();
        self.shared.mount.clear();
    }
}
