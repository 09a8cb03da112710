use std::sync::{Arc, Mutex};
use std::time::Duration;

use panelkit::components::upload::FileEntry;
use panelkit::prelude::*;

fn setup(config: impl FnOnce(FileUploadConfig) -> FileUploadConfig) -> (Document, FileUpload, ToastFeed) {
    let document = Document::new();
    document.create_mount("upload");
    let toasts = ToastFeed::new(&document, ToastFeedConfig::default()).unwrap();
    let upload = FileUpload::new(
        &document,
        config(FileUploadConfig::new("upload").toasts(toasts.clone())),
    )
    .unwrap();
    (document, upload, toasts)
}

fn messages(toasts: &ToastFeed) -> Vec<String> {
    toasts.toasts().into_iter().map(|t| t.message).collect()
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_oversize_file_rejected_alone() {
    let (_document, upload, toasts) = setup(|c| c.max_size(1024));

    let admitted = upload.handle_files(vec![
        SelectedFile::new("nota.txt", "text/plain", 100),
        SelectedFile::new("video.mp4", "video/mp4", 2048),
    ]);

    assert_eq!(admitted.len(), 1);
    let files = upload.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file.name, "nota.txt");
    assert_eq!(files[0].status, UploadStatus::Pending);
    assert_eq!(
        messages(&toasts),
        vec!["Arquivo video.mp4 muito grande (máx: 1 KB)"]
    );
}

#[test]
fn test_batch_over_file_limit_rejected_whole() {
    let (_document, upload, toasts) = setup(|c| c.max_files(2));
    upload.handle_files(vec![SelectedFile::new("a.pdf", "application/pdf", 10)]);

    let admitted = upload.handle_files(vec![
        SelectedFile::new("b.pdf", "application/pdf", 10),
        SelectedFile::new("c.pdf", "application/pdf", 10),
    ]);

    assert!(admitted.is_empty());
    assert_eq!(upload.files().len(), 1);
    assert_eq!(messages(&toasts), vec!["Máximo de 2 arquivos permitido"]);
}

#[test]
fn test_drop_clears_drag_state() {
    let (document, upload, _toasts) = setup(|c| c);
    upload.set_dragging(true);
    assert!(upload.is_dragging());
    assert!(document.mount("upload").unwrap().to_html().contains("dragging"));

    upload.drop_files(vec![SelectedFile::new("foto.png", "image/png", 10)]);
    assert!(!upload.is_dragging());
    assert_eq!(upload.files().len(), 1);
}

#[test]
fn test_remove_button_fires_hook() {
    let removed = Arc::new(Mutex::new(Vec::new()));
    let sink = removed.clone();
    let (document, upload, _toasts) =
        setup(move |c| c.on_remove(move |entry: &FileEntry| sink.lock().unwrap().push(entry.file.name.clone())));

    let ids = upload.handle_files(vec![SelectedFile::new("a.csv", "text/csv", 10)]);
    assert!(document.dispatch(&Event::click(upload.remove_id(ids[0]))));
    assert!(upload.files().is_empty());
    assert_eq!(*removed.lock().unwrap(), vec!["a.csv"]);
}

// ============================================================================
// Upload lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_upload_progresses_and_succeeds() {
    let (_document, upload, toasts) = setup(|c| {
        c.on_upload(|_file, _progress| async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(())
        })
    });

    let ids = upload.handle_files(vec![SelectedFile::new("relatorio.pdf", "application/pdf", 500)]);
    assert_eq!(upload.file(ids[0]).unwrap().status, UploadStatus::Pending);

    tokio::time::sleep(Duration::from_millis(450)).await;
    let entry = upload.file(ids[0]).unwrap();
    assert_eq!(entry.status, UploadStatus::Uploading);
    assert!((10..=90).contains(&entry.progress));

    upload.wait_idle().await;
    let entry = upload.file(ids[0]).unwrap();
    assert_eq!(entry.status, UploadStatus::Success);
    assert_eq!(entry.progress, 100);
    assert_eq!(messages(&toasts), vec!["relatorio.pdf enviado com sucesso"]);
}

#[tokio::test(start_paused = true)]
async fn test_upload_failure_reported() {
    let (_document, upload, toasts) = setup(|c| {
        c.on_upload(|_file, _progress| async { Err("tempo esgotado".to_string()) })
    });

    let ids = upload.handle_files(vec![SelectedFile::new("dados.xlsx", "", 42)]);
    upload.wait_idle().await;

    let entry = upload.file(ids[0]).unwrap();
    assert_eq!(entry.status, UploadStatus::Error);
    assert_eq!(entry.error.as_deref(), Some("tempo esgotado"));
    assert_eq!(
        messages(&toasts),
        vec!["Erro ao enviar dados.xlsx: tempo esgotado"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_reported_progress_overrides_ramp() {
    let (_document, upload, _toasts) = setup(|c| {
        c.on_upload(|_file, progress| async move {
            progress.report(75);
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(())
        })
    });

    let ids = upload.handle_files(vec![SelectedFile::new("a.txt", "text/plain", 1)]);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(upload.file(ids[0]).unwrap().progress, 75);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(upload.file(ids[0]).unwrap().progress, 85);
}

#[tokio::test(start_paused = true)]
async fn test_remove_cancels_upload() {
    let (_document, upload, toasts) = setup(|c| {
        c.on_upload(|_file, _progress| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
    });

    let ids = upload.handle_files(vec![SelectedFile::new("grande.zip", "application/zip", 1)]);
    tokio::task::yield_now().await;
    assert!(upload.remove_file(ids[0]));

    upload.wait_idle().await;
    assert!(upload.files().is_empty());
    assert!(toasts.is_empty());
}
