use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use panelkit::prelude::*;
use panelkit::toast::{DEFAULT_TOAST_DURATION, ToastAction};

fn feed(document: &Document) -> ToastFeed {
    ToastFeed::new(document, ToastFeedConfig::default()).unwrap()
}

/// Let time pass and give woken tasks a chance to run.
async fn settle(duration: Duration) {
    tokio::time::sleep(duration).await;
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Queue
// ============================================================================

#[test]
fn test_only_newest_toasts_visible() {
    let document = Document::new();
    let toasts = feed(&document);

    let ids: Vec<ToastId> = (0..6)
        .map(|i| toasts.show(format!("mensagem {i}"), ToastOptions::default().sticky()))
        .collect();

    assert_eq!(toasts.len(), 6);
    assert_eq!(toasts.visible(), ids[1..].to_vec());

    let mount = document.mount("toast-container").unwrap();
    let html = mount.to_html();
    assert!(!html.contains("mensagem 0"));
    assert!(html.contains("mensagem 5"));

    // Dismissing a visible toast promotes the oldest queued one.
    assert!(toasts.hide(ids[3]));
    assert_eq!(
        toasts.visible(),
        vec![ids[0], ids[1], ids[2], ids[4], ids[5]]
    );
    assert!(mount.to_html().contains("mensagem 0"));
    assert!(!toasts.hide(ids[3]));
}

#[test]
fn test_hide_overflowed_toast_keeps_visible_set() {
    let document = Document::new();
    let toasts = feed(&document);

    let ids: Vec<ToastId> = (0..6)
        .map(|i| toasts.show(format!("mensagem {i}"), ToastOptions::default().sticky()))
        .collect();
    let before = toasts.visible();
    assert!(!before.contains(&ids[0]));

    assert!(toasts.hide(ids[0]));
    assert_eq!(toasts.len(), 5);
    assert_eq!(toasts.visible(), before);
    assert!(!document.mount("toast-container").unwrap().to_html().contains("mensagem 0"));
}

#[test]
fn test_close_button_and_action() {
    let document = Document::new();
    let toasts = feed(&document);
    let undo = Arc::new(AtomicUsize::new(0));
    let counter = undo.clone();

    let plain = toasts.warning("Estoque baixo");
    let with_action = toasts.show(
        "Registro excluído",
        ToastOptions::default().action(ToastAction::new("Desfazer", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    );

    assert!(document.dispatch(&Event::click(format!("toast-{plain}-close"))));
    assert!(document.dispatch(&Event::click(format!("toast-{with_action}-action"))));
    assert_eq!(undo.load(Ordering::SeqCst), 1);
    assert!(toasts.is_empty());
}

#[test]
fn test_toast_markup() {
    let document = Document::new();
    let toasts = feed(&document);
    let id = toasts.error("Falha ao salvar");

    let mount = document.mount("toast-container").unwrap();
    let toast = mount.find(&format!("toast-{id}")).unwrap();
    assert!(toast.has_class("toast-danger"));
    assert!(toast.has_class("toast-top-right"));
    assert_eq!(toast.get_attr("role"), Some("alert"));

    let root = mount.tree().unwrap();
    assert_eq!(root.get_attr("aria-live"), Some("polite"));
}

#[test]
fn test_zero_max_visible_rejected() {
    let document = Document::new();
    let result = ToastFeed::new(&document, ToastFeedConfig::default().max_visible(0));
    assert!(matches!(result, Err(ComponentError::InvalidConfig { .. })));
}

#[test]
fn test_without_runtime_toast_persists() {
    let document = Document::new();
    let toasts = feed(&document);
    toasts.success("Salvo");
    assert_eq!(toasts.len(), 1);
}

// ============================================================================
// Timers
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_toast_auto_dismisses() {
    let document = Document::new();
    let toasts = feed(&document);
    toasts.info("Sincronizando");
    let sticky = toasts.show("Fixo", ToastOptions::default().sticky());

    settle(DEFAULT_TOAST_DURATION - Duration::from_millis(100)).await;
    assert_eq!(toasts.len(), 2);

    settle(Duration::from_millis(200)).await;
    assert_eq!(toasts.visible(), vec![sticky]);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_toast_timer_cancelled() {
    let document = Document::new();
    let toasts = feed(&document);
    let first = toasts.show("curto", ToastOptions::default().duration(Duration::from_secs(1)));
    toasts.hide(first);
    let generation = document.mount("toast-container").unwrap().generation();

    settle(Duration::from_secs(2)).await;
    assert_eq!(document.mount("toast-container").unwrap().generation(), generation);
}

#[tokio::test(start_paused = true)]
async fn test_destroyed_feed_drops_toasts() {
    let document = Document::new();
    let toasts = feed(&document);
    toasts.info("antes");
    toasts.destroy();

    toasts.info("depois");
    settle(DEFAULT_TOAST_DURATION * 2).await;
    assert!(toasts.is_empty());
    assert!(!document.mount("toast-container").unwrap().is_attached());
}
