use panelkit::prelude::*;

fn dialog(document: &Document) -> ConfirmDialog {
    ConfirmDialog::new(document, ConfirmConfig::default())
}

fn html(document: &Document) -> String {
    document.mount("confirm-modal").unwrap().to_html()
}

// ============================================================================
// Answers
// ============================================================================

#[test]
fn test_starts_closed() {
    let document = Document::new();
    let dialog = dialog(&document);

    assert!(!dialog.is_open());
    assert_eq!(dialog.message(), None);
    assert!(!html(&document).contains("Confirmação"));
    assert!(!dialog.answer(true));
}

#[tokio::test]
async fn test_confirm_button_resolves_true() {
    let document = Document::new();
    let dialog = dialog(&document);

    let answer = dialog.ask("Excluir o cliente Ana Souza?");
    assert!(dialog.is_open());
    let markup = html(&document);
    assert!(markup.contains("Confirmação"));
    assert!(markup.contains("Excluir o cliente Ana Souza?"));
    assert!(markup.contains("Cancelar"));

    assert!(document.dispatch(&Event::click(dialog.confirm_id())));
    assert!(answer.await);
    assert!(!dialog.is_open());
    assert!(!html(&document).contains("Excluir o cliente"));
}

#[tokio::test]
async fn test_cancel_button_resolves_false() {
    let document = Document::new();
    let dialog = dialog(&document);

    let answer = dialog.ask("Arquivar pedido?");
    assert!(document.dispatch(&Event::click(dialog.cancel_id())));
    assert!(!answer.await);
    assert!(!dialog.is_open());
}

#[tokio::test]
async fn test_escape_cancels() {
    let document = Document::new();
    let dialog = dialog(&document);

    let answer = dialog.ask("Descartar alterações?");
    assert!(document.dispatch(&Event::key(dialog.confirm_id(), Key::Escape)));
    assert!(!answer.await);
}

#[tokio::test]
async fn test_new_question_supersedes_open_one() {
    let document = Document::new();
    let dialog = dialog(&document);

    let first = dialog.ask("Primeira?");
    let second = dialog.ask("Segunda?");
    assert_eq!(dialog.message().as_deref(), Some("Segunda?"));
    assert!(!first.await);

    assert!(dialog.answer(true));
    assert!(second.await);
}

#[tokio::test]
async fn test_destroy_resolves_false() {
    let document = Document::new();
    let dialog = dialog(&document);

    let answer = dialog.ask("Excluir?");
    dialog.destroy();
    assert!(!answer.await);
    assert!(!document.mount("confirm-modal").unwrap().is_attached());

    // A destroyed dialog never opens again.
    assert!(!dialog.ask("De novo?").await);
    assert!(!dialog.is_open());
}

#[test]
fn test_custom_labels() {
    let document = Document::new();
    let dialog = ConfirmDialog::new(
        &document,
        ConfirmConfig::default().title("Atenção").labels("Sim", "Não"),
    );

    let _answer = dialog.ask("Continuar?");
    let markup = html(&document);
    assert!(markup.contains("Atenção"));
    assert!(markup.contains("Sim"));
    assert!(markup.contains("Não"));
}
