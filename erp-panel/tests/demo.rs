use erp_panel::demo::{self, DemoPage, filter_rows, sample_clients};
use paneldom::Event;
use panelkit::components::filter::FilterValues;
use panelkit::prelude::*;

fn page() -> (Document, ToastFeed, DemoPage) {
    let document = Document::new();
    let toasts = ToastFeed::new(&document, ToastFeedConfig::default()).unwrap();
    let page = DemoPage::build(&document, &toasts).unwrap();
    (document, toasts, page)
}

// ============================================================================
// Page
// ============================================================================

#[test]
fn test_snapshot_covers_every_mount() {
    let (_document, _toasts, page) = page();
    let html = page.snapshot();

    for id in demo::CONTAINERS {
        assert!(html.contains(&format!(r#"id="{id}""#)), "missing {id}");
    }
    assert!(html.contains("Mostrando 1 a 10 de 12 registros"));
    assert!(html.contains("Ana Souza"));
    assert!(!html.contains("Karina Prado"));
}

#[test]
fn test_page_change_swaps_rows() {
    let (_document, _toasts, page) = page();

    assert!(page.pagination.go_to(PageTarget::Page(2)));
    assert_eq!(page.table.row_ids(), vec!["11", "12"]);
}

#[test]
fn test_filters_drive_table_and_pagination() {
    let (_document, _toasts, page) = page();

    page.filters.set_value("status", "inactive");
    page.filters.apply();
    assert_eq!(page.table.row_ids(), vec!["2", "7", "12"]);
    assert_eq!(page.pagination.total(), 3);
    assert_eq!(page.pagination.current_page(), 1);

    page.filters.reset();
    assert_eq!(page.pagination.total(), 12);
    assert_eq!(page.table.len(), 10);
}

#[test]
fn test_filter_rows() {
    let rows = sample_clients();
    let values = FilterValues::from([
        ("nome".to_string(), "  SOUZA ".to_string()),
        ("status".to_string(), "active".to_string()),
    ]);
    let found = filter_rows(&rows, &values);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["nome"], "Ana Souza");
    assert_eq!(filter_rows(&rows, &FilterValues::new()).len(), rows.len());
}

#[test]
fn test_summary_tab_is_lazy() {
    let (document, _toasts, page) = page();
    let tabs = document.mount(demo::TABS).unwrap();
    assert!(!tabs.to_html().contains("clientes ativos"));

    assert!(page.tabs.set_active_tab(2));
    assert!(tabs.to_html().contains("6 clientes ativos"));
    // The disabled tab cannot be selected.
    assert!(!page.tabs.set_active_tab(3));
}

#[test]
fn test_row_action_shows_toast() {
    let (_document, toasts, page) = page();

    assert!(page.table.trigger_action("editar", "1"));
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts.toasts()[0].message, "Editando Ana Souza");
}

async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_delete_action_asks_before_removing() {
    let (document, toasts, page) = page();

    assert!(page.table.trigger_action("excluir", "1"));
    assert_eq!(page.confirm.message().as_deref(), Some("Excluir o cliente Ana Souza?"));
    assert_eq!(page.table.len(), 10);

    assert!(document.dispatch(&Event::click(page.confirm.confirm_id())));
    settle().await;

    assert!(!page.confirm.is_open());
    assert_eq!(page.clients().len(), 11);
    assert_eq!(page.pagination.total(), 11);
    assert_eq!(page.table.row_ids()[0], "2");
    assert_eq!(toasts.toasts()[0].message, "Cliente Ana Souza excluído");
}

#[tokio::test]
async fn test_cancelled_delete_keeps_client() {
    let (document, toasts, page) = page();

    assert!(page.table.trigger_action("excluir", "3"));
    assert!(document.dispatch(&Event::click(page.confirm.cancel_id())));
    settle().await;

    assert_eq!(page.clients().len(), 12);
    assert_eq!(page.table.row_ids()[2], "3");
    assert!(toasts.is_empty());
}

// ============================================================================
// Client form
// ============================================================================

#[test]
fn test_form_submit_reports_errors() {
    let (document, _toasts, page) = page();
    let form = &page.form;

    assert!(!form.submit());
    assert_eq!(
        form.validator().error("nome").as_deref(),
        Some("Este campo é obrigatório")
    );
    let html = document.mount(demo::FORM).unwrap().to_html();
    assert!(html.contains(r#"class="invalid-feedback""#));
    assert!(html.contains("Este campo é obrigatório"));

    form.set_value("nome", "Ana Souza");
    form.set_value("email", "ana@exemplo.com.br");
    form.set_value("telefone", "(11) 98765-4321");
    assert!(form.submit());
    assert!(!form.validator().has_errors());
    assert!(!document.mount(demo::FORM).unwrap().to_html().contains("invalid-feedback"));
}

#[test]
fn test_form_blur_validates_field() {
    let (document, _toasts, page) = page();
    let form = &page.form;

    assert!(document.dispatch(&Event::input(form.input_id("email"), "ana@")));
    assert_eq!(form.values()["email"], "ana@");
    assert!(!form.validator().has_errors());

    document.dispatch(&Event::Blur {
        target: form.input_id("email"),
    });
    assert_eq!(form.validator().error("email").as_deref(), Some("E-mail inválido"));
}

#[test]
fn test_form_submit_button() {
    let (document, _toasts, page) = page();

    assert!(document.dispatch(&Event::click(page.form.submit_id())));
    assert!(page.form.validator().has_errors());
}
