//! Sample "Clientes" page wiring every component together.
//!
//! Used by the binary to produce an HTML snapshot and by the integration
//! tests as an end-to-end fixture.

use std::sync::{Arc, RwLock, Weak};
use std::time::Duration;

use paneldom::{Document, Element, EventKind, InputType, Listeners, Mount, View};
use panelkit::components::filter::FilterValues;
use panelkit::components::table::row_id;
use panelkit::format::format_currency;
use panelkit::prelude::*;
use panelkit::validation::FieldValues;
use serde_json::{Value, json};
use tokio::runtime::Handle;

pub const TABS: &str = "clientes-tabs";
pub const FILTERS: &str = "clientes-filtros";
pub const TABLE: &str = "clientes-tabela";
pub const PAGINATION: &str = "clientes-paginacao";
pub const FAQ: &str = "clientes-ajuda";
pub const ATTACHMENTS: &str = "clientes-anexos";
pub const FORM: &str = "clientes-form";

/// Every mount the page renders into, in page order.
pub const CONTAINERS: [&str; 7] = [TABS, FILTERS, TABLE, PAGINATION, FAQ, ATTACHMENTS, FORM];

const PAGE_SIZE: usize = 10;

/// Seed records shown by the table.
pub fn sample_clients() -> Vec<Row> {
    let seed = [
        ("Ana Souza", "ana@exemplo.com.br", 1520.5, "active", "2024-02-10"),
        ("Bruno Lima", "bruno@exemplo.com.br", 0.0, "inactive", "2023-11-03"),
        ("Carla Dias", "carla@exemplo.com.br", 8900.0, "active", "2024-05-22"),
        ("Diego Alves", "diego@exemplo.com.br", 310.75, "pending", "2024-01-15"),
        ("Elisa Rocha", "elisa@exemplo.com.br", 12500.0, "active", "2022-08-30"),
        ("Fábio Nunes", "fabio@exemplo.com.br", 45.9, "pending", "2024-06-01"),
        ("Gabriela Melo", "gabriela@exemplo.com.br", 2300.0, "inactive", "2023-03-12"),
        ("Heitor Pires", "heitor@exemplo.com.br", 760.0, "active", "2024-04-18"),
        ("Isabela Costa", "isabela@exemplo.com.br", 5100.25, "active", "2023-09-09"),
        ("João Martins", "joao@exemplo.com.br", 99.0, "pending", "2024-07-02"),
        ("Karina Prado", "karina@exemplo.com.br", 640.0, "active", "2023-12-24"),
        ("Lucas Barros", "lucas@exemplo.com.br", 0.0, "inactive", "2022-05-05"),
    ];
    seed.iter()
        .enumerate()
        .filter_map(|(i, (nome, email, saldo, status, desde))| {
            match json!({
                "id": i + 1,
                "nome": nome,
                "email": email,
                "saldo": saldo,
                "status": status,
                "desde": desde,
            }) {
                Value::Object(row) => Some(row),
                _ => None,
            }
        })
        .collect()
}

/// Rows matching the filter values (`nome` substring, exact `status`).
pub fn filter_rows(rows: &[Row], values: &FilterValues) -> Vec<Row> {
    let text = |row: &Row, field: &str| {
        row.get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase()
    };
    let name = values.get("nome").map(|v| v.trim().to_lowercase()).unwrap_or_default();
    let status = values.get("status").cloned().unwrap_or_default();

    rows.iter()
        .filter(|row| name.is_empty() || text(row, "nome").contains(&name))
        .filter(|row| status.is_empty() || text(row, "status") == status)
        .cloned()
        .collect()
}

fn page_of(rows: &[Row], page: usize, size: usize) -> Vec<Row> {
    rows.iter()
        .skip(page.saturating_sub(1) * size)
        .take(size)
        .cloned()
        .collect()
}

/// Table and pagination of the client list, set once both exist and
/// cleared on destroy.
type ListViews = Arc<RwLock<Option<(DataTable, Pagination)>>>;

fn client_name<'a>(row: Option<&'a Row>, id: &'a str) -> &'a str {
    row.and_then(|r| r.get("nome"))
        .and_then(Value::as_str)
        .unwrap_or(id)
}

/// The assembled page.
pub struct DemoPage {
    pub tabs: Tabs,
    pub filters: FilterPanel,
    pub table: DataTable,
    pub pagination: Pagination,
    pub faq: Accordion,
    pub attachments: FileUpload,
    pub form: ClientForm,
    pub confirm: ConfirmDialog,
    clients: Arc<RwLock<Vec<Row>>>,
    list: ListViews,
    document: Document,
}

impl DemoPage {
    /// Create the page mounts in `document` and build every component.
    pub fn build(document: &Document, toasts: &ToastFeed) -> Result<Self, ComponentError> {
        for container in CONTAINERS {
            document.create_mount(container);
        }

        let all = sample_clients();
        let clients = Arc::new(RwLock::new(all.clone()));
        let matching = Arc::new(RwLock::new(all.clone()));
        let list: ListViews = Arc::new(RwLock::new(None));
        let confirm = ConfirmDialog::new(document, ConfirmConfig::default());

        let tabs = Tabs::new(
            document,
            TabsConfig::new(
                TABS,
                vec![
                    TabDescriptor::new("Lista", "Clientes cadastrados").icon("📋"),
                    TabDescriptor::new("Cadastro", "Novo cliente").icon("➕"),
                    summary_tab(&all),
                    TabDescriptor::new("Auditoria", "Sem permissão").disabled(true),
                ],
            )
            .variant(TabsVariant::Pills),
        )?;

        let feed = toasts.clone();
        let remove = {
            let (confirm, feed) = (confirm.clone(), toasts.clone());
            let (clients, matching, list) = (Arc::clone(&clients), Arc::clone(&matching), Arc::clone(&list));
            move |row: Option<&Row>, id: &str| {
                let Ok(handle) = Handle::try_current() else {
                    log::warn!("no async runtime, cannot wait for confirmation");
                    return;
                };
                let name = client_name(row, id).to_string();
                let answer = confirm.ask(format!("Excluir o cliente {name}?"));
                let (feed, clients, matching, list) =
                    (feed.clone(), Arc::clone(&clients), Arc::clone(&matching), Arc::clone(&list));
                let id = id.to_string();
                handle.spawn(async move {
                    if !answer.await {
                        return;
                    }
                    remove_client(&clients, &matching, &list, &id);
                    feed.success(format!("Cliente {name} excluído"));
                });
            }
        };
        let table = DataTable::new(
            document,
            DataTableConfig::new(
                TABLE,
                vec![
                    Column::new("id", "ID").kind(ColumnType::Number),
                    Column::new("nome", "Nome"),
                    Column::new("email", "E-mail").sortable(false),
                    Column::new("saldo", "Saldo").kind(ColumnType::Currency),
                    Column::new("desde", "Cliente desde").kind(ColumnType::Date),
                    Column::new("status", "Status").kind(ColumnType::Status).sortable(false),
                ],
            )
            .rows(page_of(&all, 1, PAGE_SIZE))
            .selectable(true)
            .action(
                RowAction::new("editar", "Editar", move |row, id| {
                    feed.info(format!("Editando {}", client_name(row, id)));
                })
                .icon("✏️"),
            )
            .action(
                RowAction::new("excluir", "Excluir", remove)
                    .icon("🗑️")
                    .variant("danger"),
            ),
        )?;

        let pagination = {
            let table = table.clone();
            let matching = Arc::clone(&matching);
            Pagination::new(
                document,
                PaginationConfig::new(PAGINATION, all.len())
                    .page_size(PAGE_SIZE)
                    .on_page_change(move |page, size| {
                        if let Ok(rows) = matching.read() {
                            table.update(page_of(&rows, page, size));
                        }
                    }),
            )?
        };

        let filters = {
            let apply = (table.clone(), pagination.clone(), Arc::clone(&matching));
            let reset = apply.clone();
            let (stored, everything) = (Arc::clone(&clients), Arc::clone(&clients));
            FilterPanel::new(
                document,
                FilterPanelConfig::new(
                    FILTERS,
                    vec![
                        FilterDescriptor::new("nome", "Nome", FilterKind::Text)
                            .placeholder("Buscar por nome"),
                        FilterDescriptor::new("status", "Status", FilterKind::Select).options(vec![
                            SelectOption::new("active", "Ativo"),
                            SelectOption::new("inactive", "Inativo"),
                            SelectOption::new("pending", "Pendente"),
                        ]),
                        FilterDescriptor::new("desde", "Cliente desde", FilterKind::DateRange),
                    ],
                )
                .on_apply(move |values| {
                    let (table, pagination, matching) = &apply;
                    let rows = stored.read().map(|r| filter_rows(&r, values)).unwrap_or_default();
                    show_matching(table, pagination, matching, rows);
                })
                .on_reset(move || {
                    let (table, pagination, matching) = &reset;
                    let rows = everything.read().map(|r| r.clone()).unwrap_or_default();
                    show_matching(table, pagination, matching, rows);
                }),
            )?
        };

        let faq = Accordion::new(
            document,
            AccordionConfig::new(
                FAQ,
                vec![
                    AccordionItem::new(
                        "Como cadastrar um cliente?",
                        "Use a aba Cadastro e preencha os campos obrigatórios.",
                    ),
                    AccordionItem::new(
                        "Quais arquivos posso anexar?",
                        "PDF, planilhas e imagens de até 10 MB.",
                    ),
                    AccordionItem::new("Como exportar a lista?", "Selecione os clientes e use Exportar.")
                        .badge("novo"),
                ],
            )
            .default_open([0]),
        )?;

        let attachments = FileUpload::new(
            document,
            FileUploadConfig::new(ATTACHMENTS)
                .multiple(true)
                .accept(".pdf,.xlsx,image/*")
                .max_size(10 * 1024 * 1024)
                .max_files(5)
                .toasts(toasts.clone())
                .on_upload(|file, progress| async move {
                    log::info!("uploading {} ({} bytes)", file.name, file.size);
                    for percent in [25, 50, 75] {
                        tokio::time::sleep(Duration::from_millis(150)).await;
                        progress.report(percent);
                    }
                    Ok(())
                }),
        )?;

        let form = ClientForm::new(document, FORM)?;

        if let Ok(mut views) = list.write() {
            *views = Some((table.clone(), pagination.clone()));
        }

        Ok(Self {
            tabs,
            filters,
            table,
            pagination,
            faq,
            attachments,
            form,
            confirm,
            clients,
            list,
            document: document.clone(),
        })
    }

    /// Markup of every page mount, in page order.
    pub fn snapshot(&self) -> String {
        CONTAINERS
            .iter()
            .filter_map(|id| self.document.mount(id))
            .map(|mount| mount.to_html())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn destroy(&self) {
        self.tabs.destroy();
        self.filters.destroy();
        self.table.destroy();
        self.pagination.destroy();
        self.faq.destroy();
        self.attachments.destroy();
        self.form.destroy();
        self.confirm.destroy();
        if let Ok(mut views) = self.list.write() {
            views.take();
        }
    }

    /// Remaining client records, filtered or not.
    pub fn clients(&self) -> Vec<Row> {
        self.clients.read().map(|r| r.clone()).unwrap_or_default()
    }
}

/// Show the first page of a new result set.
fn show_matching(
    table: &DataTable,
    pagination: &Pagination,
    matching: &RwLock<Vec<Row>>,
    rows: Vec<Row>,
) {
    pagination.update(PaginationUpdate {
        total: Some(rows.len()),
        current_page: Some(1),
        page_size: None,
    });
    table.update(page_of(&rows, 1, pagination.page_size()));
    if let Ok(mut current) = matching.write() {
        *current = rows;
    }
}

/// Drop a client from the store and the current result set, keeping the
/// current page when it still exists.
fn remove_client(
    clients: &RwLock<Vec<Row>>,
    matching: &RwLock<Vec<Row>>,
    list: &ListViews,
    id: &str,
) {
    let keep = |rows: &mut Vec<Row>| {
        let mut index = 0;
        rows.retain(|row| {
            index += 1;
            row_id(row, index - 1) != id
        });
    };
    if let Ok(mut rows) = clients.write() {
        keep(&mut rows);
    }
    let rows = match matching.write() {
        Ok(mut rows) => {
            keep(&mut rows);
            rows.clone()
        }
        Err(_) => return,
    };

    let Some((table, pagination)) = list.read().ok().and_then(|v| v.clone()) else {
        return;
    };
    pagination.update(PaginationUpdate {
        total: Some(rows.len()),
        current_page: None,
        page_size: None,
    });
    table.update(page_of(&rows, pagination.current_page(), pagination.page_size()));
    log::info!("client {id} removed");
}

/// Totals tab, computed each time it is shown.
fn summary_tab(rows: &[Row]) -> TabDescriptor {
    let total: f64 = rows
        .iter()
        .filter_map(|r| r.get("saldo").and_then(Value::as_f64))
        .sum();
    let active = rows
        .iter()
        .filter(|r| r.get("status").and_then(Value::as_str) == Some("active"))
        .count();
    TabDescriptor::new(
        "Resumo",
        PanelContent::lazy(move || {
            Element::div()
                .class("summary")
                .child(Element::text(format!("{active} clientes ativos")))
                .child(Element::text(format!("Saldo total: {}", format_currency(total))))
        }),
    )
    .badge(rows.len().to_string())
}

// -----------------------------------------------------------------------------
// Client form
// -----------------------------------------------------------------------------

/// Inputs of the client form, in display order: `(name, label, type)`.
pub const FORM_FIELDS: [(&str, &str, InputType); 4] = [
    ("nome", "Nome", InputType::Text),
    ("email", "E-mail", InputType::Email),
    ("telefone", "Telefone", InputType::Text),
    ("limite", "Limite de crédito", InputType::Number),
];

struct FormShared {
    mount: Mount,
    validator: FormValidator,
    values: RwLock<FieldValues>,
}

/// Client form validated on blur, while typing once invalid, and on
/// submit.
#[derive(Clone)]
pub struct ClientForm {
    shared: Arc<FormShared>,
}

impl ClientForm {
    pub fn new(document: &Document, container: &str) -> Result<Self, ComponentError> {
        let mount = panelkit::component::resolve_mount(document, container, "client form")?;
        let shared = Arc::new_cyclic(|weak: &Weak<FormShared>| {
            let weak = weak.clone();
            let validator = FormValidator::builder()
                .field("nome", FieldRules::new().required().min_length(3))
                .field("email", FieldRules::new().required().email())
                .field("telefone", FieldRules::new().phone())
                .field("limite", FieldRules::new().number().min(0.0))
                .on_error(move |field, message| {
                    log::debug!("client form: {field} -> {message:?}");
                    if let Some(shared) = weak.upgrade() {
                        ClientForm { shared }.render();
                    }
                })
                .build();
            FormShared {
                mount,
                validator,
                values: RwLock::new(FieldValues::new()),
            }
        });
        let form = Self { shared };
        form.render();
        Ok(form)
    }

    pub fn validator(&self) -> &FormValidator {
        &self.shared.validator
    }

    pub fn values(&self) -> FieldValues {
        self.shared.values.read().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn input_id(&self, field: &str) -> String {
        format!("{}-{field}", self.shared.mount.id())
    }

    pub fn submit_id(&self) -> String {
        format!("{}-submit", self.shared.mount.id())
    }

    pub fn set_value(&self, field: &str, value: &str) {
        if let Ok(mut values) = self.shared.values.write() {
            values.insert(field.to_string(), value.to_string());
        }
        self.render();
        self.shared.validator.input(field, value);
    }

    /// Validate every field. Returns true when the form can be sent.
    pub fn submit(&self) -> bool {
        let mut values = self.values();
        for (name, _, _) in FORM_FIELDS {
            values.entry(name.to_string()).or_default();
        }
        let valid = self.shared.validator.validate(&values).is_valid();
        self.render();
        valid
    }

    fn blur(&self, field: &str) {
        let value = self.values().get(field).cloned().unwrap_or_default();
        self.shared.validator.blur(field, &value);
    }

    fn view(&self) -> View {
        let values = self.values();
        let mut listeners = Listeners::new();

        let fields = FORM_FIELDS.iter().map(|(name, label, kind)| {
            let id = self.input_id(name);
            let weak = Arc::downgrade(&self.shared);
            let field = name.to_string();
            listeners.on(&id, EventKind::Input, move |event| {
                if let (Some(shared), Some(value)) = (weak.upgrade(), event.value()) {
                    ClientForm { shared }.set_value(&field, value);
                }
            });
            let weak = Arc::downgrade(&self.shared);
            let field = name.to_string();
            listeners.on(&id, EventKind::Blur, move |_| {
                if let Some(shared) = weak.upgrade() {
                    ClientForm { shared }.blur(&field);
                }
            });

            let input = Element::input(*kind)
                .id(&id)
                .class("form-control")
                .attr("name", *name)
                .value(values.get(*name).cloned().unwrap_or_default());
            Element::div()
                .class("form-group")
                .child(Element::label(*label).attr("for", id))
                .child(self.shared.validator.decorate(name, input))
        });
        let fields: Vec<Element> = fields.collect();

        let submit_id = self.submit_id();
        let weak = Arc::downgrade(&self.shared);
        listeners.on(&submit_id, EventKind::Click, move |_| {
            if let Some(shared) = weak.upgrade() {
                ClientForm { shared }.submit();
            }
        });

        let root = Element::div()
            .id(self.shared.mount.id())
            .class("client-form")
            .children(fields)
            .child(Element::button("Salvar").id(submit_id).class("btn btn-primary"));
        View::new(root, listeners)
    }

    pub fn render(&self) {
        self.shared.mount.replace(self.view());
    }

    pub fn destroy(&self) {
        self.shared.validator.reset();
        self.shared.mount.clear();
    }
}
