use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use paneldom::{Element, EventKind, InputType, Listeners, Tag, View};

use super::file::{FileEntry, file_icon};
use super::state::FileUpload;
use crate::format::format_size;

pub(super) fn view(upload: &FileUpload) -> View {
    let shared = &upload.shared;
    let (entries, dragging) = match shared.inner.read() {
        Ok(inner) => (inner.entries.clone(), inner.dragging),
        Err(_) => return View::default(),
    };
    let container = shared.mount.id();
    let input_id = format!("{container}-input");
    let mut listeners = Listeners::new();

    let mut input = Element::input(InputType::File)
        .id(&input_id)
        .class("file-upload-input")
        .attr("accept", &shared.accept)
        .aria("label", "Selecionar arquivos");
    if shared.multiple {
        input = input.attr("multiple", "multiple");
    }

    let mut hint = format!("Tamanho máximo: {}", format_size(shared.max_size));
    if shared.max_files > 1 {
        hint.push_str(&format!(" · Máximo {} arquivos", shared.max_files));
    }

    let dropzone = Element::div()
        .class("file-upload-dropzone")
        .class_if(dragging, "dragging")
        .child(input)
        .child(
            Element::new(Tag::Label)
                .class("file-upload-label")
                .attr("for", &input_id)
                .child(
                    Element::span()
                        .class("file-upload-text")
                        .child(Element::text("Arraste arquivos aqui ou "))
                        .child(Element::new(Tag::Strong).child(Element::text("clique para selecionar"))),
                )
                .child(Element::span().class("file-upload-hint").child(Element::text(hint))),
        );

    let items: Vec<Element> = entries
        .iter()
        .map(|entry| {
            let remove_id = upload.remove_id(entry.id);
            let weak = Arc::downgrade(shared);
            let id = entry.id;
            listeners.on(&remove_id, EventKind::Click, move |_| {
                if let Some(upload) = FileUpload::from_weak(&weak) {
                    upload.remove_file(id);
                }
            });
            file_item(entry, shared.show_preview, remove_id)
        })
        .collect();

    let root = Element::div()
        .id(container)
        .class("file-upload")
        .child(dropzone)
        .child(Element::div().class("file-upload-list").children(items));

    View::new(root, listeners)
}

fn file_item(entry: &FileEntry, show_preview: bool, remove_id: String) -> Element {
    let file = &entry.file;
    let preview = if show_preview && file.is_image() && !file.contents.is_empty() {
        Element::new(Tag::Image)
            .class("file-preview-image")
            .attr("alt", "")
            .attr(
                "src",
                format!("data:{};base64,{}", file.mime, STANDARD.encode(file.contents.as_slice())),
            )
    } else {
        Element::div()
            .class("file-preview-icon")
            .child(Element::text(file_icon(&file.mime)))
    };

    let mut status = Element::span()
        .class("file-status")
        .data("status", entry.status.as_str())
        .child(Element::text(entry.status.label()));
    if let Some(error) = &entry.error {
        status = status.attr("title", error);
    }

    Element::div()
        .class("file-item")
        .data("file-id", entry.id.to_string())
        .child(Element::div().class("file-preview").child(preview))
        .child(
            Element::div()
                .class("file-info")
                .child(Element::div().class("file-name").child(Element::text(&file.name)))
                .child(
                    Element::div()
                        .class("file-meta")
                        .child(
                            Element::span()
                                .class("file-size")
                                .child(Element::text(format_size(file.size))),
                        )
                        .child(status),
                )
                .child(
                    Element::div().class("file-progress").child(
                        Element::div()
                            .class("file-progress-bar")
                            .role("progressbar")
                            .aria("valuenow", entry.progress.to_string())
                            .attr("style", format!("width: {}%", entry.progress)),
                    ),
                ),
        )
        .child(
            Element::button("✕")
                .id(remove_id)
                .class("file-remove")
                .aria("label", "Remover arquivo"),
        )
}
