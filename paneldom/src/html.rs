//! HTML serialization of view trees.
//!
//! Output is deterministic: attributes are emitted in a fixed order
//! (`id`, `class`, sorted attributes, sorted `data-*`, then boolean state).

use std::fmt::Write;

use crate::element::{Content, Element, Tag};

/// Serialize an element tree to markup.
pub fn to_html(root: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, root);
    out
}

fn write_element(out: &mut String, el: &Element) {
    if el.tag == Tag::Text {
        out.push_str(&escape(&el.text_content()));
        return;
    }

    let name = el.tag.name();
    out.push('<');
    out.push_str(name);

    if !el.id.is_empty() {
        write_attr(out, "id", &el.id);
    }
    if !el.classes.is_empty() {
        write_attr(out, "class", &el.classes.join(" "));
    }
    for (key, value) in &el.attrs {
        write_attr(out, key, value);
    }
    for (key, value) in &el.data {
        write_attr(out, &format!("data-{key}"), value);
    }
    if el.focusable && el.tag == Tag::Div {
        write_attr(out, "tabindex", "0");
    }
    if let Some(value) = &el.value
        && el.tag != Tag::Select
    {
        write_attr(out, "value", value);
    }
    if el.checked == Some(true) {
        out.push_str(" checked");
    }
    if el.selected {
        out.push_str(" selected");
    }
    if el.disabled {
        out.push_str(" disabled");
    }
    if el.hidden {
        out.push_str(" hidden");
    }
    out.push('>');

    if el.tag.is_void() {
        return;
    }

    match &el.content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape(text)),
        Content::Children(children) => {
            for child in children {
                write_element(out, child);
            }
        }
    }

    let _ = write!(out, "</{name}>");
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    let _ = write!(out, " {key}=\"{}\"", escape(value));
}

/// Escape text for use in markup and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
