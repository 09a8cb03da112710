use std::collections::BTreeMap;

use super::{Content, InputType, Tag};

/// A node of an immutable view tree.
///
/// Elements are plain values: components build a fresh tree on every render
/// and hand it to a [`Mount`](crate::Mount), which swaps it in wholesale.
/// Event handlers are never stored on elements; they live in the mount's
/// listener table keyed by element id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    // Identity (empty = anonymous, not addressable)
    pub id: String,
    pub tag: Tag,

    // Content
    pub content: Content,

    // Presentation hooks
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,

    // Interaction
    pub focusable: bool,
    pub clickable: bool,

    // State
    pub disabled: bool,
    pub hidden: bool,
    /// Checkbox state. `None` for everything that is not a checkbox.
    pub checked: Option<bool>,
    /// Current value of form controls.
    pub value: Option<String>,
    /// Whether an `<option>` is the selected one.
    pub selected: bool,

    // Custom data storage (serialized as data-* attributes)
    pub data: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn span() -> Self {
        Self::new(Tag::Span)
    }

    /// A bare text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: Tag::Text,
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            tag: Tag::Button,
            content: Content::Text(label.into()),
            focusable: true,
            clickable: true,
            ..Default::default()
        }
        .attr("type", "button")
    }

    /// Create an input element.
    pub fn input(kind: InputType) -> Self {
        Self {
            tag: Tag::Input(kind),
            focusable: true,
            value: match kind {
                InputType::Checkbox | InputType::File => None,
                _ => Some(String::new()),
            },
            checked: (kind == InputType::Checkbox).then_some(false),
            ..Default::default()
        }
        .attr("type", kind.as_str())
    }

    pub fn checkbox(checked: bool) -> Self {
        Self::input(InputType::Checkbox).checked(checked)
    }

    pub fn select() -> Self {
        Self {
            tag: Tag::Select,
            focusable: true,
            value: Some(String::new()),
            ..Default::default()
        }
    }

    pub fn option(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: Tag::Option,
            content: Content::Text(label.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self {
            tag: Tag::Label,
            content: Content::Text(text.into()),
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Presentation
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        for name in class.split_whitespace() {
            if !self.has_class(name) {
                self.classes.push(name.to_string());
            }
        }
        self
    }

    /// Add a class only when `condition` holds.
    pub fn class_if(self, condition: bool, class: impl Into<String>) -> Self {
        if condition { self.class(class) } else { self }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn role(self, role: impl Into<String>) -> Self {
        self.attr("role", role)
    }

    /// Set an `aria-*` attribute.
    pub fn aria(self, name: &str, value: impl Into<String>) -> Self {
        self.attr(format!("aria-{name}"), value)
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    // State
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn placeholder(self, text: impl Into<String>) -> Self {
        self.attr("placeholder", text)
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        self.content.text()
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            Content::Text(text) => {
                // Keep existing text as the first child
                let text = std::mem::take(text);
                self.content = Content::Children(vec![Element::text(text), child]);
            }
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self = self.child(child);
        }
        self
    }

    /// Append a child only when it is `Some`.
    pub fn child_opt(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Direct children (empty for text and leaf nodes).
    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }
}
