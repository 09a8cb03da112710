/// Input control flavour for [`Tag::Input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputType {
    #[default]
    Text,
    Number,
    Date,
    Checkbox,
    File,
    Email,
    Password,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::File => "file",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Node kind of an [`Element`](super::Element).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    /// Bare text node (serialized without a wrapper).
    Text,
    #[default]
    Div,
    Span,
    Strong,
    Paragraph,
    Heading(u8),
    Button,
    Link,
    Label,
    Input(InputType),
    Select,
    Option,
    Image,
    Table,
    TableHead,
    TableBody,
    TableRow,
    HeaderCell,
    Cell,
}

impl Tag {
    /// HTML element name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "",
            Self::Div => "div",
            Self::Span => "span",
            Self::Strong => "strong",
            Self::Paragraph => "p",
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
            Self::Button => "button",
            Self::Link => "a",
            Self::Label => "label",
            Self::Input(_) => "input",
            Self::Select => "select",
            Self::Option => "option",
            Self::Image => "img",
            Self::Table => "table",
            Self::TableHead => "thead",
            Self::TableBody => "tbody",
            Self::TableRow => "tr",
            Self::HeaderCell => "th",
            Self::Cell => "td",
        }
    }

    /// Void elements have no closing tag and no children.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Image)
    }
}
