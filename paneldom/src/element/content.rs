#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
}

impl Content {
    /// Concatenated text of this content and all descendants.
    pub fn text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Text(s) => s.clone(),
            Self::Children(children) => children.iter().map(|c| c.content.text()).collect(),
        }
    }
}
