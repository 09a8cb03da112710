/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer activation of an element
    Click { target: String },
    /// Key press, targeted at the focused element
    Key {
        target: String,
        key: Key,
        modifiers: Modifiers,
    },
    /// Committed value change (select, date, number fields)
    Change { target: String, value: String },
    /// Live text edit
    Input { target: String, value: String },
    /// Checkbox toggled
    Check { target: String, checked: bool },
    /// Element gained focus
    Focus { target: String },
    /// Element lost focus
    Blur { target: String },
}

/// Discriminant used to key listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Click,
    Key,
    Change,
    Input,
    Check,
    Focus,
    Blur,
}

impl Event {
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }

    pub fn key(target: impl Into<String>, key: Key) -> Self {
        Self::Key {
            target: target.into(),
            key,
            modifiers: Modifiers::new(),
        }
    }

    pub fn change(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Change {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn input(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Input {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn check(target: impl Into<String>, checked: bool) -> Self {
        Self::Check {
            target: target.into(),
            checked,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::Key { .. } => EventKind::Key,
            Self::Change { .. } => EventKind::Change,
            Self::Input { .. } => EventKind::Input,
            Self::Check { .. } => EventKind::Check,
            Self::Focus { .. } => EventKind::Focus,
            Self::Blur { .. } => EventKind::Blur,
        }
    }

    /// Id of the element the event is aimed at.
    pub fn target(&self) -> &str {
        match self {
            Self::Click { target }
            | Self::Key { target, .. }
            | Self::Change { target, .. }
            | Self::Input { target, .. }
            | Self::Check { target, .. }
            | Self::Focus { target }
            | Self::Blur { target } => target,
        }
    }

    /// New value carried by `Change` / `Input` events.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Change { value, .. } | Self::Input { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn key_code(&self) -> Option<Key> {
        match self {
            Self::Key { key, .. } => Some(*key),
            _ => None,
        }
    }

    pub fn is_checked(&self) -> Option<bool> {
        match self {
            Self::Check { checked, .. } => Some(*checked),
            _ => None,
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Enter or Space: the keys that activate buttons.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }

    /// Parse a DOM `KeyboardEvent.key` name.
    pub fn from_dom(name: &str) -> Option<Self> {
        let key = match name {
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Tab" => Key::Tab,
            "Escape" => Key::Escape,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}
