use crate::element::{Content, Element};

/// Tracks which element of a mount is currently focused.
#[derive(Debug, Default, Clone)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the focused element, if any.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Move focus to `id`. False when it already had focus.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Drop focus. False when nothing was focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Tab: advance to the next focusable element, wrapping at the end.
    pub fn focus_next(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        if focusable.is_empty() {
            return None;
        }

        let next = self
            .position_in(&focusable)
            .map_or(0, |i| (i + 1) % focusable.len());
        let id = focusable[next].clone();
        self.focus(&id).then_some(id)
    }

    /// Shift+Tab: step back, wrapping to the last element.
    pub fn focus_prev(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        if focusable.is_empty() {
            return None;
        }

        let prev = match self.position_in(&focusable) {
            Some(i) if i > 0 => i - 1,
            _ => focusable.len() - 1,
        };
        let id = focusable[prev].clone();
        self.focus(&id).then_some(id)
    }

    fn position_in(&self, ids: &[String]) -> Option<usize> {
        let current = self.focused.as_deref()?;
        ids.iter().position(|id| id == current)
    }

    /// Drop focus if the focused element no longer exists in `root`.
    pub fn retain_in(&mut self, root: &Element) {
        if let Some(id) = &self.focused
            && crate::element::find_element(root, id).is_none()
        {
            log::debug!("focused element '{id}' vanished after render");
            self.focused = None;
        }
    }
}

/// Ids of every focusable, enabled, visible element in document order.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(element, &mut result);
    result
}

fn collect_focusable_recursive(element: &Element, result: &mut Vec<String>) {
    if element.hidden {
        return;
    }
    if element.focusable && !element.disabled && !element.id.is_empty() {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_focusable_recursive(child, result);
        }
    }
}
