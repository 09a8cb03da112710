mod content;
mod node;
mod tag;

pub use content::Content;
pub use node::Element;
pub use tag::{InputType, Tag};

/// Find an element by ID in the tree.
///
/// Anonymous elements (empty id) never match.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if !root.id.is_empty() && root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Collect every element in the tree (depth-first, document order) matching `predicate`.
pub fn find_all<'a>(root: &'a Element, predicate: impl Fn(&Element) -> bool) -> Vec<&'a Element> {
    fn walk<'a>(el: &'a Element, predicate: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if predicate(el) {
            out.push(el);
        }
        if let Content::Children(children) = &el.content {
            for child in children {
                walk(child, predicate, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(root, &predicate, &mut out);
    out
}

/// Collect every element carrying the given class.
pub fn find_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    find_all(root, |el| el.has_class(class))
}
