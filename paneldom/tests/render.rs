use paneldom::element::find_by_class;
use paneldom::{collect_focusable, find_element, to_html, Element, FocusState, InputType, Key};

// ============================================================================
// HTML serialization
// ============================================================================

#[test]
fn test_html_basic_structure() {
    let root = Element::div()
        .id("panel")
        .class("card")
        .class("open")
        .child(Element::span().class("title").child(Element::text("Hello")));

    assert_eq!(
        to_html(&root),
        r#"<div id="panel" class="card open"><span class="title">Hello</span></div>"#
    );
}

#[test]
fn test_html_escapes_text_and_attributes() {
    let root = Element::div()
        .attr("title", "a \"quoted\" <value>")
        .child(Element::text("<script>&"));

    assert_eq!(
        to_html(&root),
        r#"<div title="a &quot;quoted&quot; &lt;value&gt;">&lt;script&gt;&amp;</div>"#
    );
}

#[test]
fn test_html_void_and_boolean_attributes() {
    let input = Element::checkbox(true).id("c").disabled(true);
    assert_eq!(
        to_html(&input),
        r#"<input id="c" type="checkbox" checked disabled>"#
    );

    let text = Element::input(InputType::Text).value("abc");
    assert_eq!(to_html(&text), r#"<input type="text" value="abc">"#);
}

#[test]
fn test_html_data_attributes_sorted() {
    let el = Element::div().data("tab-index", "2").data("accordion", "x");
    assert_eq!(
        to_html(&el),
        r#"<div data-accordion="x" data-tab-index="2"></div>"#
    );
}

#[test]
fn test_html_select_options() {
    let select = Element::select()
        .id("size")
        .value("25")
        .child(Element::option("10", "10"))
        .child(Element::option("25", "25").selected(true));

    assert_eq!(
        to_html(&select),
        r#"<select id="size"><option value="10">10</option><option value="25" selected>25</option></select>"#
    );
}

// ============================================================================
// Tree queries
// ============================================================================

#[test]
fn test_find_element_and_class() {
    let root = Element::div()
        .id("root")
        .child(Element::div().class("toast").id("t1"))
        .child(Element::div().class("toast").id("t2"))
        .child(Element::div().class("other"));

    assert_eq!(find_element(&root, "t2").map(|e| e.id.as_str()), Some("t2"));
    assert!(find_element(&root, "").is_none());
    assert_eq!(find_by_class(&root, "toast").len(), 2);
}

#[test]
fn test_child_after_text_keeps_text() {
    let el = Element::button("Save").child(Element::span().child(Element::text("!")));
    assert_eq!(el.text_content(), "Save!");
}

#[test]
fn test_class_deduplicates() {
    let el = Element::div().class("a b").class("a");
    assert_eq!(el.classes, vec!["a".to_string(), "b".to_string()]);
}

// ============================================================================
// Focus traversal
// ============================================================================

#[test]
fn test_collect_focusable_skips_disabled_and_hidden() {
    let root = Element::div()
        .child(Element::button("a").id("a"))
        .child(Element::button("b").id("b").disabled(true))
        .child(Element::div().hidden(true).child(Element::button("c").id("c")))
        .child(Element::button("d").id("d"));

    assert_eq!(collect_focusable(&root), vec!["a".to_string(), "d".to_string()]);
}

#[test]
fn test_focus_next_and_prev_wrap() {
    let root = Element::div()
        .child(Element::button("a").id("a"))
        .child(Element::button("b").id("b"));
    let mut focus = FocusState::new();

    assert_eq!(focus.focus_next(&root).as_deref(), Some("a"));
    assert_eq!(focus.focus_next(&root).as_deref(), Some("b"));
    assert_eq!(focus.focus_next(&root).as_deref(), Some("a"));
    assert_eq!(focus.focus_prev(&root).as_deref(), Some("b"));
}

#[test]
fn test_key_from_dom_names() {
    assert_eq!(Key::from_dom("ArrowRight"), Some(Key::Right));
    assert_eq!(Key::from_dom(" "), Some(Key::Char(' ')));
    assert_eq!(Key::from_dom("Unidentified"), None);
    assert!(Key::Char(' ').is_activation());
}
