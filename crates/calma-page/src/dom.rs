//! A small arena-backed document tree.
//!
//! Only what the page effects need: element ids, classes, inline styles,
//! link targets, a vertical layout offset for scrolling and a body to hang
//! transient elements from.

use std::collections::{BTreeMap, BTreeSet};

use crate::scroll::ScrollView;

/// Class that keeps an element out of view until removed.
pub const HIDDEN_CLASS: &str = "hidden";

/// Handle of an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A document element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    style: BTreeMap<String, String>,
    href: Option<String>,
    text: String,
    offset_top: f64,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Inline style property, if set.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.style.insert(property.to_string(), value.into());
    }

    pub fn remove_style(&mut self, property: &str) {
        self.style.remove(property);
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn set_href(&mut self, href: impl Into<String>) {
        self.href = Some(href.into());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Distance from the top of the scrollable content.
    pub fn offset_top(&self) -> f64 {
        self.offset_top
    }

    pub fn set_offset_top(&mut self, offset: f64) {
        self.offset_top = offset;
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Hidden through `display: none` or the hidden class.
    pub fn is_hidden(&self) -> bool {
        self.style("display") == Some("none") || self.has_class(HIDDEN_CLASS)
    }
}

/// The page document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    body: ElementId,
    scroll: ScrollView,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only a body.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body"))],
            body: ElementId(0),
            scroll: ScrollView::default(),
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Some(Element::new(tag)));
        ElementId(self.nodes.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Assign the `id` attribute of an element.
    pub fn set_id(&mut self, element: ElementId, id: &str) {
        if let Some(el) = self.element_mut(element) {
            el.id = Some(id.to_string());
        }
    }

    /// Append `child` to `parent`, moving it if it is already attached.
    /// Returns `false` if either element does not exist or the move would
    /// create a cycle.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.contains(parent) || !self.contains(child) || self.is_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        if let Some(el) = self.element_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.element_mut(parent) {
            el.children.push(child);
        }
        true
    }

    pub fn append_to_body(&mut self, child: ElementId) -> bool {
        self.append_child(self.body, child)
    }

    /// Remove an element and its subtree. The body cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.body || !self.contains(id) {
            return false;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(el) = self.nodes.get_mut(next.0).and_then(Option::take) {
                stack.extend(el.children);
            }
        }
        true
    }

    /// First element in document order with the given `id` attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .find(|e| self.element(*e).and_then(Element::id) == Some(id))
    }

    /// Resolve a `#id` selector. Other selectors match nothing.
    pub fn query_selector(&self, selector: &str) -> Option<ElementId> {
        match selector.strip_prefix('#') {
            Some(id) if !id.is_empty() => self.get_element_by_id(id),
            _ => {
                log::debug!("unsupported selector '{selector}'");
                None
            }
        }
    }

    /// All attached `a` elements whose href starts with `#`, in document order.
    pub fn anchor_links(&self) -> Vec<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|e| {
                self.element(*e)
                    .is_some_and(|el| el.tag == "a" && el.href().is_some_and(|h| h.starts_with('#')))
            })
            .collect()
    }

    /// Closest inclusive ancestor matching `predicate`.
    pub fn closest(
        &self,
        start: ElementId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Option<ElementId> {
        let mut current = Some(start);
        while let Some(id) = current {
            let el = self.element(id)?;
            if predicate(el) {
                return Some(id);
            }
            current = el.parent;
        }
        None
    }

    /// Descendants of `root` in document order, excluding `root`.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = match self.element(root) {
            Some(el) => el.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            if let Some(el) = self.element(id) {
                out.push(id);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn scroll_view(&self) -> &ScrollView {
        &self.scroll
    }

    pub fn scroll_view_mut(&mut self) -> &mut ScrollView {
        &mut self.scroll
    }

    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.element_mut(id).and_then(|el| el.parent.take()) else {
            return;
        };
        if let Some(p) = self.element_mut(parent) {
            p.children.retain(|c| *c != id);
        }
    }

    fn is_ancestor(&self, ancestor: ElementId, of: ElementId) -> bool {
        ancestor == of || self.ancestors(of).contains(&ancestor)
    }

    fn ancestors(&self, of: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut current = self.element(of).and_then(|el| el.parent);
        while let Some(id) = current {
            out.push(id);
            current = self.element(id).and_then(|el| el.parent);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn div_with_id(doc: &mut Document, id: &str) -> ElementId {
        let el = doc.create_element("div");
        doc.set_id(el, id);
        doc.append_to_body(el);
        el
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new();
        let a = div_with_id(&mut doc, "welcome-screen");
        let b = div_with_id(&mut doc, "main-content");
        assert_eq!(doc.get_element_by_id("welcome-screen"), Some(a));
        assert_eq!(doc.query_selector("#main-content"), Some(b));
        assert_eq!(doc.query_selector("#missing"), None);
        assert_eq!(doc.query_selector("div"), None);
    }

    #[test]
    fn test_detached_elements_are_not_found() {
        let mut doc = Document::new();
        let el = doc.create_element("div");
        doc.set_id(el, "floating");
        assert_eq!(doc.get_element_by_id("floating"), None);
        doc.append_to_body(el);
        assert_eq!(doc.get_element_by_id("floating"), Some(el));
    }

    #[test]
    fn test_remove_subtree() {
        let mut doc = Document::new();
        let parent = div_with_id(&mut doc, "parent");
        let child = doc.create_element("span");
        doc.append_child(parent, child);

        assert!(doc.remove(parent));
        assert!(!doc.contains(parent));
        assert!(!doc.contains(child));
        assert!(doc.element(doc.body()).unwrap().children().is_empty());
        assert!(!doc.remove(parent));
        assert!(!doc.remove(doc.body()));
    }

    #[test]
    fn test_styles_and_classes() {
        let mut doc = Document::new();
        let el = div_with_id(&mut doc, "main-content");
        let element = doc.element_mut(el).unwrap();
        element.add_class(HIDDEN_CLASS);
        assert!(element.is_hidden());
        element.remove_class(HIDDEN_CLASS);
        assert!(!element.is_hidden());
        element.set_style("display", "none");
        assert!(element.is_hidden());
        assert_eq!(element.style("display"), Some("none"));
        element.remove_style("display");
        assert_eq!(element.style("display"), None);
    }

    #[test]
    fn test_anchor_links_in_document_order() {
        let mut doc = Document::new();
        let nav = doc.create_element("nav");
        doc.append_to_body(nav);
        let mut links = Vec::new();
        for href in ["#one", "https://example.com", "#two"] {
            let a = doc.create_element("A");
            doc.element_mut(a).unwrap().set_href(href);
            doc.append_child(nav, a);
            links.push(a);
        }
        let trailing = doc.create_element("a");
        doc.element_mut(trailing).unwrap().set_href("#three");
        doc.append_to_body(trailing);

        assert_eq!(doc.anchor_links(), vec![links[0], links[2], trailing]);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let outer = div_with_id(&mut doc, "outer");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner);
        assert!(!doc.append_child(inner, outer));
        assert!(!doc.append_child(inner, inner));
    }

    #[test]
    fn test_closest() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        doc.append_to_body(a);
        let span = doc.create_element("span");
        doc.append_child(a, span);
        assert_eq!(doc.closest(span, |el| el.tag() == "a"), Some(a));
        assert_eq!(doc.closest(span, |el| el.tag() == "nav"), None);
    }
}
