//! A small element tree standing in for browser DOM nodes.
//!
//! Elements are plain owned values. The few nodes that react to clicks carry
//! a [`NodeId`] handed out by the [`View`](crate::View); everything else is
//! anonymous markup.

use askama::Template;
use std::fmt;

/// Identity of an interactive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    node: Option<NodeId>,
    classes: Vec<&'static str>,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            node: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.add_class(class);
        self
    }

    pub fn classes(mut self, classes: &[&'static str]) -> Self {
        for class in classes {
            self.add_class(class);
        }
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_class(&mut self, class: &'static str) {
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Drop all content, keeping the element's own tag and attributes.
    pub fn clear(&mut self) {
        self.text = None;
        self.children.clear();
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn class_list(&self) -> &[&'static str] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    pub fn own_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }

    /// Concatenated text of this element and its descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Depth-first search for the element carrying `node`.
    pub fn find(&self, node: NodeId) -> Option<&Element> {
        if self.node == Some(node) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(node))
    }

    /// All descendants (not including `self`) having `class`, in document order.
    pub fn query_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        for child in &self.children {
            child.query_class_into(class, &mut found);
        }
        found
    }

    fn query_class_into<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.query_class_into(class, found);
        }
    }

    fn is_void(&self) -> bool {
        matches!(self.tag, "img" | "input" | "br" | "hr")
    }
}

/// One element's markup; children arrive already rendered.
#[derive(Template)]
#[template(
    source = "<{{ tag }}{% if !classes.is_empty() %} class=\"{{ classes }}\"{% endif %}{% for (name, value) in attrs %} {{ name }}=\"{{ value }}\"{% endfor %}>{% if !void %}{{ text }}{{ children|safe }}</{{ tag }}>{% endif %}",
    ext = "html"
)]
struct ElementTemplate<'a> {
    tag: &'a str,
    classes: String,
    attrs: &'a [(&'static str, String)],
    text: &'a str,
    children: String,
    void: bool,
}

/// Serializes the tree as HTML markup.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let template = ElementTemplate {
            tag: self.tag,
            classes: self.classes.join(" "),
            attrs: &self.attrs,
            text: self.text.as_deref().unwrap_or_default(),
            children: self.children.iter().map(Element::to_string).collect(),
            void: self.is_void(),
        };
        write!(f, "{template}")
    }
}
