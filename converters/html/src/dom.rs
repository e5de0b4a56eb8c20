//! A minimal HTML tree.
//!
//! Just enough structure for the post-process pass: elements with ordered
//! attributes, text nodes, class lookup, and an escaping serializer. Element
//! names and attribute names are trusted; text and attribute values are
//! escaped on output.

use std::fmt;

/// A node of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// A text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element and its subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing one of the same name in place.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append `class` to the `class` attribute.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        let classes = match self.attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", classes);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::text(text))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Keep only the attributes for which `keep` returns true.
    pub fn retain_attributes(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.attributes.retain(|(key, value)| keep(key, value));
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Replace the element's inner content.
    pub fn set_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }
}

/// A parsed or generated HTML fragment: an ordered list of top-level nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Html {
    nodes: Vec<Node>,
}

impl Html {
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Call `f` on every element, parents before children.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        walk_mut(&mut self.nodes, f);
    }

    /// Call `f` on elements carrying `class`, in document order.
    ///
    /// The subtree of a matched element is searched too only when `f`
    /// returns `true`.
    pub fn select_class_mut(&mut self, class: &str, f: &mut dyn FnMut(&mut Element) -> bool) {
        select_class_mut(&mut self.nodes, class, f);
    }

    /// Whether any element carries `class`.
    #[must_use]
    pub fn contains_class(&self, class: &str) -> bool {
        contains_class(&self.nodes, class)
    }

    /// Serialize the fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

fn walk_mut(nodes: &mut [Node], f: &mut dyn FnMut(&mut Element)) {
    for node in nodes {
        if let Node::Element(element) = node {
            f(element);
            walk_mut(&mut element.children, f);
        }
    }
}

fn select_class_mut(nodes: &mut [Node], class: &str, f: &mut dyn FnMut(&mut Element) -> bool) {
    for node in nodes {
        if let Node::Element(element) = node {
            let descend = !element.has_class(class) || f(element);
            if descend {
                select_class_mut(&mut element.children, class, f);
            }
        }
    }
}

fn contains_class(nodes: &[Node], class: &str) -> bool {
    nodes.iter().any(|node| match node {
        Node::Element(element) => element.has_class(class) || contains_class(&element.children, class),
        Node::Text(_) => false,
    })
}

/// Escape text content: `&`, `<` and `>`.
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a double-quoted attribute value.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => write!(f, "{element}"),
            Node::Text(text) => f.write_str(&escape_text(text)),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"{}\"", escape_attribute(value))?;
        }
        f.write_str(">")?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
