//! Node tree – the small in-memory markup tree the element builders write
//! into, and its serialisation to an HTML string.
//!
//! Attributes and style declarations keep insertion order so the emitted
//! markup is byte-for-byte reproducible.

use std::io;

use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever::serialize::{Serialize, Serializer, TraversalScope};
use markup5ever::{LocalName, Namespace, QualName};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

// ---------------------------------------------------------------------------
// DOM types
// ---------------------------------------------------------------------------

/// The tag name of an emitted element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Html,
    Head,
    Meta,
    Title,
    Style,
    Body,
    Div,
    Span,
    Br,
    Img,
    Table,
    Tr,
    Td,
    /// Any other tag name, emitted verbatim.
    Other(String),
}

impl Tag {
    pub fn from_name(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "html" => Tag::Html,
            "head" => Tag::Head,
            "meta" => Tag::Meta,
            "title" => Tag::Title,
            "style" => Tag::Style,
            "body" => Tag::Body,
            "div" => Tag::Div,
            "span" => Tag::Span,
            "br" => Tag::Br,
            "img" => Tag::Img,
            "table" => Tag::Table,
            "tr" => Tag::Tr,
            "td" => Tag::Td,
            other => Tag::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Html => "html",
            Tag::Head => "head",
            Tag::Meta => "meta",
            Tag::Title => "title",
            Tag::Style => "style",
            Tag::Body => "body",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Br => "br",
            Tag::Img => "img",
            Tag::Table => "table",
            Tag::Tr => "tr",
            Tag::Td => "td",
            Tag::Other(name) => name,
        }
    }

    /// Void elements never carry children.
    pub fn is_void(&self) -> bool {
        matches!(self, Tag::Meta | Tag::Br | Tag::Img)
    }
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Element(ElementNode),
    Text(String),
}

impl DomNode {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            DomNode::Element(e) => Some(e),
            DomNode::Text(_) => None,
        }
    }
}

/// An element node carrying tag, attributes, inline style and children.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: Tag,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    pub children: Vec<DomNode>,
}

impl ElementNode {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value. `style` is managed
    /// through [`ElementNode::set_style`] instead.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        upsert(&mut self.attributes, name, value.into());
        self
    }

    /// Set one inline style property, keeping its original position if it
    /// was already present.
    pub fn set_style(&mut self, property: &str, value: impl Into<String>) -> &mut Self {
        upsert(&mut self.style, property, value.into());
        self
    }

    pub fn append_child(&mut self, child: ElementNode) -> &mut Self {
        self.children.push(DomNode::Element(child));
        self
    }

    pub fn append_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(DomNode::Text(text.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.attributes, name)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        lookup(&self.style, property)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn classes(&self) -> Vec<&str> {
        self.attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// The `style` attribute value as it will be serialised.
    pub fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Child elements, skipping text nodes.
    pub fn element_children(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(DomNode::as_element)
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Depth-first search for the element with the given `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&ElementNode> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.element_children().find_map(|c| c.find_by_id(id))
    }

    /// Swap the descendant with the given `id` for `replacement`. Returns
    /// `false` when no such descendant exists.
    pub fn replace_by_id(&mut self, id: &str, replacement: ElementNode) -> bool {
        let mut pending = Some(replacement);
        self.replace_in_children(id, &mut pending);
        pending.is_none()
    }

    fn replace_in_children(&mut self, id: &str, pending: &mut Option<ElementNode>) {
        for child in &mut self.children {
            let DomNode::Element(e) = child else {
                continue;
            };
            if e.id() == Some(id) {
                if let Some(replacement) = pending.take() {
                    *e = replacement;
                }
                return;
            }
            e.replace_in_children(id, pending);
            if pending.is_none() {
                return;
            }
        }
    }

    /// Serialise this element and its subtree.
    pub fn to_markup(&self) -> String {
        write_markup(self)
    }
}

fn upsert(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    match pairs.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value,
        None => pairs.push((key.to_string(), value)),
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn collect_text(e: &ElementNode, out: &mut String) {
    for child in &e.children {
        match child {
            DomNode::Text(t) => out.push_str(t),
            DomNode::Element(c) => collect_text(c, out),
        }
    }
}

// ---------------------------------------------------------------------------
// Serialisation
// ---------------------------------------------------------------------------

fn html_name(local: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(local))
}

fn attr_name(local: &str) -> QualName {
    QualName::new(None, Namespace::from(""), LocalName::from(local))
}

impl Serialize for ElementNode {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let include_self = matches!(traversal_scope, TraversalScope::IncludeNode);
        let name = html_name(self.tag.name());

        if include_self {
            let mut attrs: Vec<(QualName, String)> = self
                .attributes
                .iter()
                .map(|(k, v)| (attr_name(k), v.clone()))
                .collect();
            if !self.style.is_empty() {
                attrs.push((attr_name("style"), self.style_text()));
            }
            serializer.start_elem(name.clone(), attrs.iter().map(|(k, v)| (k, v.as_str())))?;
        }

        if !self.tag.is_void() {
            for child in &self.children {
                child.serialize(serializer, TraversalScope::IncludeNode)?;
            }
        }

        if include_self {
            serializer.end_elem(name)?;
        }
        Ok(())
    }
}

impl Serialize for DomNode {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match self {
            DomNode::Element(e) => e.serialize(serializer, traversal_scope),
            DomNode::Text(t) => serializer.write_text(t),
        }
    }
}

/// A complete HTML document: `<!DOCTYPE html><html>head body</html>`,
/// borrowing its parts so callers need not assemble one owned tree.
pub struct HtmlDocument<'a> {
    pub head: &'a ElementNode,
    pub body: &'a ElementNode,
}

impl Serialize for HtmlDocument<'_> {
    fn serialize<S>(&self, serializer: &mut S, _traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        serializer.write_doctype("html")?;
        let html = html_name("html");
        serializer.start_elem(html.clone(), std::iter::empty())?;
        self.head.serialize(serializer, TraversalScope::IncludeNode)?;
        self.body.serialize(serializer, TraversalScope::IncludeNode)?;
        serializer.end_elem(html)
    }
}

impl HtmlDocument<'_> {
    pub fn to_markup(&self) -> String {
        write_markup(self)
    }
}

fn write_markup<T: Serialize>(node: &T) -> String {
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..SerializeOpts::default()
    };
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = serialize(&mut out, node, opts);
    String::from_utf8_lossy(&out).into_owned()
}
