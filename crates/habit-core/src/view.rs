//! Markup tree and HTML rendering.
//!
//! Views are plain functions returning a [`Node`] tree. Rendering is pure:
//! the same tree always serializes to the same bytes.

/// Heading text of the landing view.
pub const LANDING_HEADING: &str = "Habit Tracker";

/// Welcome paragraph of the landing view.
pub const LANDING_WELCOME: &str = "Welcome to your habit tracking journey!";

/// Stylesheet referenced by [`render_document`].
pub const STYLESHEET_PATH: &str = "/assets/style.css";

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    /// Attributes in insertion order.
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, s: impl Into<String>) -> Self {
        self.child(Node::text(s))
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag)
    }
}

/// The landing view: a container with the app heading and a welcome line.
pub fn landing() -> Node {
    Element::new("div")
        .attr("class", "container")
        .child(Element::new("h1").text(LANDING_HEADING))
        .child(Element::new("p").text(LANDING_WELCOME))
        .into()
}

/// Serializes a tree to HTML. Text and attribute values are escaped.
pub fn render_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

/// Wraps `body` in a complete HTML5 document.
pub fn render_document(title: &str, body: &Node) -> String {
    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(title))
        .child(
            Element::new("link")
                .attr("rel", "stylesheet")
                .attr("href", STYLESHEET_PATH),
        );
    let html: Node = Element::new("html")
        .attr("lang", "en")
        .child(head)
        .child(Element::new("body").child(body.clone()))
        .into();

    let mut out = String::from("<!DOCTYPE html>\n");
    write_node(&mut out, &html);
    out.push('\n');
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(s) => escape_into(out, s, false),
        Node::Element(el) => {
            out.push('<');
            out.push_str(el.tag);
            for (name, value) in &el.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_into(out, value, true);
                out.push('"');
            }
            out.push('>');
            if el.is_void() {
                return;
            }
            for child in &el.children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(el.tag);
            out.push('>');
        }
    }
}

fn escape_into(out: &mut String, s: &str, attr: bool) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
