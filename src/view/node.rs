use std::borrow::Cow;
use std::fmt;

use crate::runtime::msg::Action;

/// DOM event listeners a node asks for.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Handler {
    Click(Action),
    TransitionEnd(Action),
    /// Form submit, the bridge reads the email input and dispatches
    /// `ActionPopup::SubmitEmail`. The default submission is always prevented.
    SubmitEmail,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Element {
    pub tag: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub styles: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub handlers: Vec<Handler>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: vec![],
            styles: vec![],
            children: vec![],
            handlers: vec![],
        }
    }
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }
    pub fn id(self, id: &'static str) -> Self {
        self.attr("id", id)
    }
    pub fn class(self, class: &'static str) -> Self {
        self.attr("class", class)
    }
    pub fn style(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.styles.push((name, value.into()));
        self
    }
    pub fn styles(mut self, styles: &[(&'static str, &'static str)]) -> Self {
        self.styles.extend(
            styles
                .iter()
                .map(|(name, value)| (*name, (*value).to_owned())),
        );
        self
    }
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
    pub fn children<I: IntoIterator<Item = Node>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }
    pub fn on(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attribute, _)| *attribute == name)
            .map(|(_, value)| value.as_str())
    }
    pub fn get_style(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(style, _)| *style == name)
            .map(|(_, value)| value.as_str())
    }
    /// Inline `style` attribute value.
    pub fn style_text(&self) -> String {
        self.styles
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
    /// Depth-first search by `id` attribute, `self` included.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.attribute("id") == Some(id) {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find_map(|child| child.find_by_id(id))
    }
    /// Concatenated text of every descendant.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .map(|child| match child {
                Node::Text(text) => text.to_owned(),
                Node::Element(element) => element.text_content(),
            })
            .collect()
    }
    fn is_void(&self) -> bool {
        matches!(self.tag, "img" | "input" | "br" | "source")
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }
        if !self.styles.is_empty() {
            write!(f, " style=\"{}\"", escape(&self.style_text()))?;
        }
        write!(f, ">")?;
        if self.is_void() {
            return Ok(());
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => write!(f, "{element}"),
            Node::Text(text) => write!(f, "{}", escape(text)),
        }
    }
}

/// Free-form API strings always end up as text, never as markup.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(|c| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Where a rendered widget goes in the page.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Mount {
    /// Patches an element the page already has, found with a CSS selector.
    /// Missing anchors are skipped.
    Anchor {
        selector: &'static str,
        /// Inline `display` value, left untouched when `None`.
        display: Option<&'static str>,
        /// Replaces the children when set.
        children: Option<Vec<Node>>,
    },
    /// Element owned by the widget, appended to the body on first render and
    /// patched in place afterwards. Carries an `id`.
    Owned(Element),
}

impl Mount {
    pub fn display(selector: &'static str, display: &'static str) -> Self {
        Mount::Anchor {
            selector,
            display: Some(display),
            children: None,
        }
    }
    pub fn replace(selector: &'static str, display: Option<&'static str>, children: Vec<Node>) -> Self {
        Mount::Anchor {
            selector,
            display,
            children: Some(children),
        }
    }
}
