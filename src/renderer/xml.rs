//! Owned XML element tree
//!
//! Project documents are read with roxmltree and converted into this
//! mutable tree so nodes can be found, replaced, and written back out. The
//! root element owns every node beneath it.

use std::fmt;

/// Declaration written at the top of every project file
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    Comment(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`XmlElement::set_attr`]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`XmlElement::push_child`]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push_child(child);
        self
    }

    /// Builder form of [`XmlElement::set_text`]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Insert `child` before the child node at `index` (clamped to the end)
    pub fn insert_child(&mut self, index: usize, child: XmlElement) {
        let index = index.min(self.children.len());
        self.children.insert(index, XmlNode::Element(child));
    }

    /// Concatenated direct text content
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                XmlNode::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace all direct text content with `text`, placed before any child
    /// elements
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.retain(|c| !matches!(c, XmlNode::Text(_)));
        self.children.insert(0, XmlNode::Text(text.into()));
    }

    /// Direct child elements, in order
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First direct child element named `name`
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find_map(|c| match c {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Index into `children` of the first direct child element named `name`
    pub fn child_position(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|c| matches!(c, XmlNode::Element(e) if e.name == name))
    }

    /// Remove every direct child element named `name`, returning how many
    /// were removed
    pub fn remove_children(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|c| !matches!(c, XmlNode::Element(e) if e.name == name));
        before - self.children.len()
    }

    /// First element in document order (this element included) matching
    /// `pred`
    pub fn find(&self, pred: &dyn Fn(&XmlElement) -> bool) -> Option<&XmlElement> {
        if pred(self) {
            return Some(self);
        }
        self.elements().find_map(|e| e.find(pred))
    }

    pub fn find_mut(&mut self, pred: &dyn Fn(&XmlElement) -> bool) -> Option<&mut XmlElement> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let XmlNode::Element(e) = child {
                if let Some(found) = e.find_mut(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Count elements in the subtree (this element included) matching `pred`
    pub fn count(&self, pred: &dyn Fn(&XmlElement) -> bool) -> usize {
        let own = usize::from(pred(self));
        own + self.elements().map(|e| e.count(pred)).sum::<usize>()
    }

    /// Serialize this element. Pretty output indents element-only content
    /// by two spaces per level; elements holding text are kept on one line.
    pub fn to_xml(&self, pretty: bool) -> String {
        let mut out = String::new();
        self.write(&mut out, 0, pretty);
        out
    }

    fn write(&self, out: &mut String, depth: usize, pretty: bool) {
        let indent = if pretty { "  ".repeat(depth) } else { String::new() };
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.name);
        for (k, v) in &self.attributes {
            out.push_str(&format!(r#" {}="{}""#, k, escape_attr(v)));
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');

        let element_only = self
            .children
            .iter()
            .all(|c| matches!(c, XmlNode::Element(_) | XmlNode::Comment(_)));

        if pretty && element_only {
            for child in &self.children {
                out.push('\n');
                match child {
                    XmlNode::Element(e) => e.write(out, depth + 1, true),
                    XmlNode::Comment(c) => {
                        out.push_str(&"  ".repeat(depth + 1));
                        out.push_str(&format!("<!--{}-->", c));
                    }
                    XmlNode::Text(_) => {}
                }
            }
            out.push('\n');
            out.push_str(&indent);
        } else {
            for child in &self.children {
                match child {
                    XmlNode::Element(e) => e.write(out, 0, false),
                    XmlNode::Text(t) => out.push_str(&escape_text(t)),
                    XmlNode::Comment(c) => out.push_str(&format!("<!--{}-->", c)),
                }
            }
        }

        out.push_str(&format!("</{}>", self.name));
    }
}

/// Compact serialization
impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml(false))
    }
}

/// Parse XML text into an owned tree rooted at the document element.
///
/// Whitespace-only text nodes are dropped so the tree can be re-indented
/// on output. Processing instructions and the declaration are not kept.
pub fn parse_document(text: &str) -> Result<XmlElement, roxmltree::Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options)?;
    Ok(convert_node(doc.root_element()))
}

fn convert_node(node: roxmltree::Node<'_, '_>) -> XmlElement {
    let mut element = XmlElement::new(node.tag_name().name());
    element.attributes = node
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();

    for child in node.children() {
        if child.is_element() {
            element.push_child(convert_node(child));
        } else if child.is_text() {
            let text = child.text().unwrap_or_default();
            if !text.trim().is_empty() {
                element.children.push(XmlNode::Text(text.to_string()));
            }
        } else if child.is_comment() {
            let text = child.text().unwrap_or_default();
            element.children.push(XmlNode::Comment(text.to_string()));
        }
    }

    element
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Tabs and line breaks become character references; raw ones are
/// normalized to spaces when the document is read back
fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compact_output() {
        let el = XmlElement::new("Shape")
            .with_attr("Type", "Path")
            .with_child(XmlElement::new("XForm").with_text("1 0 0 1 0 0"))
            .with_child(XmlElement::new("V").with_attr("vx", "0"));
        assert_eq!(
            el.to_string(),
            r#"<Shape Type="Path"><XForm>1 0 0 1 0 0</XForm><V vx="0"/></Shape>"#
        );
    }

    #[test]
    fn test_pretty_output() {
        let el = XmlElement::new("A")
            .with_child(XmlElement::new("B").with_child(XmlElement::new("C")))
            .with_child(XmlElement::new("D").with_text("x"));
        assert_eq!(el.to_xml(true), "<A>\n  <B>\n    <C/>\n  </B>\n  <D>x</D>\n</A>");
    }

    #[test]
    fn test_escaping() {
        let el = XmlElement::new("Shape")
            .with_attr("Str", r#"a "b" & <c>"#)
            .with_text("1 < 2");
        assert_eq!(
            el.to_string(),
            r#"<Shape Str="a &quot;b&quot; &amp; &lt;c&gt;">1 &lt; 2</Shape>"#
        );
    }

    #[test]
    fn test_attribute_whitespace_survives_reload() {
        let el = XmlElement::new("Shape").with_attr("Str", "a\nb\tc\r");
        let xml = el.to_string();
        assert_eq!(xml, r#"<Shape Str="a&#10;b&#9;c&#13;"/>"#);
        let reloaded = parse_document(&xml).unwrap();
        assert_eq!(reloaded.attr("Str"), Some("a\nb\tc\r"));
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut el = XmlElement::new("X").with_attr("a", "1").with_attr("b", "2");
        el.set_attr("a", "3");
        assert_eq!(el.attributes, vec![("a".into(), "3".into()), ("b".into(), "2".into())]);
        assert_eq!(el.attr("a"), Some("3"));
        assert_eq!(el.attr("missing"), None);
    }

    #[test]
    fn test_parse_round_trip() {
        let text = r#"<?xml version="1.0" encoding="UTF-8"?>
<Project Version="2">
    <!-- note -->
    <Item Name="a &amp; b"><Value>42</Value></Item>
    <Item/>
</Project>"#;
        let root = parse_document(text).unwrap();
        assert_eq!(root.name, "Project");
        assert_eq!(root.elements().count(), 2);
        assert_eq!(root.child("Item").and_then(|i| i.attr("Name")), Some("a & b"));
        assert_eq!(
            root.to_string(),
            r#"<Project Version="2"><!-- note --><Item Name="a &amp; b"><Value>42</Value></Item><Item/></Project>"#
        );
    }

    #[test]
    fn test_find_is_depth_first() {
        let root = parse_document(
            r#"<R><G><S Id="1" Hit="1"/></G><S Id="2" Hit="1"/></R>"#,
        )
        .unwrap();
        let found = root.find(&|e: &XmlElement| e.attr("Hit") == Some("1")).unwrap();
        assert_eq!(found.attr("Id"), Some("1"));
        assert_eq!(root.count(&|e: &XmlElement| e.name == "S"), 2);
    }

    #[test]
    fn test_find_mut_and_remove() {
        let mut root = parse_document(r#"<R><S><B/><X/><B/></S></R>"#).unwrap();
        let shape = root.find_mut(&|e: &XmlElement| e.name == "S").unwrap();
        assert_eq!(shape.remove_children("B"), 2);
        assert_eq!(shape.elements().count(), 1);
        assert_eq!(root.to_string(), "<R><S><X/></S></R>");
    }

    #[test]
    fn test_set_text_replaces_existing() {
        let mut el = XmlElement::new("XForm").with_text("old");
        el.set_text("new");
        assert_eq!(el.text(), "new");
        assert_eq!(el.children.len(), 1);
    }

    #[test]
    fn test_insert_and_position() {
        let mut el = XmlElement::new("R")
            .with_child(XmlElement::new("A"))
            .with_child(XmlElement::new("B"));
        el.insert_child(1, XmlElement::new("N"));
        el.insert_child(99, XmlElement::new("Z"));
        let names: Vec<&str> = el.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "N", "B", "Z"]);
        assert_eq!(el.child_position("B"), Some(2));
        assert_eq!(el.child_position("Q"), None);
    }

    #[test]
    fn test_parse_error() {
        assert!(parse_document("<R><S></R>").is_err());
    }
}
