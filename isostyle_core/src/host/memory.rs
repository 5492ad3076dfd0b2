//! An in-memory `<head>` for native targets.
//!
//! Lets the injector run without a browser: unit tests observe the head
//! directly, and server rendering collects the styles a page mounted via
//! [`MemoryHost::render_head`].

use base64::{Engine, engine::general_purpose::STANDARD};
use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

use super::{Capabilities, StyleHost, TextWrite};
use crate::error::StyleResult;
use crate::options::Placement;

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    id: Option<String>,
    attributes: Vec<(String, String)>,
    text: String,
    legacy_css_text: Option<String>,
}

/// A shared handle to a node of a [`MemoryHost`] document.
#[derive(Debug, Clone)]
pub struct MemoryElement(Rc<RefCell<NodeData>>);

impl MemoryElement {
    fn new(tag: &str) -> Self {
        MemoryElement(Rc::new(RefCell::new(NodeData {
            tag: tag.to_string(),
            ..NodeData::default()
        })))
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.0.borrow().id.clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        match node.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => node.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// `textContent`
    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    /// `styleSheet.cssText`, only set on hosts without `textContent` support.
    pub fn legacy_css_text(&self) -> Option<String> {
        self.0.borrow().legacy_css_text.clone()
    }

    pub fn ptr_eq(&self, other: &MemoryElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A document consisting of just a `<head>`. Clones share the same document.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    head: Rc<RefCell<Vec<MemoryElement>>>,
    capabilities: Capabilities,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            head: Rc::new(RefCell::new(Vec::new())),
            capabilities: Capabilities::default(),
        }
    }

    /// Behave like an environment without `btoa`.
    pub fn without_base64(mut self) -> Self {
        self.capabilities.base64 = false;
        self
    }

    /// Behave like an environment where style elements lack `textContent`.
    pub fn legacy_stylesheet(mut self) -> Self {
        self.capabilities.text_content = false;
        self
    }

    /// Appends a non-style node (e.g. `meta`, `title`) to the head.
    pub fn append_foreign(&self, tag: &str) -> MemoryElement {
        let el = MemoryElement::new(tag);
        self.head.borrow_mut().push(el.clone());
        el
    }

    pub fn head_children(&self) -> Vec<MemoryElement> {
        self.head.borrow().clone()
    }

    pub fn style_elements(&self) -> Vec<MemoryElement> {
        self.head
            .borrow()
            .iter()
            .filter(|el| el.0.borrow().tag == "style")
            .cloned()
            .collect()
    }

    /// Serializes the head's children as HTML, in document order.
    pub fn render_head(&self) -> String {
        let mut out = String::new();
        for el in self.head.borrow().iter() {
            let node = el.0.borrow();
            let _ = write!(out, "<{}", node.tag);
            if let Some(id) = &node.id {
                let _ = write!(out, " id=\"{}\"", escape_attr(id));
            }
            for (k, v) in &node.attributes {
                let _ = write!(out, " {}=\"{}\"", k, escape_attr(v));
            }
            let text = node.legacy_css_text.as_deref().unwrap_or(&node.text);
            let _ = write!(out, ">{}</{}>", text.replace("</", "<\\/"), node.tag);
        }
        out
    }

    fn detach(&self, el: &MemoryElement) {
        self.head.borrow_mut().retain(|child| !child.ptr_eq(el));
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

impl StyleHost for MemoryHost {
    type Element = MemoryElement;

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn find_element(&self, dom_id: &str) -> Option<MemoryElement> {
        self.head
            .borrow()
            .iter()
            .find(|el| el.0.borrow().id.as_deref() == Some(dom_id))
            .cloned()
    }

    fn create_style_element(&self, dom_id: &str, media: Option<&str>) -> StyleResult<MemoryElement> {
        let el = MemoryElement::new("style");
        el.set_attribute("type", "text/css");
        el.0.borrow_mut().id = Some(dom_id.to_string());
        if let Some(media) = media {
            el.set_attribute("media", media);
        }
        Ok(el)
    }

    fn write_text(&self, el: &MemoryElement, text: &str, mode: TextWrite) -> StyleResult<()> {
        let mut node = el.0.borrow_mut();
        match mode {
            TextWrite::TextContent => node.text = text.to_string(),
            TextWrite::LegacyStyleSheet => node.legacy_css_text = Some(text.to_string()),
        }
        Ok(())
    }

    fn attach_to_head(&self, el: &MemoryElement, placement: Placement) -> StyleResult<()> {
        self.detach(el);
        let mut head = self.head.borrow_mut();
        match placement {
            Placement::Prepend => head.insert(0, el.clone()),
            Placement::Append => head.push(el.clone()),
        }
        Ok(())
    }

    fn remove_element(&self, el: &MemoryElement) -> StyleResult<()> {
        self.detach(el);
        Ok(())
    }

    fn encode_base64(&self, bytes: &[u8]) -> StyleResult<String> {
        Ok(STANDARD.encode(bytes))
    }
}
