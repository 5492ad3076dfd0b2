use isostyle_core::{Capabilities, Placement, StyleError, StyleHost, StyleResult, TextWrite};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Node, Window};

use crate::helpers::{binary_string, document, head, window};

/// [`StyleHost`] backed by the browser's `window.document`.
#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Binds to the current thread's window and document.
    pub fn new() -> StyleResult<Self> {
        Ok(Self {
            window: window()?,
            document: document()?,
        })
    }
}

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

impl StyleHost for WebHost {
    type Element = Element;

    /// `textContent` is an interface member of `Node`, so `<head>` answers the
    /// probe for every style element created in the same document; one probe
    /// per insert call covers all its records.
    fn capabilities(&self) -> Capabilities {
        let text_content = self
            .document
            .head()
            .map(|h| has_property(&h, "textContent"))
            .unwrap_or(true);
        let base64 = js_sys::Reflect::get(&self.window, &JsValue::from_str("btoa"))
            .map(|f| f.is_function())
            .unwrap_or(false);
        Capabilities {
            text_content,
            base64,
        }
    }

    fn find_element(&self, dom_id: &str) -> Option<Element> {
        self.document.get_element_by_id(dom_id)
    }

    fn create_style_element(&self, dom_id: &str, media: Option<&str>) -> StyleResult<Element> {
        let el = self.document.create_element("style")?;
        el.set_attribute("type", "text/css")?;
        el.set_id(dom_id);
        if let Some(media) = media {
            el.set_attribute("media", media)?;
        }
        Ok(el)
    }

    fn write_text(&self, el: &Element, text: &str, mode: TextWrite) -> StyleResult<()> {
        match mode {
            TextWrite::TextContent => el.set_text_content(Some(text)),
            TextWrite::LegacyStyleSheet => {
                let sheet = js_sys::Reflect::get(el, &JsValue::from_str("styleSheet"))?;
                if sheet.is_undefined() || sheet.is_null() {
                    return Err(StyleError::Dom(
                        "style element has neither textContent nor styleSheet".into(),
                    ));
                }
                js_sys::Reflect::set(
                    &sheet,
                    &JsValue::from_str("cssText"),
                    &JsValue::from_str(text),
                )?;
            }
        }
        Ok(())
    }

    fn attach_to_head(&self, el: &Element, placement: Placement) -> StyleResult<()> {
        let head = head(&self.document)?;
        let node: &Node = el;
        match placement {
            Placement::Prepend => {
                head.insert_before(node, head.first_child().as_ref())?;
            }
            Placement::Append => {
                head.append_child(node)?;
            }
        }
        Ok(())
    }

    fn remove_element(&self, el: &Element) -> StyleResult<()> {
        if let Some(parent) = el.parent_node() {
            parent.remove_child(el)?;
        }
        Ok(())
    }

    fn encode_base64(&self, bytes: &[u8]) -> StyleResult<String> {
        Ok(self.window.btoa(&binary_string(bytes))?)
    }
}
