pub mod memory;

pub use memory::{MemoryElement, MemoryHost};

use crate::error::StyleResult;
use crate::options::Placement;

/// Features of the document environment that change how styles are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Elements support a full `textContent` replace.
    pub text_content: bool,
    /// Base64 encoding is available for source-map data URIs.
    pub base64: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            text_content: true,
            base64: true,
        }
    }
}

impl Capabilities {
    pub fn text_write(&self) -> TextWrite {
        if self.text_content {
            TextWrite::TextContent
        } else {
            TextWrite::LegacyStyleSheet
        }
    }
}

/// How CSS text gets into a style element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextWrite {
    /// `elem.textContent = text`
    TextContent,
    /// `elem.styleSheet.cssText = text`
    LegacyStyleSheet,
}

/// The document operations the injector needs.
///
/// Implemented by `isostyle_dom::WebHost` for a browser document and by
/// [`MemoryHost`] for native targets.
pub trait StyleHost {
    type Element;

    fn capabilities(&self) -> Capabilities;

    /// `document.getElementById(dom_id)`
    fn find_element(&self, dom_id: &str) -> Option<Self::Element>;

    /// A detached `<style type="text/css">` with the given id and optional media.
    fn create_style_element(&self, dom_id: &str, media: Option<&str>)
    -> StyleResult<Self::Element>;

    fn write_text(&self, el: &Self::Element, text: &str, mode: TextWrite) -> StyleResult<()>;

    fn attach_to_head(&self, el: &Self::Element, placement: Placement) -> StyleResult<()>;

    /// Detaches `el` from its parent; a detached element is left alone.
    fn remove_element(&self, el: &Self::Element) -> StyleResult<()>;

    /// Base64 of raw bytes. Only called when [`Capabilities::base64`] is set.
    fn encode_base64(&self, bytes: &[u8]) -> StyleResult<String>;
}
