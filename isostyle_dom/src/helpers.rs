use isostyle_core::{StyleError, StyleResult};
use web_sys::{Document, HtmlHeadElement, Window};

// --- Window & Document Access ---

thread_local! {
    static WINDOW: Option<Window> = web_sys::window();
    static DOCUMENT: Option<Document> = WINDOW.with(|w| w.as_ref().and_then(|w| w.document()));
}

/// Returns the cached [`Window`](web_sys::Window).
pub fn window() -> StyleResult<Window> {
    WINDOW
        .with(|w| w.clone())
        .ok_or_else(|| StyleError::Dom("Window not found".into()))
}

/// Returns the cached [`Document`](web_sys::Document).
pub fn document() -> StyleResult<Document> {
    DOCUMENT
        .with(|d| d.clone())
        .ok_or_else(|| StyleError::Dom("Document not found".into()))
}

/// `document.head`, which styles are attached to.
pub fn head(doc: &Document) -> StyleResult<HtmlHeadElement> {
    doc.head()
        .ok_or_else(|| StyleError::Dom("No <head> element found in document".into()))
}

/// Packs bytes one per UTF-16 code unit, the input `btoa` expects for binary data.
pub fn binary_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
