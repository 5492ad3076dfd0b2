use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// The document environment is missing something it must provide (window, document, head).
    Dom(String),
    /// An exception thrown by a host DOM API.
    Javascript(String),
    /// A source map or a JS argument could not be (de)serialized.
    Serialize(String),
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::Dom(msg) => write!(f, "DOM Error: {}", msg),
            StyleError::Javascript(msg) => write!(f, "JavaScript Error: {}", msg),
            StyleError::Serialize(msg) => write!(f, "Serialization Error: {}", msg),
        }
    }
}

impl std::error::Error for StyleError {}

impl From<wasm_bindgen::JsValue> for StyleError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let msg = value.as_string().unwrap_or_else(|| format!("{:?}", value));
        StyleError::Javascript(msg)
    }
}

impl From<serde_json::Error> for StyleError {
    fn from(value: serde_json::Error) -> Self {
        StyleError::Serialize(value.to_string())
    }
}

impl From<StyleError> for wasm_bindgen::JsValue {
    fn from(value: StyleError) -> Self {
        wasm_bindgen::JsValue::from_str(&value.to_string())
    }
}

pub type StyleResult<T> = Result<T, StyleError>;
