use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Identifier of the module a stylesheet was extracted from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModuleId {
    Number(i64),
    Float(f64),
    Name(String),
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleId::Number(n) => write!(f, "{}", n),
            ModuleId::Float(n) => write_js_number(f, *n),
            ModuleId::Name(s) => f.write_str(s),
        }
    }
}

/// Formats like JS `String(n)` for the values bundlers emit as module ids.
fn write_js_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{}", n)
    }
}

impl From<f64> for ModuleId {
    fn from(value: f64) -> Self {
        ModuleId::Float(value)
    }
}

impl From<i64> for ModuleId {
    fn from(value: i64) -> Self {
        ModuleId::Number(value)
    }
}

impl From<i32> for ModuleId {
    fn from(value: i32) -> Self {
        ModuleId::Number(value.into())
    }
}

impl From<&str> for ModuleId {
    fn from(value: &str) -> Self {
        ModuleId::Name(value.to_string())
    }
}

impl From<String> for ModuleId {
    fn from(value: String) -> Self {
        ModuleId::Name(value)
    }
}

/// A source map object attached to extracted CSS. Kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SourceMap(pub Value);

impl SourceMap {
    /// The `file` member as it appears in a `sourceURL` comment.
    ///
    /// A missing member renders as `undefined`, non-string values as their JSON text.
    pub fn file(&self) -> String {
        match self.0.get("file") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "undefined".to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }
}

impl From<Value> for SourceMap {
    fn from(value: Value) -> Self {
        SourceMap(value)
    }
}

/// One `(moduleId, cssText, media, sourceMap)` tuple produced by CSS extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    pub module_id: ModuleId,
    pub css: String,
    pub media: Option<String>,
    pub source_map: Option<SourceMap>,
}

impl StyleRecord {
    pub fn new(module_id: impl Into<ModuleId>, css: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            css: css.into(),
            media: None,
            source_map: None,
        }
    }

    /// Empty media strings are treated as absent.
    pub fn media(mut self, media: impl Into<String>) -> Self {
        let media = media.into();
        self.media = (!media.is_empty()).then_some(media);
        self
    }

    pub fn source_map(mut self, source_map: impl Into<SourceMap>) -> Self {
        self.source_map = Some(source_map.into());
        self
    }
}

// Extractors emit plain arrays, sometimes with trailing members (supports, layer)
// that this crate does not use.
impl<'de> Deserialize<'de> for StyleRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = StyleRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an array [moduleId, cssText, media?, sourceMap?]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<StyleRecord, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let module_id: ModuleId = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let css: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let media: Option<String> = seq.next_element::<Option<String>>()?.flatten();
                let source_map: Option<Value> = seq.next_element::<Option<Value>>()?.flatten();
                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(StyleRecord {
                    module_id,
                    css,
                    media: media.filter(|m| !m.is_empty()),
                    source_map: source_map.filter(|v| !v.is_null()).map(SourceMap),
                })
            }
        }

        deserializer.deserialize_seq(RecordVisitor)
    }
}
