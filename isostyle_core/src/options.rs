use serde::Deserialize;

/// Options accepted by [`StyleInjector::insert`](crate::StyleInjector::insert).
///
/// Deserializes from a JS options object; missing fields default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InsertOptions {
    /// Overwrite an element's content even when its id is already referenced.
    pub replace: bool,
    /// Insert newly created elements as the first child of `<head>`.
    pub prepend: bool,
}

impl InsertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    pub fn prepend(mut self, prepend: bool) -> Self {
        self.prepend = prepend;
        self
    }

    pub(crate) fn placement(&self) -> Placement {
        if self.prepend {
            Placement::Prepend
        } else {
            Placement::Append
        }
    }
}

/// Where a new style element goes inside `<head>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Prepend,
    Append,
}
