//! Browser bindings: runs the style injector against `window.document`.

pub mod helpers;
pub mod host;

pub use helpers::{document, window};
pub use host::WebHost;
