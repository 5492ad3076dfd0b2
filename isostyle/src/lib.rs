//! Reference-counted `<style>` injection for CSS extracted at build time.
//!
//! Each component mount inserts its `(moduleId, cssText, media, sourceMap)`
//! records and keeps the returned [`Disposer`]; disposing on unmount removes
//! the elements nothing references anymore.
//!
//! In the browser use [`insert_css`] (or the `insertCss` JS export). On native
//! targets build a [`StyleInjector`] over a [`MemoryHost`] and render the
//! collected styles with [`MemoryHost::render_head`].

pub mod bindings;
pub mod global;

pub use global::{default_injector, insert_css};
pub use isostyle_core::{
    Capabilities, Disposer, FixedSuffixes, ID_PREFIX, InsertOptions, MemoryElement, MemoryHost,
    ModuleId, Placement, SourceMap, StyleError, StyleHost, StyleInjector, StyleRecord, StyleResult,
    SuffixSource, TextWrite, ThreadRandom,
};
pub use isostyle_core::{error, warn};
pub use isostyle_dom::WebHost;

pub mod prelude {
    pub use crate::{default_injector, insert_css};
    pub use isostyle_core::prelude::*;
    pub use isostyle_dom::WebHost;
}
