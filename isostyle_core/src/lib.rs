pub mod compose;
pub mod error;
pub mod host;
pub mod injector;
pub mod log;
pub mod options;
pub mod record;
pub mod registry;
pub mod suffix;

pub use error::{StyleError, StyleResult};
pub use host::{Capabilities, MemoryElement, MemoryHost, StyleHost, TextWrite};
pub use injector::{Disposer, StyleInjector};
pub use options::{InsertOptions, Placement};
pub use record::{ModuleId, SourceMap, StyleRecord};
pub use registry::InsertedRegistry;
pub use suffix::{FixedSuffixes, SuffixSource, ThreadRandom};

/// Prefix of every style element id: the element for style id `x` is `#sx`.
pub const ID_PREFIX: &str = "s";

pub mod prelude {
    pub use crate::log::*;
    pub use crate::{
        Disposer, InsertOptions, MemoryHost, ModuleId, SourceMap, StyleError, StyleHost,
        StyleInjector, StyleRecord, StyleResult,
    };
}
