use std::cell::RefCell;
use std::rc::Rc;

use isostyle_core::{Disposer, InsertOptions, StyleInjector, StyleRecord, StyleResult};
use isostyle_dom::WebHost;

thread_local! {
    static DEFAULT_INJECTOR: RefCell<Option<Rc<StyleInjector<WebHost>>>> = const { RefCell::new(None) };
}

/// The page's injector, created on first use and kept for the rest of the session.
///
/// Every style inserted through it shares one reference-count registry.
pub fn default_injector() -> StyleResult<Rc<StyleInjector<WebHost>>> {
    DEFAULT_INJECTOR.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(injector) = slot.as_ref() {
            return Ok(injector.clone());
        }
        let injector = Rc::new(StyleInjector::new(WebHost::new()?));
        *slot = Some(injector.clone());
        Ok(injector)
    })
}

/// Inserts `styles` into `document.head` through the [`default_injector`].
///
/// ```no_run
/// use isostyle::prelude::*;
///
/// let remove_css = insert_css(&[StyleRecord::new(1, "body { color: red; }")], InsertOptions::default())?;
/// remove_css.dispose()?;
/// # Ok::<(), StyleError>(())
/// ```
pub fn insert_css(styles: &[StyleRecord], options: InsertOptions) -> StyleResult<Disposer<WebHost>> {
    default_injector()?.insert(styles, options)
}
