use isostyle_core::{InsertOptions, StyleError, StyleRecord};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::global::insert_css;

/// `insertCss(styles, { replace, prepend })` for bundler runtimes.
///
/// `styles` is an array of `[moduleId, cssText, media?, sourceMap?]`. Returns a
/// function that removes the inserted styles once nothing references them.
#[wasm_bindgen(js_name = insertCss)]
pub fn insert_css_js(styles: JsValue, options: JsValue) -> Result<js_sys::Function, JsValue> {
    let styles: Vec<StyleRecord> = serde_wasm_bindgen::from_value(styles)
        .map_err(|e| StyleError::Serialize(e.to_string()))?;
    let options: InsertOptions = if options.is_undefined() || options.is_null() {
        InsertOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| StyleError::Serialize(e.to_string()))?
    };

    let disposer = insert_css(&styles, options)?;
    let remove_css = Closure::<dyn FnMut()>::new(move || {
        if let Err(err) = disposer.dispose() {
            isostyle_core::error!("isostyle: failed to remove styles: {}", err);
        }
    });

    Ok(remove_css.into_js_value().unchecked_into())
}
