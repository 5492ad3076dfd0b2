//! Console logging that works on both sides of an isomorphic app.
//!
//! In the browser messages go to `console.*`; on native targets (tests, server
//! rendering) they go to stderr.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

pub fn console_warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(msg));

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[warn] {}", msg);
}

pub fn console_error(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(msg));

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[error] {}", msg);
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => {
        $crate::log::console_warn(&format!($($t)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => {
        $crate::log::console_error(&format!($($t)*))
    };
}
