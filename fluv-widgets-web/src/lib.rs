#[cfg(feature = "wasm")]
pub mod dom;
#[cfg(feature = "wasm")]
pub mod env;
#[cfg(feature = "wasm")]
pub mod model;
#[cfg(feature = "wasm")]
mod fluv_widgets_web;
#[cfg(feature = "wasm")]
// re-export all wasm-specific
pub use fluv_widgets_web::*;
