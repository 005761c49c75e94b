//! Platform bindings
//!
//! The core is platform-free; the browser front-end reaches it through the
//! `web` module, the native runner drives it directly from `main.rs`.

#[cfg(target_arch = "wasm32")]
pub mod web;
