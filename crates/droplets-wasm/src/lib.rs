//! Droplets WASM - WebAssembly bindings for Droplets
//!
//! This crate provides WASM bindings to expose the droplets-core
//! augmentation operators to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for image arrays
//! - `augment` - Seeded windowed transforms and dropout
//!
//! # Usage
//!
//! ```typescript
//! import init, { Augmenter, JsImage } from '@droplets/wasm';
//!
//! await init();
//!
//! const image = new JsImage([h, w, 3], pixels, true);
//! const augmenter = new Augmenter(1234n);
//! augmenter.rotate(image, 15.0, [32], "reflect", 0);
//! const out = image.data();
//! ```

use wasm_bindgen::prelude::*;

mod augment;
mod types;

// Re-export public types
pub use augment::Augmenter;
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
