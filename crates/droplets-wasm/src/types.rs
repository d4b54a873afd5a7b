//! WASM-compatible wrapper types for image arrays.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! `ndarray` images, handling the conversion between flat typed arrays and
//! N-dimensional arrays.

use droplets_core::{AugmentError, ChannelLayout, WindowSize};
use ndarray::{ArrayD, IxDyn, ShapeError};
use wasm_bindgen::prelude::*;

/// An image array wrapper for JavaScript.
///
/// The data is a flat row-major `Float32Array` whose length is the product
/// of `shape`. The channel axis is last (`[h, w, c]`) when `channel_last` is
/// true, first (`[c, h, w]`) otherwise.
///
/// # Memory Management
///
/// The array is stored in WASM memory. When you call `data()`, a copy is made
/// to JavaScript memory as a `Float32Array`.
#[wasm_bindgen]
pub struct JsImage {
    array: ArrayD<f32>,
    layout: ChannelLayout,
}

#[wasm_bindgen]
impl JsImage {
    /// Create a new JsImage from a shape and flat data.
    ///
    /// # Arguments
    /// * `shape` - Array shape, channel axis included
    /// * `data` - Row-major element data
    /// * `channel_last` - Whether channels are the last axis
    #[wasm_bindgen(constructor)]
    pub fn new(shape: Vec<u32>, data: Vec<f32>, channel_last: bool) -> Result<JsImage, JsValue> {
        JsImage::try_new(&shape, data, channel_last).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the array shape
    #[wasm_bindgen(getter)]
    pub fn shape(&self) -> Vec<u32> {
        self.array.shape().iter().map(|&d| d as u32).collect()
    }

    /// Whether channels are the last axis
    #[wasm_bindgen(getter)]
    pub fn channel_last(&self) -> bool {
        self.layout.is_channel_last()
    }

    /// Get the number of elements
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.array.len()
    }

    /// Returns the element data as Float32Array (row-major).
    pub fn data(&self) -> Vec<f32> {
        self.array.iter().copied().collect()
    }
}

impl JsImage {
    /// Build from shape and data without going through `JsValue`.
    pub fn try_new(shape: &[u32], data: Vec<f32>, channel_last: bool) -> Result<JsImage, ShapeError> {
        let shape: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        let array = ArrayD::from_shape_vec(IxDyn(&shape), data)?;
        Ok(JsImage {
            array,
            layout: ChannelLayout::from_channel_last(channel_last),
        })
    }

    /// Borrow the underlying array.
    pub fn array(&self) -> &ArrayD<f32> {
        &self.array
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut ArrayD<f32>, ChannelLayout) {
        (&mut self.array, self.layout)
    }
}

/// Window size from JavaScript: one value is uniform, several are per spatial axis.
pub(crate) fn window_size_from_js(values: &[u32]) -> WindowSize {
    match values {
        [single] => WindowSize::Uniform(*single as usize),
        many => WindowSize::Axes(many.iter().map(|&v| v as usize).collect()),
    }
}

/// Convert a core error into a JavaScript error value.
pub(crate) fn to_js_error(err: AugmentError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
