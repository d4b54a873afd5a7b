//! WASM bindings for the augmentation operators.
//!
//! An `Augmenter` owns a seeded random source so that JavaScript callers get
//! reproducible augmentations without any global state.

use droplets_core::{
    dropout as core_dropout, AugmentError, Boundary, BoundaryMode, GaussianParams, PerAxis,
    ProportionSource, RotateParams, ShiftParams, Transform, TransformError, ZoomParams,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, window_size_from_js, JsImage};

/// Seeded augmentation engine.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const augmenter = new Augmenter(42n);
/// const image = new JsImage([64, 64, 3], pixels, true);
/// augmenter.gaussian(image, [1.5], [16], "reflect", 0);
/// augmenter.rotate(image, 30, [0, 1], [16], "nearest", 0);
/// augmenter.dropout(image, 0.05, 0);
/// ```
#[wasm_bindgen]
pub struct Augmenter {
    rng: ChaCha8Rng,
}

#[wasm_bindgen]
impl Augmenter {
    /// Create an augmenter whose random source is seeded with `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Augmenter {
        Augmenter {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Gaussian blur committed inside a random window.
    ///
    /// `sigma` holds one value (all spatial axes) or one per array axis.
    /// `window_size` holds one value (all spatial axes) or one per spatial
    /// axis; `mode` is one of `reflect`, `constant`, `nearest`, `mirror`,
    /// `wrap`.
    pub fn gaussian(
        &mut self,
        image: &mut JsImage,
        sigma: Vec<f64>,
        window_size: Vec<u32>,
        mode: &str,
        cval: f32,
    ) -> Result<(), JsValue> {
        let transform = Transform::Gaussian(GaussianParams::new(
            per_axis_from_js(sigma),
            parse_boundary(mode, cval)?,
        ));
        self.windowed(image, &window_size, &transform)
            .map_err(to_js_error)
    }

    /// Rotation by `angle` degrees committed inside a random window.
    ///
    /// `axes` names the two axes of the rotation plane; when omitted the
    /// first two spatial axes are used.
    pub fn rotate(
        &mut self,
        image: &mut JsImage,
        angle: f64,
        axes: Option<Vec<u32>>,
        window_size: Vec<u32>,
        mode: &str,
        cval: f32,
    ) -> Result<(), JsValue> {
        let axes =
            rotation_axes_from_js(axes.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        let transform = Transform::Rotate(RotateParams::new(
            angle,
            axes,
            parse_boundary(mode, cval)?,
        ));
        self.windowed(image, &window_size, &transform)
            .map_err(to_js_error)
    }

    /// Shift committed inside a random window.
    ///
    /// `shift` holds one value (all spatial axes) or one per array axis.
    pub fn shift(
        &mut self,
        image: &mut JsImage,
        shift: Vec<f64>,
        window_size: Vec<u32>,
        mode: &str,
        cval: f32,
    ) -> Result<(), JsValue> {
        let transform = Transform::Shift(ShiftParams::new(
            per_axis_from_js(shift),
            parse_boundary(mode, cval)?,
        ));
        self.windowed(image, &window_size, &transform)
            .map_err(to_js_error)
    }

    /// Zoom by `zoom` committed inside a random window.
    pub fn zoom(
        &mut self,
        image: &mut JsImage,
        zoom: f64,
        window_size: Vec<u32>,
        mode: &str,
        cval: f32,
    ) -> Result<(), JsValue> {
        let transform = Transform::Zoom(ZoomParams::new(zoom, parse_boundary(mode, cval)?));
        self.windowed(image, &window_size, &transform)
            .map_err(to_js_error)
    }

    /// Drop a proportion of the image elements.
    ///
    /// When `generator` is given it is called once and its return value is
    /// used as the proportion. Returns the number of drops.
    pub fn dropout(
        &mut self,
        image: &mut JsImage,
        proportion: f64,
        cval: f32,
        generator: Option<js_sys::Function>,
    ) -> Result<u32, JsValue> {
        let mut source = generator.map(JsProportion);
        let source = source
            .as_mut()
            .map(|s| s as &mut dyn ProportionSource);
        self.dropout_with(image, proportion, cval, source)
            .map(|count| count as u32)
            .map_err(to_js_error)
    }
}

impl Augmenter {
    /// Apply a windowed transform, returning the core error on failure.
    pub fn windowed(
        &mut self,
        image: &mut JsImage,
        window_size: &[u32],
        transform: &Transform,
    ) -> Result<(), AugmentError> {
        let (array, layout) = image.parts_mut();
        droplets_core::apply_windowed(
            array,
            &window_size_from_js(window_size),
            transform,
            layout,
            &mut self.rng,
        )
        .map(|_| ())
    }

    /// Dropout with an optional Rust-side proportion source.
    pub fn dropout_with(
        &mut self,
        image: &mut JsImage,
        proportion: f64,
        cval: f32,
        source: Option<&mut dyn ProportionSource>,
    ) -> Result<usize, AugmentError> {
        let (array, _) = image.parts_mut();
        core_dropout(array, proportion, cval, source, &mut self.rng)
    }
}

/// JavaScript function used as a proportion source.
struct JsProportion(js_sys::Function);

impl ProportionSource for JsProportion {
    fn next_proportion(&mut self) -> f64 {
        // A throwing or non-numeric generator yields NaN, which dropout rejects.
        self.0
            .call0(&JsValue::NULL)
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN)
    }
}

fn parse_boundary(mode: &str, cval: f32) -> Result<Boundary, JsValue> {
    let mode: BoundaryMode = mode
        .parse()
        .map_err(|e: TransformError| JsValue::from_str(&e.to_string()))?;
    Ok(Boundary::new(mode, cval))
}

/// Rotation plane from JavaScript: absent, or exactly two axis indices.
fn rotation_axes_from_js(axes: Option<&[u32]>) -> Result<Option<(usize, usize)>, String> {
    match axes {
        None => Ok(None),
        Some(&[a, b]) => Ok(Some((a as usize, b as usize))),
        Some(other) => Err(format!(
            "Rotation axes must hold 2 values, got {}",
            other.len()
        )),
    }
}

fn per_axis_from_js(values: Vec<f64>) -> PerAxis<f64> {
    match values.as_slice() {
        [single] => PerAxis::Spatial(*single),
        _ => PerAxis::Axes(values),
    }
}
