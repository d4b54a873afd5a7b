//! Whole-image spatial transforms.
//!
//! Every transform here is pure: it reads the input array and returns a new
//! array of exactly the same shape. The windowed operators in
//! [`crate::window`] rely on that contract to copy a sub-region of the
//! result back into the original image.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise in the
//!   plane of the two rotation axes
//! - Rotation and zoom are centered on `(len - 1) / 2` along each axis
//! - Shift offsets move content towards higher indices when positive
//!
//! Samples that fall outside the array follow the [`Boundary`] policy.

mod boundary;
mod gaussian;
mod interpolate;
mod per_axis;
mod rotation;
mod shift;
mod zoom;

use ndarray::ArrayD;
use thiserror::Error;

use crate::layout::ChannelLayout;

pub use boundary::{Boundary, BoundaryMode};
pub use gaussian::{gaussian_filter, GAUSSIAN_TRUNCATE};
pub use per_axis::PerAxis;
pub use rotation::rotate;
pub use shift::shift;
pub use zoom::zoom;

/// Errors raised by transform kernels.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Boundary mode name is not recognized.
    #[error("Unknown boundary mode: {0}")]
    UnknownMode(String),

    /// A per-axis parameter has the wrong number of entries.
    #[error("Parameter `{parameter}` has {given} values but the image has {expected} axes")]
    ParameterLength {
        parameter: &'static str,
        given: usize,
        expected: usize,
    },

    /// A parameter value is out of its valid domain.
    #[error("Invalid value for `{parameter}`: {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },

    /// Rotation axes are equal or out of range.
    #[error("Invalid rotation axes ({0}, {1}) for an image with {2} axes")]
    InvalidAxes(usize, usize, usize),
}

/// A whole-image transform producing a same-shape copy.
///
/// Implemented by [`Transform`] and by any closure with the signature
/// `Fn(&ArrayD<A>, ChannelLayout) -> Result<ArrayD<A>, TransformError>`.
pub trait ImageTransform<A> {
    fn transform(
        &self,
        image: &ArrayD<A>,
        layout: ChannelLayout,
    ) -> Result<ArrayD<A>, TransformError>;
}

impl<A, F> ImageTransform<A> for F
where
    F: Fn(&ArrayD<A>, ChannelLayout) -> Result<ArrayD<A>, TransformError>,
{
    fn transform(
        &self,
        image: &ArrayD<A>,
        layout: ChannelLayout,
    ) -> Result<ArrayD<A>, TransformError> {
        self(image, layout)
    }
}

/// Gaussian smoothing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianParams {
    /// Standard deviation in pixels; 0 leaves an axis unfiltered.
    pub sigma: PerAxis<f64>,
    pub boundary: Boundary,
}

impl GaussianParams {
    pub fn new(sigma: impl Into<PerAxis<f64>>, boundary: Boundary) -> Self {
        Self {
            sigma: sigma.into(),
            boundary,
        }
    }
}

/// Rotation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateParams {
    /// Angle in degrees.
    pub angle: f64,
    /// Plane of rotation; `None` picks the first two spatial axes.
    pub axes: Option<(usize, usize)>,
    pub boundary: Boundary,
}

impl RotateParams {
    pub fn new(angle: f64, axes: Option<(usize, usize)>, boundary: Boundary) -> Self {
        Self {
            angle,
            axes,
            boundary,
        }
    }
}

/// Translation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftParams {
    /// Offset in pixels.
    pub shift: PerAxis<f64>,
    pub boundary: Boundary,
}

impl ShiftParams {
    pub fn new(shift: impl Into<PerAxis<f64>>, boundary: Boundary) -> Self {
        Self {
            shift: shift.into(),
            boundary,
        }
    }
}

/// Scaling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomParams {
    /// Scale factor; values above 1 magnify.
    pub zoom: PerAxis<f64>,
    pub boundary: Boundary,
}

impl ZoomParams {
    pub fn new(zoom: impl Into<PerAxis<f64>>, boundary: Boundary) -> Self {
        Self {
            zoom: zoom.into(),
            boundary,
        }
    }
}

/// One of the bundled transforms with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Gaussian(GaussianParams),
    Rotate(RotateParams),
    Shift(ShiftParams),
    Zoom(ZoomParams),
}

impl Transform {
    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Gaussian(_) => "gaussian",
            Transform::Rotate(_) => "rotate",
            Transform::Shift(_) => "shift",
            Transform::Zoom(_) => "zoom",
        }
    }

    /// Boundary policy shared by every transform kind.
    pub fn boundary(&self) -> Boundary {
        match self {
            Transform::Gaussian(p) => p.boundary,
            Transform::Rotate(p) => p.boundary,
            Transform::Shift(p) => p.boundary,
            Transform::Zoom(p) => p.boundary,
        }
    }
}

impl ImageTransform<f32> for Transform {
    fn transform(
        &self,
        image: &ArrayD<f32>,
        layout: ChannelLayout,
    ) -> Result<ArrayD<f32>, TransformError> {
        match self {
            Transform::Gaussian(p) => gaussian_filter(image, &p.sigma, p.boundary, layout),
            Transform::Rotate(p) => rotate(image, p.angle, p.axes, p.boundary, layout),
            Transform::Shift(p) => shift(image, &p.shift, p.boundary, layout),
            Transform::Zoom(p) => zoom(image, &p.zoom, p.boundary, layout),
        }
    }
}

impl From<GaussianParams> for Transform {
    fn from(params: GaussianParams) -> Self {
        Transform::Gaussian(params)
    }
}

impl From<RotateParams> for Transform {
    fn from(params: RotateParams) -> Self {
        Transform::Rotate(params)
    }
}

impl From<ShiftParams> for Transform {
    fn from(params: ShiftParams) -> Self {
        Transform::Shift(params)
    }
}

impl From<ZoomParams> for Transform {
    fn from(params: ZoomParams) -> Self {
        Transform::Zoom(params)
    }
}
