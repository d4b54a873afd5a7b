//! Scaling about the image center.
//!
//! The output keeps the input shape: a factor above 1 magnifies the central
//! part of the image, a factor below 1 shrinks the image towards its center
//! and fills the margin according to the boundary mode.
//!
//! ```text
//! src = c + (dst - c) / zoom,   c = (len - 1) / 2
//! ```

use ndarray::ArrayD;

use super::interpolate::resample;
use super::{Boundary, PerAxis, TransformError};
use crate::layout::ChannelLayout;

/// Scale an image by `zoom` about its center.
///
/// # Errors
///
/// Fails if `zoom` has the wrong length or any factor is not finite and
/// positive.
pub fn zoom(
    image: &ArrayD<f32>,
    zoom: &PerAxis<f64>,
    boundary: Boundary,
    layout: ChannelLayout,
) -> Result<ArrayD<f32>, TransformError> {
    let factors = zoom.resolve("zoom", image.ndim(), layout, 1.0)?;
    if let Some(&bad) = factors.iter().find(|z| !z.is_finite() || **z <= 0.0) {
        return Err(TransformError::InvalidParameter {
            parameter: "zoom",
            value: bad,
        });
    }

    let centers: Vec<f64> = image
        .shape()
        .iter()
        .map(|&len| (len as f64 - 1.0) / 2.0)
        .collect();
    log::trace!("zoom: factors {:?}", factors);

    Ok(resample(image, boundary, |dst, src| {
        for (axis, s) in src.iter_mut().enumerate() {
            let c = centers[axis];
            *s = c + (dst[axis] as f64 - c) / factors[axis];
        }
    }))
}
