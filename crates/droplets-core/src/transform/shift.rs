//! Translation by a per-axis offset.

use ndarray::ArrayD;

use super::interpolate::resample;
use super::{Boundary, PerAxis, TransformError};
use crate::layout::ChannelLayout;

/// Translate an image so that `output[i] = input[i - shift]`.
///
/// Fractional offsets are linearly interpolated. `PerAxis::Spatial` leaves
/// the channel axis in place.
///
/// # Errors
///
/// Fails if `shift` has the wrong length or contains a non-finite value.
pub fn shift(
    image: &ArrayD<f32>,
    shift: &PerAxis<f64>,
    boundary: Boundary,
    layout: ChannelLayout,
) -> Result<ArrayD<f32>, TransformError> {
    let offsets = shift.resolve("shift", image.ndim(), layout, 0.0)?;
    if let Some(&bad) = offsets.iter().find(|s| !s.is_finite()) {
        return Err(TransformError::InvalidParameter {
            parameter: "shift",
            value: bad,
        });
    }
    log::trace!("shift: offsets {:?}", offsets);

    Ok(resample(image, boundary, |dst, src| {
        for ((s, &d), &o) in src.iter_mut().zip(dst).zip(&offsets) {
            *s = d as f64 - o;
        }
    }))
}
