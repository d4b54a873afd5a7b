//! Rotation within a plane of two axes.
//!
//! The rotation uses inverse mapping: for each output index we compute the
//! source coordinate it comes from and interpolate there. Only the two
//! plane axes are remapped; every other axis (including channels) is read
//! at the same index.
//!
//! For rotation by angle θ around the center `c` of the plane axes `(a, b)`:
//! ```text
//! src_a = c_a + (dst_a - c_a) * cos(θ) + (dst_b - c_b) * sin(θ)
//! src_b = c_b - (dst_a - c_a) * sin(θ) + (dst_b - c_b) * cos(θ)
//! ```
//! The output keeps the input shape; corners rotated out of view are lost
//! and uncovered areas follow the boundary mode.

use ndarray::ArrayD;

use super::interpolate::resample;
use super::{Boundary, TransformError};
use crate::layout::ChannelLayout;

/// Rotate an image by `angle_degrees` in the plane of `axes`.
///
/// `axes` defaults to the first two spatial axes of `layout`.
///
/// # Errors
///
/// Fails if the angle is not finite, or the axes are equal, out of range,
/// or the image has fewer than two spatial axes and no axes are given.
pub fn rotate(
    image: &ArrayD<f32>,
    angle_degrees: f64,
    axes: Option<(usize, usize)>,
    boundary: Boundary,
    layout: ChannelLayout,
) -> Result<ArrayD<f32>, TransformError> {
    if !angle_degrees.is_finite() {
        return Err(TransformError::InvalidParameter {
            parameter: "angle",
            value: angle_degrees,
        });
    }

    let ndim = image.ndim();
    let (a, b) = match axes {
        Some(axes) => axes,
        None => {
            let spatial = layout.spatial_axes(ndim);
            if spatial.len() < 2 {
                return Err(TransformError::InvalidAxes(
                    spatial.start,
                    spatial.start + 1,
                    ndim,
                ));
            }
            (spatial.start, spatial.start + 1)
        }
    };
    if a == b || a >= ndim || b >= ndim {
        return Err(TransformError::InvalidAxes(a, b, ndim));
    }

    // Fast path: no rotation needed
    if (angle_degrees % 360.0).abs() < 1e-9 {
        return Ok(image.clone());
    }

    let theta = angle_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let shape = image.shape();
    let ca = (shape[a] as f64 - 1.0) / 2.0;
    let cb = (shape[b] as f64 - 1.0) / 2.0;
    log::trace!(
        "rotate: {} degrees in plane ({}, {}) around ({}, {})",
        angle_degrees,
        a,
        b,
        ca,
        cb
    );

    Ok(resample(image, boundary, |dst, src| {
        for (s, &d) in src.iter_mut().zip(dst) {
            *s = d as f64;
        }
        let da = dst[a] as f64 - ca;
        let db = dst[b] as f64 - cb;
        src[a] = ca + da * cos + db * sin;
        src[b] = cb - da * sin + db * cos;
    }))
}
