//! Separable gaussian smoothing.
//!
//! The N-dimensional filter is a sequence of 1D correlations, one per axis,
//! each with a normalized gaussian kernel of radius
//! `floor(truncate * sigma + 0.5)`, capped at the lane length.

use ndarray::{ArrayD, ArrayView1, ArrayViewMut1, Axis, Zip};

use super::{Boundary, PerAxis, TransformError};
use crate::layout::ChannelLayout;

/// Kernel radius in standard deviations.
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Smooth an image with a gaussian kernel.
///
/// # Arguments
///
/// * `image` - Source image, not modified
/// * `sigma` - Standard deviation per axis; `PerAxis::Spatial` leaves the
///   channel axis unfiltered
/// * `boundary` - How samples past the edges are read
/// * `layout` - Channel axis placement
///
/// # Errors
///
/// Fails if `sigma` has the wrong length or any value is negative or not
/// finite.
pub fn gaussian_filter(
    image: &ArrayD<f32>,
    sigma: &PerAxis<f64>,
    boundary: Boundary,
    layout: ChannelLayout,
) -> Result<ArrayD<f32>, TransformError> {
    let sigmas = sigma.resolve("sigma", image.ndim(), layout, 0.0)?;
    if let Some(&bad) = sigmas.iter().find(|s| !s.is_finite() || **s < 0.0) {
        return Err(TransformError::InvalidParameter {
            parameter: "sigma",
            value: bad,
        });
    }

    let mut output = image.clone();
    for (axis, &s) in sigmas.iter().enumerate() {
        if s == 0.0 || image.len_of(Axis(axis)) == 0 {
            continue;
        }
        let kernel = gaussian_kernel(s, GAUSSIAN_TRUNCATE, image.len_of(Axis(axis)));
        log::trace!(
            "gaussian: axis {} sigma {} kernel width {}",
            axis,
            s,
            kernel.len()
        );

        let source = output.clone();
        Zip::from(output.lanes_mut(Axis(axis)))
            .and(source.lanes(Axis(axis)))
            .for_each(|dst, src| correlate_lane(src, dst, &kernel, boundary));
    }

    Ok(output)
}

/// Normalized gaussian weights of odd length `2 * radius + 1`.
///
/// The radius never exceeds `max_radius`, so huge sigmas cannot allocate
/// more than a few lanes' worth of weights.
fn gaussian_kernel(sigma: f64, truncate: f64, max_radius: usize) -> Vec<f64> {
    let radius = (truncate * sigma + 0.5).floor().min(max_radius as f64) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-((x * x) as f64) / denom).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Correlate one lane with a centered kernel.
fn correlate_lane(
    src: ArrayView1<'_, f32>,
    mut dst: ArrayViewMut1<'_, f32>,
    kernel: &[f64],
    boundary: Boundary,
) {
    let n = src.len();
    let radius = (kernel.len() / 2) as isize;

    for i in 0..n {
        let mut acc = 0.0f64;
        for (k, w) in kernel.iter().enumerate() {
            let j = i as isize + k as isize - radius;
            let v = match boundary.mode.resolve(j, n) {
                Some(idx) => src[idx],
                None => boundary.cval,
            };
            acc += w * v as f64;
        }
        dst[i] = acc as f32;
    }
}
