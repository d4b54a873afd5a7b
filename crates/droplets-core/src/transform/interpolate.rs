//! Inverse-mapped resampling with N-linear interpolation.
//!
//! Geometric transforms are written as a mapping from each output index to
//! the (fractional) source coordinate it reads from. The value at that
//! coordinate is interpolated from the `2^k` surrounding samples, where `k`
//! is the number of axes with a fractional coordinate.

use ndarray::{ArrayD, Dimension};

use super::Boundary;

/// Integral coordinates closer than this are snapped to the grid.
const SNAP_EPSILON: f64 = 1e-9;

/// Build a same-shape output by sampling `image` at mapped coordinates.
///
/// `source_coords` receives an output index and fills the source
/// coordinate slice (one entry per axis).
pub(crate) fn resample<F>(
    image: &ArrayD<f32>,
    boundary: Boundary,
    mut source_coords: F,
) -> ArrayD<f32>
where
    F: FnMut(&[usize], &mut [f64]),
{
    let ndim = image.ndim();
    let mut coords = vec![0.0f64; ndim];
    let mut scratch = Sampler::new(ndim);
    let mut output = ArrayD::zeros(image.raw_dim());

    for (index, out) in output.indexed_iter_mut() {
        source_coords(index.slice(), &mut coords);
        *out = scratch.sample_linear(image, &coords, boundary);
    }

    output
}

/// Reusable buffers for interpolation.
struct Sampler {
    base: Vec<isize>,
    frac: Vec<f64>,
    index: Vec<usize>,
}

impl Sampler {
    fn new(ndim: usize) -> Self {
        Self {
            base: vec![0; ndim],
            frac: vec![0.0; ndim],
            index: vec![0; ndim],
        }
    }

    /// N-linear interpolation at `coords`.
    fn sample_linear(&mut self, image: &ArrayD<f32>, coords: &[f64], boundary: Boundary) -> f32 {
        let shape = image.shape();
        let mut fractional_axes = 0usize;

        for (axis, &c) in coords.iter().enumerate() {
            let rounded = c.round();
            if (c - rounded).abs() < SNAP_EPSILON {
                self.base[axis] = rounded as isize;
                self.frac[axis] = 0.0;
            } else {
                let floor = c.floor();
                self.base[axis] = floor as isize;
                self.frac[axis] = c - floor;
                fractional_axes += 1;
            }
        }

        if fractional_axes == 0 {
            return self.read(image, shape, 0, boundary);
        }

        let mut acc = 0.0f64;
        for corner in 0..(1usize << coords.len()) {
            let mut weight = 1.0f64;
            for (axis, &t) in self.frac.iter().enumerate() {
                let upper = corner & (1 << axis) != 0;
                weight *= match (upper, t == 0.0) {
                    (true, true) => 0.0,
                    (true, false) => t,
                    (false, _) => 1.0 - t,
                };
            }
            if weight == 0.0 {
                continue;
            }
            acc += weight * self.read(image, shape, corner, boundary) as f64;
        }
        acc as f32
    }

    /// Read the grid sample at `base + corner offsets`.
    fn read(
        &mut self,
        image: &ArrayD<f32>,
        shape: &[usize],
        corner: usize,
        boundary: Boundary,
    ) -> f32 {
        for (axis, &len) in shape.iter().enumerate() {
            let offset = ((corner >> axis) & 1) as isize;
            match boundary.mode.resolve(self.base[axis] + offset, len) {
                Some(i) => self.index[axis] = i,
                None => return boundary.cval,
            }
        }
        image[self.index.as_slice()]
    }
}
