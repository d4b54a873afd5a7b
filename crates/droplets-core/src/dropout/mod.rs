//! Pixel dropout.
//!
//! Dropout sets randomly chosen scalar elements of an image to a fixed fill
//! value. Channels are independent: a dropped element is a single value on
//! one channel, not a full pixel. Unlike the windowed operators there is no
//! window; drops can land anywhere.

mod proportion;

pub use proportion::{LinearAnneal, ProportionSource};

use ndarray::ArrayD;
use rand::Rng;

use crate::error::AugmentError;

/// Drop a proportion of the elements of an image.
///
/// The number of drops is `floor(proportion * image.len())`. Coordinates are
/// drawn with replacement, axis by axis: first every coordinate along axis
/// 0, then along axis 1, and so on. Drop `k` is the element at the `k`-th
/// coordinate of every axis, so repeated coordinates can make the number of
/// distinct dropped elements smaller than the count.
///
/// # Arguments
///
/// * `image` - Image to modify in place
/// * `proportion` - Fraction of elements to drop, used when `source` is `None`
/// * `cval` - Value written to dropped elements
/// * `source` - Optional proportion source; pulled exactly once per call
/// * `rng` - Random source for the coordinates
///
/// # Returns
///
/// The number of coordinate tuples written.
///
/// # Errors
///
/// Returns [`AugmentError::InvalidProportion`] if the effective proportion
/// is not a finite value in `[0, 1]`. The image is left untouched.
///
/// # Example
///
/// ```ignore
/// let mut anneal = LinearAnneal::new(0.0, 0.2, 10_000);
/// dropout(&mut image, 0.0, 0.0, Some(&mut anneal), &mut rng)?;
/// ```
pub fn dropout<A, R>(
    image: &mut ArrayD<A>,
    proportion: f64,
    cval: A,
    source: Option<&mut dyn ProportionSource>,
    rng: &mut R,
) -> Result<usize, AugmentError>
where
    A: Clone,
    R: Rng + ?Sized,
{
    let proportion = match source {
        Some(source) => source.next_proportion(),
        None => proportion,
    };
    if !proportion.is_finite() || !(0.0..=1.0).contains(&proportion) {
        return Err(AugmentError::InvalidProportion(proportion));
    }

    let total = image.len();
    let count = (proportion * total as f64).floor() as usize;
    log::debug!(
        "dropout: proportion {} of {} elements, {} drops",
        proportion,
        total,
        count
    );
    if count == 0 {
        return Ok(0);
    }

    let coords: Vec<Vec<usize>> = image
        .shape()
        .iter()
        .map(|&len| (0..count).map(|_| rng.gen_range(0..len)).collect())
        .collect();

    let mut index = vec![0usize; image.ndim()];
    for k in 0..count {
        for (slot, axis) in index.iter_mut().zip(&coords) {
            *slot = axis[k];
        }
        image[index.as_slice()] = cval.clone();
    }

    Ok(count)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
