//! Random window placement.
//!
//! A window is a hyper-rectangle covering `extent[i]` consecutive indices on
//! each spatial axis and every index of the channel axis. Its start offset
//! is drawn uniformly and independently per spatial axis, so that
//! `start + extent <= axis_length` always holds.

use std::ops::Range;

use rand::Rng;

use super::WindowSize;
use crate::error::AugmentError;
use crate::layout::ChannelLayout;

/// Index ranges selecting one window, one range per array axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowIndices {
    ranges: Vec<Range<usize>>,
    channel_axis: usize,
}

impl WindowIndices {
    /// Ranges in array axis order.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Range selected on `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis` is out of bounds.
    pub fn axis(&self, axis: usize) -> Range<usize> {
        self.ranges[axis].clone()
    }

    /// Index of the channel axis.
    pub fn channel_axis(&self) -> usize {
        self.channel_axis
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.ranges.len()
    }

    /// Explicit index sequence for every axis.
    pub fn sequences(&self) -> Vec<Vec<usize>> {
        self.ranges.iter().map(|r| r.clone().collect()).collect()
    }

    /// Start offset on every axis (0 for the channel axis).
    pub fn starts(&self) -> Vec<usize> {
        self.ranges.iter().map(|r| r.start).collect()
    }

    /// Window extent on every axis, channel axis included.
    pub fn shape(&self) -> Vec<usize> {
        self.ranges.iter().map(|r| r.len()).collect()
    }

    /// Number of array elements covered by the window.
    pub fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `index` lies inside the window.
    pub fn contains(&self, index: &[usize]) -> bool {
        index.len() == self.ranges.len()
            && self.ranges.iter().zip(index).all(|(r, i)| r.contains(i))
    }
}

/// Draw a random window for an image of the given shape.
///
/// # Arguments
///
/// * `shape` - Full array shape, channel axis included
/// * `window_size` - Window extent on the spatial axes
/// * `layout` - Whether channels are the first or last axis
/// * `rng` - Random source; one value is drawn per spatial axis
///
/// # Errors
///
/// * [`AugmentError::InvalidShape`] if `shape` has fewer than two axes
/// * [`AugmentError::WindowDimensionMismatch`] if an explicit window size
///   does not have one entry per spatial axis
/// * [`AugmentError::WindowTooLarge`] if the window is longer than an axis
///
/// Validation happens before any value is drawn from `rng`.
///
/// # Example
///
/// ```ignore
/// let window = compute_window_indices(&[10, 10, 3], &WindowSize::from(4),
///     ChannelLayout::ChannelsLast, &mut rng)?;
/// assert_eq!(window.axis(2), 0..3);
/// ```
pub fn compute_window_indices<R>(
    shape: &[usize],
    window_size: &WindowSize,
    layout: ChannelLayout,
    rng: &mut R,
) -> Result<WindowIndices, AugmentError>
where
    R: Rng + ?Sized,
{
    if shape.len() < 2 {
        return Err(AugmentError::InvalidShape(shape.to_vec()));
    }
    let extents = window_size.normalize(shape.len() - 1)?;
    let (spatial, channels) = layout
        .split_shape(shape)
        .ok_or_else(|| AugmentError::InvalidShape(shape.to_vec()))?;
    let first_spatial = layout.spatial_axes(shape.len()).start;

    for (i, (&extent, &window)) in spatial.iter().zip(&extents).enumerate() {
        if window > extent {
            return Err(AugmentError::WindowTooLarge {
                axis: first_spatial + i,
                window,
                extent,
            });
        }
    }

    let mut ranges: Vec<Range<usize>> = Vec::with_capacity(shape.len());
    if !layout.is_channel_last() {
        ranges.push(0..channels);
    }
    for (&extent, &window) in spatial.iter().zip(&extents) {
        let start = rng.gen_range(0..=extent - window);
        ranges.push(start..start + window);
    }
    if layout.is_channel_last() {
        ranges.push(0..channels);
    }

    Ok(WindowIndices {
        ranges,
        channel_axis: layout.channel_axis(shape.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_channel_last_example() {
        let window = compute_window_indices(
            &[10, 10, 3],
            &WindowSize::from(4),
            ChannelLayout::ChannelsLast,
            &mut rng(),
        )
        .unwrap();

        assert_eq!(window.ndim(), 3);
        assert_eq!(window.channel_axis(), 2);
        assert_eq!(window.sequences()[2], vec![0, 1, 2]);
        for axis in 0..2 {
            let r = window.axis(axis);
            assert_eq!(r.len(), 4);
            assert!(r.end <= 10);
        }
        assert_eq!(window.shape(), vec![4, 4, 3]);
        assert_eq!(window.len(), 48);
    }

    #[test]
    fn test_channel_first_example() {
        let window = compute_window_indices(
            &[3, 8, 8],
            &WindowSize::from([5, 5]),
            ChannelLayout::ChannelsFirst,
            &mut rng(),
        )
        .unwrap();

        assert_eq!(window.channel_axis(), 0);
        assert_eq!(window.sequences()[0], vec![0, 1, 2]);
        for axis in 1..3 {
            let r = window.axis(axis);
            assert_eq!(r.len(), 5);
            assert!(r.end <= 8);
        }
    }

    #[test]
    fn test_per_axis_sizes_follow_axis_order() {
        let window = compute_window_indices(
            &[20, 6, 2],
            &WindowSize::from([10, 3]),
            ChannelLayout::ChannelsLast,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(window.shape(), vec![10, 3, 2]);
    }

    #[test]
    fn test_full_extent_window_starts_at_zero() {
        let window = compute_window_indices(
            &[5, 7, 3],
            &WindowSize::from([5, 7]),
            ChannelLayout::ChannelsLast,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(window.ranges(), &[0..5, 0..7, 0..3]);
    }

    #[test]
    fn test_window_too_large() {
        let err = compute_window_indices(
            &[3, 8, 4],
            &WindowSize::from([5, 9]),
            ChannelLayout::ChannelsFirst,
            &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AugmentError::WindowTooLarge {
                axis: 2,
                window: 9,
                extent: 4
            }
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = compute_window_indices(
            &[10, 10, 3],
            &WindowSize::from(vec![4, 4, 4]),
            ChannelLayout::ChannelsLast,
            &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AugmentError::WindowDimensionMismatch {
                given: 3,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_shape_without_spatial_axis() {
        let err = compute_window_indices(
            &[3],
            &WindowSize::from(1),
            ChannelLayout::ChannelsLast,
            &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(err, AugmentError::InvalidShape(_)));
    }

    #[test]
    fn test_same_seed_same_window() {
        let shape = [32, 24, 3];
        let size = WindowSize::from(8);
        let a = compute_window_indices(&shape, &size, ChannelLayout::ChannelsLast, &mut rng());
        let b = compute_window_indices(&shape, &size, ChannelLayout::ChannelsLast, &mut rng());
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn test_every_start_is_reachable() {
        // axis of 6 with window 4 has starts 0, 1, 2
        let mut rng = rng();
        let mut seen = [false; 3];
        for _ in 0..200 {
            let window = compute_window_indices(
                &[6, 1],
                &WindowSize::from(4),
                ChannelLayout::ChannelsLast,
                &mut rng,
            )
            .unwrap();
            seen[window.axis(0).start] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_contains() {
        let window = compute_window_indices(
            &[4, 4, 2],
            &WindowSize::from(4),
            ChannelLayout::ChannelsLast,
            &mut rng(),
        )
        .unwrap();
        assert!(window.contains(&[0, 3, 1]));
        assert!(!window.contains(&[0, 4, 1]));
        assert!(!window.contains(&[0, 3]));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
