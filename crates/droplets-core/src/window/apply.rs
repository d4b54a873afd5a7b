//! Windowed transform application.
//!
//! A windowed transform computes a transform over the whole image, then
//! copies the result back only inside one randomly placed window. The
//! transform must run on the full image because blur, rotation, shift and
//! zoom all read pixels from outside the window.
//!
//! # Algorithm
//! 1. Transform the full image into a scratch copy
//! 2. Draw a random window for the image shape
//! 3. Overwrite the window region of the image with the scratch copy
//!
//! The image is untouched unless all three steps succeed.

use ndarray::{ArrayD, Slice};
use rand::Rng;

use super::{compute_window_indices, WindowIndices, WindowSize};
use crate::error::AugmentError;
use crate::layout::ChannelLayout;
use crate::transform::{
    Boundary, GaussianParams, ImageTransform, PerAxis, RotateParams, ShiftParams, Transform,
    ZoomParams,
};

/// Apply `transform` to the whole image and keep it only inside a random window.
///
/// # Arguments
///
/// * `image` - Image to modify in place
/// * `window_size` - Window extent on the spatial axes
/// * `transform` - Whole-image transform; must return an array of the same shape
/// * `layout` - Channel axis placement
/// * `rng` - Random source for the window position
///
/// # Returns
///
/// The window that was written.
///
/// # Errors
///
/// Transform errors and window errors are returned unchanged; in both cases
/// `image` is not modified.
///
/// # Example
///
/// ```ignore
/// let blur = Transform::from(GaussianParams::new(1.0, Boundary::default()));
/// let window = apply_windowed(&mut image, &WindowSize::from(4), &blur,
///     ChannelLayout::ChannelsLast, &mut rng)?;
/// ```
pub fn apply_windowed<A, T, R>(
    image: &mut ArrayD<A>,
    window_size: &WindowSize,
    transform: &T,
    layout: ChannelLayout,
    rng: &mut R,
) -> Result<WindowIndices, AugmentError>
where
    A: Clone,
    T: ImageTransform<A> + ?Sized,
    R: Rng + ?Sized,
{
    let transformed = transform.transform(image, layout)?;
    if transformed.shape() != image.shape() {
        return Err(AugmentError::ShapeMismatch {
            expected: image.shape().to_vec(),
            actual: transformed.shape().to_vec(),
        });
    }

    let window = compute_window_indices(image.shape(), window_size, layout, rng)?;
    log::debug!(
        "windowed transform: shape {:?}, window starts {:?} extents {:?}",
        image.shape(),
        window.starts(),
        window.shape()
    );

    merge_window(image, &transformed, &window);
    Ok(window)
}

/// Copy the window region of `source` into `image`.
///
/// Both arrays must have the same shape and the window must lie inside it.
fn merge_window<A: Clone>(image: &mut ArrayD<A>, source: &ArrayD<A>, window: &WindowIndices) {
    let ranges = window.ranges();
    let region = source.slice_each_axis(|ax| Slice::from(ranges[ax.axis.index()].clone()));
    image
        .slice_each_axis_mut(|ax| Slice::from(ranges[ax.axis.index()].clone()))
        .assign(&region);
}

/// Gaussian blur committed inside a random window.
///
/// `sigma` as a scalar blurs the spatial axes only; pass
/// [`PerAxis::Axes`] with a value for every axis to also blur across
/// channels.
pub fn gaussian_window<R>(
    image: &mut ArrayD<f32>,
    sigma: impl Into<PerAxis<f64>>,
    window_size: impl Into<WindowSize>,
    boundary: Boundary,
    layout: ChannelLayout,
    rng: &mut R,
) -> Result<WindowIndices, AugmentError>
where
    R: Rng + ?Sized,
{
    let transform = Transform::Gaussian(GaussianParams::new(sigma, boundary));
    apply_windowed(image, &window_size.into(), &transform, layout, rng)
}

/// Rotation committed inside a random window.
///
/// `axes` selects the plane of rotation; `None` uses the first two spatial axes.
pub fn rotate_window<R>(
    image: &mut ArrayD<f32>,
    angle: f64,
    axes: Option<(usize, usize)>,
    window_size: impl Into<WindowSize>,
    boundary: Boundary,
    layout: ChannelLayout,
    rng: &mut R,
) -> Result<WindowIndices, AugmentError>
where
    R: Rng + ?Sized,
{
    let transform = Transform::Rotate(RotateParams::new(angle, axes, boundary));
    apply_windowed(image, &window_size.into(), &transform, layout, rng)
}

/// Translation committed inside a random window.
///
/// `shift` as a scalar moves the spatial axes only; pass [`PerAxis::Axes`]
/// with a value for every axis to also shift across channels.
pub fn shift_window<R>(
    image: &mut ArrayD<f32>,
    shift: impl Into<PerAxis<f64>>,
    window_size: impl Into<WindowSize>,
    boundary: Boundary,
    layout: ChannelLayout,
    rng: &mut R,
) -> Result<WindowIndices, AugmentError>
where
    R: Rng + ?Sized,
{
    let transform = Transform::Shift(ShiftParams::new(shift, boundary));
    apply_windowed(image, &window_size.into(), &transform, layout, rng)
}

/// Zoom committed inside a random window.
pub fn zoom_window<R>(
    image: &mut ArrayD<f32>,
    zoom: impl Into<PerAxis<f64>>,
    window_size: impl Into<WindowSize>,
    boundary: Boundary,
    layout: ChannelLayout,
    rng: &mut R,
) -> Result<WindowIndices, AugmentError>
where
    R: Rng + ?Sized,
{
    let transform = Transform::Zoom(ZoomParams::new(zoom, boundary));
    apply_windowed(image, &window_size.into(), &transform, layout, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{BoundaryMode, TransformError};
    use ndarray::{Dimension, IxDyn};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Create a non-linear test image so that every transform visibly changes it.
    fn test_image(shape: &[usize]) -> ArrayD<f32> {
        let len: usize = shape.iter().product();
        ArrayD::from_shape_vec(
            IxDyn(shape),
            (0..len).map(|v| ((v * 37) % 251) as f32).collect(),
        )
        .unwrap()
    }

    fn identity(image: &ArrayD<f32>, _: ChannelLayout) -> Result<ArrayD<f32>, TransformError> {
        Ok(image.clone())
    }

    /// Assert the region-isolation property for one call.
    fn assert_isolated(
        before: &ArrayD<f32>,
        after: &ArrayD<f32>,
        full: &ArrayD<f32>,
        window: &WindowIndices,
    ) {
        for (index, value) in after.indexed_iter() {
            let index = index.slice();
            if window.contains(index) {
                assert_eq!(*value, full[index], "inside window at {:?}", index);
            } else {
                assert_eq!(*value, before[index], "outside window at {:?}", index);
            }
        }
    }

    #[test]
    fn test_identity_leaves_image_unchanged() {
        let mut image = test_image(&[10, 10, 3]);
        let before = image.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        apply_windowed(
            &mut image,
            &WindowSize::from(4),
            &identity,
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap();
        assert_eq!(image, before);
    }

    #[test]
    fn test_gaussian_only_changes_window() {
        let mut image = test_image(&[10, 10, 3]);
        let before = image.clone();
        let blur = Transform::from(GaussianParams::new(1.0, Boundary::default()));
        let full = blur.transform(&image, ChannelLayout::ChannelsLast).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let window = gaussian_window(
            &mut image,
            1.0,
            4,
            Boundary::default(),
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap();

        assert_eq!(window.shape(), vec![4, 4, 3]);
        assert_isolated(&before, &image, &full, &window);
        assert_ne!(image, before);
    }

    #[test]
    fn test_per_axis_sigma_blurs_across_channels() {
        // Only channel 1 is lit, so any value in channels 0 or 2 leaked
        // across the channel axis.
        let mut image = ArrayD::<f32>::zeros(IxDyn(&[6, 6, 3]));
        image.index_axis_mut(ndarray::Axis(2), 1).fill(9.0);

        let mut spatial = image.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        gaussian_window(
            &mut spatial,
            1.0,
            6,
            Boundary::default(),
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap();
        assert_eq!(spatial.index_axis(ndarray::Axis(2), 0).sum(), 0.0);
        assert_eq!(spatial.index_axis(ndarray::Axis(2), 2).sum(), 0.0);

        let mut every_axis = image.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        gaussian_window(
            &mut every_axis,
            PerAxis::Axes(vec![1.0, 1.0, 1.0]),
            6,
            Boundary::default(),
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap();
        assert!(every_axis[[2, 2, 0]] > 0.0);
        assert!(every_axis[[2, 2, 1]] < 9.0);
    }

    #[test]
    fn test_channel_first_rotation_window() {
        let mut image = test_image(&[3, 8, 8]);
        let before = image.clone();
        let full = Transform::from(RotateParams::new(90.0, None, Boundary::default()))
            .transform(&image, ChannelLayout::ChannelsFirst)
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let window = rotate_window(
            &mut image,
            90.0,
            None,
            [5, 5],
            Boundary::default(),
            ChannelLayout::ChannelsFirst,
            &mut rng,
        )
        .unwrap();

        assert_eq!(window.axis(0), 0..3);
        assert_isolated(&before, &image, &full, &window);
    }

    #[test]
    fn test_shift_window() {
        let mut image = test_image(&[12, 9, 2]);
        let before = image.clone();
        let shift = vec![2.0, -1.0, 0.0];
        let full = Transform::from(ShiftParams::new(
            shift.clone(),
            Boundary::new(BoundaryMode::Wrap, 0.0),
        ))
        .transform(&image, ChannelLayout::ChannelsLast)
        .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let window = shift_window(
            &mut image,
            shift,
            [6, 3],
            Boundary::new(BoundaryMode::Wrap, 0.0),
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap();
        assert_isolated(&before, &image, &full, &window);
    }

    #[test]
    fn test_zoom_window_uses_scaling() {
        let mut image = test_image(&[9, 9, 1]);
        let before = image.clone();
        let full = Transform::from(ZoomParams::new(2.0, Boundary::default()))
            .transform(&image, ChannelLayout::ChannelsLast)
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let window = zoom_window(
            &mut image,
            2.0,
            9,
            Boundary::default(),
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap();

        // a full-size window commits the whole zoomed image
        assert_eq!(window.starts(), vec![0, 0, 0]);
        assert_isolated(&before, &image, &full, &window);
        assert_eq!(image, full);
    }

    #[test]
    fn test_transform_error_leaves_image_untouched() {
        let mut image = test_image(&[6, 6, 3]);
        let before = image.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let err = gaussian_window(
            &mut image,
            -1.0,
            2,
            Boundary::default(),
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AugmentError::Transform(TransformError::InvalidParameter { .. })
        ));
        assert_eq!(image, before);
    }

    #[test]
    fn test_window_error_leaves_image_untouched() {
        let mut image = test_image(&[6, 6, 3]);
        let before = image.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let err = shift_window(
            &mut image,
            1.0,
            vec![2, 2, 2],
            Boundary::default(),
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AugmentError::WindowDimensionMismatch {
                given: 3,
                expected: 2
            }
        ));
        assert_eq!(image, before);

        let err = shift_window(
            &mut image,
            1.0,
            7,
            Boundary::default(),
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, AugmentError::WindowTooLarge { .. }));
        assert_eq!(image, before);
    }

    #[test]
    fn test_shape_changing_transform_rejected() {
        let mut image = test_image(&[4, 4, 1]);
        let before = image.clone();
        let crop = |image: &ArrayD<f32>, _: ChannelLayout| -> Result<ArrayD<f32>, TransformError> {
            Ok(image.slice_each_axis(|ax| Slice::from(0..ax.len / 2)).to_owned())
        };
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let err = apply_windowed(
            &mut image,
            &WindowSize::from(2),
            &crop,
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, AugmentError::ShapeMismatch { .. }));
        assert_eq!(image, before);
    }

    #[test]
    fn test_generic_element_type() {
        let mut image = ArrayD::<u8>::zeros(IxDyn(&[5, 5, 3]));
        let fill = |image: &ArrayD<u8>, _: ChannelLayout| -> Result<ArrayD<u8>, TransformError> {
            Ok(ArrayD::from_elem(image.raw_dim(), 255u8))
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let window = apply_windowed(
            &mut image,
            &WindowSize::from(2),
            &fill,
            ChannelLayout::ChannelsLast,
            &mut rng,
        )
        .unwrap();
        let written = image.iter().filter(|&&v| v == 255).count();
        assert_eq!(written, window.len());
        assert_eq!(written, 2 * 2 * 3);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
