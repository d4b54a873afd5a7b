//! Conversion between `image` crate buffers and augmentation arrays.
//!
//! Arrays produced here are channel-last `(height, width, channels)` with
//! values in `0.0..=255.0`, ready for the windowed operators and dropout.

use image::{GrayImage, RgbImage};
use ndarray::{ArrayD, Axis, IxDyn};

use crate::error::AugmentError;
use crate::layout::ChannelLayout;

/// Convert an RGB image into a `(height, width, 3)` array.
pub fn array_from_rgb_image(img: &RgbImage) -> ArrayD<f32> {
    let (width, height) = img.dimensions();
    ArrayD::from_shape_fn(IxDyn(&[height as usize, width as usize, 3]), |ix| {
        img.get_pixel(ix[1] as u32, ix[0] as u32).0[ix[2]] as f32
    })
}

/// Convert a grayscale image into a `(height, width, 1)` array.
pub fn array_from_gray_image(img: &GrayImage) -> ArrayD<f32> {
    let (width, height) = img.dimensions();
    ArrayD::from_shape_fn(IxDyn(&[height as usize, width as usize, 1]), |ix| {
        img.get_pixel(ix[1] as u32, ix[0] as u32).0[0] as f32
    })
}

/// Convert a 3-channel array back into an RGB image.
///
/// Values are rounded and clamped to `0..=255`.
///
/// # Errors
///
/// Returns [`AugmentError::UnsupportedImage`] unless the array has exactly
/// two spatial axes and three channels.
pub fn rgb_image_from_array(
    array: &ArrayD<f32>,
    layout: ChannelLayout,
) -> Result<RgbImage, AugmentError> {
    if array.ndim() != 3 {
        return Err(AugmentError::UnsupportedImage(format!(
            "expected 3 axes, got shape {:?}",
            array.shape()
        )));
    }

    let view = match layout {
        ChannelLayout::ChannelsLast => array.view(),
        ChannelLayout::ChannelsFirst => {
            let mut view = array.view();
            view.swap_axes(0, 1);
            view.swap_axes(1, 2);
            view
        }
    };
    let (height, width, channels) = (
        view.len_of(Axis(0)),
        view.len_of(Axis(1)),
        view.len_of(Axis(2)),
    );
    if channels != 3 {
        return Err(AugmentError::UnsupportedImage(format!(
            "expected 3 channels, got {}",
            channels
        )));
    }

    let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(AugmentError::UnsupportedImage(format!(
                "dimensions {}x{} exceed u32",
                width, height
            )))
        }
    };

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        image::Rgb([
            to_u8(view[[y, x, 0]]),
            to_u8(view[[y, x, 1]]),
            to_u8(view[[y, x, 2]]),
        ])
    }))
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
