//! Droplets Core - Localized image augmentation
//!
//! This crate provides augmentation operators for training image models
//! that modify only part of an image:
//!
//! - Windowed transforms (gaussian blur, rotation, shift, zoom): the
//!   transform is computed over the whole image, then committed only inside
//!   a randomly placed window spanning every channel
//! - Pixel dropout: random scalar elements are set to a fill value
//!
//! Images are `ndarray` arrays with one or more spatial axes plus a channel
//! axis, either last (`(h, w, c)`) or first (`(c, h, w)`). Every operator
//! mutates the image in place and draws randomness only from the `Rng`
//! handle it is given, so seeding that handle makes results reproducible.
//!
//! # Example
//!
//! ```ignore
//! use droplets_core::{gaussian_window, Boundary, ChannelLayout};
//! use rand::SeedableRng;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//! let window = gaussian_window(&mut image, 1.0, 4, Boundary::default(),
//!     ChannelLayout::ChannelsLast, &mut rng)?;
//! ```

pub mod convert;
pub mod dropout;
pub mod error;
pub mod layout;
pub mod transform;
pub mod window;

pub use dropout::{dropout, LinearAnneal, ProportionSource};
pub use error::AugmentError;
pub use layout::ChannelLayout;
pub use transform::{
    Boundary, BoundaryMode, GaussianParams, ImageTransform, PerAxis, RotateParams, ShiftParams,
    Transform, TransformError, ZoomParams,
};
pub use window::{
    apply_windowed, compute_window_indices, gaussian_window, rotate_window, shift_window,
    zoom_window, WindowIndices, WindowSize,
};
