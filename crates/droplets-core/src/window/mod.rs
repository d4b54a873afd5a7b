//! Windowed augmentation.
//!
//! This module places a random window inside an image and commits a
//! whole-image transform only inside that window.
//!
//! - `size` - scalar or per-axis window extents
//! - `indices` - random window placement
//! - `apply` - transform-then-merge, plus the blur/rotate/shift/zoom wrappers

mod apply;
mod indices;
mod size;

pub use apply::{apply_windowed, gaussian_window, rotate_window, shift_window, zoom_window};
pub use indices::{compute_window_indices, WindowIndices};
pub use size::WindowSize;
