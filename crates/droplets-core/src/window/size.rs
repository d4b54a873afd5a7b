//! Window size: one extent for all spatial axes, or one per spatial axis.

use crate::error::AugmentError;

/// Extent of the window along the spatial axes.
///
/// The channel axis is never part of a window size; windows always span
/// every channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowSize {
    /// Same extent on every spatial axis.
    Uniform(usize),
    /// One extent per spatial axis, in array axis order.
    Axes(Vec<usize>),
}

impl WindowSize {
    /// Expand to one extent per spatial axis.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::WindowDimensionMismatch`] when an explicit
    /// sequence does not have exactly `spatial_dims` entries.
    pub fn normalize(&self, spatial_dims: usize) -> Result<Vec<usize>, AugmentError> {
        match self {
            WindowSize::Uniform(extent) => Ok(vec![*extent; spatial_dims]),
            WindowSize::Axes(extents) if extents.len() == spatial_dims => Ok(extents.clone()),
            WindowSize::Axes(extents) => Err(AugmentError::WindowDimensionMismatch {
                given: extents.len(),
                expected: spatial_dims,
            }),
        }
    }
}

impl From<usize> for WindowSize {
    fn from(extent: usize) -> Self {
        WindowSize::Uniform(extent)
    }
}

impl From<Vec<usize>> for WindowSize {
    fn from(extents: Vec<usize>) -> Self {
        WindowSize::Axes(extents)
    }
}

impl From<&[usize]> for WindowSize {
    fn from(extents: &[usize]) -> Self {
        WindowSize::Axes(extents.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for WindowSize {
    fn from(extents: [usize; N]) -> Self {
        WindowSize::Axes(extents.to_vec())
    }
}
