//! Error types for augmentation operators.

use thiserror::Error;

use crate::transform::TransformError;

/// Errors that can occur while applying an augmentation.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// The image needs at least one spatial axis plus the channel axis.
    #[error("Invalid image shape {0:?}: expected at least one spatial axis and a channel axis")]
    InvalidShape(Vec<usize>),

    /// An explicit window size does not cover every spatial axis.
    #[error(
        "window_size should be an integer or a sequence of the same length as the spatial \
         dimensions, but got window_size length {given} and spatial dimension length {expected}"
    )]
    WindowDimensionMismatch { given: usize, expected: usize },

    /// The window does not fit inside the image along some axis.
    #[error("Window extent {window} does not fit axis {axis} of extent {extent}")]
    WindowTooLarge {
        axis: usize,
        window: usize,
        extent: usize,
    },

    /// A transform returned an array whose shape differs from its input.
    #[error("Transform output shape {actual:?} does not match image shape {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Dropout proportion is not a finite value in `[0, 1]`.
    #[error("Dropout proportion must be within [0, 1], got {0}")]
    InvalidProportion(f64),

    /// The array cannot be represented as the requested image buffer.
    #[error("Unsupported image array: {0}")]
    UnsupportedImage(String),

    /// Error raised by the transform itself, passed through unchanged.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_names_both_lengths() {
        let err = AugmentError::WindowDimensionMismatch {
            given: 3,
            expected: 2,
        };
        let message = err.to_string();
        assert!(message.contains("window_size length 3"), "{}", message);
        assert!(message.contains("spatial dimension length 2"), "{}", message);
    }

    #[test]
    fn test_transform_error_is_transparent() {
        let inner = TransformError::UnknownMode("bogus".to_string());
        let expected = inner.to_string();
        let err = AugmentError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}
