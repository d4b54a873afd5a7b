//! Scalar-or-sequence transform parameters.

use super::TransformError;
use crate::layout::ChannelLayout;

/// A transform parameter given once for all spatial axes or once per axis.
#[derive(Debug, Clone, PartialEq)]
pub enum PerAxis<T> {
    /// Same value on every spatial axis; the channel axis is left alone.
    Spatial(T),
    /// One value per array axis, channel axis included.
    Axes(Vec<T>),
}

impl<T: Copy> PerAxis<T> {
    /// Expand to one value per axis of an `ndim`-axis array.
    ///
    /// `neutral` is the value that leaves an axis untouched (0 for sigma and
    /// shift, 1 for zoom) and is used for the channel axis of `Spatial`.
    pub fn resolve(
        &self,
        parameter: &'static str,
        ndim: usize,
        layout: ChannelLayout,
        neutral: T,
    ) -> Result<Vec<T>, TransformError> {
        match self {
            PerAxis::Spatial(value) => {
                let mut values = vec![*value; ndim];
                if ndim > 0 {
                    values[layout.channel_axis(ndim)] = neutral;
                }
                Ok(values)
            }
            PerAxis::Axes(values) if values.len() == ndim => Ok(values.clone()),
            PerAxis::Axes(values) => Err(TransformError::ParameterLength {
                parameter,
                given: values.len(),
                expected: ndim,
            }),
        }
    }
}

impl From<f64> for PerAxis<f64> {
    fn from(value: f64) -> Self {
        PerAxis::Spatial(value)
    }
}

impl From<Vec<f64>> for PerAxis<f64> {
    fn from(values: Vec<f64>) -> Self {
        PerAxis::Axes(values)
    }
}

impl From<&[f64]> for PerAxis<f64> {
    fn from(values: &[f64]) -> Self {
        PerAxis::Axes(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for PerAxis<f64> {
    fn from(values: [f64; N]) -> Self {
        PerAxis::Axes(values.to_vec())
    }
}
