//! Channel axis placement.
//!
//! Images are dense arrays with one or more spatial axes and exactly one
//! channel axis. The channel axis is either the last axis (`(h, w, c)`, the
//! default) or the first axis (`(c, h, w)`).

use std::ops::Range;

/// Position of the channel axis within an image array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelLayout {
    /// Channels are the final axis, e.g. RGB as `(n, m, 3)`.
    #[default]
    ChannelsLast,
    /// Channels are the first axis, e.g. RGB as `(3, n, m)`.
    ChannelsFirst,
}

impl ChannelLayout {
    /// Build a layout from a "channel last" flag.
    pub fn from_channel_last(channel_last: bool) -> Self {
        if channel_last {
            ChannelLayout::ChannelsLast
        } else {
            ChannelLayout::ChannelsFirst
        }
    }

    /// Returns true if channels are the final axis.
    #[inline]
    pub fn is_channel_last(self) -> bool {
        self == ChannelLayout::ChannelsLast
    }

    /// Index of the channel axis for an array with `ndim` axes.
    ///
    /// `ndim` must be at least 1.
    #[inline]
    pub fn channel_axis(self, ndim: usize) -> usize {
        match self {
            ChannelLayout::ChannelsLast => ndim.saturating_sub(1),
            ChannelLayout::ChannelsFirst => 0,
        }
    }

    /// Range of the spatial axes for an array with `ndim` axes.
    #[inline]
    pub fn spatial_axes(self, ndim: usize) -> Range<usize> {
        match self {
            ChannelLayout::ChannelsLast => 0..ndim.saturating_sub(1),
            ChannelLayout::ChannelsFirst => 1usize.min(ndim)..ndim,
        }
    }

    /// Split a shape into its spatial extents and its channel extent.
    ///
    /// Returns `None` for an empty shape.
    pub fn split_shape(self, shape: &[usize]) -> Option<(&[usize], usize)> {
        match self {
            ChannelLayout::ChannelsLast => shape
                .split_last()
                .map(|(channels, spatial)| (spatial, *channels)),
            ChannelLayout::ChannelsFirst => shape
                .split_first()
                .map(|(channels, spatial)| (spatial, *channels)),
        }
    }
}
