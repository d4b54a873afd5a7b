//! Boundary handling for samples that fall outside the array.
//!
//! Extension of `a b c d` past both edges for each mode:
//!
//! ```text
//! Reflect:   d c b a | a b c d | d c b a
//! Constant:  k k k k | a b c d | k k k k
//! Nearest:   a a a a | a b c d | d d d d
//! Mirror:    d c b   | a b c d |   c b a
//! Wrap:      a b c d | a b c d | a b c d
//! ```

use std::fmt;
use std::str::FromStr;

use super::TransformError;

/// How values outside the array extent are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Half-sample symmetric reflection about the edge.
    #[default]
    Reflect,
    /// Every outside sample takes the fill value.
    Constant,
    /// Repeat the nearest edge value.
    Nearest,
    /// Whole-sample symmetric reflection (edge value not repeated).
    Mirror,
    /// Periodic extension.
    Wrap,
}

impl BoundaryMode {
    /// Map a possibly out-of-range index onto `0..len`.
    ///
    /// Returns `None` when the sample should take the fill value, which
    /// happens for `Constant` outside the array and for empty axes.
    pub fn resolve(self, index: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = len as isize;
        if (0..n).contains(&index) {
            return Some(index as usize);
        }

        let mapped = match self {
            BoundaryMode::Constant => return None,
            BoundaryMode::Nearest => index.clamp(0, n - 1),
            BoundaryMode::Wrap => index.rem_euclid(n),
            BoundaryMode::Reflect => {
                let period = 2 * n;
                let i = index.rem_euclid(period);
                if i < n {
                    i
                } else {
                    period - 1 - i
                }
            }
            BoundaryMode::Mirror => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * n - 2;
                let i = index.rem_euclid(period);
                if i < n {
                    i
                } else {
                    period - i
                }
            }
        };
        Some(mapped as usize)
    }

    /// Lowercase name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryMode::Reflect => "reflect",
            BoundaryMode::Constant => "constant",
            BoundaryMode::Nearest => "nearest",
            BoundaryMode::Mirror => "mirror",
            BoundaryMode::Wrap => "wrap",
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryMode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reflect" => Ok(BoundaryMode::Reflect),
            "constant" => Ok(BoundaryMode::Constant),
            "nearest" => Ok(BoundaryMode::Nearest),
            "mirror" => Ok(BoundaryMode::Mirror),
            "wrap" => Ok(BoundaryMode::Wrap),
            other => Err(TransformError::UnknownMode(other.to_string())),
        }
    }
}

/// Boundary mode plus the fill value used by [`BoundaryMode::Constant`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Boundary {
    /// Out-of-bounds sampling policy.
    pub mode: BoundaryMode,
    /// Fill value for constant mode.
    pub cval: f32,
}

impl Boundary {
    pub fn new(mode: BoundaryMode, cval: f32) -> Self {
        Self { mode, cval }
    }

    /// Constant fill with `cval`.
    pub fn constant(cval: f32) -> Self {
        Self::new(BoundaryMode::Constant, cval)
    }
}

impl From<BoundaryMode> for Boundary {
    fn from(mode: BoundaryMode) -> Self {
        Self::new(mode, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extend(mode: BoundaryMode, len: usize, from: isize, to: isize) -> Vec<Option<usize>> {
        (from..to).map(|i| mode.resolve(i, len)).collect()
    }

    #[test]
    fn test_in_range_is_identity() {
        for mode in [
            BoundaryMode::Reflect,
            BoundaryMode::Constant,
            BoundaryMode::Nearest,
            BoundaryMode::Mirror,
            BoundaryMode::Wrap,
        ] {
            for i in 0..4 {
                assert_eq!(mode.resolve(i, 4), Some(i as usize), "mode {}", mode);
            }
        }
    }

    #[test]
    fn test_reflect() {
        // d c b a | a b c d | d c b a
        let got = extend(BoundaryMode::Reflect, 4, -4, 8);
        let want: Vec<_> = [3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0]
            .into_iter()
            .map(Some)
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_mirror() {
        // d c b | a b c d | c b a
        let got = extend(BoundaryMode::Mirror, 4, -3, 7);
        let want: Vec<_> = [3, 2, 1, 0, 1, 2, 3, 2, 1, 0]
            .into_iter()
            .map(Some)
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_wrap() {
        let got = extend(BoundaryMode::Wrap, 4, -2, 6);
        let want: Vec<_> = [2, 3, 0, 1, 2, 3, 0, 1].into_iter().map(Some).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_nearest() {
        let got = extend(BoundaryMode::Nearest, 4, -2, 6);
        let want: Vec<_> = [0, 0, 0, 1, 2, 3, 3, 3].into_iter().map(Some).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_constant_outside_is_fill() {
        assert_eq!(BoundaryMode::Constant.resolve(-1, 4), None);
        assert_eq!(BoundaryMode::Constant.resolve(4, 4), None);
    }

    #[test]
    fn test_single_element_axis() {
        for mode in [
            BoundaryMode::Reflect,
            BoundaryMode::Nearest,
            BoundaryMode::Mirror,
            BoundaryMode::Wrap,
        ] {
            assert_eq!(mode.resolve(-3, 1), Some(0), "mode {}", mode);
            assert_eq!(mode.resolve(5, 1), Some(0), "mode {}", mode);
        }
    }

    #[test]
    fn test_empty_axis() {
        assert_eq!(BoundaryMode::Reflect.resolve(0, 0), None);
    }

    #[test]
    fn test_parse_round_trip_names() {
        for name in ["reflect", "constant", "nearest", "mirror", "wrap"] {
            let mode: BoundaryMode = name.parse().unwrap();
            assert_eq!(mode.to_string(), name);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "bogus".parse::<BoundaryMode>().unwrap_err();
        assert!(matches!(err, TransformError::UnknownMode(ref m) if m == "bogus"));
    }

    #[test]
    fn test_boundary_defaults() {
        let b = Boundary::default();
        assert_eq!(b.mode, BoundaryMode::Reflect);
        assert_eq!(b.cval, 0.0);
        assert_eq!(Boundary::constant(2.5).mode, BoundaryMode::Constant);
    }
}
