//! Cubic easing curves.
//!
//! Each curve maps linear progress in `[0, 1]` to eased progress in the same
//! range. They are total over all real inputs.

use serde::{Deserialize, Serialize};

/// Slow start, fast middle, slow finish.
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Fast start, slow finish.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Slow start, fast finish.
#[inline]
pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

/// Named easing curve, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    InCubic,
    OutCubic,
    #[default]
    InOutCubic,
}

impl Easing {
    /// Apply the curve to linear progress `t`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::InCubic => ease_in_cubic(t),
            Easing::OutCubic => ease_out_cubic(t),
            Easing::InOutCubic => ease_in_out_cubic(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-12;

    #[rstest]
    #[case(ease_in_out_cubic)]
    #[case(ease_out_cubic)]
    #[case(ease_in_cubic)]
    fn test_boundaries(#[case] f: fn(f64) -> f64) {
        assert!(f(0.0).abs() < EPS);
        assert!((f(1.0) - 1.0).abs() < EPS);
    }

    #[rstest]
    #[case(ease_in_out_cubic)]
    #[case(ease_out_cubic)]
    #[case(ease_in_cubic)]
    fn test_monotonic(#[case] f: fn(f64) -> f64) {
        let mut prev = f(0.0);
        for i in 1..=1000 {
            let v = f(i as f64 / 1000.0);
            assert!(v >= prev, "curve decreased at step {i}");
            prev = v;
        }
    }

    #[test]
    fn test_in_out_midpoint() {
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < EPS);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < EPS);
    }

    #[test]
    fn test_out_and_in_shapes() {
        assert!((ease_out_cubic(0.5) - 0.875).abs() < EPS);
        assert!((ease_in_cubic(0.5) - 0.125).abs() < EPS);
    }

    #[test]
    fn test_easing_enum_dispatch() {
        assert_eq!(Easing::Linear.apply(0.3), 0.3);
        assert_eq!(Easing::InCubic.apply(0.5), ease_in_cubic(0.5));
        assert_eq!(Easing::OutCubic.apply(0.5), ease_out_cubic(0.5));
        assert_eq!(Easing::default().apply(0.5), ease_in_out_cubic(0.5));
    }
}
