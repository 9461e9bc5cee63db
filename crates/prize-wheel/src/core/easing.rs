//! Easing curves for the spin animation.
//!
//! Every curve maps normalized time in `[0, 1]` onto normalized progress in
//! `[0, 1]`, starts at 0, ends at 1, and never decreases. The engine relies
//! on the last property to keep rotation monotonic within a spin.

use serde::{Deserialize, Serialize};

/// Ease-out cubic: `1 - (1 - t)^3`, fast start settling into a stop.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Easing curve applied to spin progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed, abrupt stop
    Linear,
    /// Cubic ease-out
    #[default]
    CubicOut,
}

impl Easing {
    /// Evaluate the curve at time t (clamped to 0.0-1.0).
    #[must_use]
    pub fn evaluate(self, t: f64) -> f64 {
        match self {
            Self::Linear => t.clamp(0.0, 1.0),
            Self::CubicOut => ease_out_cubic(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert!(ease_out_cubic(0.0).abs() < f64::EPSILON);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ease_out_cubic_midpoint() {
        // 1 - 0.5^3
        assert!((ease_out_cubic(0.5) - 0.875).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ease_out_cubic_clamps() {
        assert!(ease_out_cubic(-2.0).abs() < f64::EPSILON);
        assert!((ease_out_cubic(3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ease_out_cubic_monotonic() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let v = ease_out_cubic(f64::from(i) / 1000.0);
            assert!(v >= prev, "dropped at step {i}");
            prev = v;
        }
    }

    #[test]
    fn test_ease_out_faster_than_linear() {
        for t in [0.1, 0.25, 0.5, 0.75, 0.9] {
            assert!(Easing::CubicOut.evaluate(t) > Easing::Linear.evaluate(t));
        }
    }

    #[test]
    fn test_easing_default_is_cubic_out() {
        assert_eq!(Easing::default(), Easing::CubicOut);
    }

    #[test]
    fn test_easing_serde_names() {
        assert_eq!(
            serde_json::to_string(&Easing::CubicOut).unwrap(),
            "\"cubic_out\""
        );
        let parsed: Easing = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(parsed, Easing::Linear);
    }
}
