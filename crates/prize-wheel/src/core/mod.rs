//! Core wheel module: segments, errors, and the spin engine
//!
//! Nothing in here depends on a browser. Time arrives as plain
//! millisecond timestamps and randomness through [`random::RandomSource`].

pub mod config;
pub mod easing;
pub mod engine;
pub mod geometry;
pub mod random;
pub mod tone;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for wheel operations
pub type WheelResult<T> = Result<T, WheelError>;

/// Errors that can occur while building or driving a wheel
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelError {
    /// The wheel has no segments to land on
    #[error("Wheel needs at least one segment")]
    NoSegments,

    /// Spin duration is zero, negative, or not finite
    #[error("Invalid spin duration: {0}ms (must be positive and finite)")]
    InvalidDuration(f64),

    /// Rendered size is zero, negative, or not finite
    #[error("Invalid wheel size: {0} (must be positive and finite)")]
    InvalidSize(f64),

    /// Label radius ratio outside (0, 1]
    #[error("Invalid label radius ratio: {0} (must be in (0, 1])")]
    InvalidLabelRadius(f64),

    /// Extra-turn range is inverted
    #[error("Invalid extra turn range: {min}..={max}")]
    InvalidTurnRange {
        /// Lower bound of full turns
        min: u32,
        /// Upper bound of full turns
        max: u32,
    },

    /// Requested spin target lies behind the current rotation
    #[error("Spin target {target} is behind current rotation {current}")]
    TargetBehind {
        /// Requested target rotation in degrees
        target: f64,
        /// Rotation at the time of the request
        current: f64,
    },

    /// Configuration could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(String),

    /// The frame scheduler refused to schedule a frame
    #[error("Frame scheduling failed: {0}")]
    Scheduler(String),

    /// A browser API call threw
    #[error("Browser error: {0}")]
    Browser(String),
}

impl From<serde_json::Error> for WheelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// One labeled wedge of the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Text shown on the wedge and reported on a win
    pub label: String,
    /// Fill color (any CSS color); display only
    pub color: String,
}

impl Segment {
    /// Creates a segment
    #[must_use]
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== WheelError tests =====

    #[test]
    fn test_error_display_no_segments() {
        assert_eq!(
            WheelError::NoSegments.to_string(),
            "Wheel needs at least one segment"
        );
    }

    #[test]
    fn test_error_display_turn_range() {
        let err = WheelError::InvalidTurnRange { min: 8, max: 4 };
        assert_eq!(err.to_string(), "Invalid extra turn range: 8..=4");
    }

    #[test]
    fn test_error_display_target_behind() {
        let err = WheelError::TargetBehind {
            target: 10.0,
            current: 20.0,
        };
        assert!(err.to_string().contains("behind current rotation 20"));
    }

    #[test]
    fn test_error_from_json() {
        let parse: Result<Segment, _> = serde_json::from_str("{");
        let err: WheelError = parse.unwrap_err().into();
        assert!(matches!(err, WheelError::Config(_)));
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(WheelError::InvalidSize(0.0));
        assert!(err.to_string().contains("size"));
    }

    // ===== Segment tests =====

    #[test]
    fn test_segment_new() {
        let seg = Segment::new("Free Shipping", "#4ECDC4");
        assert_eq!(seg.label, "Free Shipping");
        assert_eq!(seg.color, "#4ECDC4");
    }

    #[test]
    fn test_segment_json() {
        let seg: Segment = serde_json::from_str(r##"{"label":"A","color":"#fff"}"##).unwrap();
        assert_eq!(seg, Segment::new("A", "#fff"));
    }
}
