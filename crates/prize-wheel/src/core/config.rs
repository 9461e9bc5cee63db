//! Wheel configuration
//!
//! Everything an engine and its view need at construction time. All fields
//! except `segments` have serde defaults, so a JSON config can be as small
//! as a list of segments.

use serde::{Deserialize, Serialize};

use super::easing::Easing;
use super::geometry::DEFAULT_LABEL_RADIUS_RATIO;
use super::{Segment, WheelError, WheelResult};

/// The prize set shown when no segments are configured
#[must_use]
pub fn default_segments() -> Vec<Segment> {
    vec![
        Segment::new("10% Off", "#FF6B6B"),
        Segment::new("Free Shipping", "#4ECDC4"),
        Segment::new("Try Again", "#45B7D1"),
        Segment::new("$5 Credit", "#96CEB4"),
        Segment::new("20% Off", "#FFEAA7"),
        Segment::new("Mystery Prize", "#DDA0DD"),
    ]
}

/// Construction input for a wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Wedges in clockwise order starting at the top
    #[serde(default = "default_segments")]
    pub segments: Vec<Segment>,
    /// Length of one spin animation in milliseconds
    #[serde(default = "WheelConfig::default_duration_ms")]
    pub spin_duration_ms: f64,
    /// Rendered diameter in pixels; display only
    #[serde(default = "WheelConfig::default_size")]
    pub size: f64,
    /// Label distance from the center as a fraction of the radius
    #[serde(default = "WheelConfig::default_label_radius_ratio")]
    pub label_radius_ratio: f64,
    /// Fewest whole turns a spin travels before the landing offset
    #[serde(default = "WheelConfig::default_min_turns")]
    pub min_extra_turns: u32,
    /// Most whole turns a spin travels before the landing offset
    #[serde(default = "WheelConfig::default_max_turns")]
    pub max_extra_turns: u32,
    /// Progress curve of the spin
    #[serde(default)]
    pub easing: Easing,
    /// Seed for the spin generator; `None` lets the host pick one
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            segments: default_segments(),
            spin_duration_ms: Self::DEFAULT_DURATION_MS,
            size: Self::DEFAULT_SIZE,
            label_radius_ratio: DEFAULT_LABEL_RADIUS_RATIO,
            min_extra_turns: Self::DEFAULT_MIN_TURNS,
            max_extra_turns: Self::DEFAULT_MAX_TURNS,
            easing: Easing::default(),
            seed: None,
        }
    }
}

impl WheelConfig {
    /// Default spin length
    pub const DEFAULT_DURATION_MS: f64 = 5000.0;
    /// Default rendered diameter
    pub const DEFAULT_SIZE: f64 = 400.0;
    /// Default lower bound of extra turns
    pub const DEFAULT_MIN_TURNS: u32 = 4;
    /// Default upper bound of extra turns
    pub const DEFAULT_MAX_TURNS: u32 = 8;

    const fn default_duration_ms() -> f64 {
        Self::DEFAULT_DURATION_MS
    }

    const fn default_size() -> f64 {
        Self::DEFAULT_SIZE
    }

    const fn default_label_radius_ratio() -> f64 {
        DEFAULT_LABEL_RADIUS_RATIO
    }

    const fn default_min_turns() -> u32 {
        Self::DEFAULT_MIN_TURNS
    }

    const fn default_max_turns() -> u32 {
        Self::DEFAULT_MAX_TURNS
    }

    /// Creates a config for the given segments with default settings
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    /// Set spin duration
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.spin_duration_ms = duration_ms;
        self
    }

    /// Set rendered size
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the range of extra whole turns
    #[must_use]
    pub fn with_extra_turns(mut self, min: u32, max: u32) -> Self {
        self.min_extra_turns = min;
        self.max_extra_turns = max;
        self
    }

    /// Set easing curve
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set generator seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Radius of the rendered wheel
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    /// Checks every field an engine or view depends on
    pub fn validate(&self) -> WheelResult<()> {
        if self.segments.is_empty() {
            return Err(WheelError::NoSegments);
        }
        if !(self.spin_duration_ms.is_finite() && self.spin_duration_ms > 0.0) {
            return Err(WheelError::InvalidDuration(self.spin_duration_ms));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(WheelError::InvalidSize(self.size));
        }
        if !(self.label_radius_ratio > 0.0 && self.label_radius_ratio <= 1.0) {
            return Err(WheelError::InvalidLabelRadius(self.label_radius_ratio));
        }
        if self.min_extra_turns > self.max_extra_turns {
            return Err(WheelError::InvalidTurnRange {
                min: self.min_extra_turns,
                max: self.max_extra_turns,
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON config
    pub fn from_json(json: &str) -> WheelResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config to JSON
    pub fn to_json(&self) -> WheelResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
