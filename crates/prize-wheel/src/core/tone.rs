//! Click tone played on every segment crossing.
//!
//! Pure parameters; the browser player turns them into an oscillator and a
//! gain envelope.

use serde::{Deserialize, Serialize};

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// Pure tone
    Sine,
    /// Hard-edged, reads as a mechanical click
    Square,
    /// Between sine and square
    Triangle,
}

impl Waveform {
    /// Web Audio oscillator type name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Square => "square",
            Self::Triangle => "triangle",
        }
    }
}

/// A short oscillator burst with exponential decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickTone {
    /// Oscillator pitch
    pub frequency_hz: f32,
    /// Oscillator shape
    pub waveform: Waveform,
    /// Gain at onset
    pub peak_gain: f32,
    /// Gain reached at the end of the burst (must stay above 0 for an
    /// exponential ramp)
    pub floor_gain: f32,
    /// Length of the burst
    pub duration_secs: f64,
}

impl Default for ClickTone {
    fn default() -> Self {
        Self {
            frequency_hz: 1000.0,
            waveform: Waveform::Square,
            peak_gain: 0.3,
            floor_gain: 0.01,
            duration_secs: 0.05,
        }
    }
}

impl ClickTone {
    /// Gain at `t` seconds after onset following the exponential ramp
    #[must_use]
    pub fn gain_at(&self, t: f64) -> f32 {
        if t <= 0.0 {
            return self.peak_gain;
        }
        if t >= self.duration_secs {
            return self.floor_gain;
        }
        let ratio = f64::from(self.floor_gain) / f64::from(self.peak_gain);
        (f64::from(self.peak_gain) * ratio.powf(t / self.duration_secs)) as f32
    }

    /// Start and stop times of a burst beginning at `now`
    #[must_use]
    pub fn window(&self, now: f64) -> (f64, f64) {
        (now, now + self.duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_click() {
        let tone = ClickTone::default();
        assert_eq!(tone.frequency_hz, 1000.0);
        assert_eq!(tone.waveform, Waveform::Square);
        assert_eq!(tone.peak_gain, 0.3);
        assert_eq!(tone.floor_gain, 0.01);
        assert_eq!(tone.duration_secs, 0.05);
    }

    #[test]
    fn test_waveform_names() {
        assert_eq!(Waveform::Square.as_str(), "square");
        assert_eq!(Waveform::Sine.as_str(), "sine");
        assert_eq!(Waveform::Triangle.as_str(), "triangle");
    }

    #[test]
    fn test_gain_envelope_endpoints() {
        let tone = ClickTone::default();
        assert_eq!(tone.gain_at(0.0), 0.3);
        assert_eq!(tone.gain_at(0.05), 0.01);
        assert_eq!(tone.gain_at(1.0), 0.01);
    }

    #[test]
    fn test_gain_envelope_decays() {
        let tone = ClickTone::default();
        let mut prev = tone.gain_at(0.0);
        for i in 1..=10 {
            let g = tone.gain_at(f64::from(i) * 0.005);
            assert!(g < prev);
            prev = g;
        }
    }

    #[test]
    fn test_window() {
        let (start, stop) = ClickTone::default().window(2.0);
        assert_eq!(start, 2.0);
        assert!((stop - 2.05).abs() < 1e-12);
    }
}
