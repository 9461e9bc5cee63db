//! Angular geometry shared by the engine and the render surface
//!
//! Two angle conventions meet here:
//!
//! - **Wheel degrees**: 0 at the top, growing clockwise. Segment `i` covers
//!   `[i * a, (i + 1) * a)` with `a = 360 / n`. Rotation and winner
//!   resolution use this.
//! - **Math degrees**: 0 on the positive x axis, growing toward positive y.
//!   In screen space (y down) that is clockwise too, so the top of the
//!   circle sits at -90. Drawing uses this.
//!
//! Both must agree, otherwise the wedge under the pointer and the reported
//! winner drift apart.

use std::fmt::Write as _;

/// Degrees in a full turn
pub const FULL_TURN: f64 = 360.0;

/// Offset from wheel degrees to math degrees (top of circle)
pub const TOP_OFFSET_DEGREES: f64 = -90.0;

/// Default label distance from the center, as a fraction of the radius
pub const DEFAULT_LABEL_RADIUS_RATIO: f64 = 0.65;

/// Angular width of one segment in degrees
#[must_use]
pub fn segment_angle(segment_count: usize) -> f64 {
    FULL_TURN / segment_count as f64
}

/// Normalizes any angle into `[0, 360)`
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    ((degrees % FULL_TURN) + FULL_TURN) % FULL_TURN
}

/// Wheel angle sitting under the top pointer for a given rotation
///
/// The wheel turns clockwise under a fixed pointer, so the pointer reads
/// the counter-rotation.
#[must_use]
pub fn pointer_angle(rotation: f64) -> f64 {
    let r = normalize_degrees(rotation);
    ((FULL_TURN - r) % FULL_TURN + FULL_TURN) % FULL_TURN
}

/// Index of the segment under the pointer for a rotation
///
/// Always in `[0, segment_count - 1]`; float rounding at exact boundaries
/// is clamped into range.
#[must_use]
pub fn winner_index(rotation: f64, segment_count: usize) -> usize {
    debug_assert!(segment_count > 0, "wheel needs at least one segment");
    let raw = (pointer_angle(rotation) / segment_angle(segment_count)).floor();
    // NaN and negatives saturate to 0 in the cast
    (raw as usize).min(segment_count.saturating_sub(1))
}

/// Start and end of a wedge in math degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeBounds {
    /// Leading edge
    pub start_degrees: f64,
    /// Trailing edge
    pub end_degrees: f64,
}

impl WedgeBounds {
    /// Angular width in degrees
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_degrees - self.start_degrees
    }

    /// Whether the SVG arc needs the large-arc flag
    #[must_use]
    pub fn is_large_arc(&self) -> bool {
        self.sweep() > 180.0
    }
}

/// Wedge bounds of segment `index` in math degrees
#[must_use]
pub fn wedge_bounds(index: usize, segment_count: usize) -> WedgeBounds {
    let a = segment_angle(segment_count);
    WedgeBounds {
        start_degrees: index as f64 * a + TOP_OFFSET_DEGREES,
        end_degrees: (index + 1) as f64 * a + TOP_OFFSET_DEGREES,
    }
}

/// Where a segment's label is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    /// Midpoint of the wedge in math degrees
    pub angle_degrees: f64,
    /// X in the wheel's own box (center at `radius`)
    pub x: f64,
    /// Y in the wheel's own box (center at `radius`)
    pub y: f64,
    /// Text rotation so the label reads along the wedge
    pub rotation_degrees: f64,
}

/// Label anchor for segment `index` on a wheel of `radius`
///
/// Coordinates are in the wheel's bounding box, whose center is
/// `(radius, radius)`.
#[must_use]
pub fn label_anchor(
    index: usize,
    segment_count: usize,
    radius: f64,
    radius_ratio: f64,
) -> LabelAnchor {
    let mid = (index as f64 + 0.5) * segment_angle(segment_count);
    let angle_degrees = mid + TOP_OFFSET_DEGREES;
    let text_radius = radius * radius_ratio;
    let theta = angle_degrees.to_radians();
    LabelAnchor {
        angle_degrees,
        x: radius + text_radius * theta.cos(),
        y: radius + text_radius * theta.sin(),
        rotation_degrees: mid,
    }
}

/// SVG path data for the wedge of segment `index`
///
/// Moves to the center, draws a line to the leading edge, arcs clockwise
/// to the trailing edge, and closes.
#[must_use]
pub fn wedge_path(index: usize, segment_count: usize, radius: f64) -> String {
    let bounds = wedge_bounds(index, segment_count);
    let (start, end) = (
        bounds.start_degrees.to_radians(),
        bounds.end_degrees.to_radians(),
    );
    let c = radius;
    let x1 = c + radius * start.cos();
    let y1 = c + radius * start.sin();
    let x2 = c + radius * end.cos();
    let y2 = c + radius * end.sin();
    let large_arc = u8::from(bounds.is_large_arc());

    let mut path = String::with_capacity(96);
    let _ = write!(
        path,
        "M {c} {c} L {x1} {y1} A {radius} {radius} 0 {large_arc} 1 {x2} {y2} Z"
    );
    path
}
