//! Wheel drawing model
//!
//! Precomputes everything needed to draw the wheel once: wedge paths,
//! label anchors, hub and rim. Spinning never redraws the wheel; the host
//! only rotates the whole `<svg>` via [`WheelView::transform`].

use crate::core::config::WheelConfig;
use crate::core::geometry::{label_anchor, wedge_path, LabelAnchor};

use super::markup::MarkupNode;

const WEDGE_STROKE: &str = "#1f2937";
const RIM_STROKE: &str = "#374151";
const HUB_INNER_FILL: &str = "#4b5563";
const POINTER_FILL: &str = "#ffffff";
const LABEL_FILL: &str = "white";

/// Outer hub radius as a fraction of the wheel radius
pub const HUB_RATIO: f64 = 0.15;
/// Inner hub radius as a fraction of the wheel radius
pub const HUB_INNER_RATIO: f64 = 0.08;
/// Smallest label font size in pixels
pub const MIN_FONT_SIZE: f64 = 12.0;

/// Pointer triangle width in pixels
pub const POINTER_WIDTH: f64 = 30.0;
/// Pointer triangle height in pixels
pub const POINTER_HEIGHT: f64 = 25.0;

/// One precomputed wedge
#[derive(Debug, Clone, PartialEq)]
pub struct WedgeView {
    /// Segment index
    pub index: usize,
    /// SVG path data
    pub path: String,
    /// Fill color
    pub fill: String,
    /// Label text
    pub label: String,
    /// Label position and orientation
    pub anchor: LabelAnchor,
}

/// Static drawing of a wheel
#[derive(Debug, Clone, PartialEq)]
pub struct WheelView {
    size: f64,
    font_size: f64,
    wedges: Vec<WedgeView>,
}

impl WheelView {
    /// Lays out a wheel for `config`
    #[must_use]
    pub fn new(config: &WheelConfig) -> Self {
        let n = config.segments.len();
        let radius = config.radius();
        let wedges = config
            .segments
            .iter()
            .enumerate()
            .map(|(index, segment)| WedgeView {
                index,
                path: wedge_path(index, n, radius),
                fill: segment.color.clone(),
                label: segment.label.clone(),
                anchor: label_anchor(index, n, radius, config.label_radius_ratio),
            })
            .collect();
        Self {
            size: config.size,
            font_size: (config.size / 25.0).max(MIN_FONT_SIZE),
            wedges,
        }
    }

    /// Rendered diameter
    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Wheel radius
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    /// Label font size in pixels
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Precomputed wedges in segment order
    #[must_use]
    pub fn wedges(&self) -> &[WedgeView] {
        &self.wedges
    }

    /// CSS transform for a wheel rotation
    #[must_use]
    pub fn transform(rotation: f64) -> String {
        format!("rotate({rotation}deg)")
    }

    /// The rotating `<svg>` element
    #[must_use]
    pub fn to_markup(&self, id: &str) -> MarkupNode {
        let r = self.radius();
        let mut svg = MarkupNode::new("svg")
            .with_id(id)
            .with_attr("xmlns", "http://www.w3.org/2000/svg")
            .with_attr("width", self.size)
            .with_attr("height", self.size)
            .with_attr("viewBox", format!("0 0 {} {}", self.size, self.size))
            .with_attr("style", format!("transform: {}", Self::transform(0.0)));

        svg = svg.with_child(
            MarkupNode::new("circle")
                .with_attr("cx", r)
                .with_attr("cy", r)
                .with_attr("r", r - 2.0)
                .with_attr("fill", "none")
                .with_attr("stroke", RIM_STROKE)
                .with_attr("stroke-width", 4),
        );

        for wedge in &self.wedges {
            svg = svg.with_child(
                MarkupNode::new("path")
                    .with_attr("d", &wedge.path)
                    .with_attr("fill", &wedge.fill)
                    .with_attr("stroke", WEDGE_STROKE)
                    .with_attr("stroke-width", 2),
            );
        }

        for wedge in &self.wedges {
            let a = wedge.anchor;
            svg = svg.with_child(
                MarkupNode::new("text")
                    .with_attr("x", a.x)
                    .with_attr("y", a.y)
                    .with_attr("fill", LABEL_FILL)
                    .with_attr("font-size", self.font_size)
                    .with_attr("font-weight", "bold")
                    .with_attr("text-anchor", "middle")
                    .with_attr("dominant-baseline", "middle")
                    .with_attr(
                        "transform",
                        format!("rotate({}, {}, {})", a.rotation_degrees, a.x, a.y),
                    )
                    .with_text(&wedge.label),
            );
        }

        svg.with_child(
            MarkupNode::new("circle")
                .with_attr("cx", r)
                .with_attr("cy", r)
                .with_attr("r", r * HUB_RATIO)
                .with_attr("fill", WEDGE_STROKE)
                .with_attr("stroke", RIM_STROKE)
                .with_attr("stroke-width", 3),
        )
        .with_child(
            MarkupNode::new("circle")
                .with_attr("cx", r)
                .with_attr("cy", r)
                .with_attr("r", r * HUB_INNER_RATIO)
                .with_attr("fill", HUB_INNER_FILL),
        )
    }

    /// The fixed pointer: a downward triangle centered over the top edge
    #[must_use]
    pub fn pointer_markup(&self) -> MarkupNode {
        let half = POINTER_WIDTH / 2.0;
        MarkupNode::new("svg")
            .with_attr("xmlns", "http://www.w3.org/2000/svg")
            .with_attr("width", POINTER_WIDTH)
            .with_attr("height", POINTER_HEIGHT)
            .with_attr(
                "style",
                format!(
                    "position: absolute; top: -10px; left: {}px; z-index: 10",
                    self.radius() - half
                ),
            )
            .with_child(
                MarkupNode::new("polygon")
                    .with_attr(
                        "points",
                        format!("0,0 {POINTER_WIDTH},0 {half},{POINTER_HEIGHT}"),
                    )
                    .with_attr("fill", POINTER_FILL),
            )
    }
}
