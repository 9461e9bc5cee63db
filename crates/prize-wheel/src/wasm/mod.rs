//! Presentation layer for the wheel
//!
//! Markup, layout, and a simulated frame loop that run natively, plus the
//! `wasm`-gated browser binding that wires them to a real page.

#[cfg(feature = "wasm")]
mod browser;
mod markup;
mod scheduler;
mod surface;
mod widget;

#[cfg(feature = "wasm")]
pub use browser::BrowserWheel;
pub use markup::{escape, MarkupNode};
pub use scheduler::{ManualScheduler, SpinSimulator, SpinTranscript};
pub use surface::{WedgeView, WheelView};
pub use widget::WheelWidget;
