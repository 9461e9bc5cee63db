//! Prize Wheel - spin engine and wheel geometry
//!
//! A circular spinner divided into equally sized, labeled segments. A spin
//! eases the wheel through several full turns and lands on a uniformly
//! random angle; the segment under the fixed top pointer wins.
//!
//! The engine never touches a display loop or a random generator
//! directly. Frames come through a [`FrameScheduler`](core::engine::FrameScheduler),
//! randomness through a [`RandomSource`](core::random::RandomSource), and
//! tick/result notifications go out through a
//! [`SpinObserver`](core::engine::SpinObserver). That keeps every spin
//! reproducible under test.
//!
//! # Example
//!
//! ```rust
//! use prize_wheel::prelude::*;
//!
//! let config = WheelConfig::default().with_seed(7);
//! let mut engine = SpinEngine::new(&config).unwrap();
//!
//! // Drive the whole spin at 60 FPS without a browser
//! let transcript = SpinSimulator::new().run(&mut engine, 0.0).unwrap();
//! let winner = transcript.winner.unwrap();
//! assert_eq!(winner.index, winner_index(engine.rotation(), config.segments.len()));
//! assert!(!engine.is_spinning());
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;

/// Presentation layer - always available for testing
/// (markup and scheduling models run natively, browser bindings need `wasm`)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::config::{default_segments, WheelConfig};
    pub use crate::core::easing::{ease_out_cubic, Easing};
    pub use crate::core::engine::{
        FrameHandle, FrameScheduler, FrameStatus, NoopObserver, SpinEngine, SpinObserver,
        SpinRequest, SpinRun, SpinState, Winner,
    };
    pub use crate::core::geometry::{
        label_anchor, normalize_degrees, pointer_angle, segment_angle, wedge_bounds,
        winner_index, LabelAnchor, WedgeBounds,
    };
    pub use crate::core::random::{RandomSource, Xorshift64};
    pub use crate::core::tone::{ClickTone, Waveform};
    pub use crate::core::{Segment, WheelError, WheelResult};

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserWheel;

    pub use crate::wasm::{
        ManualScheduler, MarkupNode, SpinSimulator, SpinTranscript, WheelView, WheelWidget,
    };
}
