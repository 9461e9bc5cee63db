//! Wheel widget: engine, drawing, spin button, and result line
//!
//! Browser-independent composition of the whole widget. The browser
//! binding renders [`WheelWidget::to_markup`] once and then only mirrors
//! [`WheelWidget::wheel_style`], the button and the result text into the
//! page after every frame.

use crate::core::config::WheelConfig;
use crate::core::engine::{
    FrameScheduler, FrameStatus, NoopObserver, SpinEngine, SpinObserver, Winner,
};
use crate::core::random::{RandomSource, Xorshift64};
use crate::core::WheelResult;

use super::markup::MarkupNode;
use super::surface::WheelView;

const BUTTON_IDLE: &str = "SPIN";
const BUTTON_BUSY: &str = "Spinning...";
const RESULT_EMPTY: &str = "Spin to play!";

/// Forwards to an outer observer while keeping the winner for display
struct Tee<'a, O: ?Sized> {
    inner: &'a mut O,
    winner: &'a mut Option<Winner>,
}

impl<O: SpinObserver + ?Sized> SpinObserver for Tee<'_, O> {
    fn on_tick(&mut self) {
        self.inner.on_tick();
    }

    fn on_spin_end(&mut self, winner: &Winner) {
        *self.winner = Some(winner.clone());
        self.inner.on_spin_end(winner);
    }
}

/// A complete prize wheel with its controls
#[derive(Debug)]
pub struct WheelWidget<R = Xorshift64> {
    engine: SpinEngine<R>,
    view: WheelView,
    last_winner: Option<Winner>,
    id_prefix: String,
}

impl WheelWidget<Xorshift64> {
    /// Builds a widget with the default element id prefix
    pub fn new(config: WheelConfig) -> WheelResult<Self> {
        Self::with_prefix(config, "prize-wheel")
    }

    /// Builds a widget whose element ids start with `prefix`
    pub fn with_prefix(config: WheelConfig, prefix: &str) -> WheelResult<Self> {
        let engine = SpinEngine::new(&config)?;
        Ok(Self::from_parts(&config, engine, prefix))
    }
}

impl<R: RandomSource> WheelWidget<R> {
    /// Wraps an existing engine; `config` must be the one it was built from
    #[must_use]
    pub fn from_parts(config: &WheelConfig, engine: SpinEngine<R>, prefix: &str) -> Self {
        Self {
            engine,
            view: WheelView::new(config),
            last_winner: None,
            id_prefix: prefix.to_string(),
        }
    }

    /// The spin engine
    #[must_use]
    pub fn engine(&self) -> &SpinEngine<R> {
        &self.engine
    }

    /// The static drawing
    #[must_use]
    pub fn view(&self) -> &WheelView {
        &self.view
    }

    /// Most recent winner
    #[must_use]
    pub fn last_winner(&self) -> Option<&Winner> {
        self.last_winner.as_ref()
    }

    /// Id of the rotating `<svg>`
    #[must_use]
    pub fn wheel_id(&self) -> String {
        format!("{}-svg", self.id_prefix)
    }

    /// Id of the spin button
    #[must_use]
    pub fn button_id(&self) -> String {
        format!("{}-button", self.id_prefix)
    }

    /// Id of the result line
    #[must_use]
    pub fn result_id(&self) -> String {
        format!("{}-result", self.id_prefix)
    }

    /// Spin button caption
    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.engine.is_spinning() {
            BUTTON_BUSY
        } else {
            BUTTON_IDLE
        }
    }

    /// Whether the spin button should be disabled
    #[must_use]
    pub fn button_disabled(&self) -> bool {
        self.engine.is_spinning()
    }

    /// Result line text
    #[must_use]
    pub fn result_text(&self) -> String {
        match &self.last_winner {
            Some(winner) => format!("You won: {}", winner.label),
            None => RESULT_EMPTY.to_string(),
        }
    }

    /// Inline style of the rotating wheel for the current frame
    #[must_use]
    pub fn wheel_style(&self) -> String {
        format!("transform: {}", WheelView::transform(self.engine.rotation()))
    }

    /// Handles a click on the wheel or button; returns whether a spin began
    pub fn click<S: FrameScheduler + ?Sized>(
        &mut self,
        now_ms: f64,
        scheduler: &mut S,
    ) -> WheelResult<bool> {
        Ok(self.engine.spin(now_ms, scheduler)?.is_started())
    }

    /// Advances one frame with no outside feedback
    pub fn frame<S: FrameScheduler + ?Sized>(
        &mut self,
        timestamp_ms: f64,
        scheduler: &mut S,
    ) -> WheelResult<FrameStatus> {
        self.frame_with(timestamp_ms, scheduler, &mut NoopObserver)
    }

    /// Advances one frame, forwarding ticks and the result to `observer`
    pub fn frame_with<S, O>(
        &mut self,
        timestamp_ms: f64,
        scheduler: &mut S,
        observer: &mut O,
    ) -> WheelResult<FrameStatus>
    where
        S: FrameScheduler + ?Sized,
        O: SpinObserver + ?Sized,
    {
        let mut tee = Tee {
            inner: observer,
            winner: &mut self.last_winner,
        };
        self.engine.on_frame(timestamp_ms, scheduler, &mut tee)
    }

    /// Releases the pending frame; the widget stops reacting afterwards
    pub fn teardown<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.engine.teardown(scheduler);
    }

    /// Full widget markup: pointer, wheel, button, result line
    #[must_use]
    pub fn to_markup(&self) -> MarkupNode {
        let size = self.view.size();
        let stage = MarkupNode::new("div")
            .with_attr(
                "style",
                format!("position: relative; width: {size}px; height: {size}px"),
            )
            .with_child(self.view.pointer_markup())
            .with_child(
                self.view
                    .to_markup(&self.wheel_id())
                    .with_attr("style", self.wheel_style()),
            );

        let mut button = MarkupNode::new("button")
            .with_id(&self.button_id())
            .with_attr("type", "button")
            .with_text(self.button_label());
        if self.button_disabled() {
            button.set_attr("disabled", "disabled");
        }

        MarkupNode::new("div")
            .with_attr("class", "prize-wheel")
            .with_attr(
                "style",
                "display: flex; flex-direction: column; align-items: center; gap: 24px",
            )
            .with_child(stage)
            .with_child(button)
            .with_child(
                MarkupNode::new("p")
                    .with_id(&self.result_id())
                    .with_text(&self.result_text()),
            )
    }
}
