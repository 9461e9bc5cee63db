//! Spin engine: rotation state, timed spin animation, winner resolution
//!
//! The engine is driven from outside. `spin` starts a run and asks a
//! [`FrameScheduler`] for the first frame; the host calls `on_frame` with
//! the frame timestamp whenever that frame fires, and the engine asks for
//! the next one until the run's duration has elapsed. Tick and result
//! notifications go to a [`SpinObserver`].
//!
//! ```text
//! spin(now) ──► request_frame ──► on_frame(ts) ──┬─► request_frame ──► on_frame(ts) ...
//!                                                │
//!                                                └─► progress >= 1 ──► on_spin_end(winner)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::config::WheelConfig;
use super::easing::Easing;
use super::geometry::{winner_index, FULL_TURN};
use super::random::{RandomSource, Xorshift64};
use super::{Segment, WheelError, WheelResult};

/// Token for a frame the scheduler has promised to deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Display-refresh-aligned frame source
///
/// Each requested frame must eventually reach [`SpinEngine::on_frame`]
/// unless it is cancelled.
pub trait FrameScheduler {
    /// Schedule one frame callback
    fn request_frame(&mut self) -> WheelResult<FrameHandle>;

    /// Drop a frame callback that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) -> WheelResult<FrameHandle> {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle);
    }
}

/// Receives spin feedback
pub trait SpinObserver {
    /// The pointer moved onto a different segment during a frame
    fn on_tick(&mut self) {}

    /// A spin finished; called once per completed spin
    fn on_spin_end(&mut self, winner: &Winner) {
        let _ = winner;
    }
}

impl<O: SpinObserver + ?Sized> SpinObserver for &mut O {
    fn on_tick(&mut self) {
        (**self).on_tick();
    }

    fn on_spin_end(&mut self, winner: &Winner) {
        (**self).on_spin_end(winner);
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SpinObserver for NoopObserver {}

/// The segment a spin landed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    /// Segment label
    pub label: String,
    /// Segment position, 0 at the top going clockwise
    pub index: usize,
}

/// Rotation state read by the render surface every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    /// Clockwise wheel rotation in degrees; grows without wrapping
    pub rotation_degrees: f64,
    /// True from spin start until the result is reported
    pub is_spinning: bool,
    /// Segment under the pointer as of the last frame
    pub last_crossed_segment: usize,
}

impl Default for SpinState {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            is_spinning: false,
            last_crossed_segment: 0,
        }
    }
}

/// One spin from trigger to winner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinRun {
    /// Rotation when the spin started
    pub start_rotation: f64,
    /// Rotation the spin settles on
    pub target_rotation: f64,
    /// Timestamp of the spin request
    pub start_ms: f64,
    /// Animation length
    pub duration_ms: f64,
    /// Progress curve
    pub easing: Easing,
}

impl SpinRun {
    /// Linear progress at `now_ms`, clamped to `[0, 1]`
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        let p = (now_ms - self.start_ms) / self.duration_ms;
        if p.is_nan() {
            return 0.0;
        }
        p.clamp(0.0, 1.0)
    }

    /// Degrees the spin travels in total
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.target_rotation - self.start_rotation
    }

    /// Eased rotation at a linear progress value
    #[must_use]
    pub fn rotation_at(&self, progress: f64) -> f64 {
        if progress >= 1.0 {
            return self.target_rotation;
        }
        self.start_rotation + self.distance() * self.easing.evaluate(progress)
    }
}

/// Result of a spin request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinRequest {
    /// A new run began
    Started(SpinRun),
    /// A run was already active (or the engine was torn down); nothing changed
    Ignored,
}

impl SpinRequest {
    /// Whether the request began a run
    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

/// What a frame did
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    /// No run was active; nothing changed
    Idle,
    /// The run advanced and another frame is scheduled
    Running {
        /// Rotation after this frame
        rotation: f64,
        /// Whether the pointer changed segment this frame
        ticked: bool,
    },
    /// The run completed with this winner
    Finished(Winner),
}

/// Rotation state machine for one wheel
#[derive(Debug)]
pub struct SpinEngine<R = Xorshift64> {
    segments: Vec<Segment>,
    duration_ms: f64,
    easing: Easing,
    min_extra_turns: u32,
    max_extra_turns: u32,
    state: SpinState,
    run: Option<SpinRun>,
    pending_frame: Option<FrameHandle>,
    detached: bool,
    spins_completed: u64,
    rng: R,
}

impl SpinEngine<Xorshift64> {
    /// Creates an engine seeded from `config.seed`, or from the clock when unset
    pub fn new(config: &WheelConfig) -> WheelResult<Self> {
        let seed = config.seed.unwrap_or_else(entropy_seed);
        Self::with_rng(config, Xorshift64::new(seed))
    }
}

impl<R: RandomSource> SpinEngine<R> {
    /// Creates an engine drawing spin targets from `rng`
    pub fn with_rng(config: &WheelConfig, rng: R) -> WheelResult<Self> {
        config.validate()?;
        Ok(Self {
            segments: config.segments.clone(),
            duration_ms: config.spin_duration_ms,
            easing: config.easing,
            min_extra_turns: config.min_extra_turns,
            max_extra_turns: config.max_extra_turns,
            state: SpinState::default(),
            run: None,
            pending_frame: None,
            detached: false,
            spins_completed: 0,
            rng,
        })
    }

    /// Wheel segments in clockwise order
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Current state snapshot
    #[must_use]
    pub fn state(&self) -> SpinState {
        self.state
    }

    /// Current rotation in degrees
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.state.rotation_degrees
    }

    /// Whether a spin is in flight
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning
    }

    /// The active run, if any
    #[must_use]
    pub fn active_run(&self) -> Option<&SpinRun> {
        self.run.as_ref()
    }

    /// Whether a frame is scheduled and not yet delivered
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Whether `teardown` has run
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Number of spins that reported a winner
    #[must_use]
    pub fn spins_completed(&self) -> u64 {
        self.spins_completed
    }

    /// Spin animation length
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Segment under the pointer at the current rotation
    #[must_use]
    pub fn current_segment(&self) -> usize {
        winner_index(self.state.rotation_degrees, self.segments.len())
    }

    /// Winner for an arbitrary rotation
    #[must_use]
    pub fn resolve_winner(&self, rotation: f64) -> Winner {
        let index = winner_index(rotation, self.segments.len());
        Winner {
            label: self.segments[index].label.clone(),
            index,
        }
    }

    /// Picks a random target: whole extra turns plus a uniform offset
    ///
    /// The turn count only changes how far the wheel travels; the landing
    /// angle modulo 360 comes from the offset alone.
    fn choose_target(&mut self) -> f64 {
        let span = self.max_extra_turns - self.min_extra_turns;
        let turns = self.min_extra_turns + self.rng.next_below(span.saturating_add(1));
        let offset = self.rng.next_f64() * FULL_TURN;
        self.state.rotation_degrees + f64::from(turns) * FULL_TURN + offset
    }

    /// Starts a spin with a random target
    ///
    /// Returns [`SpinRequest::Ignored`] without touching anything while a
    /// spin is already running.
    pub fn spin<S: FrameScheduler + ?Sized>(
        &mut self,
        now_ms: f64,
        scheduler: &mut S,
    ) -> WheelResult<SpinRequest> {
        if self.rejects_spin() {
            return Ok(SpinRequest::Ignored);
        }
        let target = self.choose_target();
        self.start_run(target, now_ms, scheduler)
    }

    /// Starts a spin that settles on `target_rotation`
    ///
    /// The target must not lie behind the current rotation; the wheel only
    /// turns clockwise.
    pub fn spin_to<S: FrameScheduler + ?Sized>(
        &mut self,
        target_rotation: f64,
        now_ms: f64,
        scheduler: &mut S,
    ) -> WheelResult<SpinRequest> {
        if self.rejects_spin() {
            return Ok(SpinRequest::Ignored);
        }
        let current = self.state.rotation_degrees;
        if !(target_rotation.is_finite() && target_rotation >= current) {
            return Err(WheelError::TargetBehind {
                target: target_rotation,
                current,
            });
        }
        self.start_run(target_rotation, now_ms, scheduler)
    }

    fn rejects_spin(&self) -> bool {
        if self.detached {
            debug!("spin ignored: engine torn down");
            return true;
        }
        if self.state.is_spinning {
            debug!(
                rotation = self.state.rotation_degrees,
                "spin ignored: already spinning"
            );
            return true;
        }
        false
    }

    fn start_run<S: FrameScheduler + ?Sized>(
        &mut self,
        target_rotation: f64,
        now_ms: f64,
        scheduler: &mut S,
    ) -> WheelResult<SpinRequest> {
        let run = SpinRun {
            start_rotation: self.state.rotation_degrees,
            target_rotation,
            start_ms: now_ms,
            duration_ms: self.duration_ms,
            easing: self.easing,
        };
        // Ask for the frame first so a refusal leaves the engine idle
        let handle = scheduler.request_frame()?;

        self.pending_frame = Some(handle);
        self.state.is_spinning = true;
        self.state.last_crossed_segment = self.current_segment();
        self.run = Some(run);

        debug!(
            start = run.start_rotation,
            target = run.target_rotation,
            duration_ms = run.duration_ms,
            "spin started"
        );
        Ok(SpinRequest::Started(run))
    }

    /// Advances the active run to `timestamp_ms`
    ///
    /// Call once per delivered frame. Fires at most one tick per frame and
    /// exactly one result per run. If scheduling the next frame fails the
    /// error is returned and the run stays active without a pending frame.
    pub fn on_frame<S, O>(
        &mut self,
        timestamp_ms: f64,
        scheduler: &mut S,
        observer: &mut O,
    ) -> WheelResult<FrameStatus>
    where
        S: FrameScheduler + ?Sized,
        O: SpinObserver + ?Sized,
    {
        // The frame being delivered is the one we were holding
        self.pending_frame = None;
        if self.detached {
            return Ok(FrameStatus::Idle);
        }
        let Some(run) = self.run else {
            return Ok(FrameStatus::Idle);
        };

        let progress = run.progress(timestamp_ms);
        let rotation = run.rotation_at(progress).max(self.state.rotation_degrees);
        self.state.rotation_degrees = rotation;

        let index = self.current_segment();
        let ticked = index != self.state.last_crossed_segment;
        if ticked {
            trace!(from = self.state.last_crossed_segment, to = index, "segment crossed");
            self.state.last_crossed_segment = index;
            observer.on_tick();
        }

        if progress < 1.0 {
            self.pending_frame = Some(scheduler.request_frame()?);
            return Ok(FrameStatus::Running { rotation, ticked });
        }

        self.run = None;
        self.state.is_spinning = false;
        self.spins_completed += 1;
        let winner = self.resolve_winner(run.target_rotation);
        debug!(index = winner.index, label = %winner.label, "spin finished");
        observer.on_spin_end(&winner);
        Ok(FrameStatus::Finished(winner))
    }

    /// Cancels any pending frame and makes the engine inert
    ///
    /// For hosts that go away mid-spin; later frames and spins are no-ops.
    pub fn teardown<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending_frame.take() {
            scheduler.cancel_frame(handle);
        }
        self.detached = true;
        debug!(spinning = self.state.is_spinning, "engine torn down");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

// No wall clock on wasm32-unknown-unknown; the browser binding always seeds
#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    0
}
