//! Simulated frame loop
//!
//! `ManualScheduler` stands in for `requestAnimationFrame`: it hands out
//! handles and remembers what is pending, but never fires on its own.
//! `SpinSimulator` fires those frames at a fixed interval so a whole spin
//! can be replayed deterministically.

use crate::core::engine::{
    FrameHandle, FrameScheduler, FrameStatus, SpinEngine, SpinObserver, SpinRequest, SpinRun,
    Winner,
};
use crate::core::random::RandomSource;
use crate::core::{WheelError, WheelResult};

/// Frame source driven by hand
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: Vec<FrameHandle>,
    refuse: bool,
}

impl ManualScheduler {
    /// Creates a scheduler with nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every request fail, like a torn-down page
    #[must_use]
    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }

    /// Handle of the frame waiting to fire
    #[must_use]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Removes and returns the pending frame, as if it fired
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Total frames requested so far
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Frames cancelled so far, oldest first
    #[must_use]
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> WheelResult<FrameHandle> {
        if self.refuse {
            return Err(WheelError::Scheduler("scheduler refused frame".to_string()));
        }
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}

/// Everything observed while a spin was replayed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpinTranscript {
    /// The run that was started, `None` if the request was ignored
    pub run: Option<SpinRun>,
    /// Frames delivered
    pub frames: usize,
    /// Frame timestamp of every tick, in firing order
    pub tick_times_ms: Vec<f64>,
    /// `(timestamp, rotation)` after each frame
    pub rotations: Vec<(f64, f64)>,
    /// Reported winner, if the spin completed
    pub winner: Option<Winner>,
}

impl SpinTranscript {
    /// Number of ticks fired
    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick_times_ms.len()
    }
}

struct Recorder<'a> {
    now_ms: f64,
    transcript: &'a mut SpinTranscript,
}

impl SpinObserver for Recorder<'_> {
    fn on_tick(&mut self) {
        self.transcript.tick_times_ms.push(self.now_ms);
    }

    fn on_spin_end(&mut self, winner: &Winner) {
        self.transcript.winner = Some(winner.clone());
    }
}

/// Replays spins at a fixed frame rate
#[derive(Debug, Clone, Copy)]
pub struct SpinSimulator {
    frame_interval_ms: f64,
}

impl Default for SpinSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinSimulator {
    /// 60 frames per second
    pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// Creates a 60 FPS simulator
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame_interval_ms: Self::DEFAULT_FRAME_INTERVAL_MS,
        }
    }

    /// Sets the gap between frames (floored at 1 microsecond)
    #[must_use]
    pub fn with_frame_interval_ms(mut self, interval_ms: f64) -> Self {
        self.frame_interval_ms = interval_ms.max(0.001);
        self
    }

    /// Gap between frames
    #[must_use]
    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    /// Spins to a random target starting at `start_ms` and plays it out
    pub fn run<R: RandomSource>(
        &self,
        engine: &mut SpinEngine<R>,
        start_ms: f64,
    ) -> WheelResult<SpinTranscript> {
        let mut scheduler = ManualScheduler::new();
        let request = engine.spin(start_ms, &mut scheduler)?;
        self.drive(engine, request, &mut scheduler, start_ms)
    }

    /// Spins to `target_rotation` starting at `start_ms` and plays it out
    pub fn run_to<R: RandomSource>(
        &self,
        engine: &mut SpinEngine<R>,
        target_rotation: f64,
        start_ms: f64,
    ) -> WheelResult<SpinTranscript> {
        let mut scheduler = ManualScheduler::new();
        let request = engine.spin_to(target_rotation, start_ms, &mut scheduler)?;
        self.drive(engine, request, &mut scheduler, start_ms)
    }

    fn drive<R: RandomSource>(
        &self,
        engine: &mut SpinEngine<R>,
        request: SpinRequest,
        scheduler: &mut ManualScheduler,
        start_ms: f64,
    ) -> WheelResult<SpinTranscript> {
        let mut transcript = SpinTranscript::default();
        let SpinRequest::Started(run) = request else {
            return Ok(transcript);
        };
        transcript.run = Some(run);

        let mut frame = 0u32;
        while scheduler.fire().is_some() {
            frame += 1;
            let now_ms = start_ms + f64::from(frame) * self.frame_interval_ms;
            let mut recorder = Recorder {
                now_ms,
                transcript: &mut transcript,
            };
            let status = engine.on_frame(now_ms, scheduler, &mut recorder)?;
            transcript.frames += 1;
            transcript.rotations.push((now_ms, engine.rotation()));
            if matches!(status, FrameStatus::Finished(_) | FrameStatus::Idle) {
                break;
            }
        }
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WheelConfig;
    use crate::core::engine::NoopObserver;
    use crate::core::geometry::winner_index;

    fn engine() -> SpinEngine {
        SpinEngine::new(&WheelConfig::default().with_seed(2024)).unwrap()
    }

    // ===== ManualScheduler tests =====

    #[test]
    fn test_manual_scheduler_handles_increment() {
        let mut s = ManualScheduler::new();
        assert_eq!(s.request_frame().unwrap(), FrameHandle(1));
        assert_eq!(s.request_frame().unwrap(), FrameHandle(2));
        assert_eq!(s.requested(), 2);
        assert_eq!(s.pending(), Some(FrameHandle(2)));
    }

    #[test]
    fn test_manual_scheduler_fire_clears_pending() {
        let mut s = ManualScheduler::new();
        s.request_frame().unwrap();
        assert_eq!(s.fire(), Some(FrameHandle(1)));
        assert_eq!(s.fire(), None);
    }

    #[test]
    fn test_manual_scheduler_cancel() {
        let mut s = ManualScheduler::new();
        let h = s.request_frame().unwrap();
        s.cancel_frame(h);
        assert!(s.pending().is_none());
        assert_eq!(s.cancelled(), &[h]);
    }

    #[test]
    fn test_manual_scheduler_refusing() {
        let mut s = ManualScheduler::new().refusing();
        assert!(matches!(s.request_frame(), Err(WheelError::Scheduler(_))));
        assert_eq!(s.requested(), 0);
    }

    // ===== SpinSimulator tests =====

    #[test]
    fn test_simulated_spin_completes() {
        let mut engine = engine();
        let transcript = SpinSimulator::new().run(&mut engine, 0.0).unwrap();

        let run = transcript.run.unwrap();
        let winner = transcript.winner.unwrap();
        assert_eq!(winner.index, winner_index(run.target_rotation, 6));
        assert!(!engine.is_spinning());
        // 5000ms at 60fps, give or take float rounding on the last frame
        assert!((300..=301).contains(&transcript.frames));
    }

    #[test]
    fn test_simulated_rotation_monotonic_and_ends_on_target() {
        let mut engine = engine();
        let transcript = SpinSimulator::new().run(&mut engine, 0.0).unwrap();
        let rotations: Vec<f64> = transcript.rotations.iter().map(|(_, r)| *r).collect();
        assert!(rotations.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(
            *rotations.last().unwrap(),
            transcript.run.unwrap().target_rotation
        );
    }

    #[test]
    fn test_three_boundaries_three_ticks() {
        let mut engine = engine();
        let sim = SpinSimulator::new();
        sim.run_to(&mut engine, 10.0, 0.0).unwrap();

        // 10 -> 190 crosses the 60, 120 and 180 degree boundaries
        let transcript = sim.run_to(&mut engine, 190.0, 10_000.0).unwrap();
        assert_eq!(transcript.tick_count(), 3);
        assert!(transcript
            .tick_times_ms
            .windows(2)
            .all(|w| w[1] > w[0]));
        assert_eq!(transcript.winner.unwrap().index, 2);
    }

    #[test]
    fn test_ignored_request_yields_empty_transcript() {
        let mut engine = engine();
        let mut scheduler = ManualScheduler::new();
        engine.spin(0.0, &mut scheduler).unwrap();

        let transcript = SpinSimulator::new().run(&mut engine, 10.0).unwrap();
        assert_eq!(transcript, SpinTranscript::default());
        assert!(engine.is_spinning());

        engine
            .on_frame(5_000.0, &mut scheduler, &mut NoopObserver)
            .unwrap();
        assert!(!engine.is_spinning());
    }

    #[test]
    fn test_frame_interval_floor() {
        let sim = SpinSimulator::new().with_frame_interval_ms(0.0);
        assert_eq!(sim.frame_interval_ms(), 0.001);
    }

    #[test]
    fn test_coarse_frames_still_finish() {
        let mut engine = engine();
        let transcript = SpinSimulator::new()
            .with_frame_interval_ms(2_000.0)
            .run(&mut engine, 0.0)
            .unwrap();
        assert_eq!(transcript.frames, 3);
        assert!(transcript.winner.is_some());
    }
}
