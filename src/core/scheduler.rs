//! Scroll scheduler — turns elapsed time into lane travel and rotations.
//!
//! The scheduler keeps a virtual offset: how far the lane has moved since
//! the head card was last rotated to the back.  Each tick adds
//! `speed × dt`; every time a full step has been consumed the buffer is
//! rotated once and the step subtracted, so the painted position
//! (`offset mod step`) stays continuous even across long frame gaps.

use std::time::{Duration, Instant};

use super::gate::InteractionGate;
use super::ring::RotationBuffer;

/// Whether the frame chain is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The frame was not the pending one, or the engine is not running.
    Stale,
    /// The gate was closed; nothing moved.
    Paused,
    /// The offset advanced and `rotations` full steps were consumed.
    Advanced { rotations: usize },
}

#[derive(Debug, Clone)]
pub struct ScrollScheduler {
    state: RunState,
    /// Travel speed in cells per second.
    speed: f64,
    offset: f64,
    step: f64,
    /// Instant of the previous tick; `None` right after start or reset.
    last_frame: Option<Instant>,
}

impl ScrollScheduler {
    pub fn new(speed: f64) -> Self {
        Self {
            state: RunState::Stopped,
            speed: if speed.is_finite() { speed.max(0.0) } else { 0.0 },
            offset: 0.0,
            step: 0.0,
            last_frame: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn start(&mut self) {
        self.state = RunState::Running;
        self.last_frame = None;
    }

    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
        self.last_frame = None;
    }

    /// Cache a freshly probed step.  Unusable measurements count as
    /// "not measurable yet".
    pub fn set_step(&mut self, step: f64) {
        self.step = if step.is_finite() && step > 0.0 { step } else { 0.0 };
    }

    /// Restart travel from the lane origin with a new step.  The next tick
    /// measures time from scratch.
    pub fn reset(&mut self, step: f64) {
        self.offset = 0.0;
        self.set_step(step);
        self.last_frame = None;
    }

    /// One frame at wall-clock instant `now`.  The first frame after start
    /// or reset contributes no travel.
    pub fn tick<T>(
        &mut self,
        now: Instant,
        buffer: &mut RotationBuffer<T>,
        gate: &InteractionGate,
    ) -> TickOutcome {
        let dt = match self.last_frame.replace(now) {
            Some(prev) => now.saturating_duration_since(prev),
            None => Duration::ZERO,
        };
        self.advance(dt, buffer, gate)
    }

    /// Advance by an explicit time delta.
    pub fn advance<T>(
        &mut self,
        dt: Duration,
        buffer: &mut RotationBuffer<T>,
        gate: &InteractionGate,
    ) -> TickOutcome {
        if gate.is_paused() {
            return TickOutcome::Paused;
        }

        self.offset += self.speed * dt.as_secs_f64();

        // A long gap can cover several cards; each one rotates exactly once.
        let mut rotations = 0;
        if self.step > 0.0 {
            while self.offset >= self.step {
                buffer.rotate();
                self.offset -= self.step;
                rotations += 1;
            }
        }

        if rotations > 0 {
            tracing::trace!(rotations, offset = self.offset, "lane rotated");
        }
        TickOutcome::Advanced { rotations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(buf: &RotationBuffer<char>) -> String {
        buf.iter().collect()
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn catch_up_rotates_once_per_full_step() {
        let mut sched = ScrollScheduler::new(105.0);
        sched.set_step(40.0);
        let mut buf = RotationBuffer::new(vec!['A', 'B', 'C', 'D']);
        let gate = InteractionGate::default();

        let outcome = sched.advance(secs(1.0), &mut buf, &gate);
        assert_eq!(outcome, TickOutcome::Advanced { rotations: 2 });
        assert!((sched.offset() - 25.0).abs() < 1e-9);
        assert_eq!(order(&buf), "CDAB");
    }

    #[test]
    fn three_cards_scroll_scenario() {
        let mut sched = ScrollScheduler::new(50.0);
        sched.set_step(50.0);
        let mut buf = RotationBuffer::new(vec!['A', 'B', 'C']);
        let gate = InteractionGate::default();

        sched.advance(secs(0.6), &mut buf, &gate);
        assert!((sched.offset() - 30.0).abs() < 1e-9);
        assert_eq!(order(&buf), "ABC");

        let outcome = sched.advance(secs(0.5), &mut buf, &gate);
        assert_eq!(outcome, TickOutcome::Advanced { rotations: 1 });
        assert!((sched.offset() - 5.0).abs() < 1e-9);
        assert_eq!(order(&buf), "BCA");
    }

    #[test]
    fn paused_tick_changes_nothing() {
        let mut sched = ScrollScheduler::new(50.0);
        sched.set_step(10.0);
        let mut buf = RotationBuffer::new(vec!['A', 'B', 'C']);
        let mut gate = InteractionGate::default();
        sched.advance(secs(0.1), &mut buf, &gate);

        gate.pause();
        let outcome = sched.advance(secs(5.0), &mut buf, &gate);
        assert_eq!(outcome, TickOutcome::Paused);
        assert!((sched.offset() - 5.0).abs() < 1e-9);
        assert_eq!(order(&buf), "ABC");
    }

    #[test]
    fn unmeasured_step_accumulates_then_catches_up() {
        let mut sched = ScrollScheduler::new(10.0);
        let mut buf = RotationBuffer::new(vec!['A', 'B', 'C']);
        let gate = InteractionGate::default();

        let outcome = sched.advance(secs(9.0), &mut buf, &gate);
        assert_eq!(outcome, TickOutcome::Advanced { rotations: 0 });
        assert!((sched.offset() - 90.0).abs() < 1e-9);
        assert_eq!(order(&buf), "ABC");

        sched.set_step(40.0);
        let outcome = sched.advance(Duration::ZERO, &mut buf, &gate);
        assert_eq!(outcome, TickOutcome::Advanced { rotations: 2 });
        assert!((sched.offset() - 10.0).abs() < 1e-9);
        assert_eq!(order(&buf), "CAB");
    }

    #[test]
    fn offset_stays_below_step_after_every_tick() {
        let mut sched = ScrollScheduler::new(45.0);
        sched.set_step(37.0);
        let mut buf = RotationBuffer::new((0..6).collect::<Vec<u8>>());
        let gate = InteractionGate::default();

        for ms in [0u64, 16, 17, 250, 3, 1_900, 16, 60_000, 33, 0, 999] {
            sched.advance(Duration::from_millis(ms), &mut buf, &gate);
            assert!(sched.offset() >= 0.0);
            assert!(sched.offset() < sched.step());
        }
        let mut members: Vec<u8> = buf.iter().copied().collect();
        members.sort_unstable();
        assert_eq!(members, (0..6).collect::<Vec<u8>>());
    }

    #[test]
    fn first_tick_after_reset_does_not_jump() {
        let mut sched = ScrollScheduler::new(45.0);
        sched.start();
        sched.reset(30.0);
        let mut buf = RotationBuffer::new(vec!['A', 'B']);
        let gate = InteractionGate::default();

        let t0 = Instant::now();
        sched.tick(t0, &mut buf, &gate);
        assert_eq!(sched.offset(), 0.0);

        sched.tick(t0 + Duration::from_millis(200), &mut buf, &gate);
        assert!((sched.offset() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn paused_ticks_keep_the_clock_moving() {
        let mut sched = ScrollScheduler::new(10.0);
        sched.set_step(100.0);
        let mut buf = RotationBuffer::new(vec!['A', 'B']);
        let mut gate = InteractionGate::default();

        let t0 = Instant::now();
        sched.tick(t0, &mut buf, &gate);
        gate.pause();
        sched.tick(t0 + Duration::from_secs(3), &mut buf, &gate);
        gate.resume();
        sched.tick(t0 + Duration::from_millis(3_500), &mut buf, &gate);

        // Only the half second after resuming counts.
        assert!((sched.offset() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn bad_step_is_treated_as_unmeasured() {
        let mut sched = ScrollScheduler::new(10.0);
        sched.set_step(f64::NAN);
        assert_eq!(sched.step(), 0.0);
        sched.set_step(-4.0);
        assert_eq!(sched.step(), 0.0);
    }
}
