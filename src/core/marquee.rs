//! Marquee lifecycle — ties the ring, scheduler and gate to content,
//! resize and teardown events.
//!
//! The marquee owns the only pending frame.  Every accepted frame ticks
//! the scheduler and immediately requests its successor, so the chain
//! sustains itself without a fixed-period timer.  Teardown cancels the
//! pending frame and any id that still arrives afterwards is rejected.

use std::time::Instant;

use super::frame::{FrameId, FrameScheduler};
use super::gate::InteractionGate;
use super::geometry::GeometryProbe;
use super::ring::RotationBuffer;
use super::scheduler::{RunState, ScrollScheduler, TickOutcome};

pub struct Marquee<T, F: FrameScheduler> {
    buffer: RotationBuffer<T>,
    scheduler: ScrollScheduler,
    gate: InteractionGate,
    frames: F,
    /// The single outstanding frame while running.
    pending: Option<FrameId>,
    mounted: bool,
    torn_down: bool,
    /// Set when content or viewport changed and the step must be probed
    /// from the next rendered frame.
    needs_measure: bool,
}

impl<T, F: FrameScheduler> Marquee<T, F> {
    pub fn new(speed: f64, frames: F) -> Self {
        Self {
            buffer: RotationBuffer::new(Vec::new()),
            scheduler: ScrollScheduler::new(speed),
            gate: InteractionGate::default(),
            frames,
            pending: None,
            mounted: false,
            torn_down: false,
            needs_measure: false,
        }
    }

    /// Attach to a live viewport.  Resize events are honoured from here on.
    pub fn mount(&mut self) {
        if self.torn_down || self.mounted {
            return;
        }
        self.mounted = true;
        self.sync_run_state();
    }

    /// A new list arrived from the feed.
    pub fn replace_items(&mut self, items: Vec<T>) {
        if self.torn_down {
            return;
        }
        self.buffer.replace(items);
        self.scheduler.reset(0.0);
        self.needs_measure = !self.buffer.is_empty();
        tracing::debug!(items = self.buffer.len(), "marquee content replaced");
        self.sync_run_state();
    }

    /// The viewport changed size; the cached step is stale.
    pub fn on_resize(&mut self) {
        if !self.mounted {
            return;
        }
        self.scheduler.reset(0.0);
        self.needs_measure = !self.buffer.is_empty();
    }

    /// Probe the step from freshly rendered geometry and restart travel
    /// from the lane origin.
    pub fn remeasure(&mut self, probe: &impl GeometryProbe) {
        self.scheduler.reset(probe.measure());
        self.needs_measure = false;
        tracing::debug!(step = self.scheduler.step(), "marquee step measured");
    }

    /// Run one frame.  Ids other than the pending one are stale and
    /// ignored.
    pub fn on_frame(&mut self, id: FrameId, now: Instant) -> TickOutcome {
        if self.torn_down || !self.scheduler.is_running() || self.pending != Some(id) {
            return TickOutcome::Stale;
        }
        self.pending = None;

        let outcome = self.scheduler.tick(now, &mut self.buffer, &self.gate);

        self.pending = Some(self.frames.request_frame());
        outcome
    }

    pub fn pause(&mut self) {
        self.gate.pause();
    }

    pub fn resume(&mut self) {
        self.gate.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.gate.is_paused()
    }

    /// Detach for good.  Safe to call more than once; also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.stop();
        self.mounted = false;
        self.torn_down = true;
        tracing::debug!("marquee torn down");
    }

    /// Items in display order.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn offset(&self) -> f64 {
        self.scheduler.offset()
    }

    pub fn step(&self) -> f64 {
        self.scheduler.step()
    }

    pub fn speed(&self) -> f64 {
        self.scheduler.speed()
    }

    pub fn state(&self) -> RunState {
        self.scheduler.state()
    }

    pub fn needs_measure(&self) -> bool {
        self.needs_measure
    }

    fn sync_run_state(&mut self) {
        let should_run = self.mounted && !self.torn_down && self.buffer.is_eligible();
        match (self.scheduler.is_running(), should_run) {
            (false, true) => self.start(),
            (true, false) => self.stop(),
            _ => {}
        }
    }

    fn start(&mut self) {
        self.scheduler.start();
        self.pending = Some(self.frames.request_frame());
        tracing::debug!(items = self.buffer.len(), "marquee started");
    }

    fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.frames.cancel_frame(id);
        }
        if self.scheduler.is_running() {
            self.scheduler.stop();
            tracing::debug!("marquee stopped");
        }
    }
}

impl<T, F: FrameScheduler> Drop for Marquee<T, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::frame::testing::ManualFrames;
    use crate::core::geometry::LaneMetrics;

    fn order(m: &Marquee<char, ManualFrames>) -> String {
        m.items().collect()
    }

    fn pending(frames: &ManualFrames) -> FrameId {
        frames
            .log
            .borrow()
            .outstanding()
            .expect("a frame should be pending")
    }

    fn mounted(speed: f64) -> (Marquee<char, ManualFrames>, ManualFrames) {
        let frames = ManualFrames::default();
        let mut m = Marquee::new(speed, frames.clone());
        m.mount();
        (m, frames)
    }

    #[test]
    fn fewer_than_two_items_never_run() {
        let (mut m, frames) = mounted(45.0);
        m.replace_items(vec![]);
        assert_eq!(m.state(), RunState::Stopped);
        m.replace_items(vec!['A']);
        assert_eq!(m.state(), RunState::Stopped);
        assert!(frames.log.borrow().requested.is_empty());
        assert_eq!(order(&m), "A");
    }

    #[test]
    fn starts_only_once_list_becomes_eligible() {
        let (mut m, frames) = mounted(45.0);
        m.replace_items(vec![]);
        assert_eq!(m.state(), RunState::Stopped);

        m.replace_items(vec!['X', 'Y']);
        assert_eq!(m.state(), RunState::Running);
        assert_eq!(m.offset(), 0.0);
        assert!(m.needs_measure());

        m.remeasure(&LaneMetrics {
            first_card_width: Some(26),
            gap: 2,
        });
        assert_eq!(m.step(), 28.0);
        assert!(!m.needs_measure());
        assert_eq!(frames.log.borrow().requested.len(), 1);
    }

    #[test]
    fn waits_for_mount_before_running() {
        let frames = ManualFrames::default();
        let mut m = Marquee::new(45.0, frames.clone());
        m.replace_items(vec!['A', 'B']);
        assert_eq!(m.state(), RunState::Stopped);
        m.mount();
        assert_eq!(m.state(), RunState::Running);
        assert_eq!(frames.log.borrow().requested.len(), 1);
    }

    #[test]
    fn each_frame_schedules_exactly_one_successor() {
        let (mut m, frames) = mounted(50.0);
        m.replace_items(vec!['A', 'B', 'C']);
        m.remeasure(&50.0);

        let t0 = Instant::now();
        let first = pending(&frames);
        m.on_frame(first, t0);
        let second = pending(&frames);
        assert_ne!(first, second);

        m.on_frame(second, t0 + Duration::from_millis(600));
        assert!((m.offset() - 30.0).abs() < 1e-9);
        assert_eq!(order(&m), "ABC");

        let third = pending(&frames);
        let outcome = m.on_frame(third, t0 + Duration::from_millis(1_100));
        assert_eq!(outcome, TickOutcome::Advanced { rotations: 1 });
        assert!((m.offset() - 5.0).abs() < 1e-9);
        assert_eq!(order(&m), "BCA");
    }

    #[test]
    fn paused_frame_keeps_the_chain_alive() {
        let (mut m, frames) = mounted(50.0);
        m.replace_items(vec!['A', 'B', 'C']);
        m.remeasure(&10.0);
        let t0 = Instant::now();
        m.on_frame(pending(&frames), t0);

        m.pause();
        m.pause();
        let outcome = m.on_frame(pending(&frames), t0 + Duration::from_secs(2));
        assert_eq!(outcome, TickOutcome::Paused);
        assert_eq!(m.offset(), 0.0);
        assert_eq!(order(&m), "ABC");
        // Next frame is still requested.
        let next = pending(&frames);

        m.resume();
        m.on_frame(next, t0 + Duration::from_millis(2_100));
        assert!((m.offset() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn stale_frames_are_ignored() {
        let (mut m, frames) = mounted(50.0);
        m.replace_items(vec!['A', 'B']);
        m.remeasure(&10.0);
        let t0 = Instant::now();
        let first = pending(&frames);
        m.on_frame(first, t0);

        assert_eq!(m.on_frame(first, t0 + Duration::from_secs(1)), TickOutcome::Stale);
        assert_eq!(m.offset(), 0.0);
        assert_eq!(frames.log.borrow().requested.len(), 2);
    }

    #[test]
    fn resize_resets_offset_and_reprobes_step() {
        let (mut m, frames) = mounted(45.0);
        m.replace_items(vec!['A', 'B', 'C']);
        m.remeasure(&100.0);
        let t0 = Instant::now();
        m.on_frame(pending(&frames), t0);
        m.on_frame(pending(&frames), t0 + Duration::from_secs(1));
        assert!(m.offset() > 0.0);

        m.on_resize();
        assert_eq!(m.offset(), 0.0);
        assert_eq!(m.step(), 0.0);
        assert!(m.needs_measure());

        m.remeasure(&LaneMetrics {
            first_card_width: Some(34),
            gap: 2,
        });
        assert_eq!(m.offset(), 0.0);
        assert_eq!(m.step(), 36.0);
        assert_eq!(m.state(), RunState::Running);
    }

    #[test]
    fn replacing_a_running_list_does_not_restart_the_chain() {
        let (mut m, frames) = mounted(45.0);
        m.replace_items(vec!['A', 'B']);
        m.replace_items(vec!['C', 'D', 'E']);
        assert_eq!(frames.log.borrow().requested.len(), 1);
        assert_eq!(order(&m), "CDE");
    }

    #[test]
    fn dropping_below_two_items_stops() {
        let (mut m, frames) = mounted(45.0);
        m.replace_items(vec!['A', 'B']);
        let id = pending(&frames);

        m.replace_items(vec!['Z']);
        assert_eq!(m.state(), RunState::Stopped);
        assert!(frames.log.borrow().cancelled.contains(&id));
        assert_eq!(m.on_frame(id, Instant::now()), TickOutcome::Stale);
        assert_eq!(order(&m), "Z");
    }

    #[test]
    fn teardown_cancels_pending_frame_once() {
        let (mut m, frames) = mounted(45.0);
        m.replace_items(vec!['A', 'B']);
        m.remeasure(&1.0);
        let id = pending(&frames);

        m.teardown();
        m.teardown();
        assert_eq!(frames.log.borrow().cancelled, vec![id]);
        assert_eq!(m.on_frame(id, Instant::now()), TickOutcome::Stale);
        assert_eq!(order(&m), "AB");

        // Nothing brings a torn-down marquee back.
        m.mount();
        m.replace_items(vec!['C', 'D']);
        assert_eq!(m.state(), RunState::Stopped);
        assert_eq!(frames.log.borrow().requested.len(), 1);
    }

    #[test]
    fn drop_tears_down() {
        let frames = ManualFrames::default();
        let log = frames.log.clone();
        {
            let mut m = Marquee::new(45.0, frames);
            m.mount();
            m.replace_items(vec!['A', 'B']);
        }
        assert!(log.borrow().outstanding().is_none());
    }

    #[test]
    fn resize_before_mount_is_ignored() {
        let frames = ManualFrames::default();
        let mut m: Marquee<char, _> = Marquee::new(45.0, frames);
        m.on_resize();
        assert!(!m.needs_measure());
    }
}
