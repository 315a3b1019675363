//! Tokio-backed frame source for the marquee.
//!
//! Each requested frame is one short-lived task that sleeps for the frame
//! interval and then posts its id to the main loop.  At most one such task
//! exists at a time; cancelling aborts it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::frame::{FrameId, FrameScheduler};

pub struct TokioFrames {
    tx: mpsc::UnboundedSender<FrameId>,
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameId, JoinHandle<()>)>,
}

impl TokioFrames {
    /// Create a frame source and the receiver the main loop selects on.
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<FrameId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let frames = Self {
            tx,
            interval,
            next_id: 0,
            pending: None,
        };
        (frames, rx)
    }
}

impl FrameScheduler for TokioFrames {
    fn request_frame(&mut self) -> FrameId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = FrameId(self.next_id);

        let tx = self.tx.clone();
        let interval = self.interval;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            let _ = tx.send(id); // receiver gone means the app is exiting
        });

        // The previous frame has normally fired already; aborting a finished
        // task is a no-op.
        if let Some((_, previous)) = self.pending.replace((id, handle)) {
            previous.abort();
        }
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending.as_ref().is_some_and(|(pending, _)| *pending == id) {
            if let Some((_, handle)) = self.pending.take() {
                handle.abort();
            }
        }
    }
}

impl Drop for TokioFrames {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.pending.take() {
            handle.abort();
        }
    }
}
