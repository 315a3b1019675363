//! Frame scheduling seam.
//!
//! The engine never owns a timer.  It asks a [`FrameScheduler`] for one
//! frame callback at a time and identifies it by [`FrameId`]; the host
//! delivers the id back through [`Marquee::on_frame`](super::marquee::Marquee::on_frame).

/// Identity of a single requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Host-side source of frame callbacks.
pub trait FrameScheduler {
    /// Request one callback for the next frame.
    fn request_frame(&mut self) -> FrameId;

    /// Drop a requested callback so it never fires.
    fn cancel_frame(&mut self, id: FrameId);
}
