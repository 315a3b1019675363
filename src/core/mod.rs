//! Core engine – the marquee state machine and the roster it displays.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The host
//! drives it through [`marquee::Marquee`] and supplies frames through the
//! [`frame::FrameScheduler`] seam.

pub mod frame;
pub mod gate;
pub mod geometry;
pub mod marquee;
pub mod ring;
pub mod roster;
pub mod scheduler;
