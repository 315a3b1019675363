//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::{Position, Rect};

use crate::app::frame_runtime::TokioFrames;
use crate::config::AppConfig;
use crate::core::{
    geometry::LaneMetrics,
    marquee::Marquee,
    roster::{RosterSource, StaffMember},
};

pub type StaffMarquee = Marquee<StaffMember, TokioFrames>;

/// Event-reader ticks a status message stays up (about five seconds).
pub const STATUS_TICKS: u64 = 50;

/// Top-level application state.
pub struct AppState {
    /// The scrolling lane engine.
    pub marquee: StaffMarquee,
    /// Lane geometry recorded by the last draw.  Probed after the draw that
    /// follows new content or a resize.
    pub lane_metrics: LaneMetrics,
    /// Track area of the last draw, for pointer hit-testing.
    pub track_area: Rect,
    pub config: AppConfig,
    pub source: RosterSource,
    /// `true` until the first roster load finishes; skeleton cards are shown
    /// meanwhile.
    pub loading: bool,
    /// Flag set by event handlers to trigger a background roster load.
    pub needs_reload: bool,
    /// Monotonic generation id used to ignore stale roster loads.
    pub roster_generation: u64,
    /// Pointer currently hovers the track.
    pub pointer_inside: bool,
    /// Last pointer position reported by the terminal.
    pub pointer: Option<Position>,
    /// Set on resize; hover is re-checked against the next layout.
    pub hover_stale: bool,
    /// Left button went down inside the track and has not been released.
    pub pressed: bool,
    /// Transient message shown in the bottom bar instead of the lane readout.
    pub status_message: Option<String>,
    /// Tick at which `status_message` is cleared.
    pub status_until: u64,
    /// Monotonically increasing tick counter (drives the spinner).
    pub tick: u64,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    /// Build the state and mount the marquee.  The first roster load is
    /// requested immediately.
    pub fn new(config: AppConfig, source: RosterSource, frames: TokioFrames) -> Self {
        let mut marquee = Marquee::new(config.speed, frames);
        marquee.mount();
        Self {
            marquee,
            lane_metrics: LaneMetrics::default(),
            track_area: Rect::default(),
            config,
            source,
            loading: true,
            needs_reload: true,
            roster_generation: 0,
            pointer_inside: false,
            pointer: None,
            hover_stale: false,
            pressed: false,
            status_message: None,
            status_until: 0,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_until = self.tick.wrapping_add(STATUS_TICKS);
    }

    /// Advance the spinner and expire the status message.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.status_message.is_some() && self.tick >= self.status_until {
            self.status_message = None;
        }
    }
}
