//! Background roster loading to keep the UI thread responsive.

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::core::roster::{RosterSource, StaffMember};

pub struct RosterUpdate {
    pub generation: u64,
    pub result: anyhow::Result<Vec<StaffMember>>,
}

pub fn spawn_roster_load(
    tx: mpsc::UnboundedSender<RosterUpdate>,
    generation: u64,
    source: RosterSource,
) {
    std::thread::spawn(move || {
        let result = source.load().map_err(anyhow::Error::from);
        let _ = tx.send(RosterUpdate { generation, result });
    });
}

/// Kick off a load if one was requested since the last frame.
pub fn start_pending_load(state: &mut AppState, tx: &mpsc::UnboundedSender<RosterUpdate>) {
    if !state.needs_reload {
        return;
    }
    state.needs_reload = false;
    state.loading = true;
    state.roster_generation = state.roster_generation.wrapping_add(1);
    tracing::debug!(
        generation = state.roster_generation,
        source = %state.source.label(),
        "loading roster"
    );
    spawn_roster_load(tx.clone(), state.roster_generation, state.source.clone());
}

/// Hand a finished load to the marquee.  Results from superseded loads are
/// dropped.
pub fn apply_roster_update(state: &mut AppState, update: RosterUpdate) {
    if update.generation != state.roster_generation {
        return;
    }
    state.loading = false;
    match update.result {
        Ok(staff) => {
            tracing::info!(
                count = staff.len(),
                source = %state.source.label(),
                "roster loaded"
            );
            // The lane readout takes over the status bar again.
            state.status_message = None;
            state.marquee.replace_items(staff);
        }
        Err(err) => {
            tracing::warn!(error = %err, "roster load failed");
            state.set_status(format!("Roster load failed: {err:#}"));
        }
    }
}
