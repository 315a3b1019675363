//! Input handling — maps key, mouse and resize events to state mutations.
//!
//! The pointer hovering the track pauses the lane and leaving resumes it.
//! A left press inside the track pauses as well and its release resumes.
//! Both feed the same flat pause flag.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Char(' ') => {
            if state.marquee.is_paused() {
                state.marquee.resume();
            } else {
                state.marquee.pause();
            }
        }
        KeyCode::Char('r') => {
            state.needs_reload = true;
            state.set_status(format!("Reloading {}…", state.source.label()));
        }
        _ => {}
    }
}

/// Process a mouse event against the last rendered track area.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let position = Position::new(mouse.column, mouse.row);
    state.pointer = Some(position);
    let inside = state.track_area.contains(position);

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => update_hover(state, inside),
        MouseEventKind::Down(MouseButton::Left) => {
            update_hover(state, inside);
            if inside {
                state.pressed = true;
                state.marquee.pause();
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if state.pressed {
                state.pressed = false;
                state.marquee.resume();
            }
        }
        _ => {}
    }
}

/// The terminal changed size.  The marquee drops its cached step and is
/// re-probed after the next draw.
pub fn handle_resize(state: &mut AppState) {
    state.marquee.on_resize();
    state.hover_stale = true;
}

/// After the draw that follows a resize, test the last known pointer
/// position against the new track area.
pub fn recheck_hover(state: &mut AppState) {
    if !state.hover_stale {
        return;
    }
    state.hover_stale = false;
    if let Some(position) = state.pointer {
        let inside = state.track_area.contains(position);
        update_hover(state, inside);
    }
}

/// Terminals report no event when the pointer leaves the window; losing
/// focus is the closest signal, so treat it as leaving and releasing.
pub fn handle_focus_lost(state: &mut AppState) {
    state.pointer = None;
    if state.pressed {
        state.pressed = false;
        state.marquee.resume();
    }
    update_hover(state, false);
}

fn update_hover(state: &mut AppState, inside: bool) {
    if inside == state.pointer_inside {
        return;
    }
    state.pointer_inside = inside;
    if inside {
        state.marquee.pause();
    } else {
        state.marquee.resume();
    }
}
