//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No roster I/O happens here.

pub mod lane;
pub mod layout;
pub mod spinner;
pub mod theme;
