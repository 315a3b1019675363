//! Application orchestration — state management, event loop plumbing, and
//! input handling.

pub mod event;
pub mod frame_runtime;
pub mod handler;
pub mod roster_runtime;
pub mod state;
