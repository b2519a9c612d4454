//! Bridge layer between Tauri and Bevy
//!
//! Shared handles both sides hold, the commands the page invokes, and the
//! `frame://` protocol that serves rendered frames.

pub mod commands;
pub mod protocol;
pub mod shared_state;

pub use shared_state::BridgeHandles;
