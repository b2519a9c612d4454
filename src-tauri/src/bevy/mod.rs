//! Bevy engine integration
//!
//! Headless scene rendering: components, resources, the readback plugin,
//! per-frame systems, and the app that schedules them.

pub mod app;
pub mod components;
pub mod plugins;
pub mod resources;
pub mod systems;

pub use app::start_bevy;
