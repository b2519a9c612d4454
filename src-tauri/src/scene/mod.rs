//! Per-frame scene logic
//!
//! Plain state machines advanced once per frame by the Bevy systems in
//! `crate::bevy::systems`. Nothing here touches the ECS.

pub mod burst;
pub mod camera_rig;
pub mod picking;
pub mod props;
pub mod random;

pub use burst::{BurstEffect, BurstRay, BurstSettings};
pub use camera_rig::{CameraMode, CameraRig, FramingPose, HeldKeys, MoveKey, RigSettings};
pub use picking::PropTarget;
pub use props::{LightSwitch, PaperSettings, ResumePaper};
pub use random::{RandomSource, XorShift32};
