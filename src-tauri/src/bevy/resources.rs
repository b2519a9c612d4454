//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::prelude::*;
use std::collections::VecDeque;
use std::time::Duration;

use crate::scene::{BurstEffect, CameraRig, HeldKeys, LightSwitch, PropTarget, XorShift32};
use crate::tauri_bridge::shared_state::{
    SceneRequest, SharedFrameBuffer, SharedInput, SharedNavigator, SharedPerfStats,
    SharedSceneStatus,
};

// =============================================================================
// Input
// =============================================================================

/// Resource to hold shared input in Bevy
#[derive(Resource)]
pub struct InputRes(pub SharedInput);

/// Input snapshot for the current frame
///
/// Drained once at the start of the frame so every system sees the same input.
#[derive(Resource, Default)]
pub struct FrameInput {
    pub look_delta: Vec2,
    pub scroll_delta: f32,
    pub pointer: Option<Vec2>,
    pub clicks: Vec<Vec2>,
    pub held: HeldKeys,
    pub requests: Vec<SceneRequest>,
}

/// A prop was clicked this frame
#[derive(Message, Debug, Clone, Copy)]
pub struct PropClicked(pub PropTarget);

/// Interactive prop under the pointer
#[derive(Resource, Default)]
pub struct Hovered(pub Option<PropTarget>);

// =============================================================================
// Scene State
// =============================================================================

/// Camera rig driving the main camera
#[derive(Resource, Default, Deref, DerefMut)]
pub struct Rig(pub CameraRig);

/// Light switch state shared by lights, keys, and the flashlight
#[derive(Resource, Default, Deref, DerefMut)]
pub struct RoomLights(pub LightSwitch);

/// Running burst, if any, and the generator its rays draw from
#[derive(Resource, Default)]
pub struct BurstState {
    pub effect: Option<BurstEffect>,
    pub rng: XorShift32,
}

/// Shared material for every key cap
#[derive(Resource)]
pub struct KeyMaterial(pub Handle<StandardMaterial>);

/// Shared material for the burst overlay quad
#[derive(Resource)]
pub struct OverlayMaterial(pub Handle<StandardMaterial>);

/// Knob materials for the two switch states
#[derive(Resource)]
pub struct KnobMaterials {
    pub on: Handle<StandardMaterial>,
    pub off: Handle<StandardMaterial>,
}

/// Scene status published to the page
#[derive(Resource)]
pub struct StatusRes(pub SharedSceneStatus);

/// Route owner handed to burst completion callbacks
#[derive(Resource)]
pub struct NavigatorRes(pub SharedNavigator);

// =============================================================================
// Rendering
// =============================================================================

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames rendered
#[derive(Resource, Default)]
pub struct FrameCount(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

/// Frame rate limiter to control output FPS
#[derive(Resource)]
pub struct FrameRateLimiter {
    pub last_frame_time: std::time::Instant,
    pub min_frame_interval: Duration,
}

impl FrameRateLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_frame_time: std::time::Instant::now(),
            min_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }
}

impl Default for FrameRateLimiter {
    fn default() -> Self {
        Self::new(crate::config::TARGET_FPS)
    }
}

// =============================================================================
// Performance Monitoring
// =============================================================================

/// Rolling window of frame processing times (milliseconds)
#[derive(Resource, Default)]
pub struct FrameTimings {
    pub last_print_time: f64,
    pub frame_times: VecDeque<f64>,
}

impl FrameTimings {
    /// Records a sample and returns the window average.
    pub fn record(&mut self, ms: f64) -> f64 {
        self.frame_times.push_back(ms);
        while self.frame_times.len() > crate::config::performance::FRAME_TIMING_SAMPLES {
            self.frame_times.pop_front();
        }
        self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64
    }

    /// Fastest and slowest sample in the window.
    pub fn range(&self) -> (f64, f64) {
        self.frame_times
            .iter()
            .fold((f64::MAX, 0.0_f64), |(min, max), &t| (min.min(t), max.max(t)))
    }
}

/// Shared performance statistics resource
#[derive(Resource)]
pub struct PerfStatsRes(pub SharedPerfStats);

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

use crossbeam_channel::{Receiver, Sender};

/// Receives data from render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<Vec<u8>>);

/// Sends data to main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<Vec<u8>>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::performance::FRAME_TIMING_SAMPLES;

    #[test]
    fn timings_keep_a_bounded_window() {
        let mut timings = FrameTimings::default();
        for i in 0..FRAME_TIMING_SAMPLES + 10 {
            timings.record(i as f64);
        }
        assert_eq!(timings.frame_times.len(), FRAME_TIMING_SAMPLES);
        assert_eq!(timings.range(), (10.0, (FRAME_TIMING_SAMPLES + 9) as f64));
    }

    #[test]
    fn average_of_uniform_samples() {
        let mut timings = FrameTimings::default();
        timings.record(4.0);
        assert_eq!(timings.record(8.0), 6.0);
    }
}
