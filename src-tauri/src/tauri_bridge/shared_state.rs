//! Shared state structures for communication between Tauri and Bevy
//!
//! This module defines thread-safe data structures that allow bidirectional
//! communication between the Tauri frontend and the Bevy render backend.

use bevy::math::Vec2;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::projects::{Catalog, ProjectsPage};
use crate::scene::{CameraMode, HeldKeys, PropTarget};

/// Locks a shared handle, turning poisoning into an error string
pub fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
    mutex.lock().map_err(|e| e.to_string())
}

// =============================================================================
// Frame Buffer
// =============================================================================

/// Thread-safe RGBA frame buffer shared between Bevy and Tauri
/// Stores raw RGBA8 pixel data (4 bytes per pixel)
#[derive(Clone, Default)]
pub struct SharedFrameBuffer(pub Arc<Mutex<Option<Vec<u8>>>>);

/// Frame response containing Base64-encoded RGBA pixel data
#[derive(Serialize, Deserialize)]
pub struct FrameResponse {
    /// Base64-encoded RGBA pixel data (avoids slow JSON array serialization)
    pub data: String,
    pub width: u32,
    pub height: u32,
}

// =============================================================================
// Input
// =============================================================================

/// Discrete requests from the page that the scene applies on its next frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneRequest {
    SetCameraMode(CameraMode),
    ResetCamera,
    /// Back from the projects page: fresh entry flight, no burst
    ResetScene,
}

/// Input accumulated between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Accumulated drag X delta (pixels)
    pub delta_x: f32,
    /// Accumulated drag Y delta (pixels)
    pub delta_y: f32,
    /// Accumulated scroll wheel delta
    pub scroll_delta: f32,
    /// Left mouse button is pressed
    pub left_button: bool,
    /// Last pointer position in normalized device coordinates
    pub pointer: Option<Vec2>,
    /// Clicks since the last frame, in normalized device coordinates
    pub clicks: Vec<Vec2>,
    /// Movement keys currently held (level-triggered, never cleared by a frame)
    pub held: HeldKeys,
    pub requests: Vec<SceneRequest>,
}

impl InputState {
    /// Returns everything accumulated since the last call and clears the
    /// edge-triggered parts. Button and key state carries over.
    pub fn take_frame(&mut self) -> InputState {
        let frame = InputState {
            delta_x: self.delta_x,
            delta_y: self.delta_y,
            scroll_delta: self.scroll_delta,
            left_button: self.left_button,
            pointer: self.pointer,
            clicks: std::mem::take(&mut self.clicks),
            held: self.held,
            requests: std::mem::take(&mut self.requests),
        };
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        self.scroll_delta = 0.0;
        frame
    }
}

/// Thread-safe input shared between Tauri and Bevy
#[derive(Clone, Default)]
pub struct SharedInput(pub Arc<Mutex<InputState>>);

// =============================================================================
// Scene Status
// =============================================================================

/// Which page the webview shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[default]
    Home,
    Projects,
}

/// Scene state published to the page once per frame
#[derive(Debug, Clone, Serialize)]
pub struct SceneStatus {
    pub lights_on: bool,
    pub camera_mode: CameraMode,
    pub paper_focused: bool,
    pub paper_unlocked: bool,
    /// Interactive prop under the pointer
    pub hovered: Option<PropTarget>,
    /// Burst progress in `[0, 1]` while a burst runs
    pub burst_progress: Option<f32>,
}

impl Default for SceneStatus {
    fn default() -> Self {
        Self {
            lights_on: true,
            camera_mode: CameraMode::Scripted,
            paper_focused: false,
            paper_unlocked: false,
            hovered: None,
            burst_progress: None,
        }
    }
}

/// Thread-safe scene status
#[derive(Clone, Default)]
pub struct SharedSceneStatus(pub Arc<Mutex<SceneStatus>>);

// =============================================================================
// Navigation
// =============================================================================

/// Projects page plus the time of its last poll
pub struct ProjectsPageState {
    pub page: ProjectsPage,
    last_poll: Option<Instant>,
}

impl ProjectsPageState {
    /// Advances the loading counter by the wall time since the last poll.
    pub fn poll(&mut self) {
        let now = Instant::now();
        if let Some(previous) = self.last_poll {
            self.page.advance(now.duration_since(previous).as_secs_f32());
        }
        self.last_poll = Some(now);
    }
}

/// Thread-safe projects page
#[derive(Clone)]
pub struct SharedProjectsPage(pub Arc<Mutex<ProjectsPageState>>);

impl SharedProjectsPage {
    pub fn new(catalog: Catalog) -> Self {
        Self(Arc::new(Mutex::new(ProjectsPageState {
            page: ProjectsPage::new(catalog),
            last_poll: None,
        })))
    }
}

/// Route owner. Cloned into the burst completion callback and the commands.
#[derive(Clone)]
pub struct SharedNavigator {
    route: Arc<Mutex<Route>>,
    projects: SharedProjectsPage,
}

impl SharedNavigator {
    pub fn new(projects: SharedProjectsPage) -> Self {
        Self {
            route: Arc::new(Mutex::new(Route::Home)),
            projects,
        }
    }

    pub fn route(&self) -> Result<Route, String> {
        Ok(*lock(&self.route)?)
    }

    pub fn projects(&self) -> &SharedProjectsPage {
        &self.projects
    }

    /// Switches the page. Entering the projects page restarts its loading counter.
    pub fn navigate(&self, to: Route) -> Result<(), String> {
        {
            let mut route = lock(&self.route)?;
            if *route == to {
                return Ok(());
            }
            *route = to;
        }
        if to == Route::Projects {
            let mut state = lock(&self.projects.0)?;
            state.page.enter();
            state.last_poll = None;
        }
        info!("[Navigation] Route -> {:?}", to);
        Ok(())
    }
}

// =============================================================================
// Performance Statistics
// =============================================================================

/// Performance statistics for debugging and monitoring
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct PerformanceStats {
    // Backend (Bevy/Rust) timings
    pub gpu_transfer_ms: f64,
    pub data_processing_ms: f64,
    pub frame_encoding_ms: f64,
    pub bevy_fps: f64,
    pub frame_count: u32,
    pub data_size_kb: f64,
    // Tauri command timings
    pub tauri_get_frame_ms: f64,
    pub tauri_serialize_ms: f64,
}

/// Thread-safe performance statistics
#[derive(Clone, Default)]
pub struct SharedPerfStats(pub Arc<Mutex<PerformanceStats>>);

// =============================================================================
// Handle Bundle
// =============================================================================

/// Every handle Bevy and Tauri share, cloned into both sides at startup
#[derive(Clone)]
pub struct BridgeHandles {
    pub frame_buffer: SharedFrameBuffer,
    pub perf_stats: SharedPerfStats,
    pub input: SharedInput,
    pub status: SharedSceneStatus,
    pub navigator: SharedNavigator,
}

impl BridgeHandles {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            frame_buffer: SharedFrameBuffer::default(),
            perf_stats: SharedPerfStats::default(),
            input: SharedInput::default(),
            status: SharedSceneStatus::default(),
            navigator: SharedNavigator::new(SharedProjectsPage::new(catalog)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MoveKey;

    #[test]
    fn take_frame_clears_edges_keeps_levels() {
        let mut input = InputState::default();
        input.delta_x = 4.0;
        input.scroll_delta = 1.0;
        input.left_button = true;
        input.clicks.push(Vec2::ZERO);
        input.held.press(MoveKey::Forward);
        input.requests.push(SceneRequest::ResetCamera);

        let frame = input.take_frame();
        assert_eq!(frame.delta_x, 4.0);
        assert_eq!(frame.clicks.len(), 1);
        assert_eq!(frame.requests, vec![SceneRequest::ResetCamera]);

        assert_eq!(input.delta_x, 0.0);
        assert_eq!(input.scroll_delta, 0.0);
        assert!(input.clicks.is_empty());
        assert!(input.requests.is_empty());
        assert!(input.left_button);
        assert!(input.held.is_held(MoveKey::Forward));
    }

    #[test]
    fn entering_projects_restarts_loading() {
        let catalog = Catalog::bundled().expect("bundled catalog");
        let navigator = SharedNavigator::new(SharedProjectsPage::new(catalog));
        {
            let mut state = lock(&navigator.projects().0).expect("lock");
            state.page.advance(5.0);
            assert!(!state.page.is_loading());
        }

        navigator.navigate(Route::Projects).expect("navigate");

        assert_eq!(navigator.route(), Ok(Route::Projects));
        let state = lock(&navigator.projects().0).expect("lock");
        assert!(state.page.is_loading());
    }
}
