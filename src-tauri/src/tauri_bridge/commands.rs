//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript/TypeScript code.

use base64::{engine::general_purpose::STANDARD, Engine};
use bevy::math::Vec2;
use log::debug;
use serde::Serialize;
use tauri::State;

use super::shared_state::{
    lock, FrameResponse, PerformanceStats, Route, SceneRequest, SceneStatus, SharedFrameBuffer,
    SharedInput, SharedNavigator, SharedPerfStats, SharedSceneStatus,
};
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};
use crate::projects::{Category, PageView, Rect};
use crate::scene::props::pointer_to_ndc;
use crate::scene::{CameraMode, MoveKey};

// =============================================================================
// Frames
// =============================================================================

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(
    state: State<SharedFrameBuffer>,
    perf_state: State<SharedPerfStats>,
) -> Result<FrameResponse, String> {
    let cmd_start = std::time::Instant::now();

    let guard = lock(&state.0)?;
    let Some(rgba_data) = &*guard else {
        return Err("No frame yet (scene still loading)".into());
    };
    let data_fetch_time = cmd_start.elapsed().as_secs_f64() * 1000.0;

    let encode_start = std::time::Instant::now();
    let base64_data = STANDARD.encode(rgba_data);
    let encode_time = encode_start.elapsed().as_secs_f64() * 1000.0;

    if let Ok(mut stats) = perf_state.0.lock() {
        stats.tauri_get_frame_ms = data_fetch_time;
        stats.tauri_serialize_ms = encode_time;
    }

    Ok(FrameResponse {
        data: base64_data,
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
    })
}

/// Get the render resolution
#[tauri::command]
pub fn get_render_size() -> (u32, u32) {
    (RENDER_WIDTH, RENDER_HEIGHT)
}

/// Get performance statistics
#[tauri::command]
pub fn get_performance_stats(state: State<SharedPerfStats>) -> Result<PerformanceStats, String> {
    Ok(lock(&state.0)?.clone())
}

// =============================================================================
// Scene Input
// =============================================================================

/// Receive drag/scroll input for free-mode look and dolly
/// Input deltas are accumulated until consumed by Bevy
#[tauri::command]
pub fn send_mouse_input(
    state: State<SharedInput>,
    delta_x: f32,
    delta_y: f32,
    scroll_delta: f32,
    left_button: bool,
) -> Result<(), String> {
    let mut guard = lock(&state.0)?;
    guard.delta_x += delta_x;
    guard.delta_y += delta_y;
    guard.scroll_delta += scroll_delta;
    guard.left_button = left_button;
    Ok(())
}

/// Pointer move or click at a pixel position inside a viewport of the given size
#[tauri::command]
pub fn send_pointer_event(
    state: State<SharedInput>,
    x: f32,
    y: f32,
    viewport_width: f32,
    viewport_height: f32,
    clicked: bool,
) -> Result<(), String> {
    let ndc = pointer_to_ndc(Vec2::new(x, y), Vec2::new(viewport_width, viewport_height))
        .ok_or_else(|| format!("Invalid viewport {viewport_width}x{viewport_height}"))?;
    let mut guard = lock(&state.0)?;
    guard.pointer = Some(ndc);
    if clicked {
        guard.clicks.push(ndc);
    }
    Ok(())
}

/// Raw key down/up, identified by `KeyboardEvent.code`. Unmapped keys are ignored.
#[tauri::command]
pub fn send_key_input(state: State<SharedInput>, code: String, pressed: bool) -> Result<(), String> {
    let Some(key) = MoveKey::from_code(&code) else {
        return Ok(());
    };
    let mut guard = lock(&state.0)?;
    if pressed {
        guard.held.press(key);
    } else {
        guard.held.release(key);
    }
    Ok(())
}

#[tauri::command]
pub fn set_camera_mode(state: State<SharedInput>, mode: CameraMode) -> Result<(), String> {
    debug!("[Command] Camera mode {:?}", mode);
    lock(&state.0)?
        .requests
        .push(SceneRequest::SetCameraMode(mode));
    Ok(())
}

#[tauri::command]
pub fn reset_camera(state: State<SharedInput>) -> Result<(), String> {
    lock(&state.0)?.requests.push(SceneRequest::ResetCamera);
    Ok(())
}

// =============================================================================
// Navigation
// =============================================================================

/// Scene status together with the current route
#[derive(Serialize)]
pub struct StatusResponse {
    pub route: Route,
    #[serde(flatten)]
    pub scene: SceneStatus,
}

#[tauri::command]
pub fn get_scene_status(
    status: State<SharedSceneStatus>,
    navigator: State<SharedNavigator>,
) -> Result<StatusResponse, String> {
    Ok(StatusResponse {
        route: navigator.route()?,
        scene: lock(&status.0)?.clone(),
    })
}

/// Leave the projects page and replay the entry flight
#[tauri::command]
pub fn navigate_home(
    navigator: State<SharedNavigator>,
    input: State<SharedInput>,
) -> Result<(), String> {
    navigator.navigate(Route::Home)?;
    lock(&input.0)?.requests.push(SceneRequest::ResetScene);
    Ok(())
}

// =============================================================================
// Projects Page
// =============================================================================

#[tauri::command]
pub fn get_projects_view(navigator: State<SharedNavigator>) -> Result<PageView, String> {
    let mut state = lock(&navigator.projects().0)?;
    state.poll();
    Ok(state.page.view())
}

#[tauri::command]
pub fn select_category(
    navigator: State<SharedNavigator>,
    category: String,
) -> Result<PageView, String> {
    let mut state = lock(&navigator.projects().0)?;
    state
        .page
        .panel_mut()
        .select_category_named(&category)
        .map_err(|e| e.to_string())?;
    Ok(state.page.view())
}

#[tauri::command]
pub fn select_item(navigator: State<SharedNavigator>, index: usize) -> Result<PageView, String> {
    let mut state = lock(&navigator.projects().0)?;
    state
        .page
        .panel_mut()
        .select_item(index)
        .map_err(|e| e.to_string())?;
    Ok(state.page.view())
}

/// Step back one level: drop the item, or the category when no item is selected
#[tauri::command]
pub fn clear_selection(navigator: State<SharedNavigator>) -> Result<PageView, String> {
    let mut state = lock(&navigator.projects().0)?;
    let panel = state.page.panel_mut();
    if panel.selection().item.is_some() {
        panel.clear_item();
    } else {
        panel.clear_category();
    }
    Ok(state.page.view())
}

/// Bounds measured by the page after it rendered the current selection
#[tauri::command]
pub fn report_row_bounds(
    navigator: State<SharedNavigator>,
    category: Option<String>,
    categories: Vec<Rect>,
    items: Vec<Rect>,
) -> Result<PageView, String> {
    let measured_for = category
        .map(|name| name.parse::<Category>())
        .transpose()
        .map_err(|e| e.to_string())?;
    let mut state = lock(&navigator.projects().0)?;
    state
        .page
        .panel_mut()
        .report_bounds(measured_for, categories, items);
    Ok(state.page.view())
}
