//! Desk Portfolio: an interactive 3D desk rendered headless by Bevy and shown
//! inside a Tauri webview.
//!
//! Architecture:
//! - Bevy runs in a background thread with no window and renders the desk
//!   scene into an offscreen texture
//! - A render graph node copies each frame to the CPU; the page fetches it
//!   through the `frame://` protocol (JPEG) or `get_frame` (Base64 RGBA)
//! - Pointer and key input flow back through Tauri commands into shared state
//!   that Bevy drains once per frame
//! - The projects page is plain Rust state rendered by the webview
//!
//! # Module Structure
//!
//! - `config`: Configuration constants and settings
//! - `error`: Error types
//! - `scene`: Camera rig, color burst, and prop state machines
//! - `projects`: Project catalog, navigation panel, and loading counter
//! - `tauri_bridge`: Shared state, commands, and the frame protocol
//! - `bevy`: Components, resources, systems, plugins, and app setup

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod bevy;
pub mod config;
pub mod error;
pub mod projects;
pub mod scene;
mod tauri_bridge;

use log::{error, info};
use std::{thread, time::Duration};

use projects::Catalog;
use tauri_bridge::BridgeHandles;

/// Main entry point for the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("[Tauri] Starting...");

    let catalog = match Catalog::bundled() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("[Tauri] {e}");
            return;
        }
    };

    let handles = BridgeHandles::new(catalog);

    // Start Bevy in background thread
    bevy::start_bevy(handles.clone());

    // Give Bevy a head start on GPU setup
    thread::sleep(Duration::from_millis(1000));

    let protocol_buffer = handles.frame_buffer.clone();
    let protocol_perf_stats = handles.perf_stats.clone();

    let result = tauri::Builder::default()
        .manage(handles.frame_buffer)
        .manage(handles.perf_stats)
        .manage(handles.input)
        .manage(handles.status)
        .manage(handles.navigator)
        // "frame://" serves binary frames without JSON serialization
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let buffer = protocol_buffer.clone();
            let perf_stats = protocol_perf_stats.clone();

            std::thread::spawn(move || {
                let path = request.uri().path().to_owned();
                let response =
                    tauri_bridge::protocol::handle_frame_protocol(&path, &buffer, &perf_stats);
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size,
            tauri_bridge::commands::get_performance_stats,
            tauri_bridge::commands::send_mouse_input,
            tauri_bridge::commands::send_pointer_event,
            tauri_bridge::commands::send_key_input,
            tauri_bridge::commands::set_camera_mode,
            tauri_bridge::commands::reset_camera,
            tauri_bridge::commands::get_scene_status,
            tauri_bridge::commands::navigate_home,
            tauri_bridge::commands::get_projects_view,
            tauri_bridge::commands::select_category,
            tauri_bridge::commands::select_item,
            tauri_bridge::commands::clear_selection,
            tauri_bridge::commands::report_row_bounds,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        error!("[Tauri] {e}");
    }
}
