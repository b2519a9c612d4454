//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    window::ExitCondition,
};
use log::info;
use std::thread;
use std::time::Duration;

use crate::bevy::plugins::ImageCopyPlugin;
use crate::bevy::resources::*;
use crate::bevy::systems::*;
use crate::config::{PRE_ROLL_FRAMES, TARGET_FPS};
use crate::tauri_bridge::BridgeHandles;

/// Create and configure the Bevy application
pub fn create_app(handles: BridgeHandles) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    // Add schedule runner for controlled frame rate
    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / TARGET_FPS,
    )));

    app.add_plugins(ImageCopyPlugin);
    app.add_message::<PropClicked>();

    // Shared with Tauri
    app.insert_resource(FrameBufferRes(handles.frame_buffer));
    app.insert_resource(PerfStatsRes(handles.perf_stats));
    app.insert_resource(InputRes(handles.input));
    app.insert_resource(StatusRes(handles.status));
    app.insert_resource(NavigatorRes(handles.navigator));

    // Scene state
    app.init_resource::<FrameInput>();
    app.init_resource::<Hovered>();
    app.init_resource::<Rig>();
    app.init_resource::<RoomLights>();
    app.init_resource::<BurstState>();

    // Frame output
    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::default());

    app.add_systems(Startup, setup_scene);
    app.add_systems(PreUpdate, drain_input);
    app.add_systems(
        Update,
        (
            apply_scene_requests,
            pick_props,
            (toggle_lights, update_resume_paper, start_burst),
            update_camera_rig,
            (apply_lighting, update_key_glow, update_flashlight),
            advance_burst,
            render_burst,
        )
            .chain(),
    );
    app.add_systems(Last, (publish_scene_status, extract_and_process_frame));

    info!("[Bevy] App configured (headless mode with proper GPU-CPU pipeline)");
    app
}

/// Start Bevy in a background thread
pub fn start_bevy(handles: BridgeHandles) {
    thread::spawn(move || {
        info!("[Bevy] Thread started");
        let mut app = create_app(handles);
        info!("[Bevy] Running render loop...");
        app.run();
    });
}
