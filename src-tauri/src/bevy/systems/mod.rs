//! Bevy systems
//!
//! This module contains all the systems that operate on entities
//! and resources in the Bevy ECS.

pub mod burst;
pub mod camera;
pub mod frame_extraction;
pub mod input;
pub mod props;
pub mod requests;
pub mod scene;
pub mod status;

pub use burst::{advance_burst, render_burst, start_burst};
pub use camera::update_camera_rig;
pub use frame_extraction::extract_and_process_frame;
pub use input::drain_input;
pub use props::{
    apply_lighting, pick_props, toggle_lights, update_flashlight, update_key_glow,
    update_resume_paper,
};
pub use requests::apply_scene_requests;
pub use scene::setup_scene;
pub use status::publish_scene_status;
