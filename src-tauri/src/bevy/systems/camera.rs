//! Camera control system
//!
//! Feeds drag, scroll, and held keys into the camera rig, then writes the
//! rig's pose to the camera entity.

use bevy::prelude::*;

use crate::bevy::components::CameraController;
use crate::bevy::resources::{FrameInput, Rig};

/// Advance the rig one frame and apply its transform
/// - Left button drag: look around (free mode only)
/// - Scroll wheel: dolly along the view direction (free mode only)
/// - WASD / arrows / Space / Shift: fly (free mode only)
pub fn update_camera_rig(
    time: Res<Time>,
    frame_input: Res<FrameInput>,
    mut rig: ResMut<Rig>,
    mut camera_query: Query<&mut Transform, With<CameraController>>,
) {
    if frame_input.look_delta != Vec2::ZERO {
        rig.look(frame_input.look_delta.x, frame_input.look_delta.y);
    }
    if frame_input.scroll_delta != 0.0 {
        rig.dolly(frame_input.scroll_delta);
    }

    rig.update(time.delta_secs(), frame_input.held);

    let pose = rig.transform();
    for mut transform in camera_query.iter_mut() {
        *transform = pose;
    }
}
