//! Publishes the scene state the page polls through `get_scene_status`

use bevy::prelude::*;

use crate::bevy::components::ResumePaperProp;
use crate::bevy::resources::{Hovered, Rig, RoomLights, StatusRes};

pub fn publish_scene_status(
    status: Option<Res<StatusRes>>,
    lights: Res<RoomLights>,
    rig: Res<Rig>,
    hovered: Res<Hovered>,
    papers: Query<&ResumePaperProp>,
) {
    let Some(status) = status else {
        return;
    };
    let Ok(mut scene) = status.0 .0.lock() else {
        return;
    };

    scene.lights_on = lights.is_on();
    scene.camera_mode = rig.mode();
    scene.paper_focused = papers.iter().any(|paper| paper.is_focused());
    scene.paper_unlocked = papers.iter().any(|paper| paper.is_unlocked());
    scene.hovered = hovered.0;
}
