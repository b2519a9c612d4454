//! Page requests applied at the start of a frame

use bevy::prelude::*;
use log::{info, warn};

use crate::bevy::components::{ProjectsButton, ResumePaperProp};
use crate::bevy::resources::{BurstState, FrameInput, Rig, RoomLights, StatusRes};
use crate::scene::{LightSwitch, ResumePaper};
use crate::tauri_bridge::shared_state::{lock, SceneRequest};

pub fn apply_scene_requests(
    frame_input: Res<FrameInput>,
    status: Option<Res<StatusRes>>,
    mut rig: ResMut<Rig>,
    mut lights: ResMut<RoomLights>,
    mut burst: ResMut<BurstState>,
    mut papers: Query<&mut ResumePaperProp>,
    mut buttons: Query<&mut Visibility, With<ProjectsButton>>,
) {
    for request in &frame_input.requests {
        match *request {
            SceneRequest::SetCameraMode(mode) => rig.set_mode(mode),
            SceneRequest::ResetCamera => rig.reset(),
            SceneRequest::ResetScene => {
                rig.reset();
                lights.0 = LightSwitch::default();
                burst.effect = None;

                for mut paper in papers.iter_mut() {
                    paper.dispose();
                    paper.0 = ResumePaper::default();
                }
                for mut visibility in buttons.iter_mut() {
                    *visibility = Visibility::Visible;
                }

                if let Some(status) = &status {
                    match lock(&status.0 .0) {
                        Ok(mut scene) => scene.burst_progress = None,
                        Err(e) => warn!("[Scene] Status lock failed: {e}"),
                    }
                }
                info!("[Scene] Reset for a fresh visit");
            }
        }
    }

    // A held paper keeps the camera framed; once the rig lets go, so does the paper
    if !rig.is_framed() {
        for mut paper in papers.iter_mut() {
            paper.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    use crate::config::props::{PAPER_FRAMING_POSITION, PAPER_UNLOCK_DELAY};
    use crate::scene::{CameraMode, FramingPose};

    fn world_with_focused_paper() -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<Rig>();
        world.init_resource::<RoomLights>();
        world.init_resource::<BurstState>();
        world.init_resource::<FrameInput>();

        let mut paper = ResumePaper::default();
        paper.update(PAPER_UNLOCK_DELAY);
        assert!(paper.click());
        let entity = world.spawn(ResumePaperProp(paper)).id();

        world.resource_mut::<Rig>().set_framing(Some(FramingPose {
            position: Vec3::from_array(PAPER_FRAMING_POSITION),
            look_at: Vec3::ZERO,
        }));
        (world, entity)
    }

    fn apply(world: &mut World, request: SceneRequest) {
        world.resource_mut::<FrameInput>().requests = vec![request];
        world
            .run_system_once(apply_scene_requests)
            .expect("system runs");
    }

    #[test]
    fn scene_reset_turns_the_lights_back_on() {
        let (mut world, _) = world_with_focused_paper();
        world.resource_mut::<RoomLights>().toggle();
        assert!(!world.resource::<RoomLights>().is_on());

        apply(&mut world, SceneRequest::ResetScene);
        assert!(world.resource::<RoomLights>().is_on());
    }

    #[test]
    fn camera_reset_puts_a_held_paper_down() {
        let (mut world, paper) = world_with_focused_paper();

        apply(&mut world, SceneRequest::ResetCamera);

        assert!(!world.resource::<Rig>().is_framed());
        assert!(!world.get::<ResumePaperProp>(paper).expect("paper").is_focused());
    }

    #[test]
    fn scripted_mode_puts_a_held_paper_down() {
        let (mut world, paper) = world_with_focused_paper();

        apply(&mut world, SceneRequest::SetCameraMode(CameraMode::Scripted));

        assert!(!world.get::<ResumePaperProp>(paper).expect("paper").is_focused());
    }

    #[test]
    fn held_paper_survives_unrelated_frames() {
        let (mut world, paper) = world_with_focused_paper();

        world
            .run_system_once(apply_scene_requests)
            .expect("system runs");

        assert!(world.resource::<Rig>().is_framed());
        assert!(world.get::<ResumePaperProp>(paper).expect("paper").is_focused());
    }
}
