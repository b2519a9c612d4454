//! Prop interaction systems
//!
//! Picking turns pointer clicks into [`PropClicked`] messages; the remaining
//! systems react to those messages and to the light switch state.

use bevy::prelude::*;
use log::debug;

use crate::bevy::components::{
    CameraController, Clickable, Flashlight, ResumePaperProp, RoomLight, SwitchKnob,
};
use crate::bevy::resources::{
    BurstState, FrameInput, Hovered, KeyMaterial, KnobMaterials, PropClicked, Rig, RoomLights,
};
use crate::config::{lighting, props};
use crate::scene::picking::{pick_nearest, PickVolume};
use crate::scene::props::{flashlight_aim, key_glow_color};
use crate::scene::{FramingPose, PropTarget};

/// World-space ray through a point in normalized device coordinates
fn pointer_ray(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    ndc: Vec2,
) -> Option<(Vec3, Vec3)> {
    // Reverse-z: 1.0 is the near plane
    let near = camera.ndc_to_world(camera_transform, ndc.extend(1.0))?;
    let far = camera.ndc_to_world(camera_transform, ndc.extend(f32::EPSILON))?;
    let direction = (far - near).try_normalize()?;
    Some((near, direction))
}

/// Resolve hover and clicks against every visible [`Clickable`]
pub fn pick_props(
    frame_input: Res<FrameInput>,
    burst: Res<BurstState>,
    camera_query: Query<(&Camera, &GlobalTransform), With<CameraController>>,
    clickables: Query<(&Clickable, &GlobalTransform, &InheritedVisibility)>,
    papers: Query<&ResumePaperProp>,
    mut hovered: ResMut<Hovered>,
    mut clicked: MessageWriter<PropClicked>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let paper_unlocked = papers.iter().any(|paper| paper.is_unlocked());
    let interactive = |target: &PropTarget| match target {
        PropTarget::LightSwitch => true,
        PropTarget::ResumePaper => paper_unlocked,
        PropTarget::Monitor => burst.effect.is_none(),
    };

    let pick = |ndc: Vec2| -> Option<PropTarget> {
        let (origin, direction) = pointer_ray(camera, camera_transform, ndc)?;
        let volumes = clickables
            .iter()
            .filter(|(_, _, visibility)| visibility.get())
            .map(|(clickable, transform, _)| PickVolume {
                target: clickable.target,
                world: Mat4::from(transform.affine()),
                half_extents: clickable.half_extents,
            });
        pick_nearest(origin, direction, volumes).filter(|target| interactive(target))
    };

    hovered.0 = frame_input.pointer.and_then(&pick);

    for &ndc in &frame_input.clicks {
        if let Some(target) = pick(ndc) {
            debug!("[Props] Clicked {target:?}");
            clicked.write(PropClicked(target));
        }
    }
}

pub fn toggle_lights(mut clicks: MessageReader<PropClicked>, mut lights: ResMut<RoomLights>) {
    for PropClicked(target) in clicks.read() {
        if *target == PropTarget::LightSwitch {
            lights.toggle();
        }
    }
}

/// Push the switch state into the room lights and the knob
pub fn apply_lighting(
    lights: Res<RoomLights>,
    knob_materials: Option<Res<KnobMaterials>>,
    ambient: Option<ResMut<AmbientLight>>,
    mut room_lights: Query<&mut PointLight, With<RoomLight>>,
    mut knobs: Query<(&mut Transform, &mut MeshMaterial3d<StandardMaterial>), With<SwitchKnob>>,
) {
    if !lights.is_changed() {
        return;
    }

    for mut light in room_lights.iter_mut() {
        light.intensity = lights.intensity();
    }
    if let Some(mut ambient) = ambient {
        ambient.brightness = lights.ambient_brightness();
    }

    for (mut transform, mut material) in knobs.iter_mut() {
        transform.translation.y = lights.knob_offset();
        if let Some(knob) = &knob_materials {
            material.0 = if lights.is_on() {
                knob.on.clone()
            } else {
                knob.off.clone()
            };
        }
    }
}

/// Cycle the shared key material while the room is dark
pub fn update_key_glow(
    time: Res<Time>,
    lights: Res<RoomLights>,
    key_material: Option<Res<KeyMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(key_material) = key_material else {
        return;
    };
    // Static color while lit
    if lights.is_on() && !lights.is_changed() {
        return;
    }

    let [r, g, b] = key_glow_color(lights.is_on(), time.elapsed_secs());
    if let Some(material) = materials.get_mut(&key_material.0) {
        material.base_color = Color::srgb(r, g, b);
    }
}

/// Focus toggling, pose easing, and camera framing for the resume paper
pub fn update_resume_paper(
    time: Res<Time>,
    mut clicks: MessageReader<PropClicked>,
    mut rig: ResMut<Rig>,
    mut papers: Query<(&mut ResumePaperProp, &mut Transform)>,
) {
    let clicked = clicks
        .read()
        .any(|PropClicked(target)| *target == PropTarget::ResumePaper);

    for (mut paper, mut transform) in papers.iter_mut() {
        if clicked && paper.click() {
            let framing = paper.is_focused().then(|| FramingPose {
                position: Vec3::from_array(props::PAPER_FRAMING_POSITION),
                look_at: paper.reading_pose().position,
            });
            rig.set_framing(framing);
        }

        paper.update(time.delta_secs());

        let pose = paper.pose();
        transform.translation = pose.position;
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            pose.rotation.x,
            pose.rotation.y,
            pose.rotation.z,
        );
    }
}

/// Spotlight in front of the camera, aimed at the pointer, only in the dark
pub fn update_flashlight(
    lights: Res<RoomLights>,
    frame_input: Res<FrameInput>,
    camera_query: Query<(&Camera, &GlobalTransform), With<CameraController>>,
    mut flashlights: Query<(&mut Transform, &mut Visibility), With<Flashlight>>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for (mut transform, mut visibility) in flashlights.iter_mut() {
        if lights.is_on() {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Visible;

        let forward = camera_transform.forward();
        let position = camera_transform.translation() + forward * lighting::FLASHLIGHT_OFFSET;
        let aim = frame_input
            .pointer
            .and_then(|ndc| pointer_ray(camera, camera_transform, ndc))
            .and_then(|(origin, direction)| {
                flashlight_aim(origin, direction, lighting::FLASHLIGHT_PLANE_Z)
            })
            .unwrap_or(position + forward * 5.0);

        *transform = Transform::from_translation(position).looking_at(aim, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn switch_drives_room_and_ambient_light() {
        let mut world = World::new();
        world.init_resource::<RoomLights>();
        world.insert_resource(AmbientLight {
            brightness: lighting::AMBIENT_LIT_BRIGHTNESS,
            ..default()
        });
        let room = world.spawn((PointLight::default(), RoomLight)).id();

        world.resource_mut::<RoomLights>().toggle();
        world.run_system_once(apply_lighting).expect("system runs");
        assert_eq!(world.get::<PointLight>(room).expect("light").intensity, 0.0);
        assert_eq!(
            world.resource::<AmbientLight>().brightness,
            lighting::AMBIENT_DARK_BRIGHTNESS
        );

        world.resource_mut::<RoomLights>().toggle();
        world.run_system_once(apply_lighting).expect("system runs");
        assert_eq!(
            world.get::<PointLight>(room).expect("light").intensity,
            lighting::ROOM_LIGHT_INTENSITY
        );
        assert_eq!(
            world.resource::<AmbientLight>().brightness,
            lighting::AMBIENT_LIT_BRIGHTNESS
        );
    }
}
