//! Scene setup system
//!
//! Builds the room, the desk with its props, the lights, the burst ray pool,
//! and the offscreen camera that renders it all.

use std::path::Path;

use bevy::{
    asset::{Assets, RenderAssetUsages},
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    math::primitives::{Circle, Cuboid, Cylinder, Rectangle},
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};
use log::{info, warn};

use crate::bevy::components::{
    BurstOverlay, CameraController, Clickable, Flashlight, OffscreenCamera, ProjectsButton,
    RaySlot, ResumePaperProp, RoomLight, SwitchKnob,
};
use crate::bevy::plugins::image_copy::ImageCopier;
use crate::bevy::resources::{KeyMaterial, KnobMaterials, OverlayMaterial, Rig};
use crate::config::{assets, burst, camera, lighting, props, RENDER_HEIGHT, RENDER_WIDTH};
use crate::error::AssetError;
use crate::scene::{PropTarget, ResumePaper};

/// Setup the 3D scene with camera, props, and lights
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
    rig: Res<Rig>,
) {
    info!("[Bevy] Setting up scene...");

    let size = Extent3d {
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
        depth_or_array_layers: 1,
    };

    // Create render target texture
    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let render_target_image_handle = images.add(render_target_image);

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(
        render_target_image_handle.clone(),
        size,
        &render_device,
    ));

    // Burst overlay rides on the camera just past the near plane
    let overlay_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.0, 0.0, 0.0, 0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.insert_resource(OverlayMaterial(overlay_material.clone()));

    commands
        .spawn((
            Camera3d::default(),
            Camera {
                target: RenderTarget::Image(render_target_image_handle.into()),
                clear_color: ClearColorConfig::Custom(Color::srgb(0.02, 0.02, 0.03)),
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                fov: camera::FOV_DEGREES.to_radians(),
                ..default()
            }),
            Tonemapping::None,
            rig.transform(),
            OffscreenCamera,
            CameraController,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Rectangle::new(4.0, 4.0))),
                MeshMaterial3d(overlay_material),
                Transform::from_xyz(0.0, 0.0, -0.15),
                BurstOverlay,
            ));
        });

    spawn_room(&mut commands, &mut meshes, &mut materials);
    spawn_monitor(&mut commands, &mut meshes, &mut materials);
    spawn_keyboard(&mut commands, &mut meshes, &mut materials);
    spawn_light_switch(&mut commands, &mut meshes, &mut materials);
    spawn_resume_paper(&mut commands, &mut meshes, &mut materials, &mut images);
    spawn_lights(&mut commands);
    spawn_ray_pool(&mut commands, &mut meshes, &mut materials);

    info!("[Bevy] Scene setup complete!");
}

fn matte(materials: &mut Assets<StandardMaterial>, color: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.85,
        ..default()
    })
}

fn spawn_room(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    // Back wall
    commands.spawn((
        Mesh3d(meshes.add(Rectangle::new(20.0, 12.0))),
        MeshMaterial3d(matte(materials, Color::srgb_u8(0xd8, 0xcf, 0xc4))),
        Transform::from_xyz(0.0, 1.0, -2.0),
    ));

    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Rectangle::new(20.0, 20.0))),
        MeshMaterial3d(matte(materials, Color::srgb_u8(0x5c, 0x4a, 0x3d))),
        Transform::from_xyz(0.0, -3.0, 3.0)
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
    ));

    // Desk top and legs
    let wood = matte(materials, Color::srgb_u8(0x8b, 0x45, 0x13));
    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(4.0, 0.1, 2.0))),
            MeshMaterial3d(wood.clone()),
            Transform::from_xyz(0.0, -1.5, -1.0),
        ))
        .with_children(|desk| {
            let leg = meshes.add(Cuboid::new(0.1, 1.45, 0.1));
            for (x, z) in [(-1.9, -0.9), (1.9, -0.9), (-1.9, 0.9), (1.9, 0.9)] {
                desk.spawn((
                    Mesh3d(leg.clone()),
                    MeshMaterial3d(wood.clone()),
                    Transform::from_xyz(x, -0.775, z),
                ));
            }
        });
}

fn spawn_monitor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let plastic = matte(materials, Color::srgb_u8(0x2a, 0x2a, 0x2a));
    let screen = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x1e, 0x3a, 0x8a),
        emissive: LinearRgba::rgb(0.05, 0.1, 0.3),
        ..default()
    });
    let page = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    let url_bar = matte(materials, Color::srgb_u8(0xe5, 0xe7, 0xeb));
    let traffic = [
        Color::srgb_u8(0xff, 0x5f, 0x57),
        Color::srgb_u8(0xfe, 0xbc, 0x2e),
        Color::srgb_u8(0x28, 0xc8, 0x40),
    ]
    .map(|color| {
        materials.add(StandardMaterial {
            base_color: color,
            unlit: true,
            ..default()
        })
    });
    let button = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x2a, 0x2a, 0x2a),
        emissive: LinearRgba::rgb(0.0, 0.25, 0.05),
        unlit: true,
        ..default()
    });

    let dot = meshes.add(Circle::new(0.02));

    commands
        .spawn((
            Transform::from_translation(Vec3::from_array(props::MONITOR_POSITION)),
            Visibility::default(),
        ))
        .with_children(|monitor| {
            // Stand and base
            monitor.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.3, 0.6, 0.3))),
                MeshMaterial3d(plastic.clone()),
                Transform::from_xyz(0.0, 0.0, -0.2),
            ));
            monitor.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.5, 0.1, 0.8))),
                MeshMaterial3d(plastic.clone()),
                Transform::from_xyz(0.0, -0.3, -0.2),
            ));

            // Bezel and display
            monitor.spawn((
                Mesh3d(meshes.add(Cuboid::new(3.0, 1.8, 0.1))),
                MeshMaterial3d(plastic.clone()),
                Transform::from_xyz(0.0, 0.8, 0.0),
            ));
            monitor.spawn((
                Mesh3d(meshes.add(Rectangle::new(2.8, 1.6))),
                MeshMaterial3d(screen),
                Transform::from_xyz(0.0, 0.8, 0.06),
            ));

            // Browser chrome: page, URL bar, window buttons
            monitor.spawn((
                Mesh3d(meshes.add(Rectangle::new(2.6, 1.3))),
                MeshMaterial3d(page),
                Transform::from_xyz(0.0, 0.85, 0.11),
            ));
            monitor.spawn((
                Mesh3d(meshes.add(Rectangle::new(2.0, 0.08))),
                MeshMaterial3d(url_bar),
                Transform::from_xyz(0.0, 1.4, 0.13),
            ));
            for (i, material) in traffic.into_iter().enumerate() {
                monitor.spawn((
                    Mesh3d(dot.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(-1.225 + i as f32 * 0.075, 1.4, 0.12),
                ));
            }

            // "View Projects" button; the whole page area is its hit box
            monitor.spawn((
                Mesh3d(meshes.add(Rectangle::new(1.2, 0.4))),
                MeshMaterial3d(button),
                Transform::from_xyz(0.0, 0.75, 0.21),
                Visibility::Visible,
                Clickable {
                    target: PropTarget::Monitor,
                    half_extents: Vec3::new(1.3, 0.65, 0.02),
                },
                ProjectsButton,
            ));
        });
}

fn spawn_keyboard(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let key_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.9, 0.9),
        unlit: true,
        ..default()
    });
    commands.insert_resource(KeyMaterial(key_material.clone()));

    let base = matte(materials, Color::srgb_u8(0x1a, 0x1a, 0x1a));
    let key = meshes.add(Cuboid::new(0.08, 0.02, 0.08));

    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(1.2, 0.05, 0.4))),
            MeshMaterial3d(base),
            Transform::from_translation(Vec3::from_array(props::KEYBOARD_POSITION)),
        ))
        .with_children(|keyboard| {
            // Three staggered rows
            for (row, count) in [11usize, 10, 11].into_iter().enumerate() {
                let z = -0.1 + row as f32 * 0.1;
                let start = -(count as f32 - 1.0) * 0.05;
                for column in 0..count {
                    keyboard.spawn((
                        Mesh3d(key.clone()),
                        MeshMaterial3d(key_material.clone()),
                        Transform::from_xyz(start + column as f32 * 0.1, 0.035, z),
                    ));
                }
            }
        });
}

fn spawn_light_switch(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let knob_on = matte(materials, Color::srgb_u8(0x4c, 0xaf, 0x50));
    let knob_off = matte(materials, Color::srgb_u8(0xe0, 0xe0, 0xe0));
    commands.insert_resource(KnobMaterials {
        on: knob_on.clone(),
        off: knob_off,
    });

    let backing = matte(materials, Color::srgb_u8(0xf5, 0xe6, 0xd3));
    let plate = matte(materials, Color::srgb_u8(0xf5, 0xf5, 0xf5));

    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(0.15, 0.25, 0.02))),
            MeshMaterial3d(plate),
            Transform::from_translation(Vec3::from_array(props::SWITCH_POSITION)),
            Clickable {
                target: PropTarget::LightSwitch,
                half_extents: Vec3::new(0.15, 0.2, 0.04),
            },
        ))
        .with_children(|switch| {
            switch.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.3, 0.4, 0.01))),
                MeshMaterial3d(backing),
                Transform::from_xyz(0.0, 0.0, -0.01),
            ));
            switch.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.1, 0.1, 0.02))),
                MeshMaterial3d(knob_on),
                Transform::from_xyz(0.0, 0.05, 0.02),
                SwitchKnob,
            ));
        });
}

/// Decode an image file into an sRGB texture
fn load_resume_texture(path: &Path) -> Result<Image, AssetError> {
    let decoded = image::open(path).map_err(|source| AssetError::Texture {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    ))
}

fn spawn_resume_paper(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
) {
    let texture = match load_resume_texture(Path::new(assets::RESUME_TEXTURE)) {
        Ok(image) => Some(images.add(image)),
        Err(e) => {
            warn!("[Bevy] {e}; using a blank sheet");
            None
        }
    };

    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: texture,
        perceptual_roughness: 0.9,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    let paper = ResumePaper::default();
    let pose = paper.pose();
    let [width, height] = props::PAPER_SIZE;

    commands.spawn((
        Mesh3d(meshes.add(Rectangle::new(width, height))),
        MeshMaterial3d(material),
        Transform::from_translation(pose.position).with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            pose.rotation.x,
            pose.rotation.y,
            pose.rotation.z,
        )),
        Clickable {
            target: PropTarget::ResumePaper,
            half_extents: Vec3::new(width / 2.0, height / 2.0, 0.01),
        },
        ResumePaperProp(paper),
    ));
}

fn spawn_lights(commands: &mut Commands) {
    // Global fill, dimmed with the switch
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: lighting::AMBIENT_LIT_BRIGHTNESS,
        ..default()
    });

    // Ceiling light, follows the switch
    commands.spawn((
        PointLight {
            intensity: lighting::ROOM_LIGHT_INTENSITY,
            range: 20.0,
            shadows_enabled: true,
            color: Color::srgb(1.0, 0.95, 0.85),
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, 0.5),
        RoomLight,
    ));

    // Dim fill so the room never goes fully black
    commands.spawn((
        PointLight {
            intensity: lighting::NIGHT_LIGHT_INTENSITY,
            range: 20.0,
            color: Color::srgb(0.4, 0.5, 1.0),
            ..default()
        },
        Transform::from_xyz(-3.0, 1.5, 2.0),
    ));

    commands.spawn((
        SpotLight {
            intensity: lighting::FLASHLIGHT_INTENSITY,
            range: 15.0,
            inner_angle: 0.3,
            outer_angle: 0.5,
            color: Color::srgb(1.0, 0.97, 0.9),
            ..default()
        },
        Transform::from_translation(Vec3::from_array(camera::TARGET_POSITION)),
        Visibility::Hidden,
        Flashlight,
    ));
}

fn spawn_ray_pool(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let ray = meshes.add(Cylinder::new(burst::RAY_RADIUS, 1.0));
    let origin = Vec3::from_array(burst::ORIGIN);

    // Each slot owns its material so rays keep their own hue
    for _ in 0..burst::MAX_RAYS {
        let material = materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        });
        commands.spawn((
            Mesh3d(ray.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(origin),
            Visibility::Hidden,
            RaySlot,
        ));
    }
}
