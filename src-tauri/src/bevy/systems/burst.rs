//! Color burst systems
//!
//! A monitor click starts a [`BurstEffect`] whose progress is mirrored into
//! the scene status and whose completion switches the page to the projects
//! route. Rays are drawn with a fixed pool of cylinder entities.

use bevy::prelude::*;
use log::warn;

use crate::bevy::components::{ProjectsButton, RaySlot};
use crate::bevy::resources::{
    BurstState, NavigatorRes, OverlayMaterial, PropClicked, StatusRes,
};
use crate::config::burst as cfg;
use crate::scene::{BurstEffect, BurstSettings, PropTarget};
use crate::tauri_bridge::shared_state::Route;

pub fn start_burst(
    mut clicks: MessageReader<PropClicked>,
    mut burst: ResMut<BurstState>,
    status: Option<Res<StatusRes>>,
    navigator: Option<Res<NavigatorRes>>,
    mut buttons: Query<&mut Visibility, With<ProjectsButton>>,
) {
    let requested = clicks
        .read()
        .any(|PropClicked(target)| *target == PropTarget::Monitor);
    if !requested || burst.effect.is_some() {
        return;
    }

    let mut effect = BurstEffect::new(BurstSettings::default());

    if let Some(status) = &status {
        let shared = status.0.clone();
        effect = effect.on_progress(move |t| {
            if let Ok(mut scene) = shared.0.lock() {
                scene.burst_progress = Some(t);
            }
        });
    }

    if let Some(navigator) = &navigator {
        let navigator = navigator.0.clone();
        effect = effect.on_complete(move || {
            if let Err(e) = navigator.navigate(Route::Projects) {
                warn!("[Burst] Navigation failed: {e}");
            }
        });
    }

    burst.effect = Some(effect);

    for mut visibility in buttons.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

pub fn advance_burst(time: Res<Time>, mut burst: ResMut<BurstState>) {
    let BurstState { effect, rng } = &mut *burst;
    if let Some(effect) = effect.as_mut() {
        effect.update(time.delta_secs(), rng);
    }
}

/// Map live rays onto the slot pool and fade the overlay
pub fn render_burst(
    burst: Res<BurstState>,
    overlay: Option<Res<OverlayMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut slots: Query<
        (
            &mut Transform,
            &mut Visibility,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<RaySlot>,
    >,
) {
    let origin = Vec3::from_array(cfg::ORIGIN);
    let effect = burst.effect.as_ref();
    let mut rays = effect.into_iter().flat_map(|effect| effect.rays());

    for (mut transform, mut visibility, material) in slots.iter_mut() {
        let Some((effect, ray)) = effect.zip(rays.next()) else {
            *visibility = Visibility::Hidden;
            continue;
        };

        let tip = ray.tip(effect.elapsed(), effect.settings());
        let length = tip.length();
        if length < 1e-4 {
            *visibility = Visibility::Hidden;
            continue;
        }

        // Unit cylinder along +Y, stretched from the origin to the tip
        transform.translation = origin + tip * 0.5;
        transform.rotation = Quat::from_rotation_arc(Vec3::Y, tip / length);
        transform.scale = Vec3::new(1.0, length, 1.0);
        *visibility = Visibility::Visible;

        if let Some(slot_material) = materials.get_mut(&material.0) {
            slot_material.base_color = Color::hsl(ray.hue, cfg::SATURATION, cfg::LIGHTNESS);
        }
    }

    let opacity = effect.map_or(0.0, BurstEffect::overlay_opacity);
    if let Some(overlay) = overlay {
        if let Some(overlay_material) = materials.get_mut(&overlay.0) {
            overlay_material.base_color = Color::srgba(0.0, 0.0, 0.0, opacity);
        }
    }
}
