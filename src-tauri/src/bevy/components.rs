//! Bevy component definitions
//!
//! This module contains all component markers and data structures used
//! to tag and identify entities in the Bevy ECS (Entity Component System).

use bevy::prelude::*;

use crate::scene::{PropTarget, ResumePaper};

/// Marker component for the offscreen rendering camera
///
/// Entities with this component are cameras that render to an offscreen
/// texture instead of a window.
#[derive(Component)]
pub struct OffscreenCamera;

/// Marker component for the camera driven by the camera rig
#[derive(Component)]
pub struct CameraController;

/// Box the pointer ray is tested against, centered on the entity
#[derive(Component, Debug, Clone, Copy)]
pub struct Clickable {
    pub target: PropTarget,
    pub half_extents: Vec3,
}

/// Point light whose intensity follows the light switch
#[derive(Component)]
pub struct RoomLight;

/// The moving toggle on the light switch plate
#[derive(Component)]
pub struct SwitchKnob;

/// Resume paper entity and its focus state
#[derive(Component, Deref, DerefMut)]
pub struct ResumePaperProp(pub ResumePaper);

/// "View Projects" overlay on the monitor, hidden while a burst runs
#[derive(Component)]
pub struct ProjectsButton;

/// Spotlight that follows the pointer while the room is dark
#[derive(Component)]
pub struct Flashlight;

/// Pooled burst ray visual
#[derive(Component)]
pub struct RaySlot;

/// Camera-attached quad that fades the scene out during a burst
#[derive(Component)]
pub struct BurstOverlay;
