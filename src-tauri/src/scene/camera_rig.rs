//! Camera rig: scripted entry flight, then free look-and-move control.
//!
//! The rig is plain state advanced by [`CameraRig::update`] once per frame.
//! A Bevy system copies [`CameraRig::transform`] onto the camera entity.

use bevy::math::{EulerRot, Quat, Vec3};
use bevy::prelude::Transform;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{camera as cfg, props};

/// Which controller currently owns the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Predetermined flight toward the desk, no user input
    Scripted,
    /// Pointer look plus keyboard movement
    Free,
}

/// Directional movement keys for free mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl MoveKey {
    /// Maps a DOM `KeyboardEvent.code` to a movement key.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Self::Forward),
            "KeyS" | "ArrowDown" => Some(Self::Back),
            "KeyA" | "ArrowLeft" => Some(Self::Left),
            "KeyD" | "ArrowRight" => Some(Self::Right),
            "Space" | "KeyE" => Some(Self::Up),
            "ShiftLeft" | "ShiftRight" | "KeyQ" => Some(Self::Down),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn press(&mut self, key: MoveKey) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: MoveKey) {
        self.0 &= !key.bit();
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Tunables for the rig. `Default` reads [`crate::config::camera`].
#[derive(Debug, Clone, Copy)]
pub struct RigSettings {
    pub start_position: Vec3,
    pub target_position: Vec3,
    pub damping: f32,
    pub scripted_duration: f32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub zoom_speed: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub framing_lerp: f32,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            start_position: Vec3::from_array(cfg::START_POSITION),
            target_position: Vec3::from_array(cfg::TARGET_POSITION),
            damping: cfg::DAMPING,
            scripted_duration: cfg::SCRIPTED_DURATION,
            move_speed: cfg::MOVE_SPEED,
            rotation_speed: cfg::ROTATION_SPEED,
            zoom_speed: cfg::ZOOM_SPEED,
            min_pitch: cfg::MIN_PITCH,
            max_pitch: cfg::MAX_PITCH,
            framing_lerp: props::PAPER_LERP,
        }
    }
}

/// Pose the camera is pulled toward while user control is suspended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Per-frame camera state
#[derive(Debug, Clone)]
pub struct CameraRig {
    settings: RigSettings,
    position: Vec3,
    target: Vec3,
    mode: CameraMode,
    /// Seconds since the current mode was entered
    elapsed: f32,
    yaw: f32,
    pitch: f32,
    framing: Option<FramingPose>,
    /// Look target used while framing, eased alongside the position
    look_at: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(RigSettings::default())
    }
}

impl CameraRig {
    pub fn new(settings: RigSettings) -> Self {
        Self {
            settings,
            position: settings.start_position,
            target: settings.target_position,
            mode: CameraMode::Scripted,
            elapsed: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            framing: None,
            look_at: settings.start_position + Vec3::NEG_Z,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_framed(&self) -> bool {
        self.framing.is_some()
    }

    /// Unit view direction derived from yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Advances the rig by one frame.
    ///
    /// Scripted motion steps a fixed fraction of the remaining distance per
    /// frame; free movement scales by `dt`.
    pub fn update(&mut self, dt: f32, held: HeldKeys) {
        self.elapsed += dt;

        if let Some(framing) = self.framing {
            let k = self.settings.framing_lerp;
            self.position = self.position.lerp(framing.position, k);
            self.look_at = self.look_at.lerp(framing.look_at, k);
            return;
        }

        match self.mode {
            CameraMode::Scripted => {
                self.position += (self.target - self.position) * self.settings.damping;
                if self.elapsed >= self.settings.scripted_duration {
                    self.enter_free();
                }
            }
            CameraMode::Free => {
                let direction = self.movement_direction(held);
                self.position += direction * self.settings.move_speed * dt;
            }
        }
    }

    /// Normalized sum of the held movement directions, or zero.
    pub fn movement_direction(&self, held: HeldKeys) -> Vec3 {
        if held.is_empty() {
            return Vec3::ZERO;
        }
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        let mut direction = Vec3::ZERO;
        if held.is_held(MoveKey::Forward) {
            direction += forward;
        }
        if held.is_held(MoveKey::Back) {
            direction -= forward;
        }
        if held.is_held(MoveKey::Right) {
            direction += right;
        }
        if held.is_held(MoveKey::Left) {
            direction -= right;
        }
        if held.is_held(MoveKey::Up) {
            direction += Vec3::Y;
        }
        if held.is_held(MoveKey::Down) {
            direction -= Vec3::Y;
        }
        direction.normalize_or_zero()
    }

    /// Pointer drag in free mode. Ignored while scripted or framed.
    pub fn look(&mut self, delta_x: f32, delta_y: f32) {
        if !self.accepts_input() {
            return;
        }
        self.yaw -= delta_x * self.settings.rotation_speed;
        self.pitch = (self.pitch - delta_y * self.settings.rotation_speed)
            .clamp(self.settings.min_pitch, self.settings.max_pitch);
    }

    /// Scroll in free mode moves along the view direction.
    pub fn dolly(&mut self, scroll_delta: f32) {
        if !self.accepts_input() {
            return;
        }
        self.position += self.forward() * scroll_delta * self.settings.zoom_speed;
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        match mode {
            CameraMode::Scripted => self.snap_to_start(),
            CameraMode::Free if self.mode != CameraMode::Free => self.enter_free(),
            CameraMode::Free => {}
        }
    }

    /// Restores the canonical scripted start pose and target immediately.
    pub fn reset(&mut self) {
        self.target = self.settings.target_position;
        self.framing = None;
        self.snap_to_start();
        info!("[Camera] Reset to scripted start pose");
    }

    /// Suspends user control and eases toward `pose`, or releases it.
    pub fn set_framing(&mut self, pose: Option<FramingPose>) {
        match (self.framing, pose) {
            (None, Some(_)) => {
                self.look_at = self.position + self.forward();
                debug!("[Camera] Framing engaged");
            }
            (Some(_), None) => {
                self.adopt_orientation(self.look_at - self.position);
                debug!("[Camera] Framing released");
            }
            _ => {}
        }
        self.framing = pose;
    }

    /// Camera transform for this frame.
    pub fn transform(&self) -> Transform {
        if self.framing.is_some() {
            return Transform::from_translation(self.position).looking_at(self.look_at, Vec3::Y);
        }
        Transform::from_translation(self.position)
            .with_rotation(Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0))
    }

    fn accepts_input(&self) -> bool {
        self.mode == CameraMode::Free && self.framing.is_none()
    }

    fn enter_free(&mut self) {
        self.mode = CameraMode::Free;
        self.elapsed = 0.0;
        info!("[Camera] Free mode at {:?}", self.position);
    }

    fn snap_to_start(&mut self) {
        self.mode = CameraMode::Scripted;
        self.elapsed = 0.0;
        self.position = self.settings.start_position;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.framing = None;
        self.look_at = self.position + Vec3::NEG_Z;
    }

    fn adopt_orientation(&mut self, direction: Vec3) {
        let Some(dir) = direction.try_normalize() else {
            return;
        };
        self.pitch = dir
            .y
            .asin()
            .clamp(self.settings.min_pitch, self.settings.max_pitch);
        self.yaw = (-dir.x).atan2(-dir.z);
    }
}
