//! Interactive desk props: light switch, keyboard glow, resume paper, flashlight.

use bevy::math::{Vec2, Vec3};
use log::{debug, info};

use crate::config::{lighting, props as cfg};

/// Room light toggle. The on/off flag is the only state; every dependent
/// visual is derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSwitch {
    on: bool,
    lit_intensity: f32,
}

impl Default for LightSwitch {
    fn default() -> Self {
        Self::new(lighting::ROOM_LIGHT_INTENSITY)
    }
}

impl LightSwitch {
    /// Starts switched on.
    pub fn new(lit_intensity: f32) -> Self {
        Self {
            on: true,
            lit_intensity,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Flips the switch and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        info!("[Props] Lights {}", if self.on { "on" } else { "off" });
        self.on
    }

    /// Room light intensity for the current state.
    pub fn intensity(&self) -> f32 {
        if self.on {
            self.lit_intensity
        } else {
            0.0
        }
    }

    /// Ambient brightness for the current state. Never zero.
    pub fn ambient_brightness(&self) -> f32 {
        if self.on {
            lighting::AMBIENT_LIT_BRIGHTNESS
        } else {
            lighting::AMBIENT_DARK_BRIGHTNESS
        }
    }

    /// Vertical offset of the toggle knob.
    pub fn knob_offset(&self) -> f32 {
        if self.on {
            0.05
        } else {
            -0.05
        }
    }
}

/// Color of a keyboard key at `elapsed` seconds.
///
/// Lights on: a static light color. Lights off: phase-shifted sinusoids per
/// channel plus a slow breathing term, floored and gamma-lifted.
pub fn key_glow_color(lights_on: bool, elapsed: f32) -> [f32; 3] {
    if lights_on {
        return cfg::KEY_LIT_COLOR;
    }
    let t = elapsed * cfg::KEY_GLOW_TIME_SCALE;
    let glow = (t * 0.5).sin() * 0.2 + 0.2;
    [0.0_f32, 2.094, 4.188].map(|phase| {
        let channel = (t + phase).sin() + 0.3 + glow;
        channel.max(0.3).powf(0.8)
    })
}

/// One-shot countdown owned by a prop. Cancelled timers never fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayTimer {
    remaining: f32,
    state: TimerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

impl DelayTimer {
    pub fn new(delay: f32) -> Self {
        Self {
            remaining: delay,
            state: TimerState::Pending,
        }
    }

    /// Returns `true` on the single tick that crosses the deadline.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.state != TimerState::Pending {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.state = TimerState::Fired;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Pending {
            self.state = TimerState::Cancelled;
        }
    }

    pub fn has_fired(&self) -> bool {
        self.state == TimerState::Fired
    }
}

/// Position plus Euler XYZ rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl PaperPose {
    fn lerp(self, to: PaperPose, k: f32) -> PaperPose {
        PaperPose {
            position: self.position.lerp(to.position, k),
            rotation: self.rotation.lerp(to.rotation, k),
        }
    }
}

/// Tunables for the resume paper. `Default` reads [`crate::config::props`].
#[derive(Debug, Clone, Copy)]
pub struct PaperSettings {
    pub unlock_delay: f32,
    pub lerp: f32,
    pub rest: PaperPose,
    pub reading: PaperPose,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            unlock_delay: cfg::PAPER_UNLOCK_DELAY,
            lerp: cfg::PAPER_LERP,
            rest: PaperPose {
                position: Vec3::from_array(cfg::PAPER_REST_POSITION),
                rotation: Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
            },
            reading: PaperPose {
                position: Vec3::from_array(cfg::PAPER_READING_POSITION),
                rotation: Vec3::ZERO,
            },
        }
    }
}

/// Resume paper lying on the desk; click to pick it up and read it
#[derive(Debug, Clone)]
pub struct ResumePaper {
    settings: PaperSettings,
    unlock: DelayTimer,
    focused: bool,
    disposed: bool,
    pose: PaperPose,
}

impl Default for ResumePaper {
    fn default() -> Self {
        Self::new(PaperSettings::default())
    }
}

impl ResumePaper {
    pub fn new(settings: PaperSettings) -> Self {
        Self {
            settings,
            unlock: DelayTimer::new(settings.unlock_delay),
            focused: false,
            disposed: false,
            pose: settings.rest,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlock.has_fired()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn pose(&self) -> PaperPose {
        self.pose
    }

    pub fn reading_pose(&self) -> PaperPose {
        self.settings.reading
    }

    /// Toggles focus. Returns `false` when the click was ignored.
    pub fn click(&mut self) -> bool {
        if self.disposed || !self.is_unlocked() {
            return false;
        }
        self.focused = !self.focused;
        info!("[Props] Resume paper {}", if self.focused { "focused" } else { "released" });
        true
    }

    pub fn update(&mut self, dt: f32) {
        if self.disposed {
            return;
        }
        if self.unlock.tick(dt) {
            debug!("[Props] Resume paper unlocked");
        }
        if !self.is_unlocked() {
            return;
        }
        let target = if self.focused {
            self.settings.reading
        } else {
            self.settings.rest
        };
        self.pose = self.pose.lerp(target, self.settings.lerp);
    }

    /// Puts the paper back down without a click, e.g. when the camera is reset.
    pub fn release(&mut self) {
        if self.focused {
            self.focused = false;
            info!("[Props] Resume paper released");
        }
    }

    /// Teardown: cancels the pending unlock and freezes the paper.
    pub fn dispose(&mut self) {
        self.unlock.cancel();
        self.disposed = true;
    }
}

/// Pixel position to normalized device coordinates (`-1..1`, +Y up).
pub fn pointer_to_ndc(pixel: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        pixel.x / viewport.x * 2.0 - 1.0,
        -(pixel.y / viewport.y) * 2.0 + 1.0,
    ))
}

/// Point where a pointer ray meets the plane `z = plane_z`, if it does.
pub fn flashlight_aim(origin: Vec3, direction: Vec3, plane_z: f32) -> Option<Vec3> {
    if direction.z.abs() < f32::EPSILON {
        return None;
    }
    let distance = (plane_z - origin.z) / direction.z;
    (distance > 0.0).then(|| origin + direction * distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn light_round_trip_restores_intensity() {
        let mut switch = LightSwitch::default();
        let original = switch.intensity();
        assert!(!switch.toggle());
        assert_eq!(switch.intensity(), 0.0);
        assert!(switch.toggle());
        assert_eq!(switch.intensity(), original);
    }

    #[test]
    fn ambient_dims_but_stays_on_in_the_dark() {
        let mut switch = LightSwitch::default();
        let lit = switch.ambient_brightness();
        switch.toggle();
        assert!(switch.ambient_brightness() > 0.0);
        assert!(switch.ambient_brightness() < lit);
    }

    #[test]
    fn knob_follows_switch() {
        let mut switch = LightSwitch::new(10.0);
        assert!(switch.knob_offset() > 0.0);
        switch.toggle();
        assert!(switch.knob_offset() < 0.0);
    }

    #[test]
    fn keys_are_static_when_lit() {
        assert_eq!(key_glow_color(true, 0.0), cfg::KEY_LIT_COLOR);
        assert_eq!(key_glow_color(true, 12.5), cfg::KEY_LIT_COLOR);
    }

    #[test]
    fn keys_cycle_in_the_dark() {
        let a = key_glow_color(false, 0.0);
        let b = key_glow_color(false, 1.7);
        assert_ne!(a, b);
        for t in 0..200 {
            let color = key_glow_color(false, t as f32 * 0.1);
            for channel in color {
                assert!(channel >= 0.3_f32.powf(0.8) - 1e-6);
            }
        }
    }

    #[test]
    fn key_glow_matches_formula_at_zero() {
        // t = 0: glow = 0.2, red = sin(0) + 0.3 + 0.2 = 0.5
        let [r, _, _] = key_glow_color(false, 0.0);
        assert_relative_eq!(r, 0.5_f32.powf(0.8), epsilon = 1e-6);
    }

    #[test]
    fn timer_fires_once() {
        let mut timer = DelayTimer::new(1.0);
        assert!(!timer.tick(0.6));
        assert!(timer.tick(0.6));
        assert!(!timer.tick(0.6));
        assert!(timer.has_fired());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = DelayTimer::new(1.0);
        timer.tick(0.5);
        timer.cancel();
        assert!(!timer.tick(5.0));
        assert!(!timer.has_fired());
    }

    #[test]
    fn paper_ignores_clicks_until_unlocked() {
        let mut paper = ResumePaper::default();
        paper.update(cfg::PAPER_UNLOCK_DELAY / 2.0);
        assert!(!paper.click());
        assert!(!paper.is_focused());
        paper.update(cfg::PAPER_UNLOCK_DELAY);
        assert!(paper.click());
        assert!(paper.is_focused());
    }

    #[test]
    fn paper_eases_toward_reading_pose_and_back() {
        let settings = PaperSettings::default();
        let mut paper = ResumePaper::new(settings);
        paper.update(settings.unlock_delay);
        paper.click();

        let before = paper.pose();
        paper.update(1.0 / 60.0);
        let expected = before.position.lerp(settings.reading.position, settings.lerp);
        assert_relative_eq!(paper.pose().position.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(paper.pose().position.y, expected.y, epsilon = 1e-6);

        for _ in 0..300 {
            paper.update(1.0 / 60.0);
        }
        assert!(paper.pose().position.distance(settings.reading.position) < 1e-3);
        assert!(paper.pose().rotation.length() < 1e-3);

        paper.click();
        for _ in 0..300 {
            paper.update(1.0 / 60.0);
        }
        assert!(paper.pose().position.distance(settings.rest.position) < 1e-3);
    }

    #[test]
    fn released_paper_needs_one_click_to_refocus() {
        let mut paper = ResumePaper::default();
        paper.update(cfg::PAPER_UNLOCK_DELAY);
        paper.click();
        paper.release();
        assert!(!paper.is_focused());
        assert!(paper.click());
        assert!(paper.is_focused());
    }

    #[test]
    fn disposed_paper_stays_locked() {
        let mut paper = ResumePaper::default();
        paper.update(1.0);
        paper.dispose();
        paper.update(10.0);
        assert!(!paper.is_unlocked());
        assert!(!paper.click());
    }

    #[test]
    fn ndc_conversion() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(pointer_to_ndc(Vec2::new(400.0, 300.0), viewport), Some(Vec2::ZERO));
        assert_eq!(pointer_to_ndc(Vec2::ZERO, viewport), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_to_ndc(viewport, viewport), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pointer_to_ndc(Vec2::ONE, Vec2::ZERO), None);
    }

    #[test]
    fn flashlight_hits_wall_plane() {
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let hit = flashlight_aim(origin, Vec3::new(0.6, 0.0, -0.8), 0.0);
        let hit = hit.expect("ray toward the plane must hit it");
        assert_relative_eq!(hit.z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(hit.x, 3.75, epsilon = 1e-5);

        let wall = flashlight_aim(Vec3::ZERO, Vec3::NEG_Z, -2.0);
        assert_eq!(wall, Some(Vec3::new(0.0, 0.0, -2.0)));

        assert_eq!(flashlight_aim(origin, Vec3::Z, 0.0), None);
        assert_eq!(flashlight_aim(origin, Vec3::X, 0.0), None);
    }
}
