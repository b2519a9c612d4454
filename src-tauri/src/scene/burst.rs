//! Color burst transition.
//!
//! Rays spawn on a cubic ease-in schedule, each flying outward for a short
//! fixed lifetime. When the spawn window has elapsed and the last ray has
//! expired, the completion callback runs exactly once.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use bevy::math::Vec3;
use log::info;

use super::random::RandomSource;
use crate::config::burst as cfg;

/// Progress observer, called with the time fraction in `[0, 1]` every update.
pub type ProgressCallback = Box<dyn FnMut(f32) + Send + Sync>;

/// One-shot completion action, typically a navigation request.
pub type CompletionCallback = Box<dyn FnOnce() + Send + Sync>;

/// Tunables for a burst. `Default` reads [`crate::config::burst`].
#[derive(Debug, Clone, Copy)]
pub struct BurstSettings {
    pub duration: f32,
    pub max_rays: usize,
    pub ray_lifetime: f32,
    pub max_radius: f32,
    /// Distance a ray drifts toward the viewer over its lifetime
    pub depth_travel: f32,
}

impl Default for BurstSettings {
    fn default() -> Self {
        Self {
            duration: cfg::DURATION,
            max_rays: cfg::MAX_RAYS,
            ray_lifetime: cfg::RAY_LIFETIME,
            max_radius: cfg::MAX_RADIUS,
            depth_travel: cfg::DEPTH_TRAVEL,
        }
    }
}

/// A single radiating ray. Immutable once spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstRay {
    /// Direction in the burst plane (radians)
    pub angle: f32,
    /// Hue in degrees
    pub hue: f32,
    /// Effect time at which the ray was spawned
    pub spawned_at: f32,
}

impl BurstRay {
    pub fn age(&self, now: f32) -> f32 {
        (now - self.spawned_at).max(0.0)
    }

    /// Normalized age in `[0, 1]`.
    pub fn life_fraction(&self, now: f32, lifetime: f32) -> f32 {
        (self.age(now) / lifetime).clamp(0.0, 1.0)
    }

    /// Quadratic ease-in radius.
    pub fn radius(&self, now: f32, settings: &BurstSettings) -> f32 {
        let f = self.life_fraction(now, settings.ray_lifetime);
        settings.max_radius * f * f
    }

    /// Tip of the ray relative to the burst center.
    pub fn tip(&self, now: f32, settings: &BurstSettings) -> Vec3 {
        let radius = self.radius(now, settings);
        let depth = self.life_fraction(now, settings.ray_lifetime) * settings.depth_travel;
        Vec3::new(self.angle.cos() * radius, self.angle.sin() * radius, depth)
    }
}

/// Cumulative number of rays due at time fraction `t`: `floor(M * t^3)`.
pub fn spawn_target(max_rays: usize, t: f32) -> usize {
    let t = t.clamp(0.0, 1.0);
    (max_rays as f32 * t * t * t).floor() as usize
}

/// Running burst effect
pub struct BurstEffect {
    settings: BurstSettings,
    elapsed: f32,
    spawned: usize,
    rays: VecDeque<BurstRay>,
    on_progress: Option<ProgressCallback>,
    on_complete: Option<CompletionCallback>,
    completed: bool,
}

impl BurstEffect {
    pub fn new(settings: BurstSettings) -> Self {
        info!(
            "[Burst] Started: {} rays over {:.1}s",
            settings.max_rays, settings.duration
        );
        Self {
            settings,
            elapsed: 0.0,
            spawned: 0,
            rays: VecDeque::with_capacity(settings.max_rays),
            on_progress: None,
            on_complete: None,
            completed: false,
        }
    }

    pub fn on_progress(mut self, callback: impl FnMut(f32) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn settings(&self) -> &BurstSettings {
        &self.settings
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Time fraction of the spawn window, clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.settings.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.settings.duration).min(1.0)
    }

    /// Full-frame overlay opacity, a linear ramp over the duration.
    pub fn overlay_opacity(&self) -> f32 {
        self.progress()
    }

    pub fn spawned(&self) -> usize {
        self.spawned
    }

    /// Live rays, oldest first.
    pub fn rays(&self) -> impl Iterator<Item = &BurstRay> {
        self.rays.iter()
    }

    pub fn active_count(&self) -> usize {
        self.rays.len()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Advances the effect by `dt` seconds.
    pub fn update(&mut self, dt: f32, rng: &mut impl RandomSource) {
        if self.completed {
            return;
        }
        self.elapsed += dt;
        let t = self.progress();

        let due = spawn_target(self.settings.max_rays, t);
        while self.spawned < due {
            self.rays.push_back(BurstRay {
                angle: rng.next_range(0.0, TAU),
                hue: rng.next_range(0.0, 360.0),
                spawned_at: self.elapsed,
            });
            self.spawned += 1;
        }

        let lifetime = self.settings.ray_lifetime;
        let now = self.elapsed;
        while self.rays.front().is_some_and(|ray| ray.age(now) >= lifetime) {
            self.rays.pop_front();
        }

        if let Some(callback) = self.on_progress.as_mut() {
            callback(t);
        }

        if self.elapsed >= self.settings.duration && self.rays.is_empty() {
            self.completed = true;
            info!("[Burst] Complete after {:.2}s", self.elapsed);
            if let Some(callback) = self.on_complete.take() {
                callback();
            }
        }
    }
}
