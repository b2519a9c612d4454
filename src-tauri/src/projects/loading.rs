//! Loading counter shown before the projects panel appears

use serde::Serialize;

use crate::config::projects::LOADING_DURATION;

/// Counts from 0% to 100% over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingGate {
    elapsed: f32,
    duration: f32,
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new(LOADING_DURATION)
    }
}

impl LoadingGate {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration.max(0.0));
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn percent(&self) -> u8 {
        if self.duration <= 0.0 {
            return 100;
        }
        ((self.elapsed / self.duration) * 100.0).round().min(100.0) as u8
    }

    pub fn is_loading(&self) -> bool {
        self.elapsed < self.duration
    }
}

/// Loading snapshot for the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadingView {
    pub percent: u8,
    pub loading: bool,
}

impl From<&LoadingGate> for LoadingView {
    fn from(gate: &LoadingGate) -> Self {
        Self {
            percent: gate.percent(),
            loading: gate.is_loading(),
        }
    }
}
