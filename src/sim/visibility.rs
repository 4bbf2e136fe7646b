//! Contour layer fade
//!
//! Discrete exponential smoothing toward 1.0 on the home view and 0.0
//! elsewhere. Convergence is geometric with ratio `1 - smoothing` per tick.

use serde::{Deserialize, Serialize};

use super::state::DisplayMode;

/// Distance to target below which the fade counts as finished
pub const SETTLED_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Visibility {
    value: f32,
}

impl Visibility {
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target opacity for a display mode
    pub fn target_for(mode: DisplayMode) -> f32 {
        if mode.is_home() { 1.0 } else { 0.0 }
    }

    /// One smoothing step toward `target`
    pub fn update(&mut self, target: f32, smoothing: f32) {
        self.value += (target - self.value) * smoothing;
        self.value = self.value.clamp(0.0, 1.0);
    }

    pub fn is_settled(&self, target: f32) -> bool {
        (self.value - target).abs() < SETTLED_EPSILON
    }
}
