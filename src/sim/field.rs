//! Scalar field sampler
//!
//! A slowly drifting sinusoidal terrain plus the superposed ripple waves.
//! Sampling is pure: the same position, time and ripple set always give the
//! same value.

use glam::Vec2;

use super::ripple::RippleRegistry;
use crate::config::FieldConfig;

/// Anything the contour extractor can sample
pub trait ScalarField {
    fn sample(&self, x: f32, y: f32) -> f32;
}

impl<F: Fn(f32, f32) -> f32> ScalarField for F {
    #[inline]
    fn sample(&self, x: f32, y: f32) -> f32 {
        self(x, y)
    }
}

/// Drift terms only (no ripples)
#[inline]
pub fn base_terrain(x: f32, y: f32, t: f32, scale: f32) -> f32 {
    ((x + t * 1.5) / scale).sin() * 1.0
        + ((y - t * 2.5) / (scale * 1.2)).cos() * 0.8
        + ((x * 0.2 + y * 0.1 + t * 0.5) / 200.0).sin() * 0.4
}

/// The field at one instant
#[derive(Debug, Clone, Copy)]
pub struct FieldSampler<'a> {
    pub time: f32,
    pub params: &'a FieldConfig,
    pub ripples: &'a RippleRegistry,
}

impl<'a> FieldSampler<'a> {
    pub fn new(time: f32, params: &'a FieldConfig, ripples: &'a RippleRegistry) -> Self {
        Self {
            time,
            params,
            ripples,
        }
    }

    /// Sum of every live ripple's contribution at `pos`
    pub fn ripple_term(&self, pos: Vec2) -> f32 {
        let lifetime = self.ripples.lifetime();
        self.ripples
            .iter()
            .map(|r| r.contribution(pos, self.params, lifetime))
            .sum()
    }
}

impl ScalarField for FieldSampler<'_> {
    fn sample(&self, x: f32, y: f32) -> f32 {
        base_terrain(x, y, self.time, self.params.scale) + self.ripple_term(Vec2::new(x, y))
    }
}
