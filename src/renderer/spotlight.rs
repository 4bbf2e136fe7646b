//! Cursor-centred radial highlight
//!
//! Drawn on every view regardless of contour visibility.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::config::SpotlightConfig;
use crate::sim::PointerState;

/// Rim subdivision; the gradient is smooth enough at this count
const SEGMENTS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spotlight {
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

impl Spotlight {
    /// None until the pointer has moved onto the page
    pub fn for_pointer(pointer: &PointerState, config: &SpotlightConfig) -> Option<Self> {
        if !pointer.is_placed() || config.radius <= 0.0 {
            return None;
        }
        Some(Self {
            center: Vec2::new(pointer.x, pointer.y),
            radius: config.radius,
            color: config.color,
        })
    }

    pub fn append_vertices(&self, out: &mut Vec<Vertex>) {
        // Same hue at the rim so the fade only touches alpha
        let [r, g, b, _] = self.color;
        shapes::radial_gradient(
            out,
            self.center,
            self.radius,
            self.color,
            colors::with_alpha([r, g, b], 0.0),
            SEGMENTS,
        );
    }
}
