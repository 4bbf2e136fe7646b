//! Frame composition
//!
//! Turns a [`BackdropState`] into an ordered list of draw passes:
//! background clear, contour lines, spotlight, stars. The list is plain data
//! so the order and content can be checked without a GPU.

use glam::Vec2;

use super::shapes;
use super::spotlight::Spotlight;
use super::vertex::{Vertex, colors};
use crate::sim::{BackdropState, ContourExtractor, ScalarField, Viewport};

/// Stars are tiny; a coarse polygon is indistinguishable from a circle
const STAR_SEGMENTS: u32 = 8;

/// What a pass draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Contours,
    Spotlight,
    Stars,
}

#[derive(Debug, Clone)]
pub struct DrawPass {
    pub layer: Layer,
    /// Triangle list in logical pixels
    pub vertices: Vec<Vertex>,
}

/// Everything needed to redraw the surface once
#[derive(Debug, Clone)]
pub struct Frame {
    pub viewport: Viewport,
    pub clear_color: [f32; 4],
    pub passes: Vec<DrawPass>,
    /// Contour segments before tessellation
    pub segment_count: usize,
}

impl Frame {
    pub fn vertex_count(&self) -> usize {
        self.passes.iter().map(|p| p.vertices.len()).sum()
    }

    /// All vertices in draw order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.passes.iter().flat_map(|p| p.vertices.iter())
    }

    pub fn layers(&self) -> Vec<Layer> {
        self.passes.iter().map(|p| p.layer).collect()
    }

    pub fn pass(&self, layer: Layer) -> Option<&DrawPass> {
        self.passes.iter().find(|p| p.layer == layer)
    }
}

/// Build the draw list for the current state.
///
/// Contour extraction is skipped entirely while the layer is invisible.
pub fn compose(state: &BackdropState, extractor: &mut ContourExtractor) -> Frame {
    let config = &state.config;
    let viewport = state.viewport;
    let mut passes = Vec::with_capacity(3);
    let mut segment_count = 0;

    if !viewport.is_empty() {
        let field = state.field();
        segment_count = contour_pass(state, &field, extractor, &mut passes);

        if let Some(spotlight) = Spotlight::for_pointer(&state.pointer, &config.spotlight) {
            let mut vertices = Vec::new();
            spotlight.append_vertices(&mut vertices);
            passes.push(DrawPass {
                layer: Layer::Spotlight,
                vertices,
            });
        }

        if !state.stars.is_empty() {
            passes.push(DrawPass {
                layer: Layer::Stars,
                vertices: star_vertices(state),
            });
        }
    }

    Frame {
        viewport,
        clear_color: config.background,
        passes,
        segment_count,
    }
}

fn contour_pass<F: ScalarField>(
    state: &BackdropState,
    field: &F,
    extractor: &mut ContourExtractor,
    passes: &mut Vec<DrawPass>,
) -> usize {
    let contours = &state.config.contours;
    let layers = extractor.extract(
        field,
        state.viewport.width,
        state.viewport.height,
        contours,
        state.visibility.value(),
    );

    let segment_count: usize = layers.iter().map(|l| l.segments.len()).sum();
    if segment_count == 0 {
        return 0;
    }

    let mut vertices = Vec::with_capacity(segment_count * 6);
    for layer in layers {
        let color = colors::with_alpha(colors::CONTOUR, layer.opacity);
        for segment in &layer.segments {
            shapes::line(&mut vertices, segment.a, segment.b, contours.line_width, color);
        }
    }
    passes.push(DrawPass {
        layer: Layer::Contours,
        vertices,
    });
    segment_count
}

fn star_vertices(state: &BackdropState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(state.stars.len() * STAR_SEGMENTS as usize * 3);
    for star in &state.stars.particles {
        let color = colors::fade(star.color.rgba(), star.twinkle(state.time));
        shapes::circle(
            &mut vertices,
            Vec2::new(star.x, star.y),
            star.size,
            color,
            STAR_SEGMENTS,
        );
    }
    vertices
}
