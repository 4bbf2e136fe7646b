//! Marching squares contour extraction
//!
//! The grid covers the viewport with `cell_size` spacing. Samples are taken
//! once per grid corner: the bottom row of one scan becomes the top row of
//! the next, so each corner is sampled exactly once per frame.
//!
//! Corner bits: top-left = 8, top-right = 4, bottom-right = 2,
//! bottom-left = 1. A bit is set when the corner value is strictly above the
//! threshold.

use glam::Vec2;

use super::field::ScalarField;
use crate::config::ContourConfig;

/// A straight piece of an isoline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    #[inline]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }
}

/// All segments for one iso-value
#[derive(Debug, Clone, Default)]
pub struct ContourLayer {
    pub threshold: f32,
    /// Stroke opacity, already scaled by visibility
    pub opacity: f32,
    pub segments: Vec<Segment>,
}

/// Corner values of one cell, clockwise from top-left
#[derive(Debug, Clone, Copy)]
pub struct CellCorners {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CellCorners {
    /// 4-bit classification against `threshold`
    #[inline]
    pub fn classify(&self, threshold: f32) -> u8 {
        let mut index = 0;
        if self.top_left > threshold {
            index |= 8;
        }
        if self.top_right > threshold {
            index |= 4;
        }
        if self.bottom_right > threshold {
            index |= 2;
        }
        if self.bottom_left > threshold {
            index |= 1;
        }
        index
    }
}

/// Fraction of the way from `a` to `b` at which `value` is crossed.
/// Equal endpoints give the midpoint.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < 1e-5 {
        return 0.5;
    }
    (value - a) / (b - a)
}

#[inline]
fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Emit the segments of one cell into `out`. Returns the classification.
///
/// Saddles (5 and 10) always produce two segments joining adjacent edges;
/// the centre of the cell is never sampled.
pub fn march_cell(
    corners: &CellCorners,
    threshold: f32,
    origin: Vec2,
    cell_size: f32,
    out: &mut Vec<Segment>,
) -> u8 {
    let case = corners.classify(threshold);
    if case == 0 || case == 15 {
        return case;
    }

    let CellCorners {
        top_left: v0,
        top_right: v1,
        bottom_right: v2,
        bottom_left: v3,
    } = *corners;
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (x0 + cell_size, y0 + cell_size);

    // Edge crossings: top, right, bottom, left
    let top = Vec2::new(lerp(x0, x1, inverse_lerp(v0, v1, threshold)), y0);
    let right = Vec2::new(x1, lerp(y0, y1, inverse_lerp(v1, v2, threshold)));
    let bottom = Vec2::new(lerp(x1, x0, inverse_lerp(v2, v3, threshold)), y1);
    let left = Vec2::new(x0, lerp(y1, y0, inverse_lerp(v3, v0, threshold)));

    match case {
        1 | 14 => out.push(Segment::new(left, bottom)),
        2 | 13 => out.push(Segment::new(right, bottom)),
        3 | 12 => out.push(Segment::new(left, right)),
        4 | 11 => out.push(Segment::new(top, right)),
        5 => {
            out.push(Segment::new(top, left));
            out.push(Segment::new(right, bottom));
        }
        6 | 9 => out.push(Segment::new(top, bottom)),
        7 | 8 => out.push(Segment::new(left, top)),
        10 => {
            out.push(Segment::new(top, right));
            out.push(Segment::new(left, bottom));
        }
        _ => unreachable!("classification is a 4-bit value"),
    }
    case
}

/// Grid walker with reusable row buffers
#[derive(Debug, Clone, Default)]
pub struct ContourExtractor {
    current_row: Vec<f32>,
    next_row: Vec<f32>,
    layers: Vec<ContourLayer>,
}

impl ContourExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid dimensions (corner columns, corner rows) for a viewport
    pub fn grid_size(width: f32, height: f32, cell_size: f32) -> (usize, usize) {
        if !(width > 0.0 && height > 0.0 && cell_size > 0.0) {
            return (0, 0);
        }
        let cols = (width / cell_size).ceil() as usize + 1;
        let rows = (height / cell_size).ceil() as usize + 1;
        (cols, rows)
    }

    /// Extract isolines for every threshold in `config`.
    ///
    /// Stroke opacities come from `config` scaled by `visibility`. Nothing
    /// is sampled when `visibility` is at or below `config.min_visibility`,
    /// and the returned slice is empty.
    pub fn extract<F: ScalarField + ?Sized>(
        &mut self,
        field: &F,
        width: f32,
        height: f32,
        config: &ContourConfig,
        visibility: f32,
    ) -> &[ContourLayer] {
        for layer in &mut self.layers {
            layer.segments.clear();
        }

        let cell_size = config.cell_size;
        let (cols, rows) = Self::grid_size(width, height, cell_size);
        if visibility <= config.min_visibility || cols < 2 || rows < 2 || config.thresholds.is_empty()
        {
            self.layers.clear();
            return &self.layers;
        }

        self.layers.resize_with(config.thresholds.len(), ContourLayer::default);
        for (i, (layer, &threshold)) in self.layers.iter_mut().zip(&config.thresholds).enumerate() {
            layer.threshold = threshold;
            layer.opacity = config.opacity(i) * visibility;
        }

        self.current_row.resize(cols, 0.0);
        self.next_row.resize(cols, 0.0);

        for (x, value) in self.current_row.iter_mut().enumerate() {
            *value = field.sample(x as f32 * cell_size, 0.0);
        }

        for y in 0..rows - 1 {
            let y_next = (y + 1) as f32 * cell_size;
            for (x, value) in self.next_row.iter_mut().enumerate() {
                *value = field.sample(x as f32 * cell_size, y_next);
            }

            for layer in self.layers.iter_mut() {
                for x in 0..cols - 1 {
                    let corners = CellCorners {
                        top_left: self.current_row[x],
                        top_right: self.current_row[x + 1],
                        bottom_right: self.next_row[x + 1],
                        bottom_left: self.next_row[x],
                    };
                    let origin = Vec2::new(x as f32 * cell_size, y as f32 * cell_size);
                    march_cell(&corners, layer.threshold, origin, cell_size, &mut layer.segments);
                }
            }

            std::mem::swap(&mut self.current_row, &mut self.next_row);
        }

        &self.layers
    }

    /// Layers from the most recent extraction
    pub fn layers(&self) -> &[ContourLayer] {
        &self.layers
    }

    /// Total segment count of the most recent extraction
    pub fn segment_count(&self) -> usize {
        self.layers.iter().map(|l| l.segments.len()).sum()
    }
}
