//! Backdrop configuration
//!
//! Every tunable constant of the renderer lives here. The host may pass a
//! partial JSON object; missing fields take their defaults.

use serde::{Deserialize, Serialize};

/// Base terrain and ripple wave parameters for the field sampler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Spatial scale of the coarse drift terms
    pub scale: f32,
    /// Wave number of a ripple (radians per unit distance)
    pub ripple_frequency: f32,
    /// Phase advance of a ripple per tick of age
    pub ripple_speed: f32,
    /// Age decay constant (ticks) of the ripple envelope
    pub ripple_decay: f32,
    /// Distance beyond which a ripple contributes nothing
    pub ripple_max_radius: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            scale: 550.0,
            ripple_frequency: 0.025,
            ripple_speed: 0.1,
            ripple_decay: 120.0,
            ripple_max_radius: 800.0,
        }
    }
}

/// Ripple registry bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    /// Age (ticks) at which a source expires
    pub lifetime: u32,
    /// Maximum number of live sources
    pub max_sources: usize,
    /// Initial strength of a spawned source
    pub strength: f32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            lifetime: 300,
            max_sources: 9,
            strength: 4.0,
        }
    }
}

/// Marching squares grid and stroke parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Grid spacing in logical pixels
    pub cell_size: f32,
    /// Ordered iso-values
    pub thresholds: Vec<f32>,
    /// Opacity of the first threshold's lines
    pub base_opacity: f32,
    /// Opacity added per threshold index
    pub opacity_step: f32,
    /// Stroke width in logical pixels
    pub line_width: f32,
    /// Visibility at or below which no contour work is done
    pub min_visibility: f32,
}

impl ContourConfig {
    /// Line opacity for the threshold at `index`, before visibility scaling
    pub fn opacity(&self, index: usize) -> f32 {
        self.base_opacity + index as f32 * self.opacity_step
    }
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            cell_size: 22.0,
            thresholds: vec![-0.6, -0.2, 0.2, 0.6, 1.0],
            base_opacity: 0.03,
            opacity_step: 0.015,
            line_width: 1.0,
            min_visibility: 0.01,
        }
    }
}

/// Smallest accepted `area_per_star`; keeps the particle count bounded
pub const MIN_AREA_PER_STAR: f32 = 100.0;

/// Starfield population parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Viewport area (square logical pixels) per particle
    pub area_per_star: f32,
    /// Maximum absolute drift per tick on each axis
    pub max_drift: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            area_per_star: 7000.0,
            max_drift: 0.075,
            min_size: 0.5,
            max_size: 2.0,
        }
    }
}

/// Cursor highlight parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    pub radius: f32,
    /// RGBA at the centre; the rim is fully transparent
    pub color: [f32; 4],
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            radius: 500.0,
            color: [99.0 / 255.0, 102.0 / 255.0, 241.0 / 255.0, 0.06],
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub field: FieldConfig,
    pub ripples: RippleConfig,
    pub contours: ContourConfig,
    pub starfield: StarfieldConfig,
    pub spotlight: SpotlightConfig,
    /// Global time advance per tick
    pub time_step: f32,
    /// Exponential smoothing factor of the contour visibility
    pub visibility_smoothing: f32,
    /// Clear colour (RGBA)
    pub background: [f32; 4],
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            ripples: RippleConfig::default(),
            contours: ContourConfig::default(),
            starfield: StarfieldConfig::default(),
            spotlight: SpotlightConfig::default(),
            time_step: 0.02,
            visibility_smoothing: 0.05,
            // #030712
            background: [3.0 / 255.0, 7.0 / 255.0, 18.0 / 255.0, 1.0],
        }
    }
}

impl BackdropConfig {
    /// Parse a (possibly partial) JSON object and sanitize it
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validate())
    }

    /// Replace values the per-tick path cannot work with by their defaults
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();

        if !(self.contours.cell_size.is_finite() && self.contours.cell_size > 0.0) {
            log::warn!(
                "Invalid cell size {}, using {}",
                self.contours.cell_size,
                defaults.contours.cell_size
            );
            self.contours.cell_size = defaults.contours.cell_size;
        }

        if self.contours.thresholds.iter().any(|t| !t.is_finite())
            || !self.contours.thresholds.is_sorted()
        {
            log::warn!("Thresholds must be finite and ascending, using defaults");
            self.contours.thresholds = defaults.contours.thresholds.clone();
        }

        if self.ripples.lifetime == 0 {
            log::warn!("Ripple lifetime of 0 ticks, using {}", defaults.ripples.lifetime);
            self.ripples.lifetime = defaults.ripples.lifetime;
        }

        if self.ripples.max_sources == 0 {
            log::warn!(
                "Ripple bound of 0 sources, using {}",
                defaults.ripples.max_sources
            );
            self.ripples.max_sources = defaults.ripples.max_sources;
        }

        if !(self.field.ripple_decay.is_finite() && self.field.ripple_decay > 0.0) {
            self.field.ripple_decay = defaults.field.ripple_decay;
        }

        if !(self.field.ripple_max_radius.is_finite() && self.field.ripple_max_radius > 0.0) {
            self.field.ripple_max_radius = defaults.field.ripple_max_radius;
        }

        if !(0.0..=1.0).contains(&self.visibility_smoothing) {
            log::warn!(
                "Visibility smoothing {} outside [0, 1], using {}",
                self.visibility_smoothing,
                defaults.visibility_smoothing
            );
            self.visibility_smoothing = defaults.visibility_smoothing;
        }

        if !(self.time_step.is_finite() && self.time_step >= 0.0) {
            log::warn!("Invalid time step {}, using {}", self.time_step, defaults.time_step);
            self.time_step = defaults.time_step;
        }

        if !(self.field.scale.is_finite() && self.field.scale > 0.0) {
            self.field.scale = defaults.field.scale;
        }

        if !self.field.ripple_frequency.is_finite() {
            self.field.ripple_frequency = defaults.field.ripple_frequency;
        }

        if !self.field.ripple_speed.is_finite() {
            self.field.ripple_speed = defaults.field.ripple_speed;
        }

        if !(self.starfield.area_per_star.is_finite()
            && self.starfield.area_per_star >= MIN_AREA_PER_STAR)
        {
            log::warn!(
                "Area per star {} below {}, using {}",
                self.starfield.area_per_star,
                MIN_AREA_PER_STAR,
                defaults.starfield.area_per_star
            );
            self.starfield.area_per_star = defaults.starfield.area_per_star;
        }

        if !self.starfield.max_drift.is_finite() {
            self.starfield.max_drift = defaults.starfield.max_drift;
        }

        if !(self.starfield.min_size.is_finite() && self.starfield.max_size.is_finite()) {
            self.starfield.min_size = defaults.starfield.min_size;
            self.starfield.max_size = defaults.starfield.max_size;
        }

        if self.starfield.min_size > self.starfield.max_size {
            std::mem::swap(&mut self.starfield.min_size, &mut self.starfield.max_size);
        }

        self
    }

    /// Line opacity for the threshold at `index`, before visibility scaling
    pub fn contour_opacity(&self, index: usize) -> f32 {
        self.contours.opacity(index)
    }
}
