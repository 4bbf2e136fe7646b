//! Backdrop state and input events
//!
//! Everything the per-tick simulation reads or writes lives in
//! [`BackdropState`]. Event handlers mutate it directly; the next tick sees
//! the result.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::FieldSampler;
use super::ripple::RippleRegistry;
use super::starfield::Starfield;
use super::visibility::Visibility;
use crate::config::BackdropConfig;

/// The host page's current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Home,
    Projects,
    About,
    Blog,
    Contact,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Home => "home",
            DisplayMode::Projects => "projects",
            DisplayMode::About => "about",
            DisplayMode::Blog => "blog",
            DisplayMode::Contact => "contact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "home" => Some(DisplayMode::Home),
            "projects" => Some(DisplayMode::Projects),
            "about" => Some(DisplayMode::About),
            "blog" => Some(DisplayMode::Blog),
            "contact" => Some(DisplayMode::Contact),
            _ => None,
        }
    }

    /// Only the home view shows contours and accepts ripples
    #[inline]
    pub fn is_home(&self) -> bool {
        *self == DisplayMode::Home
    }
}

/// Sentinel coordinate before the first pointer movement
pub const POINTER_SENTINEL: f32 = -1000.0;

/// Last known pointer position in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            x: POINTER_SENTINEL,
            y: POINTER_SENTINEL,
        }
    }
}

impl PointerState {
    /// False until the pointer has moved onto the page
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.x > -100.0
    }
}

/// Logical viewport size and backing-store scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixels per logical pixel
    pub scale_factor: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            scale_factor: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self {
            width: sanitize(width),
            height: sanitize(height),
            scale_factor,
        }
    }

    /// Backing-store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.scale_factor).round() as u32,
            (self.height * self.scale_factor).round() as u32,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Complete renderer state
#[derive(Debug, Clone)]
pub struct BackdropState {
    pub config: BackdropConfig,
    /// Global field time
    pub time: f32,
    /// Ticks since start
    pub time_ticks: u64,
    pub display_mode: DisplayMode,
    pub ripples: RippleRegistry,
    pub visibility: Visibility,
    pub pointer: PointerState,
    pub viewport: Viewport,
    pub stars: Starfield,
    rng: Pcg32,
}

impl BackdropState {
    /// Create an empty-viewport state; call [`BackdropState::resize`] before
    /// the first tick
    pub fn new(config: BackdropConfig, seed: u64) -> Self {
        let config = config.validate();
        Self {
            ripples: RippleRegistry::new(&config.ripples),
            config,
            time: 0.0,
            time_ticks: 0,
            display_mode: DisplayMode::Home,
            visibility: Visibility::new(0.0),
            pointer: PointerState::default(),
            viewport: Viewport::default(),
            stars: Starfield::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Viewport changed: recompute backing size and respawn the starfield
    pub fn resize(&mut self, width: f32, height: f32, scale_factor: f32) {
        self.viewport = Viewport::new(width, height, scale_factor);
        self.stars.regenerate(
            self.viewport.width,
            self.viewport.height,
            &self.config.starfield,
            &mut self.rng,
        );
        log::debug!(
            "Resized to {}x{} @{}x, {} stars",
            self.viewport.width,
            self.viewport.height,
            self.viewport.scale_factor,
            self.stars.len()
        );
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = PointerState { x, y };
    }

    /// Click: spawn a ripple, but only on the home view
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if !self.display_mode.is_home() {
            return false;
        }
        self.ripples.spawn(x, y);
        true
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if mode != self.display_mode {
            log::info!(
                "Display mode {} -> {}",
                self.display_mode.as_str(),
                mode.as_str()
            );
            self.display_mode = mode;
        }
    }

    /// The scalar field at the current time
    pub fn field(&self) -> FieldSampler<'_> {
        FieldSampler::new(self.time, &self.config.field, &self.ripples)
    }
}
