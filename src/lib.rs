//! Topo Backdrop - animated topographic background
//!
//! Core modules:
//! - `sim`: Deterministic simulation (field, ripples, contours, stars)
//! - `renderer`: Frame composition and the WebGPU pipeline
//! - `platform`: Frame loop and browser host
//! - `config`: Tunable constants, loadable from JSON

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::BackdropConfig;
pub use error::SetupError;
pub use platform::{FrameLoop, FrameSink, NullSink};
pub use sim::{BackdropState, DisplayMode};
