//! Rendering module
//!
//! `frame` turns simulation state into an ordered list of triangle passes;
//! `pipeline` draws that list with WebGPU.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod spotlight;
pub mod vertex;

pub use frame::{DrawPass, Frame, Layer, compose};
pub use pipeline::RenderState;
pub use spotlight::Spotlight;
pub use vertex::Vertex;
