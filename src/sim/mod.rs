//! Backdrop simulation module
//!
//! Everything here is pure and free of GPU or browser dependencies:
//! - One tick per display refresh
//! - Seeded RNG only
//! - Drawing reads this state but never writes it

pub mod contour;
pub mod field;
pub mod ripple;
pub mod starfield;
pub mod state;
pub mod tick;
pub mod visibility;

pub use contour::{CellCorners, ContourExtractor, ContourLayer, Segment, inverse_lerp, march_cell};
pub use field::{FieldSampler, ScalarField, base_terrain};
pub use ripple::{RippleRegistry, RippleSource};
pub use starfield::{StarColor, StarParticle, Starfield, star_count};
pub use state::{BackdropState, DisplayMode, POINTER_SENTINEL, PointerState, Viewport};
pub use tick::tick;
pub use visibility::{SETTLED_EPSILON, Visibility};
