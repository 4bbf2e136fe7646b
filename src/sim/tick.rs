//! Per-refresh simulation tick
//!
//! Advances time, ages ripples, moves the visibility toward the display
//! mode's target and drifts the starfield. Drawing happens elsewhere.

use super::state::BackdropState;
use super::visibility::Visibility;

/// Advance the backdrop by one display refresh
pub fn tick(state: &mut BackdropState) {
    // Derived from the tick count so long sessions never stall on f32 rounding
    state.time_ticks += 1;
    state.time = (state.time_ticks as f64 * state.config.time_step as f64) as f32;

    state.ripples.tick();

    let target = Visibility::target_for(state.display_mode);
    state
        .visibility
        .update(target, state.config.visibility_smoothing);

    state.stars.advance();
}
