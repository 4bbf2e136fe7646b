//! Platform abstraction layer
//!
//! [`FrameLoop`] is the host-independent frame scheduler: one `step` per
//! display refresh ticks the simulation, composes the frame and hands it to
//! a [`FrameSink`]. The host only decides *when* to call `step`:
//! `requestAnimationFrame` in the browser, a plain loop on native.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::config::BackdropConfig;
use crate::renderer::frame::{Frame, compose};
use crate::sim::{BackdropState, ContourExtractor, DisplayMode, tick};

/// Consumer of composed frames
pub trait FrameSink {
    /// Backing store changed; `width`/`height` are device pixels
    fn resize(&mut self, _width: u32, _height: u32) {}

    fn present(&mut self, frame: &Frame);
}

/// Discards frames; useful when only the simulation matters
#[derive(Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &Frame) {}
}

/// Single-threaded tick/compose/present driver
pub struct FrameLoop<S: FrameSink> {
    pub state: BackdropState,
    extractor: ContourExtractor,
    sink: S,
    running: bool,
}

impl<S: FrameSink> FrameLoop<S> {
    pub fn new(config: BackdropConfig, seed: u64, sink: S) -> Self {
        Self {
            state: BackdropState::new(config, seed),
            extractor: ContourExtractor::new(),
            sink,
            running: true,
        }
    }

    /// Run one display refresh. Returns false once stopped.
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }
        tick(&mut self.state);
        let frame = compose(&self.state, &mut self.extractor);
        self.sink.present(&frame);
        true
    }

    /// Viewport changed (logical pixels and device pixel ratio)
    pub fn resize(&mut self, width: f32, height: f32, scale_factor: f32) {
        self.state.resize(width, height, scale_factor);
        let (w, h) = self.state.viewport.backing_size();
        self.sink.resize(w, h);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.state.pointer_moved(x, y);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.state.pointer_down(x, y);
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.state.set_display_mode(mode);
    }

    /// No further steps run after this
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Frame loop stopped after {} ticks", self.state.time_ticks);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
