//! Topo Backdrop entry point
//!
//! The browser build is driven from JS through `platform::web::Backdrop`.
//! Natively this runs the frame loop headless and logs what each frame
//! would draw.

#[cfg(not(target_arch = "wasm32"))]
use topo_backdrop::renderer::{Frame, Layer};
#[cfg(not(target_arch = "wasm32"))]
use topo_backdrop::{BackdropConfig, DisplayMode, FrameLoop, FrameSink};

/// Logs per-frame draw statistics at a fixed interval
#[cfg(not(target_arch = "wasm32"))]
struct StatsSink {
    frames: u64,
    report_every: u64,
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameSink for StatsSink {
    fn resize(&mut self, width: u32, height: u32) {
        log::info!("Backing store {}x{}", width, height);
    }

    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        if self.frames % self.report_every != 0 {
            return;
        }
        let count = |layer| frame.pass(layer).map_or(0, |p| p.vertices.len());
        log::info!(
            "frame {:>4}: {:>5} segments, {:>6} contour verts, {:>4} spotlight verts, {:>5} star verts",
            self.frames,
            frame.segment_count,
            count(Layer::Contours),
            count(Layer::Spotlight),
            count(Layer::Stars),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Topo Backdrop (native, headless) starting...");
    log::info!("Build for wasm32 to render with WebGPU");

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match BackdropConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Invalid config {}: {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Failed to read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => BackdropConfig::default(),
    };

    let sink = StatsSink {
        frames: 0,
        report_every: 60,
    };
    let mut frame_loop = FrameLoop::new(config, 42, sink);
    frame_loop.resize(1280.0, 720.0, 1.0);
    frame_loop.pointer_moved(640.0, 360.0);

    for tick in 0..600u32 {
        // A few clicks early on, then leave the home view
        match tick {
            30 | 90 | 150 => frame_loop.pointer_down(320.0 + tick as f32, 240.0),
            360 => frame_loop.set_display_mode(DisplayMode::Projects),
            _ => {}
        }
        frame_loop.step();
    }

    frame_loop.stop();
    log::info!(
        "{} ripples live, visibility {:.3}",
        frame_loop.state.ripples.len(),
        frame_loop.state.visibility.value()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point lives in the library (platform::web)
}
