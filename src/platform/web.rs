//! Browser host
//!
//! Owns the `requestAnimationFrame` loop and the window listeners. Handlers
//! mutate the shared [`FrameLoop`] synchronously and return; the next frame
//! observes the change. `dispose` cancels the pending frame and detaches
//! every listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::{FrameLoop, FrameSink};
use crate::config::BackdropConfig;
use crate::error::SetupError;
use crate::renderer::RenderState;
use crate::renderer::frame::Frame;
use crate::sim::DisplayMode;

#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already initialized by the host page
    }
}

/// Draws frames to the canvas through WebGPU
struct GpuSink {
    canvas: HtmlCanvasElement,
    render_state: RenderState,
}

impl FrameSink for GpuSink {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.render_state.resize(width, height);
    }

    fn present(&mut self, frame: &Frame) {
        match self.render_state.render(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

struct Runtime {
    frame_loop: FrameLoop<GpuSink>,
    raf_id: Option<i32>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A window listener that can be detached again
struct Listener {
    target: web_sys::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn attach(
        target: &web_sys::EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Self {
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// JS handle to a running backdrop
#[wasm_bindgen]
pub struct Backdrop {
    runtime: Rc<RefCell<Runtime>>,
    frame_callback: FrameCallback,
    listeners: Vec<Listener>,
    disposed: bool,
}

#[wasm_bindgen]
impl Backdrop {
    /// Attach to the canvas with id `canvas_id` and start animating.
    /// `config_json` may override any subset of the configuration.
    pub async fn start(canvas_id: String, config_json: Option<String>) -> Result<Backdrop, JsValue> {
        match setup(&canvas_id, config_json.as_deref()).await {
            Ok(backdrop) => Ok(backdrop),
            Err(e) => {
                log::error!("Backdrop setup failed: {}", e);
                Err(JsValue::from_str(&e.to_string()))
            }
        }
    }

    /// Switch the view; returns false for unknown names
    #[wasm_bindgen(js_name = setDisplayMode)]
    pub fn set_display_mode(&self, name: &str) -> bool {
        match DisplayMode::from_str(name) {
            Some(mode) => {
                self.runtime.borrow_mut().frame_loop.set_display_mode(mode);
                true
            }
            None => {
                log::warn!("Unknown display mode '{}'", name);
                false
            }
        }
    }

    /// Stop the frame loop and remove every listener
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        {
            let mut runtime = self.runtime.borrow_mut();
            runtime.frame_loop.stop();
            if let (Some(window), Some(id)) = (web_sys::window(), runtime.raf_id.take()) {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Breaks the callback's reference to itself
        self.frame_callback.borrow_mut().take();

        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        log::info!("Backdrop disposed");
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Logical window size and device pixel ratio
fn window_metrics(window: &web_sys::Window) -> (f32, f32, f32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let dpr = window.device_pixel_ratio();
    (width as f32, height as f32, dpr as f32)
}

fn apply_resize(window: &web_sys::Window, runtime: &RefCell<Runtime>) {
    let (width, height, dpr) = window_metrics(window);
    let mut runtime = runtime.borrow_mut();
    let canvas = &runtime.frame_loop.sink().canvas;
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{width}px"));
    let _ = style.set_property("height", &format!("{height}px"));
    runtime.frame_loop.resize(width, height, dpr);
}

fn request_frame(window: &web_sys::Window, callback: &FrameCallback) -> Option<i32> {
    let callback = callback.borrow();
    let closure = callback.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

async fn setup(canvas_id: &str, config_json: Option<&str>) -> Result<Backdrop, SetupError> {
    let config = match config_json {
        Some(json) => BackdropConfig::from_json(json)?,
        None => BackdropConfig::default(),
    };

    let window = web_sys::window().ok_or(SetupError::NoWindow)?;
    let document = window.document().ok_or(SetupError::NoDocument)?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| SetupError::CanvasNotFound(canvas_id.to_string()))?
        .dyn_into()
        .map_err(|_| SetupError::NotACanvas(canvas_id.to_string()))?;

    let (width, height, dpr) = window_metrics(&window);
    let backing_w = (width * dpr).round().max(1.0) as u32;
    let backing_h = (height * dpr).round().max(1.0) as u32;
    canvas.set_width(backing_w);
    canvas.set_height(backing_h);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| SetupError::Surface(e.to_string()))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| SetupError::Adapter(e.to_string()))?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let render_state = RenderState::new(surface, &adapter, backing_w, backing_h).await?;

    let seed = js_sys::Date::now() as u64;
    let sink = GpuSink {
        canvas,
        render_state,
    };
    let runtime = Rc::new(RefCell::new(Runtime {
        frame_loop: FrameLoop::new(config, seed, sink),
        raf_id: None,
    }));
    apply_resize(&window, &runtime);

    let listeners = attach_listeners(&window, &runtime);

    let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
    {
        let weak: Weak<RefCell<Runtime>> = Rc::downgrade(&runtime);
        let next = frame_callback.clone();
        *frame_callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            let Some(runtime) = weak.upgrade() else {
                return;
            };
            let mut runtime = runtime.borrow_mut();
            if !runtime.frame_loop.step() {
                runtime.raf_id = None;
                return;
            }
            runtime.raf_id = web_sys::window().and_then(|w| request_frame(&w, &next));
        }));
    }
    runtime.borrow_mut().raf_id = request_frame(&window, &frame_callback);

    log::info!("Backdrop running (seed {})", seed);

    Ok(Backdrop {
        runtime,
        frame_callback,
        listeners,
        disposed: false,
    })
}

fn attach_listeners(window: &web_sys::Window, runtime: &Rc<RefCell<Runtime>>) -> Vec<Listener> {
    let target: &web_sys::EventTarget = window.as_ref();
    let mut listeners = Vec::with_capacity(3);

    // Resize: backing store and starfield follow the window
    {
        let runtime = runtime.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                apply_resize(&window, &runtime);
            }
        });
        listeners.push(Listener::attach(target, "resize", closure));
    }

    // Pointer move: spotlight follows
    {
        let runtime = runtime.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                runtime
                    .borrow_mut()
                    .frame_loop
                    .pointer_moved(event.client_x() as f32, event.client_y() as f32);
            }
        });
        listeners.push(Listener::attach(target, "pointermove", closure));
    }

    // Pointer down: ripple (home view only)
    {
        let runtime = runtime.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                runtime
                    .borrow_mut()
                    .frame_loop
                    .pointer_down(event.client_x() as f32, event.client_y() as f32);
            }
        });
        listeners.push(Listener::attach(target, "pointerdown", closure));
    }

    listeners
}
