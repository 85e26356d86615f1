//! Canvas fallback for videos with alpha channel.
//!
//! Browsers without support for transparent WebM show a black background behind the video. In
//! that case the frames are drawn onto a canvas with alpha channel laid over the video element.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gloo_events::EventListener;
use gloo_render::{AnimationFrame, request_animation_frame};
use gloo_utils::{document, window};
use log::{debug, warn};
use setpace_domain::{
    CanvasVideoConfig, Capabilities, MemoryStatus, OptimizationConfig, PerformanceMetrics,
    Quality, Renderer,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlVideoElement};

const HAVE_CURRENT_DATA: u16 = 2;
const TRANSPARENT_WEBM: &str = r#"video/webm; codecs="vp8""#;
const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    #[error("canvas 2D context not supported")]
    NoContext,
    #[error("video element is not attached to the document")]
    Detached,
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        CanvasError::Js(format!("{value:?}"))
    }
}

/// Rendering capabilities of the current browser.
pub struct BrowserCapabilities;

impl Capabilities for BrowserCapabilities {
    fn supports_transparent_video(&self) -> bool {
        document()
            .create_element("video")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlVideoElement>().ok())
            .is_some_and(|video| !video.can_play_type(TRANSPARENT_WEBM).is_empty())
    }

    fn has_alpha_canvas(&self) -> bool {
        document()
            .create_element("canvas")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
            .is_some_and(|canvas| context_2d(&canvas, true).is_ok())
    }
}

/// Prepares a video element for showing an alpha channel.
pub fn configure_video_for_transparency(video: &HtmlVideoElement) -> Result<(), JsValue> {
    set_transparent_style(video)?;
    video.set_attribute("preload", "metadata")?;
    video.set_attribute("playsinline", "true")?;
    video.set_attribute("webkit-playsinline", "true")?;
    Ok(())
}

/// Mirrors a video element onto a canvas while the video is playing.
///
/// The canvas is inserted next to the video, which is hidden while the fallback exists. The canvas
/// is removed when the fallback is dropped.
pub struct CanvasVideoFallback {
    state: Rc<State>,
    _listeners: Vec<EventListener>,
}

struct State {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    renderer: RefCell<Renderer>,
    frame: RefCell<Option<AnimationFrame>>,
    applied_quality: Cell<Option<Quality>>,
}

impl CanvasVideoFallback {
    pub fn new(video: &HtmlVideoElement, config: CanvasVideoConfig) -> Result<Self, CanvasError> {
        let parent = video.parent_node().ok_or(CanvasError::Detached)?;
        let canvas = document()
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| CanvasError::Js("failed to create canvas".to_string()))?;
        let context = context_2d(&canvas, config.preserve_transparency)?;

        set_transparent_style(&canvas)?;
        let style = canvas.style();
        style.set_property("position", "absolute")?;
        style.set_property("top", "0")?;
        style.set_property("left", "0")?;
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        style.set_property("pointer-events", "none")?;
        parent.insert_before(&canvas, video.next_sibling().as_ref())?;
        video.style().set_property("opacity", "0")?;

        let state = Rc::new(State {
            video: video.clone(),
            canvas,
            context,
            renderer: RefCell::new(Renderer::new(
                OptimizationConfig::from(config),
                config.quality,
            )),
            frame: RefCell::new(None),
            applied_quality: Cell::new(None),
        });
        let listeners = state.install_listeners();

        if video.ready_state() >= HAVE_CURRENT_DATA && !video.paused() {
            state.start();
        }

        Ok(Self {
            state,
            _listeners: listeners,
        })
    }

    /// Returns `false` if rendering was already active.
    pub fn start(&self) -> bool {
        self.state.start()
    }

    /// Returns `false` if rendering was not active.
    pub fn stop(&self) -> bool {
        self.state.stop()
    }

    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.state.renderer.borrow().is_rendering()
    }

    #[must_use]
    pub fn metrics(&self) -> PerformanceMetrics {
        self.state.renderer.borrow().metrics()
    }
}

impl Drop for CanvasVideoFallback {
    fn drop(&mut self) {
        self.state.stop();
        self.state.canvas.remove();
        if let Err(err) = self.state.video.style().remove_property("opacity") {
            debug!("failed to restore video opacity: {err:?}");
        }
        let metrics = self.state.renderer.borrow().metrics();
        debug!(
            "canvas fallback removed after {} frames (avg render time {:.1} ms)",
            metrics.frames, metrics.render_time
        );
    }
}

impl State {
    fn install_listeners(self: &Rc<Self>) -> Vec<EventListener> {
        let mut listeners = Vec::new();

        let state = Rc::clone(self);
        listeners.push(EventListener::new(&self.video, "loadeddata", move |_| {
            if state.video.ready_state() >= HAVE_CURRENT_DATA {
                state.start();
            }
        }));

        let state = Rc::clone(self);
        listeners.push(EventListener::new(&self.video, "play", move |_| {
            state.start();
        }));

        for event_type in ["pause", "ended"] {
            let state = Rc::clone(self);
            listeners.push(EventListener::new(&self.video, event_type, move |_| {
                state.stop();
            }));
        }

        for event_type in ["resize", "loadedmetadata"] {
            let state = Rc::clone(self);
            listeners.push(EventListener::new(&self.video, event_type, move |_| {
                state.resize();
            }));
        }

        listeners
    }

    fn start(self: &Rc<Self>) -> bool {
        if !self.renderer.borrow_mut().start() {
            return false;
        }
        self.resize();
        self.schedule_frame();
        true
    }

    fn stop(&self) -> bool {
        let stopped = self.renderer.borrow_mut().stop();
        self.frame.borrow_mut().take();
        if stopped {
            self.clear();
        }
        stopped
    }

    fn schedule_frame(self: &Rc<Self>) {
        let state = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            state.frame.borrow_mut().take();
            state.render(timestamp);
            if state.renderer.borrow().is_rendering() {
                state.schedule_frame();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn resize(&self) {
        let (width, height) = (self.video.video_width(), self.video.video_height());
        if width == 0 || height == 0 {
            return;
        }
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            // Resizing resets the context state.
            self.applied_quality.set(None);
        }
    }

    fn render(&self, timestamp: f64) {
        let Some(quality) = self.renderer.borrow_mut().begin_frame(timestamp) else {
            return;
        };
        let started = now();

        self.apply_quality(quality);
        self.clear();
        if self.video.ready_state() >= HAVE_CURRENT_DATA {
            if let Err(err) = self
                .context
                .draw_image_with_html_video_element_and_dw_and_dh(
                    &self.video,
                    0.,
                    0.,
                    f64::from(self.canvas.width()),
                    f64::from(self.canvas.height()),
                )
            {
                debug!("failed to draw video frame: {err:?}");
            }
        }

        let status =
            self.renderer
                .borrow_mut()
                .end_frame(timestamp, now() - started, used_heap_size());
        if let MemoryStatus::OverBudget { cleanup: true } = status {
            let used = self.renderer.borrow().metrics().memory_usage.unwrap_or_default();
            warn!(
                "canvas renderer exceeds memory budget ({} MB used)",
                used / BYTES_PER_MEGABYTE
            );
        }
    }

    fn apply_quality(&self, quality: Quality) {
        if self.applied_quality.get() == Some(quality) {
            return;
        }
        self.context
            .set_image_smoothing_enabled(quality.smoothing_enabled());
        if quality.smoothing_enabled() {
            if let Err(err) = js_sys::Reflect::set(
                &self.context,
                &JsValue::from_str("imageSmoothingQuality"),
                &JsValue::from_str(&quality.to_string()),
            ) {
                debug!("failed to set image smoothing quality: {err:?}");
            }
        }
        self.applied_quality.set(Some(quality));
    }

    fn clear(&self) {
        self.context.clear_rect(
            0.,
            0.,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }
}

fn context_2d(
    canvas: &HtmlCanvasElement,
    alpha: bool,
) -> Result<CanvasRenderingContext2d, CanvasError> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::from_bool(alpha))?;
    canvas
        .get_context_with_context_options("2d", &options)?
        .ok_or(CanvasError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| CanvasError::NoContext)
}

fn set_transparent_style(element: &HtmlElement) -> Result<(), JsValue> {
    let style = element.style();
    style.set_property("background-color", "transparent")?;
    style.set_property("background", "transparent")?;
    style.set_property("mix-blend-mode", "normal")?;
    style.set_property("isolation", "isolate")?;
    Ok(())
}

fn now() -> f64 {
    window()
        .performance()
        .map_or(0., |performance| performance.now())
}

/// Heap usage reported by the non-standard `performance.memory` API.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn used_heap_size() -> Option<u64> {
    let performance = window().performance()?;
    let memory = js_sys::Reflect::get(&performance, &JsValue::from_str("memory")).ok()?;
    if memory.is_undefined() || memory.is_null() {
        return None;
    }
    js_sys::Reflect::get(&memory, &JsValue::from_str("usedJSHeapSize"))
        .ok()?
        .as_f64()
        .map(|bytes| bytes as u64)
}
