//! Frame pacing and quality control for rendering transparent video onto a canvas.
//!
//! All timestamps are milliseconds of a monotonic clock (e.g. `performance.now()`).

use std::collections::VecDeque;

use strum::Display;

/// Number of frames considered for rolling averages.
const WINDOW: usize = 60;
const MIN_QUALITY_CHANGE_INTERVAL_MS: f64 = 2000.;
const MIN_CLEANUP_INTERVAL_MS: f64 = 5000.;
const LOW_QUALITY_THRESHOLD: f64 = 0.5;
const DEFAULT_MEMORY_BUDGET: u64 = 50 * 1024 * 1024;

#[derive(Display, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[strum(serialize_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    #[default]
    High,
}

impl Quality {
    #[must_use]
    pub fn smoothing_enabled(self) -> bool {
        self != Quality::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasVideoConfig {
    pub preserve_transparency: bool,
    pub frame_rate: u32,
    pub quality: Quality,
    pub enable_optimization: bool,
}

impl Default for CanvasVideoConfig {
    fn default() -> Self {
        Self {
            preserve_transparency: true,
            frame_rate: 30,
            quality: Quality::High,
            enable_optimization: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct OptimizationConfig {
    pub target_frame_rate: f64,
    pub max_frame_rate: f64,
    /// Share of the target frame rate below which quality is reduced.
    pub quality_threshold: f64,
    pub adaptive_quality: bool,
    pub frame_skipping: bool,
    pub memory_management: bool,
    pub memory_budget: u64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            target_frame_rate: 30.,
            max_frame_rate: 60.,
            quality_threshold: 0.8,
            adaptive_quality: true,
            frame_skipping: true,
            memory_management: true,
            memory_budget: DEFAULT_MEMORY_BUDGET,
        }
    }
}

impl From<CanvasVideoConfig> for OptimizationConfig {
    fn from(value: CanvasVideoConfig) -> Self {
        let defaults = OptimizationConfig::default();
        Self {
            target_frame_rate: f64::from(value.frame_rate),
            adaptive_quality: value.enable_optimization,
            frame_skipping: value.enable_optimization,
            memory_management: value.enable_optimization,
            ..defaults
        }
    }
}

/// What the runtime is able to render.
pub trait Capabilities {
    /// Whether video with an alpha channel is composited correctly by the native element.
    fn supports_transparent_video(&self) -> bool;
    /// Whether a 2D canvas context with alpha channel can be created.
    fn has_alpha_canvas(&self) -> bool;
}

/// Decides whether a video must be mirrored onto a canvas to keep its transparency.
///
/// The canvas probe is only performed if the other conditions hold.
pub fn should_use_canvas_fallback(url: &str, capabilities: &impl Capabilities) -> bool {
    url.contains(".webm")
        && !capabilities.supports_transparent_video()
        && capabilities.has_alpha_canvas()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameRateLimiter {
    interval: f64,
    max_frame_rate: f64,
    last_frame: Option<f64>,
    limited: bool,
}

impl FrameRateLimiter {
    #[must_use]
    pub fn new(frame_rate: f64, max_frame_rate: f64, limited: bool) -> Self {
        let mut limiter = Self {
            interval: 0.,
            max_frame_rate,
            last_frame: None,
            limited,
        };
        limiter.set_target_frame_rate(frame_rate);
        limiter
    }

    pub fn set_target_frame_rate(&mut self, frame_rate: f64) {
        self.interval = 1000. / frame_rate.clamp(1., self.max_frame_rate.max(1.));
    }

    pub fn set_limited(&mut self, limited: bool) {
        self.limited = limited;
    }

    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn should_render(&mut self, now: f64) -> bool {
        if self.limited
            && self
                .last_frame
                .is_some_and(|last_frame| now - last_frame < self.interval)
        {
            return false;
        }
        self.last_frame = Some(now);
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerformanceMetrics {
    pub frame_rate: Option<f64>,
    pub render_time: f64,
    pub memory_usage: Option<u64>,
    pub frames: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceMonitor {
    last_frame: Option<f64>,
    intervals: VecDeque<f64>,
    render_times: VecDeque<f64>,
    frames: u64,
}

impl PerformanceMonitor {
    pub fn record_frame(&mut self, now: f64, render_time: f64) {
        if let Some(last_frame) = self.last_frame {
            push_bounded(&mut self.intervals, now - last_frame);
            push_bounded(&mut self.render_times, render_time);
        }
        self.last_frame = Some(now);
        self.frames += 1;
    }

    /// Frames per second over the recent window, `None` until two frames were recorded.
    #[must_use]
    pub fn frame_rate(&self) -> Option<f64> {
        let interval = average(&self.intervals)?;
        if interval <= 0. {
            return None;
        }
        Some(1000. / interval)
    }

    #[must_use]
    pub fn average_render_time(&self) -> f64 {
        average(&self.render_times).unwrap_or_default()
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Lowers the rendering quality when the achieved frame rate falls behind the target.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityController {
    current: Quality,
    changed_at: Option<f64>,
    target_frame_rate: f64,
    threshold: f64,
}

impl QualityController {
    #[must_use]
    pub fn new(initial: Quality, target_frame_rate: f64, threshold: f64) -> Self {
        Self {
            current: initial,
            changed_at: None,
            target_frame_rate,
            threshold,
        }
    }

    #[must_use]
    pub fn current(&self) -> Quality {
        self.current
    }

    #[must_use]
    pub fn recommend(&self, frame_rate: f64) -> Quality {
        if frame_rate < self.target_frame_rate * LOW_QUALITY_THRESHOLD {
            Quality::Low
        } else if frame_rate < self.target_frame_rate * self.threshold {
            Quality::Medium
        } else {
            Quality::High
        }
    }

    pub fn update(&mut self, now: f64, frame_rate: Option<f64>) -> Quality {
        if self
            .changed_at
            .is_some_and(|changed_at| now - changed_at < MIN_QUALITY_CHANGE_INTERVAL_MS)
        {
            return self.current;
        }
        let Some(frame_rate) = frame_rate else {
            return self.current;
        };
        let recommended = self.recommend(frame_rate);
        if recommended != self.current {
            log::debug!("canvas quality adjusted to {recommended} at {frame_rate:.1} fps");
            self.current = recommended;
            self.changed_at = Some(now);
        }
        self.current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryStatus {
    Healthy,
    OverBudget { cleanup: bool },
}

/// Watches the heap usage reported by the runtime.
///
/// Runtimes without a memory introspection API report no usage, which counts as healthy.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryGuard {
    budget: u64,
    used: Option<u64>,
    last_cleanup: Option<f64>,
}

impl MemoryGuard {
    #[must_use]
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            used: None,
            last_cleanup: None,
        }
    }

    #[must_use]
    pub fn used(&self) -> Option<u64> {
        self.used
    }

    pub fn check(&mut self, used: Option<u64>, now: f64) -> MemoryStatus {
        self.used = used;
        match used {
            Some(used) if used >= self.budget => {
                let cleanup = self
                    .last_cleanup
                    .is_none_or(|last_cleanup| now - last_cleanup > MIN_CLEANUP_INTERVAL_MS);
                if cleanup {
                    self.last_cleanup = Some(now);
                }
                MemoryStatus::OverBudget { cleanup }
            }
            _ => MemoryStatus::Healthy,
        }
    }
}

/// Render loop controller combining frame pacing, quality and memory control.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    config: OptimizationConfig,
    limiter: FrameRateLimiter,
    monitor: PerformanceMonitor,
    quality: QualityController,
    memory: MemoryGuard,
    rendering: bool,
}

impl Renderer {
    #[must_use]
    pub fn new(config: OptimizationConfig, initial_quality: Quality) -> Self {
        Self {
            config,
            limiter: FrameRateLimiter::new(
                config.target_frame_rate,
                config.max_frame_rate,
                config.frame_skipping,
            ),
            monitor: PerformanceMonitor::default(),
            quality: QualityController::new(
                initial_quality,
                config.target_frame_rate,
                config.quality_threshold,
            ),
            memory: MemoryGuard::new(config.memory_budget),
            rendering: false,
        }
    }

    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    /// Returns `false` if the loop is already running.
    pub fn start(&mut self) -> bool {
        if self.rendering {
            return false;
        }
        self.rendering = true;
        true
    }

    /// Returns `false` if the loop was not running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.rendering, false)
    }

    /// Decides whether a frame is drawn at `now` and with which quality.
    pub fn begin_frame(&mut self, now: f64) -> Option<Quality> {
        if !self.rendering || !self.limiter.should_render(now) {
            return None;
        }
        if self.config.adaptive_quality {
            Some(self.quality.update(now, self.monitor.frame_rate()))
        } else {
            Some(self.quality.current())
        }
    }

    pub fn end_frame(&mut self, now: f64, render_time: f64, used_heap: Option<u64>) -> MemoryStatus {
        self.monitor.record_frame(now, render_time);
        if self.config.memory_management {
            self.memory.check(used_heap, now)
        } else {
            MemoryStatus::Healthy
        }
    }

    pub fn set_target_frame_rate(&mut self, frame_rate: f64) {
        self.limiter.set_target_frame_rate(frame_rate);
    }

    #[must_use]
    pub fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics {
            frame_rate: self.monitor.frame_rate(),
            render_time: self.monitor.average_render_time(),
            memory_usage: self.memory.used(),
            frames: self.monitor.frames(),
        }
    }
}

fn push_bounded(values: &mut VecDeque<f64>, value: f64) {
    values.push_back(value);
    if values.len() > WINDOW {
        values.pop_front();
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(values: &VecDeque<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
