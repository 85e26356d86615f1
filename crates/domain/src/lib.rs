#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod audio;
mod error;
mod exercise;
mod name;
mod render;
mod rest_timer;
mod service;
mod session;
mod set;

pub use audio::{
    AudioBank, AudioConfig, AudioConfigRepository, AudioConfigService, AudioCue, AudioError, Bank,
};
pub use error::{ReadError, StorageError};
pub use exercise::{
    Catalog, Difficulty, Exercise, ExerciseID, ExerciseRepository, ExerciseService, Media,
    MediaKind, RandomSource,
};
pub use name::{Name, NameError};
pub use render::{
    Capabilities, CanvasVideoConfig, FrameRateLimiter, MemoryGuard, MemoryStatus,
    OptimizationConfig, PerformanceMetrics, PerformanceMonitor, Quality, QualityController,
    Renderer, should_use_canvas_fallback,
};
pub use rest_timer::{EXIT_ANIMATION_MS, Outcome, Phase, RestTimer, TICK_INTERVAL_MS, Tick};
pub use service::Service;
pub use session::Session;
pub use set::{
    DEFAULT_DURATION, DEFAULT_REST_TIME, SETS_PER_EXERCISE, Set, SetID, SetNumber,
    SetNumberError, SetStatus, Time, Weight,
};
