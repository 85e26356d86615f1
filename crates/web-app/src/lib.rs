#![warn(clippy::pedantic)]

pub mod audio;
pub mod canvas;
pub mod fullscreen;
pub mod i18n;
pub mod install_prompt;
pub mod log;
pub mod presentation;
pub mod random;
pub mod service_worker;

mod service;
mod settings;

pub use i18n::{Language, Text};
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService};
