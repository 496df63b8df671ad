//! roadmap-tracker - progress tracking for a 60-day learning roadmap
//!
//! The roadmap ships as an embedded dataset of days, topics and practice
//! problems. Progress on it lives in a [`ProgressStore`], which persists every
//! change through a pluggable backend, and the [`stats`] module derives
//! percentages, groupings and priority views from it.

pub mod config;
pub mod error;
pub mod progress;
pub mod roadmap;
pub mod stats;
pub mod theme;
pub mod ui;

pub use config::Config;
pub use error::{Result, TrackerError};
pub use progress::{JsonFileBackend, LoadPolicy, MemoryBackend, ProgressDocument, ProgressStore};
pub use roadmap::Roadmap;
pub use theme::Theme;
