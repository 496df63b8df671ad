//! Plain-text rendering of progress for the terminal
//!
//! Renderers return strings. Whether they carry ANSI colors is decided by the
//! [`Painter`] they are given.

pub mod day_view;
pub mod overview;
pub mod progress_bar;

use crossterm::style::{Color, Stylize};

use crate::config::Config;
use crate::theme::Theme;

/// Default wrap width for descriptions and answers
pub const TEXT_WIDTH: usize = 78;

/// Applies theme colors to text, or leaves it alone when color is off
#[derive(Debug, Clone)]
pub struct Painter {
    theme: Theme,
    color: bool,
}

impl Painter {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    /// A painter for the given configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.active_theme(), config.color)
    }

    /// A painter that never emits escape codes
    pub fn plain() -> Self {
        Self::new(Theme::default(), false)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color { text.with(color).to_string() } else { text.to_string() }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color { text.bold().to_string() } else { text.to_string() }
    }

    /// Bold text in the primary accent color
    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.with(self.theme.accent_primary).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, self.theme.fg_muted)
    }

    /// A `[x]` / `[ ]` marker
    pub fn check(&self, done: bool) -> String {
        if done { self.paint("[x]", self.theme.success) } else { self.muted("[ ]") }
    }
}
