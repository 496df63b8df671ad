//! Color themes for terminal output

mod tokyo_night;

pub use tokyo_night::TOKYO_NIGHT;

use crossterm::style::Color;

use crate::stats::ProgressTier;

/// A color theme for the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    // Text
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accents
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Progress tiers, lowest first
    pub tier_untouched: Color,
    pub tier_low: Color,
    pub tier_medium: Color,
    pub tier_high: Color,
    pub tier_done: Color,

    /// Priority 0 through 6
    pub priorities: [Color; 7],
    /// Priorities without a color of their own
    pub neutral: Color,
}

impl Default for Theme {
    fn default() -> Self {
        TOKYO_NIGHT
    }
}

impl Theme {
    /// Look a theme up by name, ignoring case
    pub fn by_name(name: &str) -> Option<Self> {
        [TOKYO_NIGHT].into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn progress_color(&self, tier: ProgressTier) -> Color {
        match tier {
            ProgressTier::Untouched => self.tier_untouched,
            ProgressTier::Low => self.tier_low,
            ProgressTier::Medium => self.tier_medium,
            ProgressTier::High => self.tier_high,
            ProgressTier::Done => self.tier_done,
        }
    }

    pub fn priority_color(&self, priority: u8) -> Color {
        self.priorities.get(priority as usize).copied().unwrap_or(self.neutral)
    }
}
