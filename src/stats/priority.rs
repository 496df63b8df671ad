//! Priority labels and color tokens
//!
//! Tokens are renderer-neutral names. The theme maps them to real colors.

/// Priority levels with a defined label, highest first
pub const PRIORITY_LEVELS: [u8; 7] = [0, 1, 2, 3, 4, 5, 6];

const PRIORITY_LABELS: [&str; 7] =
    ["MUST KNOW", "DIFFERENTIATOR", "SUPPORT", "DSA", "OPTIONAL", "ADVANCED", "EXTRA"];

const PRIORITY_TOKENS: [&str; 7] = [
    "priority-0",
    "priority-1",
    "priority-2",
    "priority-3",
    "priority-4",
    "priority-5",
    "priority-6",
];

/// Label for a priority; "UNKNOWN" outside 0-6
pub fn priority_label(priority: u8) -> &'static str {
    PRIORITY_LABELS.get(priority as usize).copied().unwrap_or("UNKNOWN")
}

/// Color token for a priority; "neutral" outside 0-6
pub fn priority_color_token(priority: u8) -> &'static str {
    PRIORITY_TOKENS.get(priority as usize).copied().unwrap_or("neutral")
}

/// Five buckets a completion percentage falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressTier {
    /// Exactly 0%
    Untouched,
    /// Below 30%
    Low,
    /// Below 60%
    Medium,
    /// Below 100%
    High,
    /// 100%
    Done,
}

impl ProgressTier {
    pub fn token(self) -> &'static str {
        match self {
            ProgressTier::Untouched => "gray",
            ProgressTier::Low => "red",
            ProgressTier::Medium => "yellow",
            ProgressTier::High => "blue",
            ProgressTier::Done => "emerald",
        }
    }
}

pub fn progress_tier(percentage: u8) -> ProgressTier {
    match percentage {
        0 => ProgressTier::Untouched,
        1..30 => ProgressTier::Low,
        30..60 => ProgressTier::Medium,
        60..100 => ProgressTier::High,
        _ => ProgressTier::Done,
    }
}

/// Color token for a completion percentage
pub fn progress_color_token(percentage: u8) -> &'static str {
    progress_tier(percentage).token()
}
