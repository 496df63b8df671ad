//! Tokyo Night palette

use crossterm::style::Color;

use super::Theme;

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

pub const TOKYO_NIGHT: Theme = Theme {
    name: "Tokyo Night",

    fg_primary: rgb(169, 177, 214),   // #a9b1d6
    fg_secondary: rgb(192, 202, 245), // #c0caf5
    fg_muted: rgb(86, 95, 137),       // #565f89

    accent_primary: rgb(122, 162, 247),   // #7aa2f7
    accent_secondary: rgb(187, 154, 247), // #bb9af7

    success: rgb(158, 206, 106), // #9ece6a
    warning: rgb(224, 175, 104), // #e0af68
    error: rgb(247, 118, 142),   // #f7768e
    info: rgb(125, 207, 255),    // #7dcfff

    tier_untouched: rgb(86, 95, 137), // #565f89
    tier_low: rgb(247, 118, 142),     // #f7768e
    tier_medium: rgb(224, 175, 104),  // #e0af68
    tier_high: rgb(122, 162, 247),    // #7aa2f7
    tier_done: rgb(115, 218, 202),    // #73daca

    priorities: [
        rgb(247, 118, 142), // red
        rgb(255, 158, 100), // orange
        rgb(224, 175, 104), // yellow
        rgb(158, 206, 106), // green
        rgb(122, 162, 247), // blue
        rgb(187, 154, 247), // purple
        rgb(169, 177, 214), // gray
    ],
    neutral: rgb(86, 95, 137),
};
