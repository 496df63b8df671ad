//! Progress bars

use super::Painter;
use crate::stats::{Completion, progress_tier};

const FILLED: char = '\u{2588}'; // █
const EMPTY: char = '\u{2591}'; // ░

/// Number of filled cells for a percentage
pub fn filled_cells(percentage: u8, width: usize) -> usize {
    (usize::from(percentage.min(100)) * width + 50) / 100
}

/// A bar like `██████░░░░  60% (3/5)`, colored by progress tier
pub fn render(painter: &Painter, completion: &Completion, width: usize) -> String {
    let filled = filled_cells(completion.percentage, width);
    let bar: String = std::iter::repeat_n(FILLED, filled)
        .chain(std::iter::repeat_n(EMPTY, width - filled))
        .collect();

    let color = painter.theme().progress_color(progress_tier(completion.percentage));
    format!(
        "{} {:>3}% ({}/{})",
        painter.paint(&bar, color),
        completion.percentage,
        completion.completed,
        completion.total
    )
}
