//! Console rendering of the final shortlist.
//!
//! Pure string building so the exact output is unit-testable; `main` does
//! the actual printing.

use std::fmt::Write;

use crate::rank::Suggestion;

/// Shown instead of a listing when the window held no completed listens.
pub const NO_HISTORY_MESSAGE: &str = "No listening history found for the specified period.";

/// Render the ranked shortlist, one line per entry:
/// `<rank>. "<song>" by <artist> (Score: <score>)`.
///
/// An empty shortlist renders as the single [`NO_HISTORY_MESSAGE`] line.
pub fn render(suggestions: &[Suggestion], top_n: usize) -> String {
    if suggestions.is_empty() {
        return format!("{NO_HISTORY_MESSAGE}\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "--- Top {top_n} Song Recommendations for Offline Backup ---"
    );
    for suggestion in suggestions {
        let _ = writeln!(
            out,
            "{:2}. \"{}\" by {} (Score: {:.2})",
            suggestion.rank, suggestion.song, suggestion.artist, suggestion.score
        );
    }
    out
}
