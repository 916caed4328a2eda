//! Ordering and truncation of scored tracks.

use crate::score::ScoredTrack;

/// One entry of the final shortlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// 1-based position in the shortlist.
    pub rank: usize,
    pub artist: String,
    pub song: String,
    pub score: f64,
}

/// Order scored tracks by score descending and keep the top `top_n`.
///
/// The sort is stable: equal scores keep the incoming (first-seen) order,
/// so the result is reproducible for the same input sequence. Fewer than
/// `top_n` tracks simply returns them all; `top_n` of zero returns nothing.
pub fn rank(mut scored: Vec<ScoredTrack>, top_n: usize) -> Vec<Suggestion> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_n);

    scored
        .into_iter()
        .enumerate()
        .map(|(index, track)| Suggestion {
            rank: index + 1,
            artist: track.artist,
            song: track.song,
            score: track.score,
        })
        .collect()
}
