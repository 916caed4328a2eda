//! Listen aggregation and weighted track scoring.
//!
//! The heart of the pipeline: a single grouping pass over the full listen
//! collection builds one [`TrackStats`] per distinct track, and a weighted
//! combination of those statistics yields one [`ScoredTrack`] each. The
//! whole module is pure — identical `(events, weights)` inputs always
//! produce the identical output sequence, which is what makes the ranking
//! reproducible and unit-testable with varied weights.
//!
//! Four signals feed the score:
//! - **frequency** — total plays of the track in the window
//! - **consistency** — distinct local calendar days it was played on
//! - **artist affinity** — total plays across all tracks by the artist
//! - **album affinity** — total plays across all tracks on its album

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::normalize::ListenEvent;

/// Identity of a track for aggregation: two events with the same artist and
/// song title are the same track, even if album metadata disagrees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey {
    pub artist: String,
    pub song: String,
}

/// Identity of an album for affinity counting.
type AlbumKey = (String, String);

/// Immutable scoring weight configuration.
///
/// All weights are non-negative; validation happens at configuration time
/// so the scorer itself never fails. Passed explicitly into every call —
/// the scorer reads no ambient state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub frequency: f64,
    pub consistency: f64,
    pub artist_affinity: f64,
    pub album_affinity: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            consistency: 1.5,
            artist_affinity: 0.5,
            album_affinity: 0.3,
        }
    }
}

/// Aggregated statistics for one track, built once per run and never
/// mutated after the grouping pass completes.
#[derive(Debug, Clone)]
pub struct TrackStats {
    /// Play count of this track within the window.
    pub frequency: u32,
    /// Distinct local calendar days the track was played on.
    pub days: HashSet<NaiveDate>,
    /// Representative album for affinity attribution (see
    /// [`aggregate`] for the resolution policy).
    pub album: String,
    /// Total plays across all tracks by this artist.
    pub artist_plays: u32,
    /// Total plays across all tracks on the representative album.
    pub album_plays: u32,
}

/// A track with its final combined score, immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTrack {
    pub artist: String,
    pub song: String,
    pub score: f64,
}

/// Per-track accumulator used during the grouping pass.
#[derive(Debug, Default)]
struct TrackAccum {
    frequency: u32,
    days: HashSet<NaiveDate>,
    /// album name -> (plays of this track attributed to it, first-seen index)
    albums: HashMap<String, (u32, usize)>,
}

/// Group the full event collection into per-track statistics.
///
/// Single O(events) pass; no per-track rescans of the event list. Returns
/// one entry per distinct [`TrackKey`] in first-seen order, which is the
/// deterministic order the ranker's stable tie-break rests on.
///
/// A track whose album metadata varies across listens gets the album that
/// appears on the most of its own listens, with ties broken by whichever
/// album was seen first. The choice is arbitrary in effect (it only shifts
/// album-affinity attribution) but deterministic by construction.
pub fn aggregate(events: &[ListenEvent]) -> Vec<(TrackKey, TrackStats)> {
    let mut order: Vec<TrackKey> = Vec::new();
    let mut tracks: HashMap<TrackKey, TrackAccum> = HashMap::new();
    let mut artist_plays: HashMap<String, u32> = HashMap::new();
    let mut album_plays: HashMap<AlbumKey, u32> = HashMap::new();

    for (index, event) in events.iter().enumerate() {
        let key = TrackKey {
            artist: event.artist.clone(),
            song: event.song.clone(),
        };

        let accum = tracks.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            TrackAccum::default()
        });
        accum.frequency += 1;
        accum.days.insert(event.day);
        accum
            .albums
            .entry(event.album.clone())
            .or_insert((0, index))
            .0 += 1;

        *artist_plays.entry(event.artist.clone()).or_default() += 1;
        *album_plays
            .entry((event.artist.clone(), event.album.clone()))
            .or_default() += 1;
    }

    order
        .into_iter()
        .map(|key| {
            let accum = tracks
                .remove(&key)
                .unwrap_or_else(|| unreachable!("every ordered key was inserted"));
            let album = representative_album(accum.albums);
            let album_plays = album_plays[&(key.artist.clone(), album.clone())];
            let stats = TrackStats {
                frequency: accum.frequency,
                days: accum.days,
                album,
                artist_plays: artist_plays[&key.artist],
                album_plays,
            };
            (key, stats)
        })
        .collect()
}

/// Most-played album for the track; ties fall to the earliest-seen album.
fn representative_album(albums: HashMap<String, (u32, usize)>) -> String {
    albums
        .into_iter()
        .min_by_key(|(_, (plays, first_seen))| (std::cmp::Reverse(*plays), *first_seen))
        .map(|(album, _)| album)
        .unwrap_or_default()
}

/// Weighted combination of one track's statistics, rounded to 2 decimal
/// places (half away from zero).
pub fn score_track(stats: &TrackStats, weights: &Weights) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let consistency = stats.days.len() as f64;

    let score = f64::from(stats.frequency) * weights.frequency
        + consistency * weights.consistency
        + f64::from(stats.artist_plays) * weights.artist_affinity
        + f64::from(stats.album_plays) * weights.album_affinity;

    round2(score)
}

/// Score every distinct track observed in `events`.
///
/// One [`ScoredTrack`] per distinct [`TrackKey`], in first-seen order.
/// Empty input yields empty output; there are no error conditions.
pub fn score_events(events: &[ListenEvent], weights: &Weights) -> Vec<ScoredTrack> {
    aggregate(events)
        .into_iter()
        .map(|(key, stats)| ScoredTrack {
            score: score_track(&stats, weights),
            artist: key.artist,
            song: key.song,
        })
        .collect()
}

/// Round to 2 decimal places, halves away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
