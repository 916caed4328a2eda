//! Raw scrobble filtering and reshaping.
//!
//! Turns the opaque records returned by the Last.fm client into clean
//! [`ListenEvent`] values, dropping anything the scorer cannot use:
//! in-progress "now playing" entries, records with missing or empty song,
//! artist, album, or timestamp fields, and records whose timestamp fails to
//! parse. Dropped records are counted but never fatal; the API is known to
//! occasionally omit album metadata and the run should survive that.

use chrono::{Local, NaiveDate, TimeZone};
use log::{debug, info};

use crate::lastfm::RawTrack;

/// One completed play, ready for aggregation. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenEvent {
    pub song: String,
    pub artist: String,
    pub album: String,
    /// Local calendar date of the listen (see [`normalize`] on timezone).
    pub day: NaiveDate,
}

/// Result of a normalization pass: the accepted events plus the tally of
/// records that were silently dropped, kept observable for diagnostics.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub events: Vec<ListenEvent>,
    pub dropped: usize,
}

impl Normalized {
    pub fn accepted(&self) -> usize {
        self.events.len()
    }
}

/// Filter and reshape raw track records into [`ListenEvent`]s.
///
/// Pure transformation: no side effects beyond logging, and output order
/// simply follows input order (downstream stages do not depend on it).
///
/// Calendar days are derived in the local timezone of the running process,
/// fixed for the whole run — two listens land on different days only if
/// their local calendar dates differ. This choice feeds the consistency
/// metric directly, so it is deliberate rather than per-record.
pub fn normalize(tracks: &[RawTrack]) -> Normalized {
    let mut events = Vec::with_capacity(tracks.len());
    let mut dropped = 0;

    for track in tracks {
        match listen_event(track) {
            Some(event) => events.push(event),
            None => {
                dropped += 1;
                debug!(
                    "Dropping incomplete record: song='{}' artist='{}'",
                    track.name, track.artist.text
                );
            }
        }
    }

    info!(
        "Normalized {} records: {} accepted, {dropped} dropped",
        tracks.len(),
        events.len()
    );

    Normalized { events, dropped }
}

/// Build a single event, or `None` if the record is unusable.
fn listen_event(track: &RawTrack) -> Option<ListenEvent> {
    if track.is_now_playing() {
        return None;
    }

    let song = non_empty(&track.name)?;
    let artist = non_empty(&track.artist.text)?;
    let album = non_empty(&track.album.text)?;

    let uts: i64 = track.date.as_ref()?.uts.parse().ok()?;
    let day = Local.timestamp_opt(uts, 0).single()?.date_naive();

    Some(ListenEvent {
        song: song.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        day,
    })
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
