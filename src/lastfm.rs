//! Last.fm API client for paginated listening-history retrieval.
//!
//! Wraps the `user.getrecenttracks` endpoint of the Last.fm web API behind
//! a narrow, blocking interface: one call fetches the complete set of raw
//! scrobble records for a user within a time window, following pagination
//! sequentially and pausing briefly between page requests.
//!
//! Any transport failure, non-2xx status, or API-reported error payload is
//! surfaced as a [`FetchError`]. There are no retries: the scoring pipeline
//! needs the complete listen set, so a single failed page fails the run and
//! partial results are never handed to the caller.

use std::thread;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Endpoint for all Last.fm web API methods.
pub const API_URL: &str = "http://ws.audioscrobbler.com/2.0/";

const USER_AGENT: &str = "shortlist/0.3 (offline backup suggester)";

/// Maximum records per page the API allows.
const PAGE_LIMIT: u32 = 200;

/// Courtesy pause between page requests on multi-page responses.
const PAGE_PAUSE: Duration = Duration::from_millis(200);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure modes of a history fetch.
///
/// Every variant is fatal for the run: the caller aborts before the
/// normalizer ever sees partially fetched data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure or non-2xx HTTP status.
    #[error("network error fetching data from Last.fm: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered 200 but reported an error in the body
    /// (bad API key, unknown user, rate limiting, ...).
    #[error("Last.fm API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The response parsed as JSON but did not have the expected shape.
    #[error("unexpected Last.fm response: {0}")]
    Decode(String),
}

/// One raw scrobble record as returned by `user.getrecenttracks`.
///
/// Field presence is not guaranteed: the API occasionally omits album
/// metadata, and "now playing" entries carry no `date` at all. Every field
/// therefore deserializes leniently; deciding which records are usable is
/// the normalizer's job, not the client's.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrack {
    /// Song title.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: TextField,
    #[serde(default)]
    pub album: TextField,
    /// Absent while the track is still playing.
    #[serde(default)]
    pub date: Option<PlayDate>,
    #[serde(rename = "@attr", default)]
    pub attr: Option<TrackAttr>,
}

impl RawTrack {
    /// True for an in-progress listen (no timestamp yet).
    pub fn is_now_playing(&self) -> bool {
        self.attr
            .as_ref()
            .and_then(|attr| attr.nowplaying.as_deref())
            == Some("true")
    }
}

/// Last.fm nests plain strings as `{"#text": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextField {
    #[serde(rename = "#text", default)]
    pub text: String,
}

/// Timestamp of a completed play, in unix seconds (as a string).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayDate {
    #[serde(default)]
    pub uts: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackAttr {
    #[serde(default)]
    pub nowplaying: Option<String>,
}

/// Top-level response body. Carries either `recenttracks` or an
/// `error`/`message` pair, never both.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    error: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    recenttracks: Option<RecentTracks>,
}

impl ApiResponse {
    /// Resolve the body into page data, turning an API-reported error
    /// payload into an explicit [`FetchError::Api`].
    fn into_page(self) -> Result<RecentTracks, FetchError> {
        if let Some(code) = self.error {
            return Err(FetchError::Api {
                code,
                message: self
                    .message
                    .unwrap_or_else(|| "no message supplied".to_string()),
            });
        }
        self.recenttracks
            .ok_or_else(|| FetchError::Decode("response body missing 'recenttracks'".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct RecentTracks {
    #[serde(rename = "@attr")]
    attr: PageAttr,
    #[serde(default, deserialize_with = "track_list")]
    track: Vec<RawTrack>,
}

impl RecentTracks {
    /// Total page count from the page-1 pagination attributes.
    fn total_pages(&self) -> Result<u32, FetchError> {
        self.attr.total_pages.parse().map_err(|_| {
            FetchError::Decode(format!(
                "unparseable totalPages attribute '{}'",
                self.attr.total_pages
            ))
        })
    }
}

/// Pagination attributes; all numeric values arrive as strings.
#[derive(Debug, Deserialize)]
struct PageAttr {
    #[serde(rename = "totalPages", default)]
    total_pages: String,
    #[serde(default)]
    total: String,
}

/// The API collapses a single-entry page into a bare object instead of a
/// one-element array. Accept both shapes.
fn track_list<'de, D>(deserializer: D) -> Result<Vec<RawTrack>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<RawTrack>),
        One(Box<RawTrack>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(tracks) => tracks,
        OneOrMany::One(track) => vec![*track],
    })
}

/// Blocking Last.fm client bound to one user's credentials.
#[derive(Debug)]
pub struct LastfmClient {
    http: reqwest::blocking::Client,
    api_key: String,
    user: String,
}

impl LastfmClient {
    /// Build a client with a fixed User-Agent and request timeout.
    pub fn new(api_key: String, user: String) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key,
            user,
        })
    }

    /// Fetch every raw scrobble record for the user between `from_uts` and
    /// `to_uts` (unix seconds, inclusive window).
    ///
    /// Page 1 reveals the total page count; remaining pages are requested
    /// sequentially with a [`PAGE_PAUSE`] sleep between requests whenever
    /// more than one page exists. Record order follows the API's own
    /// ordering and carries no meaning downstream.
    pub fn recent_tracks(&self, from_uts: i64, to_uts: i64) -> Result<Vec<RawTrack>, FetchError> {
        let mut page: u32 = 1;
        let mut total_pages: u32 = 1;
        let mut all_tracks = Vec::new();

        info!("Fetching data for user '{}' from Last.fm...", self.user);

        while page <= total_pages {
            let body = self.fetch_page(page, from_uts, to_uts)?;
            let recent = body.into_page()?;

            if page == 1 {
                total_pages = recent.total_pages()?;
                info!(
                    "Found {} scrobbles across {} pages.",
                    recent.attr.total, total_pages
                );
            }

            all_tracks.extend(recent.track);
            page += 1;

            // Be a good API citizen between page requests.
            if total_pages > 1 && page <= total_pages {
                thread::sleep(PAGE_PAUSE);
            }
        }

        Ok(all_tracks)
    }

    fn fetch_page(&self, page: u32, from_uts: i64, to_uts: i64) -> Result<ApiResponse, FetchError> {
        debug!("Requesting recent tracks page {page}");

        let response = self
            .http
            .get(API_URL)
            .query(&[
                ("method", "user.getrecenttracks".to_string()),
                ("user", self.user.clone()),
                ("api_key", self.api_key.clone()),
                ("format", "json".to_string()),
                ("page", page.to_string()),
                ("limit", PAGE_LIMIT.to_string()),
                ("from", from_uts.to_string()),
                ("to", to_uts.to_string()),
            ])
            .send()?
            .error_for_status()?;

        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_JSON: &str = r##"{
        "recenttracks": {
            "@attr": {"user": "someone", "totalPages": "3", "total": "512", "page": "1", "perPage": "200"},
            "track": [
                {
                    "name": "Song X",
                    "artist": {"#text": "Artist A", "mbid": ""},
                    "album": {"#text": "Alb1", "mbid": ""},
                    "date": {"uts": "1714000000", "#text": "24 Apr 2024, 22:26"}
                },
                {
                    "name": "Now Spinning",
                    "artist": {"#text": "Artist B"},
                    "album": {"#text": ""},
                    "@attr": {"nowplaying": "true"}
                }
            ]
        }
    }"##;

    #[test]
    fn test_page_deserializes_tracks_and_pagination() {
        let body: ApiResponse = serde_json::from_str(PAGE_JSON).unwrap();
        let page = body.into_page().unwrap();

        assert_eq!(page.total_pages().unwrap(), 3);
        assert_eq!(page.attr.total, "512");
        assert_eq!(page.track.len(), 2);
        assert_eq!(page.track[0].name, "Song X");
        assert_eq!(page.track[0].artist.text, "Artist A");
        assert_eq!(page.track[0].album.text, "Alb1");
        assert_eq!(page.track[0].date.as_ref().unwrap().uts, "1714000000");
    }

    #[test]
    fn test_now_playing_flag_detected() {
        let body: ApiResponse = serde_json::from_str(PAGE_JSON).unwrap();
        let page = body.into_page().unwrap();

        assert!(!page.track[0].is_now_playing());
        assert!(page.track[1].is_now_playing());
        assert!(page.track[1].date.is_none());
    }

    #[test]
    fn test_single_track_page_accepts_bare_object() {
        let json = r##"{
            "recenttracks": {
                "@attr": {"totalPages": "1", "total": "1"},
                "track": {
                    "name": "Lone Song",
                    "artist": {"#text": "Solo"},
                    "album": {"#text": "Only"},
                    "date": {"uts": "1714000000"}
                }
            }
        }"##;
        let body: ApiResponse = serde_json::from_str(json).unwrap();
        let page = body.into_page().unwrap();

        assert_eq!(page.track.len(), 1);
        assert_eq!(page.track[0].name, "Lone Song");
    }

    #[test]
    fn test_empty_track_list_defaults() {
        let json = r#"{
            "recenttracks": {
                "@attr": {"totalPages": "0", "total": "0"}
            }
        }"#;
        let body: ApiResponse = serde_json::from_str(json).unwrap();
        let page = body.into_page().unwrap();

        assert!(page.track.is_empty());
        assert_eq!(page.total_pages().unwrap(), 0);
    }

    #[test]
    fn test_api_error_payload_becomes_fetch_error() {
        let json = r#"{"error": 10, "message": "Invalid API key"}"#;
        let body: ApiResponse = serde_json::from_str(json).unwrap();

        match body.into_page() {
            Err(FetchError::Api { code, message }) => {
                assert_eq!(code, 10);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_recenttracks_is_decode_error() {
        let json = r#"{"something_else": true}"#;
        let body: ApiResponse = serde_json::from_str(json).unwrap();

        assert!(matches!(body.into_page(), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_unparseable_total_pages_is_decode_error() {
        let json = r#"{
            "recenttracks": {
                "@attr": {"totalPages": "lots", "total": "512"},
                "track": []
            }
        }"#;
        let body: ApiResponse = serde_json::from_str(json).unwrap();
        let page = body.into_page().unwrap();

        assert!(matches!(page.total_pages(), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_client_construction() {
        let client = LastfmClient::new("key".to_string(), "someone".to_string()).unwrap();
        assert_eq!(client.user, "someone");
        assert_eq!(client.api_key, "key");
    }
}
