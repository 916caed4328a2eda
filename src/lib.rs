//! Offline-backup suggestions from recent Last.fm listening history.
//!
//! Shortlist fetches a user's scrobbles over a configurable window, scores
//! every distinct track on four weighted signals (play frequency, distinct
//! listening days, artist affinity, album affinity), and prints the top N
//! as a ranked shortlist of tracks worth keeping offline.
//!
//! Core modules:
//! - [`score`] - Listen aggregation and weighted track scoring
//! - [`rank`] - Ordering and top-N truncation
//! - [`normalize`] - Raw scrobble filtering and reshaping
//! - [`lastfm`] - Paginated Last.fm API client
//!
//! ### Supporting Modules
//!
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`config`] - Validated, immutable run configuration
//! - [`report`] - Console rendering of the final shortlist
//!
//! ## Pipeline
//!
//! Four stages, each consuming the previous stage's complete output:
//!
//! ```text
//! lastfm (fetch) -> normalize -> score (aggregate + weigh) -> rank
//! ```
//!
//! The only suspension point is the network call inside the fetcher; the
//! rest is synchronous, single-threaded, and free of shared state. Given
//! the same events, weights, and top-N, the pipeline always produces the
//! same shortlist.
//!
//! ## Quick Start Example
//!
//! ```
//! use shortlist::normalize::ListenEvent;
//! use shortlist::score::{score_events, Weights};
//! use shortlist::rank::rank;
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 4, 24).unwrap();
//! let events = vec![ListenEvent {
//!     song: "Song X".to_string(),
//!     artist: "Artist A".to_string(),
//!     album: "Alb1".to_string(),
//!     day,
//! }];
//!
//! let scored = score_events(&events, &Weights::default());
//! let shortlist = rank(scored, 25);
//! assert_eq!(shortlist[0].rank, 1);
//! assert_eq!(shortlist[0].song, "Song X");
//! ```
//!
//! ## Error Handling
//!
//! The binary returns `anyhow::Result` throughout. Two failures abort a
//! run: missing/invalid configuration (caught before any network activity)
//! and any fetch failure ([`lastfm::FetchError`] — transport errors,
//! non-2xx statuses, or API-reported error payloads). Individual malformed
//! listen records are recovered from by dropping just that record; the
//! accepted/dropped tallies are logged for diagnostics.
//!
//! ## Logging
//!
//! Controlled via `RUST_LOG` through `env_logger`:
//! ```bash
//! RUST_LOG=debug shortlist
//! RUST_LOG=shortlist::lastfm=debug shortlist
//! ```

pub mod cli;
pub mod config;
pub mod lastfm;
pub mod normalize;
pub mod rank;
pub mod report;
pub mod score;
