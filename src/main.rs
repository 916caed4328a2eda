//! # Shortlist - Offline Backup Suggester
//!
//! Fetches your Last.fm listening history over a defined period, scores
//! each track on your listening habits, and recommends the top songs to
//! keep offline.
//!
//! ## Architecture
//!
//! - `cli`: Command-line interface definitions
//! - `config`: Validated run configuration (credentials, window, weights)
//! - `lastfm`: Paginated Last.fm API client
//! - `normalize`: Raw scrobble filtering and reshaping
//! - `score`: Listen aggregation and weighted track scoring
//! - `rank`: Ordering and top-N truncation
//! - `report`: Console rendering
//!
//! ## Usage
//!
//! ```bash
//! export LASTFM_API_KEY="your_api_key"
//! export LASTFM_USERNAME="your_username"
//!
//! # Default: last 5 days, top 25
//! shortlist
//!
//! # A week of history, 10 suggestions, heavier consistency weighting
//! shortlist --days 7 --top 10 --weight-consistency 2.0
//! ```

mod cli;
mod config;
mod lastfm;
mod normalize;
mod rank;
mod report;
mod score;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

/// Orchestrates one run: configuration, fetch, normalize, score, rank,
/// render. Each stage completes entirely before the next begins, and no
/// state survives across runs.
fn main() -> Result<()> {
    env_logger::init();

    // Missing credentials fail here, before any network activity.
    let args = cli::Args::parse();
    let config = config::Config::from_args(args)?;

    let (from_uts, to_uts) = config.window(chrono::Utc::now());
    debug!(
        "Analysis window: {from_uts}..{to_uts} ({} days)",
        config.period_days
    );

    // Phase 1: Data collection. Any failure is fatal for the run; a
    // partial listen set is never scored.
    let client = lastfm::LastfmClient::new(config.api_key.clone(), config.username.clone())
        .context("Failed to construct the Last.fm client")?;
    let raw_tracks = client
        .recent_tracks(from_uts, to_uts)
        .with_context(|| format!("Failed to fetch listening history for '{}'", config.username))?;

    // Phase 2: Processing.
    let normalized = normalize::normalize(&raw_tracks);
    info!(
        "Accepted {} records, dropped {}",
        normalized.accepted(),
        normalized.dropped
    );
    println!(
        "Successfully processed {} completed scrobbles.\n",
        normalized.accepted()
    );

    // Phase 3: Scoring & ranking.
    let scored = score::score_events(&normalized.events, &config.weights);
    let shortlist = rank::rank(scored, config.suggestions);

    // Phase 4: Output.
    print!("{}", report::render(&shortlist, config.suggestions));

    Ok(())
}
