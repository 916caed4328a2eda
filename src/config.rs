//! Validated run configuration.
//!
//! Collects credentials and tunable parameters into one immutable value
//! that gets passed explicitly into the scorer and ranker. Nothing reads
//! configuration from ambient state after this point, which is what makes
//! the pipeline a pure function of `(events, weights, top_n)`.

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};

use crate::cli::Args;
use crate::score::Weights;

const SECS_PER_DAY: i64 = 86_400;

/// Everything one run needs, validated once up front.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub username: String,
    /// Length of the history window, in days (>= 1).
    pub period_days: u32,
    /// Maximum number of suggestions to print.
    pub suggestions: usize,
    pub weights: Weights,
}

impl Config {
    /// Validate parsed arguments into a run configuration.
    ///
    /// Violations are configuration errors: the run aborts here, before
    /// any network activity.
    pub fn from_args(args: Args) -> Result<Self> {
        ensure!(
            args.days >= 1,
            "time period must be at least 1 day, got {}",
            args.days
        );

        let weights = Weights {
            frequency: args.weight_frequency,
            consistency: args.weight_consistency,
            artist_affinity: args.weight_artist_affinity,
            album_affinity: args.weight_album_affinity,
        };
        for (name, value) in [
            ("frequency", weights.frequency),
            ("consistency", weights.consistency),
            ("artist-affinity", weights.artist_affinity),
            ("album-affinity", weights.album_affinity),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "{name} weight must be a non-negative number, got {value}"
            );
        }

        Ok(Self {
            api_key: args.api_key,
            username: args.username,
            period_days: args.days,
            suggestions: args.top,
            weights,
        })
    }

    /// The `(from, to)` unix-seconds window ending at `now`.
    pub fn window(&self, now: DateTime<Utc>) -> (i64, i64) {
        let to_uts = now.timestamp();
        let from_uts = to_uts - i64::from(self.period_days) * SECS_PER_DAY;
        (from_uts, to_uts)
    }
}
