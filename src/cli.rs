//! Command-line interface definitions.
//!
//! A single-purpose tool, so no subcommands: every run fetches, scores,
//! and prints one shortlist. All tunables are flags with environment
//! fallbacks, which keeps the tool scriptable the same way the env-only
//! original was. Credentials are required; clap rejects a run without them
//! before any network activity happens.
//!
//! ```bash
//! export LASTFM_API_KEY="your_api_key"
//! export LASTFM_USERNAME="your_username"
//! shortlist --days 7 --top 10
//! ```

use clap::Parser;

/// Suggest the top tracks from your recent Last.fm history to keep offline.
#[derive(Debug, Parser)]
#[command(name = "shortlist")]
#[command(
    about = "Shortlist: ranked offline-backup suggestions from your Last.fm listening history"
)]
#[command(version)]
pub struct Args {
    /// Last.fm API key (create one at https://www.last.fm/api/account/create)
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Last.fm username whose listening history is analysed
    #[arg(long, env = "LASTFM_USERNAME")]
    pub username: String,

    /// Length of the history window, in days
    #[arg(long, env = "TIME_PERIOD_DAYS", default_value_t = 5)]
    pub days: u32,

    /// Number of suggestions to print
    #[arg(long, env = "NUM_SUGGESTIONS", default_value_t = 25)]
    pub top: usize,

    // Negative weights parse here so that validation can reject them with
    // a message naming the weight, rather than clap treating "-1.0" as an
    // unknown flag.
    /// Weight on play count of the track itself
    #[arg(
        long,
        env = "WEIGHT_FREQUENCY",
        default_value_t = 1.0,
        allow_negative_numbers = true
    )]
    pub weight_frequency: f64,

    /// Weight on the number of distinct days the track was played
    #[arg(
        long,
        env = "WEIGHT_CONSISTENCY",
        default_value_t = 1.5,
        allow_negative_numbers = true
    )]
    pub weight_consistency: f64,

    /// Weight on total plays across all tracks by the same artist
    #[arg(
        long,
        env = "WEIGHT_ARTIST_AFFINITY",
        default_value_t = 0.5,
        allow_negative_numbers = true
    )]
    pub weight_artist_affinity: f64,

    /// Weight on total plays across all tracks on the same album
    #[arg(
        long,
        env = "WEIGHT_ALBUM_AFFINITY",
        default_value_t = 0.3,
        allow_negative_numbers = true
    )]
    pub weight_album_affinity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let args = Args::try_parse_from(["shortlist", "--api-key", "k", "--username", "u"])
            .expect("minimal arguments should parse");

        assert_eq!(args.days, 5);
        assert_eq!(args.top, 25);
        assert_eq!(args.weight_frequency, 1.0);
        assert_eq!(args.weight_consistency, 1.5);
        assert_eq!(args.weight_artist_affinity, 0.5);
        assert_eq!(args.weight_album_affinity, 0.3);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "shortlist",
            "--api-key",
            "k",
            "--username",
            "u",
            "--days",
            "14",
            "--top",
            "10",
            "--weight-frequency",
            "2.0",
        ])
        .expect("valid arguments should parse");

        assert_eq!(args.days, 14);
        assert_eq!(args.top, 10);
        assert_eq!(args.weight_frequency, 2.0);
    }

    #[test]
    fn test_negative_weight_value_reaches_parsing() {
        // "-1.0" must parse as a value for the preceding flag, not be
        // mistaken for an unknown argument; rejecting negative weights is
        // the config validation's job.
        let args = Args::try_parse_from([
            "shortlist",
            "--api-key",
            "k",
            "--username",
            "u",
            "--weight-frequency",
            "-1.0",
        ])
        .expect("negative weight values should reach validation");

        assert_eq!(args.weight_frequency, -1.0);
    }

    #[test]
    fn test_missing_credentials_rejected() {
        // Only meaningful when the env fallbacks are unset, as in CI.
        if std::env::var_os("LASTFM_API_KEY").is_none() {
            assert!(Args::try_parse_from(["shortlist", "--username", "u"]).is_err());
        }
    }
}
