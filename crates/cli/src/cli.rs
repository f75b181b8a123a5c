//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ecotrack_domain::TrendGrain;

/// EcoTrack API client
#[derive(Parser, Debug)]
#[command(name = "ecotrack", version, about = "Query and feed the EcoTrack carbon accounting API")]
pub struct Cli {
    /// Config file (TOML or JSON); standard locations are probed when unset
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ECOTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an organization and its admin user
    Signup {
        #[arg(long)]
        org_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ECOTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Me,

    /// Emission totals by scope
    Kpis(Window),

    /// Emission time series
    Trend {
        #[command(flatten)]
        window: Window,
        /// `day` or `month`; the backend decides when unset
        #[arg(long)]
        grain: Option<TrendGrain>,
    },

    /// Tenant-wide totals and top categories
    Summary {
        /// Number of top categories to keep
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// List emission factors
    Factors {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        geography: Option<String>,
        /// Only factors valid on this date
        #[arg(long)]
        valid_on: Option<String>,
    },

    /// Generated emission reduction advice
    Suggestion {
        /// Organization to analyse
        #[arg(long)]
        org_id: i64,
        /// Requesting user
        #[arg(long)]
        user_id: i64,
    },

    /// Download the CSV report for a period
    Report {
        #[command(flatten)]
        window: Window,
        /// Write the CSV here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Upload a CSV file of activities
    Upload {
        file: PathBuf,
    },

    /// List facilities
    Facilities(Listing),

    /// List users of the organization
    Users(Listing),

    /// List calculated emissions
    Emissions {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },

    /// Recalculate emissions for a window
    Recompute {
        #[arg(long)]
        since: Option<String>,
        #[arg(long)]
        until: Option<String>,
    },
}

/// Reporting window
#[derive(Args, Debug, Clone)]
pub struct Window {
    /// Start date (ISO-8601)
    #[arg(long)]
    pub from: String,
    /// End date (ISO-8601), after `from`
    #[arg(long)]
    pub to: String,
}

/// Client-side search and paging
#[derive(Args, Debug, Clone)]
pub struct Listing {
    #[arg(long, short = 's')]
    pub search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_trend_grain() {
        let cli = Cli::try_parse_from([
            "ecotrack", "trend", "--from", "2024-01-01", "--to", "2024-06-01", "--grain", "Month",
        ])
        .unwrap();

        match cli.command {
            Command::Trend { window, grain } => {
                assert_eq!(window.from, "2024-01-01");
                assert_eq!(grain, Some(TrendGrain::Month));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn listing_defaults() {
        let cli = Cli::try_parse_from(["ecotrack", "facilities", "--search", "plant"]).unwrap();
        match cli.command {
            Command::Facilities(listing) => {
                assert_eq!(listing.search.as_deref(), Some("plant"));
                assert_eq!(listing.page, 1);
                assert_eq!(listing.page_size, 10);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_suggestion_ids() {
        let cli =
            Cli::try_parse_from(["ecotrack", "suggestion", "--org-id", "3", "--user-id", "9"]).unwrap();
        match cli.command {
            Command::Suggestion { org_id, user_id } => assert_eq!((org_id, user_id), (3, 9)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ecotrack", "me", "--api-url", "http://localhost:9000"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000"));
    }
}
