use std::path::PathBuf;

use clap::Parser;

/// pair-vote: pick one of two candidates in the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "pair-vote")]
#[command(version)]
#[command(about = "Two-option voting widget for the terminal", long_about = None)]
pub struct Cli {
    /// The two candidates to vote on, in display order
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"])]
    pub pair: Option<Vec<String>>,

    /// Show the ballot as already voted for this candidate
    #[arg(long, value_name = "CANDIDATE")]
    pub has_voted: Option<String>,

    /// Announce this candidate as the winner instead of showing the pair
    #[arg(long, value_name = "CANDIDATE")]
    pub winner: Option<String>,

    /// Configuration directory (defaults to the platform config dir)
    #[arg(long, value_name = "DIR", env = "PAIR_VOTE_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Built-in theme to use instead of theme.toml (dark, vibrant)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write default config.toml and theme.toml, then exit
    #[arg(long, default_value_t = false)]
    pub init_config: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
