use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "keysift: find archive passwords in a dictionary",
    long_about = None
)]
pub struct Cli {
    /// Seconds one extraction attempt may run; outliving it counts as a hit
    #[arg(
        long,
        global = true,
        env = "KEYSIFT_TIMEOUT",
        default_value = "3",
        value_parser = parse_seconds
    )]
    pub timeout: Duration,

    /// Candidate password list, one password per line
    #[arg(
        long = "dict",
        global = true,
        env = "KEYSIFT_DICT",
        default_value = "dictionary.txt"
    )]
    pub dict: PathBuf,

    /// Scratch directory for trial extractions (defaults to <tmp>/keysift)
    #[arg(long, global = true, env = "KEYSIFT_SCRATCH")]
    pub scratch: Option<PathBuf>,

    /// Leave extracted files in the scratch directory after the run
    #[arg(long, global = true)]
    pub keep_scratch: bool,

    /// Report a timed-out direct probe as "cancelled" instead of "no password"
    #[arg(long, global = true)]
    pub report_probe_timeouts: bool,

    /// Print the batch report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum DictCommands {
    /// Add one password to the dictionary
    Add { password: String },
    /// Merge every password listed in another file
    Merge { file: PathBuf },
    /// Print the dictionary in search order
    List,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify one archive, or every file directly inside a directory
    Check {
        path: PathBuf,

        /// Add this password to the dictionary before searching
        #[arg(long = "add-password")]
        add_password: Option<String>,
    },

    #[command(subcommand)]
    /// Manage the candidate password list
    Dict(DictCommands),
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a number of seconds"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be a positive number of seconds, got {s}"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}
