pub mod handlers;

use std::path::PathBuf;
use std::time::Duration;

use crate::presentation::cli::{Cli, Commands, DictCommands};
use clap::Parser;
use keysift_core::error::Result;
use tracing_subscriber::EnvFilter;

/// Global options shared by every subcommand.
pub struct Settings {
    pub timeout: Duration,
    pub dict: PathBuf,
    pub scratch: Option<PathBuf>,
    pub keep_scratch: bool,
    pub report_probe_timeouts: bool,
    pub json: bool,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings {
        timeout: cli.timeout,
        dict: cli.dict,
        scratch: cli.scratch,
        keep_scratch: cli.keep_scratch,
        report_probe_timeouts: cli.report_probe_timeouts,
        json: cli.json,
    };

    match cli.command {
        Commands::Check { path, add_password } => {
            handlers::handle_check(&settings, path, add_password)
        }
        Commands::Dict(dict_cmd) => match dict_cmd {
            DictCommands::Add { password } => handlers::handle_dict_add(&settings, &password),
            DictCommands::Merge { file } => handlers::handle_dict_merge(&settings, file),
            DictCommands::List => handlers::handle_dict_list(&settings),
        },
    }
}
