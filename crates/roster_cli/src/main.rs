//! Roster CLI
//!
//! 붙여넣은 명단 파싱, 임시 ID 발급, 명령 스크립트 재생

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Volleyball roster tools", long_about = None)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// JSON config file (defaults to $ROSTER_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Extract confirmed/paid names from a pasted chat list
    Parse {
        /// Input text file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output JSON file path (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Allocate a temporary player id
    AllocId {
        /// Ids already in use
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<i64>,

        /// Fixed RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Replay a command script against a roster snapshot
    Replay {
        /// Snapshot JSON file path
        #[arg(long)]
        snapshot: PathBuf,

        /// Command list JSON file path
        #[arg(long)]
        commands: PathBuf,

        /// Stop at the first failed command
        #[arg(long, default_value = "false")]
        stop_on_error: bool,

        /// Output JSON file path (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = roster_cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { r#in, out } => {
            let names = roster_cli::run_parse(&r#in)?;
            roster_cli::write_json(&names, out.as_deref())?;
        }

        Commands::AllocId { exclude, seed } => {
            if seed.is_some() {
                config.allocator.seed = seed;
            }
            let id = roster_cli::run_alloc(&exclude, &config)?;
            println!("{}", id);
        }

        Commands::Replay { snapshot, commands, stop_on_error, out } => {
            let response = roster_cli::run_replay(&snapshot, &commands, stop_on_error)?;
            let failed = response.outcomes.iter().filter(|o| !o.ok).count();
            roster_cli::write_json(&response, out.as_deref())?;
            if failed > 0 {
                eprintln!("{} of {} commands rejected", failed, response.outcomes.len());
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("roster CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
