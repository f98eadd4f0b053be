//! Happy: register and browse orphanages from the terminal.
//!
//! # Usage
//!
//! ```text
//! happy landing
//! happy create --name <n> --about <a> --instructions <i> --opening-hours <h>
//!              [--closed-on-weekends] [--lat <lat> --lng <lng>] [--image <path>]...
//! happy list [--json]
//! happy show <id> [--json]
//! happy map [--lat <lat> --lng <lng>] [--zoom <z>]
//! happy config init|show|set-location|set-api-url|set-token
//! ```

mod commands;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    config::ConfigCommand,
    create::CreateArgs,
    list::{ListArgs, ShowArgs},
    map::MapArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "happy",
    version,
    about = "Register and browse orphanages",
    long_about = None,
)]
struct Cli {
    /// API base URL for this invocation (overrides config and HAPPY_API_URL).
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the welcome screen.
    Landing,

    /// Fill in and submit a new orphanage.
    Create(CreateArgs),

    /// List registered orphanages.
    List(ListArgs),

    /// Show one orphanage.
    Show(ShowArgs),

    /// Show the map centre tile for the configured or given location.
    Map(MapArgs),

    /// Manage ~/.happy/config.yaml.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let api_url = cli.api_url.as_deref();
    match cli.command {
        Commands::Landing => commands::landing::run(),
        Commands::Create(args) => args.run(api_url),
        Commands::List(args) => args.run(api_url),
        Commands::Show(args) => args.run(api_url),
        Commands::Map(args) => args.run(),
        Commands::Config { command } => commands::config::run(command),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
