use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// plant - semester-by-semester course planning
#[derive(Parser)]
#[command(name = "plant")]
#[command(about = "Academic course planner", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Parse a transcript PDF and store its courses on a user
    ImportTranscript {
        /// Id of the user receiving the courses
        #[arg(long)]
        user: String,

        /// Transcript PDF, at most 10MB
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = plant::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    plant::observability::init_observability(
        "plant",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => plant::cli::server::serve(config, host, port).await,
        Commands::Migrate => plant::cli::migrate::migrate(&config).await,
        Commands::Reset => plant::cli::migrate::reset(&config).await,
        Commands::ImportTranscript { user, file } => {
            plant::cli::transcript::import(config, user, file).await
        }
    }
}
