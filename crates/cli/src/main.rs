//! Path Finder CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config directory & default config
//! - `chat`    — Interactive advising chat or single-message mode
//! - `doctor`  — Diagnose config, credential, and reference data

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "pathfinder",
    about = "Path Finder — KI Studien- & Karriereberater (TH Köln, Campus Gummersbach)",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Chat with the study advisor
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Preselect the program (name, e.g. "Maschinenbau")
        #[arg(long)]
        program: Option<String>,

        /// Preselect the semester (1-10)
        #[arg(long)]
        semester: Option<u8>,

        /// Preselect the focus area, where the program allows a choice
        #[arg(long)]
        focus: Option<String>,
    },

    /// Diagnose configuration and reference data
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat {
            message,
            program,
            semester,
            focus,
        } => commands::chat::run(message, program, semester, focus).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
