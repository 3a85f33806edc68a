use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod bootstrap;
mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "nutriscan")]
#[command(about = "NutriScan - malnutrition risk screening from facial images", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for history and logs (overrides [storage].data_dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JPEG or PNG image and save the assessment
    Analyze {
        /// Image file to screen
        image: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved assessments, most recent first
    History,
    /// Show one saved assessment
    Show {
        /// Assessment id, or a unique prefix of it
        id: String,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all saved assessments
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Summary statistics over the saved assessments
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let app = bootstrap::bootstrap(cli.config.as_deref(), cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Analyze { image, json } => commands::analyze::run(&app, &image, json).await,
        Commands::History => commands::history::list(&app).await,
        Commands::Show { id, json } => commands::history::show(&app, &id, json).await,
        Commands::Clear { yes } => commands::clear::run(&app, yes).await,
        Commands::Stats => commands::stats::run(&app).await,
    }
}
