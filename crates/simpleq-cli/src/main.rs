//! simpleq CLI - run the parametric equalizer over audio files.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simpleq")]
#[command(author, version, about = "simpleq parametric equalizer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Equalize a WAV file
    Process(commands::process::ProcessArgs),

    /// List the equalizer parameters and their ranges
    Params,

    /// Print the magnitude response for a setting
    Response(commands::response::ResponseArgs),

    /// Save or inspect state blobs
    State(commands::state::StateArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Params => commands::params::run(),
        Commands::Response(args) => commands::response::run(args),
        Commands::State(args) => commands::state::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
