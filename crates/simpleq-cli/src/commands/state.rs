//! State blob commands.

use super::common::EqArgs;
use clap::{Args, Subcommand};
use simpleq_config::{StateManager, default_state_path};
use simpleq_core::{PARAMS, ParamFlags, ParamStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct StateArgs {
    #[command(subcommand)]
    command: StateCommand,
}

#[derive(Subcommand)]
enum StateCommand {
    /// Write the given settings as a state blob
    Save {
        /// Destination file (defaults to the user config directory)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        eq: EqArgs,
    },

    /// Decode a state blob and print its parameters
    Show {
        /// State file (defaults to the user config directory)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

pub fn run(args: StateArgs) -> anyhow::Result<()> {
    match args.command {
        StateCommand::Save { file, eq } => save(file.unwrap_or_else(default_state_path), &eq),
        StateCommand::Show { file } => show(file.unwrap_or_else(default_state_path)),
    }
}

fn save(path: PathBuf, eq: &EqArgs) -> anyhow::Result<()> {
    let store = eq.build_store()?;
    StateManager::new(store).save_to_file(&path)?;
    println!("Saved state to {}", path.display());
    Ok(())
}

fn show(path: PathBuf) -> anyhow::Result<()> {
    let store = Arc::new(ParamStore::new());
    let snapshot = StateManager::new(Arc::clone(&store)).load_from_file(&path)?;

    println!("State: {}", path.display());
    for desc in PARAMS
        .iter()
        .filter(|d| !d.flags.contains(ParamFlags::STEPPED))
    {
        if let Some(value) = snapshot.get(desc.id) {
            println!("  {:<16} = {}", desc.string_id, value);
        }
    }
    println!("  {:<16} = {}", "low_cut_slope", snapshot.low_cut_slope);
    println!("  {:<16} = {}", "high_cut_slope", snapshot.high_cut_slope);
    Ok(())
}
