//! Preset management commands.

use super::common::{EqArgs, load_preset};
use clap::{Args, Subcommand};
use simpleq_config::{
    Preset, ensure_user_presets_dir, factory_presets, list_user_presets, preset_name_from_path,
    user_presets_dir,
};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save settings as a user preset
    Save {
        /// Name for the new preset
        name: String,

        #[command(flatten)]
        eq: EqArgs,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Show the user preset directory
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            eq,
            description,
            force,
        } => save_preset(&name, &eq, description.as_deref(), force),
        PresetsCommand::Paths => {
            println!("User presets: {}", user_presets_dir().display());
            Ok(())
        }
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: simpleq presets save <name> --low-cut 80 ...");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".into());
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {name:20} - {desc}");
                    }
                    Err(e) => {
                        tracing::debug!(path = %path.display(), error = %e, "unreadable preset");
                        println!("  {name:20} - (error loading)");
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    let snapshot = preset.to_snapshot()?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
    }
    println!();
    println!(
        "  Low cut:  {:.0} Hz @ {}",
        snapshot.low_cut_freq_hz, snapshot.low_cut_slope
    );
    println!(
        "  Peak:     {:.0} Hz, {:+.1} dB, Q {:.2}",
        snapshot.peak_freq_hz, snapshot.peak_gain_db, snapshot.peak_quality
    );
    println!(
        "  High cut: {:.0} Hz @ {}",
        snapshot.high_cut_freq_hz, snapshot.high_cut_slope
    );
    Ok(())
}

fn save_preset(
    name: &str,
    eq: &EqArgs,
    description: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    let dir = ensure_user_presets_dir()?;
    let preset_path = dir.join(format!("{name}.toml"));

    if preset_path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    let store = eq.build_store()?;
    let mut preset = Preset::from_snapshot(name, &store.get_snapshot());
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    preset.save(&preset_path)?;

    println!("Saved preset '{name}' to {}", preset_path.display());
    Ok(())
}
