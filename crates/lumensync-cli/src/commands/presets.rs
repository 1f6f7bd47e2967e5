//! Preset listing, inspection, and validation commands.

use clap::{Args, Subcommand};
use lumensync_config::{factory_presets, list_user_presets, system_presets_dir, user_config_dir, user_presets_dir, validate_preset, PresetFile};
use lumensync_core::PresetKind;

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

    /// Show a preset's parameters
    Show {
        /// Preset name or path
        name: String,
    },

    /// Validate a preset's parameters without running the pipeline
    Validate {
        /// Preset name or path
        name: String,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Validate { name } => validate_preset_cmd(&name),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            println!("  {:20} - {}", preset.name, PresetKind::from(preset.kind.clone()).type_name());
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let paths = list_user_presets();
        if paths.is_empty() {
            println!("  (none)");
        } else {
            for path in paths {
                let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown");
                match PresetFile::load(&path) {
                    Ok(preset) => println!("  {:20} - {}", name, PresetKind::from(preset.kind.clone()).type_name()),
                    Err(_) => println!("  {:20} - (error loading)", name),
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = super::common::load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();
    println!("id:      {}", preset.id);
    println!("enabled: {}", preset.enabled);
    println!("kind:    {}", PresetKind::from(preset.kind.clone()).type_name());
    println!("{:#?}", preset.kind);

    Ok(())
}

fn validate_preset_cmd(name: &str) -> anyhow::Result<()> {
    let preset = super::common::load_preset(name)?;
    match validate_preset(&preset) {
        Ok(()) => {
            println!("'{}' is valid.", preset.name);
            Ok(())
        }
        Err(e) => anyhow::bail!("'{}' is invalid: {}", preset.name, e),
    }
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("====================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());
    println!("Config dir:     {}", user_config_dir().display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_factory_preset_validates() {
        for preset in factory_presets() {
            assert!(validate_preset(&preset).is_ok(), "{} should validate", preset.name);
        }
    }
}
