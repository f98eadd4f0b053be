//! `happy config`: manage `~/.happy/config.yaml`.

use anyhow::{Context, Result};
use clap::Subcommand;

use happy_core::{config, Position};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default config file if none exists.
    Init,

    /// Print the effective configuration (file + environment).
    Show,

    /// Set this device's location, used as the map centre for new drafts.
    SetLocation {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },

    /// Set the API base URL.
    SetApiUrl { url: String },

    /// Set the map tile access token.
    SetToken { token: String },
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => {
            let (path, created) = config::init().context("failed to write config")?;
            if created {
                println!("✓ Wrote {}", path.display());
            } else {
                println!("Config already exists at {}", path.display());
            }
        }
        ConfigCommand::Show => show()?,
        ConfigCommand::SetLocation { lat, lng } => {
            update(|cfg| cfg.default_location = Some(Position::new(lat, lng)))?;
            println!("✓ Location set to {}", Position::new(lat, lng));
        }
        ConfigCommand::SetApiUrl { url } => {
            update(|cfg| cfg.api_url = url.clone())?;
            println!("✓ API URL set to {url}");
        }
        ConfigCommand::SetToken { token } => {
            update(|cfg| cfg.mapbox_token = Some(token))?;
            println!("✓ Map token saved");
        }
    }
    Ok(())
}

fn show() -> Result<()> {
    let path = config::config_path().context("could not determine home directory")?;
    let cfg = super::settings(None)?;
    println!("file:             {}", path.display());
    println!("api_url:          {}", cfg.api_url);
    println!(
        "mapbox_token:     {}",
        cfg.mapbox_token.as_deref().map(mask).unwrap_or_else(|| "(unset)".to_owned())
    );
    println!(
        "default_location: {}",
        cfg.default_location
            .map(|p| p.to_string())
            .unwrap_or_else(|| "(unset)".to_owned())
    );
    println!("map_zoom:         {}", cfg.map_zoom);
    Ok(())
}

/// Load the file (without environment overrides), edit, save.
fn update(edit: impl FnOnce(&mut config::Config)) -> Result<()> {
    let mut cfg = config::load().context("failed to load ~/.happy/config.yaml")?;
    edit(&mut cfg);
    config::save(&cfg).context("failed to save ~/.happy/config.yaml")?;
    Ok(())
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{visible}…")
}
