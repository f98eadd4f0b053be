//! Subcommand implementations.

pub mod config;
pub mod create;
pub mod landing;
pub mod list;
pub mod map;

use anyhow::{Context, Result};

use happy_core::config::{self as happy_config, Config};

/// Config file + environment, with `--api-url` applied last.
pub fn settings(api_url: Option<&str>) -> Result<Config> {
    let mut config = happy_config::load()
        .context("failed to load ~/.happy/config.yaml")?
        .with_env();
    if let Some(url) = api_url {
        config.api_url = url.to_owned();
    }
    Ok(config)
}

pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}
