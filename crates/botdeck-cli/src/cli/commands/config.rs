//! Config command handlers.

use std::fs;

use anyhow::{Context, Result};
use botdeck_core::config::{Config, paths};

pub fn path() {
    println!("{}", paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = paths::config_path();
    if config_path.exists() {
        anyhow::bail!("Config already exists at {}", config_path.display());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(&config_path, Config::default_template())
        .with_context(|| format!("write config to {}", config_path.display()))?;

    println!("Created config at {}", config_path.display());
    Ok(())
}
