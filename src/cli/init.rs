//! Init command implementation

use anyhow::{bail, Result};
use tracing::info;

use frisian_progress::config::{write_locked, Config, DEFAULT_CONFIG};

use super::Context;

/// Write the default configuration file
pub fn init_command(ctx: &Context, force: bool) -> Result<()> {
    let path = ctx
        .config_path
        .clone()
        .unwrap_or_else(Config::global_config_path);

    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_locked(&path, DEFAULT_CONFIG)?;
    info!("Wrote config to {}", path.display());
    println!("Created {}", path.display());
    Ok(())
}
