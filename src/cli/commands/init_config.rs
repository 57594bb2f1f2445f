//! Write the default configuration.

use anyhow::{bail, Context, Result};
use feature_config::default_toml;
use std::fs;
use tracing::info;

use crate::cli::InitConfigArgs;

pub async fn run(args: InitConfigArgs) -> Result<()> {
    let rendered = default_toml().context("Failed to render default configuration")?;

    let Some(path) = args.output else {
        print!("{}", rendered);
        return Ok(());
    };

    if path.exists() && !args.force {
        bail!("'{}' already exists, pass --force to overwrite", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Default configuration written to {:?}", path);

    Ok(())
}
