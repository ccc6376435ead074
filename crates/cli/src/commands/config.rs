use crate::config::{load_config, save_config, AppConfig};
use anyhow::{bail, Result};
use std::path::Path;

pub fn show(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    save_config(path, &AppConfig::populated())?;
    println!("wrote {}", path.display());
    Ok(())
}
