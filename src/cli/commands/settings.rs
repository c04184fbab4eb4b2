//! Config file commands.

use std::path::{Path, PathBuf};

use anyhow::bail;

use crate::config::{self, Config, ConfigError};
use crate::error::ResultExt;

/// Write a default config file to `path`, or to the default location
pub fn cmd_init_config(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => config::config_path()
            .ok_or(ConfigError::NoConfigDir)
            .with_context("locating default config")?,
    };
    let written = init_config(&target, force)?;
    println!("Wrote default config to {:?}", written);
    Ok(())
}

fn init_config(target: &Path, force: bool) -> anyhow::Result<PathBuf> {
    if target.exists() && !force {
        bail!("{:?} already exists (use --force to replace it)", target);
    }
    config::save_to(&Config::default(), target).with_context("writing default config")?;
    Ok(target.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        init_config(&path, false).unwrap();
        assert_eq!(config::load_from(&path), Config::default());
    }

    #[test]
    fn test_init_config_keeps_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_filter = \"debug\"\n").unwrap();

        assert!(init_config(&path, false).is_err());
        assert_eq!(config::load_from(&path).log_filter, "debug");

        init_config(&path, true).unwrap();
        assert_eq!(config::load_from(&path), Config::default());
    }
}
