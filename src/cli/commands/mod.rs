//! CLI command definitions and dispatch.
//!
//! Each group of subcommands lives in its own submodule:
//! - `catalog`: listing, validating, exporting and reformatting the descriptor
//! - `settings`: writing the config file

mod catalog;
mod settings;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{self, Config};

pub use catalog::{cmd_check, cmd_export, cmd_format, cmd_list};
pub use settings::cmd_init_config;

/// Music Shelf: browse and play an album catalog
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog descriptor to load (overrides the config file)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Print albums and their numbered tracks
    List,
    /// Validate the catalog descriptor
    Check,
    /// Print the catalog as JSON
    Export {
        /// What to export
        #[arg(value_enum)]
        kind: ExportKind,
        /// Only this album (0-based index)
        #[arg(long)]
        album: Option<usize>,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// Rewrite the descriptor in canonical form
    Format {
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a config file with default settings
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Albums,
    Tracks,
    Artists,
}

impl Cli {
    /// Load the config this invocation asks for, with `--catalog` applied.
    pub fn load_config(&self) -> Config {
        let mut config = match &self.config {
            Some(path) => config::load_from(path),
            None => config::load(),
        };
        if let Some(catalog) = &self.catalog {
            config.library.catalog_path = catalog.clone();
        }
        config
    }
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified
/// (meaning the GUI should launch).
pub fn run_command(cli: &Cli, config: &Config) -> anyhow::Result<bool> {
    let catalog_path = &config.library.catalog_path;

    match &cli.command {
        None => return Ok(false),
        Some(Commands::List) => cmd_list(catalog_path)?,
        Some(Commands::Check) => cmd_check(catalog_path)?,
        Some(Commands::Export {
            kind,
            album,
            pretty,
        }) => cmd_export(catalog_path, *kind, *album, *pretty)?,
        Some(Commands::Format { output }) => cmd_format(catalog_path, output.as_deref())?,
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config.as_deref(), *force)?,
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from(["music-shelf", "export", "tracks", "--album", "1", "--pretty"])
            .unwrap();
        match cli.command {
            Some(Commands::Export {
                kind,
                album,
                pretty,
            }) => {
                assert_eq!(kind, ExportKind::Tracks);
                assert_eq!(album, Some(1));
                assert!(pretty);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_global_catalog_flag() {
        let cli = Cli::try_parse_from(["music-shelf", "check", "--catalog", "shelf.txt"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("shelf.txt")));
    }

    #[test]
    fn test_no_command_launches_gui() {
        let cli = Cli::try_parse_from(["music-shelf"]).unwrap();
        assert!(!run_command(&cli, &Config::default()).unwrap());
    }

    #[test]
    fn test_catalog_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let cli = Cli::try_parse_from([
            "music-shelf",
            "--config",
            config_path.to_str().unwrap(),
            "--catalog",
            "other.txt",
        ])
        .unwrap();
        let config = cli.load_config();
        assert_eq!(config.library.catalog_path, PathBuf::from("other.txt"));
    }
}
