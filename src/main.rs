//! Music Shelf - browse and play a fixed catalog of albums.
//!
//! The catalog comes from a line-oriented descriptor file. With no
//! subcommand the GUI launches; subcommands inspect, export and reformat
//! the descriptor.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod hit;
pub mod navigation;
pub mod player;
pub mod scroll;
#[cfg(test)]
pub mod test_utils;
pub mod ui;

use clap::Parser;
use error::ResultExt;
use iced::{Size, application, window};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};
use ui::ShelfApp;

const DEFAULT_LOG_FILTER: &str = "music_shelf=info";

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    let filter = init_logging();
    let config = args.load_config();
    if let Some(handle) = &filter {
        apply_log_filter(handle, &config.log_filter);
    }

    if cli::run_command(&args, &config)? {
        return Ok(());
    }

    let catalog_path = config.library.catalog_path.clone();
    let catalog = catalog::load(&catalog_path)
        .with_context(format!("loading {:?}", catalog_path))
        .inspect_err(|e| tracing::error!("Cannot start without a catalog: {}", e))?;

    let size = Size::new(config.window.design_width, config.window.design_height);
    application("Music Shelf", ShelfApp::update, ShelfApp::view)
        .subscription(ShelfApp::subscription)
        .window(window::Settings {
            size,
            min_size: Some(Size::new(size.width / 4.0, size.height / 4.0)),
            ..Default::default()
        })
        .run_with(move || ShelfApp::new(catalog, &config))
        .map_err(|e| error::Error::gui(e.to_string()).into())
}

/// Install the subscriber before anything else logs.
///
/// Returns a handle for swapping in the configured filter, or `None` when
/// `RUST_LOG` is set and takes precedence.
fn init_logging() -> Option<FilterHandle> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_set = from_env.is_some();
    let (filter, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
    (!env_set).then_some(handle)
}

fn apply_log_filter(handle: &FilterHandle, directive: &str) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                tracing::warn!("Could not apply log filter {:?}: {}", directive, e);
            }
        }
        Err(e) => tracing::warn!("Ignoring invalid log_filter {:?}: {}", directive, e),
    }
}
