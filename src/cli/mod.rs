//! Command-line interface for music-shelf.
//!
//! Commands inspect and rewrite the catalog descriptor without opening the
//! window; with no command the GUI launches.

mod commands;

pub use commands::{Cli, Commands, ExportKind, run_command};
