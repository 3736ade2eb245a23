//! # Diagram Editor CLI
//!
//! Headless host for the diagram editor core.
//!
//! Loads a template catalog, replays a script of drag, drop, click and delete
//! gestures against an editor session, and reports the resulting canvas and
//! export configuration as JSON.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p diagram-cli -- --catalog catalog.json --script session.json
//! ```
//!
//! ## With an export preset:
//!
//! ```bash
//! cargo run -p diagram-cli -- --catalog catalog.json --script session.json --preset print-pdf
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `EditorConfig` - Paths, canvas origin and export preset for a run
//! - `session` - Script steps, replay, and the JSON report

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod session;

pub use session::{load_catalog, load_script, run, ScriptStep, Session, SessionReport};

use std::path::PathBuf;

use clap::Parser;
use diagram_core::Point;

/// Command-line arguments for diagram-editor.
#[derive(Debug, Clone, Parser)]
#[command(name = "diagram-editor")]
#[command(about = "Replay diagram editing sessions against a component catalog")]
#[command(version)]
pub struct CliArgs {
    /// Template catalog JSON file ({category: {key: template}})
    #[arg(long, env = "DIAGRAM_CATALOG")]
    pub catalog: PathBuf,

    /// Gesture script JSON file (array of steps)
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Export preset id (e.g. print-pdf); the default configuration is used if omitted
    #[arg(long, env = "DIAGRAM_EXPORT_PRESET")]
    pub preset: Option<String>,

    /// Print the export presets and exit
    #[arg(long)]
    pub list_presets: bool,

    /// Canvas surface left edge in client pixels
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub origin_x: f32,

    /// Canvas surface top edge in client pixels
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub origin_y: f32,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

/// Configuration for one run.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Template catalog file.
    pub catalog: PathBuf,
    /// Gesture script file. No script means an empty session.
    pub script: Option<PathBuf>,
    /// Export preset id.
    pub preset: Option<String>,
    /// Print the export presets instead of running a session.
    pub list_presets: bool,
    /// Canvas surface origin in client coordinates.
    pub canvas_origin: Point,
    /// Pretty-print output.
    pub pretty: bool,
}

impl EditorConfig {
    /// Create a configuration for `catalog` with default values.
    #[must_use]
    pub fn new(catalog: impl Into<PathBuf>) -> Self {
        Self {
            catalog: catalog.into(),
            script: None,
            preset: None,
            list_presets: false,
            canvas_origin: Point::default(),
            pretty: false,
        }
    }
}

impl From<CliArgs> for EditorConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            catalog: args.catalog,
            script: args.script,
            preset: args.preset,
            list_presets: args.list_presets,
            canvas_origin: Point::new(args.origin_x, args.origin_y),
            pretty: args.pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_args_convert_to_config() {
        let args = CliArgs::parse_from([
            "diagram-editor",
            "--catalog",
            "catalog.json",
            "--script",
            "steps.json",
            "--preset",
            "vector-svg",
            "--origin-x",
            "-12.5",
            "--origin-y",
            "56",
            "--pretty",
        ]);
        let config = EditorConfig::from(args);
        assert_eq!(config.catalog, PathBuf::from("catalog.json"));
        assert_eq!(config.script, Some(PathBuf::from("steps.json")));
        assert_eq!(config.preset.as_deref(), Some("vector-svg"));
        assert_eq!(config.canvas_origin, Point::new(-12.5, 56.0));
        assert!(config.pretty);
        assert!(!config.list_presets);
    }

    #[test]
    fn catalog_is_required() {
        // Detach the env fallback so the result does not depend on the caller's environment.
        let command = CliArgs::command().mut_arg("catalog", |arg| arg.env(None::<&'static str>));
        let err = command
            .try_get_matches_from(["diagram-editor", "--pretty"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn config_defaults() {
        let config = EditorConfig::new("c.json");
        assert_eq!(config.canvas_origin, Point::new(0.0, 0.0));
        assert!(config.script.is_none());
        assert!(config.preset.is_none());
    }
}
