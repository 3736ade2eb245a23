//! # Diagram Editor
//!
//! Replays a gesture script against a template catalog and prints the
//! resulting canvas and export configuration.

use clap::Parser;
use diagram_cli::{CliArgs, EditorConfig};
use diagram_core::{resolve_default, ExportModel};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = EditorConfig::from(args);

    if config.list_presets {
        let model = ExportModel::new(resolve_default());
        print_json(model.presets(), config.pretty)?;
        return Ok(());
    }

    tracing::info!(
        catalog = %config.catalog.display(),
        script = ?config.script,
        preset = ?config.preset,
        "Starting diagram editor session"
    );

    let report = diagram_cli::run(&config)?;
    print_json(&report, config.pretty)
}

/// Logs go to stderr so stdout carries only the JSON report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,diagram_core=debug,diagram_cli=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format in production (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
