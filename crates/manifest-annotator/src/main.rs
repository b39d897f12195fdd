//! Manifest-annotator CLI
//!
//! Binary name: `manifest-annotator`

use std::process;

use anyhow::{Context, Result};
use manifest_annotator::{
    cli::build_cli,
    commands::annotate::{self, AnnotateArgs},
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_cli() -> Result<()> {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match AnnotateArgs::from_matches(&matches)? {
        Some(args) => annotate::run(&args),
        None => build_cli()
            .print_help()
            .context("Failed to print usage"),
    }
}

fn main() {
    if let Err(err) = run_cli() {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {err}");
        }

        let code = err
            .downcast_ref::<manifest_annotator_core::Error>()
            .map_or(1, manifest_annotator_core::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}
