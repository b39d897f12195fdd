//! Annotate command implementation

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]

use std::{path::PathBuf, str::FromStr};

use anyhow::{anyhow, Result};
use clap::ArgMatches;
use manifest_annotator_core::{
    annotate_file, annotate_text, read_manifest, AnnotationTarget, AnnotatorOptions,
    FilterCriteria, MergePolicy,
};
use tracing::info;

/// Annotate command options
#[derive(Debug, Clone)]
pub struct AnnotateArgs {
    /// Manifest file, rewritten in place
    pub file: PathBuf,
    pub options: AnnotatorOptions,
    /// Print the result instead of writing it
    pub dry_run: bool,
}

impl AnnotateArgs {
    /// Build the command options from parsed arguments.
    ///
    /// Returns `Ok(None)` unless exactly FILENAME, ANNOTATION and VALUE were
    /// given; the caller prints usage in that case.
    pub fn from_matches(matches: &ArgMatches) -> Result<Option<Self>> {
        if matches.get_many::<String>("extra").is_some() {
            return Ok(None);
        }
        let positional = |id: &str| matches.get_one::<String>(id).cloned();
        let (Some(file), Some(key), Some(value)) = (
            positional("filename"),
            positional("annotation"),
            positional("value"),
        ) else {
            return Ok(None);
        };
        let flag = |id: &str| positional(id).unwrap_or_default();

        let target = AnnotationTarget::new(key, value)?.with_skip_key(flag("skip_annotation"));
        let filter = FilterCriteria::default()
            .with_kind(flag("kind"))
            .with_group_version(flag("group_version"))
            .with_name(flag("name"))
            .with_namespace(flag("namespace"));
        let policy = MergePolicy::from_str(&flag("on_conflict"))
            .map_err(|e| anyhow!("invalid --on-conflict value: {e}"))?;

        Ok(Some(Self {
            file: PathBuf::from(file),
            options: AnnotatorOptions::new(target)
                .with_filter(filter)
                .with_policy(policy),
            dry_run: matches.get_flag("dry_run"),
        }))
    }
}

/// Run the annotate command
///
/// # Errors
///
/// Returns an error if:
/// - The manifest file cannot be read
/// - The rewritten manifest cannot be written back
pub fn run(args: &AnnotateArgs) -> Result<()> {
    if args.dry_run {
        return run_dry(args);
    }

    let report = annotate_file(&args.file, &args.options)?;
    info!(
        file = %args.file.display(),
        documents = report.documents,
        changed = report.changed,
        "annotation complete"
    );
    Ok(())
}

fn run_dry(args: &AnnotateArgs) -> Result<()> {
    let input = read_manifest(&args.file)?;
    let annotated = annotate_text(&input, &args.options);
    if annotated.report.outcome().is_changed() {
        #[allow(clippy::print_stdout)]
        {
            print!("{}", annotated.text);
        }
    }
    info!(
        file = %args.file.display(),
        documents = annotated.report.documents,
        changed = annotated.report.changed,
        "dry run complete, file not written"
    );
    Ok(())
}
