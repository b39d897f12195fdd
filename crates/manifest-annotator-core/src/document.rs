//! Document splitting and whole-file rewriting

use std::{fs, path::Path};

use tracing::{debug, info};

use crate::{
    metadata::process_manifest,
    options::{AnnotatorOptions, Outcome},
    output::Output,
    Error, Result,
};

const SEPARATOR: &str = "---";

/// Per-file summary of an annotation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateReport {
    /// Documents with at least one non-blank line
    pub documents: usize,
    /// Documents whose text changed
    pub changed: usize,
}

impl AnnotateReport {
    fn record(&mut self, lines: &[&str], outcome: Outcome) {
        if lines.iter().any(|line| !line.trim().is_empty()) {
            self.documents += 1;
        }
        if outcome.is_changed() {
            self.changed += 1;
        }
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        if self.changed > 0 {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        }
    }
}

/// Result of annotating a whole text
#[derive(Debug, Clone)]
pub struct Annotated {
    pub text: String,
    pub report: AnnotateReport,
}

/// Annotate every document of `input`.
///
/// Separator lines (anything starting with `---`) are copied verbatim. Every
/// output line ends with `\n`, so the text is only worth writing back when
/// the report says something changed.
pub fn annotate_text(input: &str, options: &AnnotatorOptions) -> Annotated {
    let lines: Vec<&str> = input.lines().collect();
    let mut out = Output::with_capacity(input.len() + 64);
    let mut report = AnnotateReport::default();

    for segment in lines.split_inclusive(|line| line.starts_with(SEPARATOR)) {
        let (document, separator) = match segment.split_last() {
            Some((last, document)) if last.starts_with(SEPARATOR) => (document, Some(*last)),
            _ => (segment, None),
        };
        let outcome = process_manifest(document, options, &mut out);
        report.record(document, outcome);
        if let Some(separator) = separator {
            out.push_line(separator);
        }
    }

    debug!(
        documents = report.documents,
        changed = report.changed,
        lines = out.line_count(),
        "annotated manifest text"
    );
    Annotated {
        text: out.into_string(),
        report,
    }
}

/// Read a manifest file fully into memory
pub fn read_manifest(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace a manifest file's content with one whole-file write
pub fn write_manifest(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Annotate a file in place.
///
/// The file is written once, with the whole new content, and only when at
/// least one document changed.
pub fn annotate_file(
    path: impl AsRef<Path>,
    options: &AnnotatorOptions,
) -> Result<AnnotateReport> {
    let path = path.as_ref();
    let input = read_manifest(path)?;
    let Annotated { text, report } = annotate_text(&input, options);

    if report.outcome().is_changed() {
        write_manifest(path, &text)?;
        info!(
            path = %path.display(),
            annotation = options.target.key(),
            changed = report.changed,
            "rewrote manifest file"
        );
    } else {
        debug!(path = %path.display(), "manifest file unchanged");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnnotationTarget, FilterCriteria};

    fn options(key: &str, value: &str) -> Result<AnnotatorOptions> {
        Ok(AnnotatorOptions::new(AnnotationTarget::new(key, value)?))
    }

    #[test]
    fn test_readme_example() -> Result<()> {
        let annotated = annotate_text("metadata:\n  name: foo\n", &options("team", "platform")?);
        assert_eq!(
            annotated.text,
            "metadata:\n  name: foo\n  annotations:\n    team: \"platform\"\n"
        );
        assert_eq!(annotated.report.outcome(), Outcome::Changed);
        Ok(())
    }

    #[test]
    fn test_separators_are_kept_in_place() -> Result<()> {
        let input = "---\nkind: A\nmetadata:\n  name: a\n--- # second\nkind: B\n---\n";
        let opts = options("team", "platform")?
            .with_filter(FilterCriteria::default().with_kind("A"));
        let annotated = annotate_text(input, &opts);
        assert_eq!(
            annotated.text,
            "---\nkind: A\nmetadata:\n  name: a\n  annotations:\n    team: \"platform\"\n--- # second\nkind: B\n---\n"
        );
        assert_eq!(
            annotated.report,
            AnnotateReport {
                documents: 2,
                changed: 1
            }
        );
        Ok(())
    }

    #[test]
    fn test_only_matching_document_changes() -> Result<()> {
        let first = "kind: Service\nmetadata:\n  name: web\n";
        let second = "kind: Deployment\nmetadata:\n  name: web\n  namespace: prod\n";
        let third = "kind: Deployment\nmetadata:\n  name: web\n  namespace: dev\n";
        let input = format!("{first}---\n{second}---\n{third}");
        let opts = options("team", "platform")?.with_filter(
            FilterCriteria::default()
                .with_kind("Deployment")
                .with_namespace("prod"),
        );
        let annotated = annotate_text(&input, &opts);
        let documents: Vec<&str> = annotated.text.split("---\n").collect();
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0], first);
        assert_eq!(
            documents[1],
            "kind: Deployment\nmetadata:\n  name: web\n  namespace: prod\n  annotations:\n    team: \"platform\"\n"
        );
        assert_eq!(documents[2], third);
        Ok(())
    }

    #[test]
    fn test_empty_input_is_unchanged() -> Result<()> {
        let annotated = annotate_text("", &options("team", "platform")?);
        assert_eq!(annotated.text, "");
        assert_eq!(annotated.report, AnnotateReport::default());
        Ok(())
    }

    #[test]
    fn test_crlf_input_is_normalized() -> Result<()> {
        let annotated = annotate_text("metadata:\r\n  name: foo\r\n", &options("team", "x")?);
        assert_eq!(
            annotated.text,
            "metadata:\n  name: foo\n  annotations:\n    team: \"x\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_annotate_file_rewrites_and_is_idempotent() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|source| Error::Read {
            path: "tempdir".into(),
            source,
        })?;
        let path = dir.path().join("deploy.yaml");
        fs::write(&path, "kind: A\nmetadata:\n  name: foo\n").map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;

        let opts = options("team", "platform")?;
        let first = annotate_file(&path, &opts)?;
        assert_eq!(first.outcome(), Outcome::Changed);
        let after_first = read_manifest(&path)?;

        let second = annotate_file(&path, &opts)?;
        assert_eq!(second.outcome(), Outcome::Unchanged);
        assert_eq!(read_manifest(&path)?, after_first);
        Ok(())
    }

    #[test]
    fn test_unchanged_file_keeps_missing_trailing_newline() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|source| Error::Read {
            path: "tempdir".into(),
            source,
        })?;
        let path = dir.path().join("svc.yaml");
        let content = "kind: Service\nmetadata:\n  name: web";
        fs::write(&path, content).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;

        let opts = options("team", "platform")?
            .with_filter(FilterCriteria::default().with_kind("Deployment"));
        let report = annotate_file(&path, &opts)?;
        assert_eq!(report.changed, 0);
        assert_eq!(read_manifest(&path)?, content);
        Ok(())
    }

    /// Privileged users write through read-only permissions
    fn permissions_enforced(path: &Path) -> bool {
        fs::OpenOptions::new().append(true).open(path).is_err()
    }

    #[test]
    fn test_write_failure_is_write_error() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|source| Error::Read {
            path: "tempdir".into(),
            source,
        })?;
        let parent = dir.path().join("not-a-dir");
        write_manifest(&parent, "plain file\n")?;

        let result = write_manifest(&parent.join("deploy.yaml"), "kind: A\n");
        assert!(matches!(result, Err(Error::Write { .. })));
        assert_eq!(result.map_err(|e| e.exit_code()), Err(2));
        Ok(())
    }

    #[test]
    fn test_read_only_file_is_write_error_and_left_intact() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|source| Error::Read {
            path: "tempdir".into(),
            source,
        })?;
        let path = dir.path().join("deploy.yaml");
        let content = "kind: A\nmetadata:\n  name: foo\n";
        write_manifest(&path, content)?;

        let mut permissions = fs::metadata(&path)
            .map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?
            .permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        if !permissions_enforced(&path) {
            return Ok(());
        }

        let result = annotate_file(&path, &options("team", "platform")?);
        assert!(matches!(result, Err(Error::Write { .. })));
        assert_eq!(read_manifest(&path)?, content);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_read_error() -> Result<()> {
        let result = annotate_file("/nonexistent/manifest.yaml", &options("team", "x")?);
        assert!(matches!(result, Err(Error::Read { .. })));
        Ok(())
    }
}
