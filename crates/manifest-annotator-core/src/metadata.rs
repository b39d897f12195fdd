//! Metadata and annotations block location
//!
//! Both blocks are found by the same two-state scanner: a header line opens
//! the block, every following line carrying the block's indent belongs to
//! it, and the first line without that indent closes it.

use std::ops::Range;

use tracing::debug;

use crate::{
    annotations::AnnotationBlock,
    filter::MetadataFields,
    header::ManifestHeader,
    options::{AnnotatorOptions, Outcome},
    output::Output,
};

const METADATA_HEADER: &str = "metadata:";
const METADATA_INDENT: &str = "  ";
const ANNOTATIONS_HEADER: &str = "  annotations:";
const ANNOTATIONS_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Outside,
    Inside { header: usize },
}

/// Position of a located block within the scanned lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    pub header: usize,
    pub body: Range<usize>,
}

/// Line text with any trailing ` #` comment and whitespace removed
fn header_text(line: &str) -> &str {
    line.split_once(" #").map_or(line, |(head, _)| head).trim_end()
}

/// Find the first line equal to `header` (ignoring a trailing comment)
/// and the run of `indent`-prefixed lines after it.
pub(crate) fn locate_block<S: AsRef<str>>(
    lines: &[S],
    header: &str,
    indent: &str,
) -> Option<Block> {
    let mut state = ScanState::Outside;
    for (index, line) in lines.iter().map(AsRef::as_ref).enumerate() {
        state = match state {
            ScanState::Outside if header_text(line) == header => {
                ScanState::Inside { header: index }
            }
            ScanState::Inside { header: start } if !line.starts_with(indent) => {
                return Some(Block {
                    header: start,
                    body: start + 1..index,
                });
            }
            other => other,
        };
    }
    match state {
        ScanState::Outside => None,
        ScanState::Inside { header: start } => Some(Block {
            header: start,
            body: start + 1..lines.len(),
        }),
    }
}

/// Write one manifest document, annotating its metadata block when the
/// document passes the filter.
pub(crate) fn process_manifest<S: AsRef<str>>(
    lines: &[S],
    options: &AnnotatorOptions,
    out: &mut Output,
) -> Outcome {
    let raw = || lines.iter().map(AsRef::as_ref);

    let Some(block) = locate_block(lines, METADATA_HEADER, METADATA_INDENT) else {
        out.push_lines(raw());
        return Outcome::Unchanged;
    };

    let header = ManifestHeader::scan(lines);
    out.push_lines(raw().take(block.header + 1));
    let outcome = process_metadata(&lines[block.body.clone()], &header, options, out);
    out.push_lines(raw().skip(block.body.end));
    outcome
}

fn process_metadata<S: AsRef<str>>(
    lines: &[S],
    header: &ManifestHeader,
    options: &AnnotatorOptions,
    out: &mut Output,
) -> Outcome {
    let raw = || lines.iter().map(AsRef::as_ref);

    let fields = MetadataFields::scan(lines);
    if !options.filter.matches(header, &fields) {
        debug!(
            kind = %header.kind,
            name = %fields.name,
            namespace = %fields.namespace,
            "manifest does not match filter"
        );
        out.push_lines(raw());
        return Outcome::Unchanged;
    }

    match locate_block(lines, ANNOTATIONS_HEADER, ANNOTATIONS_INDENT) {
        Some(block) => {
            out.push_lines(raw().take(block.header + 1));
            let outcome = merge_annotations(&lines[block.body.clone()], options, out);
            out.push_lines(raw().skip(block.body.end));
            outcome
        }
        None => {
            debug!(name = %fields.name, "adding annotations block");
            out.push_lines(raw());
            out.push_line(ANNOTATIONS_HEADER);
            merge_annotations::<&str>(&[], options, out);
            Outcome::Changed
        }
    }
}

fn merge_annotations<S: AsRef<str>>(
    lines: &[S],
    options: &AnnotatorOptions,
    out: &mut Output,
) -> Outcome {
    let mut block = AnnotationBlock::parse(lines);
    let outcome = block.merge(&options.target, options.policy);
    block.write(out);
    outcome
}
