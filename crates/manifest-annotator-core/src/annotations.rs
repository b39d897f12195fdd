//! Annotation block parsing and merging
//!
//! A block is the body of `  annotations:`: every line indented by at least
//! four spaces. Lines indented by six or more continue the previous entry
//! (folded or literal scalars), so an entry owns a group of lines that moves
//! as a unit when the block is re-sorted.

use std::cmp::Ordering;

use tracing::debug;

use crate::{
    options::{AnnotationTarget, MergePolicy, Outcome},
    output::Output,
};

const ENTRY_INDENT: &str = "    ";
const CONTINUATION_INDENT: &str = "      ";

/// One annotation: its key and every raw line that belongs to it
#[derive(Debug, Clone)]
pub struct AnnotationEntry {
    key: String,
    lines: Vec<String>,
}

impl AnnotationEntry {
    /// Build a single-line entry with the value double-quoted
    #[must_use]
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            lines: vec![format!("{ENTRY_INDENT}{key}: {}", quote(value))],
        }
    }

    /// Start an entry from a `key: value` line; `None` when there is no `:`
    fn parse(line: &str) -> Option<Self> {
        line.split_once(':').map(|(key, _)| Self {
            key: key.trim().to_string(),
            lines: vec![line.to_string()],
        })
    }

    /// Trimmed text after the first `:` of the header line
    #[must_use]
    pub fn value_text(&self) -> &str {
        self.lines
            .first()
            .and_then(|line| line.split_once(':'))
            .map_or("", |(_, value)| value.trim())
    }

    /// Scalar value with YAML quoting removed.
    ///
    /// `None` for entries spanning several lines or using escapes that are
    /// not also JSON escapes; those never compare equal to a target value.
    fn decoded_value(&self) -> Option<String> {
        if self.lines.len() > 1 {
            return None;
        }
        let text = self.value_text();
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            serde_json::from_str::<String>(text).ok()
        } else if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
            Some(text[1..text.len() - 1].replace("''", "'"))
        } else {
            Some(text.to_string())
        }
    }
}

/// Entries sort by key, then by their trimmed value text
impl Ord for AnnotationEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.value_text().cmp(other.value_text()))
    }
}

impl PartialOrd for AnnotationEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for AnnotationEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AnnotationEntry {}

/// Double-quoted YAML scalar. JSON string escaping is a subset of YAML
/// double-quoted escaping.
fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

/// The parsed body of an `annotations:` mapping
#[derive(Debug, Clone, Default)]
pub struct AnnotationBlock {
    /// Lines seen before the first entry started
    preamble: Vec<String>,
    entries: Vec<AnnotationEntry>,
}

impl AnnotationBlock {
    /// Split raw block lines into entries.
    ///
    /// Lines without a `:` are kept verbatim with the entry before them and
    /// never start an entry of their own.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        lines
            .iter()
            .map(AsRef::as_ref)
            .fold(Self::default(), |mut block, line| {
                let entry = if line.starts_with(CONTINUATION_INDENT) {
                    None
                } else {
                    AnnotationEntry::parse(line)
                };
                match entry {
                    Some(entry) => block.entries.push(entry),
                    None => match block.entries.last_mut() {
                        Some(current) => current.lines.push(line.to_string()),
                        None => block.preamble.push(line.to_string()),
                    },
                }
                block
            })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    /// Ensure the target annotation is present.
    ///
    /// The block is sorted after an insert. A value rewritten under
    /// [`MergePolicy::Overwrite`] keeps its position.
    pub fn merge(&mut self, target: &AnnotationTarget, policy: MergePolicy) -> Outcome {
        if let Some(skip_key) = target.skip_key().filter(|key| self.contains(key)) {
            debug!(skip_key, "skip annotation present, leaving block untouched");
            return Outcome::Unchanged;
        }

        match self.entries.iter().position(|entry| entry.key == target.key()) {
            Some(index) => match policy {
                MergePolicy::Keep => {
                    debug!(key = target.key(), "annotation already present");
                    Outcome::Unchanged
                }
                MergePolicy::Overwrite => self.reconcile(index, target),
            },
            None => {
                debug!(key = target.key(), "inserting annotation");
                self.entries
                    .push(AnnotationEntry::new(target.key(), target.value()));
                self.entries.sort();
                Outcome::Changed
            }
        }
    }

    fn reconcile(&mut self, index: usize, target: &AnnotationTarget) -> Outcome {
        let Some(entry) = self.entries.get_mut(index) else {
            return Outcome::Unchanged;
        };
        if entry.decoded_value().as_deref() == Some(target.value()) {
            debug!(key = target.key(), "annotation value already up to date");
            return Outcome::Unchanged;
        }
        debug!(
            key = target.key(),
            old = entry.value_text(),
            "rewriting annotation value"
        );
        *entry = AnnotationEntry::new(target.key(), target.value());
        Outcome::Changed
    }

    pub fn write(&self, out: &mut Output) {
        out.push_lines(self.preamble.iter().map(String::as_str));
        self.entries
            .iter()
            .flat_map(|entry| entry.lines.iter())
            .for_each(|line| out.push_line(line));
    }
}
