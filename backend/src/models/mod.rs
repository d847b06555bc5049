//! Domain models for the grouping transform.
//!
//! - [`NonEmptyLines`] - trimmed input lines with blanks removed
//! - [`GroupSize`] - validated group size (always > 1)
//! - [`Group`] - one contiguous block of `M` lines
//! - [`OutputDocument`] - the rearranged lines returned to the caller

use serde::Serialize;
use std::fmt;

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Non-empty lines
// =============================================================================

/// Input lines after trimming, with empty lines discarded.
///
/// Borrows from the raw input text; recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> NonEmptyLines<'a> {
    /// Split on `\n` or `\r\n`, trim each line, drop the blanks.
    pub fn from_text(input: &'a str) -> Self {
        let lines = input
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.lines
    }

    /// Check that the lines split into whole groups of `size`.
    pub fn ensure_divisible(&self, size: GroupSize) -> ValidationResult<()> {
        if self.lines.len() % size.get() != 0 {
            return Err(ValidationError::LineCountNotMultiple {
                lines: self.lines.len(),
                m: size.get(),
            });
        }
        Ok(())
    }

    /// Consecutive, non-overlapping groups of exactly `size` lines.
    ///
    /// A trailing partial block is not yielded; call
    /// [`ensure_divisible`](Self::ensure_divisible) first.
    pub fn groups(&self, size: GroupSize) -> impl Iterator<Item = Group<'_>> + '_ {
        self.lines
            .chunks_exact(size.get())
            .map(|members| Group { members })
    }
}

// =============================================================================
// Group size
// =============================================================================

/// Number of lines per group. Construction rejects anything below 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupSize(usize);

impl GroupSize {
    /// Validate a caller-supplied group size.
    ///
    /// Values that do not fit in `usize` are clamped; no non-empty input can
    /// divide evenly into groups that large, so the outcome is unchanged.
    pub fn new(m: i64) -> ValidationResult<Self> {
        if m <= 1 {
            return Err(ValidationError::GroupSizeTooSmall);
        }
        Ok(Self(usize::try_from(m).unwrap_or(usize::MAX)))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Group
// =============================================================================

/// A block of `M` consecutive lines.
#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
    members: &'a [&'a str],
}

impl<'a> Group<'a> {
    /// The final line, paired with every subject line.
    pub fn last(&self) -> &'a str {
        self.members[self.members.len() - 1]
    }

    /// Every line except the last.
    pub fn subjects(&self) -> &'a [&'a str] {
        &self.members[..self.members.len() - 1]
    }

    /// `[subject, last, ""]` for each subject line, in order.
    pub fn triplets(&self) -> impl Iterator<Item = [&'a str; 3]> + 'a {
        let last = self.last();
        self.subjects().iter().map(move |subject| [*subject, last, ""])
    }
}

// =============================================================================
// Output document
// =============================================================================

/// Rearranged output lines. Always complete; never a partial result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputDocument {
    lines: Vec<String>,
}

impl OutputDocument {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with `\n`, no trailing newline added.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for OutputDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_lines_trims_and_drops_blanks() {
        let lines = NonEmptyLines::from_text("  1  \r\n\n\t\n2\r\n 3");
        assert_eq!(lines.as_slice(), &["1", "2", "3"]);
    }

    #[test]
    fn test_group_size_rejects_small_values() {
        for m in [-5, 0, 1] {
            assert_eq!(GroupSize::new(m), Err(ValidationError::GroupSizeTooSmall));
        }
        assert_eq!(GroupSize::new(2).unwrap().get(), 2);
    }

    #[test]
    fn test_group_triplets() {
        let lines = NonEmptyLines::from_text("a\nb\nc");
        let size = GroupSize::new(3).unwrap();
        let group = lines.groups(size).next().unwrap();

        assert_eq!(group.last(), "c");
        assert_eq!(group.subjects(), &["a", "b"]);
        let triplets: Vec<_> = group.triplets().collect();
        assert_eq!(triplets, vec![["a", "c", ""], ["b", "c", ""]]);
    }

    #[test]
    fn test_ensure_divisible() {
        let lines = NonEmptyLines::from_text("1\n2\n3\n4");
        assert!(lines.ensure_divisible(GroupSize::new(2).unwrap()).is_ok());
        assert_eq!(
            lines.ensure_divisible(GroupSize::new(3).unwrap()),
            Err(ValidationError::LineCountNotMultiple { lines: 4, m: 3 })
        );
    }

    #[test]
    fn test_output_document_join() {
        let doc = OutputDocument::new(vec!["a".into(), "c".into(), String::new()]);
        assert_eq!(doc.to_text(), "a\nc\n");
        assert_eq!(doc.to_string(), "a\nc\n");
        assert_eq!(doc.len(), 3);
    }
}
