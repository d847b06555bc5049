//! Rearrange lines into grouped triplets.
//!
//! Lines are split into consecutive groups of `M`. Within each group, every
//! line but the last is paired with the last line, followed by a blank line.
//!
//! ```text
//! Input (M = 3)      Output
//! ┌───────────┐     ┌──────────────┐
//! │ a         │     │ a            │
//! │ b         │  →  │ c            │
//! │ c         │     │              │
//! └───────────┘     │ b            │
//!                   │ c            │
//!                   │              │
//!                   └──────────────┘
//! ```
//!
//! Blank and whitespace-only lines are dropped before counting, and each line
//! is trimmed. The transform is pure: same input, same output, no state.

use crate::error::ValidationResult;
use crate::models::{GroupSize, NonEmptyLines, OutputDocument};

/// Trim every line of `input` and drop the empty ones.
pub fn non_empty_lines(input: &str) -> NonEmptyLines<'_> {
    NonEmptyLines::from_text(input)
}

/// Check `m` and the line count without building output.
///
/// The group size is checked first, so an invalid `M` is reported even when
/// the line count would also fail.
pub fn validate(lines: &NonEmptyLines<'_>, m: i64) -> ValidationResult<GroupSize> {
    let size = GroupSize::new(m)?;
    lines.ensure_divisible(size)?;
    Ok(size)
}

/// Rearrange `input` into groups of `m` lines.
///
/// # Errors
///
/// - [`ValidationError::GroupSizeTooSmall`](crate::error::ValidationError::GroupSizeTooSmall) if `m <= 1`
/// - [`ValidationError::LineCountNotMultiple`](crate::error::ValidationError::LineCountNotMultiple)
///   if the non-empty line count is not a multiple of `m`
pub fn transform(input: &str, m: i64) -> ValidationResult<OutputDocument> {
    let lines = non_empty_lines(input);
    let size = validate(&lines, m)?;
    Ok(regroup(&lines, size))
}

/// Same as [`transform`], joined into a single string.
///
/// # Example
/// ```
/// use numgroup::process;
///
/// assert_eq!(process("a\nb\nc", 3).unwrap(), "a\nc\n\nb\nc\n");
/// assert!(process("a\nb\nc", 1).is_err());
/// ```
pub fn process(input: &str, m: i64) -> ValidationResult<String> {
    transform(input, m).map(|doc| doc.to_text())
}

/// Emit the triplets for already-validated lines.
pub(crate) fn regroup(lines: &NonEmptyLines<'_>, size: GroupSize) -> OutputDocument {
    let capacity = (lines.len() / size.get()) * (size.get() - 1) * 3;
    let mut out = Vec::with_capacity(capacity);

    for group in lines.groups(size) {
        for triplet in group.triplets() {
            out.extend(triplet.iter().map(|s| s.to_string()));
        }
    }

    OutputDocument::new(out)
}
