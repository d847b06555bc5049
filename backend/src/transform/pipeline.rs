//! High-level pipeline API.
//!
//! Combines decoding, the grouping transform, and statistics, logging each
//! step through the log broadcaster.
//!
//! # Example
//!
//! ```rust,ignore
//! use numgroup::generate_file;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let result = generate_file(Path::new("numbers.txt"), 3, None).await?;
//!     println!("{}", result.output);
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::Path;

use super::grouper::{non_empty_lines, regroup, validate};
use crate::api::logs::{log_error, log_info, log_info_indent, log_success, log_warning};
use crate::error::{PipelineError, PipelineResult};
use crate::models::NonEmptyLines;
use crate::parser::{decode_with, DecodedInput};

/// Counts describing one run of the transform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStats {
    /// Encoding the input was decoded with
    pub encoding: String,
    /// Raw line count, blanks included
    pub input_lines: usize,
    /// Lines left after trimming and dropping blanks
    pub non_empty_lines: usize,
    /// Number of groups of M lines
    pub groups: usize,
    /// Lines in the output document
    pub output_lines: usize,
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    /// Output lines joined with `\n`
    pub output: String,
    /// Run statistics
    pub stats: GenerateStats,
}

/// Run the transform on already-decoded text.
pub fn generate_text(text: &str, m: i64) -> PipelineResult<GenerateResult> {
    generate_decoded(
        DecodedInput { text: text.to_string(), encoding: "utf-8".to_string() },
        m,
    )
}

/// Decode bytes (auto-detecting the encoding unless one is given) and run
/// the transform.
pub fn generate_bytes(bytes: &[u8], m: i64, encoding: Option<&str>) -> PipelineResult<GenerateResult> {
    log_info(format!("📖 Reading {} bytes...", bytes.len()));
    let decoded = decode_with(bytes, encoding)?;
    log_info_indent(format!("Encoding: {}", decoded.encoding), 1);
    generate_decoded(decoded, m)
}

/// Read a file and run the transform.
pub async fn generate_file(
    path: &Path,
    m: i64,
    encoding: Option<&str>,
) -> PipelineResult<GenerateResult> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PipelineError::Input(e.into()))?;
    generate_bytes(&bytes, m, encoding)
}

/// Validate only: report the statistics a run would produce, without
/// building the output.
pub fn check_text(text: &str, m: i64) -> PipelineResult<GenerateStats> {
    let lines = non_empty_lines(text);
    log_lines(text, &lines);

    let size = validate(&lines, m).map_err(|e| {
        log_error(e.reason());
        e
    })?;

    let groups = lines.len() / size.get();
    let stats = GenerateStats {
        encoding: "utf-8".to_string(),
        input_lines: text.lines().count(),
        non_empty_lines: lines.len(),
        groups,
        output_lines: groups * (size.get() - 1) * 3,
    };
    log_success(format!("Input is valid for M = {}", size));
    Ok(stats)
}

fn generate_decoded(decoded: DecodedInput, m: i64) -> PipelineResult<GenerateResult> {
    let text = decoded.text.as_str();
    let lines = non_empty_lines(text);
    log_lines(text, &lines);

    log_info(format!("📦 Grouping by M = {}...", m));
    let size = validate(&lines, m).map_err(|e| {
        log_error(e.reason());
        e
    })?;
    let doc = regroup(&lines, size);

    let groups = lines.len() / size.get();
    log_success(format!("{} groups → {} output lines", groups, doc.len()));

    Ok(GenerateResult {
        stats: GenerateStats {
            encoding: decoded.encoding,
            input_lines: text.lines().count(),
            non_empty_lines: lines.len(),
            groups,
            output_lines: doc.len(),
        },
        output: doc.to_text(),
    })
}

fn log_lines(text: &str, lines: &NonEmptyLines<'_>) {
    let total = text.lines().count();
    log_info(format!("📋 {} lines, {} non-empty", total, lines.len()));
    if total > lines.len() {
        log_warning(format!("{} blank lines skipped", total - lines.len()));
    }
}
