//! Error types for the number group generator.
//!
//! - [`ValidationError`] - the grouping transform rejected its input
//! - [`InputError`] - reading, decoding, or parsing caller input
//! - [`PipelineError`] - top-level orchestration errors
//! - [`ServerError`] - HTTP adapter errors
//!
//! Conversion between levels is automatic via `From` implementations,
//! so `?` works across error boundaries.

use thiserror::Error;

// =============================================================================
// Validation Errors
// =============================================================================

/// The grouping transform refused the input.
///
/// Both variants are terminal for the call: no output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Group size was zero, one, or negative.
    #[error("M must be greater than 1")]
    GroupSizeTooSmall,

    /// The non-empty line count does not divide evenly into groups.
    #[error("line count must be a multiple of M")]
    LineCountNotMultiple { lines: usize, m: usize },
}

impl ValidationError {
    /// Human-readable reason, suitable for showing in place of output.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while turning caller input into text and a group size.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read file or stdin.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The group size field was left blank.
    #[error("please enter the group size")]
    MissingGroupSize,

    /// The group size is not an integer.
    #[error("invalid M: '{0}'")]
    InvalidGroupSize(String),

    /// Input exceeds the configured size limit.
    #[error("Input too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input could not be read or parsed.
    #[error("{0}")]
    Input(#[from] InputError),

    /// The transform rejected the input.
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl PipelineError {
    /// Whether the caller supplied bad data (as opposed to an I/O failure).
    pub fn is_rejection(&self) -> bool {
        !matches!(self, PipelineError::Input(InputError::Io(_)))
    }
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Request body exceeded the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Failed to bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for the grouping transform.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for input operations.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        assert_eq!(
            ValidationError::GroupSizeTooSmall.reason(),
            "M must be greater than 1"
        );
        assert_eq!(
            ValidationError::LineCountNotMultiple { lines: 4, m: 3 }.reason(),
            "line count must be a multiple of M"
        );
    }

    #[test]
    fn test_error_conversion_chain() {
        // ValidationError -> PipelineError keeps the bare reason
        let pipeline_err: PipelineError = ValidationError::GroupSizeTooSmall.into();
        assert_eq!(pipeline_err.to_string(), "M must be greater than 1");
        assert!(pipeline_err.is_rejection());

        // InputError -> PipelineError -> ServerError
        let input_err = InputError::InvalidGroupSize("abc".into());
        let server_err: ServerError = PipelineError::from(input_err).into();
        assert!(server_err.to_string().contains("invalid M"));
    }

    #[test]
    fn test_io_is_not_rejection() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PipelineError = InputError::from(io).into();
        assert!(!err.is_rejection());
    }
}
