//! # numgroup - rearrange lines into grouped triplets
//!
//! Splits a list of lines into consecutive groups of `M` and pairs every
//! line of a group with the group's last line.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Text/bytes  │────▶│   Parser    │────▶│   Grouper   │────▶│ Output text │
//! │ (file/HTTP) │     │  (auto-enc) │     │  (M lines)  │     │ (triplets)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use numgroup::process;
//!
//! let out = process("1\n2\n3\n4", 2).unwrap();
//! assert_eq!(out, "1\n2\n\n3\n4\n");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (NonEmptyLines, GroupSize, OutputDocument)
//! - [`parser`] - Input decoding and group size parsing
//! - [`transform`] - Grouping transform and pipeline
//! - [`config`] - Environment-driven settings
//! - [`api`] - HTTP API server and log broadcasting

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    InputError,
    PipelineError,
    ServerError,
    ValidationError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Group,
    GroupSize,
    NonEmptyLines,
    OutputDocument,
};

// =============================================================================
// Re-exports - Grouper
// =============================================================================

pub use transform::grouper::{non_empty_lines, process, transform, validate};

// =============================================================================
// Re-exports - Input parsing
// =============================================================================

pub use parser::{
    decode_auto,
    decode_content,
    decode_with,
    detect_encoding,
    ensure_size,
    parse_group_size,
    read_input,
    DecodedInput,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    check_text,
    generate_bytes,
    generate_file,
    generate_text,
    GenerateResult,
    GenerateStats,
};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::Settings;

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{
    error_response,
    GenerateRequest,
    GenerateResponse,
    RawGroupSize,
    ResponseMetadata,
};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
