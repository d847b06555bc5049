//! Transformation module.
//!
//! - Grouper: the pure line-regrouping transform
//! - Pipeline: decoding, transform, and statistics with logging

pub mod grouper;
pub mod pipeline;

pub use grouper::{non_empty_lines, process, transform, validate};
pub use pipeline::*;
