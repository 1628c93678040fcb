//! Foundation types for the bootls toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for index elements
//!
//! This module has NO dependencies on other bootls modules.

mod position;
mod span;

pub use position::{Position, Span};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
