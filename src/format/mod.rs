//! Query reformatting
//!
//! Formatters re-lex a query and rebuild its text with line breaks and
//! indentation; they never parse it fully. Formatting is fail-open: any
//! input that cannot be handled comes back unchanged.

mod jpql;
mod json;
mod options;

#[cfg(test)]
mod tests;

pub use jpql::JpqlQueryFormatter;
pub use json::JsonQueryFormatter;
pub use options::FormatOptions;

use thiserror::Error;
use tracing::debug;

/// Why a query could not be formatted
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unrecognized input {text:?} at offset {offset}")]
    Unrecognized { offset: u32, text: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait QueryFormatter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Format a non-blank query, or say why it cannot be formatted
    fn try_format(&self, query: &str) -> Result<String, FormatError>;

    /// Format `query`; blank or unformattable input is returned unchanged
    fn format(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return query.to_string();
        }
        match self.try_format(query) {
            Ok(formatted) => formatted,
            Err(error) => {
                debug!(formatter = self.name(), %error, "query left unformatted");
                query.to_string()
            }
        }
    }

    /// [`format`](QueryFormatter::format) for an optional query; `None` stays `None`
    fn format_opt(&self, query: Option<&str>) -> Option<String> {
        query.map(|query| self.format(query))
    }
}
