//! JSON document queries (e.g. MongoDB `@Query` strings)

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::{FormatError, FormatOptions, QueryFormatter};

/// Pretty-prints a JSON query with a fixed indentation width
///
/// Input must be strict JSON. Lenient Mongo shell syntax such as single
/// quoted keys or `?0` parameter markers does not parse, so such queries
/// come back unchanged from [`QueryFormatter::format`].
#[derive(Debug, Clone, Default)]
pub struct JsonQueryFormatter {
    options: FormatOptions,
}

impl JsonQueryFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }
}

impl QueryFormatter for JsonQueryFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn try_format(&self, query: &str) -> Result<String, FormatError> {
        let value: Value = serde_json::from_str(query)?;

        let step = " ".repeat(self.options.json_indent);
        let mut buf = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(step.as_bytes()));
        value.serialize(&mut serializer)?;
        // serde_json only writes valid UTF-8
        let pretty = String::from_utf8_lossy(&buf);

        let indent = self.options.line_indent();
        let lines: Vec<String> = pretty.lines().map(|line| format!("{indent}{line}")).collect();
        Ok(lines.join("\n"))
    }
}
