//! Formatting options

/// Layout options shared by the query formatters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Number of spaces per indentation level (or tab width if using tabs)
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
    /// Indentation levels in front of every formatted line
    pub base_level: usize,
    /// Spaces per nesting level inside JSON documents
    pub json_indent: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        // Lines up with annotation arguments inside a class body
        Self {
            tab_size: 8,
            insert_spaces: true,
            base_level: 1,
            json_indent: 4,
        }
    }
}

impl FormatOptions {
    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }

    /// Indentation in front of every formatted line
    pub fn line_indent(&self) -> String {
        self.indent(self.base_level)
    }

    pub fn with_base_level(mut self, level: usize) -> Self {
        self.base_level = level;
        self
    }

    pub fn with_json_indent(mut self, width: usize) -> Self {
        self.json_indent = width;
        self
    }
}
