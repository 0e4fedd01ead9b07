//! Layout settings for generated source

use serde::{Deserialize, Serialize};

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Number of blank lines between class members
    pub blank_lines_members: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        // Conventional Java codegen layout: two-space indent, one blank line between members
        Self {
            indent_width: 2,
            blank_lines_members: 1,
        }
    }
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the blank lines between members
    pub fn with_blank_lines_members(mut self, count: usize) -> Self {
        self.blank_lines_members = count;
        self
    }
}
