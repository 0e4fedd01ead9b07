//! Output writer with indentation tracking
//!
//! Backends emit generated source line by line through a `SourceWriter`.

use super::config::FormatConfig;

/// Writer that tracks indentation and builds the output text
pub struct SourceWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Configuration
    config: FormatConfig,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl SourceWriter {
    /// Create a new writer with the given config
    pub fn new(config: FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
            at_line_start: true,
        }
    }

    /// Get the written output
    pub fn finish(self) -> String {
        self.output
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Write indentation if at line start
    fn write_indent(&mut self) {
        if self.at_line_start {
            let width = self.indent_level * self.config.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write just a newline; blank lines carry no indentation
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Blank lines between members, as configured
    pub fn member_gap(&mut self) {
        for _ in 0..self.config.blank_lines_members {
            self.newline();
        }
    }

    /// Open a `{` block on the current line
    pub fn open_block(&mut self, header: &str) {
        self.write(header);
        self.writeln(" {");
        self.indent();
    }

    /// Close the innermost block
    pub fn close_block(&mut self) {
        self.dedent();
        self.writeln("}");
    }

    pub fn current_indent(&self) -> usize {
        self.indent_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_writer() -> SourceWriter {
        SourceWriter::new(FormatConfig::default())
    }

    // ========================================
    // Write tests
    // ========================================

    #[test]
    fn test_new_writer_empty_output() {
        assert_eq!(default_writer().finish(), "");
    }

    #[test]
    fn test_write_empty_string_does_not_indent() {
        let mut writer = default_writer();
        writer.indent();
        writer.write("");
        writer.newline();
        assert_eq!(writer.finish(), "\n");
    }

    #[test]
    fn test_writeln_multiple() {
        let mut writer = default_writer();
        writer.writeln("line1");
        writer.writeln("line2");
        assert_eq!(writer.finish(), "line1\nline2\n");
    }

    // ========================================
    // Indent/dedent tests
    // ========================================

    #[test]
    fn test_dedent_at_zero_stays_zero() {
        let mut writer = default_writer();
        writer.dedent();
        assert_eq!(writer.current_indent(), 0);
    }

    #[test]
    fn test_indent_width_4() {
        let mut writer = SourceWriter::new(FormatConfig::new().with_indent_width(4));
        writer.indent();
        writer.write("text");
        assert_eq!(writer.finish(), "    text");
    }

    // ========================================
    // Block tests
    // ========================================

    #[test]
    fn test_nested_blocks() {
        let mut writer = default_writer();
        writer.open_block("public class A");
        writer.open_block("public A()");
        writer.close_block();
        writer.member_gap();
        writer.writeln("public int x;");
        writer.close_block();
        assert_eq!(writer.finish(), "public class A {\n  public A() {\n  }\n\n  public int x;\n}\n");
    }

    #[test]
    fn test_member_gap_respects_config() {
        let mut writer = SourceWriter::new(FormatConfig::new().with_blank_lines_members(2));
        writer.writeln("a");
        writer.member_gap();
        writer.writeln("b");
        assert_eq!(writer.finish(), "a\n\n\nb\n");
    }
}
