//! Colored terminal output for publish operations
//!
//! Provides consistent, colored CLI output with proper formatting

use std::io::{self, Write};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputManager {
    /// Create a new output manager writing to stdout
    pub fn new() -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) -> io::Result<()> {
        self.marked(Color::Cyan, "ℹ", message)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.marked(Color::Green, "✓", message)
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.marked(Color::Yellow, "⚠", message)
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer)?;
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        writeln!(&mut buffer, "═══ {} ═══", title)?;
        buffer.reset()?;
        self.bufwtr.print(&buffer)
    }

    /// Print a `label: value` line with the label highlighted
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        buffer.set_color(ColorSpec::new().set_bold(true))?;
        write!(&mut buffer, "{}:", label)?;
        buffer.reset()?;
        writeln!(&mut buffer, " {}", value)?;
        self.bufwtr.print(&buffer)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer, "    {}", message)?;
        self.bufwtr.print(&buffer)
    }

    /// Print a plain message
    pub fn println(&self, message: &str) -> io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer, "{}", message)?;
        self.bufwtr.print(&buffer)
    }

    /// Print a question without a trailing newline and flush stdout
    pub fn prompt(&self, question: &str) -> io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(&mut buffer, "{}", question)?;
        buffer.reset()?;
        self.bufwtr.print(&buffer)?;
        io::stdout().flush()
    }

    fn marked(&self, color: Color, mark: &str, message: &str) -> io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(&mut buffer, "{}", mark)?;
        buffer.reset()?;
        writeln!(&mut buffer, " {}", message)?;
        self.bufwtr.print(&buffer)
    }
}
