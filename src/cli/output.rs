//! Colored terminal output for release operations

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager.
    ///
    /// Status messages go to stderr so stdout carries only requested output
    /// (`plan`, `version`).
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stderr(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    fn marked(
        &self,
        mark: &str,
        mark_color: &ColorSpec,
        text_color: Option<&mut ColorSpec>,
        message: &str,
    ) {
        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(mark_color);
        let _ = write!(&mut buffer, "{}", mark);
        let _ = buffer.reset();
        if let Some(spec) = text_color {
            let _ = buffer.set_color(spec);
        }
        let _ = writeln!(&mut buffer, " {}", message);
        let _ = buffer.reset();
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print an info message (normal output)
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.marked("ℹ", ColorSpec::new().set_fg(Some(Color::Cyan)), None, message);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.marked(
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            None,
            message,
        );
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.marked(
            "⚠",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            Some(ColorSpec::new().set_fg(Some(Color::Yellow))),
            message,
        );
    }

    /// Print an error message (always shown)
    pub fn error(&self, message: &str) {
        let mut buffer = self.bufwtr.buffer();

        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || buffer.reset().is_err()
            || self.bufwtr.print(&buffer).is_err()
        {
            eprintln!("✗ {}", message);
        }
    }

    /// Print a verbose/debug message (only in verbose mode)
    pub fn verbose(&self, message: &str) {
        if !self.verbose || self.quiet {
            return;
        }
        self.marked(
            "→",
            ColorSpec::new().set_fg(Some(Color::Blue)),
            Some(ColorSpec::new().set_fg(Some(Color::White))),
            message,
        );
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "    {}", message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print a plain status message (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{}", message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}
