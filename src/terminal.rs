//! Terminal view: prints each widget update as a line

use crate::core::View;
use std::io::Write;

/// Writes `status:`, `message:` and `progress:` lines to any writer.
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, label: &str, value: &str) {
        // Write errors (e.g. closed stdout) are ignored
        let _ = writeln!(self.out, "{:>8}: {}", label, value);
        let _ = self.out.flush();
    }
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> View for TerminalView<W> {
    fn set_status(&mut self, text: &str) {
        self.line("status", text);
    }

    fn set_message(&mut self, text: &str) {
        self.line("message", text);
    }

    fn set_progress_width(&mut self, width: &str) {
        self.line("progress", width);
    }
}
