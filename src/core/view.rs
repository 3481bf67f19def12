//! Display seam for the status widget

/// Sink for the three display values the widget drives.
///
/// The browser renders into DOM elements, the CLI into terminal lines.
pub trait View {
    fn set_status(&mut self, text: &str);
    fn set_message(&mut self, text: &str);
    /// `width` is a CSS width value, e.g. `"42%"`
    fn set_progress_width(&mut self, width: &str);
}

/// In-memory view keeping the current values and every status written.
///
/// Useful for headless embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryView {
    pub status_history: Vec<String>,
    pub message: Option<String>,
    pub progress_width: Option<String>,
}

impl MemoryView {
    pub fn status(&self) -> Option<&str> {
        self.status_history.last().map(String::as_str)
    }
}

impl View for MemoryView {
    fn set_status(&mut self, text: &str) {
        self.status_history.push(text.to_string());
    }

    fn set_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }

    fn set_progress_width(&mut self, width: &str) {
        self.progress_width = Some(width.to_string());
    }
}
