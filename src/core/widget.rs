//! Connection status widget
//!
//! Reacts to the four WebSocket lifecycle events and writes status, last
//! message and progress width into a [`View`]. The transport drives every
//! state transition; the widget never opens, closes or retries on its own.

use super::{ConnectionState, View, WidgetConfig, WidgetError};
use tracing::{debug, error, info, warn};

/// Outbound side of a WebSocket connection
pub trait Transport {
    fn is_open(&self) -> bool;
    /// Write one text frame
    fn send_text(&self, text: &str) -> Result<(), WidgetError>;
}

/// CSS width for a progress payload, taken verbatim.
///
/// Non-numeric or out-of-range payloads are passed through unchanged.
pub fn progress_width(data: &str) -> String {
    format!("{}%", data)
}

pub struct ConnectionStatusWidget<T, V> {
    config: WidgetConfig,
    transport: T,
    view: V,
    state: ConnectionState,
}

impl<T: Transport, V: View> ConnectionStatusWidget<T, V> {
    /// Bind the widget to a transport and view, showing the not-connected status.
    pub fn new(config: WidgetConfig, transport: T, mut view: V) -> Self {
        view.set_status(&config.labels.not_connected);
        Self {
            config,
            transport,
            view,
            state: ConnectionState::Connecting,
        }
    }

    pub fn on_open(&mut self) {
        info!("WebSocket connection opened");
        self.state = ConnectionState::Open;

        let greeting = self.config.greeting.as_str();
        debug!(greeting, "Sending greeting");
        if let Err(e) = self.transport.send_text(greeting) {
            error!(error = %e, "Failed to send greeting");
        }
        self.view.set_status(&self.config.labels.connected);
    }

    pub fn on_message(&mut self, data: &str) {
        debug!(len = data.len(), "WebSocket message");
        self.view.set_message(data);
        self.view.set_progress_width(&progress_width(data));
    }

    pub fn on_close(&mut self) {
        warn!("WebSocket connection closed");
        self.state = ConnectionState::Closed;
        self.view.set_status(&self.config.labels.closed);
    }

    /// Record a transport error. Closing is left to the transport, which
    /// reports it separately through [`Self::on_close`].
    pub fn on_error(&mut self, description: &str) {
        error!(error = %description, "WebSocket error");
        self.state = ConnectionState::Errored(description.to_string());
        self.view.set_status(&self.config.labels.error);
    }

    /// Send `text` if the connection is open; otherwise drop it.
    ///
    /// Open means both that `on_open` was the last lifecycle event and that
    /// the transport still reports ready.
    pub fn send_text(&self, text: &str) -> Result<(), WidgetError> {
        if !self.state.is_open() || !self.transport.is_open() {
            debug!(len = text.len(), "Connection not open, dropping text");
            return Ok(());
        }
        self.transport.send_text(text)
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryView;
    use std::cell::{Cell, RefCell};

    /// Transport that records frames instead of writing them
    #[derive(Default)]
    struct RecordingTransport {
        open: Cell<bool>,
        fail: Cell<bool>,
        sent: RefCell<Vec<String>>,
    }

    impl Transport for RecordingTransport {
        fn is_open(&self) -> bool {
            self.open.get()
        }

        fn send_text(&self, text: &str) -> Result<(), WidgetError> {
            if self.fail.get() {
                return Err(WidgetError::Transport("socket gone".to_string()));
            }
            self.sent.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn widget() -> ConnectionStatusWidget<RecordingTransport, MemoryView> {
        ConnectionStatusWidget::new(
            WidgetConfig::default(),
            RecordingTransport::default(),
            MemoryView::default(),
        )
    }

    fn open(w: &mut ConnectionStatusWidget<RecordingTransport, MemoryView>) {
        w.transport().open.set(true);
        w.on_open();
    }

    #[test]
    fn test_mount_shows_not_connected() {
        let w = widget();
        assert_eq!(w.view().status(), Some("WebSocket is not connected"));
        assert_eq!(*w.state(), ConnectionState::Connecting);
        assert!(w.transport().sent.borrow().is_empty());
    }

    #[test]
    fn test_open_sends_greeting_and_sets_connected_once() {
        let mut w = widget();
        open(&mut w);

        assert_eq!(*w.transport().sent.borrow(), vec!["It's open! Hooray!!!"]);
        let connected = w
            .view()
            .status_history
            .iter()
            .filter(|s| *s == "WebSocket is connected!")
            .count();
        assert_eq!(connected, 1);
        assert_eq!(w.view().status(), Some("WebSocket is connected!"));
        assert!(w.state().is_open());
    }

    #[test]
    fn test_open_still_connected_when_greeting_fails() {
        let mut w = widget();
        w.transport().fail.set(true);
        open(&mut w);
        assert_eq!(w.view().status(), Some("WebSocket is connected!"));
    }

    #[test]
    fn test_message_is_shown_verbatim() {
        let mut w = widget();
        for msg in ["hello", "<b>bold</b>", "", "  spaced  "] {
            w.on_message(msg);
            assert_eq!(w.view().message.as_deref(), Some(msg));
        }
    }

    #[test]
    fn test_numeric_message_sets_progress_width() {
        let mut w = widget();
        w.on_message("42");
        assert_eq!(w.view().progress_width.as_deref(), Some("42%"));
    }

    #[test]
    fn test_non_numeric_message_passes_through() {
        let mut w = widget();
        w.on_message("abc");
        assert_eq!(w.view().message.as_deref(), Some("abc"));
        assert_eq!(w.view().progress_width.as_deref(), Some("abc%"));

        w.on_message("250");
        assert_eq!(w.view().progress_width.as_deref(), Some("250%"));
    }

    #[test]
    fn test_last_message_wins() {
        let mut w = widget();
        w.on_message("10");
        w.on_message("20");
        assert_eq!(w.view().message.as_deref(), Some("20"));
        assert_eq!(w.view().progress_width.as_deref(), Some("20%"));
    }

    #[test]
    fn test_close_sets_closed_without_transport_calls() {
        let mut w = widget();
        open(&mut w);
        let sent_before = w.transport().sent.borrow().len();

        w.transport().open.set(false);
        w.on_close();

        assert_eq!(w.view().status(), Some("WebSocket closed"));
        assert!(w.state().is_closed());
        assert_eq!(w.transport().sent.borrow().len(), sent_before);
    }

    #[test]
    fn test_error_sets_error_status_and_keeps_transport() {
        let mut w = widget();
        w.on_error("connection refused");

        assert_eq!(w.view().status(), Some("WebSocket error!"));
        assert_eq!(
            *w.state(),
            ConnectionState::Errored("connection refused".to_string())
        );
        assert!(w.transport().sent.borrow().is_empty());
    }

    #[test]
    fn test_error_then_close_ends_closed() {
        let mut w = widget();
        w.on_error("reset");
        w.on_close();
        assert_eq!(
            w.view().status_history,
            vec!["WebSocket is not connected", "WebSocket error!", "WebSocket closed"]
        );
    }

    #[test]
    fn test_send_text_while_open_sends_one_frame() {
        let mut w = widget();
        open(&mut w);
        w.transport().sent.borrow_mut().clear();

        w.send_text("ping").unwrap();
        assert_eq!(*w.transport().sent.borrow(), vec!["ping"]);
    }

    #[test]
    fn test_send_text_while_not_open_is_dropped() {
        let w = widget();
        w.send_text("early").unwrap();
        assert!(w.transport().sent.borrow().is_empty());
    }

    #[test]
    fn test_send_text_before_open_event_is_dropped() {
        let w = widget();
        w.transport().open.set(true);
        w.send_text("early").unwrap();
        assert!(w.transport().sent.borrow().is_empty());
    }

    #[test]
    fn test_send_text_after_error_or_close_is_dropped() {
        let mut w = widget();
        open(&mut w);
        w.transport().sent.borrow_mut().clear();

        w.on_error("reset");
        w.send_text("after error").unwrap();
        w.on_close();
        w.send_text("after close").unwrap();

        assert!(w.transport().sent.borrow().is_empty());
    }

    #[test]
    fn test_send_text_surfaces_transport_error() {
        let mut w = widget();
        open(&mut w);
        w.transport().fail.set(true);
        assert!(matches!(w.send_text("x"), Err(WidgetError::Transport(_))));
    }

    #[test]
    fn test_custom_labels_and_greeting() {
        let mut config = WidgetConfig::default();
        config.greeting = "hello device".to_string();
        config.labels.connected = "online".to_string();
        let mut w = ConnectionStatusWidget::new(
            config,
            RecordingTransport::default(),
            MemoryView::default(),
        );
        open(&mut w);
        assert_eq!(*w.transport().sent.borrow(), vec!["hello device"]);
        assert_eq!(w.view().status(), Some("online"));
    }

    #[test]
    fn test_progress_width() {
        assert_eq!(progress_width("0"), "0%");
        assert_eq!(progress_width("99.5"), "99.5%");
        assert_eq!(progress_width(""), "%");
    }
}
