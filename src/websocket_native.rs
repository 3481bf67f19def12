//! Native WebSocket client for driving the status widget
//!
//! One tokio task owns the widget and multiplexes inbound frames, queued
//! outbound frames and caller input with `select!`.

use crate::core::{ConnectionStatusWidget, Transport, View, WidgetConfig, WidgetError};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, error, info, trace};

/// Transport that queues frames for the event loop to write
pub struct ChannelSocket {
    tx: UnboundedSender<String>,
    open: AtomicBool,
}

impl ChannelSocket {
    fn new(tx: UnboundedSender<String>) -> Self {
        Self {
            tx,
            open: AtomicBool::new(false),
        }
    }

    fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::Relaxed);
    }
}

impl Transport for ChannelSocket {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    fn send_text(&self, text: &str) -> Result<(), WidgetError> {
        self.tx
            .send(text.to_string())
            .map_err(|_| WidgetError::Transport("outbound queue closed".to_string()))
    }
}

pub type NativeWidget<V> = ConnectionStatusWidget<ChannelSocket, V>;

/// Connect to `url` and run the widget until the connection closes.
///
/// Every string received on `input` goes through the widget's `send_text`.
/// When `input` is closed a close frame is sent and the loop waits for the
/// server to finish the close handshake. Returns the widget in its final
/// (closed) state.
pub async fn run<V: View>(
    url: &str,
    config: WidgetConfig,
    view: V,
    input: UnboundedReceiver<String>,
) -> NativeWidget<V> {
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let mut widget = ConnectionStatusWidget::new(config, ChannelSocket::new(out_tx), view);

    info!(url, "Connecting to WebSocket");
    let ws_stream = match connect_async(url).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            // Same order a browser reports a failed connect in
            widget.on_error(&e.to_string());
            widget.on_close();
            return widget;
        }
    };
    let (write, read) = ws_stream.split();

    drive(&mut widget, write, read, out_rx, input).await;
    widget
}

/// Run an opened connection: open event, frame loop, then close event.
///
/// The loop ends on a close frame, end of stream, or any read or write
/// error. The transport reports closed before `on_close` runs.
async fn drive<V, S, R>(
    widget: &mut NativeWidget<V>,
    mut write: S,
    mut read: R,
    mut out_rx: UnboundedReceiver<String>,
    mut input: UnboundedReceiver<String>,
) where
    V: View,
    S: Sink<Message> + Unpin,
    S::Error: Display,
    R: Stream<Item = Result<Message, WsError>> + Unpin,
{
    widget.transport().set_open(true);
    widget.on_open();

    let mut input_open = true;
    loop {
        tokio::select! {
            // Queued frames go out before new input is accepted
            biased;

            Some(frame) = out_rx.recv() => {
                trace!(len = frame.len(), "Writing frame");
                if let Err(e) = write.send(Message::Text(frame)).await {
                    widget.on_error(&e.to_string());
                    break;
                }
            }
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => widget.on_message(text.as_str()),
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "Close frame");
                    break;
                }
                Some(Ok(_)) => trace!("Ignoring non-text frame"),
                Some(Err(e)) => {
                    widget.on_error(&e.to_string());
                    break;
                }
                None => break,
            },
            line = input.recv(), if input_open => match line {
                Some(text) => {
                    if let Err(e) = widget.send_text(&text) {
                        error!(error = %e, "Failed to queue text");
                    }
                }
                None => {
                    input_open = false;
                    debug!("Input closed, sending close frame");
                    if let Err(e) = write.send(Message::Close(None)).await {
                        widget.on_error(&e.to_string());
                        break;
                    }
                }
            },
        }
    }

    widget.transport().set_open(false);
    // Flushes the close reply, if any; the peer may already be gone
    let _ = write.close().await;
    widget.on_close();
}
