//! Shared WebSocket connection state
//!
//! Used by both WASM and native WebSocket clients.

/// WebSocket connection state, as last reported by the transport
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
    Errored(String),
}

impl ConnectionState {
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    /// Closed is terminal; nothing reopens the connection.
    pub fn is_closed(&self) -> bool {
        matches!(self, ConnectionState::Closed)
    }
}
