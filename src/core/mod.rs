//! Platform-agnostic core module - shared between the browser widget and CLI

pub mod config;
pub mod error;
pub mod state;
pub mod view;
pub mod widget;

pub use config::{ElementIds, StatusLabels, WidgetConfig};
pub use error::WidgetError;
pub use state::ConnectionState;
pub use view::{MemoryView, View};
pub use widget::{progress_width, ConnectionStatusWidget, Transport};
