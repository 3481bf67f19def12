//! Widget configuration
//!
//! Every field has a default matching the stock status page, so an empty JSON
//! object (or no config at all) yields a working widget.

use super::WidgetError;
use serde::{Deserialize, Serialize};

/// Ids of the three display elements the widget writes to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub status: String,
    pub message: String,
    pub progress: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            status: "status".to_string(),
            message: "msg".to_string(),
            progress: "pb".to_string(),
        }
    }
}

/// Status strings shown for each lifecycle step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLabels {
    pub not_connected: String,
    pub connected: String,
    pub closed: String,
    pub error: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            not_connected: "WebSocket is not connected".to_string(),
            connected: "WebSocket is connected!".to_string(),
            closed: "WebSocket closed".to_string(),
            error: "WebSocket error!".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub elements: ElementIds,
    pub labels: StatusLabels,
    /// Text frame sent once the connection opens
    pub greeting: String,
    /// Request path appended to the host
    pub path: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            labels: StatusLabels::default(),
            greeting: "It's open! Hooray!!!".to_string(),
            path: "/".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, WidgetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// WebSocket URL for `host` on the default port of the `ws` scheme.
    pub fn endpoint_url(&self, host: &str) -> String {
        format!("ws://{}{}", host, self.path)
    }
}
