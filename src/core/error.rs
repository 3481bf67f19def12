use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    /// Connection failed to open, dropped, or a frame could not be written.
    #[error("transport error: {0}")]
    Transport(String),
    #[error("missing display element with id `{0}`")]
    MissingElement(String),
    #[error("no browser window or document available")]
    NoDocument,
    #[error("invalid widget config: {0}")]
    Config(#[from] serde_json::Error),
}
