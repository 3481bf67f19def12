//! Terminal client for the WebSocket status widget
//!
//! Run with: cargo run --features cli --bin ws-status-cli -- [host]
//!
//! Each line typed on stdin is sent as a text frame; EOF closes the connection.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::io::BufRead;
    use tokio::sync::mpsc;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};
    use ws_status_widget::core::WidgetConfig;
    use ws_status_widget::terminal::TerminalView;
    use ws_status_widget::websocket_native::run;

    /// Address the device-side access point serves on
    const DEFAULT_HOST: &str = "192.168.4.1";

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ws_status_widget=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let host = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WS_STATUS_HOST").ok())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let config = match std::env::var("WS_STATUS_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading widget config");
            WidgetConfig::from_json(&std::fs::read_to_string(&path)?)?
        }
        Err(_) => WidgetConfig::default(),
    };
    let url = config.endpoint_url(&host);

    // Blocking stdin reads stay off the runtime
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });

    let widget = run(&url, config, TerminalView::stdout(), input_rx).await;
    info!(state = ?widget.state(), "Session ended");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
