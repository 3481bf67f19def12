//! WebSocket connection status widget
//!
//! Connects to the serving host over WebSocket and displays:
//! - Connection status text
//! - The last received message
//! - A progress bar whose width is the last message as a percentage
//!
//! The widget logic in [`core`] is platform-agnostic. The browser build
//! (`--features wasm`) renders into DOM elements; the native build
//! (`--features cli`) drives the same widget from a terminal.

pub mod core;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod dom;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod websocket_wasm;

#[cfg(all(not(target_arch = "wasm32"), feature = "cli"))]
pub mod terminal;
#[cfg(all(not(target_arch = "wasm32"), feature = "cli"))]
pub mod websocket_native;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use web::StatusWidget;

#[cfg(all(test, target_arch = "wasm32", feature = "wasm"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web {
    use crate::core::{WidgetConfig, WidgetError};
    use crate::websocket_wasm::MountedWidget;
    use tracing::debug;
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();
    }

    fn to_js(e: WidgetError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Page-level handle for a mounted status widget.
    ///
    /// ```js
    /// const widget = new StatusWidget();
    /// widget.sendText("hello");
    /// widget.unmount();
    /// ```
    #[wasm_bindgen]
    pub struct StatusWidget {
        inner: Option<MountedWidget>,
    }

    #[wasm_bindgen]
    impl StatusWidget {
        /// Mount onto the page, optionally with a JSON config overriding
        /// element ids, status labels, greeting or path.
        #[wasm_bindgen(constructor)]
        pub fn new(config_json: Option<String>) -> Result<StatusWidget, JsValue> {
            let config = match config_json {
                Some(json) => WidgetConfig::from_json(&json).map_err(to_js)?,
                None => WidgetConfig::default(),
            };
            let inner = MountedWidget::mount(config).map_err(to_js)?;
            Ok(Self { inner: Some(inner) })
        }

        #[wasm_bindgen(js_name = sendText)]
        pub fn send_text(&self, text: &str) -> Result<(), JsValue> {
            match &self.inner {
                Some(widget) => widget.send_text(text).map_err(to_js),
                None => {
                    debug!("Widget unmounted, dropping text");
                    Ok(())
                }
            }
        }

        /// Detach callbacks and close the socket. Idempotent.
        pub fn unmount(&mut self) {
            self.inner.take();
        }
    }

}
