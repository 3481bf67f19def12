//! Browser WebSocket transport and widget mounting

use crate::core::{ConnectionStatusWidget, Transport, View, WidgetConfig, WidgetError};
use crate::dom::DomView;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

pub type BrowserWidget = ConnectionStatusWidget<BrowserSocket, DomView>;

/// Outbound side of a browser `WebSocket`
pub struct BrowserSocket {
    ws: WebSocket,
}

impl Transport for BrowserSocket {
    fn is_open(&self) -> bool {
        self.ws.ready_state() == WebSocket::OPEN
    }

    fn send_text(&self, text: &str) -> Result<(), WidgetError> {
        self.ws
            .send_with_str(text)
            .map_err(|e| WidgetError::Transport(format!("{:?}", e)))
    }
}

/// A widget wired to a live socket.
///
/// Dropping it detaches all four callbacks and closes the socket.
pub struct MountedWidget {
    ws: WebSocket,
    widget: Rc<RefCell<BrowserWidget>>,
    _on_open: Closure<dyn Fn(JsValue)>,
    _on_msg: Closure<dyn Fn(MessageEvent)>,
    _on_err: Closure<dyn Fn(Event)>,
    _on_close: Closure<dyn Fn(CloseEvent)>,
}

impl MountedWidget {
    /// Bind to the page's DOM elements and connect to the page's own host.
    ///
    /// If the `WebSocket` constructor itself throws (e.g. `ws://` from an
    /// https page, or an unparseable URL) the status element shows the error
    /// label and the error is also returned, since there is no socket to
    /// keep a widget alive for.
    pub fn mount(config: WidgetConfig) -> Result<Self, WidgetError> {
        let window = web_sys::window().ok_or(WidgetError::NoDocument)?;
        let document = window.document().ok_or(WidgetError::NoDocument)?;
        let mut view = DomView::from_document(&document, &config.elements)?;
        view.set_status(&config.labels.not_connected);

        let hostname = window
            .location()
            .hostname()
            .map_err(|_| WidgetError::NoDocument)?;
        debug!(hostname = %hostname, "Page host");
        let url = config.endpoint_url(&hostname);

        info!(url = %url, "Connecting to WebSocket");
        let ws = match WebSocket::new(&url) {
            Ok(ws) => ws,
            Err(e) => {
                let err = WidgetError::Transport(format!("{:?}", e));
                error!(error = %err, url = %url, "Failed to open WebSocket");
                view.set_status(&config.labels.error);
                return Err(err);
            }
        };

        let widget = Rc::new(RefCell::new(ConnectionStatusWidget::new(
            config,
            BrowserSocket { ws: ws.clone() },
            view,
        )));

        let widget_clone = widget.clone();
        let on_open = Closure::wrap(Box::new(move |_| {
            widget_clone.borrow_mut().on_open();
        }) as Box<dyn Fn(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let widget_clone = widget.clone();
        let on_msg = Closure::wrap(Box::new(move |e: MessageEvent| {
            match e.data().dyn_into::<js_sys::JsString>() {
                Ok(txt) => {
                    let msg: String = txt.into();
                    widget_clone.borrow_mut().on_message(&msg);
                }
                Err(_) => debug!("Ignoring non-text frame"),
            }
        }) as Box<dyn Fn(MessageEvent)>);
        ws.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));

        // Browsers report WebSocket failures as a plain Event without detail
        let widget_clone = widget.clone();
        let on_err = Closure::wrap(Box::new(move |e: Event| {
            widget_clone.borrow_mut().on_error(&e.type_());
        }) as Box<dyn Fn(Event)>);
        ws.set_onerror(Some(on_err.as_ref().unchecked_ref()));

        let widget_clone = widget.clone();
        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            debug!(code = e.code(), reason = %e.reason(), "Close frame");
            widget_clone.borrow_mut().on_close();
        }) as Box<dyn Fn(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        Ok(Self {
            ws,
            widget,
            _on_open: on_open,
            _on_msg: on_msg,
            _on_err: on_err,
            _on_close: on_close,
        })
    }

    pub fn send_text(&self, text: &str) -> Result<(), WidgetError> {
        self.widget.borrow().send_text(text)
    }
}

impl Drop for MountedWidget {
    fn drop(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        if let Err(e) = self.ws.close() {
            error!(?e, "Failed to close WebSocket");
        }
        warn!("Status widget unmounted");
    }
}
