//! DOM-backed view: status, message and progress-bar elements

use crate::core::{ElementIds, View, WidgetError};
use tracing::error;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub struct DomView {
    status: Element,
    message: Element,
    progress: HtmlElement,
}

impl DomView {
    /// Look up the three display elements; all must be present.
    pub fn from_document(document: &Document, ids: &ElementIds) -> Result<Self, WidgetError> {
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| WidgetError::MissingElement(id.to_string()))
        };

        let progress = find(&ids.progress)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WidgetError::MissingElement(ids.progress.clone()))?;

        Ok(Self {
            status: find(&ids.status)?,
            message: find(&ids.message)?,
            progress,
        })
    }
}

impl View for DomView {
    fn set_status(&mut self, text: &str) {
        self.status.set_inner_html(text);
    }

    fn set_message(&mut self, text: &str) {
        self.message.set_inner_html(text);
    }

    fn set_progress_width(&mut self, width: &str) {
        // Browsers ignore invalid values without throwing; an Err here means
        // the style object itself is unusable.
        if let Err(e) = self.progress.style().set_property("width", width) {
            error!(?e, "Failed to set progress width");
        }
    }
}
