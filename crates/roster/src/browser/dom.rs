//! DOM-backed surfaces.
//!
//! Rows are built element by element and text goes in through
//! `textContent`, so usernames never reach the HTML parser.

use crate::surface::{DeleteHandler, MessageSurface, RowContainer, TextField};
use roster_core::PersonRow;
use std::cell::RefCell;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

/// Failure to locate or build page elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// No `window`
    #[error("no window")]
    NoWindow,
    /// No `document`
    #[error("no document")]
    NoDocument,
    /// Selector matched nothing
    #[error("no element matches '{0}'")]
    NotFound(String),
    /// Selector matched an element of the wrong kind
    #[error("element '{selector}' is not {expected}")]
    WrongElement {
        /// Selector used
        selector: String,
        /// Element kind required
        expected: &'static str,
    },
    /// A DOM call threw
    #[error("DOM error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// The page's document.
pub fn document() -> Result<Document, DomError> {
    web_sys::window()
        .ok_or(DomError::NoWindow)?
        .document()
        .ok_or(DomError::NoDocument)
}

fn query(document: &Document, selector: &str) -> Result<Element, DomError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| DomError::NotFound(selector.to_string()))
}

/// Table body receiving person rows.
pub struct DomRowContainer {
    element: Element,
    /// Click listeners by row element id; dropped with their rows.
    listeners: RefCell<Vec<(String, Closure<dyn FnMut(Event)>)>>,
}

impl DomRowContainer {
    /// Wrap an existing element, normally a `<tbody>`.
    pub fn new(element: Element) -> Self {
        Self {
            element,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Find the container by CSS selector.
    pub fn query(document: &Document, selector: &str) -> Result<Self, DomError> {
        Ok(Self::new(query(document, selector)?))
    }

    /// The wrapped element.
    pub const fn element(&self) -> &Element {
        &self.element
    }

    fn build_row(&self, row: &PersonRow, on_delete: DeleteHandler) -> Result<(), DomError> {
        let document = self.element.owner_document().ok_or(DomError::NoDocument)?;

        let tr = document.create_element("tr")?;
        tr.set_id(row.element_id());

        for text in [row.id_text(), row.username_text()] {
            let td = document.create_element("td")?;
            td.set_text_content(Some(text));
            tr.append_child(&td)?;
        }

        let td = document.create_element("td")?;
        let anchor = document.create_element("a")?;
        anchor.set_attribute("href", "#")?;
        anchor.set_attribute("data-person-id", row.id_text())?;
        anchor.set_text_content(Some(row.delete_label()));

        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            on_delete();
        });
        anchor.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;

        td.append_child(&anchor)?;
        tr.append_child(&td)?;
        self.element.append_child(&tr)?;

        self.listeners
            .borrow_mut()
            .push((row.element_id().to_string(), listener));
        Ok(())
    }
}

impl RowContainer for DomRowContainer {
    fn append_row(&self, row: &PersonRow, on_delete: DeleteHandler) {
        if let Err(e) = self.build_row(row, on_delete) {
            tracing::error!(element_id = row.element_id(), error = %e, "could not render row");
        }
    }

    fn remove_rows(&self, element_id: &str) -> usize {
        let mut removed = 0;
        let mut next = self.element.first_element_child();
        while let Some(child) = next {
            next = child.next_element_sibling();
            if child.id() == element_id {
                child.remove();
                removed += 1;
            }
        }
        if removed > 0 {
            self.listeners
                .borrow_mut()
                .retain(|(id, _)| id != element_id);
        }
        removed
    }
}

/// `<input>` holding the username.
pub struct DomTextField {
    input: HtmlInputElement,
}

impl DomTextField {
    /// Wrap an input element.
    pub const fn new(input: HtmlInputElement) -> Self {
        Self { input }
    }

    /// Find the input by CSS selector.
    pub fn query(document: &Document, selector: &str) -> Result<Self, DomError> {
        let input = query(document, selector)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| DomError::WrongElement {
                selector: selector.to_string(),
                expected: "an <input>",
            })?;
        Ok(Self::new(input))
    }
}

impl TextField for DomTextField {
    fn value(&self) -> String {
        self.input.value()
    }

    fn set_value(&self, value: &str) {
        self.input.set_value(value);
    }
}

/// Any element whose text shows validation messages.
pub struct DomMessageLabel {
    element: Element,
}

impl DomMessageLabel {
    /// Wrap an element.
    pub const fn new(element: Element) -> Self {
        Self { element }
    }

    /// Find the element by CSS selector.
    pub fn query(document: &Document, selector: &str) -> Result<Self, DomError> {
        Ok(Self::new(query(document, selector)?))
    }
}

impl MessageSurface for DomMessageLabel {
    fn text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}
