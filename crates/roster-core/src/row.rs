//! Table row markup for a rendered person.
//!
//! A row is three cells: the id, the username and a `delete` control. Its
//! element id is derived from the person id so the row can be found again
//! when the delete completes.

use crate::person::{Person, PersonId};
use std::fmt::Write as _;

/// Prefix of every row element id.
pub const ROW_ID_PREFIX: &str = "person_";

/// Label of the delete control.
pub const DELETE_LABEL: &str = "delete";

/// Element id of the row for a person id, e.g. `person_9999`.
#[must_use]
pub fn row_element_id(id: &PersonId) -> String {
    format!("{ROW_ID_PREFIX}{id}")
}

/// Everything needed to draw one person as a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRow {
    element_id: String,
    person_id: PersonId,
    id_text: String,
    username_text: String,
}

impl PersonRow {
    /// Build the row for a person.
    #[must_use]
    pub fn for_person(person: &Person) -> Self {
        Self {
            element_id: row_element_id(&person.id),
            person_id: person.id.clone(),
            id_text: person.id.to_string(),
            username_text: person.username.clone(),
        }
    }

    /// Row element id.
    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Id the delete control is bound to.
    #[must_use]
    pub const fn person_id(&self) -> &PersonId {
        &self.person_id
    }

    /// Text of the first cell.
    #[must_use]
    pub fn id_text(&self) -> &str {
        &self.id_text
    }

    /// Text of the second cell.
    #[must_use]
    pub fn username_text(&self) -> &str {
        &self.username_text
    }

    /// Text of the delete control in the third cell.
    #[must_use]
    pub const fn delete_label(&self) -> &'static str {
        DELETE_LABEL
    }

    /// Cell texts in order; the last one is the delete control's label.
    #[must_use]
    pub fn cell_texts(&self) -> [&str; 3] {
        [&self.id_text, &self.username_text, DELETE_LABEL]
    }

    /// Serialize the row as HTML.
    ///
    /// The delete anchor carries the id in `data-person-id`; the click
    /// handler is attached by whoever mounts the row, never inline.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(96);
        let id_attr = escape_html(&self.id_text);
        let _ = write!(
            html,
            r##"<tr id="{}"><td>{}</td><td>{}</td><td><a href="#" data-person-id="{}">{}</a></td></tr>"##,
            escape_html(&self.element_id),
            id_attr,
            escape_html(&self.username_text),
            id_attr,
            DELETE_LABEL,
        );
        html
    }
}

/// Escape text for use in HTML content or a quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
