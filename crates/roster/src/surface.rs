//! Page surfaces the widget draws on.
//!
//! The host page owns these; the widget only holds shared handles.

use roster_core::PersonRow;
use std::rc::Rc;

/// Invoked when a row's delete control is activated.
pub type DeleteHandler = Rc<dyn Fn()>;

/// Container receiving one table row per rendered person.
pub trait RowContainer {
    /// Append a row. `on_delete` must run when the row's delete control is
    /// activated, with the control's default action suppressed.
    fn append_row(&self, row: &PersonRow, on_delete: DeleteHandler);

    /// Remove every row whose element id equals `element_id`, returning how
    /// many were removed.
    fn remove_rows(&self, element_id: &str) -> usize;
}

/// Text input holding the new person's username.
pub trait TextField {
    /// Current value.
    fn value(&self) -> String;

    /// Replace the value.
    fn set_value(&self, value: &str);
}

/// Element showing validation messages.
pub trait MessageSurface {
    /// Current text.
    fn text(&self) -> String;

    /// Replace the text.
    fn set_text(&self, text: &str);
}
