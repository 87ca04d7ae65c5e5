#![forbid(unsafe_code)]

//! Mutable host document port.
//!
//! [`HostDocument`] extends the read-only [`Surface`] with everything a
//! resize session writes: inline styles, the active class, pointer capture,
//! the body's text-selection style, listener registration, and access to the
//! table enclosing a resized cell.

use grip_core::{ListenerKind, Surface};
use grip_table::TableShape;

/// Body style property suppressed while a session is active.
pub const USER_SELECT: &str = "user-select";

/// Inline style properties written by geometry commits.
pub mod style {
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const MARGIN_LEFT: &str = "margin-left";
    pub const MARGIN_TOP: &str = "margin-top";
}

/// Format a CSS pixel length.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Pointer capture failure reported by the host.
///
/// The session never surfaces these; they are logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("pointer capture is not supported by this element")]
    NotSupported,
    #[error("pointer capture for pointer {pointer_id} rejected: {reason}")]
    Rejected { pointer_id: u32, reason: String },
}

/// A table view paired with the cell nearest to a resized element.
#[derive(Debug)]
pub struct TableCellContext<T: TableShape> {
    pub table: T,
    pub cell: T::Cell,
}

/// Document capabilities a resize session mutates.
pub trait HostDocument: Surface {
    /// Table view handed to the column propagator.
    type Table<'a>: TableShape
    where
        Self: 'a;

    /// Set an inline style property. An empty value removes it.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    /// Add (`on`) or remove a class name.
    fn toggle_class(&mut self, node: &Self::Node, class: &str, on: bool);

    /// Whether `node` exposes pointer capture at all.
    fn supports_pointer_capture(&self, node: &Self::Node) -> bool;

    fn set_pointer_capture(&mut self, node: &Self::Node, pointer_id: u32)
    -> Result<(), CaptureError>;

    fn release_pointer_capture(
        &mut self,
        node: &Self::Node,
        pointer_id: u32,
    ) -> Result<(), CaptureError>;

    /// Inline style of the document body; an unset property reads as `None`.
    fn body_style(&self, property: &str) -> Option<String>;

    /// Set an inline body style. An empty value removes it.
    fn set_body_style(&mut self, property: &str, value: &str);

    /// Register document-level listeners for the session's modality.
    fn bind_listeners(&mut self, listeners: &[ListenerKind]);

    fn unbind_listeners(&mut self, listeners: &[ListenerKind]);

    /// Nearest inclusive ancestor cell of `node` and a view of its table.
    fn enclosing_table_cell(
        &mut self,
        node: &Self::Node,
    ) -> Option<TableCellContext<Self::Table<'_>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formats_shortest_float() {
        assert_eq!(px(240.0), "240px");
        assert_eq!(px(-40.0), "-40px");
        assert_eq!(px(12.5), "12.5px");
    }

    #[test]
    fn capture_error_display() {
        let err = CaptureError::Rejected {
            pointer_id: 7,
            reason: "InvalidPointerId".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "pointer capture for pointer 7 rejected: InvalidPointerId"
        );
    }
}
