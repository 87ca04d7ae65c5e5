#![forbid(unsafe_code)]

//! Read-only view of the host document.

use std::fmt;

use crate::geometry::Rect;

/// Queries the resize core needs from a rendering surface.
///
/// Implementations wrap a real DOM (via bindings) or an in-memory tree.
pub trait Surface {
    /// Opaque node handle. Handles compare equal when they refer to the same node.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Nearest inclusive ancestor of `node` matching `selector`.
    ///
    /// When `boundary` is given the walk tests `boundary` itself and then stops.
    fn closest_matching(
        &self,
        node: &Self::Node,
        selector: &str,
        boundary: Option<&Self::Node>,
    ) -> Option<Self::Node>;

    /// Current layout box of `node` in client pixels.
    fn rect(&self, node: &Self::Node) -> Rect;

    /// Computed style property (`"margin-left"`), if known.
    fn computed_style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// `data-*` attribute value, `name` given without the `data-` prefix.
    fn data_attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
}
