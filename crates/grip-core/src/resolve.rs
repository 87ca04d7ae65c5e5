#![forbid(unsafe_code)]

//! Direction resolution for a pointer-down on a resizable item.
//!
//! Stages run in order and the first one that produces a direction wins:
//!
//! 1. **Handle map**: each `(token, selector)` entry is tested against the
//!    pointer-down target and its ancestors up to the item. The first
//!    matching entry decodes its token. A matched entry with a bad token
//!    yields nothing for this stage.
//! 2. **Single handle**: if a handle selector is configured, the target must
//!    sit inside a matching handle or resolution fails outright. The
//!    handle's `data-resize-direction` (or `data-direction`) token is used,
//!    falling back to edge proximity.
//! 3. **Edge proximity**: the pointer is compared with each enabled edge of
//!    the item's rect. Axes are independent, so a corner yields both.
//!
//! `None` means the pointer-down is not a resize and belongs to the
//! underlying drag engine.

use crate::config::ResizeConfig;
use crate::direction::{Direction, Edges, Grow};
use crate::geometry::{Point, Rect};
use crate::surface::Surface;

/// Data attributes read from a single handle, in priority order.
pub const HANDLE_DIRECTION_ATTRIBUTES: [&str; 2] = ["resize-direction", "direction"];

/// Which stage produced a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    HandleMap,
    Handle,
    Edges,
}

/// A resolved direction plus the handle element that was grabbed, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDirection<N> {
    pub direction: Direction,
    pub handle: Option<N>,
    pub stage: ResolutionStage,
}

/// Resolve a pointer-down at `pointer` on `target` inside `item`.
pub fn resolve_direction<S: Surface>(
    surface: &S,
    target: &S::Node,
    item: &S::Node,
    pointer: Point,
    config: &ResizeConfig,
) -> Option<ResolvedDirection<S::Node>> {
    if let Some(resolved) = direction_from_handles(surface, target, item, config) {
        return Some(resolved);
    }

    if let Some(selector) = config.handle.as_deref() {
        let Some(handle) = surface.closest_matching(target, selector, Some(item)) else {
            tracing::trace!(target: "grip.resize", selector, "pointer-down outside resize handle");
            return None;
        };
        let from_token = HANDLE_DIRECTION_ATTRIBUTES
            .iter()
            .filter_map(|name| surface.data_attribute(&handle, name))
            .find(|token| !token.is_empty())
            .and_then(|token| Direction::from_token(&token));
        let direction = from_token
            .or_else(|| direction_from_edges(surface.rect(item), pointer, config))?;
        return Some(ResolvedDirection {
            direction,
            handle: Some(handle),
            stage: ResolutionStage::Handle,
        });
    }

    direction_from_edges(surface.rect(item), pointer, config).map(|direction| ResolvedDirection {
        direction,
        handle: None,
        stage: ResolutionStage::Edges,
    })
}

/// Stage 1: first matching handle-map entry.
pub fn direction_from_handles<S: Surface>(
    surface: &S,
    target: &S::Node,
    item: &S::Node,
    config: &ResizeConfig,
) -> Option<ResolvedDirection<S::Node>> {
    let (binding, handle) = config.handles.iter().find_map(|binding| {
        surface
            .closest_matching(target, &binding.selector, Some(item))
            .map(|handle| (binding, handle))
    })?;
    let Some(direction) = Direction::from_token(&binding.token) else {
        tracing::trace!(
            target: "grip.resize",
            token = %binding.token,
            selector = %binding.selector,
            "handle map token has no direction"
        );
        return None;
    };
    Some(ResolvedDirection {
        direction,
        handle: Some(handle),
        stage: ResolutionStage::HandleMap,
    })
}

/// Stage 3: compare the pointer with the enabled edges of `rect`.
///
/// Leading edges are checked first on each axis.
#[must_use]
pub fn direction_from_edges(rect: Rect, pointer: Point, config: &ResizeConfig) -> Option<Direction> {
    let threshold = config.effective_edge_threshold();
    let edges = config.edges;

    let horizontal = if edges.contains(Edges::LEFT) && pointer.x <= rect.left + threshold {
        Some(Grow::Leading)
    } else if edges.contains(Edges::RIGHT) && pointer.x >= rect.right() - threshold {
        Some(Grow::Trailing)
    } else {
        None
    };

    let vertical = if edges.contains(Edges::TOP) && pointer.y <= rect.top + threshold {
        Some(Grow::Leading)
    } else if edges.contains(Edges::BOTTOM) && pointer.y >= rect.bottom() - threshold {
        Some(Grow::Trailing)
    } else {
        None
    };

    let direction = Direction::new(horizontal, vertical);
    direction.is_resolved().then_some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(edges: Edges, threshold: f64) -> ResizeConfig {
        ResizeConfig {
            edges,
            edge_threshold: threshold,
            ..ResizeConfig::enabled()
        }
    }

    #[test]
    fn right_edge_within_threshold() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let cfg = config(Edges::RIGHT, 8.0);
        assert_eq!(
            direction_from_edges(rect, Point::new(195.0, 50.0), &cfg),
            Some(Direction::EAST)
        );
        assert_eq!(direction_from_edges(rect, Point::new(100.0, 50.0), &cfg), None);
    }

    #[test]
    fn corner_sets_both_axes() {
        let rect = Rect::new(10.0, 10.0, 100.0, 100.0);
        let dir = direction_from_edges(rect, Point::new(12.0, 108.0), &config(Edges::all(), 8.0));
        assert_eq!(dir.map(|d| d.signs()), Some((-1, 1)));
    }

    #[test]
    fn leading_edge_wins_on_narrow_elements() {
        let rect = Rect::new(0.0, 0.0, 10.0, 100.0);
        let dir = direction_from_edges(rect, Point::new(5.0, 50.0), &config(Edges::all(), 8.0));
        assert_eq!(dir, Some(Direction::WEST));
    }

    #[test]
    fn disabled_edges_are_skipped() {
        let rect = Rect::new(0.0, 0.0, 10.0, 100.0);
        let dir = direction_from_edges(rect, Point::new(5.0, 50.0), &config(Edges::RIGHT, 8.0));
        assert_eq!(dir, Some(Direction::EAST));
        assert_eq!(
            direction_from_edges(rect, Point::new(5.0, 50.0), &config(Edges::TOP, 8.0)),
            None
        );
    }

    #[test]
    fn zero_threshold_uses_default_band() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(
            direction_from_edges(rect, Point::new(194.0, 50.0), &config(Edges::RIGHT, 0.0)),
            Some(Direction::EAST)
        );
    }
}
