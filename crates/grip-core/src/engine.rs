#![forbid(unsafe_code)]

//! Pure resize geometry.
//!
//! Given the start snapshot, a pointer delta, a direction and constraints,
//! [`compute_geometry`] produces the clamped size and any leading-edge margin
//! compensation. It holds no state and performs no I/O.
//!
//! # Invariants
//!
//! 1. Width stays within the width bounds and height within the height bounds.
//! 2. For a leading axis, `margin + size == start_margin + start_size`, so the
//!    trailing edge does not move.
//! 3. With an aspect lock the derived axis is `driver / ratio` (or
//!    `driver * ratio`) before its own clamp.
//! 4. On a locked corner drag the axis with the larger pointer travel drives;
//!    ties go to the horizontal axis.

use crate::config::ResizeConfig;
use crate::direction::{Direction, Grow};
use crate::geometry::{Bounds, Delta, Margins, Rect};

/// Start-of-session geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    pub rect: Rect,
    pub margins: Margins,
}

/// Bounds and optional aspect lock for one session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Constraints {
    pub width: Bounds,
    pub height: Bounds,
    /// `width / height` to preserve; `None` when unlocked.
    pub aspect_ratio: Option<f64>,
}

impl Constraints {
    /// Build from a config snapshot and the start rect. The lock only applies
    /// when the start rect has a usable, non-zero ratio.
    #[must_use]
    pub fn from_config(config: &ResizeConfig, start: &Rect) -> Self {
        let aspect_ratio = if config.preserve_aspect_ratio {
            start.aspect_ratio().filter(|ratio| *ratio != 0.0)
        } else {
            None
        };
        Self {
            width: config.width,
            height: config.height,
            aspect_ratio,
        }
    }
}

/// Which dimensions a commit writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizedAxes {
    pub width: bool,
    pub height: bool,
}

/// Output of one geometry computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGeometry {
    pub width: f64,
    pub height: f64,
    /// Present only when the horizontal axis grows from the leading edge.
    pub margin_left: Option<f64>,
    /// Present only when the vertical axis grows from the leading edge.
    pub margin_top: Option<f64>,
    pub sized: SizedAxes,
}

fn candidate(start: f64, delta: f64, grow: Grow) -> f64 {
    match grow {
        Grow::Trailing => start + delta,
        Grow::Leading => start - delta,
    }
}

/// Compute the geometry for pointer displacement `delta`.
#[must_use]
pub fn compute_geometry(
    start: &ResizeStart,
    delta: Delta,
    direction: Direction,
    constraints: &Constraints,
) -> ResizeGeometry {
    let start_width = start.rect.width;
    let start_height = start.rect.height;

    let mut width = start_width;
    let mut height = start_height;

    if let Some(grow) = direction.horizontal {
        width = constraints.width.clamp(candidate(start_width, delta.x, grow));
    }
    if let Some(grow) = direction.vertical {
        height = constraints.height.clamp(candidate(start_height, delta.y, grow));
    }

    let mut sized = SizedAxes {
        width: direction.horizontal.is_some(),
        height: direction.vertical.is_some(),
    };

    if let Some(ratio) = constraints.aspect_ratio {
        let horizontal_drives = match (direction.horizontal, direction.vertical) {
            (Some(_), None) => Some(true),
            (None, Some(_)) => Some(false),
            (Some(_), Some(_)) => Some(delta.x.abs() >= delta.y.abs()),
            (None, None) => None,
        };
        match horizontal_drives {
            Some(true) => {
                height = constraints.height.clamp(width / ratio);
                sized.height = true;
            }
            Some(false) => {
                width = constraints.width.clamp(height * ratio);
                sized.width = true;
            }
            None => {}
        }
    }

    let margin_left = direction
        .horizontal
        .filter(|grow| grow.is_leading())
        .map(|_| start.margins.left + (start_width - width));
    let margin_top = direction
        .vertical
        .filter(|grow| grow.is_leading())
        .map(|_| start.margins.top + (start_height - height));

    ResizeGeometry {
        width,
        height,
        margin_left,
        margin_top,
        sized,
    }
}
