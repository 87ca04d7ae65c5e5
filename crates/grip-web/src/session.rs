#![forbid(unsafe_code)]

//! The live state of one resize interaction.
//!
//! Fields are crate-private: only the controller's transitions create,
//! mutate, and discard a session. Hosts get read-only accessors.

use grip_core::{
    Constraints, Delta, Direction, InputModality, Point, PointerInput, ResizeConfig, ResizeStart,
    ResolutionStage,
};

use crate::frame::FrameToken;

/// Pointer capture held by a session, released on teardown.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CaptureLease<N> {
    pub(crate) node: N,
    pub(crate) pointer_id: u32,
}

#[derive(Debug, Clone)]
pub struct ResizeSession<N> {
    pub(crate) target: N,
    pub(crate) handle: Option<N>,
    pub(crate) capture: Option<CaptureLease<N>>,
    pub(crate) direction: Direction,
    pub(crate) stage: ResolutionStage,
    pub(crate) config: ResizeConfig,
    pub(crate) start_pointer: Point,
    pub(crate) start: ResizeStart,
    pub(crate) constraints: Constraints,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) last_delta: Delta,
    pub(crate) modality: InputModality,
    pub(crate) pointer_id: Option<u32>,
    pub(crate) prev_user_select: String,
    pub(crate) pending_frame: Option<FrameToken>,
    pub(crate) pending_input: Option<PointerInput>,
    pub(crate) commits: u64,
}

impl<N> ResizeSession<N> {
    /// Element being resized.
    #[must_use]
    pub const fn target(&self) -> &N {
        &self.target
    }

    #[must_use]
    pub const fn handle(&self) -> Option<&N> {
        self.handle.as_ref()
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn stage(&self) -> ResolutionStage {
        self.stage
    }

    /// Configuration snapshot taken at pointer-down.
    #[must_use]
    pub const fn config(&self) -> &ResizeConfig {
        &self.config
    }

    #[must_use]
    pub const fn start(&self) -> &ResizeStart {
        &self.start
    }

    #[must_use]
    pub const fn start_pointer(&self) -> Point {
        self.start_pointer
    }

    #[must_use]
    pub const fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Last committed `(width, height)`.
    #[must_use]
    pub const fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub const fn last_delta(&self) -> Delta {
        self.last_delta
    }

    #[must_use]
    pub const fn modality(&self) -> InputModality {
        self.modality
    }

    #[must_use]
    pub const fn pointer_id(&self) -> Option<u32> {
        self.pointer_id
    }

    /// Frame requested for the stashed move, if any.
    #[must_use]
    pub const fn pending_frame(&self) -> Option<FrameToken> {
        self.pending_frame
    }

    /// Geometry commits performed so far.
    #[must_use]
    pub const fn commits(&self) -> u64 {
        self.commits
    }
}
