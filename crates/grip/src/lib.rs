#![forbid(unsafe_code)]

//! grip public facade crate.
//!
//! Drag-to-resize for reorderable list and table components. This crate
//! re-exports the common types from the internal crates and offers a
//! prelude for hosts wiring a [`ResizeController`] to their document.

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use grip_core::{
    Bounds, Delta, Direction, Edges, Grow, HandleMap, InputKind, InputModality, ListenerKind,
    Point, PointerInput, Rect, ResizeConfig, ResizeOptions, Surface,
};

// --- Table re-exports ------------------------------------------------------

pub use grip_table::{PropagationOutcome, TableShape, propagate_column_width};

// --- Web re-exports --------------------------------------------------------

pub use grip_web::{
    CaptureError, DeterministicFrameScheduler, FrameScheduler, FrameToken, HostDocument,
    ListContext, ListId, MemoryDocument, NodeId, ResizeController, ResizeDetail, ResizeDispatch,
    ResizeEvent, ResizeEventKind, ResizeEventSink, ResizeIgnoredReason, ResizeLogOutcome,
    TimerFrameScheduler,
};

pub use error::{Error, Result};

/// Build a controller from a JSON options document.
pub fn controller_from_json<H, F, E>(
    list: ListContext<H::Node>,
    options: &str,
    host: H,
    frames: F,
    sink: E,
) -> Result<ResizeController<H, F, E>>
where
    H: HostDocument,
    F: FrameScheduler,
    E: ResizeEventSink<H::Node>,
{
    let options = ResizeOptions::from_json(options)?;
    Ok(ResizeController::new(list, options, host, frames, sink))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Direction, Error, HostDocument, ListContext, ListId, PointerInput, ResizeController,
        ResizeEvent, ResizeEventKind, ResizeOptions, Result, controller_from_json,
    };

    pub use crate::{core, table, web};
}

pub use grip_core as core;
pub use grip_table as table;
pub use grip_web as web;
