#![forbid(unsafe_code)]

//! `grip-web` runs drag-to-resize sessions against a host document.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding list pushes pointer input and frame
//!   callbacks; the controller never reads a clock or spawns work.
//! - **One session at a time**: a pointer-down during an active session is
//!   declined, and every `resizestart` is paired with exactly one `resizeend`.
//! - **Frame-bounded writes**: moves are coalesced so at most one geometry
//!   commit runs per frame.
//!
//! The DOM is reached only through [`HostDocument`]. [`MemoryDocument`]
//! implements it in memory for headless hosts and tests.

pub mod controller;
pub mod events;
pub mod frame;
pub mod host;
pub mod memory;
pub mod session;

pub use controller::{
    ResizeController, ResizeDispatch, ResizeIgnoredReason, ResizeLogEntry, ResizeLogOutcome,
    ResizePhase,
};
pub use events::{
    CallbackSink, ListContext, ListId, ResizeDetail, ResizeEvent, ResizeEventKind, ResizeEventSink,
};
pub use frame::{
    DeterministicFrameScheduler, FRAME_FALLBACK_INTERVAL, FrameScheduler, FrameToken,
    TimerFrameScheduler,
};
pub use host::{CaptureError, HostDocument, TableCellContext, USER_SELECT, px};
pub use memory::{CaptureBehavior, CaptureCall, MemoryDocument, MemoryTable, NodeId};
pub use session::ResizeSession;
