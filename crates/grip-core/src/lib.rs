#![forbid(unsafe_code)]

//! Core: geometry, directions, input samples, configuration, and the pure
//! parts of a drag-to-resize interaction.
//!
//! # Role in grip
//! `grip-core` owns everything that can be decided without touching a
//! document: which edges a pointer-down grabs ([`resolve`]) and what size a
//! pointer delta produces ([`engine`]). The stateful session lives in
//! `grip-web`; table column mirroring lives in `grip-table`.
//!
//! # Primary responsibilities
//! - **Direction resolution**: handle maps, single handles, edge proximity.
//! - **Geometry engine**: clamping, leading-edge compensation, aspect lock.
//! - **Configuration**: lenient host option decoding and normalization.
//! - **Input samples**: pointer/touch/mouse coordinates and modality.

pub mod config;
pub mod direction;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod resolve;
pub mod surface;

pub use config::{
    ConfigError, DEFAULT_ACTIVE_CLASS, DEFAULT_EDGE_THRESHOLD, HandleBinding, HandleMap,
    ResizeConfig, ResizeOptions, ResizeOverrides, ResizeSwitch,
};
pub use direction::{Direction, Edges, Grow};
pub use engine::{Constraints, ResizeGeometry, ResizeStart, SizedAxes, compute_geometry};
pub use geometry::{Bounds, Delta, Margins, Point, Rect, parse_leading_float};
pub use input::{InputKind, InputModality, ListenerKind, PointerInput, TouchPoints};
pub use resolve::{ResolutionStage, ResolvedDirection, resolve_direction};
pub use surface::Surface;
