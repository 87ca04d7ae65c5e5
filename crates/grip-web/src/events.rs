#![forbid(unsafe_code)]

//! Resize events surfaced to the host list component.
//!
//! Each session emits `resizestart`, zero or more `resize`, and exactly one
//! `resizeend`, strictly in that order.

use grip_core::{Delta, Direction, PointerInput};
use serde::Serialize;

/// Identifies the list instance that owns a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ListId(pub u64);

/// Host list a controller is attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct ListContext<N> {
    pub id: ListId,
    /// Root container; also the boundary for draggable lookups.
    pub root: N,
    /// Selector for draggable items.
    pub draggable: String,
    /// Whether the list drives pointer events (vs touch/mouse).
    pub supports_pointer: bool,
}

impl<N> ListContext<N> {
    #[must_use]
    pub fn new(id: ListId, root: N, draggable: impl Into<String>) -> Self {
        Self {
            id,
            root,
            draggable: draggable.into(),
            supports_pointer: true,
        }
    }

    #[must_use]
    pub fn with_pointer_events(mut self, supports_pointer: bool) -> Self {
        self.supports_pointer = supports_pointer;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResizeEventKind {
    #[serde(rename = "resizestart")]
    Start,
    #[serde(rename = "resize")]
    Resize,
    #[serde(rename = "resizeend")]
    End,
}

impl ResizeEventKind {
    /// DOM-style event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "resizestart",
            Self::Resize => "resize",
            Self::End => "resizeend",
        }
    }
}

/// Extra payload carried by every resize event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeDetail {
    pub resize_width: f64,
    pub resize_height: f64,
    pub resize_delta: Delta,
    /// Compact token (`"e"`, `"sw"`), `"auto"` when no axis resolved.
    pub resize_direction: Option<String>,
}

impl ResizeDetail {
    #[must_use]
    pub fn new(width: f64, height: f64, delta: Delta, direction: Direction) -> Self {
        Self {
            resize_width: width,
            resize_height: height,
            resize_delta: delta,
            resize_direction: Some(direction.token()),
        }
    }
}

/// One emitted event.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeEvent<N> {
    pub kind: ResizeEventKind,
    pub list: ListId,
    pub root: N,
    pub target: N,
    /// Platform event that caused this one; `None` for forced teardown.
    pub original: Option<PointerInput>,
    pub detail: ResizeDetail,
}

/// Receives resize events in dispatch order.
pub trait ResizeEventSink<N> {
    fn emit(&mut self, event: ResizeEvent<N>);
}

impl<N> ResizeEventSink<N> for Vec<ResizeEvent<N>> {
    fn emit(&mut self, event: ResizeEvent<N>) {
        self.push(event);
    }
}

/// Adapts a closure into a sink.
pub struct CallbackSink<F>(pub F);

impl<F> std::fmt::Debug for CallbackSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CallbackSink")
    }
}

impl<N, F: FnMut(ResizeEvent<N>)> ResizeEventSink<N> for CallbackSink<F> {
    fn emit(&mut self, event: ResizeEvent<N>) {
        (self.0)(event);
    }
}
