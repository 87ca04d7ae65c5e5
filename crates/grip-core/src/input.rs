#![forbid(unsafe_code)]

//! Platform input samples (pointer, touch, mouse) and input modality.

use smallvec::SmallVec;

use crate::geometry::Point;

/// Touch point list; most gestures carry one or two contacts.
pub type TouchPoints = SmallVec<[Point; 2]>;

/// Which platform event family produced an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    Pointer {
        pointer_id: u32,
    },
    Touch,
    #[default]
    Mouse,
}

/// One platform input event, reduced to what resizing needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerInput {
    pub kind: InputKind,
    /// `clientX/clientY`, when the event carries them.
    pub client: Option<Point>,
    /// Contacts currently on the surface.
    pub touches: TouchPoints,
    /// Contacts that changed in this event (populated on touch end).
    pub changed_touches: TouchPoints,
    /// Whether the platform lets the default action be prevented.
    pub cancelable: bool,
}

impl PointerInput {
    /// A pointer-event sample.
    #[must_use]
    pub fn pointer(pointer_id: u32, x: f64, y: f64) -> Self {
        Self {
            kind: InputKind::Pointer { pointer_id },
            client: Some(Point::new(x, y)),
            cancelable: true,
            ..Self::default()
        }
    }

    /// A mouse-event sample.
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            kind: InputKind::Mouse,
            client: Some(Point::new(x, y)),
            cancelable: true,
            ..Self::default()
        }
    }

    /// A touch sample with one active contact.
    #[must_use]
    pub fn touch(x: f64, y: f64) -> Self {
        let mut touches = TouchPoints::new();
        touches.push(Point::new(x, y));
        Self {
            kind: InputKind::Touch,
            touches,
            cancelable: true,
            ..Self::default()
        }
    }

    /// A touch-end sample: no active contacts, one changed contact.
    #[must_use]
    pub fn touch_end(x: f64, y: f64) -> Self {
        let mut changed_touches = TouchPoints::new();
        changed_touches.push(Point::new(x, y));
        Self {
            kind: InputKind::Touch,
            changed_touches,
            cancelable: true,
            ..Self::default()
        }
    }

    /// Pointer identifier for pointer-event samples.
    #[must_use]
    pub const fn pointer_id(&self) -> Option<u32> {
        match self.kind {
            InputKind::Pointer { pointer_id } => Some(pointer_id),
            InputKind::Touch | InputKind::Mouse => None,
        }
    }

    #[must_use]
    pub const fn is_touch(&self) -> bool {
        matches!(self.kind, InputKind::Touch)
    }

    /// Client coordinates: first active touch, else first changed touch,
    /// else the client point.
    #[must_use]
    pub fn coords(&self) -> Option<Point> {
        self.touches
            .first()
            .or_else(|| self.changed_touches.first())
            .copied()
            .or(self.client)
    }
}

/// Event family a resize session listens to for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputModality {
    Pointer,
    Touch,
    Mouse,
}

/// Document-level listener slots bound during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
    PointerCancel,
    TouchMove,
    TouchEnd,
    TouchCancel,
    MouseMove,
    MouseUp,
}

impl ListenerKind {
    /// DOM event type name.
    #[must_use]
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerCancel => "pointercancel",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
        }
    }
}

impl InputModality {
    /// Pick the session modality: pointer events when the host list supports
    /// them, otherwise touch if the initiating input was a touch, else mouse.
    #[must_use]
    pub fn select(supports_pointer: bool, initiating: &PointerInput) -> Self {
        if supports_pointer {
            Self::Pointer
        } else if initiating.is_touch() {
            Self::Touch
        } else {
            Self::Mouse
        }
    }

    /// Listeners bound for this modality. Mouse input has no cancel event.
    #[must_use]
    pub const fn listeners(self) -> &'static [ListenerKind] {
        match self {
            Self::Pointer => &[
                ListenerKind::PointerMove,
                ListenerKind::PointerUp,
                ListenerKind::PointerCancel,
            ],
            Self::Touch => &[
                ListenerKind::TouchMove,
                ListenerKind::TouchEnd,
                ListenerKind::TouchCancel,
            ],
            Self::Mouse => &[ListenerKind::MouseMove, ListenerKind::MouseUp],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_prefer_active_touch() {
        let mut input = PointerInput::touch(5.0, 6.0);
        input.client = Some(Point::new(1.0, 1.0));
        input.changed_touches.push(Point::new(9.0, 9.0));
        assert_eq!(input.coords(), Some(Point::new(5.0, 6.0)));
    }

    #[test]
    fn coords_fall_back_to_changed_touch_then_client() {
        assert_eq!(
            PointerInput::touch_end(3.0, 4.0).coords(),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(
            PointerInput::mouse(7.0, 8.0).coords(),
            Some(Point::new(7.0, 8.0))
        );
        let empty = PointerInput {
            kind: InputKind::Touch,
            ..PointerInput::default()
        };
        assert_eq!(empty.coords(), None);
    }

    #[test]
    fn modality_selection() {
        let touch = PointerInput::touch(0.0, 0.0);
        let mouse = PointerInput::mouse(0.0, 0.0);
        assert_eq!(InputModality::select(true, &touch), InputModality::Pointer);
        assert_eq!(InputModality::select(false, &touch), InputModality::Touch);
        assert_eq!(InputModality::select(false, &mouse), InputModality::Mouse);
    }

    #[test]
    fn mouse_has_no_cancel_listener() {
        assert_eq!(InputModality::Mouse.listeners().len(), 2);
        assert!(
            InputModality::Touch
                .listeners()
                .contains(&ListenerKind::TouchCancel)
        );
        assert_eq!(ListenerKind::PointerCancel.event_type(), "pointercancel");
    }
}
