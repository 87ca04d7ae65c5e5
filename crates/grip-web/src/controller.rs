#![forbid(unsafe_code)]

//! Resize session state machine.
//!
//! [`ResizeController`] is attached to one host list. It is `Idle` until a
//! pointer-down resolves a direction, `Active` while a [`ResizeSession`]
//! exists, and returns to `Idle` on pointer-up, cancel, or
//! [`ResizeController::force_finish`].
//!
//! Every entry point returns a [`ResizeDispatch`] whose log entry records the
//! phase and outcome, including why an input was ignored. Nothing here fails:
//! inputs that do not apply are declined, and pointer-capture errors are
//! logged and dropped.

use std::fmt;

use grip_core::{
    Constraints, Delta, Direction, InputModality, ListenerKind, Margins, Point, PointerInput,
    ResizeConfig, ResizeOptions, ResizeStart, ResolutionStage, ResolvedDirection,
    compute_geometry, parse_leading_float, resolve_direction,
};
use grip_table::propagate_column_width;

use crate::events::{ListContext, ResizeDetail, ResizeEvent, ResizeEventKind, ResizeEventSink};
use crate::frame::{FrameScheduler, FrameToken};
use crate::host::{HostDocument, TableCellContext, USER_SELECT, px, style};
use crate::session::{CaptureLease, ResizeSession};

const LOG_TARGET: &str = "grip.resize";

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePhase {
    PointerDown,
    PointerMove,
    Frame,
    PointerUp,
    PointerCancel,
    ForceFinish,
}

/// Why an input was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeIgnoredReason {
    SessionAlreadyActive,
    Disabled,
    /// Target is not inside a draggable item of this list.
    NotDraggable,
    MissingCoordinates,
    NoDirection,
    NoActiveSession,
    /// Frame token is not the session's pending frame.
    StaleFrame,
    NoPendingInput,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeLogOutcome {
    Started {
        direction: Direction,
        stage: ResolutionStage,
    },
    MoveQueued {
        frame: FrameToken,
    },
    MoveCoalesced {
        frame: FrameToken,
    },
    Committed {
        width: f64,
        height: f64,
    },
    Finished {
        width: f64,
        height: f64,
        /// Whether the terminating input produced a final commit.
        committed: bool,
    },
    Ignored(ResizeIgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLogEntry {
    pub phase: ResizePhase,
    pub sequence: u64,
    pub pointer_id: Option<u32>,
    pub position: Option<Point>,
    pub outcome: ResizeLogOutcome,
}

/// Result of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDispatch {
    /// The input started a session: the host must cancel the underlying
    /// drag, prevent the default action, and stop propagation.
    pub claimed: bool,
    /// The host should prevent the platform default for this input.
    pub prevent_default: bool,
    pub log: ResizeLogEntry,
}

impl ResizeDispatch {
    #[must_use]
    pub const fn ignored_reason(&self) -> Option<ResizeIgnoredReason> {
        match self.log.outcome {
            ResizeLogOutcome::Ignored(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Drag-to-resize controller for one list instance.
pub struct ResizeController<H: HostDocument, F, E> {
    list: ListContext<H::Node>,
    options: ResizeOptions,
    host: H,
    frames: F,
    sink: E,
    session: Option<ResizeSession<H::Node>>,
    next_sequence: u64,
}

impl<H: HostDocument, F, E> fmt::Debug for ResizeController<H, F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeController")
            .field("list", &self.list.id)
            .field("active", &self.session.is_some())
            .field("next_sequence", &self.next_sequence)
            .finish_non_exhaustive()
    }
}

impl<H, F, E> ResizeController<H, F, E>
where
    H: HostDocument,
    F: FrameScheduler,
    E: ResizeEventSink<H::Node>,
{
    pub fn new(list: ListContext<H::Node>, options: ResizeOptions, host: H, frames: F, sink: E) -> Self {
        Self {
            list,
            options,
            host,
            frames,
            sink,
            session: None,
            next_sequence: 1,
        }
    }

    #[must_use]
    pub const fn list(&self) -> &ListContext<H::Node> {
        &self.list
    }

    #[must_use]
    pub const fn options(&self) -> &ResizeOptions {
        &self.options
    }

    /// Replace the options. An active session keeps its snapshot.
    pub fn set_options(&mut self, options: ResizeOptions) {
        self.options = options;
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub const fn session(&self) -> Option<&ResizeSession<H::Node>> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub const fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    #[must_use]
    pub const fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    /// Tear down the controller, returning host, scheduler, and sink.
    pub fn into_parts(self) -> (H, F, E) {
        (self.host, self.frames, self.sink)
    }

    /// Handle a pointer-down on `target`.
    pub fn pointer_down(&mut self, target: &H::Node, input: PointerInput) -> ResizeDispatch {
        let phase = ResizePhase::PointerDown;
        if self.session.is_some() {
            return self.ignored(phase, ResizeIgnoredReason::SessionAlreadyActive, &input);
        }

        let config = self.options.normalize();
        if !config.enabled {
            return self.ignored(phase, ResizeIgnoredReason::Disabled, &input);
        }
        let Some(item) =
            self.host
                .closest_matching(target, &self.list.draggable, Some(&self.list.root))
        else {
            return self.ignored(phase, ResizeIgnoredReason::NotDraggable, &input);
        };
        let Some(pointer) = input.coords() else {
            return self.ignored(phase, ResizeIgnoredReason::MissingCoordinates, &input);
        };
        let Some(resolved) = resolve_direction(&self.host, target, &item, pointer, &config) else {
            return self.ignored(phase, ResizeIgnoredReason::NoDirection, &input);
        };

        self.start_session(item, resolved, pointer, config, input)
    }

    fn start_session(
        &mut self,
        item: H::Node,
        resolved: ResolvedDirection<H::Node>,
        pointer: Point,
        config: ResizeConfig,
        input: PointerInput,
    ) -> ResizeDispatch {
        let rect = self.host.rect(&item);
        let margins = Margins::new(
            self.computed_px(&item, style::MARGIN_LEFT),
            self.computed_px(&item, style::MARGIN_TOP),
        );
        let constraints = Constraints::from_config(&config, &rect);
        let direction = resolved.direction;
        let pointer_id = input.pointer_id();

        let capture_node = resolved.handle.clone().unwrap_or_else(|| item.clone());
        let capture = match pointer_id {
            Some(pointer_id) if self.host.supports_pointer_capture(&capture_node) => {
                if let Err(err) = self.host.set_pointer_capture(&capture_node, pointer_id) {
                    tracing::debug!(
                        target: LOG_TARGET,
                        pointer_id,
                        error = %err,
                        "pointer capture acquire failed"
                    );
                }
                Some(CaptureLease {
                    node: capture_node,
                    pointer_id,
                })
            }
            _ => None,
        };

        let modality = InputModality::select(self.list.supports_pointer, &input);
        let prev_user_select = self.host.body_style(USER_SELECT).unwrap_or_default();
        if let Some(class) = config.active_class.as_deref() {
            self.host.toggle_class(&item, class, true);
        }
        self.host.set_body_style(USER_SELECT, "none");
        self.host.bind_listeners(modality.listeners());

        tracing::debug!(
            target: LOG_TARGET,
            list = self.list.id.0,
            direction = %direction,
            stage = ?resolved.stage,
            ?modality,
            width = rect.width,
            height = rect.height,
            "resize session started"
        );

        self.session = Some(ResizeSession {
            target: item.clone(),
            handle: resolved.handle,
            capture,
            direction,
            stage: resolved.stage,
            config,
            start_pointer: pointer,
            start: ResizeStart { rect, margins },
            constraints,
            width: rect.width,
            height: rect.height,
            last_delta: Delta::ZERO,
            modality,
            pointer_id,
            prev_user_select,
            pending_frame: None,
            pending_input: None,
            commits: 0,
        });

        let detail = ResizeDetail::new(rect.width, rect.height, Delta::ZERO, direction);
        let log = self.entry(
            ResizePhase::PointerDown,
            Some(&input),
            ResizeLogOutcome::Started {
                direction,
                stage: resolved.stage,
            },
        );
        self.emit(ResizeEventKind::Start, item, Some(input), detail);
        ResizeDispatch {
            claimed: true,
            prevent_default: true,
            log,
        }
    }

    /// Stash a move and make sure one frame is pending.
    pub fn pointer_move(&mut self, input: PointerInput) -> ResizeDispatch {
        let phase = ResizePhase::PointerMove;
        let Some(session) = self.session.as_mut() else {
            return self.ignored(phase, ResizeIgnoredReason::NoActiveSession, &input);
        };

        let outcome = match session.pending_frame {
            Some(frame) => {
                tracing::trace!(target: LOG_TARGET, frame = frame.get(), "resize move coalesced");
                ResizeLogOutcome::MoveCoalesced { frame }
            }
            None => {
                let frame = self.frames.schedule_frame();
                session.pending_frame = Some(frame);
                ResizeLogOutcome::MoveQueued { frame }
            }
        };
        let prevent_default = input.cancelable;
        let log = self.entry(phase, Some(&input), outcome);
        if let Some(session) = self.session.as_mut() {
            session.pending_input = Some(input);
        }
        ResizeDispatch {
            claimed: false,
            prevent_default,
            log,
        }
    }

    /// Run the commit for a frame the scheduler fired.
    pub fn on_frame(&mut self, token: FrameToken) -> ResizeDispatch {
        let phase = ResizePhase::Frame;
        let outcome = match self.session.as_mut() {
            None => ResizeLogOutcome::Ignored(ResizeIgnoredReason::NoActiveSession),
            Some(session) if session.pending_frame != Some(token) => {
                ResizeLogOutcome::Ignored(ResizeIgnoredReason::StaleFrame)
            }
            Some(session) => {
                session.pending_frame = None;
                match self.commit() {
                    Ok((width, height)) => ResizeLogOutcome::Committed { width, height },
                    Err(reason) => ResizeLogOutcome::Ignored(reason),
                }
            }
        };
        let log = self.entry(phase, None, outcome);
        ResizeDispatch {
            claimed: false,
            prevent_default: false,
            log,
        }
    }

    /// Final commit with `input`, then teardown.
    pub fn pointer_up(&mut self, input: PointerInput) -> ResizeDispatch {
        self.finish(ResizePhase::PointerUp, input)
    }

    /// Same as [`Self::pointer_up`]: a cancel still commits once.
    pub fn pointer_cancel(&mut self, input: PointerInput) -> ResizeDispatch {
        self.finish(ResizePhase::PointerCancel, input)
    }

    /// Tear down an active session without a final commit.
    pub fn force_finish(&mut self) -> ResizeDispatch {
        let outcome = match self.teardown(None) {
            Some((width, height)) => ResizeLogOutcome::Finished {
                width,
                height,
                committed: false,
            },
            None => ResizeLogOutcome::Ignored(ResizeIgnoredReason::NoActiveSession),
        };
        let log = self.entry(ResizePhase::ForceFinish, None, outcome);
        ResizeDispatch {
            claimed: false,
            prevent_default: false,
            log,
        }
    }

    /// Route an input received by a bound document listener.
    pub fn dispatch_listener(&mut self, listener: ListenerKind, input: PointerInput) -> ResizeDispatch {
        match listener {
            ListenerKind::PointerMove | ListenerKind::TouchMove | ListenerKind::MouseMove => {
                self.pointer_move(input)
            }
            ListenerKind::PointerUp | ListenerKind::TouchEnd | ListenerKind::MouseUp => {
                self.pointer_up(input)
            }
            ListenerKind::PointerCancel | ListenerKind::TouchCancel => self.pointer_cancel(input),
        }
    }

    fn finish(&mut self, phase: ResizePhase, input: PointerInput) -> ResizeDispatch {
        let Some(session) = self.session.as_mut() else {
            return self.ignored(phase, ResizeIgnoredReason::NoActiveSession, &input);
        };
        session.pending_input = Some(input.clone());

        let committed = match self.commit() {
            Ok(_) => true,
            Err(reason) => {
                tracing::trace!(target: LOG_TARGET, ?reason, "final commit declined");
                false
            }
        };
        let outcome = match self.teardown(Some(input.clone())) {
            Some((width, height)) => ResizeLogOutcome::Finished {
                width,
                height,
                committed,
            },
            None => ResizeLogOutcome::Ignored(ResizeIgnoredReason::NoActiveSession),
        };
        let log = self.entry(phase, Some(&input), outcome);
        ResizeDispatch {
            claimed: false,
            prevent_default: false,
            log,
        }
    }

    /// Apply the stashed input: geometry, styles, table column, `resize` event.
    fn commit(&mut self) -> Result<(f64, f64), ResizeIgnoredReason> {
        let Some(session) = self.session.as_mut() else {
            return Err(ResizeIgnoredReason::NoActiveSession);
        };
        let pointer = session
            .pending_input
            .as_ref()
            .ok_or(ResizeIgnoredReason::NoPendingInput)?
            .coords()
            .ok_or(ResizeIgnoredReason::MissingCoordinates)?;
        let input = session.pending_input.take();

        let span = tracing::debug_span!(
            target: LOG_TARGET,
            "resize.commit",
            direction = %session.direction,
            commit = session.commits + 1
        );
        let _guard = span.enter();

        let delta = pointer.delta_from(session.start_pointer);
        let geometry = compute_geometry(
            &session.start,
            delta,
            session.direction,
            &session.constraints,
        );

        let target = session.target.clone();
        if geometry.sized.width {
            self.host.set_style(&target, style::WIDTH, &px(geometry.width));
        }
        if let Some(margin) = geometry.margin_left {
            self.host.set_style(&target, style::MARGIN_LEFT, &px(margin));
        }
        if geometry.sized.height {
            self.host.set_style(&target, style::HEIGHT, &px(geometry.height));
        }
        if let Some(margin) = geometry.margin_top {
            self.host.set_style(&target, style::MARGIN_TOP, &px(margin));
        }

        session.width = geometry.width;
        session.height = geometry.height;
        session.last_delta = delta;
        session.commits += 1;
        let direction = session.direction;

        if geometry.sized.width {
            self.propagate_width(&target, geometry.width);
        }

        tracing::trace!(
            target: LOG_TARGET,
            width = geometry.width,
            height = geometry.height,
            dx = delta.x,
            dy = delta.y,
            "resize committed"
        );

        let detail = ResizeDetail::new(geometry.width, geometry.height, delta, direction);
        self.emit(ResizeEventKind::Resize, target, input, detail);
        Ok((geometry.width, geometry.height))
    }

    fn propagate_width(&mut self, node: &H::Node, width: f64) {
        if let Some(TableCellContext { mut table, cell }) = self.host.enclosing_table_cell(node) {
            propagate_column_width(&mut table, &cell, width);
        }
    }

    /// Release everything the session holds and emit `resizeend`.
    fn teardown(&mut self, original: Option<PointerInput>) -> Option<(f64, f64)> {
        let session = self.session.take()?;

        if let Some(frame) = session.pending_frame {
            self.frames.cancel_frame(frame);
        }
        self.host.unbind_listeners(session.modality.listeners());
        if let Some(lease) = &session.capture
            && let Err(err) = self.host.release_pointer_capture(&lease.node, lease.pointer_id)
        {
            tracing::debug!(
                target: LOG_TARGET,
                pointer_id = lease.pointer_id,
                error = %err,
                "pointer capture release failed"
            );
        }
        if let Some(class) = session.config.active_class.as_deref() {
            self.host.toggle_class(&session.target, class, false);
        }
        self.host
            .set_body_style(USER_SELECT, &session.prev_user_select);

        tracing::debug!(
            target: LOG_TARGET,
            list = self.list.id.0,
            width = session.width,
            height = session.height,
            commits = session.commits,
            "resize session finished"
        );

        let detail = ResizeDetail::new(
            session.width,
            session.height,
            session.last_delta,
            session.direction,
        );
        let size = (session.width, session.height);
        self.emit(ResizeEventKind::End, session.target, original, detail);
        Some(size)
    }

    fn computed_px(&self, node: &H::Node, property: &str) -> f64 {
        self.host
            .computed_style(node, property)
            .and_then(|value| parse_leading_float(&value))
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }

    fn emit(
        &mut self,
        kind: ResizeEventKind,
        target: H::Node,
        original: Option<PointerInput>,
        detail: ResizeDetail,
    ) {
        self.sink.emit(ResizeEvent {
            kind,
            list: self.list.id,
            root: self.list.root.clone(),
            target,
            original,
            detail,
        });
    }

    fn entry(
        &mut self,
        phase: ResizePhase,
        input: Option<&PointerInput>,
        outcome: ResizeLogOutcome,
    ) -> ResizeLogEntry {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        ResizeLogEntry {
            phase,
            sequence,
            pointer_id: input.and_then(PointerInput::pointer_id),
            position: input.and_then(PointerInput::coords),
            outcome,
        }
    }

    fn ignored(
        &mut self,
        phase: ResizePhase,
        reason: ResizeIgnoredReason,
        input: &PointerInput,
    ) -> ResizeDispatch {
        if phase == ResizePhase::PointerDown {
            tracing::debug!(target: LOG_TARGET, ?reason, "pointer-down declined");
        }
        let log = self.entry(phase, Some(input), ResizeLogOutcome::Ignored(reason));
        ResizeDispatch {
            claimed: false,
            prevent_default: false,
            log,
        }
    }
}
