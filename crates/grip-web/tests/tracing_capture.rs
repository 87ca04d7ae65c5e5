//! Structured logging emitted by resize sessions.
//!
//! Verifies:
//! 1. session start/finish are logged at DEBUG under `grip.resize`
//! 2. each commit runs inside a `resize.commit` span
//! 3. swallowed capture failures log at DEBUG, never WARN/ERROR
//! 4. table propagation logs under `grip.table`, skips included

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use grip_core::{PointerInput, Rect, ResizeOptions};
use grip_web::{
    CaptureBehavior, DeterministicFrameScheduler, ListContext, ListId, MemoryDocument,
    ResizeController,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl SpanCapture {
    fn new() -> (Self, CaptureHandle) {
        let spans = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(Mutex::new(Vec::new()));
        let handle = CaptureHandle {
            spans: spans.clone(),
            events: events.clone(),
        };
        (Self { spans, events }, handle)
    }
}

struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F, R>(f: F) -> (R, CaptureHandle)
where
    F: FnOnce() -> R,
{
    let (layer, handle) = SpanCapture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, handle)
}

/// One east drag with two frame commits and a final commit on release.
fn drag_card(capture: CaptureBehavior) -> usize {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let list = doc.append(body, "ul");
    let card = doc.append(list, "li");
    doc.set_rect(card, Rect::new(0.0, 0.0, 200.0, 100.0));
    doc.set_capture_behavior(capture);

    let mut ctl = ResizeController::new(
        ListContext::new(ListId(3), list, "li"),
        ResizeOptions::enabled(),
        doc,
        DeterministicFrameScheduler::new(),
        Vec::new(),
    );
    ctl.pointer_down(&card, PointerInput::pointer(5, 196.0, 50.0));
    for x in [210.0, 230.0] {
        ctl.pointer_move(PointerInput::pointer(5, x, 50.0));
        for token in ctl.frames_mut().take_due() {
            ctl.on_frame(token);
        }
    }
    ctl.pointer_up(PointerInput::pointer(5, 240.0, 50.0));
    ctl.sink().len()
}

#[test]
fn session_start_and_finish_logged_at_debug() {
    let (emitted, handle) = with_captured_tracing(|| drag_card(CaptureBehavior::Accept));
    assert_eq!(emitted, 5);

    let events = handle.events();
    let started = events
        .iter()
        .find(|e| e.message() == "resize session started")
        .expect("start logged");
    assert_eq!(started.level, tracing::Level::DEBUG);
    assert_eq!(started.target, "grip.resize");
    assert_eq!(started.fields.get("direction").map(String::as_str), Some("e"));

    let finished = events
        .iter()
        .find(|e| e.message() == "resize session finished")
        .expect("finish logged");
    assert_eq!(finished.level, tracing::Level::DEBUG);
    assert_eq!(finished.fields.get("commits").map(String::as_str), Some("3"));
}

#[test]
fn every_commit_has_a_span() {
    let (_, handle) = with_captured_tracing(|| drag_card(CaptureBehavior::Accept));
    let commits: Vec<_> = handle
        .spans()
        .into_iter()
        .filter(|span| span.name == "resize.commit")
        .collect();
    assert_eq!(commits.len(), 3);
    assert_eq!(commits[2].fields.get("commit").map(String::as_str), Some("3"));

    let committed = handle
        .events()
        .into_iter()
        .filter(|e| e.message() == "resize committed")
        .count();
    assert_eq!(committed, 3);
}

#[test]
fn capture_failures_never_warn() {
    let (emitted, handle) = with_captured_tracing(|| drag_card(CaptureBehavior::Reject));
    assert_eq!(emitted, 5);
    let events = handle.events();
    assert!(
        events
            .iter()
            .all(|e| e.level != tracing::Level::WARN && e.level != tracing::Level::ERROR)
    );
    for message in ["pointer capture acquire failed", "pointer capture release failed"] {
        let event = events
            .iter()
            .find(|e| e.message() == message)
            .unwrap_or_else(|| panic!("{message} not logged"));
        assert_eq!(event.level, tracing::Level::DEBUG);
        assert!(event.fields.contains_key("error"));
    }
}

#[test]
fn declined_pointer_down_logs_reason() {
    let (_, handle) = with_captured_tracing(|| {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let list = doc.append(body, "ul");
        let card = doc.append(list, "li");
        doc.set_rect(card, Rect::new(0.0, 0.0, 200.0, 100.0));
        let mut ctl = ResizeController::new(
            ListContext::new(ListId(3), list, "li"),
            ResizeOptions::enabled(),
            doc,
            DeterministicFrameScheduler::new(),
            Vec::new(),
        );
        ctl.pointer_down(&card, PointerInput::pointer(1, 100.0, 50.0));
    });
    let declined = handle
        .events()
        .into_iter()
        .find(|e| e.message() == "pointer-down declined")
        .expect("decline logged");
    assert_eq!(declined.fields.get("reason").map(String::as_str), Some("NoDirection"));
}

#[test]
fn table_propagation_logs_under_table_target() {
    let (_, handle) = with_captured_tracing(|| {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let table = doc.append(body, "table");
        let row = doc.append(table, "tr");
        let cell = doc.append(row, "td");
        doc.set_rect(cell, Rect::new(0.0, 0.0, 100.0, 20.0));
        let mut ctl = ResizeController::new(
            ListContext::new(ListId(4), row, "td"),
            ResizeOptions::enabled(),
            doc,
            DeterministicFrameScheduler::new(),
            Vec::new(),
        );
        ctl.pointer_down(&cell, PointerInput::pointer(1, 98.0, 10.0));
        ctl.pointer_up(PointerInput::pointer(1, 120.0, 10.0));
    });
    let propagated = handle
        .events()
        .into_iter()
        .find(|e| e.target == "grip.table")
        .expect("propagation logged");
    assert_eq!(propagated.message(), "column width propagated");
    assert_eq!(
        propagated.fields.get("cells_updated").map(String::as_str),
        Some("1")
    );
}

#[test]
fn spanned_cell_skip_is_logged() {
    let (_, handle) = with_captured_tracing(|| {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let table = doc.append(body, "table");
        let row = doc.append(table, "tr");
        let cell = doc.append(row, "td");
        doc.set_attribute(cell, "colspan", "2");
        doc.set_rect(cell, Rect::new(0.0, 0.0, 100.0, 20.0));
        let mut ctl = ResizeController::new(
            ListContext::new(ListId(4), row, "td"),
            ResizeOptions::enabled(),
            doc,
            DeterministicFrameScheduler::new(),
            Vec::new(),
        );
        ctl.pointer_down(&cell, PointerInput::pointer(1, 98.0, 10.0));
        ctl.pointer_up(PointerInput::pointer(1, 120.0, 10.0));
    });
    let events = handle.events();
    assert!(events.iter().all(|e| e.message() != "column width propagated"));
    let skipped = events
        .iter()
        .find(|e| e.target == "grip.table" && e.message() == "column propagation skipped")
        .expect("skip logged");
    assert_eq!(skipped.level, tracing::Level::TRACE);
    let reason = skipped.fields.get("reason").map_or("", String::as_str);
    assert!(reason.contains("SpannedCell"), "reason {reason}");
}
