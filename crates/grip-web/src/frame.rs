#![forbid(unsafe_code)]

//! Frame scheduling port.
//!
//! Pointer moves are not committed when they arrive. The session stashes the
//! latest move and asks the scheduler for one frame; when the host reports
//! that frame, a single geometry commit runs with whatever move is stashed by
//! then. Moves that arrive while a frame is pending only replace the stash.
//!
//! The port is host-driven: [`FrameScheduler::schedule_frame`] hands back a
//! [`FrameToken`] and the host later calls
//! [`ResizeController::on_frame`](crate::ResizeController::on_frame) with
//! it. A browser host maps this onto `requestAnimationFrame`; the schedulers
//! below cover deterministic tests and timer-driven hosts.

use core::time::Duration;

/// Timer interval used when no animation-frame primitive is available.
pub const FRAME_FALLBACK_INTERVAL: Duration = Duration::from_millis(16);

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Schedules and cancels frame callbacks on behalf of a resize session.
pub trait FrameScheduler {
    /// Request one callback on the next frame.
    fn schedule_frame(&mut self) -> FrameToken;

    /// Cancel a pending callback. Unknown tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct TokenCounter(u64);

impl TokenCounter {
    fn next(&mut self) -> FrameToken {
        self.0 = self.0.saturating_add(1);
        FrameToken(self.0)
    }
}

/// Frames fire only when the test (or replay driver) asks for them.
#[derive(Debug, Clone, Default)]
pub struct DeterministicFrameScheduler {
    tokens: TokenCounter,
    pending: Vec<FrameToken>,
    requested: u64,
    cancelled: u64,
}

impl DeterministicFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the next frame: drain every pending token.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn pending(&self) -> &[FrameToken] {
        &self.pending
    }

    /// Total frames requested since construction.
    #[must_use]
    pub const fn requested_total(&self) -> u64 {
        self.requested
    }

    /// Total frames cancelled while still pending.
    #[must_use]
    pub const fn cancelled_total(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for DeterministicFrameScheduler {
    fn schedule_frame(&mut self) -> FrameToken {
        let token = self.tokens.next();
        self.pending.push(token);
        self.requested = self.requested.saturating_add(1);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != token);
        if self.pending.len() != before {
            self.cancelled = self.cancelled.saturating_add(1);
        }
    }
}

/// Timer substitute for hosts without an animation-frame primitive.
///
/// The host owns the monotonic clock and advances it explicitly; a frame is
/// due once `interval` has elapsed since it was requested.
#[derive(Debug, Clone)]
pub struct TimerFrameScheduler {
    interval: Duration,
    now: Duration,
    tokens: TokenCounter,
    pending: Vec<(FrameToken, Duration)>,
}

impl Default for TimerFrameScheduler {
    fn default() -> Self {
        Self::new(FRAME_FALLBACK_INTERVAL)
    }
}

impl TimerFrameScheduler {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            now: Duration::ZERO,
            tokens: TokenCounter(0),
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Remove and return tokens whose deadline has passed, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        let now = self.now;
        let mut due = Vec::new();
        self.pending.retain(|(token, deadline)| {
            if *deadline <= now {
                due.push(*token);
                false
            } else {
                true
            }
        });
        due
    }

    /// Earliest pending deadline, for hosts that arm a single timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|(_, deadline)| *deadline).min()
    }
}

impl FrameScheduler for TimerFrameScheduler {
    fn schedule_frame(&mut self) -> FrameToken {
        let token = self.tokens.next();
        self.pending
            .push((token, self.now.saturating_add(self.interval)));
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|(pending, _)| *pending != token);
    }
}
