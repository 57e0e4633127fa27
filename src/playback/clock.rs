//! Frame clock abstraction
//!
//! The scheduler never sleeps, spawns, or owns a timer. It asks the host's
//! clock for single future callbacks and measures elapsed time with `now()`.
//! Tick spacing is host-defined and variable (an animation frame loop, a UI
//! timer, a test driving time by hand), which is why elapsed time always
//! comes from `now()` and never from counting ticks.

use std::time::Instant;

/// Handle for one requested tick
///
/// Opaque to the scheduler; hosts mint them and honor them in
/// [`FrameClock::cancel_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

impl TickToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Host-provided frame timing
pub trait FrameClock {
    /// Monotonic time in seconds
    fn now(&self) -> f64;

    /// Schedule exactly one future callback. Returns the token that
    /// identifies it.
    fn request_tick(&mut self) -> TickToken;

    /// Revoke a previously requested callback. After this returns, a tick
    /// for `token` must not be delivered. Cancelling an unknown or already
    /// delivered token is a no-op.
    fn cancel_tick(&mut self, token: TickToken);
}

/// Deterministic clock for tests and headless playback
///
/// Time moves only through [`ManualClock::advance`], and the pending tick
/// request can be inspected, so a test plays the host's role exactly: check
/// for a request, advance time, deliver the tick.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: f64,
    next_token: u64,
    pending: Option<TickToken>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `secs`
    pub fn advance(&mut self, secs: f64) {
        self.now += secs;
    }

    /// The not-yet-cancelled request, if any
    pub fn pending(&self) -> Option<TickToken> {
        self.pending
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending request, the way a frame loop would just before
    /// delivering its tick
    pub fn take_pending(&mut self) -> Option<TickToken> {
        self.pending.take()
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn request_tick(&mut self) -> TickToken {
        self.next_token += 1;
        let token = TickToken::new(self.next_token);
        self.pending = Some(token);
        token
    }

    fn cancel_tick(&mut self, token: TickToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}

/// Wall-clock implementation backed by [`Instant`]
///
/// A host drives it by polling [`SystemClock::take_request`] from its frame
/// loop and delivering one scheduler tick per taken request.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    next_token: u64,
    pending: Option<TickToken>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            next_token: 0,
            pending: None,
        }
    }

    /// The outstanding request, cleared on read
    pub fn take_request(&mut self) -> Option<TickToken> {
        self.pending.take()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn request_tick(&mut self) -> TickToken {
        self.next_token += 1;
        let token = TickToken::new(self.next_token);
        self.pending = Some(token);
        token
    }

    fn cancel_tick(&mut self, token: TickToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}
