//! Playback scheduling engine
//!
//! Walks a plan one host tick at a time, reporting per-note progress for
//! visual highlighting and requesting the next tick until the phrase ends.

use log::{debug, trace};

use super::clock::{FrameClock, TickToken};
use super::plan::PlaybackPlan;

/// Playback phase
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Playing,
}

/// What a delivered tick meant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not playing: a stale tick delivered after stop or finish
    Idle,
    /// The note at `note_index` is sounding and `progress` of it has
    /// elapsed, in `0.0..=1.0`
    Progress { note_index: usize, progress: f64 },
    /// The last note completed; the scheduler returned to idle
    Finished,
}

/// Drives timed progression through a [`PlaybackPlan`].
///
/// The scheduler owns no thread and never blocks. `start` requests one tick
/// from the host clock; each delivered `tick` measures elapsed time against
/// the current note, reports an outcome, and requests the next tick; the
/// tick that runs past the last note returns the machine to idle without
/// requesting another. At most one tick request is outstanding at any
/// moment, and `stop` revokes it synchronously.
///
/// A note is done when `elapsed >= duration`. The comparison is on elapsed
/// time, never on a computed progress reaching 1.0, so float rounding cannot
/// stall the advance.
#[derive(Debug, Default)]
pub struct PlaybackScheduler {
    plan: PlaybackPlan,
    phase: PlaybackPhase,
    current: usize,
    note_started_at: Option<f64>,
    pending: Option<TickToken>,
}

impl PlaybackScheduler {
    pub fn new(plan: PlaybackPlan) -> Self {
        Self {
            plan,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn plan(&self) -> &PlaybackPlan {
        &self.plan
    }

    /// Replace the plan. Playback in progress stops first, cancelling any
    /// outstanding tick request.
    pub fn set_plan(&mut self, plan: PlaybackPlan, clock: &mut dyn FrameClock) {
        self.stop(clock);
        self.plan = plan;
    }

    /// Begin playback from the first note.
    ///
    /// Returns `false` and changes nothing while already playing or when
    /// the plan is empty. The first delivered tick anchors the first note's
    /// start time; `start` itself reads no clock time.
    pub fn start(&mut self, clock: &mut dyn FrameClock) -> bool {
        if self.phase == PlaybackPhase::Playing {
            debug!("start ignored: already playing");
            return false;
        }
        if self.plan.is_empty() {
            debug!("start ignored: empty plan");
            return false;
        }

        self.current = 0;
        self.note_started_at = None;
        self.phase = PlaybackPhase::Playing;
        self.request_next(clock);
        debug!("playback started: {} note(s)", self.plan.len());
        true
    }

    /// Handle one delivered tick.
    pub fn tick(&mut self, clock: &mut dyn FrameClock) -> TickOutcome {
        if self.phase != PlaybackPhase::Playing {
            return TickOutcome::Idle;
        }

        // the request this tick answers is no longer outstanding
        self.pending = None;

        let now = clock.now();
        let started = *self.note_started_at.get_or_insert(now);
        let duration = self.plan.notes[self.current].duration_secs;
        let elapsed = now - started;

        if elapsed < duration {
            let note_index = self.plan.notes[self.current].note_index;
            let progress = (elapsed / duration).clamp(0.0, 1.0);
            self.request_next(clock);
            trace!("note {} progress {:.3}", note_index, progress);
            return TickOutcome::Progress {
                note_index,
                progress,
            };
        }

        if self.current + 1 < self.plan.len() {
            self.current += 1;
            self.note_started_at = Some(now);
            let note_index = self.plan.notes[self.current].note_index;
            self.request_next(clock);
            debug!("advanced to note {}", note_index);
            return TickOutcome::Progress {
                note_index,
                progress: 0.0,
            };
        }

        self.phase = PlaybackPhase::Idle;
        self.current = 0;
        self.note_started_at = None;
        debug!("playback finished");
        TickOutcome::Finished
    }

    /// Stop playback and cancel the outstanding tick request.
    ///
    /// Safe in any state; stopping while idle is a no-op. After `stop`
    /// returns, no further tick will be delivered for this playback.
    pub fn stop(&mut self, clock: &mut dyn FrameClock) {
        if let Some(token) = self.pending.take() {
            clock.cancel_tick(token);
        }
        if self.phase == PlaybackPhase::Playing {
            debug!("playback stopped");
        }
        self.phase = PlaybackPhase::Idle;
        self.current = 0;
        self.note_started_at = None;
    }

    fn request_next(&mut self, clock: &mut dyn FrameClock) {
        // at most one outstanding request
        if let Some(token) = self.pending.take() {
            clock.cancel_tick(token);
        }
        self.pending = Some(clock.request_tick());
    }
}
