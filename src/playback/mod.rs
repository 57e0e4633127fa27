//! # Playback Module
//!
//! Timed progression through a phrase, driven by the host's frame clock.
//!
//! ## Purpose
//! Playback here means highlight timing, not audio: the scheduler walks the
//! phrase note by note and reports how far through the sounding note it is,
//! so a host can light up the right note on the staff. Audio synthesis, if
//! any, is the host's business.
//!
//! ## Cooperative Timing Model
//! The scheduler never owns a thread or a timer. It requests single ticks
//! from a [`FrameClock`] the host implements (an animation frame loop, a UI
//! timer, a test advancing time by hand) and does all its work inside
//! `tick`. Because tick spacing is host-defined and variable, elapsed time
//! is always measured with `FrameClock::now`, and a note is done when
//! `elapsed >= duration`, never when a progress value happens to reach 1.0.
//!
//! At most one tick request is outstanding at any moment; `stop` cancels it
//! synchronously, and a stale tick delivered anyway is answered with
//! [`TickOutcome::Idle`].
//!
//! ## Sub-modules
//! - `plan` - PlaybackPlan, PlannedNote type definitions
//! - `clock` - FrameClock trait, TickToken, ManualClock, SystemClock
//! - `scheduler` - The state machine itself
//!
//! ## Key Types
//! - [`PlaybackPlan`] - Seconds timeline derived from a sequence
//! - [`PlaybackScheduler`] - Idle/Playing state machine
//! - [`TickOutcome`] - Progress, Finished, or Idle per delivered tick
//!
//! ## Example
//! ```rust
//! use tabkit::{parse, ManualClock, PlaybackPlan, PlaybackScheduler, Tempo, TickOutcome};
//!
//! let seq = parse("4:5,4:7").unwrap();
//! let plan = PlaybackPlan::from_sequence(&seq, Tempo::default());
//!
//! let mut clock = ManualClock::new();
//! let mut scheduler = PlaybackScheduler::new(plan);
//! assert!(scheduler.start(&mut clock));
//!
//! // the first tick anchors note 0's start time
//! assert_eq!(
//!     scheduler.tick(&mut clock),
//!     TickOutcome::Progress { note_index: 0, progress: 0.0 }
//! );
//!
//! clock.advance(0.25); // halfway through a 0.5 s quarter note
//! assert_eq!(
//!     scheduler.tick(&mut clock),
//!     TickOutcome::Progress { note_index: 0, progress: 0.5 }
//! );
//! ```
//!
//! ## Related Modules
//! - `tab` - `NoteValue` and `Tempo` give plans their durations
//! - `editor` - Owns a scheduler and delegates start/tick/stop

mod clock;
mod plan;
mod scheduler;


pub use clock::{FrameClock, ManualClock, SystemClock, TickToken};
pub use plan::{PlannedNote, PlaybackPlan};
pub use scheduler::{PlaybackPhase, PlaybackScheduler, TickOutcome};
