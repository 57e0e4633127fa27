//! Playback plan type definitions
//!
//! A plan is the timed form of a phrase: one entry per note, with a start
//! offset and duration in seconds. The scheduler walks plans; it never looks
//! at the musical model directly.

use serde::Serialize;

use crate::tab::{NoteSequence, Tempo};

/// Timing for a single planned note
///
/// `note_index` points back into the source [`NoteSequence`], which is how a
/// host matches playback progress to the rendered note for highlighting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedNote {
    pub note_index: usize,
    pub start_secs: f64,
    pub duration_secs: f64,
}

/// Timed playback plan for a whole phrase
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackPlan {
    pub notes: Vec<PlannedNote>,
}

impl PlaybackPlan {
    /// Derive a plan from a parsed sequence at the given tempo.
    ///
    /// Each note's musical value converts to seconds and starts are
    /// cumulative, so a chord occupies one slot like any other note.
    pub fn from_sequence(seq: &NoteSequence, tempo: Tempo) -> Self {
        let mut notes = Vec::with_capacity(seq.len());
        let mut start = 0.0;

        for (i, note) in seq.notes.iter().enumerate() {
            let duration = note.duration.seconds_at(tempo);
            notes.push(PlannedNote {
                note_index: i,
                start_secs: start,
                duration_secs: duration,
            });
            start += duration;
        }

        Self { notes }
    }

    /// Build a plan from explicit per-note durations in seconds.
    pub fn from_durations(durations: &[f64]) -> Self {
        let mut notes = Vec::with_capacity(durations.len());
        let mut start = 0.0;

        for (i, &duration) in durations.iter().enumerate() {
            notes.push(PlannedNote {
                note_index: i,
                start_secs: start,
                duration_secs: duration,
            });
            start += duration;
        }

        Self { notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// An empty plan has nothing to play; the scheduler refuses to start it
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total length in seconds
    pub fn total_secs(&self) -> f64 {
        self.notes
            .last()
            .map(|n| n.start_secs + n.duration_secs)
            .unwrap_or(0.0)
    }
}
