//! # Tablature Data Model
//!
//! This module defines the typed model for a guitar tablature phrase.
//!
//! ## Type Hierarchy
//! ```text
//! NoteSequence
//!   └── Vec<Note>
//!         ├── positions: Vec<Position>  (one = single note, several = chord)
//!         │     ├── string: StringNumber  (1-6, 1 = thinnest)
//!         │     └── fret: Fret            (verbatim text, usually a number)
//!         └── duration: NoteValue         (whole .. sixteenth)
//! ```
//!
//! ## Key Concepts
//!
//! ### String Numbering
//! Strings are numbered 1 (thinnest, high E) through 6 (thickest, low E),
//! the convention guitarists read. On a rendered tab staff string 1 is the
//! top line, so `StringNumber::line_index()` is `number - 1`.
//!
//! ### Frets Are Text
//! A fret is kept as the verbatim trimmed text from the notation, not a
//! number. Players write non-numeric frets such as `x` (muted), and the
//! renderer draws whatever was written. `Fret::as_number()` is available
//! when a caller needs the numeric view, and `Fret::from_digits()` is the
//! strict gate used when synthesizing tokens from click input.
//!
//! ### Chords
//! A note with more than one position is a chord: all positions sound
//! together and occupy a single rhythmic slot. Positions keep their written
//! order and are never sorted or deduplicated.
//!
//! ### Durations and Tempo
//! The parser assigns every note a quarter-note value; `NoteValue::beats()`
//! gives the musical length (quarter = 1.0) and `Tempo` converts beats to
//! seconds for the playback plan. Rendering ignores durations entirely and
//! spaces notes evenly.
//!
//! ## Related Modules
//! - `parser` - builds these types from notation text
//! - `playback` - derives a timed plan from a sequence
//! - `render` - draws a sequence on a tab staff

use serde::Serialize;

/// Guitar string number, 1 (thinnest, high E) through 6 (thickest, low E)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StringNumber(u8);

impl StringNumber {
    /// All six strings in staff order, thinnest (top line) first
    pub const ALL: [StringNumber; 6] = [
        StringNumber(1),
        StringNumber(2),
        StringNumber(3),
        StringNumber(4),
        StringNumber(5),
        StringNumber(6),
    ];

    /// Validate a parsed string number. Returns `None` outside 1-6.
    pub fn new(n: i32) -> Option<Self> {
        if (1..=6).contains(&n) {
            Some(StringNumber(n as u8))
        } else {
            None
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Zero-based staff line from the top (string 1 = line 0)
    pub fn line_index(&self) -> usize {
        self.0 as usize - 1
    }
}

/// Fret label kept verbatim from the notation (usually a number, `x` for muted)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fret(String);

impl Fret {
    /// Trim and keep the text. Returns `None` for empty or all-whitespace input.
    pub fn new(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Fret(trimmed.to_string()))
        }
    }

    /// Strict numeric gate: accepts only non-empty ASCII digit strings.
    /// Used when synthesizing a token from click input, where free-form
    /// fret text is not allowed.
    pub fn from_digits(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            Some(Fret(trimmed.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric view of the fret, when the text happens to be a number
    pub fn as_number(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

/// A single fretted position: one string, one fret
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    pub string: StringNumber,
    pub fret: Fret,
}

impl Position {
    pub fn new(string: StringNumber, fret: Fret) -> Self {
        Self { string, fret }
    }

    /// Canonical token form, e.g. `4:5`
    pub fn to_token(&self) -> String {
        format!("{}:{}", self.string.number(), self.fret.as_str())
    }
}

/// One played note: a single position, or several sounded together (a chord)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub positions: Vec<Position>, // non-empty; written order preserved
    pub duration: NoteValue,
}

impl Note {
    pub fn is_chord(&self) -> bool {
        self.positions.len() > 1
    }

    /// Canonical token form, positions joined with `+`, e.g. `4:5+3:7`
    pub fn to_token(&self) -> String {
        self.positions
            .iter()
            .map(Position::to_token)
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Musical note value
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteValue {
    Whole,
    Half,
    #[default]
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteValue {
    /// Length in quarter-note beats
    pub fn beats(&self) -> f64 {
        match self {
            NoteValue::Whole => 4.0,
            NoteValue::Half => 2.0,
            NoteValue::Quarter => 1.0,
            NoteValue::Eighth => 0.5,
            NoteValue::Sixteenth => 0.25,
        }
    }

    /// Length in seconds at the given tempo
    pub fn seconds_at(&self, tempo: Tempo) -> f64 {
        self.beats() * tempo.seconds_per_beat()
    }
}

/// Playback tempo in quarter-note beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tempo {
    pub bpm: f64,
}

impl Default for Tempo {
    fn default() -> Self {
        Self { bpm: 120.0 }
    }
}

impl Tempo {
    pub fn new(bpm: f64) -> Self {
        Self { bpm }
    }

    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }
}

/// An ordered tablature phrase; insertion order is rendering and playback order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NoteSequence {
    pub notes: Vec<Note>,
}

impl NoteSequence {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// An empty sequence is valid: an empty staff, nothing to play
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Rebuild the canonical notation text, notes joined with `,`.
    /// Parsing the result reproduces this sequence.
    pub fn to_notation(&self) -> String {
        self.notes
            .iter()
            .map(Note::to_token)
            .collect::<Vec<_>>()
            .join(",")
    }
}
