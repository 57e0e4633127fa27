//! # Staff Geometry
//!
//! This module maps pointer positions on a rendered staff to musical
//! targets. It is the click-to-edit half of the engine: the render target
//! reports where its lines ended up, and these types answer "which string
//! (or which pitch) did the user mean?"
//!
//! ## Purpose
//! Geometry is passed around as small value snapshots rather than queried
//! live, so mapping stays pure: same snapshot, same click, same answer.
//! Callers that have no snapshot yet (nothing drawn, render target
//! detached) skip mapping.
//!
//! ## Two Mappings
//! - [`TabGeometry::nearest_string`] - tab staff: pick the closest of the
//!   six lines; ties go to the topmost (thinnest string). This is exact.
//! - [`StaveGeometry::pitch_at`] - five-line staff: quantize the vertical
//!   offset into half-line steps and walk the letter cycle from c4. This
//!   is a usability heuristic, not an exact staff-position inverse; small
//!   inaccuracies are acceptable and octaves are clamped to 2-6.
//!
//! ## Example
//! ```rust
//! use tabkit::TabGeometry;
//!
//! let geo = TabGeometry {
//!     line_ys: [10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
//! };
//! assert_eq!(geo.nearest_string(21.0).number(), 2);
//! assert_eq!(geo.nearest_string(25.0).number(), 2); // tie -> topmost
//! ```
//!
//! ## Related Modules
//! - `render` - Produces `TabGeometry` snapshots from a drawn staff
//! - `editor` - Turns a mapped click into a notation edit

use serde::Serialize;

use crate::tab::StringNumber;

/// Pointer position relative to the render surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel y of the six tab lines, top line (string 1) first
#[derive(Debug, Clone, PartialEq)]
pub struct TabGeometry {
    pub line_ys: [f64; 6],
}

impl TabGeometry {
    /// The string whose line is vertically closest to `y`.
    ///
    /// Distance ties break to the lower index, i.e. the topmost line and
    /// thinnest string. Clicks above the staff map to string 1, below it
    /// to string 6.
    pub fn nearest_string(&self, y: f64) -> StringNumber {
        let mut nearest = 0usize;
        let mut min_dist = f64::INFINITY;

        for (i, line_y) in self.line_ys.iter().enumerate() {
            let d = (y - line_y).abs();
            if d < min_dist {
                min_dist = d;
                nearest = i;
            }
        }

        StringNumber::ALL[nearest]
    }
}

/// Letter name in the diatonic cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchStep {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl PitchStep {
    /// The seven letters in ascending order, the cycle `pitch_at` walks
    pub const CYCLE: [PitchStep; 7] = [
        PitchStep::C,
        PitchStep::D,
        PitchStep::E,
        PitchStep::F,
        PitchStep::G,
        PitchStep::A,
        PitchStep::B,
    ];

    pub fn letter(&self) -> char {
        match self {
            PitchStep::C => 'c',
            PitchStep::D => 'd',
            PitchStep::E => 'e',
            PitchStep::F => 'f',
            PitchStep::G => 'g',
            PitchStep::A => 'a',
            PitchStep::B => 'b',
        }
    }
}

/// Pitch estimated from a staff click
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StaffPitch {
    pub step: PitchStep,
    pub octave: u8, // clamped to 2-6
}

/// Five-line staff geometry for the pitch estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaveGeometry {
    pub top_y: f64,
    pub line_spacing: f64,
}

impl StaveGeometry {
    /// The bottom staff line, the c4 anchor `pitch_at` walks from
    fn reference_y(&self) -> f64 {
        self.top_y + 4.0 * self.line_spacing
    }

    /// Estimate the pitch a vertical position points at.
    ///
    /// The offset from the bottom line is quantized to the nearest
    /// half-line step; two half-lines move one letter through
    /// `c d e f g a b`, with one half-line of tolerance either side of a
    /// letter, and the octave wraps at each pass through the cycle.
    /// Octaves outside 2-6 are clamped.
    pub fn pitch_at(&self, y: f64) -> StaffPitch {
        let half = self.line_spacing / 2.0;
        let delta = ((self.reference_y() - y) / half).round() as i64;

        let cycle = PitchStep::CYCLE;
        let mut idx: i64 = 0; // c
        let mut octave: i64 = 4;
        let mut steps = delta;

        while steps > 1 {
            idx += 1;
            steps -= 2;
            if idx >= cycle.len() as i64 {
                idx = 0;
                octave += 1;
            }
        }
        while steps < -1 {
            idx -= 1;
            steps += 2;
            if idx < 0 {
                idx = cycle.len() as i64 - 1;
                octave -= 1;
            }
        }

        StaffPitch {
            step: cycle[idx as usize],
            octave: octave.clamp(2, 6) as u8,
        }
    }
}
