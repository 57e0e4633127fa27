//! # Notation Parser
//!
//! This module parses tablature notation text into a [`NoteSequence`].
//!
//! ## Purpose
//! The notation is the single source of truth for a phrase: every edit, bound
//! to a text field or synthesized from a staff click, rewrites the text and
//! reparses it from scratch. The parser therefore has to be cheap, total over
//! arbitrary input, and deterministic.
//!
//! ## Grammar
//! ```text
//! sequence  = note ("," note)*          stray/trailing commas tolerated
//! note      = position ("+" position)*  two or more positions = chord
//! position  = string ":" fret
//! string    = integer 1-6              (1 = thinnest string)
//! fret      = any non-empty text       (kept verbatim, usually a number)
//! ```
//! Whitespace around notes and around the `:` parts is trimmed. The fret text
//! is intentionally lenient: `3:x` is a muted string and renders as written.
//! Only the first `:` in a position splits it, so `4:5:6` keeps `5:6` as the
//! fret text.
//!
//! ## Error Policy
//! Parsing is all-or-nothing: the first malformed position fails the whole
//! parse and no partial sequence is produced. Errors carry the offending
//! position pair so a host can quote it back to the user.
//!
//! ## Entry Point
//! `parse(text: &str) -> Result<NoteSequence, TabError>`
//!
//! ## Example
//! ```rust
//! use tabkit::parse;
//!
//! let seq = parse("4:5,4:7+3:7,2:5").unwrap();
//! assert_eq!(seq.notes.len(), 3);
//! assert!(seq.notes[1].is_chord());
//! assert_eq!(seq.to_notation(), "4:5,4:7+3:7,2:5");
//! ```
//!
//! ## Related Modules
//! - `tab` - Defines the model types this parser produces
//! - `error` - `InvalidToken` and `StringOutOfRange`
//! - `editor` - Reparses on every text mutation

use log::debug;

use crate::error::TabError;
use crate::tab::{Fret, Note, NoteSequence, NoteValue, Position, StringNumber};

/// Parse notation text into a note sequence.
///
/// Empty input (or input that is only separators and whitespace) is a valid
/// empty sequence, not an error. Every produced note carries a quarter-note
/// value; rhythm is not part of the written notation.
pub fn parse(text: &str) -> Result<NoteSequence, TabError> {
    let mut notes = Vec::new();

    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        notes.push(parse_note(token)?);
    }

    debug!("parsed {} note(s)", notes.len());
    Ok(NoteSequence { notes })
}

/// Parse one note token: a single position or a `+`-joined chord.
/// Positions keep their written order.
fn parse_note(token: &str) -> Result<Note, TabError> {
    let mut positions = Vec::new();
    for pair in token.split('+') {
        positions.push(parse_position(pair)?);
    }

    Ok(Note {
        positions,
        duration: NoteValue::Quarter,
    })
}

/// Parse one `string:fret` pair. The raw pair text goes into any error.
fn parse_position(pair: &str) -> Result<Position, TabError> {
    let invalid = || TabError::InvalidToken {
        token: pair.to_string(),
    };

    let (string_part, fret_part) = pair.split_once(':').ok_or_else(invalid)?;

    let string_num: i32 = string_part.trim().parse().map_err(|_| invalid())?;
    let fret = Fret::new(fret_part).ok_or_else(invalid)?;

    let string = StringNumber::new(string_num).ok_or(TabError::StringOutOfRange {
        token: pair.to_string(),
        string: string_num,
    })?;

    Ok(Position { string, fret })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let seq = parse("").unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_whitespace_only_input() {
        let seq = parse("   ,  , ").unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_default_phrase() {
        let seq = parse("4:5,4:7,3:7,2:5").unwrap();
        assert_eq!(seq.notes.len(), 4);

        let first = &seq.notes[0];
        assert_eq!(first.positions.len(), 1);
        assert_eq!(first.positions[0].string.number(), 4);
        assert_eq!(first.positions[0].fret.as_str(), "5");
    }

    #[test]
    fn test_chord_preserves_order() {
        let seq = parse("4:5+3:7+2:5").unwrap();
        assert_eq!(seq.notes.len(), 1);

        let note = &seq.notes[0];
        assert!(note.is_chord());
        let strings: Vec<u8> = note
            .positions
            .iter()
            .map(|p| p.string.number())
            .collect();
        assert_eq!(strings, vec![4, 3, 2]);
    }

    #[test]
    fn test_uniform_quarter_durations() {
        let seq = parse("4:5,4:7+3:7,2:5").unwrap();
        for note in &seq.notes {
            assert_eq!(note.duration, NoteValue::Quarter);
        }
    }

    #[test]
    fn test_non_integer_string_part() {
        assert_eq!(
            parse("x:5"),
            Err(TabError::InvalidToken {
                token: "x:5".to_string()
            })
        );
    }

    #[test]
    fn test_empty_fret() {
        assert_eq!(
            parse("4:"),
            Err(TabError::InvalidToken {
                token: "4:".to_string()
            })
        );
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(
            parse("45"),
            Err(TabError::InvalidToken {
                token: "45".to_string()
            })
        );
    }

    #[test]
    fn test_empty_string_part() {
        assert_eq!(
            parse(":5"),
            Err(TabError::InvalidToken {
                token: ":5".to_string()
            })
        );
    }

    #[test]
    fn test_string_out_of_range() {
        assert_eq!(
            parse("9:0"),
            Err(TabError::StringOutOfRange {
                token: "9:0".to_string(),
                string: 9
            })
        );
        assert_eq!(
            parse("0:3"),
            Err(TabError::StringOutOfRange {
                token: "0:3".to_string(),
                string: 0
            })
        );
    }

    #[test]
    fn test_trailing_empty_chord_position() {
        // "4:5+" has an empty second position; the raw (empty) pair is quoted
        assert_eq!(
            parse("4:5+"),
            Err(TabError::InvalidToken {
                token: "".to_string()
            })
        );
    }

    #[test]
    fn test_whitespace_and_trailing_comma() {
        let seq = parse(" 4 : 12 ,").unwrap();
        assert_eq!(seq.notes.len(), 1);
        assert_eq!(seq.notes[0].positions[0].string.number(), 4);
        assert_eq!(seq.notes[0].positions[0].fret.as_str(), "12");
    }

    #[test]
    fn test_verbatim_fret_text() {
        let seq = parse("3:x").unwrap();
        assert_eq!(seq.notes[0].positions[0].fret.as_str(), "x");
        assert_eq!(seq.notes[0].positions[0].fret.as_number(), None);
    }

    #[test]
    fn test_second_colon_joins_fret() {
        // Only the first colon splits; the rest is fret text
        let seq = parse("4:5:6").unwrap();
        assert_eq!(seq.notes[0].positions[0].fret.as_str(), "5:6");
    }

    #[test]
    fn test_all_or_nothing() {
        assert_eq!(
            parse("4:5,bad,3:7"),
            Err(TabError::InvalidToken {
                token: "bad".to_string()
            })
        );
    }

    #[test]
    fn test_round_trip() {
        let text = "4:5,4:7+3:7,2:5";
        let seq = parse(text).unwrap();
        assert_eq!(seq.to_notation(), text);
    }

    #[test]
    fn test_deterministic() {
        let a = parse("4:5,3:x,2:0+1:0").unwrap();
        let b = parse("4:5,3:x,2:0+1:0").unwrap();
        assert_eq!(a, b);
    }
}
