//! # Editor Session
//!
//! This module ties the engine together into one editing session: the
//! notation text, its parsed sequence, the persistence slot, the render
//! surface, and playback.
//!
//! ## Text Is the Source of Truth
//! Every mutation, whether typed text or a synthesized click token, rewrites
//! the notation text, persists it, and reparses from scratch. Rendering and
//! playback only ever see the parsed sequence. When a reparse fails the
//! editor keeps the text (so the user can fix it) but blanks the sequence,
//! renders the empty staff, and stores the error for display.
//!
//! ## Click-to-Edit
//! A click maps through three gates before it becomes an edit. Direct-edit
//! mode must be on and the fret input must be a plain number. The render
//! target must also have reported geometry; nothing drawn yet fails closed.
//! The mapped token lands after the cursor; with the cursor unset or at the
//! end of the phrase the token is appended to the raw text verbatim,
//! otherwise the phrase is rebuilt from canonical tokens with the new one
//! spliced in.
//!
//! ## Playback
//! `start_playback` snapshots the current sequence into a plan at the
//! configured tempo, so edits made while playing take effect on the next
//! start, not mid-phrase. Dropping the editor stops playback, which cancels
//! any outstanding tick request.
//!
//! ## Example
//! ```rust
//! use tabkit::{
//!     ClickOutcome, EditorConfig, ManualClock, MemoryStore, Point, StaffLayout,
//!     SvgRenderTarget, TabEditor,
//! };
//!
//! let mut editor = TabEditor::new(
//!     Box::new(MemoryStore::new()),
//!     Box::new(ManualClock::new()),
//!     EditorConfig::default(),
//! );
//! editor.attach_render(Box::new(SvgRenderTarget::new(StaffLayout::default())));
//!
//! // the default phrase was restored and parsed
//! assert_eq!(editor.sequence().len(), 4);
//!
//! editor.set_direct_edit(true);
//! let outcome = editor.click_at(Point::new(120.0, 30.0), "7");
//! assert!(matches!(outcome, ClickOutcome::Inserted { .. }));
//! assert_eq!(editor.sequence().len(), 5);
//! ```
//!
//! ## Related Modules
//! - `parser` - Reparses after every mutation
//! - `geometry` - Maps click positions to strings
//! - `playback` - The scheduler this session delegates to
//! - `persist` - Where the text survives between sessions

use log::debug;

use crate::config::EditorConfig;
use crate::error::TabError;
use crate::geometry::Point;
use crate::parser::parse;
use crate::persist::TextStore;
use crate::playback::{FrameClock, PlaybackPhase, PlaybackPlan, PlaybackScheduler, TickOutcome};
use crate::render::RenderTarget;
use crate::tab::{Fret, NoteSequence, StringNumber};

/// Points at the most recently inserted or edited note.
///
/// The next click insertion lands after it; `None` targets the end of the
/// phrase. The cursor resets whenever the text is replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    pub note_index: Option<usize>,
}

/// What became of a staff click
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// A note was inserted after the cursor
    Inserted { string: StringNumber, fret: Fret },
    /// Direct-edit mode is off; the click was ignored
    EditDisabled,
    /// No geometry to map against: no render target, or nothing drawn yet
    NoGeometry,
    /// The fret input was not a plain number
    InvalidFret,
}

/// One tablature editing session
pub struct TabEditor {
    config: EditorConfig,
    text: String,
    sequence: NoteSequence,
    parse_error: Option<TabError>,
    cursor: Cursor,
    store: Box<dyn TextStore>,
    render: Option<Box<dyn RenderTarget>>,
    scheduler: PlaybackScheduler,
    clock: Box<dyn FrameClock>,
}

impl TabEditor {
    /// Open a session over `store`, restoring the saved notation or falling
    /// back to the configured default.
    ///
    /// A bad saved value never fails construction: the editor comes up with
    /// an empty sequence and the parse error stored. Nothing is written to
    /// the store until the first mutation.
    pub fn new(
        store: Box<dyn TextStore>,
        clock: Box<dyn FrameClock>,
        config: EditorConfig,
    ) -> Self {
        let text = match store.get(&config.storage_key) {
            Some(saved) => {
                debug!("restored notation from slot {}", config.storage_key);
                saved
            }
            None => config.default_notation.clone(),
        };

        let mut editor = Self {
            config,
            text,
            sequence: NoteSequence::default(),
            parse_error: None,
            cursor: Cursor::default(),
            store,
            render: None,
            scheduler: PlaybackScheduler::default(),
            clock,
        };
        editor.reparse();
        editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The notation text as the user wrote it (kept even when it fails to
    /// parse)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed phrase; empty while the text fails to parse
    pub fn sequence(&self) -> &NoteSequence {
        &self.sequence
    }

    /// The error from the most recent reparse, if it failed
    pub fn parse_error(&self) -> Option<&TabError> {
        self.parse_error.as_ref()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Point the cursor at an existing note (`None` targets the end).
    /// Out-of-range indices are ignored.
    pub fn set_cursor(&mut self, note_index: Option<usize>) {
        match note_index {
            Some(idx) if idx >= self.sequence.len() => {}
            other => self.cursor.note_index = other,
        }
    }

    pub fn direct_edit(&self) -> bool {
        self.config.direct_edit
    }

    pub fn set_direct_edit(&mut self, enabled: bool) {
        self.config.direct_edit = enabled;
    }

    /// Replace the notation text: persist, reparse, reset the cursor,
    /// redraw.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.persist();
        self.reparse();
        self.cursor = Cursor::default();
        self.redraw();
    }

    /// Attach a render surface; the current sequence is drawn immediately,
    /// which also establishes click geometry.
    pub fn attach_render(&mut self, target: Box<dyn RenderTarget>) {
        self.render = Some(target);
        self.redraw();
    }

    /// Detach and return the render surface. Subsequent draws are skipped
    /// silently and clicks fail closed.
    pub fn detach_render(&mut self) -> Option<Box<dyn RenderTarget>> {
        self.render.take()
    }

    /// Redraw the current sequence. A missing render target is a no-op.
    pub fn redraw(&mut self) {
        if let Some(target) = self.render.as_mut() {
            target.draw_notes(&self.sequence);
        }
    }

    /// Map a staff click into a note insertion.
    ///
    /// `fret_input` is the fret the user supplied for the click (the
    /// original surface prompts for it); only plain numbers are accepted.
    /// See the module docs for the gate order.
    pub fn click_at(&mut self, point: Point, fret_input: &str) -> ClickOutcome {
        if !self.config.direct_edit {
            return ClickOutcome::EditDisabled;
        }

        let geometry = match self.render.as_ref().and_then(|r| r.tab_geometry()) {
            Some(geo) => geo,
            None => return ClickOutcome::NoGeometry,
        };

        let fret = match Fret::from_digits(fret_input) {
            Some(fret) => fret,
            None => return ClickOutcome::InvalidFret,
        };

        let string = geometry.nearest_string(point.y);
        let token = format!("{}:{}", string.number(), fret.as_str());

        let inserted_at = match self.cursor.note_index {
            // cursor mid-phrase: rebuild from canonical tokens and splice
            Some(idx) if idx + 1 < self.sequence.len() => {
                let mut tokens: Vec<String> =
                    self.sequence.notes.iter().map(|n| n.to_token()).collect();
                tokens.insert(idx + 1, token);
                self.text = tokens.join(",");
                idx + 1
            }
            // cursor at the end or unset: append to the raw text
            _ => {
                self.text = if self.text.is_empty() {
                    token
                } else {
                    format!("{},{}", self.text, token)
                };
                self.sequence.len()
            }
        };

        self.persist();
        self.reparse();
        self.cursor.note_index = if self.parse_error.is_none() {
            Some(inserted_at)
        } else {
            None
        };
        self.redraw();

        debug!(
            "inserted {}:{} as note {}",
            string.number(),
            fret.as_str(),
            inserted_at
        );
        ClickOutcome::Inserted { string, fret }
    }

    /// Remove the note under the cursor, stepping the cursor back.
    /// Returns `false` when the cursor points at nothing.
    pub fn remove_at_cursor(&mut self) -> bool {
        let idx = match self.cursor.note_index {
            Some(idx) if idx < self.sequence.len() => idx,
            _ => return false,
        };

        let mut tokens: Vec<String> = self.sequence.notes.iter().map(|n| n.to_token()).collect();
        tokens.remove(idx);
        self.text = tokens.join(",");

        self.persist();
        self.reparse();
        self.cursor.note_index = idx.checked_sub(1);
        self.redraw();

        debug!("removed note {}", idx);
        true
    }

    /// Start playback of the current sequence at the configured tempo.
    ///
    /// The sequence is snapshotted into a plan, so later edits do not affect
    /// the running playback. Returns `false` while already playing or when
    /// there is nothing to play.
    pub fn start_playback(&mut self) -> bool {
        if self.scheduler.phase() == PlaybackPhase::Playing {
            return false;
        }

        let plan = PlaybackPlan::from_sequence(&self.sequence, self.config.tempo());
        self.scheduler.set_plan(plan, self.clock.as_mut());
        self.scheduler.start(self.clock.as_mut())
    }

    /// Deliver one frame tick to the running playback.
    pub fn tick_playback(&mut self) -> TickOutcome {
        self.scheduler.tick(self.clock.as_mut())
    }

    /// Stop playback, cancelling the outstanding tick request. Safe in any
    /// state.
    pub fn stop_playback(&mut self) {
        self.scheduler.stop(self.clock.as_mut());
    }

    pub fn playback_phase(&self) -> PlaybackPhase {
        self.scheduler.phase()
    }

    /// The plan playback is (or would be) running from
    pub fn playback_plan(&self) -> &PlaybackPlan {
        self.scheduler.plan()
    }

    fn persist(&mut self) {
        self.store.set(&self.config.storage_key, &self.text);
    }

    fn reparse(&mut self) {
        match parse(&self.text) {
            Ok(seq) => {
                self.sequence = seq;
                self.parse_error = None;
            }
            Err(e) => {
                debug!("parse failed, blanking staff: {}", e);
                self.sequence = NoteSequence::default();
                self.parse_error = Some(e);
            }
        }
    }
}

impl Drop for TabEditor {
    fn drop(&mut self) {
        // no tick may outlive the session
        self.scheduler.stop(self.clock.as_mut());
    }
}
