pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod parser;
pub mod persist;
pub mod playback;
pub mod render;
pub mod tab;

pub use config::EditorConfig;
pub use editor::{ClickOutcome, Cursor, TabEditor};
pub use error::*;
pub use geometry::{PitchStep, Point, StaffPitch, StaveGeometry, TabGeometry};
pub use parser::parse;
pub use persist::{FileStore, MemoryStore, TextStore};
pub use playback::{
    FrameClock, ManualClock, PlannedNote, PlaybackPhase, PlaybackPlan, PlaybackScheduler,
    SystemClock, TickOutcome, TickToken,
};
pub use render::{RenderTarget, StaffLayout, SvgRenderTarget};
pub use tab::*;

/// Parse notation and draw it on a fresh SVG staff.
/// This is the main entry point for display-only hosts.
pub fn render_to_svg(text: &str, layout: &StaffLayout) -> Result<String, TabError> {
    let seq = parse(text)?;
    let mut target = SvgRenderTarget::new(layout.clone());
    target.draw_notes(&seq);
    Ok(target.svg().unwrap_or("").to_string())
}

/// Serialize a parsed sequence for an embedding host.
pub fn sequence_to_json(seq: &NoteSequence) -> String {
    serde_json::to_string(seq).unwrap_or_else(|_| "{}".to_string())
}

/// Serialize a playback plan for an embedding host.
pub fn plan_to_json(plan: &PlaybackPlan) -> String {
    serde_json::to_string(plan).unwrap_or_else(|_| "{}".to_string())
}
