//! # Render Module
//!
//! Drawing surfaces for the tab staff, and the geometry they report back.
//!
//! ## Purpose
//! The editor never draws pixels itself; it hands the parsed sequence to a
//! [`RenderTarget`] and asks the target afterwards where its lines ended up.
//! That geometry feeds click-to-edit (see `geometry`). Keeping the surface
//! behind a trait lets hosts bring their own canvas while tests and headless
//! embedders use the built-in SVG target.
//!
//! ## Drawing Contract
//! - Every draw clears the surface first and redraws everything; drawing the
//!   same sequence twice yields identical output with no stale artifacts.
//! - Notes are spaced evenly, one column per note, chords stacked in one
//!   column. Playback durations never affect layout.
//! - `line_y` answers from the most recent draw and returns `None` before
//!   anything has been drawn, so callers fail closed.
//!
//! ## Sub-modules
//! - `svg` - String-assembled SVG implementation
//!
//! ## Key Types
//! - [`RenderTarget`] - The surface trait
//! - [`StaffLayout`] - Pixel layout shared by implementations
//! - [`SvgRenderTarget`] - Built-in SVG surface
//!
//! ## Related Modules
//! - `geometry` - Consumes `TabGeometry` snapshots produced here
//! - `editor` - Redraws after every text mutation

mod svg;

pub use svg::SvgRenderTarget;

use crate::geometry::TabGeometry;
use crate::tab::NoteSequence;

/// A surface the editor draws the tab staff on
pub trait RenderTarget {
    /// Clear the surface and draw the empty six-line staff.
    fn draw_staff(&mut self);

    /// Clear the surface and draw the staff with `seq` on it.
    fn draw_notes(&mut self, seq: &NoteSequence);

    /// Pixel y of tab line `line` (0 = top line, string 1) from the most
    /// recent draw. `None` before the first draw or for `line > 5`.
    fn line_y(&self, line: usize) -> Option<f64>;

    /// Geometry snapshot for click mapping, `None` until a draw has
    /// established line positions.
    fn tab_geometry(&self) -> Option<TabGeometry> {
        let mut line_ys = [0.0_f64; 6];
        for (i, y) in line_ys.iter_mut().enumerate() {
            *y = self.line_y(i)?;
        }
        Some(TabGeometry { line_ys })
    }
}

/// Pixel layout of a rendered tab staff
#[derive(Debug, Clone, PartialEq)]
pub struct StaffLayout {
    pub width: f64,        // surface width
    pub height: f64,       // surface height
    pub left: f64,         // staff left edge (right margin mirrors it)
    pub top: f64,          // y of the top tab line
    pub line_spacing: f64, // distance between tab lines
}

impl Default for StaffLayout {
    fn default() -> Self {
        Self {
            width: 780.0,
            height: 180.0,
            left: 10.0,
            top: 30.0,
            line_spacing: 13.0,
        }
    }
}

impl StaffLayout {
    /// y of tab line `line` (0 = top)
    pub fn line_y(&self, line: usize) -> f64 {
        self.top + line as f64 * self.line_spacing
    }

    /// Horizontal extent of the staff between its margins
    pub fn staff_width(&self) -> f64 {
        self.width - 2.0 * self.left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_line_positions() {
        let layout = StaffLayout::default();
        assert_eq!(layout.line_y(0), 30.0);
        assert_eq!(layout.line_y(5), 95.0);
    }

    #[test]
    fn test_layout_staff_width() {
        let layout = StaffLayout::default();
        assert_eq!(layout.staff_width(), 760.0);
    }
}
