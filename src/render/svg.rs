//! SVG render target: accumulates elements and produces the final string.

use super::{RenderTarget, StaffLayout};
use crate::tab::NoteSequence;

const BACKGROUND_COLOR: &str = "#ffffff";
const LINE_COLOR: &str = "#3a3a3a";
const TEXT_COLOR: &str = "#1a1a1a";
const LINE_WIDTH: f64 = 1.0;
const BARLINE_WIDTH: f64 = 1.6;
const CLEF_SPACE: f64 = 40.0; // horizontal space for the TAB letters
const CLEF_FONT_SIZE: f64 = 14.0;
const FRET_FONT_SIZE: f64 = 11.0;
const FRET_CHAR_WIDTH: f64 = 7.0; // knockout sizing per fret character
const TEXT_BASELINE_NUDGE: f64 = 4.0;

/// Render target producing a standalone SVG document.
///
/// Each draw rebuilds the whole document, so repeated draws of the same
/// sequence are byte-identical. The last document is available from
/// [`SvgRenderTarget::svg`].
#[derive(Debug)]
pub struct SvgRenderTarget {
    layout: StaffLayout,
    line_ys: Option<[f64; 6]>,
    document: Option<String>,
}

impl SvgRenderTarget {
    pub fn new(layout: StaffLayout) -> Self {
        Self {
            layout,
            line_ys: None,
            document: None,
        }
    }

    pub fn layout(&self) -> &StaffLayout {
        &self.layout
    }

    /// The document from the most recent draw, `None` before the first
    pub fn svg(&self) -> Option<&str> {
        self.document.as_deref()
    }

    fn render(&mut self, seq: &NoteSequence) {
        let layout = &self.layout;
        let mut doc = SvgDoc::new(layout.width, layout.height);

        doc.rect(0.0, 0.0, layout.width, layout.height, BACKGROUND_COLOR);

        // staff lines, top to bottom
        let mut line_ys = [0.0_f64; 6];
        let right = layout.left + layout.staff_width();
        for (i, line_y) in line_ys.iter_mut().enumerate() {
            *line_y = layout.line_y(i);
            doc.line(layout.left, *line_y, right, *line_y, LINE_WIDTH);
        }

        // barlines closing the staff at both ends
        let top = line_ys[0];
        let bottom = line_ys[5];
        doc.line(layout.left, top, layout.left, bottom, BARLINE_WIDTH);
        doc.line(right, top, right, bottom, BARLINE_WIDTH);

        // TAB letters in the clef space
        let clef_x = layout.left + CLEF_SPACE / 2.0;
        for (i, letter) in ["T", "A", "B"].iter().enumerate() {
            let y = layout.line_y(1)
                + i as f64 * 1.5 * layout.line_spacing
                + TEXT_BASELINE_NUDGE;
            doc.text(clef_x, y, letter, CLEF_FONT_SIZE, "middle");
        }

        // one evenly spaced column per note; chord positions stack vertically
        if !seq.is_empty() {
            let first = layout.left + CLEF_SPACE;
            let slot = (right - first) / seq.len() as f64;

            for (i, note) in seq.notes.iter().enumerate() {
                let x = first + slot * (i as f64 + 0.5);
                for pos in &note.positions {
                    let y = layout.line_y(pos.string.line_index());
                    let w = FRET_CHAR_WIDTH * pos.fret.as_str().chars().count() as f64 + 4.0;
                    let h = FRET_FONT_SIZE + 2.0;
                    doc.rect(x - w / 2.0, y - h / 2.0, w, h, BACKGROUND_COLOR);
                    doc.text(
                        x,
                        y + TEXT_BASELINE_NUDGE,
                        pos.fret.as_str(),
                        FRET_FONT_SIZE,
                        "middle",
                    );
                }
            }
        }

        self.line_ys = Some(line_ys);
        self.document = Some(doc.build());
    }
}

impl RenderTarget for SvgRenderTarget {
    fn draw_staff(&mut self) {
        self.render(&NoteSequence::default());
    }

    fn draw_notes(&mut self, seq: &NoteSequence) {
        self.render(seq);
    }

    fn line_y(&self, line: usize) -> Option<f64> {
        self.line_ys.as_ref().and_then(|ys| ys.get(line).copied())
    }
}

/// Accumulates SVG elements and produces the final document string
struct SvgDoc {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgDoc {
    fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" style="font-family: 'Helvetica', 'Arial', sans-serif;">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"/>"#,
            x1, y1, x2, y2, LINE_COLOR, width
        ));
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x, y, w, h, fill
        ));
    }

    fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: &str) {
        let escaped = content
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" fill="{}" text-anchor="{}">{}</text>"#,
            x, y, size, TEXT_COLOR, anchor, escaped
        ));
    }
}
