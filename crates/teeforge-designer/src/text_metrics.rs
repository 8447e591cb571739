//! Text measurement, wrapping, and curved-baseline geometry.
//!
//! Everything here is pure: callers supply a [`TextMeasure`] and get
//! line breaks or glyph placements back. The rasterizer and the editor
//! reflow logic both go through these functions so that what is drawn
//! always matches what was measured.

use std::f64::consts::PI;

use teeforge_core::constants::{FONT_FIT_MAX, FONT_FIT_MIN};

use crate::layer::CurveType;

/// Measures the advance width of a run of text at a given font size.
pub trait TextMeasure {
    fn text_width(&self, text: &str, size: f64) -> f64;
}

/// Measures text in a named family and style.
///
/// The editor owns one of these; per-layer measurers are derived from
/// it with [`StyledMeasure`]. Tests substitute a deterministic
/// implementation so layout math does not depend on host fonts.
pub trait FontMetrics: Send + Sync {
    fn styled_width(&self, family: &str, bold: bool, italic: bool, text: &str, size: f64) -> f64;
}

/// Adapts a [`FontMetrics`] plus one layer's font style to the
/// [`TextMeasure`] interface the wrapping functions take.
pub struct StyledMeasure<'a> {
    metrics: &'a dyn FontMetrics,
    family: &'a str,
    bold: bool,
    italic: bool,
}

impl<'a> StyledMeasure<'a> {
    pub fn new(metrics: &'a dyn FontMetrics, family: &'a str, bold: bool, italic: bool) -> Self {
        Self {
            metrics,
            family,
            bold,
            italic,
        }
    }
}

impl TextMeasure for StyledMeasure<'_> {
    fn text_width(&self, text: &str, size: f64) -> f64 {
        self.metrics
            .styled_width(self.family, self.bold, self.italic, text, size)
    }
}

/// Greedy word wrap against a maximum line width.
///
/// Words are separated by single spaces and each placed word keeps its
/// trailing space, so measured line widths include that space. A word
/// that is wider than the whole line on its own is broken character by
/// character. The trailing partial line is always emitted, so the
/// result is never empty.
pub fn wrap_text(measure: &dyn TextMeasure, text: &str, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        if measure.text_width(word, size) > max_width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let mut piece = String::new();
            for ch in word.chars() {
                let mut test = piece.clone();
                test.push(ch);
                if measure.text_width(&test, size) > max_width && !piece.is_empty() {
                    lines.push(std::mem::take(&mut piece));
                    piece.push(ch);
                } else {
                    piece = test;
                }
            }
            line = piece;
            line.push(' ');
        } else {
            let test = format!("{line}{word} ");
            if measure.text_width(&test, size) > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line = format!("{word} ");
            } else {
                line = test;
            }
        }
    }

    lines.push(line);
    lines
}

/// Width of the widest wrapped line.
pub fn max_line_width(measure: &dyn TextMeasure, lines: &[String], size: f64) -> f64 {
    lines
        .iter()
        .map(|l| measure.text_width(l, size))
        .fold(0.0, f64::max)
}

/// Finds the largest integer font size whose wrapped text fits a box.
///
/// Binary search over sizes; a size fits when the number of wrapped
/// lines times the size does not exceed the box height. The lower bound
/// is returned even when nothing fits.
pub fn best_fit_font_size(
    measure: &dyn TextMeasure,
    text: &str,
    width: f64,
    height: f64,
) -> f64 {
    let mut lo = FONT_FIT_MIN;
    let mut hi = FONT_FIT_MAX;
    let mut best = FONT_FIT_MIN;
    while lo <= hi {
        let mid = (lo + hi) / 2;
        let lines = wrap_text(measure, text, mid as f64, width);
        if lines.len() as f64 * mid as f64 <= height {
            best = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }
    best as f64
}

/// One character of curved text, positioned on the arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    /// Arc position of the character's anchor point.
    pub x: f64,
    pub y: f64,
    /// Glyph rotation in radians about its anchor.
    pub angle: f64,
}

/// Circle radius implied by a curve strength over a given box width.
fn curve_radius(width: f64, strength: f64) -> f64 {
    (width / 2.0) / (strength * PI / 200.0).sin()
}

/// Total sweep of the arc for a character count at a curve strength.
fn curve_total_angle(strength: f64, char_count: usize) -> f64 {
    if char_count == 0 {
        return 0.0;
    }
    let per_char = strength * PI / 100.0 / char_count as f64;
    per_char * (char_count - 1) as f64
}

/// Places each character of a single line of curved text on its arc.
///
/// The arc is centered horizontally on the box. Characters are spread
/// symmetrically about the arc apex; each glyph is rotated to stay
/// tangent to the baseline.
pub fn curved_glyph_placements(
    text: &str,
    curve: CurveType,
    curve_strength: f64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Vec<GlyphPlacement> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let strength = curve_strength.max(1.0);
    let radius = curve_radius(width, strength);
    let per_char = strength * PI / 100.0 / chars.len() as f64;
    let total = per_char * (chars.len() - 1) as f64;
    let start = -total / 2.0;
    let cx = x + width / 2.0;

    let mut out = Vec::with_capacity(chars.len());
    for (i, &ch) in chars.iter().enumerate() {
        let a = start + per_char * i as f64;
        let placement = match curve {
            CurveType::ArchUp => {
                let cy = y - radius + height / 2.0;
                GlyphPlacement {
                    ch,
                    x: cx + radius * a.sin(),
                    y: cy + radius * a.cos(),
                    angle: -a,
                }
            }
            CurveType::ArchDown => {
                let cy = y + radius + height / 2.0;
                GlyphPlacement {
                    ch,
                    x: cx + radius * a.sin(),
                    y: cy - radius * a.cos(),
                    angle: a,
                }
            }
        };
        out.push(placement);
    }
    out
}

/// Box height needed to contain one line of curved text.
///
/// The arc's rise above the chord plus the glyph height plus a fixed
/// margin of 20 canvas pixels.
pub fn curved_text_height(
    text: &str,
    curve_strength: f64,
    width: f64,
    font_size: f64,
) -> f64 {
    let strength = curve_strength.max(1.0);
    let radius = curve_radius(width, strength);
    let total = curve_total_angle(strength, text.chars().count());
    let arc_height = radius * (1.0 - (total / 2.0).cos());
    arc_height + font_size + 20.0
}
