//! Shared helpers for the editor integration tests.

use std::sync::Arc;

use teeforge_designer::text_metrics::FontMetrics;
use teeforge_designer::Editor;
use tiny_skia::{ColorU8, Pixmap};

/// Deterministic metrics: every character is 10 px wide at any size.
pub struct FixedMetrics;

impl FontMetrics for FixedMetrics {
    fn styled_width(
        &self,
        _family: &str,
        _bold: bool,
        _italic: bool,
        text: &str,
        _size: f64,
    ) -> f64 {
        text.chars().count() as f64 * 10.0
    }
}

pub fn editor() -> Editor {
    Editor::with_metrics(Box::new(FixedMetrics))
}

pub fn solid_pixmap(w: u32, h: u32, rgb: [u8; 3]) -> Arc<Pixmap> {
    let mut pm = Pixmap::new(w, h).expect("nonzero pixmap");
    let px = ColorU8::from_rgba(rgb[0], rgb[1], rgb[2], 255).premultiply();
    for p in pm.pixels_mut() {
        *p = px;
    }
    Arc::new(pm)
}
