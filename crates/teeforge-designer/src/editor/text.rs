//! Text layer editing and the reflow rules that keep the text box in
//! step with its content.

use teeforge_core::constants::{MIN_LAYER_HEIGHT, MIN_LAYER_WIDTH};
use teeforge_core::Rect;

use crate::editor::Editor;
use crate::layer::{CurveType, LayerId, TextAlign, TextLayer};
use crate::text_metrics::{
    best_fit_font_size, curved_text_height, max_line_width, wrap_text, StyledMeasure, TextMeasure,
};

/// Starter content of a fresh text layer; double-clicking it clears it.
pub const PLACEHOLDER_TEXT: &str = "Double Click to Edit";

const DEFAULT_FONT: &str = "Arial Black";
const DEFAULT_FONT_SIZE: f64 = 40.0;
/// Horizontal padding added around the measured single-line width.
const TEXT_BOX_PADDING: f64 = 20.0;

impl Editor {
    /// Adds the view's text layer with placeholder content, centered
    /// in the print area. If the view already has text, it is selected
    /// instead.
    pub fn add_text(&mut self) -> LayerId {
        if self.current().text.is_some() {
            self.set_selection(Some(LayerId::Text));
            return LayerId::Text;
        }
        self.save_state();

        let bounds = self.bounds();
        let measure = StyledMeasure::new(self.metrics(), DEFAULT_FONT, false, false);
        let width = measure.text_width(PLACEHOLDER_TEXT, DEFAULT_FONT_SIZE) + TEXT_BOX_PADDING;
        let height = DEFAULT_FONT_SIZE;
        let origin = bounds.clamp_origin(
            bounds.min_x + (bounds.width() - width) / 2.0,
            bounds.min_y + (bounds.height() - height) / 2.0,
            width,
            height,
        );

        let view = self.current_mut();
        view.text = Some(TextLayer {
            text: PLACEHOLDER_TEXT.to_string(),
            font: DEFAULT_FONT.to_string(),
            size: DEFAULT_FONT_SIZE,
            color: [0, 0, 0],
            bold: false,
            italic: false,
            align: TextAlign::Center,
            x: origin.x,
            y: origin.y,
            width,
            height,
            rotation: 0.0,
            opacity: 1.0,
            curved: false,
            curve: CurveType::ArchUp,
            curve_strength: 20.0,
        });
        view.push_order(LayerId::Text);
        self.set_selection(Some(LayerId::Text));
        self.reflow_text();
        LayerId::Text
    }

    /// Replaces the text content and reflows the box around it.
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.edit_text(|t| t.text = text.into());
    }

    pub fn set_text_font(&mut self, font: impl Into<String>) {
        self.edit_text(|t| t.font = font.into());
    }

    pub fn set_text_size(&mut self, size: f64) {
        self.edit_text(|t| t.size = size.max(1.0));
    }

    pub fn set_text_bold(&mut self, bold: bool) {
        self.edit_text(|t| t.bold = bold);
    }

    pub fn set_text_italic(&mut self, italic: bool) {
        self.edit_text(|t| t.italic = italic);
    }

    pub fn set_text_color(&mut self, color: [u8; 3]) {
        self.edit_text(|t| t.color = color);
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.edit_text(|t| t.align = align);
    }

    pub fn set_text_curved(&mut self, curved: bool) {
        self.edit_text(|t| t.curved = curved);
    }

    pub fn set_curve_type(&mut self, curve: CurveType) {
        self.edit_text(|t| t.curve = curve);
    }

    pub fn set_curve_strength(&mut self, strength: f64) {
        self.edit_text(|t| t.curve_strength = strength);
    }

    fn edit_text(&mut self, apply: impl FnOnce(&mut TextLayer)) {
        if self.current().text.is_none() {
            return;
        }
        self.save_state();
        if let Some(t) = self.current_mut().text.as_mut() {
            apply(t);
        }
        self.reflow_text();
    }

    /// Recomputes the text box around the current content.
    ///
    /// Straight text grows the box to hold the wrapped lines and never
    /// shrinks it below its current width; curved text keeps one line
    /// and sizes the height from the arc. Either way the box is kept
    /// inside the print area, rewrapping if the clamp narrowed it.
    pub(crate) fn reflow_text(&mut self) {
        let Some(mut t) = self.current().text.clone() else {
            return;
        };
        let bounds = self.bounds();
        let measure = StyledMeasure::new(self.metrics(), &t.font, t.bold, t.italic);
        let single = measure.text_width(&t.text, t.size);
        let max_width = bounds.max_x - t.x;
        let max_height = bounds.max_y - t.y;

        if t.curved {
            let width = t
                .width
                .max(single + TEXT_BOX_PADDING)
                .max(MIN_LAYER_WIDTH)
                .min(max_width);
            let height = curved_text_height(&t.text, t.curve_strength, width, t.size)
                .max(t.size)
                .min(max_height);
            t.width = width;
            t.height = height;
        } else {
            let mut width_for_wrap = t
                .width
                .max(single + TEXT_BOX_PADDING)
                .max(MIN_LAYER_WIDTH);
            let mut lines = wrap_text(&measure, &t.text, t.size, width_for_wrap);
            let widest = max_line_width(&measure, &lines, t.size);
            if widest > width_for_wrap {
                width_for_wrap = widest;
                lines = wrap_text(&measure, &t.text, t.size, width_for_wrap);
            }

            let mut final_width = t.width.max(width_for_wrap);
            let mut height = (lines.len() as f64 * t.size).max(t.size);

            if final_width > max_width {
                final_width = max_width;
                lines = wrap_text(&measure, &t.text, t.size, final_width);
                height = ((lines.len() as f64 * t.size).max(t.size)).min(max_height);
            } else {
                height = height.min(max_height);
            }
            t.width = final_width;
            t.height = height;
        }

        self.current_mut().text = Some(t);
    }

    /// Applies a handle-drag resize outcome to the text layer: the box
    /// takes the dragged geometry and the font size is refit so the
    /// wrapped text fills it.
    pub(crate) fn apply_text_resize(&mut self, rect: Rect) {
        let Some(mut t) = self.current().text.clone() else {
            return;
        };
        let measure = StyledMeasure::new(self.metrics(), &t.font, t.bold, t.italic);
        t.x = rect.x;
        t.y = rect.y;
        t.width = rect.width.max(MIN_LAYER_WIDTH);
        t.height = rect.height.max(MIN_LAYER_HEIGHT);
        t.size = best_fit_font_size(&measure, &t.text, t.width, t.height);
        self.current_mut().text = Some(t);
    }

    /// Wrapped lines of the current text at its present geometry, as
    /// the renderer will draw them.
    pub fn text_lines(&self, t: &TextLayer) -> Vec<String> {
        let measure = StyledMeasure::new(self.metrics(), &t.font, t.bold, t.italic);
        wrap_text(&measure, &t.text, t.size, t.width)
    }
}
