//! Canvas, print-area, and interaction constants.

use crate::geom::Bounds;
use crate::view::View;

/// Editor canvas edge length in pixels (square canvas).
pub const CANVAS_SIZE: f64 = 660.0;

/// Width of the high-resolution design-only export used for print files.
pub const EXPORT_WIDTH: u32 = 4500;

/// Height of the high-resolution design-only export used for print files.
pub const EXPORT_HEIGHT: u32 = 5400;

/// Half-width of the square resize-handle hit box, in canvas pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;

/// Distance of the rotation knob above the box's top-center.
pub const ROTATION_KNOB_OFFSET: f64 = 25.0;

/// Hit radius of the rotation knob.
pub const ROTATION_KNOB_RADIUS: f64 = 8.0;

/// Minimum width for text and design layers after a resize.
pub const MIN_LAYER_WIDTH: f64 = 50.0;

/// Minimum height for any layer after a resize.
pub const MIN_LAYER_HEIGHT: f64 = 20.0;

/// Minimum edge length for sprite layers after a resize.
pub const MIN_SPRITE_SIZE: f64 = 20.0;

/// Bounds of the best-fit font size binary search, inclusive.
pub const FONT_FIT_MIN: u32 = 5;
pub const FONT_FIT_MAX: u32 = 500;

/// Per-view print area as fractions of the canvas size.
///
/// All layer placement and resizing is clamped to the resolved rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PrintArea {
    /// Resolves the fractional area against a canvas size into pixel bounds.
    pub fn resolve(&self, canvas_width: f64, canvas_height: f64) -> Bounds {
        Bounds::new(
            canvas_width * self.x,
            canvas_height * self.y,
            canvas_width * (self.x + self.width),
            canvas_height * (self.y + self.height),
        )
    }
}

/// Print-area fractions measured against the garment template images.
pub fn print_area(view: View) -> PrintArea {
    match view {
        View::Front => PrintArea {
            x: 0.332,
            y: 0.228,
            width: 0.344,
            height: 0.453,
        },
        View::Back => PrintArea {
            x: 0.332,
            y: 0.161,
            width: 0.344,
            height: 0.453,
        },
        View::LeftSleeve | View::RightSleeve => PrintArea {
            x: 0.423,
            y: 0.434,
            width: 0.163,
            height: 0.173,
        },
        View::NeckLabel => PrintArea {
            x: 0.365,
            y: 0.308,
            width: 0.278,
            height: 0.295,
        },
    }
}
