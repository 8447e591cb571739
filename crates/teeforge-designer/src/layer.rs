//! Layer model for the design canvas.
//!
//! Each garment view holds at most one design layer, at most one text
//! layer, and any number of sprite layers. Layers are addressed by
//! [`LayerId`], which also doubles as the stacking-order token stored in
//! [`crate::view_state::ViewState`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use teeforge_core::{EditorError, Rect};
use tiny_skia::Pixmap;

/// Horizontal alignment of wrapped text lines inside the text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Direction a curved text baseline bends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveType {
    /// Baseline bows upward (smile).
    ArchUp,
    /// Baseline bows downward (frown).
    ArchDown,
}

/// Stable identity of a layer within one view.
///
/// The design and text slots are singletons; sprites are indexed by
/// their position in the view's sprite list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    Design,
    Text,
    Sprite(usize),
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerId::Design => write!(f, "design"),
            LayerId::Text => write!(f, "text"),
            LayerId::Sprite(i) => write!(f, "sprite-{}", i),
        }
    }
}

impl FromStr for LayerId {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "design" => Ok(LayerId::Design),
            "text" => Ok(LayerId::Text),
            other => {
                if let Some(idx) = other.strip_prefix("sprite-") {
                    if let Ok(i) = idx.parse::<usize>() {
                        return Ok(LayerId::Sprite(i));
                    }
                }
                Err(EditorError::UnknownLayerId {
                    id: other.to_string(),
                })
            }
        }
    }
}

/// A raster artwork layer backed by a decoded pixmap.
///
/// The pixel data is shared via `Arc` so that history snapshots stay
/// cheap: a snapshot clones the layer struct but not the pixels.
#[derive(Debug, Clone)]
pub struct DesignLayer {
    pub image: Arc<Pixmap>,
    /// Where the artwork came from, kept for re-publishing.
    pub source_url: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, clockwise, about the box center.
    pub rotation: f64,
    pub opacity: f32,
}

/// An editable text layer with optional curved baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub text: String,
    pub font: String,
    /// Font size in canvas pixels.
    pub size: f64,
    /// Fill color as RGB.
    pub color: [u8; 3],
    pub bold: bool,
    pub italic: bool,
    pub align: TextAlign,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub opacity: f32,
    pub curved: bool,
    pub curve: CurveType,
    /// Curvature amount, clamped to at least 1 when applied.
    pub curve_strength: f64,
}

/// What a sprite layer draws.
#[derive(Debug, Clone)]
pub enum SpriteKind {
    /// A single emoji grapheme rendered as text.
    Emoji(String),
    /// Small raster art, pixels shared like [`DesignLayer`].
    Image(Arc<Pixmap>),
}

/// A small decorative layer: an emoji or a clip-art image.
#[derive(Debug, Clone)]
pub struct SpriteLayer {
    pub kind: SpriteKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Nominal square size; emoji glyphs render at this size and the
    /// box is kept square around it.
    pub size: f64,
    pub rotation: f64,
    pub opacity: f32,
}

impl SpriteLayer {
    pub fn is_emoji(&self) -> bool {
        matches!(self.kind, SpriteKind::Emoji(_))
    }
}

/// A read-only view of any layer's placement box.
#[derive(Debug, Clone, Copy)]
pub struct LayerBox {
    pub rect: Rect,
    pub rotation: f64,
}

impl DesignLayer {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

impl TextLayer {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Color as a CSS-style hex string, used in the publish payloads.
    pub fn color_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.color[0], self.color[1], self.color[2])
    }
}

impl SpriteLayer {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}
