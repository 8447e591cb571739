//! Layer lifecycle: adding artwork and sprites, removal, reordering.

use std::sync::Arc;

use tiny_skia::Pixmap;
use tracing::debug;

use crate::editor::Editor;
use crate::layer::{DesignLayer, LayerId, SpriteKind, SpriteLayer};

/// Default edge length of a freshly added sprite, in canvas pixels.
const SPRITE_DEFAULT_SIZE: f64 = 60.0;

impl Editor {
    /// Places artwork on the active view's print area.
    ///
    /// The image is scaled to fill the print-area width while keeping
    /// its aspect ratio, shrunk further if that would overflow the
    /// area's height, then centered and clamped inside the area. Any
    /// existing design layer is replaced in place, keeping its spot in
    /// the stacking order.
    pub fn place_design(&mut self, image: Arc<Pixmap>, source_url: impl Into<String>) {
        self.save_state();
        let bounds = self.bounds();

        let (img_w, img_h) = (image.width() as f64, image.height() as f64);
        let mut width = bounds.width();
        let mut height = if img_w > 0.0 { width * img_h / img_w } else { width };
        if height > bounds.height() {
            height = bounds.height();
            width = if img_h > 0.0 { height * img_w / img_h } else { height };
        }

        let x = bounds.min_x + (bounds.width() - width) / 2.0;
        let y = bounds.min_y + (bounds.height() - height) / 2.0;
        let origin = bounds.clamp_origin(x, y, width, height);

        debug!(
            view = %self.current_view(),
            width, height, "placing design layer"
        );

        let view = self.current_mut();
        view.design = Some(DesignLayer {
            image,
            source_url: source_url.into(),
            x: origin.x,
            y: origin.y,
            width,
            height,
            rotation: 0.0,
            opacity: 1.0,
        });
        view.push_order(LayerId::Design);
        self.set_selection(Some(LayerId::Design));
    }

    /// Adds an emoji sprite at the center of the print area.
    pub fn add_emoji_sprite(&mut self, emoji: impl Into<String>) -> LayerId {
        self.add_sprite(SpriteKind::Emoji(emoji.into()))
    }

    /// Adds a small raster sprite at the center of the print area.
    pub fn add_image_sprite(&mut self, image: Arc<Pixmap>) -> LayerId {
        self.add_sprite(SpriteKind::Image(image))
    }

    fn add_sprite(&mut self, kind: SpriteKind) -> LayerId {
        self.save_state();
        let bounds = self.bounds();
        let size = SPRITE_DEFAULT_SIZE;
        let center = bounds.clamp_origin(
            bounds.min_x + bounds.width() / 2.0 - size / 2.0,
            bounds.min_y + bounds.height() / 2.0 - size / 2.0,
            size,
            size,
        );

        let view = self.current_mut();
        view.sprites.push(SpriteLayer {
            kind,
            x: center.x,
            y: center.y,
            width: size,
            height: size,
            size,
            rotation: 0.0,
            opacity: 1.0,
        });
        let id = LayerId::Sprite(view.sprites.len() - 1);
        view.push_order(id);
        self.set_selection(Some(id));
        id
    }

    /// Removes a layer from the active view. Removing a sprite
    /// renumbers the sprites above it; the selection follows suit.
    pub fn remove_layer(&mut self, id: LayerId) {
        if !self.current().exists(id) {
            return;
        }
        self.save_state();
        match id {
            LayerId::Design => self.current_mut().remove_design(),
            LayerId::Text => self.current_mut().remove_text(),
            LayerId::Sprite(i) => self.current_mut().remove_sprite(i),
        }
        let selection = match (self.selection(), id) {
            (Some(sel), _) if sel == id => None,
            (Some(LayerId::Sprite(s)), LayerId::Sprite(removed)) if s > removed => {
                Some(LayerId::Sprite(s - 1))
            }
            (sel, _) => sel,
        };
        self.set_selection(selection);
    }

    /// Removes whichever layer is selected.
    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selection() {
            self.remove_layer(id);
        }
    }

    /// Applies a layers-panel ordering (listed top to bottom) to the
    /// active view.
    pub fn reorder_layers(&mut self, top_down: &[LayerId]) {
        self.save_state();
        self.current_mut().reorder_top_down(top_down);
    }

    /// Sets a layer's opacity, clamped to `0.0..=1.0`.
    pub fn set_layer_opacity(&mut self, id: LayerId, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        self.save_state();
        let view = self.current_mut();
        match id {
            LayerId::Design => {
                if let Some(d) = view.design.as_mut() {
                    d.opacity = opacity;
                }
            }
            LayerId::Text => {
                if let Some(t) = view.text.as_mut() {
                    t.opacity = opacity;
                }
            }
            LayerId::Sprite(i) => {
                if let Some(s) = view.sprites.get_mut(i) {
                    s.opacity = opacity;
                }
            }
        }
    }
}
