//! Per-view layer storage and stacking order.

use tracing::warn;

use crate::layer::{DesignLayer, LayerId, SpriteLayer, TextLayer};

/// Everything one garment view holds: the layer slots plus their
/// stacking order.
///
/// `order` lists layer ids bottom to top and only references layers
/// that exist; the accessors below keep that invariant.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub design: Option<DesignLayer>,
    pub text: Option<TextLayer>,
    pub sprites: Vec<SpriteLayer>,
    order: Vec<LayerId>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the id refers to a layer that currently exists.
    pub fn exists(&self, id: LayerId) -> bool {
        match id {
            LayerId::Design => self.design.is_some(),
            LayerId::Text => self.text.is_some(),
            LayerId::Sprite(i) => i < self.sprites.len(),
        }
    }

    /// True when the view has at least one layer of any kind.
    pub fn has_content(&self) -> bool {
        self.design.is_some() || self.text.is_some() || !self.sprites.is_empty()
    }

    /// Stacking order bottom to top, skipping ids whose layer is gone.
    pub fn ordered_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.order.iter().copied().filter(|id| {
            let present = self.exists(*id);
            if !present {
                warn!(layer = %id, "dropping stale id from layer order");
            }
            present
        })
    }

    /// Stacking order top to bottom, for hit testing.
    pub fn ordered_ids_top_down(&self) -> Vec<LayerId> {
        let mut ids: Vec<LayerId> = self.ordered_ids().collect();
        ids.reverse();
        ids
    }

    /// Appends an id to the top of the stack unless already present.
    pub fn push_order(&mut self, id: LayerId) {
        if !self.order.contains(&id) {
            self.order.push(id);
        }
    }

    /// Replaces the stacking order from a top-to-bottom listing, the
    /// way a layers panel presents it. Unknown ids are dropped and a
    /// repeated id keeps only its first (topmost) occurrence; layers
    /// missing from the listing keep their place below the rest.
    pub fn reorder_top_down(&mut self, top_down: &[LayerId]) {
        let mut listed: Vec<LayerId> = Vec::with_capacity(top_down.len());
        for id in top_down {
            if self.exists(*id) && !listed.contains(id) {
                listed.push(*id);
            }
        }
        let mut new_order: Vec<LayerId> = listed.into_iter().rev().collect();
        for id in &self.order {
            if self.exists(*id) && !new_order.contains(id) {
                new_order.insert(0, *id);
            }
        }
        self.order = new_order;
    }

    pub fn remove_design(&mut self) {
        self.design = None;
        self.order.retain(|id| *id != LayerId::Design);
    }

    pub fn remove_text(&mut self) {
        self.text = None;
        self.order.retain(|id| *id != LayerId::Text);
    }

    /// Removes one sprite and renumbers the ids above it.
    pub fn remove_sprite(&mut self, index: usize) {
        if index >= self.sprites.len() {
            return;
        }
        self.sprites.remove(index);
        self.order.retain(|id| *id != LayerId::Sprite(index));
        for id in &mut self.order {
            if let LayerId::Sprite(i) = id {
                if *i > index {
                    *i -= 1;
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.design = None;
        self.text = None;
        self.sprites.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{CurveType, SpriteKind, TextAlign};

    fn sprite(size: f64) -> SpriteLayer {
        SpriteLayer {
            kind: SpriteKind::Emoji("⭐".to_string()),
            x: 0.0,
            y: 0.0,
            width: size,
            height: size,
            size,
            rotation: 0.0,
            opacity: 1.0,
        }
    }

    fn text() -> TextLayer {
        TextLayer {
            text: "hi".to_string(),
            font: "Arial Black".to_string(),
            size: 40.0,
            color: [0, 0, 0],
            bold: false,
            italic: false,
            align: TextAlign::Center,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 40.0,
            rotation: 0.0,
            opacity: 1.0,
            curved: false,
            curve: CurveType::ArchUp,
            curve_strength: 20.0,
        }
    }

    #[test]
    fn order_tracks_additions_bottom_to_top() {
        let mut view = ViewState::new();
        view.text = Some(text());
        view.push_order(LayerId::Text);
        view.sprites.push(sprite(60.0));
        view.push_order(LayerId::Sprite(0));

        let ids: Vec<_> = view.ordered_ids().collect();
        assert_eq!(ids, vec![LayerId::Text, LayerId::Sprite(0)]);
        assert_eq!(
            view.ordered_ids_top_down(),
            vec![LayerId::Sprite(0), LayerId::Text]
        );
    }

    #[test]
    fn reorder_accepts_panel_listing() {
        let mut view = ViewState::new();
        view.text = Some(text());
        view.push_order(LayerId::Text);
        view.sprites.push(sprite(60.0));
        view.push_order(LayerId::Sprite(0));

        view.reorder_top_down(&[LayerId::Text, LayerId::Sprite(0)]);
        let ids: Vec<_> = view.ordered_ids().collect();
        assert_eq!(ids, vec![LayerId::Sprite(0), LayerId::Text]);
    }

    #[test]
    fn reorder_drops_repeated_ids() {
        let mut view = ViewState::new();
        view.text = Some(text());
        view.push_order(LayerId::Text);
        view.sprites.push(sprite(60.0));
        view.push_order(LayerId::Sprite(0));

        view.reorder_top_down(&[LayerId::Sprite(0), LayerId::Sprite(0), LayerId::Text]);
        let ids: Vec<_> = view.ordered_ids().collect();
        assert_eq!(ids, vec![LayerId::Text, LayerId::Sprite(0)]);
    }

    #[test]
    fn removing_a_sprite_renumbers_higher_ids() {
        let mut view = ViewState::new();
        view.sprites.push(sprite(60.0));
        view.push_order(LayerId::Sprite(0));
        view.sprites.push(sprite(30.0));
        view.push_order(LayerId::Sprite(1));

        view.remove_sprite(0);
        assert_eq!(view.sprites.len(), 1);
        assert_eq!(view.sprites[0].size, 30.0);
        let ids: Vec<_> = view.ordered_ids().collect();
        assert_eq!(ids, vec![LayerId::Sprite(0)]);
    }

    #[test]
    fn stale_order_entries_are_skipped() {
        let mut view = ViewState::new();
        view.push_order(LayerId::Design);
        assert_eq!(view.ordered_ids().count(), 0);
        assert!(!view.has_content());
    }
}
