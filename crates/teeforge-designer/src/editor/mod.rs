//! The design editor core.
//!
//! [`Editor`] owns all five garment views, the active selection, the
//! pointer interaction state machine, and the undo history. It is
//! headless: a host feeds it pointer events and property edits and asks
//! the render module for pixels.
//!
//! Submodules split the implementation by concern:
//! - [`layers`]: adding, removing, and reordering layers
//! - [`text`]: the text layer's edit and reflow logic
//! - [`history`]: undo/redo snapshots
//! - [`pointer`]: hit testing, drag, resize, rotate

mod history;
mod layers;
mod pointer;
mod text;

pub use history::Snapshot;
pub use text::PLACEHOLDER_TEXT;

use std::sync::Arc;

use teeforge_core::{print_area, Bounds, Point, Rect, View, ViewMap};
use tiny_skia::Pixmap;
use tracing::warn;

use crate::fonts::SystemFontMetrics;
use crate::layer::{LayerBox, LayerId};
use crate::render::raster;
use crate::text_metrics::FontMetrics;
use crate::view_state::ViewState;

/// A resize handle on the selection box.
///
/// Corner handles exist on every layer; edge handles only on text,
/// where non-uniform resizing is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl Handle {
    pub fn is_corner(&self) -> bool {
        matches!(self, Handle::Ne | Handle::Nw | Handle::Se | Handle::Sw)
    }

    /// Whether the handle moves the east, west, north, south edge.
    pub(crate) fn edges(&self) -> (bool, bool, bool, bool) {
        let e = matches!(self, Handle::E | Handle::Ne | Handle::Se);
        let w = matches!(self, Handle::W | Handle::Nw | Handle::Sw);
        let n = matches!(self, Handle::N | Handle::Ne | Handle::Nw);
        let s = matches!(self, Handle::S | Handle::Se | Handle::Sw);
        (e, w, n, s)
    }
}

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Idle,
    Dragging {
        layer: LayerId,
        /// Pointer offset from the layer origin at grab time.
        grab_dx: f64,
        grab_dy: f64,
    },
    Resizing {
        layer: LayerId,
        handle: Handle,
        start: Point,
        origin: Rect,
        start_rotation: f64,
    },
    Rotating {
        layer: LayerId,
        center: Point,
    },
}

/// The headless design editor.
pub struct Editor {
    canvas_width: f64,
    canvas_height: f64,
    views: ViewMap<ViewState>,
    templates: ViewMap<Option<Arc<Pixmap>>>,
    current_view: View,
    selection: Option<LayerId>,
    interaction: Interaction,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    show_guide: bool,
    focus_text_request: bool,
    metrics: Box<dyn FontMetrics>,
}

impl Editor {
    /// A new editor with the standard 660x660 canvas and system font
    /// metrics.
    pub fn new() -> Self {
        Self::with_metrics(Box::new(SystemFontMetrics))
    }

    /// A new editor measuring text through the given metrics source.
    pub fn with_metrics(metrics: Box<dyn FontMetrics>) -> Self {
        Self {
            canvas_width: teeforge_core::constants::CANVAS_SIZE,
            canvas_height: teeforge_core::constants::CANVAS_SIZE,
            views: ViewMap::default(),
            templates: ViewMap::from_fn(|_| None),
            current_view: View::Front,
            selection: None,
            interaction: Interaction::Idle,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            show_guide: false,
            focus_text_request: false,
            metrics,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    /// Switches the active view. Selection and any in-flight pointer
    /// interaction belong to the old view and are dropped.
    pub fn set_current_view(&mut self, view: View) {
        if view != self.current_view {
            self.current_view = view;
            self.selection = None;
            self.interaction = Interaction::Idle;
        }
    }

    pub fn view(&self, view: View) -> &ViewState {
        &self.views[view]
    }

    pub(crate) fn view_mut(&mut self, view: View) -> &mut ViewState {
        &mut self.views[view]
    }

    pub(crate) fn views(&self) -> &ViewMap<ViewState> {
        &self.views
    }

    pub(crate) fn views_mut(&mut self) -> &mut ViewMap<ViewState> {
        &mut self.views
    }

    pub fn current(&self) -> &ViewState {
        &self.views[self.current_view]
    }

    pub(crate) fn current_mut(&mut self) -> &mut ViewState {
        &mut self.views[self.current_view]
    }

    pub(crate) fn metrics(&self) -> &dyn FontMetrics {
        self.metrics.as_ref()
    }

    pub fn selection(&self) -> Option<LayerId> {
        self.selection
    }

    pub(crate) fn set_selection(&mut self, selection: Option<LayerId>) {
        self.selection = selection;
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub(crate) fn set_interaction(&mut self, interaction: Interaction) {
        self.interaction = interaction;
    }

    /// Print-area bounds of the active view in canvas coordinates.
    pub fn bounds(&self) -> Bounds {
        print_area(self.current_view).resolve(self.canvas_width, self.canvas_height)
    }

    pub fn bounds_for(&self, view: View) -> Bounds {
        print_area(view).resolve(self.canvas_width, self.canvas_height)
    }

    /// Whether the print-area guide outline is drawn.
    pub fn show_guide(&self) -> bool {
        self.show_guide
    }

    pub fn set_show_guide(&mut self, show: bool) {
        self.show_guide = show;
    }

    /// Garment template image for a view, if loaded.
    pub fn template(&self, view: View) -> Option<&Arc<Pixmap>> {
        self.templates[view].as_ref()
    }

    /// Decodes and installs a garment template image. A template that
    /// fails to decode is skipped with a warning rather than failing
    /// the whole editor, since the canvas works fine without one.
    pub fn load_template(&mut self, view: View, bytes: &[u8]) {
        match raster::decode_image(bytes) {
            Ok(pixmap) => self.templates[view] = Some(Arc::new(pixmap)),
            Err(err) => {
                warn!(view = %view, error = %err, "skipping undecodable template image");
                self.templates[view] = None;
            }
        }
    }

    /// True when any view has at least one layer.
    pub fn has_any_content(&self) -> bool {
        self.views.iter().any(|(_, v)| v.has_content())
    }

    /// Takes the pending request to focus the text input, if any.
    /// Double-clicking a text layer sets it; reading it clears it.
    pub fn take_focus_text_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_text_request)
    }

    pub(crate) fn request_text_focus(&mut self) {
        self.focus_text_request = true;
    }

    /// Placement box of a layer in the active view.
    pub fn layer_box(&self, id: LayerId) -> Option<LayerBox> {
        let view = self.current();
        match id {
            LayerId::Design => view.design.as_ref().map(|d| LayerBox {
                rect: d.rect(),
                rotation: d.rotation,
            }),
            LayerId::Text => view.text.as_ref().map(|t| LayerBox {
                rect: t.rect(),
                rotation: t.rotation,
            }),
            LayerId::Sprite(i) => view.sprites.get(i).map(|s| LayerBox {
                rect: s.rect(),
                rotation: s.rotation,
            }),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_views_drops_selection_and_interaction() {
        let mut ed = test_support::editor();
        ed.set_selection(Some(LayerId::Text));
        ed.set_current_view(View::Back);
        assert_eq!(ed.selection(), None);
        assert_eq!(ed.interaction(), Interaction::Idle);
        assert_eq!(ed.current_view(), View::Back);
    }

    #[test]
    fn bounds_follow_the_active_view() {
        let mut ed = test_support::editor();
        let front = ed.bounds();
        ed.set_current_view(View::NeckLabel);
        let neck = ed.bounds();
        assert!(neck.width() < front.width());
    }

    #[test]
    fn bad_template_bytes_are_tolerated() {
        let mut ed = test_support::editor();
        ed.load_template(View::Front, b"not an image");
        assert!(ed.template(View::Front).is_none());
    }

    #[test]
    fn focus_request_is_one_shot() {
        let mut ed = test_support::editor();
        ed.request_text_focus();
        assert!(ed.take_focus_text_request());
        assert!(!ed.take_focus_text_request());
    }
}
