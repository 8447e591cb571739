//! # TeeForge Designer
//!
//! Headless apparel design editor. A host application feeds pointer
//! events and property edits into an [`Editor`] and reads pixels back
//! out through the [`render`] module; nothing here touches a window
//! system.
//!
//! ## Core Components
//!
//! - **Layers**: one artwork layer, one text layer, and any number of
//!   sprites per garment view, with a per-view stacking order
//! - **Interaction**: hit testing, dragging, handle resize, and the
//!   rotation knob as a small state machine
//! - **Text**: greedy wrapping, best-fit sizing, and curved baselines,
//!   all driven by one measurement trait so layout is reproducible
//! - **History**: whole-state undo/redo snapshots
//! - **Rendering**: the editing canvas, clean view captures, and
//!   print-resolution exports, sharing one compositing core

pub mod editor;
pub mod fonts;
pub mod layer;
pub mod render;
pub mod text_metrics;
pub mod view_state;

pub use editor::{Editor, Handle, Interaction, PLACEHOLDER_TEXT};
pub use fonts::list_font_families;
pub use layer::{
    CurveType, DesignLayer, LayerBox, LayerId, SpriteKind, SpriteLayer, TextAlign, TextLayer,
};
pub use render::{render_composited, render_design_only, render_view};
pub use view_state::ViewState;
