//! Rendering the canvas to pixels.
//!
//! Three paths share one layer-drawing core:
//! - [`render_view`]: the editing canvas, with the garment template,
//!   print-area guide, and selection chrome
//! - [`render_composited`]: a clean capture of one view (template plus
//!   layers) for previews and validation snapshots
//! - [`render_design_only`]: print-resolution artwork on a transparent
//!   background, for upload to the print provider

pub mod raster;

use teeforge_core::constants::{
    EXPORT_HEIGHT, EXPORT_WIDTH, HANDLE_HIT_TOLERANCE, ROTATION_KNOB_OFFSET, ROTATION_KNOB_RADIUS,
};
use teeforge_core::{Bounds, EditorError, Result, View};
use tiny_skia::{
    Color, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};
use tracing::{debug, warn};

use crate::editor::Editor;
use crate::fonts;
use crate::layer::{LayerId, SpriteKind, TextAlign, TextLayer};
use crate::text_metrics::curved_glyph_placements;
use crate::view_state::ViewState;

fn canvas_background() -> Color {
    Color::from_rgba8(0xfa, 0xfa, 0xfa, 0xff)
}

fn selection_color() -> Color {
    Color::from_rgba8(0xa8, 0x55, 0xf7, 0xff)
}

fn guide_color() -> Color {
    Color::from_rgba8(0, 150, 255, 77)
}

fn new_canvas(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or_else(|| EditorError::Render {
        reason: "zero-sized canvas".to_string(),
    })
}

/// Renders the active view as the user sees it while editing.
pub fn render_view(editor: &Editor) -> Result<Pixmap> {
    let mut canvas = base_canvas(editor, editor.current_view())?;
    if editor.show_guide() {
        draw_guide(&mut canvas, editor.bounds());
    }
    draw_selection_chrome(&mut canvas, editor);
    Ok(canvas)
}

/// Renders one view with its template and layers, without any editing
/// chrome.
pub fn render_composited(editor: &Editor, view: View) -> Result<Pixmap> {
    base_canvas(editor, view)
}

fn base_canvas(editor: &Editor, view: View) -> Result<Pixmap> {
    let (w, h) = (editor.canvas_width(), editor.canvas_height());
    let mut canvas = new_canvas(w as u32, h as u32)?;
    canvas.fill(canvas_background());

    if let Some(template) = editor.template(view) {
        raster::draw_pixmap_box(
            &mut canvas,
            template,
            0.0,
            0.0,
            w,
            h,
            0.0,
            1.0,
            Transform::identity(),
        );
    }

    draw_layers(&mut canvas, editor, view, Transform::identity());
    Ok(canvas)
}

/// Renders one view's layers alone at print resolution on a
/// transparent background. Returns `None` when the view has nothing to
/// print.
pub fn render_design_only(editor: &Editor, view: View) -> Result<Option<Pixmap>> {
    if !editor.view(view).has_content() {
        return Ok(None);
    }
    let mut canvas = new_canvas(EXPORT_WIDTH, EXPORT_HEIGHT)?;
    let scale = (EXPORT_WIDTH as f64 / editor.canvas_width()) as f32;
    debug!(view = %view, scale, "rendering print export");
    draw_layers(
        &mut canvas,
        editor,
        view,
        Transform::from_scale(scale, scale),
    );
    Ok(Some(canvas))
}

/// Stacking order to draw. When a view has content but an empty order
/// list (a state restored from an older snapshot format), falls back
/// to the fixed design, text, sprites order.
fn render_ids(state: &ViewState) -> Vec<LayerId> {
    let ids: Vec<LayerId> = state.ordered_ids().collect();
    if !ids.is_empty() || !state.has_content() {
        return ids;
    }
    warn!("view has layers but no stacking order; using default order");
    let mut fallback = Vec::new();
    if state.design.is_some() {
        fallback.push(LayerId::Design);
    }
    if state.text.is_some() {
        fallback.push(LayerId::Text);
    }
    for i in 0..state.sprites.len() {
        fallback.push(LayerId::Sprite(i));
    }
    fallback
}

fn draw_layers(canvas: &mut Pixmap, editor: &Editor, view: View, base: Transform) {
    let state = editor.view(view);
    for id in render_ids(state) {
        match id {
            LayerId::Design => {
                if let Some(d) = &state.design {
                    raster::draw_pixmap_box(
                        canvas, &d.image, d.x, d.y, d.width, d.height, d.rotation, d.opacity, base,
                    );
                }
            }
            LayerId::Text => {
                if let Some(t) = &state.text {
                    draw_text_layer(canvas, editor, t, base);
                }
            }
            LayerId::Sprite(i) => {
                if let Some(sp) = state.sprites.get(i) {
                    match &sp.kind {
                        SpriteKind::Image(image) => raster::draw_pixmap_box(
                            canvas, image, sp.x, sp.y, sp.width, sp.height, sp.rotation,
                            sp.opacity, base,
                        ),
                        SpriteKind::Emoji(emoji) => {
                            draw_emoji_sprite(canvas, emoji, sp, base);
                        }
                    }
                }
            }
        }
    }
}

fn draw_emoji_sprite(
    canvas: &mut Pixmap,
    emoji: &str,
    sp: &crate::layer::SpriteLayer,
    base: Transform,
) {
    let Some(font) = fonts::get_font_for("Sans", false, false) else {
        debug!("no system font; skipping emoji sprite raster");
        return;
    };
    let cx = (sp.x + sp.width / 2.0) as f32;
    let cy = (sp.y + sp.height / 2.0) as f32;
    let transform = base.pre_concat(Transform::from_rotate_at(sp.rotation as f32, cx, cy));
    let baseline = sp.y + sp.height / 2.0 + raster::ascent(font, sp.size) / 2.0;
    for ch in emoji.chars() {
        raster::draw_rotated_char(
            canvas,
            font,
            ch,
            sp.size,
            [0, 0, 0],
            sp.x + sp.width / 2.0,
            baseline,
            0.0,
            sp.opacity,
            transform,
        );
    }
}

fn draw_text_layer(canvas: &mut Pixmap, editor: &Editor, t: &TextLayer, base: Transform) {
    let Some(font) = fonts::get_font_for(&t.font, t.bold, t.italic) else {
        debug!(font = %t.font, "no matching system font; skipping text raster");
        return;
    };

    let cx = (t.x + t.width / 2.0) as f32;
    let cy = (t.y + t.height / 2.0) as f32;
    let transform = base.pre_concat(Transform::from_rotate_at(t.rotation as f32, cx, cy));

    if t.curved {
        let placements =
            curved_glyph_placements(&t.text, t.curve, t.curve_strength, t.x, t.y, t.width, t.height);
        for p in placements {
            raster::draw_rotated_char(
                canvas,
                font,
                p.ch,
                t.size,
                t.color,
                p.x,
                p.y,
                p.angle.to_degrees(),
                t.opacity,
                transform,
            );
        }
        return;
    }

    let lines = editor.text_lines(t);
    let total_height = lines.len() as f64 * t.size;
    // Wrapped lines sit vertically centered in the box on every render
    // path, so captures match the canvas.
    let offset_y = ((t.height - total_height) / 2.0).max(0.0);
    let font_ascent = raster::ascent(font, t.size);
    let measure = fonts::measurer_for(&t.font, t.bold, t.italic);

    for (i, line) in lines.iter().enumerate() {
        let line_width = crate::text_metrics::TextMeasure::text_width(&measure, line, t.size);
        let origin_x = match t.align {
            TextAlign::Left => t.x,
            TextAlign::Center => t.x + (t.width - line_width) / 2.0,
            TextAlign::Right => t.x + t.width - line_width,
        };
        let baseline = t.y + offset_y + i as f64 * t.size + font_ascent;
        raster::draw_text_run(
            canvas, font, line, t.size, t.color, origin_x, baseline, t.opacity, transform,
        );
    }
}

fn stroke_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn draw_guide(canvas: &mut Pixmap, bounds: Bounds) {
    let Some(rect) = tiny_skia::Rect::from_xywh(
        bounds.min_x as f32,
        bounds.min_y as f32,
        bounds.width() as f32,
        bounds.height() as f32,
    ) else {
        return;
    };
    let mut pb = PathBuilder::new();
    pb.push_rect(rect);
    let Some(path) = pb.finish() else { return };

    let stroke = Stroke {
        width: 2.0,
        dash: StrokeDash::new(vec![5.0, 5.0], 0.0),
        ..Stroke::default()
    };
    canvas.stroke_path(
        &path,
        &stroke_paint(guide_color()),
        &stroke,
        Transform::identity(),
        None,
    );
}

fn draw_selection_chrome(canvas: &mut Pixmap, editor: &Editor) {
    let Some(sel) = editor.selection() else { return };
    let Some(layer_box) = editor.layer_box(sel) else {
        return;
    };
    let rect = layer_box.rect;
    let center = rect.center();
    let transform = Transform::from_rotate_at(
        layer_box.rotation as f32,
        center.x as f32,
        center.y as f32,
    );

    let purple = stroke_paint(selection_color());
    let thin = Stroke {
        width: 2.0,
        ..Stroke::default()
    };

    // Outline.
    if let Some(r) = tiny_skia::Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    ) {
        let mut pb = PathBuilder::new();
        pb.push_rect(r);
        if let Some(path) = pb.finish() {
            canvas.stroke_path(&path, &purple, &thin, transform, None);
        }
    }

    // Resize handles: white squares with a purple border. Corners
    // always; edge handles match where resizing is allowed.
    let half = (HANDLE_HIT_TOLERANCE / 2.0) as f32;
    let mut corners = vec![
        (rect.x, rect.y),
        (rect.x + rect.width, rect.y),
        (rect.x, rect.y + rect.height),
        (rect.x + rect.width, rect.y + rect.height),
    ];
    if sel == LayerId::Text {
        corners.push((rect.x + rect.width / 2.0, rect.y));
        corners.push((rect.x + rect.width / 2.0, rect.y + rect.height));
        corners.push((rect.x, rect.y + rect.height / 2.0));
        corners.push((rect.x + rect.width, rect.y + rect.height / 2.0));
    }
    let white = stroke_paint(Color::WHITE);
    for (hx, hy) in corners {
        if let Some(r) =
            tiny_skia::Rect::from_xywh(hx as f32 - half, hy as f32 - half, half * 2.0, half * 2.0)
        {
            let mut pb = PathBuilder::new();
            pb.push_rect(r);
            if let Some(path) = pb.finish() {
                canvas.fill_path(
                    &path,
                    &white,
                    tiny_skia::FillRule::Winding,
                    transform,
                    None,
                );
                canvas.stroke_path(
                    &path,
                    &purple,
                    &Stroke {
                        width: 1.0,
                        ..Stroke::default()
                    },
                    transform,
                    None,
                );
            }
        }
    }

    // Rotation knob above the top edge.
    let knob_x = center.x as f32;
    let knob_y = (rect.y - ROTATION_KNOB_OFFSET) as f32;
    let mut pb = PathBuilder::new();
    pb.move_to(knob_x, rect.y as f32);
    pb.line_to(knob_x, knob_y);
    if let Some(path) = pb.finish() {
        canvas.stroke_path(&path, &purple, &thin, transform, None);
    }
    if let Some(circle) = PathBuilder::from_circle(knob_x, knob_y, ROTATION_KNOB_RADIUS as f32) {
        canvas.fill_path(&circle, &white, tiny_skia::FillRule::Winding, transform, None);
        canvas.stroke_path(
            &circle,
            &purple,
            &Stroke {
                width: 1.0,
                ..Stroke::default()
            },
            transform,
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::test_support;
    use std::sync::Arc;
    use tiny_skia::ColorU8;

    fn solid_pixmap(w: u32, h: u32) -> Arc<Pixmap> {
        let mut pm = Pixmap::new(w, h).unwrap();
        let px = ColorU8::from_rgba(10, 200, 10, 255).premultiply();
        for p in pm.pixels_mut() {
            *p = px;
        }
        Arc::new(pm)
    }

    #[test]
    fn render_view_has_canvas_dimensions() {
        let ed = test_support::editor();
        let pm = render_view(&ed).unwrap();
        assert_eq!(pm.width(), 660);
        assert_eq!(pm.height(), 660);
    }

    #[test]
    fn design_only_export_is_none_for_empty_view() {
        let ed = test_support::editor();
        assert!(render_design_only(&ed, View::Front).unwrap().is_none());
    }

    #[test]
    fn design_only_export_is_print_resolution_and_transparent_outside() {
        let mut ed = test_support::editor();
        ed.place_design(solid_pixmap(10, 10), "u");
        let pm = render_design_only(&ed, View::Front).unwrap().unwrap();
        assert_eq!(pm.width(), 4500);
        assert_eq!(pm.height(), 5400);
        // Outside the print area stays transparent.
        assert_eq!(pm.pixels()[0].alpha(), 0);
    }

    #[test]
    fn design_pixels_land_scaled_in_the_export() {
        let mut ed = test_support::editor();
        ed.place_design(solid_pixmap(10, 10), "u");
        let d = ed.current().design.as_ref().unwrap();
        let scale = 4500.0 / 660.0;
        let cx = ((d.x + d.width / 2.0) * scale) as usize;
        let cy = ((d.y + d.height / 2.0) * scale) as usize;
        let pm = render_design_only(&ed, View::Front).unwrap().unwrap();
        let px = pm.pixels()[cy * 4500 + cx];
        assert!(px.alpha() > 0);
        assert!(px.green() > px.red());
    }

    #[test]
    fn composited_render_shows_placed_design() {
        let mut ed = test_support::editor();
        ed.place_design(solid_pixmap(10, 10), "u");
        let d = ed.current().design.as_ref().unwrap();
        let (cx, cy) = (
            (d.x + d.width / 2.0) as usize,
            (d.y + d.height / 2.0) as usize,
        );
        let pm = render_composited(&ed, View::Front).unwrap();
        let px = pm.pixels()[cy * 660 + cx];
        assert!(px.green() > px.red());
    }

    #[test]
    fn selection_chrome_only_appears_in_the_editing_render() {
        let mut ed = test_support::editor();
        ed.place_design(solid_pixmap(10, 10), "u");
        let d = ed.current().design.as_ref().unwrap().rect();
        // A point on the selection outline, just outside the artwork.
        let (ox, oy) = (d.x as usize, (d.y - 1.0) as usize);

        let edit = render_view(&ed).unwrap();
        let clean = render_composited(&ed, View::Front).unwrap();
        let edit_px = edit.pixels()[oy * 660 + ox];
        let clean_px = clean.pixels()[oy * 660 + ox];
        // Editing render paints purple chrome there; the capture keeps
        // the plain background.
        assert_ne!(edit_px, clean_px);
    }
}
