//! Pointer interaction: hit testing, dragging, handle resize, and the
//! rotation knob.
//!
//! All coordinates are canvas coordinates. Rotated layers are hit-test
//! by rotating the pointer into the layer's local frame rather than
//! rotating the layer's geometry.

use teeforge_core::constants::{
    HANDLE_HIT_TOLERANCE, MIN_LAYER_HEIGHT, MIN_LAYER_WIDTH, MIN_SPRITE_SIZE,
    ROTATION_KNOB_OFFSET, ROTATION_KNOB_RADIUS,
};
use teeforge_core::{Point, Rect};

use crate::editor::text::PLACEHOLDER_TEXT;
use crate::editor::{Editor, Handle, Interaction};
use crate::layer::LayerId;

/// Handle layout for a selection box. Corner handles always; edge
/// handles only where free (non-uniform) resizing is allowed.
fn handle_positions(rect: Rect, with_edges: bool) -> Vec<(Handle, Point)> {
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    let mut out = vec![
        (Handle::Nw, Point::new(x, y)),
        (Handle::Ne, Point::new(x + w, y)),
        (Handle::Sw, Point::new(x, y + h)),
        (Handle::Se, Point::new(x + w, y + h)),
    ];
    if with_edges {
        out.push((Handle::N, Point::new(x + w / 2.0, y)));
        out.push((Handle::S, Point::new(x + w / 2.0, y + h)));
        out.push((Handle::W, Point::new(x, y + h / 2.0)));
        out.push((Handle::E, Point::new(x + w, y + h / 2.0)));
    }
    out
}

impl Editor {
    /// Pointer pressed. Checks the selected layer's rotation knob and
    /// resize handles first, then hit-tests layers top to bottom. A
    /// miss clears the selection.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);

        if let Some(sel) = self.selection() {
            if let Some(layer_box) = self.layer_box(sel) {
                let rect = layer_box.rect;
                let center = rect.center();
                let local = p.rotated_around(center, -layer_box.rotation);

                let knob = Point::new(center.x, rect.y - ROTATION_KNOB_OFFSET);
                if local.distance_to(knob) <= ROTATION_KNOB_RADIUS {
                    self.save_state();
                    self.set_interaction(Interaction::Rotating { layer: sel, center });
                    return;
                }

                let with_edges = sel == LayerId::Text;
                for (handle, pos) in handle_positions(rect, with_edges) {
                    if (local.x - pos.x).abs() <= HANDLE_HIT_TOLERANCE
                        && (local.y - pos.y).abs() <= HANDLE_HIT_TOLERANCE
                    {
                        self.save_state();
                        self.set_interaction(Interaction::Resizing {
                            layer: sel,
                            handle,
                            start: p,
                            origin: rect,
                            start_rotation: layer_box.rotation,
                        });
                        return;
                    }
                }
            }
        }

        for id in self.current().ordered_ids_top_down() {
            let Some(layer_box) = self.layer_box(id) else {
                continue;
            };
            let rect = layer_box.rect;
            let local = p.rotated_around(rect.center(), -layer_box.rotation);
            if rect.contains(local) {
                self.save_state();
                self.set_selection(Some(id));
                self.set_interaction(Interaction::Dragging {
                    layer: id,
                    grab_dx: p.x - rect.x,
                    grab_dy: p.y - rect.y,
                });
                return;
            }
        }

        self.set_selection(None);
        self.set_interaction(Interaction::Idle);
    }

    /// Pointer moved. Advances whatever interaction is in flight.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        match self.interaction() {
            Interaction::Idle => {}
            Interaction::Dragging {
                layer,
                grab_dx,
                grab_dy,
            } => self.drag_to(layer, x - grab_dx, y - grab_dy),
            Interaction::Rotating { layer, center } => {
                let degrees = (y - center.y).atan2(x - center.x).to_degrees() + 90.0;
                self.set_layer_rotation(layer, degrees);
            }
            Interaction::Resizing {
                layer,
                handle,
                start,
                origin,
                start_rotation,
            } => self.resize_to(layer, handle, start, origin, start_rotation, x, y),
        }
    }

    /// Pointer released. Always returns to idle.
    pub fn pointer_up(&mut self) {
        self.set_interaction(Interaction::Idle);
    }

    /// Double click. Entering a text layer's box (its unrotated box,
    /// matching the click target of the inline editor) selects it,
    /// clears placeholder content, and requests input focus.
    pub fn double_click(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);
        let hit = self
            .current()
            .text
            .as_ref()
            .map(|t| t.rect().contains(p))
            .unwrap_or(false);
        if !hit {
            return;
        }
        self.set_selection(Some(LayerId::Text));
        let placeholder = self
            .current()
            .text
            .as_ref()
            .map(|t| t.text == PLACEHOLDER_TEXT)
            .unwrap_or(false);
        if placeholder {
            self.save_state();
            if let Some(t) = self.current_mut().text.as_mut() {
                t.text.clear();
            }
        }
        self.request_text_focus();
    }

    fn drag_to(&mut self, id: LayerId, x: f64, y: f64) {
        let bounds = self.bounds();
        let Some(layer_box) = self.layer_box(id) else {
            return;
        };
        let origin = bounds.clamp_origin(x, y, layer_box.rect.width, layer_box.rect.height);
        self.set_layer_origin(id, origin.x, origin.y);
    }

    #[allow(clippy::too_many_arguments)]
    fn resize_to(
        &mut self,
        id: LayerId,
        handle: Handle,
        start: Point,
        origin: Rect,
        start_rotation: f64,
        x: f64,
        y: f64,
    ) {
        let bounds = self.bounds();

        // Pointer delta in the layer's unrotated frame.
        let rad = start_rotation.to_radians();
        let (dx_w, dy_w) = (x - start.x, y - start.y);
        let dx = dx_w * rad.cos() + dy_w * rad.sin();
        let dy = -dx_w * rad.sin() + dy_w * rad.cos();

        let (e, w, n, s) = handle.edges();
        let mut nx = origin.x;
        let mut ny = origin.y;
        let mut nw = origin.width;
        let mut nh = origin.height;

        if e {
            nw = origin.width + dx;
        }
        if w {
            nw = origin.width - dx;
            nx = origin.x + dx;
        }
        if s {
            nh = origin.height + dy;
        }
        if n {
            nh = origin.height - dy;
            ny = origin.y + dy;
        }

        let is_text = id == LayerId::Text;
        let is_sprite = matches!(id, LayerId::Sprite(_));
        let (min_w, min_h) = if is_sprite {
            (MIN_SPRITE_SIZE, MIN_SPRITE_SIZE)
        } else {
            (MIN_LAYER_WIDTH, MIN_LAYER_HEIGHT)
        };

        if nw < min_w {
            if w {
                nx = origin.x + origin.width - min_w;
            }
            nw = min_w;
        }
        if nh < min_h {
            if n {
                ny = origin.y + origin.height - min_h;
            }
            nh = min_h;
        }

        if !is_text && handle.is_corner() && origin.height > 0.0 {
            // Images and sprites keep their aspect when corner-dragged;
            // the opposite corner stays put.
            let aspect = origin.width / origin.height;

            let room_w = if w {
                origin.x + origin.width - bounds.min_x
            } else {
                bounds.max_x - origin.x
            };
            let room_h = if n {
                origin.y + origin.height - bounds.min_y
            } else {
                bounds.max_y - origin.y
            };
            let limit = room_w.min(room_h * aspect);

            nw = nw.clamp(min_w, limit.max(min_w));
            nh = nw / aspect;
            if nh < min_h {
                nh = min_h;
                nw = nh * aspect;
            }
            if w {
                nx = origin.x + origin.width - nw;
            }
            if n {
                ny = origin.y + origin.height - nh;
            }
        } else {
            if nx < bounds.min_x {
                nw -= bounds.min_x - nx;
                nx = bounds.min_x;
            }
            if ny < bounds.min_y {
                nh -= bounds.min_y - ny;
                ny = bounds.min_y;
            }
            nw = nw.min(bounds.max_x - nx).max(min_w);
            nh = nh.min(bounds.max_y - ny).max(min_h);
        }

        if is_text {
            self.apply_text_resize(Rect::new(nx, ny, nw, nh));
        } else {
            self.set_layer_rect(id, Rect::new(nx, ny, nw, nh));
        }
    }

    fn set_layer_origin(&mut self, id: LayerId, x: f64, y: f64) {
        let view = self.current_mut();
        match id {
            LayerId::Design => {
                if let Some(d) = view.design.as_mut() {
                    d.x = x;
                    d.y = y;
                }
            }
            LayerId::Text => {
                if let Some(t) = view.text.as_mut() {
                    t.x = x;
                    t.y = y;
                }
            }
            LayerId::Sprite(i) => {
                if let Some(sp) = view.sprites.get_mut(i) {
                    sp.x = x;
                    sp.y = y;
                }
            }
        }
    }

    fn set_layer_rect(&mut self, id: LayerId, rect: Rect) {
        let view = self.current_mut();
        match id {
            LayerId::Design => {
                if let Some(d) = view.design.as_mut() {
                    d.x = rect.x;
                    d.y = rect.y;
                    d.width = rect.width;
                    d.height = rect.height;
                }
            }
            LayerId::Text => {
                if let Some(t) = view.text.as_mut() {
                    t.x = rect.x;
                    t.y = rect.y;
                    t.width = rect.width;
                    t.height = rect.height;
                }
            }
            LayerId::Sprite(i) => {
                if let Some(sp) = view.sprites.get_mut(i) {
                    sp.x = rect.x;
                    sp.y = rect.y;
                    sp.width = rect.width;
                    sp.height = rect.height;
                    sp.size = rect.width.max(rect.height);
                    if sp.is_emoji() {
                        sp.width = sp.size;
                        sp.height = sp.size;
                    }
                }
            }
        }
    }

    fn set_layer_rotation(&mut self, id: LayerId, degrees: f64) {
        let view = self.current_mut();
        match id {
            LayerId::Design => {
                if let Some(d) = view.design.as_mut() {
                    d.rotation = degrees;
                }
            }
            LayerId::Text => {
                if let Some(t) = view.text.as_mut() {
                    t.rotation = degrees;
                }
            }
            LayerId::Sprite(i) => {
                if let Some(sp) = view.sprites.get_mut(i) {
                    sp.rotation = degrees;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::test_support;
    use std::sync::Arc;
    use tiny_skia::Pixmap;

    fn pixmap(w: u32, h: u32) -> Arc<Pixmap> {
        Arc::new(Pixmap::new(w, h).unwrap())
    }

    #[test]
    fn clicking_a_layer_selects_and_starts_dragging() {
        let mut ed = test_support::editor();
        ed.add_emoji_sprite("⭐");
        ed.set_selection(None);
        let s = ed.current().sprites[0].rect();

        ed.pointer_down(s.x + 5.0, s.y + 5.0);
        assert_eq!(ed.selection(), Some(LayerId::Sprite(0)));
        assert!(matches!(ed.interaction(), Interaction::Dragging { .. }));
    }

    #[test]
    fn clicking_empty_canvas_clears_selection() {
        let mut ed = test_support::editor();
        ed.add_emoji_sprite("⭐");
        ed.pointer_down(1.0, 1.0);
        assert_eq!(ed.selection(), None);
        assert_eq!(ed.interaction(), Interaction::Idle);
    }

    #[test]
    fn dragging_moves_the_layer_and_clamps_to_the_print_area() {
        let mut ed = test_support::editor();
        ed.add_emoji_sprite("⭐");
        let s = ed.current().sprites[0].rect();
        let bounds = ed.bounds();

        // Grab well inside the box so no handle is hit.
        ed.pointer_down(s.x + 30.0, s.y + 30.0);
        ed.pointer_move(0.0, 0.0);
        ed.pointer_up();

        let moved = ed.current().sprites[0].rect();
        assert_eq!(moved.x, bounds.min_x);
        assert_eq!(moved.y, bounds.min_y);
        assert_eq!(ed.interaction(), Interaction::Idle);
    }

    #[test]
    fn rotation_knob_rotates_the_selection() {
        let mut ed = test_support::editor();
        ed.add_emoji_sprite("⭐");
        let s = ed.current().sprites[0].rect();
        let center = s.center();

        ed.pointer_down(center.x, s.y - ROTATION_KNOB_OFFSET);
        assert!(matches!(ed.interaction(), Interaction::Rotating { .. }));

        // Pointer straight right of center points the top edge east.
        ed.pointer_move(center.x + 100.0, center.y);
        ed.pointer_up();
        let rot = ed.current().sprites[0].rotation;
        assert!((rot - 90.0).abs() < 1e-9);
    }

    #[test]
    fn corner_resize_preserves_design_aspect() {
        let mut ed = test_support::editor();
        ed.place_design(pixmap(100, 50), "u");
        let d = ed.current().design.as_ref().unwrap().rect();

        ed.pointer_down(d.x + d.width, d.y + d.height);
        assert!(matches!(ed.interaction(), Interaction::Resizing { .. }));
        ed.pointer_move(d.x + d.width - 40.0, d.y + d.height);
        ed.pointer_up();

        let after = ed.current().design.as_ref().unwrap().rect();
        assert!((after.width / after.height - 2.0).abs() < 1e-9);
        assert!(after.width < d.width);
        // Opposite corner anchored.
        assert_eq!(after.x, d.x);
        assert_eq!(after.y, d.y);
    }

    #[test]
    fn resize_respects_minimum_sprite_size() {
        let mut ed = test_support::editor();
        ed.add_emoji_sprite("⭐");
        let s = ed.current().sprites[0].rect();

        ed.pointer_down(s.x + s.width, s.y + s.height);
        ed.pointer_move(s.x - 500.0, s.y - 500.0);
        ed.pointer_up();

        let after = &ed.current().sprites[0];
        assert_eq!(after.width, MIN_SPRITE_SIZE);
        assert_eq!(after.height, MIN_SPRITE_SIZE);
        assert_eq!(after.size, MIN_SPRITE_SIZE);
    }

    #[test]
    fn text_edge_resize_refits_the_font() {
        let mut ed = test_support::editor();
        ed.add_text();
        ed.set_text_content("resize me");
        let t = ed.current().text.as_ref().unwrap().rect();

        // Grab the south edge handle and pull down.
        ed.pointer_down(t.x + t.width / 2.0, t.y + t.height);
        assert!(matches!(
            ed.interaction(),
            Interaction::Resizing {
                handle: Handle::S,
                ..
            }
        ));
        ed.pointer_move(t.x + t.width / 2.0, t.y + t.height + 60.0);
        ed.pointer_up();

        let after = ed.current().text.as_ref().unwrap();
        assert!(after.height > t.height);
        assert!(after.size >= 40.0);
    }

    #[test]
    fn hit_test_prefers_the_topmost_layer() {
        let mut ed = test_support::editor();
        ed.place_design(pixmap(100, 100), "u");
        let id = ed.add_emoji_sprite("⭐");
        ed.set_selection(None);
        let s = ed.current().sprites[0].rect();

        // Sprite sits above the design in stacking order.
        ed.pointer_down(s.x + 1.0, s.y + 1.0);
        assert_eq!(ed.selection(), Some(id));
    }

    #[test]
    fn double_click_on_text_clears_placeholder_and_requests_focus() {
        let mut ed = test_support::editor();
        ed.add_text();
        let t = ed.current().text.as_ref().unwrap().rect();

        ed.double_click(t.x + 5.0, t.y + 5.0);
        assert_eq!(ed.selection(), Some(LayerId::Text));
        assert_eq!(ed.current().text.as_ref().unwrap().text, "");
        assert!(ed.take_focus_text_request());
    }

    #[test]
    fn double_click_elsewhere_does_nothing() {
        let mut ed = test_support::editor();
        ed.add_text();
        ed.double_click(1.0, 1.0);
        assert_eq!(ed.current().text.as_ref().unwrap().text, PLACEHOLDER_TEXT);
        assert!(!ed.take_focus_text_request());
    }

    #[test]
    fn rotated_layer_hit_test_uses_the_local_frame() {
        let mut ed = test_support::editor();
        ed.add_emoji_sprite("⭐");
        if let Some(sp) = ed.current_mut().sprites.get_mut(0) {
            sp.rotation = 45.0;
        }
        ed.set_selection(None);
        let s = ed.current().sprites[0].rect();
        let c = s.center();

        // The unrotated corner is outside the rotated square.
        ed.pointer_down(s.x + 1.0, s.y + 1.0);
        assert_eq!(ed.selection(), None);
        // The center always hits.
        ed.pointer_down(c.x, c.y);
        assert_eq!(ed.selection(), Some(LayerId::Sprite(0)));
    }
}
