//! Undo/redo behavior across whole editing sessions.

mod common;

use common::{editor, solid_pixmap};
use teeforge_core::View;
use teeforge_designer::LayerId;

#[test]
fn undo_walks_back_through_a_session() {
    let mut ed = editor();
    ed.place_design(solid_pixmap(80, 80, [1, 2, 3]), "u");
    ed.add_text();
    ed.set_text_content("session");
    ed.add_emoji_sprite("⭐");

    assert!(ed.current().has_content());

    ed.undo(); // sprite gone
    assert!(ed.current().sprites.is_empty());
    ed.undo(); // text back to placeholder
    assert_eq!(
        ed.current().text.as_ref().unwrap().text,
        teeforge_designer::PLACEHOLDER_TEXT
    );
    ed.undo(); // text gone
    assert!(ed.current().text.is_none());
    ed.undo(); // design gone
    assert!(!ed.current().has_content());
    assert!(!ed.can_undo());
}

#[test]
fn redo_replays_in_order() {
    let mut ed = editor();
    ed.add_text();
    ed.set_text_content("one");
    ed.set_text_content("two");

    ed.undo();
    ed.undo();
    assert_eq!(
        ed.current().text.as_ref().unwrap().text,
        teeforge_designer::PLACEHOLDER_TEXT
    );

    ed.redo();
    assert_eq!(ed.current().text.as_ref().unwrap().text, "one");
    ed.redo();
    assert_eq!(ed.current().text.as_ref().unwrap().text, "two");
    assert!(!ed.can_redo());
}

#[test]
fn snapshots_cover_every_view_at_once() {
    let mut ed = editor();
    ed.place_design(solid_pixmap(40, 40, [0, 0, 0]), "front-art");
    ed.set_current_view(View::Back);
    ed.place_design(solid_pixmap(40, 40, [0, 0, 0]), "back-art");

    // Undoing the back placement must not disturb the front.
    ed.undo();
    assert!(ed.current().design.is_none());
    assert!(ed.view(View::Front).design.is_some());

    // One more step removes the front design too.
    ed.undo();
    assert!(ed.view(View::Front).design.is_none());
}

#[test]
fn dragging_is_one_undo_step() {
    let mut ed = editor();
    ed.add_emoji_sprite("⭐");
    let start = ed.current().sprites[0].rect();
    let c = start.center();

    ed.pointer_down(c.x, c.y);
    ed.pointer_move(c.x + 10.0, c.y + 10.0);
    ed.pointer_move(c.x + 20.0, c.y + 5.0);
    ed.pointer_move(c.x + 25.0, c.y + 15.0);
    ed.pointer_up();

    let moved = ed.current().sprites[0].rect();
    assert!((moved.x - start.x - 25.0).abs() < 1e-9);

    // A single undo returns the sprite to where the drag began.
    ed.undo();
    let back = ed.current().sprites[0].rect();
    assert_eq!(back.x, start.x);
    assert_eq!(back.y, start.y);
}

#[test]
fn removing_a_layer_is_undoable() {
    let mut ed = editor();
    ed.add_emoji_sprite("⭐");
    ed.remove_layer(LayerId::Sprite(0));
    assert!(ed.current().sprites.is_empty());
    ed.undo();
    assert_eq!(ed.current().sprites.len(), 1);
}

#[test]
fn reordering_is_undoable() {
    let mut ed = editor();
    ed.place_design(solid_pixmap(40, 40, [0, 0, 0]), "u");
    ed.add_text();
    ed.reorder_layers(&[LayerId::Design, LayerId::Text]);
    let top_down = ed.current().ordered_ids_top_down();
    assert_eq!(top_down[0], LayerId::Design);

    ed.undo();
    let top_down = ed.current().ordered_ids_top_down();
    assert_eq!(top_down[0], LayerId::Text);
}
