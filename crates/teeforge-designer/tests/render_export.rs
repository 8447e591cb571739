//! Rendering and print-export behavior.

mod common;

use common::{editor, solid_pixmap};
use teeforge_core::View;
use teeforge_designer::render::raster;
use teeforge_designer::{render_composited, render_design_only, render_view};

#[test]
fn every_view_renders_at_canvas_size() {
    let mut ed = editor();
    for view in View::ALL {
        ed.set_current_view(view);
        let pm = render_view(&ed).unwrap();
        assert_eq!((pm.width(), pm.height()), (660, 660));
    }
}

#[test]
fn empty_views_export_nothing() {
    let mut ed = editor();
    ed.place_design(solid_pixmap(10, 10, [9, 9, 9]), "u");
    assert!(render_design_only(&ed, View::Front).unwrap().is_some());
    for view in [View::Back, View::LeftSleeve, View::RightSleeve, View::NeckLabel] {
        assert!(render_design_only(&ed, view).unwrap().is_none());
    }
}

#[test]
fn export_scales_canvas_coordinates_uniformly() {
    let mut ed = editor();
    ed.place_design(solid_pixmap(10, 10, [30, 180, 30]), "u");
    let d = ed.current().design.as_ref().unwrap();
    let scale = 4500.0 / 660.0;

    let pm = render_design_only(&ed, View::Front).unwrap().unwrap();
    assert_eq!((pm.width(), pm.height()), (4500, 5400));

    // Artwork center is opaque at the scaled position.
    let cx = ((d.x + d.width / 2.0) * scale) as usize;
    let cy = ((d.y + d.height / 2.0) * scale) as usize;
    assert!(pm.pixels()[cy * 4500 + cx].alpha() > 0);

    // Just outside the scaled artwork box is transparent.
    let ox = ((d.x - 5.0) * scale) as usize;
    assert_eq!(pm.pixels()[cy * 4500 + ox].alpha(), 0);
}

#[test]
fn export_has_no_template_or_background() {
    let mut ed = editor();
    // A template must not leak into the print file.
    let tpl = raster::encode_png(&solid_pixmap(4, 4, [200, 0, 0])).unwrap();
    ed.load_template(View::Front, &tpl);
    ed.place_design(solid_pixmap(10, 10, [0, 0, 200]), "u");

    let pm = render_design_only(&ed, View::Front).unwrap().unwrap();
    assert_eq!(pm.pixels()[10].alpha(), 0);

    // The composited capture does include the template.
    let cap = render_composited(&ed, View::Front).unwrap();
    let corner = cap.pixels()[10];
    assert!(corner.red() > corner.blue());
}

#[test]
fn opacity_changes_reach_the_render() {
    let mut ed = editor();
    ed.place_design(solid_pixmap(10, 10, [0, 200, 0]), "u");
    let d = ed.current().design.as_ref().unwrap();
    let (cx, cy) = (
        (d.x + d.width / 2.0) as usize,
        (d.y + d.height / 2.0) as usize,
    );

    let opaque = render_composited(&ed, View::Front).unwrap().pixels()[cy * 660 + cx];
    ed.set_layer_opacity(teeforge_designer::LayerId::Design, 0.25);
    let faded = render_composited(&ed, View::Front).unwrap().pixels()[cy * 660 + cx];
    assert!(faded.green() < opaque.green());
}

#[test]
fn data_urls_wrap_the_export() {
    let mut ed = editor();
    ed.place_design(solid_pixmap(10, 10, [1, 1, 1]), "u");
    let pm = render_design_only(&ed, View::Front).unwrap().unwrap();
    let url = raster::png_data_url(&pm).unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
}
