//! Low-level raster helpers: image decoding, pixmap compositing, and
//! glyph rasterization.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rusttype::{point, Font, Scale};
use teeforge_core::{EditorError, Result};
use tiny_skia::{ColorU8, Pixmap, PixmapPaint, PremultipliedColorU8, Transform};

/// Decodes any supported image format into a premultiplied pixmap.
pub fn decode_image(bytes: &[u8]) -> Result<Pixmap> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| EditorError::ImageDecode {
            reason: e.to_string(),
        })?
        .to_rgba8();
    let (w, h) = img.dimensions();
    let mut pixmap = Pixmap::new(w, h).ok_or_else(|| EditorError::ImageDecode {
        reason: "image has zero size".to_string(),
    })?;
    for (src, dst) in img.pixels().zip(pixmap.pixels_mut()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// Encodes a pixmap as PNG bytes.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    pixmap.encode_png().map_err(|e| EditorError::Render {
        reason: e.to_string(),
    })
}

/// Encodes a pixmap as a `data:image/png;base64,` URL, the form the
/// upload API accepts.
pub fn png_data_url(pixmap: &Pixmap) -> Result<String> {
    let png = encode_png(pixmap)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}

/// Makes pixels close to the corner background color transparent.
///
/// The reference color is sampled from the top-left pixel; a pixel is
/// cleared when every channel is within `tolerance` of it.
pub fn remove_background(pixmap: &Pixmap, tolerance: u8) -> Pixmap {
    let mut out = pixmap.clone();
    let Some(reference) = pixmap.pixels().first().map(|p| p.demultiply()) else {
        return out;
    };
    let close = |a: u8, b: u8| a.abs_diff(b) <= tolerance;
    for px in out.pixels_mut() {
        let c = px.demultiply();
        if close(c.red(), reference.red())
            && close(c.green(), reference.green())
            && close(c.blue(), reference.blue())
        {
            *px = PremultipliedColorU8::TRANSPARENT;
        }
    }
    out
}

/// Draws a pixmap into a target box with rotation about the box center
/// and a uniform opacity. `base` carries any outer transform (export
/// scaling).
pub fn draw_pixmap_box(
    canvas: &mut Pixmap,
    image: &Pixmap,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotation: f64,
    opacity: f32,
    base: Transform,
) {
    if image.width() == 0 || image.height() == 0 {
        return;
    }
    let sx = (width / image.width() as f64) as f32;
    let sy = (height / image.height() as f64) as f32;
    let cx = (x + width / 2.0) as f32;
    let cy = (y + height / 2.0) as f32;

    let transform = base
        .pre_concat(Transform::from_rotate_at(rotation as f32, cx, cy))
        .pre_translate(x as f32, y as f32)
        .pre_scale(sx, sy);

    let paint = PixmapPaint {
        opacity,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
}

/// A single rasterized glyph and the offset of its bitmap from the
/// baseline origin.
pub struct RasterGlyph {
    pub pixmap: Pixmap,
    pub min_x: i32,
    pub min_y: i32,
    pub advance: f64,
}

/// Rasterizes one character at a font size into a tight alpha bitmap
/// tinted with the fill color. Returns `None` for glyphs with no ink
/// (spaces) so callers still get the advance.
pub fn raster_glyph(
    font: &Font<'static>,
    ch: char,
    size: f64,
    color: [u8; 3],
) -> (Option<RasterGlyph>, f64) {
    let scale = Scale::uniform(size as f32);
    let glyph = font.glyph(ch).scaled(scale);
    let advance = glyph.h_metrics().advance_width as f64;
    let positioned = glyph.positioned(point(0.0, 0.0));

    let Some(bb) = positioned.pixel_bounding_box() else {
        return (None, advance);
    };
    let (w, h) = (bb.width() as u32, bb.height() as u32);
    let Some(mut pixmap) = Pixmap::new(w.max(1), h.max(1)) else {
        return (None, advance);
    };

    let stride = pixmap.width() as usize;
    let pixels = pixmap.pixels_mut();
    positioned.draw(|gx, gy, v| {
        let a = (v * 255.0).round().clamp(0.0, 255.0) as u8;
        if a == 0 {
            return;
        }
        let idx = gy as usize * stride + gx as usize;
        pixels[idx] = ColorU8::from_rgba(color[0], color[1], color[2], a).premultiply();
    });

    (
        Some(RasterGlyph {
            pixmap,
            min_x: bb.min.x,
            min_y: bb.min.y,
            advance,
        }),
        advance,
    )
}

/// Baseline-to-top distance of a font at a size.
pub fn ascent(font: &Font<'static>, size: f64) -> f64 {
    font.v_metrics(Scale::uniform(size as f32)).ascent as f64
}

/// Draws one run of characters left to right starting at a baseline
/// origin, under an arbitrary transform.
pub fn draw_text_run(
    canvas: &mut Pixmap,
    font: &Font<'static>,
    text: &str,
    size: f64,
    color: [u8; 3],
    origin_x: f64,
    baseline_y: f64,
    opacity: f32,
    transform: Transform,
) {
    let paint = PixmapPaint {
        opacity,
        ..PixmapPaint::default()
    };
    let mut pen = origin_x;
    for ch in text.chars() {
        let (glyph, advance) = raster_glyph(font, ch, size, color);
        if let Some(g) = glyph {
            let t = transform.pre_translate(pen as f32, baseline_y as f32);
            canvas.draw_pixmap(g.min_x, g.min_y, g.pixmap.as_ref(), &paint, t, None);
        }
        pen += advance;
    }
}

/// Draws one character with its baseline origin at a point, rotated by
/// `angle_degrees` about that point.
pub fn draw_rotated_char(
    canvas: &mut Pixmap,
    font: &Font<'static>,
    ch: char,
    size: f64,
    color: [u8; 3],
    x: f64,
    y: f64,
    angle_degrees: f64,
    opacity: f32,
    transform: Transform,
) {
    let (glyph, advance) = raster_glyph(font, ch, size, color);
    let Some(g) = glyph else {
        return;
    };
    let paint = PixmapPaint {
        opacity,
        ..PixmapPaint::default()
    };
    // Center the glyph horizontally on the anchor like a canvas
    // fillText with centered alignment.
    let t = transform
        .pre_translate(x as f32, y as f32)
        .pre_concat(Transform::from_rotate(angle_degrees as f32))
        .pre_translate((-advance / 2.0) as f32, 0.0);
    canvas.draw_pixmap(g.min_x, g.min_y, g.pixmap.as_ref(), &paint, t, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Pixmap {
        let mut pm = Pixmap::new(2, 2).unwrap();
        let white = ColorU8::from_rgba(255, 255, 255, 255).premultiply();
        let red = ColorU8::from_rgba(200, 30, 30, 255).premultiply();
        let px = pm.pixels_mut();
        px[0] = white;
        px[1] = red;
        px[2] = red;
        px[3] = white;
        pm
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image(b"definitely not an image").is_err());
    }

    #[test]
    fn png_round_trip_preserves_size() {
        let pm = checker();
        let png = encode_png(&pm).unwrap();
        let back = decode_image(&png).unwrap();
        assert_eq!(back.width(), 2);
        assert_eq!(back.height(), 2);
    }

    #[test]
    fn data_url_has_png_prefix() {
        let url = png_data_url(&checker()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > 30);
    }

    #[test]
    fn remove_background_clears_matching_corner_color() {
        let cleared = remove_background(&checker(), 10);
        let px = cleared.pixels();
        // White pixels match the top-left sample and go transparent.
        assert_eq!(px[0].alpha(), 0);
        assert_eq!(px[3].alpha(), 0);
        // Red pixels stay.
        assert_ne!(px[1].alpha(), 0);
    }

    #[test]
    fn remove_background_tolerance_widens_the_match() {
        let cleared = remove_background(&checker(), 255);
        assert!(cleared.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn draw_pixmap_box_composites_with_opacity() {
        let mut canvas = Pixmap::new(10, 10).unwrap();
        let mut src = Pixmap::new(1, 1).unwrap();
        src.pixels_mut()[0] = ColorU8::from_rgba(0, 0, 255, 255).premultiply();
        draw_pixmap_box(
            &mut canvas,
            &src,
            2.0,
            2.0,
            4.0,
            4.0,
            0.0,
            1.0,
            Transform::identity(),
        );
        let center = canvas.pixels()[4 * 10 + 4];
        assert!(center.alpha() > 0);
        let corner = canvas.pixels()[0];
        assert_eq!(corner.alpha(), 0);
    }
}
