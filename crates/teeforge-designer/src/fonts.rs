//! System font lookup and text measurement backends.
//!
//! Fonts are resolved through `fontdb` against the installed system
//! fonts and cached for the process lifetime. When no matching face can
//! be loaded the measurer falls back to a fixed-advance approximation,
//! so text layout keeps working on fontless hosts (CI, containers).

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{Font, Scale};
use std::{
    collections::{HashMap, HashSet},
    fs,
    sync::{Mutex, OnceLock},
};

use crate::text_metrics::TextMeasure;

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// All font family names available on this host, sorted.
pub fn list_font_families() -> Vec<String> {
    let mut set = HashSet::new();
    for face in db().faces() {
        for (name, _) in &face.families {
            set.insert(name.clone());
        }
    }
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort();
    out
}

/// Resolves a font face for a family and style, or `None` when the
/// host has nothing usable. Loaded faces are leaked into a cache so
/// glyph references stay `'static`.
pub fn get_font_for(family: &str, bold: bool, italic: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        bold,
        italic,
    };

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *font;
    }

    let loaded = load_font_from_system(family, bold, italic)
        .map(|font| &*Box::leak(Box::new(font)));

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, loaded);
    loaded
}

fn load_font_from_system(family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

/// Fraction of the font size charged per character when no real font
/// metrics are available.
const APPROX_ADVANCE: f64 = 0.6;

/// A text measurer backed either by real glyph metrics or by the
/// fixed-advance approximation.
#[derive(Clone, Copy)]
pub enum FontMeasure {
    Glyph(&'static Font<'static>),
    Approx,
}

impl FontMeasure {
    pub fn font(&self) -> Option<&'static Font<'static>> {
        match self {
            FontMeasure::Glyph(font) => Some(font),
            FontMeasure::Approx => None,
        }
    }
}

impl TextMeasure for FontMeasure {
    fn text_width(&self, text: &str, size: f64) -> f64 {
        match self {
            FontMeasure::Glyph(font) => {
                let scale = Scale::uniform(size as f32);
                font.glyphs_for(text.chars())
                    .map(|g| g.scaled(scale).h_metrics().advance_width as f64)
                    .sum()
            }
            FontMeasure::Approx => text.chars().count() as f64 * size * APPROX_ADVANCE,
        }
    }
}

/// Best available measurer for a family and style.
pub fn measurer_for(family: &str, bold: bool, italic: bool) -> FontMeasure {
    match get_font_for(family, bold, italic) {
        Some(font) => FontMeasure::Glyph(font),
        None => FontMeasure::Approx,
    }
}

/// [`FontMetrics`] backed by the system font database.
pub struct SystemFontMetrics;

impl crate::text_metrics::FontMetrics for SystemFontMetrics {
    fn styled_width(&self, family: &str, bold: bool, italic: bool, text: &str, size: f64) -> f64 {
        measurer_for(family, bold, italic).text_width(text, size)
    }
}
