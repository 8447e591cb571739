//! Prompt composition for AI artwork generation.
//!
//! Pure string assembly: the creator's base prompt plus the styling
//! options from the generation panel, in a fixed clause order so the
//! same inputs always produce the same prompt.

use serde::{Deserialize, Serialize};

/// Fallback when the creator submits an empty prompt.
const DEFAULT_SUBJECT: &str = "A t-shirt design";

/// A style pick that is either one of the preset names or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleChoice {
    Preset(String),
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorTreatment {
    #[default]
    KeepOriginal,
    Named(String),
    CustomPalette(Vec<String>),
}

/// Everything the generation panel collects besides the prompt itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Text the artwork itself must incorporate.
    pub text_in_design: Option<String>,
    pub text_style: Option<StyleChoice>,
    pub image_style: Option<StyleChoice>,
    pub color_treatment: ColorTreatment,
    pub effect_filter: Option<String>,
    pub mood: Option<String>,
    /// Ask the model for a flat chroma-key background so it can be
    /// removed after download.
    pub remove_background: bool,
}

/// Builds the full generation prompt from the base prompt and options.
pub fn compose_prompt(base: &str, options: &GenerationOptions) -> String {
    let mut prompt = if base.trim().is_empty() {
        DEFAULT_SUBJECT.to_string()
    } else {
        base.trim().to_string()
    };

    if let Some(text) = options
        .text_in_design
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        prompt.push_str(&format!(". The design must incorporate this text: \"{text}\""));
        match &options.text_style {
            Some(StyleChoice::Preset(style)) => {
                prompt.push_str(&format!(" in a {style} style"));
            }
            Some(StyleChoice::Custom(style)) if !style.trim().is_empty() => {
                prompt.push_str(&format!(" in this text style: {}", style.trim()));
            }
            _ => {}
        }
    }

    match &options.image_style {
        Some(StyleChoice::Preset(style)) => {
            prompt.push_str(&format!(", rendered in a {style} art style"));
        }
        Some(StyleChoice::Custom(style)) if !style.trim().is_empty() => {
            prompt.push_str(&format!(", rendered in a {} art style", style.trim()));
        }
        _ => {}
    }

    match &options.color_treatment {
        ColorTreatment::KeepOriginal => {}
        ColorTreatment::CustomPalette(colors) => {
            prompt.push_str(&format!(
                ", using a custom color palette with colors: {}",
                colors.join(", ")
            ));
        }
        ColorTreatment::Named(treatment) => {
            prompt.push_str(&format!(", with {treatment} color treatment"));
        }
    }

    if let Some(effect) = options
        .effect_filter
        .as_deref()
        .filter(|e| !e.is_empty() && *e != "None")
    {
        prompt.push_str(&format!(", with {effect} visual effect"));
    }

    if let Some(mood) = options.mood.as_deref().filter(|m| !m.is_empty()) {
        prompt.push_str(&format!(". The overall mood should be {mood}"));
    }

    if options.remove_background {
        prompt.push_str(
            ". Make the edits on the main object of the image, and make the background all green.",
        );
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prompt_falls_back_to_the_default_subject() {
        let p = compose_prompt("   ", &GenerationOptions::default());
        assert_eq!(p, "A t-shirt design");
    }

    #[test]
    fn plain_prompt_passes_through_unchanged() {
        let p = compose_prompt("a roaring tiger", &GenerationOptions::default());
        assert_eq!(p, "a roaring tiger");
    }

    #[test]
    fn all_clauses_appear_in_order() {
        let options = GenerationOptions {
            text_in_design: Some("STAY WILD".into()),
            text_style: Some(StyleChoice::Preset("graffiti".into())),
            image_style: Some(StyleChoice::Preset("watercolor".into())),
            color_treatment: ColorTreatment::Named("monochrome".into()),
            effect_filter: Some("glitch".into()),
            mood: Some("Playful/Fun".into()),
            remove_background: true,
        };
        let p = compose_prompt("a roaring tiger", &options);
        assert_eq!(
            p,
            "a roaring tiger. The design must incorporate this text: \"STAY WILD\" in a graffiti style, \
             rendered in a watercolor art style, with monochrome color treatment, with glitch visual effect. \
             The overall mood should be Playful/Fun. Make the edits on the main object of the image, \
             and make the background all green."
        );
    }

    #[test]
    fn custom_palette_lists_its_colors() {
        let options = GenerationOptions {
            color_treatment: ColorTreatment::CustomPalette(vec!["#ff0000".into(), "#00ff00".into()]),
            ..GenerationOptions::default()
        };
        let p = compose_prompt("logo", &options);
        assert!(p.contains("using a custom color palette with colors: #ff0000, #00ff00"));
    }

    #[test]
    fn none_effect_and_empty_custom_styles_are_skipped() {
        let options = GenerationOptions {
            image_style: Some(StyleChoice::Custom("  ".into())),
            effect_filter: Some("None".into()),
            ..GenerationOptions::default()
        };
        let p = compose_prompt("logo", &options);
        assert_eq!(p, "logo");
    }
}
