//! Wire types for the print-provider and storefront APIs.
//!
//! The print provider speaks snake_case, so those structs serialize
//! without rename attributes; the app backend (storefront and
//! generation endpoints) speaks camelCase and renames accordingly.

use serde::{Deserialize, Serialize};
use teeforge_core::View;

/// Garment blueprint for the standard t-shirt.
pub const BLUEPRINT_ID: u32 = 6;
/// Default print provider for that blueprint.
pub const PRINT_PROVIDER_ID: u32 = 99;

/// Print-area position name the provider expects for a view.
pub fn provider_position(view: View) -> &'static str {
    match view {
        View::Front => "front",
        View::Back => "back",
        View::LeftSleeve => "left_sleeve",
        View::RightSleeve => "right_sleeve",
        View::NeckLabel => "label_inside",
    }
}

/// Artwork scale within a print area. Sleeves print smaller.
pub fn placement_scale(view: View) -> f64 {
    match view {
        View::LeftSleeve | View::RightSleeve => 0.8,
        _ => 1.0,
    }
}

#[derive(Debug, Serialize)]
pub struct UploadImageRequest {
    pub file_name: String,
    /// Base64 PNG without any data-URL prefix.
    pub contents: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub id: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantCatalog {
    pub variants: Vec<CatalogVariant>,
}

impl VariantCatalog {
    /// Distinct colors in catalog order.
    pub fn colors(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for v in &self.variants {
            if !out.iter().any(|c| c.eq_ignore_ascii_case(&v.options.color)) {
                out.push(v.options.color.clone());
            }
        }
        out
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogVariant {
    pub id: u64,
    pub options: VariantOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantOptions {
    pub color: String,
    pub size: String,
}

/// A sellable variant in the created product. `price` is in minor
/// currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductVariant {
    pub id: u64,
    pub price: u32,
    pub is_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct PlacedImage {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub angle: f64,
}

#[derive(Debug, Serialize)]
pub struct Placeholder {
    pub position: String,
    pub images: Vec<PlacedImage>,
}

#[derive(Debug, Serialize)]
pub struct PrintAreaSpec {
    pub variant_ids: Vec<u64>,
    pub placeholders: Vec<Placeholder>,
}

#[derive(Debug, Serialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub description: String,
    pub blueprint_id: u32,
    pub print_provider_id: u32,
    pub variants: Vec<ProductVariant>,
    pub print_areas: Vec<PrintAreaSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProduct {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// A provider-generated mockup photo of the product.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Mockup {
    pub src: String,
    #[serde(default)]
    pub variant_ids: Vec<u64>,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductDetail {
    pub id: String,
    #[serde(default)]
    pub images: Vec<Mockup>,
}

/// One image attached to a storefront listing: either an editor
/// capture (data URL) or a provider mockup (remote URL).
#[derive(Debug, Clone, Serialize)]
pub struct ListingImage {
    pub data: String,
    pub view: String,
}

/// Body of the storefront product-creation call. The listing fields
/// nest under `productData`, with the creator identifier alongside.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    pub product_data: ListingData,
    pub creator_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingData {
    pub images: Vec<ListingImage>,
    pub title: String,
    pub description: String,
    /// Price in major units, as entered by the creator.
    pub price: f64,
    pub available_colors: Vec<String>,
    pub available_sizes: Vec<String>,
    pub printify_product_id: String,
    /// ISO-8601 creation time recorded on the listing.
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedListing {
    pub product: ListingProduct,
}

/// The storefront product behind a new listing. The store returns `id`
/// as a number or a string depending on the backing platform.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingProduct {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub url: String,
}

fn id_string<'de, D>(de: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }
    Ok(match Raw::deserialize(de)? {
        Raw::Num(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    /// Reference images as data URLs; empty for pure text-to-image.
    pub images: Vec<String>,
    pub creator_id: String,
    /// Always empty: styling clauses are composed into `prompt`
    /// before the request is built.
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Generation endpoint envelope. `success: false` carries the model's
/// error message in `error`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Artwork produced by the generation backend.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// URL or data URL of the artwork; the caller fetches and decodes it.
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSpriteRequest {
    /// The source image as a URL or base64 data URL.
    pub image_data: String,
    /// What to cut out, e.g. "main object".
    pub element_description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSprite {
    pub sprite_image_url: String,
}
