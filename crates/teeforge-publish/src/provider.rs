//! Service seams of the publish pipeline.
//!
//! The pipeline only talks to these traits; `client` provides the HTTP
//! implementations and tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::contracts::{
    CreateProductRequest, CreatedListing, CreatedProduct, GeneratedImage, ListingRequest,
    ProductDetail, UploadedImage, VariantCatalog,
};
use crate::error::Result;

/// The print-on-demand provider: artwork uploads, the variant catalog,
/// and product creation.
#[async_trait]
pub trait PrintProvider: Send + Sync {
    /// Uploads PNG artwork. `contents` is base64 without a data-URL
    /// prefix.
    async fn upload_image(&self, file_name: &str, contents: &str) -> Result<UploadedImage>;

    /// The variant catalog for the t-shirt blueprint.
    async fn variant_catalog(&self) -> Result<VariantCatalog>;

    async fn create_product(&self, request: &CreateProductRequest) -> Result<CreatedProduct>;

    /// Product state including generated mockups.
    async fn product_detail(&self, product_id: &str) -> Result<ProductDetail>;

    /// Connects a provider product to its storefront listing so orders
    /// route to production.
    async fn link_to_storefront(&self, product_id: &str, listing_id: &str) -> Result<()>;
}

/// The consumer storefront where approved products are listed.
#[async_trait]
pub trait Storefront: Send + Sync {
    async fn create_listing(&self, request: &ListingRequest) -> Result<CreatedListing>;
}

/// AI artwork generation.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generates artwork for a prompt and returns where to fetch it.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage>;
}

/// Post-generation background stripping.
#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// Extracts the described subject from `image` (a URL or data URL)
    /// and returns the cut-out with a transparent background.
    async fn remove_background(&self, image: &str, description: &str) -> Result<GeneratedImage>;
}
