//! The publish pipeline: validate, export, upload, create, review.
//!
//! Publishing is a two-phase flow. [`Publisher::publish`] does all the
//! work that is safe to redo: it exports and uploads the artwork,
//! creates the provider product, and fetches its mockups, returning a
//! [`PendingPublish`] for the creator to review. Only
//! [`Publisher::approve`] makes the product public; [`Publisher::reject`]
//! discards the pending state without any further remote calls.

use chrono::Utc;
use teeforge_core::View;
use teeforge_designer::render::{self, raster};
use teeforge_designer::Editor;
use tracing::{debug, info, warn};

use crate::context::CreatorContext;
use crate::contracts::{
    CreateProductRequest, GeneratedImage, ListingData, ListingImage, ListingRequest, Mockup,
    PlacedImage, Placeholder, PrintAreaSpec, ProductVariant, VariantCatalog, BLUEPRINT_ID,
    PRINT_PROVIDER_ID, placement_scale, provider_position,
};
use crate::error::{PublishError, Result};
use crate::prompt::{compose_prompt, GenerationOptions};
use crate::provider::{BackgroundRemover, ImageGenerator, PrintProvider, Storefront};

/// What the creator entered in the publish panel.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PublishOptions {
    pub title: String,
    pub description: String,
    /// Price in major currency units.
    pub price: f64,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
}

/// Checks the publish form before any remote work starts. Messages are
/// surfaced to the creator as entered-field errors.
pub fn validate_options(options: &PublishOptions, has_content: bool) -> Result<()> {
    if options.title.trim().is_empty() {
        return Err(PublishError::Validation(
            "Please enter a product title".to_string(),
        ));
    }
    if !(options.price > 0.0) {
        return Err(PublishError::Validation(
            "Please enter a valid price".to_string(),
        ));
    }
    if options.colors.is_empty() {
        return Err(PublishError::Validation(
            "Select at least one color".to_string(),
        ));
    }
    if options.sizes.is_empty() {
        return Err(PublishError::Validation(
            "Select at least one size".to_string(),
        ));
    }
    if !has_content {
        return Err(PublishError::Validation(
            "Please create a design first".to_string(),
        ));
    }
    Ok(())
}

/// Crosses the chosen colors and sizes against the provider catalog.
/// Color matching ignores case; combinations the catalog lacks are
/// skipped. Prices are converted to minor units.
pub fn select_variants(
    catalog: &VariantCatalog,
    colors: &[String],
    sizes: &[String],
    price: f64,
) -> Vec<ProductVariant> {
    let price_minor = (price * 100.0).round() as u32;
    let mut out = Vec::new();
    for color in colors {
        for size in sizes {
            let found = catalog.variants.iter().find(|v| {
                v.options.color.eq_ignore_ascii_case(color) && v.options.size == *size
            });
            if let Some(v) = found {
                out.push(ProductVariant {
                    id: v.id,
                    price: price_minor,
                    is_enabled: true,
                });
            }
        }
    }
    out
}

/// Generates artwork for the creator's prompt, optionally stripping
/// the background afterwards.
///
/// Background removal is best-effort: if the extraction call fails the
/// raw render is returned and the failure is logged.
pub async fn generate_design(
    generator: &dyn ImageGenerator,
    remover: Option<&dyn BackgroundRemover>,
    base_prompt: &str,
    options: &GenerationOptions,
) -> Result<GeneratedImage> {
    let prompt = compose_prompt(base_prompt, options);
    let generated = generator.generate(&prompt).await?;

    if options.remove_background {
        if let Some(remover) = remover {
            match remover.remove_background(&generated.url, "main object").await {
                Ok(extracted) => return Ok(extracted),
                Err(err) => {
                    warn!(error = %err, "background removal failed; keeping original image");
                }
            }
        }
    }

    Ok(generated)
}

/// A provider product awaiting the creator's mockup review.
#[derive(Debug, Clone)]
pub struct PendingPublish {
    pub product_id: String,
    pub mockups: Vec<Mockup>,
    /// Composited editor captures, one per view.
    pub editor_images: Vec<ListingImage>,
    pub options: PublishOptions,
}

/// The live listing created after approval.
#[derive(Debug, Clone)]
pub struct PublishedProduct {
    pub product_id: String,
    pub listing_id: String,
}

pub struct Publisher<'a> {
    provider: &'a dyn PrintProvider,
    storefront: &'a dyn Storefront,
    context: CreatorContext,
}

impl<'a> Publisher<'a> {
    pub fn new(
        provider: &'a dyn PrintProvider,
        storefront: &'a dyn Storefront,
        context: CreatorContext,
    ) -> Self {
        Self {
            provider,
            storefront,
            context,
        }
    }

    /// Runs the pre-review half of the pipeline.
    ///
    /// Views that fail to upload are skipped with a warning; the
    /// publish aborts only when no view uploads at all, so one bad
    /// export cannot sink a multi-view product.
    pub async fn publish(
        &self,
        editor: &Editor,
        options: PublishOptions,
    ) -> Result<PendingPublish> {
        validate_options(&options, editor.has_any_content())?;

        let mut editor_images = Vec::new();
        let mut uploaded: Vec<(View, String)> = Vec::new();
        let mut attempted = 0usize;

        for view in View::ALL {
            // Listing photos show every side of the garment, printed
            // or not.
            let capture = render::render_composited(editor, view)?;
            editor_images.push(ListingImage {
                data: raster::png_data_url(&capture)?,
                view: view.label().to_string(),
            });

            if !editor.view(view).has_content() {
                continue;
            }
            attempted += 1;

            let Some(artwork) = render::render_design_only(editor, view)? else {
                continue;
            };
            let data_url = raster::png_data_url(&artwork)?;
            let contents = data_url
                .split_once(',')
                .map(|(_, b64)| b64)
                .unwrap_or(&data_url);
            let file_name = self
                .context
                .upload_file_name(&format!("{}-{}.png", options.title, view.label()));

            match self.provider.upload_image(&file_name, contents).await {
                Ok(image) => {
                    debug!(view = %view, image_id = %image.id, "artwork uploaded");
                    uploaded.push((view, image.id));
                }
                Err(err) => {
                    warn!(view = %view, error = %err, "artwork upload failed; skipping view");
                }
            }
        }

        if uploaded.is_empty() {
            debug_assert!(attempted > 0, "validation admits only editors with content");
            return Err(PublishError::NoUploadableViews);
        }

        let catalog = self.provider.variant_catalog().await?;
        let variants = select_variants(&catalog, &options.colors, &options.sizes, options.price);
        if variants.is_empty() {
            return Err(PublishError::NoVariants);
        }

        let variant_ids: Vec<u64> = variants.iter().map(|v| v.id).collect();
        let placeholders: Vec<Placeholder> = uploaded
            .iter()
            .map(|(view, image_id)| Placeholder {
                position: provider_position(*view).to_string(),
                images: vec![PlacedImage {
                    id: image_id.clone(),
                    x: 0.5,
                    y: 0.5,
                    scale: placement_scale(*view),
                    angle: 0.0,
                }],
            })
            .collect();

        let request = CreateProductRequest {
            title: options.title.clone(),
            description: if options.description.trim().is_empty() {
                "Custom designed t-shirt".to_string()
            } else {
                options.description.clone()
            },
            blueprint_id: BLUEPRINT_ID,
            print_provider_id: PRINT_PROVIDER_ID,
            variants,
            print_areas: vec![PrintAreaSpec {
                variant_ids,
                placeholders,
            }],
        };

        let created = self.provider.create_product(&request).await?;
        info!(product_id = %created.id, "provider product created; awaiting review");

        let detail = self.provider.product_detail(&created.id).await?;

        Ok(PendingPublish {
            product_id: created.id,
            mockups: detail.images,
            editor_images,
            options,
        })
    }

    /// Makes the reviewed product public: creates the storefront
    /// listing and links the provider product to it.
    pub async fn approve(&self, pending: PendingPublish) -> Result<PublishedProduct> {
        let mut images = pending.editor_images.clone();
        images.extend(pending.mockups.iter().map(|m| ListingImage {
            data: m.src.clone(),
            view: "mockup".to_string(),
        }));

        let request = ListingRequest {
            product_data: ListingData {
                images,
                title: pending.options.title.clone(),
                description: if pending.options.description.trim().is_empty() {
                    "Custom Design".to_string()
                } else {
                    pending.options.description.clone()
                },
                price: pending.options.price,
                available_colors: pending.options.colors.clone(),
                available_sizes: pending.options.sizes.clone(),
                printify_product_id: pending.product_id.clone(),
                timestamp: Utc::now().to_rfc3339(),
            },
            creator_id: self.context.creator_id.clone(),
        };

        let listing = self.storefront.create_listing(&request).await?;
        self.provider
            .link_to_storefront(&pending.product_id, &listing.product.id)
            .await?;
        info!(product_id = %pending.product_id, listing_id = %listing.product.id, "product published");

        Ok(PublishedProduct {
            product_id: pending.product_id,
            listing_id: listing.product.id,
        })
    }

    /// Discards a pending publish. No remote state is touched; the
    /// provider product stays unlisted and can be re-published.
    pub fn reject(&self, pending: PendingPublish) {
        debug!(product_id = %pending.product_id, "pending publish discarded");
    }
}
