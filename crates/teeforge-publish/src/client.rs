//! HTTP implementations of the service traits.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::contracts::{
    CreateProductRequest, CreatedListing, CreatedProduct, ExtractSpriteRequest, ExtractedSprite,
    GenerateRequest, GenerateResponse, GeneratedImage, ListingRequest, ProductDetail,
    UploadImageRequest, UploadedImage, VariantCatalog, BLUEPRINT_ID, PRINT_PROVIDER_ID,
};
use crate::error::{PublishError, Result};
use crate::provider::{BackgroundRemover, ImageGenerator, PrintProvider, Storefront};

const PROVIDER_API_URL: &str = "https://api.printify.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

fn build_http() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .map_err(|e| PublishError::HttpClientBuild(e.to_string()))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| PublishError::Request(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(PublishError::Api { status, body: text });
    }
    serde_json::from_str(&text).map_err(|e| PublishError::Parse(e.to_string()))
}

/// Print-provider client authenticated with a bearer token and bound
/// to one shop.
pub struct ProviderClient {
    http: reqwest::Client,
    api_key: String,
    shop_id: String,
}

impl ProviderClient {
    pub fn new(api_key: String, shop_id: String) -> Result<Self> {
        Ok(Self {
            http: build_http()?,
            api_key,
            shop_id,
        })
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;
        read_json(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;
        read_json(response).await
    }
}

#[async_trait]
impl PrintProvider for ProviderClient {
    async fn upload_image(&self, file_name: &str, contents: &str) -> Result<UploadedImage> {
        debug!(file_name, "uploading artwork to provider");
        let body = UploadImageRequest {
            file_name: file_name.to_string(),
            contents: contents.to_string(),
        };
        self.post_json(&format!("{PROVIDER_API_URL}/uploads/images.json"), &body)
            .await
    }

    async fn variant_catalog(&self) -> Result<VariantCatalog> {
        self.get_json(&format!(
            "{PROVIDER_API_URL}/catalog/blueprints/{BLUEPRINT_ID}/print_providers/{PRINT_PROVIDER_ID}/variants.json"
        ))
        .await
    }

    async fn create_product(&self, request: &CreateProductRequest) -> Result<CreatedProduct> {
        debug!(title = %request.title, variants = request.variants.len(), "creating provider product");
        self.post_json(
            &format!("{PROVIDER_API_URL}/shops/{}/products.json", self.shop_id),
            request,
        )
        .await
    }

    async fn product_detail(&self, product_id: &str) -> Result<ProductDetail> {
        self.get_json(&format!(
            "{PROVIDER_API_URL}/shops/{}/products/{product_id}.json",
            self.shop_id
        ))
        .await
    }

    async fn link_to_storefront(&self, product_id: &str, listing_id: &str) -> Result<()> {
        debug!(product_id, listing_id, "linking product to storefront listing");
        #[derive(Serialize)]
        struct PublishFlags {
            title: bool,
            description: bool,
            images: bool,
            variants: bool,
            tags: bool,
        }
        let response = self
            .http
            .post(format!(
                "{PROVIDER_API_URL}/shops/{}/products/{product_id}/publish.json",
                self.shop_id
            ))
            .bearer_auth(&self.api_key)
            .json(&PublishFlags {
                title: true,
                description: true,
                images: true,
                variants: true,
                tags: true,
            })
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api { status, body });
        }
        Ok(())
    }
}

/// Client for the app backend that fronts the storefront and the image
/// generation model.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    creator_id: String,
}

impl BackendClient {
    pub fn new(base_url: String, creator_id: String) -> Result<Self> {
        Ok(Self {
            http: build_http()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            creator_id,
        })
    }
}

#[async_trait]
impl Storefront for BackendClient {
    async fn create_listing(&self, request: &ListingRequest) -> Result<CreatedListing> {
        debug!(title = %request.product_data.title, images = request.product_data.images.len(), "creating storefront listing");
        let response = self
            .http
            .post(format!("{}/api/shopify/create-product", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;
        read_json(response).await
    }
}

#[async_trait]
impl ImageGenerator for BackendClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        debug!(chars = prompt.len(), "requesting artwork generation");
        let response = self
            .http
            .post(format!("{}/api/generate-sd", self.base_url))
            .json(&GenerateRequest {
                prompt: prompt.to_string(),
                images: Vec::new(),
                creator_id: self.creator_id.clone(),
                options: serde_json::Map::new(),
            })
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;
        let body: GenerateResponse = read_json(response).await?;
        if !body.success {
            return Err(PublishError::Generation(
                body.error
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }
        match body.image_url {
            Some(url) => Ok(GeneratedImage { url }),
            None => Err(PublishError::Generation(
                "response carried no image".to_string(),
            )),
        }
    }
}

#[async_trait]
impl BackgroundRemover for BackendClient {
    async fn remove_background(&self, image: &str, description: &str) -> Result<GeneratedImage> {
        debug!(description, "requesting background removal");
        let response = self
            .http
            .post(format!("{}/api/extract-sprite", self.base_url))
            .json(&ExtractSpriteRequest {
                image_data: image.to_string(),
                element_description: description.to_string(),
            })
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;
        let sprite: ExtractedSprite = read_json(response).await?;
        Ok(GeneratedImage {
            url: sprite.sprite_image_url,
        })
    }
}
