//! # TeeForge Publish
//!
//! Turns a finished design into a sellable product: print-resolution
//! exports are uploaded to the print provider, a product is created
//! from the chosen color and size variants, and after the creator
//! reviews the provider's mockups the product is listed on the
//! storefront.
//!
//! All remote services sit behind traits ([`provider`]) so the
//! pipeline is testable without a network; [`client`] holds the HTTP
//! implementations.

pub mod client;
pub mod context;
pub mod contracts;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod provider;

pub use context::CreatorContext;
pub use error::{PublishError, Result};
pub use pipeline::{
    generate_design, select_variants, validate_options, PendingPublish, PublishOptions,
    PublishedProduct, Publisher,
};
pub use prompt::{compose_prompt, ColorTreatment, GenerationOptions, StyleChoice};
pub use provider::{BackgroundRemover, ImageGenerator, PrintProvider, Storefront};
