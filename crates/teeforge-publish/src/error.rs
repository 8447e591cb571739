//! Publish pipeline errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// User-correctable input problems; the message is shown verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("failed to build http client: {0}")]
    HttpClientBuild(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("api returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse api response: {0}")]
    Parse(String),

    /// The generation backend answered 200 but reported failure in
    /// its response envelope.
    #[error("image generation failed: {0}")]
    Generation(String),

    /// Every per-view upload failed, so there is nothing to print.
    #[error("no designs could be uploaded")]
    NoUploadableViews,

    /// Color and size selections crossed to an empty variant set.
    #[error("No variants selected. Please select at least one color and size combination.")]
    NoVariants,

    #[error(transparent)]
    Render(#[from] teeforge_core::EditorError),
}

pub type Result<T> = std::result::Result<T, PublishError>;
