use thiserror::Error;

use crate::model::ImageFailure;

/// Errors from embedding a single image.
///
/// These are recorded per file by the batch driver and never abort the
/// whole conversion.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("No embedding strategy succeeded for {file}: {cause}")]
    Unsupported { file: String, cause: String },

    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Image decode timed out after {seconds}s")]
    DecodeTimeout { seconds: u64 },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Re-encoded image is empty")]
    EmptyEncode,

    #[error("PDF image embedding failed: {0}")]
    PdfEmbed(String),
}

/// Errors that abort the whole conversion.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(
        "Margin of {margin_pt}pt leaves no printable area on a {page_width}x{page_height}pt page"
    )]
    InvalidGeometry {
        page_width: f32,
        page_height: f32,
        margin_pt: f32,
    },

    #[error("No images could be embedded ({} failed)", .failures.len())]
    NoImagesProcessed { failures: Vec<ImageFailure> },

    #[error(transparent)]
    Embed(#[from] EmbedError),
}
