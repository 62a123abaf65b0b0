pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod render;

pub use cli::{Orientation, PageSize};
pub use config::Settings;
pub use error::{EmbedError, RenderError};
pub use model::{BatchOutcome, ImageFailure, SourceImage};
pub use render::generate_pdf;

/// High-level API for converting images to a PDF.
///
/// This is the recommended entry point for library consumers. Images are
/// processed in order, one page per image; files that cannot be embedded
/// are recorded in the returned outcome rather than aborting the batch.
///
/// # Arguments
///
/// * `images` - Ordered source images; page order mirrors this order
/// * `settings` - Page size, orientation, margin, title, and optional
///   output size budget
///
/// # Returns
///
/// A [`BatchOutcome`] with the finished PDF bytes and the ordered list
/// of per-file failures, or a [`RenderError`] if the page configuration
/// is unusable or no image could be embedded at all.
///
/// # Example
///
/// ```no_run
/// use img_to_pdf::{convert_images, Settings, SourceImage};
///
/// let images = vec![
///     SourceImage::from_path(std::path::Path::new("scan1.jpg")).unwrap(),
///     SourceImage::from_path(std::path::Path::new("scan2.png")).unwrap(),
/// ];
///
/// let outcome = convert_images(&images, &Settings::default()).unwrap();
/// std::fs::write("scans.pdf", &outcome.pdf_bytes).unwrap();
///
/// for failure in &outcome.failures {
///     eprintln!("{}: {}", failure.file_name, failure.reason);
/// }
/// ```
pub fn convert_images(
    images: &[SourceImage],
    settings: &Settings,
) -> Result<BatchOutcome, RenderError> {
    let renderer = render::DocumentRenderer::new(settings.clone());
    renderer.render(images)
}
