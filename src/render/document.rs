//! Batch document assembly.
//!
//! One page per source image, in input order. Per-image failures are
//! recorded and skipped; only a bad page configuration or a batch with
//! zero successes is fatal.

use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectTransform};

use crate::config::Settings;
use crate::error::RenderError;
use crate::model::{BatchOutcome, ImageFailure, SourceImage};

use super::compress::compress_pdf;
use super::embed::normalize;
use super::geometry::{resolve_geometry, PageGeometry};
use super::layer::LayerBuilder;
use super::layout::{compute_placement, printable_area};
use super::optimize;

/// Main document renderer
pub struct DocumentRenderer {
    settings: Settings,
}

impl DocumentRenderer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Convert a batch of images into a single PDF.
    ///
    /// The geometry is validated before any page is created, so a
    /// margin/page-size mismatch fails without producing a partial
    /// document.
    pub fn render(&self, images: &[SourceImage]) -> Result<BatchOutcome, RenderError> {
        let geometry = resolve_geometry(&self.settings.page_size, self.settings.orientation);
        printable_area(geometry, self.settings.margin_pt)?;

        let budgeted;
        let images = match self.settings.max_size_bytes {
            Some(budget) => {
                budgeted = optimize::fit_to_budget(images, budget);
                &budgeted[..]
            }
            None => images,
        };

        let mut doc = PdfDocument::new(&self.settings.title);
        let mut pages = Vec::new();
        let mut failures = Vec::new();

        for source in images {
            match self.render_page(source, &mut doc, geometry) {
                Ok(page) => pages.push(page),
                Err(e) => {
                    log::warn!("Skipping {}: {}", source.file_name, e);
                    failures.push(ImageFailure {
                        file_name: source.file_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if pages.is_empty() {
            return Err(RenderError::NoImagesProcessed { failures });
        }

        let page_count = pages.len();
        doc.with_pages(pages);

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

        // Compress PDF streams to reduce file size
        let compressed = compress_pdf(bytes.clone()).unwrap_or(bytes);

        Ok(BatchOutcome {
            pdf_bytes: compressed,
            page_count,
            failures,
        })
    }

    /// Build one page: normalize the image, fit it into the printable
    /// area, and place it.
    fn render_page(
        &self,
        source: &SourceImage,
        doc: &mut PdfDocument,
        geometry: PageGeometry,
    ) -> Result<PdfPage, RenderError> {
        let embedded = normalize(source, doc)?;
        let placement = compute_placement(
            geometry,
            self.settings.margin_pt,
            embedded.width as f32,
            embedded.height as f32,
        )?;

        // at 72 dpi one pixel is one point, so the scale factors map the
        // intrinsic size directly onto the placement box
        let transform = XObjectTransform {
            translate_x: Some(Pt(placement.x)),
            translate_y: Some(Pt(placement.y)),
            scale_x: Some(placement.width / embedded.width as f32),
            scale_y: Some(placement.height / embedded.height as f32),
            rotate: None,
            dpi: Some(72.0),
        };

        let mut layer = LayerBuilder::new();
        layer.use_xobject(embedded.xobject, transform);

        Ok(PdfPage::new(
            Mm::from(Pt(geometry.width)),
            Mm::from(Pt(geometry.height)),
            layer.into_ops(),
        ))
    }
}

/// Convenience function to convert images with the given settings
pub fn generate_pdf(
    images: &[SourceImage],
    settings: &Settings,
) -> Result<BatchOutcome, RenderError> {
    let renderer = DocumentRenderer::new(settings.clone());
    renderer.render(images)
}
