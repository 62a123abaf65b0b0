//! Image embedding strategies.
//!
//! An image becomes a PDF XObject through an ordered strategy chain:
//! JPEG and PNG files are handed to the PDF encoder's native decoders
//! as-is; everything else (or anything the native path rejects) is
//! decoded through the `image` crate, flattened onto a white background,
//! re-encoded as PNG, and embedded that way. First success wins.

use std::io::Cursor;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use printpdf::{PdfDocument, PdfWarnMsg, RawImage, XObjectId};

use crate::config::defaults::DECODE_TIMEOUT_SECS;
use crate::error::EmbedError;
use crate::model::SourceImage;

/// An image registered with the target document, with its intrinsic
/// pixel dimensions. Owned by the document; dropping this does not
/// remove the XObject.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub xobject: XObjectId,
    pub width: u32,
    pub height: u32,
}

/// A single embedding approach tried by [`normalize`].
trait EmbedStrategy {
    fn name(&self) -> &'static str;

    /// Whether the declared format makes this strategy worth trying.
    fn can_attempt(&self, source: &SourceImage) -> bool;

    fn attempt(
        &self,
        source: &SourceImage,
        doc: &mut PdfDocument,
    ) -> Result<EmbeddedImage, EmbedError>;
}

/// Direct embedding of JPEG bytes.
struct JpegEmbed;

impl EmbedStrategy for JpegEmbed {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn can_attempt(&self, source: &SourceImage) -> bool {
        source.declares("image/jpeg", &["jpg", "jpeg"])
    }

    fn attempt(
        &self,
        source: &SourceImage,
        doc: &mut PdfDocument,
    ) -> Result<EmbeddedImage, EmbedError> {
        embed_raw(&source.bytes, doc)
    }
}

/// Direct embedding of PNG bytes.
struct PngEmbed;

impl EmbedStrategy for PngEmbed {
    fn name(&self) -> &'static str {
        "png"
    }

    fn can_attempt(&self, source: &SourceImage) -> bool {
        source.declares("image/png", &["png"])
    }

    fn attempt(
        &self,
        source: &SourceImage,
        doc: &mut PdfDocument,
    ) -> Result<EmbeddedImage, EmbedError> {
        embed_raw(&source.bytes, doc)
    }
}

/// Last resort: decode through the `image` crate, flatten, re-encode as
/// PNG. Handles GIF, BMP, WEBP, TIFF, and files whose declared format
/// lied about their content.
struct RasterReencode;

impl EmbedStrategy for RasterReencode {
    fn name(&self) -> &'static str {
        "reencode"
    }

    fn can_attempt(&self, _source: &SourceImage) -> bool {
        true
    }

    fn attempt(
        &self,
        source: &SourceImage,
        doc: &mut PdfDocument,
    ) -> Result<EmbeddedImage, EmbedError> {
        let png = decode_with_deadline(
            source.bytes.clone(),
            Duration::from_secs(DECODE_TIMEOUT_SECS),
        )?;
        embed_raw(&png, doc)
    }
}

/// Produce a PDF-embeddable image from an arbitrary source file.
///
/// Strategies are tried in order; a failed attempt falls through to the
/// next rather than aborting. If none succeeds the file fails with
/// [`EmbedError::Unsupported`] carrying the last underlying cause.
pub fn normalize(
    source: &SourceImage,
    doc: &mut PdfDocument,
) -> Result<EmbeddedImage, EmbedError> {
    let strategies: [&dyn EmbedStrategy; 3] = [&JpegEmbed, &PngEmbed, &RasterReencode];
    let mut last_cause = String::from("no applicable strategy");

    for strategy in strategies {
        if !strategy.can_attempt(source) {
            continue;
        }
        match strategy.attempt(source, doc) {
            Ok(embedded) => {
                log::debug!(
                    "Embedded {} via {} ({}x{}px)",
                    source.file_name,
                    strategy.name(),
                    embedded.width,
                    embedded.height
                );
                return Ok(embedded);
            }
            Err(e) => {
                log::debug!(
                    "Strategy {} failed for {}: {}",
                    strategy.name(),
                    source.file_name,
                    e
                );
                last_cause = e.to_string();
            }
        }
    }

    Err(EmbedError::Unsupported {
        file: source.file_name.clone(),
        cause: last_cause,
    })
}

/// Register image bytes with the document through the PDF encoder's own
/// decoder and report the intrinsic pixel size.
fn embed_raw(bytes: &[u8], doc: &mut PdfDocument) -> Result<EmbeddedImage, EmbedError> {
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let raw = RawImage::decode_from_bytes(bytes, &mut warnings).map_err(EmbedError::PdfEmbed)?;

    if raw.width == 0 || raw.height == 0 {
        return Err(EmbedError::InvalidDimensions {
            width: raw.width as u32,
            height: raw.height as u32,
        });
    }

    let width = raw.width as u32;
    let height = raw.height as u32;
    let xobject = doc.add_image(&raw);

    Ok(EmbeddedImage {
        xobject,
        width,
        height,
    })
}

/// Run the decode+flatten+encode round trip on a worker thread, bounded
/// by a deadline.
///
/// A timed-out worker cannot be interrupted mid-decode, but its result
/// is discarded and every buffer it holds is dropped when it finishes;
/// the batch moves on immediately.
fn decode_with_deadline(bytes: Vec<u8>, deadline: Duration) -> Result<Vec<u8>, EmbedError> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        // the receiver may be gone after a timeout; nothing to do then
        let _ = tx.send(reencode_as_png(&bytes));
    });

    match rx.recv_timeout(deadline) {
        Ok(result) => result,
        Err(_) => Err(EmbedError::DecodeTimeout {
            seconds: deadline.as_secs(),
        }),
    }
}

/// Decode arbitrary raster bytes, flatten onto white, re-encode as PNG.
fn reencode_as_png(bytes: &[u8]) -> Result<Vec<u8>, EmbedError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| EmbedError::Decode(e.to_string()))?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(EmbedError::InvalidDimensions {
            width: decoded.width(),
            height: decoded.height(),
        });
    }

    let flat = flatten_onto_white(&decoded);

    let mut out = Vec::new();
    DynamicImage::ImageRgb8(flat)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| EmbedError::Decode(e.to_string()))?;

    if out.is_empty() {
        return Err(EmbedError::EmptyEncode);
    }

    Ok(out)
}

/// Composite an image over an opaque white background.
///
/// PDF pages have no alpha channel to inherit, so transparency is
/// resolved here, the way a white sheet of paper would show it.
pub(crate) fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let over_white = |channel: u8| -> u8 {
            ((channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        flat.put_pixel(
            x,
            y,
            Rgb([over_white(pixel[0]), over_white(pixel[1]), over_white(pixel[2])]),
        );
    }

    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32, pixel: Rgba<u8>) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, pixel);
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 120, 200]));
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Jpeg)
            .unwrap();
        out
    }

    #[test]
    fn test_jpeg_roundtrip_reports_intrinsic_dimensions() {
        let mut doc = PdfDocument::new("test");
        let source = SourceImage::new("photo.jpg", jpeg_bytes(32, 20));
        let embedded = normalize(&source, &mut doc).unwrap();
        assert_eq!(embedded.width, 32);
        assert_eq!(embedded.height, 20);
    }

    #[test]
    fn test_png_embeds_natively() {
        let mut doc = PdfDocument::new("test");
        let source = SourceImage::new("shot.png", png_bytes(8, 8, Rgba([0, 0, 0, 255])));
        let embedded = normalize(&source, &mut doc).unwrap();
        assert_eq!(embedded.width, 8);
        assert_eq!(embedded.height, 8);
    }

    #[test]
    fn test_misnamed_png_falls_through_to_reencode() {
        // PNG bytes behind a .gif name: neither native gate matches and
        // the fallback must still embed it.
        let mut doc = PdfDocument::new("test");
        let source = SourceImage::new("actually.gif", png_bytes(5, 7, Rgba([9, 9, 9, 255])));
        let embedded = normalize(&source, &mut doc).unwrap();
        assert_eq!(embedded.width, 5);
        assert_eq!(embedded.height, 7);
    }

    #[test]
    fn test_garbage_bytes_are_unsupported() {
        let mut doc = PdfDocument::new("test");
        let source = SourceImage::new("broken.jpg", vec![0x00, 0x01, 0x02, 0x03]);
        let err = normalize(&source, &mut doc).unwrap_err();
        match err {
            EmbedError::Unsupported { file, .. } => assert_eq!(file, "broken.jpg"),
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_flatten_blends_alpha_over_white() {
        // half-transparent pure red over white -> light red
        let red = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            Rgba([255, 0, 0, 128]),
        ));
        let flat = flatten_onto_white(&red);
        let pixel = flat.get_pixel(0, 0);
        assert_eq!(pixel[0], 255);
        assert!(pixel[1] > 120 && pixel[1] < 135, "green was {}", pixel[1]);
        assert!(pixel[2] > 120 && pixel[2] < 135, "blue was {}", pixel[2]);
    }

    #[test]
    fn test_reencode_produces_png() {
        let bytes = png_bytes(3, 3, Rgba([1, 2, 3, 255]));
        let png = reencode_as_png(&bytes).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
