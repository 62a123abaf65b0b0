//! Output size budgeting.
//!
//! When a byte budget is set, sources are downscaled and re-encoded as
//! JPEG before embedding. Candidate (quality, max width) configurations
//! are tried from best to worst; the first whose estimated output fits
//! the budget wins. Re-encoded sources then take the cheap native JPEG
//! embed path in the normalizer.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::DynamicImage;

use crate::config::defaults::PDF_OVERHEAD_FACTOR;
use crate::error::EmbedError;
use crate::model::SourceImage;

use super::embed::flatten_onto_white;

/// One rung of the re-encode ladder
#[derive(Debug, Clone, Copy)]
pub struct EncodeConfig {
    pub quality: u8,
    pub max_width: u32,
}

/// Candidate configurations, best quality first
pub const ENCODE_LADDER: [EncodeConfig; 8] = [
    EncodeConfig { quality: 95, max_width: 1600 },
    EncodeConfig { quality: 85, max_width: 1400 },
    EncodeConfig { quality: 75, max_width: 1200 },
    EncodeConfig { quality: 65, max_width: 1000 },
    EncodeConfig { quality: 55, max_width: 900 },
    EncodeConfig { quality: 45, max_width: 800 },
    EncodeConfig { quality: 35, max_width: 700 },
    EncodeConfig { quality: 25, max_width: 600 },
];

/// Re-encode sources so the finished document fits the byte budget.
///
/// Sources that cannot be re-encoded are passed through untouched; the
/// normalizer decides later whether they embed at all. If even the most
/// aggressive configuration overshoots, it is used anyway and the
/// overshoot is logged - matching the original tool, which preferred a
/// too-large document over an empty one.
pub fn fit_to_budget(images: &[SourceImage], budget_bytes: u64) -> Vec<SourceImage> {
    let config = choose_config(images, budget_bytes);
    log::info!(
        "Size budget {} bytes: re-encoding at quality {}, max width {}px",
        budget_bytes,
        config.quality,
        config.max_width
    );

    images
        .iter()
        .map(|source| match recompress(source, config) {
            Ok(recompressed) => recompressed,
            Err(e) => {
                log::debug!("Keeping {} as-is: {}", source.file_name, e);
                source.clone()
            }
        })
        .collect()
}

fn choose_config(images: &[SourceImage], budget_bytes: u64) -> EncodeConfig {
    for config in ENCODE_LADDER {
        let estimate = estimate_size(images, config);
        log::debug!(
            "Quality {}, max width {}px: ~{} bytes",
            config.quality,
            config.max_width,
            estimate
        );
        if estimate <= budget_bytes {
            return config;
        }
    }

    let fallback = ENCODE_LADDER[ENCODE_LADDER.len() - 1];
    log::warn!(
        "Document may exceed the {} byte budget even at quality {}",
        budget_bytes,
        fallback.quality
    );
    fallback
}

/// Estimated document size for a configuration: the re-encoded image
/// data plus a flat overhead factor for PDF structure.
fn estimate_size(images: &[SourceImage], config: EncodeConfig) -> u64 {
    let data_size: u64 = images
        .iter()
        .map(|source| match recompress(source, config) {
            Ok(recompressed) => recompressed.bytes.len() as u64,
            Err(_) => source.bytes.len() as u64,
        })
        .sum();

    data_size + (data_size as f32 * PDF_OVERHEAD_FACTOR) as u64
}

/// Downscale to the width cap and re-encode as JPEG at the given quality.
fn recompress(source: &SourceImage, config: EncodeConfig) -> Result<SourceImage, EmbedError> {
    let decoded = image::load_from_memory(&source.bytes)
        .map_err(|e| EmbedError::Decode(e.to_string()))?;

    let mut flat = flatten_onto_white(&decoded);
    if flat.width() > config.max_width {
        let scale = config.max_width as f32 / flat.width() as f32;
        let new_height = ((flat.height() as f32 * scale).round() as u32).max(1);
        flat = imageops::resize(&flat, config.max_width, new_height, FilterType::Lanczos3);
    }

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, config.quality);
    DynamicImage::ImageRgb8(flat)
        .write_with_encoder(encoder)
        .map_err(|e| EmbedError::Decode(e.to_string()))?;
    if out.is_empty() {
        return Err(EmbedError::EmptyEncode);
    }

    Ok(SourceImage::with_media_type(
        source.file_name.clone(),
        "image/jpeg",
        out,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn noisy_png(width: u32, height: u32) -> SourceImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            // deterministic high-frequency pattern, compresses badly as PNG
            Rgb([
                ((x * 7 + y * 13) % 251) as u8,
                ((x * 31 + y * 3) % 241) as u8,
                ((x * 17 + y * 29) % 239) as u8,
            ])
        });
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        SourceImage::new("noise.png", out)
    }

    #[test]
    fn test_recompress_caps_width() {
        let source = noisy_png(1000, 400);
        let config = EncodeConfig { quality: 75, max_width: 500 };
        let recompressed = recompress(&source, config).unwrap();

        let decoded = image::load_from_memory(&recompressed.bytes).unwrap();
        assert_eq!(decoded.width(), 500);
        assert_eq!(decoded.height(), 200);
        assert_eq!(recompressed.media_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_recompress_leaves_small_images_unscaled() {
        let source = noisy_png(100, 80);
        let config = EncodeConfig { quality: 85, max_width: 1200 };
        let recompressed = recompress(&source, config).unwrap();

        let decoded = image::load_from_memory(&recompressed.bytes).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 80);
    }

    #[test]
    fn test_tight_budget_selects_aggressive_config() {
        let images = vec![noisy_png(1600, 1200)];
        let generous = choose_config(&images, 100 * 1024 * 1024);
        let tight = choose_config(&images, 10 * 1024);
        assert_eq!(generous.quality, 95);
        assert!(tight.quality < generous.quality);
    }

    #[test]
    fn test_undecodable_source_passes_through() {
        let garbage = SourceImage::new("weird.bin", vec![1, 2, 3, 4]);
        let out = fit_to_budget(&[garbage.clone()], 1024);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].bytes, garbage.bytes);
    }
}
