/// Default page margin in millimetres
pub const DEFAULT_PAGE_MARGIN_MM: f32 = 10.0;

/// Conversion factor from millimetres to PDF points
pub const MM_TO_PT: f32 = 2.834_645_7;

/// Deadline for the raster decode fallback, per image, in seconds
pub const DECODE_TIMEOUT_SECS: u64 = 15;

/// Default document title when none is derivable
pub const DEFAULT_TITLE: &str = "Images";

/// Estimated PDF structure overhead on top of embedded image data
pub const PDF_OVERHEAD_FACTOR: f32 = 0.15;
