use crate::cli::{Args, Orientation};

use super::defaults::*;

/// Runtime settings for PDF generation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Named page size, resolved by the geometry resolver.
    /// Unknown names resolve to A4.
    pub page_size: String,
    pub orientation: Orientation,
    /// Page margin in PDF points, applied on all four sides
    pub margin_pt: f32,
    /// Document title written to the PDF metadata
    pub title: String,
    /// Optional output size budget in bytes; enables the re-encode ladder
    pub max_size_bytes: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: "a4".to_string(),
            orientation: Orientation::Portrait,
            margin_pt: DEFAULT_PAGE_MARGIN_MM * MM_TO_PT,
            title: DEFAULT_TITLE.to_string(),
            max_size_bytes: None,
        }
    }
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_args(args: &Args) -> Self {
        let title = args.title.clone().unwrap_or_else(|| {
            args.output_path()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string())
        });

        Self {
            page_size: args.page_size.name().to_string(),
            orientation: args.orientation,
            margin_pt: args.margin * MM_TO_PT,
            title,
            max_size_bytes: args
                .max_size
                .map(|mb| (mb * 1024.0 * 1024.0) as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_margin_is_ten_millimetres() {
        let settings = Settings::default();
        assert!((settings.margin_pt - 28.346).abs() < 0.01);
    }
}
