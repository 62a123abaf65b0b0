//! Named page sizes and page geometry resolution.

use crate::cli::Orientation;

/// A4 portrait dimensions in PDF points
const A4_PT: (f32, f32) = (595.0, 842.0);
/// US Letter portrait dimensions in PDF points
const LETTER_PT: (f32, f32) = (612.0, 792.0);
/// US Legal portrait dimensions in PDF points
const LEGAL_PT: (f32, f32) = (612.0, 1008.0);
/// A3 portrait dimensions in PDF points
const A3_PT: (f32, f32) = (842.0, 1191.0);

/// Page dimensions in PDF points, derived once per document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
}

/// Resolve a named page size and orientation to point dimensions.
///
/// Unknown names resolve to A4. This is a documented default, not an
/// error: the CLI only offers the known names, and library callers get
/// the same lenient behavior the original tool had.
pub fn resolve_geometry(page_size: &str, orientation: Orientation) -> PageGeometry {
    let (width, height) = match page_size.to_ascii_lowercase().as_str() {
        "a4" => A4_PT,
        "letter" => LETTER_PT,
        "legal" => LEGAL_PT,
        "a3" => A3_PT,
        other => {
            log::debug!("Unknown page size {:?}, using A4", other);
            A4_PT
        }
    };

    match orientation {
        Orientation::Portrait => PageGeometry { width, height },
        Orientation::Landscape => PageGeometry {
            width: height,
            height: width,
        },
    }
}
