//! Image placement within a page.

use crate::error::RenderError;

use super::geometry::PageGeometry;

/// The box an image occupies on a page, in PDF points.
///
/// Computed once per image and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The page area left after subtracting the margin on all four sides.
///
/// Fails if the margin eats the whole page; the batch driver calls this
/// before creating any page so a bad configuration fails fast.
pub fn printable_area(page: PageGeometry, margin_pt: f32) -> Result<(f32, f32), RenderError> {
    let available_width = page.width - 2.0 * margin_pt;
    let available_height = page.height - 2.0 * margin_pt;

    if available_width <= 0.0 || available_height <= 0.0 {
        return Err(RenderError::InvalidGeometry {
            page_width: page.width,
            page_height: page.height,
            margin_pt,
        });
    }

    Ok((available_width, available_height))
}

/// Fit an image into the printable area, preserving its aspect ratio and
/// centering it on both axes.
///
/// `image_width` and `image_height` are intrinsic pixel dimensions; the
/// normalizer guarantees they are positive.
pub fn compute_placement(
    page: PageGeometry,
    margin_pt: f32,
    image_width: f32,
    image_height: f32,
) -> Result<Placement, RenderError> {
    let (available_width, available_height) = printable_area(page, margin_pt)?;

    let image_aspect = image_width / image_height;
    let available_aspect = available_width / available_height;

    let (width, height) = if image_aspect > available_aspect {
        // relatively wider than the printable area: width is the limit
        (available_width, available_width / image_aspect)
    } else {
        (available_height * image_aspect, available_height)
    };

    Ok(Placement {
        x: (page.width - width) / 2.0,
        y: (page.height - height) / 2.0,
        width,
        height,
    })
}
