//! PDF generation modules

pub mod compress;
pub mod document;
pub mod embed;
pub mod geometry;
pub mod layer;
pub mod layout;
pub mod optimize;

// Re-export commonly used items for convenience
pub use document::{generate_pdf, DocumentRenderer};
pub use embed::{normalize, EmbeddedImage};
pub use geometry::{resolve_geometry, PageGeometry};
pub use layout::{compute_placement, Placement};
