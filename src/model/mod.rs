pub mod outcome;
pub mod source;

pub use outcome::{BatchOutcome, ImageFailure};
pub use source::{is_supported_image, SourceImage, SUPPORTED_EXTENSIONS};
