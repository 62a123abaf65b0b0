pub mod args;

pub use args::{collect_image_paths, Args, Orientation, PageSize};
