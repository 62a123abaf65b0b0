use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;

use crate::config::defaults::DEFAULT_PAGE_MARGIN_MM;
use crate::model::is_supported_image;

#[derive(Parser, Debug)]
#[command(name = "img-to-pdf")]
#[command(
    author,
    version,
    about = "Convert batches of images into PDF documents, one page per image"
)]
pub struct Args {
    /// Input image files, or directories to scan for images
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path (defaults to first input with .pdf extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Page size
    #[arg(short = 's', long, value_enum, default_value = "a4")]
    pub page_size: PageSize,

    /// Page orientation
    #[arg(long, value_enum, default_value = "portrait")]
    pub orientation: Orientation,

    /// Page margin in millimetres
    #[arg(short, long, default_value_t = DEFAULT_PAGE_MARGIN_MM)]
    pub margin: f32,

    /// Target maximum output size in megabytes (re-encodes images to fit)
    #[arg(long, value_name = "MB")]
    pub max_size: Option<f32>,

    /// Document title (defaults to the output file stem)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PageSize {
    A4,
    Letter,
    Legal,
    A3,
}

impl PageSize {
    /// The name understood by the geometry resolver
    pub fn name(&self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
            PageSize::Legal => "legal",
            PageSize::A3 => "a3",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Args {
    /// Get the output path, defaulting to the first input with a .pdf
    /// extension (a directory input `photos/` becomes `photos.pdf`)
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.inputs[0].with_extension("pdf"))
    }
}

/// Expand the input arguments into an ordered list of image files.
///
/// Files are taken as given, whatever their extension - the fallback
/// embedding strategy may still handle them. Directories are scanned one
/// level deep for supported extensions and sorted case-insensitively by
/// file name, which fixes the page order of the output.
pub fn collect_image_paths(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file() && is_supported_image(path))
                .collect();
            sort_by_file_name(&mut entries);
            if entries.is_empty() {
                log::warn!("No supported images found in {}", input.display());
            }
            paths.extend(entries);
        } else {
            paths.push(input.clone());
        }
    }

    Ok(paths)
}

/// Sort paths case-insensitively by file name
pub fn sort_by_file_name(paths: &mut [PathBuf]) {
    paths.sort_by_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_defaults_to_first_input() {
        let args = Args {
            inputs: vec![PathBuf::from("scans/page1.jpg")],
            output: None,
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin: DEFAULT_PAGE_MARGIN_MM,
            max_size: None,
            title: None,
            verbose: 0,
        };
        assert_eq!(args.output_path(), PathBuf::from("scans/page1.pdf"));
    }

    #[test]
    fn test_output_path_for_directory_input() {
        let args = Args {
            inputs: vec![PathBuf::from("holiday_photos")],
            output: None,
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin: DEFAULT_PAGE_MARGIN_MM,
            max_size: None,
            title: None,
            verbose: 0,
        };
        assert_eq!(args.output_path(), PathBuf::from("holiday_photos.pdf"));
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let mut paths = vec![
            PathBuf::from("dir/B.png"),
            PathBuf::from("dir/a.png"),
            PathBuf::from("dir/C.png"),
        ];
        sort_by_file_name(&mut paths);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("dir/a.png"),
                PathBuf::from("dir/B.png"),
                PathBuf::from("dir/C.png"),
            ]
        );
    }

    #[test]
    fn test_page_size_names() {
        assert_eq!(PageSize::A4.name(), "a4");
        assert_eq!(PageSize::Legal.name(), "legal");
    }
}
