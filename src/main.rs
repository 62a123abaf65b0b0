use anyhow::{Context, Result};
use clap::Parser;
use std::fs;

use img_to_pdf::cli::{collect_image_paths, Args};
use img_to_pdf::config::Settings;
use img_to_pdf::model::SourceImage;
use img_to_pdf::render::generate_pdf;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    // Expand directories and order the batch
    let paths = collect_image_paths(&args.inputs)
        .with_context(|| "Failed to scan input paths")?;

    if paths.is_empty() {
        anyhow::bail!("No image files to process");
    }

    log::info!("Processing {} image files", paths.len());

    // Read input files
    let mut images = Vec::with_capacity(paths.len());
    for path in &paths {
        let image = SourceImage::from_path(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        images.push(image);
    }

    // Build settings from CLI args
    let settings = Settings::from_args(&args);

    // Generate PDF
    let outcome = generate_pdf(&images, &settings).with_context(|| "Failed to generate PDF")?;

    // Write output
    let output_path = args.output_path();
    fs::write(&output_path, &outcome.pdf_bytes)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    println!(
        "Successfully wrote {} pages to {}",
        outcome.page_count,
        output_path.display()
    );

    if !outcome.failures.is_empty() {
        println!(
            "{} of {} images could not be embedded:",
            outcome.failures.len(),
            outcome.attempted()
        );
        for failure in &outcome.failures {
            println!("  {}: {}", failure.file_name, failure.reason);
        }
    }

    Ok(())
}
