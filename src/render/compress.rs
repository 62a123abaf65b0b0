//! PDF compression helper
//!
//! Uses lopdf to compress content streams after printpdf serializes the
//! document. Image XObjects are already compressed by their own codecs;
//! this pass picks up the page content and structure streams.

use std::io::Cursor;

/// Compress PDF streams to reduce file size.
pub fn compress_pdf(uncompressed: Vec<u8>) -> Result<Vec<u8>, String> {
    let mut doc = lopdf::Document::load_mem(&uncompressed)
        .map_err(|e| format!("Failed to parse PDF for compression: {}", e))?;

    doc.compress();

    let mut output = Cursor::new(Vec::new());
    doc.save_to(&mut output)
        .map_err(|e| format!("Failed to save compressed PDF: {}", e))?;

    Ok(output.into_inner())
}
