//! Batch conversion results.

/// A single image that could not be embedded, with the reason.
#[derive(Debug, Clone)]
pub struct ImageFailure {
    pub file_name: String,
    pub reason: String,
}

/// Result record for a whole batch conversion.
///
/// Failures are kept in input order; the page count equals the number of
/// images that embedded successfully.
#[derive(Debug)]
pub struct BatchOutcome {
    pub pdf_bytes: Vec<u8>,
    pub page_count: usize,
    pub failures: Vec<ImageFailure>,
}

impl BatchOutcome {
    /// Total number of images the batch attempted.
    pub fn attempted(&self) -> usize {
        self.page_count + self.failures.len()
    }
}
