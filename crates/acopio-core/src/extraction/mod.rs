pub mod pdftotext;

use crate::error::AcopioError;

/// Text content extracted from a single page of a PDF.
///
/// The text is kept unsplit because the repair pass must see artifacts that
/// span line breaks (e.g. a place name broken across three lines).
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, AcopioError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
