pub mod cases;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod model;
pub mod profile;
pub mod reshape;

use cases::CaseExtraction;
use error::AcopioError;
use extraction::PdfExtractor;
use profile::schema::ExtractionProfile;

/// Main API entry point for the bulletin: recover case records from PDF bytes.
///
/// Extracts raw text per page, then runs the profile-driven token pipeline
/// (repair, tokenize, fixed-width grouping, serial-date repair) over it.
pub fn extract_case_report(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    profile: &ExtractionProfile,
) -> Result<CaseExtraction, AcopioError> {
    let pages = extractor.extract_pages(pdf_bytes)?;

    if pages.iter().all(|p| p.text.trim().is_empty()) {
        return Err(AcopioError::ParseError(
            "no text content found in PDF".into(),
        ));
    }

    cases::extract_cases(&pages, profile)
}
