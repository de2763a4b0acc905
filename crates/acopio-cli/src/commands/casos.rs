use acopio_core::cases::write_cases_csv;
use acopio_core::error::AcopioError;
use acopio_core::extraction::pdftotext::PdftotextExtractor;
use acopio_core::fetch::Fetcher;
use acopio_core::profile;
use std::path::PathBuf;

pub fn run(
    out: PathBuf,
    pdf: Option<PathBuf>,
    profile_file: Option<PathBuf>,
    save_pdf: Option<PathBuf>,
) -> Result<(), AcopioError> {
    let profile = match profile_file {
        Some(path) => profile::load_profile(&path)?,
        None => profile::builtin::default_profile()?,
    };

    let pdf_bytes = match pdf {
        Some(path) => std::fs::read(&path)?,
        None => {
            eprintln!("Downloading PDF file...");
            let bytes = Fetcher::new().case_report(&profile)?;
            eprintln!("PDF file downloaded.");
            bytes
        }
    };

    if let Some(path) = save_pdf {
        std::fs::write(&path, &pdf_bytes)?;
        eprintln!("Saved PDF to {}", path.display());
    }

    let extractor = PdftotextExtractor::new();
    let extraction = acopio_core::extract_case_report(&pdf_bytes, &extractor, &profile)?;

    eprintln!(
        "Processed {} page(s): {} record(s), {} date(s) repaired",
        extraction.pages,
        extraction.records.len(),
        extraction.repaired_dates
    );
    if extraction.discarded_groups > 0 {
        eprintln!(
            "  warning: discarded {} incomplete token group(s)",
            extraction.discarded_groups
        );
    }

    write_cases_csv(&out, &extraction.records, &profile)?;
    eprintln!("PDF converted, output written to {}", out.display());

    Ok(())
}
