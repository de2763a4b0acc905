//! Integration tests for the extract_case_report() end-to-end pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageContent without invoking
//! pdftotext, so these tests run without poppler-utils.

use acopio_core::cases::write_cases_csv;
use acopio_core::error::AcopioError;
use acopio_core::extract_case_report;
use acopio_core::extraction::{PageContent, PdfExtractor};
use acopio_core::profile::builtin::default_profile;

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, AcopioError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn page(number: usize, text: &str) -> PageContent {
    PageContent {
        page_number: number,
        text: text.to_string(),
    }
}

const HEADER: &str = "Casos Confirmados\nCorte al 13/03/2020\nN\nEstado\nSexo\nEdad\nFecha de inicio\nEstatus\nProcedencia\n";

// ---------------------------------------------------------------------------
// Test 1: two-page bulletin, header skipped on the first page only
// ---------------------------------------------------------------------------
#[test]
fn two_page_bulletin_yields_all_records() {
    let profile = default_profile().unwrap();
    let extractor = MockExtractor {
        pages: vec![
            page(
                1,
                &format!(
                    "{HEADER}\
                     1\nJALISCO\nM\n30\n13/03/2020\nConfirmado\n\
                     2\nSONORA\nF\n41\n12/03/2020\nConfirmado\n"
                ),
            ),
            page(2, "3\nYUCATÁN\nF\n52\n11/03/2020\nConfirmado\n"),
        ],
    };

    let extraction = extract_case_report(&[], &extractor, &profile).unwrap();

    assert_eq!(extraction.pages, 2);
    assert_eq!(extraction.records.len(), 3);
    assert_eq!(extraction.discarded_groups, 0);
    assert_eq!(extraction.repaired_dates, 0);
    assert_eq!(
        extraction.records[2].fields,
        vec!["3", "YUCATÁN", "F", "52", "11/03/2020", "Confirmado"]
    );
}

// ---------------------------------------------------------------------------
// Test 2: split place name repaired before grouping
// ---------------------------------------------------------------------------
#[test]
fn split_place_name_is_rejoined() {
    let profile = default_profile().unwrap();
    let extractor = MockExtractor {
        pages: vec![page(
            2,
            "4\nCIUDAD DE\n \nMÉXICO\nM\n71\n10/03/2020\nConfirmado\n",
        )],
    };

    let extraction = extract_case_report(&[], &extractor, &profile).unwrap();

    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.records[0].fields[1], "CIUDAD DE MÉXICO");
}

// ---------------------------------------------------------------------------
// Test 3: serial date token converted against the epoch
// ---------------------------------------------------------------------------
#[test]
fn serial_date_token_is_converted() {
    let profile = default_profile().unwrap();
    let extractor = MockExtractor {
        pages: vec![page(2, "5\nCOLIMA\nF\n28\n43901\nConfirmado\n")],
    };

    let extraction = extract_case_report(&[], &extractor, &profile).unwrap();

    assert_eq!(extraction.records[0].fields[4], "13/03/2020");
    assert_eq!(extraction.repaired_dates, 1);
}

// ---------------------------------------------------------------------------
// Test 4: short trailing group discarded and counted
// ---------------------------------------------------------------------------
#[test]
fn trailing_partial_group_is_discarded_and_counted() {
    let profile = default_profile().unwrap();
    let extractor = MockExtractor {
        pages: vec![page(
            2,
            "6\nNUEVO LEÓN\nM\n19\n09/03/2020\nConfirmado\n7\nTABASCO\nM\n",
        )],
    };

    let extraction = extract_case_report(&[], &extractor, &profile).unwrap();

    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.discarded_groups, 1);
}

// ---------------------------------------------------------------------------
// Test 5: blank document is an error
// ---------------------------------------------------------------------------
#[test]
fn blank_document_returns_parse_error() {
    let profile = default_profile().unwrap();
    let extractor = MockExtractor {
        pages: vec![page(1, " \n")],
    };

    let result = extract_case_report(&[], &extractor, &profile);

    assert!(matches!(result, Err(AcopioError::ParseError(_))));
}

// ---------------------------------------------------------------------------
// Test 6: written CSV carries the Spanish header row and record order
// ---------------------------------------------------------------------------
#[test]
fn written_csv_matches_output_contract() {
    let profile = default_profile().unwrap();
    let extractor = MockExtractor {
        pages: vec![page(
            2,
            "1\nJALISCO\nM\n30\n13/03/2020\nConfirmado\n\
             2\nQUINTANA\n \nROO\nF\n44\n43901\nSospechoso\n",
        )],
    };

    let extraction = extract_case_report(&[], &extractor, &profile).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casos_confirmados.csv");
    write_cases_csv(&path, &extraction.records, &profile).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "numero_caso,estado,sexo,edad,fecha_inicio_sintomas,estatus"
    );
    assert_eq!(lines[1], "1,JALISCO,M,30,13/03/2020,Confirmado");
    assert_eq!(lines[2], "2,QUINTANA ROO,F,44,13/03/2020,Sospechoso");
    assert_eq!(lines.len(), 3);
}
