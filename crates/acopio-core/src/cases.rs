use crate::error::AcopioError;
use crate::extraction::PageContent;
use crate::model::CaseRecord;
use crate::profile::schema::ExtractionProfile;
use chrono::Duration;
use std::path::Path;

/// Result of running the token-stream extractor over a bulletin.
///
/// `discarded_groups` and `repaired_dates` are diagnostic counts; without
/// them, upstream layout drift is invisible.
#[derive(Debug, Clone)]
pub struct CaseExtraction {
    pub records: Vec<CaseRecord>,
    pub pages: usize,
    pub discarded_groups: usize,
    pub repaired_dates: usize,
}

/// Apply the profile's ordered find/replace pairs to raw page text.
///
/// Each pair corrects a known artifact where a multi-word place name was
/// split by a stray line break and space.
pub fn repair_text(text: &str, profile: &ExtractionProfile) -> String {
    let mut repaired = text.to_string();
    for repair in &profile.repairs {
        repaired = repaired.replace(&repair.find, &repair.replace);
    }
    repaired
}

/// Split repaired page text into tokens.
///
/// Tokens that are empty or a single space are layout padding, not data.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|t| !t.is_empty() && *t != " ")
        .map(|t| t.replace(['\n', '\r'], ""))
        .collect()
}

/// Regroup page tokens into fixed-width case records.
///
/// Walks each page's token list in non-overlapping windows of
/// `profile.columns`; only complete windows become records, and the short
/// trailing window of a page (if any) is discarded and counted. The column
/// headers repeat on no page but the first, so only page 1 skips
/// `profile.header_tokens` leading tokens.
pub fn extract_cases(
    pages: &[PageContent],
    profile: &ExtractionProfile,
) -> Result<CaseExtraction, AcopioError> {
    let mut records = Vec::new();
    let mut discarded_groups = 0;
    let mut repaired_dates = 0;

    for page in pages {
        let repaired = repair_text(&page.text, profile);
        let tokens = tokenize(&repaired);

        let start = if page.page_number == 1 {
            profile.header_tokens
        } else {
            0
        };
        let body = tokens.get(start..).unwrap_or(&[]);

        let mut groups = body.chunks_exact(profile.columns);
        for group in &mut groups {
            let mut fields = group.to_vec();
            if let Some(fixed) = repair_serial_date(&fields[profile.date_field], profile)? {
                fields[profile.date_field] = fixed;
                repaired_dates += 1;
            }
            records.push(CaseRecord { fields });
        }
        if !groups.remainder().is_empty() {
            discarded_groups += 1;
        }
    }

    Ok(CaseExtraction {
        records,
        pages: pages.len(),
        discarded_groups,
        repaired_dates,
    })
}

/// Repair a misparsed date rendered as a day-offset serial number.
///
/// A date token of exactly `serial_date_len` characters is taken to be a
/// serial: that many days past the profile epoch. Returns `Ok(None)` when
/// the token is not serial-shaped; a serial-shaped token that is not an
/// integer is an undecodable date and fatal.
fn repair_serial_date(
    token: &str,
    profile: &ExtractionProfile,
) -> Result<Option<String>, AcopioError> {
    if token.chars().count() != profile.serial_date_len {
        return Ok(None);
    }

    let days: i64 = token.parse().map_err(|_| {
        AcopioError::ParseError(format!("undecodable date token '{token}'"))
    })?;

    let date = profile.serial_epoch + Duration::days(days);
    Ok(Some(date.format(&profile.date_output_format).to_string()))
}

/// Write accepted records as a comma-delimited UTF-8 file with the
/// profile's header row.
pub fn write_cases_csv(
    path: &Path,
    records: &[CaseRecord],
    profile: &ExtractionProfile,
) -> Result<(), AcopioError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&profile.output_header)?;
    for record in records {
        writer.write_record(&record.fields)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin::default_profile;

    fn page(number: usize, text: &str) -> PageContent {
        PageContent {
            page_number: number,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_repair_rejoins_split_place_name() {
        let profile = default_profile().unwrap();
        let tokens = tokenize(&repair_text("41\nCIUDAD DE\n \nMÉXICO\nM\n", &profile));
        assert_eq!(tokens, vec!["41", "CIUDAD DE MÉXICO", "M"]);
    }

    #[test]
    fn test_tokenize_drops_padding_tokens() {
        let tokens = tokenize("a\n \n\nb\n \nc\n");
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_grouping_accepts_floor_of_token_count() {
        let profile = default_profile().unwrap();
        // 14 tokens on a non-first page: 2 records, 2 tokens discarded.
        let text = "1\nJALISCO\nM\n30\n13/03/2020\nConfirmado\n\
                    2\nSONORA\nF\n41\n14/03/2020\nConfirmado\n\
                    3\nCOLIMA\n";
        let extraction = extract_cases(&[page(2, text)], &profile).unwrap();
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.discarded_groups, 1);
        assert_eq!(extraction.records[0].fields[1], "JALISCO");
        assert_eq!(extraction.records[1].fields[0], "2");
    }

    #[test]
    fn test_first_page_skips_header_tokens_only_once() {
        let profile = default_profile().unwrap();
        let header = "n\nFecha del corte\nnumero\nestado\nsexo\nedad\ninicio\nestatus\nprocedencia\n";
        let body = "1\nJALISCO\nM\n30\n13/03/2020\nConfirmado\n";
        let pages = [
            page(1, &format!("{header}{body}")),
            page(2, body),
        ];
        let extraction = extract_cases(&pages, &profile).unwrap();
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.records[0].fields[0], "1");
        assert_eq!(extraction.discarded_groups, 0);
    }

    #[test]
    fn test_first_page_shorter_than_header_yields_nothing() {
        let profile = default_profile().unwrap();
        let extraction = extract_cases(&[page(1, "a\nb\nc\n")], &profile).unwrap();
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.discarded_groups, 0);
    }

    #[test]
    fn test_serial_date_repaired_against_epoch() {
        let profile = default_profile().unwrap();
        // 1900-01-01 + 43901 days = 2020-03-13.
        let fixed = repair_serial_date("43901", &profile).unwrap();
        assert_eq!(fixed.as_deref(), Some("13/03/2020"));
    }

    #[test]
    fn test_full_date_token_left_alone() {
        let profile = default_profile().unwrap();
        assert!(repair_serial_date("13/03/2020", &profile).unwrap().is_none());
    }

    #[test]
    fn test_serial_shaped_non_integer_is_fatal() {
        let profile = default_profile().unwrap();
        assert!(repair_serial_date("1/3/2", &profile).is_err());
    }

    #[test]
    fn test_record_date_field_gets_repaired_and_counted() {
        let profile = default_profile().unwrap();
        let text = "1\nJALISCO\nM\n30\n43901\nConfirmado\n";
        let extraction = extract_cases(&[page(2, text)], &profile).unwrap();
        assert_eq!(extraction.records[0].fields[4], "13/03/2020");
        assert_eq!(extraction.repaired_dates, 1);
    }
}
