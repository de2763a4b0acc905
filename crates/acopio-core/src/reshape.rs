use crate::error::AcopioError;
use crate::model::{GlobalRecord, MergeStrategy, Metric};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// Column holding the region label in every wide source.
const REGION_COLUMN: &str = "Country/Region";

/// Fixed leading non-date columns (Province/State, Country/Region, Lat, Long).
const LEADING_COLUMNS: usize = 4;

/// Two-digit-year month/day/year format of the wide headers, e.g. "3/1/20".
const HEADER_DATE_FORMAT: &str = "%m/%d/%y";

/// The three wide time-series snapshots, already fetched or read from disk.
#[derive(Debug, Clone)]
pub struct GlobalSources {
    pub confirmed: String,
    pub deaths: String,
    pub recovered: String,
}

impl GlobalSources {
    fn get(&self, metric: Metric) -> &str {
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Deaths => &self.deaths,
            Metric::Recovered => &self.recovered,
        }
    }
}

/// A date column of the wide layout: the raw header string and its parsed
/// date. Overlay matches columns per source by the raw header string, not by
/// position.
#[derive(Debug, Clone)]
pub struct DateColumn {
    pub header: String,
    pub date: NaiveDate,
}

/// Diagnostics for one reshape run.
///
/// Regions appearing in the deaths/recovered sources but absent from the
/// scouted confirmed set are not added to the skeleton; they are tallied
/// here instead of disappearing silently.
#[derive(Debug, Clone, Default)]
pub struct ReshapeSummary {
    pub rows: usize,
    pub dropped_cells: usize,
    pub unknown_regions: BTreeSet<String>,
}

/// Scout the header of the confirmed source for the date columns.
pub fn scout_dates(csv_text: &str) -> Result<Vec<DateColumn>, AcopioError> {
    let mut reader = reader_for(csv_text);
    let headers = reader.headers()?.clone();

    let mut dates = Vec::new();
    for header in headers.iter().skip(LEADING_COLUMNS) {
        let date = NaiveDate::parse_from_str(header, HEADER_DATE_FORMAT).map_err(|e| {
            AcopioError::ParseError(format!("invalid date header '{header}': {e}"))
        })?;
        dates.push(DateColumn {
            header: header.to_string(),
            date,
        });
    }

    if dates.is_empty() {
        return Err(AcopioError::ParseError(
            "confirmed source has no date columns".into(),
        ));
    }

    Ok(dates)
}

/// Scout all rows of the confirmed source for the distinct region labels,
/// sorted ascending.
pub fn scout_regions(csv_text: &str) -> Result<Vec<String>, AcopioError> {
    let mut reader = reader_for(csv_text);
    let region_idx = region_column_index(&reader.headers()?.clone())?;

    let mut regions = BTreeSet::new();
    for result in reader.records() {
        let record = result?;
        let region = record.get(region_idx).ok_or_else(|| {
            AcopioError::ParseError("row is missing the region column".into())
        })?;
        regions.insert(region.to_string());
    }

    Ok(regions.into_iter().collect())
}

/// Build the zero-filled cartesian product of dates × regions.
///
/// The composite key keeps the map ordered by (date, region), which is also
/// the output order.
fn build_skeleton(
    dates: &[DateColumn],
    regions: &[String],
) -> BTreeMap<(NaiveDate, String), [u64; 3]> {
    let mut skeleton = BTreeMap::new();
    for column in dates {
        for region in regions {
            skeleton.insert((column.date, region.clone()), [0u64; 3]);
        }
    }
    skeleton
}

/// Overlay one metric's wide source onto the skeleton.
///
/// Matching is exact: parsed date and verbatim region label. A value that
/// fails integer parsing is fatal for the run.
fn overlay(
    skeleton: &mut BTreeMap<(NaiveDate, String), [u64; 3]>,
    csv_text: &str,
    dates: &[DateColumn],
    metric: Metric,
    strategy: MergeStrategy,
    summary: &mut ReshapeSummary,
) -> Result<(), AcopioError> {
    let mut reader = reader_for(csv_text);
    let headers = reader.headers()?.clone();
    let region_idx = region_column_index(&headers)?;

    let header_map: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim_start_matches('\u{feff}'), idx))
        .collect();

    let slot = metric.index();
    for result in reader.records() {
        let record = result?;
        let region = record.get(region_idx).ok_or_else(|| {
            AcopioError::ParseError(format!("{metric} row is missing the region column"))
        })?;

        for column in dates {
            let col_idx = *header_map.get(column.header.as_str()).ok_or_else(|| {
                AcopioError::ParseError(format!(
                    "{metric} source is missing date column '{}'",
                    column.header
                ))
            })?;
            let raw = record.get(col_idx).unwrap_or("");
            let value: u64 = raw.trim().parse().map_err(|_| {
                AcopioError::ParseError(format!(
                    "invalid {metric} value '{raw}' for '{region}' on {}",
                    column.header
                ))
            })?;

            match skeleton.get_mut(&(column.date, region.to_string())) {
                Some(cell) => match strategy {
                    MergeStrategy::Sum => cell[slot] += value,
                    MergeStrategy::Overwrite => cell[slot] = value,
                },
                None => {
                    summary.dropped_cells += 1;
                    summary.unknown_regions.insert(region.to_string());
                }
            }
        }
    }

    Ok(())
}

/// Reshape the three wide sources into one long table.
///
/// The skeleton is scouted from the confirmed source, then each metric is
/// overlaid in turn; combinations absent from a given source keep zero for
/// that metric.
pub fn reshape(
    sources: &GlobalSources,
    strategy: MergeStrategy,
) -> Result<(Vec<GlobalRecord>, ReshapeSummary), AcopioError> {
    let dates = scout_dates(&sources.confirmed)?;
    let regions = scout_regions(&sources.confirmed)?;
    let mut skeleton = build_skeleton(&dates, &regions);

    let mut summary = ReshapeSummary::default();
    for metric in Metric::ALL {
        overlay(
            &mut skeleton,
            sources.get(metric),
            &dates,
            metric,
            strategy,
            &mut summary,
        )?;
    }

    let records: Vec<GlobalRecord> = skeleton
        .into_iter()
        .map(|((isodate, country), cell)| GlobalRecord {
            isodate,
            country,
            confirmed: cell[0],
            deaths: cell[1],
            recovered: cell[2],
        })
        .collect();
    summary.rows = records.len();

    Ok((records, summary))
}

/// Write the long table as a comma-delimited UTF-8 file with a header row.
pub fn write_global_csv(path: &Path, records: &[GlobalRecord]) -> Result<(), AcopioError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["isodate", "country", "confirmed", "deaths", "recovered"])?;
    for record in records {
        writer.write_record([
            record.isodate.format("%Y-%m-%d").to_string(),
            record.country.clone(),
            record.confirmed.to_string(),
            record.deaths.to_string(),
            record.recovered.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn reader_for(csv_text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes())
}

fn region_column_index(headers: &csv::StringRecord) -> Result<usize, AcopioError> {
    headers
        .iter()
        .position(|name| name.trim_start_matches('\u{feff}') == REGION_COLUMN)
        .ok_or_else(|| {
            AcopioError::ParseError(format!("missing required column '{REGION_COLUMN}'"))
        })
}
