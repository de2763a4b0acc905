use acopio_core::error::AcopioError;
use acopio_core::fetch::{self, Fetcher};
use acopio_core::model::{MergeStrategy, Metric};
use acopio_core::reshape::{self, GlobalSources};
use std::path::{Path, PathBuf};

pub fn run(out: PathBuf, merge: &str, snapshot_dir: Option<PathBuf>) -> Result<(), AcopioError> {
    let strategy = MergeStrategy::from_str_loose(merge).ok_or_else(|| {
        AcopioError::ParseError(format!(
            "unknown merge strategy '{merge}' (expected 'sum' or 'overwrite')"
        ))
    })?;

    let sources = match snapshot_dir {
        Some(dir) => load_snapshot(&dir)?,
        None => download_sources()?,
    };

    let (records, summary) = reshape::reshape(&sources, strategy)?;
    reshape::write_global_csv(&out, &records)?;

    eprintln!("Wrote {} rows to {}", summary.rows, out.display());
    if summary.dropped_cells > 0 {
        let regions: Vec<&str> = summary.unknown_regions.iter().map(String::as_str).collect();
        eprintln!(
            "  warning: dropped {} cell(s) for region(s) absent from the confirmed source: {}",
            summary.dropped_cells,
            regions.join(", ")
        );
    }

    Ok(())
}

fn download_sources() -> Result<GlobalSources, AcopioError> {
    let fetcher = Fetcher::new();
    Ok(GlobalSources {
        confirmed: download(&fetcher, Metric::Confirmed, fetch::CONFIRMED_URL)?,
        deaths: download(&fetcher, Metric::Deaths, fetch::DEATHS_URL)?,
        recovered: download(&fetcher, Metric::Recovered, fetch::RECOVERED_URL)?,
    })
}

fn download(fetcher: &Fetcher, metric: Metric, url: &str) -> Result<String, AcopioError> {
    eprintln!("Downloading {metric} time series...");
    fetcher.text(url)
}

fn load_snapshot(dir: &Path) -> Result<GlobalSources, AcopioError> {
    Ok(GlobalSources {
        confirmed: std::fs::read_to_string(dir.join("confirmed.csv"))?,
        deaths: std::fs::read_to_string(dir.join("deaths.csv"))?,
        recovered: std::fs::read_to_string(dir.join("recovered.csv"))?,
    })
}
