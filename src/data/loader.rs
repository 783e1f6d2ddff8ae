use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{ensure, Context, Result};

use super::model::{ComparisonReading, Reading};

// ---------------------------------------------------------------------------
// Offline comparison dataset
// ---------------------------------------------------------------------------

/// Load the offline box-plot comparison dataset.
///
/// Expected CSV layout (header row, one sample per row):
/// `location,tempf,humidityi,ventilator,Outside-humidity`
pub fn load_comparison_csv(path: &Path) -> Result<Vec<ComparisonReading>> {
    let file = File::open(path)
        .with_context(|| format!("opening comparison dataset {}", path.display()))?;
    parse_comparison(file)
        .with_context(|| format!("reading comparison dataset {}", path.display()))
}

pub fn parse_comparison<R: Read>(reader: R) -> Result<Vec<ComparisonReading>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for (row, result) in csv_reader.deserialize().enumerate() {
        let record: ComparisonReading = result.with_context(|| format!("CSV row {row}"))?;
        rows.push(record);
    }
    ensure!(!rows.is_empty(), "comparison dataset has no rows");
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Readings cache
// ---------------------------------------------------------------------------

/// Write the fetched readings back out as a CSV cache. The cache is
/// never read by the dashboard itself; it exists for offline analysis.
pub fn write_cache_csv(path: &Path, readings: &[Reading]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating cache file {}", path.display()))?;
    for reading in readings {
        writer.serialize(reading)?;
    }
    writer.flush().context("flushing cache file")?;
    Ok(())
}
