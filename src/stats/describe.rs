//! Per-location descriptive summary of a measured field.
//!
//! Sample standard deviation (denominator n − 1) and R-7
//! linear-interpolation quantiles, the defaults in R, Python and Excel.

use super::StatsError;
use crate::data::model::{Metric, ReadingSet};

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub location: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarise one field per location, in location order. Fails only on an
/// empty reading set.
pub fn describe_by_location(
    set: &ReadingSet,
    metric: Metric,
) -> Result<Vec<SummaryRow>, StatsError> {
    let groups = set.values_by_location(metric);
    if groups.is_empty() {
        return Err(StatsError::Empty);
    }
    Ok(groups
        .iter()
        .map(|(location, values)| describe(location, values))
        .collect())
}

/// Five-number summary plus count/mean/std for one non-empty group.
fn describe(location: &str, values: &[f64]) -> SummaryRow {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    SummaryRow {
        location: location.to_string(),
        count: values.len(),
        mean: mean(values),
        std: sample_std(values),
        min: sorted[0],
        q25: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q75: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    }
}

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (denominator n − 1). Returns 0.0 when there
/// are fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Quantile with R-7 linear interpolation. `q` is in [0, 1].
/// Returns 0.0 for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    quantile_sorted(&sorted, q)
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }
    // Fractional 0-based rank
    let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = rank - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}
