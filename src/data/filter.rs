use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{Metric, ReadingSet};

// ---------------------------------------------------------------------------
// Filter state: the current values of the interactive controls
// ---------------------------------------------------------------------------

/// Current control values. Owned by the view, mutated only through user
/// interaction; the loader and the statistics pass never see it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Checklist selection. Empty means nothing is shown.
    pub locations: BTreeSet<String>,
    /// Inclusive start of the date range.
    pub start: NaiveDate,
    /// Inclusive end of the date range.
    pub end: NaiveDate,
    /// y-axis choice for the interactive charts.
    pub metric: Metric,
}

impl FilterState {
    /// Initial state: every location selected, the date range spanning the
    /// dataset, temperature on the y axis.
    pub fn from_dataset(set: &ReadingSet) -> Self {
        let (start, end) = set
            .date_bounds()
            .unwrap_or((NaiveDate::default(), NaiveDate::default()));
        FilterState {
            locations: set.locations.clone(),
            start,
            end,
            metric: Metric::Temperature,
        }
    }
}

/// Indices of readings passing the current filters: location selected in
/// the checklist and calendar date within `[start, end]`, both bounds
/// inclusive.
pub fn filtered_indices(set: &ReadingSet, filter: &FilterState) -> Vec<usize> {
    set.readings
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            let date = r.time.date_naive();
            filter.locations.contains(&r.location) && date >= filter.start && date <= filter.end
        })
        .map(|(i, _)| i)
        .collect()
}
