/// Summary statistics computed once at startup.
///
/// Both tables describe the temperature field: a per-location descriptive
/// summary and a pairwise mean comparison (Tukey HSD). They are pure
/// functions of the reading set and never change while the UI is serving.
pub mod describe;
pub mod tukey;

use thiserror::Error;

use crate::data::model::{Metric, ReadingSet};
use describe::SummaryRow;
use tukey::PairwiseComparison;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("no readings to summarise")]
    Empty,
    #[error("pairwise comparison needs at least two locations, found {0}")]
    NotEnoughGroups(usize),
    #[error("pairwise comparison supports at most 10 locations, found {0}")]
    TooManyGroups(usize),
    #[error("pairwise comparison needs more readings than locations")]
    NotEnoughSamples,
}

/// The static tables shown above the charts.
#[derive(Debug)]
pub struct StatsBundle {
    pub summary: Vec<SummaryRow>,
    pub comparisons: Vec<PairwiseComparison>,
}

/// Run the one-off statistics pass. Malformed grouping data (a single
/// location, too many locations, no residual degrees of freedom) is a
/// fatal startup error.
pub fn prepare(set: &ReadingSet) -> Result<StatsBundle, StatsError> {
    let summary = describe::describe_by_location(set, Metric::Temperature)?;
    let comparisons = tukey::pairwise_tukey_hsd(&set.values_by_location(Metric::Temperature))?;
    Ok(StatsBundle {
        summary,
        comparisons,
    })
}
