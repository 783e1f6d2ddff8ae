use anyhow::{ensure, Context, Result};
use chrono::NaiveDate;

use crate::chart::{build, Figure};
use crate::color::ColorMap;
use crate::config::Config;
use crate::data::filter::{filtered_indices, FilterState};
use crate::data::influx::InfluxClient;
use crate::data::loader;
use crate::data::model::{ComparisonReading, Metric, ReadingSet};
use crate::stats::{self, StatsBundle};
use crate::view::dispatch::{Dispatcher, InputId, OutputId, UpdateRule};

// ---------------------------------------------------------------------------
// DashboardData – everything computed before the UI starts
// ---------------------------------------------------------------------------

/// The write-once inputs of the view: the reading set, the offline
/// comparison dataset, the statistic tables and the static histogram.
/// Shared read-only by every update rule.
pub struct DashboardData {
    pub readings: ReadingSet,
    pub comparison: Vec<ComparisonReading>,
    pub stats: StatsBundle,
    /// Histogram of the full temperature readings; static like the tables.
    pub histogram: Figure,
    pub colors: ColorMap,
}

impl DashboardData {
    pub fn new(
        readings: ReadingSet,
        comparison: Vec<ComparisonReading>,
        stats: StatsBundle,
    ) -> Self {
        let colors = ColorMap::new(&readings.locations);
        let histogram = build::histogram(&readings, Metric::Temperature, 30);
        DashboardData {
            readings,
            comparison,
            stats,
            histogram,
            colors,
        }
    }

    /// Run the whole startup sequence: query the time-series source, read
    /// the offline dataset, compute the statistics. Any failure aborts
    /// before a window opens.
    pub fn load(config: &Config, window_days: u32, write_cache: bool) -> Result<Self> {
        let client = InfluxClient::new(&config.url, &config.org, &config.token);
        let readings = client
            .query_readings(&config.bucket, window_days)
            .context("fetching readings")?;
        ensure!(
            !readings.is_empty(),
            "query returned no readings; check the bucket name and time window"
        );

        if write_cache {
            loader::write_cache_csv(&config.cache_path, &readings)?;
            log::info!(
                "cached {} readings to {}",
                readings.len(),
                config.cache_path.display()
            );
        }

        let readings = ReadingSet::from_readings(readings);
        log::info!(
            "loaded {} readings from {} locations",
            readings.len(),
            readings.locations.len()
        );

        let comparison = loader::load_comparison_csv(&config.comparison_path)?;
        let stats = stats::prepare(&readings).context("preparing statistics")?;
        Ok(DashboardData::new(readings, comparison, stats))
    }
}

// ---------------------------------------------------------------------------
// DashboardOptions – what distinguishes the two variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub title: String,
    /// Width of the range query issued at startup.
    pub window_days: u32,
    pub show_date_filter: bool,
    pub dark_theme: bool,
}

// ---------------------------------------------------------------------------
// ViewState – filter state plus cached chart artifacts
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Control mutations go
/// through the methods below so the dispatcher sees every change.
pub struct ViewState {
    pub data: DashboardData,
    pub filter: FilterState,
    pub options: DashboardOptions,
    dispatcher: Dispatcher,
    /// Readings passing the current filter, for the top bar.
    pub visible: usize,
}

impl ViewState {
    pub fn new(data: DashboardData, options: DashboardOptions, rules: Vec<UpdateRule>) -> Self {
        let filter = FilterState::from_dataset(&data.readings);
        let mut dispatcher = Dispatcher::new(rules);
        dispatcher.refresh_all(&data, &filter);
        let visible = filtered_indices(&data.readings, &filter).len();
        ViewState {
            data,
            filter,
            options,
            dispatcher,
            visible,
        }
    }

    /// Latest artifact for an output slot.
    pub fn figure(&self, output: OutputId) -> Option<&Figure> {
        self.dispatcher.artifact(output)
    }

    fn notify(&mut self, input: InputId) {
        let ViewState {
            data,
            filter,
            dispatcher,
            visible,
            ..
        } = self;
        let ran = dispatcher.input_changed(input, data, filter);
        *visible = filtered_indices(&data.readings, filter).len();
        log::debug!("{input:?} changed, {ran} rule(s) re-ran");
    }

    /// Toggle one location in the checklist.
    pub fn toggle_location(&mut self, location: &str) {
        if !self.filter.locations.remove(location) {
            self.filter.locations.insert(location.to_string());
        }
        self.notify(InputId::Locations);
    }

    /// Select every location.
    pub fn select_all_locations(&mut self) {
        self.filter.locations = self.data.readings.locations.clone();
        self.notify(InputId::Locations);
    }

    /// Deselect every location.
    pub fn select_no_locations(&mut self) {
        self.filter.locations.clear();
        self.notify(InputId::Locations);
    }

    /// Set the date range; a reversed pick is normalised.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        if (start, end) == (self.filter.start, self.filter.end) {
            return;
        }
        self.filter.start = start;
        self.filter.end = end;
        self.notify(InputId::DateRange);
    }

    /// Set the y-axis metric.
    pub fn set_metric(&mut self, metric: Metric) {
        if self.filter.metric == metric {
            return;
        }
        self.filter.metric = metric;
        self.notify(InputId::Metric);
    }
}
