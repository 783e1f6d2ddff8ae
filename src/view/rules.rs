//! The update rules behind each interactive chart, and the update tables
//! wiring them up for the two dashboard variants.

use crate::chart::build::{self, BoxGrouping};
use crate::chart::Figure;
use crate::data::filter::FilterState;
use crate::data::model::Metric;
use crate::state::DashboardData;

use super::dispatch::{InputId, OutputId, UpdateRule};

/// Line chart of the selected locations over the selected date range.
/// Always temperature; the y-axis radio feeds the box plots only.
fn line_chart(data: &DashboardData, filter: &FilterState) -> Figure {
    build::line_chart(&data.readings, filter, Metric::Temperature, &data.colors)
}

/// Box plot of the offline dataset grouped by ventilator state.
fn ventilator_boxes(data: &DashboardData, filter: &FilterState) -> Figure {
    build::grouped_box_plot(&data.comparison, filter.metric, BoxGrouping::Ventilator)
}

/// Box plot of the offline dataset grouped by outdoor humidity.
fn outside_humidity_boxes(data: &DashboardData, filter: &FilterState) -> Figure {
    build::grouped_box_plot(&data.comparison, filter.metric, BoxGrouping::OutsideHumidity)
}

/// Update table for the full dashboard: the line chart reacts to the
/// checklist and the date range.
pub fn full_rules() -> Vec<UpdateRule> {
    vec![
        UpdateRule {
            output: OutputId::LineChart,
            inputs: &[InputId::Locations, InputId::DateRange],
            func: line_chart,
        },
        UpdateRule {
            output: OutputId::VentilatorBoxes,
            inputs: &[InputId::Metric],
            func: ventilator_boxes,
        },
        UpdateRule {
            output: OutputId::OutsideHumidityBoxes,
            inputs: &[InputId::Metric],
            func: outside_humidity_boxes,
        },
    ]
}

/// Update table for the compact variant: no date filter is exposed, so
/// the line chart listens to the checklist only. The rule itself is the
/// same; the filter's date range stays at the dataset's full span.
pub fn compact_rules() -> Vec<UpdateRule> {
    vec![
        UpdateRule {
            output: OutputId::LineChart,
            inputs: &[InputId::Locations],
            func: line_chart,
        },
        UpdateRule {
            output: OutputId::VentilatorBoxes,
            inputs: &[InputId::Metric],
            func: ventilator_boxes,
        },
        UpdateRule {
            output: OutputId::OutsideHumidityBoxes,
            inputs: &[InputId::Metric],
            func: outside_humidity_boxes,
        },
    ]
}
