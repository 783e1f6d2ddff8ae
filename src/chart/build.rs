//! Pure figure builders: (immutable data, current control values) → Figure.

use std::collections::{BTreeMap, BTreeSet};

use crate::color::{generate_palette, ColorMap};
use crate::data::filter::{filtered_indices, FilterState};
use crate::data::model::{location_label, ComparisonReading, Metric, ReadingSet};
use crate::stats::describe::quantile;

use super::figure::{
    BoxFigure, BoxSeries, BoxStats, Figure, HistBar, HistFigure, LineFigure, LineSeries,
};

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

/// One line per selected location over the selected date range. The
/// plotted field is a fixed parameter, not part of the filter: the
/// y-axis radio drives the box plots only.
pub fn line_chart(
    set: &ReadingSet,
    filter: &FilterState,
    metric: Metric,
    colors: &ColorMap,
) -> Figure {
    let mut by_location: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for index in filtered_indices(set, filter) {
        let reading = &set.readings[index];
        by_location
            .entry(reading.location.as_str())
            .or_default()
            .push([reading.time.timestamp() as f64, reading.value(metric)]);
    }

    let series = by_location
        .into_iter()
        .map(|(location, mut points)| {
            points.sort_by(|a, b| a[0].total_cmp(&b[0]));
            LineSeries {
                name: location_label(location),
                color: colors.color_for(location),
                points,
            }
        })
        .collect();

    Figure::Line(LineFigure {
        series,
        y_label: metric.label().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Grouped box plot
// ---------------------------------------------------------------------------

/// Which column of the comparison dataset groups the boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxGrouping {
    Ventilator,
    OutsideHumidity,
}

impl BoxGrouping {
    fn key(self, row: &ComparisonReading) -> &str {
        match self {
            BoxGrouping::Ventilator => &row.ventilator,
            BoxGrouping::OutsideHumidity => &row.outside_humidity,
        }
    }
}

/// Width of the slot each location occupies on the x axis; the boxes of
/// all categories share it side by side.
const SLOT_WIDTH: f64 = 0.8;

/// One box per (location, category): x = location, y = the chosen metric,
/// colour = category, in the manner of a grouped plotly box plot.
pub fn grouped_box_plot(
    rows: &[ComparisonReading],
    metric: Metric,
    grouping: BoxGrouping,
) -> Figure {
    let locations: BTreeSet<&str> = rows.iter().map(|r| r.location.as_str()).collect();
    let categories: BTreeSet<&str> = rows.iter().map(|r| grouping.key(r)).collect();
    let location_slots: BTreeMap<&str, usize> = locations
        .iter()
        .enumerate()
        .map(|(slot, &location)| (location, slot))
        .collect();

    let n_categories = categories.len().max(1);
    let category_width = SLOT_WIDTH / n_categories as f64;
    let palette = generate_palette(n_categories);

    let series = categories
        .iter()
        .enumerate()
        .map(|(cat_index, &category)| {
            let offset = (cat_index as f64 - (n_categories as f64 - 1.0) / 2.0) * category_width;
            let boxes = location_slots
                .iter()
                .filter_map(|(&location, &slot)| {
                    let values: Vec<f64> = rows
                        .iter()
                        .filter(|r| r.location == location && grouping.key(r) == category)
                        .map(|r| r.value(metric))
                        .collect();
                    if values.is_empty() {
                        return None;
                    }
                    Some(box_stats(slot as f64 + offset, &values))
                })
                .collect();
            BoxSeries {
                name: category.to_string(),
                color: palette[cat_index],
                boxes,
                box_width: category_width * 0.85,
            }
        })
        .collect();

    Figure::Box(BoxFigure {
        x_labels: locations.iter().map(|l| location_label(l)).collect(),
        series,
        y_label: metric.label().to_string(),
    })
}

/// Five-number summary with 1.5·IQR whiskers clamped to actual samples;
/// values beyond the whiskers become outlier points.
fn box_stats(x: f64, values: &[f64]) -> BoxStats {
    let q1 = quantile(values, 0.25);
    let median = quantile(values, 0.5);
    let q3 = quantile(values, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let mut lower_whisker = q1;
    let mut upper_whisker = q3;
    let mut outliers = Vec::new();
    for &v in values {
        if v < lower_fence || v > upper_fence {
            outliers.push(v);
        } else {
            lower_whisker = lower_whisker.min(v);
            upper_whisker = upper_whisker.max(v);
        }
    }

    BoxStats {
        x,
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Fixed-bin histogram over one field of the full reading set.
pub fn histogram(set: &ReadingSet, metric: Metric, bins: usize) -> Figure {
    let values: Vec<f64> = set.readings.iter().map(|r| r.value(metric)).collect();
    let x_label = metric.label().to_string();

    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Figure::Histogram(HistFigure {
            x_label,
            bin_width: 0.0,
            bars: Vec::new(),
        });
    };

    // Degenerate span: everything lands in one bar
    if max == min || bins == 0 {
        return Figure::Histogram(HistFigure {
            x_label,
            bin_width: 1.0,
            bars: vec![HistBar {
                center: min,
                count: values.len(),
            }],
        });
    }

    let bin_width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let bin = (((v - min) / bin_width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    let bars = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistBar {
            center: min + (i as f64 + 0.5) * bin_width,
            count,
        })
        .collect();

    Figure::Histogram(HistFigure {
        x_label,
        bin_width,
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Reading;
    use chrono::{TimeZone, Utc};

    fn reading(minute: u32, location: &str, temp: f64, humidity: f64) -> Reading {
        Reading {
            time: Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0).unwrap(),
            location: location.to_string(),
            temperature: temp,
            humidity,
        }
    }

    fn comparison(location: &str, temp: f64, ventilator: &str, outside: &str) -> ComparisonReading {
        ComparisonReading {
            location: location.to_string(),
            temperature: temp,
            humidity: 40.0,
            ventilator: ventilator.to_string(),
            outside_humidity: outside.to_string(),
        }
    }

    #[test]
    fn line_chart_contains_only_selected_locations() {
        let set = ReadingSet::from_readings(vec![
            reading(0, "1", 70.0, 38.0),
            reading(1, "2", 64.0, 45.0),
            reading(2, "1", 71.0, 39.0),
        ]);
        let mut filter = FilterState::from_dataset(&set);
        filter.locations.remove("2");
        let colors = ColorMap::new(&set.locations);

        let Figure::Line(figure) = line_chart(&set, &filter, Metric::Temperature, &colors) else {
            panic!("expected a line figure");
        };
        assert_eq!(figure.series.len(), 1);
        assert_eq!(figure.series[0].name, location_label("1"));
        assert_eq!(figure.series[0].points.len(), 2);
    }

    #[test]
    fn line_chart_uses_the_requested_metric() {
        let set = ReadingSet::from_readings(vec![reading(0, "1", 70.0, 38.0)]);
        let filter = FilterState::from_dataset(&set);
        let colors = ColorMap::new(&set.locations);

        let Figure::Line(figure) = line_chart(&set, &filter, Metric::Humidity, &colors) else {
            panic!("expected a line figure");
        };
        assert_eq!(figure.series[0].points[0][1], 38.0);
        assert_eq!(figure.y_label, Metric::Humidity.label());
    }

    #[test]
    fn line_chart_is_deterministic() {
        let set = ReadingSet::from_readings(vec![
            reading(0, "1", 70.0, 38.0),
            reading(1, "2", 64.0, 45.0),
        ]);
        let filter = FilterState::from_dataset(&set);
        let colors = ColorMap::new(&set.locations);
        assert_eq!(
            line_chart(&set, &filter, Metric::Temperature, &colors),
            line_chart(&set, &filter, Metric::Temperature, &colors)
        );
    }

    #[test]
    fn box_plot_has_one_series_per_category() {
        let rows = vec![
            comparison("1", 70.0, "on", "low"),
            comparison("1", 71.0, "off", "low"),
            comparison("2", 64.0, "on", "high"),
            comparison("2", 65.0, "off", "high"),
        ];
        let Figure::Box(figure) = grouped_box_plot(&rows, Metric::Temperature, BoxGrouping::Ventilator)
        else {
            panic!("expected a box figure");
        };
        assert_eq!(figure.x_labels.len(), 2);
        assert_eq!(figure.series.len(), 2);
        let names: Vec<&str> = figure.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["off", "on"]);
    }

    #[test]
    fn box_positions_stay_inside_their_slot() {
        let rows = vec![
            comparison("1", 70.0, "on", "low"),
            comparison("1", 71.0, "off", "low"),
        ];
        let Figure::Box(figure) = grouped_box_plot(&rows, Metric::Temperature, BoxGrouping::Ventilator)
        else {
            panic!("expected a box figure");
        };
        for series in &figure.series {
            for b in &series.boxes {
                assert!(b.x > -0.5 && b.x < 0.5, "x = {}", b.x);
            }
        }
    }

    #[test]
    fn box_stats_flag_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 100.0];
        let stats = box_stats(0.0, &values);
        assert_eq!(stats.outliers, vec![100.0]);
        assert!(stats.upper_whisker <= 4.0);
        assert_eq!(stats.lower_whisker, 1.0);
    }

    #[test]
    fn histogram_counts_every_reading() {
        let set = ReadingSet::from_readings(
            (0..50)
                .map(|i| reading(i, "1", 60.0 + (i % 10) as f64, 40.0))
                .collect(),
        );
        let Figure::Histogram(figure) = histogram(&set, Metric::Temperature, 30) else {
            panic!("expected a histogram");
        };
        assert_eq!(figure.bars.len(), 30);
        let total: usize = figure.bars.iter().map(|b| b.count).sum();
        assert_eq!(total, 50);
    }

    #[test]
    fn histogram_handles_constant_and_empty_data() {
        let constant = ReadingSet::from_readings(vec![
            reading(0, "1", 70.0, 40.0),
            reading(1, "1", 70.0, 40.0),
        ]);
        let Figure::Histogram(figure) = histogram(&constant, Metric::Temperature, 30) else {
            panic!("expected a histogram");
        };
        assert_eq!(figure.bars.len(), 1);
        assert_eq!(figure.bars[0].count, 2);

        let empty = ReadingSet::from_readings(Vec::new());
        let Figure::Histogram(figure) = histogram(&empty, Metric::Temperature, 30) else {
            panic!("expected a histogram");
        };
        assert!(figure.bars.is_empty());
    }
}
