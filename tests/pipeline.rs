use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

use sensordash::chart::Figure;
use sensordash::data::filter::{filtered_indices, FilterState};
use sensordash::data::influx::parse_annotated_csv;
use sensordash::data::loader::parse_comparison;
use sensordash::data::model::{Metric, Reading, ReadingSet};
use sensordash::state::{DashboardData, DashboardOptions, ViewState};
use sensordash::stats;
use sensordash::view::dispatch::OutputId;
use sensordash::view::rules;

fn readings() -> ReadingSet {
    let mut readings = Vec::new();
    for day in 1..=5 {
        for hour in [6, 12, 18] {
            for (i, location) in ["1", "2", "3", "4"].iter().enumerate() {
                readings.push(Reading {
                    time: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
                    location: location.to_string(),
                    temperature: 55.0 + 5.0 * i as f64 + 0.5 * day as f64 + 0.1 * hour as f64,
                    humidity: 40.0 + 2.0 * i as f64,
                });
            }
        }
    }
    ReadingSet::from_readings(readings)
}

const COMPARISON: &str = "\
location,tempf,humidityi,ventilator,Outside-humidity\n\
1,71.2,38,on,low\n\
1,70.4,39,off,low\n\
1,72.0,37,on,high\n\
2,64.1,52,on,low\n\
2,63.2,53,off,high\n\
4,48.5,61,off,high\n\
4,49.9,58,on,low\n";

fn dashboard() -> ViewState {
    let set = readings();
    let stats = stats::prepare(&set).unwrap();
    let comparison = parse_comparison(COMPARISON.as_bytes()).unwrap();
    let data = DashboardData::new(set, comparison, stats);
    let options = DashboardOptions {
        title: "test".to_string(),
        window_days: 5,
        show_date_filter: true,
        dark_theme: false,
    };
    ViewState::new(data, options, rules::full_rules())
}

#[test]
fn summary_has_one_row_per_location() {
    let set = readings();
    let bundle = stats::prepare(&set).unwrap();
    assert_eq!(bundle.summary.len(), set.locations.len());
}

#[test]
fn four_locations_give_six_comparisons() {
    let bundle = stats::prepare(&readings()).unwrap();
    assert_eq!(bundle.comparisons.len(), 6);
    // Locations 5 °F apart with ~1 °F of spread are clearly distinct
    assert!(bundle.comparisons.iter().all(|c| c.reject));
}

#[test]
fn date_filter_is_inclusive() {
    let set = readings();
    let mut filter = FilterState::from_dataset(&set);
    filter.start = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    filter.end = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let indices = filtered_indices(&set, &filter);
    assert_eq!(indices.len(), 3 * 3 * 4);
    for i in indices {
        let date = set.readings[i].time.date_naive();
        assert!(date >= filter.start && date <= filter.end);
    }
}

#[test]
fn checklist_subset_drives_the_line_chart() {
    let mut state = dashboard();
    state.toggle_location("2");
    state.toggle_location("3");

    let Some(Figure::Line(figure)) = state.figure(OutputId::LineChart) else {
        panic!("expected a line figure");
    };
    let names: Vec<&str> = figure.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["1: Indoor A", "4: Outdoors"]);
}

#[test]
fn metric_radio_drives_both_box_plots() {
    let mut state = dashboard();
    let line_before = state.figure(OutputId::LineChart).unwrap().clone();
    state.set_metric(Metric::Humidity);

    for output in [OutputId::VentilatorBoxes, OutputId::OutsideHumidityBoxes] {
        let Some(Figure::Box(figure)) = state.figure(output) else {
            panic!("expected a box figure");
        };
        assert_eq!(figure.y_label, Metric::Humidity.label());
    }
    // The line-chart rule does not declare the metric input
    assert_eq!(state.figure(OutputId::LineChart), Some(&line_before));
}

#[test]
fn rerunning_a_rule_with_identical_inputs_is_idempotent() {
    let mut first = dashboard();
    let mut second = dashboard();
    for state in [&mut first, &mut second] {
        state.toggle_location("1");
        state.set_metric(Metric::Humidity);
    }
    for output in [
        OutputId::LineChart,
        OutputId::VentilatorBoxes,
        OutputId::OutsideHumidityBoxes,
    ] {
        assert_eq!(first.figure(output), second.figure(output));
    }
}

#[test]
fn query_response_flows_through_to_statistics() {
    let body = "\
,result,table,_time,location,humidityi,tempf\n\
,_result,0,2024-03-05T08:00:00Z,1,38,70.9\n\
,_result,0,2024-03-05T08:05:00Z,1,38,71.1\n\
,_result,0,2024-03-05T08:00:00Z,2,45,64.0\n\
,_result,0,2024-03-05T08:05:00Z,2,46,64.4\n";
    let set = ReadingSet::from_readings(parse_annotated_csv(body.as_bytes()).unwrap());
    let bundle = stats::prepare(&set).unwrap();
    assert_eq!(bundle.summary.len(), 2);
    assert_eq!(bundle.comparisons.len(), 1);
    let row = &bundle.comparisons[0];
    assert!((row.mean_diff - (64.2 - 71.0)).abs() < 1e-9);
}
