use chrono::DateTime;
use eframe::egui::Ui;
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints, Points,
};

use crate::chart::{BoxFigure, Figure, HistFigure, LineFigure};

const PLOT_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Figure rendering
// ---------------------------------------------------------------------------

/// Draw one figure artifact. Pure consumption: nothing here feeds back
/// into the filter state or the dispatcher.
pub fn show(ui: &mut Ui, id: &str, title: &str, figure: &Figure) {
    ui.strong(title);
    match figure {
        Figure::Line(line) => show_line(ui, id, line),
        Figure::Box(boxes) => show_box(ui, id, boxes),
        Figure::Histogram(hist) => show_histogram(ui, id, hist),
    }
}

fn show_line(ui: &mut Ui, id: &str, figure: &LineFigure) {
    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("time")
        .y_axis_label(&figure.y_label)
        .x_axis_formatter(format_timestamp)
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&series.name)
                        .color(series.color)
                        .width(1.5),
                );
            }
        });
}

fn show_box(ui: &mut Ui, id: &str, figure: &BoxFigure) {
    let labels = figure.x_labels.clone();
    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("location")
        .y_axis_label(&figure.y_label)
        .x_axis_formatter(move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
            slot_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let elems: Vec<BoxElem> = series
                    .boxes
                    .iter()
                    .map(|b| {
                        BoxElem::new(
                            b.x,
                            BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
                        )
                        .box_width(series.box_width)
                    })
                    .collect();
                plot_ui.box_plot(BoxPlot::new(elems).name(&series.name).color(series.color));

                let outliers: PlotPoints = series
                    .boxes
                    .iter()
                    .flat_map(|b| b.outliers.iter().map(|&y| [b.x, y]))
                    .collect();
                plot_ui.points(Points::new(outliers).color(series.color).radius(2.0));
            }
        });
}

fn show_histogram(ui: &mut Ui, id: &str, figure: &HistFigure) {
    let bars: Vec<Bar> = figure
        .bars
        .iter()
        .map(|b| Bar::new(b.center, b.count as f64).width(figure.bin_width * 0.95))
        .collect();

    Plot::new(id.to_string())
        .height(PLOT_HEIGHT)
        .x_axis_label(&figure.x_label)
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Axis formatters
// ---------------------------------------------------------------------------

/// Unix seconds → "03-05 14:30".
fn format_timestamp(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    DateTime::from_timestamp(mark.value as i64, 0)
        .map(|t| t.format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Integer slot positions get a location label, everything else stays
/// blank so fractional grid marks do not clutter the axis.
fn slot_label(labels: &[String], value: f64) -> String {
    let slot = value.round();
    if (value - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}
