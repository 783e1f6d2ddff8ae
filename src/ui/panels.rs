use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::{location_label, Metric};
use crate::state::ViewState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &ViewState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(state.options.title.as_str());
        ui.separator();
        ui.label(format!(
            "{} readings loaded (last {}d), {} in view",
            state.data.readings.len(),
            state.options.window_days,
            state.visible
        ));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – interactive controls
// ---------------------------------------------------------------------------

/// Render the control panel. Every mutation goes through a `ViewState`
/// method so the dispatcher sees the change.
pub fn side_panel(ui: &mut Ui, state: &mut ViewState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            location_checklist(ui, state);
            ui.separator();

            if state.options.show_date_filter {
                date_range(ui, state);
                ui.separator();
            }

            metric_radio(ui, state);
        });
}

fn location_checklist(ui: &mut Ui, state: &mut ViewState) {
    ui.strong("Sensor locations");

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_locations();
        }
        if ui.small_button("None").clicked() {
            state.select_no_locations();
        }
    });

    let locations = state.data.readings.locations.clone();
    for location in &locations {
        let mut checked = state.filter.locations.contains(location);
        let text =
            RichText::new(location_label(location)).color(state.data.colors.color_for(location));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_location(location);
        }
    }
}

fn date_range(ui: &mut Ui, state: &mut ViewState) {
    ui.strong("Date range");

    let mut start = state.filter.start;
    let mut end = state.filter.end;
    let mut changed = false;

    ui.horizontal(|ui: &mut Ui| {
        ui.label("from");
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt("start_date"))
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("to");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt("end_date"))
            .changed();
    });

    if changed {
        state.set_date_range(start, end);
    }
}

fn metric_radio(ui: &mut Ui, state: &mut ViewState) {
    ui.strong("y-axis");

    let mut metric = state.filter.metric;
    let mut changed = false;
    for option in [Metric::Temperature, Metric::Humidity] {
        changed |= ui.radio_value(&mut metric, option, option.label()).changed();
    }
    if changed {
        state.set_metric(metric);
    }
}
