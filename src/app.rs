use eframe::egui;

use crate::state::{DashboardData, DashboardOptions, ViewState};
use crate::ui::{panels, plot, tables};
use crate::view::dispatch::OutputId;
use crate::view::rules;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: ViewState,
}

impl DashboardApp {
    pub fn new(data: DashboardData, options: DashboardOptions) -> Self {
        let rules = if options.show_date_filter {
            rules::full_rules()
        } else {
            rules::compact_rules()
        };
        DashboardApp {
            state: ViewState::new(data, options, rules),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: interactive controls ----
        egui::SidePanel::left("control_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    central(ui, &self.state);
                });
        });
    }
}

fn central(ui: &mut egui::Ui, state: &ViewState) {
    ui.columns(2, |columns: &mut [egui::Ui]| {
        tables::summary_table(&mut columns[0], &state.data.stats.summary);
        tables::comparison_table(&mut columns[1], &state.data.stats.comparisons);
    });
    ui.separator();

    ui.columns(2, |columns: &mut [egui::Ui]| {
        if let Some(figure) = state.figure(OutputId::LineChart) {
            plot::show(&mut columns[0], "line_chart", "Readings over time", figure);
        }
        plot::show(
            &mut columns[1],
            "histogram",
            "Temperature distribution",
            &state.data.histogram,
        );
    });

    ui.columns(2, |columns: &mut [egui::Ui]| {
        if let Some(figure) = state.figure(OutputId::VentilatorBoxes) {
            plot::show(&mut columns[0], "box_ventilator", "By ventilator state", figure);
        }
        if let Some(figure) = state.figure(OutputId::OutsideHumidityBoxes) {
            plot::show(
                &mut columns[1],
                "box_outside",
                "By outdoor humidity",
                figure,
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Window setup
// ---------------------------------------------------------------------------

/// Open the dashboard window over the prepared data. Blocks until the
/// window closes.
pub fn run(data: DashboardData, options: DashboardOptions) -> eframe::Result {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    let title = options.title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if options.dark_theme {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(DashboardApp::new(data, options)))
        }),
    )
}
