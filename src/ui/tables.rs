use eframe::egui::{Grid, Ui};

use crate::data::model::location_label;
use crate::stats::describe::SummaryRow;
use crate::stats::tukey::{PairwiseComparison, ALPHA};

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

/// The per-location descriptive summary, transposed so statistics are
/// rows and locations are columns.
pub fn summary_table(ui: &mut Ui, rows: &[SummaryRow]) {
    ui.strong("Temperature by location (°F)");

    Grid::new("summary_table").striped(true).show(ui, |ui: &mut Ui| {
        ui.label("");
        for row in rows {
            ui.strong(location_label(&row.location));
        }
        ui.end_row();

        let statistics: [(&str, fn(&SummaryRow) -> String); 8] = [
            ("count", |r| r.count.to_string()),
            ("mean", |r| format!("{:.1}", r.mean)),
            ("std", |r| format!("{:.1}", r.std)),
            ("min", |r| format!("{:.1}", r.min)),
            ("25%", |r| format!("{:.1}", r.q25)),
            ("50%", |r| format!("{:.1}", r.median)),
            ("75%", |r| format!("{:.1}", r.q75)),
            ("max", |r| format!("{:.1}", r.max)),
        ];
        for (name, cell) in statistics {
            ui.label(name);
            for row in rows {
                ui.label(cell(row));
            }
            ui.end_row();
        }
    });
}

// ---------------------------------------------------------------------------
// Pairwise comparison table
// ---------------------------------------------------------------------------

/// The Tukey HSD table: one row per location pair.
pub fn comparison_table(ui: &mut Ui, rows: &[PairwiseComparison]) {
    ui.strong(format!("Pairwise mean comparison (Tukey HSD, alpha {ALPHA})"));

    Grid::new("comparison_table")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for header in ["group A", "group B", "mean diff", "lower", "upper", "reject"] {
                ui.strong(header);
            }
            ui.end_row();

            for row in rows {
                ui.label(location_label(&row.group_a));
                ui.label(location_label(&row.group_b));
                ui.label(format!("{:.3}", row.mean_diff));
                ui.label(format!("{:.3}", row.lower));
                ui.label(format!("{:.3}", row.upper));
                ui.label(row.reject.to_string());
                ui.end_row();
            }
        });
}
