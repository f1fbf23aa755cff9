use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::correlation_color;
use crate::data::clean::{COL_AGE, COL_ASK_PRICE, COL_BRAND, COL_KM_DRIVEN, COL_YEAR};
use crate::data::model::{CarDataset, CarRecord, NumericColumn};
use crate::data::stats;
use crate::state::AppState;

const PREVIEW_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// Overview: dataset info, missing values, describe, head preview
// ---------------------------------------------------------------------------

/// Render the overview: dataset shape, per-column missing counts,
/// descriptive statistics over the whole dataset, and a head preview.
pub fn overview_view(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        empty_hint(ui);
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Dataset");
            ui.label(format!(
                "{} listings, {} columns (+ derived {COL_AGE}, reference year {})",
                dataset.len(),
                dataset.columns.len(),
                dataset.reference_year
            ));
            ui.add_space(8.0);

            ui.strong("Missing values");
            egui::Grid::new("null_counts")
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.label(RichText::new("Column").strong());
                    ui.label(RichText::new("Missing").strong());
                    ui.end_row();
                    for (col, count) in &dataset.null_counts {
                        ui.label(col);
                        ui.label(count.to_string());
                        ui.end_row();
                    }
                });
            ui.add_space(8.0);

            ui.strong("Descriptive statistics");
            let all_indices: Vec<usize> = (0..dataset.len()).collect();
            describe_grid(ui, dataset, &all_indices);
            ui.add_space(8.0);

            ui.strong(format!("First {PREVIEW_ROWS} rows"));
            let preview: Vec<usize> = (0..dataset.len().min(PREVIEW_ROWS)).collect();
            records_table(ui, dataset, &preview, "preview_table");
        });
}

fn describe_grid(ui: &mut Ui, dataset: &CarDataset, indices: &[usize]) {
    let summaries = stats::describe(dataset, indices);

    egui::Grid::new("describe_grid")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for header in ["", "count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for (col, summary) in &summaries {
                ui.label(RichText::new(col.label()).strong());
                match summary {
                    Some(s) => {
                        ui.label(s.count.to_string());
                        for v in [s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max] {
                            ui.label(format!("{v:.1}"));
                        }
                    }
                    None => {
                        for _ in 0..8 {
                            ui.label("–");
                        }
                    }
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation view
// ---------------------------------------------------------------------------

/// Render the correlation matrix of the four numeric columns over the
/// filtered rows, one coloured cell per pair.
pub fn correlation_view(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        empty_hint(ui);
        return;
    };

    ui.label(format!(
        "Pearson correlation over {} visible listings (pairwise-complete)",
        state.visible_indices.len()
    ));
    ui.add_space(8.0);

    let matrix = stats::correlation_matrix(dataset, &state.visible_indices);
    let cols = NumericColumn::ALL;

    egui::Grid::new("correlation_grid")
        .spacing([4.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for col in cols {
                ui.label(RichText::new(col.label()).strong());
            }
            ui.end_row();

            for (i, row_col) in cols.iter().enumerate() {
                ui.label(RichText::new(row_col.label()).strong());
                for j in 0..cols.len() {
                    let r = matrix[i][j];
                    ui.label(
                        RichText::new(format!(" {r:+.2} "))
                            .background_color(correlation_color(r))
                            .color(Color32::BLACK)
                            .monospace(),
                    );
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Data view: the filtered rows
// ---------------------------------------------------------------------------

/// Render the filtered listings as a table.
pub fn data_view(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        empty_hint(ui);
        return;
    };

    ui.label(format!(
        "{} of {} listings in the selected range",
        state.visible_indices.len(),
        dataset.len()
    ));
    ui.add_space(4.0);

    records_table(ui, dataset, &state.visible_indices, "data_table");
}

// ---------------------------------------------------------------------------
// Shared record table
// ---------------------------------------------------------------------------

/// Source columns plus the derived Age, in display order.
fn display_columns(dataset: &CarDataset) -> Vec<String> {
    let mut cols = dataset.columns.clone();
    if let Some(pos) = cols.iter().position(|c| c == COL_YEAR) {
        cols.insert(pos + 1, COL_AGE.to_string());
    } else {
        cols.push(COL_AGE.to_string());
    }
    cols
}

fn cell_text(record: &CarRecord, column: &str) -> String {
    fn opt_num(v: Option<f64>) -> String {
        v.map(|v| format!("{v:.0}")).unwrap_or_else(|| "<null>".into())
    }
    match column {
        COL_ASK_PRICE => opt_num(record.ask_price),
        COL_KM_DRIVEN => opt_num(record.km_driven),
        COL_YEAR => record
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "<null>".into()),
        COL_AGE => record
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "<null>".into()),
        COL_BRAND => record.brand.clone().unwrap_or_else(|| "<null>".into()),
        other => record
            .extra
            .get(other)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}

fn records_table(ui: &mut Ui, dataset: &CarDataset, indices: &[usize], id: &str) {
    let columns = display_columns(dataset);

    ui.push_id(id, |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui).striped(true);
        for _ in &columns {
            builder = builder.column(Column::auto().resizable(true).at_least(60.0));
        }

        builder
            .header(20.0, |mut header| {
                for col in &columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, indices.len(), |mut row| {
                    let record = &dataset.records[indices[row.index()]];
                    for col in &columns {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell_text(record, col));
                        });
                    }
                });
            });
    });
}

fn empty_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a file to explore listings  (File → Open…)");
    });
}
