use std::path::Path;

use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{panels, plot, table};

/// Dataset loaded automatically at startup when present in the working
/// directory.
pub const DEFAULT_DATASET_PATH: &str = "used_car_dataset.csv";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AutolensApp {
    pub state: AppState,
}

impl Default for AutolensApp {
    fn default() -> Self {
        let mut state = AppState::default();

        let default_path = Path::new(DEFAULT_DATASET_PATH);
        if default_path.exists() {
            match crate::data::loader::load_file(default_path) {
                Ok(raw) => {
                    log::info!(
                        "Loaded {} rows from {DEFAULT_DATASET_PATH}",
                        raw.len()
                    );
                    state.set_raw_table(raw);
                }
                Err(e) => {
                    log::error!("Failed to load {DEFAULT_DATASET_PATH}: {e:#}");
                    state.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }

        Self { state }
    }
}

impl eframe::App for AutolensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });
    }
}

fn central_panel(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut egui::Ui| {
        for view in View::ALL {
            ui.selectable_value(&mut state.view, view, view.label());
        }
    });
    ui.separator();

    match state.view {
        View::Overview => table::overview_view(ui, state),
        View::Correlation => table::correlation_view(ui, state),
        View::Scatter => plot::scatter_view(ui, state),
        View::Distribution => plot::distribution_view(ui, state),
        View::Data => table::data_view(ui, state),
    }
}
