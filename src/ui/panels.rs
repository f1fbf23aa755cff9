use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::clean::COL_BRAND;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} listings loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        ui.label("Reference year");
        let mut year = state.clean_config.reference_year;
        if ui
            .add(egui::DragValue::new(&mut year).range(1980..=2100).speed(0.2))
            .changed()
        {
            state.set_reference_year(year);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: price range and brand selection.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            price_section(ui, state);
            ui.separator();
            brand_section(ui, state);
        });

    // Recompute visible indices after any widget changes.
    state.refilter();
}

fn price_section(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Price range");

    let (lo, hi) = state.price_bounds;
    if hi <= lo {
        ui.label("No prices in this dataset.");
        return;
    }

    ui.add(
        egui::Slider::new(&mut state.price_range.0, lo..=hi)
            .text("min")
            .integer(),
    );
    ui.add(
        egui::Slider::new(&mut state.price_range.1, lo..=hi)
            .text("max")
            .integer(),
    );

    // An inverted selection is legal; it just matches nothing.
    if state.price_range.0 > state.price_range.1 {
        ui.label(RichText::new("min > max: no rows match").italics());
    }

    if ui.small_button("Reset").clicked() {
        state.reset_price_range();
    }
}

fn brand_section(ui: &mut Ui, state: &mut AppState) {
    if state.top_brands.is_empty() {
        ui.label(format!("No {COL_BRAND} column in this dataset."));
        return;
    }

    // Clone the ranking so we can mutate state inside the loop.
    let top = state.top_brands.clone();
    let n_selected = state.selected_brands.len();
    let header_text = format!("{COL_BRAND}  ({n_selected}/{})", top.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            // Select all / none buttons
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_brands();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_brands();
                }
            });

            for brand in &top {
                let mut checked = state.selected_brands.contains(&brand.name);
                let label = format!("{}  ({})", brand.name, brand.count);

                let mut text = RichText::new(label);
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(Some(brand.name.as_str())));
                }

                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_brand(&brand.name);
                }
            }

            let mut other = state.include_other;
            if ui.checkbox(&mut other, "Other / unbranded").changed() {
                state.include_other = other;
                state.refilter();
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open listings data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(raw) => {
                log::info!("Loaded {} rows with columns {:?}", raw.len(), raw.columns);
                state.set_raw_table(raw);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
