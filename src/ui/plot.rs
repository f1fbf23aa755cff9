use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::data::model::NumericColumn;
use crate::data::stats;
use crate::state::AppState;

const HISTOGRAM_BINS: usize = 30;

// ---------------------------------------------------------------------------
// Scatter view: AskPrice against Year / Age / kmDriven
// ---------------------------------------------------------------------------

/// Render the scatter view in the central panel.
pub fn scatter_view(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("X axis:");
        for col in [NumericColumn::Year, NumericColumn::Age, NumericColumn::KmDriven] {
            ui.selectable_value(&mut state.scatter_x, col, col.label());
        }
    });

    let Some(dataset) = &state.dataset else {
        empty_hint(ui);
        return;
    };
    let x_col = state.scatter_x;

    // Group visible points by legend label (top brand name or "Other").
    let mut groups: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for &idx in &state.visible_indices {
        let (Some(x), Some(y)) = (
            dataset.numeric_value(idx, x_col),
            dataset.records[idx].ask_price,
        ) else {
            continue;
        };
        let label = match dataset.records[idx].brand.as_deref() {
            Some(b) if state.is_top_brand(b) => b.to_string(),
            _ => "Other".to_string(),
        };
        groups.entry(label).or_default().push([x, y]);
    }

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(x_col.label())
        .y_axis_label("AskPrice")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (name, pts) in &groups {
                let color = match &state.color_map {
                    Some(cm) if name != "Other" => cm.color_for(Some(name.as_str())),
                    _ => Color32::GRAY,
                };
                let points: PlotPoints = pts.iter().copied().collect();
                plot_ui.points(Points::new(points).name(name).color(color).radius(2.0));
            }
        });
}

// ---------------------------------------------------------------------------
// Distribution view: price histogram + per-brand box plots
// ---------------------------------------------------------------------------

/// Render the distribution view: an AskPrice histogram over the filtered
/// rows, and one box per selected top brand below it.
pub fn distribution_view(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        empty_hint(ui);
        return;
    };

    let prices: Vec<f64> = state
        .visible_indices
        .iter()
        .filter_map(|&i| dataset.records[i].ask_price)
        .collect();

    let half = ui.available_height() * 0.5;

    ui.strong("AskPrice distribution");
    let bins = stats::histogram(&prices, HISTOGRAM_BINS);
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| Bar::new(b.center(), b.count as f64).width(b.width()))
        .collect();

    Plot::new("price_histogram")
        .height(half)
        .x_axis_label("AskPrice")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("AskPrice")
                    .color(Color32::LIGHT_BLUE),
            );
        });

    ui.separator();
    ui.strong("AskPrice by brand");

    let mut box_plots = Vec::new();
    for (slot, brand) in state
        .top_brands
        .iter()
        .filter(|b| state.selected_brands.contains(&b.name))
        .enumerate()
    {
        let brand_prices: Vec<f64> = state
            .visible_indices
            .iter()
            .filter(|&&i| dataset.records[i].brand.as_deref() == Some(brand.name.as_str()))
            .filter_map(|&i| dataset.records[i].ask_price)
            .collect();

        let Some(b) = stats::box_summary(&brand_prices) else {
            continue;
        };
        let elem = BoxElem::new(
            slot as f64,
            BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
        )
        .name(&brand.name);

        let color = match &state.color_map {
            Some(cm) => cm.color_for(Some(brand.name.as_str())),
            None => Color32::GRAY,
        };
        box_plots.push(BoxPlot::new(vec![elem]).name(&brand.name).color(color));
    }

    Plot::new("brand_box_plot")
        .legend(Legend::default())
        .y_axis_label("AskPrice")
        .allow_scroll(false)
        .show_x(false)
        .show(ui, |plot_ui| {
            for bp in box_plots {
                plot_ui.box_plot(bp);
            }
        });
}

fn empty_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a file to explore listings  (File → Open…)");
    });
}
