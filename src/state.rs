use std::collections::BTreeSet;

use crate::color::BrandColorMap;
use crate::data::clean::{CleanConfig, prepare};
use crate::data::filter::{BrandCount, filter_by_price, top_brands};
use crate::data::model::{CarDataset, NumericColumn, RawTable};

/// Grouped visual summaries are scoped to this many brands.
pub const TOP_BRAND_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Central view tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Correlation,
    Scatter,
    Distribution,
    Data,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Overview,
        View::Correlation,
        View::Scatter,
        View::Distribution,
        View::Data,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Correlation => "Correlation",
            View::Scatter => "Scatter",
            View::Distribution => "Distribution",
            View::Data => "Data",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The raw table is retained alongside the cleaned dataset so that a
/// reference-year change can re-run the whole preparation pass instead of
/// patching the derived column in place.
pub struct AppState {
    /// Loaded input table (None until a file is loaded).
    pub raw: Option<RawTable>,

    /// Cleaned dataset derived from `raw`.
    pub dataset: Option<CarDataset>,

    /// Cleaning configuration (reference year for the Age column).
    pub clean_config: CleanConfig,

    /// `[floor(min price), ceil(max price)]` over the whole dataset.
    pub price_bounds: (f64, f64),

    /// Current price-range selection; equals `price_bounds` by default,
    /// which makes the filter a no-op.
    pub price_range: (f64, f64),

    /// Most frequent brands, at most [`TOP_BRAND_COUNT`] entries.
    pub top_brands: Vec<BrandCount>,

    /// Which of the top brands are currently shown.
    pub selected_brands: BTreeSet<String>,

    /// Whether records outside the top brands (or without a brand) are shown.
    pub include_other: bool,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Colour assignment for the top brands.
    pub color_map: Option<BrandColorMap>,

    /// Active central view tab.
    pub view: View,

    /// X axis of the scatter view.
    pub scatter_x: NumericColumn,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            raw: None,
            dataset: None,
            clean_config: CleanConfig::default(),
            price_bounds: (0.0, 0.0),
            price_range: (0.0, 0.0),
            top_brands: Vec::new(),
            selected_brands: BTreeSet::new(),
            include_other: true,
            visible_indices: Vec::new(),
            color_map: None,
            view: View::Overview,
            scatter_x: NumericColumn::Year,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a freshly loaded raw table: run the preparation pass and
    /// initialise bounds, brand ranking and filters.  A preparation failure
    /// leaves the previous dataset in place and surfaces the error.
    pub fn set_raw_table(&mut self, raw: RawTable) {
        match prepare(&raw, &self.clean_config) {
            Ok(dataset) => {
                self.raw = Some(raw);
                self.ingest(dataset);
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
        }
    }

    fn ingest(&mut self, dataset: CarDataset) {
        let bounds = dataset.price_bounds().unwrap_or((0.0, 0.0));
        self.price_bounds = bounds;
        self.price_range = bounds;

        self.top_brands = top_brands(&dataset, TOP_BRAND_COUNT);
        self.selected_brands = self.top_brands.iter().map(|b| b.name.clone()).collect();
        self.include_other = true;
        self.color_map = Some(BrandColorMap::new(&self.top_brands));

        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Change the Age reference year and re-run the preparation pass on the
    /// retained raw table.  Price bounds and filter selections survive:
    /// only the derived column changes.
    pub fn set_reference_year(&mut self, year: i64) {
        if self.clean_config.reference_year == year {
            return;
        }
        self.clean_config.reference_year = year;
        let Some(raw) = &self.raw else { return };
        match prepare(raw, &self.clean_config) {
            Ok(dataset) => {
                self.dataset = Some(dataset);
                self.refilter();
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute `visible_indices` after a filter change: price range
    /// first, then the brand selection.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else { return };
        let in_range = filter_by_price(ds, self.price_range.0, self.price_range.1);
        let visible: Vec<usize> = in_range
            .into_iter()
            .filter(|&i| self.brand_visible(ds.records[i].brand.as_deref()))
            .collect();
        self.visible_indices = visible;
    }

    fn brand_visible(&self, brand: Option<&str>) -> bool {
        match brand {
            Some(b) if self.is_top_brand(b) => self.selected_brands.contains(b),
            _ => self.include_other,
        }
    }

    pub fn is_top_brand(&self, name: &str) -> bool {
        self.top_brands.iter().any(|b| b.name == name)
    }

    /// Toggle a single brand in the selection.
    pub fn toggle_brand(&mut self, name: &str) {
        if !self.selected_brands.remove(name) {
            self.selected_brands.insert(name.to_string());
        }
        self.refilter();
    }

    /// Select every top brand.
    pub fn select_all_brands(&mut self) {
        self.selected_brands = self.top_brands.iter().map(|b| b.name.clone()).collect();
        self.refilter();
    }

    /// Deselect every top brand.
    pub fn select_no_brands(&mut self) {
        self.selected_brands.clear();
        self.refilter();
    }

    /// Restore the default no-op price range.
    pub fn reset_price_range(&mut self) {
        self.price_range = self.price_bounds;
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::CellValue;

    fn raw_row(brand: &str, year: i64, price: &str, km: &str) -> BTreeMap<String, CellValue> {
        [
            ("Brand".to_string(), CellValue::String(brand.into())),
            ("Year".to_string(), CellValue::Integer(year)),
            ("AskPrice".to_string(), CellValue::String(price.into())),
            ("kmDriven".to_string(), CellValue::String(km.into())),
        ]
        .into_iter()
        .collect()
    }

    fn sample_raw() -> RawTable {
        RawTable {
            columns: vec![
                "Brand".into(),
                "Year".into(),
                "AskPrice".into(),
                "kmDriven".into(),
            ],
            rows: vec![
                raw_row("Honda", 2019, "₹ 5,10,000", "70,000 km"),
                raw_row("Honda", 2016, "₹ 3,20,000", "90,000 km"),
                raw_row("Toyota", 2022, "₹ 9,80,000", "15,000 km"),
            ],
        }
    }

    #[test]
    fn loading_initialises_a_noop_filter() {
        let mut state = AppState::default();
        state.set_raw_table(sample_raw());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.price_bounds, (320000.0, 980000.0));
        assert_eq!(state.price_range, state.price_bounds);
        assert_eq!(state.top_brands[0].name, "Honda");
    }

    #[test]
    fn range_and_brand_filters_compose() {
        let mut state = AppState::default();
        state.set_raw_table(sample_raw());

        state.price_range = (300000.0, 600000.0);
        state.refilter();
        assert_eq!(state.visible_indices, vec![0, 1]);

        state.toggle_brand("Honda");
        assert!(state.visible_indices.is_empty());

        state.reset_price_range();
        assert_eq!(state.visible_indices, vec![2]);
    }

    #[test]
    fn reference_year_change_reruns_preparation() {
        let mut state = AppState::default();
        state.set_raw_table(sample_raw());
        let before = state.dataset.as_ref().unwrap().records[0].age;
        assert_eq!(before, Some(5));

        state.set_reference_year(2026);
        let after = state.dataset.as_ref().unwrap().records[0].age;
        assert_eq!(after, Some(7));
        // Filter selections survive the re-run.
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn failed_preparation_surfaces_an_error() {
        let mut state = AppState::default();
        state.set_raw_table(RawTable {
            columns: vec!["Brand".into()],
            rows: vec![],
        });
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("missing"));
    }
}
