use std::collections::HashMap;

use super::model::CarDataset;

// ---------------------------------------------------------------------------
// Price-range filter
// ---------------------------------------------------------------------------

/// Return indices of records whose `AskPrice` lies in the inclusive range
/// `[min_price, max_price]`, preserving original record order.
///
/// The dataset is never mutated; an inverted range (`min > max`) yields the
/// empty set rather than an error.  Records with a missing price never
/// match any range.
pub fn filter_by_price(dataset: &CarDataset, min_price: f64, max_price: f64) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            rec.ask_price
                .map(|p| p >= min_price && p <= max_price)
                .unwrap_or(false)
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Brand frequency ranking
// ---------------------------------------------------------------------------

/// One entry of the top-brands ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCount {
    pub name: String,
    pub count: usize,
}

/// The `n` most frequent brand labels, descending by occurrence count.
/// Ties break by first occurrence in the dataset, so the ranking is stable
/// across runs.  Empty when the input has no Brand column.
pub fn top_brands(dataset: &CarDataset, n: usize) -> Vec<BrandCount> {
    if !dataset.has_brand || n == 0 {
        return Vec::new();
    }

    // brand → (count, index of first occurrence)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, rec) in dataset.records.iter().enumerate() {
        if let Some(brand) = &rec.brand {
            let entry = counts.entry(brand.as_str()).or_insert((0, idx));
            entry.0 += 1;
        }
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(name, (count, first))| (name, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(n);

    ranked
        .into_iter()
        .map(|(name, count, _)| BrandCount {
            name: name.to_string(),
            count,
        })
        .collect()
}
