use super::model::{CarDataset, NumericColumn};

// ---------------------------------------------------------------------------
// Column summary (describe)
// ---------------------------------------------------------------------------

/// Descriptive statistics for one numeric column, quartiles included.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summarise a slice of values.  `None` for an empty slice.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    // Sample standard deviation, matching Pandas' describe().
    let std = if values.len() > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(Summary {
        count: values.len(),
        mean,
        std,
        min: sorted[0],
        q1: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q3: percentile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Linear-interpolated percentile over pre-sorted values, `p` in `[0, 1]`.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Describe every numeric column of the dataset over the given record
/// subset.  Missing values are skipped per column, so the counts differ
/// when the data is sparse.
pub fn describe(dataset: &CarDataset, indices: &[usize]) -> Vec<(NumericColumn, Option<Summary>)> {
    NumericColumn::ALL
        .iter()
        .map(|&col| {
            let values: Vec<f64> = indices
                .iter()
                .filter_map(|&i| dataset.numeric_value(i, col))
                .collect();
            (col, summarize(&values))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation coefficient of two equally long series.
/// Returns 0.0 for empty or constant input.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom > 0.0 {
        cov / denom
    } else {
        0.0
    }
}

/// Pairwise Pearson correlation over the four numeric columns, restricted
/// to the given record subset.  Each pair uses only the records where both
/// fields are present (pairwise-complete observations).
pub fn correlation_matrix(dataset: &CarDataset, indices: &[usize]) -> Vec<Vec<f64>> {
    let cols = NumericColumn::ALL;
    let mut matrix = vec![vec![0.0; cols.len()]; cols.len()];

    for (i, &a) in cols.iter().enumerate() {
        for (j, &b) in cols.iter().enumerate() {
            if j < i {
                matrix[i][j] = matrix[j][i];
                continue;
            }
            let mut xs = Vec::new();
            let mut ys = Vec::new();
            for &idx in indices {
                if let (Some(x), Some(y)) =
                    (dataset.numeric_value(idx, a), dataset.numeric_value(idx, b))
                {
                    xs.push(x);
                    ys.push(y);
                }
            }
            matrix[i][j] = pearson(&xs, &ys);
        }
    }
    matrix
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One histogram bin: `[lower, upper)` except the last bin, which is
/// closed on both ends so the maximum lands somewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct HistBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistBin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Equal-width histogram over `values`.  Empty input or a degenerate range
/// collapses to a single bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range <= 0.0 {
        return vec![HistBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = range / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut bin = ((v - min) / width) as usize;
        if bin >= bins {
            bin = bins - 1;
        }
        counts[bin] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Box-plot summary
// ---------------------------------------------------------------------------

/// Five-number summary for a box plot: whiskers at 1.5 × IQR past the
/// quartiles, clamped to the observed range.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let s = summarize(values)?;
    let iqr = s.q3 - s.q1;
    Some(BoxSummary {
        lower_whisker: (s.q1 - 1.5 * iqr).max(s.min),
        q1: s.q1,
        median: s.median,
        q3: s.q3,
        upper_whisker: (s.q3 + 1.5 * iqr).min(s.max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_known_series() {
        let s = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(s.count, 5);
        assert!((s.mean - 3.0).abs() < 1e-12);
        assert!((s.std - (2.5f64).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.q3, 4.0);
        assert_eq!(s.max, 5.0);
    }

    #[test]
    fn quartiles_interpolate() {
        let s = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((s.q1 - 1.75).abs() < 1e-12);
        assert!((s.median - 2.5).abs() < 1e-12);
        assert!((s.q3 - 3.25).abs() < 1e-12);
    }

    #[test]
    fn empty_input_has_no_summary() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn pearson_on_exact_linear_data() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let up: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let down: Vec<f64> = x.iter().map(|v| -0.5 * v).collect();
        assert!((pearson(&x, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_of_constant_series_is_zero() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[2.0, 3.0, 4.0]), 0.0);
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 9.9, 10.0];
        let bins = histogram(&values, 5);
        assert_eq!(bins.len(), 5);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, values.len());
        // The maximum belongs to the last bin.
        assert!(bins[4].count >= 1);
    }

    #[test]
    fn histogram_degenerate_range() {
        let bins = histogram(&[7.0, 7.0, 7.0], 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn box_whiskers_clamp_to_range() {
        let b = box_summary(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 5.0);
        assert_eq!(b.median, 3.0);
    }
}
