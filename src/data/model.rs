use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the raw input table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring common Pandas dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in ordered collections --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// RawTable – the loaded file before cleaning
// ---------------------------------------------------------------------------

/// The parsed input file: column names in source order plus one
/// name → cell map per row. Cells carry whatever type the loader guessed;
/// the cleaning pass in [`crate::data::clean`] is what turns this into a
/// [`CarDataset`].
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, CellValue>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// CarRecord – one cleaned row
// ---------------------------------------------------------------------------

/// A single listing (one row of the cleaned dataset).
///
/// The numeric fields are `Option` because missing input cells pass through
/// as missing: they are counted, never imputed.
#[derive(Debug, Clone)]
pub struct CarRecord {
    /// Listed sale price after digit-stripping.
    pub ask_price: Option<f64>,
    /// Total distance driven after digit-stripping.
    pub km_driven: Option<f64>,
    /// Manufacture year as found in the input.
    pub year: Option<i64>,
    /// Derived: reference year minus manufacture year.
    pub age: Option<i64>,
    /// Brand label, if the input carries a Brand column.
    pub brand: Option<String>,
    /// All remaining columns, passed through untouched.
    pub extra: BTreeMap<String, CellValue>,
}

// ---------------------------------------------------------------------------
// Numeric column selector
// ---------------------------------------------------------------------------

/// The four numeric columns the statistics views operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    AskPrice,
    KmDriven,
    Year,
    Age,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 4] = [
        NumericColumn::AskPrice,
        NumericColumn::Year,
        NumericColumn::Age,
        NumericColumn::KmDriven,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NumericColumn::AskPrice => "AskPrice",
            NumericColumn::KmDriven => "kmDriven",
            NumericColumn::Year => "Year",
            NumericColumn::Age => "Age",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CarDataset – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset. Immutable after [`crate::data::clean::prepare`];
/// views over it are index vectors, the records themselves are never
/// mutated or reordered.
#[derive(Debug, Clone)]
pub struct CarDataset {
    /// All listings, in source-file order.
    pub records: Vec<CarRecord>,
    /// Source column order (used by the data table views).
    pub columns: Vec<String>,
    /// Whether the input carried a Brand column.
    pub has_brand: bool,
    /// The reference year the Age column was derived from.
    pub reference_year: i64,
    /// Missing-value count per column, including the derived Age.
    pub null_counts: BTreeMap<String, usize>,
}

impl CarDataset {
    /// Number of listings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read one numeric column of a record.
    pub fn numeric_value(&self, idx: usize, col: NumericColumn) -> Option<f64> {
        let rec = &self.records[idx];
        match col {
            NumericColumn::AskPrice => rec.ask_price,
            NumericColumn::KmDriven => rec.km_driven,
            NumericColumn::Year => rec.year.map(|y| y as f64),
            NumericColumn::Age => rec.age.map(|a| a as f64),
        }
    }

    /// All non-missing values of a numeric column, in record order.
    pub fn column_values(&self, col: NumericColumn) -> Vec<f64> {
        (0..self.records.len())
            .filter_map(|i| self.numeric_value(i, col))
            .collect()
    }

    /// Price bounds for the filter's default (no-op) range:
    /// `[floor(min AskPrice), ceil(max AskPrice)]`.
    /// `None` when no record has a price.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for rec in &self.records {
            if let Some(p) = rec.ask_price {
                min = min.min(p);
                max = max.max(p);
            }
        }
        if min.is_finite() {
            Some((min.floor(), max.ceil()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: Option<f64>, year: Option<i64>) -> CarRecord {
        CarRecord {
            ask_price: price,
            km_driven: None,
            year,
            age: year.map(|y| 2024 - y),
            brand: None,
            extra: BTreeMap::new(),
        }
    }

    fn dataset(records: Vec<CarRecord>) -> CarDataset {
        CarDataset {
            records,
            columns: vec!["AskPrice".into(), "kmDriven".into(), "Year".into()],
            has_brand: false,
            reference_year: 2024,
            null_counts: BTreeMap::new(),
        }
    }

    #[test]
    fn price_bounds_are_floor_and_ceil() {
        let ds = dataset(vec![
            record(Some(1000.2), Some(2020)),
            record(Some(24999.7), Some(2015)),
            record(None, Some(2010)),
        ]);
        assert_eq!(ds.price_bounds(), Some((1000.0, 25000.0)));
    }

    #[test]
    fn price_bounds_none_when_all_prices_missing() {
        let ds = dataset(vec![record(None, Some(2020))]);
        assert_eq!(ds.price_bounds(), None);
    }

    #[test]
    fn column_values_skip_missing() {
        let ds = dataset(vec![
            record(Some(5000.0), None),
            record(None, Some(2018)),
        ]);
        assert_eq!(ds.column_values(NumericColumn::AskPrice), vec![5000.0]);
        assert_eq!(ds.column_values(NumericColumn::Age), vec![6.0]);
    }

    #[test]
    fn cell_value_ordering_is_total() {
        let mut vals = vec![
            CellValue::String("b".into()),
            CellValue::Null,
            CellValue::Integer(3),
            CellValue::Float(1.5),
            CellValue::String("a".into()),
        ];
        vals.sort();
        assert_eq!(vals[0], CellValue::Null);
        assert_eq!(vals[4], CellValue::String("b".into()));
    }
}
