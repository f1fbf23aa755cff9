use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{CarDataset, CarRecord, CellValue, RawTable};

// ---------------------------------------------------------------------------
// Column names & configuration
// ---------------------------------------------------------------------------

pub const COL_ASK_PRICE: &str = "AskPrice";
pub const COL_KM_DRIVEN: &str = "kmDriven";
pub const COL_YEAR: &str = "Year";
pub const COL_BRAND: &str = "Brand";
pub const COL_AGE: &str = "Age";

/// Reference year the Age column defaults to.  Kept as an explicit
/// configuration value instead of the wall clock: the same dataset must
/// produce the same ages on every run.
pub const DEFAULT_REFERENCE_YEAR: i64 = 2024;

/// Cleaning configuration.  One shared value per `prepare` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanConfig {
    pub reference_year: i64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure modes of the preparation pass.  Both are fatal for the load and
/// surface as a visible error instead of partial output.
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("required column '{0}' is missing from the input")]
    MissingColumn(&'static str),

    #[error("row {row}: cannot read '{column}' value '{value}' as a number")]
    NumericParse {
        column: &'static str,
        row: usize,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Numeric cleaning
// ---------------------------------------------------------------------------

/// Strip every character that is not an ASCII decimal digit and parse the
/// remainder as `f64`.  Returns `None` when nothing is left to parse.
///
/// This is deliberately lossy: currency symbols, thousands separators,
/// decimal points and minus signs are all discarded, so `"$12,500"` cleans
/// to `12500` and `"12.5"` cleans to `125`.  The rule matches the source
/// data, where prices arrive as noisy strings like `"₹ 4,50,000"`.
pub fn strip_to_digits(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Clean one price/mileage cell.
///
/// * `Null` or empty/whitespace-only text → `Ok(None)` – a missing value,
///   counted but never imputed.
/// * anything else → digit-strip the cell's display form; if no digits
///   survive, the cell is garbage and the whole conversion fails.
fn clean_numeric_cell(
    cell: Option<&CellValue>,
    column: &'static str,
    row: usize,
) -> Result<Option<f64>, PrepareError> {
    let cell = match cell {
        None | Some(CellValue::Null) => return Ok(None),
        Some(c) => c,
    };
    if let CellValue::String(s) = cell {
        if s.trim().is_empty() {
            return Ok(None);
        }
    }
    let text = cell.to_string();
    strip_to_digits(&text)
        .map(Some)
        .ok_or_else(|| PrepareError::NumericParse {
            column,
            row,
            value: text,
        })
}

/// Read the manufacture year.  No digit-stripping here: a year is either a
/// plain integer or missing.
fn clean_year_cell(
    cell: Option<&CellValue>,
    row: usize,
) -> Result<Option<i64>, PrepareError> {
    match cell {
        None | Some(CellValue::Null) => Ok(None),
        Some(CellValue::Integer(i)) => Ok(Some(*i)),
        Some(CellValue::Float(f)) if f.fract() == 0.0 => Ok(Some(*f as i64)),
        Some(CellValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(CellValue::String(s)) => {
            s.trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| PrepareError::NumericParse {
                    column: COL_YEAR,
                    row,
                    value: s.clone(),
                })
        }
        Some(other) => Err(PrepareError::NumericParse {
            column: COL_YEAR,
            row,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// prepare – raw table → cleaned dataset
// ---------------------------------------------------------------------------

/// Turn a freshly loaded [`RawTable`] into a [`CarDataset`]:
///
/// 1. verify `AskPrice`, `kmDriven` and `Year` columns exist;
/// 2. digit-strip and parse `AskPrice` and `kmDriven`;
/// 3. derive `Age = reference_year − Year` for every row, with the single
///    reference year from `config` shared across the whole dataset;
/// 4. count missing values per column (including the derived `Age`).
///
/// The raw table is not consumed; the caller can re-run `prepare` with a
/// different reference year.
pub fn prepare(raw: &RawTable, config: &CleanConfig) -> Result<CarDataset, PrepareError> {
    for required in [COL_ASK_PRICE, COL_KM_DRIVEN, COL_YEAR] {
        if !raw.has_column(required) {
            return Err(PrepareError::MissingColumn(required));
        }
    }
    let has_brand = raw.has_column(COL_BRAND);

    let mut records = Vec::with_capacity(raw.len());
    let mut null_counts: BTreeMap<String, usize> = raw
        .columns
        .iter()
        .map(|c| (c.clone(), 0usize))
        .collect();
    null_counts.insert(COL_AGE.to_string(), 0);

    for (row_no, row) in raw.rows.iter().enumerate() {
        let ask_price = clean_numeric_cell(row.get(COL_ASK_PRICE), COL_ASK_PRICE, row_no)?;
        let km_driven = clean_numeric_cell(row.get(COL_KM_DRIVEN), COL_KM_DRIVEN, row_no)?;
        let year = clean_year_cell(row.get(COL_YEAR), row_no)?;
        let age = year.map(|y| config.reference_year - y);

        let brand = match row.get(COL_BRAND) {
            Some(CellValue::Null) | None => None,
            Some(v) => {
                let s = v.to_string().trim().to_string();
                if s.is_empty() { None } else { Some(s) }
            }
        };

        let mut extra = BTreeMap::new();
        for col in &raw.columns {
            if matches!(col.as_str(), COL_ASK_PRICE | COL_KM_DRIVEN | COL_YEAR | COL_BRAND) {
                continue;
            }
            let cell = row.get(col).cloned().unwrap_or(CellValue::Null);
            if cell.is_null() {
                *null_counts.get_mut(col).unwrap() += 1;
            }
            extra.insert(col.clone(), cell);
        }

        if ask_price.is_none() {
            *null_counts.get_mut(COL_ASK_PRICE).unwrap() += 1;
        }
        if km_driven.is_none() {
            *null_counts.get_mut(COL_KM_DRIVEN).unwrap() += 1;
        }
        if year.is_none() {
            *null_counts.get_mut(COL_YEAR).unwrap() += 1;
            *null_counts.get_mut(COL_AGE).unwrap() += 1;
        }
        if has_brand && brand.is_none() {
            *null_counts.get_mut(COL_BRAND).unwrap() += 1;
        }

        records.push(CarRecord {
            ask_price,
            km_driven,
            year,
            age,
            brand,
            extra,
        });
    }

    Ok(CarDataset {
        records,
        columns: raw.columns.clone(),
        has_brand,
        reference_year: config.reference_year,
        null_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table(rows: Vec<Vec<(&str, CellValue)>>) -> RawTable {
        RawTable {
            columns: vec![
                "Brand".into(),
                "Year".into(),
                "AskPrice".into(),
                "kmDriven".into(),
            ],
            rows: rows
                .into_iter()
                .map(|cells| {
                    cells
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect()
                })
                .collect(),
        }
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.into())
    }

    #[test]
    fn strips_currency_noise() {
        assert_eq!(strip_to_digits("$12,500"), Some(12500.0));
        assert_eq!(strip_to_digits("₹ 4,50,000"), Some(450000.0));
        assert_eq!(strip_to_digits("70,000 km"), Some(70000.0));
        assert_eq!(strip_to_digits("450000"), Some(450000.0));
    }

    #[test]
    fn stripping_is_lossy_on_purpose() {
        // Decimal points and signs are discarded, not preserved.
        assert_eq!(strip_to_digits("12.5"), Some(125.0));
        assert_eq!(strip_to_digits("-300"), Some(300.0));
    }

    #[test]
    fn no_digits_means_nothing_to_parse() {
        assert_eq!(strip_to_digits("n/a"), None);
        assert_eq!(strip_to_digits(""), None);
    }

    #[test]
    fn missing_required_column_fails() {
        let raw = RawTable {
            columns: vec!["Brand".into(), "Year".into(), "AskPrice".into()],
            rows: vec![],
        };
        let err = prepare(&raw, &CleanConfig::default()).unwrap_err();
        assert!(matches!(err, PrepareError::MissingColumn("kmDriven")));
    }

    #[test]
    fn garbage_numeric_cell_fails_strictly() {
        let raw = raw_table(vec![vec![
            ("Brand", s("Honda")),
            ("Year", CellValue::Integer(2019)),
            ("AskPrice", s("call for price")),
            ("kmDriven", s("50,000 km")),
        ]]);
        let err = prepare(&raw, &CleanConfig::default()).unwrap_err();
        match err {
            PrepareError::NumericParse { column, row, .. } => {
                assert_eq!(column, "AskPrice");
                assert_eq!(row, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_cells_pass_through_and_are_counted() {
        let raw = raw_table(vec![
            vec![
                ("Brand", s("Honda")),
                ("Year", CellValue::Integer(2019)),
                ("AskPrice", s("₹ 5,10,000")),
                ("kmDriven", CellValue::Null),
            ],
            vec![
                ("Brand", CellValue::Null),
                ("Year", CellValue::Null),
                ("AskPrice", s("")),
                ("kmDriven", s("30,000 km")),
            ],
        ]);
        let ds = prepare(&raw, &CleanConfig::default()).unwrap();
        assert_eq!(ds.records[0].km_driven, None);
        assert_eq!(ds.records[1].ask_price, None);
        assert_eq!(ds.records[1].age, None);
        assert_eq!(ds.null_counts["kmDriven"], 1);
        assert_eq!(ds.null_counts["AskPrice"], 1);
        assert_eq!(ds.null_counts["Year"], 1);
        assert_eq!(ds.null_counts["Age"], 1);
        assert_eq!(ds.null_counts["Brand"], 1);
    }

    #[test]
    fn age_uses_one_shared_reference_year() {
        let raw = raw_table(vec![
            vec![
                ("Brand", s("Maruti Suzuki")),
                ("Year", CellValue::Integer(2020)),
                ("AskPrice", s("4,00,000")),
                ("kmDriven", s("10,000")),
            ],
            vec![
                ("Brand", s("Tata")),
                ("Year", CellValue::Integer(2010)),
                ("AskPrice", s("1,50,000")),
                ("kmDriven", s("90,000")),
            ],
        ]);
        let ds = prepare(&raw, &CleanConfig { reference_year: 2024 }).unwrap();
        assert_eq!(ds.records[0].age, Some(4));
        assert_eq!(ds.records[1].age, Some(14));
        assert_eq!(ds.reference_year, 2024);
    }

    #[test]
    fn end_to_end_scenario() {
        // Two listings: ("10,000", 2015) and ("25000", 2022).
        let raw = raw_table(vec![
            vec![
                ("Brand", s("Ford")),
                ("Year", CellValue::Integer(2015)),
                ("AskPrice", s("10,000")),
                ("kmDriven", s("80,000")),
            ],
            vec![
                ("Brand", s("Kia")),
                ("Year", CellValue::Integer(2022)),
                ("AskPrice", CellValue::Integer(25000)),
                ("kmDriven", s("5,000")),
            ],
        ]);
        let ds = prepare(&raw, &CleanConfig::default()).unwrap();
        assert_eq!(ds.records[0].ask_price, Some(10000.0));
        assert_eq!(ds.records[1].ask_price, Some(25000.0));
        assert_eq!(ds.records[0].age, Some(9));
        assert_eq!(ds.records[1].age, Some(2));

        let hits = super::super::filter::filter_by_price(&ds, 12000.0, 30000.0);
        assert_eq!(hits, vec![1]);
    }
}
