/// Data layer: core types, loading, cleaning, filtering, statistics.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (typed cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  strip noise, derive Age → CarDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │     │  stats    │
///   └──────────┘     └──────────┘
///    price range,      describe, correlation,
///    top brands        histogram, box summary
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
