/// Data layer: grid model, loading, filtering and export.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Grid, forward-fill group columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Grid     │  named columns, rectangular string cells
///   └──────────┘
///        │
///        ▼   (timetable::merge_timetable)
///   ┌──────────┐
///   │  filter   │  course search over merged entries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  csv / tsv / json
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
