/// Data layer: core table types, CSV loading, and CSV writing.
///
/// Architecture:
/// ```text
///  per-model .csv files
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ResultTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ ResultTable  │  Vec<Row>, ordered column names
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  consolidated table → single .csv
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod writer;
