/// Data layer: core types, loading, month ordering, and aggregates.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  normalize headers, validate, derive totals → GuiaDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ GuiaDataset │  Vec<Guia>, column order, months (chronological)
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  month filter → summary, Pareto, top rankings
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod months;
pub mod stats;
