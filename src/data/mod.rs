/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  bundled / .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SkiPassDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ SkiPassDataset  │  Vec<SkiPassRecord>, category index
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  season predicate → filtered records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  average price, counts, season × pass type
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
