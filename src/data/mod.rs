/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable (+ payload bounds)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable │  Vec<LaunchRecord>, sites, bounds (read-only)
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site selection + payload range → matching records
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
