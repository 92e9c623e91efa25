/// Data layer: core types, loading, and the session cache.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  memoize by content hash → Arc<Table>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  named columns × row-major cells
///   └──────────┘
/// ```

pub mod cache;
pub mod loader;
pub mod model;
