/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  kiva_loans_cleaned.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LoanDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LoanDataset  │  Vec<LoanRecord>, choice sets, amount bounds
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply Selection predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  aggregate    │  group/summarize the view → chart tables
///   └──────────────┘
/// ```
///
/// Everything below the loader is pure and UI-free so it can be tested
/// headless.

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
