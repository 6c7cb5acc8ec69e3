/// Data layer: core types, loading, and preparation.
///
/// Architecture:
/// ```text
///  winequality-red.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate header → WineDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  prepare  │  dedupe, missing report, label, seeded split
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ PreparedDataset  │  Vec<LabeledSample>, train/test indices
///   └─────────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod prepare;
