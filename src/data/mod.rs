/// Data layer: event records and row selections.
///
/// Architecture:
/// ```text
///   caller-built records
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, column index
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ Selection │  AllRows | Mask(Vec<bool>) → rows entering a series
///   └───────────┘
/// ```

pub mod model;
pub mod selection;
