/// Data layer: core types, the startup query, and filtering.
///
/// Architecture:
/// ```text
///  InfluxDB /api/v2/query          comparison CSV
///        │                               │
///        ▼                               ▼
///   ┌──────────┐                    ┌──────────┐
///   │  influx   │ annotated CSV →   │  loader   │ offline dataset
///   └──────────┘  Vec<Reading>      └──────────┘ + cache write
///        │
///        ▼
///   ┌────────────┐
///   │ ReadingSet  │  write-once, location index
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  checklist + date range → filtered indices
///   └──────────┘
/// ```
pub mod filter;
pub mod influx;
pub mod loader;
pub mod model;
