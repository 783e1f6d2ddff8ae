//! Home temperature/humidity dashboard.
//!
//! One blocking query against InfluxDB loads the reading set, a one-off
//! statistics pass derives the summary and pairwise-comparison tables,
//! and an egui view re-generates charts through an explicit update table
//! whenever a control changes. Two binaries share this library: the full
//! dashboard (`sensordash`) and the compact `quicklook` variant.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod stats;
pub mod ui;
pub mod view;
