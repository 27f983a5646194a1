//! `ed-output` — what the operator sees: the ranking table, a CSV export of
//! it, and the traffic heatmap page.
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`table`]   | `format_ranking`, `format_recommendation`                 |
//! | [`csv`]     | `CsvWriter`                                               |
//! | [`heatmap`] | `HeatmapRenderer`, `Heatmap`, `HeatSample`, `HeatmapOptions` |
//! | [`error`]   | `OutputError`, `OutputResult<T>`                          |

pub mod csv;
pub mod error;
pub mod heatmap;
pub mod table;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use heatmap::{HeatSample, Heatmap, HeatmapOptions, HeatmapRenderer};
pub use table::{format_ranking, format_recommendation};
