//! `ed-traffic` — best-effort live traffic speed lookup.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`source`] | `SpeedSource` trait, `FixedSpeed`                      |
//! | [`tomtom`] | `TomTomClient`, `TomTomConfig` (blocking HTTP)         |
//! | [`flow`]   | `parse_flow_segment`, `FlowSegment`                    |
//! | [`error`]  | `TrafficError`, `TrafficResult<T>`                     |
//!
//! Traffic data is advisory.  [`SpeedSource::speed_or_unknown`] turns every
//! failure into `None` so a single bad lookup never aborts a dispatch run.

pub mod error;
pub mod flow;
pub mod source;
pub mod tomtom;


pub use error::{TrafficError, TrafficResult};
pub use flow::{FlowSegment, parse_flow_segment};
pub use source::{FixedSpeed, SpeedSource};
pub use tomtom::{TomTomClient, TomTomConfig};
