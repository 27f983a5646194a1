//! `ed-dispatch` — compare fleet ETAs to an incident and pick a vehicle.
//!
//! # Crate layout
//!
//! | Module     | Contents                                         |
//! |------------|--------------------------------------------------|
//! | [`ranker`] | `DispatchRanker`                                 |
//! | [`result`] | `EtaResult`, `EtaStatus`, `Ranking`              |
//!
//! # Usage
//!
//! ```rust,ignore
//! let ranker = DispatchRanker::new(&network, DijkstraRouter, client);
//! let ranking = ranker.rank(&fleet, incident);
//! if let Some(best) = ranking.best_reachable() {
//!     println!("dispatch {}", best.vehicle);
//! }
//! ```

pub mod ranker;
pub mod result;

#[cfg(test)]
mod tests;

pub use ranker::DispatchRanker;
pub use result::{EtaResult, EtaStatus, Ranking};
