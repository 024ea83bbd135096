//! Salon valuation engine.
//!
//! - `domain`: the pure pipeline (validate, SDE, multiple, band) and its records.
//! - `infra`: persistence sinks for computed leads (local JSON log, REST table).
//! - `util`: settings file, version label, display formatting.

pub mod domain;
pub mod infra;
pub mod util;

pub use domain::{calculate, estimate, validate};
