//! Deterministic fallback engine integration (UCI process protocol).

pub mod engine;

pub use engine::{UciEngine, MAX_UCI_LINES};
