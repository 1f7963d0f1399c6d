//! Quiz results and history statistics

pub mod models;
pub mod stats;

pub use models::*;
pub use stats::quiz_stats;
