//! Spaced repetition review for missed quiz questions
//!
//! This module provides:
//! - Review items seeded from wrong quiz answers
//! - SM-2 style scheduler
//! - Due-set queries and review statistics

pub mod algorithm;
pub mod collection;
pub mod models;

pub use algorithm::{SchedulerError, due_items, grade};
pub use models::*;
