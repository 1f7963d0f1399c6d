//! Quiz gap tracking: spaced repetition review of missed questions plus
//! XP, levels, streaks and badges.
//!
//! The engines in [`flashcards`] and [`gamification`] are pure functions over
//! records. [`tracker::Tracker`] layers them over a [`storage::LearnerStore`].

pub mod flashcards;
pub mod gamification;
pub mod quiz;
pub mod storage;
pub mod tracker;

pub use tracker::{Tracker, TrackerError};
