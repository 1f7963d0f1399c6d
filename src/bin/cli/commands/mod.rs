pub mod due;
pub mod progress;
pub mod quiz;
pub mod review;
pub mod stats;
