//! Drives configured pools through their selectors and reports the outcome.

mod pool;
mod report;

pub use pool::Pool;
pub use report::{Report, TargetTally};
