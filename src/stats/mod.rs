//! Stats module - descriptive statistics

mod calculator;

pub use calculator::{Describe, StatsCalculator};
