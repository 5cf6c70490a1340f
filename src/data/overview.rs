//! Dataset overview metrics.

use polars::prelude::DataFrame;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overview {
    pub rows: usize,
    pub columns: usize,
    pub memory_kb: f64,
}

impl Overview {
    pub fn of(df: &DataFrame) -> Self {
        Self {
            rows: df.height(),
            columns: df.width(),
            memory_kb: df.estimated_size() as f64 / 1024.0,
        }
    }

    pub fn memory_label(&self) -> String {
        format!("{:.2} KB", self.memory_kb)
    }
}
