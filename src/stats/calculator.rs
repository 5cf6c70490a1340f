//! Statistics Calculator Module
//! Descriptive statistics (`describe`) for a loaded DataFrame.

use crate::data::numeric_columns;
use polars::prelude::*;
use rayon::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("DataFrame has no columns")]
    NoColumns,
}

pub const NUMERIC_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
pub const CATEGORICAL_ROWS: [&str; 4] = ["count", "unique", "top", "freq"];

/// Summary of one numeric column.
#[derive(Debug, Clone)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Summarise `values`; nulls must already be removed, NaN is skipped here.
    pub fn from_values(column: &str, values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sorted.len();
        let mean = if n > 0 {
            sorted.iter().sum::<f64>() / n as f64
        } else {
            f64::NAN
        };

        // Sample standard deviation; undefined for a single value.
        let std = if n > 1 {
            (sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Self {
            column: column.to_string(),
            count: n,
            mean,
            std,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            p25: percentile(&sorted, 25.0),
            p50: percentile(&sorted, 50.0),
            p75: percentile(&sorted, 75.0),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    fn row(&self, row: usize) -> Option<String> {
        let value = match row {
            0 => return Some(self.count.to_string()),
            1 => self.mean,
            2 => self.std,
            3 => self.min,
            4 => self.p25,
            5 => self.p50,
            6 => self.p75,
            7 => self.max,
            _ => return None,
        };
        Some(format_stat(value))
    }
}

/// Summary of one non-numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

impl CategoricalSummary {
    /// Summarise present values. Ties for `top` go to the value seen first.
    pub fn from_values<'a>(column: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut count = 0;
        for (i, v) in values.into_iter().enumerate() {
            count += 1;
            counts.entry(v).or_insert((0, i)).0 += 1;
        }

        let top = counts
            .iter()
            .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
            .map(|(v, (c, _))| (v.to_string(), *c));

        Self {
            column: column.to_string(),
            count,
            unique: counts.len(),
            freq: top.as_ref().map(|(_, c)| *c).unwrap_or(0),
            top: top.map(|(v, _)| v),
        }
    }

    fn row(&self, row: usize) -> Option<String> {
        match row {
            0 => Some(self.count.to_string()),
            1 => Some(self.unique.to_string()),
            2 => Some(self.top.clone().unwrap_or_else(|| "NaN".to_string())),
            3 => Some(self.freq.to_string()),
            _ => None,
        }
    }
}

/// Result of `describe`.
#[derive(Debug, Clone)]
pub enum Describe {
    Numeric(Vec<NumericSummary>),
    Categorical(Vec<CategoricalSummary>),
}

impl Describe {
    pub fn row_labels(&self) -> &'static [&'static str] {
        match self {
            Describe::Numeric(_) => &NUMERIC_ROWS,
            Describe::Categorical(_) => &CATEGORICAL_ROWS,
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        match self {
            Describe::Numeric(cols) => cols.iter().map(|c| c.column.as_str()).collect(),
            Describe::Categorical(cols) => cols.iter().map(|c| c.column.as_str()).collect(),
        }
    }

    /// Formatted cell at (`row`, `column`) index.
    pub fn cell(&self, row: usize, column: usize) -> Option<String> {
        match self {
            Describe::Numeric(cols) => cols.get(column)?.row(row),
            Describe::Categorical(cols) => cols.get(column)?.row(row),
        }
    }
}

pub fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.4}", value)
    }
}

/// Calculate percentile using linear interpolation (NumPy compatible).
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

/// Present values of a numeric column as f64.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, PolarsError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().flatten().collect())
}

fn categorical_summary(df: &DataFrame, name: &str) -> Result<CategoricalSummary, PolarsError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let ca = column.str()?;
    Ok(CategoricalSummary::from_values(name, ca.into_iter().flatten()))
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summary statistics: numeric columns when any exist, otherwise a
    /// count/unique/top/freq summary of every column.
    pub fn describe(df: &DataFrame) -> Result<Describe, StatsError> {
        if df.width() == 0 {
            return Err(StatsError::NoColumns);
        }

        let numeric = numeric_columns(df);
        if numeric.is_empty() {
            let summaries = df
                .get_column_names()
                .iter()
                .map(|name| categorical_summary(df, name))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Describe::Categorical(summaries));
        }

        // Use rayon for parallel computation; collect keeps column order
        let summaries = numeric
            .par_iter()
            .map(|name| {
                let values = column_values(df, name)?;
                Ok::<_, PolarsError>(NumericSummary::from_values(name, &values))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Described {} numeric column(s)", summaries.len());
        Ok(Describe::Numeric(summaries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn numeric_summary_matches_reference() {
        let s = NumericSummary::from_values("v", &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.count, 4);
        assert!(approx(s.mean, 2.5));
        assert!(approx(s.std, 1.2909944487358056));
        assert!(approx(s.min, 1.0));
        assert!(approx(s.p25, 1.75));
        assert!(approx(s.p50, 2.5));
        assert!(approx(s.p75, 3.25));
        assert!(approx(s.max, 4.0));
    }

    #[test]
    fn single_value_has_nan_std() {
        let s = NumericSummary::from_values("v", &[7.0]);
        assert_eq!(s.count, 1);
        assert!(s.std.is_nan());
        assert!(approx(s.p75, 7.0));
    }

    #[test]
    fn nan_values_excluded() {
        let s = NumericSummary::from_values("v", &[1.0, f64::NAN, 3.0]);
        assert_eq!(s.count, 2);
        assert!(approx(s.mean, 2.0));
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0];
        assert!(approx(percentile(&sorted, 50.0), 20.0));
        assert!(approx(percentile(&sorted, 25.0), 15.0));
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn categorical_top_prefers_first_seen_on_tie() {
        let s = CategoricalSummary::from_values("c", ["b", "a", "a", "b", "c"]);
        assert_eq!(s.count, 5);
        assert_eq!(s.unique, 3);
        assert_eq!(s.top.as_deref(), Some("b"));
        assert_eq!(s.freq, 2);
    }

    #[test]
    fn describe_numeric_frame_skips_strings_and_nulls() {
        let df = DataFrame::new(vec![
            Column::new("name".into(), vec!["Alice", "Bob", "Charlie"]),
            Column::new("age".into(), vec![Some(25i64), None, Some(35)]),
            Column::new("score".into(), vec![85.0f64, 92.0, 78.0]),
        ])
        .unwrap();

        let describe = StatsCalculator::describe(&df).unwrap();
        assert_eq!(describe.column_names(), vec!["age", "score"]);
        assert_eq!(describe.row_labels(), &NUMERIC_ROWS);
        assert_eq!(describe.cell(0, 0).as_deref(), Some("2"));
        assert_eq!(describe.cell(1, 0).as_deref(), Some("30.0000"));
        assert_eq!(describe.cell(7, 1).as_deref(), Some("92.0000"));
        assert!(describe.cell(8, 0).is_none());
        assert!(describe.cell(0, 2).is_none());
    }

    #[test]
    fn describe_text_frame_is_categorical() {
        let df = DataFrame::new(vec![Column::new(
            "city".into(),
            vec![Some("Paris"), Some("Oslo"), None, Some("Paris")],
        )])
        .unwrap();

        match StatsCalculator::describe(&df).unwrap() {
            Describe::Categorical(cols) => {
                assert_eq!(
                    cols[0],
                    CategoricalSummary {
                        column: "city".to_string(),
                        count: 3,
                        unique: 2,
                        top: Some("Paris".to_string()),
                        freq: 2,
                    }
                );
            }
            other => panic!("expected categorical summary, got {:?}", other),
        }
    }

    #[test]
    fn describe_empty_frame_errors() {
        let df = DataFrame::empty();
        assert!(matches!(
            StatsCalculator::describe(&df),
            Err(StatsError::NoColumns)
        ));
    }
}
