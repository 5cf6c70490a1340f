//! CSV Data Loader Module
//! Handles CSV file loading and column extraction using Polars.

use crate::config::{ConfigError, CsvOptions};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV file is empty")]
    Empty,
    #[error(transparent)]
    Options(#[from] ConfigError),
}

/// Parse a CSV file into a DataFrame.
///
/// Rows that fail to parse are skipped rather than aborting the load.
pub fn load_csv(path: &Path, options: &CsvOptions) -> Result<DataFrame, LoaderError> {
    let meta = std::fs::metadata(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if meta.len() == 0 {
        return Err(LoaderError::Empty);
    }

    let df = LazyCsvReader::new(path)
        .with_separator(options.separator_byte()?)
        .with_has_header(options.has_header)
        .with_infer_schema_length(options.infer_schema_length)
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    if df.width() == 0 {
        return Err(LoaderError::Empty);
    }
    Ok(df)
}

/// Whether a dtype counts as numeric for statistics and plotting.
pub fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Names of the numeric columns of a frame, in frame order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric(col.dtype()))
        .map(|col| col.name().to_string())
        .collect()
}

/// Holds the currently explored DataFrame.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
    numeric: Vec<String>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
            numeric: Vec::new(),
        }
    }

    /// Numeric column names, computed once per load.
    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric
    }

    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set DataFrame directly (used for background loading)
    pub fn set_dataframe(&mut self, path: PathBuf, df: DataFrame) {
        self.numeric = numeric_columns(&df);
        self.file_path = Some(path);
        self.df = Some(df);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "data_explorer_loader_{}_{}.csv",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_rows_and_columns() {
        let path = write_csv(
            "basic",
            "name,age,score\nAlice,25,85.5\nBob,30,92.0\nCharlie,35,78.25\n",
        );
        let df = load_csv(&path, &CsvOptions::default()).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);

        let mut loader = DataLoader::new();
        loader.set_dataframe(path.clone(), df);
        assert_eq!(loader.dataframe().map(|df| df.height()), Some(3));
        assert_eq!(loader.numeric_columns(), &["age".to_string(), "score".to_string()]);
        assert_eq!(loader.file_path(), Some(&path));
    }

    #[test]
    fn honours_separator() {
        let path = write_csv("semicolon", "a;b\n1;2\n3;4\n");
        let options = CsvOptions {
            separator: ';',
            ..Default::default()
        };
        let df = load_csv(&path, &options).unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(numeric_columns(&df), vec!["a", "b"]);
    }

    #[test]
    fn empty_file_is_rejected() {
        let path = write_csv("empty", "");
        assert!(matches!(
            load_csv(&path, &CsvOptions::default()),
            Err(LoaderError::Empty)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("data_explorer_definitely_missing.csv");
        assert!(matches!(
            load_csv(&path, &CsvOptions::default()),
            Err(LoaderError::Io { .. })
        ));
    }

    #[test]
    fn mixed_column_is_not_numeric() {
        let path = write_csv("ragged", "a,b\n1,2\n3,oops\n5,6\n");
        let df = load_csv(&path, &CsvOptions::default()).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(numeric_columns(&df), vec!["a"]);
    }

    #[test]
    fn reloading_replaces_numeric_columns() {
        let mut loader = DataLoader::new();
        let first = write_csv("first", "x,y\n1,2\n");
        loader.set_dataframe(first.clone(), load_csv(&first, &CsvOptions::default()).unwrap());
        let second = write_csv("second", "label\nfoo\n");
        loader.set_dataframe(second.clone(), load_csv(&second, &CsvOptions::default()).unwrap());
        assert!(loader.numeric_columns().is_empty());
        assert_eq!(loader.file_path(), Some(&second));
    }
}
