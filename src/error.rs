use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading, cleaning, or reporting on the movie table.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("CSV header does not match the movie schema: missing {missing:?}, unexpected {unexpected:?}")]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Row {row} has {fields} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        fields: usize,
        expected: usize,
    },

    #[error("Unparseable release_date {value:?} at row {row} (expected format {format:?})")]
    InvalidDate {
        row: usize,
        value: String,
        format: String,
    },

    #[error("Missing value in required column {column:?} at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Chart rendering failed: {0}")]
    Chart(String),
}
