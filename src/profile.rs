use crate::error::AnalysisError;
use polars::prelude::*;

/// Shape and quality of the export before any cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProfile {
    pub rows: usize,
    pub columns: usize,
    pub null_counts: Vec<(String, usize)>,
    pub duplicate_rows: usize,
}

impl RawProfile {
    pub fn of(df: &DataFrame) -> Result<Self, AnalysisError> {
        let null_counts = df
            .get_columns()
            .iter()
            .map(|column| (column.name().to_string(), column.null_count()))
            .collect();

        let distinct = df
            .clone()
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?
            .height();

        Ok(RawProfile {
            rows: df.height(),
            columns: df.width(),
            null_counts,
            duplicate_rows: df.height() - distinct,
        })
    }
}
