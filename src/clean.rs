use crate::data::{KEPT_COLUMNS, LoadOptions};
use crate::error::AnalysisError;
use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info};

const REQUIRED_COLUMNS: [&str; 9] = [
    "popularity",
    "budget",
    "revenue",
    "original_title",
    "runtime",
    "release_date",
    "vote_count",
    "vote_average",
    "release_year",
];

/// Multi-value text columns that are always materialized as text, never null.
const TEXT_COLUMNS: [&str; 3] = ["cast", "genres", "production_companies"];

/// Text written for a missing multi-value field; it is counted as its own token.
pub const MISSING_TEXT: &str = "nan";

const ADJUSTED_COLUMNS: [&str; 2] = ["budget_adj", "revenue_adj"];

/// Row accounting for one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub duplicates_removed: usize,
    pub unrecorded_removed: usize,
    pub rows_kept: usize,
}

impl CleanReport {
    /// Fraction of the input rows that survived cleaning.
    pub fn survival_ratio(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            self.rows_kept as f64 / self.rows_read as f64
        }
    }
}

/// Coerces, deduplicates, prunes and filters a movie frame.
///
/// Running it again on its own output changes nothing.
pub fn clean(df: DataFrame, opts: &LoadOptions) -> Result<(DataFrame, CleanReport), AnalysisError> {
    let rows_read = df.height();

    let typed = coerce(df, opts)?;
    let deduped = dedup(typed)?;
    let pruned = dedup(deduped.select(KEPT_COLUMNS)?)?;
    let duplicates_removed = rows_read - pruned.height();
    debug!(duplicates_removed, "removed duplicate rows");

    let before_filter = pruned.height();
    let kept = drop_unrecorded(pruned)?;

    let report = CleanReport {
        rows_read,
        duplicates_removed,
        unrecorded_removed: before_filter - kept.height(),
        rows_kept: kept.height(),
    };
    info!(
        rows_read,
        duplicates_removed = report.duplicates_removed,
        unrecorded_removed = report.unrecorded_removed,
        rows_kept = report.rows_kept,
        survival = %format!("{:.1}%", report.survival_ratio() * 100.0),
        "cleaned movie table"
    );

    Ok((kept, report))
}

/// Assigns the movie schema's types to the kept columns. Columns that already
/// carry their final type pass through untouched.
pub fn coerce(df: DataFrame, opts: &LoadOptions) -> Result<DataFrame, AnalysisError> {
    let mut exprs = vec![
        col("popularity").strict_cast(DataType::Float64),
        col("vote_average").strict_cast(DataType::Float64),
        col("budget").strict_cast(DataType::Int64),
        col("revenue").strict_cast(DataType::Int64),
        col("vote_count").strict_cast(DataType::Int64),
        col("runtime").strict_cast(DataType::Int32),
        col("release_year").strict_cast(DataType::Int32),
    ];
    // Adjusted amounts are exported as floats; the fractional part is truncated.
    exprs.extend(ADJUSTED_COLUMNS.map(|name| {
        col(name)
            .strict_cast(DataType::Float64)
            .strict_cast(DataType::Int64)
    }));
    exprs.extend(TEXT_COLUMNS.map(|name| col(name).fill_null(lit(MISSING_TEXT))));

    let mut df = df.lazy().with_columns(exprs).collect()?;
    parse_release_dates(&mut df, &opts.date_format)?;
    check_required(&df)?;
    Ok(df)
}

fn parse_release_dates(df: &mut DataFrame, format: &str) -> Result<(), AnalysisError> {
    let column = df.column("release_date")?;
    if column.dtype() == &DataType::Date {
        return Ok(());
    }

    let epoch = NaiveDate::default();
    let days = column
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            None => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text.trim(), format)
                .map(|date| Some((date - epoch).num_days() as i32))
                .map_err(|_| AnalysisError::InvalidDate {
                    row,
                    value: text.to_string(),
                    format: format.to_string(),
                }),
        })
        .collect::<Result<Vec<Option<i32>>, AnalysisError>>()?;

    let dates = Series::new("release_date".into(), days).cast(&DataType::Date)?;
    df.with_column(dates)?;
    Ok(())
}

fn check_required(df: &DataFrame) -> Result<(), AnalysisError> {
    for name in REQUIRED_COLUMNS {
        let column = df.column(name)?;
        if column.null_count() == 0 {
            continue;
        }
        let row = column
            .is_null()
            .into_iter()
            .position(|is_null| is_null == Some(true))
            .unwrap_or_default();
        return Err(AnalysisError::MissingValue {
            column: name.to_string(),
            row,
        });
    }
    Ok(())
}

fn dedup(df: DataFrame) -> Result<DataFrame, AnalysisError> {
    Ok(df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?)
}

/// Zero is not a valid adjusted amount: it is read as "not recorded" and the
/// row is dropped along with rows where either amount is null.
fn drop_unrecorded(df: DataFrame) -> Result<DataFrame, AnalysisError> {
    let zero_as_null = ADJUSTED_COLUMNS.map(|name| {
        when(col(name).eq(lit(0i64)))
            .then(lit(NULL).cast(DataType::Int64))
            .otherwise(col(name))
            .alias(name)
    });

    Ok(df
        .lazy()
        .with_columns(zero_as_null)
        .filter(
            col("budget_adj")
                .is_not_null()
                .and(col("revenue_adj").is_not_null()),
        )
        .collect()?)
}
