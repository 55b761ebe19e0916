use crate::data::MovieData;
use crate::error::AnalysisError;
use crate::movie::Movie;
use polars::prelude::*;

/// Every movie tied at the top and at the bottom of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremes {
    pub column: &'static str,
    pub highest: Vec<Movie>,
    pub lowest: Vec<Movie>,
}

/// Rows whose `column` equals `target` (an aggregate of the same column).
fn tied_at(db: &MovieData, column: &str, target: Expr) -> Result<Vec<Movie>, AnalysisError> {
    let subset = db
        .movies
        .clone()
        .lazy()
        .filter(col(column).eq(target))
        .collect()?;
    Movie::from_frame(&subset)
}

fn extremes(db: &MovieData, column: &'static str) -> Result<Option<Extremes>, AnalysisError> {
    if db.is_empty() {
        return Ok(None);
    }
    Ok(Some(Extremes {
        column,
        highest: tied_at(db, column, col(column).max())?,
        lowest: tied_at(db, column, col(column).min())?,
    }))
}

/// Movies with the highest popularity score.
pub fn most_popular(db: &MovieData) -> Result<Option<Vec<Movie>>, AnalysisError> {
    if db.is_empty() {
        return Ok(None);
    }
    let res = tied_at(db, "popularity_score", col("popularity_score").max())?;
    Ok(Some(res))
}

pub fn budget_extremes(db: &MovieData) -> Result<Option<Extremes>, AnalysisError> {
    extremes(db, "budget_adj")
}

pub fn revenue_extremes(db: &MovieData) -> Result<Option<Extremes>, AnalysisError> {
    extremes(db, "revenue_adj")
}

pub fn profit_extremes(db: &MovieData) -> Result<Option<Extremes>, AnalysisError> {
    extremes(db, "profit_adj")
}

pub fn runtime_extremes(db: &MovieData) -> Result<Option<Extremes>, AnalysisError> {
    extremes(db, "runtime")
}
