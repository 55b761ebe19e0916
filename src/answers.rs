use crate::data::MovieData;
use crate::error::AnalysisError;
use crate::extremes::{
    Extremes, budget_extremes, most_popular, profit_extremes, revenue_extremes, runtime_extremes,
};
use crate::movie::Movie;
use crate::runtime::{
    HISTOGRAM_BINS, HistogramBin, RuntimeSummary, runtime_histogram, runtime_summary,
};
use crate::tokens::{TokenCounts, genre_counts, top_cast, top_companies, top_directors};
use crate::years::{YearSpan, profit_by_year, release_span, releases_per_year};
use std::time::Instant;
use tracing::debug;

/// Results of the full question battery. `None` means the table had no rows
/// to answer from.
#[derive(Debug, Clone, PartialEq)]
pub struct Answers {
    pub release_span: Option<YearSpan>,
    pub most_popular: Option<Vec<Movie>>,
    pub budget: Option<Extremes>,
    pub revenue: Option<Extremes>,
    pub profit: Option<Extremes>,
    pub runtime: Option<Extremes>,
    pub runtime_summary: Option<RuntimeSummary>,
    pub runtime_histogram: Option<Vec<HistogramBin>>,
    pub releases_per_year: Option<Vec<(i32, usize)>>,
    pub profit_by_year: Option<Vec<(i32, i128)>>,
    pub genres: Option<TokenCounts>,
    pub cast: Option<TokenCounts>,
    pub companies: Option<TokenCounts>,
    pub directors: Option<TokenCounts>,
}

fn timed<T, E>(name: &str, query: impl FnOnce() -> Result<T, E>) -> Result<T, AnalysisError>
where
    AnalysisError: From<E>,
{
    let start = Instant::now();
    let res = query()?;
    debug!(query = name, elapsed = ?start.elapsed(), "query finished");
    Ok(res)
}

/// Runs the thirteen questions. `top` bounds the cast, company and director
/// tables.
pub fn run_all(db: &MovieData, top: usize) -> Result<Answers, AnalysisError> {
    Ok(Answers {
        release_span: timed("release_span", || release_span(db))?,
        most_popular: timed("most_popular", || most_popular(db))?,
        budget: timed("budget_extremes", || budget_extremes(db))?,
        revenue: timed("revenue_extremes", || revenue_extremes(db))?,
        profit: timed("profit_extremes", || profit_extremes(db))?,
        runtime: timed("runtime_extremes", || runtime_extremes(db))?,
        runtime_summary: timed("runtime_summary", || runtime_summary(db))?,
        runtime_histogram: timed("runtime_histogram", || runtime_histogram(db, HISTOGRAM_BINS))?,
        releases_per_year: timed("releases_per_year", || releases_per_year(db))?,
        profit_by_year: timed("profit_by_year", || profit_by_year(db))?,
        genres: timed("genre_counts", || genre_counts(db))?,
        cast: timed("top_cast", || top_cast(db, top))?,
        companies: timed("top_companies", || top_companies(db, top))?,
        directors: timed("top_directors", || top_directors(db, top))?,
    })
}

#[cfg(test)]
mod test_answers {
    use super::*;
    use crate::test_utils::{FixtureRow, movie_data};

    #[test]
    fn test_run_all() -> Result<(), AnalysisError> {
        let db = movie_data(&[
            FixtureRow::new("A", 2000).genres("Drama|Action").cast("X|Y|Z"),
            FixtureRow::new("B", 2005).genres("Drama").cast("X"),
        ])?;
        let answers = run_all(&db, 2)?;

        assert_eq!(answers.release_span.map(|s| s.years()), Some(5));
        assert_eq!(answers.genres.as_ref().and_then(|g| g.get("Drama")), Some(2));
        assert_eq!(answers.cast.as_ref().map(|c| c.entries.len()), Some(2));
        assert!(answers.profit.is_some());
        Ok(())
    }

    #[test]
    fn test_run_all_on_empty_table() -> Result<(), AnalysisError> {
        let db = movie_data(&[FixtureRow::new("Unrecorded", 2000).adjusted("0", "0")])?;
        let answers = run_all(&db, 20)?;

        assert!(db.is_empty());
        assert_eq!(answers.release_span, None);
        assert_eq!(answers.most_popular, None);
        assert_eq!(answers.runtime_summary, None);
        assert_eq!(answers.directors, None);
        Ok(())
    }
}
