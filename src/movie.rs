use crate::error::AnalysisError;
use chrono::{Days, NaiveDate};
use polars::prelude::*;

/// One cleaned movie record.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub original_title: String,
    pub popularity: f64,
    pub budget: i64,
    pub revenue: i64,
    pub cast: String,
    pub director: Option<String>,
    pub runtime: i32,
    pub genres: String,
    pub production_companies: String,
    pub release_date: NaiveDate,
    pub vote_count: i64,
    pub vote_average: f64,
    pub release_year: i32,
    pub budget_adj: i64,
    pub revenue_adj: i64,
}

impl Movie {
    /// vote_count * vote_average * popularity
    pub fn popularity_score(&self) -> f64 {
        self.vote_count as f64 * self.vote_average * self.popularity
    }

    pub fn profit_adj(&self) -> i64 {
        self.revenue_adj - self.budget_adj
    }

    /// Reads every row of a cleaned frame. A null in any column other than
    /// `director` is an error.
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Movie>, AnalysisError> {
        let title = df.column("original_title")?.str()?;
        let popularity = df.column("popularity")?.f64()?;
        let budget = df.column("budget")?.i64()?;
        let revenue = df.column("revenue")?.i64()?;
        let cast = df.column("cast")?.str()?;
        let director = df.column("director")?.str()?;
        let runtime = df.column("runtime")?.i32()?;
        let genres = df.column("genres")?.str()?;
        let companies = df.column("production_companies")?.str()?;
        let release_days = df.column("release_date")?.cast(&DataType::Int32)?;
        let release_days = release_days.i32()?;
        let vote_count = df.column("vote_count")?.i64()?;
        let vote_average = df.column("vote_average")?.f64()?;
        let release_year = df.column("release_year")?.i32()?;
        let budget_adj = df.column("budget_adj")?.i64()?;
        let revenue_adj = df.column("revenue_adj")?.i64()?;

        let mut movies = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            movies.push(Movie {
                original_title: required(title.get(row), "original_title", row)?.to_string(),
                popularity: required(popularity.get(row), "popularity", row)?,
                budget: required(budget.get(row), "budget", row)?,
                revenue: required(revenue.get(row), "revenue", row)?,
                cast: required(cast.get(row), "cast", row)?.to_string(),
                director: director.get(row).map(|s| s.to_string()),
                runtime: required(runtime.get(row), "runtime", row)?,
                genres: required(genres.get(row), "genres", row)?.to_string(),
                production_companies: required(companies.get(row), "production_companies", row)?
                    .to_string(),
                release_date: days_to_date(
                    required(release_days.get(row), "release_date", row)?,
                    row,
                )?,
                vote_count: required(vote_count.get(row), "vote_count", row)?,
                vote_average: required(vote_average.get(row), "vote_average", row)?,
                release_year: required(release_year.get(row), "release_year", row)?,
                budget_adj: required(budget_adj.get(row), "budget_adj", row)?,
                revenue_adj: required(revenue_adj.get(row), "revenue_adj", row)?,
            });
        }
        Ok(movies)
    }
}

fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T, AnalysisError> {
    value.ok_or_else(|| AnalysisError::MissingValue {
        column: column.to_string(),
        row,
    })
}

fn days_to_date(days: i32, row: usize) -> Result<NaiveDate, AnalysisError> {
    let epoch = NaiveDate::default();
    let magnitude = Days::new(days.unsigned_abs() as u64);
    let date = if days >= 0 {
        epoch.checked_add_days(magnitude)
    } else {
        epoch.checked_sub_days(magnitude)
    };
    date.ok_or_else(|| AnalysisError::InvalidDate {
        row,
        value: days.to_string(),
        format: "days since 1970-01-01".to_string(),
    })
}

#[cfg(test)]
mod test_movie {
    use super::*;
    use crate::test_utils::{FixtureRow, movie_data};

    #[test]
    fn test_rows_round_trip_fields() -> Result<(), AnalysisError> {
        let db = movie_data(&[FixtureRow::new("Interstellar", 2014)
            .votes(24.949134, 6498, 8.0)
            .adjusted("151980023.2", "572690645.1")
            .director("")])?;
        let movies = db.rows()?;

        assert_eq!(movies.len(), 1);
        let m = &movies[0];
        assert_eq!(m.original_title, "Interstellar");
        assert_eq!(m.release_year, 2014);
        assert_eq!(m.release_date, NaiveDate::from_ymd_opt(2014, 6, 9).unwrap());
        assert_eq!(m.director, None);
        assert_eq!(m.budget_adj, 151980023);
        assert_eq!(m.revenue_adj, 572690645);
        assert_eq!(m.profit_adj(), 572690645 - 151980023);
        assert!((m.popularity_score() - 6498.0 * 8.0 * 24.949134).abs() < 1e-6);
        Ok(())
    }
}
