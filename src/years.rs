use crate::data::MovieData;
use polars::prelude::*;
use rustc_hash::FxHashMap as HashMap;

/// First and last release year present in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpan {
    pub first: i32,
    pub last: i32,
}

impl YearSpan {
    pub fn years(&self) -> i32 {
        self.last - self.first
    }
}

pub fn release_span(db: &MovieData) -> Result<Option<YearSpan>, PolarsError> {
    let years = db.movies.column("release_year")?.i32()?;

    let res = years
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<YearSpan>, year| match acc {
            Some(span) => Some(YearSpan {
                first: span.first.min(year),
                last: span.last.max(year),
            }),
            None => Some(YearSpan {
                first: year,
                last: year,
            }),
        });

    Ok(res)
}

/// Number of movies released each year, most prolific year first.
pub fn releases_per_year(db: &MovieData) -> Result<Option<Vec<(i32, usize)>>, PolarsError> {
    let mut counts: HashMap<i32, usize> = HashMap::default();
    for year in db.movies.column("release_year")?.i32()?.into_iter().flatten() {
        *counts.entry(year).or_default() += 1;
    }
    if counts.is_empty() {
        return Ok(None);
    }

    let mut res: Vec<(i32, usize)> = counts.into_iter().collect();
    res.sort_by(|(year_a, n_a), (year_b, n_b)| n_b.cmp(n_a).then(year_a.cmp(year_b)));
    Ok(Some(res))
}

/// Sum of adjusted profit per release year, most profitable year first.
///
/// Sums are accumulated in i128 so no realistic row count can overflow them.
pub fn profit_by_year(db: &MovieData) -> Result<Option<Vec<(i32, i128)>>, PolarsError> {
    let movies = &db.movies;
    let mut sums: HashMap<i32, i128> = HashMap::default();

    for (year, profit) in movies
        .column("release_year")?
        .i32()?
        .into_iter()
        .zip(movies.column("profit_adj")?.i64()?)
    {
        if let (Some(year), Some(profit)) = (year, profit) {
            *sums.entry(year).or_default() += profit as i128;
        }
    }
    if sums.is_empty() {
        return Ok(None);
    }

    let mut res: Vec<(i32, i128)> = sums.into_iter().collect();
    res.sort_by(|(year_a, sum_a), (year_b, sum_b)| sum_b.cmp(sum_a).then(year_a.cmp(year_b)));
    Ok(Some(res))
}
