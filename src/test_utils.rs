//! Fixture builders for in-memory movie exports.

use crate::data::{LoadOptions, MovieData, RAW_COLUMNS, read_csv_from};
use crate::error::AnalysisError;

/// One raw export row. Every field holds the literal CSV text; an empty string
/// is written as an empty (null) field.
#[derive(Debug, Clone)]
pub struct FixtureRow {
    pub id: String,
    pub popularity: String,
    pub budget: String,
    pub revenue: String,
    pub original_title: String,
    pub cast: String,
    pub director: String,
    pub runtime: String,
    pub genres: String,
    pub production_companies: String,
    pub release_date: String,
    pub vote_count: String,
    pub vote_average: String,
    pub release_year: String,
    pub budget_adj: String,
    pub revenue_adj: String,
}

impl FixtureRow {
    pub fn new(title: &str, year: i32) -> Self {
        FixtureRow {
            id: String::new(),
            popularity: "1.5".to_string(),
            budget: "1000".to_string(),
            revenue: "3000".to_string(),
            original_title: title.to_string(),
            cast: "Actor One|Actor Two".to_string(),
            director: "Some Director".to_string(),
            runtime: "100".to_string(),
            genres: "Drama".to_string(),
            production_companies: "Studio One".to_string(),
            release_date: format!("6/9/{:02}", year % 100),
            vote_count: "10".to_string(),
            vote_average: "6.0".to_string(),
            release_year: year.to_string(),
            budget_adj: "1000.0".to_string(),
            revenue_adj: "3000.0".to_string(),
        }
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn adjusted(mut self, budget_adj: &str, revenue_adj: &str) -> Self {
        self.budget_adj = budget_adj.to_string();
        self.revenue_adj = revenue_adj.to_string();
        self
    }

    pub fn runtime(mut self, minutes: i32) -> Self {
        self.runtime = minutes.to_string();
        self
    }

    pub fn votes(mut self, popularity: f64, count: i64, average: f64) -> Self {
        self.popularity = popularity.to_string();
        self.vote_count = count.to_string();
        self.vote_average = average.to_string();
        self
    }

    pub fn genres(mut self, genres: &str) -> Self {
        self.genres = genres.to_string();
        self
    }

    pub fn cast(mut self, cast: &str) -> Self {
        self.cast = cast.to_string();
        self
    }

    pub fn director(mut self, director: &str) -> Self {
        self.director = director.to_string();
        self
    }

    pub fn companies(mut self, companies: &str) -> Self {
        self.production_companies = companies.to_string();
        self
    }

    fn field(&self, column: &str, index: usize) -> String {
        match column {
            "id" if self.id.is_empty() => (index + 1).to_string(),
            "id" => self.id.clone(),
            "imdb_id" => format!("tt{:0>7}", self.field("id", index)),
            "popularity" => self.popularity.clone(),
            "budget" => self.budget.clone(),
            "revenue" => self.revenue.clone(),
            "original_title" => self.original_title.clone(),
            "cast" => self.cast.clone(),
            "director" => self.director.clone(),
            "runtime" => self.runtime.clone(),
            "genres" => self.genres.clone(),
            "production_companies" => self.production_companies.clone(),
            "release_date" => self.release_date.clone(),
            "vote_count" => self.vote_count.clone(),
            "vote_average" => self.vote_average.clone(),
            "release_year" => self.release_year.clone(),
            "budget_adj" => self.budget_adj.clone(),
            "revenue_adj" => self.revenue_adj.clone(),
            _ => String::new(),
        }
    }
}

fn quote(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("\"{}\"", value.replace('"', "\"\""))
    }
}

/// Renders rows as a full TMDb export, header included.
pub fn movie_csv(rows: &[FixtureRow]) -> String {
    let mut out = RAW_COLUMNS.join(",");
    out.push('\n');
    for (index, row) in rows.iter().enumerate() {
        let line: Vec<String> = RAW_COLUMNS
            .iter()
            .map(|column| quote(&row.field(column, index)))
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

pub fn movie_data(rows: &[FixtureRow]) -> Result<MovieData, AnalysisError> {
    let raw = read_csv_from(movie_csv(rows).as_bytes())?;
    MovieData::from_raw(raw, &LoadOptions::default())
}
