use crate::data::MovieData;
use ahash::{HashMap, HashMapExt};
use polars::prelude::*;

/// Separator packing several values into one text field.
pub const TOKEN_SEPARATOR: char = '|';

/// Frequency table of tokens, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCounts {
    pub entries: Vec<(String, usize)>,
    /// Tokens seen before any truncation.
    pub total_tokens: usize,
}

impl TokenCounts {
    pub fn truncate(mut self, top: usize) -> Self {
        self.entries.truncate(top);
        self
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, n)| *n)
    }
}

/// Splits every value on [`TOKEN_SEPARATOR`] and counts the pieces. Null
/// values contribute nothing; empty pieces are counted as the empty token.
/// Ties keep the order in which tokens first appeared.
pub fn count_tokens<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> TokenCounts {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(&str, usize)> = Vec::new();
    let mut total_tokens = 0;

    for value in values.into_iter().flatten() {
        for token in value.split(TOKEN_SEPARATOR) {
            total_tokens += 1;
            if let Some(&i) = index.get(token) {
                entries[i].1 += 1;
            } else {
                index.insert(token, entries.len());
                entries.push((token, 1));
            }
        }
    }

    // stable, so first appearance breaks ties
    entries.sort_by(|(_, a), (_, b)| b.cmp(a));

    TokenCounts {
        entries: entries
            .into_iter()
            .map(|(token, n)| (token.to_string(), n))
            .collect(),
        total_tokens,
    }
}

fn column_tokens(db: &MovieData, column: &str) -> Result<Option<TokenCounts>, PolarsError> {
    if db.is_empty() {
        return Ok(None);
    }
    let values = db.movies.column(column)?.str()?;
    Ok(Some(count_tokens(values)))
}

/// Every genre with its number of movies.
pub fn genre_counts(db: &MovieData) -> Result<Option<TokenCounts>, PolarsError> {
    column_tokens(db, "genres")
}

pub fn top_cast(db: &MovieData, top: usize) -> Result<Option<TokenCounts>, PolarsError> {
    Ok(column_tokens(db, "cast")?.map(|counts| counts.truncate(top)))
}

pub fn top_companies(db: &MovieData, top: usize) -> Result<Option<TokenCounts>, PolarsError> {
    Ok(column_tokens(db, "production_companies")?.map(|counts| counts.truncate(top)))
}

pub fn top_directors(db: &MovieData, top: usize) -> Result<Option<TokenCounts>, PolarsError> {
    Ok(column_tokens(db, "director")?.map(|counts| counts.truncate(top)))
}
