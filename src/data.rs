use crate::clean::{CleanReport, clean};
use crate::derive::derive;
use crate::error::AnalysisError;
use crate::movie::Movie;
use crate::profile::RawProfile;
use polars::prelude::*;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info};

// TMDb movie export (tmdb-movies.csv)
//     id                    integer
//     imdb_id               text
//     popularity            double
//     budget                integer
//     revenue               integer
//     original_title        text
//     cast                  text, '|' separated
//     homepage              text
//     director              text, '|' separated
//     tagline               text
//     keywords              text, '|' separated
//     overview              text
//     runtime               integer, minutes
//     genres                text, '|' separated
//     production_companies  text, '|' separated
//     release_date          date, m/d/yy
//     vote_count            integer
//     vote_average          double
//     release_year          integer
//     budget_adj            double, 2010 dollars
//     revenue_adj           double, 2010 dollars

pub const RAW_COLUMNS: [&str; 21] = [
    "id",
    "imdb_id",
    "popularity",
    "budget",
    "revenue",
    "original_title",
    "cast",
    "homepage",
    "director",
    "tagline",
    "keywords",
    "overview",
    "runtime",
    "genres",
    "production_companies",
    "release_date",
    "vote_count",
    "vote_average",
    "release_year",
    "budget_adj",
    "revenue_adj",
];

/// Columns that survive cleaning, in output order.
pub const KEPT_COLUMNS: [&str; 15] = [
    "popularity",
    "budget",
    "revenue",
    "original_title",
    "cast",
    "director",
    "runtime",
    "genres",
    "production_companies",
    "release_date",
    "vote_count",
    "vote_average",
    "release_year",
    "budget_adj",
    "revenue_adj",
];

pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%y";

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// chrono format used to parse `release_date`.
    pub date_format: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Reads the export with every column as text. Types are assigned later by
/// the cleaning pass so that a bad value fails loudly instead of being inferred
/// into a different dtype.
pub fn read_csv(path: &Path) -> Result<DataFrame, AnalysisError> {
    check_field_counts(File::open(path)?)?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    info!(path = %path.display(), rows = df.height(), "read movie export");
    Ok(df)
}

/// Same as [`read_csv`] over an in-memory buffer.
pub fn read_csv_from(bytes: &[u8]) -> Result<DataFrame, AnalysisError> {
    check_field_counts(bytes)?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;
    Ok(df)
}

/// Fails on the first data row whose field count differs from the header's.
/// The polars reader pads short rows with nulls, so this runs beforehand.
pub fn check_field_counts<R: Read>(reader: R) -> Result<(), AnalysisError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let expected = rdr.byte_headers()?.len();

    let mut record = csv::ByteRecord::new();
    let mut row = 0;
    while rdr.read_byte_record(&mut record)? {
        if record.len() != expected {
            return Err(AnalysisError::RaggedRow {
                row,
                fields: record.len(),
                expected,
            });
        }
        row += 1;
    }
    Ok(())
}

pub fn validate_header(df: &DataFrame) -> Result<(), AnalysisError> {
    let names: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();

    let missing: Vec<String> = RAW_COLUMNS
        .iter()
        .filter(|expected| !names.contains(expected))
        .map(|s| s.to_string())
        .collect();
    let unexpected: Vec<String> = names
        .iter()
        .filter(|name| !RAW_COLUMNS.contains(name))
        .map(|s| s.to_string())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::SchemaMismatch {
            missing,
            unexpected,
        })
    }
}

/// The cleaned and derived movie table. Built once, read-only afterwards.
pub struct MovieData {
    pub movies: DataFrame,
    pub profile: RawProfile,
    pub report: CleanReport,
}

impl MovieData {
    pub fn load(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<Self, AnalysisError> {
        debug!(
            threads = polars_core::POOL.current_num_threads(),
            "polars thread pool"
        );
        let raw = read_csv(path.as_ref())?;
        Self::from_raw(raw, opts)
    }

    pub fn from_raw(raw: DataFrame, opts: &LoadOptions) -> Result<Self, AnalysisError> {
        validate_header(&raw)?;
        let profile = RawProfile::of(&raw)?;
        let (cleaned, report) = clean(raw, opts)?;
        let movies = derive(cleaned)?;

        Ok(MovieData {
            movies,
            profile,
            report,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.movies.height() == 0
    }

    /// Materializes every row as a typed [`Movie`].
    pub fn rows(&self) -> Result<Vec<Movie>, AnalysisError> {
        Movie::from_frame(&self.movies)
    }
}

#[cfg(test)]
mod test_data {
    use super::*;
    use crate::test_utils::{FixtureRow, movie_csv};

    #[test]
    fn test_header_mismatch_is_fatal() -> Result<(), AnalysisError> {
        let df = read_csv_from(b"id,title\n1,Alien\n")?;
        match MovieData::from_raw(df, &LoadOptions::default()) {
            Err(AnalysisError::SchemaMismatch {
                missing,
                unexpected,
            }) => {
                assert_eq!(missing.len(), 20);
                assert_eq!(unexpected, vec!["title".to_string()]);
            }
            other => panic!("expected schema mismatch, got {:?}", other.err()),
        }
        Ok(())
    }

    #[test]
    fn test_load_from_text() -> Result<(), AnalysisError> {
        let csv = movie_csv(&[
            FixtureRow::new("Alien", 1979),
            FixtureRow::new("Aliens", 1986),
        ]);
        let db = MovieData::from_raw(read_csv_from(csv.as_bytes())?, &LoadOptions::default())?;

        assert_eq!(db.movies.height(), 2);
        assert!(!db.is_empty());
        let names: Vec<&str> = db
            .movies
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert!(names.contains(&"popularity_score"));
        assert!(names.contains(&"profit_adj"));
        assert!(!names.contains(&"imdb_id"));
        Ok(())
    }

    fn drop_trailing_fields(line: &str, n: usize) -> &str {
        line.rsplitn(n + 1, ',').last().unwrap_or(line)
    }

    #[test]
    fn test_short_row_is_fatal() {
        let csv = movie_csv(&[
            FixtureRow::new("Alien", 1979),
            FixtureRow::new("Aliens", 1986),
        ]);
        let mut lines: Vec<&str> = csv.lines().collect();
        lines[2] = drop_trailing_fields(lines[2], 2);
        let short = lines.join("\n");

        match read_csv_from(short.as_bytes()) {
            Err(AnalysisError::RaggedRow {
                row,
                fields,
                expected,
            }) => {
                assert_eq!(row, 1);
                assert_eq!(fields, 19);
                assert_eq!(expected, 21);
            }
            other => panic!("expected ragged row, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_long_row_is_fatal() {
        let csv = movie_csv(&[FixtureRow::new("Alien", 1979)]);
        let long = format!("{},extra", csv.trim_end());

        let res = read_csv_from(long.as_bytes());
        assert!(matches!(
            res,
            Err(AnalysisError::RaggedRow {
                row: 0,
                fields: 22,
                ..
            })
        ));
    }

    #[test]
    fn test_ragged_file_is_fatal() -> Result<(), AnalysisError> {
        let csv = movie_csv(&[FixtureRow::new("Alien", 1979)]);
        let path = std::env::temp_dir().join(format!("tmdb-eda-ragged-{}.csv", std::process::id()));
        std::fs::write(&path, format!("{}1,tt0000001\n", csv))?;

        let res = MovieData::load(&path, &LoadOptions::default());
        std::fs::remove_file(&path)?;
        assert!(matches!(res, Err(AnalysisError::RaggedRow { row: 1, .. })));
        Ok(())
    }

    #[test]
    fn test_unparseable_number_is_fatal() {
        let mut row = FixtureRow::new("Alien", 1979);
        row.runtime = "long".to_string();
        let csv = movie_csv(&[row]);
        let res = read_csv_from(csv.as_bytes())
            .and_then(|df| MovieData::from_raw(df, &LoadOptions::default()));
        assert!(matches!(res, Err(AnalysisError::Polars(_))));
    }
}
