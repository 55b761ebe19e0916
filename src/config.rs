use crate::data::{DEFAULT_DATE_FORMAT, LoadOptions};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tmdb-eda",
    about = "Cleans the TMDb movie export and answers thirteen descriptive questions about it",
    version
)]
pub struct Config {
    /// TMDb movie export (CSV with header)
    #[arg(value_name = "FILE", default_value = "tmdb-movies.csv")]
    pub input: PathBuf,

    /// Print text only, skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Directory for the SVG charts
    #[arg(long, value_name = "DIR", default_value = "charts")]
    pub chart_dir: PathBuf,

    /// Rows kept in the cast, company and director tables
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    /// chrono format of release_date
    #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            date_format: self.date_format.clone(),
        }
    }
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["tmdb-eda"]);

        assert_eq!(config.input, PathBuf::from("tmdb-movies.csv"));
        assert!(!config.no_charts);
        assert_eq!(config.top, 20);
        assert_eq!(config.load_options().date_format, "%m/%d/%y");
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse_from([
            "tmdb-eda",
            "data/movies.csv",
            "--no-charts",
            "--top",
            "5",
            "--date-format",
            "%Y-%m-%d",
        ]);

        assert_eq!(config.input, PathBuf::from("data/movies.csv"));
        assert!(config.no_charts);
        assert_eq!(config.top, 5);
        assert_eq!(config.load_options().date_format, "%Y-%m-%d");
    }
}
