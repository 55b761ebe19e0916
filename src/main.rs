use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use tmdb_eda::config::Config;
use tmdb_eda::data::MovieData;
use tmdb_eda::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level);

    let db = MovieData::load(&config.input, &config.load_options())
        .with_context(|| format!("failed to load {}", config.input.display()))?;
    let answers = answers::run_all(&db, config.top)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    report::write_profile(&mut out, &db.profile)?;
    report::write_clean_report(&mut out, &db.report)?;
    report::write_answers(&mut out, &answers)?;
    out.flush()?;

    if config.no_charts {
        info!("chart rendering disabled");
    } else {
        let written = chart::render_all(&answers, &config.chart_dir);
        info!(charts = written.len(), dir = %config.chart_dir.display(), "charts rendered");
    }
    Ok(())
}
