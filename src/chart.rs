//! SVG charts for the answers. Rendering is best effort: a chart that fails is
//! logged and skipped.

use crate::answers::Answers;
use crate::error::AnalysisError;
use crate::runtime::HistogramBin;
use crate::tokens::TokenCounts;
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

type DrawResult = Result<(), Box<dyn Error>>;

const SIZE: (u32, u32) = (1600, 700);

fn y_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (lo, hi) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo == hi { lo..lo + 1.0 } else { lo..hi * 1.05 }
}

fn bar_chart(
    path: &Path,
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    bars: &[(String, f64)],
) -> DrawResult {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(140)
        .y_label_area_size(110)
        .build_cartesian_2d(0..bars.len() as i32, y_range(bars.iter().map(|(_, v)| *v)))?;

    let label = |x: &i32| -> String {
        bars.get(*x as usize)
            .map(|(name, _)| name.chars().take(24).collect())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(bars.len())
        .x_label_formatter(&label)
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, v))| {
        let x = i as i32;
        Rectangle::new([(x, 0.0), (x + 1, *v)], BLUE.mix(0.7).filled())
    }))?;

    root.present()?;
    Ok(())
}

fn line_chart(
    path: &Path,
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    points: &[(i32, f64)],
) -> DrawResult {
    let (first, last) = match (points.first(), points.last()) {
        (Some((first, _)), Some((last, _))) => (*first, *last),
        _ => return Ok(()),
    };

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(first..last + 1, y_range(points.iter().map(|(_, v)| *v)))?;
    chart.configure_mesh().x_desc(x_desc).y_desc(y_desc).draw()?;
    chart.draw_series(LineSeries::new(points.iter().copied(), &RED))?;

    root.present()?;
    Ok(())
}

fn histogram(path: &Path, caption: &str, bins: &[HistogramBin]) -> DrawResult {
    let (lower, upper) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.lower, last.upper),
        _ => return Ok(()),
    };

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(lower..upper, y_range(bins.iter().map(|b| b.count as f64)))?;
    chart
        .configure_mesh()
        .x_desc("Runtime (minutes)")
        .y_desc("Movies count")
        .draw()?;
    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], GREEN.mix(0.6).filled())
    }))?;

    root.present()?;
    Ok(())
}

fn token_bars(counts: &TokenCounts) -> Vec<(String, f64)> {
    counts
        .entries
        .iter()
        .map(|(token, n)| (token.clone(), *n as f64))
        .collect()
}

/// Renders every chart that has data into `dir` and returns the written paths.
pub fn render_all(answers: &Answers, dir: &Path) -> Vec<PathBuf> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "cannot create chart directory, skipping charts");
        return Vec::new();
    }

    let mut jobs: Vec<(&str, Box<dyn Fn(&Path) -> DrawResult + '_>)> = Vec::new();

    if let Some(bins) = &answers.runtime_histogram {
        jobs.push(("runtime_histogram.svg", Box::new(move |p: &Path| histogram(p, "Runtime of movies", bins))));
    }
    if let Some(years) = &answers.releases_per_year {
        let bars: Vec<(String, f64)> = years.iter().map(|(y, n)| (y.to_string(), *n as f64)).collect();
        jobs.push((
            "releases_per_year.svg",
            Box::new(move |p: &Path| bar_chart(p, "Movies yearly", "Year", "Movies count", &bars)),
        ));
    }
    if let Some(years) = &answers.profit_by_year {
        let mut points: Vec<(i32, f64)> = years.iter().map(|(y, sum)| (*y, *sum as f64)).collect();
        points.sort_by_key(|(y, _)| *y);
        jobs.push((
            "profit_by_year.svg",
            Box::new(move |p: &Path| line_chart(p, "Adjusted profit yearly", "Release year", "Adjusted profit", &points)),
        ));
    }
    if let Some(profit) = &answers.profit {
        let bars: Vec<(String, f64)> = profit
            .highest
            .iter()
            .chain(&profit.lowest)
            .map(|m| (m.original_title.clone(), m.profit_adj() as f64))
            .collect();
        jobs.push((
            "profit_extremes.svg",
            Box::new(move |p: &Path| bar_chart(p, "Highest and lowest adjusted profit", "Movie", "Adjusted profit", &bars)),
        ));
    }
    for (file, caption, x_desc, counts) in [
        ("genres.svg", "Most genres release of movies", "Genres", &answers.genres),
        ("cast.svg", "Most frequent actors", "Actor", &answers.cast),
        ("companies.svg", "Most frequent production companies", "Production companies", &answers.companies),
        ("directors.svg", "Most frequent directors", "Director", &answers.directors),
    ] {
        if let Some(counts) = counts {
            let bars = token_bars(counts);
            jobs.push((
                file,
                Box::new(move |p: &Path| bar_chart(p, caption, x_desc, "Movies count", &bars)),
            ));
        }
    }

    let mut written = Vec::new();
    for (file, draw) in jobs {
        let path = dir.join(file);
        match draw(&path).map_err(|e| AnalysisError::Chart(e.to_string())) {
            Ok(()) => {
                info!(chart = %path.display(), "chart written");
                written.push(path);
            }
            Err(e) => warn!(chart = file, error = %e, "chart skipped"),
        }
    }
    written
}

#[cfg(test)]
mod test_chart {
    use super::*;
    use crate::answers::run_all;
    use crate::test_utils::{FixtureRow, movie_data};

    #[test]
    fn test_render_all_writes_eight_charts() -> Result<(), AnalysisError> {
        let db = movie_data(&[
            FixtureRow::new("A", 2000).runtime(95).genres("Drama|Action"),
            FixtureRow::new("B", 2003).runtime(120).adjusted("900.0", "100.0"),
            FixtureRow::new("C", 2003).runtime(88),
        ])?;
        let answers = run_all(&db, 20)?;
        let dir = std::env::temp_dir().join(format!("tmdb-eda-charts-{}", std::process::id()));

        let written = render_all(&answers, &dir);

        assert_eq!(written.len(), 8);
        assert!(written.iter().all(|p| p.exists()));
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn test_unwritable_dir_degrades() -> Result<(), AnalysisError> {
        let db = movie_data(&[FixtureRow::new("A", 2000)])?;
        let answers = run_all(&db, 20)?;
        let blocker = std::env::temp_dir().join(format!("tmdb-eda-blocker-{}", std::process::id()));
        std::fs::write(&blocker, b"not a directory")?;

        let written = render_all(&answers, &blocker.join("charts"));

        assert!(written.is_empty());
        std::fs::remove_file(&blocker)?;
        Ok(())
    }
}
