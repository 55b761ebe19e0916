//! Console rendering of the profile, the cleaning summary and the answers.

use crate::answers::Answers;
use crate::clean::CleanReport;
use crate::extremes::Extremes;
use crate::movie::Movie;
use crate::profile::RawProfile;
use crate::tokens::TokenCounts;
use std::io::{self, Write};

const NO_DATA: &str = "  no data";

pub fn write_profile(out: &mut impl Write, profile: &RawProfile) -> io::Result<()> {
    writeln!(out, "== Raw export")?;
    writeln!(out, "  {} rows x {} columns", profile.rows, profile.columns)?;
    writeln!(out, "  {} duplicated rows", profile.duplicate_rows)?;
    writeln!(out, "  null values per column:")?;
    for (name, nulls) in &profile.null_counts {
        writeln!(out, "    {name:<22}{nulls:>8}")?;
    }
    writeln!(out)
}

pub fn write_clean_report(out: &mut impl Write, report: &CleanReport) -> io::Result<()> {
    writeln!(out, "== Cleaning")?;
    writeln!(out, "  rows read            {:>8}", report.rows_read)?;
    writeln!(out, "  duplicates removed   {:>8}", report.duplicates_removed)?;
    writeln!(out, "  unrecorded budget or revenue removed {:>8}", report.unrecorded_removed)?;
    writeln!(out, "  rows kept            {:>8}", report.rows_kept)?;
    writeln!(
        out,
        "  {:.1}% of the export is usable for the adjusted-currency questions",
        report.survival_ratio() * 100.0
    )?;
    writeln!(out)
}

fn movie_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "  {:<40}{:>6}{:>16}{:>16}{:>16}{:>9}{:>16}",
        "title", "year", "budget_adj", "revenue_adj", "profit_adj", "runtime", "pop_score"
    )
}

fn movie_line(out: &mut impl Write, m: &Movie) -> io::Result<()> {
    let title: String = m.original_title.chars().take(38).collect();
    writeln!(
        out,
        "  {:<40}{:>6}{:>16}{:>16}{:>16}{:>9}{:>16.1}",
        title,
        m.release_year,
        m.budget_adj,
        m.revenue_adj,
        m.profit_adj(),
        m.runtime,
        m.popularity_score()
    )
}

fn movie_names(movies: &[Movie]) -> String {
    movies
        .iter()
        .map(|m| format!("\"{}\" ({})", m.original_title, m.release_year))
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_extremes(
    out: &mut impl Write,
    title: &str,
    extremes: &Option<Extremes>,
) -> io::Result<()> {
    writeln!(out, "== {title}")?;
    let Some(ex) = extremes else {
        return writeln!(out, "{NO_DATA}\n");
    };
    writeln!(
        out,
        "  highest {}: {}; lowest: {}",
        ex.column,
        movie_names(&ex.highest),
        movie_names(&ex.lowest)
    )?;
    movie_header(out)?;
    for m in ex.highest.iter().chain(&ex.lowest) {
        movie_line(out, m)?;
    }
    writeln!(out)
}

fn write_tokens(
    out: &mut impl Write,
    title: &str,
    noun: &str,
    counts: &Option<TokenCounts>,
) -> io::Result<()> {
    writeln!(out, "== {title}")?;
    let Some(counts) = counts else {
        return writeln!(out, "{NO_DATA}\n");
    };
    if let Some((token, n)) = counts.entries.first() {
        writeln!(out, "  most frequent {noun}: \"{token}\" with {n} movies")?;
    }
    for (token, n) in &counts.entries {
        writeln!(out, "    {token:<40}{n:>6}")?;
    }
    writeln!(out)
}

pub fn write_answers(out: &mut impl Write, answers: &Answers) -> io::Result<()> {
    writeln!(out, "== 1. Release period")?;
    match &answers.release_span {
        Some(span) => writeln!(
            out,
            "  movies cover about {} years from {} to {}\n",
            span.years(),
            span.first,
            span.last
        )?,
        None => writeln!(out, "{NO_DATA}\n")?,
    }

    writeln!(out, "== 2. Most popular movie weighted by votes and rating")?;
    match &answers.most_popular {
        Some(movies) => {
            writeln!(out, "  {}", movie_names(movies))?;
            movie_header(out)?;
            for m in movies {
                movie_line(out, m)?;
            }
            writeln!(out)?;
        }
        None => writeln!(out, "{NO_DATA}\n")?,
    }

    write_extremes(out, "3. Highest and lowest adjusted budget", &answers.budget)?;
    write_extremes(out, "4. Highest and lowest adjusted revenue", &answers.revenue)?;
    write_extremes(out, "5. Highest and lowest adjusted profit", &answers.profit)?;
    write_extremes(out, "6. Longest and shortest runtime", &answers.runtime)?;

    writeln!(out, "== 7. Runtime statistics (minutes)")?;
    match &answers.runtime_summary {
        Some(s) => {
            writeln!(out, "  average runtime is about {:.0} minutes", s.mean)?;
            for (label, value) in [
                ("count", s.count as f64),
                ("mean", s.mean),
                ("std", s.std),
                ("min", s.min),
                ("25%", s.q25),
                ("50%", s.median),
                ("75%", s.q75),
                ("max", s.max),
            ] {
                writeln!(out, "    {label:<6}{value:>12.2}")?;
            }
            writeln!(out)?;
        }
        None => writeln!(out, "{NO_DATA}\n")?,
    }

    writeln!(out, "== 8. Movies released per year")?;
    match &answers.releases_per_year {
        Some(years) => {
            if let Some((year, n)) = years.first() {
                writeln!(out, "  {year} has the most releases with {n} movies")?;
            }
            for (year, n) in years {
                writeln!(out, "    {year:<8}{n:>6}")?;
            }
            writeln!(out)?;
        }
        None => writeln!(out, "{NO_DATA}\n")?,
    }

    writeln!(out, "== 9. Adjusted profit per year")?;
    match &answers.profit_by_year {
        Some(years) => {
            if let Some((year, sum)) = years.first() {
                writeln!(out, "  {year} has the highest adjusted profit: {sum}")?;
            }
            for (year, sum) in years {
                writeln!(out, "    {year:<8}{sum:>20}")?;
            }
            writeln!(out)?;
        }
        None => writeln!(out, "{NO_DATA}\n")?,
    }

    write_tokens(out, "10. Movies per genre", "genre", &answers.genres)?;
    write_tokens(out, "11. Most frequent cast members", "actor", &answers.cast)?;
    write_tokens(out, "12. Most frequent production companies", "company", &answers.companies)?;
    write_tokens(out, "13. Most frequent directors", "director", &answers.directors)?;
    Ok(())
}
