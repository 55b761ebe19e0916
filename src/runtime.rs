use crate::data::MovieData;
use polars::prelude::*;

/// Descriptive statistics of `runtime`, in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN for a single movie.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

pub const HISTOGRAM_BINS: usize = 10;

fn sorted_runtimes(db: &MovieData) -> Result<Vec<f64>, PolarsError> {
    let mut values: Vec<f64> = db
        .movies
        .column("runtime")?
        .i32()?
        .into_iter()
        .flatten()
        .map(f64::from)
        .collect();
    values.sort_by(f64::total_cmp);
    Ok(values)
}

/// Linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn runtime_summary(db: &MovieData) -> Result<Option<RuntimeSummary>, PolarsError> {
    let values = sorted_runtimes(db)?;
    let (Some(&min), Some(&max)) = (values.first(), values.last()) else {
        return Ok(None);
    };

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Ok(Some(RuntimeSummary {
        count,
        mean,
        std,
        min,
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max,
    }))
}

/// Equal-width bins over [min, max]; the last bin is closed on the right.
pub fn runtime_histogram(
    db: &MovieData,
    bins: usize,
) -> Result<Option<Vec<HistogramBin>>, PolarsError> {
    let values = sorted_runtimes(db)?;
    let (Some(&min), Some(&max)) = (values.first(), values.last()) else {
        return Ok(None);
    };
    if bins == 0 {
        return Ok(None);
    }

    // A single distinct value still gets a non-degenerate range.
    let (lower, upper) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (upper - lower) / bins as f64;

    let mut res: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lower + width * i as f64,
            upper: if i + 1 == bins {
                upper
            } else {
                lower + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();
    for v in values {
        let i = (((v - lower) / width) as usize).min(bins - 1);
        res[i].count += 1;
    }
    Ok(Some(res))
}
