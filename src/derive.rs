use crate::error::AnalysisError;
use polars::prelude::*;

/// Appends `popularity_score` and `profit_adj` to a cleaned frame.
pub fn derive(df: DataFrame) -> Result<DataFrame, AnalysisError> {
    Ok(df
        .lazy()
        .with_columns([
            (col("vote_count").cast(DataType::Float64) * col("vote_average") * col("popularity"))
                .alias("popularity_score"),
            (col("revenue_adj") - col("budget_adj")).alias("profit_adj"),
        ])
        .collect()?)
}
