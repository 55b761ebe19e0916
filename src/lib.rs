pub mod answers;
pub mod chart;
pub mod clean;
pub mod config;
pub mod data;
pub mod derive;
pub mod error;
pub mod extremes;
pub mod movie;
pub mod profile;
pub mod report;
pub mod runtime;
pub mod tokens;
pub mod years;

#[cfg(test)]
mod test_utils;
