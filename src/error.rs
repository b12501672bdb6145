//! Error types for catalog and configuration loading
//!
//! The planning engine itself is total: rejected placements, empty removals and
//! degenerate land sizes are all policy outcomes, not errors. Only the I/O edges
//! (reading a catalog or a config file) can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read table {path}: {source}")]
    Table {
        path: String,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("table column error: {0}")]
    Column(#[from] polars::error::PolarsError),

    #[error("duplicate species id '{0}' in catalog")]
    DuplicateSpeciesId(String),

    #[error("unknown vertical layer '{0}'")]
    UnknownLayer(String),

    #[error("catalog row {row} is missing '{column}'")]
    MissingField { row: usize, column: String },
}

pub type PlannerResult<T> = std::result::Result<T, PlannerError>;
