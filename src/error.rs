use thiserror::Error;

use crate::store::state::CellName;

/// Failures surfaced by the request bridge. Core store operations are total
/// and never produce one of these.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unknown store cell `{0}`")]
    UnknownCell(String),
    #[error("invalid value for `{cell}`: expected {expected}")]
    InvalidValue {
        cell: CellName,
        expected: &'static str,
    },
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl StoreError {
    /// HTTP-like status code reported back to the JavaScript side.
    pub fn status(&self) -> u16 {
        match self {
            StoreError::UnknownCell(_) => 404,
            StoreError::InvalidValue { .. } | StoreError::MalformedBody(_) => 400,
        }
    }
}
