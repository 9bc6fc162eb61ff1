//! FILENAME: core/transpose-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransposeError {
    #[error("Invalid payload: {0}")]
    Json(#[from] serde_json::Error),
}
