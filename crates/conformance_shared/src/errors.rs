//! Error results that can be returned from the conformance crates
use thiserror::Error;

/// Serious errors and errors from third-party libraries
#[derive(Debug, Error)]
pub enum Error {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fixture error: {0}")]
    Fixture(String),

    #[error("test error: {0}")]
    Test(String),
}
