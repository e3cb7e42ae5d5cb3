//! Shared error types for the services crate.

use thiserror::Error;

use storage::session_store::StorageError;

/// Errors emitted by `ProgressStore` implementations on the account paths.
///
/// Practice-path calls (proficiency fetch, score report) never surface
/// errors; only login and registration report failure to the user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("the practice server is unavailable")]
    Unavailable,
    #[error("the practice server returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("registration rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `PracticeSession`.
///
/// Only local persistence failures surface here; remote-store failures and
/// malformed drafts degrade to safe defaults inside the session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
