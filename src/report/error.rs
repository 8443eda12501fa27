//! Report-layer error types.

use thiserror::Error;

use crate::api::ApiError;
use crate::query::QueryError;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while building or fetching a report.
///
/// A fetch is all-or-nothing: the first transform or transport error
/// aborts the whole call. There is no per-row isolation and no retry.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The underlying API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The report's query was invalid.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A transform required a field the row did not carry.
    #[error("required field missing from row: {0}")]
    MissingField(String),

    /// A transform required a join match that was not found.
    #[error("no match in join '{join}' for key '{key}'")]
    JoinMiss {
        /// The declared join path.
        join: String,
        /// The extracted key that found no child record.
        key: String,
    },

    /// A transform failed for a report-specific reason.
    #[error("transform failed: {0}")]
    Transform(String),
}
