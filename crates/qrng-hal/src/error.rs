//! HAL errors.

use thiserror::Error;

/// Failure reported by a backend or by the job lifecycle around it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The backend is offline or refusing jobs.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The circuit does not fit the backend's qubit limit.
    #[error("circuit too large: {0}")]
    CircuitTooLarge(String),

    /// The circuit uses something the backend cannot run.
    #[error("invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Shot count outside the backend's accepted range.
    #[error("invalid shot count: {0}")]
    InvalidShots(String),

    /// A backend setting is missing or malformed.
    #[error("bad backend configuration: {0}")]
    Configuration(String),

    /// No job with this id.
    #[error("unknown job {0}")]
    JobNotFound(String),

    /// The job finished in the failed state.
    #[error("job failed: {0}")]
    JobFailed(String),

    /// The job was cancelled before completing.
    #[error("job was cancelled")]
    JobCancelled,

    /// The job did not reach a terminal state in time.
    #[error("gave up waiting for job {0}")]
    Timeout(String),

    /// Any other backend-side fault.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
