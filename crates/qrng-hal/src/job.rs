//! Job lifecycle types.
//!
//! ```text
//!   submit() ──→ Queued ──→ Running ──→ Completed
//!                  │           │
//!                  │           ├──→ Failed(reason)
//!                  │           │
//!                  └───────────┴──→ Cancelled
//! ```
//!
//! Transitions never move backward and terminal states are permanent.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, backend-assigned job handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Wrap a backend's identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Lifecycle state of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Accepted, not started.
    Queued,
    /// Executing.
    Running,
    /// Finished; results are available.
    Completed,
    /// Finished without results, with the backend's reason.
    Failed(String),
    /// Withdrawn before completion.
    Cancelled,
}

impl JobStatus {
    /// `true` once no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Queued | JobStatus::Running)
    }

    /// `true` only for [`JobStatus::Completed`].
    pub fn is_success(&self) -> bool {
        *self == JobStatus::Completed
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => f.write_str("queued"),
            JobStatus::Running => f.write_str("running"),
            JobStatus::Completed => f.write_str("completed"),
            JobStatus::Failed(reason) => write!(f, "failed ({reason})"),
            JobStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// A backend's record of one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Identifier handed back by `submit`.
    pub id: JobId,
    /// Where the job is in its lifecycle.
    pub status: JobStatus,
    /// Requested repetitions.
    pub shots: u32,
    /// Owning backend, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

impl Job {
    /// A freshly queued job.
    pub fn new(id: JobId, shots: u32) -> Self {
        Self {
            id,
            status: JobStatus::Queued,
            shots,
            backend: None,
        }
    }

    /// Record the owning backend.
    #[must_use]
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Advance to `status` unless the job has already finished.
    ///
    /// Returns whether the status changed.
    pub fn transition(&mut self, status: JobStatus) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_terminal() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed("error".into()).is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_job_status_display() {
        assert_eq!(JobStatus::Running.to_string(), "running");
        assert_eq!(JobStatus::Failed("drift".into()).to_string(), "failed (drift)");
        assert_eq!(JobId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_job_creation() {
        let job = Job::new(JobId::from("job-123"), 1000).with_backend("simulator");

        assert_eq!(job.id.0, "job-123");
        assert_eq!(job.shots, 1000);
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.backend.as_deref(), Some("simulator"));
    }

    #[test]
    fn test_terminal_state_is_sticky() {
        let mut job = Job::new(JobId::from("job-1"), 10);
        assert!(job.transition(JobStatus::Running));
        assert!(job.transition(JobStatus::Completed));

        assert!(!job.transition(JobStatus::Cancelled));
        assert_eq!(job.status, JobStatus::Completed);
    }
}
