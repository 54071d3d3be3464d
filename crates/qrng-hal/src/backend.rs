//! Backend trait and configuration.
//!
//! The [`Backend`] trait defines the lifecycle for interacting with a
//! quantum backend:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (async)       (async)      (async)      (async)
//! ```
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `capabilities()` | sync | yes | `&Capabilities` |
//! | `availability()` | async | yes | `HalResult<BackendAvailability>` |
//! | `validate()` | async | provided | `HalResult<ValidationResult>` |
//! | `submit()` | async | yes | `HalResult<JobId>` |
//! | `status()` | async | yes | `HalResult<JobStatus>` |
//! | `result()` | async | yes | `HalResult<ExecutionResult>` |
//! | `cancel()` | async | yes | `HalResult<()>` |
//! | `wait()` | async | provided | `HalResult<ExecutionResult>` |

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

use qrng_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Name plus free-form settings used to construct a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name the backend reports.
    pub name: String,
    /// Backend-specific settings, e.g. `max_qubits` or `seed`.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add a backend-specific setting.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer setting.
    ///
    /// A present but non-integer value is a configuration error.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!("'{key}' must be an unsigned integer"))
            }),
        }
    }
}

/// Trait for quantum backends.
///
/// Anything that can execute a circuit `shots` times and return a frequency
/// table of measurement outcomes.
///
/// # Contract
///
/// - `capabilities()` MUST be synchronous and infallible, cached at
///   construction time.
/// - `submit()` MUST return a `JobId` whose initial status is `Queued` (or
///   later, for backends that execute eagerly).
/// - `result()` MUST only be called when status is `Completed`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check backend availability.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Validate a circuit against backend constraints.
    ///
    /// The default implementation checks qubit count and gate set against
    /// [`Backend::capabilities`].
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let reasons = self.capabilities().violations(circuit);
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    /// Submit a circuit for execution.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Cancel a running job.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Wait for a job to complete and return its result.
    ///
    /// Default implementation polls every 100ms for up to 5 minutes.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        const POLL_INTERVAL: Duration = Duration::from_millis(100);
        const MAX_POLLS: u32 = 3000;

        for poll in 0..MAX_POLLS {
            let status = self.status(job_id).await?;
            trace!(%job_id, %status, poll, "polled job");

            match status {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

/// Backend availability information.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting jobs.
    pub is_available: bool,
    /// Number of jobs currently in queue (if known).
    pub queue_depth: Option<u32>,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Availability for a backend that is always ready (simulators).
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            status_message: None,
        }
    }

    /// Availability for an offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            status_message: Some(reason.into()),
        }
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit is valid and can be submitted directly.
    Valid,
    /// Circuit is invalid for this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit can be submitted as-is.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::result::Counts;

    /// Reports `Running` for a fixed number of polls, then completes.
    struct SlowBackend {
        caps: Capabilities,
        polls_left: AtomicU32,
        terminal: JobStatus,
    }

    impl SlowBackend {
        fn new(polls: u32, terminal: JobStatus) -> Self {
            Self {
                caps: Capabilities::simulator(2),
                polls_left: AtomicU32::new(polls),
                terminal,
            }
        }
    }

    #[async_trait]
    impl Backend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn availability(&self) -> HalResult<BackendAvailability> {
            Ok(BackendAvailability::always_available())
        }

        async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
            Ok(JobId::from("slow-1"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            let left = self.polls_left.load(Ordering::SeqCst);
            if left == 0 {
                return Ok(self.terminal.clone());
            }
            self.polls_left.store(left - 1, Ordering::SeqCst);
            Ok(JobStatus::Running)
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            Ok(ExecutionResult::new(Counts::from_pairs([("01", 4)]), 4))
        }

        async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_backend_config() {
        let config =
            BackendConfig::new("simulator").with_extra("max_qubits", serde_json::json!(12));

        assert_eq!(config.name, "simulator");
        assert_eq!(config.extra_u64("max_qubits").unwrap(), Some(12));
        assert_eq!(config.extra_u64("seed").unwrap(), None);
    }

    #[test]
    fn test_backend_config_rejects_non_integer() {
        let config = BackendConfig::new("simulator").with_extra("seed", serde_json::json!("abc"));
        assert!(matches!(
            config.extra_u64("seed"),
            Err(HalError::Configuration(_))
        ));
    }

    #[test]
    fn test_backend_availability() {
        assert!(BackendAvailability::always_available().is_available);
        let avail = BackendAvailability::unavailable("maintenance");
        assert!(!avail.is_available);
        assert_eq!(avail.status_message.as_deref(), Some("maintenance"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_polls_until_completed() {
        let backend = SlowBackend::new(3, JobStatus::Completed);
        let result = backend.wait(&JobId::from("slow-1")).await.unwrap();
        assert_eq!(result.counts.get("01"), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_surfaces_failure() {
        let backend = SlowBackend::new(1, JobStatus::Failed("boom".into()));
        let err = backend.wait(&JobId::from("slow-1")).await.unwrap_err();
        assert!(matches!(err, HalError::JobFailed(msg) if msg == "boom"));
    }

    #[tokio::test]
    async fn test_default_validate() {
        let backend = SlowBackend::new(0, JobStatus::Completed);
        let ok = backend.validate(&Circuit::bell().unwrap()).await.unwrap();
        assert!(ok.is_valid());

        let too_big = Circuit::with_size("big", 3, 0);
        let invalid = backend.validate(&too_big).await.unwrap();
        assert!(!invalid.is_valid());
    }
}
