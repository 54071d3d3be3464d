//! Sampling: circuit submission, decoding, expansion and reconciliation.
//!
//! ```text
//!   random_bits_circuit ──→ Backend ──→ Counts ──→ expand_counts ──→ reconcile
//!        (n × H)         (submit/wait)   (keys)      (Vec<u64>)     (len == shots)
//! ```

use tracing::{debug, info, warn};

use qrng_hal::{Backend, Counts, HalError, JobId, ValidationResult};

use crate::bit_order::BitOrder;
use crate::circuit::random_bits_circuit;
use crate::config::{validate_bit_width, validate_shots};
use crate::error::QrngResult;

/// What reconciliation had to do to reach the requested sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Expansion produced exactly the requested number of samples.
    Exact,
    /// The backend reported too few outcomes; zeros were appended.
    Padded {
        /// Number of zero samples appended.
        missing: usize,
    },
    /// The backend reported too many outcomes; the tail was dropped.
    Truncated {
        /// Reported outcomes beyond the requested count.
        excess: u64,
    },
}

impl Reconciliation {
    /// `true` when no samples were invented or discarded.
    pub fn is_exact(&self) -> bool {
        matches!(self, Reconciliation::Exact)
    }
}

/// Output of one sampling run.
#[derive(Debug, Clone)]
pub struct SampleRun {
    /// Frequency table as reported by the backend.
    pub counts: Counts,
    /// Reconciled samples, exactly `shots` long.
    pub samples: Vec<u64>,
    /// What reconciliation did.
    pub reconciliation: Reconciliation,
    /// Bits per sample.
    pub bit_width: u32,
    /// Name of the backend that executed the job.
    pub backend: String,
    /// Backend job identifier.
    pub job_id: JobId,
    /// Backend-reported execution time.
    pub execution_time_ms: Option<u64>,
}

/// Draws random integers from a backend.
pub struct Sampler {
    backend: Box<dyn Backend>,
    bit_order: BitOrder,
}

impl Sampler {
    /// Create a sampler over `backend` with [`BitOrder::MsbFirst`] decoding.
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self::from_boxed(Box::new(backend))
    }

    /// Create a sampler over an already boxed backend.
    pub fn from_boxed(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            bit_order: BitOrder::default(),
        }
    }

    /// Set how outcome keys are decoded.
    #[must_use]
    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    /// The decoding in use.
    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    /// The underlying backend.
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Draw `shots` samples of `bit_width` random bits each.
    ///
    /// Backend errors are returned unmodified; there are no retries.
    pub async fn sample(&self, bit_width: u32, shots: u32) -> QrngResult<SampleRun> {
        validate_bit_width(bit_width)?;
        validate_shots(shots)?;

        let circuit = random_bits_circuit(bit_width)?;
        let backend = self.backend.as_ref();

        let availability = backend.availability().await?;
        if !availability.is_available {
            let reason = availability
                .status_message
                .unwrap_or_else(|| format!("{} is not accepting jobs", backend.name()));
            return Err(HalError::BackendUnavailable(reason).into());
        }

        if let ValidationResult::Invalid { reasons } = backend.validate(&circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")).into());
        }

        let job_id = backend.submit(&circuit, shots).await?;
        info!(backend = backend.name(), %job_id, bit_width, shots, "submitted sampling job");

        let result = backend.wait(&job_id).await?;
        debug!(
            distinct = result.counts.len(),
            total = result.counts.total_shots(),
            "received frequency table"
        );

        let expanded = expand_counts(&result.counts, bit_width, self.bit_order, shots as usize)?;
        let (samples, reconciliation) = reconcile(expanded, result.counts.total_shots(), shots);

        Ok(SampleRun {
            counts: result.counts,
            samples,
            reconciliation,
            bit_width,
            backend: backend.name().to_string(),
            job_id,
            execution_time_ms: result.execution_time_ms,
        })
    }
}

/// Expand a frequency table into a flat list of at most `limit` integers.
///
/// Each key is decoded with `bit_order` and repeated by its count. Order
/// across distinct keys follows the table's iteration order; repeats of one
/// key are contiguous. Every key is decoded even when the limit is reached.
pub fn expand_counts(
    counts: &Counts,
    bit_width: u32,
    bit_order: BitOrder,
    limit: usize,
) -> QrngResult<Vec<u64>> {
    let decoded = counts
        .iter()
        .map(|(bitstring, &count)| Ok((bit_order.decode(bitstring, bit_width)?, count)))
        .collect::<QrngResult<Vec<_>>>()?;

    let total = usize::try_from(counts.total_shots()).unwrap_or(usize::MAX);
    let mut samples = Vec::with_capacity(total.min(limit));
    samples.extend(
        decoded
            .into_iter()
            .flat_map(|(value, count)| {
                std::iter::repeat_n(value, usize::try_from(count).unwrap_or(usize::MAX))
            })
            .take(limit),
    );
    Ok(samples)
}

/// Force `samples` to exactly `shots` entries.
///
/// `reported` is the backend's total outcome count, which may exceed the
/// expanded length when expansion was capped. Excess entries are dropped
/// from the end; missing entries are filled with `0`. Either case is logged
/// since it distorts the distribution.
pub fn reconcile(mut samples: Vec<u64>, reported: u64, shots: u32) -> (Vec<u64>, Reconciliation) {
    let target = shots as usize;
    let reconciliation = if reported > u64::from(shots) {
        let excess = reported - u64::from(shots);
        warn!(
            expected = target,
            got = reported,
            "backend returned {excess} more outcomes than requested; truncating"
        );
        samples.truncate(target);
        Reconciliation::Truncated { excess }
    } else if samples.len() < target {
        let missing = target - samples.len();
        warn!(
            expected = target,
            got = samples.len(),
            "backend returned {missing} fewer outcomes than requested; padding with 0"
        );
        samples.resize(target, 0);
        Reconciliation::Padded { missing }
    } else {
        samples.truncate(target);
        Reconciliation::Exact
    };
    (samples, reconciliation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QrngError;

    #[test]
    fn test_expand_counts() {
        let counts = Counts::from_pairs([("011", 2), ("100", 3)]);
        let mut samples = expand_counts(&counts, 3, BitOrder::MsbFirst, 10).unwrap();
        assert_eq!(samples.len(), 5);

        samples.sort_unstable();
        assert_eq!(samples, vec![3, 3, 4, 4, 4]);
    }

    #[test]
    fn test_expand_counts_repeats_are_contiguous() {
        let counts = Counts::from_pairs([("00", 3), ("01", 2), ("10", 4), ("11", 1)]);
        let samples = expand_counts(&counts, 2, BitOrder::MsbFirst, 10).unwrap();

        let mut runs = samples.clone();
        runs.dedup();
        assert_eq!(runs.len(), 4, "each value should form a single run: {samples:?}");
    }

    #[test]
    fn test_expand_counts_uses_bit_order() {
        let counts = Counts::from_pairs([("110", 1)]);
        assert_eq!(expand_counts(&counts, 3, BitOrder::MsbFirst, 1).unwrap(), vec![6]);
        assert_eq!(expand_counts(&counts, 3, BitOrder::LsbFirst, 1).unwrap(), vec![3]);
    }

    #[test]
    fn test_expand_counts_rejects_bad_keys() {
        let counts = Counts::from_pairs([("01", 1)]);
        assert!(matches!(
            expand_counts(&counts, 3, BitOrder::MsbFirst, 1),
            Err(QrngError::InvalidBitstring { .. })
        ));
    }

    #[test]
    fn test_reconcile_exact() {
        let (samples, rec) = reconcile(vec![1, 2, 3], 3, 3);
        assert_eq!(samples, vec![1, 2, 3]);
        assert!(rec.is_exact());
    }

    #[test]
    fn test_reconcile_pads_with_zeros() {
        let (samples, rec) = reconcile(vec![5, 6, 7], 3, 5);
        assert_eq!(samples, vec![5, 6, 7, 0, 0]);
        assert_eq!(rec, Reconciliation::Padded { missing: 2 });
    }

    #[test]
    fn test_reconcile_truncates_keeping_prefix() {
        let (samples, rec) = reconcile(vec![9, 8, 7, 6, 5], 5, 2);
        assert_eq!(samples, vec![9, 8]);
        assert_eq!(rec, Reconciliation::Truncated { excess: 3 });
    }

    #[test]
    fn test_reconcile_empty_input() {
        let (samples, rec) = reconcile(Vec::new(), 0, 4);
        assert_eq!(samples, vec![0; 4]);
        assert_eq!(rec, Reconciliation::Padded { missing: 4 });
    }

    #[test]
    fn test_expand_counts_stops_at_limit() {
        let counts = Counts::from_pairs([("01", u64::MAX / 16)]);
        let samples = expand_counts(&counts, 2, BitOrder::MsbFirst, 4).unwrap();
        assert_eq!(samples, vec![1; 4]);
    }

    #[test]
    fn test_expand_counts_decodes_keys_past_limit() {
        let counts = Counts::from_pairs([("01", 1), ("0x", 1)]);
        assert!(matches!(
            expand_counts(&counts, 2, BitOrder::MsbFirst, 1),
            Err(QrngError::InvalidBitstring { .. })
        ));
    }

    #[test]
    fn test_reconcile_counts_excess_beyond_capped_expansion() {
        let (samples, rec) = reconcile(vec![7, 7], u64::MAX, 2);
        assert_eq!(samples, vec![7, 7]);
        assert_eq!(rec, Reconciliation::Truncated { excess: u64::MAX - 2 });
    }
}
