//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qrng_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qrng_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

/// Qubit limit used by [`SimulatorBackend::new`].
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Largest qubit limit a simulator accepts; the statevector holds `2^n`
/// amplitudes of 16 bytes each.
pub const MAX_SUPPORTED_QUBITS: u32 = 30;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Jobs execute eagerly inside [`Backend::submit`]; by the time a job id is
/// returned the job is already `Completed`.
pub struct SimulatorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    jobs: Mutex<FxHashMap<String, SimJob>>,
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits, capped at
    /// [`MAX_SUPPORTED_QUBITS`].
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(max_qubits.min(MAX_SUPPORTED_QUBITS)),
            jobs: Mutex::new(FxHashMap::default()),
            rng: Mutex::new(StdRng::from_entropy()),
            seed: None,
        }
    }

    /// Make sampling reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self.seed = Some(seed);
        if !self.capabilities.has_feature("seeded") {
            self.capabilities = self.capabilities.with_feature("seeded");
        }
        self
    }

    /// Seed in use, if sampling is reproducible.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Instruction-level checks beyond the generic gate/size check.
    fn structural_violations(circuit: &Circuit) -> Vec<String> {
        let mut reasons = vec![];
        let mut measured = vec![false; circuit.num_qubits()];

        for inst in circuit.instructions() {
            match inst.kind {
                InstructionKind::Gate(gate) => {
                    if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
                        reasons.push(format!(
                            "gate '{gate}' on {q} after measurement (mid-circuit measurement is not supported)"
                        ));
                    }
                }
                InstructionKind::Measure => {
                    for q in &inst.qubits {
                        measured[q.index()] = true;
                    }
                }
            }
        }

        reasons.dedup();
        reasons
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();
        let num_qubits = circuit.num_qubits();
        debug!("Starting simulation: {} qubits, {} shots", num_qubits, shots);

        let mut sv = Statevector::new(num_qubits);
        for inst in circuit.instructions() {
            sv.apply(inst);
        }
        let sampler = sv.sampler();

        let mut outcomes: FxHashMap<usize, u64> = FxHashMap::default();
        {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            for _ in 0..shots {
                *outcomes.entry(sampler.sample(&mut *rng)).or_default() += 1;
            }
        }
        debug!("Observed {} distinct outcomes", outcomes.len());

        let measurement_map = circuit.measurement_map();
        let counts: Counts = outcomes
            .into_iter()
            .map(|(outcome, count)| (outcome_to_bitstring(outcome, &measurement_map), count))
            .collect();

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        ExecutionResult::new(counts, shots)
            .with_execution_time(elapsed_ms)
            .with_metadata(serde_json::json!({
                "num_qubits": num_qubits,
                "seed": self.seed,
            }))
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Render a basis-state index as a classical-register bitstring.
///
/// One character per classical bit, clbit 0 rightmost. Each clbit holds the
/// value of the qubit last measured into it; unmeasured clbits read `0`.
fn outcome_to_bitstring(
    outcome: usize,
    measurement_map: &[Option<qrng_ir::QubitId>],
) -> String {
    measurement_map
        .iter()
        .rev()
        .map(|qubit| match qubit {
            Some(q) if (outcome >> q.0) & 1 == 1 => '1',
            _ => '0',
        })
        .collect()
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let mut reasons = self.capabilities.violations(circuit);
        reasons.extend(Self::structural_violations(circuit));
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        let max_qubits = self.capabilities.num_qubits;
        if circuit.num_qubits() > max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                max_qubits
            )));
        }
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} (must be between 1 and {})",
                self.capabilities.max_shots
            )));
        }
        if let ValidationResult::Invalid { reasons } = self.validate(circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend(self.name());
        self.lock_jobs()
            .insert(job_id.0.clone(), SimJob { job, result: None });
        debug!("Submitted job: {}", job_id);

        if let Some(sim_job) = self.lock_jobs().get_mut(&job_id.0) {
            sim_job.job.transition(JobStatus::Running);
        }

        let result = self.run_simulation(circuit, shots);

        if let Some(sim_job) = self.lock_jobs().get_mut(&job_id.0) {
            sim_job.result = Some(result);
            sim_job.job.transition(JobStatus::Completed);
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.lock_jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.lock_jobs();
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (status, _) => Err(HalError::Backend(format!(
                "job {job_id} has no result (status: {status})"
            ))),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.lock_jobs();
        let sim_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        sim_job.job.transition(JobStatus::Cancelled);
        Ok(())
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            Some(v) if v > u64::from(MAX_SUPPORTED_QUBITS) => {
                return Err(HalError::Configuration(format!(
                    "max_qubits {v} exceeds the simulator limit of {MAX_SUPPORTED_QUBITS}"
                )));
            }
            Some(v) => u32::try_from(v).unwrap_or(MAX_SUPPORTED_QUBITS),
            None => DEFAULT_MAX_QUBITS,
        };
        let seed = config.extra_u64("seed")?;

        let mut backend = Self::with_max_qubits(max_qubits);
        backend.config = config;
        if let Some(seed) = seed {
            backend = backend.with_seed(seed);
        }
        Ok(backend)
    }
}
