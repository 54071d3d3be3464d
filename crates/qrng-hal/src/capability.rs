//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

use qrng_ir::Circuit;

/// What a backend can execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set (OpenQASM 3 naming convention).
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`, `"seeded"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::statevector(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into()],
        }
    }

    /// Add a feature flag.
    #[must_use]
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Check whether a feature flag is present.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Reasons `circuit` cannot run here; empty when it fits.
    pub fn violations(&self, circuit: &Circuit) -> Vec<String> {
        let mut reasons = vec![];

        if circuit.num_qubits() > self.num_qubits as usize {
            reasons.push(format!(
                "circuit uses {} qubits, backend supports {}",
                circuit.num_qubits(),
                self.num_qubits
            ));
        }

        for gate in circuit.instructions().iter().filter_map(|i| i.as_gate()) {
            if !self.gate_set.contains(gate.name()) {
                reasons.push(format!("unsupported gate '{}'", gate.name()));
            }
        }

        reasons.dedup();
        reasons
    }
}

/// Set of gate names a backend accepts natively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    gates: Vec<String>,
}

impl GateSet {
    /// Build from gate names.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Gates executed by the local statevector engine.
    pub fn statevector() -> Self {
        Self::new(["id", "x", "y", "z", "h", "s", "sdg", "cx"])
    }

    /// Check whether `gate` is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// All gate names.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }
}
