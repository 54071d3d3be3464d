//! A gate or measurement together with the wires it touches.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// What an [`Instruction`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionKind {
    /// Unitary on `qubits`.
    Gate(StandardGate),
    /// Reads `qubits[i]` into `clbits[i]`.
    Measure,
}

/// One step of a circuit.
///
/// Operands are not checked here; [`crate::Circuit::apply`] does that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Operation.
    pub kind: InstructionKind,
    /// Qubit operands, in gate order.
    pub qubits: Vec<QubitId>,
    /// Classical targets; empty for gates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// `gate` applied to `qubits`.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    /// Measure one qubit.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self::measure_pairs([(qubit, clbit)])
    }

    /// Measure several qubits at once, one classical target each.
    pub fn measure_pairs(pairs: impl IntoIterator<Item = (QubitId, ClbitId)>) -> Self {
        let (qubits, clbits) = pairs.into_iter().unzip();
        Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        }
    }

    /// `true` for measurements.
    pub fn is_measure(&self) -> bool {
        self.kind == InstructionKind::Measure
    }

    /// The gate, unless this is a measurement.
    pub fn as_gate(&self) -> Option<StandardGate> {
        match self.kind {
            InstructionKind::Gate(gate) => Some(gate),
            InstructionKind::Measure => None,
        }
    }

    /// Mnemonic used in error messages.
    pub fn name(&self) -> &'static str {
        match self.kind {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Measure => "measure",
        }
    }
}
