//! Gates the statevector engine knows how to apply.

use serde::{Deserialize, Serialize};

/// A fixed, parameter-free gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardGate {
    /// Identity.
    #[serde(rename = "id")]
    I,
    /// Pauli-X (bit flip).
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z (phase flip).
    Z,
    /// Hadamard: |0⟩ to (|0⟩ + |1⟩)/√2.
    H,
    /// Quarter-turn phase, √Z.
    S,
    /// Inverse of [`StandardGate::S`].
    Sdg,
    /// Controlled NOT; operands are `[control, target]`.
    CX,
}

impl StandardGate {
    /// OpenQASM 3 mnemonic.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::CX => "cx",
        }
    }

    /// Operand count.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        if self == StandardGate::CX { 2 } else { 1 }
    }
}

impl std::fmt::Display for StandardGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
