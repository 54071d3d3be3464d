//! IR construction errors.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Why an instruction was rejected by a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index past the end of the circuit.
    #[error("{instruction}: qubit {qubit} is not in the circuit")]
    QubitNotFound {
        /// Offending qubit.
        qubit: QubitId,
        /// Instruction mnemonic.
        instruction: &'static str,
    },

    /// Classical bit index past the end of the circuit.
    #[error("{instruction}: classical bit {clbit} is not in the circuit")]
    ClbitNotFound {
        /// Offending classical bit.
        clbit: ClbitId,
        /// Instruction mnemonic.
        instruction: &'static str,
    },

    /// Wrong operand count for a gate.
    #[error("gate '{gate}' takes {expected} qubit(s), got {got}")]
    QubitCountMismatch {
        /// Gate mnemonic.
        gate: &'static str,
        /// Operands the gate takes.
        expected: u32,
        /// Operands supplied.
        got: usize,
    },

    /// The same qubit appears twice in one instruction.
    #[error("{instruction}: qubit {qubit} used more than once")]
    DuplicateQubit {
        /// Repeated qubit.
        qubit: QubitId,
        /// Instruction mnemonic.
        instruction: &'static str,
    },
}

/// Result alias for IR operations.
pub type IrResult<T> = Result<T, IrError>;
