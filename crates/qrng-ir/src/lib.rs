//! QRNG Circuit Intermediate Representation
//!
//! The data structures used to describe a sampling request to a quantum
//! backend. A [`Circuit`] owns a number of qubits and classical bits and an
//! ordered list of [`Instruction`]s, each a [`StandardGate`] or a measurement.
//!
//! # Example: Uniform Superposition
//!
//! ```rust
//! use qrng_ir::{Circuit, QubitId};
//!
//! // Three qubits, three classical bits
//! let mut circuit = Circuit::with_size("coins", 3, 3);
//!
//! for q in 0..3 {
//!     circuit.h(QubitId(q)).unwrap();
//! }
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.depth(), 2); // parallel H layer, then measurement
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
