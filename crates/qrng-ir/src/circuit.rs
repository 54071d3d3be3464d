//! Circuit builder.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// Instructions are kept in program order. Every instruction is checked
/// against the circuit's qubits and classical bits when it is appended, so a
/// `Circuit` never references an operand it does not own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit with no wires.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    /// Create a circuit with `num_qubits` qubits and `num_clbits` classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: Vec::new(),
        }
    }

    /// Append a qubit.
    pub fn add_qubit(&mut self) -> QubitId {
        self.num_qubits += 1;
        QubitId(self.num_qubits - 1)
    }

    /// Append a classical bit.
    pub fn add_clbit(&mut self) -> ClbitId {
        self.num_clbits += 1;
        ClbitId(self.num_clbits - 1)
    }

    /// Hadamard.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [qubit])
    }

    /// Pauli-X.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, [qubit])
    }

    /// CNOT.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    /// Any standard gate.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Measure `qubit` into `clbit`.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit `i` into classical bit `i`, adding classical
    /// bits if there are fewer than qubits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        self.num_clbits = self.num_clbits.max(self.num_qubits);
        let pairs = (0..self.num_qubits).map(|i| (QubitId(i), ClbitId(i)));
        self.apply(Instruction::measure_pairs(pairs))
    }

    /// Append `instruction` after checking its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn check(&self, inst: &Instruction) -> IrResult<()> {
        if let Some(gate) = inst.as_gate() {
            if inst.qubits.len() != gate.num_qubits() as usize {
                return Err(IrError::QubitCountMismatch {
                    gate: gate.name(),
                    expected: gate.num_qubits(),
                    got: inst.qubits.len(),
                });
            }
        }

        for (i, &qubit) in inst.qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    instruction: inst.name(),
                });
            }
            if inst.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    instruction: inst.name(),
                });
            }
        }

        if let Some(&clbit) = inst.clbits.iter().find(|c| c.0 >= self.num_clbits) {
            return Err(IrError::ClbitNotFound {
                clbit,
                instruction: inst.name(),
            });
        }

        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Longest chain of instructions that share a qubit or classical bit.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.num_qubits()];
        let mut clbit_level = vec![0usize; self.num_clbits()];

        for inst in &self.instructions {
            let level = 1 + inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.index()]))
                .max()
                .unwrap_or(0);
            for q in &inst.qubits {
                qubit_level[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.index()] = level;
            }
        }

        qubit_level
            .into_iter()
            .chain(clbit_level)
            .max()
            .unwrap_or(0)
    }

    /// Map from classical bit index to the qubit measured into it, using the
    /// last measurement that targets each classical bit.
    pub fn measurement_map(&self) -> Vec<Option<QubitId>> {
        let mut map = vec![None; self.num_clbits()];
        for inst in self.instructions.iter().filter(|i| i.is_measure()) {
            for (qubit, clbit) in inst.qubits.iter().zip(&inst.clbits) {
                map[clbit.index()] = Some(*qubit);
            }
        }
        map
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        let q0 = QubitId(0);
        let q1 = QubitId(1);

        circuit
            .h(q0)?
            .cx(q0, q1)?
            .measure(q0, ClbitId(0))?
            .measure(q1, ClbitId(1))?;

        Ok(circuit)
    }
}
