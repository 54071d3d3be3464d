//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;

use qrng_ir::{Instruction, InstructionKind, StandardGate};

/// A statevector representing a quantum state.
///
/// Basis index bit `q` holds the value of qubit `q`.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Callers bound `num_qubits`; backends cap it at
    /// [`MAX_SUPPORTED_QUBITS`](crate::MAX_SUPPORTED_QUBITS).
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements leave the state untouched; sampling happens once
    /// evolution is complete.
    pub fn apply(&mut self, instruction: &Instruction) {
        if let InstructionKind::Gate(gate) = instruction.kind {
            let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
            self.apply_gate(gate, &qubits);
        }
    }

    /// Apply a standard gate.
    pub fn apply_gate(&mut self, gate: StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_phase(qubits[0], Complex64::new(-1.0, 0.0)),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], Complex64::new(0.0, 1.0)),
            StandardGate::Sdg => self.apply_phase(qubits[0], Complex64::new(0.0, -1.0)),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    /// Multiply the |1⟩ component of `qubit` by `phase`.
    fn apply_phase(&mut self, qubit: usize, phase: Complex64) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Build a sampler over the current Born-rule distribution.
    pub fn sampler(&self) -> OutcomeSampler {
        OutcomeSampler::new(&self.probabilities())
    }
}

/// Draws basis-state indices from a fixed probability distribution.
pub struct OutcomeSampler {
    cumulative: Vec<f64>,
}

impl OutcomeSampler {
    /// Build from (not necessarily normalised) probabilities.
    pub fn new(probabilities: &[f64]) -> Self {
        let mut acc = 0.0;
        let mut cumulative: Vec<f64> = probabilities
            .iter()
            .map(|p| {
                acc += p;
                acc
            })
            .collect();
        if acc > 0.0 {
            for c in &mut cumulative {
                *c /= acc;
            }
        }
        Self { cumulative }
    }

    /// Draw one basis-state index.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();
        let idx = self.cumulative.partition_point(|&c| c <= r);
        // Rounding can leave the last cumulative entry just below 1.0.
        idx.min(self.cumulative.len().saturating_sub(1))
    }
}
