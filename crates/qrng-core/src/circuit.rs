//! Sampling circuit construction.

use qrng_ir::{Circuit, ClbitId, IrResult, QubitId};

/// Build the `n`-bit sampling circuit.
///
/// One Hadamard on every qubit puts each into an equal superposition; qubit
/// `i` is then measured into classical bit `i`.
pub fn random_bits_circuit(num_bits: u32) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size(format!("qrng_{num_bits}"), num_bits, num_bits);
    for q in 0..num_bits {
        circuit.h(QubitId(q))?;
    }
    for q in 0..num_bits {
        circuit.measure(QubitId(q), ClbitId(q))?;
    }
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bits_circuit_shape() {
        let circuit = random_bits_circuit(4).unwrap();
        assert_eq!(circuit.name(), "qrng_4");
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_clbits(), 4);
        assert_eq!(circuit.num_ops(), 8);
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_qubit_i_measured_into_clbit_i() {
        let circuit = random_bits_circuit(5).unwrap();
        let map = circuit.measurement_map();
        for (clbit, qubit) in map.iter().enumerate() {
            assert_eq!(*qubit, Some(QubitId(clbit as u32)));
        }
    }

    #[test]
    fn test_only_hadamards_before_measurement() {
        let circuit = random_bits_circuit(3).unwrap();
        let gates: Vec<_> = circuit
            .instructions()
            .iter()
            .filter_map(|i| i.as_gate())
            .map(|g| g.name().to_string())
            .collect();
        assert_eq!(gates, vec!["h", "h", "h"]);
    }
}
