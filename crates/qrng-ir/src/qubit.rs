//! Wire identifiers.
//!
//! A circuit owns `n` qubits and `m` classical bits, addressed densely as
//! `0..n` and `0..m`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! wire_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Position of this wire, for indexing per-wire tables.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                $name(id)
            }
        }
    };
}

wire_id!(
    /// Index of a qubit within a circuit.
    QubitId,
    "q"
);

wire_id!(
    /// Index of a classical bit within a circuit.
    ClbitId,
    "c"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_display() {
        assert_eq!(QubitId(0).to_string(), "q0");
        assert_eq!(ClbitId::from(7).to_string(), "c7");
    }

    #[test]
    fn test_wire_index_and_serde() {
        assert_eq!(QubitId(12).index(), 12);
        assert_eq!(serde_json::to_string(&ClbitId(3)).unwrap(), "3");
    }
}
