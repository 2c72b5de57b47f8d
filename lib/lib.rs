#![allow(clippy::upper_case_acronyms)]

//! This package tracks how Pauli errors spread, merge, and cancel as they are
//! pushed through circuits of Clifford gates.
//!
//! Conjugating a Pauli operator by a Clifford gate yields another Pauli
//! operator, so an error injected somewhere in a circuit can be followed gate
//! by gate without ever simulating a quantum state. Global phases and signs are
//! discarded throughout.
//!
//! - [`pauli`] defines the single-qubit labels *X*, *Z*, *Y* and their
//! phase-free products.
//! - [`circuit`] provides validated [Hadamard and CNOT gates][circuit::Gate]
//! and ordered [circuits][circuit::Circuit] of them.
//! - [`state`] holds sparse, per-qubit [snapshots][state::ErrorState] of the
//! errors present at one point in a circuit.
//! - [`rules`] implements the conjugation rule for each gate.
//! - [`propagate`] drives the rules across a whole circuit, producing a
//! [`Trace`][trace::Trace] of intermediate snapshots.
//!
//! ```
//! use spidertrace::{ circuit, pauli::Pauli, propagate::propagate };
//!
//! // an X error on the control of a CNOT is copied onto the target
//! let circ = circuit![H(1), CNOT(0, 1)]?;
//! let trace = propagate(&circ, [(0, Pauli::X)])?;
//! assert_eq!(trace.last_state().to_string(), "{0: X, 1: X}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Further reading
//! - D. Gottesman, "The Heisenberg representation of quantum computers."
//! [arXiv:quant-ph/9807006](https://arxiv.org/abs/quant-ph/9807006)
//! - S. Aaronson and D. Gottesman, "Improved simulation of stabilizer
//! circuits." [arXiv:quant-ph/0406196](https://arxiv.org/abs/quant-ph/0406196)
//!

pub mod pauli;
pub mod circuit;
pub mod state;
pub mod rules;
pub mod propagate;
pub mod trace;

pub use circuit::{ Circuit, CircuitError, Gate, GateKind };
pub use pauli::Pauli;
pub use propagate::{ propagate, PropagateError, Propagator };
pub use rules::CnotRule;
pub use state::{ ErrorState, PauliError };
pub use trace::{ Trace, TraceStep };
