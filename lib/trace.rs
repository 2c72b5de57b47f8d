//! The output of error propagation: one immutable snapshot per gate.

use std::{ fmt, ops::Index };
use crate::{
    circuit::{ Circuit, Gate },
    pauli::Pauli,
    state::{ ErrorState, LabelChange },
};

/// A gate paired with the errors present immediately after it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceStep {
    gate: Gate,
    errors_after: ErrorState,
}

impl TraceStep {
    pub(crate) fn new(gate: Gate, errors_after: ErrorState) -> Self {
        Self { gate, errors_after }
    }

    /// Return the gate applied at this step.
    pub fn gate(&self) -> &Gate { &self.gate }

    /// Return the errors present after the gate.
    pub fn errors_after(&self) -> &ErrorState { &self.errors_after }
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.gate, self.errors_after)
    }
}

/// The ordered history of [`ErrorState`]s produced by propagating errors
/// through a circuit.
///
/// A `Trace` holds exactly one [`TraceStep`] per gate. The state the errors
/// started from is kept alongside, but is not itself a step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    initial: ErrorState,
    steps: Vec<TraceStep>,
}

impl Trace {
    pub(crate) fn new(initial: ErrorState, steps: Vec<TraceStep>) -> Self {
        Self { initial, steps }
    }

    /// Return the number of steps, equal to the number of gates propagated
    /// through.
    pub fn len(&self) -> usize { self.steps.len() }

    /// Return `true` if no gates were propagated through.
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    /// Return the `k`-th step, if it exists.
    pub fn get(&self, k: usize) -> Option<&TraceStep> { self.steps.get(k) }

    /// Return all steps in order.
    pub fn steps(&self) -> &[TraceStep] { &self.steps }

    /// Return an iterator over all steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceStep> { self.steps.iter() }

    /// Return the errors present before the first gate.
    pub fn initial(&self) -> &ErrorState { &self.initial }

    /// Return the errors present after the last gate, or the initial errors
    /// if there are no steps.
    pub fn last_state(&self) -> &ErrorState {
        self.steps.last().map_or(&self.initial, TraceStep::errors_after)
    }

    /// Return an iterator over the initial state followed by the state after
    /// each step.
    pub fn states(&self) -> impl Iterator<Item = &ErrorState> + '_ {
        std::iter::once(&self.initial)
            .chain(self.steps.iter().map(TraceStep::errors_after))
    }

    /// Return the circuit that produced `self`.
    pub fn circuit(&self) -> Circuit {
        self.steps.iter().map(|step| step.gate.clone()).collect()
    }

    /// Return the number of qubits touched by any gate or error in `self`.
    pub fn num_qubits(&self) -> usize {
        let from_gates =
            self.steps.iter().map(|step| step.gate.max_qubit().saturating_add(1));
        let from_errors =
            self.states().filter_map(|state| state.max_qubit().map(|k| k.saturating_add(1)));
        from_gates.chain(from_errors).max().unwrap_or(0)
    }

    /// Return a per-qubit, human-readable report of `self`, covering qubits
    /// `0..`[`num_qubits`][Self::num_qubits].
    ///
    /// ```
    /// # use spidertrace::{ circuit, pauli::Pauli, propagate::* };
    /// let circ = circuit![CNOT(0, 1)]?;
    /// let trace = propagate(&circ, [(0, Pauli::X)])?;
    /// assert_eq!(
    ///     trace.report().to_string(),
    ///     "\
    /// Before any gates:
    ///   qubit 0: X
    ///   qubit 1: I
    /// After CNOT(0, 1):
    ///   qubit 0: X
    ///   qubit 1: I -> X
    /// Final errors:
    ///   qubit 0: X
    ///   qubit 1: X
    /// ",
    /// );
    /// # Ok::<(), PropagateError>(())
    /// ```
    pub fn report(&self) -> Report<'_> {
        Report { trace: self, num_qubits: self.num_qubits() }
    }
}

impl Index<usize> for Trace {
    type Output = TraceStep;

    fn index(&self, k: usize) -> &Self::Output { &self.steps[k] }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceStep;
    type IntoIter = std::slice::Iter<'a, TraceStep>;

    fn into_iter(self) -> Self::IntoIter { self.steps.iter() }
}

impl IntoIterator for Trace {
    type Item = TraceStep;
    type IntoIter = std::vec::IntoIter<TraceStep>;

    fn into_iter(self) -> Self::IntoIter { self.steps.into_iter() }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "initial -> {}", self.initial)?;
        for step in self.steps.iter() {
            writeln!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// Per-qubit listing of a [`Trace`], returned by [`Trace::report`].
#[derive(Copy, Clone, Debug)]
pub struct Report<'a> {
    trace: &'a Trace,
    num_qubits: usize,
}

impl<'a> Report<'a> {
    /// Widen or narrow the listing to qubits `0..n`.
    pub fn with_num_qubits(mut self, n: usize) -> Self {
        self.num_qubits = n;
        self
    }

    fn write_state(&self, f: &mut fmt::Formatter<'_>, state: &ErrorState)
        -> fmt::Result
    {
        for k in 0..self.num_qubits {
            writeln!(f, "  qubit {}: {}", k, Pauli::label(state.get(k)))?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for Report<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Before any gates:")?;
        self.write_state(f, self.trace.initial())?;
        let mut before = self.trace.initial();
        for step in self.trace.iter() {
            writeln!(f, "After {}:", step.gate())?;
            let after = step.errors_after();
            let mut changes = after.changes_from(before).into_iter().peekable();
            for k in 0..self.num_qubits {
                match changes.next_if(|ch| ch.qubit == k) {
                    Some(LabelChange { before: old, after: new, .. }) => writeln!(
                        f,
                        "  qubit {}: {} -> {}",
                        k, Pauli::label(old), Pauli::label(new),
                    )?,
                    None => writeln!(f, "  qubit {}: {}", k, Pauli::label(after.get(k)))?,
                }
            }
            before = after;
        }
        writeln!(f, "Final errors:")?;
        self.write_state(f, self.trace.last_state())
    }
}
