//! Gate-by-gate propagation of Pauli errors through a [`Circuit`].
//!
//! [`propagate`] covers the common case. [`Propagator`] additionally allows
//! choosing the CNOT model and bounding the register that gates and errors
//! may address.

use thiserror::Error;
use tracing::{ debug, trace };
use crate::{
    circuit::{ Circuit, CircuitError, Gate },
    rules::{ self, CnotRule },
    state::{ ErrorState, PauliError },
    trace::{ Trace, TraceStep },
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropagateError {
    /// Returned when no conjugation rule matches a gate's operands. Gates
    /// built through [`Gate`]'s constructors never trigger this.
    #[error("internal invariant violated: no conjugation rule applies to {0}")]
    InternalInvariantViolation(Gate),

    /// Returned when a gate operand or injected error lies outside a
    /// configured register.
    #[error("qubit {0} is out of range for a register of {1} qubit(s)")]
    QubitOutOfRange(usize, usize),

    /// Returned when an invalid gate or error description is converted on
    /// the way in.
    #[error("circuit error: {0}")]
    InvalidCircuit(#[from] CircuitError),
}
pub type PropagateResult<T> = Result<T, PropagateError>;
use PropagateError::*;

/// Configurable driver for error propagation.
///
/// ```
/// # use spidertrace::{ circuit, pauli::Pauli, propagate::*, rules::CnotRule };
/// let circ = circuit![CNOT(0, 1)]?;
/// let trace =
///     Propagator::new()
///     .with_cnot_rule(CnotRule::Symplectic)
///     .with_register_size(2)
///     .propagate(&circ, [(0, Pauli::Y), (1, Pauli::Y)])?;
/// assert_eq!(trace.last_state().to_string(), "{0: X, 1: Z}");
/// # Ok::<(), PropagateError>(())
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Propagator {
    register_size: Option<usize>,
    cnot_rule: CnotRule,
}

impl Propagator {
    /// Create a new `Propagator` with the [`Merge`][CnotRule::Merge] CNOT
    /// model and no register bound.
    pub fn new() -> Self { Self::default() }

    /// Reject any gate operand or injected error on a qubit `>= n`.
    pub fn with_register_size(mut self, n: usize) -> Self {
        self.register_size = Some(n);
        self
    }

    /// Use `rule` to push errors through CNOTs.
    pub fn with_cnot_rule(mut self, rule: CnotRule) -> Self {
        self.cnot_rule = rule;
        self
    }

    /// Return the configured register size, if any.
    pub fn register_size(&self) -> Option<usize> { self.register_size }

    /// Return the configured CNOT model.
    pub fn cnot_rule(&self) -> CnotRule { self.cnot_rule }

    fn check_register(&self, circuit: &Circuit, initial: &ErrorState)
        -> PropagateResult<()>
    {
        let Some(n) = self.register_size else { return Ok(()); };
        let out_of_range =
            circuit.iter()
            .flat_map(|gate| gate.qubits().iter().copied())
            .chain(initial.max_qubit())
            .find(|k| *k >= n);
        match out_of_range {
            Some(k) => {
                debug!(qubit = k, register_size = n, "rejecting out-of-range qubit");
                Err(QubitOutOfRange(k, n))
            },
            None => Ok(()),
        }
    }

    /// Push `initial_errors` through every gate of `circuit` in order,
    /// returning one [`TraceStep`] per gate.
    ///
    /// Later errors on the same qubit overwrite earlier ones. The result is
    /// all-or-nothing: any failure discards the partial trace.
    pub fn propagate<I, E>(&self, circuit: &Circuit, initial_errors: I)
        -> PropagateResult<Trace>
    where
        I: IntoIterator<Item = E>,
        E: Into<PauliError>,
    {
        let initial: ErrorState =
            initial_errors.into_iter().map(Into::into).collect();
        self.check_register(circuit, &initial)?;
        debug!(
            gates = circuit.len(),
            weight = initial.weight(),
            rule = ?self.cnot_rule,
            "propagating errors",
        );
        let mut steps: Vec<TraceStep> = Vec::with_capacity(circuit.len());
        for gate in circuit.iter() {
            let before = steps.last().map_or(&initial, TraceStep::errors_after);
            let after = rules::conjugate(gate, before, self.cnot_rule)?;
            trace!(%gate, errors = %after, "applied gate");
            steps.push(TraceStep::new(gate.clone(), after));
        }
        Ok(Trace::new(initial, steps))
    }
}

/// Push `initial_errors` through `circuit` with the default [`Propagator`].
///
/// ```
/// # use spidertrace::{ circuit, pauli::Pauli, propagate::* };
/// let circ = circuit![H(0), CNOT(0, 1)]?;
/// let trace = propagate(&circ, [(0, Pauli::X)])?;
/// assert_eq!(trace.len(), 2);
/// assert_eq!(trace[0].errors_after().get(0), Some(Pauli::Z));
/// # Ok::<(), PropagateError>(())
/// ```
pub fn propagate<I, E>(circuit: &Circuit, initial_errors: I)
    -> PropagateResult<Trace>
where
    I: IntoIterator<Item = E>,
    E: Into<PauliError>,
{
    Propagator::default().propagate(circuit, initial_errors)
}
