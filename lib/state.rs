//! Sparse, per-qubit snapshots of Pauli errors.
//!
//! An [`ErrorState`] maps qubit indices to non-identity [`Pauli`] labels. A
//! qubit carrying no error has no entry at all; cancelling an error always
//! removes its key rather than storing an identity.

use std::{ fmt, str::FromStr };
use itertools::Itertools;
use rustc_hash::FxHashMap as HashMap;
use crate::{
    circuit::{ self, CircuitError, CircuitResult },
    pauli::Pauli,
};

/// A single Pauli error injected on a given qubit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PauliError {
    pub qubit: usize,
    pub pauli: Pauli,
}

impl PauliError {
    /// Create a new `PauliError`.
    pub fn new(qubit: usize, pauli: Pauli) -> Self { Self { qubit, pauli } }
}

impl From<(usize, Pauli)> for PauliError {
    fn from((qubit, pauli): (usize, Pauli)) -> Self { Self { qubit, pauli } }
}

impl fmt::Display for PauliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.pauli, self.qubit)
    }
}

impl FromStr for PauliError {
    type Err = CircuitError;

    /// Parse an error from text of the form `X 0`.
    fn from_str(s: &str) -> CircuitResult<Self> {
        let toks: Vec<&str> = circuit::tokenize(s).collect();
        match toks.as_slice() {
            [label, qubit] => {
                let pauli: Pauli = label.parse()?;
                let qubit = circuit::parse_qubit(qubit)?;
                Ok(Self { qubit, pauli })
            },
            [label] => {
                label.parse::<Pauli>()?;
                Err(CircuitError::MissingQubit)
            },
            [] => Err(CircuitError::MissingQubit),
            [_, _, extra, ..] => Err(CircuitError::InvalidQubit(extra.to_string())),
        }
    }
}

/// A difference in the label carried by a single qubit between two
/// [`ErrorState`]s.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LabelChange {
    pub qubit: usize,
    pub before: Option<Pauli>,
    pub after: Option<Pauli>,
}

/// The Pauli error on each qubit at one point in a circuit.
///
/// Iteration and formatting always run in ascending qubit order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ErrorState {
    errors: HashMap<usize, Pauli>,
}

impl FromIterator<(usize, Pauli)> for ErrorState {
    /// Later entries for the same qubit overwrite earlier ones.
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = (usize, Pauli)>
    {
        Self { errors: iter.into_iter().collect() }
    }
}

impl FromIterator<PauliError> for ErrorState {
    /// Later entries for the same qubit overwrite earlier ones.
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = PauliError>
    {
        iter.into_iter().map(|err| (err.qubit, err.pauli)).collect()
    }
}

impl ErrorState {
    /// Create a new, error-free state.
    pub fn new() -> Self { Self::default() }

    /// Return the label on qubit `k`, or `None` for the identity.
    pub fn get(&self, k: usize) -> Option<Pauli> {
        self.errors.get(&k).copied()
    }

    /// Return `true` if qubit `k` carries a non-identity error.
    pub fn contains(&self, k: usize) -> bool { self.errors.contains_key(&k) }

    /// Return the number of qubits carrying a non-identity error.
    pub fn weight(&self) -> usize { self.errors.len() }

    /// Return `true` if no qubit carries an error.
    pub fn is_empty(&self) -> bool { self.errors.is_empty() }

    /// Return the largest qubit index carrying an error.
    pub fn max_qubit(&self) -> Option<usize> {
        self.errors.keys().copied().max()
    }

    /// Return an iterator over all `(qubit, label)` pairs, in ascending qubit
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Pauli)> + '_ {
        self.errors.iter()
            .map(|(k, p)| (*k, *p))
            .sorted_by_key(|(k, _)| *k)
    }

    /// Return the qubits carrying an error, in ascending order.
    pub fn support(&self) -> Vec<usize> {
        self.errors.keys().copied().sorted().collect()
    }

    /// Return a copy of `self` with qubit `k` set to `label`, where `None`
    /// removes any error on it.
    pub fn with(&self, k: usize, label: Option<Pauli>) -> Self {
        let mut new = self.clone();
        new.set(k, label);
        new
    }

    // only ever called on a fresh copy, before it is handed out
    pub(crate) fn set(&mut self, k: usize, label: Option<Pauli>) {
        match label {
            Some(p) => { self.errors.insert(k, p); },
            None => { self.errors.remove(&k); },
        }
    }

    /// Return every qubit whose label differs between `before` and `self`, in
    /// ascending qubit order.
    pub fn changes_from(&self, before: &Self) -> Vec<LabelChange> {
        before.errors.keys()
            .chain(self.errors.keys())
            .copied()
            .sorted()
            .dedup()
            .filter_map(|qubit| {
                let b = before.get(qubit);
                let a = self.get(qubit);
                (a != b).then_some(LabelChange { qubit, before: b, after: a })
            })
            .collect()
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter().map(|(k, p)| format!("{}: {}", k, p)).join(", "),
        )
    }
}
