//! Provides tools for conventional circuit notation.
//!
//! Circuits are plain, ordered lists of validated [`Gate`]s. Only the two
//! Clifford generators that the propagation engine understands are available:
//! the Hadamard and the CNOT. See [`circuit!`][crate::circuit!] for abbreviated
//! syntax.

use std::{ fmt, str::FromStr };
use itertools::Itertools;
use thiserror::Error;
use crate::pauli::PauliLabelError;

/// Configuration errors, raised when gates or injected errors are
/// constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// Returned when a gate name is neither `H` nor `CNOT`.
    #[error("unknown gate kind {0:?}: expected H or CNOT")]
    InvalidGateKind(String),

    /// Returned when a gate is given the wrong number of qubit operands.
    #[error("gate {0} acts on {} qubit(s), but {1} were given", .0.arity())]
    ArityMismatch(GateKind, usize),

    /// Returned when a CNOT is given the same qubit as control and target.
    #[error("CNOT control and target must differ, but both are qubit {0}")]
    DegenerateOperands(usize),

    /// Returned when a qubit operand cannot be read as a non-negative
    /// integer.
    #[error("invalid qubit index {0:?}")]
    InvalidQubit(String),

    /// Returned when an injected error is given without a qubit operand.
    #[error("missing qubit operand")]
    MissingQubit,

    /// Returned when an injected error names an invalid Pauli label.
    #[error("{0}")]
    Label(#[from] PauliLabelError),
}
pub type CircuitResult<T> = Result<T, CircuitError>;
use CircuitError::*;

/// The kind of a [`Gate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateKind {
    /// Hadamard.
    H,
    /// π-rotation about *x* on the second qubit, controlled by the first.
    CNOT,
}

impl GateKind {
    /// Return the number of qubits a gate of this kind acts on.
    pub fn arity(self) -> usize {
        match self {
            Self::H => 1,
            Self::CNOT => 2,
        }
    }

    /// Return the conventional name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::CNOT => "CNOT",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = CircuitError;

    fn from_str(s: &str) -> CircuitResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(Self::H),
            "CNOT" | "CX" => Ok(Self::CNOT),
            _ => Err(InvalidGateKind(s.trim().to_string())),
        }
    }
}

/// A unitary gate to apply in a quantum circuit.
///
/// Gates are validated on construction and immutable afterward: a Hadamard
/// always carries exactly one qubit, and a CNOT always carries two distinct
/// qubits, control first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GateRepr"))]
pub struct Gate {
    kind: GateKind,
    qubits: Vec<usize>,
}

impl Gate {
    /// Create a new gate of the given kind acting on `qubits`.
    pub fn new(kind: GateKind, qubits: &[usize]) -> CircuitResult<Self> {
        if qubits.len() != kind.arity() {
            return Err(ArityMismatch(kind, qubits.len()));
        }
        if let (GateKind::CNOT, &[c, t]) = (kind, qubits) {
            if c == t { return Err(DegenerateOperands(c)); }
        }
        Ok(Self { kind, qubits: qubits.to_vec() })
    }

    /// Create a new gate from the name of its kind, e.g. `"H"` or `"CNOT"`.
    pub fn from_name(name: &str, qubits: &[usize]) -> CircuitResult<Self> {
        Self::new(name.parse()?, qubits)
    }

    /// Create a new Hadamard gate on qubit `k`.
    pub fn h(k: usize) -> Self { Self { kind: GateKind::H, qubits: vec![k] } }

    /// Create a new CNOT gate on qubit `t`, controlled by qubit `c`.
    pub fn cnot(c: usize, t: usize) -> CircuitResult<Self> {
        Self::new(GateKind::CNOT, &[c, t])
    }

    // bypasses validation so that the rule table's fallback can be exercised
    #[cfg(test)]
    pub(crate) fn unchecked(kind: GateKind, qubits: &[usize]) -> Self {
        Self { kind, qubits: qubits.to_vec() }
    }

    /// Return the kind of `self`.
    pub fn kind(&self) -> GateKind { self.kind }

    /// Return the qubits `self` acts on, in operand order.
    pub fn qubits(&self) -> &[usize] { &self.qubits }

    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { self.kind == GateKind::H }

    /// Return `true` if `self` is `CNOT`.
    pub fn is_cnot(&self) -> bool { self.kind == GateKind::CNOT }

    /// Return `true` if `self` acts on qubit `k`.
    pub fn acts_on(&self, k: usize) -> bool { self.qubits.contains(&k) }

    /// Return the largest qubit index `self` acts on.
    pub fn max_qubit(&self) -> usize {
        self.qubits.iter().copied().max().unwrap_or(0)
    }

    /// Return `true` if `other` is the inverse of `self`.
    pub fn is_inv(&self, other: &Self) -> bool { self == other }

    /// Return the inverse of `self`.
    ///
    /// Both supported gates are self-inverse.
    pub fn inv(&self) -> Self { self.clone() }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.qubits.iter().join(", "))
    }
}

// split on whitespace, commas, and parentheses so that both `CNOT 0 1` and
// `CNOT(0, 1)` are accepted
pub(crate) fn tokenize(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        .filter(|tok| !tok.is_empty())
}

pub(crate) fn parse_qubit(tok: &str) -> CircuitResult<usize> {
    tok.parse().map_err(|_| InvalidQubit(tok.to_string()))
}

impl FromStr for Gate {
    type Err = CircuitError;

    /// Parse a gate from text of the form `H 0` or `CNOT 0 1`.
    fn from_str(s: &str) -> CircuitResult<Self> {
        let mut toks = tokenize(s);
        let kind: GateKind = toks.next().unwrap_or("").parse()?;
        let qubits = toks.map(parse_qubit).collect::<CircuitResult<Vec<usize>>>()?;
        Self::new(kind, &qubits)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GateRepr {
    kind: GateKind,
    qubits: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<GateRepr> for Gate {
    type Error = CircuitError;

    fn try_from(repr: GateRepr) -> CircuitResult<Self> {
        Self::new(repr.kind, &repr.qubits)
    }
}

/// An ordered sequence of [`Gate`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circuit {
    gates: Vec<Gate>,
}

impl FromIterator<Gate> for Circuit {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Gate>
    {
        Self { gates: iter.into_iter().collect() }
    }
}

impl From<Vec<Gate>> for Circuit {
    fn from(gates: Vec<Gate>) -> Self { Self { gates } }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Gate;
    type IntoIter = std::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter { self.gates.iter() }
}

impl IntoIterator for Circuit {
    type Item = Gate;
    type IntoIter = std::vec::IntoIter<Gate>;

    fn into_iter(self) -> Self::IntoIter { self.gates.into_iter() }
}

impl Circuit {
    /// Create a new, empty circuit.
    pub fn new() -> Self { Self::default() }

    /// Return the gates of `self`, in application order.
    pub fn gates(&self) -> &[Gate] { &self.gates }

    /// Return the number of gates.
    pub fn len(&self) -> usize { self.gates.len() }

    /// Return `true` if `self` contains no gates.
    pub fn is_empty(&self) -> bool { self.gates.is_empty() }

    /// Return an iterator over the gates of `self`, in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Gate> { self.gates.iter() }

    /// Return the number of qubits spanned by `self`, i.e. one more than the
    /// largest qubit index any gate acts on.
    ///
    /// Returns `0` for an empty circuit.
    pub fn num_qubits(&self) -> usize {
        self.gates.iter()
            .map(|gate| gate.max_qubit().saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Return the inverse of `self`.
    pub fn inverse(&self) -> Self {
        self.gates.iter().rev().map(Gate::inv).collect()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.gates.iter().join(", "))
    }
}

impl FromStr for Circuit {
    type Err = CircuitError;

    /// Parse a circuit from one gate per line or `;`-separated entry. Blank
    /// entries and `#` comments are skipped.
    fn from_str(s: &str) -> CircuitResult<Self> {
        s.split(['\n', ';'])
            .map(|line| line.split('#').next().unwrap_or("").trim())
            .filter(|line| !line.is_empty())
            .map(str::parse)
            .collect()
    }
}

/// Build a [`Circuit`] from gate names and qubit operands, validating every
/// gate.
///
/// ```
/// # use spidertrace::circuit::*;
/// use spidertrace::circuit;
///
/// let circ = circuit![H(0), CNOT(0, 1)]?;
/// assert_eq!(circ.gates(), &[Gate::h(0), Gate::cnot(0, 1)?]);
///
/// assert!(circuit![CNOT(2, 2)].is_err());
/// # Ok::<(), CircuitError>(())
/// ```
#[macro_export]
macro_rules! circuit {
    () => {
        Ok::<$crate::circuit::Circuit, $crate::circuit::CircuitError>(
            $crate::circuit::Circuit::new()
        )
    };
    ( $( $kind:ident ( $( $q:expr ),* $(,)? ) ),+ $(,)? ) => {
        [$(
            $crate::circuit::Gate::from_name(stringify!($kind), &[$( $q ),*]),
        )+]
        .into_iter()
        .collect::<
            Result<$crate::circuit::Circuit, $crate::circuit::CircuitError>
        >()
    };
}
