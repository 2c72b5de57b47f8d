//! Single-qubit Pauli labels, modulo global phase.
//!
//! The identity is never represented explicitly: wherever a label may be
//! absent it is carried as `Option<Pauli>`, with `None` standing in for *I*.
//! Products are computed on the *X*/*Z* components of each label, so that
//! *Y* ≅ *XZ* and all signs and factors of *i* are discarded.

use std::{ fmt, str::FromStr };
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PauliLabelError {
    /// Returned when a string names neither *X*, *Y*, nor *Z*.
    #[error("invalid Pauli label {0:?}: expected one of X, Y, Z")]
    InvalidPauliLabel(String),
}
pub type PauliLabelResult<T> = Result<T, PauliLabelError>;

/// A non-identity single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pauli {
    X,
    Z,
    Y,
}

impl Pauli {
    /// Return `true` if `self` has an *X* component, i.e. is *X* or *Y*.
    pub fn has_x(self) -> bool { matches!(self, Self::X | Self::Y) }

    /// Return `true` if `self` has a *Z* component, i.e. is *Z* or *Y*.
    pub fn has_z(self) -> bool { matches!(self, Self::Z | Self::Y) }

    /// Split a possibly absent label into its `(x, z)` component bits.
    pub fn to_bits(label: Option<Self>) -> (bool, bool) {
        label.map_or((false, false), |p| (p.has_x(), p.has_z()))
    }

    /// Reassemble a possibly absent label from its `(x, z)` component bits.
    pub fn from_bits(x: bool, z: bool) -> Option<Self> {
        match (x, z) {
            (false, false) => None,
            (true,  false) => Some(Self::X),
            (false, true ) => Some(Self::Z),
            (true,  true ) => Some(Self::Y),
        }
    }

    /// Multiply two possibly absent labels, ignoring phase.
    ///
    /// ```
    /// # use spidertrace::pauli::Pauli;
    /// assert_eq!( Pauli::mul(None, Some(Pauli::X)),           Some(Pauli::X) );
    /// assert_eq!( Pauli::mul(Some(Pauli::X), Some(Pauli::X)), None           );
    /// assert_eq!( Pauli::mul(Some(Pauli::Z), Some(Pauli::X)), Some(Pauli::Y) );
    /// ```
    pub fn mul(lhs: Option<Self>, rhs: Option<Self>) -> Option<Self> {
        let (x_l, z_l) = Self::to_bits(lhs);
        let (x_r, z_r) = Self::to_bits(rhs);
        Self::from_bits(x_l ^ x_r, z_l ^ z_r)
    }

    /// Return the image of `self` under conjugation by a Hadamard, which
    /// swaps the *X* and *Z* axes and fixes *Y* up to sign.
    pub fn hadamard(self) -> Self {
        match self {
            Self::X => Self::Z,
            Self::Z => Self::X,
            Self::Y => Self::Y,
        }
    }

    /// Return the single-character label of `self`.
    pub fn as_char(self) -> char {
        match self {
            Self::X => 'X',
            Self::Z => 'Z',
            Self::Y => 'Y',
        }
    }

    /// Return the single-character label of a possibly absent Pauli, using
    /// `I` for the identity.
    pub fn label(label: Option<Self>) -> char {
        label.map_or('I', Self::as_char)
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Pauli {
    type Err = PauliLabelError;

    fn from_str(s: &str) -> PauliLabelResult<Self> {
        match s.trim() {
            "X" | "x" => Ok(Self::X),
            "Z" | "z" => Ok(Self::Z),
            "Y" | "y" => Ok(Self::Y),
            other => Err(PauliLabelError::InvalidPauliLabel(other.to_string())),
        }
    }
}

impl TryFrom<char> for Pauli {
    type Error = PauliLabelError;

    fn try_from(c: char) -> PauliLabelResult<Self> {
        match c.to_ascii_uppercase() {
            'X' => Ok(Self::X),
            'Z' => Ok(Self::Z),
            'Y' => Ok(Self::Y),
            _ => Err(PauliLabelError::InvalidPauliLabel(c.to_string())),
        }
    }
}
