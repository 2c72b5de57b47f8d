//! Conjugation rules for each supported [`GateKind`].
//!
//! Every rule is a pure function: it reads the state before the gate and
//! returns a freshly built [`ErrorState`] for the state after it, leaving its
//! input untouched. Signs and phases are never tracked.
//!
//! Under conjugation,
//! - H swaps *X* ↔ *Z* and fixes *Y*;
//! - CNOT(*c*, *t*) sends *X*<sub>*c*</sub> → *X*<sub>*c*</sub>
//!   *X*<sub>*t*</sub> and *Z*<sub>*t*</sub> → *Z*<sub>*c*</sub>
//!   *Z*<sub>*t*</sub>, and fixes *Z*<sub>*c*</sub> and *X*<sub>*t*</sub>.

use crate::{
    circuit::{ Gate, GateKind },
    pauli::Pauli,
    propagate::{ PropagateError, PropagateResult },
    state::ErrorState,
};

/// Model used to push errors through a CNOT.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CnotRule {
    /// Labels on the two endpoints are treated as atomic. A control carrying
    /// an *X* component together with a target carrying a *Z* component
    /// becomes *Y* ⊗ *Y* outright; otherwise the control's *X* component is
    /// multiplied into the target and the target's *Z* component into the
    /// control.
    #[default]
    Merge,
    /// Both endpoints are decomposed into *X*/*Z* components, which propagate
    /// independently. This differs from [`Merge`][Self::Merge] only on
    /// *X* ⊗ *Y*, *Y* ⊗ *Z*, and *Y* ⊗ *Y*.
    Symplectic,
}

/// Conjugate `state` by a Hadamard on qubit `q`.
pub fn hadamard(q: usize, state: &ErrorState) -> ErrorState {
    state.with(q, state.get(q).map(Pauli::hadamard))
}

/// Conjugate `state` by a CNOT with control `c` and target `t` under the
/// [`Merge`][CnotRule::Merge] model.
pub fn cnot_merge(c: usize, t: usize, state: &ErrorState) -> ErrorState {
    let p_c = state.get(c);
    let p_t = state.get(t);
    let x_c = p_c.is_some_and(Pauli::has_x);
    let z_t = p_t.is_some_and(Pauli::has_z);
    let mut new = state.clone();
    if x_c && z_t {
        new.set(c, Some(Pauli::Y));
        new.set(t, Some(Pauli::Y));
    } else {
        if x_c { new.set(t, Pauli::mul(p_t, Some(Pauli::X))); }
        if z_t { new.set(c, Pauli::mul(p_c, Some(Pauli::Z))); }
    }
    new
}

/// Conjugate `state` by a CNOT with control `c` and target `t` under the
/// [`Symplectic`][CnotRule::Symplectic] model.
pub fn cnot_symplectic(c: usize, t: usize, state: &ErrorState) -> ErrorState {
    let (x_c, z_c) = Pauli::to_bits(state.get(c));
    let (x_t, z_t) = Pauli::to_bits(state.get(t));
    let mut new = state.clone();
    new.set(c, Pauli::from_bits(x_c, z_c ^ z_t));
    new.set(t, Pauli::from_bits(x_t ^ x_c, z_t));
    new
}

/// Conjugate `state` by a CNOT using the given model.
pub fn cnot(c: usize, t: usize, state: &ErrorState, rule: CnotRule)
    -> ErrorState
{
    match rule {
        CnotRule::Merge => cnot_merge(c, t, state),
        CnotRule::Symplectic => cnot_symplectic(c, t, state),
    }
}

/// Conjugate `state` by `gate`.
///
/// Fails with [`PropagateError::InternalInvariantViolation`] if the operands
/// of `gate` do not fit its kind, which cannot happen for gates built through
/// the public constructors.
pub fn conjugate(gate: &Gate, state: &ErrorState, rule: CnotRule)
    -> PropagateResult<ErrorState>
{
    match gate.kind() {
        GateKind::H => match *gate.qubits() {
            [q] => Ok(hadamard(q, state)),
            _ => Err(PropagateError::InternalInvariantViolation(gate.clone())),
        },
        GateKind::CNOT => match *gate.qubits() {
            [c, t] if c != t => Ok(cnot(c, t, state, rule)),
            _ => Err(PropagateError::InternalInvariantViolation(gate.clone())),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use Pauli::*;

    const LABELS: [Option<Pauli>; 4] = [None, Some(X), Some(Z), Some(Y)];

    fn pair(c: Option<Pauli>, t: Option<Pauli>) -> ErrorState {
        ErrorState::new().with(0, c).with(1, t)
    }

    fn state(errs: &[(usize, Pauli)]) -> ErrorState {
        errs.iter().copied().collect()
    }

    #[test]
    fn hadamard_rule() {
        assert_eq!(hadamard(0, &state(&[(0, X)])), state(&[(0, Z)]));
        assert_eq!(hadamard(0, &state(&[(0, Z)])), state(&[(0, X)]));
        assert_eq!(hadamard(0, &state(&[(0, Y)])), state(&[(0, Y)]));
        assert_eq!(hadamard(0, &state(&[(1, X)])), state(&[(1, X)]));
        assert!(hadamard(3, &ErrorState::new()).is_empty());
    }

    #[test]
    fn hadamard_involution() {
        for label in LABELS {
            let init = ErrorState::new().with(2, label);
            assert_eq!(hadamard(2, &hadamard(2, &init)), init);
        }
    }

    #[test]
    fn hadamard_leaves_input() {
        let init = state(&[(0, X)]);
        let _ = hadamard(0, &init);
        assert_eq!(init, state(&[(0, X)]));
    }

    #[test]
    fn cnot_merge_table() {
        // (control, target) before -> after
        let table = [
            ((None,    None   ), (None,    None   )),
            ((None,    Some(X)), (None,    Some(X))),
            ((None,    Some(Z)), (Some(Z), Some(Z))),
            ((None,    Some(Y)), (Some(Z), Some(Y))),
            ((Some(X), None   ), (Some(X), Some(X))),
            ((Some(X), Some(X)), (Some(X), None   )),
            ((Some(X), Some(Z)), (Some(Y), Some(Y))),
            ((Some(X), Some(Y)), (Some(Y), Some(Y))),
            ((Some(Z), None   ), (Some(Z), None   )),
            ((Some(Z), Some(X)), (Some(Z), Some(X))),
            ((Some(Z), Some(Z)), (None,    Some(Z))),
            ((Some(Z), Some(Y)), (None,    Some(Y))),
            ((Some(Y), None   ), (Some(Y), Some(X))),
            ((Some(Y), Some(X)), (Some(Y), None   )),
            ((Some(Y), Some(Z)), (Some(Y), Some(Y))),
            ((Some(Y), Some(Y)), (Some(Y), Some(Y))),
        ];
        for ((c0, t0), (c1, t1)) in table {
            assert_eq!(
                cnot_merge(0, 1, &pair(c0, t0)),
                pair(c1, t1),
                "CNOT on {:?} ⊗ {:?}", c0, t0,
            );
        }
    }

    #[test]
    fn cnot_symplectic_images() {
        assert_eq!(cnot_symplectic(0, 1, &pair(Some(X), None)), pair(Some(X), Some(X)));
        assert_eq!(cnot_symplectic(0, 1, &pair(None, Some(Z))), pair(Some(Z), Some(Z)));
        assert_eq!(cnot_symplectic(0, 1, &pair(Some(X), Some(Z))), pair(Some(Y), Some(Y)));
        assert_eq!(cnot_symplectic(0, 1, &pair(Some(Y), Some(Y))), pair(Some(X), Some(Z)));
        assert_eq!(cnot_symplectic(0, 1, &pair(Some(X), Some(Y))), pair(Some(Y), Some(Z)));
        assert_eq!(cnot_symplectic(0, 1, &pair(Some(Z), Some(X))), pair(Some(Z), Some(X)));
    }

    #[test]
    fn cnot_models_agree_off_merge() {
        let differ = [(Some(X), Some(Y)), (Some(Y), Some(Z)), (Some(Y), Some(Y))];
        for c in LABELS {
            for t in LABELS {
                let init = pair(c, t);
                let agree = cnot_merge(0, 1, &init) == cnot_symplectic(0, 1, &init);
                assert_eq!(agree, !differ.contains(&(c, t)), "{:?} ⊗ {:?}", c, t);
            }
        }
    }

    #[test]
    fn cnot_leaves_spectators() {
        let init = state(&[(0, X), (5, Z), (7, Y)]);
        let after = cnot_merge(0, 3, &init);
        assert_eq!(after, state(&[(0, X), (3, X), (5, Z), (7, Y)]));
        assert_eq!(init.weight(), 3);
    }

    #[test]
    fn conjugate_dispatch() {
        let init = state(&[(0, X)]);
        assert_eq!(
            conjugate(&Gate::h(0), &init, CnotRule::Merge).unwrap(),
            state(&[(0, Z)]),
        );
        assert_eq!(
            conjugate(&Gate::cnot(0, 1).unwrap(), &init, CnotRule::Symplectic).unwrap(),
            state(&[(0, X), (1, X)]),
        );
    }

    #[test]
    fn conjugate_malformed() {
        for gate in [
            Gate::unchecked(GateKind::H, &[0, 1]),
            Gate::unchecked(GateKind::CNOT, &[2]),
            Gate::unchecked(GateKind::CNOT, &[1, 1]),
        ] {
            assert!(matches!(
                conjugate(&gate, &ErrorState::new(), CnotRule::Merge),
                Err(PropagateError::InternalInvariantViolation(g)) if g == gate,
            ));
        }
    }
}
