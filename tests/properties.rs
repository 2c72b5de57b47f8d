use proptest::prelude::*;
use rand::{ rngs::StdRng, Rng, SeedableRng };
use spidertrace::{
    circuit::{ Circuit, Gate },
    pauli::Pauli,
    propagate::{ propagate, Propagator },
    rules::{ self, CnotRule },
    state::{ ErrorState, PauliError },
};

const LABELS: [Option<Pauli>; 4] =
    [None, Some(Pauli::X), Some(Pauli::Z), Some(Pauli::Y)];

fn arbitrary_pauli() -> impl Strategy<Value = Pauli> {
    prop::sample::select(vec![Pauli::X, Pauli::Z, Pauli::Y])
}

fn arbitrary_gate(qubit_count: usize) -> BoxedStrategy<Gate> {
    prop_oneof![
        (0..qubit_count).prop_map(Gate::h),
        (0..qubit_count, 1..qubit_count).prop_map(move |(c, shift)| {
            Gate::cnot(c, (c + shift) % qubit_count)
                .expect("shifted target differs from control")
        }),
    ]
    .boxed()
}

fn arbitrary_circuit(qubit_count: usize, max_len: usize) -> BoxedStrategy<Circuit> {
    prop::collection::vec(arbitrary_gate(qubit_count), 0..=max_len)
        .prop_map(Circuit::from)
        .boxed()
}

fn arbitrary_errors(qubit_count: usize) -> BoxedStrategy<Vec<PauliError>> {
    prop::collection::vec(
        (0..qubit_count, arbitrary_pauli()).prop_map(PauliError::from),
        0..=qubit_count,
    )
    .boxed()
}

fn random_circuit(rng: &mut StdRng, qubit_count: usize, len: usize) -> Circuit {
    (0..len)
        .map(|_| {
            let c = rng.gen_range(0..qubit_count);
            if rng.gen_bool(0.5) {
                Gate::h(c)
            } else {
                let t = (c + rng.gen_range(1..qubit_count)) % qubit_count;
                Gate::cnot(c, t).expect("shifted target differs from control")
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn trace_length(
        circ in arbitrary_circuit(5, 40),
        errs in arbitrary_errors(5),
    ) {
        let trace = propagate(&circ, errs).unwrap();
        prop_assert_eq!(trace.len(), circ.len());
        prop_assert_eq!(trace.circuit(), circ);
    }

    #[test]
    fn deterministic(
        circ in arbitrary_circuit(5, 40),
        errs in arbitrary_errors(5),
    ) {
        let a = propagate(&circ, errs.clone()).unwrap();
        let b = propagate(&circ, errs).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn no_errors_stay_clean(circ in arbitrary_circuit(6, 30)) {
        let trace = propagate(&circ, Vec::<PauliError>::new()).unwrap();
        prop_assert!(trace.states().all(ErrorState::is_empty));
    }

    #[test]
    fn symplectic_inverse_undoes(
        circ in arbitrary_circuit(4, 30),
        errs in arbitrary_errors(4),
    ) {
        let propagator = Propagator::new().with_cnot_rule(CnotRule::Symplectic);
        let forward = propagator.propagate(&circ, errs).unwrap();
        let backward =
            propagator.propagate(&circ.inverse(), forward.last_state().iter()).unwrap();
        prop_assert_eq!(backward.last_state(), forward.initial());
    }

    #[test]
    fn gates_only_touch_operands(
        gate in arbitrary_gate(6),
        errs in arbitrary_errors(6),
    ) {
        let init: ErrorState = errs.into_iter().collect();
        let after = rules::conjugate(&gate, &init, CnotRule::Merge).unwrap();
        for k in 0..6 {
            if !gate.acts_on(k) {
                prop_assert_eq!(after.get(k), init.get(k));
            }
        }
    }
}

#[test]
fn hadamard_involution() {
    for label in LABELS {
        let init = ErrorState::new().with(0, label);
        let twice = rules::hadamard(0, &rules::hadamard(0, &init));
        assert_eq!(twice, init);
    }
}

#[test]
fn cnot_symplectic_self_inverse() {
    for c in LABELS {
        for t in LABELS {
            let init = ErrorState::new().with(0, c).with(1, t);
            let twice = rules::cnot_symplectic(0, 1, &rules::cnot_symplectic(0, 1, &init));
            assert_eq!(twice, init, "{:?} ⊗ {:?}", c, t);
        }
    }
}

#[test]
fn cnot_merge_self_inverse_outside_merge_cases() {
    use Pauli::*;
    let merged = [(Some(X), Some(Z)), (Some(X), Some(Y)), (Some(Y), Some(Z))];
    for c in LABELS {
        for t in LABELS {
            let init = ErrorState::new().with(0, c).with(1, t);
            let twice = rules::cnot_merge(0, 1, &rules::cnot_merge(0, 1, &init));
            if merged.contains(&(c, t)) {
                assert_eq!(twice, ErrorState::new().with(0, Some(Y)).with(1, Some(Y)));
            } else {
                assert_eq!(twice, init, "{:?} ⊗ {:?}", c, t);
            }
        }
    }
}

#[test]
fn seeded_random_circuits() {
    let mut rng = StdRng::seed_from_u64(10546);
    for _ in 0..50 {
        let circ = random_circuit(&mut rng, 8, 64);
        let errs: Vec<(usize, Pauli)> =
            (0..3)
            .map(|_| (rng.gen_range(0..8), LABELS[rng.gen_range(1..4)].unwrap()))
            .collect();
        let merge = propagate(&circ, errs.clone()).unwrap();
        let bounded =
            Propagator::new().with_register_size(8)
            .propagate(&circ, errs)
            .unwrap();
        assert_eq!(merge, bounded);
        assert!(merge.num_qubits() <= 8);
    }
}
