use spidertrace::{ circuit, pauli::Pauli, propagate::propagate };

// follow a single X error through a Hadamard and a CNOT
//
//   X --H--*----
//          |
//   -------X----
//
// the Hadamard turns the X into a Z, which a CNOT control does not copy
fn main() -> anyhow::Result<()> {
    let circ = circuit![H(0), CNOT(0, 1)]?;
    let errors = [(0, Pauli::X)];

    println!("circuit = {}", circ);
    let trace = propagate(&circ, errors)?;
    for (k, step) in trace.iter().enumerate() {
        println!("step {}: {}", k + 1, step);
    }
    println!();
    print!("{}", trace.report().with_num_qubits(circ.num_qubits()));
    Ok(())
}
