use std::io::{ self, Read };
use spidertrace::{
    circuit::Circuit,
    propagate::Propagator,
    rules::CnotRule,
    state::PauliError,
};

// read a circuit and a set of initial errors from stdin and print how the
// errors move through it
//
// input format: one gate per line (`H 0`, `CNOT 0 1`), then a line holding
// only `---`, then one error per line (`X 0`, `Z 2`); `#` starts a comment
//
// pass `--symplectic` to decompose Y errors on CNOT endpoints
fn main() -> anyhow::Result<()> {
    let rule =
        if std::env::args().any(|arg| arg == "--symplectic") {
            CnotRule::Symplectic
        } else {
            CnotRule::Merge
        };

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let (gates, errors) = input.split_once("---").unwrap_or((input.as_str(), ""));

    let circ: Circuit = gates.parse()?;
    let errors: Vec<PauliError> =
        errors.lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()?;

    println!("circuit ({} gates) = {}", circ.len(), circ);
    if errors.is_empty() {
        println!("no initial errors");
    }
    let trace = Propagator::new().with_cnot_rule(rule).propagate(&circ, errors)?;
    print!("{}", trace.report());
    Ok(())
}
