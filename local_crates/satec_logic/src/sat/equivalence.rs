// satec_logic
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! This module provides the functions used to decide whether two circuits compute the same outputs, using a SAT solver.
//!
//! Both circuits are merged into a *miter*: a circuit sharing the primary inputs of both circuits,
//! XOR-ing each pair of corresponding outputs and OR-ing the results into a single difference signal.
//! The circuits are equivalent if and only if the difference signal cannot be set to `true`.

use crate::{
    default_sat_solver, Circuit, CircuitBuilder, CircuitError, Clause, ConsistencyCheckResult,
    GateKind, Literal, SatSolver, SignalId, Solution, TseitinEncoder,
};
use log::debug;

/// A circuit computing whether two circuits with the same interface disagree.
///
/// The inputs of the miter are the inputs of the two circuits.
/// The internal signals of the two circuits are renamed with a prefix (`a` or `b`)
/// and a separator made of `#` characters which is longer than any sequence of `#` in the input names,
/// so no renamed signal can clash with an input.
///
/// # Examples
///
/// ```
/// use satec_logic::{equivalence::Miter, BenchReader};
///
/// let a = BenchReader::default()
///     .read(&mut "INPUT(x)\nOUTPUT(z)\nz = NOT(x)\n".as_bytes())
///     .unwrap();
/// let b = BenchReader::default()
///     .read(&mut "INPUT(x)\nOUTPUT(z)\nz = BUFF(x)\n".as_bytes())
///     .unwrap();
/// let miter = Miter::new(&a, &b).unwrap();
/// assert_eq!(vec!["x"], miter.circuit().inputs());
/// assert_eq!(vec![miter.difference_signal()], miter.circuit().outputs());
/// assert_eq!("m#diff", miter.difference_signal());
/// ```
pub struct Miter {
    circuit: Circuit,
    difference: String,
}

impl Miter {
    /// Builds the miter of two circuits.
    ///
    /// The circuits must declare the same inputs and the same outputs, in the same order;
    /// if not, a [`CircuitError::InterfaceMismatch`] error is returned.
    pub fn new(circuit_a: &Circuit, circuit_b: &Circuit) -> Result<Self, CircuitError> {
        check_interfaces(circuit_a, circuit_b)?;
        let sep = separator(circuit_a);
        let mut builder = CircuitBuilder::new();
        for input in circuit_a.inputs() {
            builder.add_input(input)?;
        }
        let a_outputs = copy_gates(&mut builder, circuit_a, "a", &sep)?;
        let b_outputs = copy_gates(&mut builder, circuit_b, "b", &sep)?;
        let difference = format!("m{}diff", sep);
        match a_outputs.len() {
            0 => {
                builder.add_gate(GateKind::Const0, &difference, &[] as &[&str])?;
            }
            1 => {
                builder.add_gate(GateKind::Xor, &difference, &[&a_outputs[0], &b_outputs[0]])?;
            }
            _ => {
                let xors = a_outputs
                    .iter()
                    .zip(b_outputs.iter())
                    .enumerate()
                    .map(|(i, (o_a, o_b))| {
                        let xor = format!("m{}xor{}", sep, i);
                        builder
                            .add_gate(GateKind::Xor, &xor, &[o_a, o_b])
                            .map(|_| xor)
                    })
                    .collect::<Result<Vec<String>, CircuitError>>()?;
                builder.add_gate(GateKind::Or, &difference, &xors)?;
            }
        }
        builder.add_output(&difference)?;
        Ok(Miter {
            circuit: builder.build()?,
            difference,
        })
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Returns the name of the signal which is `true` when the two circuits disagree.
    pub fn difference_signal(&self) -> &str {
        &self.difference
    }
}

fn check_interfaces(circuit_a: &Circuit, circuit_b: &Circuit) -> Result<(), CircuitError> {
    if circuit_a.inputs() != circuit_b.inputs() {
        return Err(CircuitError::InterfaceMismatch(format!(
            "inputs {:?} vs {:?}",
            circuit_a.inputs(),
            circuit_b.inputs()
        )));
    }
    if circuit_a.outputs() != circuit_b.outputs() {
        return Err(CircuitError::InterfaceMismatch(format!(
            "outputs {:?} vs {:?}",
            circuit_a.outputs(),
            circuit_b.outputs()
        )));
    }
    Ok(())
}

fn separator(circuit: &Circuit) -> String {
    let longest_run = circuit
        .inputs()
        .iter()
        .map(|name| {
            name.split(|c: char| c != '#')
                .map(|run| run.len())
                .max()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0);
    "#".repeat(longest_run + 1)
}

/// Copies the gates of a circuit into the builder, and returns the (renamed) outputs.
fn copy_gates(
    builder: &mut CircuitBuilder,
    circuit: &Circuit,
    prefix: &str,
    sep: &str,
) -> Result<Vec<String>, CircuitError> {
    let rename = |id: SignalId| {
        let name = circuit.signal_name(id);
        if circuit.is_input(id) {
            name.to_string()
        } else {
            format!("{}{}{}", prefix, sep, name)
        }
    };
    for gate in circuit.gates() {
        let inputs = gate
            .inputs()
            .iter()
            .map(|i| rename(*i))
            .collect::<Vec<String>>();
        builder.add_gate(gate.kind(), &rename(gate.output()), &inputs)?;
    }
    Ok(circuit.output_ids().iter().map(|o| rename(*o)).collect())
}

/// The result of an equivalence check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EquivalenceCheckResult {
    /// The circuits compute the same outputs for every input assignment.
    Equivalent,
    /// The circuits disagree on at least one output for the given input assignment.
    NotEquivalent(Solution),
}

impl EquivalenceCheckResult {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, EquivalenceCheckResult::Equivalent)
    }

    /// Returns the input assignment on which the circuits disagree, if any.
    pub fn counterexample(&self) -> Option<&Solution> {
        match self {
            EquivalenceCheckResult::Equivalent => None,
            EquivalenceCheckResult::NotEquivalent(s) => Some(s),
        }
    }
}

/// An equivalence checker for combinational circuits.
///
/// Each check builds a [`Miter`], encodes it, asserts its difference signal and calls a fresh SAT solver once.
///
/// # Examples
///
/// ```
/// use satec_logic::{BenchReader, EquivalenceChecker};
///
/// let and = BenchReader::default()
///     .read(&mut "INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = AND(a, b)\n".as_bytes())
///     .unwrap();
/// let or = BenchReader::default()
///     .read(&mut "INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = OR(a, b)\n".as_bytes())
///     .unwrap();
/// let result = EquivalenceChecker::default().check(&and, &or).unwrap();
/// let cex = result.counterexample().unwrap();
/// assert_ne!(cex.get("a").unwrap(), cex.get("b").unwrap());
/// ```
pub struct EquivalenceChecker {
    solver_factory: fn() -> Box<dyn SatSolver>,
}

impl Default for EquivalenceChecker {
    fn default() -> Self {
        EquivalenceChecker {
            solver_factory: default_sat_solver,
        }
    }
}

impl EquivalenceChecker {
    /// Builds a checker using the given function to create its SAT solvers.
    pub fn with_solver_factory(solver_factory: fn() -> Box<dyn SatSolver>) -> Self {
        EquivalenceChecker { solver_factory }
    }

    /// Checks whether two circuits are equivalent.
    ///
    /// If they are not, the returned counterexample is an assignment of the primary inputs
    /// on which at least one output differs.
    pub fn check(
        &self,
        circuit_a: &Circuit,
        circuit_b: &Circuit,
    ) -> Result<EquivalenceCheckResult, CircuitError> {
        let miter = Miter::new(circuit_a, circuit_b)?;
        let mut encoding = TseitinEncoder::encode(miter.circuit());
        let difference = encoding.var_map().var_of(miter.difference_signal())?;
        encoding
            .formula_mut()
            .add_clause(Clause::unit(Literal::new(difference, true)));
        debug!(
            "miter has {} gate(s); its encoding has {} variable(s) and {} clause(s)",
            miter.circuit().gates().len(),
            encoding.formula().n_vars(),
            encoding.formula().n_clauses()
        );
        let mut solver = (self.solver_factory)();
        solver.add_formula(encoding.formula());
        match solver.check_consistency() {
            ConsistencyCheckResult::Unsat => Ok(EquivalenceCheckResult::Equivalent),
            ConsistencyCheckResult::Sat(model) => Ok(EquivalenceCheckResult::NotEquivalent(
                Solution::from_model(&model, &encoding.input_projection()),
            )),
        }
    }
}

/// Checks whether two circuits are equivalent, using the default SAT solver.
///
/// See [`EquivalenceChecker::check`].
pub fn check(
    circuit_a: &Circuit,
    circuit_b: &Circuit,
) -> Result<EquivalenceCheckResult, CircuitError> {
    EquivalenceChecker::default().check(circuit_a, circuit_b)
}
