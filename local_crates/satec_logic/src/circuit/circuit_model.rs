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

use super::{Gate, SignalId};
use crate::CircuitError;
use rustc_hash::FxHashMap;

/// A mapping from signal names to Boolean values.
pub type Assignment = FxHashMap<String, bool>;

/// An immutable combinational circuit.
///
/// A circuit owns its signals and gates, and the ordered sequences of its primary inputs and outputs.
/// Every non-input signal is driven by exactly one gate, and the gates form a directed acyclic graph.
/// Circuits are obtained from a [`CircuitBuilder`](crate::CircuitBuilder) or a [`BenchReader`](crate::BenchReader),
/// which both enforce these invariants.
///
/// Gates are stored in a topological order, so the circuit can be evaluated (see [`simulate`](Self::simulate))
/// or encoded gate after gate.
///
/// # Examples
///
/// ```
/// use satec_logic::{Assignment, CircuitBuilder, GateKind};
///
/// let mut builder = CircuitBuilder::new();
/// builder.add_input("a").unwrap();
/// builder.add_input("b").unwrap();
/// builder.add_output("z").unwrap();
/// builder.add_gate(GateKind::And, "z", &["a", "b"]).unwrap();
/// let circuit = builder.build().unwrap();
///
/// let mut inputs = Assignment::default();
/// inputs.insert("a".to_string(), true);
/// inputs.insert("b".to_string(), true);
/// assert!(circuit.simulate(&inputs).unwrap()["z"]);
/// ```
#[derive(Clone, Debug)]
pub struct Circuit {
    signal_names: Vec<String>,
    signal_ids: FxHashMap<String, SignalId>,
    inputs: Vec<SignalId>,
    outputs: Vec<SignalId>,
    gates: Vec<Gate>,
    is_input: Vec<bool>,
}

impl Circuit {
    pub(crate) fn new_unchecked(
        signal_names: Vec<String>,
        signal_ids: FxHashMap<String, SignalId>,
        inputs: Vec<SignalId>,
        outputs: Vec<SignalId>,
        gates: Vec<Gate>,
    ) -> Self {
        let mut is_input = vec![false; signal_names.len()];
        inputs.iter().for_each(|i| is_input[usize::from(*i)] = true);
        Circuit {
            signal_names,
            signal_ids,
            inputs,
            outputs,
            gates,
            is_input,
        }
    }

    /// Returns the names of the primary inputs, in declaration order.
    pub fn inputs(&self) -> Vec<&str> {
        self.inputs.iter().map(|s| self.signal_name(*s)).collect()
    }

    /// Returns the names of the primary outputs, in declaration order.
    pub fn outputs(&self) -> Vec<&str> {
        self.outputs.iter().map(|s| self.signal_name(*s)).collect()
    }

    pub fn input_ids(&self) -> &[SignalId] {
        &self.inputs
    }

    pub fn output_ids(&self) -> &[SignalId] {
        &self.outputs
    }

    /// Returns the gates of this circuit, in a topological order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Returns the number of signals (inputs and gate outputs).
    pub fn n_signals(&self) -> usize {
        self.signal_names.len()
    }

    /// Returns the names of all signals, indexed by their [`SignalId`].
    pub fn signal_names(&self) -> &[String] {
        &self.signal_names
    }

    /// Returns the name of a signal.
    ///
    /// # Panics
    ///
    /// Panics if the identifier does not belong to this circuit.
    pub fn signal_name(&self, id: SignalId) -> &str {
        &self.signal_names[usize::from(id)]
    }

    /// Returns the identifier of a signal given its name.
    pub fn signal_id(&self, name: &str) -> Result<SignalId, CircuitError> {
        self.signal_ids
            .get(name)
            .copied()
            .ok_or_else(|| CircuitError::NotFound(name.to_string()))
    }

    /// Checks whether a signal is a primary input.
    pub fn is_input(&self, id: SignalId) -> bool {
        self.is_input[usize::from(id)]
    }

    /// Computes the value of every signal given the values of the primary inputs.
    ///
    /// Entries of `input_values` which are not primary inputs are ignored.
    /// If some primary input has no value, a [`CircuitError::MissingInput`] is returned.
    ///
    /// This function is pure: it can be called concurrently on a shared circuit.
    pub fn simulate(&self, input_values: &Assignment) -> Result<Assignment, CircuitError> {
        let values = self.evaluate(|name| input_values.get(name).copied())?;
        Ok(self
            .signal_names
            .iter()
            .cloned()
            .zip(values.into_iter())
            .collect())
    }

    /// Computes the value of every signal, indexed by [`SignalId`].
    ///
    /// The value of each input is requested by name through `input_value`.
    pub fn evaluate<F>(&self, mut input_value: F) -> Result<Vec<bool>, CircuitError>
    where
        F: FnMut(&str) -> Option<bool>,
    {
        let mut values = vec![false; self.signal_names.len()];
        for input in self.inputs.iter() {
            let name = self.signal_name(*input);
            values[usize::from(*input)] =
                input_value(name).ok_or_else(|| CircuitError::MissingInput(name.to_string()))?;
        }
        for gate in self.gates.iter() {
            let output = gate
                .kind()
                .eval(gate.inputs().iter().map(|i| values[usize::from(*i)]));
            values[usize::from(gate.output())] = output;
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CircuitBuilder, GateKind};

    fn half_adder() -> Circuit {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        builder.add_input("b").unwrap();
        builder.add_output("sum").unwrap();
        builder.add_output("carry").unwrap();
        builder
            .add_gate(GateKind::Xor, "sum", &["a", "b"])
            .unwrap();
        builder
            .add_gate(GateKind::And, "carry", &["a", "b"])
            .unwrap();
        builder.build().unwrap()
    }

    fn assignment(values: &[(&str, bool)]) -> Assignment {
        values.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    #[test]
    fn test_interface_order() {
        let circuit = half_adder();
        assert_eq!(vec!["a", "b"], circuit.inputs());
        assert_eq!(vec!["sum", "carry"], circuit.outputs());
        assert_eq!(4, circuit.n_signals());
        assert_eq!(2, circuit.gates().len());
    }

    #[test]
    fn test_simulate_half_adder() {
        let circuit = half_adder();
        for a in [false, true].iter() {
            for b in [false, true].iter() {
                let result = circuit
                    .simulate(&assignment(&[("a", *a), ("b", *b)]))
                    .unwrap();
                assert_eq!(4, result.len());
                assert_eq!(*a, result["a"]);
                assert_eq!(*b, result["b"]);
                assert_eq!(a ^ b, result["sum"]);
                assert_eq!(a & b, result["carry"]);
            }
        }
    }

    #[test]
    fn test_simulate_missing_input() {
        let circuit = half_adder();
        assert_eq!(
            CircuitError::MissingInput("b".to_string()),
            circuit
                .simulate(&assignment(&[("a", true), ("sum", true)]))
                .unwrap_err()
        );
    }

    #[test]
    fn test_simulate_ignores_extra_values() {
        let circuit = half_adder();
        let result = circuit
            .simulate(&assignment(&[("a", true), ("b", false), ("carry", true)]))
            .unwrap();
        assert!(!result["carry"]);
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let circuit = crate::utils::test_circuits::random_circuit(7, 4, 30, 3);
        let inputs = crate::utils::test_circuits::input_assignment(&circuit, 0b1011);
        assert_eq!(
            circuit.simulate(&inputs).unwrap(),
            circuit.simulate(&inputs).unwrap()
        );
    }

    #[test]
    fn test_simulate_from_threads() {
        let circuit = std::sync::Arc::new(half_adder());
        let handles = (0..4)
            .map(|i| {
                let c = std::sync::Arc::clone(&circuit);
                std::thread::spawn(move || {
                    let inputs = assignment(&[("a", i & 1 != 0), ("b", i & 2 != 0)]);
                    c.simulate(&inputs).unwrap()["carry"]
                })
            })
            .collect::<Vec<_>>();
        let carries = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<bool>>();
        assert_eq!(vec![false, false, false, true], carries);
    }

    #[test]
    fn test_signal_lookup() {
        let circuit = half_adder();
        let id = circuit.signal_id("carry").unwrap();
        assert_eq!("carry", circuit.signal_name(id));
        assert!(!circuit.is_input(id));
        assert!(circuit.is_input(circuit.signal_id("a").unwrap()));
        assert_eq!(
            CircuitError::NotFound("c".to_string()),
            circuit.signal_id("c").unwrap_err()
        );
    }
}
