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

use super::{Circuit, Gate, GateKind, SignalId};
use crate::{CircuitError, FormatError};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Driver {
    Input,
    Gate,
}

/// A structure used to build [`Circuit`]s.
///
/// Signals are referred to by their names. They may be read by a gate before being defined,
/// as long as they are defined when [`build`](Self::build) is called.
/// Duplicate definitions and wrong gate arities are detected as soon as the offending item is added;
/// dangling references, undriven outputs and cycles are detected by [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use satec_logic::{CircuitBuilder, GateKind};
///
/// let mut builder = CircuitBuilder::new();
/// builder.add_output("z").unwrap();
/// builder.add_gate(GateKind::Not, "z", &["n"]).unwrap();
/// builder.add_gate(GateKind::Or, "n", &["a", "b"]).unwrap();
/// builder.add_input("a").unwrap();
/// builder.add_input("b").unwrap();
/// let circuit = builder.build().unwrap();
/// assert_eq!(vec!["a", "b"], circuit.inputs());
/// assert_eq!(vec!["z"], circuit.outputs());
/// ```
#[derive(Default)]
pub struct CircuitBuilder {
    signal_names: Vec<String>,
    signal_ids: FxHashMap<String, SignalId>,
    drivers: Vec<Option<Driver>>,
    inputs: Vec<SignalId>,
    outputs: Vec<SignalId>,
    gates: Vec<Gate>,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, name: &str) -> SignalId {
        if let Some(id) = self.signal_ids.get(name) {
            return *id;
        }
        let id = SignalId::from(self.signal_names.len());
        self.signal_names.push(name.to_string());
        self.signal_ids.insert(name.to_string(), id);
        self.drivers.push(None);
        id
    }

    fn define(&mut self, name: &str, driver: Driver) -> Result<SignalId, CircuitError> {
        let id = self.intern(name);
        let slot = &mut self.drivers[usize::from(id)];
        if slot.is_some() {
            return Err(FormatError::DuplicateSignal(name.to_string()).into());
        }
        *slot = Some(driver);
        Ok(id)
    }

    /// Declares a new primary input.
    pub fn add_input(&mut self, name: &str) -> Result<SignalId, CircuitError> {
        let id = self.define(name, Driver::Input)?;
        self.inputs.push(id);
        Ok(id)
    }

    /// Declares a new primary output.
    ///
    /// The signal may be defined later, either as an input or as a gate output.
    pub fn add_output(&mut self, name: &str) -> Result<SignalId, CircuitError> {
        let id = self.intern(name);
        if self.outputs.contains(&id) {
            return Err(FormatError::DuplicateOutput(name.to_string()).into());
        }
        self.outputs.push(id);
        Ok(id)
    }

    /// Checks whether a signal has already been declared as an output.
    pub fn is_output(&self, name: &str) -> bool {
        self.signal_ids
            .get(name)
            .map(|id| self.outputs.contains(id))
            .unwrap_or(false)
    }

    /// Adds a gate driving the signal `output`.
    pub fn add_gate<T>(
        &mut self,
        kind: GateKind,
        output: &str,
        inputs: &[T],
    ) -> Result<SignalId, CircuitError>
    where
        T: AsRef<str>,
    {
        kind.check_arity(inputs.len()).map_err(|expected| FormatError::Arity {
            gate: output.to_string(),
            kind,
            expected,
            actual: inputs.len(),
        })?;
        let output_id = self.define(output, Driver::Gate)?;
        let input_ids = inputs
            .iter()
            .map(|i| self.intern(i.as_ref()))
            .collect::<Vec<SignalId>>();
        self.gates.push(Gate::new(kind, input_ids, output_id));
        Ok(output_id)
    }

    /// Checks the structural invariants and returns the circuit.
    ///
    /// The gates of the returned circuit are sorted topologically;
    /// among gates which are ready at the same time, the declaration order is kept.
    pub fn build(self) -> Result<Circuit, CircuitError> {
        for gate in self.gates.iter() {
            for input in gate.inputs() {
                if self.drivers[usize::from(*input)].is_none() {
                    return Err(FormatError::DanglingReference {
                        signal: self.signal_names[usize::from(*input)].clone(),
                        gate: self.signal_names[usize::from(gate.output())].clone(),
                    }
                    .into());
                }
            }
        }
        if let Some(o) = self
            .outputs
            .iter()
            .find(|o| self.drivers[usize::from(**o)].is_none())
        {
            return Err(FormatError::UndrivenOutput(self.signal_names[usize::from(*o)].clone()).into());
        }
        let order = self.topological_order()?;
        let mut slots = self.gates.into_iter().map(Some).collect::<Vec<Option<Gate>>>();
        let sorted_gates = order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect::<Vec<Gate>>();
        Ok(Circuit::new_unchecked(
            self.signal_names,
            self.signal_ids,
            self.inputs,
            self.outputs,
            sorted_gates,
        ))
    }

    fn topological_order(&self) -> Result<Vec<usize>, CircuitError> {
        let mut readers: Vec<Vec<usize>> = vec![vec![]; self.signal_names.len()];
        let mut pending = vec![0; self.gates.len()];
        for (g, gate) in self.gates.iter().enumerate() {
            for input in gate.inputs() {
                if let Some(Driver::Gate) = self.drivers[usize::from(*input)] {
                    readers[usize::from(*input)].push(g);
                    pending[g] += 1;
                }
            }
        }
        let mut ready = (0..self.gates.len())
            .filter(|g| pending[*g] == 0)
            .collect::<VecDeque<usize>>();
        let mut order = Vec::with_capacity(self.gates.len());
        while let Some(g) = ready.pop_front() {
            order.push(g);
            for reader in readers[usize::from(self.gates[g].output())].iter() {
                pending[*reader] -= 1;
                if pending[*reader] == 0 {
                    ready.push_back(*reader);
                }
            }
        }
        if order.len() < self.gates.len() {
            let on_cycle = self.find_cycle(&pending);
            return Err(FormatError::Cycle(self.signal_names[usize::from(on_cycle)].clone()).into());
        }
        Ok(order)
    }

    /// Returns a signal lying on a cycle, given the gates left unscheduled by the topological sort.
    ///
    /// Every unscheduled gate reads at least one unscheduled gate, so walking back along such inputs
    /// from any unscheduled gate eventually visits a gate twice; this gate is on a cycle.
    fn find_cycle(&self, pending: &[usize]) -> SignalId {
        let mut driving_gate = vec![None; self.signal_names.len()];
        for (g, gate) in self.gates.iter().enumerate() {
            driving_gate[usize::from(gate.output())] = Some(g);
        }
        let mut visited = vec![false; self.gates.len()];
        let mut current = match (0..self.gates.len()).find(|g| pending[*g] > 0) {
            Some(g) => g,
            None => return SignalId::from(0),
        };
        while !visited[current] {
            visited[current] = true;
            let predecessor = self.gates[current]
                .inputs()
                .iter()
                .filter_map(|i| driving_gate[usize::from(*i)])
                .find(|p| pending[*p] > 0);
            match predecessor {
                Some(p) => current = p,
                None => break,
            }
        }
        self.gates[current].output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_references() {
        let mut builder = CircuitBuilder::new();
        builder.add_output("z").unwrap();
        builder.add_gate(GateKind::And, "z", &["n", "a"]).unwrap();
        builder.add_gate(GateKind::Not, "n", &["a"]).unwrap();
        builder.add_input("a").unwrap();
        let circuit = builder.build().unwrap();
        let order = circuit
            .gates()
            .iter()
            .map(|g| circuit.signal_name(g.output()))
            .collect::<Vec<&str>>();
        assert_eq!(vec!["n", "z"], order);
    }

    #[test]
    fn test_declaration_order_kept_for_independent_gates() {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        builder.add_gate(GateKind::Not, "x", &["a"]).unwrap();
        builder.add_gate(GateKind::Buffer, "y", &["a"]).unwrap();
        builder.add_gate(GateKind::Const1, "k", &[] as &[&str]).unwrap();
        let circuit = builder.build().unwrap();
        let order = circuit
            .gates()
            .iter()
            .map(|g| circuit.signal_name(g.output()))
            .collect::<Vec<&str>>();
        assert_eq!(vec!["x", "y", "k"], order);
    }

    #[test]
    fn test_duplicate_definition() {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        assert_eq!(
            CircuitError::Format(FormatError::DuplicateSignal("a".to_string())),
            builder.add_gate(GateKind::Not, "a", &["b"]).unwrap_err()
        );
        assert_eq!(
            CircuitError::Format(FormatError::DuplicateSignal("a".to_string())),
            builder.add_input("a").unwrap_err()
        );
    }

    #[test]
    fn test_duplicate_output() {
        let mut builder = CircuitBuilder::new();
        builder.add_output("a").unwrap();
        assert!(builder.is_output("a"));
        assert!(!builder.is_output("b"));
        assert_eq!(
            CircuitError::Format(FormatError::DuplicateOutput("a".to_string())),
            builder.add_output("a").unwrap_err()
        );
    }

    #[test]
    fn test_arity() {
        let mut builder = CircuitBuilder::new();
        assert_eq!(
            CircuitError::Format(FormatError::Arity {
                gate: "z".to_string(),
                kind: GateKind::Not,
                expected: "exactly 1",
                actual: 2
            }),
            builder
                .add_gate(GateKind::Not, "z", &["a", "b"])
                .unwrap_err()
        );
        assert_eq!(
            "the AND gate driving y expects at least 2 input(s), got 1",
            builder
                .add_gate(GateKind::And, "y", &["a"])
                .unwrap_err()
                .to_string()
        );
    }

    #[test]
    fn test_dangling_reference() {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        builder.add_gate(GateKind::Or, "z", &["a", "b"]).unwrap();
        assert_eq!(
            CircuitError::Format(FormatError::DanglingReference {
                signal: "b".to_string(),
                gate: "z".to_string()
            }),
            builder.build().unwrap_err()
        );
    }

    #[test]
    fn test_undriven_output() {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        builder.add_output("z").unwrap();
        assert_eq!(
            CircuitError::Format(FormatError::UndrivenOutput("z".to_string())),
            builder.build().unwrap_err()
        );
    }

    #[test]
    fn test_input_as_output() {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        builder.add_output("a").unwrap();
        let circuit = builder.build().unwrap();
        assert_eq!(vec!["a"], circuit.outputs());
        assert!(circuit.gates().is_empty());
    }

    #[test]
    fn test_cycle() {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        builder.add_gate(GateKind::And, "x", &["a", "y"]).unwrap();
        builder.add_gate(GateKind::Not, "y", &["x"]).unwrap();
        builder.add_output("y").unwrap();
        assert_eq!(
            CircuitError::Format(FormatError::Cycle("x".to_string())),
            builder.build().unwrap_err()
        );
    }

    #[test]
    fn test_cycle_reported_on_the_loop_not_downstream() {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        builder.add_gate(GateKind::Not, "x", &["y"]).unwrap();
        builder.add_gate(GateKind::And, "y", &["a", "w"]).unwrap();
        builder.add_gate(GateKind::Not, "w", &["y"]).unwrap();
        builder.add_output("x").unwrap();
        assert_eq!(
            CircuitError::Format(FormatError::Cycle("y".to_string())),
            builder.build().unwrap_err()
        );
    }

    #[test]
    fn test_self_loop() {
        let mut builder = CircuitBuilder::new();
        builder.add_gate(GateKind::Buffer, "x", &["x"]).unwrap();
        assert!(matches!(
            builder.build().unwrap_err(),
            CircuitError::Format(FormatError::Cycle(_))
        ));
    }
}
