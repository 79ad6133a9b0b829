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

use crate::{
    Circuit, CircuitError, Clause, CnfFormula, GateKind, Literal, MaybeTrivial, SignalId, VarId,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// An ordered restriction of a formula to some named variables.
///
/// Projections tell which variables matter when models are reported (see [`AllSatEnumerator`](crate::AllSatEnumerator)).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Projection(Vec<(String, VarId)>);

impl Projection {
    /// Builds a projection from `(name, variable)` couples.
    pub fn new(entries: Vec<(String, VarId)>) -> Self {
        Projection(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, VarId)> + '_ {
        self.0.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The mapping between the signals of a circuit and the variables of its encoding.
///
/// Each signal is mapped to exactly one variable, and two signals never share a variable.
/// Auxiliary variables introduced by the encoding do not appear in this map.
#[derive(Clone, Debug, Default)]
pub struct VarMap {
    entries: Vec<(String, VarId)>,
    by_name: FxHashMap<String, usize>,
    by_var: FxHashMap<VarId, usize>,
    inputs: Vec<usize>,
}

impl VarMap {
    fn new(circuit: &Circuit, vars: Vec<VarId>) -> Self {
        let entries = circuit
            .signal_names()
            .iter()
            .cloned()
            .zip(vars.into_iter())
            .collect::<Vec<(String, VarId)>>();
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, (n, _))| (n.clone(), i))
            .collect();
        let by_var = entries
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (*v, i))
            .collect();
        let inputs = circuit.input_ids().iter().map(|i| usize::from(*i)).collect();
        VarMap {
            entries,
            by_name,
            by_var,
            inputs,
        }
    }

    /// Returns the variable of a signal.
    pub fn var_of(&self, signal: &str) -> Result<VarId, CircuitError> {
        self.by_name
            .get(signal)
            .map(|i| self.entries[*i].1)
            .ok_or_else(|| CircuitError::NotFound(signal.to_string()))
    }

    /// Returns the signal a variable stands for, if any.
    pub fn signal_of(&self, var: VarId) -> Option<&str> {
        self.by_var.get(&var).map(|i| self.entries[*i].0.as_str())
    }

    /// Iterates over the `(signal, variable)` couples, in the order of the circuit signals.
    pub fn iter(&self) -> impl Iterator<Item = (&str, VarId)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the projection on the given signals, in the given order.
    pub fn projection<T>(&self, signals: &[T]) -> Result<Projection, CircuitError>
    where
        T: AsRef<str>,
    {
        signals
            .iter()
            .map(|s| {
                let name = s.as_ref();
                self.var_of(name).map(|v| (name.to_string(), v))
            })
            .collect::<Result<Vec<(String, VarId)>, CircuitError>>()
            .map(Projection)
    }

    /// Builds the projection on the primary inputs, in declaration order.
    pub fn input_projection(&self) -> Projection {
        Projection(self.inputs.iter().map(|i| self.entries[*i].clone()).collect())
    }

    /// Builds the projection on every signal.
    pub fn signal_projection(&self) -> Projection {
        Projection(self.entries.clone())
    }
}

/// The result of the encoding of a circuit: a formula and the variables of its signals.
#[derive(Clone, Debug)]
pub struct CircuitEncoding {
    formula: CnfFormula,
    var_map: VarMap,
}

impl CircuitEncoding {
    pub fn formula(&self) -> &CnfFormula {
        &self.formula
    }

    /// Returns a mutable reference to the formula, e.g. to constrain some signals.
    pub fn formula_mut(&mut self) -> &mut CnfFormula {
        &mut self.formula
    }

    pub fn var_map(&self) -> &VarMap {
        &self.var_map
    }

    pub fn input_projection(&self) -> Projection {
        self.var_map.input_projection()
    }

    pub fn signal_projection(&self) -> Projection {
        self.var_map.signal_projection()
    }
}

/// A structure used to translate [`Circuit`]s into [`CnfFormula`]s.
///
/// Each signal gets its own variable, and each gate contributes the clauses stating
/// that its output equals its operation applied to its inputs.
/// XOR/XNOR gates with more than two inputs are the one exception to the single variable per gate rule:
/// a direct parity encoding of `k` inputs needs `2^k` clauses, so these gates are encoded as a chain of binary XORs
/// whose intermediate results get auxiliary variables, allocated after the signal variables.
/// No other gate introduces a variable besides its output signal.
///
/// The models of the formula, restricted to the signal variables, are exactly the consistent evaluations of the circuit.
///
/// # Examples
///
/// ```
/// use satec_logic::{BenchReader, TseitinEncoder};
///
/// let circuit = BenchReader::default()
///     .read(&mut "INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = AND(a, b)\n".as_bytes())
///     .unwrap();
/// let encoding = TseitinEncoder::encode(&circuit);
/// assert_eq!(3, encoding.formula().n_vars());
/// assert_eq!(3, encoding.formula().n_clauses());
/// assert_eq!(2, usize::from(encoding.var_map().var_of("z").unwrap()));
/// ```
pub struct TseitinEncoder;

impl TseitinEncoder {
    /// Encodes a circuit into a new formula; signal `i` is mapped to variable `i`.
    pub fn encode(circuit: &Circuit) -> CircuitEncoding {
        let mut formula = CnfFormula::new();
        let var_map = Self::fresh_var_map(circuit, &mut formula);
        Self::encode_gates(circuit, &var_map, &mut formula);
        CircuitEncoding { formula, var_map }
    }

    /// Encodes a circuit into an existing formula.
    ///
    /// Primary inputs may be bound to variables of the formula, allowing several circuits to share their inputs;
    /// the other signals get fresh variables.
    /// An [`CircuitError::Encoding`] error is returned if a binding refers to an unknown signal, to a signal which is not an input,
    /// or if a signal or a variable is bound twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::{BenchReader, CnfFormula, TseitinEncoder};
    ///
    /// let circuit = BenchReader::default()
    ///     .read(&mut "INPUT(a)\nOUTPUT(z)\nz = NOT(a)\n".as_bytes())
    ///     .unwrap();
    /// let mut formula = CnfFormula::new();
    /// let first = TseitinEncoder::encode_into(&circuit, &mut formula, &[]).unwrap();
    /// let a = first.var_of("a").unwrap();
    /// let second = TseitinEncoder::encode_into(&circuit, &mut formula, &[("a", a)]).unwrap();
    /// assert_eq!(a, second.var_of("a").unwrap());
    /// assert_ne!(first.var_of("z").unwrap(), second.var_of("z").unwrap());
    /// assert_eq!(3, formula.n_vars());
    /// ```
    pub fn encode_into(
        circuit: &Circuit,
        formula: &mut CnfFormula,
        bindings: &[(&str, VarId)],
    ) -> Result<VarMap, CircuitError> {
        let mut vars: Vec<Option<VarId>> = vec![None; circuit.n_signals()];
        let mut bound_vars = FxHashSet::default();
        for (name, var) in bindings {
            let encoding_error = |reason: &str| CircuitError::Encoding {
                signal: name.to_string(),
                reason: reason.to_string(),
            };
            let id = circuit
                .signal_id(name)
                .map_err(|_| encoding_error("no such signal in the circuit"))?;
            if !circuit.is_input(id) {
                return Err(encoding_error(
                    "only primary inputs can be bound to existing variables",
                ));
            }
            if vars[usize::from(id)].is_some() {
                return Err(encoding_error("signal is bound more than once"));
            }
            if !bound_vars.insert(*var) {
                return Err(encoding_error(&format!(
                    "variable {} is already bound to another signal",
                    var
                )));
            }
            vars[usize::from(id)] = Some(*var);
            formula.ensure_n_vars(usize::from(*var) + 1);
        }
        let vars = vars
            .into_iter()
            .map(|v| v.unwrap_or_else(|| formula.new_var()))
            .collect();
        let var_map = VarMap::new(circuit, vars);
        Self::encode_gates(circuit, &var_map, formula);
        Ok(var_map)
    }

    fn fresh_var_map(circuit: &Circuit, formula: &mut CnfFormula) -> VarMap {
        let vars = (0..circuit.n_signals()).map(|_| formula.new_var()).collect();
        VarMap::new(circuit, vars)
    }

    fn encode_gates(circuit: &Circuit, var_map: &VarMap, formula: &mut CnfFormula) {
        let lit_of = |id: SignalId| Literal::new(var_map.entries[usize::from(id)].1, true);
        for gate in circuit.gates() {
            let z = lit_of(gate.output());
            let xs = gate.inputs().iter().map(|i| lit_of(*i)).collect::<Vec<Literal>>();
            encode_gate(formula, gate.kind(), z, &xs);
        }
    }
}

fn add(formula: &mut CnfFormula, literals: Vec<Literal>) {
    formula.add_maybe_trivial_clause(MaybeTrivial::<Clause>::from(literals));
}

fn encode_gate(formula: &mut CnfFormula, kind: GateKind, z: Literal, xs: &[Literal]) {
    match kind {
        GateKind::And | GateKind::Nand => {
            let z = if kind == GateKind::Nand { z.negate() } else { z };
            xs.iter().for_each(|x| add(formula, vec![*x, z.negate()]));
            add(
                formula,
                xs.iter()
                    .map(Literal::negate)
                    .chain(std::iter::once(z))
                    .collect(),
            );
        }
        GateKind::Or | GateKind::Nor => {
            let z = if kind == GateKind::Nor { z.negate() } else { z };
            xs.iter().for_each(|x| add(formula, vec![x.negate(), z]));
            add(
                formula,
                xs.iter()
                    .copied()
                    .chain(std::iter::once(z.negate()))
                    .collect(),
            );
        }
        GateKind::Not => {
            add(formula, vec![xs[0], z]);
            add(formula, vec![xs[0].negate(), z.negate()]);
        }
        GateKind::Buffer => {
            add(formula, vec![xs[0], z.negate()]);
            add(formula, vec![xs[0].negate(), z]);
        }
        GateKind::Const0 => add(formula, vec![z.negate()]),
        GateKind::Const1 => add(formula, vec![z]),
        GateKind::Xor | GateKind::Xnor => {
            let out = if kind == GateKind::Xnor { z.negate() } else { z };
            let mut acc = xs[0];
            for (i, x) in xs.iter().enumerate().skip(1) {
                let target = if i == xs.len() - 1 {
                    out
                } else {
                    Literal::new(formula.new_var(), true)
                };
                encode_xor2(formula, target, acc, *x);
                acc = target;
            }
        }
    }
}

fn encode_xor2(formula: &mut CnfFormula, z: Literal, a: Literal, b: Literal) {
    add(formula, vec![a.negate(), b.negate(), z.negate()]);
    add(formula, vec![a, b, z.negate()]);
    add(formula, vec![a, b.negate(), z]);
    add(formula, vec![a.negate(), b, z]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_circuits::{input_assignment, random_circuit};
    use crate::{default_sat_solver, BenchReader, ConsistencyCheckResult, LiteralVec, SatSolver};

    fn read(content: &str) -> Circuit {
        BenchReader::default().read(&mut content.as_bytes()).unwrap()
    }

    fn clauses_of(encoding: &CircuitEncoding) -> Vec<String> {
        encoding
            .formula()
            .as_clauses()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_and_template() {
        let encoding = TseitinEncoder::encode(&read("INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = AND(a, b)\n"));
        assert_eq!(
            vec!["or(0, -2)", "or(1, -2)", "or(-0, -1, 2)"],
            clauses_of(&encoding)
        );
    }

    #[test]
    fn test_nor_template() {
        let encoding = TseitinEncoder::encode(&read("INPUT(a)\nINPUT(b)\nz = NOR(a, b)\n"));
        assert_eq!(
            vec!["or(-0, -2)", "or(-1, -2)", "or(0, 1, 2)"],
            clauses_of(&encoding)
        );
    }

    #[test]
    fn test_unary_and_constant_templates() {
        let encoding =
            TseitinEncoder::encode(&read("INPUT(a)\nn = NOT(a)\nb = BUFF(a)\nk = CONST0()\n"));
        assert_eq!(
            vec!["or(0, 1)", "or(-0, -1)", "or(0, -2)", "or(-0, 2)", "or(-3)"],
            clauses_of(&encoding)
        );
    }

    #[test]
    fn test_xor_chain_uses_auxiliary_variables() {
        let encoding =
            TseitinEncoder::encode(&read("INPUT(a)\nINPUT(b)\nINPUT(c)\nOUTPUT(z)\nz = XOR(a, b, c)\n"));
        assert_eq!(4, encoding.var_map().len());
        assert_eq!(5, encoding.formula().n_vars());
        assert_eq!(8, encoding.formula().n_clauses());
        assert_eq!(None, encoding.var_map().signal_of(VarId::from(4)));
        assert_eq!(Some("z"), encoding.var_map().signal_of(VarId::from(3)));
    }

    #[test]
    fn test_repeated_inputs_drop_tautologies() {
        let encoding = TseitinEncoder::encode(&read("INPUT(a)\nz = XOR(a, a)\n"));
        assert_eq!(vec!["or(-0, -1)", "or(0, -1)"], clauses_of(&encoding));
    }

    #[test]
    fn test_var_map() {
        let encoding = TseitinEncoder::encode(&read("INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = OR(a, b)\n"));
        let var_map = encoding.var_map();
        assert_eq!(
            vec![("a", VarId::from(0)), ("b", VarId::from(1)), ("z", VarId::from(2))],
            var_map.iter().collect::<Vec<(&str, VarId)>>()
        );
        assert_eq!(
            CircuitError::NotFound("c".to_string()),
            var_map.var_of("c").unwrap_err()
        );
        assert_eq!(
            vec!["a", "b"],
            encoding
                .input_projection()
                .iter()
                .map(|(n, _)| n)
                .collect::<Vec<&str>>()
        );
        assert_eq!(3, encoding.signal_projection().len());
        assert_eq!(
            vec![("z", VarId::from(2)), ("a", VarId::from(0))],
            var_map.projection(&["z", "a"]).unwrap().iter().collect::<Vec<_>>()
        );
        assert!(var_map.projection(&["y"]).is_err());
    }

    #[test]
    fn test_encode_into_errors() {
        let circuit = read("INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = OR(a, b)\n");
        let mut formula = CnfFormula::new();
        let v = formula.new_var();
        assert_eq!(
            CircuitError::Encoding {
                signal: "z".to_string(),
                reason: "only primary inputs can be bound to existing variables".to_string()
            },
            TseitinEncoder::encode_into(&circuit, &mut formula, &[("z", v)]).unwrap_err()
        );
        assert_eq!(
            CircuitError::Encoding {
                signal: "c".to_string(),
                reason: "no such signal in the circuit".to_string()
            },
            TseitinEncoder::encode_into(&circuit, &mut formula, &[("c", v)]).unwrap_err()
        );
        assert_eq!(
            CircuitError::Encoding {
                signal: "b".to_string(),
                reason: "variable 0 is already bound to another signal".to_string()
            },
            TseitinEncoder::encode_into(&circuit, &mut formula, &[("a", v), ("b", v)])
                .unwrap_err()
        );
    }

    #[test]
    fn test_simulation_extends_to_model() {
        for seed in 0..8 {
            let circuit = random_circuit(seed, 4, 25, 3);
            let encoding = TseitinEncoder::encode(&circuit);
            let mut solver = default_sat_solver();
            solver.add_formula(encoding.formula());
            for bits in 0..16 {
                let values = circuit.simulate(&input_assignment(&circuit, bits)).unwrap();
                let assumptions = encoding
                    .var_map()
                    .iter()
                    .map(|(n, v)| Literal::new(v, values[n]))
                    .collect::<Vec<Literal>>();
                assert!(matches!(
                    solver.check_consistency_with(&assumptions),
                    ConsistencyCheckResult::Sat(_)
                ));
            }
        }
    }

    #[test]
    fn test_models_are_simulations() {
        for seed in 0..8 {
            let circuit = random_circuit(seed, 4, 25, 3);
            let encoding = TseitinEncoder::encode(&circuit);
            let mut solver = default_sat_solver();
            solver.add_formula(encoding.formula());
            for bits in 0..16 {
                let inputs = input_assignment(&circuit, bits);
                let assumptions = encoding
                    .input_projection()
                    .iter()
                    .map(|(n, v)| Literal::new(v, inputs[n]))
                    .collect::<Vec<Literal>>();
                let model: LiteralVec = match solver.check_consistency_with(&assumptions) {
                    ConsistencyCheckResult::Sat(m) => m,
                    ConsistencyCheckResult::Unsat => panic!("inputs {:b} are rejected", bits),
                };
                assert!(encoding.formula().is_satisfied_by(&model));
                let values = circuit.simulate(&inputs).unwrap();
                for (name, var) in encoding.var_map().iter() {
                    assert_eq!(Some(values[name]), model.value_of(var), "signal {}", name);
                }
            }
        }
    }

    #[test]
    fn test_shared_inputs() {
        let and = read("INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = AND(a, b)\n");
        let nand = read("INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = NAND(a, b)\n");
        let mut formula = CnfFormula::new();
        let first = TseitinEncoder::encode_into(&and, &mut formula, &[]).unwrap();
        let bindings = vec![
            ("a", first.var_of("a").unwrap()),
            ("b", first.var_of("b").unwrap()),
        ];
        let second = TseitinEncoder::encode_into(&nand, &mut formula, &bindings).unwrap();
        formula.add_clause(Clause::new(
            vec![
                Literal::new(first.var_of("z").unwrap(), true),
                Literal::new(second.var_of("z").unwrap(), true),
            ]
            .into(),
        )
        .unwrap());
        formula.add_clause(Clause::new(
            vec![
                Literal::new(first.var_of("z").unwrap(), false),
                Literal::new(second.var_of("z").unwrap(), false),
            ]
            .into(),
        )
        .unwrap());
        let mut solver = default_sat_solver();
        solver.add_formula(&formula);
        assert!(matches!(
            solver.check_consistency(),
            ConsistencyCheckResult::Sat(_)
        ));
        let z1 = Literal::new(first.var_of("z").unwrap(), true);
        let z2 = Literal::new(second.var_of("z").unwrap(), true);
        assert_eq!(
            ConsistencyCheckResult::Unsat,
            solver.check_consistency_with(&[z1, z2])
        );
    }
}
