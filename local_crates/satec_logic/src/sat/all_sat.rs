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
    default_sat_solver, Assignment, CircuitEncoding, CircuitError, Clause, CnfFormula,
    ConsistencyCheckResult, Literal, LiteralVec, MaybeTrivial, Projection, SatSolver,
};
use log::debug;
use rustc_hash::FxHashMap;
use std::fmt::Display;
use std::iter::FusedIterator;

/// A model restricted to a projection: an ordered list of named Boolean values.
///
/// # Examples
///
/// ```
/// use satec_logic::{AllSatEnumerator, BenchReader, TseitinEncoder};
///
/// let circuit = BenchReader::default()
///     .read(&mut "INPUT(a)\nOUTPUT(z)\nz = NOT(a)\n".as_bytes())
///     .unwrap();
/// let encoding = TseitinEncoder::encode(&circuit);
/// let first = AllSatEnumerator::new(&encoding).next().unwrap();
/// assert_eq!("a=0 z=1", first.to_string());
/// assert!(first.get("z").unwrap());
/// assert!(first.get("b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    values: Vec<(String, bool)>,
    index: FxHashMap<String, usize>,
}

impl Solution {
    /// Restricts a model to a projection.
    pub fn from_model(model: &LiteralVec, projection: &Projection) -> Self {
        let values = projection
            .iter()
            .map(|(name, var)| (name.to_string(), model.value_of(var).unwrap_or(false)))
            .collect::<Vec<(String, bool)>>();
        let index = values
            .iter()
            .enumerate()
            .map(|(i, (n, _))| (n.clone(), i))
            .collect();
        Solution { values, index }
    }

    /// Returns the value of a signal, or a [`CircuitError::NotFound`] error if the signal is not in the projection.
    pub fn get(&self, signal: &str) -> Result<bool, CircuitError> {
        self.index
            .get(signal)
            .map(|i| self.values[*i].1)
            .ok_or_else(|| CircuitError::NotFound(signal.to_string()))
    }

    /// Iterates over the `(signal, value)` couples, in the projection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.values.iter().map(|(n, b)| (n.as_str(), *b))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts this solution into an assignment, e.g. to simulate a circuit.
    pub fn to_assignment(&self) -> Assignment {
        self.values.iter().cloned().collect()
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values = self
            .values
            .iter()
            .map(|(n, b)| format!("{}={}", n, *b as u8))
            .collect::<Vec<String>>();
        write!(f, "{}", values.join(" "))
    }
}

/// An iterator over the models of a formula, restricted to a projection.
///
/// Each call to `next` runs the SAT solver once. When a model is found, it is restricted to the projection,
/// and a blocking clause made of the negation of the projected literals is added,
/// so the same projected assignment is never produced twice.
/// The enumeration ends when the formula becomes inconsistent.
///
/// The whole formula is always solved: the projection only selects the reported (and blocked) variables.
/// Solutions are computed on demand; dropping the enumerator stops the search.
///
/// # Examples
///
/// ```
/// use satec_logic::{AllSatEnumerator, BenchReader, TseitinEncoder};
///
/// let circuit = BenchReader::default()
///     .read(&mut "INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = AND(a, b)\n".as_bytes())
///     .unwrap();
/// let encoding = TseitinEncoder::encode(&circuit);
/// let solutions = AllSatEnumerator::new(&encoding)
///     .map(|s| s.to_string())
///     .collect::<Vec<String>>();
/// assert_eq!(
///     vec!["a=0 b=0 z=0", "a=0 b=1 z=0", "a=1 b=0 z=0", "a=1 b=1 z=1"],
///     solutions
/// );
/// ```
pub struct AllSatEnumerator {
    solver: Box<dyn SatSolver>,
    projection: Projection,
    exhausted: bool,
    n_solutions: usize,
}

impl AllSatEnumerator {
    /// Enumerates the consistent evaluations of an encoded circuit, projected on all its signals.
    pub fn new(encoding: &CircuitEncoding) -> Self {
        Self::from_formula(encoding.formula(), encoding.signal_projection())
    }

    /// Enumerates the models of an encoded circuit, projected on some of its signals.
    ///
    /// An error is returned if a signal is unknown.
    pub fn with_projection<T>(encoding: &CircuitEncoding, signals: &[T]) -> Result<Self, CircuitError>
    where
        T: AsRef<str>,
    {
        let projection = encoding.var_map().projection(signals)?;
        Ok(Self::from_formula(encoding.formula(), projection))
    }

    /// Enumerates the models of a formula with the default SAT solver.
    pub fn from_formula(formula: &CnfFormula, projection: Projection) -> Self {
        let mut solver = default_sat_solver();
        solver.add_formula(formula);
        Self::from_solver(solver, projection)
    }

    /// Enumerates the models of the formula loaded into a solver.
    ///
    /// The enumerator takes the solver over, since blocking clauses are added to it.
    pub fn from_solver(solver: Box<dyn SatSolver>, projection: Projection) -> Self {
        AllSatEnumerator {
            solver,
            projection,
            exhausted: false,
            n_solutions: 0,
        }
    }

    /// Returns the number of solutions produced so far.
    pub fn n_solutions(&self) -> usize {
        self.n_solutions
    }

    fn block(&mut self, model: &LiteralVec) {
        let blocking = self
            .projection
            .iter()
            .map(|(_, v)| Literal::new(v, !model.value_of(v).unwrap_or(false)))
            .collect::<Vec<Literal>>();
        match Clause::new(blocking.into()) {
            MaybeTrivial::NotTrivial(clause) => self.solver.add_clause(clause),
            MaybeTrivial::False => self.solver.add_empty_clause(),
            MaybeTrivial::True => unreachable!(),
        }
    }
}

impl Iterator for AllSatEnumerator {
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.solver.check_consistency() {
            ConsistencyCheckResult::Sat(model) => {
                self.n_solutions += 1;
                let solution = Solution::from_model(&model, &self.projection);
                self.block(&model);
                Some(solution)
            }
            ConsistencyCheckResult::Unsat => {
                debug!("enumeration ended after {} solution(s)", self.n_solutions);
                self.exhausted = true;
                None
            }
        }
    }
}

impl FusedIterator for AllSatEnumerator {}
