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

use crate::{Clause, CnfFormula, DpllSatSolver, Literal, LiteralVec};

/// An enum used to handle the return of a consistency check algorithm.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConsistencyCheckResult {
    /// A model was found; it contains a literal for each variable of the solver.
    Sat(LiteralVec),
    /// Unsatisfiability was proved
    Unsat,
}

impl ConsistencyCheckResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, ConsistencyCheckResult::Sat(_))
    }
}

/// A `SatSolver` is used to look for models in `CNF` formulas.
///
/// Clauses may be added between two consistency checks; the solver keeps them for the next checks.
/// A solver always terminates with an answer: there is no timeout and no error outcome.
///
/// # Examples
///
/// ```
/// use satec_logic::{default_sat_solver, Clause, ConsistencyCheckResult, SatSolver};
///
/// let mut solver = default_sat_solver();
/// solver.add_clause(Clause::new(vec![(0, false), (1, true)].into()).unwrap());
/// solver.add_clause(Clause::new(vec![(0, true), (1, false)].into()).unwrap());
/// match solver.check_consistency() {
///     ConsistencyCheckResult::Sat(model) => println!("{:?} is a model", model),
///     ConsistencyCheckResult::Unsat => println!("no model"),
/// }
/// ```
pub trait SatSolver {
    /// Adds a [`Clause`] to the `CNF` formula considered by the solver.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::{default_sat_solver, Clause, SatSolver};
    ///
    /// let mut solver = default_sat_solver();
    /// solver.add_clause(Clause::new(vec![(0, false), (1, true)].into()).unwrap());
    /// ```
    fn add_clause(&mut self, clause: Clause);

    /// Adds the empty clause, making the formula inconsistent.
    fn add_empty_clause(&mut self);

    /// Makes sure the solver considers at least `n_vars` variables.
    ///
    /// Variables which appear in no clause still get a value in the models.
    fn ensure_n_vars(&mut self, n_vars: usize);

    /// Returns the number of variables taken into consideration by the solver.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::{default_sat_solver, Clause, SatSolver};
    ///
    /// let mut solver = default_sat_solver();
    /// assert_eq!(0, solver.n_vars());
    /// solver.add_clause(Clause::new(vec![(0, false), (1, true)].into()).unwrap());
    /// assert_eq!(2, solver.n_vars());
    /// ```
    fn n_vars(&self) -> usize;

    /// Adds all the clauses of a formula, and declares its variables.
    fn add_formula(&mut self, formula: &CnfFormula) {
        self.ensure_n_vars(formula.n_vars());
        formula
            .as_clauses()
            .iter()
            .for_each(|c| self.add_clause(c.clone()));
        if formula.has_empty_clause() {
            self.add_empty_clause();
        }
    }

    /// Checks if the underlying `CNF` has a model.
    ///
    /// If a model is found, it is returned through the [`ConsistencyCheckResult`] object.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::{default_sat_solver, Clause, ConsistencyCheckResult, SatSolver};
    ///
    /// let mut solver = default_sat_solver();
    /// solver.add_clause(Clause::new(vec![(0, false), (1, true)].into()).unwrap());
    /// solver.add_clause(Clause::new(vec![(0, true), (1, false)].into()).unwrap());
    /// solver.add_clause(Clause::new(vec![(0, true), (1, true)].into()).unwrap());
    /// assert_eq!(
    ///     ConsistencyCheckResult::Sat(vec![(0, true), (1, true)].into()),
    ///     solver.check_consistency()
    /// );
    /// ```
    fn check_consistency(&mut self) -> ConsistencyCheckResult {
        self.check_consistency_with(&[])
    }

    /// Checks if the underlying `CNF`, conditioned by a set of literals, has a model.
    ///
    /// The `CNF` itself is not altered by this function.
    ///
    /// If a model is found, it is returned through the [`ConsistencyCheckResult`] object.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::{default_sat_solver, Clause, ConsistencyCheckResult, SatSolver};
    ///
    /// let mut solver = default_sat_solver();
    /// solver.add_clause(Clause::new(vec![(0, false), (1, false)].into()).unwrap());
    /// solver.add_clause(Clause::new(vec![(0, true), (1, true)].into()).unwrap());
    /// assert!(solver.check_consistency_with(&[(0, true).into()]).is_sat());
    /// assert_eq!(
    ///     ConsistencyCheckResult::Unsat,
    ///     solver.check_consistency_with(&[(0, true).into(), (1, true).into()])
    /// );
    /// ```
    fn check_consistency_with(&mut self, assumptions: &[Literal]) -> ConsistencyCheckResult;
}

/// Returns the default SAT solver.
///
/// The default SAT solver is currently the [`DpllSatSolver`].
///
/// # Examples
///
/// ```
/// use satec_logic::{default_sat_solver, Clause, ConsistencyCheckResult, SatSolver};
///
/// let mut solver = default_sat_solver();
/// solver.add_clause(Clause::new(vec![(0, false), (1, true)].into()).unwrap());
/// solver.add_clause(Clause::new(vec![(0, true), (1, false)].into()).unwrap());
/// match solver.check_consistency() {
///     ConsistencyCheckResult::Sat(model) => println!("{:?} is a model", model),
///     ConsistencyCheckResult::Unsat => println!("no model"),
/// }
/// ```
pub fn default_sat_solver() -> Box<dyn SatSolver> {
    Box::new(DpllSatSolver::new())
}
