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

use crate::{Literal, LiteralVec, MaybeTrivial, VarId};

/// A disjunction of literals.
///
/// Clauses are built through [`Clause::new`], which removes duplicate literals and
/// reports trivial clauses: a clause containing a literal and its negation is `True`,
/// and an empty clause is `False`.
///
/// # Examples
///
/// ```
/// use satec_logic::{Clause, MaybeTrivial};
///
/// let cl = Clause::new(vec![(0, false), (1, true), (0, false)].into()).unwrap();
/// assert_eq!(2, cl.len());
/// assert!(Clause::new(vec![(0, false), (0, true)].into()).is_true());
/// assert!(Clause::new(Vec::<(usize, bool)>::new().into()).is_false());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Builds a new clause given its set of literals.
    pub fn new(literals: LiteralVec) -> MaybeTrivial<Clause> {
        match literals.clean() {
            None => MaybeTrivial::True,
            Some(v) if v.is_empty() => MaybeTrivial::False,
            Some(v) => MaybeTrivial::NotTrivial(Clause {
                literals: v.to_vec(),
            }),
        }
    }

    /// Builds a clause made of a single literal.
    pub fn unit(literal: Literal) -> Clause {
        Clause {
            literals: vec![literal],
        }
    }

    /// Returns the literals of this clause, sorted.
    pub fn as_literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Always returns `false`, since empty clauses are reported as `MaybeTrivial::False`.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Returns the number of variables needed to hold this clause.
    pub fn n_vars(&self) -> usize {
        self.literals
            .last()
            .map(|l| usize::from(l.var_id()) + 1)
            .unwrap_or(0)
    }

    /// Checks whether a (complete) model satisfies this clause.
    pub fn is_satisfied_by(&self, model: &LiteralVec) -> bool {
        self.literals.iter().any(|l| model.contains(l))
    }
}

impl<T> From<T> for MaybeTrivial<Clause>
where
    T: Into<LiteralVec>,
{
    fn from(v: T) -> Self {
        Clause::new(v.into())
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lits = self
            .literals
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<String>>();
        write!(f, "or({})", lits.join(", "))
    }
}

/// A formula in conjunctive normal form.
///
/// Clauses are kept in insertion order. The number of variables is tracked explicitly,
/// so a formula may declare variables that appear in no clause.
/// Adding a `False` clause marks the formula as trivially inconsistent; it is not an error.
///
/// # Examples
///
/// ```
/// use satec_logic::{CnfFormula, LiteralVec, MaybeTrivial, Clause};
///
/// let mut cnf = CnfFormula::new();
/// cnf.add_maybe_trivial_clause(MaybeTrivial::<Clause>::from(vec![(0, false), (1, true)]));
/// cnf.add_maybe_trivial_clause(MaybeTrivial::<Clause>::from(vec![(1, false), (1, true)]));
/// assert_eq!(1, cnf.n_clauses());
/// assert_eq!(2, cnf.n_vars());
/// assert!(cnf.is_satisfied_by(&LiteralVec::from(vec![(0, false), (1, false)])));
/// assert!(!cnf.is_satisfied_by(&LiteralVec::from(vec![(0, true), (1, false)])));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CnfFormula {
    clauses: Vec<Clause>,
    n_vars: usize,
    has_empty_clause: bool,
}

impl CnfFormula {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh variable.
    pub fn new_var(&mut self) -> VarId {
        self.n_vars += 1;
        VarId::from(self.n_vars - 1)
    }

    /// Makes sure the formula declares at least `n_vars` variables.
    pub fn ensure_n_vars(&mut self, n_vars: usize) {
        self.n_vars = usize::max(self.n_vars, n_vars);
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.ensure_n_vars(clause.n_vars());
        self.clauses.push(clause);
    }

    /// Adds a clause which may be trivial.
    ///
    /// `True` clauses are ignored; a `False` clause makes the formula inconsistent.
    pub fn add_maybe_trivial_clause(&mut self, clause: MaybeTrivial<Clause>) {
        match clause {
            MaybeTrivial::NotTrivial(cl) => self.add_clause(cl),
            MaybeTrivial::True => {}
            MaybeTrivial::False => self.has_empty_clause = true,
        }
    }

    pub fn as_clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns `true` if an empty clause was added to this formula.
    pub fn has_empty_clause(&self) -> bool {
        self.has_empty_clause
    }

    /// Checks whether a (complete) model satisfies every clause of this formula.
    pub fn is_satisfied_by(&self, model: &LiteralVec) -> bool {
        !self.has_empty_clause && self.clauses.iter().all(|c| c.is_satisfied_by(model))
    }
}
