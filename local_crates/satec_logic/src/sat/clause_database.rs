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

use crate::Literal;

/// A reference to a clause stored in a [`ClauseDatabase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClauseRef(usize);

impl From<ClauseRef> for usize {
    fn from(c: ClauseRef) -> Self {
        c.0
    }
}

/// The clauses of a solver, indexed by their watched literals.
///
/// The first two literals of each clause are its watched literals.
/// The watch list of a literal contains the clauses in which this literal is watched,
/// so it must be visited when the literal becomes false.
/// Adding a clause only updates the watch lists of its two watched literals.
///
/// Clauses are never removed.
#[derive(Default)]
pub struct ClauseDatabase {
    clauses: Vec<Vec<Literal>>,
    watches: Vec<Vec<ClauseRef>>,
}

impl ClauseDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure watch lists exist for both literals of `n_vars` variables.
    pub fn ensure_n_vars(&mut self, n_vars: usize) {
        if self.watches.len() < n_vars << 1 {
            self.watches.resize(n_vars << 1, vec![]);
        }
    }

    /// Adds a clause and watches its first two literals.
    ///
    /// The clause must contain at least two literals, on variables known by the database.
    pub fn add_clause(&mut self, literals: Vec<Literal>) -> ClauseRef {
        debug_assert!(literals.len() >= 2);
        let cr = ClauseRef(self.clauses.len());
        self.watches[literals[0].index()].push(cr);
        self.watches[literals[1].index()].push(cr);
        self.clauses.push(literals);
        cr
    }

    pub fn literals(&self, cr: ClauseRef) -> &[Literal] {
        &self.clauses[cr.0]
    }

    /// Returns the literals of a clause; the caller may reorder them, keeping the watch lists consistent.
    pub fn literals_mut(&mut self, cr: ClauseRef) -> &mut [Literal] {
        &mut self.clauses[cr.0]
    }

    /// Returns the clauses in which a literal is watched.
    pub fn watches(&self, lit: Literal) -> &[ClauseRef] {
        &self.watches[lit.index()]
    }

    /// Takes the watch list of a literal, leaving it empty until [`restore_watches`](Self::restore_watches) is called.
    pub fn take_watches(&mut self, lit: Literal) -> Vec<ClauseRef> {
        std::mem::take(&mut self.watches[lit.index()])
    }

    pub fn restore_watches(&mut self, lit: Literal, watches: Vec<ClauseRef>) {
        self.watches[lit.index()] = watches;
    }

    pub fn add_watch(&mut self, lit: Literal, cr: ClauseRef) {
        self.watches[lit.index()].push(cr);
    }

    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(v: usize, p: bool) -> Literal {
        Literal::from((v, p))
    }

    #[test]
    fn test_add_clause_watches_first_two_literals() {
        let mut db = ClauseDatabase::new();
        db.ensure_n_vars(3);
        let cr = db.add_clause(vec![lit(0, true), lit(1, false), lit(2, true)]);
        assert_eq!(1, db.n_clauses());
        assert_eq!(&[cr], db.watches(lit(0, true)));
        assert_eq!(&[cr], db.watches(lit(1, false)));
        assert!(db.watches(lit(2, true)).is_empty());
        assert!(db.watches(lit(0, false)).is_empty());
    }

    #[test]
    fn test_new_clause_keeps_other_watches() {
        let mut db = ClauseDatabase::new();
        db.ensure_n_vars(2);
        let c0 = db.add_clause(vec![lit(0, true), lit(1, true)]);
        db.ensure_n_vars(4);
        let c1 = db.add_clause(vec![lit(2, false), lit(3, false)]);
        assert_eq!(&[c0], db.watches(lit(0, true)));
        assert_eq!(&[c0], db.watches(lit(1, true)));
        assert_eq!(&[c1], db.watches(lit(2, false)));
        assert_eq!(1, usize::from(c1));
    }

    #[test]
    fn test_move_watch() {
        let mut db = ClauseDatabase::new();
        db.ensure_n_vars(3);
        let cr = db.add_clause(vec![lit(0, true), lit(1, true), lit(2, true)]);
        let mut ws = db.take_watches(lit(0, true));
        assert!(db.watches(lit(0, true)).is_empty());
        db.literals_mut(cr).swap(0, 2);
        db.add_watch(lit(2, true), ws.pop().unwrap());
        db.restore_watches(lit(0, true), ws);
        assert_eq!(&[lit(2, true), lit(1, true), lit(0, true)], db.literals(cr));
        assert!(db.watches(lit(0, true)).is_empty());
        assert_eq!(&[cr], db.watches(lit(2, true)));
    }
}
