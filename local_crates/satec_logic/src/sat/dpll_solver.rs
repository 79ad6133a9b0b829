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

use super::clause_database::{ClauseDatabase, ClauseRef};
use crate::{Clause, CnfFormula, ConsistencyCheckResult, Literal, LiteralVec, SatSolver, VarId};
use log::debug;

/// The states of a [`DpllSatSolver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    /// No consistency check was run yet.
    Unassigned,
    /// A consistency check is running.
    Searching,
    /// The last check found a model.
    Sat,
    /// The last check proved there is no model.
    Unsat,
}

/// Counters describing the work done by a [`DpllSatSolver`] since its creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
}

#[derive(Clone, Copy)]
struct Decision {
    literal: Literal,
    flipped: bool,
}

/// A SAT solver implementing the DPLL procedure with chronological backtracking.
///
/// Unit propagation relies on two watched literals per clause (see [`ClauseDatabase`]).
/// Branching picks the unassigned variable with the highest activity and tries the `false` polarity first.
/// Variables are bumped each time they appear in a conflicting clause, and recent bumps weigh more than older ones;
/// ties go to the lowest variable, so before the first conflict variables are decided in increasing order.
/// The models found (and the order in which an enumeration produces them) only depend on the clauses and their insertion order.
///
/// Assumptions are handled as decisions which are never flipped.
/// After each check the solver goes back to decision level 0, so clauses can be added before the next check.
/// A conflict at level 0 makes the solver inconsistent for good.
///
/// # Examples
///
/// ```
/// use satec_logic::{ConsistencyCheckResult, DpllSatSolver, SatSolver, SolverState};
///
/// let mut solver = DpllSatSolver::new();
/// assert_eq!(SolverState::Unassigned, solver.state());
/// solver.add_clause(satec_logic::Clause::new(vec![(0, true), (1, true)].into()).unwrap());
/// assert_eq!(
///     ConsistencyCheckResult::Sat(vec![(0, false), (1, true)].into()),
///     solver.check_consistency()
/// );
/// assert_eq!(SolverState::Sat, solver.state());
/// ```
pub struct DpllSatSolver {
    db: ClauseDatabase,
    assignment: Vec<Option<bool>>,
    trail: Vec<Literal>,
    trail_lim: Vec<usize>,
    decisions: Vec<Decision>,
    qhead: usize,
    root_unsat: bool,
    activity: Vec<f64>,
    var_inc: f64,
    state: SolverState,
    stats: SolverStats,
}

const ACTIVITY_DECAY: f64 = 0.95;
const ACTIVITY_LIMIT: f64 = 1e100;

impl Default for DpllSatSolver {
    fn default() -> Self {
        DpllSatSolver {
            db: ClauseDatabase::new(),
            assignment: vec![],
            trail: vec![],
            trail_lim: vec![],
            decisions: vec![],
            qhead: 0,
            root_unsat: false,
            activity: vec![],
            var_inc: 1.0,
            state: SolverState::Unassigned,
            stats: SolverStats::default(),
        }
    }
}

impl DpllSatSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a solver and loads a formula into it.
    pub fn from_formula(formula: &CnfFormula) -> Self {
        let mut solver = Self::new();
        solver.add_formula(formula);
        solver
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    /// Returns the number of clauses watched by the solver.
    ///
    /// Unit clauses and clauses satisfied at level 0 are not stored.
    pub fn n_stored_clauses(&self) -> usize {
        self.db.n_clauses()
    }

    fn decision_level(&self) -> usize {
        self.trail_lim.len()
    }

    fn enqueue(&mut self, lit: Literal) {
        self.assignment[usize::from(lit.var_id())] = Some(lit.polarity());
        self.trail.push(lit);
    }

    fn new_decision_level(&mut self, literal: Literal, flipped: bool) {
        self.trail_lim.push(self.trail.len());
        self.decisions.push(Decision { literal, flipped });
        self.enqueue(literal);
    }

    fn backtrack(&mut self, level: usize) {
        while self.decision_level() > level {
            if let Some(lim) = self.trail_lim.pop() {
                for lit in self.trail.drain(lim..) {
                    self.assignment[usize::from(lit.var_id())] = None;
                }
            }
            self.decisions.pop();
        }
        self.qhead = self.trail.len();
    }

    /// Propagates the literals of the trail which were not propagated yet.
    ///
    /// Returns the clause found falsified, if any.
    fn propagate(&mut self) -> Option<ClauseRef> {
        while self.qhead < self.trail.len() {
            let false_lit = self.trail[self.qhead].negate();
            self.qhead += 1;
            self.stats.propagations += 1;
            let mut watches = self.db.take_watches(false_lit);
            let mut conflict = None;
            let mut kept = 0;
            let mut i = 0;
            while i < watches.len() {
                let cr = watches[i];
                i += 1;
                let lits = self.db.literals_mut(cr);
                if lits[0] == false_lit {
                    lits.swap(0, 1);
                }
                let first = lits[0];
                if first.value_in(&self.assignment) == Some(true) {
                    watches[kept] = cr;
                    kept += 1;
                    continue;
                }
                let replacement = (2..lits.len()).find(|k| lits[*k].value_in(&self.assignment) != Some(false));
                if let Some(k) = replacement {
                    lits.swap(1, k);
                    let new_watch = lits[1];
                    self.db.add_watch(new_watch, cr);
                    continue;
                }
                watches[kept] = cr;
                kept += 1;
                if first.value_in(&self.assignment) == Some(false) {
                    conflict = Some(cr);
                    while i < watches.len() {
                        watches[kept] = watches[i];
                        kept += 1;
                        i += 1;
                    }
                } else {
                    self.enqueue(first);
                }
            }
            watches.truncate(kept);
            self.db.restore_watches(false_lit, watches);
            if conflict.is_some() {
                return conflict;
            }
        }
        None
    }

    fn pick_branching_literal(&self) -> Option<Literal> {
        let mut best: Option<usize> = None;
        for (v, value) in self.assignment.iter().enumerate() {
            if value.is_none() && best.map_or(true, |b| self.activity[v] > self.activity[b]) {
                best = Some(v);
            }
        }
        best.map(|v| Literal::new(VarId::from(v), false))
    }

    fn bump_clause_activity(&mut self, cr: ClauseRef) {
        for lit in self.db.literals(cr) {
            self.activity[usize::from(lit.var_id())] += self.var_inc;
        }
        self.var_inc /= ACTIVITY_DECAY;
        if self.var_inc > ACTIVITY_LIMIT {
            self.activity.iter_mut().for_each(|a| *a /= ACTIVITY_LIMIT);
            self.var_inc /= ACTIVITY_LIMIT;
        }
    }

    fn model(&self) -> LiteralVec {
        LiteralVec::new(
            self.assignment
                .iter()
                .enumerate()
                .map(|(v, b)| Literal::new(VarId::from(v), b.unwrap_or(false)))
                .collect(),
        )
    }

    /// Undoes the decisions up to the last one which can still be flipped, and flips it.
    ///
    /// Returns `false` if no such decision exists above the assumption levels.
    fn backtrack_and_flip(&mut self, n_assumption_levels: usize) -> bool {
        while self.decision_level() > n_assumption_levels {
            let last = self.decisions[self.decisions.len() - 1];
            self.backtrack(self.decision_level() - 1);
            if !last.flipped {
                self.new_decision_level(last.literal.negate(), true);
                return true;
            }
        }
        false
    }

    fn search(&mut self, assumptions: &[Literal]) -> ConsistencyCheckResult {
        if self.root_unsat {
            return ConsistencyCheckResult::Unsat;
        }
        if self.propagate().is_some() {
            self.root_unsat = true;
            return ConsistencyCheckResult::Unsat;
        }
        for a in assumptions {
            match a.value_in(&self.assignment) {
                Some(true) => continue,
                Some(false) => return ConsistencyCheckResult::Unsat,
                None => {
                    self.new_decision_level(*a, true);
                    if self.propagate().is_some() {
                        self.stats.conflicts += 1;
                        return ConsistencyCheckResult::Unsat;
                    }
                }
            }
        }
        let n_assumption_levels = self.decision_level();
        loop {
            let lit = match self.pick_branching_literal() {
                Some(l) => l,
                None => return ConsistencyCheckResult::Sat(self.model()),
            };
            self.stats.decisions += 1;
            self.new_decision_level(lit, false);
            while let Some(conflict) = self.propagate() {
                self.stats.conflicts += 1;
                self.bump_clause_activity(conflict);
                if !self.backtrack_and_flip(n_assumption_levels) {
                    if n_assumption_levels == 0 {
                        self.root_unsat = true;
                    }
                    return ConsistencyCheckResult::Unsat;
                }
            }
        }
    }
}

impl SatSolver for DpllSatSolver {
    fn add_clause(&mut self, clause: Clause) {
        self.ensure_n_vars(clause.n_vars());
        if self.root_unsat {
            return;
        }
        let mut literals = Vec::with_capacity(clause.len());
        for lit in clause.as_literals() {
            match lit.value_in(&self.assignment) {
                Some(true) => return,
                Some(false) => {}
                None => literals.push(*lit),
            }
        }
        match literals.len() {
            0 => self.root_unsat = true,
            1 => self.enqueue(literals[0]),
            _ => {
                self.db.add_clause(literals);
            }
        }
    }

    fn add_empty_clause(&mut self) {
        self.root_unsat = true;
    }

    fn ensure_n_vars(&mut self, n_vars: usize) {
        if self.assignment.len() < n_vars {
            self.assignment.resize(n_vars, None);
            self.activity.resize(n_vars, 0.0);
            self.db.ensure_n_vars(n_vars);
        }
    }

    fn n_vars(&self) -> usize {
        self.assignment.len()
    }

    fn check_consistency_with(&mut self, assumptions: &[Literal]) -> ConsistencyCheckResult {
        let max_var = assumptions
            .iter()
            .map(|l| usize::from(l.var_id()) + 1)
            .max()
            .unwrap_or(0);
        self.ensure_n_vars(max_var);
        self.state = SolverState::Searching;
        let result = self.search(assumptions);
        self.backtrack(0);
        self.state = match result {
            ConsistencyCheckResult::Sat(_) => SolverState::Sat,
            ConsistencyCheckResult::Unsat => SolverState::Unsat,
        };
        debug!(
            "consistency check: {:?} after {} decision(s), {} propagation(s) and {} conflict(s) so far",
            self.state, self.stats.decisions, self.stats.propagations, self.stats.conflicts
        );
        result
    }
}
