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

//! Combinational circuits and their equivalence checking by means of a SAT solver.
//!
//! Circuits are read from the `.bench` format ([`BenchReader`]) or built programmatically ([`CircuitBuilder`]).
//! They can be simulated, encoded into CNF formulas ([`TseitinEncoder`]), enumerated ([`AllSatEnumerator`])
//! and compared ([`equivalence`]).

mod circuit;
mod cnf;
mod core;
mod error;
mod sat;
mod utils;

pub use crate::core::Literal;
pub use crate::core::LiteralVec;
pub use crate::core::VarId;

pub use circuit::Assignment;
pub use circuit::BenchReader;
pub use circuit::Circuit;
pub use circuit::CircuitBuilder;
pub use circuit::Gate;
pub use circuit::GateKind;
pub use circuit::SignalId;

pub use cnf::CircuitEncoding;
pub use cnf::Clause;
pub use cnf::CnfFormula;
pub use cnf::DimacsWriter;
pub use cnf::Projection;
pub use cnf::TseitinEncoder;
pub use cnf::VarMap;

pub use error::CircuitError;
pub use error::FormatError;

pub use sat::default_sat_solver;
pub use sat::equivalence;
pub use sat::equivalence::EquivalenceCheckResult;
pub use sat::equivalence::EquivalenceChecker;
pub use sat::AllSatEnumerator;
pub use sat::ClauseDatabase;
pub use sat::ClauseRef;
pub use sat::ConsistencyCheckResult;
pub use sat::DpllSatSolver;
pub use sat::SatSolver;
pub use sat::Solution;
pub use sat::SolverState;
pub use sat::SolverStats;

pub use utils::MaybeTrivial;
