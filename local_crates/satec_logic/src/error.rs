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

use crate::GateKind;
use thiserror::Error;

/// A structural defect of a circuit, detected while it is built.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A signal is defined more than once (as an input and/or a gate output).
    #[error("multiple definitions of signal {0}")]
    DuplicateSignal(String),
    /// A signal is declared as an output more than once.
    #[error("multiple output declarations of signal {0}")]
    DuplicateOutput(String),
    /// A gate reads a signal which is neither an input nor a gate output.
    #[error("signal {signal} read by the gate driving {gate} is never defined")]
    DanglingReference { signal: String, gate: String },
    /// An output signal is neither an input nor a gate output.
    #[error("output signal {0} is not driven")]
    UndrivenOutput(String),
    /// The gate graph contains a cycle.
    #[error("combinational cycle through signal {0}")]
    Cycle(String),
    /// A gate has a number of inputs its operation does not accept.
    #[error("the {kind} gate driving {gate} expects {expected} input(s), got {actual}")]
    Arity {
        gate: String,
        kind: GateKind,
        expected: &'static str,
        actual: usize,
    },
}

/// The errors returned by the circuit related operations of this crate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CircuitError {
    /// The textual description of a circuit is malformed.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    /// The circuit does not satisfy the structural invariants.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A simulation was requested without a value for some primary input.
    #[error("no value given for input signal {0}")]
    MissingInput(String),
    /// A circuit cannot be encoded into the requested formula.
    #[error("cannot encode signal {signal}: {reason}")]
    Encoding { signal: String, reason: String },
    /// Two circuits do not share the same interface.
    #[error("circuit interfaces differ: {0}")]
    InterfaceMismatch(String),
    /// A signal name was looked up but is unknown in this context.
    #[error("no such signal: {0}")]
    NotFound(String),
}
