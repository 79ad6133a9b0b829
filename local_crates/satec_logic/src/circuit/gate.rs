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

use std::fmt::Display;

/// The identifier of a signal inside a [`Circuit`](crate::Circuit).
///
/// Identifiers are dense indices, in the order signals were first mentioned while the circuit was built.
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct SignalId(usize);

impl From<usize> for SignalId {
    fn from(u: usize) -> Self {
        SignalId(u)
    }
}

impl From<SignalId> for usize {
    fn from(s: SignalId) -> Self {
        s.0
    }
}

/// The operation computed by a [`Gate`].
///
/// `Not` and `Buffer` are unary, constants take no input,
/// and the other operations take at least two inputs folded associatively.
/// The `N*` variants are the negations of their folded connective (`Xnor` is the negated parity).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
    Not,
    Buffer,
    Const0,
    Const1,
}

impl GateKind {
    /// Returns the gate kind matching a name, ignoring the case.
    ///
    /// Both `BUF` and `BUFF` denote a buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::GateKind;
    ///
    /// assert_eq!(Some(GateKind::Nand), GateKind::from_name("nand"));
    /// assert_eq!(Some(GateKind::Buffer), GateKind::from_name("BUFF"));
    /// assert_eq!(None, GateKind::from_name("DFF"));
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "AND" => Some(GateKind::And),
            "NAND" => Some(GateKind::Nand),
            "OR" => Some(GateKind::Or),
            "NOR" => Some(GateKind::Nor),
            "XOR" => Some(GateKind::Xor),
            "XNOR" => Some(GateKind::Xnor),
            "NOT" => Some(GateKind::Not),
            "BUF" | "BUFF" => Some(GateKind::Buffer),
            "CONST0" => Some(GateKind::Const0),
            "CONST1" => Some(GateKind::Const1),
            _ => None,
        }
    }

    /// Returns the canonical (upper case) name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Nand => "NAND",
            GateKind::Or => "OR",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
            GateKind::Not => "NOT",
            GateKind::Buffer => "BUFF",
            GateKind::Const0 => "CONST0",
            GateKind::Const1 => "CONST1",
        }
    }

    /// Checks the number of inputs of a gate of this kind.
    ///
    /// On failure, a description of the accepted arity is returned.
    pub(crate) fn check_arity(&self, n_inputs: usize) -> Result<(), &'static str> {
        let (ok, expected) = match self {
            GateKind::Not | GateKind::Buffer => (n_inputs == 1, "exactly 1"),
            GateKind::Const0 | GateKind::Const1 => (n_inputs == 0, "exactly 0"),
            _ => (n_inputs >= 2, "at least 2"),
        };
        if ok {
            Ok(())
        } else {
            Err(expected)
        }
    }

    /// Computes the output of a gate of this kind given its input values.
    ///
    /// The number of inputs is not checked here; see [`CircuitBuilder`](crate::CircuitBuilder).
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::GateKind;
    ///
    /// assert!(GateKind::Xor.eval(vec![true, true, true]));
    /// assert!(!GateKind::Nor.eval(vec![false, true]));
    /// assert!(GateKind::Not.eval(vec![false]));
    /// ```
    pub fn eval<I>(&self, inputs: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let mut inputs = inputs.into_iter();
        match self {
            GateKind::And | GateKind::Buffer => inputs.all(|b| b),
            GateKind::Nand | GateKind::Not => !inputs.all(|b| b),
            GateKind::Or => inputs.any(|b| b),
            GateKind::Nor => !inputs.any(|b| b),
            GateKind::Xor => inputs.fold(false, |acc, b| acc ^ b),
            GateKind::Xnor => !inputs.fold(false, |acc, b| acc ^ b),
            GateKind::Const0 => false,
            GateKind::Const1 => true,
        }
    }
}

impl Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A combinational gate: an operation, an ordered list of input signals and an output signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gate {
    kind: GateKind,
    inputs: Vec<SignalId>,
    output: SignalId,
}

impl Gate {
    pub(crate) fn new(kind: GateKind, inputs: Vec<SignalId>, output: SignalId) -> Self {
        Gate {
            kind,
            inputs,
            output,
        }
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn inputs(&self) -> &[SignalId] {
        &self.inputs
    }

    pub fn output(&self) -> SignalId {
        self.output
    }
}
