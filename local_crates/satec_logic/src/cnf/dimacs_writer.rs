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

use crate::{CircuitEncoding, CnfFormula, Literal};
use anyhow::Result;
use std::io::Write;

/// A writer for the DIMACS CNF format.
///
/// Variables are shifted by one, since DIMACS variables start at 1.
/// When the formula comes from a circuit, the signal names may be written as comment lines
/// (`c <variable> <signal>`) before the header.
///
/// # Example
///
/// ```
/// use satec_logic::{BenchReader, DimacsWriter, TseitinEncoder};
///
/// let circuit = BenchReader::default()
///     .read(&mut "INPUT(a)\nOUTPUT(z)\nz = NOT(a)\n".as_bytes())
///     .unwrap();
/// let encoding = TseitinEncoder::encode(&circuit);
/// let mut out = Vec::new();
/// let mut writer = DimacsWriter::new();
/// writer.display_signal_names(true);
/// writer.write_encoding(&encoding, &mut out).unwrap();
/// assert_eq!(
///     "c 1 a\nc 2 z\np cnf 2 2\n1 2 0\n-1 -2 0\n",
///     String::from_utf8(out).unwrap()
/// );
/// ```
#[derive(Default)]
pub struct DimacsWriter {
    signal_names: bool,
}

impl DimacsWriter {
    /// Creates a new `DimacsWriter` with default parameters.
    ///
    /// By default, the signal names are not written.
    pub fn new() -> Self {
        DimacsWriter::default()
    }

    /// Enables/disables the comment lines giving the signal of each variable.
    pub fn display_signal_names(&mut self, display: bool) {
        self.signal_names = display
    }

    /// Writes the formula of a circuit encoding.
    pub fn write_encoding(&self, encoding: &CircuitEncoding, writer: &mut dyn Write) -> Result<()> {
        if self.signal_names {
            for (name, var) in encoding.var_map().iter() {
                writeln!(writer, "c {} {}", usize::from(var) + 1, name)?;
            }
        }
        self.write_formula(encoding.formula(), writer)
    }

    /// Writes a formula.
    ///
    /// A formula containing the empty clause is written with an explicit empty clause (a line made of `0`).
    pub fn write_formula(&self, formula: &CnfFormula, writer: &mut dyn Write) -> Result<()> {
        let n_clauses = formula.n_clauses() + formula.has_empty_clause() as usize;
        writeln!(writer, "p cnf {} {}", formula.n_vars(), n_clauses)?;
        for clause in formula.as_clauses() {
            for lit in clause.as_literals() {
                write!(writer, "{} ", dimacs_literal(*lit))?;
            }
            writeln!(writer, "0")?;
        }
        if formula.has_empty_clause() {
            writeln!(writer, "0")?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn dimacs_literal(lit: Literal) -> isize {
    let var = usize::from(lit.var_id()) as isize + 1;
    if lit.polarity() {
        var
    } else {
        -var
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Clause, MaybeTrivial};

    #[test]
    fn test_write_formula() {
        let mut cnf = CnfFormula::new();
        cnf.add_maybe_trivial_clause(MaybeTrivial::<Clause>::from(vec![(0, false), (2, true)]));
        cnf.add_maybe_trivial_clause(MaybeTrivial::<Clause>::from(vec![(1, true)]));
        cnf.ensure_n_vars(4);
        let mut out = Vec::new();
        DimacsWriter::new().write_formula(&cnf, &mut out).unwrap();
        assert_eq!("p cnf 4 2\n-1 3 0\n2 0\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn test_write_empty_clause() {
        let mut cnf = CnfFormula::new();
        cnf.add_maybe_trivial_clause(MaybeTrivial::<Clause>::from(vec![(0, true)]));
        cnf.add_maybe_trivial_clause(MaybeTrivial::<Clause>::from(Vec::<(usize, bool)>::new()));
        let mut out = Vec::new();
        DimacsWriter::new().write_formula(&cnf, &mut out).unwrap();
        assert_eq!("p cnf 1 2\n1 0\n0\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn test_write_encoding_without_names() {
        let circuit = crate::BenchReader::default()
            .read(&mut "INPUT(a)\nk = CONST1()\n".as_bytes())
            .unwrap();
        let encoding = crate::TseitinEncoder::encode(&circuit);
        let mut out = Vec::new();
        DimacsWriter::new()
            .write_encoding(&encoding, &mut out)
            .unwrap();
        assert_eq!("p cnf 2 1\n2 0\n", String::from_utf8(out).unwrap());
    }
}
