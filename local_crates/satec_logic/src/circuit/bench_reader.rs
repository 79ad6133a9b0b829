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

use super::{Circuit, CircuitBuilder, GateKind};
use crate::CircuitError;
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::{BufRead, BufReader, Read};

const SIGNAL_PATTERN: &str = r"[^\s()=,#]+";

lazy_static! {
    static ref IO_LINE_PATTERN: Regex = Regex::new(&format!(
        r"^(?i:(INPUT|OUTPUT))\s*\(\s*({})\s*\)$",
        SIGNAL_PATTERN
    ))
    .unwrap();
    static ref GATE_LINE_PATTERN: Regex = Regex::new(&format!(
        r"^({})\s*=\s*([[:alpha:]][[:alnum:]_]*)\s*\(([^()]*)\)$",
        SIGNAL_PATTERN
    ))
    .unwrap();
    static ref SIGNAL_REGEX: Regex = Regex::new(&format!("^{}$", SIGNAL_PATTERN)).unwrap();
}

/// A reader for circuits written in the ISCAS `.bench` format.
///
/// Each non empty line holds a single statement; `#` starts a comment.
///
/// ```text
/// # a 2-input AND gate
/// INPUT(a)
/// INPUT(b)
/// OUTPUT(z)
/// z = AND(a, b)
/// ```
///
/// Keywords and gate names are case insensitive.
/// The supported gates are `AND`, `NAND`, `OR`, `NOR`, `XOR`, `XNOR`, `NOT`, `BUF`/`BUFF`, `CONST0()` and `CONST1()`.
/// Sequential elements (`DFF`) are rejected.
///
/// Warnings may be collected by registering handlers; they receive the (1-based) line number and a message.
///
/// # Examples
///
/// ```
/// use satec_logic::BenchReader;
///
/// let mut reader = BenchReader::default();
/// let circuit = reader.read(&mut "INPUT(a)\nOUTPUT(z)\nz = NOT(a)\n".as_bytes()).unwrap();
/// assert_eq!(vec!["a"], circuit.inputs());
/// assert_eq!(vec!["z"], circuit.outputs());
/// ```
#[derive(Default)]
pub struct BenchReader<'a> {
    warning_handlers: Vec<&'a mut dyn FnMut(usize, String)>,
}

impl<'a> BenchReader<'a> {
    /// Registers a function called each time a warning is raised.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::BenchReader;
    ///
    /// let mut warnings = vec![];
    /// let mut handler = |line: usize, message: String| warnings.push((line, message));
    /// let mut reader = BenchReader::default();
    /// reader.add_warning_handler(&mut handler);
    /// reader
    ///     .read(&mut "INPUT(a)\nOUTPUT(a)\nOUTPUT(a)\n".as_bytes())
    ///     .unwrap();
    /// drop(reader);
    /// assert_eq!(
    ///     vec![(3, "signal a is declared as an output more than once".to_string())],
    ///     warnings
    /// );
    /// ```
    pub fn add_warning_handler(&mut self, h: &'a mut dyn FnMut(usize, String)) {
        self.warning_handlers.push(h);
    }

    fn warn(&mut self, line: usize, message: String) {
        for h in self.warning_handlers.iter_mut() {
            (h)(line, message.clone());
        }
    }

    /// Reads a circuit.
    ///
    /// Syntax errors are returned as [`CircuitError::Parse`] errors;
    /// structural errors (cycles, undefined signals, ...) as [`CircuitError::Format`] errors.
    pub fn read(&mut self, reader: &mut dyn Read) -> Result<Circuit> {
        let mut builder = CircuitBuilder::new();
        let mut gate_lines = FxHashMap::default();
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let line_number = i + 1;
            let l = line.with_context(|| format!("while reading line {}", line_number))?;
            let statement = match l.find('#') {
                Some(index) => &l[..index],
                None => l.as_str(),
            }
            .trim();
            if statement.is_empty() {
                continue;
            }
            self.read_statement(&mut builder, &mut gate_lines, statement, line_number)?;
        }
        let mut gate_lines = gate_lines.into_iter().collect::<Vec<(String, usize)>>();
        gate_lines.sort_unstable_by_key(|(_, line)| *line);
        let circuit = builder.build().context("while building the circuit")?;
        self.warn_unused_signals(&circuit, &gate_lines);
        Ok(circuit)
    }

    fn read_statement(
        &mut self,
        builder: &mut CircuitBuilder,
        gate_lines: &mut FxHashMap<String, usize>,
        statement: &str,
        line: usize,
    ) -> Result<()> {
        let at_line = |e: CircuitError| match e {
            CircuitError::Format(f) => CircuitError::Parse {
                line,
                reason: f.to_string(),
            },
            other => other,
        };
        if let Some(c) = IO_LINE_PATTERN.captures(statement) {
            let signal = &c[2];
            if c[1].eq_ignore_ascii_case("INPUT") {
                builder.add_input(signal).map_err(at_line)?;
            } else if builder.is_output(signal) {
                self.warn(
                    line,
                    format!("signal {} is declared as an output more than once", signal),
                );
            } else {
                builder.add_output(signal).map_err(at_line)?;
            }
            return Ok(());
        }
        if let Some(c) = GATE_LINE_PATTERN.captures(statement) {
            let output = &c[1];
            let kind = match GateKind::from_name(&c[2]) {
                Some(k) => k,
                None if c[2].eq_ignore_ascii_case("DFF") => {
                    return Err(parse_error(
                        line,
                        format!(
                            "sequential element {} is not supported in combinational circuits",
                            &c[2]
                        ),
                    ))
                }
                None => return Err(parse_error(line, format!("unknown gate type {}", &c[2]))),
            };
            let inputs = split_arguments(&c[3], line)?;
            builder
                .add_gate(kind, output, &inputs)
                .map_err(at_line)?;
            gate_lines.insert(output.to_string(), line);
            return Ok(());
        }
        Err(parse_error(line, format!(r#"syntax error in "{}""#, statement)))
    }

    fn warn_unused_signals(&mut self, circuit: &Circuit, gate_lines: &[(String, usize)]) {
        let mut used = FxHashSet::default();
        circuit
            .gates()
            .iter()
            .flat_map(|g| g.inputs().iter())
            .chain(circuit.output_ids().iter())
            .for_each(|s| {
                used.insert(*s);
            });
        for (name, line) in gate_lines {
            let unused = circuit
                .signal_id(name)
                .map(|id| !used.contains(&id))
                .unwrap_or(false);
            if unused {
                self.warn(
                    *line,
                    format!("signal {} is neither read nor an output", name),
                );
            }
        }
    }
}

fn parse_error(line: usize, reason: String) -> anyhow::Error {
    CircuitError::Parse { line, reason }.into()
}

fn split_arguments(arguments: &str, line: usize) -> Result<Vec<&str>> {
    if arguments.trim().is_empty() {
        return Ok(vec![]);
    }
    arguments
        .split(',')
        .map(|a| {
            let signal = a.trim();
            if SIGNAL_REGEX.is_match(signal) {
                Ok(signal)
            } else {
                Err(parse_error(
                    line,
                    format!(r#"invalid gate argument "{}""#, signal),
                ))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Assignment, FormatError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read_str(content: &str) -> Result<Circuit> {
        BenchReader::default().read(&mut content.as_bytes())
    }

    fn read_err(content: &str) -> CircuitError {
        read_str(content)
            .unwrap_err()
            .downcast_ref::<CircuitError>()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_read_ok() {
        let circuit = read_str(
            "# full adder\nINPUT(a)\nINPUT(b)\nINPUT(cin)\nOUTPUT(s)\nOUTPUT(cout)\n\nt = XOR(a, b)\ns = XOR(t, cin)\nu = AND(a, b)\nv = AND(t, cin)\ncout = OR(u, v)  # carry\n",
        )
        .unwrap();
        assert_eq!(vec!["a", "b", "cin"], circuit.inputs());
        assert_eq!(vec!["s", "cout"], circuit.outputs());
        assert_eq!(5, circuit.gates().len());
        let inputs = vec![("a", true), ("b", true), ("cin", true)]
            .into_iter()
            .map(|(n, v)| (n.to_string(), v))
            .collect::<Assignment>();
        let result = circuit.simulate(&inputs).unwrap();
        assert!(result["s"]);
        assert!(result["cout"]);
    }

    #[test]
    fn test_read_case_and_spaces() {
        let circuit =
            read_str("input( G1 )\n  Input(G2)\noutput(G5)\nG5=nand( G1 ,G2 )\nk = const1()\n")
                .unwrap();
        assert_eq!(vec!["G1", "G2"], circuit.inputs());
        assert_eq!(2, circuit.gates().len());
    }

    #[test]
    fn test_read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("INPUT(1)\nOUTPUT(3)\n3 = BUFF(1)\n".as_bytes())
            .unwrap();
        let circuit = BenchReader::default()
            .read(&mut std::fs::File::open(file.path()).unwrap())
            .unwrap();
        assert_eq!(vec!["1"], circuit.inputs());
        assert_eq!(vec!["3"], circuit.outputs());
    }

    #[test]
    fn test_syntax_error() {
        assert_eq!(
            CircuitError::Parse {
                line: 2,
                reason: r#"syntax error in "OUTPUT z""#.to_string()
            },
            read_err("INPUT(a)\nOUTPUT z\n")
        );
    }

    #[test]
    fn test_unknown_gate() {
        assert_eq!(
            CircuitError::Parse {
                line: 3,
                reason: "unknown gate type MUX".to_string()
            },
            read_err("INPUT(a)\nINPUT(b)\nz = MUX(a, b)\n")
        );
    }

    #[test]
    fn test_dff_rejected() {
        assert_eq!(
            CircuitError::Parse {
                line: 2,
                reason: "sequential element DFF is not supported in combinational circuits"
                    .to_string()
            },
            read_err("INPUT(a)\nq = DFF(a)\n")
        );
    }

    #[test]
    fn test_empty_argument() {
        assert_eq!(
            CircuitError::Parse {
                line: 1,
                reason: r#"invalid gate argument """#.to_string()
            },
            read_err("z = AND(a, )\n")
        );
    }

    #[test]
    fn test_duplicate_definition_has_line() {
        assert_eq!(
            CircuitError::Parse {
                line: 3,
                reason: "multiple definitions of signal a".to_string()
            },
            read_err("INPUT(a)\nINPUT(b)\na = NOT(b)\n")
        );
    }

    #[test]
    fn test_arity_has_line() {
        assert_eq!(
            CircuitError::Parse {
                line: 2,
                reason: "the NOT gate driving z expects exactly 1 input(s), got 2".to_string()
            },
            read_err("INPUT(a)\nz = NOT(a, a)\n")
        );
    }

    #[test]
    fn test_cycle_is_format_error() {
        let err = read_str("INPUT(a)\nOUTPUT(x)\nx = AND(a, y)\ny = NOT(x)\n").unwrap_err();
        assert_eq!(
            vec![
                "while building the circuit".to_string(),
                "combinational cycle through signal x".to_string()
            ],
            err.chain().map(|e| format!("{}", e)).collect::<Vec<String>>()
        );
        assert_eq!(
            &CircuitError::Format(FormatError::Cycle("x".to_string())),
            err.downcast_ref::<CircuitError>().unwrap()
        );
    }

    #[test]
    fn test_dangling_reference() {
        assert_eq!(
            CircuitError::Format(FormatError::DanglingReference {
                signal: "c".to_string(),
                gate: "z".to_string()
            }),
            read_err("INPUT(a)\nOUTPUT(z)\nz = OR(a, c)\n")
        );
    }

    #[test]
    fn test_warnings() {
        let mut warnings = vec![];
        let mut handler = |line: usize, message: String| warnings.push((line, message));
        let mut reader = BenchReader::default();
        reader.add_warning_handler(&mut handler);
        reader
            .read(
                &mut "INPUT(a)\nOUTPUT(z)\nOUTPUT(z)\nz = NOT(a)\nu = BUFF(a)\nw = NOT(u)\n"
                    .as_bytes(),
            )
            .unwrap();
        drop(reader);
        assert_eq!(
            vec![
                (
                    3,
                    "signal z is declared as an output more than once".to_string()
                ),
                (6, "signal w is neither read nor an output".to_string()),
            ],
            warnings
        );
    }
}
