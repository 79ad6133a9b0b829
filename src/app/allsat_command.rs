// satec
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

use anyhow::{anyhow, Context, Result};
use satec_app_helper::{info, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use satec_logic::{AllSatEnumerator, Circuit, Solution, TseitinEncoder};
use std::io::Write;

pub(crate) struct AllSatCommand;

const CMD_NAME: &str = "allsat";

const ARG_INPUTS_ONLY: &str = "INPUTS_ONLY";
const ARG_LIMIT: &str = "LIMIT";
const ARG_VALIDATE: &str = "VALIDATE";

impl AllSatCommand {
    pub fn new() -> Self {
        AllSatCommand
    }
}

impl<'a> Command<'a> for AllSatCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Enumerates the consistent evaluations of a circuit.")
            .setting(AppSettings::DisableVersion)
            .arg(super::arg_input())
            .arg(super::arg_output())
            .arg(
                Arg::with_name(ARG_INPUTS_ONLY)
                    .long("inputs-only")
                    .takes_value(false)
                    .help("projects the solutions on the primary inputs"),
            )
            .arg(
                Arg::with_name(ARG_LIMIT)
                    .long("limit")
                    .short("l")
                    .takes_value(true)
                    .help("sets the maximal number of solutions to print"),
            )
            .arg(
                Arg::with_name(ARG_VALIDATE)
                    .long("validate")
                    .takes_value(false)
                    .help("checks each solution by simulating the circuit"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let limit = match arg_matches.value_of(ARG_LIMIT) {
            Some(l) => Some(
                l.parse::<usize>()
                    .with_context(|| format!(r#"while parsing the solution limit "{}""#, l))?,
            ),
            None => None,
        };
        let circuit = super::read_input_circuit(arg_matches)?;
        let encoding = TseitinEncoder::encode(&circuit);
        let enumerator = if arg_matches.is_present(ARG_INPUTS_ONLY) {
            AllSatEnumerator::with_projection(&encoding, &circuit.inputs())?
        } else {
            AllSatEnumerator::new(&encoding)
        };
        let validate = arg_matches.is_present(ARG_VALIDATE);
        let mut out = super::create_output(arg_matches)?;
        let mut n_solutions = 0;
        for solution in enumerator.take(limit.unwrap_or(usize::MAX)) {
            if validate {
                validate_solution(&circuit, &solution)?;
            }
            writeln!(out, "{}", solution)?;
            n_solutions += 1;
        }
        out.flush()?;
        info!("found {} solution(s)", n_solutions);
        Ok(())
    }
}

/// Checks a solution against a simulation of the circuit from the input values it contains.
fn validate_solution(circuit: &Circuit, solution: &Solution) -> Result<()> {
    let values = circuit
        .simulate(&solution.to_assignment())
        .with_context(|| format!(r#"while validating solution "{}""#, solution))?;
    match solution.iter().find(|(name, value)| values[*name] != *value) {
        Some((name, _)) => Err(anyhow!(
            r#"solution "{}" does not match the simulation on signal {}"#,
            solution,
            name
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satec_logic::{BenchReader, LiteralVec, Projection, VarId};

    fn solution(values: &[(&str, bool)]) -> Solution {
        let projection = Projection::new(
            values
                .iter()
                .enumerate()
                .map(|(i, (n, _))| (n.to_string(), VarId::from(i)))
                .collect(),
        );
        let model = values
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (i, *v))
            .collect::<Vec<(usize, bool)>>();
        Solution::from_model(&LiteralVec::from(model), &projection)
    }

    #[test]
    fn test_validate_solution() {
        let circuit = BenchReader::default()
            .read(&mut "INPUT(a)\nINPUT(b)\nOUTPUT(z)\nz = AND(a, b)\n".as_bytes())
            .unwrap();
        validate_solution(&circuit, &solution(&[("a", true), ("b", true), ("z", true)])).unwrap();
        validate_solution(&circuit, &solution(&[("a", true), ("b", false)])).unwrap();
        assert_eq!(
            r#"solution "a=1 b=0 z=1" does not match the simulation on signal z"#,
            validate_solution(&circuit, &solution(&[("a", true), ("b", false), ("z", true)]))
                .unwrap_err()
                .to_string()
        );
        assert_eq!(
            vec![
                r#"while validating solution "a=1 z=1""#.to_string(),
                "no value given for input signal b".to_string()
            ],
            validate_solution(&circuit, &solution(&[("a", true), ("z", true)]))
                .unwrap_err()
                .chain()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
        );
    }
}
