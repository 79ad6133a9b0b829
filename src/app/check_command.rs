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

use anyhow::{anyhow, Result};
use satec_app_helper::{info, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use satec_logic::{equivalence, Circuit, EquivalenceCheckResult, Solution};
use std::io::Write;

pub(crate) struct CheckCommand;

const CMD_NAME: &str = "check";

const ARG_FIRST: &str = "FIRST";
const ARG_SECOND: &str = "SECOND";

impl CheckCommand {
    pub fn new() -> Self {
        CheckCommand
    }
}

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks whether two circuits are equivalent.")
            .setting(AppSettings::DisableVersion)
            .arg(
                Arg::with_name(ARG_FIRST)
                    .short("a")
                    .takes_value(true)
                    .help("sets the first bench file")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_SECOND)
                    .short("b")
                    .takes_value(true)
                    .help("sets the second bench file")
                    .required(true),
            )
            .arg(super::arg_output())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let circuit_a = super::read_circuit(arg_matches.value_of(ARG_FIRST).unwrap())?;
        let circuit_b = super::read_circuit(arg_matches.value_of(ARG_SECOND).unwrap())?;
        let result = equivalence::check(&circuit_a, &circuit_b)?;
        let mut out = super::create_output(arg_matches)?;
        match result {
            EquivalenceCheckResult::Equivalent => {
                info!("the circuits are equivalent");
                writeln!(out, "EQUIVALENT")?;
            }
            EquivalenceCheckResult::NotEquivalent(cex) => {
                info!("the circuits are not equivalent");
                let differing = differing_outputs(&circuit_a, &circuit_b, &cex)?;
                if differing.is_empty() {
                    return Err(anyhow!(
                        r#"counterexample "{}" does not distinguish the circuits"#,
                        cex
                    ));
                }
                writeln!(out, "NOT EQUIVALENT")?;
                writeln!(out, "{}", cex)?;
                info!("outputs differing on the counterexample: {}", differing.join(", "));
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// Returns the outputs on which the circuits disagree under the given input assignment.
fn differing_outputs<'a>(
    circuit_a: &'a Circuit,
    circuit_b: &Circuit,
    inputs: &Solution,
) -> Result<Vec<&'a str>> {
    let assignment = inputs.to_assignment();
    let values_a = circuit_a.simulate(&assignment)?;
    let values_b = circuit_b.simulate(&assignment)?;
    Ok(circuit_a
        .outputs()
        .into_iter()
        .filter(|o| values_a[*o] != values_b[*o])
        .collect())
}
