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
use satec_logic::{Assignment, Circuit};
use std::io::Write;

pub(crate) struct SimulateCommand;

const CMD_NAME: &str = "simulate";

const ARG_ASSIGNMENT: &str = "ASSIGNMENT";
const ARG_ALL_SIGNALS: &str = "ALL_SIGNALS";

impl SimulateCommand {
    pub fn new() -> Self {
        SimulateCommand
    }
}

impl<'a> Command<'a> for SimulateCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Computes the values of the signals of a circuit given the values of its inputs.")
            .setting(AppSettings::DisableVersion)
            .arg(super::arg_input())
            .arg(super::arg_output())
            .arg(
                Arg::with_name(ARG_ASSIGNMENT)
                    .long("assignment")
                    .short("a")
                    .takes_value(true)
                    .allow_hyphen_values(true)
                    .help(r#"sets the input values, e.g. "a=1,b=0""#)
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_ALL_SIGNALS)
                    .long("all-signals")
                    .takes_value(false)
                    .help("prints all the signals instead of the outputs only"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let circuit = super::read_input_circuit(arg_matches)?;
        let inputs = parse_assignment(arg_matches.value_of(ARG_ASSIGNMENT).unwrap())
            .context("while reading the input assignment")?;
        let values = circuit.simulate(&inputs)?;
        info!("simulation done");
        let mut out = super::create_output(arg_matches)?;
        let signals = displayed_signals(&circuit, arg_matches.is_present(ARG_ALL_SIGNALS));
        for s in signals {
            writeln!(out, "{}={}", s, values[s] as u8)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn displayed_signals(circuit: &Circuit, all_signals: bool) -> Vec<&str> {
    if all_signals {
        circuit.signal_names().iter().map(|s| s.as_str()).collect()
    } else {
        circuit.outputs()
    }
}

/// Parses a comma-separated list of `name=value` pairs, where values are `0` or `1`.
pub(crate) fn parse_assignment(s: &str) -> Result<Assignment> {
    let mut assignment = Assignment::default();
    for pair in s.split(',').map(|p| p.trim()).filter(|p| !p.is_empty()) {
        let mut parts = pair.splitn(2, '=');
        let name = parts.next().unwrap_or_default().trim();
        let value = match parts.next().map(|v| v.trim()) {
            Some("0") => false,
            Some("1") => true,
            _ => return Err(anyhow!(r#"invalid input value in "{}""#, pair)),
        };
        if name.is_empty() {
            return Err(anyhow!(r#"missing signal name in "{}""#, pair));
        }
        if assignment.insert(name.to_string(), value).is_some() {
            return Err(anyhow!("multiple values given for signal {}", name));
        }
    }
    Ok(assignment)
}
