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

use anyhow::Result;
use satec_app_helper::{info, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use satec_logic::{DimacsWriter, TseitinEncoder};

pub(crate) struct EncodeCommand;

const CMD_NAME: &str = "encode";

const ARG_SIGNAL_NAMES: &str = "SIGNAL_NAMES";

impl EncodeCommand {
    pub fn new() -> Self {
        EncodeCommand
    }
}

impl<'a> Command<'a> for EncodeCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Translates a circuit into a DIMACS CNF formula by means of the Tseitin encoding.")
            .setting(AppSettings::DisableVersion)
            .arg(super::arg_input())
            .arg(super::arg_output())
            .arg(
                Arg::with_name(ARG_SIGNAL_NAMES)
                    .long("signal-names")
                    .takes_value(false)
                    .help("writes the signal associated with each variable as a comment"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let circuit = super::read_input_circuit(arg_matches)?;
        let encoding = TseitinEncoder::encode(&circuit);
        info!(
            "encoding has {} variable(s) and {} clause(s)",
            encoding.formula().n_vars(),
            encoding.formula().n_clauses()
        );
        let mut writer = DimacsWriter::new();
        writer.display_signal_names(arg_matches.is_present(ARG_SIGNAL_NAMES));
        writer.write_encoding(&encoding, super::create_output(arg_matches)?.as_mut())
    }
}
