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

use anyhow::{Context, Result};
use satec_app_helper::{info, warn, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use satec_logic::BenchReader;
use std::{fs::File, path::PathBuf};

const CMD_NAME: &str = "bench_check";

#[derive(Default)]
pub(crate) struct BenchCheckCommand();

impl<'a> Command<'a> for BenchCheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("check a bench file")
            .setting(AppSettings::DisableVersion)
            .arg(
                Arg::with_name("INPUT_FILE")
                    .help("Sets the input file to check")
                    .required(true),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let str_path = arg_matches.value_of("INPUT_FILE").unwrap();
        self.execute_internal(str_path)
    }
}

impl BenchCheckCommand {
    fn execute_internal(&self, str_path: &str) -> Result<()> {
        info!("executing bench checker");
        info!("input file is {}", str_path);
        let path = PathBuf::from(str_path);
        let mut file_reader =
            File::open(&path).with_context(|| format!("while opening file {}", &path.display()))?;
        let mut bench_reader = BenchReader::default();
        let mut warning_counter = 0;
        let mut warning_handler = |line: usize, reason: String| {
            warn!("line {}: {}", line, reason);
            warning_counter += 1;
        };
        bench_reader.add_warning_handler(&mut warning_handler);
        let circuit = bench_reader.read(&mut file_reader)?;
        drop(bench_reader);
        info!("instance was read without errors");
        match warning_counter {
            0 => info!("no warnings were found"),
            n => info!("got {} warning(s)", n),
        }
        info!(
            "instance contains {} input(s), {} output(s) and {} gate(s)",
            circuit.inputs().len(),
            circuit.outputs().len(),
            circuit.gates().len()
        );
        Ok(())
    }
}
