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

mod allsat_command;
pub(crate) use allsat_command::AllSatCommand;

mod bench_check_command;
pub(crate) use bench_check_command::BenchCheckCommand;

mod check_command;
pub(crate) use check_command::CheckCommand;

mod encode_command;
pub(crate) use encode_command::EncodeCommand;

mod simulate_command;
pub(crate) use simulate_command::SimulateCommand;

use anyhow::{Context, Result};
use fs::File;
use satec_app_helper::{info, warn, Arg, ArgMatches};
use satec_logic::{BenchReader, Circuit};
use std::path::PathBuf;
use std::{fs, io::Write};

const ARG_INPUT: &str = "INPUT";
const ARG_OUTPUT: &str = "OUTPUT";

pub(crate) fn arg_input<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_INPUT)
        .long("input")
        .short("i")
        .takes_value(true)
        .help("sets the bench input file")
        .required(true)
}

/// Reads the circuit given by the input argument, logging the warnings raised by the reader.
pub(crate) fn read_input_circuit(arg_matches: &ArgMatches<'_>) -> Result<Circuit> {
    read_circuit(arg_matches.value_of(ARG_INPUT).unwrap())
}

pub(crate) fn read_circuit(file_path: &str) -> Result<Circuit> {
    info!("reading input file {}", canonicalize(file_path));
    let mut file =
        File::open(file_path).with_context(|| format!(r#"while opening file "{}""#, file_path))?;
    let mut reader = BenchReader::default();
    let mut warning_handler = |line: usize, reason: String| {
        warn!("{}, line {}: {}", file_path, line, reason);
    };
    reader.add_warning_handler(&mut warning_handler);
    reader
        .read(&mut file)
        .with_context(|| format!(r#"while reading file "{}""#, file_path))
}

pub(crate) fn arg_output<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_OUTPUT)
        .long("output")
        .short("o")
        .takes_value(true)
        .help("sets the output file (defaults to STDOUT)")
}

pub(crate) fn create_output(arg_matches: &ArgMatches<'_>) -> Result<Box<dyn Write>> {
    Ok(match arg_matches.value_of(ARG_OUTPUT) {
        Some(o) => {
            let r = Box::new(
                File::create(o).with_context(|| format!(r#"while creating file "{}""#, o))?,
            );
            info!("setting output file to {}", canonicalize(o));
            r
        }
        None => {
            info!("setting output to STDOUT");
            Box::new(std::io::stdout())
        }
    })
}

pub(crate) fn canonicalize(file_path: &str) -> String {
    match fs::canonicalize(&PathBuf::from(file_path)) {
        Ok(p) => format!("{}", p.display()),
        Err(_) => file_path.to_string(),
    }
}
