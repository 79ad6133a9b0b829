// satec_app_helper
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

use crate::{
    logging::{self, LOGGING_LEVELS},
    Command,
};
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg, ArgMatches};
use log::{error, info};

const ARG_LOGGING_LEVEL: &str = "LOGGING_LEVEL";

/// A command line application made of subcommands.
///
/// The helper adds a global `--logging-level` option, initializes the logger and dispatches the call to the selected [`Command`].
pub struct AppHelper<'a> {
    app_name: &'a str,
    version: &'a str,
    authors: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> AppHelper<'a> {
    pub fn new(app_name: &'a str, version: &'a str, authors: &'a str, about: &'a str) -> Self {
        AppHelper {
            app_name,
            version,
            authors,
            about,
            commands: vec![],
        }
    }

    /// Registers a new subcommand.
    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    fn clap_app(&self) -> App<'a, 'a> {
        let mut app = App::new(self.app_name)
            .version(self.version)
            .author(self.authors)
            .about(self.about)
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .setting(AppSettings::VersionlessSubcommands)
            .arg(
                Arg::with_name(ARG_LOGGING_LEVEL)
                    .long("logging-level")
                    .empty_values(false)
                    .multiple(false)
                    .possible_values(&LOGGING_LEVELS)
                    .default_value("info")
                    .global(true)
                    .help("set the minimal logging level"),
            );
        for command in self.commands.iter() {
            app = app.subcommand(command.clap_subcommand());
        }
        app
    }

    fn logging_level<'b>(matches: &'b ArgMatches<'_>) -> &'b str {
        matches
            .subcommand()
            .1
            .and_then(|m| m.value_of(ARG_LOGGING_LEVEL))
            .or_else(|| matches.value_of(ARG_LOGGING_LEVEL))
            .unwrap_or("info")
    }

    fn dispatch(&self, matches: &ArgMatches<'_>) -> Result<()> {
        let (name, sub_matches) = matches.subcommand();
        let command = self
            .commands
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| anyhow!("unknown command {}", name))?;
        let default_matches = ArgMatches::default();
        command.execute(sub_matches.unwrap_or(&default_matches))
    }

    /// Parses the command line arguments and executes the selected command.
    ///
    /// Errors are logged with their causes and make the process exit with status code 1.
    pub fn launch_app(self) {
        let matches = self.clap_app().get_matches();
        let level = logging::level_filter_of(Self::logging_level(&matches));
        if let Err(e) = logging::init_logger(self.app_name, level) {
            eprintln!("{:?}", e);
            std::process::exit(1);
        }
        info!("{} {}", self.app_name, self.version);
        if let Err(e) = self.dispatch(&matches) {
            error!("{}", e);
            e.chain().skip(1).for_each(|cause| error!("caused by: {}", cause));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::SubCommand;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingCommand {
        calls: Rc<Cell<usize>>,
    }

    impl<'a> Command<'a> for CountingCommand {
        fn name(&self) -> &str {
            "count"
        }

        fn clap_subcommand(&self) -> App<'a, 'a> {
            SubCommand::with_name("count").arg(Arg::with_name("N").short("n").takes_value(true))
        }

        fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
            match arg_matches.value_of("N") {
                Some("fail") => Err(anyhow!("failure requested")),
                _ => {
                    self.calls.set(self.calls.get() + 1);
                    Ok(())
                }
            }
        }
    }

    fn helper(calls: Rc<Cell<usize>>) -> AppHelper<'static> {
        let mut helper = AppHelper::new("app", "0.1.0", "nobody", "a test app");
        helper.add_command(Box::new(CountingCommand { calls }));
        helper
    }

    #[test]
    fn test_dispatch() {
        let calls = Rc::new(Cell::new(0));
        let helper = helper(Rc::clone(&calls));
        let matches = helper
            .clap_app()
            .get_matches_from_safe(vec!["app", "count", "-n", "1"])
            .unwrap();
        helper.dispatch(&matches).unwrap();
        assert_eq!(1, calls.get());
    }

    #[test]
    fn test_dispatch_error() {
        let calls = Rc::new(Cell::new(0));
        let helper = helper(Rc::clone(&calls));
        let matches = helper
            .clap_app()
            .get_matches_from_safe(vec!["app", "count", "-n", "fail"])
            .unwrap();
        assert_eq!(
            "failure requested",
            helper.dispatch(&matches).unwrap_err().to_string()
        );
        assert_eq!(0, calls.get());
    }

    #[test]
    fn test_global_logging_level() {
        let helper = helper(Rc::new(Cell::new(0)));
        let matches = helper
            .clap_app()
            .get_matches_from_safe(vec!["app", "count", "--logging-level", "debug"])
            .unwrap();
        assert_eq!("debug", AppHelper::logging_level(&matches));
        let matches = helper
            .clap_app()
            .get_matches_from_safe(vec!["app", "count"])
            .unwrap();
        assert_eq!("info", AppHelper::logging_level(&matches));
    }

    #[test]
    fn test_wrong_logging_level() {
        let helper = helper(Rc::new(Cell::new(0)));
        assert!(helper
            .clap_app()
            .get_matches_from_safe(vec!["app", "--logging-level", "loud", "count"])
            .is_err());
    }
}
