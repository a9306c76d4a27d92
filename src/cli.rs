use std::path::{Path, PathBuf};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use nmea2kml::ConvertOptions;

#[derive(Debug, Clone)]
pub struct Cli {
    matches: ArgMatches,
}

impl Cli {
    pub fn new() -> Self {
        Self::from_matches(Self::command().get_matches())
    }

    fn from_matches(matches: ArgMatches) -> Self {
        Self { matches }
    }

    fn command() -> Command {
        Command::new("nmea2kml")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Converts a log of NMEA sentences into a KML path")
            .arg(
                Arg::new("input")
                    .value_name("FILEPATH")
                    .value_parser(value_parser!(PathBuf))
                    .help("Input NMEA log, standard input when omitted or \"-\""),
            )
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FILEPATH")
                    .value_parser(value_parser!(PathBuf))
                    .help("Output KML file, standard output when omitted"),
            )
            .next_help_heading("KML content")
            .arg(
                Arg::new("name")
                    .short('n')
                    .long("name")
                    .value_name("NAME")
                    .help("Document name, defaults to the input file name"),
            )
            .arg(
                Arg::new("drop-last")
                    .long("drop-last")
                    .action(ArgAction::SetTrue)
                    .help("Do not emit the point still in progress when the input ends"),
            )
    }

    /// Returns input file path, `None` for standard input
    pub fn input(&self) -> Option<&Path> {
        self.matches.get_one::<PathBuf>("input").map(PathBuf::as_path)
    }

    /// Returns output file path, `None` for standard output
    pub fn output(&self) -> Option<&Path> {
        self.matches.get_one::<PathBuf>("output").map(PathBuf::as_path)
    }

    /// Returns the conversion options selected on the command line
    pub fn options(&self) -> ConvertOptions {
        let mut options = match self.input() {
            Some(path) if path != Path::new("-") => ConvertOptions::for_input(path),
            _ => ConvertOptions::default(),
        };

        if let Some(name) = self.matches.get_one::<String>("name") {
            options.name = name.clone();
        }
        options.flush_last = !self.matches.get_flag("drop-last");
        options
    }
}
