use std::process;

use log::debug;

use nmea2kml::convert::{self, open_input, open_output};

mod cli;
use cli::Cli;

fn main() {
    env_logger::init();

    let cli = Cli::new();
    if let Err(err) = run(&cli) {
        debug!("{:?}", err);
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), convert::Error> {
    let options = cli.options();

    // the input is opened first, so that nothing is written when it is missing
    let input = open_input(cli.input())?;
    let output = open_output(cli.output())?;

    convert::convert(input, output, &options)?;
    Ok(())
}
