use std::io::{self, Write};
use std::process;

use tracing::Level;

use crate::args::ArgMatches;
use crate::error::Result;

macro_rules! err {
    ($($tt:tt)*) => {
        Err(crate::error::Error::Other(format!($($tt)*)))
    }
}

mod app;
mod args;
mod error;
mod writer;

mod derived_property;
mod enforce;
mod idempotence;

fn main() {
    if let Err(err) = run() {
        if err.is_broken_pipe() {
            process::exit(0);
        }
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = app::app().get_matches();
    let verbosity = match matches.subcommand() {
        (_, Some(m)) => {
            matches.occurrences_of("verbose").max(m.occurrences_of("verbose"))
        }
        (_, None) => matches.occurrences_of("verbose"),
    };
    init_logging(verbosity);

    match matches.subcommand() {
        ("enforce", Some(m)) => enforce::command(ArgMatches::new(m)),
        ("derived-property", Some(m)) => {
            derived_property::command(ArgMatches::new(m))
        }
        ("idempotence", Some(m)) => idempotence::command(ArgMatches::new(m)),
        ("profiles", Some(_)) => cmd_profiles(),
        ("", _) => {
            app::app().print_help()?;
            println!("");
            Ok(())
        }
        (unknown, _) => err!("unrecognized command: {}", unknown),
    }
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn cmd_profiles() -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    for name in precis_core::PROFILE_NAMES {
        writeln!(stdout, "{}", name)?;
    }
    stdout.flush()?;
    Ok(())
}
