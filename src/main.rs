use clap::{crate_version, App, Arg, ArgMatches, ErrorKind};
use log::{debug, LevelFilter};
use std::fs;
use std::io;
use std::process;

fn main() {
    let matches = match app().get_matches_safe() {
        Ok(matches) => matches,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
            _ => {
                eprintln!("{}", e.message);
                process::exit(64);
            }
        },
    };
    init_logging(matches.occurrences_of("verbose"));
    process::exit(run_file(&matches));
}

fn app() -> App<'static, 'static> {
    App::new("rgr")
        .version(crate_version!())
        .about("Runs a program written in the rgr scripting language")
        .arg(
            Arg::with_name("SCRIPT")
                .help("Path of the program to run")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("ast")
                .long("ast")
                .help("Print the parsed program instead of running it"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increases log verbosity; repeat for more"),
        )
}

fn init_logging(occurrences: u64) {
    let level = match occurrences {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .init();
}

fn run_file(matches: &ArgMatches) -> i32 {
    let file = match matches.value_of("SCRIPT") {
        Some(file) => file,
        None => {
            eprintln!("{}", matches.usage());
            return 64;
        }
    };
    let source = match fs::read_to_string(file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: could not read '{}': {}", file, e);
            return 66;
        }
    };
    debug!("read {} bytes from {}", source.len(), file);

    let stdout = io::stdout();
    let result = if matches.is_present("ast") {
        rgr::print_ast(&source, stdout.lock())
    } else {
        rgr::run(&source, stdout.lock())
    };
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}
