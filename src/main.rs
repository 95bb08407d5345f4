//! `ksort`: sort lines of text by a selected field
//!
//! Command-line front end for the `keyed_sort` library.

use std::process;
use clap::{Arg, ArgAction, Command};
use env_logger::Env;

// Import from the library modules
use keyed_sort::{
    config::{SortConfig, SortConfigBuilder, SortMode},
    error::{SortError, SortResult},
    sort,
    EXIT_SUCCESS,
};

fn main() {
    env_logger::Builder::from_env(Env::new().filter_or("KEYED_SORT_LOG", "warn")).init();

    let result = run();
    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e @ (SortError::NotSorted { .. } | SortError::Usage { .. })) => {
            eprintln!("{}", e);
            process::exit(e.exit_code());
        }
        Err(e) => {
            eprintln!("ksort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn run() -> SortResult<i32> {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) if e.use_stderr() => return Err(usage_error(&e)),
        Err(e) => {
            // --help and --version, printed on stdout
            e.print()?;
            return Ok(EXIT_SUCCESS);
        }
    };

    // Build configuration from command line arguments
    let config = parse_config_from_matches(&matches)?;
    log::debug!("configuration: {:?}", config);

    // Execute the sort operation
    sort(&config)
}

fn build_cli() -> Command {
    Command::new("ksort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("ksort [OPTION]... [FILE]")
        .about("Sort lines of text by a selected field")
        .long_about("Sort lines of text by a selected field.\n\nThe field is compared as text, as a number (-n), as a human-readable size (-h) or as a month name (-M). Fields that do not parse under the chosen mode sort after those that do. Lines with equal fields are ordered by the whole line.")
        .disable_help_flag(true)  // We use -h for human-numeric-sort
        .disable_version_flag(true)

        // Input file
        .arg(Arg::new("file")
            .help("Input file (use '-' or omit for stdin)")
            .value_name("FILE"))

        // Key selection
        .arg(Arg::new("key")
            .short('k')
            .long("key")
            .help("Sort by field N (1-based)")
            .value_name("N"))
        .arg(Arg::new("sep")
            .long("sep")
            .help("Use the literal string SEP as field separator (default: TAB)")
            .value_name("SEP")
            .allow_hyphen_values(true))
        .arg(Arg::new("ws")
            .long("ws")
            .help("Split fields on runs of whitespace")
            .action(ArgAction::SetTrue))

        // Sort modes (-h wins over -n, which wins over -M)
        .arg(Arg::new("numeric-sort")
            .short('n')
            .long("numeric-sort")
            .help("Compare according to numerical value")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("human-numeric-sort")
            .short('h')
            .long("human-numeric-sort")
            .help("Compare human readable sizes (e.g., 2K 1G 3MiB)")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("month-sort")
            .short('M')
            .long("month-sort")
            .help("Compare by month names (JAN < ... < DEC)")
            .action(ArgAction::SetTrue))

        // Sort modifiers
        .arg(Arg::new("reverse")
            .short('r')
            .long("reverse")
            .help("Reverse the result of comparisons")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("unique")
            .short('u')
            .long("unique")
            .help("Drop adjacent duplicate lines after sorting")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("ignore-trailing-blanks")
            .short('b')
            .long("ignore-trailing-blanks")
            .help("Ignore trailing spaces and tabs before splitting fields")
            .action(ArgAction::SetTrue))

        // Operation modes
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; do not sort")
            .action(ArgAction::SetTrue))

        // Add explicit help and version options since we disabled the automatic ones
        .arg(Arg::new("help")
            .long("help")
            .help("Display this help and exit")
            .action(ArgAction::Help))
        .arg(Arg::new("version")
            .long("version")
            .help("Output version information and exit")
            .action(ArgAction::Version))
}

/// Convert a clap parse failure into a usage error carrying clap's own
/// rendering (message, usage line and hint), without terminal styling.
fn usage_error(err: &clap::Error) -> SortError {
    let rendered = err.render().to_string();
    SortError::usage(rendered.trim_end())
}

/// Parse a `-k` value: a positive field number
fn parse_field_number(spec: &str) -> SortResult<usize> {
    match spec.parse::<usize>() {
        Ok(field) if field >= 1 => Ok(field),
        _ => Err(SortError::invalid_field_spec(spec)),
    }
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &clap::ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    // Requested modes; the builder settles conflicts by precedence
    if matches.get_flag("human-numeric-sort") {
        builder = builder.mode(SortMode::HumanNumeric);
    }
    if matches.get_flag("numeric-sort") {
        builder = builder.mode(SortMode::Numeric);
    }
    if matches.get_flag("month-sort") {
        builder = builder.mode(SortMode::Month);
    }

    if let Some(spec) = matches.get_one::<String>("key") {
        builder = builder.field(parse_field_number(spec)?);
    }

    // --ws overrides any separator
    if let Some(sep) = matches.get_one::<String>("sep") {
        builder = builder.separator(sep);
    }
    if matches.get_flag("ws") {
        builder = builder.whitespace();
    }

    // Apply boolean flags
    if matches.get_flag("reverse") {
        builder = builder.reverse();
    }
    if matches.get_flag("unique") {
        builder = builder.unique();
    }
    if matches.get_flag("ignore-trailing-blanks") {
        builder = builder.trim_trailing();
    }
    if matches.get_flag("check") {
        builder = builder.check();
    }

    if let Some(file) = matches.get_one::<String>("file") {
        builder = builder.input_file(file.clone());
    }

    builder.build()
}
