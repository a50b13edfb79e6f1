//! Command-line front end of the `logwire` binary.
//!
//! The binary initialises a [`Context`] from the command line, optionally
//! emits one message through a configured logger, then prints where the
//! configuration came from followed by the effective configuration.
//!
//! [`run`] operates on [`Context::global`]; [`run_in`] takes an explicit
//! context so callers and tests can keep their own.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::builder::OsStringValueParser;
use clap::{Arg, ArgAction, Command};
use logging::Level;
use logging_config::ConfigStore;
use logging_config::keys::ROOT_LOGGER_NAME;
use orchestrator::Context;

const PROGRAM_NAME: &str = "logwire";

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for invalid arguments or a failed initialisation.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    config: Option<PathBuf>,
    settings: Vec<String>,
    no_color: bool,
    logger: Option<String>,
    message: Option<String>,
    level: Option<String>,
}

fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Read the logging configuration from FILE.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .short('s')
                .value_name("KEY=VALUE")
                .help("Set one configuration entry; may be repeated.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable level coloring on the console.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("logger")
                .long("logger")
                .short('l')
                .value_name("NAME")
                .help("Logger that receives --message (default: root_logger).")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("message")
                .long("message")
                .short('m')
                .value_name("TEXT")
                .help("Emit TEXT through the selected logger.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .value_name("LEVEL")
                .help("Level of --message (default: info).")
                .action(ArgAction::Set),
        )
}

fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;
    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        config: matches.remove_one::<OsString>("config").map(PathBuf::from),
        settings: matches
            .remove_many::<String>("set")
            .map(Iterator::collect)
            .unwrap_or_default(),
        no_color: matches.get_flag("no-color"),
        logger: matches.remove_one::<String>("logger"),
        message: matches.remove_one::<String>("message"),
        level: matches.remove_one::<String>("level"),
    })
}

/// Splits `KEY=VALUE` at the first `=`.
fn parse_setting(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        _ => Err(format!("invalid --set value '{raw}': expected KEY=VALUE")),
    }
}

/// Renders the help text.
pub fn render_help() -> String {
    clap_command().render_help().to_string()
}

/// Runs the binary against the global context.
///
/// Returns the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    run_in(Context::global(), arguments, stdout, stderr)
}

/// Runs the binary against `context`.
pub fn run_in<I, S, Out, Err>(
    context: &Context,
    arguments: I,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => match execute(context, parsed, stdout) {
            Ok(code) => code,
            Err(message) => {
                let _ = writeln!(stderr, "{PROGRAM_NAME}: {message}");
                EXIT_FAILURE
            }
        },
        Err(error) => {
            let _ = write!(stderr, "{PROGRAM_NAME}: {error}");
            EXIT_FAILURE
        }
    }
}

fn execute<Out: Write>(
    context: &Context,
    parsed: ParsedArgs,
    stdout: &mut Out,
) -> Result<i32, String> {
    if parsed.show_help {
        return Ok(write_or_fail(stdout, render_help().as_bytes()));
    }
    if parsed.show_version {
        let banner = format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"));
        return Ok(write_or_fail(stdout, banner.as_bytes()));
    }

    let level = match parsed.level.as_deref() {
        Some(name) => name.parse::<Level>().map_err(|err| err.to_string())?,
        None => Level::Info,
    };
    let settings = parsed
        .settings
        .iter()
        .map(|raw| parse_setting(raw))
        .collect::<Result<Vec<_>, _>>()?;

    if parsed.no_color {
        logging_sink::set_colored(false);
    }
    apply_configuration(context, parsed.config, settings).map_err(|err| err.to_string())?;

    let orchestrator = context.instance().map_err(|err| err.to_string())?;
    if let Some(message) = parsed.message {
        let name = parsed.logger.as_deref().unwrap_or(ROOT_LOGGER_NAME);
        let logger = orchestrator.logger(name).map_err(|err| err.to_string())?;
        logger
            .try_log(level, message)
            .map_err(|err| err.to_string())?;
    }
    orchestrator.flush_all().map_err(|err| err.to_string())?;

    let report = format!(
        "config source: {}\n{}",
        orchestrator.config_source(),
        orchestrator.config()
    );
    Ok(write_or_fail(stdout, report.as_bytes()))
}

/// Registers `--config` and `--set` with `context`.
///
/// Entries given with `--set` are laid over the file when both are present,
/// so the merged result is registered as an external configuration.
fn apply_configuration(
    context: &Context,
    file: Option<PathBuf>,
    settings: Vec<(String, String)>,
) -> Result<(), Box<dyn std::error::Error>> {
    match (file, settings.is_empty()) {
        (None, true) => {}
        (Some(path), true) => context.set_config_file(path)?,
        (None, false) => context.set_config(settings, false)?,
        (Some(path), false) => {
            let mut store = ConfigStore::defaults();
            store.load_from_file(&path)?;
            store.update(settings);
            context.set_config(store, true)?;
        }
    }
    Ok(())
}

fn write_or_fail<Out: Write>(stdout: &mut Out, bytes: &[u8]) -> i32 {
    match stdout.write_all(bytes).and_then(|()| stdout.flush()) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}
