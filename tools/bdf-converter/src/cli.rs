//! Command line parsing and [`CliConfig`] construction.

use std::{ffi::OsString, path::PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command, error::ErrorKind, value_parser};
use gfx_font::glyph::CodeRange;

use crate::ConvertOptions;

/// Description of a single invocation of `bdf-converter`.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CliConfig {
    /// The BDF font to convert.
    pub input: PathBuf,
    /// The file to write the declarations to, or `None` for standard output.
    pub output: Option<PathBuf>,
    /// The [`ConvertOptions`] to convert with.
    pub options: ConvertOptions,
    /// Whether progress is logged.
    pub verbose: bool,
}

/// Parses `args`, including the program name, to construct a [`CliConfig`].
///
/// # Errors
///
/// Returns a [`clap::Error`] if `args` are malformed, if `--first` is greater than `--last`, or
/// if help or version information was requested.
pub fn try_get_config<I, T>(args: I) -> Result<CliConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = command_parser();
    let matches = command.try_get_matches_from_mut(args)?;

    parse_arguments(&matches).ok_or_else(|| {
        command.error(
            ErrorKind::ValueValidation,
            "`--first` must not be greater than `--last`",
        )
    })
}

/// Returns the usage line of `bdf-converter`.
pub fn usage() -> String {
    command_parser().render_usage().to_string()
}

/// Parses the arguments required to produce a valid [`CliConfig`].
///
/// Returns `None` if the requested character code range is empty.
fn parse_arguments(matches: &ArgMatches) -> Option<CliConfig> {
    let input = matches
        .get_one::<PathBuf>("font")
        .cloned()
        .unwrap_or_else(|| unreachable!("`font` is a required argument"));
    let output = matches.get_one::<PathBuf>("output").cloned();

    let first = matches
        .get_one::<i32>("first")
        .copied()
        .unwrap_or(CodeRange::DEFAULT_FIRST);
    let last = matches
        .get_one::<i32>("last")
        .copied()
        .unwrap_or(CodeRange::DEFAULT_LAST);
    let range = CodeRange::new(first, last)?;

    let config = CliConfig {
        input,
        output,
        options: ConvertOptions {
            range,
            strict: matches.get_flag("strict"),
        },
        verbose: matches.get_flag("verbose"),
    };
    Some(config)
}

/// Returns the command parser for `bdf-converter`.
fn command_parser() -> Command {
    let font = Arg::new("font")
        .value_name("FONT")
        .help("The BDF font to convert")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let output = Arg::new("output")
        .short('o')
        .long("output")
        .value_name("PATH")
        .help("Write the declarations to PATH instead of standard output")
        .value_parser(value_parser!(PathBuf));

    let first = Arg::new("first")
        .long("first")
        .value_name("CODE")
        .allow_negative_numbers(true)
        .help("The first character code to convert [default: 32]")
        .value_parser(value_parser!(i32));

    let last = Arg::new("last")
        .long("last")
        .value_name("CODE")
        .allow_negative_numbers(true)
        .help("The last character code to convert [default: 255]")
        .value_parser(value_parser!(i32));

    let strict = Arg::new("strict")
        .long("strict")
        .help("Reject malformed glyphs instead of substituting defaults")
        .action(ArgAction::SetTrue);

    let verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Log conversion progress to standard error")
        .action(ArgAction::SetTrue);

    Command::new("bdf-converter")
        .about("Converts a BDF bitmap font into GFX font source declarations")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(font)
        .arg(output)
        .arg(first)
        .arg(last)
        .arg(strict)
        .arg(verbose)
}
