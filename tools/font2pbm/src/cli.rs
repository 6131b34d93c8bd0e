//! Command line parsing and [`Action`] construction.

use core::{error, fmt};
use std::{ffi::OsString, path::PathBuf};

use clap::{Arg, ArgMatches, Command, value_parser};
use font::scale::Scale;

use crate::load::InputKind;

/// The action to carry out.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    /// Print the usage text.
    Usage,
    /// Convert a font with the given configuration.
    Convert(Config),
}

/// Description of the font to convert and where to read it from.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Config {
    /// The number of cells composing each character.
    pub scale: Scale,
    /// The number of characters in the font.
    pub char_count: usize,
    /// Whether the font data is preceded by a load address.
    pub kind: InputKind,
    /// The file to read, or standard input if `None`.
    pub input: Option<PathBuf>,
}

impl Config {
    /// Returns a human readable name of the input.
    pub fn input_name(&self) -> String {
        match &self.input {
            Some(path) => path.display().to_string(),
            None => String::from("standard input"),
        }
    }
}

/// Returns the usage text for `program`.
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [-r] size num [filename]\n\n\
         \x20 -r:        ROM image (no load address)\n\
         \x20 size:      1x1, 1x2, 2x1 or 2x2\n\
         \x20 num:       Number of characters in font\n\
         \x20 filename:  Name of file to read\n"
    )
}

/// Parses `args`, including the program name, to construct an [`Action`].
///
/// `-r` is only recognized as the first argument; every later argument is taken literally, so a
/// file may be named `-r` or `--`. Any other malformed command line, such as a missing or extra
/// argument, results in [`Action::Usage`].
///
/// # Errors
///
/// - [`CliError::IllegalSize`]: if the size is not one of `1x1`, `1x2`, `2x1` or `2x2`.
/// - [`CliError::IllegalCount`]: if the character count is not a non-negative integer.
pub fn get_action<I, T>(args: I) -> Result<Action, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let program = args.next().unwrap_or_else(|| OsString::from("font2pbm"));
    let mut positionals: Vec<OsString> = args.collect();

    let kind = if positionals.first().is_some_and(|arg| arg == "-r") {
        positionals.remove(0);
        InputKind::Rom
    } else {
        InputKind::Program
    };

    // Everything after `--` is positional, including further flags.
    let args = [program, OsString::from("--")].into_iter().chain(positionals);
    match command_parser().try_get_matches_from(args) {
        Ok(matches) => parse_arguments(&matches, kind).map(Action::Convert),
        Err(_) => Ok(Action::Usage),
    }
}

/// Parses the arguments required to produce a valid [`Config`].
fn parse_arguments(matches: &ArgMatches, kind: InputKind) -> Result<Config, CliError> {
    let size = matches
        .get_one::<OsString>("size")
        .unwrap_or_else(|| unreachable!("`size` should be a required argument"));
    let scale = size
        .to_str()
        .and_then(|size| size.parse::<Scale>().ok())
        .ok_or_else(|| CliError::IllegalSize(size.to_string_lossy().into_owned()))?;

    let num = matches
        .get_one::<OsString>("num")
        .unwrap_or_else(|| unreachable!("`num` should be a required argument"));
    let char_count = num
        .to_str()
        .and_then(parse_count)
        .ok_or_else(|| CliError::IllegalCount(num.to_string_lossy().into_owned()))?;

    let input = matches.get_one::<PathBuf>("filename").cloned();

    Ok(Config {
        scale,
        char_count,
        kind,
        input,
    })
}

/// Parses a plain decimal character count.
fn parse_count(num: &str) -> Option<usize> {
    // `usize::from_str` accepts a leading `+`.
    if !num.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    num.parse().ok()
}

/// Returns the command parser for all [`Action`]s.
fn command_parser() -> Command {
    let size = Arg::new("size")
        .value_parser(value_parser!(OsString))
        .required(true);

    let num = Arg::new("num")
        .value_parser(value_parser!(OsString))
        .required(true);

    let filename = Arg::new("filename").value_parser(value_parser!(PathBuf));

    Command::new("font2pbm")
        .about("Converts a Commodore 64 font to a Portable Bitmap")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(size)
        .arg(num)
        .arg(filename)
}

/// Errors in the values of otherwise well-formed arguments.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum CliError {
    /// The size token is not a supported [`Scale`].
    IllegalSize(String),
    /// The character count is not a non-negative integer.
    IllegalCount(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalSize(size) => write!(f, "Illegal size specification \"{size}\""),
            Self::IllegalCount(num) => write!(f, "Illegal number of chars \"{num}\""),
        }
    }
}

impl error::Error for CliError {}
