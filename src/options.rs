mod tokenizer;

use std::collections::HashMap;
use std::path::Path;

use log::debug;
use thiserror::Error;

pub use tokenizer::{tolerant_mode_requested, Argument, Tokenizer};

use crate::reporter::Reporter;

/// Why a parse was aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not a real failure, but help output replaces the compile.
    #[error("help requested")]
    HelpRequested,
    #[error("compiler arg '{0}' requires a value")]
    MissingValue(&'static str),
    #[error("'{value}' is not a valid value for the '{flag}' argument")]
    MalformedValue {
        flag: &'static str,
        value: String,
    },
    #[error("unknown compiler arg '{0}'")]
    UnknownFlag(String),
    #[error("invalid compiler arg '{0}'")]
    UnrecognizedPositional(String),
    #[error("no input files")]
    NoInputFiles,
}

/// Compiler configuration accumulated from the command line.
///
/// `macro_defines` stays `None` until the first `--define` is seen, so a
/// compile with no defines is distinguishable from one whose define list
/// ended up empty. `dm_version` and `dm_build` are set together or not at
/// all.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompileSettings {
    pub files: Vec<String>,
    pub suppress_unimplemented: bool,
    pub suppress_unsupported: bool,
    pub skip_anything_typecheck: bool,
    pub dump_preprocessor: bool,
    pub no_standard: bool,
    pub verbose: bool,
    pub print_code_tree: bool,
    pub notices_enabled: bool,
    pub no_opts: bool,
    pub macro_defines: Option<HashMap<String, String>>,
    pub dm_version: Option<i32>,
    pub dm_build: Option<i32>,
}

const HELP: &str = "\
dmc - DM compiler
Usage: dmc [options] [file].dme

Options and arguments:
--help                    : Show this help
--version [VER].[BUILD]   : Set the DM_VERSION and DM_BUILD macros
--skip-bad-args           : Skip arguments the compiler doesn't recognize
--suppress-unimplemented  : Do not warn about unimplemented proc and var uses
--suppress-unsupported    : Do not warn about proc and var uses that will not be supported
--skip-anything-typecheck : Treat 'as anything' casts as unchecked
--dump-preprocessor       : Save the result of preprocessing beside the given DME file
--no-standard             : Compile without including the DM standard library
--define [KEY=VAL]        : Add extra defines to the compilation
--verbose                 : Show verbose output during compile
--print-code-tree         : Print the compiled code tree
--wall, --notices-enabled : Show notice output during compile
--no-opt, --no-opts       : Emit raw unoptimized bytecode
";

fn print_help() {
    print!("{HELP}");
}

fn has_valid_dm_extension(filename: &str) -> bool {
    matches!(
        Path::new(filename).extension().and_then(|ext| ext.to_str()),
        Some("dm") | Some("dme")
    )
}

/// Parse a version value of the form `MAJOR.BUILD`. Empty components are
/// ignored, so a stray trailing dot doesn't reject an otherwise fine value.
fn parse_version(value: &str) -> Option<(i32, i32)> {
    let mut components = value.split('.').filter(|component| !component.is_empty());
    let version = components.next()?.parse().ok()?;
    let build = components.next()?.parse().ok()?;
    if components.next().is_some() {
        return None;
    }

    Some((version, build))
}

/// Report a bad argument. In tolerant mode this becomes a forced warning and
/// parsing continues; otherwise the error goes to the hard channel and
/// aborts the parse.
fn report_bad_arg(
    reporter: &mut dyn Reporter,
    tolerant: bool,
    err: ParseError,
) -> Result<(), ParseError> {
    if tolerant {
        reporter.forced_warning(&format!("{err}, skipping"));
        Ok(())
    } else {
        reporter.fatal(&err.to_string());
        Err(err)
    }
}

/// Parse the raw argument list into [`CompileSettings`].
///
/// Tolerant mode is detected by a prescan over the raw list, so the sentinel
/// softens errors regardless of where it appears relative to the offending
/// argument.
pub fn parse_args(
    args: &[String],
    reporter: &mut dyn Reporter,
) -> Result<CompileSettings, ParseError> {
    let tolerant = tolerant_mode_requested(args);
    let mut settings = CompileSettings::default();

    for arg in Tokenizer::new(args) {
        match arg.name.as_deref() {
            Some("help") => {
                print_help();
                return Err(ParseError::HelpRequested);
            }
            Some("suppress-unimplemented") => settings.suppress_unimplemented = true,
            Some("suppress-unsupported") => settings.suppress_unsupported = true,
            Some("skip-anything-typecheck") => settings.skip_anything_typecheck = true,
            Some("dump-preprocessor") => settings.dump_preprocessor = true,
            Some("no-standard") => settings.no_standard = true,
            Some("verbose") => settings.verbose = true,
            Some("print-code-tree") => settings.print_code_tree = true,
            Some("wall") | Some("notices-enabled") => settings.notices_enabled = true,
            Some("no-opt") | Some("no-opts") => settings.no_opts = true,
            // Already captured by the prescan; listed here so it doesn't get
            // reported as unknown.
            Some("skip-bad-args") => {}
            Some("define") => {
                let Some(value) = arg.value else {
                    // A warning in strict mode too.
                    reporter.forced_warning(&format!(
                        "{}, skipping",
                        ParseError::MissingValue("define")
                    ));
                    continue;
                };

                let (key, macro_value) = value.split_once('=').unwrap_or((value.as_str(), ""));
                if key.is_empty() {
                    let err = ParseError::MalformedValue {
                        flag: "define",
                        value: value.clone(),
                    };
                    report_bad_arg(reporter, tolerant, err)?;
                    continue;
                }

                settings
                    .macro_defines
                    .get_or_insert_with(HashMap::new)
                    .insert(key.to_owned(), macro_value.to_owned());
            }
            Some("version") => {
                let Some(value) = arg.value else {
                    report_bad_arg(reporter, tolerant, ParseError::MissingValue("version"))?;
                    continue;
                };

                match parse_version(&value) {
                    Some((version, build)) => {
                        settings.dm_version = Some(version);
                        settings.dm_build = Some(build);
                    }
                    None => {
                        let err = ParseError::MalformedValue {
                            flag: "version",
                            value,
                        };
                        report_bad_arg(reporter, tolerant, err)?;
                    }
                }
            }
            Some(unknown) => {
                report_bad_arg(reporter, tolerant, ParseError::UnknownFlag(unknown.to_owned()))?;
            }
            None => {
                // A token with neither name nor value would be a tokenizer
                // bug; skip it rather than crash.
                let Some(value) = arg.value else {
                    continue;
                };

                if has_valid_dm_extension(&value) {
                    settings.files.push(value);
                } else {
                    report_bad_arg(
                        reporter,
                        tolerant,
                        ParseError::UnrecognizedPositional(value),
                    )?;
                }
            }
        }
    }

    if settings.files.is_empty() {
        print_help();
        return Err(ParseError::NoInputFiles);
    }

    debug!("parsed compiler settings: {settings:?}");
    Ok(settings)
}
