/*!
 Command line argument parsing
*/

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use nrbf_parser::nrbf::resolver::{ResolveMode, ResolveOptions};

use crate::app::error::RuntimeError;

pub const OPTION_INPUT: &str = "input";
pub const OPTION_BASE64: &str = "base64";
pub const OPTION_FORMAT: &str = "format";
pub const OPTION_OUTPUT: &str = "output";
pub const OPTION_PRETTY: &str = "pretty";
pub const OPTION_KEEP_REFERENCES: &str = "keep-references";
pub const OPTION_BEST_EFFORT: &str = "best-effort";

pub const SUPPORTED_FORMATS: &str = "json, txt";

/// Which exporter renders the decoded stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Txt,
}

impl ExportFormat {
    fn from_cli(name: &str) -> Option<Self> {
        match name {
            "json" => Some(Self::Json),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }
}

/// Options set by the user at runtime
#[derive(Debug)]
pub struct Options {
    /// Where the payload to decode lives
    pub input_path: PathBuf,
    /// Whether the payload is base64 text that must be decoded first
    pub base64: bool,
    pub format: ExportFormat,
    /// Where to write the export; stdout when absent
    pub output_path: Option<PathBuf>,
    pub pretty: bool,
    /// How member references should be resolved before export
    pub resolve: ResolveOptions,
}

impl Options {
    pub fn from_args(args: &ArgMatches) -> Result<Self, RuntimeError> {
        let input_path = args
            .get_one::<String>(OPTION_INPUT)
            .map(PathBuf::from)
            .ok_or_else(|| {
                RuntimeError::InvalidOptions(format!("No {OPTION_INPUT} path provided"))
            })?;

        let format_name = args
            .get_one::<String>(OPTION_FORMAT)
            .map(String::as_str)
            .unwrap_or("json");
        let format = ExportFormat::from_cli(format_name).ok_or_else(|| {
            RuntimeError::InvalidOptions(format!(
                "{format_name} is not a valid export format! Supported formats are: {SUPPORTED_FORMATS}"
            ))
        })?;

        let resolve = ResolveOptions {
            mode: if args.get_flag(OPTION_KEEP_REFERENCES) {
                ResolveMode::InPlace
            } else {
                ResolveMode::Expand
            },
            lenient: args.get_flag(OPTION_BEST_EFFORT),
        };

        Ok(Options {
            input_path,
            base64: args.get_flag(OPTION_BASE64),
            format,
            output_path: args.get_one::<String>(OPTION_OUTPUT).map(PathBuf::from),
            pretty: args.get_flag(OPTION_PRETTY),
            resolve,
        })
    }
}

pub fn from_command_line() -> ArgMatches {
    Command::new("NRBF Inspector")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode .NET Remoting Binary Format payloads for inspection")
        .arg(
            Arg::new(OPTION_INPUT)
                .short('i')
                .long(OPTION_INPUT)
                .help("Path to the MS-NRBF payload to decode")
                .value_name("path")
                .required(true),
        )
        .arg(
            Arg::new(OPTION_BASE64)
                .short('b')
                .long(OPTION_BASE64)
                .help("Treat the input file as base64 text and decode it first")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(OPTION_FORMAT)
                .short('f')
                .long(OPTION_FORMAT)
                .help("Output format to export: json or txt")
                .value_name("format")
                .default_value("json"),
        )
        .arg(
            Arg::new(OPTION_OUTPUT)
                .short('o')
                .long(OPTION_OUTPUT)
                .help("Write the export to this path instead of stdout")
                .value_name("path"),
        )
        .arg(
            Arg::new(OPTION_PRETTY)
                .short('p')
                .long(OPTION_PRETTY)
                .help("Pretty-print JSON output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(OPTION_KEEP_REFERENCES)
                .short('r')
                .long(OPTION_KEEP_REFERENCES)
                .help("Keep object references in place instead of expanding them, and emit the object registry alongside the root")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(OPTION_BEST_EFFORT)
                .short('E')
                .long(OPTION_BEST_EFFORT)
                .help("Emit reference stubs for unresolvable or cyclic references instead of failing")
                .action(ArgAction::SetTrue),
        )
        .get_matches()
}
