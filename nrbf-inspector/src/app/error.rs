/*!
 Errors that can happen during the application's runtime
*/

use std::{
    fmt::{Display, Formatter, Result},
    io::Error as IoError,
    path::PathBuf,
};

use base64::DecodeError;
use nrbf_parser::error::{nrbf::NrbfError, resolve::ResolveError};

/// Errors that can happen during the application's runtime
#[derive(Debug)]
pub enum RuntimeError {
    InvalidOptions(String),
    DiskError(IoError),
    CreateError(IoError, PathBuf),
    InvalidBase64(DecodeError),
    ParseError(NrbfError),
    ResolveError(ResolveError),
}

impl Display for RuntimeError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            RuntimeError::InvalidOptions(why) => write!(fmt, "Invalid options!\n{why}"),
            RuntimeError::DiskError(why) => write!(fmt, "{why}"),
            RuntimeError::CreateError(why, path) => write!(fmt, "{why}: {path:?}"),
            RuntimeError::InvalidBase64(why) => write!(fmt, "Input is not valid base64: {why}"),
            RuntimeError::ParseError(why) => write!(fmt, "{why}"),
            RuntimeError::ResolveError(why) => write!(fmt, "{why}"),
        }
    }
}
