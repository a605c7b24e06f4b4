/*!
 The combined error type for the one-step decode entry point.
*/

use std::fmt::{Display, Formatter, Result};

use crate::error::{nrbf::NrbfError, resolve::ResolveError};

/// Either phase of a decode can fail: the record parse or the reference resolution
#[derive(Debug)]
pub enum DecodeError {
    Parse(NrbfError),
    Resolve(ResolveError),
}

impl Display for DecodeError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            DecodeError::Parse(why) => write!(fmt, "{why}"),
            DecodeError::Resolve(why) => write!(fmt, "{why}"),
        }
    }
}
