/*!
 Errors that can happen when resolving member references against the object registry.
*/

use std::fmt::{Display, Formatter, Result};

/// Errors that can happen when resolving member references
#[derive(Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// A reference names an id that no record registered
    UnknownObjectId { id: i32 },
    /// Expanding references would recurse through this object forever
    CyclicReference { id: i32 },
}

impl Display for ResolveError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            ResolveError::UnknownObjectId { id } => {
                write!(fmt, "Reference to object {id}, which no record defines!")
            }
            ResolveError::CyclicReference { id } => {
                write!(fmt, "Object {id} contains a reference cycle!")
            }
        }
    }
}
