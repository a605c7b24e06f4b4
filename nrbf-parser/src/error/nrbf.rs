/*!
 Errors that can happen when parsing MS-NRBF data. Every variant carries the byte
 offset at which the problem was detected; parsing never resynchronizes after one.
*/

use std::{
    array::TryFromSliceError,
    fmt::{Display, Formatter, Result},
};

use crate::nrbf::enums::RecordType;

/// Errors that can happen when parsing MS-NRBF data
#[derive(Debug)]
pub enum NrbfError {
    /// A read would cross the end of the input buffer
    UnexpectedEndOfStream { offset: usize, length: usize },
    /// The stream does not begin with a `SerializedStreamHeader`, or the header version is not 1.0
    InvalidHeader { offset: usize },
    /// A record discriminant outside the documented set
    InvalidRecordType { code: u8, offset: usize },
    /// A record that is legal in the stream but not at this position
    UnexpectedRecord { kind: RecordType, offset: usize },
    /// A record was requested after `MessageEnd` terminated the stream
    StreamTerminated { offset: usize },
    /// A `PrimitiveTypeEnumeration` value outside the documented set
    InvalidPrimitiveCode { code: u8, offset: usize },
    /// A `BinaryTypeEnumeration` value outside the documented set
    UnexpectedBinaryType { code: u8, offset: usize },
    /// A `BinaryArrayTypeEnumeration` value outside the documented set
    InvalidArrayKind { code: u8, offset: usize },
    /// A multi-dimensional or offset array, which this parser does not support
    UnsupportedArrayShape { offset: usize },
    /// Two records registered the same object, class, or library id
    DuplicateId { id: i32, offset: usize },
    /// A `ClassWithId` record referenced a class layout that was never registered
    UnknownClass { id: i32, offset: usize },
    /// A class record referenced a library that was never registered
    UnknownLibrary { id: i32, offset: usize },
    /// A run of nulls spilled past the declared length of its enclosing container
    NullRunOverflow { offset: usize },
    /// A negative member, element, or argument count
    InvalidCount { offset: usize },
    /// A length-prefixed string whose 7-bit length occupies more than five bytes
    InvalidLengthPrefix { offset: usize },
    /// A length-prefixed string that is not valid UTF-8
    InvalidUtf8 { offset: usize },
    /// A `Char` whose UTF-16 code units do not form a scalar value
    InvalidUtf16 { offset: usize },
    /// A `Decimal` whose text is not an optionally signed, optionally pointed digit string
    InvalidDecimal { offset: usize },
    SliceError(TryFromSliceError),
}

impl Display for NrbfError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            NrbfError::UnexpectedEndOfStream { offset, length } => {
                write!(fmt, "Read past the end of the stream at {offset:#x} (length {length:#x})!")
            }
            NrbfError::InvalidHeader { offset } => {
                write!(fmt, "Stream does not start with a valid serialization header at {offset:#x}!")
            }
            NrbfError::InvalidRecordType { code, offset } => {
                write!(fmt, "Unknown record type {code:#04x} at {offset:#x}!")
            }
            NrbfError::UnexpectedRecord { kind, offset } => {
                write!(fmt, "Record {kind:?} is not valid at {offset:#x}!")
            }
            NrbfError::StreamTerminated { offset } => {
                write!(fmt, "No records can follow MessageEnd (at {offset:#x})!")
            }
            NrbfError::InvalidPrimitiveCode { code, offset } => {
                write!(fmt, "Unknown primitive type {code:#04x} at {offset:#x}!")
            }
            NrbfError::UnexpectedBinaryType { code, offset } => {
                write!(fmt, "Unknown binary type {code:#04x} at {offset:#x}!")
            }
            NrbfError::InvalidArrayKind { code, offset } => {
                write!(fmt, "Unknown array kind {code:#04x} at {offset:#x}!")
            }
            NrbfError::UnsupportedArrayShape { offset } => {
                write!(fmt, "Multi-dimensional and offset arrays are not supported (at {offset:#x})!")
            }
            NrbfError::DuplicateId { id, offset } => {
                write!(fmt, "Id {id} was registered twice (at {offset:#x})!")
            }
            NrbfError::UnknownClass { id, offset } => {
                write!(fmt, "Metadata id {id} does not name a registered class (at {offset:#x})!")
            }
            NrbfError::UnknownLibrary { id, offset } => {
                write!(fmt, "Library id {id} was never registered (at {offset:#x})!")
            }
            NrbfError::NullRunOverflow { offset } => {
                write!(fmt, "Null run exceeds the enclosing container length at {offset:#x}!")
            }
            NrbfError::InvalidCount { offset } => {
                write!(fmt, "Negative count at {offset:#x}!")
            }
            NrbfError::InvalidLengthPrefix { offset } => {
                write!(fmt, "String length prefix is longer than five bytes at {offset:#x}!")
            }
            NrbfError::InvalidUtf8 { offset } => {
                write!(fmt, "String at {offset:#x} is not valid UTF-8!")
            }
            NrbfError::InvalidUtf16 { offset } => {
                write!(fmt, "Char at {offset:#x} is not a valid UTF-16 sequence!")
            }
            NrbfError::InvalidDecimal { offset } => {
                write!(fmt, "Decimal at {offset:#x} is not in a valid format!")
            }
            NrbfError::SliceError(why) => {
                write!(fmt, "Unable to slice source stream: {why}")
            }
        }
    }
}
