/*!
 A positioned byte cursor over an MS-NRBF payload, exposing the primitive reads the
 record decoders are built from. All multi-byte integers are little-endian.
*/

use crate::{
    error::nrbf::NrbfError,
    nrbf::{
        enums::{BinaryType, PrimitiveType},
        models::{DateTime, DateTimeKind, Value},
    },
};

/// High surrogates announce that a `Char` occupies a second UTF-16 code unit
const HIGH_SURROGATE: std::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
/// A 7-bit variable-length quantity never occupies more than five bytes
const MAX_LENGTH_PREFIX_BITS: u32 = 35;

/// Reads primitive values out of an MS-NRBF byte stream.
///
/// The cursor only moves forward; every read reports the offset it started at when
/// it fails, and a read that would cross the end of the input fails rather than
/// truncating.
#[derive(Debug)]
pub struct StreamReader<'a> {
    /// The payload we want to parse
    stream: &'a [u8],
    /// The current index we are at in the stream
    idx: usize,
}

impl<'a> StreamReader<'a> {
    /// Given a payload, construct a reader instance to parse it.
    ///
    /// # Example:
    ///
    /// ```
    /// use nrbf_parser::nrbf::reader::StreamReader;
    ///
    /// let bytes: Vec<u8> = vec![]; // Example payload
    /// let mut reader = StreamReader::from(&bytes);
    /// ```
    pub fn from(stream: &'a [u8]) -> Self {
        Self { stream, idx: 0 }
    }

    /// The current byte offset into the stream
    pub fn position(&self) -> usize {
        self.idx
    }

    /// Whether any bytes remain to be read
    pub fn is_exhausted(&self) -> bool {
        self.idx >= self.stream.len()
    }

    /// Read exactly `n` bytes from the stream
    fn read_exact_bytes(&mut self, n: usize) -> Result<&'a [u8], NrbfError> {
        let range = self
            .stream
            .get(self.idx..self.idx + n)
            .ok_or(NrbfError::UnexpectedEndOfStream {
                offset: self.idx,
                length: self.stream.len(),
            })?;
        self.idx += n;
        Ok(range)
    }

    /// Read a fixed-width little-endian field
    fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], NrbfError> {
        self.read_exact_bytes(N)?
            .try_into()
            .map_err(NrbfError::SliceError)
    }

    pub fn read_u8(&mut self) -> Result<u8, NrbfError> {
        Ok(self.read_fixed::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, NrbfError> {
        Ok(i8::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_u16(&mut self) -> Result<u16, NrbfError> {
        Ok(u16::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, NrbfError> {
        Ok(i16::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, NrbfError> {
        Ok(u32::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, NrbfError> {
        Ok(i32::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, NrbfError> {
        Ok(u64::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, NrbfError> {
        Ok(i64::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, NrbfError> {
        Ok(f32::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, NrbfError> {
        Ok(f64::from_le_bytes(self.read_fixed()?))
    }

    /// One byte; zero is `false`, anything else is `true`
    pub fn read_bool(&mut self) -> Result<bool, NrbfError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a `Char`: one UTF-16 code unit, or two when the first is a high surrogate
    pub fn read_char(&mut self) -> Result<char, NrbfError> {
        let offset = self.idx;
        let first = self.read_u16()?;
        let mut units = vec![first];
        if HIGH_SURROGATE.contains(&first) {
            units.push(self.read_u16()?);
        }
        match char::decode_utf16(units).next() {
            Some(Ok(decoded)) => Ok(decoded),
            _ => Err(NrbfError::InvalidUtf16 { offset }),
        }
    }

    /// Read a 7-bit variable-length unsigned integer: each byte contributes seven
    /// bits, low group first, and a set high bit continues into the next byte
    pub fn read_variable_length(&mut self) -> Result<usize, NrbfError> {
        let offset = self.idx;
        let mut length: usize = 0;
        let mut shift: u32 = 0;
        loop {
            let byte = self.read_u8()?;
            length |= ((byte & 0x7F) as usize) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift >= MAX_LENGTH_PREFIX_BITS {
                return Err(NrbfError::InvalidLengthPrefix { offset });
            }
        }
        Ok(length)
    }

    /// Read a length-prefixed UTF-8 string
    pub fn read_string(&mut self) -> Result<String, NrbfError> {
        let length = self.read_variable_length()?;
        let offset = self.idx;
        let raw = self.read_exact_bytes(length)?;
        let text = std::str::from_utf8(raw).map_err(|_| NrbfError::InvalidUtf8 { offset })?;
        Ok(text.to_string())
    }

    /// Read a `Decimal`: a length-prefixed ASCII digit string with an optional
    /// leading sign and decimal point, preserved as text
    pub fn read_decimal(&mut self) -> Result<String, NrbfError> {
        let offset = self.idx;
        let text = self.read_string()?;
        if !is_valid_decimal(&text) {
            return Err(NrbfError::InvalidDecimal { offset });
        }
        Ok(text)
    }

    /// Read a `DateTime`: a 64-bit value whose low 62 bits count 100 ns ticks since
    /// 0001-01-01 and whose top two bits carry the kind
    pub fn read_datetime(&mut self) -> Result<DateTime, NrbfError> {
        let raw = self.read_u64()?;
        let kind = match raw >> 62 {
            1 => DateTimeKind::Utc,
            2 => DateTimeKind::Local,
            _ => DateTimeKind::Unspecified,
        };
        Ok(DateTime {
            ticks: raw & 0x3FFF_FFFF_FFFF_FFFF,
            kind,
        })
    }

    /// Read a `TimeSpan`: a signed count of 100 ns ticks
    pub fn read_timespan(&mut self) -> Result<i64, NrbfError> {
        self.read_i64()
    }

    /// Read a `PrimitiveTypeEnumeration` discriminant byte
    pub fn read_primitive_type(&mut self) -> Result<PrimitiveType, NrbfError> {
        let offset = self.idx;
        let code = self.read_u8()?;
        PrimitiveType::from_byte(code).ok_or(NrbfError::InvalidPrimitiveCode { code, offset })
    }

    /// Read a `BinaryTypeEnumeration` discriminant byte
    pub fn read_binary_type(&mut self) -> Result<BinaryType, NrbfError> {
        let offset = self.idx;
        let code = self.read_u8()?;
        BinaryType::from_byte(code).ok_or(NrbfError::UnexpectedBinaryType { code, offset })
    }

    /// Decode one raw primitive value of the given type from the stream
    pub fn read_primitive(&mut self, primitive_type: PrimitiveType) -> Result<Value, NrbfError> {
        Ok(match primitive_type {
            PrimitiveType::Boolean => Value::Boolean(self.read_bool()?),
            PrimitiveType::Byte => Value::Byte(self.read_u8()?),
            PrimitiveType::Char => Value::Char(self.read_char()?),
            PrimitiveType::Decimal => Value::Decimal(self.read_decimal()?),
            PrimitiveType::Double => Value::Double(self.read_f64()?),
            PrimitiveType::Int16 => Value::Int16(self.read_i16()?),
            PrimitiveType::Int32 => Value::Int32(self.read_i32()?),
            PrimitiveType::Int64 => Value::Int64(self.read_i64()?),
            PrimitiveType::SByte => Value::SByte(self.read_i8()?),
            PrimitiveType::Single => Value::Single(self.read_f32()?),
            PrimitiveType::TimeSpan => Value::TimeSpan(self.read_timespan()?),
            PrimitiveType::DateTime => Value::DateTime(self.read_datetime()?),
            PrimitiveType::UInt16 => Value::UInt16(self.read_u16()?),
            PrimitiveType::UInt32 => Value::UInt32(self.read_u32()?),
            PrimitiveType::UInt64 => Value::UInt64(self.read_u64()?),
            PrimitiveType::Null => Value::Null,
            PrimitiveType::String => Value::String(self.read_string()?),
        })
    }
}

/// An optionally signed digit string with at most one decimal point
fn is_valid_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (integral, fraction) = match unsigned.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit());
    all_digits(integral) && fraction.map_or(true, all_digits)
}
