/*!
 The discriminant enumerations that shape an MS-NRBF stream. Each is stored as a
 single byte; a value outside the documented range is a parse error, never a panic.
*/

/// One-byte discriminant that introduces every record in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    SerializedStreamHeader,
    ClassWithId,
    SystemClassWithMembers,
    ClassWithMembers,
    SystemClassWithMembersAndTypes,
    ClassWithMembersAndTypes,
    BinaryObjectString,
    BinaryArray,
    MemberPrimitiveTyped,
    MemberReference,
    ObjectNull,
    MessageEnd,
    BinaryLibrary,
    ObjectNullMultiple256,
    ObjectNullMultiple,
    ArraySinglePrimitive,
    ArraySingleObject,
    ArraySingleString,
    MethodCall,
    MethodReturn,
}

impl RecordType {
    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::SerializedStreamHeader),
            1 => Some(Self::ClassWithId),
            2 => Some(Self::SystemClassWithMembers),
            3 => Some(Self::ClassWithMembers),
            4 => Some(Self::SystemClassWithMembersAndTypes),
            5 => Some(Self::ClassWithMembersAndTypes),
            6 => Some(Self::BinaryObjectString),
            7 => Some(Self::BinaryArray),
            8 => Some(Self::MemberPrimitiveTyped),
            9 => Some(Self::MemberReference),
            10 => Some(Self::ObjectNull),
            11 => Some(Self::MessageEnd),
            12 => Some(Self::BinaryLibrary),
            13 => Some(Self::ObjectNullMultiple256),
            14 => Some(Self::ObjectNullMultiple),
            15 => Some(Self::ArraySinglePrimitive),
            16 => Some(Self::ArraySingleObject),
            17 => Some(Self::ArraySingleString),
            21 => Some(Self::MethodCall),
            22 => Some(Self::MethodReturn),
            _ => None,
        }
    }
}

/// The scalar types a primitive value or primitive array element can take.
///
/// `Null` and `String` are accepted in typed-member and `ValueWithCode` positions but
/// never as primitive array elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PrimitiveType {
    Boolean = 1,
    Byte = 2,
    Char = 3,
    Decimal = 5,
    Double = 6,
    Int16 = 7,
    Int32 = 8,
    Int64 = 9,
    SByte = 10,
    Single = 11,
    TimeSpan = 12,
    DateTime = 13,
    UInt16 = 14,
    UInt32 = 15,
    UInt64 = 16,
    Null = 17,
    String = 18,
}

impl PrimitiveType {
    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Boolean),
            2 => Some(Self::Byte),
            3 => Some(Self::Char),
            5 => Some(Self::Decimal),
            6 => Some(Self::Double),
            7 => Some(Self::Int16),
            8 => Some(Self::Int32),
            9 => Some(Self::Int64),
            10 => Some(Self::SByte),
            11 => Some(Self::Single),
            12 => Some(Self::TimeSpan),
            13 => Some(Self::DateTime),
            14 => Some(Self::UInt16),
            15 => Some(Self::UInt32),
            16 => Some(Self::UInt64),
            17 => Some(Self::Null),
            18 => Some(Self::String),
            _ => None,
        }
    }
}

/// The member type discriminant found in `MemberTypeInfo` and `BinaryArray` structures.
///
/// Each value determines the shape of the "AdditionalInfo" operand that follows the
/// discriminant block, parsed into a [`MemberType`](crate::nrbf::models::MemberType).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryType {
    Primitive,
    String,
    Object,
    SystemClass,
    Class,
    ObjectArray,
    StringArray,
    PrimitiveArray,
}

impl BinaryType {
    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Primitive),
            1 => Some(Self::String),
            2 => Some(Self::Object),
            3 => Some(Self::SystemClass),
            4 => Some(Self::Class),
            5 => Some(Self::ObjectArray),
            6 => Some(Self::StringArray),
            7 => Some(Self::PrimitiveArray),
            _ => None,
        }
    }
}

/// The shape of a `BinaryArray` record. Only single-dimensional, zero-offset arrays
/// are decoded; the offset shapes and ranks above one are rejected during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryArrayType {
    Single,
    Jagged,
    Rectangular,
    SingleOffset,
    JaggedOffset,
    RectangularOffset,
}

impl BinaryArrayType {
    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Single),
            1 => Some(Self::Jagged),
            2 => Some(Self::Rectangular),
            3 => Some(Self::SingleOffset),
            4 => Some(Self::JaggedOffset),
            5 => Some(Self::RectangularOffset),
            _ => None,
        }
    }

    /// The offset shapes carry a lower-bound value per dimension after the lengths
    pub(crate) fn has_lower_bounds(&self) -> bool {
        matches!(
            self,
            Self::SingleOffset | Self::JaggedOffset | Self::RectangularOffset
        )
    }
}
