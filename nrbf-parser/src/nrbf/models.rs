/*!
 Data structures and models produced by the MS-NRBF parser.
*/

use crate::nrbf::enums::{PrimitiveType, RecordType};

/// The four fixed fields of a `SerializedStreamHeader` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    /// Id of the object that forms the root of the serialized graph
    pub root_id: i32,
    pub header_id: i32,
    pub major_version: i32,
    pub minor_version: i32,
}

/// How the ticks of a serialized `DateTime` should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeKind {
    Unspecified,
    Utc,
    Local,
}

/// A .NET `DateTime`: a count of 100 ns ticks since 0001-01-01T00:00:00 plus a kind.
///
/// On the wire both are packed into one 64-bit value, the kind in the top two bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub ticks: u64,
    pub kind: DateTimeKind,
}

/// Class name plus the library it lives in, the operand of a `Class` binary type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTypeInfo {
    pub type_name: String,
    pub library_id: i32,
}

/// A member type descriptor: a `BinaryTypeEnumeration` value joined with the
/// "AdditionalInfo" operand that the stream carries for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberType {
    Primitive(PrimitiveType),
    String,
    Object,
    SystemClass(String),
    Class(ClassTypeInfo),
    ObjectArray,
    StringArray,
    PrimitiveArray(PrimitiveType),
}

/// A class layout declared by one of the class records, registered in the class table
/// under its `object_id` and reusable by later `ClassWithId` records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLayout {
    pub object_id: i32,
    pub name: String,
    pub member_names: Vec<String>,
    /// Absent for the members-only record variants, whose member values are
    /// self-described by the records that follow
    pub member_types: Option<Vec<MemberType>>,
    /// Absent for system classes
    pub library_id: Option<i32>,
}

/// One decoded class instance: the class it was declared with and its member values
/// in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInstance {
    pub class: String,
    /// Name of the library the class belongs to, when one was registered
    pub library: Option<String>,
    pub members: Vec<(String, Value)>,
}

impl ClassInstance {
    /// Look a member value up by name
    pub fn member(&self, name: &str) -> Option<&Value> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value)
    }
}

/// A node in the decoded value tree.
///
/// Integers keep the width the stream declared for them so the output remains
/// lossless. `Reference` nodes stand in for objects registered elsewhere in the
/// stream and survive only until resolution (or indefinitely, in the graph-preserving
/// resolution mode).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(u8),
    SByte(i8),
    Char(char),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Single(f32),
    Double(f64),
    /// Kept as the source text so no precision is lost
    Decimal(String),
    String(String),
    DateTime(DateTime),
    /// A signed count of 100 ns ticks
    TimeSpan(i64),
    Array(Vec<Value>),
    Object(ClassInstance),
    Reference(i32),
}

/// Bit flags carried by the remoting method records, per [MS-NRBF] §2.2.1.1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFlags(pub u32);

impl MessageFlags {
    pub const NO_ARGS: u32 = 0x0001;
    pub const ARGS_INLINE: u32 = 0x0002;
    pub const ARGS_IS_ARRAY: u32 = 0x0004;
    pub const ARGS_IN_ARRAY: u32 = 0x0008;
    pub const NO_CONTEXT: u32 = 0x0010;
    pub const CONTEXT_INLINE: u32 = 0x0020;
    pub const CONTEXT_IN_ARRAY: u32 = 0x0040;
    pub const METHOD_SIGNATURE_IN_ARRAY: u32 = 0x0080;
    pub const PROPERTIES_IN_ARRAY: u32 = 0x0100;
    pub const NO_RETURN_VALUE: u32 = 0x0200;
    pub const RETURN_VALUE_VOID: u32 = 0x0400;
    pub const RETURN_VALUE_INLINE: u32 = 0x0800;
    pub const RETURN_VALUE_IN_ARRAY: u32 = 0x1000;
    pub const EXCEPTION_IN_ARRAY: u32 = 0x2000;
    pub const GENERIC_METHOD: u32 = 0x8000;

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag != 0
    }
}

/// A decoded `MethodCall` record. When the flags defer arguments, context, or the
/// method signature to a following array record, those arrive as ordinary registered
/// records before `MessageEnd` rather than inside this structure.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub flags: MessageFlags,
    pub method_name: String,
    pub type_name: String,
    pub call_context: Option<String>,
    pub args: Option<Vec<Value>>,
}

/// A decoded `MethodReturn` record
#[derive(Debug, Clone, PartialEq)]
pub struct MethodReturn {
    pub flags: MessageFlags,
    pub return_value: Option<Value>,
    pub call_context: Option<String>,
    pub args: Option<Vec<Value>>,
}

/// One fully-decoded top-level record, as yielded by
/// [`NrbfReader::records`](crate::nrbf::parser::NrbfReader::records)
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Header(StreamHeader),
    Library {
        library_id: i32,
        library_name: String,
    },
    /// Any record that registers a value in the object registry: the class records,
    /// `BinaryObjectString`, and the array records. `kind` preserves which one it was.
    Object {
        kind: RecordType,
        object_id: i32,
        value: Value,
    },
    /// A `MemberPrimitiveTyped` record
    PrimitiveTyped { value: Value },
    /// A `MemberReference` record
    Reference { id_ref: i32 },
    /// An `ObjectNull` record or one of the two null-run records
    NullRun { count: usize },
    MethodCall(MethodCall),
    MethodReturn(MethodReturn),
    /// The `MessageEnd` terminator
    End,
}
