/*!
 The record dispatcher at the heart of the MS-NRBF parser.

 [`NrbfReader`] reads one discriminant byte at a time and decodes the record it
 announces, populating three tables as it goes: the libraries registered by
 `BinaryLibrary` records, the class layouts declared by class records, and the object
 registry that maps every id-carrying record to its decoded value. Member references
 are emitted as [`Value::Reference`] placeholders; resolving them against the registry
 is a separate pass in [`resolver`](crate::nrbf::resolver).
*/

use std::collections::HashMap;

use crate::{
    error::nrbf::NrbfError,
    nrbf::{
        enums::{BinaryArrayType, BinaryType, PrimitiveType, RecordType},
        models::{
            ClassInstance, ClassLayout, ClassTypeInfo, MemberType, MessageFlags, MethodCall,
            MethodReturn, Record, StreamHeader, Value,
        },
        reader::StreamReader,
    },
};

/// Where the dispatcher is in the stream lifecycle. Only a header is legal in
/// `Initial`; nothing is legal in `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Initial,
    Ready,
    Terminated,
}

/// What one value-position read produced: a single value, or a run of nulls that the
/// enclosing container spreads over the next `n` slots
pub(crate) enum Slot {
    Value(Value),
    Nulls(usize),
}

/// Parse a complete serialization stream, header through `MessageEnd`.
///
/// Convenience wrapper over [`NrbfReader::parse`].
pub fn parse(stream: &[u8]) -> Result<ParsedStream, NrbfError> {
    NrbfReader::from(stream).parse()
}

/// Contains logic and data used to deserialize an MS-NRBF payload.
///
/// The reader holds a single forward-moving cursor over the input plus the symbol
/// tables one stream parse accumulates. The tables live for the duration of the
/// parse and move into the resulting [`ParsedStream`].
#[derive(Debug)]
pub struct NrbfReader<'a> {
    /// Cursor over the payload we want to parse
    reader: StreamReader<'a>,
    state: ParserState,
    header: Option<StreamHeader>,
    /// `LibraryId` to library name, from `BinaryLibrary` records
    libraries: HashMap<i32, String>,
    /// Class layouts keyed by the declaring record's object id, reused by `ClassWithId`
    classes: HashMap<i32, ClassLayout>,
    /// Every id-carrying record's decoded value, consumed by reference resolution
    objects: HashMap<i32, Value>,
    /// How many `MemberReference` records the stream carried
    reference_count: usize,
}

impl<'a> NrbfReader<'a> {
    /// Given a payload, construct a reader instance to parse it.
    ///
    /// # Example:
    ///
    /// ```
    /// use nrbf_parser::nrbf::parser::NrbfReader;
    ///
    /// let bytes: Vec<u8> = vec![]; // Example payload
    /// let reader = NrbfReader::from(&bytes);
    /// ```
    pub fn from(stream: &'a [u8]) -> Self {
        Self {
            reader: StreamReader::from(stream),
            state: ParserState::Initial,
            header: None,
            libraries: HashMap::new(),
            classes: HashMap::new(),
            objects: HashMap::new(),
            reference_count: 0,
        }
    }

    /// Parse the whole stream and return it with its symbol tables.
    ///
    /// # Example:
    ///
    /// ```
    /// use nrbf_parser::nrbf::parser::NrbfReader;
    ///
    /// let bytes: Vec<u8> = vec![]; // Example payload
    /// let result = NrbfReader::from(&bytes).parse();
    /// ```
    pub fn parse(mut self) -> Result<ParsedStream, NrbfError> {
        let mut records = Vec::new();
        loop {
            let record = self.next_record()?;
            let end = matches!(record, Record::End);
            records.push(record);
            if end {
                break;
            }
        }
        // The loop cannot finish without the header record having been read
        let header = match self.header {
            Some(header) => header,
            None => return Err(NrbfError::InvalidHeader { offset: 0 }),
        };
        Ok(ParsedStream {
            header,
            records,
            libraries: self.libraries,
            classes: self.classes,
            objects: self.objects,
            reference_count: self.reference_count,
        })
    }

    /// Turn the reader into a lazy iterator over top-level records
    pub fn records(self) -> Records<'a> {
        Records {
            parser: self,
            done: false,
        }
    }

    /// Decode the next top-level record.
    ///
    /// The first call must find a `SerializedStreamHeader`; calls after `MessageEnd`
    /// fail. Any bytes remaining after `MessageEnd` are left unread.
    pub fn next_record(&mut self) -> Result<Record, NrbfError> {
        match self.state {
            ParserState::Terminated => {
                return Err(NrbfError::StreamTerminated {
                    offset: self.reader.position(),
                })
            }
            ParserState::Initial => {
                let record = self.read_header()?;
                self.state = ParserState::Ready;
                return Ok(record);
            }
            ParserState::Ready => {}
        }
        let offset = self.reader.position();
        let code = self.reader.read_u8()?;
        let kind = RecordType::from_byte(code).ok_or(NrbfError::InvalidRecordType { code, offset })?;
        self.read_record_body(kind, offset)
    }

    fn read_header(&mut self) -> Result<Record, NrbfError> {
        let offset = self.reader.position();
        let code = self.reader.read_u8()?;
        if RecordType::from_byte(code) != Some(RecordType::SerializedStreamHeader) {
            return Err(NrbfError::InvalidHeader { offset });
        }
        let header = StreamHeader {
            root_id: self.reader.read_i32()?,
            header_id: self.reader.read_i32()?,
            major_version: self.reader.read_i32()?,
            minor_version: self.reader.read_i32()?,
        };
        if header.major_version != 1 || header.minor_version != 0 {
            return Err(NrbfError::InvalidHeader { offset });
        }
        self.header = Some(header);
        Ok(Record::Header(header))
    }

    /// Dispatch on a record discriminant that has already been read. `offset` is the
    /// position of the discriminant byte, for error reporting.
    fn read_record_body(&mut self, kind: RecordType, offset: usize) -> Result<Record, NrbfError> {
        match kind {
            RecordType::SerializedStreamHeader => Err(NrbfError::UnexpectedRecord { kind, offset }),
            RecordType::ClassWithId => self.read_class_with_id(offset),
            RecordType::SystemClassWithMembers => self.read_class(kind, false, true, offset),
            RecordType::ClassWithMembers => self.read_class(kind, false, false, offset),
            RecordType::SystemClassWithMembersAndTypes => self.read_class(kind, true, true, offset),
            RecordType::ClassWithMembersAndTypes => self.read_class(kind, true, false, offset),
            RecordType::BinaryObjectString => self.read_object_string(),
            RecordType::BinaryArray => self.read_binary_array(offset),
            RecordType::MemberPrimitiveTyped => {
                let primitive_type = self.reader.read_primitive_type()?;
                let value = self.reader.read_primitive(primitive_type)?;
                Ok(Record::PrimitiveTyped { value })
            }
            RecordType::MemberReference => {
                let id_ref = self.reader.read_i32()?;
                self.reference_count += 1;
                Ok(Record::Reference { id_ref })
            }
            RecordType::ObjectNull => Ok(Record::NullRun { count: 1 }),
            RecordType::MessageEnd => {
                self.state = ParserState::Terminated;
                Ok(Record::End)
            }
            RecordType::BinaryLibrary => self.read_library(),
            RecordType::ObjectNullMultiple256 => Ok(Record::NullRun {
                count: self.reader.read_u8()? as usize,
            }),
            RecordType::ObjectNullMultiple => {
                let count_offset = self.reader.position();
                let count = self.reader.read_i32()?;
                let count = usize::try_from(count)
                    .map_err(|_| NrbfError::InvalidCount { offset: count_offset })?;
                Ok(Record::NullRun { count })
            }
            RecordType::ArraySinglePrimitive => self.read_array_single_primitive(),
            RecordType::ArraySingleObject => self.read_array_single_object(),
            RecordType::ArraySingleString => self.read_array_single_string(),
            RecordType::MethodCall => self.read_method_call(),
            RecordType::MethodReturn => self.read_method_return(),
        }
    }

    fn read_library(&mut self) -> Result<Record, NrbfError> {
        let offset = self.reader.position();
        let library_id = self.reader.read_i32()?;
        let library_name = self.reader.read_string()?;
        if self.libraries.contains_key(&library_id) {
            return Err(NrbfError::DuplicateId {
                id: library_id,
                offset,
            });
        }
        self.libraries.insert(library_id, library_name.clone());
        Ok(Record::Library {
            library_id,
            library_name,
        })
    }

    fn read_object_string(&mut self) -> Result<Record, NrbfError> {
        let object_id = self.reader.read_i32()?;
        let value = Value::String(self.reader.read_string()?);
        self.register_object(object_id, value.clone())?;
        Ok(Record::Object {
            kind: RecordType::BinaryObjectString,
            object_id,
            value,
        })
    }

    /// `ClassInfo`: object id, class name, and the member names in declaration order
    fn read_class_info(&mut self) -> Result<(i32, String, Vec<String>), NrbfError> {
        let object_id = self.reader.read_i32()?;
        let name = self.reader.read_string()?;
        let count_offset = self.reader.position();
        let member_count = self.reader.read_i32()?;
        let member_count = usize::try_from(member_count)
            .map_err(|_| NrbfError::InvalidCount { offset: count_offset })?;
        let mut member_names = Vec::with_capacity(member_count);
        for _ in 0..member_count {
            member_names.push(self.reader.read_string()?);
        }
        Ok((object_id, name, member_names))
    }

    /// `MemberTypeInfo`: a block of `count` binary type discriminants followed by the
    /// "AdditionalInfo" operand for each, in the same order
    fn read_member_type_info(&mut self, count: usize) -> Result<Vec<MemberType>, NrbfError> {
        let mut binary_types = Vec::with_capacity(count);
        for _ in 0..count {
            binary_types.push(self.reader.read_binary_type()?);
        }
        let mut member_types = Vec::with_capacity(count);
        for binary_type in binary_types {
            member_types.push(self.read_additional_info(binary_type)?);
        }
        Ok(member_types)
    }

    /// Read the "AdditionalInfo" operand for one binary type discriminant
    fn read_additional_info(&mut self, binary_type: BinaryType) -> Result<MemberType, NrbfError> {
        Ok(match binary_type {
            BinaryType::Primitive => MemberType::Primitive(self.reader.read_primitive_type()?),
            BinaryType::String => MemberType::String,
            BinaryType::Object => MemberType::Object,
            BinaryType::SystemClass => MemberType::SystemClass(self.reader.read_string()?),
            BinaryType::Class => MemberType::Class(ClassTypeInfo {
                type_name: self.reader.read_string()?,
                library_id: self.reader.read_i32()?,
            }),
            BinaryType::ObjectArray => MemberType::ObjectArray,
            BinaryType::StringArray => MemberType::StringArray,
            BinaryType::PrimitiveArray => {
                MemberType::PrimitiveArray(self.reader.read_primitive_type()?)
            }
        })
    }

    /// The four class-declaring records. `with_types` and `system` select which of
    /// `MemberTypeInfo` and `LibraryId` follow the `ClassInfo` block.
    fn read_class(
        &mut self,
        kind: RecordType,
        with_types: bool,
        system: bool,
        offset: usize,
    ) -> Result<Record, NrbfError> {
        let (object_id, name, member_names) = self.read_class_info()?;
        let member_types = if with_types {
            Some(self.read_member_type_info(member_names.len())?)
        } else {
            None
        };
        let library_id = if system {
            None
        } else {
            let library_offset = self.reader.position();
            let id = self.reader.read_i32()?;
            if !self.libraries.contains_key(&id) {
                return Err(NrbfError::UnknownLibrary {
                    id,
                    offset: library_offset,
                });
            }
            Some(id)
        };
        let layout = ClassLayout {
            object_id,
            name,
            member_names,
            member_types,
            library_id,
        };
        // The layout is registered before its values are read so that nested records
        // can already reuse it by id
        if self.classes.contains_key(&object_id) {
            return Err(NrbfError::DuplicateId {
                id: object_id,
                offset,
            });
        }
        self.classes.insert(object_id, layout.clone());
        let value = self.read_instance(&layout)?;
        self.register_object(object_id, value.clone())?;
        Ok(Record::Object {
            kind,
            object_id,
            value,
        })
    }

    /// `ClassWithId`: a new instance of a previously-declared layout
    fn read_class_with_id(&mut self, offset: usize) -> Result<Record, NrbfError> {
        let object_id = self.reader.read_i32()?;
        let metadata_id = self.reader.read_i32()?;
        let layout = self
            .classes
            .get(&metadata_id)
            .cloned()
            .ok_or(NrbfError::UnknownClass {
                id: metadata_id,
                offset,
            })?;
        let value = self.read_instance(&layout)?;
        self.register_object(object_id, value.clone())?;
        Ok(Record::Object {
            kind: RecordType::ClassWithId,
            object_id,
            value,
        })
    }

    /// Decode one class instance conforming to a layout
    fn read_instance(&mut self, layout: &ClassLayout) -> Result<Value, NrbfError> {
        let library = layout
            .library_id
            .and_then(|id| self.libraries.get(&id).cloned());
        let values = self.read_member_values(layout)?;
        let members = layout.member_names.iter().cloned().zip(values).collect();
        Ok(Value::Object(ClassInstance {
            class: layout.name.clone(),
            library,
            members,
        }))
    }

    /// Decode one value per member. Typed layouts drive each read from the member's
    /// descriptor; untyped layouts read whatever value record the stream supplies.
    /// A null run found in one member slot spills into the following slots.
    fn read_member_values(&mut self, layout: &ClassLayout) -> Result<Vec<Value>, NrbfError> {
        let count = layout.member_names.len();
        let mut values = Vec::with_capacity(count);
        let mut pending_nulls = 0usize;
        for index in 0..count {
            if pending_nulls > 0 {
                pending_nulls -= 1;
                values.push(Value::Null);
                continue;
            }
            loop {
                let slot = match &layout.member_types {
                    Some(member_types) => self.read_member_value(&member_types[index])?,
                    None => self.read_value_slot()?,
                };
                match slot {
                    Slot::Value(value) => {
                        values.push(value);
                        break;
                    }
                    // An empty run contributes nothing; keep reading for this member
                    Slot::Nulls(0) => {}
                    Slot::Nulls(run) => {
                        values.push(Value::Null);
                        pending_nulls = run - 1;
                        break;
                    }
                }
            }
        }
        if pending_nulls > 0 {
            return Err(NrbfError::NullRunOverflow {
                offset: self.reader.position(),
            });
        }
        Ok(values)
    }

    /// Decode a single value conforming to a member type descriptor. Primitives are
    /// raw in the stream; everything else arrives as an inline record.
    fn read_member_value(&mut self, member_type: &MemberType) -> Result<Slot, NrbfError> {
        match member_type {
            MemberType::Primitive(primitive_type) => {
                Ok(Slot::Value(self.reader.read_primitive(*primitive_type)?))
            }
            _ => self.read_value_slot(),
        }
    }

    /// Read one record in value position and convert it to a slot. `BinaryLibrary`
    /// records may be interleaved ahead of the value they serve; they are registered
    /// and skipped here.
    fn read_value_slot(&mut self) -> Result<Slot, NrbfError> {
        loop {
            let offset = self.reader.position();
            let code = self.reader.read_u8()?;
            let kind =
                RecordType::from_byte(code).ok_or(NrbfError::InvalidRecordType { code, offset })?;
            match kind {
                RecordType::SerializedStreamHeader
                | RecordType::MessageEnd
                | RecordType::MethodCall
                | RecordType::MethodReturn => {
                    return Err(NrbfError::UnexpectedRecord { kind, offset });
                }
                RecordType::BinaryLibrary => {
                    self.read_library()?;
                }
                _ => {
                    return match self.read_record_body(kind, offset)? {
                        Record::Object { value, .. } => Ok(Slot::Value(value)),
                        Record::PrimitiveTyped { value } => Ok(Slot::Value(value)),
                        Record::Reference { id_ref } => Ok(Slot::Value(Value::Reference(id_ref))),
                        Record::NullRun { count } => Ok(Slot::Nulls(count)),
                        _ => Err(NrbfError::UnexpectedRecord { kind, offset }),
                    };
                }
            }
        }
    }

    /// Read one record in string-array element position, where only strings, member
    /// references, and nulls are legal
    fn read_string_slot(&mut self) -> Result<Slot, NrbfError> {
        let offset = self.reader.position();
        let code = self.reader.read_u8()?;
        let kind =
            RecordType::from_byte(code).ok_or(NrbfError::InvalidRecordType { code, offset })?;
        match kind {
            RecordType::BinaryObjectString
            | RecordType::MemberReference
            | RecordType::ObjectNull
            | RecordType::ObjectNullMultiple256
            | RecordType::ObjectNullMultiple => match self.read_record_body(kind, offset)? {
                Record::Object { value, .. } => Ok(Slot::Value(value)),
                Record::Reference { id_ref } => Ok(Slot::Value(Value::Reference(id_ref))),
                Record::NullRun { count } => Ok(Slot::Nulls(count)),
                _ => Err(NrbfError::UnexpectedRecord { kind, offset }),
            },
            _ => Err(NrbfError::UnexpectedRecord { kind, offset }),
        }
    }

    /// Fill `length` array elements from value-position reads, expanding null runs
    fn read_array_values<F>(&mut self, length: usize, mut read_slot: F) -> Result<Vec<Value>, NrbfError>
    where
        F: FnMut(&mut Self) -> Result<Slot, NrbfError>,
    {
        let mut values = Vec::with_capacity(length);
        while values.len() < length {
            let offset = self.reader.position();
            match read_slot(self)? {
                Slot::Value(value) => values.push(value),
                Slot::Nulls(run) => {
                    if values.len() + run > length {
                        return Err(NrbfError::NullRunOverflow { offset });
                    }
                    for _ in 0..run {
                        values.push(Value::Null);
                    }
                }
            }
        }
        Ok(values)
    }

    /// `ArrayInfo`: the object id and element count shared by the single-dimension
    /// array records
    fn read_array_info(&mut self) -> Result<(i32, usize), NrbfError> {
        let object_id = self.reader.read_i32()?;
        let length_offset = self.reader.position();
        let length = self.reader.read_i32()?;
        let length = usize::try_from(length)
            .map_err(|_| NrbfError::InvalidCount { offset: length_offset })?;
        Ok((object_id, length))
    }

    fn read_array_single_primitive(&mut self) -> Result<Record, NrbfError> {
        let (object_id, length) = self.read_array_info()?;
        let type_offset = self.reader.position();
        let primitive_type = self.reader.read_primitive_type()?;
        // A primitive array can hold scalars only
        if matches!(primitive_type, PrimitiveType::Null | PrimitiveType::String) {
            return Err(NrbfError::InvalidPrimitiveCode {
                code: primitive_type as u8,
                offset: type_offset,
            });
        }
        let mut values = Vec::with_capacity(length);
        for _ in 0..length {
            values.push(self.reader.read_primitive(primitive_type)?);
        }
        let value = Value::Array(values);
        self.register_object(object_id, value.clone())?;
        Ok(Record::Object {
            kind: RecordType::ArraySinglePrimitive,
            object_id,
            value,
        })
    }

    fn read_array_single_object(&mut self) -> Result<Record, NrbfError> {
        let (object_id, length) = self.read_array_info()?;
        let values = self.read_array_values(length, Self::read_value_slot)?;
        let value = Value::Array(values);
        self.register_object(object_id, value.clone())?;
        Ok(Record::Object {
            kind: RecordType::ArraySingleObject,
            object_id,
            value,
        })
    }

    fn read_array_single_string(&mut self) -> Result<Record, NrbfError> {
        let (object_id, length) = self.read_array_info()?;
        let values = self.read_array_values(length, Self::read_string_slot)?;
        let value = Value::Array(values);
        self.register_object(object_id, value.clone())?;
        Ok(Record::Object {
            kind: RecordType::ArraySingleString,
            object_id,
            value,
        })
    }

    /// `BinaryArray`: the general array record. Of its six shapes only the
    /// single-dimensional, zero-offset subset is decoded.
    fn read_binary_array(&mut self, offset: usize) -> Result<Record, NrbfError> {
        let object_id = self.reader.read_i32()?;
        let kind_offset = self.reader.position();
        let kind_code = self.reader.read_u8()?;
        let array_kind = BinaryArrayType::from_byte(kind_code).ok_or(NrbfError::InvalidArrayKind {
            code: kind_code,
            offset: kind_offset,
        })?;
        let rank_offset = self.reader.position();
        let rank = self.reader.read_i32()?;
        let rank = usize::try_from(rank)
            .map_err(|_| NrbfError::InvalidCount { offset: rank_offset })?;
        let mut lengths = Vec::with_capacity(rank);
        for _ in 0..rank {
            let length_offset = self.reader.position();
            let length = self.reader.read_i32()?;
            let length = usize::try_from(length)
                .map_err(|_| NrbfError::InvalidCount { offset: length_offset })?;
            lengths.push(length);
        }
        if array_kind.has_lower_bounds() {
            for _ in 0..rank {
                self.reader.read_i32()?;
            }
        }
        if array_kind.has_lower_bounds() || rank != 1 {
            return Err(NrbfError::UnsupportedArrayShape { offset });
        }
        let binary_type = self.reader.read_binary_type()?;
        let element_type = self.read_additional_info(binary_type)?;
        let total: usize = lengths.iter().product();
        let values =
            self.read_array_values(total, |parser| parser.read_member_value(&element_type))?;
        let value = Value::Array(values);
        self.register_object(object_id, value.clone())?;
        Ok(Record::Object {
            kind: RecordType::BinaryArray,
            object_id,
            value,
        })
    }

    /// `ValueWithCode`: a primitive type byte followed by the value
    fn read_value_with_code(&mut self) -> Result<Value, NrbfError> {
        let primitive_type = self.reader.read_primitive_type()?;
        self.reader.read_primitive(primitive_type)
    }

    /// `StringValueWithCode`: a `ValueWithCode` whose type must be `String`
    fn read_string_value_with_code(&mut self) -> Result<String, NrbfError> {
        let offset = self.reader.position();
        let primitive_type = self.reader.read_primitive_type()?;
        if primitive_type != PrimitiveType::String {
            return Err(NrbfError::InvalidPrimitiveCode {
                code: primitive_type as u8,
                offset,
            });
        }
        self.reader.read_string()
    }

    /// `ArrayOfValueWithCode`: a 32-bit count of `ValueWithCode` entries
    fn read_args_with_code(&mut self) -> Result<Vec<Value>, NrbfError> {
        let count_offset = self.reader.position();
        let length = self.reader.read_i32()?;
        let length = usize::try_from(length)
            .map_err(|_| NrbfError::InvalidCount { offset: count_offset })?;
        let mut values = Vec::with_capacity(length);
        for _ in 0..length {
            values.push(self.read_value_with_code()?);
        }
        Ok(values)
    }

    fn read_method_call(&mut self) -> Result<Record, NrbfError> {
        let flags = MessageFlags(self.reader.read_u32()?);
        let method_name = self.read_string_value_with_code()?;
        let type_name = self.read_string_value_with_code()?;
        let call_context = if flags.contains(MessageFlags::CONTEXT_INLINE) {
            Some(self.read_string_value_with_code()?)
        } else {
            None
        };
        let args = if flags.contains(MessageFlags::ARGS_INLINE) {
            Some(self.read_args_with_code()?)
        } else {
            None
        };
        Ok(Record::MethodCall(MethodCall {
            flags,
            method_name,
            type_name,
            call_context,
            args,
        }))
    }

    fn read_method_return(&mut self) -> Result<Record, NrbfError> {
        let flags = MessageFlags(self.reader.read_u32()?);
        let return_value = if flags.contains(MessageFlags::RETURN_VALUE_INLINE) {
            Some(self.read_value_with_code()?)
        } else {
            None
        };
        let call_context = if flags.contains(MessageFlags::CONTEXT_INLINE) {
            Some(self.read_string_value_with_code()?)
        } else {
            None
        };
        let args = if flags.contains(MessageFlags::ARGS_INLINE) {
            Some(self.read_args_with_code()?)
        } else {
            None
        };
        Ok(Record::MethodReturn(MethodReturn {
            flags,
            return_value,
            call_context,
            args,
        }))
    }

    fn register_object(&mut self, object_id: i32, value: Value) -> Result<(), NrbfError> {
        if self.objects.contains_key(&object_id) {
            return Err(NrbfError::DuplicateId {
                id: object_id,
                offset: self.reader.position(),
            });
        }
        self.objects.insert(object_id, value);
        Ok(())
    }
}

/// Lazy iterator over top-level records, created by [`NrbfReader::records`].
///
/// Finite: the iterator ends after yielding `MessageEnd`, or after the first error.
#[derive(Debug)]
pub struct Records<'a> {
    parser: NrbfReader<'a>,
    done: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record, NrbfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.parser.next_record() {
            Ok(Record::End) => {
                self.done = true;
                Some(Ok(Record::End))
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
            Ok(record) => Some(Ok(record)),
        }
    }
}

/// A completely-parsed serialization stream: the top-level records in order plus the
/// symbol tables the parse accumulated. Reference resolution consumes the object
/// registry held here.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStream {
    header: StreamHeader,
    records: Vec<Record>,
    libraries: HashMap<i32, String>,
    classes: HashMap<i32, ClassLayout>,
    objects: HashMap<i32, Value>,
    reference_count: usize,
}

impl ParsedStream {
    pub fn header(&self) -> &StreamHeader {
        &self.header
    }

    /// Id of the object the stream declares as its root
    pub fn root_id(&self) -> i32 {
        self.header.root_id
    }

    /// The top-level records in stream order, including the header and terminator
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The value registered under an object id
    pub fn object(&self, id: i32) -> Option<&Value> {
        self.objects.get(&id)
    }

    /// The whole object registry
    pub fn objects(&self) -> &HashMap<i32, Value> {
        &self.objects
    }

    /// A class layout registered under a metadata id
    pub fn class(&self, id: i32) -> Option<&ClassLayout> {
        self.classes.get(&id)
    }

    /// The name a `BinaryLibrary` record registered for a library id
    pub fn library(&self, id: i32) -> Option<&str> {
        self.libraries.get(&id).map(String::as_str)
    }

    /// How many objects the stream registered
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// How many `MemberReference` records the stream carried
    pub fn reference_count(&self) -> usize {
        self.reference_count
    }
}
