#[cfg(test)]
mod parser_tests {
    use crate::{
        error::nrbf::NrbfError,
        nrbf::{
            enums::RecordType,
            models::{Record, Value},
            parser::{parse, NrbfReader},
            resolver::ResolveOptions,
            tests::fixtures::StreamBuilder,
        },
    };

    fn class_instance(value: Option<&Value>) -> &crate::nrbf::models::ClassInstance {
        match value {
            Some(Value::Object(instance)) => instance,
            other => panic!("expected a class instance, got {other:?}"),
        }
    }

    #[test]
    fn can_parse_string_root() {
        let bytes = StreamBuilder::header(1).object_string(1, "hello").end();

        let stream = parse(&bytes).unwrap();

        assert_eq!(stream.root_id(), 1);
        assert_eq!(stream.object(1), Some(&Value::String("hello".to_string())));
        let tree = stream.resolve(ResolveOptions::default()).unwrap();
        assert_eq!(tree, Value::String("hello".to_string()));
    }

    #[test]
    fn can_parse_class_with_primitive_members() {
        let bytes = StreamBuilder::header(2)
            .library(1, "asm")
            .byte(5) // ClassWithMembersAndTypes
            .int32(2)
            .string("Foo")
            .int32(2)
            .string("x")
            .string("y")
            .byte(0) // BinaryType::Primitive
            .byte(0)
            .byte(8) // PrimitiveType::Int32
            .byte(8)
            .int32(1) // library id
            .int32(42)
            .int32(7)
            .end();

        let stream = parse(&bytes).unwrap();

        let instance = class_instance(stream.object(2));
        assert_eq!(instance.class, "Foo");
        assert_eq!(instance.library.as_deref(), Some("asm"));
        assert_eq!(instance.member("x"), Some(&Value::Int32(42)));
        assert_eq!(instance.member("y"), Some(&Value::Int32(7)));
    }

    #[test]
    fn header_must_come_first() {
        let bytes = StreamBuilder::new().object_string(1, "hello").end();

        let result = parse(&bytes);

        assert!(matches!(result, Err(NrbfError::InvalidHeader { offset: 0 })));
    }

    #[test]
    fn header_version_must_be_one_zero() {
        let bytes = StreamBuilder::new()
            .byte(0)
            .int32(1)
            .int32(-1)
            .int32(2) // major version
            .int32(0)
            .object_string(1, "hello")
            .end();

        let result = parse(&bytes);

        assert!(matches!(result, Err(NrbfError::InvalidHeader { offset: 0 })));
    }

    #[test]
    fn truncation_before_message_end_is_an_error() {
        let bytes = StreamBuilder::header(1).object_string(1, "hello").build();

        let result = parse(&bytes);

        assert!(matches!(
            result,
            Err(NrbfError::UnexpectedEndOfStream { .. })
        ));
    }

    #[test]
    fn object_ids_are_unique() {
        let bytes = StreamBuilder::header(1)
            .object_string(1, "first")
            .object_string(1, "second")
            .end();

        let result = parse(&bytes);

        assert!(matches!(result, Err(NrbfError::DuplicateId { id: 1, .. })));
    }

    #[test]
    fn duplicate_library_ids_are_rejected() {
        let bytes = StreamBuilder::header(1)
            .library(1, "asm")
            .library(1, "other")
            .object_string(1, "hello")
            .end();

        let result = parse(&bytes);

        assert!(matches!(result, Err(NrbfError::DuplicateId { id: 1, .. })));
    }

    #[test]
    fn class_with_id_reuses_the_registered_layout() {
        let bytes = StreamBuilder::header(2)
            .library(1, "asm")
            .byte(5)
            .int32(2)
            .string("Foo")
            .int32(2)
            .string("x")
            .string("y")
            .byte(0)
            .byte(0)
            .byte(8)
            .byte(8)
            .int32(1)
            .int32(42)
            .int32(7)
            .byte(1) // ClassWithId
            .int32(10)
            .int32(2) // metadata id
            .int32(1)
            .int32(2)
            .end();

        let stream = parse(&bytes).unwrap();

        let first = class_instance(stream.object(2));
        let second = class_instance(stream.object(10));
        assert_eq!(first.class, second.class);
        let names = |instance: &crate::nrbf::models::ClassInstance| {
            instance
                .members
                .iter()
                .map(|(name, _)| name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(first), names(second));
        assert_eq!(second.member("x"), Some(&Value::Int32(1)));
        assert_eq!(second.member("y"), Some(&Value::Int32(2)));
    }

    #[test]
    fn class_with_id_requires_a_registered_layout() {
        let bytes = StreamBuilder::header(2)
            .byte(1)
            .int32(10)
            .int32(99) // never declared
            .end();

        let result = parse(&bytes);

        assert!(matches!(result, Err(NrbfError::UnknownClass { id: 99, .. })));
    }

    #[test]
    fn class_records_require_a_registered_library() {
        let bytes = StreamBuilder::header(2)
            .byte(5)
            .int32(2)
            .string("Foo")
            .int32(0)
            .int32(9) // library id, never registered
            .end();

        let result = parse(&bytes);

        assert!(matches!(result, Err(NrbfError::UnknownLibrary { id: 9, .. })));
    }

    #[test]
    fn null_runs_expand_inside_object_arrays() {
        let bytes = StreamBuilder::header(3)
            .byte(16) // ArraySingleObject
            .int32(3)
            .int32(5)
            .object_string(4, "a")
            .byte(13) // ObjectNullMultiple256
            .byte(3)
            .object_string(5, "b")
            .end();

        let stream = parse(&bytes).unwrap();

        let tree = stream.resolve(ResolveOptions::default()).unwrap();
        assert_eq!(
            tree,
            Value::Array(vec![
                Value::String("a".to_string()),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::String("b".to_string()),
            ])
        );
    }

    #[test]
    fn null_runs_cannot_exceed_the_array_length() {
        let bytes = StreamBuilder::header(3)
            .byte(16)
            .int32(3)
            .int32(2)
            .byte(14) // ObjectNullMultiple
            .int32(3)
            .end();

        let result = parse(&bytes);

        assert!(matches!(result, Err(NrbfError::NullRunOverflow { .. })));
    }

    #[test]
    fn offset_and_multidimensional_arrays_are_unsupported() {
        let bytes = StreamBuilder::header(8)
            .byte(7) // BinaryArray
            .int32(8)
            .byte(5) // RectangularOffset
            .int32(2) // rank
            .int32(2)
            .int32(2)
            .int32(0) // lower bounds
            .int32(0)
            .build();

        let result = parse(&bytes);

        assert!(matches!(
            result,
            Err(NrbfError::UnsupportedArrayShape { .. })
        ));
    }

    #[test]
    fn single_dimension_binary_array_is_decoded() {
        let bytes = StreamBuilder::header(8)
            .byte(7)
            .int32(8)
            .byte(0) // Single
            .int32(1) // rank
            .int32(3)
            .byte(0) // BinaryType::Primitive
            .byte(8) // PrimitiveType::Int32
            .int32(1)
            .int32(2)
            .int32(3)
            .end();

        let stream = parse(&bytes).unwrap();

        assert_eq!(
            stream.object(8),
            Some(&Value::Array(vec![
                Value::Int32(1),
                Value::Int32(2),
                Value::Int32(3),
            ]))
        );
    }

    #[test]
    fn can_parse_primitive_array() {
        let bytes = StreamBuilder::header(6)
            .byte(15) // ArraySinglePrimitive
            .int32(6)
            .int32(2)
            .byte(9) // PrimitiveType::Int64
            .raw(&100i64.to_le_bytes())
            .raw(&(-100i64).to_le_bytes())
            .end();

        let stream = parse(&bytes).unwrap();

        assert_eq!(
            stream.object(6),
            Some(&Value::Array(vec![Value::Int64(100), Value::Int64(-100)]))
        );
    }

    #[test]
    fn primitive_arrays_cannot_hold_strings() {
        let bytes = StreamBuilder::header(6)
            .byte(15)
            .int32(6)
            .int32(1)
            .byte(18) // PrimitiveType::String
            .build();

        let result = parse(&bytes);

        assert!(matches!(
            result,
            Err(NrbfError::InvalidPrimitiveCode { code: 18, .. })
        ));
    }

    #[test]
    fn can_parse_string_array() {
        let bytes = StreamBuilder::header(7)
            .byte(17) // ArraySingleString
            .int32(7)
            .int32(3)
            .object_string(8, "x")
            .byte(10) // ObjectNull
            .object_string(9, "y")
            .end();

        let stream = parse(&bytes).unwrap();

        assert_eq!(
            stream.object(7),
            Some(&Value::Array(vec![
                Value::String("x".to_string()),
                Value::Null,
                Value::String("y".to_string()),
            ]))
        );
    }

    #[test]
    fn string_arrays_reject_other_record_kinds() {
        let bytes = StreamBuilder::header(7)
            .byte(17)
            .int32(7)
            .int32(1)
            .byte(8) // MemberPrimitiveTyped
            .byte(8)
            .int32(1)
            .end();

        let result = parse(&bytes);

        assert!(matches!(
            result,
            Err(NrbfError::UnexpectedRecord {
                kind: RecordType::MemberPrimitiveTyped,
                ..
            })
        ));
    }

    #[test]
    fn untyped_class_members_are_self_described() {
        let bytes = StreamBuilder::header(4)
            .byte(2) // SystemClassWithMembers
            .int32(4)
            .string("Sys")
            .int32(1)
            .string("s")
            .object_string(5, "hi")
            .end();

        let stream = parse(&bytes).unwrap();

        let instance = class_instance(stream.object(4));
        assert_eq!(instance.class, "Sys");
        assert_eq!(instance.library, None);
        assert_eq!(instance.member("s"), Some(&Value::String("hi".to_string())));
    }

    #[test]
    fn nested_class_members_recurse() {
        let bytes = StreamBuilder::header(2)
            .library(1, "asm")
            .byte(5)
            .int32(2)
            .string("Outer")
            .int32(1)
            .string("inner")
            .byte(4) // BinaryType::Class
            .string("Bar")
            .int32(1)
            .int32(1) // library id of Outer
            // The member value arrives as an inline class record
            .byte(5)
            .int32(3)
            .string("Bar")
            .int32(1)
            .string("z")
            .byte(0)
            .byte(8)
            .int32(1)
            .int32(99)
            .end();

        let stream = parse(&bytes).unwrap();

        let outer = class_instance(stream.object(2));
        let inner = class_instance(outer.member("inner"));
        assert_eq!(inner.class, "Bar");
        assert_eq!(inner.member("z"), Some(&Value::Int32(99)));
        // The nested instance is also registered under its own id
        assert_eq!(stream.object(3), outer.member("inner"));
    }

    #[test]
    fn libraries_can_be_interleaved_in_value_position() {
        let bytes = StreamBuilder::header(3)
            .byte(16) // ArraySingleObject
            .int32(3)
            .int32(1)
            .library(1, "late")
            .object_string(4, "v")
            .end();

        let stream = parse(&bytes).unwrap();

        assert_eq!(stream.library(1), Some("late"));
        assert_eq!(
            stream.object(3),
            Some(&Value::Array(vec![Value::String("v".to_string())]))
        );
    }

    #[test]
    fn member_primitive_typed_records_carry_their_value() {
        let bytes = StreamBuilder::header(1)
            .byte(8) // MemberPrimitiveTyped
            .byte(8) // PrimitiveType::Int32
            .int32(42)
            .object_string(1, "root")
            .end();

        let stream = parse(&bytes).unwrap();

        assert!(stream
            .records()
            .iter()
            .any(|record| matches!(record, Record::PrimitiveTyped { value: Value::Int32(42) })));
    }

    #[test]
    fn records_iterate_lazily_and_stop_at_message_end() {
        let bytes = StreamBuilder::header(1).object_string(1, "hello").end();

        let mut records = NrbfReader::from(&bytes).records();

        assert!(matches!(records.next(), Some(Ok(Record::Header(_)))));
        assert!(matches!(
            records.next(),
            Some(Ok(Record::Object {
                kind: RecordType::BinaryObjectString,
                object_id: 1,
                ..
            }))
        ));
        assert!(matches!(records.next(), Some(Ok(Record::End))));
        assert!(records.next().is_none());
    }

    #[test]
    fn no_record_can_follow_message_end() {
        let bytes = StreamBuilder::header(1).object_string(1, "hello").end();

        let mut reader = NrbfReader::from(&bytes);
        while !matches!(reader.next_record().unwrap(), Record::End) {}

        assert!(matches!(
            reader.next_record(),
            Err(NrbfError::StreamTerminated { .. })
        ));
    }

    #[test]
    fn unknown_record_types_are_rejected() {
        let bytes = StreamBuilder::header(1).byte(19).end();

        let result = parse(&bytes);

        assert!(matches!(
            result,
            Err(NrbfError::InvalidRecordType { code: 19, .. })
        ));
    }

    #[test]
    fn can_parse_method_call_with_inline_args() {
        let flags = 0x0010 | 0x0002; // NoContext | ArgsInline
        let bytes = StreamBuilder::header(1)
            .byte(21) // MethodCall
            .int32(flags)
            .byte(18) // StringValueWithCode
            .string("Ping")
            .byte(18)
            .string("EchoService")
            .int32(1) // one inline argument
            .byte(8)
            .int32(42)
            .object_string(1, "root")
            .end();

        let stream = parse(&bytes).unwrap();

        let call = stream
            .records()
            .iter()
            .find_map(|record| match record {
                Record::MethodCall(call) => Some(call),
                _ => None,
            })
            .unwrap();
        assert_eq!(call.method_name, "Ping");
        assert_eq!(call.type_name, "EchoService");
        assert_eq!(call.call_context, None);
        assert_eq!(call.args, Some(vec![Value::Int32(42)]));
    }

    #[test]
    fn can_parse_method_return_with_inline_value() {
        let flags = 0x0010 | 0x0001 | 0x0800; // NoContext | NoArgs | ReturnValueInline
        let bytes = StreamBuilder::header(1)
            .byte(22) // MethodReturn
            .int32(flags)
            .byte(8)
            .int32(7)
            .object_string(1, "root")
            .end();

        let stream = parse(&bytes).unwrap();

        let ret = stream
            .records()
            .iter()
            .find_map(|record| match record {
                Record::MethodReturn(ret) => Some(ret),
                _ => None,
            })
            .unwrap();
        assert_eq!(ret.return_value, Some(Value::Int32(7)));
        assert_eq!(ret.args, None);
    }
}
