#[cfg(test)]
mod enum_tests {
    use crate::nrbf::{
        enums::{BinaryArrayType, BinaryType, PrimitiveType, RecordType},
        models::MessageFlags,
    };

    #[test]
    fn record_types_cover_the_documented_set() {
        assert_eq!(
            RecordType::from_byte(0),
            Some(RecordType::SerializedStreamHeader)
        );
        assert_eq!(RecordType::from_byte(11), Some(RecordType::MessageEnd));
        assert_eq!(
            RecordType::from_byte(17),
            Some(RecordType::ArraySingleString)
        );
        assert_eq!(RecordType::from_byte(21), Some(RecordType::MethodCall));
        assert_eq!(RecordType::from_byte(22), Some(RecordType::MethodReturn));
    }

    #[test]
    fn undocumented_record_types_are_unknown() {
        for code in [18, 19, 20, 23, 0xFF] {
            assert_eq!(RecordType::from_byte(code), None, "code {code}");
        }
    }

    #[test]
    fn primitive_code_four_is_a_gap() {
        assert_eq!(PrimitiveType::from_byte(4), None);
        assert_eq!(PrimitiveType::from_byte(0), None);
        assert_eq!(PrimitiveType::from_byte(19), None);
        assert_eq!(PrimitiveType::from_byte(1), Some(PrimitiveType::Boolean));
        assert_eq!(PrimitiveType::from_byte(18), Some(PrimitiveType::String));
    }

    #[test]
    fn binary_types_stop_at_primitive_array() {
        assert_eq!(BinaryType::from_byte(0), Some(BinaryType::Primitive));
        assert_eq!(BinaryType::from_byte(7), Some(BinaryType::PrimitiveArray));
        assert_eq!(BinaryType::from_byte(8), None);
    }

    #[test]
    fn offset_array_shapes_carry_lower_bounds() {
        assert!(!BinaryArrayType::Single.has_lower_bounds());
        assert!(!BinaryArrayType::Jagged.has_lower_bounds());
        assert!(!BinaryArrayType::Rectangular.has_lower_bounds());
        assert!(BinaryArrayType::SingleOffset.has_lower_bounds());
        assert!(BinaryArrayType::JaggedOffset.has_lower_bounds());
        assert!(BinaryArrayType::RectangularOffset.has_lower_bounds());
    }

    #[test]
    fn message_flags_test_individual_bits() {
        let flags = MessageFlags(MessageFlags::ARGS_INLINE | MessageFlags::NO_CONTEXT);
        assert!(flags.contains(MessageFlags::ARGS_INLINE));
        assert!(flags.contains(MessageFlags::NO_CONTEXT));
        assert!(!flags.contains(MessageFlags::CONTEXT_INLINE));
        assert!(!flags.contains(MessageFlags::RETURN_VALUE_INLINE));
    }
}
