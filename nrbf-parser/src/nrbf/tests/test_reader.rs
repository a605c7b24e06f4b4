#[cfg(test)]
mod reader_tests {
    use crate::{
        error::nrbf::NrbfError,
        nrbf::{
            enums::PrimitiveType,
            models::{DateTimeKind, Value},
            reader::StreamReader,
        },
    };

    #[test]
    fn can_read_little_endian_integers() {
        let bytes: Vec<u8> = vec![0x01, 0x02, 0x03, 0x04];
        let mut reader = StreamReader::from(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 0x0403_0201);
        assert_eq!(reader.position(), 4);

        let bytes = (-2i64).to_le_bytes();
        let mut reader = StreamReader::from(&bytes);
        assert_eq!(reader.read_i64().unwrap(), -2);
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn nonzero_bytes_are_true() {
        let bytes: Vec<u8> = vec![0, 1, 2];
        let mut reader = StreamReader::from(&bytes);
        assert!(!reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
    }

    #[test]
    fn can_read_variable_length() {
        let bytes: Vec<u8> = vec![0x05];
        assert_eq!(StreamReader::from(&bytes).read_variable_length().unwrap(), 5);

        let bytes: Vec<u8> = vec![0x80, 0x02];
        assert_eq!(
            StreamReader::from(&bytes).read_variable_length().unwrap(),
            256
        );

        let bytes: Vec<u8> = vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F];
        assert_eq!(
            StreamReader::from(&bytes).read_variable_length().unwrap(),
            0xFFFF_FFFF
        );
    }

    #[test]
    fn length_prefix_cannot_exceed_five_bytes() {
        let bytes: Vec<u8> = vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        let result = StreamReader::from(&bytes).read_variable_length();
        assert!(matches!(
            result,
            Err(NrbfError::InvalidLengthPrefix { offset: 0 })
        ));
    }

    #[test]
    fn can_read_string() {
        let bytes: Vec<u8> = vec![3, b'a', b'b', b'c'];
        assert_eq!(StreamReader::from(&bytes).read_string().unwrap(), "abc");
    }

    #[test]
    fn malformed_string_is_rejected() {
        let bytes: Vec<u8> = vec![2, 0xFF, 0xFE];
        let result = StreamReader::from(&bytes).read_string();
        assert!(matches!(result, Err(NrbfError::InvalidUtf8 { offset: 1 })));
    }

    #[test]
    fn can_read_basic_plane_char() {
        let bytes: Vec<u8> = vec![0x41, 0x00];
        let mut reader = StreamReader::from(&bytes);
        assert_eq!(reader.read_char().unwrap(), 'A');
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn can_read_surrogate_pair_char() {
        // U+1F600 is 0xD83D 0xDE00 in UTF-16
        let bytes: Vec<u8> = vec![0x3D, 0xD8, 0x00, 0xDE];
        let mut reader = StreamReader::from(&bytes);
        assert_eq!(reader.read_char().unwrap(), '\u{1F600}');
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn unpaired_surrogate_is_rejected() {
        let bytes: Vec<u8> = vec![0x3D, 0xD8, 0x41, 0x00];
        let result = StreamReader::from(&bytes).read_char();
        assert!(matches!(result, Err(NrbfError::InvalidUtf16 { offset: 0 })));

        let bytes: Vec<u8> = vec![0x00, 0xDC];
        let result = StreamReader::from(&bytes).read_char();
        assert!(matches!(result, Err(NrbfError::InvalidUtf16 { offset: 0 })));
    }

    #[test]
    fn can_read_decimal() {
        let mut bytes: Vec<u8> = vec![7];
        bytes.extend_from_slice(b"-123.45");
        assert_eq!(StreamReader::from(&bytes).read_decimal().unwrap(), "-123.45");
    }

    #[test]
    fn malformed_decimals_are_rejected() {
        for text in ["1.2.3", "abc", "", "-", "1."] {
            let mut bytes: Vec<u8> = vec![text.len() as u8];
            bytes.extend_from_slice(text.as_bytes());
            let result = StreamReader::from(&bytes).read_decimal();
            assert!(
                matches!(result, Err(NrbfError::InvalidDecimal { offset: 0 })),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn datetime_kind_lives_in_the_top_two_bits() {
        let raw: u64 = 12_345 | (1 << 62);
        let bytes = raw.to_le_bytes();
        let datetime = StreamReader::from(&bytes).read_datetime().unwrap();
        assert_eq!(datetime.ticks, 12_345);
        assert_eq!(datetime.kind, DateTimeKind::Utc);

        let raw: u64 = 12_345 | (2 << 62);
        let bytes = raw.to_le_bytes();
        let datetime = StreamReader::from(&bytes).read_datetime().unwrap();
        assert_eq!(datetime.kind, DateTimeKind::Local);

        let bytes = 12_345u64.to_le_bytes();
        let datetime = StreamReader::from(&bytes).read_datetime().unwrap();
        assert_eq!(datetime.kind, DateTimeKind::Unspecified);
    }

    #[test]
    fn reads_cannot_cross_the_end_of_the_stream() {
        let bytes: Vec<u8> = vec![1];
        let result = StreamReader::from(&bytes).read_u32();
        assert!(matches!(
            result,
            Err(NrbfError::UnexpectedEndOfStream {
                offset: 0,
                length: 1
            })
        ));
    }

    #[test]
    fn primitives_consume_their_documented_widths() {
        let widths = [
            (PrimitiveType::Boolean, 1),
            (PrimitiveType::Byte, 1),
            (PrimitiveType::Double, 8),
            (PrimitiveType::Int16, 2),
            (PrimitiveType::Int32, 4),
            (PrimitiveType::Int64, 8),
            (PrimitiveType::SByte, 1),
            (PrimitiveType::Single, 4),
            (PrimitiveType::TimeSpan, 8),
            (PrimitiveType::DateTime, 8),
            (PrimitiveType::UInt16, 2),
            (PrimitiveType::UInt32, 4),
            (PrimitiveType::UInt64, 8),
            (PrimitiveType::Null, 0),
        ];
        let bytes = [0u8; 8];
        for (primitive_type, width) in widths {
            let mut reader = StreamReader::from(&bytes);
            reader.read_primitive(primitive_type).unwrap();
            assert_eq!(
                reader.position(),
                width,
                "wrong width for {primitive_type:?}"
            );
        }
    }

    #[test]
    fn null_primitive_reads_nothing() {
        let bytes: Vec<u8> = vec![];
        let mut reader = StreamReader::from(&bytes);
        assert_eq!(reader.read_primitive(PrimitiveType::Null).unwrap(), Value::Null);
        assert!(reader.is_exhausted());
    }
}
