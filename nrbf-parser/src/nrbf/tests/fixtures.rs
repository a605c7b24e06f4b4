/*!
 A small byte-level builder for assembling MS-NRBF streams in tests.
*/

/// Assembles an MS-NRBF payload record by record
pub(crate) struct StreamBuilder {
    bytes: Vec<u8>,
}

impl StreamBuilder {
    /// Start from nothing, for streams that should be malformed
    pub(crate) fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Start with a version 1.0 `SerializedStreamHeader`
    pub(crate) fn header(root_id: i32) -> Self {
        Self::new().byte(0).int32(root_id).int32(-1).int32(1).int32(0)
    }

    pub(crate) fn byte(mut self, byte: u8) -> Self {
        self.bytes.push(byte);
        self
    }

    pub(crate) fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub(crate) fn int32(mut self, value: i32) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// A 7-bit length prefix followed by UTF-8 bytes
    pub(crate) fn string(mut self, text: &str) -> Self {
        let mut length = text.len();
        loop {
            let mut byte = (length & 0x7F) as u8;
            length >>= 7;
            if length > 0 {
                byte |= 0x80;
            }
            self.bytes.push(byte);
            if length == 0 {
                break;
            }
        }
        self.bytes.extend_from_slice(text.as_bytes());
        self
    }

    /// A `BinaryLibrary` record
    pub(crate) fn library(self, library_id: i32, name: &str) -> Self {
        self.byte(12).int32(library_id).string(name)
    }

    /// A `BinaryObjectString` record
    pub(crate) fn object_string(self, object_id: i32, text: &str) -> Self {
        self.byte(6).int32(object_id).string(text)
    }

    /// A `MemberReference` record
    pub(crate) fn reference(self, id_ref: i32) -> Self {
        self.byte(9).int32(id_ref)
    }

    /// Append a `MessageEnd` record and return the finished payload
    pub(crate) fn end(self) -> Vec<u8> {
        self.byte(11).bytes
    }

    /// Return the payload without a terminator
    pub(crate) fn build(self) -> Vec<u8> {
        self.bytes
    }
}
