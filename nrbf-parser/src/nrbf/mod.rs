/*!
 Contains logic and data structures used to parse and deserialize MS-NRBF data into native Rust data structures.

 ## Overview

 MS-NRBF is the binary serialization format used by .NET Remoting and by the
 `BinaryFormatter` class. It is self-describing: every record begins with a one-byte
 discriminant, class layouts are declared once and reused by id, and objects can point
 at one another through member references that may run forward through the stream.

 ## Structure

 A well-formed stream is a `SerializedStreamHeader` record, a sequence of content
 records, and a `MessageEnd` record. Parsing populates three tables along the way: the
 libraries named by `BinaryLibrary` records, the class layouts declared by class
 records, and the registry of every object that carries an id. Member references are
 emitted as placeholders and resolved against the registry once the stream has been
 read.

 ## Features

 - Pure Rust implementation without any .NET runtime dependency
 - Robust error handling for malformed or truncated payloads, with byte offsets
 - Lazy record iteration alongside whole-stream parsing
*/

pub mod enums;
pub mod models;
pub mod parser;
pub mod reader;
pub mod resolver;
mod tests;
