/*!
 Errors that can happen when parsing MS-NRBF data or resolving the object graph it describes.
*/

pub mod decode;
pub mod nrbf;
pub mod resolve;
