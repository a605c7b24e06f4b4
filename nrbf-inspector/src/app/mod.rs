/*!
 Command line handling and runtime configuration for the inspector.
*/

pub mod error;
pub mod options;
pub mod runtime;
