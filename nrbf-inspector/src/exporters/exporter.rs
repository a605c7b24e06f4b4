/*!
 Defines behavior shared by the inspector's output formats.
*/

use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use nrbf_parser::nrbf::parser::ParsedStream;

use crate::app::{error::RuntimeError, runtime::Config};

/// Defines behavior for rendering a parsed stream to the desired output format
pub trait Exporter<'a> {
    /// Create a new exporter pointed at the configured output
    fn new(config: &'a Config) -> Result<Self, RuntimeError>
    where
        Self: Sized;
    /// Render the stream
    fn export(&mut self, stream: &ParsedStream) -> Result<(), RuntimeError>;
}

/// Open the configured output path for writing, or stdout when none was given
pub(super) fn create_output(config: &Config) -> Result<BufWriter<Box<dyn Write>>, RuntimeError> {
    match &config.options.output_path {
        Some(path) => {
            let file =
                File::create(path).map_err(|why| RuntimeError::CreateError(why, path.clone()))?;
            let writer: Box<dyn Write> = Box::new(file);
            Ok(BufWriter::new(writer))
        }
        None => {
            let writer: Box<dyn Write> = Box::new(io::stdout());
            Ok(BufWriter::new(writer))
        }
    }
}
