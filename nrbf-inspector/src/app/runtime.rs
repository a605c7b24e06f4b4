/*!
 Data used across the application's runtime: the loaded payload and the steps that
 take it from bytes to an export.
*/

use std::fs;

use base64::{prelude::BASE64_STANDARD, Engine};
use nrbf_parser::nrbf::parser::parse;

use crate::{
    app::{
        error::RuntimeError,
        options::{ExportFormat, Options},
    },
    exporters::{exporter::Exporter, json::JsonExporter, txt::TxtExporter},
};

/// Data that is setup from the application's runtime
pub struct Config {
    /// Options set by the user
    pub options: Options,
    /// The payload to decode, already base64-decoded if that was requested
    bytes: Vec<u8>,
}

impl Config {
    /// Load the input payload from disk, decoding base64 text when requested
    pub fn new(options: Options) -> Result<Self, RuntimeError> {
        let raw = fs::read(&options.input_path).map_err(RuntimeError::DiskError)?;
        let bytes = if options.base64 {
            let text: Vec<u8> = raw
                .iter()
                .copied()
                .filter(|byte| !byte.is_ascii_whitespace())
                .collect();
            BASE64_STANDARD
                .decode(text)
                .map_err(RuntimeError::InvalidBase64)?
        } else {
            raw
        };
        Ok(Self { options, bytes })
    }

    /// Parse the payload and run the selected exporter over it
    pub fn run(&self) -> Result<(), RuntimeError> {
        let stream = parse(&self.bytes).map_err(RuntimeError::ParseError)?;
        match self.options.format {
            ExportFormat::Json => JsonExporter::new(self)?.export(&stream),
            ExportFormat::Txt => TxtExporter::new(self)?.export(&stream),
        }
    }
}
