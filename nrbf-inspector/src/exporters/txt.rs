/*!
 Renders each top-level record on its own line with a short value preview, followed
 by a summary of what the stream contained.
*/

use std::io::{BufWriter, Write};

use nrbf_parser::{
    nrbf::{
        models::{Record, Value},
        parser::ParsedStream,
    },
    util::dates::{format_datetime, format_timespan},
};

use crate::{
    app::{error::RuntimeError, runtime::Config},
    exporters::exporter::{create_output, Exporter},
};

/// Strings longer than this are truncated in previews
const PREVIEW_CHARS: usize = 48;

pub struct TxtExporter {
    /// Handle to the output we want to write the listing to
    out: BufWriter<Box<dyn Write>>,
}

impl<'a> Exporter<'a> for TxtExporter {
    fn new(config: &'a Config) -> Result<Self, RuntimeError> {
        Ok(Self {
            out: create_output(config)?,
        })
    }

    fn export(&mut self, stream: &ParsedStream) -> Result<(), RuntimeError> {
        for record in stream.records() {
            writeln!(self.out, "{}", format_record(record)).map_err(RuntimeError::DiskError)?;
        }
        writeln!(self.out).map_err(RuntimeError::DiskError)?;
        writeln!(self.out, "Top level records: {}", stream.records().len())
            .map_err(RuntimeError::DiskError)?;
        writeln!(self.out, "Object definitions: {}", stream.object_count())
            .map_err(RuntimeError::DiskError)?;
        writeln!(self.out, "References: {}", stream.reference_count())
            .map_err(RuntimeError::DiskError)?;
        Ok(())
    }
}

fn format_record(record: &Record) -> String {
    match record {
        Record::Header(header) => format!(
            "SerializedStreamHeader root={} version={}.{}",
            header.root_id, header.major_version, header.minor_version
        ),
        Record::Library {
            library_id,
            library_name,
        } => format!("BinaryLibrary id={library_id} name={library_name:?}"),
        Record::Object {
            kind,
            object_id,
            value,
        } => format!("{kind:?} id={object_id} value={}", preview(value)),
        Record::PrimitiveTyped { value } => {
            format!("MemberPrimitiveTyped value={}", preview(value))
        }
        Record::Reference { id_ref } => format!("MemberReference ref={id_ref}"),
        Record::NullRun { count } => format!("ObjectNull x{count}"),
        Record::MethodCall(call) => format!(
            "MethodCall method={} type={}",
            call.method_name, call.type_name
        ),
        Record::MethodReturn(ret) => match &ret.return_value {
            Some(value) => format!("MethodReturn value={}", preview(value)),
            None => "MethodReturn".to_string(),
        },
        Record::End => "MessageEnd".to_string(),
    }
}

/// A short, single-line preview of a decoded value
fn preview(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Boolean(value) => value.to_string(),
        Value::Byte(value) => value.to_string(),
        Value::SByte(value) => value.to_string(),
        Value::Char(value) => format!("{value:?}"),
        Value::Int16(value) => value.to_string(),
        Value::Int32(value) => value.to_string(),
        Value::Int64(value) => value.to_string(),
        Value::UInt16(value) => value.to_string(),
        Value::UInt32(value) => value.to_string(),
        Value::UInt64(value) => value.to_string(),
        Value::Single(value) => value.to_string(),
        Value::Double(value) => value.to_string(),
        Value::Decimal(text) => text.clone(),
        Value::String(text) => {
            if text.chars().count() > PREVIEW_CHARS {
                let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
                format!("{truncated:?}…")
            } else {
                format!("{text:?}")
            }
        }
        Value::DateTime(datetime) => match format_datetime(datetime) {
            Some(text) => text,
            None => format!("{} ticks", datetime.ticks),
        },
        Value::TimeSpan(ticks) => format_timespan(*ticks),
        Value::Array(values) => format!("array[{}]", values.len()),
        Value::Object(instance) => {
            format!("{} {{{} members}}", instance.class, instance.members.len())
        }
        Value::Reference(id) => format!("ref {id}"),
    }
}
