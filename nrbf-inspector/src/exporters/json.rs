/*!
 Renders the decoded value tree as JSON in its crunched form: class instances become
 objects keyed by member name with null-valued members omitted, arrays become JSON
 arrays (keeping their null elements), and the class metadata the stream carried is
 dropped.
*/

use std::io::{BufWriter, Write};

use json::{object::Object, JsonValue};
use nrbf_parser::{
    nrbf::{models::Value, parser::ParsedStream, resolver::ResolveMode},
    util::dates::{format_datetime, format_timespan},
};

use crate::{
    app::{error::RuntimeError, runtime::Config},
    exporters::exporter::{create_output, Exporter},
};

pub struct JsonExporter<'a> {
    /// Data that is setup from the application's runtime
    config: &'a Config,
    /// Handle to the output we want to write JSON to
    out: BufWriter<Box<dyn Write>>,
}

impl<'a> Exporter<'a> for JsonExporter<'a> {
    fn new(config: &'a Config) -> Result<Self, RuntimeError> {
        Ok(Self {
            config,
            out: create_output(config)?,
        })
    }

    fn export(&mut self, stream: &ParsedStream) -> Result<(), RuntimeError> {
        let tree = stream
            .resolve(self.config.options.resolve)
            .map_err(RuntimeError::ResolveError)?;
        let mut rendered = render(&tree);

        // When references are kept in place they only mean something next to the
        // registry they index into, so emit both
        if self.config.options.resolve.mode == ResolveMode::InPlace {
            let mut objects = Object::new();
            let mut ids: Vec<i32> = stream.objects().keys().copied().collect();
            ids.sort_unstable();
            for id in ids {
                if let Some(value) = stream.object(id) {
                    objects.insert(&id.to_string(), render(value));
                }
            }
            let mut document = Object::new();
            document.insert("root", rendered);
            document.insert("objects", JsonValue::Object(objects));
            rendered = JsonValue::Object(document);
        }

        let text = if self.config.options.pretty {
            rendered.pretty(2)
        } else {
            rendered.dump()
        };
        writeln!(self.out, "{text}").map_err(RuntimeError::DiskError)
    }
}

/// Convert one decoded value to its JSON rendering
fn render(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(value) => JsonValue::from(*value),
        Value::Byte(value) => JsonValue::from(*value),
        Value::SByte(value) => JsonValue::from(*value),
        Value::Char(value) => JsonValue::from(value.to_string()),
        Value::Int16(value) => JsonValue::from(*value),
        Value::Int32(value) => JsonValue::from(*value),
        Value::Int64(value) => JsonValue::from(*value),
        Value::UInt16(value) => JsonValue::from(*value),
        Value::UInt32(value) => JsonValue::from(*value),
        Value::UInt64(value) => JsonValue::from(*value),
        Value::Single(value) => JsonValue::from(*value),
        Value::Double(value) => JsonValue::from(*value),
        Value::Decimal(text) => JsonValue::from(text.as_str()),
        Value::String(text) => JsonValue::from(text.as_str()),
        Value::DateTime(datetime) => {
            let mut object = Object::new();
            object.insert("ticks", JsonValue::from(datetime.ticks));
            object.insert("kind", JsonValue::from(format!("{:?}", datetime.kind)));
            let timestamp = match format_datetime(datetime) {
                Some(text) => JsonValue::from(text),
                None => JsonValue::Null,
            };
            object.insert("timestamp", timestamp);
            JsonValue::Object(object)
        }
        Value::TimeSpan(ticks) => {
            let mut object = Object::new();
            object.insert("ticks", JsonValue::from(*ticks));
            object.insert("duration", JsonValue::from(format_timespan(*ticks)));
            JsonValue::Object(object)
        }
        Value::Array(values) => JsonValue::Array(values.iter().map(render).collect()),
        Value::Object(instance) => {
            let mut object = Object::new();
            for (name, member) in &instance.members {
                // Null members are dropped from the minified form; nulls inside
                // arrays are kept
                if matches!(member, Value::Null) {
                    continue;
                }
                object.insert(name, render(member));
            }
            JsonValue::Object(object)
        }
        Value::Reference(id) => {
            let mut object = Object::new();
            object.insert("$ref", JsonValue::from(*id));
            JsonValue::Object(object)
        }
    }
}
