//! Encoder for line-oriented configuration documents.
//!
//! Walks a record's schema in declaration order and writes one
//! `key = value` line per field. Encoding stops at the first failure; the
//! sink is left partially written and callers wanting atomicity must
//! buffer and swap externally.

use crate::codec::fallback::FallbackHook;
use crate::error::{CodecError, CodecResult};
use crate::schema::{Record, Value};
use std::io::Write;
use tracing::trace;

/// An `Encoder` writes config records to an output sink.
pub struct Encoder<W: Write> {
    sink: W,
    /// Observer for field kinds the encoder cannot format.
    pub fallback: Option<Box<dyn FallbackHook>>,
}

impl<W: Write> Encoder<W> {
    /// Create a new encoder that writes to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            fallback: None,
        }
    }

    /// Consume the encoder and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Write one `key = value` line per declared field, in declaration
    /// order.
    ///
    /// `Int` and `Uint` format as plain decimal, `Bool` as `true`/`false`,
    /// `String` raw and unescaped, `Float64` as fixed-point with six
    /// fractional digits, and `Rectangle`/`Color` as four comma-separated
    /// decimal integers. `Float32` and the complex kinds are not supported
    /// here: the fallback hook (if any) observes the value first and the
    /// call then fails with an unsupported-kind error either way.
    pub fn encode<R: Record>(&mut self, record: &R) -> CodecResult<()> {
        let schema = R::schema();
        for field in schema.fields() {
            let value = field.current(record);
            let text = self.format_value(field.key(), &value)?;
            trace!("write {} = {}", field.key(), text);
            writeln!(self.sink, "{} = {}", field.key(), text).map_err(|source| {
                CodecError::Write {
                    key: field.key().to_string(),
                    kind: field.kind(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    fn format_value(&self, key: &str, value: &Value) -> CodecResult<String> {
        match value {
            Value::Int(v) => Ok(v.to_string()),
            Value::Uint(v) => Ok(v.to_string()),
            Value::Bool(v) => Ok(v.to_string()),
            Value::String(v) => Ok(v.clone()),
            Value::Float64(v) => Ok(format!("{v:.6}")),
            Value::Rectangle(v) => Ok(v.to_string()),
            Value::Color(v) => Ok(v.to_string()),
            unsupported => {
                if let Some(hook) = &self.fallback {
                    hook.try_format(key, unsupported)
                        .map_err(|source| CodecError::Fallback {
                            key: key.to_string(),
                            source,
                        })?;
                }
                Err(CodecError::unsupported(key, unsupported.kind()))
            }
        }
    }
}
