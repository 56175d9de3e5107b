//! Decoder for line-oriented configuration documents.
//!
//! Decoding runs in two passes over one schema read: declared defaults are
//! applied first, then the input is scanned line by line and matched
//! assignments are parsed into the record. Key presence is validated after
//! the scan according to the decoder's policy flags. There is no partial
//! success; the record is left partially mutated when decoding stops at
//! the first fatal condition.

use crate::codec::fallback::FallbackHook;
use crate::error::{CodecError, CodecResult, ValueParseError};
use crate::schema::value::parse_bool;
use crate::schema::{Record, Schema, Value, ValueKind};
use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};
use tracing::{debug, trace, warn};

/// A `Decoder` reads config values from an input source.
pub struct Decoder<S: Read> {
    reader: BufReader<S>,
    /// Observer for value kinds the line parser cannot handle. The line
    /// parser currently fails these outright without consulting it.
    pub decode_fallback: Option<Box<dyn FallbackHook>>,
    /// Observer for value kinds the default applier cannot parse.
    pub default_fallback: Option<Box<dyn FallbackHook>>,
    /// Fail when an assignment line's key matches no declared field.
    pub fail_on_unknown_key: bool,
    /// Fail when a declared key never appears in the input.
    pub fail_on_missing_key: bool,
}

impl<S: Read> Decoder<S> {
    /// Create a new decoder that reads from `source`, with both policy
    /// flags off and no fallback hooks.
    pub fn new(source: S) -> Self {
        Self {
            reader: BufReader::new(source),
            decode_fallback: None,
            default_fallback: None,
            fail_on_unknown_key: false,
            fail_on_missing_key: false,
        }
    }

    /// Decode the input into `record`.
    ///
    /// Declared defaults are parsed and assigned before any line is read,
    /// so declared-but-absent keys still end up with a concrete value.
    /// The source is consumed forward-only; a transport error aborts
    /// immediately.
    pub fn decode<R: Record>(&mut self, record: &mut R) -> CodecResult<()> {
        let schema = R::schema();
        self.apply_defaults(&schema, record)?;
        self.parse_document(&schema, record)
    }

    /// Parse and assign every declared default, in declaration order.
    fn apply_defaults<R>(&self, schema: &Schema<R>, record: &mut R) -> CodecResult<()> {
        for field in schema.fields() {
            let Some(raw) = field.default() else {
                continue;
            };
            if !field.kind().supports_default() {
                if let Some(hook) = &self.default_fallback {
                    hook.try_parse(field.key(), field.kind(), raw).map_err(
                        |source| CodecError::Fallback {
                            key: field.key().to_string(),
                            source,
                        },
                    )?;
                }
                return Err(CodecError::unsupported(field.key(), field.kind()));
            }
            let value =
                parse_default_value(field.kind(), raw).map_err(|source| {
                    CodecError::DefaultParse {
                        key: field.key().to_string(),
                        kind: field.kind(),
                        raw: raw.to_string(),
                        source,
                    }
                })?;
            debug!("default {} = {}", field.key(), raw);
            field.assign(record, value);
        }
        Ok(())
    }

    /// Scan the input line by line, assigning matched keys and enforcing
    /// key policy.
    fn parse_document<R>(&mut self, schema: &Schema<R>, record: &mut R) -> CodecResult<()> {
        let mut found: HashSet<String> = HashSet::new();
        let mut line_number: u64 = 0;

        for line in (&mut self.reader).lines() {
            let line = line.map_err(|source| CodecError::Read {
                line: line_number + 1,
                source,
            })?;
            line_number += 1;

            // Comment detection is on the raw line: an indented `#` is not
            // a comment.
            if line.starts_with('#') {
                trace!("line {}: comment", line_number);
                continue;
            }
            let Some((raw_key, raw_value)) = split_assignment(&line) else {
                trace!("line {}: ignored", line_number);
                continue;
            };
            let key = raw_key.trim().to_lowercase();
            let value = raw_value.trim();

            let mut is_known = false;
            for field in schema.fields() {
                // Declared keys are compared verbatim against the
                // lowercased line key.
                if field.key() != key {
                    continue;
                }
                let parsed = parse_line_value(field.kind(), value).map_err(|source| {
                    match source {
                        LineValueError::Parse(source) => CodecError::LineParse {
                            line: line_number,
                            key: key.clone(),
                            value: value.to_string(),
                            kind: field.kind(),
                            source,
                        },
                        LineValueError::Unsupported => CodecError::UnsupportedLineKind {
                            line: line_number,
                            key: key.clone(),
                            kind: field.kind(),
                        },
                    }
                })?;
                debug!("line {}: {} = {}", line_number, key, value);
                field.assign(record, parsed);
                is_known = true;
                found.insert(key.clone());
            }

            if !is_known {
                if self.fail_on_unknown_key {
                    return Err(CodecError::UnknownKey {
                        line: line_number,
                        key,
                    });
                }
                warn!("line {}: ignoring unknown key {}", line_number, key);
            }
        }

        if self.fail_on_missing_key {
            for field in schema.fields() {
                if !found.contains(field.key()) {
                    return Err(CodecError::missing_key(field.key()));
                }
            }
        }
        Ok(())
    }
}

/// Split an assignment candidate into its key and value halves.
///
/// Returns `None` unless the line splits on `=` into exactly two parts;
/// blank lines, lines without `=`, and lines with more than one `=` are
/// all ignored rather than reported.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split('=');
    let key = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((key, value))
}

/// Parse a declared default string into the field's kind.
///
/// This is the superset path: every native kind has a default parser.
fn parse_default_value(kind: ValueKind, raw: &str) -> Result<Value, ValueParseError> {
    match kind {
        ValueKind::Int => Ok(Value::Int(raw.parse()?)),
        ValueKind::Uint => Ok(Value::Uint(raw.parse()?)),
        ValueKind::Bool => Ok(Value::Bool(parse_bool(raw)?)),
        ValueKind::String => Ok(Value::String(raw.to_string())),
        ValueKind::Float32 => Ok(Value::Float32(raw.parse()?)),
        ValueKind::Float64 => Ok(Value::Float64(raw.parse()?)),
        ValueKind::Complex64 => Ok(Value::Complex64(raw.parse()?)),
        ValueKind::Complex128 => Ok(Value::Complex128(raw.parse()?)),
        ValueKind::Rectangle => Ok(Value::Rectangle(raw.parse()?)),
        ValueKind::Color => Ok(Value::Color(raw.parse()?)),
    }
}

enum LineValueError {
    Parse(ValueParseError),
    Unsupported,
}

impl From<ValueParseError> for LineValueError {
    fn from(err: ValueParseError) -> Self {
        Self::Parse(err)
    }
}

/// Parse an assignment line's value into the field's kind.
///
/// The narrowest of the three paths: only `Bool`, `Int`, `String`, and
/// `Rectangle` are handled. No fallback hook is consulted here.
fn parse_line_value(kind: ValueKind, value: &str) -> Result<Value, LineValueError> {
    match kind {
        ValueKind::Bool => Ok(Value::Bool(parse_bool(value)?)),
        ValueKind::Int => Ok(Value::Int(value.parse().map_err(ValueParseError::Int)?)),
        ValueKind::String => Ok(Value::String(value.to_string())),
        ValueKind::Rectangle => Ok(Value::Rectangle(value.parse()?)),
        _ => Err(LineValueError::Unsupported),
    }
}
