//! Schema description for configuration records.
//!
//! A record participates in the codec by describing its fields once, in
//! declaration order, through [`SchemaBuilder`]. Each declared field pairs
//! an external key and kind with a read accessor (encode) and a write
//! accessor (decode), plus an optional raw default string. Only declared
//! fields participate; everything else on the record is invisible to the
//! codec.
//!
//! # Example
//!
//! ```
//! use lineconf::{Record, Schema};
//!
//! #[derive(Default)]
//! struct WindowConfig {
//!     width: i64,
//!     fullscreen: bool,
//! }
//!
//! impl Record for WindowConfig {
//!     fn schema() -> Schema<Self> {
//!         Schema::builder()
//!             .int("width", "800", |c: &Self| c.width, |c, v| c.width = v)
//!             .boolean("fullscreen", "", |c: &Self| c.fullscreen, |c, v| {
//!                 c.fullscreen = v
//!             })
//!             .build()
//!     }
//! }
//!
//! let schema = WindowConfig::schema();
//! assert_eq!(schema.fields().len(), 2);
//! assert_eq!(schema.fields()[0].key(), "width");
//! ```

pub mod value;

pub use value::{Complex128, Complex64, Rect, Rgba, Value, ValueKind};

use std::fmt;

type ReadFn<R> = Box<dyn Fn(&R) -> Value>;
type WriteFn<R> = Box<dyn Fn(&mut R, Value)>;

/// A configuration record with a declared schema.
///
/// The codec reads the schema once per `encode`/`decode` call; it never
/// owns or allocates the record itself.
pub trait Record: Sized {
    /// The ordered field descriptors for this record type.
    fn schema() -> Schema<Self>;
}

/// Descriptor for one participating record field.
pub struct FieldSpec<R> {
    key: String,
    kind: ValueKind,
    default: Option<String>,
    read: ReadFn<R>,
    write: WriteFn<R>,
}

impl<R> FieldSpec<R> {
    /// The external key, exactly as declared.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The field's native value kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The raw default string, if one was declared.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Read the field's current value out of the record.
    pub fn current(&self, record: &R) -> Value {
        (self.read)(record)
    }

    /// Store a value into the record's field.
    ///
    /// The value must carry the field's declared kind; the codec only
    /// hands a field values it parsed for that kind.
    pub fn assign(&self, record: &mut R, value: Value) {
        (self.write)(record, value)
    }
}

impl<R> fmt::Debug for FieldSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// The ordered list of field descriptors for a record type.
pub struct Schema<R> {
    fields: Vec<FieldSpec<R>>,
}

impl<R> Schema<R> {
    /// Start declaring a schema.
    pub fn builder() -> SchemaBuilder<R> {
        SchemaBuilder { fields: Vec::new() }
    }

    /// The descriptors, in declaration order.
    pub fn fields(&self) -> &[FieldSpec<R>] {
        &self.fields
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema").field("fields", &self.fields).finish()
    }
}

/// Builder for a record schema, one typed method per value kind.
///
/// Every method takes `(key, default, read, write)`. The key must be
/// non-empty and should be declared in lowercase: input keys are lowercased
/// before matching while declared keys are compared verbatim, so a
/// mixed-case declared key never matches. An empty default string means
/// the field has no default.
pub struct SchemaBuilder<R> {
    fields: Vec<FieldSpec<R>>,
}

impl<R> SchemaBuilder<R> {
    fn push(
        mut self,
        key: impl Into<String>,
        kind: ValueKind,
        default: &str,
        read: ReadFn<R>,
        write: WriteFn<R>,
    ) -> Self {
        let key = key.into();
        assert!(!key.is_empty(), "schema field key must not be empty");
        let default = (!default.is_empty()).then(|| default.to_string());
        self.fields.push(FieldSpec {
            key,
            kind,
            default,
            read,
            write,
        });
        self
    }

    /// Declare a signed integer field.
    pub fn int(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> i64 + 'static,
        write: impl Fn(&mut R, i64) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::Int,
            default,
            Box::new(move |r| Value::Int(read(r))),
            Box::new(move |r, v| {
                if let Value::Int(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Declare an unsigned integer field.
    pub fn uint(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> u64 + 'static,
        write: impl Fn(&mut R, u64) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::Uint,
            default,
            Box::new(move |r| Value::Uint(read(r))),
            Box::new(move |r, v| {
                if let Value::Uint(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Declare a boolean field.
    pub fn boolean(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> bool + 'static,
        write: impl Fn(&mut R, bool) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::Bool,
            default,
            Box::new(move |r| Value::Bool(read(r))),
            Box::new(move |r, v| {
                if let Value::Bool(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Declare a string field.
    pub fn string(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> String + 'static,
        write: impl Fn(&mut R, String) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::String,
            default,
            Box::new(move |r| Value::String(read(r))),
            Box::new(move |r, v| {
                if let Value::String(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Declare a 32-bit float field.
    pub fn float32(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> f32 + 'static,
        write: impl Fn(&mut R, f32) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::Float32,
            default,
            Box::new(move |r| Value::Float32(read(r))),
            Box::new(move |r, v| {
                if let Value::Float32(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Declare a 64-bit float field.
    pub fn float64(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> f64 + 'static,
        write: impl Fn(&mut R, f64) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::Float64,
            default,
            Box::new(move |r| Value::Float64(read(r))),
            Box::new(move |r, v| {
                if let Value::Float64(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Declare a complex field with 32-bit components.
    pub fn complex64(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> Complex64 + 'static,
        write: impl Fn(&mut R, Complex64) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::Complex64,
            default,
            Box::new(move |r| Value::Complex64(read(r))),
            Box::new(move |r, v| {
                if let Value::Complex64(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Declare a complex field with 64-bit components.
    pub fn complex128(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> Complex128 + 'static,
        write: impl Fn(&mut R, Complex128) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::Complex128,
            default,
            Box::new(move |r| Value::Complex128(read(r))),
            Box::new(move |r, v| {
                if let Value::Complex128(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Declare a rectangle field.
    pub fn rectangle(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> Rect + 'static,
        write: impl Fn(&mut R, Rect) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::Rectangle,
            default,
            Box::new(move |r| Value::Rectangle(read(r))),
            Box::new(move |r, v| {
                if let Value::Rectangle(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Declare an RGBA color field.
    pub fn color(
        self,
        key: impl Into<String>,
        default: &str,
        read: impl Fn(&R) -> Rgba + 'static,
        write: impl Fn(&mut R, Rgba) + 'static,
    ) -> Self {
        self.push(
            key,
            ValueKind::Color,
            default,
            Box::new(move |r| Value::Color(read(r))),
            Box::new(move |r, v| {
                if let Value::Color(v) = v {
                    write(r, v);
                }
            }),
        )
    }

    /// Finish the declaration.
    pub fn build(self) -> Schema<R> {
        Schema {
            fields: self.fields,
        }
    }
}
