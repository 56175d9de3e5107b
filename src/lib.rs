//! Schema-driven codec for line-oriented `key = value` configuration
//! documents.
//!
//! A record type declares its participating fields once, through a schema
//! builder; the codec then writes one assignment line per field and reads
//! documents back by matching keys, with declared defaults applied before
//! parsing and unknown/missing keys handled by policy flags. Comments
//! (`#`-prefixed lines) and lines that do not split into exactly one
//! `key = value` pair are skipped.
//!
//! Kind coverage differs by path and the asymmetry is part of the
//! contract: default strings parse for every kind, the encoder formats
//! all but `Float32` and the complex kinds, and assignment lines parse
//! only `Bool`, `Int`, `String`, and `Rectangle`. Fallback hooks let
//! callers observe unsupported values without suppressing the error.
//!
//! # Modules
//!
//! - `schema`: field descriptors, the schema builder, and the value model
//! - `codec`: the [`Encoder`]/[`Decoder`] pair and fallback hooks
//! - `error`: the error taxonomy for both pipelines
//!
//! # Example
//!
//! ```
//! use lineconf::{CodecResult, Decoder, Encoder, Record, Schema};
//!
//! #[derive(Debug, Default)]
//! struct WindowConfig {
//!     width: i64,
//!     title: String,
//!     fullscreen: bool,
//! }
//!
//! impl Record for WindowConfig {
//!     fn schema() -> Schema<Self> {
//!         Schema::builder()
//!             .int("width", "800", |c: &Self| c.width, |c, v| c.width = v)
//!             .string("title", "", |c: &Self| c.title.clone(), |c, v| c.title = v)
//!             .boolean("fullscreen", "false", |c: &Self| c.fullscreen, |c, v| {
//!                 c.fullscreen = v
//!             })
//!             .build()
//!     }
//! }
//!
//! fn main() -> CodecResult<()> {
//!     let config = WindowConfig {
//!         width: 1024,
//!         title: "demo".to_string(),
//!         fullscreen: false,
//!     };
//!
//!     let mut encoder = Encoder::new(Vec::new());
//!     encoder.encode(&config)?;
//!     let document = encoder.into_inner();
//!
//!     let mut decoded = WindowConfig::default();
//!     Decoder::new(document.as_slice()).decode(&mut decoded)?;
//!     assert_eq!(decoded.width, 1024);
//!     assert_eq!(decoded.title, "demo");
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod schema;

// Re-export commonly used types for convenience
pub use codec::{Decoder, Encoder, FallbackHook, RecordingHook};
pub use error::{CodecError, CodecResult, HookError, ValueParseError};
pub use schema::{
    Complex128, Complex64, FieldSpec, Record, Rect, Rgba, Schema, SchemaBuilder, Value, ValueKind,
};
