//! Encoder/decoder pair for line-oriented configuration documents.
//!
//! Both pipelines share one schema read per call and are strictly
//! synchronous: each runs to completion on the calling thread with no
//! internal locking, so concurrent use against the same record requires
//! external synchronization.

pub mod decoder;
pub mod encoder;
pub mod fallback;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use fallback::{FallbackHook, RecordingHook};
