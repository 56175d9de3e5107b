//! Fallback hooks for value kinds a codec path cannot handle.
//!
//! Hooks are advisory: a path that hits an unsupported kind gives the hook
//! first refusal to observe the value, then fails with an unsupported-kind
//! error regardless. A hook error takes precedence and is wrapped into the
//! returned error instead.

use crate::error::HookError;
use crate::schema::{Value, ValueKind};
use std::sync::{Arc, Mutex};

/// Caller-supplied escape valve invoked on the unsupported-kind path.
///
/// Both methods default to doing nothing, so an implementation only has to
/// cover the path it cares about.
pub trait FallbackHook {
    /// Called by the encoder with the field's current value when its kind
    /// cannot be formatted.
    fn try_format(&self, _key: &str, _value: &Value) -> Result<(), HookError> {
        Ok(())
    }

    /// Called by the default applier with the declared raw default when the
    /// field's kind has no default parser.
    fn try_parse(&self, _key: &str, _kind: ValueKind, _raw: &str) -> Result<(), HookError> {
        Ok(())
    }
}

/// A [`FallbackHook`] that records every observation it receives.
///
/// Useful in tests and for callers that want to audit which fields the
/// codec could not handle.
///
/// # Example
/// ```
/// use lineconf::{FallbackHook, RecordingHook, Value, ValueKind};
///
/// let hook = RecordingHook::new();
/// hook.try_format("scale", &Value::Float32(1.5)).unwrap();
///
/// let seen = hook.seen();
/// assert_eq!(seen, vec![("scale".to_string(), ValueKind::Float32)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingHook {
    seen: Arc<Mutex<Vec<(String, ValueKind)>>>,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `(key, kind)` pairs observed so far, in order.
    pub fn seen(&self) -> Vec<(String, ValueKind)> {
        self.seen.lock().unwrap().clone()
    }
}

impl FallbackHook for RecordingHook {
    fn try_format(&self, key: &str, value: &Value) -> Result<(), HookError> {
        self.seen.lock().unwrap().push((key.to_string(), value.kind()));
        Ok(())
    }

    fn try_parse(&self, key: &str, kind: ValueKind, _raw: &str) -> Result<(), HookError> {
        self.seen.lock().unwrap().push((key.to_string(), kind));
        Ok(())
    }
}
