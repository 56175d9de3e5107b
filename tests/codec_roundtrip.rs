//! End-to-end tests for the encode/decode pipelines.
//!
//! Covers the externally observable contract: round trips through real
//! byte sinks and sources, default application, key policy enforcement,
//! the per-path kind coverage asymmetry, and fallback hook behavior.

use lineconf::{
    CodecError, Decoder, Encoder, Record, RecordingHook, Rect, Rgba, Schema, ValueKind,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::{Seek, SeekFrom, Write};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A record limited to the kinds the line parser handles, so every field
/// survives a full encode/decode round trip.
#[derive(Debug, Clone, Default, PartialEq)]
struct EditorConfig {
    tab_width: i64,
    theme: String,
    line_numbers: bool,
    viewport: Rect,
}

impl Record for EditorConfig {
    fn schema() -> Schema<Self> {
        Schema::builder()
            .int("tab_width", "4", |c: &Self| c.tab_width, |c, v| {
                c.tab_width = v
            })
            .string("theme", "dark", |c: &Self| c.theme.clone(), |c, v| {
                c.theme = v
            })
            .boolean("line_numbers", "true", |c: &Self| c.line_numbers, |c, v| {
                c.line_numbers = v
            })
            .rectangle("viewport", "", |c: &Self| c.viewport, |c, v| {
                c.viewport = v
            })
            .build()
    }
}

/// A record that also carries encode-only kinds.
#[derive(Debug, Clone, Default, PartialEq)]
struct DisplayConfig {
    brightness: u64,
    gamma: f64,
    background: Rgba,
}

impl Record for DisplayConfig {
    fn schema() -> Schema<Self> {
        Schema::builder()
            .uint("brightness", "50", |c: &Self| c.brightness, |c, v| {
                c.brightness = v
            })
            .float64("gamma", "2.2", |c: &Self| c.gamma, |c, v| c.gamma = v)
            .color("background", "0,0,0,255", |c: &Self| c.background, |c, v| {
                c.background = v
            })
            .build()
    }
}

fn encode_to_vec<R: Record>(record: &R) -> Vec<u8> {
    let mut encoder = Encoder::new(Vec::new());
    encoder.encode(record).expect("encode failed");
    encoder.into_inner()
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_roundtrip_through_memory() {
    init_tracing();
    let original = EditorConfig {
        tab_width: 8,
        theme: "solarized".to_string(),
        line_numbers: false,
        viewport: Rect::new(0, 0, 1920, 1080),
    };

    let document = encode_to_vec(&original);
    let mut decoded = EditorConfig::default();
    Decoder::new(document.as_slice())
        .decode(&mut decoded)
        .expect("decode failed");

    assert_eq!(decoded, original);
}

#[test]
fn test_roundtrip_through_file() {
    init_tracing();
    let original = EditorConfig {
        tab_width: 2,
        theme: "high contrast".to_string(),
        line_numbers: true,
        viewport: Rect::new(-10, -20, 30, 40),
    };

    let mut file = tempfile::tempfile().expect("create temp file");
    let mut encoder = Encoder::new(&mut file);
    encoder.encode(&original).expect("encode failed");

    file.seek(SeekFrom::Start(0)).expect("rewind");
    let mut decoded = EditorConfig::default();
    Decoder::new(&mut file).decode(&mut decoded).expect("decode failed");

    assert_eq!(decoded, original);
}

#[test]
fn test_encoded_document_shape() {
    let config = EditorConfig {
        tab_width: 4,
        theme: "dark".to_string(),
        line_numbers: true,
        viewport: Rect::new(0, 0, 640, 480),
    };

    let document = String::from_utf8(encode_to_vec(&config)).unwrap();
    assert_eq!(
        document,
        "tab_width = 4\n\
         theme = dark\n\
         line_numbers = true\n\
         viewport = 0,0,640,480\n"
    );
}

proptest! {
    // Values must avoid `=`, and surrounding whitespace is trimmed on
    // decode, so generated strings stick to word characters.
    #[test]
    fn roundtrip_preserves_line_parseable_fields(
        tab_width in any::<i64>(),
        theme in "[a-z0-9]{0,16}",
        line_numbers in any::<bool>(),
        coords in any::<(i32, i32, i32, i32)>(),
    ) {
        let original = EditorConfig {
            tab_width,
            theme,
            line_numbers,
            viewport: Rect::new(coords.0, coords.1, coords.2, coords.3),
        };

        let document = encode_to_vec(&original);
        let mut decoded = EditorConfig::default();
        Decoder::new(document.as_slice()).decode(&mut decoded).unwrap();

        prop_assert_eq!(decoded, original);
    }
}

// ============================================================================
// Per-path kind coverage
// ============================================================================

#[test]
fn test_encode_only_kinds_do_not_roundtrip() {
    // Uint, Float64, and Color encode fine, but feeding the document back
    // hits the line parser's narrower table.
    let config = DisplayConfig {
        brightness: 80,
        gamma: 1.8,
        background: Rgba::new(32, 32, 32, 255),
    };

    let document = encode_to_vec(&config);
    let mut decoded = DisplayConfig::default();
    let err = Decoder::new(document.as_slice())
        .decode(&mut decoded)
        .unwrap_err();

    assert!(matches!(
        err,
        CodecError::UnsupportedLineKind {
            line: 1,
            kind: ValueKind::Uint,
            ..
        }
    ));
}

#[test]
fn test_encode_only_kinds_still_take_defaults() {
    let mut config = DisplayConfig::default();
    Decoder::new(&b""[..]).decode(&mut config).expect("decode failed");

    assert_eq!(config.brightness, 50);
    assert_eq!(config.gamma, 2.2);
    assert_eq!(config.background, Rgba::new(0, 0, 0, 255));
}

// ============================================================================
// Key policy
// ============================================================================

#[test]
fn test_unknown_key_policy_end_to_end() {
    let input = b"tab_width = 4\nbogus = 1\n";

    // Lenient: the unknown line is ignored.
    let mut config = EditorConfig::default();
    Decoder::new(&input[..]).decode(&mut config).expect("lenient decode");

    // Strict: the unknown line is fatal, naming line and key.
    let mut decoder = Decoder::new(&input[..]);
    decoder.fail_on_unknown_key = true;
    let err = decoder.decode(&mut EditorConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "line 2: unknown key bogus");
}

#[test]
fn test_missing_key_policy_end_to_end() {
    let input = b"tab_width = 4\ntheme = dark\nline_numbers = 1\n";

    let mut decoder = Decoder::new(&input[..]);
    decoder.fail_on_missing_key = true;
    let err = decoder.decode(&mut EditorConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "missing key viewport");
}

// ============================================================================
// Fallback hooks
// ============================================================================

#[derive(Debug, Default)]
struct MixedConfig {
    scale: f32,
}

impl Record for MixedConfig {
    fn schema() -> Schema<Self> {
        Schema::builder()
            .float32("scale", "", |c: &Self| c.scale, |c, v| c.scale = v)
            .build()
    }
}

#[test]
fn test_encode_fallback_observes_unsupported_field() {
    let hook = RecordingHook::new();
    let mut encoder = Encoder::new(Vec::new());
    encoder.fallback = Some(Box::new(hook.clone()));

    let err = encoder.encode(&MixedConfig { scale: 0.5 }).unwrap_err();

    // The hook saw the field, and the encode still failed.
    assert_eq!(hook.seen(), vec![("scale".to_string(), ValueKind::Float32)]);
    assert!(matches!(err, CodecError::UnsupportedKind { .. }));
}

// ============================================================================
// Document leniency
// ============================================================================

#[test]
fn test_mixed_document() {
    init_tracing();
    let input = b"# editor settings\n\
                  \n\
                  TAB_WIDTH = 8\n\
                  theme = gruvbox = dark\n\
                  garbage line without equals\n\
                  line_numbers = 0\n";

    let mut config = EditorConfig::default();
    Decoder::new(&input[..]).decode(&mut config).expect("decode failed");

    // Uppercase input key matched, multi-`=` line dropped (theme keeps its
    // default), junk ignored.
    assert_eq!(config.tab_width, 8);
    assert_eq!(config.theme, "dark");
    assert!(!config.line_numbers);
}

#[test]
fn test_partial_mutation_on_failure() {
    // Decode stops at the first bad value; earlier assignments stick.
    let input = b"tab_width = 6\nviewport = 1,2\n";

    let mut config = EditorConfig::default();
    let err = Decoder::new(&input[..]).decode(&mut config).unwrap_err();

    assert!(matches!(err, CodecError::LineParse { line: 2, .. }));
    assert_eq!(config.tab_width, 6);
}

// ============================================================================
// Sink behavior
// ============================================================================

/// A sink that accepts a limited number of complete lines, then fails.
struct FlakySink {
    written: Vec<u8>,
    lines_allowed: usize,
}

impl Write for FlakySink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let lines_written = self.written.iter().filter(|&&b| b == b'\n').count();
        if lines_written >= self.lines_allowed {
            return Err(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "sink full",
            ));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_encode_stops_at_first_write_failure() {
    let config = EditorConfig {
        tab_width: 4,
        theme: "dark".to_string(),
        line_numbers: true,
        viewport: Rect::new(0, 0, 1, 1),
    };

    let mut encoder = Encoder::new(FlakySink {
        written: Vec::new(),
        lines_allowed: 1,
    });
    let err = encoder.encode(&config).unwrap_err();

    match err {
        CodecError::Write { key, kind, .. } => {
            assert_eq!(key, "theme");
            assert_eq!(kind, ValueKind::String);
        }
        other => panic!("expected write error, got {other:?}"),
    }

    // The sink keeps what was written before the failure.
    let partial = String::from_utf8(encoder.into_inner().written).unwrap();
    assert_eq!(partial, "tab_width = 4\n");
}
