//! Value kinds and the typed values the codec moves in and out of records.
//!
//! Defines the closed [`ValueKind`] enumeration, the data-carrying [`Value`]
//! enum, and the composite value types with their textual forms. The three
//! per-path capability tables live here as predicates on `ValueKind`; the
//! encoder, default applier, and line parser each consult their own table
//! and must not be unified.

use crate::error::ValueParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of value kinds the codec natively supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int,
    Uint,
    Bool,
    String,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Rectangle,
    Color,
}

impl ValueKind {
    /// Kinds the encoder can format onto an assignment line.
    pub fn supports_encode(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Uint
                | Self::Bool
                | Self::String
                | Self::Float64
                | Self::Rectangle
                | Self::Color
        )
    }

    /// Kinds the default applier can parse from a declared default string.
    ///
    /// The widest of the three tables: everything the encoder handles plus
    /// `Float32` and both complex kinds.
    pub fn supports_default(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Uint
                | Self::Bool
                | Self::String
                | Self::Float32
                | Self::Float64
                | Self::Complex64
                | Self::Complex128
                | Self::Rectangle
                | Self::Color
        )
    }

    /// Kinds the document parser can parse from an assignment line.
    ///
    /// The narrowest of the three tables.
    pub fn supports_line(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::String | Self::Rectangle
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Rectangle => "rectangle",
            Self::Color => "color",
        };
        write!(f, "{}", name)
    }
}

/// A typed value read from or written into a record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Int(i64),
    Uint(u64),
    Bool(bool),
    String(String),
    Float32(f32),
    Float64(f64),
    Complex64(Complex64),
    Complex128(Complex128),
    Rectangle(Rect),
    Color(Rgba),
}

impl Value {
    /// The kind this value belongs to.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Uint(_) => ValueKind::Uint,
            Self::Bool(_) => ValueKind::Bool,
            Self::String(_) => ValueKind::String,
            Self::Float32(_) => ValueKind::Float32,
            Self::Float64(_) => ValueKind::Float64,
            Self::Complex64(_) => ValueKind::Complex64,
            Self::Complex128(_) => ValueKind::Complex128,
            Self::Rectangle(_) => ValueKind::Rectangle,
            Self::Color(_) => ValueKind::Color,
        }
    }
}

/// An axis-aligned rectangle, min corner to max corner.
///
/// Text form is `minX,minY,maxX,maxY` as four decimal integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

impl FromStr for Rect {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [min_x, min_y, max_x, max_y] = split4(s)?;
        Ok(Self {
            min_x: min_x.parse()?,
            min_y: min_y.parse()?,
            max_x: max_x.parse()?,
            max_y: max_y.parse()?,
        })
    }
}

/// An 8-bit RGBA color.
///
/// Text form is `R,G,B,A` as four decimal integers. Parsing truncates each
/// part to 8 bits; encoding writes the channels unchecked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split4(s)?;
        let mut channels = [0u8; 4];
        for (channel, part) in channels.iter_mut().zip(parts) {
            *channel = part.parse::<i64>()? as u8;
        }
        let [r, g, b, a] = channels;
        Ok(Self { r, g, b, a })
    }
}

/// A complex number with 32-bit components.
///
/// Text form is `a+bi`; a bare real (`a`) or a bare imaginary (`bi`) part
/// is accepted, as is an optional surrounding pair of parentheses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex64 {
    pub re: f32,
    pub im: f32,
}

impl Complex64 {
    pub fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{}{}i", self.re, self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

impl FromStr for Complex64 {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (re, im) = split_complex(s);
        Ok(Self {
            re: re.parse()?,
            im: im.parse()?,
        })
    }
}

/// A complex number with 64-bit components.
///
/// Same text form as [`Complex64`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex128 {
    pub re: f64,
    pub im: f64,
}

impl Complex128 {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{}{}i", self.re, self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

impl FromStr for Complex128 {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (re, im) = split_complex(s);
        Ok(Self {
            re: re.parse()?,
            im: im.parse()?,
        })
    }
}

/// Parse one of the accepted boolean forms.
pub(crate) fn parse_bool(raw: &str) -> Result<bool, ValueParseError> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(ValueParseError::Bool {
            raw: raw.to_string(),
        }),
    }
}

/// Split a composite value into exactly four comma-separated parts.
///
/// Parts are not trimmed; ` 2` in `1, 2,3,4` fails integer parsing.
fn split4(s: &str) -> Result<[&str; 4], ValueParseError> {
    let parts: Vec<&str> = s.split(',').collect();
    match parts[..] {
        [a, b, c, d] => Ok([a, b, c, d]),
        _ => Err(ValueParseError::PartCount {
            expected: 4,
            found: parts.len(),
        }),
    }
}

/// Split a complex literal into its real and imaginary component strings.
///
/// Component validity is left to the caller's float parse, so this never
/// fails on its own: a malformed literal produces malformed components.
fn split_complex(s: &str) -> (&str, &str) {
    let mut s = s.trim();
    if s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
        s = &s[1..s.len() - 1];
    }
    let Some(body) = s.strip_suffix('i') else {
        // No imaginary unit: the whole literal is the real part.
        return (s, "0");
    };
    // Scan backwards for the sign separating the components, skipping a
    // leading sign and any exponent sign (`1e+5i` is a single component).
    let bytes = body.as_bytes();
    for idx in (1..bytes.len()).rev() {
        if (bytes[idx] == b'+' || bytes[idx] == b'-')
            && bytes[idx - 1] != b'e'
            && bytes[idx - 1] != b'E'
        {
            return (&body[..idx], &body[idx..]);
        }
    }
    // No separator: the whole body is the imaginary part.
    ("0", body)
}
