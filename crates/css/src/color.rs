//! Color literals
//!
//! Decodes the four notations the rewriter understands (hex, `rgb()`/`rgba()`,
//! `hsl()`/`hsla()` and the `transparent` keyword) and re-encodes them in the
//! notation family they came from.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ColorError, ColorResult};

/// Letter case used when writing hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

impl HexCase {
    /// Case of an existing literal: upper if any digit is an uppercase letter
    fn detect(digits: &str) -> Self {
        if digits.bytes().any(|b| b.is_ascii_uppercase()) {
            HexCase::Upper
        } else {
            HexCase::Lower
        }
    }
}

/// A `#rgb` / `#rrggbb` color, always stored expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha byte, written as a fourth pair when present
    pub alpha: Option<u8>,
    pub case: HexCase,
}

impl HexColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: None, case: HexCase::Lower }
    }

    pub fn with_case(self, case: HexCase) -> Self {
        Self { case, ..self }
    }

    /// Parse a hex color string (without #)
    pub fn from_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let case = HexCase::detect(hex);
        let color = match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                HexColor::rgb(r * 17, g * 17, b * 17)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                HexColor::rgb(r, g, b)
            }
            _ => return None,
        };
        Some(color.with_case(case))
    }
}

/// Channel space of a functional color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// `rgb()` / `rgba()`, channels in 0-255
    Rgb,
    /// `hsl()` / `hsla()`, hue in degrees, saturation and lightness in percent
    Hsl,
}

/// Alpha parameter of a functional color.
///
/// The source text is kept so the value is re-emitted exactly as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Alpha {
    value: f64,
    repr: String,
}

impl Alpha {
    pub fn parse(repr: &str) -> Option<Self> {
        let value = repr.parse::<f64>().ok()?;
        Some(Self { value, repr: repr.to_string() })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }
}

/// An `rgb()`, `rgba()`, `hsl()` or `hsla()` color
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalColor {
    pub space: ColorSpace,
    /// r, g, b for [`ColorSpace::Rgb`]; h, s, l for [`ColorSpace::Hsl`]
    pub channels: [f64; 3],
    pub alpha: Option<Alpha>,
}

impl FunctionalColor {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { space: ColorSpace::Rgb, channels: [r, g, b], alpha: None }
    }

    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self { space: ColorSpace::Hsl, channels: [h, s, l], alpha: None }
    }

    pub fn with_alpha(self, alpha: Alpha) -> Self {
        Self { alpha: Some(alpha), ..self }
    }
}

/// A decoded color literal
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    Hex(HexColor),
    Functional(FunctionalColor),
    /// The `transparent` keyword, never adjusted
    Transparent,
    /// A literal that could not be decoded, carried through unchanged
    Unrecognized(String),
}

fn hex_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap())
}

fn rgb_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*([\d.]+)\s*)?\)$").unwrap()
    })
}

fn hsl_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^hsla?\(\s*(\d+)\s*,\s*(\d+)%\s*,\s*(\d+)%\s*(?:,\s*(\d*\.?\d+)\s*)?\)$")
            .unwrap()
    })
}

/// Decode a color literal, reporting why it failed
pub fn try_parse(raw: &str) -> ColorResult<ColorValue> {
    let literal = raw.trim();

    if literal == "transparent" {
        return Ok(ColorValue::Transparent);
    }
    if literal.starts_with('#') {
        return parse_hex(literal);
    }
    if literal.starts_with("rgb(") || literal.starts_with("rgba(") {
        return parse_rgb(literal);
    }
    if literal.starts_with("hsl(") || literal.starts_with("hsla(") {
        return parse_hsl(literal);
    }

    Err(ColorError::unknown_notation(literal))
}

/// Decode a color literal.
///
/// Never fails: a literal that cannot be decoded is logged and returned as
/// [`ColorValue::Unrecognized`].
pub fn parse(raw: &str) -> ColorValue {
    match try_parse(raw) {
        Ok(color) => color,
        Err(e) => {
            log::warn!("{}", e);
            ColorValue::Unrecognized(raw.to_string())
        }
    }
}

/// Encode a color back into stylesheet text
pub fn format(color: &ColorValue) -> String {
    color.to_string()
}

fn parse_hex(literal: &str) -> ColorResult<ColorValue> {
    if !hex_pattern().is_match(literal) {
        return Err(ColorError::invalid_hex(literal));
    }
    HexColor::from_hex(&literal[1..])
        .map(ColorValue::Hex)
        .ok_or_else(|| ColorError::invalid_hex(literal))
}

fn parse_rgb(literal: &str) -> ColorResult<ColorValue> {
    let invalid = || ColorError::invalid_rgb(literal);
    let caps = rgb_pattern().captures(literal).ok_or_else(invalid)?;

    let channel = |i: usize| match caps[i].parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid()),
    };
    let mut color = FunctionalColor::rgb(channel(1)?, channel(2)?, channel(3)?);

    if let Some(a) = caps.get(4) {
        color = color.with_alpha(Alpha::parse(a.as_str()).ok_or_else(invalid)?);
    }
    Ok(ColorValue::Functional(color))
}

fn parse_hsl(literal: &str) -> ColorResult<ColorValue> {
    let invalid = || ColorError::invalid_hsl(literal);
    let caps = hsl_pattern().captures(literal).ok_or_else(invalid)?;

    let channel = |i: usize| match caps[i].parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid()),
    };
    let mut color = FunctionalColor::hsl(channel(1)?, channel(2)?, channel(3)?);

    if let Some(a) = caps.get(4) {
        color = color.with_alpha(Alpha::parse(a.as_str()).ok_or_else(invalid)?);
    }
    Ok(ColorValue::Functional(color))
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = [Some(self.r), Some(self.g), Some(self.b), self.alpha];
        f.write_str("#")?;
        for byte in bytes.into_iter().flatten() {
            match self.case {
                HexCase::Lower => write!(f, "{:02x}", byte)?,
                HexCase::Upper => write!(f, "{:02X}", byte)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for FunctionalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.channels;
        match (self.space, &self.alpha) {
            (ColorSpace::Rgb, None) => write!(f, "rgb({}, {}, {})", x, y, z),
            (ColorSpace::Rgb, Some(a)) => write!(f, "rgba({}, {}, {}, {})", x, y, z, a.as_str()),
            (ColorSpace::Hsl, None) => write!(f, "hsl({}, {}%, {}%)", x, y, z),
            (ColorSpace::Hsl, Some(a)) => {
                write!(f, "hsla({}, {}%, {}%, {})", x, y, z, a.as_str())
            }
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Hex(hex) => fmt::Display::fmt(hex, f),
            ColorValue::Functional(func) => fmt::Display::fmt(func, f),
            ColorValue::Transparent => f.write_str("transparent"),
            ColorValue::Unrecognized(raw) => f.write_str(raw),
        }
    }
}
