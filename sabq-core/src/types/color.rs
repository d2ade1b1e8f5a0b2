//! Color representations and parsing utilities.
//!
//! This module provides the [`Color`] struct for representing RGBA colors and
//! [`ColorParseError`] for failures while parsing CSS color strings.
//!
//! Theme palettes store colors as CSS strings (`oklch(...)`, `#rrggbb`,
//! `hsl(...)`, `rgb(...)`). [`Color`] turns those strings into numbers so that
//! lightness can be compared and adjusted, and [`perceptual_lightness`] reads
//! the OKLab lightness of any supported string.
//!
//! # Examples
//!
//! ```
//! use sabq_core::types::{Color, ColorParseError};
//! use std::str::FromStr;
//!
//! let red = Color::rgb(1.0, 0.0, 0.0);
//! assert_eq!(red.to_hex(), "#ff0000");
//!
//! let green: Result<Color, ColorParseError> = Color::from_str("rgb(0, 255, 0)");
//! assert_eq!(green.unwrap(), Color::rgb(0.0, 1.0, 0.0));
//!
//! let white = Color::from_str("oklch(1 0 0)").unwrap();
//! assert_eq!(white.to_hex(), "#ffffff");
//! ```

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Error type for color parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string starts like a hex color but is structurally wrong.
    #[error("Invalid hex color string format: '{0}'. Expected #RGB, #RGBA, #RRGGBB, or #RRGGBBAA.")]
    InvalidHexFormat(String),

    /// A hex component could not be parsed.
    #[error("Invalid hex digit in '{input_str}': {source}")]
    InvalidHexDigit {
        input_str: String,
        #[source]
        source: ParseIntError,
    },

    /// A hex string with the wrong number of digits.
    #[error("Invalid hex color string length: '{0}'. Expected 3, 4, 6, or 8 characters after '#'.")]
    InvalidHexLength(String),

    /// Malformed functional notation (`rgb()`, `hsl()`, `oklch()`) or an unsupported format.
    #[error("Invalid color string format: {0}")]
    InvalidFormat(String),
}

/// Represents a color in RGBA format with components in `[0.0, 1.0]`.
///
/// Components are gamma-encoded sRGB values, the same space CSS hex and
/// `rgb()` notations use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Creates a new `Color`, clamping every component to `[0.0, 1.0]`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates a new opaque `Color`.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color::new(r, g, b, 1.0)
    }

    /// Creates a new opaque `Color` from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::rgb(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
    }

    /// Creates a new `Color` from 8-bit components including alpha.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Creates a new `Color` from a hexadecimal string (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`).
    ///
    /// Parsing is case-insensitive for hex digits.
    pub fn from_hex(hex_str: &str) -> Result<Self, ColorParseError> {
        let input = hex_str
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::InvalidHexFormat(hex_str.to_string()))?;
        if !input.is_ascii() {
            return Err(ColorParseError::InvalidHexFormat(hex_str.to_string()));
        }

        let parse_hex_component = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|e| ColorParseError::InvalidHexDigit {
                input_str: s.to_string(),
                source: e,
            })
        };
        let short = |s: &str| parse_hex_component(s).map(|v| (v << 4) | v);

        match input.len() {
            3 => Ok(Color::from_rgb8(
                short(&input[0..1])?,
                short(&input[1..2])?,
                short(&input[2..3])?,
            )),
            4 => Ok(Color::from_rgba8(
                short(&input[0..1])?,
                short(&input[1..2])?,
                short(&input[2..3])?,
                short(&input[3..4])?,
            )),
            6 => Ok(Color::from_rgb8(
                parse_hex_component(&input[0..2])?,
                parse_hex_component(&input[2..4])?,
                parse_hex_component(&input[4..6])?,
            )),
            8 => Ok(Color::from_rgba8(
                parse_hex_component(&input[0..2])?,
                parse_hex_component(&input[2..4])?,
                parse_hex_component(&input[4..6])?,
                parse_hex_component(&input[6..8])?,
            )),
            _ => Err(ColorParseError::InvalidHexLength(hex_str.to_string())),
        }
    }

    /// Creates a new opaque `Color` from HSL components.
    ///
    /// `h` is in degrees and wraps; `s` and `l` are clamped to `[0.0, 1.0]`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Color::rgb(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = h / 360.0;

        let hue_to_rgb = |t: f32| {
            let t = t.rem_euclid(1.0);
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };

        Color::rgb(hue_to_rgb(h + 1.0 / 3.0), hue_to_rgb(h), hue_to_rgb(h - 1.0 / 3.0))
    }

    /// Converts this color to HSL. Alpha is ignored.
    ///
    /// Returns `(h, s, l)` with `h` in degrees `[0.0, 360.0)`.
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == self.r {
            (self.g - self.b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / d + 2.0
        } else {
            (self.r - self.g) / d + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Creates a `Color` from OKLCH components.
    ///
    /// `l` is the perceptual lightness in `[0.0, 1.0]`, `c` the chroma and `h`
    /// the hue in degrees. Out-of-gamut results are clamped to sRGB.
    pub fn from_oklch(l: f32, c: f32, h: f32, alpha: f32) -> Self {
        let h_rad = h.to_radians();
        let a = c * h_rad.cos();
        let b = c * h_rad.sin();

        let l_ = l + 0.396_337_78 * a + 0.215_803_76 * b;
        let m_ = l - 0.105_561_346 * a - 0.063_854_17 * b;
        let s_ = l - 0.089_484_18 * a - 1.291_485_5 * b;

        let l3 = l_ * l_ * l_;
        let m3 = m_ * m_ * m_;
        let s3 = s_ * s_ * s_;

        let r = 4.076_741_7 * l3 - 3.307_711_6 * m3 + 0.230_969_94 * s3;
        let g = -1.268_438 * l3 + 2.609_757_4 * m3 - 0.341_319_38 * s3;
        let bl = -0.004_196_086_3 * l3 - 0.703_418_6 * m3 + 1.707_614_7 * s3;

        Color::new(encode_srgb(r), encode_srgb(g), encode_srgb(bl), alpha)
    }

    /// Converts this color to OKLCH. Returns `(l, c, h)` with `h` in degrees.
    pub fn to_oklch(&self) -> (f32, f32, f32) {
        let r = decode_srgb(self.r);
        let g = decode_srgb(self.g);
        let b = decode_srgb(self.b);

        let l = (0.412_221_46 * r + 0.536_332_55 * g + 0.051_445_995 * b).cbrt();
        let m = (0.211_903_5 * r + 0.680_699_5 * g + 0.107_396_96 * b).cbrt();
        let s = (0.088_302_46 * r + 0.281_718_85 * g + 0.629_978_7 * b).cbrt();

        let lightness = 0.210_454_26 * l + 0.793_617_8 * m - 0.004_072_047 * s;
        let ok_a = 1.977_998_5 * l - 2.428_592_2 * m + 0.450_593_7 * s;
        let ok_b = 0.025_904_037 * l + 0.782_771_77 * m - 0.808_675_77 * s;

        let chroma = (ok_a * ok_a + ok_b * ok_b).sqrt();
        let hue = if chroma < 1e-4 { 0.0 } else { ok_b.atan2(ok_a).to_degrees().rem_euclid(360.0) };
        (lightness.clamp(0.0, 1.0), chroma, hue)
    }

    /// Perceptual (OKLab) lightness in `[0.0, 1.0]`.
    pub fn lightness(&self) -> f32 {
        self.to_oklch().0
    }

    /// Returns a copy with its OKLCH lightness shifted by `amount`, keeping hue and chroma.
    pub fn adjust_lightness(&self, amount: f32) -> Self {
        let (l, c, h) = self.to_oklch();
        Color::from_oklch((l + amount).clamp(0.0, 1.0), c, h, self.a)
    }

    /// Converts to 8-bit RGB components. Alpha is ignored.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        )
    }

    /// Converts to 8-bit RGBA components.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.to_rgb8();
        (r, g, b, (self.a * 255.0).round() as u8)
    }

    /// `"#rrggbb"`, alpha ignored.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// `"#rrggbbaa"`.
    pub fn to_hex_with_alpha(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }

    /// CSS `oklch(L C H)` notation with three decimals, the notation theme palettes use.
    pub fn to_oklch_string(&self) -> String {
        let (l, c, h) = self.to_oklch();
        if self.a < 1.0 {
            format!("oklch({:.3} {:.3} {:.3} / {:.3})", l, c, h, self.a)
        } else {
            format!("oklch({:.3} {:.3} {:.3})", l, c, h)
        }
    }

    /// Linearly interpolates RGBA components; `t` is clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn interpolate(&self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Color::new(
            self.r * (1.0 - t) + other.r * t,
            self.g * (1.0 - t) + other.g * t,
            self.b * (1.0 - t) + other.b * t,
            self.a * (1.0 - t) + other.a * t,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a < 1.0 {
            write!(f, "{}", self.to_hex_with_alpha())
        } else {
            write!(f, "{}", self.to_hex())
        }
    }
}

fn decode_srgb(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn encode_srgb(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Splits the arguments of a CSS functional notation into its channels and optional alpha.
///
/// Accepts both the legacy comma form (`hsl(0, 100%, 50%)`) and the modern
/// space form with a slash alpha (`oklch(0.5 0.1 200 / 0.5)`).
fn split_channels<'a>(
    input: &'a str,
    content: &'a str,
) -> Result<(Vec<&'a str>, Option<&'a str>), ColorParseError> {
    let (channels, alpha) = match content.split_once('/') {
        Some((c, a)) => (c, Some(a.trim())),
        None => (content, None),
    };
    let parts: Vec<&str> = channels
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    match (parts.len(), alpha) {
        (3, _) => Ok((parts, alpha)),
        (4, None) => Ok((parts[..3].to_vec(), Some(parts[3]))),
        _ => Err(ColorParseError::InvalidFormat(format!("Expected three channels in '{}'", input))),
    }
}

fn parse_number(input: &str, part: &str) -> Result<f32, ColorParseError> {
    part.parse::<f32>().map_err(|e| {
        ColorParseError::InvalidFormat(format!(
            "Invalid component '{}' in '{}': {}",
            part, input, e
        ))
    })
}

/// Parses `50%` as `0.5 * percent_scale` and bare numbers unchanged.
fn parse_percent_or_number(
    input: &str,
    part: &str,
    percent_scale: f32,
) -> Result<f32, ColorParseError> {
    match part.strip_suffix('%') {
        Some(p) => Ok(parse_number(input, p)? / 100.0 * percent_scale),
        None => parse_number(input, part),
    }
}

fn parse_alpha(input: &str, alpha: Option<&str>) -> Result<f32, ColorParseError> {
    alpha.map_or(Ok(1.0), |a| parse_percent_or_number(input, a, 1.0))
}

fn parse_hue(input: &str, part: &str) -> Result<f32, ColorParseError> {
    parse_number(input, part.trim_end_matches("deg"))
}

fn function_body<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
}

/// Reads the OKLab lightness of a CSS color string.
///
/// `oklch()`/`oklab()` strings report their declared lightness directly, so
/// values outside the sRGB gamut are not distorted by clamping. Every other
/// supported notation is converted through [`Color`].
pub fn perceptual_lightness(s: &str) -> Result<f32, ColorParseError> {
    let trimmed = s.trim().to_ascii_lowercase();
    for name in ["oklch", "oklab"] {
        if let Some(body) = function_body(&trimmed, name) {
            let (parts, _) = split_channels(&trimmed, body)?;
            return Ok(parse_percent_or_number(&trimmed, parts[0], 1.0)?.clamp(0.0, 1.0));
        }
    }
    Color::from_str(&trimmed).map(|c| c.lightness())
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses a CSS color string.
    ///
    /// Supported: hex (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`), `rgb()`,
    /// `rgba()`, `hsl()`, `hsla()`, `oklch()` and the keywords `white`,
    /// `black` and `transparent`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.starts_with('#') {
            return Color::from_hex(&s);
        }
        match s.as_str() {
            "white" => return Ok(Color::WHITE),
            "black" => return Ok(Color::BLACK),
            "transparent" => return Ok(Color::TRANSPARENT),
            _ => {}
        }

        if let Some(body) = function_body(&s, "rgba").or_else(|| function_body(&s, "rgb")) {
            let (parts, alpha) = split_channels(&s, body)?;
            let r = parse_percent_or_number(&s, parts[0], 255.0)?;
            let g = parse_percent_or_number(&s, parts[1], 255.0)?;
            let b = parse_percent_or_number(&s, parts[2], 255.0)?;
            return Ok(Color::new(r / 255.0, g / 255.0, b / 255.0, parse_alpha(&s, alpha)?));
        }

        if let Some(body) = function_body(&s, "hsla").or_else(|| function_body(&s, "hsl")) {
            let (parts, alpha) = split_channels(&s, body)?;
            let h = parse_hue(&s, parts[0])?;
            let sat = parse_percent_or_number(&s, parts[1], 1.0)?;
            let light = parse_percent_or_number(&s, parts[2], 1.0)?;
            let mut color = Color::from_hsl(h, sat, light);
            color.a = parse_alpha(&s, alpha)?.clamp(0.0, 1.0);
            return Ok(color);
        }

        if let Some(body) = function_body(&s, "oklch") {
            let (parts, alpha) = split_channels(&s, body)?;
            let l = parse_percent_or_number(&s, parts[0], 1.0)?;
            // CSS Color 4: 100% chroma is 0.4.
            let c = parse_percent_or_number(&s, parts[1], 0.4)?;
            let h = parse_hue(&s, parts[2])?;
            return Ok(Color::from_oklch(l, c, h, parse_alpha(&s, alpha)?));
        }

        Err(ColorParseError::InvalidFormat(format!("Unsupported color string: '{}'", s)))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex_with_alpha())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(SerdeError::custom)
    }
}
