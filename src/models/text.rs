// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text property data structures.
//!
//! This module defines the values edited through the properties panel:
//! text content, font size, font color and font family.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default overlay text.
pub const DEFAULT_TEXT: &str = "Your Text Here";

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 40;

/// Smallest accepted font size.
pub const MIN_FONT_SIZE: u32 = 1;

/// Largest accepted font size. Glyph masks grow with the square of the size.
pub const MAX_FONT_SIZE: u32 = 1000;

/// Font families offered by the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Arial")]
    Arial,
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Courier New")]
    CourierNew,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    #[serde(rename = "Comic Sans MS")]
    ComicSansMs,
}

impl FontFamily {
    /// All families, in the order shown in the selector.
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Arial,
        FontFamily::Helvetica,
        FontFamily::CourierNew,
        FontFamily::TimesNewRoman,
        FontFamily::ComicSansMs,
    ];

    /// The font family name as used for font lookup.
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::CourierNew => "Courier New",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::ComicSansMs => "Comic Sans MS",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An opaque RGB text color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TextColor {
    pub const BLACK: TextColor = TextColor { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for TextColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = csscolorparser::parse(s.trim())
            .map_err(|e| format!("invalid color {:?}: {}", s, e))?;
        let [r, g, b, _] = color.to_rgba8();
        Ok(Self { r, g, b })
    }
}

impl TryFrom<String> for TextColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TextColor> for String {
    fn from(color: TextColor) -> Self {
        color.to_string()
    }
}

/// The full set of text properties pushed into the text layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextProperties {
    pub text: String,
    pub font_size: u32,
    pub color: TextColor,
    pub font_family: FontFamily,
}

impl Default for TextProperties {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            color: TextColor::BLACK,
            font_family: FontFamily::Arial,
        }
    }
}

/// Coerce raw font size input to a usable size.
///
/// Leading whitespace and an optional sign are accepted, then as many digits
/// as are present (`"12px"` reads as 12). Anything without digits, or a
/// value below [`MIN_FONT_SIZE`], becomes [`MIN_FONT_SIZE`]. Values above
/// [`MAX_FONT_SIZE`] are clamped to it.
pub fn parse_font_size(input: &str) -> u32 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if negative || digits.is_empty() {
        return MIN_FONT_SIZE;
    }

    // Overlong digit strings saturate instead of failing
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    value.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}
