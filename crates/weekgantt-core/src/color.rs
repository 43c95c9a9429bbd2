//! RGBA colors with hex conversion

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ColorError;

/// Color with channels in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::Invalid(hex.to_string());
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        let (r, g, b, a) = match digits.len() {
            3 => {
                let short = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                (short(0)?, short(1)?, short(2)?, 255)
            }
            6 | 8 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                if digits.len() == 8 { channel(&digits[6..8])? } else { 255 },
            ),
            _ => return Err(invalid()),
        };

        Ok(Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        ))
    }

    /// Multiply the RGB channels by `factor`; alpha is kept as is
    pub fn scale(self, factor: f64) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// Perceived brightness (Rec. 601 luma)
    pub fn luma(self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// 8-bit channels, rounded half-to-even and saturated
    pub fn to_rgb8(self) -> [u8; 3] {
        [to_u8(self.r), to_u8(self.g), to_u8(self.b)]
    }

    /// `#rrggbb`; alpha is dropped
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

fn to_u8(channel: f64) -> u8 {
    (channel * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
