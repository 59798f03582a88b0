use serde::Serialize;
use thiserror::Error;

/// Amount applied when deriving the light and dark palette variants
pub const PALETTE_FACTOR: f64 = 0.3;

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("Invalid hex color '{0}': expected #RGB or #RRGGBB")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RGB` or `#RRGGBB`. The leading `#` is optional.
    pub fn parse(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(digits[i..=i].repeat(2).as_str());
                Ok(Self {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?,
                })
            }
            6 => Ok(Self {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
            }),
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }
}

/// Strict `#RGB` / `#RRGGBB` check, `#` required
pub fn is_hex_color(value: &str) -> bool {
    value.starts_with('#') && Rgb::parse(value).is_ok()
}

/// Move each channel `factor` of the way towards black
pub fn darken(hex: &str, factor: f64) -> Result<String, ColorError> {
    let factor = factor.clamp(0.0, 1.0);
    let rgb = Rgb::parse(hex)?.map(|c| (f64::from(c) * (1.0 - factor)) as u8);
    Ok(rgb.to_hex())
}

/// Move each channel `factor` of the way towards white
pub fn lighten(hex: &str, factor: f64) -> Result<String, ColorError> {
    let factor = factor.clamp(0.0, 1.0);
    let rgb = Rgb::parse(hex)?.map(|c| (f64::from(c) + f64::from(255 - c) * factor) as u8);
    Ok(rgb.to_hex())
}

/// RGB inversion
pub fn complementary(hex: &str) -> Result<String, ColorError> {
    Ok(Rgb::parse(hex)?.map(|c| 255 - c).to_hex())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub primary: String,
    #[serde(rename = "primary-light")]
    pub primary_light: String,
    #[serde(rename = "primary-dark")]
    pub primary_dark: String,
    pub complementary: String,
}

/// Light, dark and complementary variants of `primary`
pub fn palette(primary: &str) -> Result<Palette, ColorError> {
    if !is_hex_color(primary) {
        return Err(ColorError::InvalidHex(primary.to_string()));
    }
    Ok(Palette {
        primary: primary.to_string(),
        primary_light: lighten(primary, PALETTE_FACTOR)?,
        primary_dark: darken(primary, PALETTE_FACTOR)?,
        complementary: complementary(primary)?,
    })
}
