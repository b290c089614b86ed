//! Color tokens used by the dataset.
//!
//! Tokens are written as CSS `oklch(L C H)` (optionally `oklch(L C H / A)`) or
//! `#rrggbb`. They are resolved to sRGB once, when the dataset is parsed.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// An sRGB color resolved from a dataset token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha carried by the token itself (1.0 when absent).
    pub alpha: f32,
    token: String,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: 1.0,
            token: String::new(),
        }
    }

    /// Parse a CSS-style color token.
    pub fn parse(token: &str) -> Result<Self, TimelineError> {
        let trimmed = token.trim();
        let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(body) = trimmed
            .strip_prefix("oklch(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_oklch(body)
        } else {
            None
        };

        let (r, g, b, alpha) = parsed.ok_or_else(|| TimelineError::InvalidColor(token.to_string()))?;
        Ok(Self {
            r,
            g,
            b,
            alpha,
            token: trimmed.to_string(),
        })
    }

    /// Raster pixel with the token alpha multiplied by `opacity`.
    pub fn to_rgba(&self, opacity: f32) -> Rgba<u8> {
        let alpha = (self.alpha * opacity).clamp(0.0, 1.0);
        Rgba([self.r, self.g, self.b, (alpha * 255.0).round() as u8])
    }

    /// CSS `rgba()` string for the webview side.
    pub fn to_css(&self, opacity: f32) -> String {
        let alpha = (self.alpha * opacity).clamp(0.0, 1.0);
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
    }
}

impl TryFrom<String> for Color {
    type Error = TimelineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        if color.token.is_empty() {
            format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
        } else {
            color.token
        }
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8, f32)> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b, 1.0))
}

fn parse_oklch(body: &str) -> Option<(u8, u8, u8, f32)> {
    let (channels, alpha) = match body.split_once('/') {
        Some((channels, alpha)) => (channels, parse_component(alpha.trim())?),
        None => (body, 1.0),
    };
    let mut parts = channels.split_whitespace();
    let lightness = parse_component(parts.next()?)?;
    let chroma: f64 = parts.next()?.parse().ok()?;
    let hue: f64 = parts.next()?.trim_end_matches("deg").parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let [r, g, b] = oklch_to_srgb(lightness as f64, chroma, hue);
    Some((r, g, b, alpha.clamp(0.0, 1.0)))
}

/// Accepts `0.5` or `50%`.
fn parse_component(value: &str) -> Option<f32> {
    match value.strip_suffix('%') {
        Some(percent) => percent.parse::<f32>().ok().map(|v| v / 100.0),
        None => value.parse().ok(),
    }
}

fn oklch_to_srgb(lightness: f64, chroma: f64, hue_deg: f64) -> [u8; 3] {
    let hue = hue_deg.to_radians();
    let a = chroma * hue.cos();
    let b = chroma * hue.sin();

    let l_ = lightness + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = lightness - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = lightness - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let linear = [
        4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
        -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
        -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s,
    ];
    linear.map(|channel| (gamma_encode(channel).clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn gamma_encode(linear: f64) -> f64 {
    if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}
