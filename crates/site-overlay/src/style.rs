// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Visual style carried by each marker.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Site;
use crate::error::OverlayError;

/// Glyph circle radius in display units.
pub const GLYPH_RADIUS: f32 = 7.0;
/// Outline width around the glyph in display units.
pub const STROKE_WIDTH: f32 = 2.0;
/// Distance the label sits below the glyph centre, in display units.
pub const LABEL_OFFSET_Y: f32 = 12.0;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, OverlayError> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(OverlayError::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_e| OverlayError::InvalidColor(hex.to_string()))
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: alpha,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Optional colour replacements applied on top of the built-in marker look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOverrides {
    pub fill_color: Option<Color>,
    pub stroke_color: Option<Color>,
}

/// Circle glyph plus text label for one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub glyph_radius: f32,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f32,
    pub label_offset_y: f32,
    pub label_text: String,
}

impl MarkerStyle {
    /// Default look for a site: black dot, white outline, `"{id}: {owner}"` label.
    #[must_use]
    pub fn for_site(site: &Site) -> Self {
        Self {
            glyph_radius: GLYPH_RADIUS,
            fill_color: Color::BLACK,
            stroke_color: Color::WHITE,
            stroke_width: STROKE_WIDTH,
            label_offset_y: LABEL_OFFSET_Y,
            label_text: label_for(site),
        }
    }

    /// Replace colours where an override is set; everything else is fixed.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &StyleOverrides) -> Self {
        if let Some(fill) = overrides.fill_color {
            self.fill_color = fill;
        }
        if let Some(stroke) = overrides.stroke_color {
            self.stroke_color = stroke;
        }
        self
    }
}

/// Marker label text for a site.
#[must_use]
pub fn label_for(site: &Site) -> String {
    format!("{}: {}", site.id, site.owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_format() {
        let site = Site::new(2162, 29.155_161_224_973_3, -95.017_321_709_262_1, "dbaker");
        assert_eq!(label_for(&site), "2162: dbaker");
    }

    #[test]
    fn test_default_style_constants() {
        let site = Site::new(1, 0.0, 0.0, "x");
        let style = MarkerStyle::for_site(&site);
        assert!((style.glyph_radius - 7.0).abs() < f32::EPSILON);
        assert!((style.stroke_width - 2.0).abs() < f32::EPSILON);
        assert!((style.label_offset_y - 12.0).abs() < f32::EPSILON);
        assert_eq!(style.fill_color, Color::BLACK);
        assert_eq!(style.stroke_color, Color::WHITE);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let site = Site::new(1, 0.0, 0.0, "x");
        let overrides = StyleOverrides {
            fill_color: Some(Color::rgb(200, 0, 0)),
            stroke_color: None,
        };
        let style = MarkerStyle::for_site(&site).with_overrides(&overrides);
        assert_eq!(style.fill_color, Color::rgb(200, 0, 0));
        assert_eq!(style.stroke_color, Color::WHITE);
        assert_eq!(style.label_text, "1: x");
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#000000").unwrap(), Color::BLACK);
        assert_eq!(Color::from_hex("ffffff").unwrap(), Color::WHITE);
        let translucent = Color::from_hex("#ff800080").unwrap();
        assert_eq!(translucent, Color { r: 255, g: 128, b: 0, a: 128 });
    }

    #[test]
    fn test_color_from_hex_rejects_garbage() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(255, 128, 0).to_string(), "#ff8000");
        assert_eq!(Color { r: 0, g: 0, b: 0, a: 16 }.to_string(), "#00000010");
    }
}
