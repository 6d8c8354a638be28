use std::fmt;
use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color – an sRGB colour that travels as a `#rrggbb` string
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(Srgb<u8>);

impl Color {
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Color(Srgb::new(red, green, blue))
    }

    /// `#rrggbb`, lower-case.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Color)
            .map_err(|e| format!("invalid colour '{s}': {e}"))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Palette – a discrete colour sequence applied in category order
// ---------------------------------------------------------------------------

/// Ordered colour sequence. Categories take colours in the order they are
/// first seen, wrapping around when they outnumber the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Palette(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    /// Colours for `n` categories in order. An empty palette falls back to
    /// generated hues.
    pub fn assign(&self, n: usize) -> Vec<Color> {
        let colors = self.colors();
        if colors.is_empty() {
            return generate_palette(n);
        }
        colors.iter().copied().cycle().take(n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hex() {
        let color: Color = "#0077B6".parse().unwrap();
        assert_eq!(color, Color::from_rgb(0x00, 0x77, 0xb6));
        assert_eq!(color.to_hex(), "#0077b6");
        assert!("#nothex".parse::<Color>().is_err());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let palette: Palette = serde_json::from_str(r##"["#4CAF50", "#FF5722"]"##).unwrap();
        assert_eq!(palette.colors().len(), 2);
        assert_eq!(
            serde_json::to_string(&palette).unwrap(),
            r##"["#4caf50","#ff5722"]"##
        );
    }

    #[test]
    fn assign_cycles_in_order() {
        let palette = Palette::new(vec![
            "#4CAF50".parse().unwrap(),
            "#FF5722".parse().unwrap(),
        ]);
        let colors = palette.assign(3);
        assert_eq!(colors[0], colors[2]);
        assert_ne!(colors[0], colors[1]);
        assert!(palette.assign(0).is_empty());
    }

    #[test]
    fn empty_palette_generates_distinct_hues() {
        let colors = Palette::new(Vec::new()).assign(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
