//! Color values parsed from strings.
//!
//! A [Color] is created from a hex string (`#ccc`, `#cccccc`), an rgb(a) list
//! (`r,g,b`, `r,g,b,a`, `rgb(r,g,b)`, `rgba(r,g,b,a)`, values as numbers or percentages)
//! or a basic html color name (`blue`). It carries the hex, rgb, hsl and alpha
//! representations of the same color.
//!
//! ```
//! use tinct_core::color::Color;
//!
//! let c = Color::parse("rgb(18,52,86)").unwrap();
//! assert_eq!(c.hex(), "#123456");
//! assert_eq!(c.hsl(), [210, 79, 34]);
//! ```

pub mod convert;
pub mod format;
pub mod names;

use std::fmt;
use std::str::FromStr;

pub use convert::{hex_to_rgb, normalize_rgb, rgb_to_hex, rgb_to_hsl};
pub use names::{named_color, NAMED_COLORS};

use crate::error::Error;
use format::{Matched, FORMATS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Color {
    hex: String,
    rgb: [u8; 3],
    hsl: [u16; 3],
    alpha: f64,
}

impl Color {
    /// Parse a color string. Formats are tried in order: hex, rgb(a) list, html name.
    pub fn parse(value: &str) -> Result<Color, Error> {
        for color_format in FORMATS.iter() {
            if let Some(matched) = color_format.match_color(value)? {
                tracing::debug!("'{}' recognized as {} color", value, color_format.name());
                return Ok(Color::from_matched(matched));
            }
        }
        Err(Error::invalid_color_format(value))
    }

    /// Build a new color from another string.
    /// The current color is left untouched; on failure no color is produced.
    pub fn update(&self, value: &str) -> Result<Color, Error> {
        Color::parse(value)
    }

    fn from_matched(matched: Matched) -> Color {
        Color {
            hsl: rgb_to_hsl(matched.rgb),
            hex: matched.hex,
            rgb: matched.rgb,
            alpha: matched.alpha,
        }
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    pub fn hsl(&self) -> [u16; 3] {
        self.hsl
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn hue(&self) -> u16 {
        self.hsl[0]
    }

    pub fn saturation(&self) -> u16 {
        self.hsl[1]
    }

    pub fn lightness(&self) -> u16 {
        self.hsl[2]
    }
}

/// Create a color from a string, or `None` when the string is not a valid color.
/// The reason of a failure is reported as a warning.
pub fn create(value: &str) -> Option<Color> {
    match Color::parse(value) {
        Ok(color) => Some(color),
        Err(e) => {
            tracing::warn!("{}", e);
            None
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex)
    }
}

impl FromStr for Color {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = Error;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Color::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() -> Result<(), Error> {
        let c = Color::parse("#123456")?;
        assert_eq!(c.hex(), "#123456");
        assert_eq!(c.rgb(), [18, 52, 86]);
        assert_eq!(c.alpha(), 1.0);
        Ok(())
    }

    #[test]
    fn test_parse_short_hex() -> Result<(), Error> {
        let short = Color::parse("#abc")?;
        let long = Color::parse("#aabbcc")?;
        assert_eq!(short, long);
        Ok(())
    }

    #[test]
    fn test_parse_rgb_list() -> Result<(), Error> {
        let c = Color::parse("255,0,0")?;
        assert_eq!(c.rgb(), [255, 0, 0]);
        assert_eq!(c.hex(), "#ff0000");
        assert_eq!(c.hue(), 0);
        assert_eq!(c.alpha(), 1.0);

        assert_eq!(Color::parse("0,0,0,0.5")?.alpha(), 0.5);
        assert_eq!(Color::parse("rgba(0,0,0,0)")?.alpha(), 0.0);
        Ok(())
    }

    #[test]
    fn test_parse_named() -> Result<(), Error> {
        let c = Color::parse("blue")?;
        assert_eq!(c.hex(), "#0000ff");
        assert_eq!(c.hsl(), [240, 100, 100]);
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        for value in ["not-a-color", "", "#12", "rgb(1,2)", "Blue"] {
            let e = Color::parse(value).unwrap_err();
            assert!(e.is_invalid_color_format(), "{value}");
        }
    }

    #[test]
    fn test_hex_wins_over_rgb_list() -> Result<(), Error> {
        let c = Color::parse("#010203 4,5,6")?;
        assert_eq!(c.rgb(), [1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_representations_agree() -> Result<(), Error> {
        for value in ["#ABCDEF", "12,200,99", "rgb(10%,20%,30%)", "olive", "#fff"] {
            let c = Color::parse(value)?;
            assert_eq!(hex_to_rgb(c.hex())?, c.rgb());
            assert_eq!(rgb_to_hsl(c.rgb()), c.hsl());
        }
        Ok(())
    }

    #[test]
    fn test_update_returns_new_color() -> Result<(), Error> {
        let red = Color::parse("red")?;
        let navy = red.update("navy")?;
        assert_eq!(red.hex(), "#ff0000");
        assert_eq!(navy.hex(), "#000080");
        assert!(red.update("bogus").is_err());
        assert_eq!(red.hex(), "#ff0000");
        Ok(())
    }

    #[test]
    fn test_create() {
        assert_eq!(create("lime").map(|c| c.rgb()), Some([0, 255, 0]));
        assert!(create("not-a-color").is_none());
    }

    #[test]
    fn test_from_str_and_display() -> Result<(), Error> {
        let c: Color = "rgb(0,128,128)".parse()?;
        assert_eq!(c.to_string(), "#008080");
        assert_eq!(Color::try_from("teal")?, c);
        Ok(())
    }

    #[test]
    fn test_serialize() -> Result<(), Error> {
        let c = Color::parse("0,0,255,50%")?;
        let json = serde_json::to_value(&c).map_err(|e| Error::serialization_error("color", &e))?;
        assert_eq!(
            json,
            serde_json::json!({"hex": "#0000ff", "rgb": [0, 0, 255], "hsl": [240, 100, 100], "alpha": 0.5})
        );
        Ok(())
    }
}
