//!
//! # Tinct Core
//!
//! Tinct core defines the color value model and the error type shared by the tinct crates.
//!
//! ## Glossary
//!
//! **[Color](crate::color::Color)** - an immutable color value built from a single string.
//! It always carries four consistent representations: a hex string, an RGB triple,
//! an HSL triple and an alpha (opacity) value. See [color](crate::color).
//!
//! **Hex color** - 24-bit RGB color encoded as 6 hexadecimal digits prefixed with `#`.
//! The short form `#abc` is accepted and expanded to `#aabbcc`.
//!
//! **HSL** - hue/saturation/lightness representation. Hue is in degrees `[0,360)`,
//! saturation and lightness are integer percentages.
//!
//! **Alpha** - opacity channel, 0 (transparent) to 1 (opaque).
//!
//! **[Color format](crate::color::format::ColorFormat)** - one recognizer of a color string shape
//! (hex, rgb list, color name). Formats are tried in a fixed order and the first match wins.
//!
//! **[Error](crate::error::Error)** - the error type used by all tinct crates,
//! classified by an [ErrorType](crate::error::ErrorType).
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod color;
pub mod error;
