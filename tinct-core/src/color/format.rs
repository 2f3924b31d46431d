//! Recognizers of the accepted color string shapes.
//!
//! Every shape is matched by its own [ColorFormat]. [FORMATS] lists them in priority order:
//! hex, rgb(a) list, html color name. The first format that matches decides the color.

use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

use crate::color::convert::{expand_short_hex, hex_to_rgb, normalize_rgb, rgb_to_hex};
use crate::color::names::{named_color, NAMED_COLORS};
use crate::error::Error;

/// Result of a successful format match, before the HSL form is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Matched {
    pub hex: String,
    pub rgb: [u8; 3],
    pub alpha: f64,
}

pub trait ColorFormat {
    /// Short name of the format, used in log messages.
    fn name(&self) -> &'static str;

    /// Try to recognize the input.
    /// Returns `Ok(None)` when the input does not have this format.
    fn match_color(&self, input: &str) -> Result<Option<Matched>, Error>;
}

/// Formats in the order they are tried.
pub static FORMATS: [&(dyn ColorFormat + Sync); 3] = [&HexFormat, &RgbListFormat, &NamedFormat];

fn cached_regex(
    cell: &'static OnceLock<Regex>,
    pattern: impl FnOnce() -> String,
) -> Result<&'static Regex, Error> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let pattern = pattern();
    let re = Regex::new(&pattern)
        .map_err(|e| Error::general_error(format!("Invalid color pattern '{}': {}", pattern, e)))?;
    Ok(cell.get_or_init(|| re))
}

/// `#` followed by exactly 3 or 6 hex digits, delimited by whitespace or the string ends.
pub struct HexFormat;

impl ColorFormat for HexFormat {
    fn name(&self) -> &'static str {
        "hex"
    }

    fn match_color(&self, input: &str) -> Result<Option<Matched>, Error> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = cached_regex(&RE, || {
            r"(?:^|\s)#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})(?:\s|$)".to_owned()
        })?;

        let Some(caps) = re.captures(input) else {
            return Ok(None);
        };
        let digits = &caps[1];
        let hex = if digits.len() == 3 {
            format!("#{}", expand_short_hex(digits))
        } else {
            format!("#{}", digits)
        };
        let rgb = hex_to_rgb(&hex)?;
        Ok(Some(Matched {
            hex,
            rgb,
            alpha: 1.0,
        }))
    }
}

/// Three comma separated numbers or percentages, optionally followed by an alpha.
/// Any surrounding text, e.g. a css `rgb(...)` wrapper, is ignored.
pub struct RgbListFormat;

impl ColorFormat for RgbListFormat {
    fn name(&self) -> &'static str {
        "rgb"
    }

    fn match_color(&self, input: &str) -> Result<Option<Matched>, Error> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = cached_regex(&RE, || {
            let token = r"(?:\d+(?:\.\d+)?|\.\d+)%?";
            format!(r"(?:{token}\s*,\s*){{2,3}}{token}")
        })?;

        let Some(found) = re.find(input) else {
            return Ok(None);
        };
        let tokens = found.as_str().split(',').map(str::trim).collect::<Vec<_>>();
        let (rgb, alpha) = normalize_rgb(&tokens)?;
        Ok(Some(Matched {
            hex: rgb_to_hex(rgb),
            rgb,
            alpha,
        }))
    }
}

/// One of the basic html color names, e.g. `blue`. Nothing but whitespace may surround it.
pub struct NamedFormat;

impl ColorFormat for NamedFormat {
    fn name(&self) -> &'static str {
        "name"
    }

    fn match_color(&self, input: &str) -> Result<Option<Matched>, Error> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = cached_regex(&RE, || {
            format!(
                r"^\s*({})\s*$",
                NAMED_COLORS.iter().map(|(name, _)| name).join("|")
            )
        })?;

        let Some(hex) = re.captures(input).and_then(|caps| named_color(&caps[1])) else {
            return Ok(None);
        };
        Ok(Some(Matched {
            hex: hex.to_owned(),
            rgb: hex_to_rgb(hex)?,
            alpha: 1.0,
        }))
    }
}
