//! Pure conversions between color representations.
//!
//! These functions do not depend on [Color](super::Color) and can be used on their own.

use crate::error::Error;

/// Convert a hex color string (`#rgb` or `#rrggbb`, any letter case) to an RGB triple.
///
/// The short form is expanded by duplicating each digit, so `#abc` is read as `#aabbcc`.
pub fn hex_to_rgb(hex: &str) -> Result<[u8; 3], Error> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| Error::invalid_color_format(hex))?;

    let expanded = match digits.len() {
        3 => expand_short_hex(digits),
        6 => digits.to_owned(),
        _ => return Err(Error::invalid_color_format(hex)),
    };

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let pair = &expanded[2 * i..2 * i + 2];
        *channel = u8::from_str_radix(pair, 16).map_err(|_| Error::invalid_color_format(hex))?;
    }
    Ok(rgb)
}

/// Convert an RGB triple to a lowercase `#rrggbb` string.
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Duplicate every digit of a short hex code: `abc` -> `aabbcc`.
pub(crate) fn expand_short_hex(digits: &str) -> String {
    digits.chars().flat_map(|c| [c, c]).collect()
}

/// Convert an RGB triple to `[hue, saturation, lightness]`.
///
/// Hue is in degrees `[0,360)`, saturation and lightness are percentages.
/// Lightness is taken from the maximal channel (`max * 100`), not from the
/// midpoint of the extremes, so `[255, 0, 0]` has lightness 100.
pub fn rgb_to_hsl(rgb: [u8; 3]) -> [u16; 3] {
    let r = rgb[0] as f64 / 255.0;
    let g = rgb[1] as f64 / 255.0;
    let b = rgb[2] as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    let (hue, saturation) = if max == min {
        (0, 0)
    } else {
        let saturation = (diff / max * 100.0).round() as u16;
        let h = if max == r {
            (g - b) / diff + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / diff + 2.0
        } else {
            (r - g) / diff + 4.0
        };
        // a hue just below 6 rounds up to a full turn
        let hue = (360.0 * (h / 6.0)).round() as u16 % 360;
        (hue, saturation)
    };

    let lightness = (max * 100.0).round() as u16;
    [hue, saturation, lightness]
}

/// Normalize 3 or 4 rgb(a) tokens into an RGB triple and an alpha.
///
/// Color tokens are either numbers clamped to `[0,255]` or percentages clamped to
/// `[0,100]` and scaled to `[0,255]`; the result is rounded to the nearest integer.
/// The optional alpha token is either a number clamped to `[0,1]` or a percentage
/// clamped to `[0,100]` and divided by 100. Without an alpha token the alpha is 1.
/// Out of range values saturate, they are never rejected.
pub fn normalize_rgb<S: AsRef<str>>(tokens: &[S]) -> Result<([u8; 3], f64), Error> {
    if tokens.len() != 3 && tokens.len() != 4 {
        let joined = tokens.iter().map(|t| t.as_ref()).collect::<Vec<_>>().join(",");
        return Err(Error::invalid_color_format(&joined));
    }

    let mut rgb = [0u8; 3];
    for (channel, token) in rgb.iter_mut().zip(tokens) {
        let value = match parse_token(token.as_ref())? {
            Token::Percent(p) => p.clamp(0.0, 100.0) / 100.0 * 255.0,
            Token::Number(n) => n.clamp(0.0, 255.0),
        };
        *channel = value.round() as u8;
    }

    let alpha = match tokens.get(3) {
        Some(token) => match parse_token(token.as_ref())? {
            Token::Percent(p) => p.clamp(0.0, 100.0) / 100.0,
            Token::Number(n) => n.clamp(0.0, 1.0),
        },
        None => 1.0,
    };

    Ok((rgb, alpha))
}

enum Token {
    Number(f64),
    Percent(f64),
}

fn parse_token(token: &str) -> Result<Token, Error> {
    let token = token.trim();
    let (number, percent) = match token.strip_suffix('%') {
        Some(number) => (number, true),
        None => (token, false),
    };
    let value = number
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| Error::invalid_color_format(token))?;
    Ok(if percent {
        Token::Percent(value)
    } else {
        Token::Number(value)
    })
}
