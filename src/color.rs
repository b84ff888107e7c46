//! Hex color parsing and blending for the `color` property track.
//!
//! The editor works in `#rrggbb` strings end-to-end; `#rgb` shorthand is accepted
//! on input and expanded before parsing.

/// Color used when neither blend endpoint parses.
pub const FALLBACK_HEX: &str = "#000000";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Parse `#rgb` or `#rrggbb`. Anything else (missing `#`, wrong length,
    /// non-hex digits) is `None`; the caller decides the fallback.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.trim().strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: Vec<u8> = match digits.len() {
            3 => digits.bytes().flat_map(|b| [b, b]).collect(),
            6 => digits.bytes().collect(),
            _ => return None,
        };
        let channel = |i: usize| {
            let pair = std::str::from_utf8(&expanded[i..i + 2]).ok()?;
            u8::from_str_radix(pair, 16).ok()
        };
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
        }
    }
}

/// Blend two hex endpoints at `t`.
///
/// A side that fails to parse forfeits to the other; when neither parses the
/// result is [`FALLBACK_HEX`]. Always returns a drawable color string.
pub fn blend_hex(a: Option<&str>, b: Option<&str>, t: f64) -> String {
    let pa = a.and_then(Rgb8::parse_hex);
    let pb = b.and_then(Rgb8::parse_hex);
    match (pa, pb) {
        (Some(ca), Some(cb)) => Rgb8::lerp(ca, cb, t).to_hex(),
        (Some(_), None) => a.unwrap_or(FALLBACK_HEX).to_string(),
        (None, Some(_)) => b.unwrap_or(FALLBACK_HEX).to_string(),
        (None, None) => FALLBACK_HEX.to_string(),
    }
}
