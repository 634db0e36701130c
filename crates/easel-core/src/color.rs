//! CSS-style color parsing.
//!
//! Only the forms the editor writes are recognised: `#rgb`, `#rrggbb`,
//! `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`. Everything else,
//! including `transparent` and `none`, parses to `None` and must be treated
//! by callers as "no paint" rather than black.

/// A parsed color: 8-bit channels plus a 0-1 alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Lowercase hex form (`#rrggbb`, or `#rrggbbaa` when not opaque).
    pub fn to_hex(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, alpha)
        }
    }

    /// True when all three channels are equal.
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

/// Parse a color string. Returns `None` for anything that is not a color.
pub fn parse_color(input: &str) -> Option<Rgba> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        return parse_functional(args, true);
    }
    if let Some(args) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        return parse_functional(args, false);
    }

    None
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Rgba::rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => Some(Rgba::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => {
            let alpha = channel(6..8)? as f64 / 255.0;
            Some(Rgba::rgba(channel(0..2)?, channel(2..4)?, channel(4..6)?, alpha))
        }
        _ => None,
    }
}

fn parse_functional(args: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let channel = |part: &str| -> Option<u8> {
        let value: f64 = part.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(value.round().clamp(0.0, 255.0) as u8)
    };

    let alpha = if with_alpha {
        let value: f64 = parts[3].parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        value.clamp(0.0, 1.0)
    } else {
        1.0
    };

    Some(Rgba::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}
