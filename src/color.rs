//! Hex color parsing for text fills and configured backgrounds.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => Some((channel(&hex[0..1].repeat(2))?, channel(&hex[1..2].repeat(2))?, channel(&hex[2..3].repeat(2))?)),
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

fn channel(pair: &str) -> Option<u8> {
    match u8::from_str_radix(pair, 16) {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

/// Normalize a color to canonical lowercase `#rrggbb`, or `None` if it does not parse.
#[must_use]
pub fn normalize_hex(raw: &str) -> Option<String> {
    let (r, g, b) = parse_hex_rgb(raw)?;
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}
