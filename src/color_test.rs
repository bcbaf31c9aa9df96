use super::*;

#[test]
fn parses_short_and_long_forms() {
    assert_eq!(parse_hex_rgb("#fff"), Some((255, 255, 255)));
    assert_eq!(parse_hex_rgb("#6366F1"), Some((0x63, 0x66, 0xf1)));
    assert_eq!(parse_hex_rgb("  #000000 "), Some((0, 0, 0)));
}

#[test]
fn rejects_malformed() {
    assert_eq!(parse_hex_rgb("ffffff"), None);
    assert_eq!(parse_hex_rgb("#ffff"), None);
    assert_eq!(parse_hex_rgb("#gggggg"), None);
    assert_eq!(parse_hex_rgb("#é12"), None);
    assert_eq!(parse_hex_rgb(""), None);
}

#[test]
fn normalize_expands_and_lowercases() {
    assert_eq!(normalize_hex("#ABC").as_deref(), Some("#aabbcc"));
    assert_eq!(normalize_hex("#1F2937").as_deref(), Some("#1f2937"));
    assert_eq!(normalize_hex("red"), None);
}
