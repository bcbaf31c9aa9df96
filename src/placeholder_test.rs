use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::*;

#[test]
fn vehicle_parse_known_and_fallback() {
    assert_eq!(VehicleType::parse("bike"), VehicleType::Bike);
    assert_eq!(VehicleType::parse("truck"), VehicleType::Truck);
    assert_eq!(VehicleType::parse("car"), VehicleType::Car);
    assert_eq!(VehicleType::parse("spaceship"), VehicleType::Car);
}

#[test]
fn vehicle_name_roundtrips_through_parse() {
    for v in [VehicleType::Car, VehicleType::Bike, VehicleType::Truck] {
        assert_eq!(VehicleType::parse(v.name()), v);
    }
}

#[test]
fn every_vehicle_svg_is_100_by_50() {
    for v in [VehicleType::Car, VehicleType::Bike, VehicleType::Truck] {
        let svg = vehicle_svg(v);
        assert!(svg.starts_with(r#"<svg width="100" height="50""#), "{v:?}");
        assert!(svg.ends_with("</svg>"));
    }
}

#[test]
fn silhouettes_differ() {
    assert_ne!(vehicle_svg(VehicleType::Car), vehicle_svg(VehicleType::Bike));
    assert_ne!(vehicle_svg(VehicleType::Bike), vehicle_svg(VehicleType::Truck));
    assert!(vehicle_svg(VehicleType::Bike).contains("<line"));
}

#[test]
fn sticker_svg_is_60_square_with_label() {
    let svg = sticker_svg();
    assert!(svg.contains(r#"width="60" height="60""#));
    assert!(svg.contains(">Sticker</text>"));
}

#[test]
fn preview_svg_centers_label() {
    let svg = gallery_preview_svg();
    assert!(svg.contains(r#"x="100" y="75""#));
    assert!(svg.contains("Sticker Preview"));
    assert!(tile_preview_svg().contains(r#"font-size="8""#));
}

#[test]
fn preview_svg_escapes_label() {
    let svg = preview_svg(10, 10, "<Tom & Jerry>", 4);
    assert!(svg.contains("&lt;Tom &amp; Jerry&gt;"));
}

#[test]
fn data_url_decodes_back_to_markup() {
    let url = svg_data_url(sticker_svg());
    let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
    let decoded = STANDARD.decode(encoded).unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), sticker_svg());
}
