#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, STICKER_SCALE, VEHICLE_SCALE};

// =============================================================
// Helpers
// =============================================================

fn core() -> EngineCore {
    EngineCore::new(DesignerConfig::default(), Catalog::builtin(), 7)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Default::default() }
}

fn created_id(actions: &[Action]) -> ObjectId {
    actions
        .iter()
        .find_map(|a| match a {
            Action::ObjectCreated { id, .. } => Some(*id),
            _ => None,
        })
        .expect("no ObjectCreated action")
}

fn add_sticker(core: &mut EngineCore) -> ObjectId {
    created_id(&core.add_sticker(1).unwrap())
}

fn center_of(core: &EngineCore, id: ObjectId) -> Point {
    core.object(&id).unwrap().transform.center()
}

fn svg_bytes(w: u32, h: u32) -> Vec<u8> {
    format!(r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"></svg>"#).into_bytes()
}

fn upload(core: &mut EngineCore, bytes: Vec<u8>) -> ObjectId {
    created_id(&core.handle_user_image(bytes, "image/svg+xml").unwrap())
}

fn asset_ref_of(core: &EngineCore, id: ObjectId) -> String {
    match &core.object(&id).unwrap().data {
        ObjectData::Image(img) => img.asset_ref.clone(),
        ObjectData::Text(_) => panic!("expected image data"),
    }
}

fn kinds(core: &EngineCore) -> Vec<ObjectKind> {
    core.scene.list_objects().iter().map(|o| o.kind).collect()
}

// =============================================================
// Construction and vehicle
// =============================================================

#[test]
fn new_engine_loads_centered_vehicle() {
    let core = core();
    assert_eq!(kinds(&core), [ObjectKind::Vehicle]);
    let vehicle = core.scene.vehicle().unwrap();
    assert_eq!(vehicle.transform, Transform::at(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0, VEHICLE_SCALE));
    assert!(!vehicle.selectable);
    assert_eq!(core.vehicle_type(), VehicleType::Car);
}

#[test]
fn set_vehicle_keeps_user_content_above() {
    let mut core = core();
    let text = created_id(&core.add_text("RACE", None).unwrap());
    let actions = core.set_vehicle(VehicleType::Truck);
    assert!(actions.contains(&Action::RenderNeeded));
    assert_eq!(kinds(&core), [ObjectKind::Vehicle, ObjectKind::Text]);
    assert_eq!(core.scene.list_objects()[1].id, text);
    assert_eq!(core.vehicle_type(), VehicleType::Truck);
}

// =============================================================
// Placement
// =============================================================

#[test]
fn sticker_lands_in_spawn_area_and_is_selected() {
    let mut core = core();
    let actions = core.add_sticker(3).unwrap();
    let id = created_id(&actions);
    let obj = core.object(&id).unwrap();
    assert_eq!(obj.kind, ObjectKind::Sticker);
    assert!((100.0..700.0).contains(&obj.transform.x));
    assert!((100.0..500.0).contains(&obj.transform.y));
    assert_eq!(obj.transform.scale_x, STICKER_SCALE);
    assert_eq!(obj.natural_size(), (60.0, 60.0));
    assert_eq!(core.selection(), Some(id));
    assert!(actions.contains(&Action::Panel { binding: PanelBinding::Detached }));
}

#[test]
fn sticker_placement_is_reproducible_for_a_seed() {
    let mut a = core();
    let mut b = core();
    let ia = add_sticker(&mut a);
    let ib = add_sticker(&mut b);
    assert_eq!(a.object(&ia).unwrap().transform, b.object(&ib).unwrap().transform);
}

#[test]
fn unknown_sticker_is_rejected() {
    let mut core = core();
    assert!(matches!(core.add_sticker(999), Err(DesignerError::UnknownSticker(999))));
    assert_eq!(core.scene.len(), 1);
}

#[test]
fn text_is_centered_bound_and_selected() {
    let mut core = core();
    let actions = core.add_text("  RACE  ", None).unwrap();
    let id = created_id(&actions);
    let obj = core.object(&id).unwrap();
    assert_eq!(obj.text_data().unwrap().content, "RACE");
    assert_eq!(obj.transform.center(), pt(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0));
    assert!(core.selection.is_bound());
    assert!(actions.contains(&Action::Panel { binding: PanelBinding::Bound { id, style: TextStyle::default() } }));
}

#[test]
fn blank_text_becomes_a_notice() {
    let mut core = core();
    let actions = recover(core.add_text("   \n ", None));
    assert_eq!(actions, [Action::Notice { message: "Please enter some text first!".into() }]);
    assert_eq!(core.scene.len(), 1);
}

#[test]
fn text_with_bad_style_is_rejected() {
    let mut core = core();
    let style = TextStyle { color_hex: "red".into(), ..TextStyle::default() };
    assert!(matches!(core.add_text("GO", Some(style)), Err(DesignerError::InvalidTextStyle(_))));
    assert_eq!(core.scene.len(), 1);
}

#[test]
fn vehicle_added_after_text_goes_to_bottom() {
    let mut core = core();
    core.scene.clear();
    let text = created_id(&core.add_text("RACE", None).unwrap());
    core.set_vehicle(VehicleType::Bike);
    assert_eq!(kinds(&core), [ObjectKind::Vehicle, ObjectKind::Text]);
    assert_eq!(core.scene.list_objects()[1].id, text);
}

#[test]
fn user_image_is_fit_and_anchored() {
    let mut core = core();
    let id = created_id(&core.handle_user_image(svg_bytes(1000, 200), "image/svg+xml").unwrap());
    let obj = core.object(&id).unwrap();
    assert_eq!(obj.kind, ObjectKind::UserImage);
    assert!((obj.transform.scale_x - 0.48).abs() < 1e-9);
    assert_eq!(obj.transform.x, 400.0);
    assert!((obj.transform.y - 330.0).abs() < 1e-9);
    assert_eq!(core.selection(), Some(id));
}

#[test]
fn pdf_upload_adds_nothing_and_notifies() {
    let mut core = core();
    let result = core.handle_user_image(b"%PDF-1.4".to_vec(), "application/pdf");
    assert!(matches!(result, Err(DesignerError::InvalidFileType { .. })));
    assert_eq!(core.scene.len(), 1);

    let actions = recover(core.handle_user_image(b"%PDF-1.4".to_vec(), "application/pdf"));
    assert_eq!(actions, [Action::Notice { message: "Please upload an image file (PNG, JPG, SVG, or WEBP).".into() }]);
}

#[test]
fn unsized_upload_is_refit_once_size_resolves() {
    let mut core = core();
    let id = upload(&mut core, b"<svg/>".to_vec());
    let asset_ref = asset_ref_of(&core, id);
    assert_eq!(core.object(&id).unwrap().transform.scale_x, 1.0);
    assert_eq!(core.object(&id).unwrap().natural_size(), (0.0, 0.0));

    let actions = core.resolve_natural_size(&asset_ref, 300.0, 900.0).unwrap();
    let obj = core.object(&id).unwrap();
    let t = obj.transform;
    assert_eq!(obj.natural_size(), (300.0, 900.0));
    assert!((t.scale_x - 240.0 / 900.0).abs() < 1e-9);
    assert_eq!(t.scale_x, t.scale_y);
    assert!(900.0 * t.scale_y <= 240.0 + 1e-9);
    assert_eq!(t.x, 400.0);
    assert!((t.y - 330.0).abs() < 1e-9);
    assert_eq!(actions, [Action::ObjectModified { id, transform: t }, Action::RenderNeeded]);

    assert!(core.resolve_natural_size(&asset_ref, 80.0, 60.0).unwrap().is_empty());
}

#[test]
fn svg_in_physical_units_fits_after_load() {
    let mut core = core();
    let bytes = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10cm" height="10cm"></svg>"#.to_vec();
    let id = upload(&mut core, bytes);
    let asset_ref = asset_ref_of(&core, id);
    core.resolve_natural_size(&asset_ref, 378.0, 378.0).unwrap();
    let t = core.object(&id).unwrap().transform;
    assert!((t.scale_y - 240.0 / 378.0).abs() < 1e-9);
    assert!(378.0 * t.scale_y <= 240.0 + 1e-9);
}

#[test]
fn moved_unsized_upload_keeps_its_transform() {
    let mut core = core();
    let id = upload(&mut core, b"<svg/>".to_vec());
    let asset_ref = asset_ref_of(&core, id);
    core.scene.apply_partial(&id, &PartialTransform { x: Some(120.0), ..Default::default() });

    let actions = core.resolve_natural_size(&asset_ref, 1000.0, 200.0).unwrap();
    assert_eq!(actions, [Action::RenderNeeded]);
    let obj = core.object(&id).unwrap();
    assert_eq!(obj.natural_size(), (1000.0, 200.0));
    assert_eq!(obj.transform.x, 120.0);
    assert_eq!(obj.transform.scale_x, 1.0);
}

#[test]
fn sized_upload_is_never_refit() {
    let mut core = core();
    let id = upload(&mut core, svg_bytes(1000, 200));
    let asset_ref = asset_ref_of(&core, id);
    assert!(core.resolve_natural_size(&asset_ref, 10.0, 10.0).unwrap().is_empty());
    assert!((core.object(&id).unwrap().transform.scale_x - 0.48).abs() < 1e-9);
}

#[test]
fn upload_bytes_are_held_once_under_a_short_key() {
    let mut core = core();
    let id = upload(&mut core, svg_bytes(1000, 200));
    let key = asset_ref_of(&core, id);
    assert!(key.starts_with(UPLOAD_KEY_PREFIX));
    assert!(key.len() < 64);
    assert!(core.asset_source(&key).starts_with("data:image/svg+xml;base64,"));
    assert_eq!(core.uploads.len(), 1);
    assert_eq!(core.asset_source("stickers/star.svg"), "stickers/star.svg");
}

#[test]
fn deleting_an_upload_releases_its_bytes() {
    let mut core = core();
    let kept = upload(&mut core, svg_bytes(100, 100));
    let dropped = upload(&mut core, b"<svg/>".to_vec());
    let (kept_key, dropped_key) = (asset_ref_of(&core, kept), asset_ref_of(&core, dropped));

    core.on_key_down(&Key("Delete".into()), no_modifiers());
    assert!(core.object(&dropped).is_none());
    assert_eq!(core.asset_source(&dropped_key), dropped_key);
    assert!(core.asset_source(&kept_key).starts_with("data:"));
    assert_eq!(core.uploads.len(), 1);
    assert!(core.r#unsized.is_empty());
}

#[test]
fn clear_releases_every_upload() {
    let mut core = core();
    upload(&mut core, svg_bytes(100, 100));
    upload(&mut core, b"<svg/>".to_vec());
    core.clear();
    assert!(core.uploads.is_empty());
    assert!(core.r#unsized.is_empty());
    assert_eq!(core.scene.asset_refs().count(), 1);
}

// =============================================================
// Scene-wide
// =============================================================

#[test]
fn clear_wipes_content_and_reloads_vehicle() {
    let mut core = core();
    for _ in 0..3 {
        add_sticker(&mut core);
    }
    assert_eq!(core.scene.len(), 4);
    let actions = core.clear();
    assert_eq!(actions[0], Action::SceneCleared);
    assert_eq!(kinds(&core), [ObjectKind::Vehicle]);
    assert_eq!(core.selection(), None);
}

#[test]
fn stack_order_commands_move_selection() {
    let mut core = core();
    let first = add_sticker(&mut core);
    let second = add_sticker(&mut core);
    core.select(first);
    assert_eq!(core.bring_selected_to_front(), [Action::RenderNeeded]);
    assert_eq!(core.scene.list_objects()[2].id, first);
    assert_eq!(core.send_selected_to_back(), [Action::RenderNeeded]);
    assert_eq!(core.scene.list_objects()[1].id, first);
    assert_eq!(core.scene.list_objects()[2].id, second);
}

#[test]
fn stack_order_without_selection_is_noop() {
    let mut core = core();
    add_sticker(&mut core);
    core.clear_selection();
    assert!(core.bring_selected_to_front().is_empty());
    assert!(core.send_selected_to_back().is_empty());
}

// =============================================================
// Selection and text edits
// =============================================================

#[test]
fn selecting_vehicle_clears_selection() {
    let mut core = core();
    add_sticker(&mut core);
    let vehicle = core.scene.vehicle().unwrap().id;
    let actions = core.select(vehicle);
    assert!(actions.contains(&Action::SelectionChanged { selected: None }));
    assert_eq!(core.selection(), None);
}

#[test]
fn style_edit_applies_to_bound_text() {
    let mut core = core();
    let id = created_id(&core.add_text("GO", None).unwrap());
    let edit = TextStyleEdit { font_size_pt: Some(48), color_hex: Some("#F00".into()), ..Default::default() };
    let actions = core.edit_text_style(&edit).unwrap();
    let style = core.object(&id).unwrap().text_data().unwrap().style.clone();
    assert_eq!(style.font_size_pt, 48);
    assert_eq!(style.color_hex, "#ff0000");
    assert_eq!(actions, [Action::TextStyleApplied { id, style }, Action::RenderNeeded]);
}

#[test]
fn style_edit_is_dropped_when_detached() {
    let mut core = core();
    let id = created_id(&core.add_text("GO", None).unwrap());
    core.clear_selection();
    let edit = TextStyleEdit { font_size_pt: Some(48), ..Default::default() };
    assert!(core.edit_text_style(&edit).unwrap().is_empty());
    assert_eq!(core.object(&id).unwrap().text_data().unwrap().style.font_size_pt, 24);
}

#[test]
fn invalid_style_edit_leaves_text_unchanged() {
    let mut core = core();
    let id = created_id(&core.add_text("GO", None).unwrap());
    let edit = TextStyleEdit { font_size_pt: Some(0), ..Default::default() };
    assert!(core.edit_text_style(&edit).is_err());
    assert_eq!(core.object(&id).unwrap().text_data().unwrap().style, TextStyle::default());
}

// =============================================================
// Pointer gestures
// =============================================================

#[test]
fn drag_moves_object_and_reports_on_release() {
    let mut core = core();
    let id = add_sticker(&mut core);
    let start = center_of(&core, id);

    core.on_pointer_down(start, Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::DraggingObject { .. }));
    assert_eq!(core.on_pointer_move(pt(start.x + 10.0, start.y + 5.0), no_modifiers()), [Action::RenderNeeded]);
    core.on_pointer_move(pt(start.x + 20.0, start.y + 10.0), no_modifiers());
    let actions = core.on_pointer_up(pt(start.x + 20.0, start.y + 10.0), Button::Primary, no_modifiers());

    let t = core.object(&id).unwrap().transform;
    assert!((t.x - start.x - 20.0).abs() < 1e-9);
    assert!((t.y - start.y - 10.0).abs() < 1e-9);
    assert!(actions.contains(&Action::ObjectModified { id, transform: t }));
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn click_without_motion_reports_no_modification() {
    let mut core = core();
    let id = add_sticker(&mut core);
    let at = center_of(&core, id);
    core.on_pointer_down(at, Button::Primary, no_modifiers());
    let actions = core.on_pointer_up(at, Button::Primary, no_modifiers());
    assert!(!actions.iter().any(|a| matches!(a, Action::ObjectModified { .. })));
}

#[test]
fn pointer_down_on_body_selects_it() {
    let mut core = core();
    let first = add_sticker(&mut core);
    let text = created_id(&core.add_text("X", None).unwrap());
    core.scene.apply_partial(&text, &PartialTransform { x: Some(-500.0), ..Default::default() });
    core.clear_selection();

    let actions = core.on_pointer_down(center_of(&core, first), Button::Primary, no_modifiers());
    assert!(actions.contains(&Action::SelectionChanged { selected: Some(first) }));
    assert_eq!(core.selection(), Some(first));
}

#[test]
fn pointer_down_on_empty_canvas_clears_selection() {
    let mut core = core();
    let id = add_sticker(&mut core);
    core.scene.apply_partial(&id, &PartialTransform { x: Some(50.0), y: Some(50.0), ..Default::default() });
    let actions = core.on_pointer_down(pt(790.0, 590.0), Button::Primary, no_modifiers());
    assert!(actions.contains(&Action::SelectionChanged { selected: None }));
    assert_eq!(core.selection(), None);
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = core();
    let id = add_sticker(&mut core);
    assert!(core.on_pointer_down(center_of(&core, id), Button::Secondary, no_modifiers()).is_empty());
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn corner_handle_scales_uniformly() {
    let mut core = core();
    let id = add_sticker(&mut core);
    let c = center_of(&core, id);
    // 60 * 0.8 / 2 = 24 px half extent.
    core.on_pointer_down(pt(c.x + 24.0, c.y + 24.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::ScalingObject { .. }));
    core.on_pointer_move(pt(c.x + 48.0, c.y + 48.0), no_modifiers());
    let t = core.object(&id).unwrap().transform;
    assert!((t.scale_x - 1.6).abs() < 1e-9);
    assert!((t.scale_y - 1.6).abs() < 1e-9);
    assert_eq!(t.center(), c);
}

#[test]
fn scaling_never_collapses_object() {
    let mut core = core();
    let id = add_sticker(&mut core);
    let c = center_of(&core, id);
    core.on_pointer_down(pt(c.x - 24.0, c.y - 24.0), Button::Primary, no_modifiers());
    core.on_pointer_move(c, no_modifiers());
    assert_eq!(core.object(&id).unwrap().transform.scale_x, MIN_OBJECT_SCALE);
}

#[test]
fn rotate_handle_rotates_about_center() {
    let mut core = core();
    let id = add_sticker(&mut core);
    let c = center_of(&core, id);
    // Handle sits 24 px above the 24 px half height.
    core.on_pointer_down(pt(c.x, c.y - 48.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::RotatingObject { .. }));
    core.on_pointer_move(pt(c.x + 48.0, c.y), no_modifiers());
    assert!((core.object(&id).unwrap().transform.rotation - 90.0).abs() < 1e-9);
}

#[test]
fn shift_snaps_rotation() {
    let mut core = core();
    let id = add_sticker(&mut core);
    let c = center_of(&core, id);
    core.on_pointer_down(pt(c.x, c.y - 48.0), Button::Primary, no_modifiers());

    core.on_pointer_move(pt(c.x + 48.0, c.y + 8.0), no_modifiers());
    let free = core.object(&id).unwrap().transform.rotation;
    assert!(free > 99.0 && free < 100.0);

    core.on_pointer_move(pt(c.x + 48.0, c.y + 8.0), shift());
    assert!((core.object(&id).unwrap().transform.rotation - 105.0).abs() < 1e-9);
}

#[test]
fn hover_updates_cursor_once() {
    let mut core = core();
    let id = add_sticker(&mut core);
    let c = center_of(&core, id);
    assert_eq!(core.on_pointer_move(c, no_modifiers()), [Action::SetCursor { cursor: "move".into() }]);
    assert!(core.on_pointer_move(pt(c.x + 1.0, c.y), no_modifiers()).is_empty());
    assert_eq!(
        core.on_pointer_move(pt(c.x + 24.0, c.y + 24.0), no_modifiers()),
        [Action::SetCursor { cursor: "nwse-resize".into() }]
    );
}

#[test]
fn vehicle_is_never_grabbed() {
    let mut core = core();
    core.clear_selection();
    assert!(core.on_pointer_down(pt(400.0, 300.0), Button::Primary, no_modifiers()).is_empty());
    assert!(matches!(core.input, InputState::Idle));
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn delete_removes_selected_object() {
    let mut core = core();
    let id = add_sticker(&mut core);
    let actions = core.on_key_down(&Key("Delete".into()), no_modifiers());
    assert_eq!(actions[0], Action::ObjectRemoved { id });
    assert!(core.object(&id).is_none());
    assert_eq!(core.selection(), None);
}

#[test]
fn delete_without_selection_is_noop() {
    let mut core = core();
    assert!(core.on_key_down(&Key("Delete".into()), no_modifiers()).is_empty());
    assert_eq!(core.scene.len(), 1);
}

#[test]
fn backspace_never_deletes_the_selection() {
    let mut core = core();
    let id = add_sticker(&mut core);
    assert!(core.on_key_down(&Key("Backspace".into()), no_modifiers()).is_empty());
    assert!(core.object(&id).is_some());
    assert_eq!(core.selection(), Some(id));
}

#[test]
fn escape_clears_selection() {
    let mut core = core();
    add_sticker(&mut core);
    let actions = core.on_key_down(&Key("Escape".into()), no_modifiers());
    assert!(actions.contains(&Action::Panel { binding: PanelBinding::Detached }));
    assert_eq!(core.selection(), None);
}

#[test]
fn other_keys_are_ignored() {
    let mut core = core();
    add_sticker(&mut core);
    assert!(core.on_key_down(&Key("a".into()), no_modifiers()).is_empty());
}

// =============================================================
// Display list and actions
// =============================================================

#[test]
fn display_list_flags_selection() {
    let mut core = core();
    let id = add_sticker(&mut core);
    let list = core.display_list();
    assert_eq!(list.len(), 2);
    assert!(list[1].selected && list[1].id == id);
    assert!(!list[0].selected);
}

#[test]
fn actions_serialize_with_type_tag() {
    let json = serde_json::to_value(Action::SetCursor { cursor: "move".into() }).unwrap();
    assert_eq!(json["type"], "set_cursor");
    assert_eq!(json["cursor"], "move");
    let json = serde_json::to_value(Action::SceneCleared).unwrap();
    assert_eq!(json["type"], "scene_cleared");
}

#[test]
fn recover_passes_success_through() {
    assert_eq!(recover(Ok(vec![Action::RenderNeeded])), [Action::RenderNeeded]);
    assert!(recover(Err(DesignerError::UnknownSticker(5))).is_empty());
}

#[test]
fn recover_absorbs_missing_dom_target_without_notice() {
    assert!(recover(Err(DesignerError::MissingDomTarget("body".into()))).is_empty());
    assert!(recover(Err(DesignerError::DimensionUnavailable)).is_empty());
}
