use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::geometry::parse_points;

fn entry(points: &str) -> PaletteEntry {
    PaletteEntry::new(points, "#111111", "#222222")
}

// --- PaletteEntry ---

#[test]
fn new_entry_uses_default_frame() {
    assert_eq!(entry("0,0 1,1 0,1").view_box, "0 0 100 70");
}

#[test]
fn deserialize_fills_missing_fields() {
    let e: PaletteEntry = serde_json::from_str(r#"{"points":"0,0 1,0 1,1"}"#).expect("entry");
    assert_eq!(e.view_box, "0 0 100 70");
    assert_eq!(e.fill, "#c2185b");
    assert_eq!(e.stroke, "#8a1143");
}

#[test]
fn serialize_uses_view_box_key() {
    let json = serde_json::to_value(entry("0,0 1,0 1,1")).expect("serialize");
    assert_eq!(json["viewBox"], "0 0 100 70");
    assert!(json.get("view_box").is_none());
}

#[test]
fn random_entry_fits_thumbnail_frame() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let e = PaletteEntry::random(&mut rng);
        let pts = parse_points(&e.points).expect("generated points parse");
        assert!((3..=10).contains(&pts.len()));
        for p in pts {
            assert!(p.x > 0.0 && p.x < 100.0);
            assert!(p.y > 0.0 && p.y < 70.0);
        }
        assert_eq!(e.fill, "#bf175aff");
        assert_eq!(e.stroke, "#8b1747ff");
    }
}

#[test]
fn payload_carries_canonical_points_and_colors() {
    let p = entry("0,0 5,0 5,5").payload();
    assert_eq!(p.canonical_points, "0,0 5,0 5,5");
    assert_eq!(p.fill, "#111111");
    assert_eq!(p.stroke, "#222222");
}

// --- DragPayload ---

#[test]
fn payload_json_uses_camel_case() {
    let raw = entry("1,2 3,4 5,6").payload().to_json().expect("encode");
    assert!(raw.contains("\"canonicalPoints\""));
    let back = DragPayload::from_json(&raw).expect("decode").expect("payload");
    assert_eq!(back.canonical_points, "1,2 3,4 5,6");
}

#[test]
fn blank_payload_is_none() {
    assert!(DragPayload::from_json("").expect("blank").is_none());
    assert!(DragPayload::from_json("  ").expect("blank").is_none());
    assert!(DragPayload::from_json(r#"{"canonicalPoints":""}"#).expect("empty points").is_none());
}

#[test]
fn payload_accepts_points_alias() {
    let p = DragPayload::from_json(r#"{"points":"0,0 1,1 2,0"}"#).expect("decode").expect("payload");
    assert_eq!(p.canonical_points, "0,0 1,1 2,0");
    assert_eq!(p.fill, "#c2185b");
}

#[test]
fn malformed_payload_is_error() {
    assert!(matches!(DragPayload::from_json("{nope"), Err(DeskError::Json(_))));
}

// --- PaletteStore ---

#[test]
fn add_preserves_order() {
    let mut store = PaletteStore::new();
    store.add(vec![entry("0,0 1,0 1,1"), entry("0,0 2,0 2,2")]);
    store.add(vec![entry("0,0 3,0 3,3")]);
    let points: Vec<&str> = store.entries().iter().map(|e| e.points.as_str()).collect();
    assert_eq!(points, vec!["0,0 1,0 1,1", "0,0 2,0 2,2", "0,0 3,0 3,3"]);
}

#[test]
fn accept_drop_appends_with_default_frame() {
    let mut store = PaletteStore::new();
    store.add(vec![entry("0,0 1,0 1,1")]);
    let payload = DragPayload {
        canonical_points: "9,9 8,8 7,9".into(),
        fill: "#abcdef".into(),
        stroke: "#fedcba".into(),
    };
    let index = store.accept_drop(&payload);
    assert_eq!(index, 1);
    let e = store.get(1).expect("dropped entry");
    assert_eq!(e.points, "9,9 8,8 7,9");
    assert_eq!(e.view_box, "0 0 100 70");
    assert_eq!(e.fill, "#abcdef");
}

#[test]
fn take_removes_and_shifts() {
    let mut store = PaletteStore::new();
    store.add(vec![entry("a"), entry("b"), entry("c")]);
    assert_eq!(store.take(1).map(|e| e.points), Some("b".to_owned()));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(1).map(|e| e.points.as_str()), Some("c"));
    assert!(store.take(5).is_none());
}

#[test]
fn serialize_then_add_round_trips() {
    let mut store = PaletteStore::new();
    store.add(vec![entry("0,0 1,0 1,1"), entry("0,0 2,0 2,2")]);
    let saved = store.serialize();

    let mut restored = PaletteStore::new();
    restored.add(saved.clone());
    assert_eq!(restored.serialize(), saved);
}

#[test]
fn clear_empties_store() {
    let mut store = PaletteStore::new();
    store.add(vec![entry("0,0 1,0 1,1")]);
    store.clear();
    assert!(store.is_empty());
}
