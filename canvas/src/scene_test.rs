#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Point;

fn record(points: &str) -> WorkRecord {
    WorkRecord {
        points: points.to_owned(),
        fill: "#123456".into(),
        stroke: "#654321".into(),
        tx: 1.5,
        ty: -2.0,
        canonical_points: Some("0,0 10,0 10,10".into()),
    }
}

#[test]
fn stored_format_uses_expected_keys() {
    let state = SceneState {
        buffer: vec![PaletteEntry::new("0,0 1,0 1,1", "#a", "#b")],
        work: vec![record("1.0,2.0 3.0,4.0 5.0,0.0")],
        view_box: Some(ViewRect::new(1.0, 2.0, 120.0, 72.0)),
    };
    let value: serde_json::Value = serde_json::from_str(&state.to_json().expect("encode")).expect("json");
    assert_eq!(value["buffer"][0]["viewBox"], "0 0 100 70");
    assert_eq!(value["work"][0]["canonicalPoints"], "0,0 10,0 10,10");
    assert_eq!(value["work"][0]["tx"], 1.5);
    assert_eq!(value["viewBox"]["w"], 120.0);
}

#[test]
fn json_round_trip_is_lossless() {
    let state = SceneState {
        buffer: vec![PaletteEntry::new("0,0 1,0 1,1", "#a", "#b")],
        work: vec![record("1.0,2.0 3.0,4.0 5.0,0.0")],
        view_box: Some(ViewRect::new(-3.25, 2.5, 133.1, 79.86)),
    };
    let back = SceneState::from_json(&state.to_json().expect("encode")).expect("decode");
    assert_eq!(back, state);
}

#[test]
fn missing_sections_default_to_empty() {
    let state = SceneState::from_json("{}").expect("decode");
    assert!(state.is_empty());
}

#[test]
fn work_record_defaults_missing_fields() {
    let state = SceneState::from_json(r#"{"work":[{"points":"0,0 1,0 0,1"}]}"#).expect("decode");
    let r = &state.work[0];
    assert_eq!(r.tx, 0.0);
    assert_eq!(r.fill, "#c2185b");
    assert!(r.canonical_points.is_none());
}

#[test]
fn load_or_empty_tolerates_garbage() {
    assert!(SceneState::load_or_empty(None).is_empty());
    assert!(SceneState::load_or_empty(Some("")).is_empty());
    assert!(SceneState::load_or_empty(Some("{not json")).is_empty());
    assert!(SceneState::load_or_empty(Some("[1,2,3]")).is_empty());
}

#[test]
fn load_or_empty_keeps_valid_state() {
    let state = SceneState::load_or_empty(Some(r#"{"viewBox":{"x":1,"y":2,"w":3,"h":4}}"#));
    assert_eq!(state.view_box, Some(ViewRect::new(1.0, 2.0, 3.0, 4.0)));
}

#[test]
fn record_to_shape_restores_translate() {
    let shape = record("1.0,2.0 3.0,4.0 5.0,0.0").to_shape().expect("shape");
    assert_eq!(shape.points[1], Point::new(3.0, 4.0));
    assert_eq!(shape.tx, 1.5);
    assert_eq!(shape.ty, -2.0);
    assert_eq!(shape.canonical, "0,0 10,0 10,10");
}

#[test]
fn record_without_canonical_falls_back_to_points() {
    let mut r = record("1.0,2.0 3.0,4.0 5.0,0.0");
    r.canonical_points = None;
    assert_eq!(r.to_shape().expect("shape").canonical, "1.0,2.0 3.0,4.0 5.0,0.0");
}

#[test]
fn record_with_bad_points_is_error() {
    assert!(record("1,2 oops").to_shape().is_err());
}

#[test]
fn shape_to_record_and_back() {
    let before = record("1.0,2.0 3.0,4.0 5.0,0.0").to_shape().expect("shape");
    let back = WorkRecord::from_shape(&before).to_shape().expect("shape");
    assert_eq!(back.points, before.points);
    assert_eq!(back.tx, before.tx);
    assert_eq!(back.fill, before.fill);
    assert_eq!(back.canonical, before.canonical);
}
