#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn view(x: f64, y: f64, w: f64, h: f64) -> ViewRect {
    ViewRect::new(x, y, w, h)
}

// --- Point / Viewport ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn viewport_zero_is_degenerate() {
    assert!(Viewport::new(0.0, 100.0).is_degenerate());
    assert!(Viewport::new(100.0, 0.0).is_degenerate());
    assert!(Viewport::new(f64::NAN, 10.0).is_degenerate());
    assert!(!Viewport::new(1.0, 1.0).is_degenerate());
}

// --- ViewRect defaults and accessors ---

#[test]
fn view_default_is_initial_window() {
    let v = ViewRect::default();
    assert_eq!(v, view(0.0, 0.0, 100.0, 60.0));
}

#[test]
fn view_edges_and_center() {
    let v = view(10.0, 20.0, 100.0, 60.0);
    assert_eq!(v.right(), 110.0);
    assert_eq!(v.bottom(), 80.0);
    assert!(point_approx_eq(v.center(), Point::new(60.0, 50.0)));
}

#[test]
fn view_serializes_with_short_keys() {
    let json = serde_json::to_value(view(1.0, 2.0, 3.0, 4.0)).expect("serialize");
    assert_eq!(json, serde_json::json!({ "x": 1.0, "y": 2.0, "w": 3.0, "h": 4.0 }));
}

// --- screen_to_world / world_to_screen ---

#[test]
fn screen_to_world_matching_aspect() {
    let v = view(0.0, 0.0, 100.0, 60.0);
    let vp = Viewport::new(1000.0, 600.0);
    let w = v.screen_to_world(Point::new(500.0, 300.0), vp);
    assert!(point_approx_eq(w, Point::new(50.0, 30.0)));
}

#[test]
fn screen_to_world_with_offset_origin() {
    let v = view(-20.0, 40.0, 100.0, 60.0);
    let vp = Viewport::new(500.0, 300.0);
    let w = v.screen_to_world(Point::new(0.0, 0.0), vp);
    assert!(point_approx_eq(w, Point::new(-20.0, 40.0)));
}

#[test]
fn screen_to_world_letterboxes_mismatched_aspect() {
    // 100x60 view in a 1000x1000 viewport: scale 10, 200px bands above/below.
    let v = view(0.0, 0.0, 100.0, 60.0);
    let vp = Viewport::new(1000.0, 1000.0);
    let w = v.screen_to_world(Point::new(0.0, 200.0), vp);
    assert!(point_approx_eq(w, Point::new(0.0, 0.0)));
}

#[test]
fn world_to_screen_matching_aspect() {
    let v = view(10.0, 10.0, 100.0, 60.0);
    let vp = Viewport::new(200.0, 120.0);
    let s = v.world_to_screen(Point::new(60.0, 40.0), vp);
    assert!(point_approx_eq(s, Point::new(100.0, 60.0)));
}

#[test]
fn round_trip_world_first() {
    let v = view(13.7, -42.3, 173.0, 91.0);
    let vp = Viewport::new(811.0, 433.0);
    let world = Point::new(33.3, -9.9);
    let back = v.screen_to_world(v.world_to_screen(world, vp), vp);
    assert!(point_approx_eq(world, back));
}

#[test]
fn round_trip_screen_first() {
    let v = view(5.0, 5.0, 150.0, 90.0);
    let vp = Viewport::new(640.0, 384.0);
    let screen = Point::new(123.0, 45.0);
    let back = v.world_to_screen(v.screen_to_world(screen, vp), vp);
    assert!(point_approx_eq(screen, back));
}

#[test]
fn degenerate_viewport_maps_one_to_one() {
    let v = view(10.0, 20.0, 100.0, 60.0);
    let w = v.screen_to_world(Point::new(5.0, 5.0), Viewport::default());
    assert!(point_approx_eq(w, Point::new(15.0, 25.0)));
    assert!(w.x.is_finite() && w.y.is_finite());
}

#[test]
fn px_per_world_uses_limiting_axis() {
    let v = view(0.0, 0.0, 100.0, 60.0);
    assert!(approx_eq(v.px_per_world(Viewport::new(1000.0, 1000.0)), 10.0));
    assert!(approx_eq(v.px_per_world(Viewport::new(200.0, 600.0)), 2.0));
}

// --- zoomed ---

#[test]
fn zoom_out_at_center_matches_reference() {
    let config = DeskConfig::default();
    let v = view(0.0, 0.0, 100.0, 60.0);
    let z = v.zoomed(v.center(), ZoomDirection::Out, &config);
    assert!(approx_eq(z.width, 110.0));
    assert!(approx_eq(z.height, 66.0));
    assert!(approx_eq(z.x, -5.0));
    assert!(approx_eq(z.y, -3.0));
}

#[test]
fn zoom_in_is_clamped_at_min_width() {
    let config = DeskConfig::default();
    let v = view(0.0, 0.0, 100.0, 60.0);
    let z = v.zoomed(Point::new(30.0, 10.0), ZoomDirection::In, &config);
    assert!(approx_eq(z.width, 100.0));
    assert!(approx_eq(z.height, 60.0));
    assert!(approx_eq(z.x, 0.0));
    assert!(approx_eq(z.y, 0.0));
}

#[test]
fn zoom_out_is_clamped_at_max_width() {
    let config = DeskConfig::default();
    let v = view(0.0, 0.0, 290.0, 174.0);
    let z = v.zoomed(v.center(), ZoomDirection::Out, &config);
    assert!(approx_eq(z.width, 300.0));
    assert!(approx_eq(z.height, 180.0));
}

#[test]
fn zoom_keeps_aspect() {
    let config = DeskConfig::default();
    let v = view(3.0, 4.0, 200.0, 125.0);
    let z = v.zoomed(Point::new(50.0, 50.0), ZoomDirection::In, &config);
    assert!(approx_eq(z.width / z.height, 200.0 / 125.0));
}

#[test]
fn zoom_keeps_anchor_fixed_on_screen() {
    let config = DeskConfig::default();
    let vp = Viewport::new(800.0, 500.0);
    let v = view(-37.0, 12.0, 200.0, 125.0);
    let screen = Point::new(613.0, 97.0);
    let before = v.screen_to_world(screen, vp);
    for dir in [ZoomDirection::In, ZoomDirection::Out] {
        let z = v.zoomed(before, dir, &config);
        let after = z.screen_to_world(screen, vp);
        assert!((after.x - before.x).abs() < 1e-6);
        assert!((after.y - before.y).abs() < 1e-6);
    }
}

// --- fitted_to ---

#[test]
fn fit_keeps_center_and_height() {
    let v = view(0.0, 0.0, 100.0, 60.0);
    let fitted = v.fitted_to(Viewport::new(400.0, 120.0)).expect("fit");
    assert!(approx_eq(fitted.width, 200.0));
    assert!(approx_eq(fitted.height, 60.0));
    assert!(approx_eq(fitted.center().x, 50.0));
    assert!(approx_eq(fitted.x, -50.0));
}

#[test]
fn fit_degenerate_viewport_is_none() {
    assert!(ViewRect::default().fitted_to(Viewport::new(0.0, 0.0)).is_none());
}

// --- PanGrip ---

#[test]
fn pan_grip_moves_opposite_to_pointer() {
    let v = view(0.0, 0.0, 100.0, 60.0);
    let grip = PanGrip::new(&v, Point::new(100.0, 100.0), Viewport::new(1000.0, 600.0));
    let target = grip.target_for(Point::new(150.0, 80.0));
    assert!(point_approx_eq(target, Point::new(-5.0, 2.0)));
}

#[test]
fn regrip_restarts_at_last_pointer() {
    let v = view(0.0, 0.0, 100.0, 60.0);
    let mut grip = PanGrip::new(&v, Point::new(100.0, 100.0), Viewport::new(1000.0, 600.0));
    grip.follow(Point::new(130.0, 100.0));

    let wider = view(-10.0, 0.0, 120.0, 60.0);
    let fresh = grip.regrip(&wider, Viewport::new(1200.0, 600.0));
    assert!(point_approx_eq(fresh.target_for(Point::new(130.0, 100.0)), Point::new(-10.0, 0.0)));
    assert!(point_approx_eq(fresh.target_for(Point::new(140.0, 100.0)), Point::new(-11.0, 0.0)));
}

// --- PanAnimator ---

#[test]
fn kick_only_schedules_once() {
    let mut anim = PanAnimator::new(&ViewRect::default());
    assert!(anim.kick());
    assert!(!anim.kick());
}

#[test]
fn step_eases_toward_target() {
    let mut v = view(0.0, 0.0, 100.0, 60.0);
    let mut anim = PanAnimator::new(&v);
    anim.target = Point::new(8.0, -4.0);
    assert!(anim.step(&mut v, 0.25, 0.05));
    assert!(approx_eq(v.x, 2.0));
    assert!(approx_eq(v.y, -1.0));
    assert!(anim.frame_pending);
}

#[test]
fn step_snaps_when_converged() {
    let mut v = view(0.0, 0.0, 100.0, 60.0);
    let mut anim = PanAnimator::new(&v);
    anim.target = Point::new(0.04, 0.01);
    assert!(!anim.step(&mut v, 0.25, 0.05));
    assert_eq!(v.x, 0.04);
    assert_eq!(v.y, 0.01);
    assert!(!anim.frame_pending);
}

#[test]
fn step_keeps_running_while_active() {
    let mut v = view(0.0, 0.0, 100.0, 60.0);
    let mut anim = PanAnimator::new(&v);
    anim.active = true;
    assert!(anim.step(&mut v, 0.25, 0.05));
    assert_eq!(v.x, 0.0);
}

#[test]
fn animation_converges_exactly() {
    let mut v = view(0.0, 0.0, 100.0, 60.0);
    let mut anim = PanAnimator::new(&v);
    anim.target = Point::new(37.5, -12.25);
    let mut frames = 0;
    while anim.step(&mut v, 0.25, 0.05) {
        frames += 1;
        assert!(frames < 200, "pan animation did not converge");
    }
    assert_eq!(v.x, 37.5);
    assert_eq!(v.y, -12.25);
}
