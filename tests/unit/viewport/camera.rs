use super::*;

const EPS: f64 = 1e-9;

fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
        "{a:?} != {b:?}"
    );
}

fn cameras() -> Vec<Camera> {
    vec![
        Camera::default(),
        Camera {
            translation: Vec2::new(120.5, -33.25),
            zoom: 2.5,
        },
        Camera {
            translation: Vec2::new(-400.0, 17.0),
            zoom: 0.125,
        },
    ]
}

fn screen_points() -> Vec<Point> {
    vec![
        Point::ORIGIN,
        Point::new(400.0, 300.0),
        Point::new(-12.5, 999.75),
        Point::new(0.001, 1e4),
    ]
}

#[test]
fn transform_round_trips() {
    for cam in cameras() {
        for p in screen_points() {
            assert_close(cam.screen_from_world(cam.world_from_screen(p)), p);
        }
    }
}

#[test]
fn zoom_keeps_world_point_under_cursor() {
    for mut cam in cameras() {
        for cursor in screen_points() {
            for dir in [ZoomDirection::In, ZoomDirection::Out] {
                let before = cam.world_from_screen(cursor);
                cam.zoom_at(cursor, dir);
                let after = cam.world_from_screen(cursor);
                let tol = 1e-9 * (1.0 + before.to_vec2().hypot());
                assert!(
                    (before - after).hypot() < tol,
                    "anchor drifted: {before:?} -> {after:?}"
                );
            }
        }
    }
}

#[test]
fn zoom_factor_is_exponential() {
    let mut cam = Camera::default();
    cam.zoom_at(Point::ORIGIN, ZoomDirection::In);
    assert!((cam.zoom - 0.1f64.exp()).abs() < EPS);
    cam.zoom_at(Point::ORIGIN, ZoomDirection::Out);
    assert!((cam.zoom - 1.0).abs() < EPS);
}

#[test]
fn wheel_sign_maps_to_direction() {
    assert_eq!(ZoomDirection::from_wheel_delta(-3.0), ZoomDirection::In);
    assert_eq!(ZoomDirection::from_wheel_delta(3.0), ZoomDirection::Out);
    assert_eq!(ZoomDirection::from_wheel_delta(0.0), ZoomDirection::Out);
}

#[test]
fn pan_shifts_screen_mapping() {
    let mut cam = Camera::default();
    cam.pan(Vec2::new(10.0, -5.0));
    assert_close(cam.world_from_screen(Point::new(10.0, -5.0)), Point::ORIGIN);
}

#[test]
fn affine_matches_screen_from_world() {
    for cam in cameras() {
        for p in screen_points() {
            assert_close(cam.affine() * p, cam.screen_from_world(p));
        }
    }
}

#[test]
fn visible_rect_covers_canvas() {
    let cam = Camera {
        translation: Vec2::new(100.0, 50.0),
        zoom: 2.0,
    };
    let r = cam.visible_world_rect(Canvas {
        width: 200,
        height: 100,
    });
    assert_eq!(r, Rect::new(-50.0, -25.0, 50.0, 25.0));
}
