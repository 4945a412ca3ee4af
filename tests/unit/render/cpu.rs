use super::*;

use crate::animation::{AnimationStyle, Dot};
use crate::foundation::core::{Canvas, Vec2};
use crate::render::view::Decorations;
use crate::scene::NodeId;
use crate::viewport::Camera;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn empty_view<'a>(canvas: Canvas, style: &'a AnimationStyle) -> FrameView<'a> {
    FrameView {
        canvas,
        camera: Camera::default(),
        background: None,
        nodes: &[],
        path: &[],
        dots: &[],
        style,
        decorations: Decorations::default(),
    }
}

fn assert_near(got: Option<[u8; 4]>, want: [u8; 4]) {
    let got = got.unwrap();
    for (g, w) in got.iter().zip(want) {
        assert!(g.abs_diff(w) <= 1, "got {got:?}, want {want:?}");
    }
}

#[test]
fn clear_color_fills_the_frame() {
    let style = AnimationStyle::default();
    let opts = RenderOpts::default().with_clear_rgba(Rgba8::rgb(255, 255, 255));
    let mut be = CpuBackend::new(opts);
    let frame = be.render(&empty_view(canvas(16, 16), &style)).unwrap();
    assert_eq!((frame.width, frame.height), (16, 16));
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 16 * 16 * 4);
    assert_near(frame.pixel(0, 0), [255, 255, 255, 255]);
    assert_near(frame.pixel(15, 15), [255, 255, 255, 255]);
}

#[test]
fn without_clear_color_the_frame_is_transparent() {
    let style = AnimationStyle::default();
    let mut be = CpuBackend::new(RenderOpts::default());
    let frame = be.render(&empty_view(canvas(8, 8), &style)).unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn node_body_is_drawn_through_the_camera() {
    let style = AnimationStyle::default();
    let nodes = [Node::new(NodeId(1), Point::new(32.0, 32.0))];
    let mut be = CpuBackend::new(RenderOpts::default());

    let mut view = empty_view(canvas(64, 64), &style);
    view.nodes = &nodes;
    let frame = be.render(&view).unwrap();
    assert_near(frame.pixel(40, 40), [0x29, 0x80, 0xb9, 255]);
    assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 0]));

    view.camera.pan(Vec2::new(-20.0, 0.0));
    let frame = be.render(&view).unwrap();
    assert_near(frame.pixel(20, 40), [0x29, 0x80, 0xb9, 255]);
    assert_eq!(frame.pixel(56, 40), Some([0, 0, 0, 0]));
}

#[test]
fn markers_follow_progress_and_skip_hidden_scene() {
    let style = AnimationStyle::default();
    let path = [Point::new(8.0, 32.0), Point::new(56.0, 32.0)];
    let dots = [Dot { progress: 0.5 }];
    let mut be = CpuBackend::new(RenderOpts::default());

    let mut view = empty_view(canvas(64, 64), &style);
    view.path = &path;
    view.dots = &dots;
    view.decorations = Decorations::markers_only();
    let frame = be.render(&view).unwrap();
    assert_near(frame.pixel(32, 32), [0, 255, 0, 255]);
    // The path polyline itself is not drawn.
    assert_eq!(frame.pixel(12, 32), Some([0, 0, 0, 0]));
}

#[test]
fn background_is_stretched_over_the_canvas() {
    let style = AnimationStyle::default();
    let bg = BackgroundImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new([255u8, 0, 0, 255].repeat(4)),
    };
    let mut be = CpuBackend::new(RenderOpts::default());
    let mut view = empty_view(canvas(8, 8), &style);
    view.background = Some(&bg);

    let frame = be.render(&view).unwrap();
    assert_near(frame.pixel(4, 4), [255, 0, 0, 255]);
    assert_near(frame.pixel(7, 7), [255, 0, 0, 255]);

    // Rendering again reuses the cached paint.
    let again = be.render(&view).unwrap();
    assert_eq!(frame.data, again.data);
}

#[test]
fn oversized_canvas_is_a_render_error() {
    let style = AnimationStyle::default();
    let mut be = CpuBackend::new(RenderOpts::default());
    let err = be
        .render(&empty_view(canvas(70_000, 4), &style))
        .unwrap_err();
    assert!(matches!(err, FlowloopError::Render(_)));
}

#[test]
fn grid_far_from_the_origin_still_terminates() {
    let style = AnimationStyle::default();
    let mut be = CpuBackend::new(RenderOpts::default());
    let mut view = empty_view(canvas(64, 64), &style);
    view.decorations.grid = Some(1.0);

    // One grid step is far below the float spacing at this distance.
    view.camera.translation = Vec2::new(-1e20, 0.0);
    be.render(&view).unwrap();

    // Zoomed far out the overlay is skipped instead of drawn line by line.
    view.camera = Camera {
        translation: Vec2::ZERO,
        zoom: 1e-9,
    };
    let frame = be.render(&view).unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));

    view.camera.zoom = 1.0;
    let frame = be.render(&view).unwrap();
    assert!(frame.data.iter().any(|&b| b != 0));
}

const LABEL_FONT: &[u8] = include_bytes!("../../data/fonts/DejaVuSans-Bold.ttf");

/// Pixels around `(cx, cy)` bright enough to be label ink over the blue node body.
fn label_ink(frame: &FrameRGBA, cx: u32, cy: u32, reach: u32) -> usize {
    let mut count = 0;
    for y in cy - reach..=cy + reach {
        for x in cx - reach..=cx + reach {
            if frame.pixel(x, y).is_some_and(|px| px[0] > 150) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn node_ids_are_labeled_when_a_font_is_configured() {
    let style = AnimationStyle::default();
    let nodes = [Node::new(NodeId(88), Point::new(32.0, 32.0))];
    let mut view = empty_view(canvas(64, 64), &style);
    view.nodes = &nodes;

    let mut plain = CpuBackend::new(RenderOpts::default());
    let frame = plain.render(&view).unwrap();
    assert_eq!(label_ink(&frame, 32, 32, 8), 0);

    let opts = RenderOpts::default().with_label_font(LABEL_FONT.to_vec());
    let mut labeled = CpuBackend::new(opts);
    let frame = labeled.render(&view).unwrap();
    let at_zoom_1 = label_ink(&frame, 32, 32, 8);
    assert!(at_zoom_1 > 0);

    // Zoomed in around the node the label keeps its on-screen size.
    view.camera = Camera {
        translation: Vec2::new(-32.0, -32.0),
        zoom: 2.0,
    };
    let frame = labeled.render(&view).unwrap();
    let at_zoom_2 = label_ink(&frame, 32, 32, 8);
    assert!(
        at_zoom_1.abs_diff(at_zoom_2) <= at_zoom_1 / 4,
        "{at_zoom_1} vs {at_zoom_2}"
    );

    // Markers-only frames never shape labels.
    view.decorations = Decorations::markers_only();
    let frame = labeled.render(&view).unwrap();
    assert_eq!(label_ink(&frame, 32, 32, 8), 0);
}

#[test]
fn unusable_label_font_fails_once_nodes_are_drawn() {
    let style = AnimationStyle::default();
    let opts = RenderOpts::default().with_label_font(b"not a font".to_vec());
    let mut be = CpuBackend::new(opts);
    let mut view = empty_view(canvas(32, 32), &style);
    be.render(&view).unwrap();

    let nodes = [Node::new(NodeId(1), Point::new(16.0, 16.0))];
    view.nodes = &nodes;
    let err = be.render(&view).unwrap_err();
    assert!(matches!(err, FlowloopError::Validation(_)));
}
