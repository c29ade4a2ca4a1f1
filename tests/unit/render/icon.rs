use super::*;
use crate::{
    foundation::{
        core::{Canvas, Rect},
        error::CardError,
    },
    text::{backend::TextMeasure, fixed::FixedAdvanceText},
};

struct BrokenText;

impl TextMeasure for BrokenText {
    fn measure(&mut self, _text: &str, _size_px: f32) -> CardResult<f64> {
        Err(CardError::measurement_unavailable("broken"))
    }
}

impl TextBackend for BrokenText {
    fn ready(&mut self) -> CardResult<()> {
        Err(CardError::measurement_unavailable("broken"))
    }

    fn fill_text(
        &mut self,
        _surface: &mut Surface,
        _text: &str,
        _baseline_origin: Point,
        _size_px: f32,
        _color: Rgba8,
    ) -> CardResult<()> {
        Err(CardError::measurement_unavailable("broken"))
    }
}

fn all_icons() -> Vec<IconSelector> {
    vec![
        IconSelector::None,
        IconSelector::Warning,
        IconSelector::Thinking,
        IconSelector::Blocked,
        IconSelector::Emoji("\u{1F3AE}".to_string()),
    ]
}

fn bbox(prim: &IconPrimitive) -> Option<Rect> {
    match prim {
        IconPrimitive::Stroke { path, .. } | IconPrimitive::Fill { path } => {
            Some(path.bounding_box())
        }
        IconPrimitive::Text { .. } => None,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn none_draws_nothing() {
    assert!(icon_primitives(&IconSelector::None, Point::ORIGIN, 30.0).is_empty());
}

#[test]
fn warning_matches_reference_badge_geometry() {
    let prims = icon_primitives(&IconSelector::Warning, Point::new(50.0, 900.0), 30.0);
    assert_eq!(prims.len(), 3);

    let IconPrimitive::Stroke { path, width } = &prims[0] else {
        panic!("triangle must be stroked");
    };
    assert!(approx(*width, 3.0));
    let tri = path.bounding_box();
    assert!(approx(tri.x0, 55.0) && approx(tri.x1, 75.0));
    assert!(approx(tri.y0, 905.0) && approx(tri.y1, 925.0));

    let bar = bbox(&prims[1]).unwrap();
    assert!(approx(bar.x0, 65.0) && approx(bar.x1, 65.0));
    assert!(approx(bar.y0, 910.0) && approx(bar.y1, 918.0));

    let IconPrimitive::Fill { path } = &prims[2] else {
        panic!("dot must be filled");
    };
    let dot = path.bounding_box();
    assert!(approx(dot.center().x, 65.0) && approx(dot.center().y, 922.5));
    assert!(approx(dot.width(), 4.0));
}

#[test]
fn blocked_slash_is_seventy_percent_of_size_at_45_degrees() {
    let prims = icon_primitives(&IconSelector::Blocked, Point::ORIGIN, 30.0);
    let IconPrimitive::Stroke { path: ring, .. } = &prims[0] else {
        panic!("ring must be stroked");
    };
    assert!(approx(ring.bounding_box().width(), 24.0));

    let slash = bbox(&prims[1]).unwrap();
    let len = (slash.width().powi(2) + slash.height().powi(2)).sqrt();
    assert!(approx(len, 21.0));
    assert!(approx(slash.width(), slash.height()));
}

#[test]
fn thinking_is_filled_cloud_plus_two_bubbles() {
    let prims = icon_primitives(&IconSelector::Thinking, Point::ORIGIN, 30.0);
    assert_eq!(prims.len(), 3);
    assert!(prims.iter().all(|p| matches!(p, IconPrimitive::Fill { .. })));
    let smallest = bbox(&prims[2]).unwrap();
    assert!(approx(smallest.width(), 3.0));
}

#[test]
fn emoji_sits_on_badge_baseline() {
    let prims = icon_primitives(
        &IconSelector::Emoji("ok".to_string()),
        Point::new(50.0, 900.0),
        30.0,
    );
    assert_eq!(
        prims,
        vec![IconPrimitive::Text {
            glyph: "ok".to_string(),
            baseline: Point::new(50.0, 925.0),
            size_px: 30.0,
        }]
    );
}

#[test]
fn primitives_scale_uniformly_with_size() {
    for icon in all_icons() {
        let small = icon_primitives(&icon, Point::ORIGIN, 30.0);
        let large = icon_primitives(&icon, Point::ORIGIN, 60.0);
        assert_eq!(small.len(), large.len(), "{icon}");
        for (s, l) in small.iter().zip(&large) {
            match (s, l) {
                (
                    IconPrimitive::Stroke { width: ws, .. },
                    IconPrimitive::Stroke { width: wl, .. },
                ) => assert!(approx(*wl, ws * 2.0)),
                (IconPrimitive::Text { size_px: a, .. }, IconPrimitive::Text { size_px: b, .. }) => {
                    assert_eq!(*b, a * 2.0)
                }
                _ => {}
            }
            if let (Some(bs), Some(bl)) = (bbox(s), bbox(l)) {
                assert!(approx(bl.x0, bs.x0 * 2.0), "{icon}");
                assert!(approx(bl.y0, bs.y0 * 2.0), "{icon}");
                assert!(approx(bl.x1, bs.x1 * 2.0), "{icon}");
                assert!(approx(bl.y1, bs.y1 * 2.0), "{icon}");
            }
        }
    }
}

#[test]
fn draw_icon_restores_state_for_every_variant() {
    let mut text = FixedAdvanceText::new();
    for icon in all_icons() {
        let mut surface = Surface::new(Canvas {
            width: 40,
            height: 40,
        })
        .unwrap();
        surface.set_fill_color(Rgba8::rgb(9, 9, 9));
        surface.set_line_width(0.5);
        let before = surface.state();

        draw_icon(
            &mut surface,
            &mut text,
            &icon,
            Point::new(5.0, 5.0),
            30.0,
            Rgba8::WHITE,
        )
        .unwrap();
        assert_eq!(surface.state(), before, "{icon}");
        assert_eq!(surface.saved_depth(), 0, "{icon}");
    }
}

#[test]
fn draw_icon_paints_the_warning_outline() {
    let mut surface = Surface::new(Canvas {
        width: 40,
        height: 40,
    })
    .unwrap();
    draw_icon(
        &mut surface,
        &mut FixedAdvanceText::new(),
        &IconSelector::Warning,
        Point::ORIGIN,
        30.0,
        Rgba8::WHITE,
    )
    .unwrap();
    let frame = surface.finish();
    // Bottom edge, exclamation bar, and the empty gap beside it.
    assert_eq!(frame.pixel(15, 24), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(15, 14), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(10, 20), Some([0, 0, 0, 0]));
}

#[test]
fn text_backend_errors_propagate_after_restoring_state() {
    let mut surface = Surface::new(Canvas {
        width: 40,
        height: 40,
    })
    .unwrap();
    let before = surface.state();
    let err = draw_icon(
        &mut surface,
        &mut BrokenText,
        &IconSelector::Emoji("x".to_string()),
        Point::ORIGIN,
        30.0,
        Rgba8::WHITE,
    )
    .unwrap_err();
    assert!(matches!(err, CardError::MeasurementUnavailable(_)));
    assert_eq!(surface.state(), before);
    assert_eq!(surface.saved_depth(), 0);
}
